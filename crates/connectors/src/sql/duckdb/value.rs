use ::duckdb::types::{TimeUnit, Value as DuckValue, ValueRef};
use base64::Engine as _;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta};
use model::core::value::Value;
use serde_json::Value as JsonValue;

const MICROS_PER_SECOND: i64 = 1_000_000;

/// Convert a DuckDB cell into its wire representation.
///
/// Numbers and booleans stay native and temporal types, decimals and blobs
/// become strings. ENUM cells are their label. LIST, ARRAY, STRUCT and MAP
/// cells become JSON arrays and objects.
pub fn to_value(value: ValueRef<'_>) -> Value {
    scalar(value).unwrap_or_else(|| nested(value.to_owned()))
}

fn scalar(value: ValueRef<'_>) -> Option<Value> {
    let value = match value {
        ValueRef::Null => Value::Null,
        ValueRef::Boolean(b) => Value::Boolean(b),
        ValueRef::TinyInt(i) => Value::Int(i.into()),
        ValueRef::SmallInt(i) => Value::Int(i.into()),
        ValueRef::Int(i) => Value::Int(i.into()),
        ValueRef::BigInt(i) => Value::Int(i),
        ValueRef::HugeInt(i) => match i64::try_from(i) {
            Ok(n) => Value::Int(n),
            Err(_) => Value::String(i.to_string()),
        },
        ValueRef::UTinyInt(i) => Value::Int(i.into()),
        ValueRef::USmallInt(i) => Value::Int(i.into()),
        ValueRef::UInt(i) => Value::Int(i.into()),
        ValueRef::UBigInt(i) => Value::Uint(i),
        ValueRef::Float(f) => Value::Float(f.into()),
        ValueRef::Double(f) => Value::Float(f),
        ValueRef::Decimal(d) => Value::String(d.to_string()),
        ValueRef::Text(s) => Value::String(String::from_utf8_lossy(s).into_owned()),
        ValueRef::Blob(b) => Value::String(base64::engine::general_purpose::STANDARD.encode(b)),
        ValueRef::Date32(days) => date(days),
        ValueRef::Timestamp(unit, v) => timestamp(unit, v),
        ValueRef::Time64(unit, v) => time(unit, v),
        ValueRef::Interval {
            months,
            days,
            nanos,
        } => Value::String(interval(months, days, nanos)),
        _ => return None,
    };
    Some(value)
}

fn nested(value: DuckValue) -> Value {
    match value {
        DuckValue::Enum(label) => Value::String(label),
        DuckValue::Union(inner) => nested(*inner),
        DuckValue::List(items) | DuckValue::Array(items) => Value::Json(JsonValue::Array(
            items.into_iter().map(|item| nested(item).into()).collect(),
        )),
        DuckValue::Struct(fields) => Value::Json(JsonValue::Object(
            fields
                .iter()
                .map(|(name, field)| (name.clone(), nested(field.clone()).into()))
                .collect(),
        )),
        // JSON keys are strings; other key types use their text form.
        DuckValue::Map(entries) => Value::Json(JsonValue::Object(
            entries
                .iter()
                .map(|(key, entry)| {
                    (nested(key.clone()).to_string(), nested(entry.clone()).into())
                })
                .collect(),
        )),
        other => scalar(ValueRef::from(&other))
            .unwrap_or_else(|| Value::String(format!("{other:?}"))),
    }
}

fn to_micros(unit: TimeUnit, v: i64) -> i64 {
    match unit {
        TimeUnit::Second => v.saturating_mul(MICROS_PER_SECOND),
        TimeUnit::Millisecond => v.saturating_mul(1_000),
        TimeUnit::Microsecond => v,
        TimeUnit::Nanosecond => v / 1_000,
    }
}

fn date(days: i32) -> Value {
    TimeDelta::try_days(days.into())
        .and_then(|delta| NaiveDate::default().checked_add_signed(delta))
        .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
        .unwrap_or_else(|| Value::Int(days.into()))
}

fn timestamp(unit: TimeUnit, v: i64) -> Value {
    DateTime::from_timestamp_micros(to_micros(unit, v))
        .map(|ts| Value::String(ts.naive_utc().format("%Y-%m-%d %H:%M:%S%.f").to_string()))
        .unwrap_or(Value::Int(v))
}

fn time(unit: TimeUnit, v: i64) -> Value {
    let micros = to_micros(unit, v);
    let secs = micros.div_euclid(MICROS_PER_SECOND);
    let nanos = micros.rem_euclid(MICROS_PER_SECOND) * 1_000;

    u32::try_from(secs)
        .ok()
        .and_then(|secs| NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos as u32))
        .map(|t| Value::String(t.format("%H:%M:%S%.f").to_string()))
        .unwrap_or(Value::Int(v))
}

// Same layout DuckDB uses when casting an INTERVAL to VARCHAR.
fn interval(months: i32, days: i32, nanos: i64) -> String {
    let mut parts = Vec::new();

    let (years, months) = (months / 12, months % 12);
    if years != 0 {
        parts.push(plural(years.into(), "year"));
    }
    if months != 0 {
        parts.push(plural(months.into(), "month"));
    }
    if days != 0 {
        parts.push(plural(days.into(), "day"));
    }

    if nanos != 0 || parts.is_empty() {
        let sign = if nanos < 0 { "-" } else { "" };
        let micros = (nanos / 1_000).unsigned_abs();
        let total_secs = micros / MICROS_PER_SECOND as u64;
        let frac = micros % MICROS_PER_SECOND as u64;
        let mut clock = format!(
            "{sign}{:02}:{:02}:{:02}",
            total_secs / 3600,
            (total_secs / 60) % 60,
            total_secs % 60
        );
        if frac != 0 {
            clock.push_str(&format!(".{frac:06}"));
        }
        parts.push(clock);
    }

    parts.join(" ")
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 || n == -1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}
