use crate::{
    commands::{EngineArgs, ServeArgs},
    env::EnvManager,
    error::CliError,
};
use connectors::sql::duckdb::config::EngineConfig;
use engine_core::controller::DEFAULT_LIMIT;

pub const ENV_DUCKDB_FILE: &str = "DUCKDB_FILE";
pub const ENV_BIND_HOST: &str = "BIND_HOST";
pub const ENV_EXTERNAL_URI: &str = "EXTERNAL_URI";
pub const ENV_EXTERNAL_HOST: &str = "EXTERNAL_HOST";
pub const ENV_INITIAL_LIMIT: &str = "INITIAL_LIMIT";

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Everything `serve` needs, after merging flags and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySettings {
    pub engine: EngineConfig,
    pub bind: String,
    pub external_uri: String,
    pub initial_limit: u64,
}

impl GatewaySettings {
    pub fn resolve(args: ServeArgs, env: &EnvManager) -> Result<Self, CliError> {
        let engine = engine_config(args.engine, env)?;

        let bind = args
            .bind
            .or_else(|| env.get(ENV_BIND_HOST).map(str::to_string))
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        // `EXTERNAL_HOST` is the older, scheme-less name of the same setting.
        let external_uri = args
            .external_uri
            .or_else(|| env.get(ENV_EXTERNAL_URI).map(str::to_string))
            .or_else(|| env.get(ENV_EXTERNAL_HOST).map(str::to_string))
            .unwrap_or_else(|| bind.clone());

        let initial_limit = match args.initial_limit {
            Some(limit) => limit,
            None => match env.get(ENV_INITIAL_LIMIT) {
                Some(raw) => raw.parse().map_err(|_| {
                    CliError::Config(format!(
                        "{ENV_INITIAL_LIMIT} must be a positive integer, got '{raw}'"
                    ))
                })?,
                None => DEFAULT_LIMIT,
            },
        };

        Ok(GatewaySettings {
            engine,
            bind,
            external_uri,
            initial_limit,
        })
    }
}

pub fn engine_config(args: EngineArgs, env: &EnvManager) -> Result<EngineConfig, CliError> {
    let path = args
        .database
        .or_else(|| env.get(ENV_DUCKDB_FILE).map(Into::into))
        .ok_or_else(|| {
            CliError::Config(format!(
                "no database given; pass --database or set {ENV_DUCKDB_FILE}"
            ))
        })?;

    Ok(EngineConfig {
        read_only: !args.read_write,
        allow_external_access: args.allow_external_access,
        allow_extension_autoload: args.allow_extension_autoload,
        ..EngineConfig::new(path)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_environment_only() {
        let env = EnvManager::from_vars([
            (ENV_DUCKDB_FILE, "/data/w.duckdb"),
            (ENV_BIND_HOST, "0.0.0.0:9000"),
            (ENV_EXTERNAL_HOST, "gateway.internal:9000"),
            (ENV_INITIAL_LIMIT, "100"),
        ]);
        let settings = GatewaySettings::resolve(ServeArgs::default(), &env).unwrap();

        assert_eq!(settings.engine, EngineConfig::new("/data/w.duckdb"));
        assert_eq!(settings.bind, "0.0.0.0:9000");
        assert_eq!(settings.external_uri, "gateway.internal:9000");
        assert_eq!(settings.initial_limit, 100);
    }

    #[test]
    fn test_flags_win_over_environment() {
        let env = EnvManager::from_vars([
            (ENV_DUCKDB_FILE, "/env.duckdb"),
            (ENV_EXTERNAL_URI, "http://env"),
            (ENV_INITIAL_LIMIT, "100"),
        ]);
        let args = ServeArgs {
            engine: EngineArgs {
                database: Some(PathBuf::from("/flag.duckdb")),
                read_write: true,
                ..Default::default()
            },
            external_uri: Some("https://flag".into()),
            initial_limit: Some(5),
            ..Default::default()
        };
        let settings = GatewaySettings::resolve(args, &env).unwrap();

        assert_eq!(settings.engine.path, PathBuf::from("/flag.duckdb"));
        assert!(!settings.engine.read_only);
        assert_eq!(settings.external_uri, "https://flag");
        assert_eq!(settings.initial_limit, 5);
    }

    #[test]
    fn test_defaults() {
        let env = EnvManager::from_vars([(ENV_DUCKDB_FILE, "w.duckdb")]);
        let settings = GatewaySettings::resolve(ServeArgs::default(), &env).unwrap();

        assert_eq!(settings.bind, DEFAULT_BIND);
        assert_eq!(settings.external_uri, DEFAULT_BIND);
        assert_eq!(settings.initial_limit, DEFAULT_LIMIT);
        assert!(settings.engine.read_only);
        assert!(!settings.engine.allow_external_access);
    }

    #[test]
    fn test_missing_database() {
        let err = GatewaySettings::resolve(ServeArgs::default(), &EnvManager::default())
            .unwrap_err();
        assert!(err.to_string().contains(ENV_DUCKDB_FILE));
    }

    #[test]
    fn test_bad_initial_limit() {
        let env = EnvManager::from_vars([(ENV_DUCKDB_FILE, "w.duckdb"), (ENV_INITIAL_LIMIT, "ten")]);
        assert!(matches!(
            GatewaySettings::resolve(ServeArgs::default(), &env),
            Err(CliError::Config(_))
        ));
    }
}
