use crate::error::CliError;
use std::{collections::HashMap, fs, path::Path};

/// Process environment, optionally overlaid with a `.env` file.
///
/// Values from the file win over the process environment; command line
/// flags win over both (see `settings`).
#[derive(Debug, Clone, Default)]
pub struct EnvManager {
    vars: HashMap<String, String>,
}

impl EnvManager {
    pub fn from_process() -> Self {
        EnvManager {
            vars: std::env::vars().collect(),
        }
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        EnvManager {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), CliError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read env file {}: {e}", path.display()))
        })?;
        self.parse_env_content(&content)
    }

    /// Non-empty value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    fn parse_env_content(&mut self, content: &str) -> Result<(), CliError> {
        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line);
            let Some((key, value)) = line.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid env file: malformed line {} (expected KEY=VALUE)",
                    line_num + 1
                )));
            };

            let key = key.trim();
            if key.is_empty() {
                return Err(CliError::Config(format!(
                    "Invalid env file: empty key at line {}",
                    line_num + 1
                )));
            }

            self.vars.insert(key.to_string(), unquote(value.trim()));
        }
        Ok(())
    }
}

fn unquote(value: &str) -> String {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return value[1..value.len() - 1].to_string();
        }
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_basic_env() {
        let mut env = EnvManager::default();
        let content = r#"
# gateway
DUCKDB_FILE=/data/warehouse.duckdb
export BIND_HOST=0.0.0.0:8080
        "#;

        env.parse_env_content(content).unwrap();
        assert_eq!(env.get("DUCKDB_FILE"), Some("/data/warehouse.duckdb"));
        assert_eq!(env.get("BIND_HOST"), Some("0.0.0.0:8080"));
    }

    #[test]
    fn test_parse_quoted_values() {
        let mut env = EnvManager::default();
        let content = r#"
QUOTED="value with spaces"
SINGLE='single quoted'
EQUALS=a=b
EMPTY=
        "#;

        env.parse_env_content(content).unwrap();
        assert_eq!(env.get("QUOTED"), Some("value with spaces"));
        assert_eq!(env.get("SINGLE"), Some("single quoted"));
        assert_eq!(env.get("EQUALS"), Some("a=b"));
        assert_eq!(env.get("EMPTY"), None);
    }

    #[test]
    fn test_invalid_env_format() {
        let mut env = EnvManager::default();
        assert!(env.parse_env_content("INVALID LINE WITHOUT EQUALS").is_err());
        assert!(env.parse_env_content("=value").is_err());
    }

    #[test]
    fn test_file_overrides_process_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "INITIAL_LIMIT=50").unwrap();

        let mut env = EnvManager::from_vars([("INITIAL_LIMIT", "10"), ("BIND_HOST", "h:1")]);
        env.load_from_file(file.path()).unwrap();
        assert_eq!(env.get("INITIAL_LIMIT"), Some("50"));
        assert_eq!(env.get("BIND_HOST"), Some("h:1"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let mut env = EnvManager::default();
        let err = env.load_from_file("/nonexistent/.env").unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
