use crate::error::ConnectorError;
use ::duckdb::{AccessMode, Config};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const IN_MEMORY: &str = ":memory:";

/// Engine options as requested by the operator.
///
/// Defaults are the locked-down profile the gateway runs with: read-only,
/// no filesystem/network access from SQL, no extension auto-install or
/// auto-load, configuration locked against `SET` from queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Database file, or `:memory:`.
    pub path: PathBuf,
    pub read_only: bool,
    pub allow_external_access: bool,
    pub allow_extension_autoload: bool,
    pub lock_configuration: bool,
}

impl EngineConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            read_only: true,
            allow_external_access: false,
            allow_extension_autoload: false,
            lock_configuration: true,
        }
    }

    /// Check the options against each other and the filesystem.
    pub fn validate(self) -> Result<ValidatedEngineConfig, ConnectorError> {
        let mut errors = Vec::new();

        if self.path.as_os_str().is_empty() {
            errors.push("database path is empty".to_string());
        }

        let in_memory = self.path.as_os_str() == IN_MEMORY;
        if self.read_only && in_memory {
            errors.push("an in-memory database cannot be opened read-only".to_string());
        }

        if self.read_only && !in_memory && !self.path.is_file() {
            errors.push(format!(
                "database file '{}' does not exist",
                self.path.display()
            ));
        }

        if !errors.is_empty() {
            return Err(ConnectorError::InvalidConfig(errors.join("; ")));
        }

        if !self.read_only {
            warn!(path = %self.path.display(), "Opening database read-write");
        }
        if self.allow_external_access {
            warn!("External access is enabled; SQL can read files and URLs");
        }

        let validated = ValidatedEngineConfig {
            path: self.path,
            read_only: self.read_only,
            allow_external_access: self.allow_external_access,
            allow_extension_autoload: self.allow_extension_autoload,
            lock_configuration: self.lock_configuration,
        };
        info!(
            path = %validated.path.display(),
            read_only = validated.read_only,
            external_access = validated.allow_external_access,
            extension_autoload = validated.allow_extension_autoload,
            lock_configuration = validated.lock_configuration,
            "Engine configuration validated"
        );
        Ok(validated)
    }
}

/// Immutable, validated engine options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEngineConfig {
    path: PathBuf,
    read_only: bool,
    allow_external_access: bool,
    allow_extension_autoload: bool,
    lock_configuration: bool,
}

impl ValidatedEngineConfig {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }

    pub fn allow_external_access(&self) -> bool {
        self.allow_external_access
    }

    pub fn allow_extension_autoload(&self) -> bool {
        self.allow_extension_autoload
    }

    pub fn lock_configuration(&self) -> bool {
        self.lock_configuration
    }

    /// DuckDB configuration for opening the database.
    ///
    /// `lock_configuration` goes last, nothing can be changed after it.
    pub(crate) fn to_duckdb(&self) -> Result<Config, ConnectorError> {
        let access_mode = if self.read_only {
            AccessMode::ReadOnly
        } else {
            AccessMode::ReadWrite
        };
        let autoload = flag(self.allow_extension_autoload);

        Config::default()
            .access_mode(access_mode)
            .and_then(|c| c.enable_external_access(self.allow_external_access))
            .and_then(|c| c.with("autoinstall_known_extensions", autoload))
            .and_then(|c| c.with("autoload_known_extensions", autoload))
            .and_then(|c| c.with("lock_configuration", flag(self.lock_configuration)))
            .map_err(ConnectorError::Option)
    }
}

fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
