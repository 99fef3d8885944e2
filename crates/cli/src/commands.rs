use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP gateway
    Serve(ServeArgs),

    /// Open the database with the gateway's engine options and run `SELECT 1`
    Check {
        #[command(flatten)]
        engine: EngineArgs,

        #[arg(long, help = "Load additional variables from this .env file")]
        env_file: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    #[command(flatten)]
    pub engine: EngineArgs,

    #[arg(long, help = "Address to listen on [env: BIND_HOST] [default: 127.0.0.1:8080]")]
    pub bind: Option<String>,

    #[arg(
        long,
        help = "Base URI clients use to reach the gateway, used in nextUri [env: EXTERNAL_URI]"
    )]
    pub external_uri: Option<String>,

    #[arg(long, help = "Rows on the first page of a statement [env: INITIAL_LIMIT] [default: 10]")]
    pub initial_limit: Option<u64>,

    #[arg(long, help = "Load additional variables from this .env file")]
    pub env_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    #[arg(long, help = "DuckDB database file [env: DUCKDB_FILE]")]
    pub database: Option<PathBuf>,

    #[arg(long, help = "Open the database read-write instead of read-only")]
    pub read_write: bool,

    #[arg(long, help = "Let SQL read local files and URLs")]
    pub allow_external_access: bool,

    #[arg(long, help = "Let DuckDB install and load known extensions on demand")]
    pub allow_extension_autoload: bool,
}
