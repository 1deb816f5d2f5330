use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::error;

use tickoff_cli::config::{parse_host, Config};

#[derive(Parser)]
#[command(name = "tickoff")]
#[command(about = "Tickoff - a small todo list API server")]
#[command(version)]
struct Cli {
    /// Address to bind (overrides TICKOFF_HOST)
    #[arg(long)]
    host: Option<String>,
    /// Port to listen on (overrides TICKOFF_PORT)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    port: Option<u16>,
    /// SQLite database file (overrides TICKOFF_DATABASE_PATH)
    #[arg(long)]
    database: Option<PathBuf>,
}

impl Cli {
    fn apply(self, mut config: Config) -> anyhow::Result<Config> {
        if let Some(host) = self.host {
            config.host = parse_host(&host)?;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(database) = self.database {
            config.database_path = database;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() {
    // Load .env file
    dotenvy::dotenv().ok();
    tickoff_cli::init_tracing();

    let cli = Cli::parse();

    let config = match Config::from_env()
        .map_err(anyhow::Error::from)
        .and_then(|config| cli.apply(config))
    {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = tickoff_cli::run_server(config).await {
        error!("Server error: {:#}", e);
        process::exit(1);
    }
}
