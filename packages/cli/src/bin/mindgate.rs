use std::process;

use clap::{Parser, Subcommand};
use mindgate_cli::{init_tracing, run_server, run_setup, Config};
use tracing::error;

#[derive(Parser)]
#[command(name = "mindgate")]
#[command(about = "Mindgate - marketing agent gateway for MindsDB")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Override the PORT environment variable
        #[arg(long)]
        port: Option<u16>,
    },
    /// Connect to MindsDB, create the project if missing, then exit
    Setup,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            process::exit(2);
        }
    };

    let result = match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port.filter(|p| *p != 0) {
                config.port = port;
            }
            run_server(config).await
        }
        Commands::Setup => run_setup(config).await,
    };

    if let Err(e) = result {
        error!("{:#}", e);
        process::exit(1);
    }
}
