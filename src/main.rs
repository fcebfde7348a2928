mod config;
mod database;
mod entities;
mod forms;
mod http_server;
mod logging;
mod seed;
mod services;
#[cfg(test)]
mod test_utils;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::Context};

use crate::{
    config::Config, database::Database, http_server::app::HttpServerConfig,
    logging::init_tracing, seed::SeedOutcome,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "BOOKING_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file, overrides the config file
    #[arg(long, env = "BOOKING_DATABASE", global = true)]
    database: Option<PathBuf>,

    /// Console log filter, e.g. `info` or `booking_directory=debug,tower_http=debug`
    #[arg(long, default_value = "info", global = true, env = "LOG_LEVEL")]
    log_level: String,

    /// File log filter
    #[arg(long, default_value = "debug", global = true)]
    log_file_level: String,

    /// Path to log file, overrides the config file
    #[arg(long, env = "BOOKING_LOG_FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the booking directory website
    Serve {
        /// Address to bind, overrides the config file
        #[arg(long, env = "BOOKING_HOST")]
        host: Option<String>,

        /// The port to run the server on, overrides the config file
        #[arg(short, long, env = "BOOKING_PORT")]
        port: Option<u16>,
    },
    /// Load the demo venues, artists and shows into an empty database
    Seed,
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let config = {
        if let Some(config) = &args.config {
            Config::from_file(config)
        } else {
            Config::load()
        }
    }
    .with_context(|| "Failed to load booking-directory config")?;

    let log_file = args.log_file.clone().or_else(|| config.log_file_path());
    init_tracing(&args.log_level, log_file.as_deref(), &args.log_file_level)?;
    log::debug!("Booking directory starting");

    let database_path = args
        .database
        .clone()
        .unwrap_or_else(|| config.database_path());

    match args.command {
        Commands::Config(config_commands) => match config_commands {
            ConfigCommands::CreateDefault => {
                log::debug!("Creating default config");
                let path = Config::create_default()?;
                log::info!("Default config available at {}", path.display());
            }
            ConfigCommands::Path => match Config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            },
        },
        Commands::Seed => {
            let database = Database::open(&database_path).await?;
            match seed::seed(&database).await? {
                SeedOutcome::Seeded {
                    venues,
                    artists,
                    shows,
                } => println!("Seeded {venues} venues, {artists} artists and {shows} shows"),
                SeedOutcome::Skipped => println!("Database is not empty, nothing seeded"),
            }
        }
        Commands::Serve { host, port } => {
            let database = Arc::new(Database::open(&database_path).await?);
            let server = config.server();
            let http_config = HttpServerConfig {
                host: host.unwrap_or_else(|| server.host.clone()),
                port: port.unwrap_or(server.port),
            };
            log::info!(
                "Starting HTTP server on {}:{}",
                http_config.host,
                http_config.port
            );
            http_server::app::start(http_config, database).await?;
        }
    }

    Ok(())
}
