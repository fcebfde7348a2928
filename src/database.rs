use color_eyre::{Result, eyre::Context};
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection};
use std::path::Path;
use std::time::Duration;

/// Connection pool shared by every request. Handlers never hold a connection
/// across requests; services borrow one per query or per transaction.
pub struct Database {
    pub conn: DatabaseConnection,
}

impl Database {
    /// Open or create a database at the given path
    pub async fn open(path: &Path) -> Result<Self> {
        log::debug!("Opening database at: {}", path.display());

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).context(format!(
                "Failed to create database directory: {}",
                parent.display()
            ))?;
        }

        // Create SQLite connection URL
        let url = format!("sqlite://{}?mode=rwc", path.display());
        let database = Self::connect(&url).await?;

        log::info!("Database ready at: {}", path.display());
        Ok(database)
    }

    /// Connect to a database URL and bring its schema up to date.
    pub async fn connect(url: &str) -> Result<Self> {
        // Configure connection options
        let mut opt = ConnectOptions::new(url.to_owned());
        opt.max_connections(16)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(8))
            .acquire_timeout(Duration::from_secs(8))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false);

        Self::connect_with(opt).await
    }

    pub async fn connect_with(options: ConnectOptions) -> Result<Self> {
        let url = options.get_url().to_owned();
        // sqlx enables `PRAGMA foreign_keys` on every SQLite connection it opens
        let conn = SeaDatabase::connect(options)
            .await
            .context(format!("Failed to open database: {}", url))?;

        // Run migrations
        log::debug!("Running database migrations");
        migration::Migrator::up(&conn, None)
            .await
            .context("Failed to run database migrations")?;

        Ok(Database { conn })
    }
}
