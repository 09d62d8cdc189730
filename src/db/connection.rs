use rusqlite::Connection;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use crate::db::migrations::MigrationManager;

/// Value of `data.location` that selects a throwaway ledger
pub const MEMORY_LOCATION: &str = ":memory:";

/// Where the ledger lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    /// Seeded fresh for every process and dropped on exit
    Memory,
}

/// Database connection manager
pub struct DbConnection;

impl DbConnection {
    /// Directory holding the rc file and the default ledger
    pub fn data_dir() -> Result<PathBuf> {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .context("Failed to locate home directory (HOME not set)")?;
        Ok(home.join(".recruit"))
    }

    /// Get the default database path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("ledger.db"))
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("rc"))
    }

    /// Read `data.location` from rc file contents.
    /// Relative paths resolve against the directory holding the rc file.
    pub fn parse_location(config: &str, config_dir: &Path) -> Option<DbLocation> {
        for line in config.lines() {
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }
            if let Some(value) = line.strip_prefix("data.location=") {
                let value = value.trim();
                if value == MEMORY_LOCATION {
                    return Some(DbLocation::Memory);
                }
                let path = PathBuf::from(value);
                return Some(if path.is_relative() {
                    DbLocation::File(config_dir.join(path))
                } else {
                    DbLocation::File(path)
                });
            }
        }
        None
    }

    /// Get database location from configuration file or default
    pub fn resolve_location() -> Result<DbLocation> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let config = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
            let config_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
            if let Some(location) = Self::parse_location(&config, config_dir) {
                log::debug!("Ledger location from {}: {:?}", config_path.display(), location);
                return Ok(location);
            }
        }

        Ok(DbLocation::File(Self::default_path()?))
    }

    /// Connect to the configured ledger, creating and seeding it if needed
    pub fn connect() -> Result<Connection> {
        match Self::resolve_location()? {
            DbLocation::Memory => Self::connect_in_memory(),
            DbLocation::File(db_path) => Self::connect_path(&db_path),
        }
    }

    /// Open a ledger file, creating parent directories if needed
    pub fn connect_path(db_path: &Path) -> Result<Connection> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database: {}", db_path.display()))?;
        log::debug!("Opened ledger at {}", db_path.display());

        MigrationManager::initialize(&conn)
            .context("Failed to initialize database schema")?;

        Ok(conn)
    }

    /// Connect to an in-memory ledger seeded with the fixture data
    pub fn connect_in_memory() -> Result<Connection> {
        let conn = Connection::open_in_memory()
            .context("Failed to open in-memory database")?;
        log::debug!("Opened in-memory ledger");

        MigrationManager::initialize(&conn)
            .context("Failed to initialize database schema")?;

        Ok(conn)
    }
}
