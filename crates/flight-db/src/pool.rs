//! # Database Pool Management
//!
//! Connection pool creation, configuration and teardown for SQLite.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  DbConfig::new(url) / DbConfig::from_env()                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← parse URL, open pool (fails fast)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐                │  (max_connections)        │
//! │  │  │Conn1│ │Conn2│ │Conn3│ ...            │                           │
//! │  │  └─────┘ └─────┘ └─────┘                │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │ each lookup acquires one connection and returns it on exit     │
//! │       ▼                                                                 │
//! │  Database::close().await ← explicit, idempotent teardown               │
//! │  (dropping the last Database / FlightRepository clone also frees it)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Read-Only By Default
//! Connections open the file with `SQLITE_OPEN_READONLY` unless
//! `read_only(false)` is set. The lookups never write.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::flight::FlightRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Environment variable holding the database URL.
pub const ENV_DATABASE_URL: &str = "FLIGHTS_DATABASE_URL";
/// Environment variable overriding `max_connections`.
pub const ENV_MAX_CONNECTIONS: &str = "FLIGHTS_DB_MAX_CONNECTIONS";
/// Environment variable overriding `connect_timeout`, in seconds.
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "FLIGHTS_DB_CONNECT_TIMEOUT_SECS";
/// Environment variable overriding `read_only` (`true`/`false`).
pub const ENV_READ_ONLY: &str = "FLIGHTS_DB_READ_ONLY";

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("sqlite://data/flights.sqlite3")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// sqlx SQLite URL, e.g. `sqlite://data/flights.sqlite3` or `sqlite::memory:`.
    pub database_url: String,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// How long to wait for a connection.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Open the database read-only.
    /// Default: true
    pub read_only: bool,

    /// Create the database file if it does not exist.
    /// Default: false
    pub create_if_missing: bool,
}

impl DbConfig {
    /// Creates a configuration for the given database URL.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = DbConfig::new("sqlite://data/flights.sqlite3");
    /// ```
    pub fn new(database_url: impl Into<String>) -> Self {
        DbConfig {
            database_url: database_url.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            read_only: true,
            create_if_missing: false,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether connections are read-only.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Sets whether a missing database file is created.
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// In-memory SQLite databases live per connection, so the pool is
    /// pinned to one connection and opened writable.
    pub fn in_memory() -> Self {
        DbConfig {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            read_only: false,
            create_if_missing: false,
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `FLIGHTS_DATABASE_URL` | required |
    /// | `FLIGHTS_DB_MAX_CONNECTIONS` | 5 |
    /// | `FLIGHTS_DB_CONNECT_TIMEOUT_SECS` | 30 |
    /// | `FLIGHTS_DB_READ_ONLY` | true |
    pub fn from_env() -> DbResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`DbConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> DbResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(ENV_DATABASE_URL)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| DbError::InvalidConfig(format!("{} is not set", ENV_DATABASE_URL)))?;

        let mut config = DbConfig::new(database_url);

        if let Some(raw) = lookup(ENV_MAX_CONNECTIONS) {
            config.max_connections = parse_var(ENV_MAX_CONNECTIONS, &raw)?;
        }

        if let Some(raw) = lookup(ENV_CONNECT_TIMEOUT_SECS) {
            config.connect_timeout = Duration::from_secs(parse_var(ENV_CONNECT_TIMEOUT_SECS, &raw)?);
        }

        if let Some(raw) = lookup(ENV_READ_ONLY) {
            config.read_only = parse_var(ENV_READ_ONLY, &raw)?;
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> DbResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| DbError::InvalidConfig(format!("{} has invalid value '{}'", key, raw)))
}

// =============================================================================
// Database
// =============================================================================

/// Owner of the connection pool and entry point to the lookups.
///
/// Cloning is cheap: clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Creates a new database connection pool.
    ///
    /// ## What This Does
    /// 1. Parses the connection URL
    /// 2. Applies read-only / create-if-missing flags
    /// 3. Opens the pool, connecting once up front
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use database handle
    /// * `Err(DbError::ConnectionFailed)` - Bad URL or the store could not be opened
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            url = %config.database_url,
            read_only = config.read_only,
            "Initializing database connection"
        );

        let connect_options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .read_only(config.read_only)
            .create_if_missing(config.create_if_missing);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        Ok(Database { pool })
    }

    /// Shorthand for `Database::new(DbConfig::new(url))`.
    pub async fn connect(database_url: &str) -> DbResult<Self> {
        Database::new(DbConfig::new(database_url)).await
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the flight lookups.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let lookup = db.flights().flight_by_id(42).await?;
    /// ```
    pub fn flights(&self) -> FlightRepository {
        FlightRepository::new(self.pool.clone())
    }

    /// Closes the connection pool.
    ///
    /// Waits for checked-out connections to come back, then closes them.
    /// Calling it again is a no-op. Lookups made afterwards come back as
    /// `Lookup::Failed`.
    pub async fn close(&self) {
        if self.pool.is_closed() {
            debug!("Database pool already closed");
            return;
        }
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// True once [`Database::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
