//! # flight-db: Database Layer for Flight Records
//!
//! Read-only access to a SQLite store of flight schedule records. Each
//! lookup maps one question ("delayed flights on 1/1/2015") to one fixed
//! SQL template and returns the rows as [`flight_core::Record`]s.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Flight Records Data Flow                           │
//! │                                                                         │
//! │  Presentation layer: db.flights().delayed_flights_by_date(date)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     flight-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌──────────────────┐   ┌─────────────┐  │   │
//! │  │   │   Database    │    │ FlightRepository │   │  queries    │  │   │
//! │  │   │   (pool.rs)   │    │                  │   │             │  │   │
//! │  │   │ SqlitePool    │◄───│ acquire → bind → │◄──│ 6 fixed     │  │   │
//! │  │   │ close()       │    │ fetch → Records  │   │ templates   │  │   │
//! │  │   └───────────────┘    └────────┬─────────┘   └─────────────┘  │   │
//! │  │                                 ▼                               │   │
//! │  │                   Lookup::{Found, Empty, Failed}                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite: flights ⋈ airlines, airports                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - `DbConfig` and the `Database` pool owner
//! - [`queries`] - The fixed query templates
//! - [`repository`] - `FlightRepository`, the lookup operations
//! - [`lookup`] - `Lookup`, the tagged result of every lookup
//! - [`row`] - Row to `Record` materialization
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use flight_core::FlightDate;
//! use flight_db::Database;
//!
//! let db = Database::connect("sqlite://data/flights.sqlite3").await?;
//!
//! let delayed = db
//!     .flights()
//!     .delayed_flights_by_date(FlightDate::new(1, 1, 2015)?)
//!     .await?;
//!
//! if delayed.is_failed() {
//!     // logged already; decide whether to show "no flights" or an error
//! }
//! for record in delayed.rows() {
//!     println!("{:?}", record.get("DELAY"));
//! }
//!
//! db.close().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod lookup;
pub mod pool;
pub mod queries;
pub mod repository;
pub mod row;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use lookup::Lookup;
pub use pool::{Database, DbConfig};
pub use repository::flight::FlightRepository;
