//! # flight-core: Pure Types for Flight Records
//!
//! This crate holds everything about flight lookups that does not touch a
//! database: the shape of returned rows, validated inputs, and the named
//! SQL templates that `flight-db` executes.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Flight Records Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation layer (consumer)                   │   │
//! │  │     "delayed flights on 1/1/2015", "flights by Delta", ...      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    flight-db (Database Layer)                   │   │
//! │  │          SqlitePool, FlightRepository, Lookup results           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ flight-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌────────────┐                │   │
//! │  │   │   types   │  │  template  │  │ validation │                │   │
//! │  │   │  Value    │  │ :name → ?N │  │  airport   │                │   │
//! │  │   │  Record   │  │  Params    │  │  carrier   │                │   │
//! │  │   │ FlightDate│  │            │  │            │                │   │
//! │  │   └───────────┘  └────────────┘  └────────────┘                │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `Value`, `Record`, `FlightDate`
//! - [`template`] - Named-placeholder SQL templates and parameter sets
//! - [`validation`] - Input checks run before a query is bound
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use flight_core::template::{Params, QueryTemplate};
//!
//! const BY_DAY: QueryTemplate =
//!     QueryTemplate::new("by_day", "SELECT * FROM flights WHERE DAY = :day AND MONTH = :month");
//!
//! let compiled = BY_DAY.compile();
//! assert_eq!(compiled.sql(), "SELECT * FROM flights WHERE DAY = ?1 AND MONTH = ?2");
//!
//! let params = Params::new().set("day", 1).set("month", 1);
//! assert_eq!(compiled.bind(&params).unwrap().len(), 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod template;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, TemplateError, ValidationError};
pub use template::{CompiledQuery, Params, QueryTemplate};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Departure delay, in minutes, at which a flight counts as delayed.
///
/// Every delayed-flight lookup and the route percentage query use this
/// threshold.
pub const DELAY_THRESHOLD_MINUTES: i64 = 20;

/// Escape character used when a user substring is embedded in a LIKE pattern.
pub const LIKE_ESCAPE: char = '\\';
