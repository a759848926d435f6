//! # Repository Module
//!
//! Lookup implementations for flight records.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Presentation layer                                                    │
//! │       │                                                                 │
//! │       │  db.flights().delayed_flights_by_origin("ATL")                 │
//! │       ▼                                                                 │
//! │  FlightRepository                                                      │
//! │  ├── flight_by_id(&self, id)                                           │
//! │  ├── delayed_flights_by_date(&self, date)                              │
//! │  ├── delayed_flights_by_airline(&self, text)                           │
//! │  ├── delayed_flights_by_origin(&self, code)                            │
//! │  ├── route_delay_percentage(&self, origin, destination)                │
//! │  ├── airport_coordinates(&self, origin, destination)                   │
//! │  └── run(&self, template, params)   ← shared execution path            │
//! │       │                                                                 │
//! │       │  one template, one pooled connection                           │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`flight::FlightRepository`] - Read-only flight lookups

pub mod flight;
