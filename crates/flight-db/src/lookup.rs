//! # Lookup Results
//!
//! Every lookup returns a [`Lookup`] so callers can tell "nothing matched"
//! apart from "the query failed".
//!
//! ## Result States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  query ran, ≥1 row      ──► Lookup::Found(Vec<Record>)                 │
//! │  query ran, 0 rows      ──► Lookup::Empty                              │
//! │  query could not run    ──► Lookup::Failed(DbError)   (already logged) │
//! │                                                                         │
//! │  lookup.rows()          ──► Vec<Record>, Failed collapses to []        │
//! │  lookup.into_result()   ──► Result<Vec<Record>, DbError>               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use flight_core::Record;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::{DbError, DbResult};

/// Outcome of a lookup.
#[derive(Debug)]
pub enum Lookup {
    /// At least one row matched.
    Found(Vec<Record>),
    /// The query ran and matched nothing.
    Empty,
    /// The query did not complete.
    Failed(DbError),
}

impl Lookup {
    /// Number of rows; zero for `Empty` and `Failed`.
    pub fn len(&self) -> usize {
        match self {
            Lookup::Found(rows) => rows.len(),
            Lookup::Empty | Lookup::Failed(_) => 0,
        }
    }

    /// True for `Empty` and `Failed`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the query did not complete.
    pub fn is_failed(&self) -> bool {
        matches!(self, Lookup::Failed(_))
    }

    /// The failure, if any.
    pub fn error(&self) -> Option<&DbError> {
        match self {
            Lookup::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Borrows the matched rows; empty for `Empty` and `Failed`.
    pub fn records(&self) -> &[Record] {
        match self {
            Lookup::Found(rows) => rows,
            Lookup::Empty | Lookup::Failed(_) => &[],
        }
    }

    /// Takes the matched rows. A failure reads as "no rows".
    pub fn rows(self) -> Vec<Record> {
        match self {
            Lookup::Found(rows) => rows,
            Lookup::Empty | Lookup::Failed(_) => Vec::new(),
        }
    }

    /// Converts to a plain `Result`, surfacing the failure.
    pub fn into_result(self) -> DbResult<Vec<Record>> {
        match self {
            Lookup::Found(rows) => Ok(rows),
            Lookup::Empty => Ok(Vec::new()),
            Lookup::Failed(err) => Err(err),
        }
    }

    fn status(&self) -> &'static str {
        match self {
            Lookup::Found(_) => "found",
            Lookup::Empty => "empty",
            Lookup::Failed(_) => "failed",
        }
    }
}

impl From<Vec<Record>> for Lookup {
    fn from(rows: Vec<Record>) -> Self {
        if rows.is_empty() {
            Lookup::Empty
        } else {
            Lookup::Found(rows)
        }
    }
}

/// `{"status": "found" | "empty" | "failed", "rows": [...], "error": null | "..."}`
impl Serialize for Lookup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Lookup", 3)?;
        state.serialize_field("status", self.status())?;
        state.serialize_field("rows", self.records())?;
        state.serialize_field("error", &self.error().map(ToString::to_string))?;
        state.end()
    }
}
