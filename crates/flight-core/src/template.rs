//! # Query Templates
//!
//! Named SQL strings with `:name` placeholders, and the parameter sets
//! bound to them.
//!
//! ## Why Compile?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Placeholder Compilation                              │
//! │                                                                         │
//! │  Template text (readable, named):                                      │
//! │    ... WHERE f.DAY = :day AND f.MONTH = :month AND f.YEAR = :year      │
//! │       │                                                                 │
//! │       ▼  compile()                                                      │
//! │  SQL sent to SQLite (numbered):                                        │
//! │    ... WHERE f.DAY = ?1 AND f.MONTH = ?2 AND f.YEAR = ?3               │
//! │  params: ["day", "month", "year"]                                      │
//! │       │                                                                 │
//! │       ▼  bind(&Params)                                                  │
//! │  [Integer(1), Integer(1), Integer(2015)]  → sqlx .bind() in order      │
//! │                                                                         │
//! │  A name used twice maps to the same ?N, so it is bound once.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The scanner skips quoted strings/identifiers and `::` casts, so
//! `'12:30'` or `x::text` are never taken for placeholders.

use std::collections::BTreeMap;

use crate::error::TemplateError;
use crate::types::Value;

// =============================================================================
// Query Template
// =============================================================================

/// An immutable, named SQL statement with `:name` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTemplate {
    name: &'static str,
    sql: &'static str,
}

impl QueryTemplate {
    /// Declares a template. Usable in `const` position.
    pub const fn new(name: &'static str, sql: &'static str) -> Self {
        QueryTemplate { name, sql }
    }

    /// Template name, used in logs and errors.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Template text as written.
    #[inline]
    pub const fn sql(&self) -> &'static str {
        self.sql
    }

    /// Distinct placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Vec<&'static str> {
        self.compile().params
    }

    /// Rewrites `:name` placeholders to SQLite's numbered `?N` form.
    pub fn compile(&self) -> CompiledQuery {
        let sql = self.sql;
        let bytes = sql.as_bytes();
        let mut out = String::with_capacity(sql.len());
        let mut params: Vec<&'static str> = Vec::new();
        let mut quote: Option<u8> = None;
        let mut copied = 0;
        let mut i = 0;

        while i < bytes.len() {
            let b = bytes[i];

            if let Some(q) = quote {
                if b == q {
                    quote = None;
                }
                i += 1;
                continue;
            }

            match b {
                b'\'' | b'"' => {
                    quote = Some(b);
                    i += 1;
                }
                b':' if bytes.get(i + 1) == Some(&b':') => {
                    // `::` cast, not a placeholder
                    i += 2;
                }
                b':' if bytes
                    .get(i + 1)
                    .is_some_and(|c| c.is_ascii_alphabetic() || *c == b'_') =>
                {
                    let start = i + 1;
                    let mut end = start;
                    while end < bytes.len()
                        && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_')
                    {
                        end += 1;
                    }
                    let name = &sql[start..end];

                    let index = match params.iter().position(|p| *p == name) {
                        Some(pos) => pos + 1,
                        None => {
                            params.push(name);
                            params.len()
                        }
                    };

                    out.push_str(&sql[copied..i]);
                    out.push('?');
                    out.push_str(&index.to_string());
                    copied = end;
                    i = end;
                }
                _ => i += 1,
            }
        }
        out.push_str(&sql[copied..]);

        CompiledQuery {
            template: self.name,
            sql: out,
            params,
        }
    }
}

// =============================================================================
// Compiled Query
// =============================================================================

/// A template rewritten to positional placeholders, with the parameter
/// name for each position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    template: &'static str,
    sql: String,
    params: Vec<&'static str>,
}

impl CompiledQuery {
    /// Name of the template this was compiled from.
    #[inline]
    pub fn template(&self) -> &'static str {
        self.template
    }

    /// SQL with `?N` placeholders.
    #[inline]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Parameter names; position `i` is bound to `?{i + 1}`.
    #[inline]
    pub fn param_names(&self) -> &[&'static str] {
        &self.params
    }

    /// Resolves the values to bind, in placeholder order.
    ///
    /// Extra entries in `params` are ignored. A missing one is an error.
    pub fn bind<'p>(&self, params: &'p Params) -> Result<Vec<&'p Value>, TemplateError> {
        self.params
            .iter()
            .map(|name| {
                params
                    .get(name)
                    .ok_or_else(|| TemplateError::MissingParameter {
                        template: self.template.to_string(),
                        name: name.to_string(),
                    })
            })
            .collect()
    }
}

// =============================================================================
// Params
// =============================================================================

/// Named parameter values for a template.
///
/// ## Example
/// ```rust
/// use flight_core::{Params, Value};
///
/// let params = Params::new().set("origin", "ATL").set("day", 1);
/// assert_eq!(params.get("day"), Some(&Value::Integer(1)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: BTreeMap<String, Value>,
}

impl Params {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Params::default()
    }

    /// Sets a parameter, replacing any previous value of the same name.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Returns a parameter by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BY_DATE: QueryTemplate = QueryTemplate::new(
        "by_date",
        "SELECT * FROM flights WHERE DAY = :day AND MONTH = :month AND YEAR = :year",
    );

    #[test]
    fn test_compile_numbers_placeholders_in_order() {
        let compiled = BY_DATE.compile();
        assert_eq!(
            compiled.sql(),
            "SELECT * FROM flights WHERE DAY = ?1 AND MONTH = ?2 AND YEAR = ?3"
        );
        assert_eq!(compiled.param_names(), &["day", "month", "year"]);
        assert_eq!(compiled.template(), "by_date");
    }

    #[test]
    fn test_repeated_placeholder_reuses_index() {
        let template = QueryTemplate::new(
            "coords",
            "SELECT * FROM airports WHERE IATA_CODE = :code OR ALT_CODE = :code OR CITY = :city",
        );
        let compiled = template.compile();
        assert_eq!(
            compiled.sql(),
            "SELECT * FROM airports WHERE IATA_CODE = ?1 OR ALT_CODE = ?1 OR CITY = ?2"
        );
        assert_eq!(template.placeholders(), vec!["code", "city"]);
    }

    #[test]
    fn test_quoted_text_and_casts_are_not_placeholders() {
        let template = QueryTemplate::new(
            "quoted",
            r#"SELECT ':skip', "col:name", x::text FROM t WHERE a LIKE :pat ESCAPE '\'"#,
        );
        let compiled = template.compile();
        assert_eq!(
            compiled.sql(),
            r#"SELECT ':skip', "col:name", x::text FROM t WHERE a LIKE ?1 ESCAPE '\'"#
        );
        assert_eq!(compiled.param_names(), &["pat"]);
    }

    #[test]
    fn test_template_without_placeholders_is_unchanged() {
        let template = QueryTemplate::new("plain", "SELECT 1");
        let compiled = template.compile();
        assert_eq!(compiled.sql(), "SELECT 1");
        assert!(compiled.param_names().is_empty());
        assert!(compiled.bind(&Params::new()).unwrap().is_empty());
    }

    #[test]
    fn test_bind_orders_values_and_ignores_extras() {
        let params = Params::new()
            .set("year", 2015)
            .set("month", 1)
            .set("day", 2)
            .set("unused", "x");
        let values = BY_DATE.compile().bind(&params).unwrap();
        assert_eq!(
            values,
            vec![&Value::Integer(2), &Value::Integer(1), &Value::Integer(2015)]
        );
    }

    #[test]
    fn test_bind_reports_missing_parameter() {
        let params = Params::new().set("day", 1).set("month", 1);
        let err = BY_DATE.compile().bind(&params).unwrap_err();
        assert_eq!(
            err,
            TemplateError::MissingParameter {
                template: "by_date".to_string(),
                name: "year".to_string(),
            }
        );
    }
}
