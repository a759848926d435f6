//! # Flight Repository
//!
//! Read-only lookups over `flights`, `airlines` and `airports`.
//!
//! ## Execution Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How A Lookup Runs                                    │
//! │                                                                         │
//! │  delayed_flights_by_origin("ATL")                                      │
//! │       │  validate input            ── Err(DbError::Validation)         │
//! │       ▼                                                                 │
//! │  Params { min_delay: 20, origin_airport: "ATL" }                       │
//! │       │  compile + bind            ── Err(DbError::Template)           │
//! │       ▼                                                                 │
//! │  pool.acquire()  ─┐                                                     │
//! │  fetch_all        ├─ any failure   ── Ok(Lookup::Failed) + error! log  │
//! │  rows → Records  ─┘                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(Lookup::Found(..)) / Ok(Lookup::Empty)                             │
//! │  (connection returns to the pool when `conn` drops)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use flight_core::validation::{contains_pattern, validate_airport_code};
use flight_core::{FlightDate, Params, QueryTemplate, Record, Value, DELAY_THRESHOLD_MINUTES};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::SqlitePool;
use tracing::{debug, error};

use crate::error::DbResult;
use crate::lookup::Lookup;
use crate::queries;
use crate::row::records_from_rows;

/// Repository for flight lookups.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.flights();
///
/// // One flight
/// let flight = repo.flight_by_id(42).await?;
///
/// // Delayed flights out of Atlanta, worst first
/// let delayed = repo.delayed_flights_by_origin("ATL").await?.rows();
/// ```
#[derive(Debug, Clone)]
pub struct FlightRepository {
    pool: SqlitePool,
}

impl FlightRepository {
    /// Creates a new FlightRepository.
    pub fn new(pool: SqlitePool) -> Self {
        FlightRepository { pool }
    }

    /// Gets one flight by its row id.
    ///
    /// ## Returns
    /// * `Lookup::Found` with exactly one record - all `flights` columns,
    ///   the carrier name as `AIRLINE_NAME`, plus `FLIGHT_ID` and `DELAY`
    /// * `Lookup::Empty` - no such flight
    pub async fn flight_by_id(&self, id: i64) -> DbResult<Lookup> {
        debug!(id, "Looking up flight by id");

        let params = Params::new().set("id", id);
        self.run(&queries::FLIGHT_BY_ID, &params).await
    }

    /// Delayed flights on a given day, sorted by delay, worst first.
    ///
    /// Each record has `ID`, `ORIGIN_AIRPORT`, `DESTINATION_AIRPORT`,
    /// `AIRLINE` (carrier name) and `DELAY`.
    pub async fn delayed_flights_by_date(&self, date: FlightDate) -> DbResult<Lookup> {
        debug!(date = %date, "Looking up delayed flights by date");

        let params = delayed_params()
            .set("day", date.day())
            .set("month", date.month())
            .set("year", date.year());
        self.run(&queries::DELAYED_FLIGHTS_BY_DATE, &params).await
    }

    /// Delayed flights whose carrier name contains `airline`.
    ///
    /// Matching is case-insensitive. `%` and `_` in the input are matched
    /// literally, and an empty string matches every carrier.
    ///
    /// ## Example
    /// ```rust,ignore
    /// // "Delta Air Lines Inc." flights, same as searching "DELTA"
    /// let delayed = repo.delayed_flights_by_airline("delta").await?;
    /// ```
    pub async fn delayed_flights_by_airline(&self, airline: &str) -> DbResult<Lookup> {
        debug!(airline = %airline, "Looking up delayed flights by airline");

        let params = delayed_params().set("airline", contains_pattern(airline));
        self.run(&queries::DELAYED_FLIGHTS_BY_AIRLINE, &params).await
    }

    /// Delayed flights departing from an airport, matched exactly by code.
    pub async fn delayed_flights_by_origin(&self, airport: &str) -> DbResult<Lookup> {
        validate_airport_code(airport)?;
        debug!(airport = %airport, "Looking up delayed flights by origin");

        let params = delayed_params().set("origin_airport", airport);
        self.run(&queries::DELAYED_FLIGHTS_BY_ORIGIN, &params).await
    }

    /// Percentage of delayed flights between two airports.
    ///
    /// Returns up to two records, `origin → destination` first, then the
    /// reverse direction, each with `PERCENT_DELAYED` in 0-100.
    pub async fn route_delay_percentage(&self, origin: &str, destination: &str) -> DbResult<Lookup> {
        validate_airport_code(origin)?;
        validate_airport_code(destination)?;
        debug!(origin = %origin, destination = %destination, "Computing route delay percentage");

        let params = delayed_params()
            .set("origin", origin)
            .set("destination", destination);
        self.run(&queries::ROUTE_DELAY_PERCENTAGE, &params).await
    }

    /// Latitude and longitude of two airports, `origin` first.
    pub async fn airport_coordinates(&self, origin: &str, destination: &str) -> DbResult<Lookup> {
        validate_airport_code(origin)?;
        validate_airport_code(destination)?;
        debug!(origin = %origin, destination = %destination, "Looking up airport coordinates");

        let params = Params::new()
            .set("origin", origin)
            .set("destination", destination);
        self.run(&queries::AIRPORT_COORDINATES, &params).await
    }

    /// Runs any template with the given parameters.
    ///
    /// ## Returns
    /// * `Err(DbError::Template)` - a placeholder has no value; nothing was sent
    /// * `Ok(Lookup::Failed)` - the query did not complete; the error is logged
    /// * `Ok(Lookup::Found | Lookup::Empty)` - otherwise
    pub async fn run(&self, template: &QueryTemplate, params: &Params) -> DbResult<Lookup> {
        let compiled = template.compile();
        let values = compiled.bind(params)?;

        match self.fetch(compiled.sql(), &values).await {
            Ok(records) => {
                debug!(
                    template = template.name(),
                    rows = records.len(),
                    "Lookup complete"
                );
                Ok(Lookup::from(records))
            }
            Err(err) => {
                error!(
                    template = template.name(),
                    error = %err,
                    "Lookup failed, returning no records"
                );
                Ok(Lookup::Failed(err))
            }
        }
    }

    async fn fetch(&self, sql: &str, values: &[&Value]) -> DbResult<Vec<Record>> {
        let mut conn = self.pool.acquire().await?;

        let query = values
            .iter()
            .fold(sqlx::query(sql), |query, value| bind_value(query, value));
        let rows = query.fetch_all(&mut *conn).await?;

        records_from_rows(&rows)
    }
}

/// Parameters shared by every delayed-flight template.
fn delayed_params() -> Params {
    Params::new().set("min_delay", DELAY_THRESHOLD_MINUTES)
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &Value,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        Value::Null => query.bind(None::<i64>),
        Value::Integer(v) => query.bind(*v),
        Value::Real(v) => query.bind(*v),
        Value::Text(v) => query.bind(v.clone()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::fixtures;
    use crate::pool::Database;

    async fn setup() -> Database {
        fixtures::sample_database().await.unwrap()
    }

    fn date(day: u32, month: u32, year: i32) -> FlightDate {
        FlightDate::new(day, month, year).unwrap()
    }

    fn ids(records: &[Record]) -> Vec<i64> {
        records
            .iter()
            .map(|r| r.get("ID").and_then(Value::as_i64).unwrap())
            .collect()
    }

    fn delays(records: &[Record]) -> Vec<f64> {
        records
            .iter()
            .map(|r| r.get("DELAY").and_then(Value::as_f64).unwrap())
            .collect()
    }

    fn assert_delayed_and_sorted(records: &[Record]) {
        let delays = delays(records);
        assert!(delays.iter().all(|d| *d >= DELAY_THRESHOLD_MINUTES as f64));
        assert!(delays.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_flight_by_id_found() {
        let db = setup().await;
        let lookup = db.flights().flight_by_id(42).await.unwrap();

        let rows = lookup.rows();
        assert_eq!(rows.len(), 1);
        let flight = &rows[0];
        assert_eq!(flight.get("FLIGHT_ID"), Some(&Value::Integer(42)));
        assert_eq!(flight.get("DELAY").and_then(Value::as_f64), Some(35.0));
        assert_eq!(
            flight.get("AIRLINE_NAME").and_then(Value::as_str),
            Some("Delta Air Lines Inc.")
        );
        assert_eq!(flight.get("ORIGIN_AIRPORT").and_then(Value::as_str), Some("ATL"));
    }

    #[tokio::test]
    async fn test_flight_by_id_absent() {
        let db = setup().await;
        let lookup = db.flights().flight_by_id(9999).await.unwrap();
        assert!(matches!(lookup, Lookup::Empty));
    }

    #[tokio::test]
    async fn test_delayed_flights_by_date() {
        let db = setup().await;
        let repo = db.flights();

        let new_year = repo
            .delayed_flights_by_date(date(1, 1, 2015))
            .await
            .unwrap()
            .rows();
        assert_eq!(ids(&new_year), vec![44, 42, 50, 47]);
        assert_delayed_and_sorted(&new_year);

        let next_day = repo
            .delayed_flights_by_date(date(2, 1, 2015))
            .await
            .unwrap()
            .rows();
        assert_eq!(ids(&next_day), vec![46]);
        assert!(!ids(&next_day).contains(&42));
    }

    #[tokio::test]
    async fn test_delayed_flights_projection() {
        let db = setup().await;
        let rows = db
            .flights()
            .delayed_flights_by_date(date(2, 1, 2015))
            .await
            .unwrap()
            .rows();

        let names: Vec<&str> = rows[0].column_names().collect();
        assert_eq!(
            names,
            vec!["ID", "ORIGIN_AIRPORT", "DESTINATION_AIRPORT", "AIRLINE", "DELAY"]
        );
    }

    #[tokio::test]
    async fn test_delayed_flights_by_airline_is_case_insensitive() {
        let db = setup().await;
        let repo = db.flights();

        let lower = repo.delayed_flights_by_airline("delta").await.unwrap().rows();
        let upper = repo.delayed_flights_by_airline("DELTA").await.unwrap().rows();

        assert_eq!(lower, upper);
        assert_eq!(ids(&lower), vec![46, 42, 50]);
        assert_delayed_and_sorted(&lower);
    }

    #[tokio::test]
    async fn test_delayed_flights_by_airline_matches_wildcards_literally() {
        let db = setup().await;
        let repo = db.flights();

        let lookup = repo.delayed_flights_by_airline("%").await.unwrap();
        assert!(matches!(lookup, Lookup::Empty));

        let everyone = repo.delayed_flights_by_airline("").await.unwrap().rows();
        assert_eq!(everyone.len(), 5);
        assert_delayed_and_sorted(&everyone);
    }

    #[tokio::test]
    async fn test_delayed_flights_by_origin() {
        let db = setup().await;
        let repo = db.flights();

        let atl = repo.delayed_flights_by_origin("ATL").await.unwrap().rows();
        assert_eq!(ids(&atl), vec![46, 42]);
        assert!(atl
            .iter()
            .all(|r| r.get("ORIGIN_AIRPORT").and_then(Value::as_str) == Some("ATL")));

        // exact match only
        let lookup = repo.delayed_flights_by_origin("atl").await.unwrap();
        assert!(matches!(lookup, Lookup::Empty));
    }

    #[tokio::test]
    async fn test_invalid_airport_code_is_rejected_before_query() {
        let db = setup().await;
        let result = db.flights().delayed_flights_by_origin("").await;
        assert!(matches!(result, Err(DbError::Validation(_))));

        let result = db.flights().airport_coordinates("ATL", "L A X").await;
        assert!(matches!(result, Err(DbError::Validation(_))));
    }

    #[tokio::test]
    async fn test_route_delay_percentage() {
        let db = setup().await;
        let rows = db
            .flights()
            .route_delay_percentage("ATL", "LAX")
            .await
            .unwrap()
            .rows();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("ORIGIN_AIRPORT").and_then(Value::as_str), Some("ATL"));
        assert_eq!(rows[0].get("PERCENT_DELAYED").and_then(Value::as_f64), Some(50.0));

        assert_eq!(rows[1].get("ORIGIN_AIRPORT").and_then(Value::as_str), Some("LAX"));
        let reverse = rows[1].get("PERCENT_DELAYED").and_then(Value::as_f64).unwrap();
        assert!((reverse - 100.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_route_without_flights_is_empty() {
        let db = setup().await;
        let lookup = db.flights().route_delay_percentage("ORD", "DEN").await.unwrap();
        assert!(matches!(lookup, Lookup::Empty));
    }

    #[tokio::test]
    async fn test_airport_coordinates() {
        let db = setup().await;
        let rows = db
            .flights()
            .airport_coordinates("LAX", "ATL")
            .await
            .unwrap()
            .rows();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("IATA_CODE").and_then(Value::as_str), Some("LAX"));
        assert_eq!(rows[1].get("IATA_CODE").and_then(Value::as_str), Some("ATL"));
        assert_eq!(rows[1].get("LATITUDE").and_then(Value::as_f64), Some(33.64044));
        assert_eq!(rows[1].get("LONGITUDE").and_then(Value::as_f64), Some(-84.42694));
    }

    #[tokio::test]
    async fn test_closed_pool_yields_failed_lookup() {
        let db = setup().await;
        let repo = db.flights();
        db.close().await;

        let lookup = repo.flight_by_id(42).await.unwrap();
        assert!(lookup.is_failed());
        assert!(matches!(lookup.error(), Some(DbError::ConnectionFailed(_))));
        assert!(lookup.rows().is_empty());

        let lookup = repo.delayed_flights_by_date(date(1, 1, 2015)).await.unwrap();
        assert!(lookup.is_failed());
    }

    #[tokio::test]
    async fn test_missing_table_yields_failed_lookup() {
        let db = setup().await;
        sqlx::query("DROP TABLE flights")
            .execute(db.pool())
            .await
            .unwrap();

        let lookup = db.flights().delayed_flights_by_airline("delta").await.unwrap();
        assert!(matches!(lookup.error(), Some(DbError::QueryFailed(_))));
        assert!(lookup.rows().is_empty());
    }

    #[tokio::test]
    async fn test_run_malformed_sql_yields_failed_lookup() {
        let db = setup().await;
        let broken = QueryTemplate::new("broken", "SELEC * FROM flights WHERE ID = :id");

        let lookup = db
            .flights()
            .run(&broken, &Params::new().set("id", 42))
            .await
            .unwrap();
        assert!(matches!(lookup.error(), Some(DbError::QueryFailed(_))));
    }

    #[tokio::test]
    async fn test_run_missing_parameter_propagates() {
        let db = setup().await;
        let result = db
            .flights()
            .run(&queries::DELAYED_FLIGHTS_BY_DATE, &Params::new().set("day", 1))
            .await;

        assert!(matches!(result, Err(DbError::Template(_))));
    }

    #[tokio::test]
    async fn test_run_custom_template() {
        let db = setup().await;
        let count = QueryTemplate::new(
            "count_by_origin",
            "SELECT COUNT(*) AS N FROM flights WHERE ORIGIN_AIRPORT = :origin",
        );

        let rows = db
            .flights()
            .run(&count, &Params::new().set("origin", "SFO"))
            .await
            .unwrap()
            .rows();
        assert_eq!(rows[0].get("N"), Some(&Value::Integer(3)));
    }
}
