//! # Fixtures
//!
//! Schema DDL and insert helpers for building sample flight databases.
//! Compiled for tests and with the `fixtures` feature (used by the `seed`
//! binary). The lookups themselves never write; this is the only module
//! that does.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::pool::{Database, DbConfig};

/// Tables the lookups read, with the columns they use plus the usual
/// schedule columns.
pub const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS airlines (
        ID INTEGER PRIMARY KEY,
        AIRLINE TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS airports (
        IATA_CODE TEXT PRIMARY KEY,
        AIRPORT TEXT,
        CITY TEXT,
        STATE TEXT,
        COUNTRY TEXT,
        LATITUDE REAL,
        LONGITUDE REAL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS flights (
        ID INTEGER PRIMARY KEY,
        YEAR INTEGER NOT NULL,
        MONTH INTEGER NOT NULL,
        DAY INTEGER NOT NULL,
        AIRLINE INTEGER NOT NULL REFERENCES airlines(ID),
        FLIGHT_NUMBER INTEGER,
        ORIGIN_AIRPORT TEXT NOT NULL,
        DESTINATION_AIRPORT TEXT NOT NULL,
        DEPARTURE_DELAY REAL
    )"#,
    "CREATE INDEX IF NOT EXISTS idx_flights_date ON flights (YEAR, MONTH, DAY)",
    "CREATE INDEX IF NOT EXISTS idx_flights_origin ON flights (ORIGIN_AIRPORT)",
];

/// An `airports` row.
#[derive(Debug, Clone, PartialEq)]
pub struct AirportFixture {
    pub iata_code: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    pub state: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// A `flights` row.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightFixture {
    pub id: i64,
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub airline_id: i64,
    pub flight_number: i64,
    pub origin: String,
    pub destination: String,
    pub departure_delay: Option<f64>,
}

/// Carriers in the sample data: (ID, AIRLINE).
pub const AIRLINES: &[(i64, &str)] = &[
    (1, "United Air Lines Inc."),
    (2, "American Airlines Inc."),
    (3, "Delta Air Lines Inc."),
    (4, "Virgin America"),
];

/// Airports in the sample data.
pub const AIRPORTS: &[AirportFixture] = &[
    AirportFixture {
        iata_code: "ATL",
        name: "Hartsfield-Jackson Atlanta International Airport",
        city: "Atlanta",
        state: "GA",
        latitude: 33.64044,
        longitude: -84.42694,
    },
    AirportFixture {
        iata_code: "JFK",
        name: "John F. Kennedy International Airport",
        city: "New York",
        state: "NY",
        latitude: 40.63975,
        longitude: -73.77893,
    },
    AirportFixture {
        iata_code: "LAX",
        name: "Los Angeles International Airport",
        city: "Los Angeles",
        state: "CA",
        latitude: 33.94254,
        longitude: -118.40807,
    },
    AirportFixture {
        iata_code: "SFO",
        name: "San Francisco International Airport",
        city: "San Francisco",
        state: "CA",
        latitude: 37.619,
        longitude: -122.37484,
    },
];

/// Creates the three tables if they do not exist.
pub async fn create_schema(pool: &SqlitePool) -> DbResult<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    debug!("Fixture schema ready");
    Ok(())
}

/// Inserts one carrier.
pub async fn insert_airline(pool: &SqlitePool, id: i64, name: &str) -> DbResult<()> {
    sqlx::query("INSERT INTO airlines (ID, AIRLINE) VALUES (?1, ?2)")
        .bind(id)
        .bind(name)
        .execute(pool)
        .await?;
    Ok(())
}

/// Inserts one airport.
pub async fn insert_airport(pool: &SqlitePool, airport: &AirportFixture) -> DbResult<()> {
    sqlx::query(
        r#"INSERT INTO airports (IATA_CODE, AIRPORT, CITY, STATE, COUNTRY, LATITUDE, LONGITUDE)
        VALUES (?1, ?2, ?3, ?4, 'USA', ?5, ?6)"#,
    )
    .bind(airport.iata_code)
    .bind(airport.name)
    .bind(airport.city)
    .bind(airport.state)
    .bind(airport.latitude)
    .bind(airport.longitude)
    .execute(pool)
    .await?;
    Ok(())
}

/// Inserts one flight.
pub async fn insert_flight(pool: &SqlitePool, flight: &FlightFixture) -> DbResult<()> {
    sqlx::query(
        r#"INSERT INTO flights (
            ID, YEAR, MONTH, DAY, AIRLINE, FLIGHT_NUMBER,
            ORIGIN_AIRPORT, DESTINATION_AIRPORT, DEPARTURE_DELAY
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"#,
    )
    .bind(flight.id)
    .bind(flight.year)
    .bind(flight.month)
    .bind(flight.day)
    .bind(flight.airline_id)
    .bind(flight.flight_number)
    .bind(&flight.origin)
    .bind(&flight.destination)
    .bind(flight.departure_delay)
    .execute(pool)
    .await?;
    Ok(())
}

/// Inserts [`AIRLINES`] and [`AIRPORTS`].
pub async fn insert_reference_data(pool: &SqlitePool) -> DbResult<()> {
    for (id, name) in AIRLINES {
        insert_airline(pool, *id, name).await?;
    }
    for airport in AIRPORTS {
        insert_airport(pool, airport).await?;
    }
    Ok(())
}

fn flight(
    id: i64,
    (day, month, year): (u32, u32, i32),
    airline_id: i64,
    origin: &str,
    destination: &str,
    departure_delay: Option<f64>,
) -> FlightFixture {
    FlightFixture {
        id,
        day,
        month,
        year,
        airline_id,
        flight_number: 1000 + id,
        origin: origin.to_string(),
        destination: destination.to_string(),
        departure_delay,
    }
}

/// The small, hand-checked flight set used by the unit tests.
///
/// ```text
///  ID  date       carrier   route      delay
///  42  1/1/2015   Delta     ATL→LAX    35
///  43  1/1/2015   Delta     ATL→LAX    10
///  44  1/1/2015   American  JFK→LAX    60
///  45  1/1/2015   United    SFO→JFK    NULL
///  46  2/1/2015   Delta     ATL→JFK    120
///  47  1/1/2015   Virgin    SFO→LAX    20
///  48  1/1/2015   United    SFO→ATL    19
///  49  1/1/2015   Delta     LAX→ATL    -5
///  50  1/1/2015   Delta     LAX→ATL    25
///  51  1/1/2015   Delta     LAX→ATL    0
/// ```
pub fn sample_flights() -> Vec<FlightFixture> {
    let new_year = (1, 1, 2015);
    vec![
        flight(42, new_year, 3, "ATL", "LAX", Some(35.0)),
        flight(43, new_year, 3, "ATL", "LAX", Some(10.0)),
        flight(44, new_year, 2, "JFK", "LAX", Some(60.0)),
        flight(45, new_year, 1, "SFO", "JFK", None),
        flight(46, (2, 1, 2015), 3, "ATL", "JFK", Some(120.0)),
        flight(47, new_year, 4, "SFO", "LAX", Some(20.0)),
        flight(48, new_year, 1, "SFO", "ATL", Some(19.0)),
        flight(49, new_year, 3, "LAX", "ATL", Some(-5.0)),
        flight(50, new_year, 3, "LAX", "ATL", Some(25.0)),
        flight(51, new_year, 3, "LAX", "ATL", Some(0.0)),
    ]
}

/// An in-memory database holding the reference data and [`sample_flights`].
pub async fn sample_database() -> DbResult<Database> {
    let db = Database::new(DbConfig::in_memory()).await?;
    create_schema(db.pool()).await?;
    insert_reference_data(db.pool()).await?;
    for flight in sample_flights() {
        insert_flight(db.pool(), &flight).await?;
    }
    Ok(db)
}
