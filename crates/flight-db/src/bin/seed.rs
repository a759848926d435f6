//! # Seed Data Generator
//!
//! Builds a sample flights database for development.
//!
//! ## Usage
//! ```bash
//! # Generate 5,000 flights (default)
//! cargo run -p flight-db --features fixtures --bin seed
//!
//! # Generate custom amount
//! cargo run -p flight-db --features fixtures --bin seed -- --count 20000
//!
//! # Specify database path
//! cargo run -p flight-db --features fixtures --bin seed -- --db ./data/flights.sqlite3
//! ```
//!
//! ## Generated Flights
//! - Carriers and airports from `flight_db::fixtures`
//! - Dates spread over January 2015
//! - Every ordered pair of distinct airports used as a route
//! - Delays from -15 to 179 minutes, about one in twenty missing (NULL)

use std::env;

use flight_core::FlightDate;
use flight_db::fixtures::{self, FlightFixture, AIRLINES, AIRPORTS};
use flight_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 5000;
    let mut db_path = String::from("./flights_dev.sqlite3");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(5000);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Flight Records Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of flights to generate (default: 5000)");
                println!("  -d, --db <PATH>    Database file path (default: ./flights_dev.sqlite3)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Flight Records Seed Data Generator");
    println!("==================================");
    println!("Database: {}", db_path);
    println!("Flights:  {}", count);
    println!();

    let config = DbConfig::new(format!("sqlite://{}", db_path))
        .read_only(false)
        .create_if_missing(true);
    let db = Database::new(config).await?;
    println!("✓ Connected to database");

    fixtures::create_schema(db.pool()).await?;
    println!("✓ Schema ready");

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM flights")
        .fetch_one(db.pool())
        .await?;
    if existing > 0 {
        println!("⚠ Database already has {} flights", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    fixtures::insert_reference_data(db.pool()).await?;

    println!();
    println!("Generating flights...");

    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let flight = generate_flight(seed);
        if let Err(e) = fixtures::insert_flight(db.pool(), &flight).await {
            eprintln!("Failed to insert flight {}: {}", flight.id, e);
            continue;
        }

        generated += 1;
        if generated % 1000 == 0 {
            println!("  Generated {} flights...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} flights in {:?}", generated, elapsed);

    // Exercise every lookup once
    println!();
    println!("Verifying lookups...");
    let flights = db.flights();

    let by_id = flights.flight_by_id(1).await?;
    println!("  Flight 1: {} record(s)", by_id.len());

    let new_year = FlightDate::new(1, 1, 2015)?;
    let by_date = flights.delayed_flights_by_date(new_year).await?;
    println!("  Delayed on {}: {} flights", new_year, by_date.len());

    let by_airline = flights.delayed_flights_by_airline("delta").await?;
    println!("  Delayed 'delta': {} flights", by_airline.len());

    let by_origin = flights.delayed_flights_by_origin("ATL").await?;
    println!("  Delayed from ATL: {} flights", by_origin.len());

    for record in flights.route_delay_percentage("ATL", "LAX").await?.rows() {
        println!("  Route {}", serde_json::to_string(&record)?);
    }

    let coordinates = flights.airport_coordinates("ATL", "LAX").await?;
    println!("  Coordinates: {} airports", coordinates.len());

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates one flight deterministically from `seed`.
fn generate_flight(seed: usize) -> FlightFixture {
    let routes = AIRPORTS.len() * (AIRPORTS.len() - 1);
    let route = seed % routes;
    let origin = route / (AIRPORTS.len() - 1);
    let mut destination = route % (AIRPORTS.len() - 1);
    if destination >= origin {
        destination += 1;
    }

    let (airline_id, _) = AIRLINES[(seed / routes) % AIRLINES.len()];

    // Spread of delays: mostly small, a long tail of late departures
    let mix = (seed * 7919 + 13) % 195;
    let departure_delay = if seed % 20 == 19 {
        None
    } else {
        Some(mix as f64 - 15.0)
    };

    FlightFixture {
        id: seed as i64 + 1,
        day: (seed % 31) as u32 + 1,
        month: 1,
        year: 2015,
        airline_id,
        flight_number: 100 + (seed % 900) as i64,
        origin: AIRPORTS[origin].iata_code.to_string(),
        destination: AIRPORTS[destination].iata_code.to_string(),
        departure_delay,
    }
}
