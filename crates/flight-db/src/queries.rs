//! # Query Templates
//!
//! The fixed SQL behind every lookup. Each template is executed by
//! [`crate::FlightRepository`]; placeholders are `:name` and are bound by
//! name (see [`flight_core::template`]).
//!
//! ## Schema Assumed
//! ```text
//! flights  (ID, YEAR, MONTH, DAY, AIRLINE → airlines.ID,
//!           ORIGIN_AIRPORT, DESTINATION_AIRPORT, DEPARTURE_DELAY, ...)
//! airlines (ID, AIRLINE)
//! airports (IATA_CODE, LATITUDE, LONGITUDE, ...)
//! ```
//!
//! `:min_delay` is always bound to [`flight_core::DELAY_THRESHOLD_MINUTES`].
//! A NULL `DEPARTURE_DELAY` never counts as delayed.

use flight_core::QueryTemplate;

/// One flight with every `flights` column, its carrier name
/// (`AIRLINE_NAME`), and `FLIGHT_ID` / `DELAY` aliases.
pub const FLIGHT_BY_ID: QueryTemplate = QueryTemplate::new(
    "flight_by_id",
    r#"SELECT flights.*, airlines.AIRLINE AS AIRLINE_NAME, flights.ID AS FLIGHT_ID, flights.DEPARTURE_DELAY AS DELAY
FROM flights
JOIN airlines ON flights.AIRLINE = airlines.ID
WHERE flights.ID = :id"#,
);

/// Delayed flights departing on one day, worst first.
pub const DELAYED_FLIGHTS_BY_DATE: QueryTemplate = QueryTemplate::new(
    "delayed_flights_by_date",
    r#"SELECT f.ID, f.ORIGIN_AIRPORT, f.DESTINATION_AIRPORT, a.AIRLINE, f.DEPARTURE_DELAY AS DELAY
FROM airlines AS a
JOIN flights AS f ON a.ID = f.AIRLINE
WHERE COALESCE(f.DEPARTURE_DELAY, 0) >= :min_delay
  AND f.DAY = :day AND f.MONTH = :month AND f.YEAR = :year
ORDER BY f.DEPARTURE_DELAY DESC, f.ID"#,
);

/// Delayed flights whose carrier name contains a substring, worst first.
///
/// `:airline` is a LIKE pattern escaped with `\`.
pub const DELAYED_FLIGHTS_BY_AIRLINE: QueryTemplate = QueryTemplate::new(
    "delayed_flights_by_airline",
    r#"SELECT f.ID, f.ORIGIN_AIRPORT, f.DESTINATION_AIRPORT, a.AIRLINE, f.DEPARTURE_DELAY AS DELAY
FROM airlines AS a
JOIN flights AS f ON a.ID = f.AIRLINE
WHERE COALESCE(f.DEPARTURE_DELAY, 0) >= :min_delay
  AND lower(a.AIRLINE) LIKE lower(:airline) ESCAPE '\'
ORDER BY f.DEPARTURE_DELAY DESC, f.ID"#,
);

/// Delayed flights leaving one airport, worst first.
pub const DELAYED_FLIGHTS_BY_ORIGIN: QueryTemplate = QueryTemplate::new(
    "delayed_flights_by_origin",
    r#"SELECT f.ID, f.ORIGIN_AIRPORT, f.DESTINATION_AIRPORT, a.AIRLINE, f.DEPARTURE_DELAY AS DELAY
FROM airlines AS a
JOIN flights AS f ON a.ID = f.AIRLINE
WHERE COALESCE(f.DEPARTURE_DELAY, 0) >= :min_delay
  AND f.ORIGIN_AIRPORT = :origin_airport
ORDER BY f.DEPARTURE_DELAY DESC, f.ID"#,
);

/// Share of delayed flights on a route, in both directions.
///
/// One row per direction that has any flights: `ORIGIN_AIRPORT`,
/// `DESTINATION_AIRPORT`, `PERCENT_DELAYED` (0-100).
pub const ROUTE_DELAY_PERCENTAGE: QueryTemplate = QueryTemplate::new(
    "route_delay_percentage",
    r#"SELECT ORIGIN_AIRPORT, DESTINATION_AIRPORT,
       AVG(DELAYED_FLIGHTS * 100.0 / TOTAL_FLIGHTS) AS PERCENT_DELAYED
FROM (
    SELECT ORIGIN_AIRPORT, DESTINATION_AIRPORT,
           COUNT(CASE WHEN DEPARTURE_DELAY >= :min_delay THEN 1 END) AS DELAYED_FLIGHTS,
           COUNT(*) AS TOTAL_FLIGHTS
    FROM flights
    GROUP BY ORIGIN_AIRPORT, DESTINATION_AIRPORT
) AS ROUTE_STATS
WHERE (ORIGIN_AIRPORT = :origin AND DESTINATION_AIRPORT = :destination)
   OR (ORIGIN_AIRPORT = :destination AND DESTINATION_AIRPORT = :origin)
GROUP BY ORIGIN_AIRPORT, DESTINATION_AIRPORT
ORDER BY ORIGIN_AIRPORT = :origin DESC"#,
);

/// Latitude/longitude of two airports.
pub const AIRPORT_COORDINATES: QueryTemplate = QueryTemplate::new(
    "airport_coordinates",
    r#"SELECT IATA_CODE, LATITUDE, LONGITUDE
FROM airports
WHERE IATA_CODE = :origin OR IATA_CODE = :destination
ORDER BY IATA_CODE = :origin DESC"#,
);

/// Every template, for diagnostics and tests.
pub const ALL: [QueryTemplate; 6] = [
    FLIGHT_BY_ID,
    DELAYED_FLIGHTS_BY_DATE,
    DELAYED_FLIGHTS_BY_AIRLINE,
    DELAYED_FLIGHTS_BY_ORIGIN,
    ROUTE_DELAY_PERCENTAGE,
    AIRPORT_COORDINATES,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_names_are_unique() {
        let mut names: Vec<&str> = ALL.iter().map(|t| t.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ALL.len());
    }

    #[test]
    fn test_template_placeholders() {
        assert_eq!(FLIGHT_BY_ID.placeholders(), vec!["id"]);
        assert_eq!(
            DELAYED_FLIGHTS_BY_DATE.placeholders(),
            vec!["min_delay", "day", "month", "year"]
        );
        assert_eq!(
            DELAYED_FLIGHTS_BY_AIRLINE.placeholders(),
            vec!["min_delay", "airline"]
        );
        assert_eq!(
            DELAYED_FLIGHTS_BY_ORIGIN.placeholders(),
            vec!["min_delay", "origin_airport"]
        );
        assert_eq!(
            ROUTE_DELAY_PERCENTAGE.placeholders(),
            vec!["min_delay", "origin", "destination"]
        );
        assert_eq!(AIRPORT_COORDINATES.placeholders(), vec!["origin", "destination"]);
    }

    #[test]
    fn test_escape_clause_survives_compilation() {
        let compiled = DELAYED_FLIGHTS_BY_AIRLINE.compile();
        assert!(compiled.sql().contains("LIKE lower(?2) ESCAPE '\\'"));
    }
}
