//! IATA code → IANA timezone lookup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::domain::{AirportCode, FlightLeg};

use super::error::AirportError;

/// One row of the airport dataset.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportEntry {
    pub iata_code: String,
    #[serde(default)]
    pub name: String,
    /// IANA zone name such as "Europe/Dublin".
    pub timezone: String,
}

/// Where the table comes from.
#[derive(Debug)]
enum Source {
    File(PathBuf),
    Preloaded,
}

/// Thread-safe airport lookup, loaded at most once.
///
/// The first lookup reads the dataset; concurrent first lookups wait on the
/// same load. A dataset that cannot be read yields an empty table, so
/// lookups return `None` and durations are reported as unknown.
#[derive(Debug)]
pub struct AirportDirectory {
    source: Source,
    table: OnceCell<HashMap<AirportCode, Tz>>,
}

impl AirportDirectory {
    /// A directory backed by a JSON file, read on first use.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::File(path.into()),
            table: OnceCell::new(),
        }
    }

    /// A directory with the given entries already loaded.
    ///
    /// Entries with invalid codes or unknown zones are skipped.
    pub fn from_entries(entries: Vec<AirportEntry>) -> Self {
        Self {
            source: Source::Preloaded,
            table: OnceCell::new_with(Some(build_table(entries))),
        }
    }

    /// A directory that knows no airports; every duration is unknown.
    pub fn disabled() -> Self {
        Self::from_entries(Vec::new())
    }

    /// Timezone of an airport, if known.
    pub async fn lookup(&self, code: &AirportCode) -> Option<Tz> {
        self.table().await.get(code).copied()
    }

    /// Number of airports in the table, loading it if necessary.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.table().await.len()
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.table().await.is_empty()
    }

    /// Time in the air for a leg, with both ends normalised to UTC.
    ///
    /// Each end uses the offset in force at that local time, so legs across a
    /// clock change come out right. `None` when either airport is missing
    /// from the table or a time falls in a skipped hour.
    pub async fn flight_duration(&self, leg: &FlightLeg) -> Option<Duration> {
        let departure_zone = self.lookup(&leg.origin).await?;
        let arrival_zone = self.lookup(&leg.destination).await?;
        let departure = to_utc(leg.departure_time, departure_zone)?;
        let arrival = to_utc(leg.arrival_time, arrival_zone)?;
        Some(arrival.signed_duration_since(departure))
    }

    async fn table(&self) -> &HashMap<AirportCode, Tz> {
        self.table
            .get_or_init(|| async {
                match &self.source {
                    Source::File(path) => match load(path).await {
                        Ok(entries) => {
                            let table = build_table(entries);
                            info!(airports = table.len(), path = %path.display(), "Loaded airport dataset");
                            table
                        }
                        Err(e) => {
                            warn!(error = %e, "Airport dataset unavailable, durations disabled");
                            HashMap::new()
                        }
                    },
                    Source::Preloaded => HashMap::new(),
                }
            })
            .await
    }
}

/// Ambiguous times (the repeated autumn hour) resolve to the earlier instant.
fn to_utc(local: NaiveDateTime, zone: Tz) -> Option<NaiveDateTime> {
    zone.from_local_datetime(&local)
        .earliest()
        .map(|t| t.naive_utc())
}

async fn load(path: &Path) -> Result<Vec<AirportEntry>, AirportError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| AirportError::Io {
            path: path.display().to_string(),
            source,
        })?;

    serde_json::from_str(&contents).map_err(|e| AirportError::Json {
        message: e.to_string(),
    })
}

/// Build the code → zone map, dropping rows that don't validate.
fn build_table(entries: Vec<AirportEntry>) -> HashMap<AirportCode, Tz> {
    entries
        .into_iter()
        .filter_map(|e| {
            let code = AirportCode::parse(&e.iata_code.to_uppercase()).ok()?;
            let zone = e.timezone.parse::<Tz>().ok()?;
            Some((code, zone))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn entry(code: &str, tz: &str) -> AirportEntry {
        AirportEntry {
            iata_code: code.to_string(),
            name: String::new(),
            timezone: tz.to_string(),
        }
    }

    fn code(s: &str) -> AirportCode {
        AirportCode::parse(s).unwrap()
    }

    fn leg_on(
        day: NaiveDate,
        from: &str,
        to: &str,
        dep: (u32, u32),
        arr: (u32, u32),
    ) -> FlightLeg {
        FlightLeg {
            departure_time: day.and_hms_opt(dep.0, dep.1, 0).unwrap(),
            arrival_time: day.and_hms_opt(arr.0, arr.1, 0).unwrap(),
            flight_number: "FR1".to_string(),
            price: 10.0,
            currency: "EUR".to_string(),
            origin: code(from),
            origin_full: String::new(),
            destination: code(to),
            destination_full: String::new(),
        }
    }

    fn leg(from: &str, to: &str, dep: (u32, u32), arr: (u32, u32)) -> FlightLeg {
        leg_on(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), from, to, dep, arr)
    }

    fn dublin_barcelona() -> AirportDirectory {
        AirportDirectory::from_entries(vec![
            entry("DUB", "Europe/Dublin"),
            entry("BCN", "Europe/Madrid"),
        ])
    }

    #[test]
    fn build_table_skips_invalid_rows() {
        let table = build_table(vec![
            entry("DUB", "Europe/Dublin"),
            entry("bcn", "Europe/Madrid"),
            entry("XXXX", "UTC"),
            entry("MAD", "+01:00"),
            entry("AGP", "Europe/Nowhere"),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&code("DUB")), Some(&Tz::Europe__Dublin));
        assert_eq!(table.get(&code("BCN")), Some(&Tz::Europe__Madrid));
    }

    #[tokio::test]
    async fn summer_duration_uses_summer_offsets() {
        // 08:00 Dublin (07:00 UTC) to 11:30 Barcelona (09:30 UTC)
        let flight = leg("DUB", "BCN", (8, 0), (11, 30));
        assert_eq!(
            dublin_barcelona().flight_duration(&flight).await,
            Some(Duration::minutes(150))
        );
    }

    #[tokio::test]
    async fn winter_duration_uses_winter_offsets() {
        // 08:00 Dublin (08:00 UTC) to 11:30 Barcelona (10:30 UTC)
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let flight = leg_on(day, "DUB", "BCN", (8, 0), (11, 30));
        assert_eq!(
            dublin_barcelona().flight_duration(&flight).await,
            Some(Duration::minutes(150))
        );
    }

    #[tokio::test]
    async fn duration_spans_spring_clock_change() {
        // Clocks go forward at 01:00 UTC on 31 March 2024. 00:30 Dublin is
        // 00:30 UTC; 04:30 Barcelona is already CEST, so 02:30 UTC.
        let day = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let flight = leg_on(day, "DUB", "BCN", (0, 30), (4, 30));
        assert_eq!(
            dublin_barcelona().flight_duration(&flight).await,
            Some(Duration::minutes(120))
        );
    }

    #[tokio::test]
    async fn skipped_local_time_has_no_duration() {
        // 01:30 does not exist in Dublin on 31 March 2024.
        let day = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let flight = leg_on(day, "DUB", "BCN", (1, 30), (5, 0));
        assert_eq!(dublin_barcelona().flight_duration(&flight).await, None);
    }

    #[tokio::test]
    async fn unknown_airport_has_no_duration() {
        let airports = AirportDirectory::from_entries(vec![entry("DUB", "Europe/Dublin")]);
        let flight = leg("DUB", "BCN", (8, 0), (11, 30));
        assert_eq!(airports.flight_duration(&flight).await, None);
        assert!(AirportDirectory::disabled().is_empty().await);
    }

    #[tokio::test]
    async fn loads_lazily_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("airports.json");
        std::fs::write(
            &path,
            r#"[{"iataCode":"STN","name":"London Stansted","timezone":"Europe/London"}]"#,
        )
        .unwrap();

        let airports = AirportDirectory::from_path(&path);
        assert_eq!(
            airports.lookup(&code("STN")).await,
            Some(Tz::Europe__London)
        );

        // The table is loaded once; later changes to the file are not seen.
        std::fs::write(&path, "[]").unwrap();
        assert_eq!(airports.len().await, 1);
    }

    #[tokio::test]
    async fn missing_file_gives_empty_table() {
        let airports = AirportDirectory::from_path("/nonexistent/airports.json");
        assert!(airports.is_empty().await);
        assert_eq!(airports.lookup(&code("DUB")).await, None);
    }

    #[tokio::test]
    async fn malformed_file_gives_empty_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("airports.json");
        std::fs::write(&path, "not json").unwrap();

        let airports = AirportDirectory::from_path(&path);
        assert!(airports.is_empty().await);
    }

    #[tokio::test]
    async fn bundled_dataset_resolves_every_zone() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/airports.json");
        let entries: Vec<AirportEntry> =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        let count = entries.len();

        let airports = AirportDirectory::from_entries(entries);
        assert_eq!(airports.len().await, count);
    }
}
