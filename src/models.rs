//! Response types for the Ergast-style `f1/*.json` endpoints.
//!
//! Every response is wrapped in an `MRData` envelope. Field names follow the
//! API so that records written to local storage read back unchanged.

use serde::{Deserialize, Deserializer, Serialize};

/// The live API sends paging counters as strings ("30"); some mirrors send numbers.
fn number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T> {
    #[serde(rename = "MRData")]
    pub data: T,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Paging {
    #[serde(default, deserialize_with = "number_or_string")]
    pub limit: u32,
    #[serde(default, deserialize_with = "number_or_string")]
    pub offset: u32,
    #[serde(default, deserialize_with = "number_or_string")]
    pub total: u32,
}

// ──────────────────────────────────────────────────────────────────────────────
// Seasons

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Season {
    pub season: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeasonTable {
    #[serde(rename = "Seasons", default)]
    pub seasons: Vec<Season>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeasonsData {
    #[serde(flatten)]
    pub paging: Paging,
    #[serde(rename = "SeasonTable")]
    pub season_table: SeasonTable,
}

pub type SeasonsResponse = Envelope<SeasonsData>;

// ──────────────────────────────────────────────────────────────────────────────
// Races

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub lat: String,
    #[serde(default)]
    pub long: String,
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circuit {
    pub circuit_id: String,
    #[serde(default)]
    pub url: String,
    pub circuit_name: String,
    #[serde(rename = "Location")]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Race {
    pub season: String,
    pub round: String,
    #[serde(default)]
    pub url: String,
    pub race_name: String,
    #[serde(rename = "Circuit")]
    pub circuit: Circuit,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RaceTable<R> {
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub round: Option<String>,
    #[serde(rename = "Races", default = "Vec::new")]
    pub races: Vec<R>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RacesData {
    #[serde(flatten)]
    pub paging: Paging,
    #[serde(rename = "RaceTable")]
    pub race_table: RaceTable<Race>,
}

pub type RacesResponse = Envelope<RacesData>;

// ──────────────────────────────────────────────────────────────────────────────
// Results

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub driver_id: String,
    #[serde(default)]
    pub url: String,
    pub given_name: String,
    pub family_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub nationality: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constructor {
    pub constructor_id: String,
    #[serde(default)]
    pub url: String,
    pub name: String,
    #[serde(default)]
    pub nationality: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultTime {
    pub millis: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceResult {
    pub number: String,
    pub position: String,
    #[serde(default)]
    pub position_text: String,
    #[serde(default)]
    pub points: String,
    #[serde(rename = "Driver")]
    pub driver: Driver,
    #[serde(rename = "Constructor")]
    pub constructor: Constructor,
    #[serde(default)]
    pub grid: String,
    #[serde(default)]
    pub laps: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "Time", default)]
    pub time: Option<ResultTime>,
}

impl RaceResult {
    pub fn driver_name(&self) -> String {
        format!("{} {}", self.driver.given_name, self.driver.family_name)
    }

    /// Unique within one race: car number plus driver id.
    pub fn entry_key(&self) -> String {
        format!("{}-{}", self.number, self.driver.driver_id)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RaceWithResults {
    #[serde(flatten)]
    pub race: Race,
    #[serde(rename = "Results", default)]
    pub results: Vec<RaceResult>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RaceDetailsData {
    #[serde(rename = "RaceTable")]
    pub race_table: RaceTable<RaceWithResults>,
}

impl RaceDetailsData {
    /// The race the request asked for; the API returns at most one.
    pub fn race(&self) -> Option<&RaceWithResults> {
        self.race_table.races.first()
    }
}

pub type RaceDetailsResponse = Envelope<RaceDetailsData>;

#[cfg(test)]
mod tests {
    use super::*;

    const SEASONS: &str = r#"{
        "MRData": {
            "limit": "2", "offset": "0", "total": "75",
            "SeasonTable": { "Seasons": [
                { "season": "1950", "url": "https://en.wikipedia.org/wiki/1950_Formula_One_season" },
                { "season": "1951", "url": "https://en.wikipedia.org/wiki/1951_Formula_One_season" }
            ]}
        }
    }"#;

    const RESULTS: &str = r#"{
        "MRData": {
            "limit": "100", "offset": "0", "total": "2",
            "RaceTable": { "season": "2023", "round": "1", "Races": [{
                "season": "2023", "round": "1", "url": "u", "raceName": "Bahrain Grand Prix",
                "Circuit": { "circuitId": "bahrain", "url": "c", "circuitName": "Bahrain International Circuit",
                    "Location": { "lat": "26.0325", "long": "50.5106", "locality": "Sakhir", "country": "Bahrain" } },
                "date": "2023-03-05", "time": "15:00:00Z",
                "Results": [
                    { "number": "1", "position": "1", "positionText": "1", "points": "25",
                      "Driver": { "driverId": "max_verstappen", "givenName": "Max", "familyName": "Verstappen",
                                  "dateOfBirth": "1997-09-30", "nationality": "Dutch" },
                      "Constructor": { "constructorId": "red_bull", "name": "Red Bull", "nationality": "Austrian" },
                      "grid": "1", "laps": "57", "status": "Finished",
                      "Time": { "millis": "5636736", "time": "1:33:56.736" } },
                    { "number": "16", "position": "19", "positionText": "R", "points": "0",
                      "Driver": { "driverId": "leclerc", "givenName": "Charles", "familyName": "Leclerc",
                                  "nationality": "Monegasque" },
                      "Constructor": { "constructorId": "ferrari", "name": "Ferrari", "nationality": "Italian" },
                      "grid": "3", "laps": "39", "status": "Engine" }
                ]
            }]}
        }
    }"#;

    #[test]
    fn decodes_seasons_with_string_counters() {
        let response: SeasonsResponse = serde_json::from_str(SEASONS).unwrap();
        assert_eq!(response.data.paging, Paging { limit: 2, offset: 0, total: 75 });
        assert_eq!(response.data.season_table.seasons[1].season, "1951");
    }

    #[test]
    fn decodes_numeric_counters() {
        let json = r#"{ "MRData": { "limit": 10, "offset": 20, "total": 30,
            "RaceTable": { "season": "1999", "Races": [] } } }"#;
        let response: RacesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.paging, Paging { limit: 10, offset: 20, total: 30 });
        assert!(response.data.race_table.races.is_empty());
    }

    #[test]
    fn rejects_non_numeric_counters() {
        let json = r#"{ "MRData": { "limit": "ten", "SeasonTable": { "Seasons": [] } } }"#;
        assert!(serde_json::from_str::<SeasonsResponse>(json).is_err());
    }

    #[test]
    fn decodes_results_with_optional_time() {
        let response: RaceDetailsResponse = serde_json::from_str(RESULTS).unwrap();
        let race = response.data.race().unwrap();
        assert_eq!(race.race.race_name, "Bahrain Grand Prix");
        assert_eq!(race.race.circuit.location.locality, "Sakhir");
        assert_eq!(race.results.len(), 2);

        let winner = &race.results[0];
        assert_eq!(winner.driver_name(), "Max Verstappen");
        assert_eq!(winner.entry_key(), "1-max_verstappen");
        assert_eq!(winner.time.as_ref().map(|t| t.millis.as_str()), Some("5636736"));
        assert!(race.results[1].time.is_none());
    }

    #[test]
    fn race_survives_storage_round_trip() {
        let response: RaceDetailsResponse = serde_json::from_str(RESULTS).unwrap();
        let race = response.data.race().unwrap().race.clone();

        let stored = serde_json::to_string(&race).unwrap();
        assert!(stored.contains("\"raceName\":\"Bahrain Grand Prix\""));
        assert!(stored.contains("\"Circuit\""));
        let back: Race = serde_json::from_str(&stored).unwrap();
        assert_eq!(back, race);
    }
}
