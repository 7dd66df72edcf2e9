use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::date::DateRange;
use crate::error::{Error, Result};
use crate::region::BoundingBox;

/// Inclusive date range as stored in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

/// Run settings persisted as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub time_range: TimeRange,
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
    pub variables: Vec<String>,
    pub product: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_range: TimeRange {
                start: "2020-01-01".to_string(),
                end: "2020-01-31".to_string(),
            },
            bbox: BoundingBox::global(),
            variables: vec!["O3".to_string(), "CO".to_string(), "NO2".to_string()],
            product: "M2I3NPASM".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to the built-in defaults
    /// when the file does not exist. A present-but-malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(body) => Ok(serde_json::from_str(&body)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(file = %path.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Parse and validate the configured date range.
    pub fn date_range(&self) -> Result<DateRange> {
        DateRange::parse(&self.time_range.start, &self.time_range.end)
    }
}

/// NASA Earthdata login used by the transport layer. Never inspected beyond
/// being passed through as HTTP Basic auth.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Read `MERRA_USERNAME`/`MERRA_PASSWORD` from the environment, loading a
    /// `.env` file first when present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let username =
            env::var("MERRA_USERNAME").map_err(|_| Error::MissingCredentials("MERRA_USERNAME"))?;
        let password =
            env::var("MERRA_PASSWORD").map_err(|_| Error::MissingCredentials("MERRA_PASSWORD"))?;
        Ok(Self { username, password })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upstream() {
        let s = Settings::default();
        assert_eq!(s.product, "M2I3NPASM");
        assert_eq!(s.bbox, BoundingBox::global());
        assert_eq!(s.variables, ["O3", "CO", "NO2"]);
        assert!(s.date_range().is_ok());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = Settings::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut s = Settings::default();
        s.product = "M2T1NXFLX".to_string();
        s.bbox.north = 45.0;
        s.save(&path).unwrap();

        assert_eq!(Settings::load(&path).unwrap(), s);
    }

    #[test]
    fn box_field_uses_upstream_json_name() {
        let body = r#"{
            "time_range": {"start": "2020-01-01", "end": "2020-01-02"},
            "box": {"north": 10.0, "south": -10.0, "east": 20.0, "west": -20.0},
            "variables": ["PRECTOT"],
            "product": "M2T1NXFLX"
        }"#;
        let s: Settings = serde_json::from_str(body).unwrap();
        assert_eq!(s.bbox.north, 10.0);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(Settings::load(&path), Err(Error::Json(_))));
    }
}
