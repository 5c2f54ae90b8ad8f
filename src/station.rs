use crate::{Error, Location};
use serde::{Deserialize, Serialize};

/// A monitoring station. On the wire the coordinates are decimal strings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(into = "StationRecord", try_from = "StationRecord")]
pub struct Station {
    pub id: u32,

    pub name: String,

    pub latitude: f64,

    pub longitude: f64,
}

impl Station {
    pub fn location(&self) -> Location {
        Location::new(self.latitude, self.longitude)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StationRecord {
    id: u32,

    station_name: String,

    gegr_lat: String,

    gegr_lon: String,
}

impl TryFrom<StationRecord> for Station {
    type Error = String;

    fn try_from(record: StationRecord) -> Result<Self, Self::Error> {
        let latitude = parse_coordinate(&record.gegr_lat, "gegrLat", record.id)?;
        let longitude = parse_coordinate(&record.gegr_lon, "gegrLon", record.id)?;
        Ok(Station {
            id: record.id,
            name: record.station_name,
            latitude,
            longitude,
        })
    }
}

impl From<Station> for StationRecord {
    fn from(station: Station) -> Self {
        StationRecord {
            id: station.id,
            station_name: station.name,
            gegr_lat: station.latitude.to_string(),
            gegr_lon: station.longitude.to_string(),
        }
    }
}

fn parse_coordinate(text: &str, field: &str, id: u32) -> Result<f64, String> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| format!("station {} has invalid {} \"{}\"", id, field, text))
}

/// Decodes a `/station/findAll` body.
pub fn decode_stations(text: &str) -> Result<Vec<Station>, Error> {
    serde_json::from_str(text).map_err(Error::from_json)
}
