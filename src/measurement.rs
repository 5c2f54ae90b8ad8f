use crate::Error;
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
const WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub parameter: String,

    pub value: f64,

    pub timestamp: NaiveDateTime,
}

/// The `/data/getData/{id}` document: one parameter key and its readings.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Series {
    key: String,

    values: Vec<Reading>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Reading {
    #[serde(default)]
    date: Option<String>,

    #[serde(default)]
    value: Option<f64>,
}

/// Decodes a measurement series. Readings without a value are skipped.
pub fn decode_measurements(text: &str) -> Result<Vec<Measurement>, Error> {
    let series: Series = serde_json::from_str(text).map_err(Error::from_json)?;

    let mut measurements = Vec::with_capacity(series.values.len());
    for reading in series.values {
        let value = match reading.value {
            Some(value) => value,
            None => continue,
        };
        let date = reading.date.ok_or_else(|| {
            Error::ParseError(String::from("unexpected response shape (reading without date)."))
        })?;
        let timestamp = parse_date(&date).ok_or_else(|| {
            Error::ParseError(format!(
                "unexpected response shape (invalid date \"{}\").",
                date
            ))
        })?;
        measurements.push(Measurement {
            parameter: series.key.clone(),
            value,
            timestamp,
        });
    }

    Ok(measurements)
}

/// Encodes measurements back into the series document. The key is taken
/// from the first measurement.
pub fn encode_measurements(measurements: &[Measurement]) -> Result<String, Error> {
    let series = Series {
        key: measurements
            .first()
            .map(|m| m.parameter.clone())
            .unwrap_or_default(),
        values: measurements
            .iter()
            .map(|m| Reading {
                date: Some(m.timestamp.format(WRITE_FORMAT).to_string()),
                value: Some(m.value),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&series).map_err(|err| {
        Error::SerializationError(format!("Could not serialize measurements ({}).", err))
    })
}

/// Parses an ISO-8601 date-time. The API writes `2024-01-01 01:00:00`; the
/// `T` separator and RFC 3339 offsets are accepted as well.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    for format in DATE_FORMATS.iter() {
        if let Ok(date) = NaiveDateTime::parse_from_str(text, format) {
            return Some(date);
        }
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|date| date.naive_local())
}
