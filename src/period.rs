use crate::Measurement;
use chrono::{Duration, NaiveDateTime};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;
use std::str::FromStr;

/// How far back the chart reaches, stored as a number of hours.
#[derive(Serialize_repr, Deserialize_repr, Debug, PartialEq, Clone, Copy)]
#[repr(u16)]
pub enum Period {
    All = 0,
    Day = 24,
    ThreeDays = 72,
    Week = 168,
}

impl Period {
    pub fn hours(&self) -> Option<i64> {
        match self {
            Period::All => None,
            period => Some(*period as u16 as i64),
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Period::All
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            Period::All => "all",
            Period::Day => "24h",
            Period::ThreeDays => "3d",
            Period::Week => "7d",
        };
        write!(f, "{}", text)
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Period::All),
            "24h" | "1d" | "day" => Ok(Period::Day),
            "72h" | "3d" => Ok(Period::ThreeDays),
            "168h" | "7d" | "week" => Ok(Period::Week),
            other => Err(format!(
                "unknown period \"{}\" (expected all, 24h, 3d or 7d)",
                other
            )),
        }
    }
}

/// Chart points sorted by time. A bounded period keeps the points no older
/// than `period` before the newest measurement.
pub fn chart_series(measurements: &[Measurement], period: Period) -> Vec<(NaiveDateTime, f64)> {
    let mut points: Vec<(NaiveDateTime, f64)> = measurements
        .iter()
        .map(|m| (m.timestamp, m.value))
        .collect();
    points.sort_by_key(|(timestamp, _)| *timestamp);

    let newest = points.last().map(|(timestamp, _)| *timestamp);
    if let (Some(hours), Some(newest)) = (period.hours(), newest) {
        let start = newest - Duration::hours(hours);
        points.retain(|(timestamp, _)| *timestamp >= start);
    }

    points
}
