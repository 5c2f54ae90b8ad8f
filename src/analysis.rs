use crate::Measurement;
use chrono::NaiveDateTime;
use std::fmt;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Summary statistics of one measurement series.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub parameter: String,

    pub count: usize,

    pub min: (NaiveDateTime, f64),

    pub max: (NaiveDateTime, f64),

    pub mean: f64,
}

impl Analysis {
    /// `None` for an empty series. Ties keep the earliest listed reading.
    pub fn from_measurements(measurements: &[Measurement]) -> Option<Analysis> {
        let first = measurements.first()?;

        let mut min = (first.timestamp, first.value);
        let mut max = (first.timestamp, first.value);
        let mut sum = 0.0;
        for m in measurements {
            if m.value < min.1 {
                min = (m.timestamp, m.value);
            }
            if m.value > max.1 {
                max = (m.timestamp, m.value);
            }
            sum += m.value;
        }

        Some(Analysis {
            parameter: first.parameter.clone(),
            count: measurements.len(),
            min,
            max,
            mean: sum / measurements.len() as f64,
        })
    }

    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Parameter: {} ({} readings)", self.parameter, self.count)?;
        writeln!(
            f,
            "Minimum: {:.2} at {}",
            self.min.1,
            self.min.0.format(DISPLAY_FORMAT)
        )?;
        writeln!(
            f,
            "Maximum: {:.2} at {}",
            self.max.1,
            self.max.0.format(DISPLAY_FORMAT)
        )?;
        write!(f, "Mean: {:.2}", self.mean)
    }
}
