use crate::Error;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(into = "SensorRecord", from = "SensorRecord")]
pub struct Sensor {
    pub id: u32,

    /// Measured parameter, e.g. `PM10` or `dwutlenek azotu`.
    pub parameter: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SensorRecord {
    id: u32,

    param: ParamRecord,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParamRecord {
    param_name: String,
}

impl From<SensorRecord> for Sensor {
    fn from(record: SensorRecord) -> Self {
        Sensor {
            id: record.id,
            parameter: record.param.param_name,
        }
    }
}

impl From<Sensor> for SensorRecord {
    fn from(sensor: Sensor) -> Self {
        SensorRecord {
            id: sensor.id,
            param: ParamRecord {
                param_name: sensor.parameter,
            },
        }
    }
}

/// Decodes a `/station/sensors/{id}` body.
pub fn decode_sensors(text: &str) -> Result<Vec<Sensor>, Error> {
    serde_json::from_str(text).map_err(Error::from_json)
}
