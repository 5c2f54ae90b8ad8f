use crate::{
    decode_measurements, decode_sensors, decode_stations, encode_measurements, Error, Measurement,
    Sensor, Station,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const STATIONS_FILE: &str = "stations.json";
const SENSORS_FILE: &str = "sensors.json";
const MEASUREMENTS_FILE: &str = "measurements.json";

/// JSON files for offline reuse, written in the API's own shapes so loading
/// goes through the same decoders as a live response.
#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
}

impl Cache {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Cache {
        Cache { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save_stations(&self, stations: &[Station]) -> Result<PathBuf, Error> {
        self.write(STATIONS_FILE, &to_json(&stations)?)
    }

    pub fn load_stations(&self) -> Result<Vec<Station>, Error> {
        decode_stations(&self.read(STATIONS_FILE)?)
    }

    pub fn save_sensors(&self, sensors: &[Sensor]) -> Result<PathBuf, Error> {
        self.write(SENSORS_FILE, &to_json(&sensors)?)
    }

    pub fn load_sensors(&self) -> Result<Vec<Sensor>, Error> {
        decode_sensors(&self.read(SENSORS_FILE)?)
    }

    pub fn save_measurements(&self, measurements: &[Measurement]) -> Result<PathBuf, Error> {
        self.write(MEASUREMENTS_FILE, &encode_measurements(measurements)?)
    }

    pub fn load_measurements(&self) -> Result<Vec<Measurement>, Error> {
        decode_measurements(&self.read(MEASUREMENTS_FILE)?)
    }

    fn write(&self, name: &str, text: &str) -> Result<PathBuf, Error> {
        fs::create_dir_all(&self.dir).map_err(|err| {
            Error::IoError(format!("Could not create {} ({}).", self.dir.display(), err))
        })?;
        let path = self.dir.join(name);
        fs::write(&path, text)
            .map_err(|err| Error::IoError(format!("Could not write {} ({}).", path.display(), err)))?;
        log::debug!("Saved {}", path.display());
        Ok(path)
    }

    fn read(&self, name: &str) -> Result<String, Error> {
        let path = self.dir.join(name);
        fs::read_to_string(&path)
            .map_err(|err| Error::IoError(format!("Could not read {} ({}).", path.display(), err)))
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    serde_json::to_string_pretty(value)
        .map_err(|err| Error::SerializationError(format!("Could not serialize ({}).", err)))
}
