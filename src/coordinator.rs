//! The current view state: station catalog, active filter, selection,
//! and the lists that hang off the selection.
//!
//! Filters always start from the full catalog, so the last one applied wins.
//! Selecting a station clears its sensors and measurements; selecting a sensor
//! clears measurements. Issuing the matching fetch is left to the caller.

use crate::{
    chart_series, closest_station, stations_within, Analysis, Event, Location, Measurement,
    Period, Sensor, Station,
};
use chrono::NaiveDateTime;

#[derive(Debug, Default)]
pub struct Coordinator {
    stations: Vec<Station>,
    filtered_stations: Vec<Station>,
    sensors: Vec<Sensor>,
    measurements: Vec<Measurement>,
    selected_station: Option<u32>,
    selected_sensor: Option<u32>,
    period: Period,
    last_error: Option<String>,
}

impl Coordinator {
    pub fn new(period: Period) -> Coordinator {
        Coordinator {
            period,
            ..Default::default()
        }
    }

    /// Applies one fetch outcome. Each event replaces only its own list.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::StationsReady(stations) => {
                log::info!("Loaded {} stations", stations.len());
                self.filtered_stations = stations.clone();
                self.stations = stations;
            }
            Event::SensorsReady(sensors) => {
                log::info!("Loaded {} sensors", sensors.len());
                self.sensors = sensors;
            }
            Event::MeasurementsReady(measurements) => {
                log::info!("Loaded {} measurements", measurements.len());
                self.measurements = measurements;
            }
            Event::Error(message) => {
                log::error!("{}", message);
                self.last_error = Some(message);
            }
        }
    }

    pub fn select_station(&mut self, station_id: u32) {
        self.selected_station = Some(station_id);
        self.selected_sensor = None;
        self.sensors.clear();
        self.measurements.clear();
    }

    pub fn select_sensor(&mut self, sensor_id: u32) {
        self.selected_sensor = Some(sensor_id);
        self.measurements.clear();
    }

    /// Keeps stations whose name contains `text`, ignoring case.
    pub fn filter_by_name(&mut self, text: &str) {
        let needle = text.to_lowercase();
        self.filtered_stations = self
            .stations
            .iter()
            .filter(|station| station.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
    }

    /// Keeps stations within `radius_km` of `center`.
    pub fn filter_by_distance(&mut self, center: &Location, radius_km: f64) {
        self.filtered_stations = stations_within(&self.stations, center, radius_km);
    }

    pub fn clear_filter(&mut self) {
        self.filtered_stations = self.stations.clone();
    }

    pub fn closest_station(&self, center: &Location) -> Option<(&Station, f64)> {
        closest_station(&self.stations, center)
    }

    pub fn set_period(&mut self, period: Period) {
        self.period = period;
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn chart_series(&self) -> Vec<(NaiveDateTime, f64)> {
        chart_series(&self.measurements, self.period)
    }

    pub fn analysis(&self) -> Option<Analysis> {
        Analysis::from_measurements(&self.measurements)
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn filtered_stations(&self) -> &[Station] {
        &self.filtered_stations
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn selected_station(&self) -> Option<u32> {
        self.selected_station
    }

    pub fn selected_sensor(&self) -> Option<u32> {
        self.selected_sensor
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Takes the last error, leaving none behind.
    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }
}
