//! Fire-and-forget requests whose outcome arrives as an [`Event`].
//!
//! Every call spawns one task on the current tokio runtime. The task performs
//! a single GET, decodes the body and sends exactly one event: the decoded
//! list on success, or [`Event::Error`] with a readable message. Nothing is
//! returned to the caller and nothing is retried or cancelled.

use crate::{Error, Gateway, Measurement, Sensor, Station};
use std::fmt;
use std::future::Future;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StationsReady(Vec<Station>),
    SensorsReady(Vec<Sensor>),
    MeasurementsReady(Vec<Measurement>),
    Error(String),
}

/// A logical request, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Query {
    Stations,
    Sensors(u32),
    Measurements(u32),
    SensorData(u32),
}

impl Query {
    pub fn subject(&self) -> &'static str {
        match self {
            Query::Stations => "station",
            Query::Sensors(_) => "sensor",
            Query::Measurements(_) => "measurement",
            Query::SensorData(_) => "sensor data",
        }
    }

    /// The message carried by [`Event::Error`] when this query fails.
    pub fn describe(&self, err: &Error) -> String {
        let stage = if err.is_transport() { "fetch" } else { "parse" };
        format!("{} {} failed: {}", self.subject(), stage, err)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Query::Stations => write!(f, "stations"),
            Query::Sensors(id) => write!(f, "sensors of station {}", id),
            Query::Measurements(id) => write!(f, "measurements of {}", id),
            Query::SensorData(id) => write!(f, "data of sensor {}", id),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Fetcher {
    gateway: Gateway,
    events: mpsc::UnboundedSender<Event>,
}

impl Fetcher {
    /// Creates a fetcher and the receiving end of its event stream. The
    /// stream ends once the fetcher and all in-flight requests are gone.
    pub fn new(gateway: Gateway) -> (Fetcher, mpsc::UnboundedReceiver<Event>) {
        let (events, rx) = mpsc::unbounded_channel();
        (Fetcher { gateway, events }, rx)
    }

    pub fn fetch_stations(&self) {
        let gateway = self.gateway.clone();
        self.dispatch(
            Query::Stations,
            async move { gateway.get_stations().await },
            Event::StationsReady,
        );
    }

    pub fn fetch_sensors(&self, station_id: u32) {
        let gateway = self.gateway.clone();
        self.dispatch(
            Query::Sensors(station_id),
            async move { gateway.get_sensors(station_id).await },
            Event::SensorsReady,
        );
    }

    /// Readings for a station or sensor id.
    pub fn fetch_measurements(&self, id: u32) {
        let gateway = self.gateway.clone();
        self.dispatch(
            Query::Measurements(id),
            async move { gateway.get_measurements(id).await },
            Event::MeasurementsReady,
        );
    }

    /// Same request as [`Fetcher::fetch_measurements`], reported as sensor data.
    pub fn fetch_sensor_data(&self, sensor_id: u32) {
        let gateway = self.gateway.clone();
        self.dispatch(
            Query::SensorData(sensor_id),
            async move { gateway.get_measurements(sensor_id).await },
            Event::MeasurementsReady,
        );
    }

    fn dispatch<T, F>(&self, query: Query, request: F, ready: fn(Vec<T>) -> Event)
    where
        T: Send + 'static,
        F: Future<Output = Result<Vec<T>, Error>> + Send + 'static,
    {
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = match request.await {
                Ok(items) => {
                    log::debug!("Fetched {} ({} items)", query, items.len());
                    ready(items)
                }
                Err(err) => Event::Error(query.describe(&err)),
            };
            // The receiver may already be gone; the outcome is then unobserved.
            let _ = events.send(event);
        });
    }
}
