mod analysis;
pub use analysis::Analysis;
mod cache;
pub use cache::Cache;
pub mod config;
pub use config::Config;
mod coordinator;
pub use coordinator::Coordinator;
mod error;
pub use error::Error;
mod fetcher;
pub use fetcher::{Event, Fetcher, Query};
mod geocode;
mod get_closest_station;
mod get_measurements;
mod get_sensors;
mod get_stations;
mod location;
pub use location::{closest_station, stations_within, Location, EARTH_RADIUS_KM};
pub mod logging;
mod measurement;
pub use measurement::{decode_measurements, encode_measurements, parse_date, Measurement};
mod period;
pub use period::{chart_series, Period};
mod sensor;
pub use sensor::{decode_sensors, Sensor};
mod station;
pub use station::{decode_stations, Station};

const BASE_URL: &str = "https://api.gios.gov.pl/pjp-api/rest";
const GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// HTTP access to the air quality API. Cheap to clone; clones share one
/// connection pool.
#[derive(Clone, Debug)]
pub struct Gateway {
    client: reqwest::Client,
    base_url: String,
    geocoder_url: String,
}

impl Gateway {
    pub fn new(config: &Config) -> Result<Gateway, Error> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Accept",
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = match reqwest::ClientBuilder::new()
            .default_headers(headers)
            .user_agent(config.api.user_agent.as_str())
            .https_only(config.api.https_only)
            .timeout(config.timeout())
            .build()
        {
            Ok(r) => r,
            Err(err) => {
                return Err(Error::Unspecified(format!(
                    "Could not create reqwest client ({}).",
                    err
                )))
            }
        };

        let c = Gateway {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            geocoder_url: config.geocoder.url.trim_end_matches('/').to_string(),
        };
        Ok(c)
    }

    /// Issues one GET and returns the body of a successful response. No
    /// retries: a failure is reported to the caller as is.
    async fn get_text(&self, url: &str) -> Result<String, Error> {
        log::debug!("GET {}", url);

        let res = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(err) => {
                return Err(Error::NetworkError(format!(
                    "Could not send request ({}).",
                    err
                )))
            }
        };

        let status = res.status().as_u16();
        let text = match res.text().await {
            Ok(text) => text,
            Err(err) => {
                return Err(Error::NetworkError(format!(
                    "Could not read response body ({}).",
                    err
                )))
            }
        };

        if !(200..=299).contains(&status) {
            log::debug!("GET {} returned {}: {}", url, status, text);
            return Err(Error::ApiError(status, text));
        }

        Ok(text)
    }
}
