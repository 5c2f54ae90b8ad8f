use crate::{Error, Gateway, Location};
use serde::Deserialize;

impl Gateway {
    /// Resolves a free-text address to coordinates using a Nominatim-style
    /// search endpoint. The first hit wins.
    pub async fn geocode(&self, address: &str) -> Result<Location, Error> {
        #[derive(Deserialize)]
        struct Place {
            lat: String,
            lon: String,
            #[serde(default)]
            display_name: String,
        }

        //https://nominatim.openstreetmap.org/search?format=json&limit=1&q=Warszawa

        let url = reqwest::Url::parse_with_params(
            &format!("{}/search", self.geocoder_url),
            &[("format", "json"), ("limit", "1"), ("q", address)],
        )
        .map_err(|err| Error::Unspecified(format!("Invalid geocoder url ({}).", err)))?;

        let text = self.get_text(url.as_str()).await?;
        let places: Vec<Place> = serde_json::from_str(&text).map_err(Error::from_json)?;

        let place = match places.into_iter().next() {
            Some(place) => place,
            None => return Err(Error::NotFound),
        };

        let latitude = place.lat.parse::<f64>().map_err(|_| {
            Error::ParseError(format!("unexpected response shape (lat \"{}\").", place.lat))
        })?;
        let longitude = place.lon.parse::<f64>().map_err(|_| {
            Error::ParseError(format!("unexpected response shape (lon \"{}\").", place.lon))
        })?;

        log::debug!(
            "Resolved \"{}\" to {} ({}, {})",
            address,
            place.display_name,
            latitude,
            longitude
        );
        Ok(Location::new(latitude, longitude))
    }
}
