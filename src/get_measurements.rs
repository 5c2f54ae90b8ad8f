use crate::{decode_measurements, Error, Gateway, Measurement};

impl Gateway {
    /// Readings of one series. The same endpoint serves station and sensor
    /// ids; null readings are dropped.
    pub async fn get_measurements(&self, id: u32) -> Result<Vec<Measurement>, Error> {
        //https://api.gios.gov.pl/pjp-api/rest/data/getData/92

        let url = format!("{}/data/getData/{}", self.base_url, id);
        let text = self.get_text(&url).await?;
        decode_measurements(&text)
    }
}
