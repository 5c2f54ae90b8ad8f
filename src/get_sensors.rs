use crate::{decode_sensors, Error, Gateway, Sensor};

impl Gateway {
    pub async fn get_sensors(&self, station_id: u32) -> Result<Vec<Sensor>, Error> {
        //https://api.gios.gov.pl/pjp-api/rest/station/sensors/14

        let url = format!("{}/station/sensors/{}", self.base_url, station_id);
        let text = self.get_text(&url).await?;
        decode_sensors(&text)
    }
}
