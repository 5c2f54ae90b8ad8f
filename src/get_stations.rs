use crate::{decode_stations, Error, Gateway, Station};

impl Gateway {
    pub async fn get_stations(&self) -> Result<Vec<Station>, Error> {
        //https://api.gios.gov.pl/pjp-api/rest/station/findAll

        let url = format!("{}/station/findAll", self.base_url);
        let text = self.get_text(&url).await?;
        decode_stations(&text)
    }
}
