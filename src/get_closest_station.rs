use crate::{closest_station, Error, Gateway, Location, Station};

impl Gateway {
    /// Fetches the station catalog and returns the station nearest to
    /// `location` with its great-circle distance in kilometres.
    pub async fn get_closest_station(&self, location: &Location) -> Result<(Station, f64), Error> {
        let stations = self.get_stations().await?;

        match closest_station(&stations, location) {
            Some((station, distance)) => Ok((station.clone(), distance)),
            None => Err(Error::NotFound),
        }
    }
}
