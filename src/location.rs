use crate::Station;
use serde::{Deserialize, Serialize};

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,

    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Location {
        Location {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in kilometres (haversine).
    pub fn distance_km(&self, other: &Location) -> f64 {
        let d_lat = deg2rad(other.latitude - self.latitude);
        let d_lon = deg2rad(other.longitude - self.longitude);
        let a = f64::sin(d_lat / 2.0).powi(2)
            + f64::cos(deg2rad(self.latitude))
                * f64::cos(deg2rad(other.latitude))
                * f64::sin(d_lon / 2.0).powi(2);
        // Rounding can push `a` past 1 for near-antipodal points.
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * f64::atan2(a.sqrt(), (1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

/// Stations no further than `radius_km` from `center`, in their original order.
pub fn stations_within(stations: &[Station], center: &Location, radius_km: f64) -> Vec<Station> {
    stations
        .iter()
        .filter(|station| station.location().distance_km(center) <= radius_km)
        .cloned()
        .collect()
}

/// The station nearest to `center` together with its distance in kilometres.
pub fn closest_station<'a>(stations: &'a [Station], center: &Location) -> Option<(&'a Station, f64)> {
    let mut closest: Option<(&Station, f64)> = None;
    for station in stations {
        let distance = station.location().distance_km(center);
        match &closest {
            Some((_, closest_distance)) => {
                if &distance < closest_distance {
                    closest = Some((station, distance));
                }
            }
            None => closest = Some((station, distance)),
        }
    }
    closest
}

fn deg2rad(degrees: f64) -> f64 {
    degrees * (std::f64::consts::PI / 180.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: u32, latitude: f64, longitude: f64) -> Station {
        Station {
            id,
            name: format!("Station {}", id),
            latitude,
            longitude,
        }
    }

    #[test]
    fn distance_to_self_is_zero() {
        let warsaw = Location::new(52.2297, 21.0122);
        assert_eq!(warsaw.distance_km(&warsaw), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let warsaw = Location::new(52.2297, 21.0122);
        let krakow = Location::new(50.0647, 19.945);
        let there = warsaw.distance_km(&krakow);
        let back = krakow.distance_km(&warsaw);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn distance_warsaw_krakow() {
        let warsaw = Location::new(52.2297, 21.0122);
        let krakow = Location::new(50.0647, 19.945);
        let distance = warsaw.distance_km(&krakow);
        assert!((distance - 252.0).abs() < 2.0, "got {}", distance);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = Location::new(0.0, 0.0);
        let b = Location::new(1.0, 0.0);
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        assert!((a.distance_km(&b) - expected).abs() < 1e-6);
    }

    #[test]
    fn near_antipodal_distance_is_finite() {
        let half_circumference = EARTH_RADIUS_KM * std::f64::consts::PI;
        for i in 0..2000 {
            let lat = -89.0 + 178.0 * (i as f64) / 2000.0;
            let lon = -179.0 + 0.17 * i as f64;
            let a = Location::new(lat, lon);
            let b = Location::new(-lat, lon - 180.0);
            let distance = a.distance_km(&b);
            assert!(distance.is_finite(), "NaN for ({}, {})", lat, lon);
            assert!(distance <= half_circumference + 1e-6);
            assert!(distance > half_circumference - 1.0);
        }
    }

    #[test]
    fn antipodal_station_is_found_within_half_circumference() {
        let stations = vec![station(1, 52.0, 21.0)];
        let center = Location::new(-52.0, -159.0);
        let radius = EARTH_RADIUS_KM * std::f64::consts::PI + 1e-6;
        assert_eq!(stations_within(&stations, &center, radius).len(), 1);
        let (closest, distance) = closest_station(&stations, &center).unwrap();
        assert_eq!(closest.id, 1);
        assert!(distance.is_finite());
    }

    #[test]
    fn station_at_center_is_kept_with_zero_radius() {
        let stations = vec![station(1, 52.0, 21.0)];
        let kept = stations_within(&stations, &Location::new(52.0, 21.0), 0.0);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 1);
    }

    #[test]
    fn stations_within_keeps_order_and_drops_far_ones() {
        let stations = vec![
            station(3, 52.01, 21.0),
            station(1, 54.35, 18.65),
            station(2, 52.0, 21.02),
        ];
        let kept = stations_within(&stations, &Location::new(52.0, 21.0), 5.0);
        let ids: Vec<u32> = kept.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn closest_picks_nearest() {
        let stations = vec![
            station(1, 54.35, 18.65),
            station(2, 52.0, 21.02),
            station(3, 50.06, 19.94),
        ];
        let (closest, distance) = closest_station(&stations, &Location::new(52.0, 21.0)).unwrap();
        assert_eq!(closest.id, 2);
        assert!(distance < 2.0);
    }

    #[test]
    fn closest_of_nothing_is_none() {
        assert!(closest_station(&[], &Location::new(52.0, 21.0)).is_none());
    }
}
