#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers, by the haversine formula. Good to a
/// fraction of a percent, which is plenty for a "technicians near me" radius.
pub fn distance_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlat = (to.latitude - from.latitude).to_radians();
    let dlon = (to.longitude - from.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: Coordinates = Coordinates {
        latitude: 51.5074,
        longitude: -0.1278,
    };
    const PARIS: Coordinates = Coordinates {
        latitude: 48.8566,
        longitude: 2.3522,
    };

    #[test]
    fn zero_for_same_point() {
        assert!(distance_km(LONDON, LONDON).abs() < f64::EPSILON);
    }

    #[test]
    fn london_to_paris() {
        let distance = distance_km(LONDON, PARIS);
        assert!((distance - 343.5).abs() < 1.0, "got {distance}");
    }

    #[test]
    fn symmetric() {
        assert_eq!(distance_km(LONDON, PARIS), distance_km(PARIS, LONDON));
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let a = Coordinates {
            latitude: 0.0,
            longitude: 0.0,
        };
        let b = Coordinates {
            latitude: 0.0,
            longitude: 1.0,
        };

        let distance = distance_km(a, b);
        assert!((distance - 111.19).abs() < 0.1, "got {distance}");
    }
}
