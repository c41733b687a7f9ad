use crate::domain::model::Coordinate;

/// Kaaba, Masjid al-Haram.
pub const KAABA: Coordinate = Coordinate::new(21.4225, 39.8262);

impl Coordinate {
    /// Initial great-circle bearing from `self` to `target`, degrees
    /// clockwise from true north in [0, 360).
    ///
    /// Inputs are not range-checked. Coincident points give 0.0.
    pub fn bearing_to(&self, target: &Coordinate) -> f64 {
        let d_lng = (target.longitude - self.longitude).to_radians();
        let lat1 = self.latitude.to_radians();
        let lat2 = target.latitude.to_radians();

        let y = d_lng.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();

        let bearing = y.atan2(x).to_degrees();
        (bearing + 360.0) % 360.0
    }

    pub fn qibla_bearing(&self) -> f64 {
        self.bearing_to(&KAABA)
    }
}

pub fn qibla_bearing(latitude: f64, longitude: f64) -> f64 {
    Coordinate::new(latitude, longitude).qibla_bearing()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-4;

    #[test]
    fn test_new_york_baseline() {
        let bearing = qibla_bearing(40.7128, -74.0060);
        assert!((bearing - 58.4817).abs() < EPS, "got {}", bearing);
    }

    #[test]
    fn test_known_cities() {
        let london = qibla_bearing(51.5074, -0.1278);
        assert!((london - 118.9872).abs() < EPS, "got {}", london);

        let sydney = qibla_bearing(-33.8688, 151.2093);
        assert!((sydney - 277.4996).abs() < EPS, "got {}", sydney);

        // 麥地那幾乎在正南方
        let medina = qibla_bearing(24.4672, 39.6111);
        assert!((medina - 176.2353).abs() < EPS, "got {}", medina);
    }

    #[test]
    fn test_at_kaaba_is_deterministic() {
        let first = qibla_bearing(KAABA.latitude, KAABA.longitude);
        let second = qibla_bearing(KAABA.latitude, KAABA.longitude);
        assert_eq!(first, second);
        assert!((0.0..360.0).contains(&first));
    }

    #[test]
    fn test_range_over_grid() {
        for lat in (-90..=90).step_by(15) {
            for lng in (-180..=180).step_by(20) {
                let bearing = qibla_bearing(lat as f64, lng as f64);
                assert!(
                    (0.0..360.0).contains(&bearing),
                    "({}, {}) -> {}",
                    lat,
                    lng,
                    bearing
                );
            }
        }
    }

    #[test]
    fn test_bearing_to_due_east_on_equator() {
        let origin = Coordinate::new(0.0, 0.0);
        let east = Coordinate::new(0.0, 10.0);
        assert!((origin.bearing_to(&east) - 90.0).abs() < 1e-9);
    }
}
