use super::Vec3;

/// Geographic position in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLon {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl LatLon {
    pub const fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }
}

/// Places a latitude/longitude on a sphere of `radius` centred at the origin.
///
/// Y is the polar axis. Longitude is offset by 180 degrees and X is mirrored,
/// so the prime meridian on the equator lands on +X.
pub fn lat_lon_to_sphere(pos: LatLon, radius: f64) -> Vec3 {
    let phi = (90.0 - pos.lat_deg).to_radians();
    let theta = (pos.lon_deg + 180.0).to_radians();

    let x = -(phi.sin() * theta.cos());
    let y = phi.cos();
    let z = phi.sin() * theta.sin();

    Vec3::new(x * radius, y * radius, z * radius)
}

#[cfg(test)]
mod tests {
    use super::{LatLon, lat_lon_to_sphere};
    use crate::math::Vec3;

    fn assert_close(a: Vec3, b: Vec3, eps: f64) {
        let d = (a - b).length();
        assert!(d <= eps, "expected {a:?} ~= {b:?} (diff {d})");
    }

    #[test]
    fn equator_prime_meridian_is_positive_x() {
        let p = lat_lon_to_sphere(LatLon::new(0.0, 0.0), 2.0);
        assert_close(p, Vec3::new(2.0, 0.0, 0.0), 1e-12);
    }

    #[test]
    fn poles_sit_on_y_axis() {
        assert_close(
            lat_lon_to_sphere(LatLon::new(90.0, 37.0), 1.0),
            Vec3::new(0.0, 1.0, 0.0),
            1e-12,
        );
        assert_close(
            lat_lon_to_sphere(LatLon::new(-90.0, -120.0), 3.0),
            Vec3::new(0.0, -3.0, 0.0),
            1e-12,
        );
    }

    #[test]
    fn ninety_east_is_negative_z() {
        let p = lat_lon_to_sphere(LatLon::new(0.0, 90.0), 1.0);
        assert_close(p, Vec3::new(0.0, 0.0, -1.0), 1e-12);
    }

    #[test]
    fn projected_points_lie_on_the_sphere() {
        for (lat, lon) in [(28.5729, -80.649), (13.7199, 80.2304), (-33.9, 151.2)] {
            let p = lat_lon_to_sphere(LatLon::new(lat, lon), 2.0);
            assert!((p.length() - 2.0).abs() < 1e-12);
        }
    }
}
