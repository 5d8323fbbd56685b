use foundation::math::{LatLon, Vec3, lat_lon_to_sphere};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::markers::{LAUNCH_SITES, LaunchSite};

/// Globe radius in world units.
pub const GLOBE_RADIUS: f64 = 2.0;

/// Sphere spin about +Y (radians per second).
pub const EARTH_SPIN_RAD_PER_S: f64 = 0.12;

/// Starfield spin about +Y (radians per second).
pub const STAR_SPIN_RAD_PER_S: f64 = 0.012;

/// Longest step a single update may take.
pub const MAX_STEP_S: f64 = 0.1;

pub const STAR_COUNT: usize = 1000;

/// Stars fill a cube of this edge length centred on the origin.
pub const STARFIELD_EXTENT: f64 = 20.0;

pub const GRATICULE_STEP_DEG: f64 = 15.0;

const GRATICULE_SAMPLE_DEG: f64 = 5.0;

pub const DEFAULT_STAR_SEED: u64 = 0x5eed_0f_57a75;

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub site: LaunchSite,
    /// Position on the unrotated sphere.
    pub local: Vec3,
}

/// Sphere, markers and starfield, plus their current rotation.
#[derive(Debug, Clone)]
pub struct GlobeScene {
    earth_angle: f64,
    star_angle: f64,
    markers: Vec<Marker>,
    stars: Vec<Vec3>,
    graticule: Vec<Vec<Vec3>>,
}

impl Default for GlobeScene {
    fn default() -> Self {
        Self::new(DEFAULT_STAR_SEED)
    }
}

impl GlobeScene {
    pub fn new(star_seed: u64) -> Self {
        Self::with_sites(&LAUNCH_SITES, star_seed)
    }

    pub fn with_sites(sites: &[LaunchSite], star_seed: u64) -> Self {
        let markers = sites
            .iter()
            .map(|site| Marker {
                site: *site,
                local: lat_lon_to_sphere(site.position, GLOBE_RADIUS),
            })
            .collect();

        Self {
            earth_angle: 0.0,
            star_angle: 0.0,
            markers,
            stars: starfield(star_seed),
            graticule: graticule(GRATICULE_STEP_DEG),
        }
    }

    /// Advances the spin by `dt_s` seconds, clamped to `[0, MAX_STEP_S]`.
    pub fn advance(&mut self, dt_s: f64) {
        let dt = if dt_s.is_finite() {
            dt_s.clamp(0.0, MAX_STEP_S)
        } else {
            0.0
        };
        self.earth_angle = (self.earth_angle + EARTH_SPIN_RAD_PER_S * dt) % std::f64::consts::TAU;
        self.star_angle = (self.star_angle + STAR_SPIN_RAD_PER_S * dt) % std::f64::consts::TAU;
    }

    pub fn earth_angle(&self) -> f64 {
        self.earth_angle
    }

    pub fn star_angle(&self) -> f64 {
        self.star_angle
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// World-space geometry at the current rotation.
    pub fn snapshot(&self) -> GlobeSnapshot {
        let earth = self.earth_angle;
        let stars = self.star_angle;
        GlobeSnapshot {
            radius: GLOBE_RADIUS,
            earth_angle: earth,
            markers: self
                .markers
                .iter()
                .map(|m| MarkerInstance {
                    name: m.site.name,
                    color: m.site.color(),
                    size: m.site.size,
                    position: m.local.rotate_y(earth),
                })
                .collect(),
            stars: self.stars.iter().map(|s| s.rotate_y(stars)).collect(),
            graticule: self
                .graticule
                .iter()
                .map(|line| line.iter().map(|p| p.rotate_y(earth)).collect())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerInstance {
    pub name: &'static str,
    pub color: &'static str,
    pub size: f64,
    pub position: Vec3,
}

/// Everything a renderer needs for one frame, in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeSnapshot {
    pub radius: f64,
    pub earth_angle: f64,
    pub markers: Vec<MarkerInstance>,
    pub stars: Vec<Vec3>,
    /// Polylines of parallels and meridians on the sphere surface.
    pub graticule: Vec<Vec<Vec3>>,
}

fn starfield(seed: u64) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    let half = STARFIELD_EXTENT / 2.0;
    (0..STAR_COUNT)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
            )
        })
        .collect()
}

fn graticule(step_deg: f64) -> Vec<Vec<Vec3>> {
    let mut lines = Vec::new();
    let on_sphere = |lat: f64, lon: f64| lat_lon_to_sphere(LatLon::new(lat, lon), GLOBE_RADIUS);

    let samples = (360.0 / GRATICULE_SAMPLE_DEG) as usize;
    let mut lat = -90.0 + step_deg;
    while lat < 90.0 - 1e-9 {
        lines.push(
            (0..=samples)
                .map(|i| on_sphere(lat, -180.0 + i as f64 * GRATICULE_SAMPLE_DEG))
                .collect(),
        );
        lat += step_deg;
    }

    let samples = (180.0 / GRATICULE_SAMPLE_DEG) as usize;
    let mut lon = -180.0;
    while lon < 180.0 - 1e-9 {
        lines.push(
            (0..=samples)
                .map(|i| on_sphere(-90.0 + i as f64 * GRATICULE_SAMPLE_DEG, lon))
                .collect(),
        );
        lon += step_deg;
    }

    lines
}
