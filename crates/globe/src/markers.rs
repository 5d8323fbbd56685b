use foundation::math::LatLon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Agency {
    Nasa,
    Isro,
    SpaceX,
    Cnsa,
}

impl Agency {
    pub fn name(self) -> &'static str {
        match self {
            Agency::Nasa => "National Aeronautics and Space Administration (USA)",
            Agency::Isro => "Indian Space Research Organisation (India)",
            Agency::SpaceX => "SpaceX (USA)",
            Agency::Cnsa => "China National Space Administration (China)",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Agency::Nasa => "#ff3333",
            Agency::Isro => "#ff9933",
            Agency::SpaceX => "#00ff00",
            Agency::Cnsa => "#ffcc00",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchSite {
    pub name: &'static str,
    pub agency: Agency,
    pub position: LatLon,
    /// Marker radius in world units.
    pub size: f64,
}

impl LaunchSite {
    pub fn color(&self) -> &'static str {
        self.agency.color()
    }
}

pub const MARKER_SIZE: f64 = 0.05;

pub const LAUNCH_SITES: [LaunchSite; 5] = [
    LaunchSite {
        name: "Kennedy Space Center",
        agency: Agency::Nasa,
        position: LatLon::new(28.5729, -80.6490),
        size: MARKER_SIZE,
    },
    LaunchSite {
        name: "Satish Dhawan Space Centre",
        agency: Agency::Isro,
        position: LatLon::new(13.7199, 80.2304),
        size: MARKER_SIZE,
    },
    LaunchSite {
        name: "Starbase Texas",
        agency: Agency::SpaceX,
        position: LatLon::new(25.9972, -97.1572),
        size: MARKER_SIZE,
    },
    LaunchSite {
        name: "Vandenberg",
        agency: Agency::Nasa,
        position: LatLon::new(34.6, -120.6),
        size: MARKER_SIZE,
    },
    LaunchSite {
        name: "Shanghai",
        agency: Agency::Cnsa,
        position: LatLon::new(31.2, 121.5),
        size: MARKER_SIZE,
    },
];

/// Agencies with at least one site, in the order they appear in the legend.
pub fn legend() -> Vec<Agency> {
    let mut out: Vec<Agency> = Vec::new();
    for site in &LAUNCH_SITES {
        if !out.contains(&site.agency) {
            out.push(site.agency);
        }
    }
    out
}
