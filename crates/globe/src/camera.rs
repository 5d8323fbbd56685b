use foundation::math::{Vec2, Vec3};

/// Fixed perspective camera on +Z looking at the origin, +Y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub fov_y_rad: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            fov_y_rad: 75f64.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f64 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 1.0 || self.height <= 1.0
    }
}

/// A world point in canvas pixels; `depth` is distance along the view axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

impl Camera {
    /// Pixels per world unit at unit view depth.
    fn focal_px(&self, viewport: Viewport) -> f64 {
        0.5 * viewport.height / (0.5 * self.fov_y_rad).tan()
    }

    /// Projects `p` to canvas pixels (origin top-left, y down).
    ///
    /// `None` for points outside the near/far range or on an empty viewport.
    pub fn project(&self, p: Vec3, viewport: Viewport) -> Option<ScreenPoint> {
        if viewport.is_empty() {
            return None;
        }
        let v = p - self.eye;
        let depth = -v.z;
        if depth < self.near || depth > self.far {
            return None;
        }

        let f = self.focal_px(viewport);
        let c = viewport.center();
        Some(ScreenPoint {
            x: c.x + f * v.x / depth,
            y: c.y - f * v.y / depth,
            depth,
        })
    }

    /// Screen radius of a world-space length `size` seen at `depth`.
    pub fn scale_at(&self, size: f64, depth: f64, viewport: Viewport) -> f64 {
        if depth <= 0.0 {
            return 0.0;
        }
        self.focal_px(viewport) * size / depth
    }

    /// Pixel radius of the silhouette of an origin-centred sphere.
    pub fn sphere_screen_radius(&self, radius: f64, viewport: Viewport) -> f64 {
        let d = self.eye.length();
        if d <= radius {
            return f64::INFINITY;
        }
        let half_angle = (radius / d).asin();
        self.focal_px(viewport) * half_angle.tan()
    }

    /// True when a point on the sphere surface faces the camera.
    pub fn faces(&self, surface_point: Vec3) -> bool {
        surface_point.dot(self.eye - surface_point) > 0.0
    }
}
