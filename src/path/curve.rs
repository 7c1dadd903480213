use crate::error::SceneError;
use glam::Vec3;
use std::fmt;

/// Drop applied to every curve point so the loop sits below the arm's base.
pub const HEIGHT_OFFSET: f32 = 0.5;

/// Superellipse-style loop in the xy-plane with a cubic height term:
/// `z = a x^3 + b y^3 - 0.5`. The parameter is kept in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Path {
    a: f32,
    b: f32,
    rad1: f32,
    rad2: f32,
    degree: f32,
}

impl Default for Path {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 1.0,
            rad1: 1.0,
            rad2: 1.0,
            degree: 0.0,
        }
    }
}

impl Path {
    pub fn new(a: f32, b: f32, rad1: f32, rad2: f32) -> Result<Self, SceneError> {
        let mut path = Self::default();
        path.set_coefficients(a, b);
        path.set_radii(rad1, rad2)?;
        Ok(path)
    }

    pub fn set_coefficients(&mut self, a: f32, b: f32) {
        self.a = a;
        self.b = b;
    }

    pub fn set_radii(&mut self, rad1: f32, rad2: f32) -> Result<(), SceneError> {
        let valid = |r: f32| r.is_finite() && r > 0.0;
        if !valid(rad1) || !valid(rad2) {
            return Err(SceneError::InvalidRadii { rad1, rad2 });
        }
        self.rad1 = rad1;
        self.rad2 = rad2;
        Ok(())
    }

    pub fn coefficients(&self) -> (f32, f32) {
        (self.a, self.b)
    }

    pub fn radii(&self) -> (f32, f32) {
        (self.rad1, self.rad2)
    }

    pub fn degree(&self) -> f32 {
        self.degree
    }

    /// Advances the parameter, wrapping into `[0, 360)`.
    pub fn add_degrees(&mut self, delta: f32) {
        self.degree = wrap_degrees(self.degree + delta);
    }

    pub fn point_at(&self, degree: f32) -> Vec3 {
        let theta = degree.to_radians();
        let (sin, cos) = theta.sin_cos();
        let radius = self.rad1 * self.rad2
            / (self.rad1 * self.rad1 * sin * sin + self.rad2 * self.rad2 * cos * cos).sqrt();

        let x = radius * cos;
        let y = radius * sin;
        let z = self.a * x.powi(3) + self.b * y.powi(3);
        Vec3::new(x, y, z - HEIGHT_OFFSET)
    }

    pub fn current_point(&self) -> Vec3 {
        self.point_at(self.degree)
    }

    pub fn next_point(&mut self, delta_degrees: f32) -> Vec3 {
        self.add_degrees(delta_degrees);
        self.current_point()
    }

    /// `steps` points spread over one revolution, starting at the current
    /// parameter.
    pub fn sample(&self, steps: usize) -> Vec<Vec3> {
        if steps == 0 {
            return Vec::new();
        }
        let step = 360.0 / steps as f32;
        (0..steps)
            .map(|i| self.point_at(wrap_degrees(self.degree + step * i as f32)))
            .collect()
    }
}

/// `rem_euclid` rounds tiny negative inputs up to exactly 360.
fn wrap_degrees(degree: f32) -> f32 {
    let wrapped = degree.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Path:")?;
        writeln!(f, "Coefficients: a = {}, b = {}", self.a, self.b)?;
        writeln!(f, "Radii: x = {}, y = {}", self.rad1, self.rad2)?;
        write!(f, "Current degree: {}", self.degree)
    }
}

/// Source of per-tick targets. `Stationary` stands in when no path is
/// configured: it always yields the origin and never advances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetPath {
    Curve(Path),
    Stationary,
}

impl TargetPath {
    pub fn current_point(&self) -> Vec3 {
        match self {
            TargetPath::Curve(path) => path.current_point(),
            TargetPath::Stationary => Vec3::ZERO,
        }
    }

    pub fn next_point(&mut self, delta_degrees: f32) -> Vec3 {
        match self {
            TargetPath::Curve(path) => path.next_point(delta_degrees),
            TargetPath::Stationary => Vec3::ZERO,
        }
    }

    pub fn degree(&self) -> f32 {
        match self {
            TargetPath::Curve(path) => path.degree(),
            TargetPath::Stationary => 0.0,
        }
    }
}

impl From<Path> for TargetPath {
    fn from(path: Path) -> Self {
        TargetPath::Curve(path)
    }
}
