use super::driver::{Simulation, SimulationConfig};
use crate::error::SceneError;
use crate::ik::{Arm, JointSpec};
use crate::path::{Path, TargetPath};

/// Scale applied to the largest path radius to size the viewing volume.
pub const SIZE_HINT_SCALE: f32 = 1.15;

/// Assembles an arm and its target path from scene input, in order.
///
/// Bad entries are logged, recorded and skipped; assembly never fails halfway.
#[derive(Debug, Default)]
pub struct SceneBuilder {
    arm: Arm,
    path: Option<Path>,
    max_radius: f32,
    skipped: Vec<SceneError>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn joint(mut self, spec: JointSpec) -> Self {
        self.arm.append(spec.kind, spec.outboard_length);
        self
    }

    /// Parses and appends a `TAG/LENGTH` (or bare `LENGTH`) joint token.
    pub fn joint_tag(self, token: &str) -> Self {
        match token.parse::<JointSpec>() {
            Ok(spec) => self.joint(spec),
            Err(e) => self.skip(e),
        }
    }

    pub fn joint_tags<I, S>(self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .fold(self, |builder, token| builder.joint_tag(token.as_ref()))
    }

    pub fn coefficients(mut self, a: f32, b: f32) -> Self {
        self.path.get_or_insert_with(Path::default).set_coefficients(a, b);
        self
    }

    pub fn circle(self, radius: f32) -> Self {
        self.ellipse(radius, radius)
    }

    /// Sets both radii; a later call replaces an earlier one.
    /// A rejected pair leaves the path as it was, including unconfigured.
    pub fn ellipse(mut self, rad1: f32, rad2: f32) -> Self {
        let mut path = self.path.unwrap_or_default();
        match path.set_radii(rad1, rad2) {
            Ok(()) => {
                self.path = Some(path);
                self.max_radius = self.max_radius.max(rad1).max(rad2);
                self
            }
            Err(e) => self.skip(e),
        }
    }

    fn skip(mut self, error: SceneError) -> Self {
        log::warn!("ignoring scene entry: {}", error);
        self.skipped.push(error);
        self
    }

    pub fn build(self) -> Scene {
        Scene {
            arm: self.arm,
            path: self.path.map_or(TargetPath::Stationary, TargetPath::Curve),
            size_hint: self.max_radius * SIZE_HINT_SCALE,
            skipped: self.skipped,
        }
    }
}

#[derive(Debug)]
pub struct Scene {
    pub arm: Arm,
    pub path: TargetPath,
    /// Half-extent a viewer should frame; zero without a configured radius.
    pub size_hint: f32,
    pub skipped: Vec<SceneError>,
}

impl Scene {
    pub fn into_simulation(self, config: SimulationConfig) -> Result<Simulation, SceneError> {
        if self.arm.is_empty() {
            return Err(SceneError::EmptyArm);
        }
        Ok(Simulation::new(self.arm, self.path, config).with_size_hint(self.size_hint))
    }
}
