use super::body::Body;
use crate::error::SceneError;
use crate::math::{Frame, Mat3, Mat4, Vec3};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Step used when finite-differencing a joint's Jacobian (2^-6).
pub const JACOBIAN_EPSILON: f32 = 0.015625;

/// Largest constraint count of any joint kind.
pub const MAX_CONSTRAINTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointKind {
    /// Free rotation parameterized by a rotation vector.
    Ball,
    /// Rotation about the local z-axis.
    Pin,
    /// Extension along the local x-axis; never negative.
    Prismatic,
    /// Rotation about local z followed by rotation about local y.
    DoublePin,
}

impl JointKind {
    pub const ALL: [JointKind; 4] = [
        JointKind::Ball,
        JointKind::Pin,
        JointKind::Prismatic,
        JointKind::DoublePin,
    ];

    pub const fn constraint_count(self) -> usize {
        match self {
            JointKind::Ball => 3,
            JointKind::Pin | JointKind::Prismatic => 1,
            JointKind::DoublePin => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            JointKind::Ball => "Ball Joint",
            JointKind::Pin => "Pin Joint",
            JointKind::Prismatic => "Prismatic Joint",
            JointKind::DoublePin => "Double Pin Joint",
        }
    }

    /// Short tag used in scene assembly input.
    pub const fn tag(self) -> &'static str {
        match self {
            JointKind::Ball => "ba",
            JointKind::Pin => "pn",
            JointKind::Prismatic => "pm",
            JointKind::DoublePin => "dp",
        }
    }

    fn rest_configuration(self) -> [f32; MAX_CONSTRAINTS] {
        match self {
            JointKind::Ball => [1.0, 1.0, 1.0],
            JointKind::Prismatic => [0.05, 0.0, 0.0],
            JointKind::Pin | JointKind::DoublePin => [0.0; MAX_CONSTRAINTS],
        }
    }

    fn transform_for(self, configuration: &[f32; MAX_CONSTRAINTS]) -> Mat4 {
        match self {
            JointKind::Pin => Mat4::from_rotation_z(configuration[0]),
            JointKind::Prismatic => Mat4::from_translation(Vec3::new(configuration[0], 0.0, 0.0)),
            JointKind::DoublePin => {
                Mat4::from_rotation_z(configuration[0]) * Mat4::from_rotation_y(configuration[1])
            }
            JointKind::Ball => Mat4::from_mat3(exp_map_rotation(Vec3::from_array(*configuration))),
        }
    }
}

impl fmt::Display for JointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for JointKind {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ba" | "ball" => Ok(JointKind::Ball),
            "pn" | "pin" => Ok(JointKind::Pin),
            "pm" | "prismatic" => Ok(JointKind::Prismatic),
            "dp" | "double-pin" | "doublepin" => Ok(JointKind::DoublePin),
            _ => Err(SceneError::MalformedJointSpec {
                spec: s.to_string(),
            }),
        }
    }
}

/// Rodrigues rotation for a rotation vector. A zero vector has no axis and
/// maps to the identity.
fn exp_map_rotation(exp_map: Vec3) -> Mat3 {
    let angle = exp_map.length();
    if angle == 0.0 {
        return Mat3::IDENTITY;
    }

    let axis = exp_map / angle;
    let cross = Mat3::from_cols(
        Vec3::new(0.0, axis.z, -axis.y),
        Vec3::new(-axis.z, 0.0, axis.x),
        Vec3::new(axis.y, -axis.x, 0.0),
    );
    let outer = Mat3::from_cols(axis * axis.x, axis * axis.y, axis * axis.z);

    outer + cross * angle.sin() - (cross * cross) * angle.cos()
}

/// Per-joint Jacobian: one column per constraint, expressed in the joint's
/// own frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointJacobian {
    columns: [Vec3; MAX_CONSTRAINTS],
    len: usize,
}

impl JointJacobian {
    pub fn columns(&self) -> &[Vec3] {
        &self.columns[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Re-expresses every column in the frame given by `rotation`.
    pub fn rotated(&self, rotation: Mat3) -> Self {
        let mut columns = self.columns;
        for column in &mut columns[..self.len] {
            *column = rotation * *column;
        }
        Self {
            columns,
            len: self.len,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Joint {
    kind: JointKind,
    inboard: Option<Arc<Body>>,
    outboard: Arc<Body>,
    configuration: [f32; MAX_CONSTRAINTS],
}

impl Joint {
    /// Creates a joint at its kind's rest configuration.
    pub fn new(kind: JointKind, inboard: Option<Arc<Body>>, outboard: Arc<Body>) -> Self {
        Self {
            kind,
            inboard,
            outboard,
            configuration: kind.rest_configuration(),
        }
    }

    /// Overrides the leading configuration components. Extra values are
    /// ignored; non-finite ones keep the rest value.
    pub fn with_configuration(mut self, values: &[f32]) -> Self {
        let count = self.constraint_count().min(values.len());
        for (slot, &value) in self.configuration[..count].iter_mut().zip(values) {
            if value.is_finite() {
                *slot = value;
            } else {
                log::warn!("{}: ignoring non-finite configuration {}", self.kind, value);
            }
        }
        if self.kind == JointKind::Prismatic {
            self.configuration[0] = self.configuration[0].max(0.0);
        }
        self
    }

    pub fn kind(&self) -> JointKind {
        self.kind
    }

    pub fn inboard_body(&self) -> Option<&Arc<Body>> {
        self.inboard.as_ref()
    }

    pub fn outboard_body(&self) -> &Arc<Body> {
        &self.outboard
    }

    pub(crate) fn set_inboard_body(&mut self, body: Option<Arc<Body>>) {
        self.inboard = body;
    }

    pub fn constraint_count(&self) -> usize {
        self.kind.constraint_count()
    }

    pub fn configuration(&self) -> &[f32] {
        &self.configuration[..self.constraint_count()]
    }

    /// Adds `delta` to one configuration component.
    ///
    /// A prismatic extension that would become negative is left unchanged.
    pub fn change_constraint(&mut self, index: usize, delta: f32) {
        if index >= self.constraint_count() {
            log::warn!(
                "{} has {} constraints, ignoring change to index {}",
                self.kind,
                self.constraint_count(),
                index
            );
            return;
        }
        if !delta.is_finite() {
            log::warn!("{}: ignoring non-finite delta {}", self.kind, delta);
            return;
        }

        let next = self.configuration[index] + delta;
        if self.kind == JointKind::Prismatic && next < 0.0 {
            log::trace!("prismatic extension {} rejected", next);
            return;
        }
        self.configuration[index] = next;
    }

    /// The joint's own contribution to the chain, excluding its outboard body.
    pub fn local_transform(&self) -> Mat4 {
        self.kind.transform_for(&self.configuration)
    }

    pub fn rotation(&self) -> Mat3 {
        Frame::rotation_part(&self.local_transform())
    }

    /// Maps `point` through the joint's action alone.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.local_transform().transform_point3(point)
    }

    /// Forward-difference Jacobian of the outboard body's tip with respect to
    /// each configuration component, one component at a time.
    pub fn jacobian(&self) -> JointJacobian {
        let body = Frame::body_vector(self.outboard.length());
        let tip = self.transform_point(body);

        let mut columns = [Vec3::ZERO; MAX_CONSTRAINTS];
        let len = self.constraint_count();
        for (i, column) in columns.iter_mut().enumerate().take(len) {
            let mut probe = self.configuration;
            probe[i] += JACOBIAN_EPSILON;
            let moved = self.kind.transform_for(&probe).transform_point3(body);
            *column = (moved - tip) / JACOBIAN_EPSILON;
        }

        JointJacobian { columns, len }
    }
}

/// One entry of scene assembly input: a joint kind and the length of the body
/// it drives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointSpec {
    pub kind: JointKind,
    pub outboard_length: f32,
}

impl JointSpec {
    pub fn new(kind: JointKind, outboard_length: f32) -> Self {
        Self {
            kind,
            outboard_length,
        }
    }
}

impl FromStr for JointSpec {
    type Err = SceneError;

    /// Parses `TAG/LENGTH`, or a bare `LENGTH` for a ball joint.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (kind, length) = match s.split_once('/') {
            Some((tag, length)) => {
                let kind = tag.parse::<JointKind>().map_err(|_| SceneError::MalformedJointSpec {
                    spec: s.to_string(),
                })?;
                (kind, length)
            }
            None => (JointKind::Ball, s),
        };

        let length = length
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|l| l.is_finite() && *l >= 0.0)
            .ok_or_else(|| SceneError::InvalidBodyLength {
                spec: s.to_string(),
            })?;

        Ok(Self::new(kind, length))
    }
}
