use super::body::Body;
use super::joint::{Joint, JointKind, JointSpec};
use crate::error::IkError;
use crate::math::{clamp_to_reach, Frame, Mat3, Mat4, Vec3};
use nalgebra::{DMatrix, DVector};
use std::fmt;
use std::sync::Arc;

/// A serial chain of joints rooted at the origin. Joint `i + 1` hangs off the
/// outboard body of joint `i`.
#[derive(Debug, Clone, Default)]
pub struct Arm {
    joints: Vec<Joint>,
}

impl Arm {
    pub fn new() -> Self {
        Self { joints: Vec::new() }
    }

    pub fn builder() -> ArmBuilder {
        ArmBuilder::new()
    }

    /// Appends a joint of `kind` driving a new body of `length`.
    pub fn append(&mut self, kind: JointKind, length: f32) -> &mut Joint {
        let joint = Joint::new(kind, None, Arc::new(Body::new(length)));
        self.push_joint(joint)
    }

    /// Appends `joint`, rewiring its inboard body to the current last joint's
    /// outboard body.
    pub fn push_joint(&mut self, mut joint: Joint) -> &mut Joint {
        let inboard = self.last_joint().map(|last| Arc::clone(last.outboard_body()));
        joint.set_inboard_body(inboard);
        self.joints.push(joint);
        let last = self.joints.len() - 1;
        &mut self.joints[last]
    }

    pub fn last_joint(&self) -> Option<&Joint> {
        self.joints.last()
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn joints_mut(&mut self) -> &mut [Joint] {
        &mut self.joints
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Total number of Jacobian columns.
    pub fn constraint_count(&self) -> usize {
        self.joints.iter().map(Joint::constraint_count).sum()
    }

    pub fn total_reach(&self) -> f32 {
        self.joints.iter().map(|j| j.outboard_body().length()).sum()
    }

    pub fn has_prismatic(&self) -> bool {
        self.joints.iter().any(|j| j.kind() == JointKind::Prismatic)
    }

    /// Tip of the last body in world coordinates. Recomputed on every call.
    pub fn end_effector(&self) -> Vec3 {
        let transform = self.joints.iter().fold(Mat4::IDENTITY, |acc, joint| {
            acc * joint.local_transform() * Frame::body_translation(joint.outboard_body().length())
        });
        Frame::origin(&transform)
    }

    /// The point the arm will actually aim for. Without a prismatic joint,
    /// targets beyond total reach are pulled back onto the reach sphere.
    pub fn reachable_target(&self, target: Vec3) -> Vec3 {
        if self.has_prismatic() {
            target
        } else {
            clamp_to_reach(target, self.total_reach())
        }
    }

    /// 3 x N Jacobian, column blocks in chain order.
    ///
    /// Each joint's block is rotated by the joints strictly inboard of it. The
    /// lever arm of outboard bodies on inboard columns is not included, so
    /// this is an approximation of the true differential kinematics.
    pub fn jacobian(&self) -> DMatrix<f32> {
        let mut full = DMatrix::zeros(3, self.constraint_count());
        let mut rotation = Mat3::IDENTITY;
        let mut index = 0;

        for joint in &self.joints {
            for column in joint.jacobian().rotated(rotation).columns() {
                Frame::write_column(&mut full, index, *column);
                index += 1;
            }
            rotation *= joint.rotation();
        }

        full
    }

    /// One linearized step toward `target`: solves `J * dq = error` in the
    /// least-squares sense and applies `dq * strength` to the joints.
    pub fn approach_point(&mut self, target: Vec3, strength: f32) -> Result<(), IkError> {
        if self.constraint_count() == 0 {
            return Ok(());
        }

        let goal = self.reachable_target(target);
        let error = goal - self.end_effector();
        let delta = Self::least_squares(self.jacobian(), error)?;

        let mut index = 0;
        for joint in &mut self.joints {
            for constraint in 0..joint.constraint_count() {
                joint.change_constraint(constraint, delta[index] * strength);
                index += 1;
            }
        }

        Ok(())
    }

    /// Minimum-norm solution of `jacobian * x = error`. Singular values below
    /// the usual rank threshold are treated as zero.
    fn least_squares(jacobian: DMatrix<f32>, error: Vec3) -> Result<DVector<f32>, IkError> {
        let (rows, cols) = jacobian.shape();
        let svd = jacobian.svd(true, true);
        let threshold = svd.singular_values.amax() * f32::EPSILON * rows.max(cols) as f32;
        let rhs = DVector::from_column_slice(&error.to_array());
        svd.solve(&rhs, threshold).map_err(IkError::Decomposition)
    }
}

impl fmt::Display for Arm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, joint) in self.joints.iter().enumerate() {
            write!(f, "Joint {}: {}, ", i, joint.kind())?;
            match joint.inboard_body() {
                Some(body) => write!(f, "inboard length {}, ", body.length())?,
                None => write!(f, "fixed base, ")?,
            }
            writeln!(f, "outboard length {}", joint.outboard_body().length())?;
        }
        Ok(())
    }
}

pub struct ArmBuilder {
    arm: Arm,
}

impl ArmBuilder {
    pub fn new() -> Self {
        Self { arm: Arm::new() }
    }

    pub fn joint(mut self, kind: JointKind, length: f32) -> Self {
        self.arm.append(kind, length);
        self
    }

    pub fn joint_with_configuration(mut self, kind: JointKind, length: f32, values: &[f32]) -> Self {
        let joint = Joint::new(kind, None, Arc::new(Body::new(length))).with_configuration(values);
        self.arm.push_joint(joint);
        self
    }

    pub fn spec(self, spec: JointSpec) -> Self {
        self.joint(spec.kind, spec.outboard_length)
    }

    pub fn build(self) -> Arm {
        self.arm
    }
}

impl Default for ArmBuilder {
    fn default() -> Self {
        Self::new()
    }
}
