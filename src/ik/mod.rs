//! Inverse Kinematics module
//!
//! This module contains the joint and arm types, the per-step least-squares
//! update and the damped convergence loop built on it.

pub mod arm;
pub mod body;
pub mod joint;
pub mod solver;

pub use arm::{Arm, ArmBuilder};
pub use body::Body;
pub use joint::{Joint, JointJacobian, JointKind, JointSpec, JACOBIAN_EPSILON};
pub use solver::{JacobianSolver, SolveResult, SolveStatus, SolverConfig};
