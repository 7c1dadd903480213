//! # ik-jacobian
//!
//! Numerical inverse kinematics for articulated arms whose tip follows a
//! moving target on a parametric curve.
//!
//! ## Features
//! - Ball, pin, prismatic and double-pin joints with finite-difference Jacobians
//! - Forward kinematics and full-arm Jacobian assembly
//! - SVD least-squares steps with damped backtracking
//! - Superellipse target paths and a deterministic tick driver
//!
//! ## Example
//! ```rust,ignore
//! use ik_jacobian::ik::{Arm, JacobianSolver, JointKind, SolverConfig};
//! use glam::Vec3;
//!
//! let mut arm = Arm::builder()
//!     .joint_with_configuration(JointKind::Pin, 1.0, &[0.3])
//!     .joint_with_configuration(JointKind::Pin, 1.0, &[0.6])
//!     .build();
//!
//! let target = Vec3::new(1.4, 0.0, 0.0);
//! let result = JacobianSolver::solve(&mut arm, target, &SolverConfig::default());
//! println!("Converged: {}, iterations: {}", result.converged(), result.iterations);
//! ```

pub mod error;
pub mod ik;
pub mod math;
pub mod path;
pub mod sim;

pub use error::{IkError, SceneError};
pub use ik::{
    Arm, ArmBuilder, Body, JacobianSolver, Joint, JointJacobian, JointKind, JointSpec, SolveResult,
    SolveStatus, SolverConfig,
};
pub use math::Frame;
pub use path::{Path, TargetPath};
pub use sim::{JointSnapshot, Scene, SceneBuilder, Simulation, SimulationConfig, SimulationStats};
