//! Math utilities module
//!
//! Provides convenient re-exports from glam and the frame helpers used by the
//! kinematics code.

mod transform;

pub use transform::{clamp_to_reach, Frame};

// Re-export commonly used glam types
pub use glam::{Mat3, Mat4, Vec3};
