//! Target generation
//!
//! Parametric curves that feed the IK solver one target per tick.

mod curve;

pub use curve::{Path, TargetPath, HEIGHT_OFFSET};
