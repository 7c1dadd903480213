//! Simulation driver
//!
//! Scene assembly and the fixed-step loop that feeds path targets to the solver.

mod driver;
mod scene;

pub use driver::{JointSnapshot, Simulation, SimulationConfig, SimulationStats};
pub use scene::{Scene, SceneBuilder, SIZE_HINT_SCALE};
