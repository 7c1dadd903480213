use crate::ik::{Arm, JacobianSolver, JointKind, SolveResult, SolveStatus, SolverConfig};
use crate::path::TargetPath;
use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Path advance per tick, in degrees.
    pub step_degrees: f32,
    pub solver: SolverConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            step_degrees: 1.5,
            solver: SolverConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn with_step_degrees(mut self, step_degrees: f32) -> Self {
        self.step_degrees = step_degrees;
        self
    }

    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}

/// Running counts of per-tick solve outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub ticks: u64,
    pub converged: u64,
    pub stalled: u64,
    pub non_converged: u64,
    pub failed: u64,
    pub iterations: u64,
}

impl SimulationStats {
    fn record(&mut self, result: &SolveResult) {
        self.ticks += 1;
        self.iterations += u64::from(result.iterations);
        match result.status {
            SolveStatus::Converged => self.converged += 1,
            SolveStatus::Stalled => self.stalled += 1,
            SolveStatus::IterationLimit => self.non_converged += 1,
            SolveStatus::Failed => self.failed += 1,
        }
    }
}

/// Read-only view of one joint for rendering and debugging.
#[derive(Debug, Clone, PartialEq)]
pub struct JointSnapshot {
    pub kind: JointKind,
    pub configuration: Vec<f32>,
    pub outboard_length: f32,
}

/// Owns an arm and its target path and advances them one tick at a time.
/// Time only moves when the caller asks it to.
#[derive(Debug, Clone)]
pub struct Simulation {
    arm: Arm,
    path: TargetPath,
    config: SimulationConfig,
    size_hint: f32,
    stats: SimulationStats,
}

impl Simulation {
    pub fn new(arm: Arm, path: TargetPath, config: SimulationConfig) -> Self {
        Self {
            arm,
            path,
            config,
            size_hint: 0.0,
            stats: SimulationStats::default(),
        }
    }

    pub fn with_size_hint(mut self, size_hint: f32) -> Self {
        self.size_hint = size_hint;
        self
    }

    /// Moves the target `delta_degrees` along the path and runs the solver
    /// until the tip converges, stalls or hits the iteration cap.
    pub fn advance(&mut self, delta_degrees: f32) -> SolveResult {
        let target = self.path.next_point(delta_degrees);
        let result = JacobianSolver::solve(&mut self.arm, target, &self.config.solver);
        self.stats.record(&result);

        log::debug!(
            "tick {} at {:.1} deg: {:?} after {} iterations, distance {:.4}",
            self.stats.ticks,
            self.path.degree(),
            result.status,
            result.iterations,
            result.final_distance()
        );

        result
    }

    /// Advances by the configured step.
    pub fn tick(&mut self) -> SolveResult {
        self.advance(self.config.step_degrees)
    }

    pub fn run(&mut self, ticks: u64) -> SimulationStats {
        for _ in 0..ticks {
            self.tick();
        }
        self.stats
    }

    pub fn current_end_effector(&self) -> Vec3 {
        self.arm.end_effector()
    }

    pub fn current_target_point(&self) -> Vec3 {
        self.path.current_point()
    }

    pub fn joint_count(&self) -> usize {
        self.arm.joint_count()
    }

    pub fn joint_snapshot(&self, index: usize) -> Option<JointSnapshot> {
        self.arm.joints().get(index).map(|joint| JointSnapshot {
            kind: joint.kind(),
            configuration: joint.configuration().to_vec(),
            outboard_length: joint.outboard_body().length(),
        })
    }

    pub fn arm(&self) -> &Arm {
        &self.arm
    }

    pub fn path(&self) -> &TargetPath {
        &self.path
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn size_hint(&self) -> f32 {
        self.size_hint
    }

    pub fn stats(&self) -> SimulationStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;

    fn pin_arm() -> Arm {
        Arm::builder()
            .joint_with_configuration(JointKind::Pin, 1.0, &[0.3])
            .joint_with_configuration(JointKind::Pin, 1.0, &[0.6])
            .build()
    }

    #[test]
    fn snapshot_reports_configuration() {
        let sim = Simulation::new(pin_arm(), TargetPath::Stationary, SimulationConfig::default());
        assert_eq!(sim.joint_count(), 2);
        assert_eq!(
            sim.joint_snapshot(1),
            Some(JointSnapshot {
                kind: JointKind::Pin,
                configuration: vec![0.6],
                outboard_length: 1.0,
            })
        );
        assert_eq!(sim.joint_snapshot(2), None);
    }

    #[test]
    fn advance_moves_the_target() {
        let path = Path::new(0.0, 0.0, 1.0, 1.0).expect("valid radii");
        let mut sim = Simulation::new(pin_arm(), path.into(), SimulationConfig::default());
        sim.advance(90.0);
        assert_eq!(sim.path().degree(), 90.0);
        assert!(sim
            .current_target_point()
            .abs_diff_eq(Vec3::new(0.0, 1.0, -0.5), 1e-5));
        assert_eq!(sim.stats().ticks, 1);
    }

    #[test]
    fn stats_count_every_tick() {
        let path = Path::new(0.0, 0.0, 1.0, 1.0).expect("valid radii");
        let config = SimulationConfig::default().with_step_degrees(3.0);
        let mut sim = Simulation::new(pin_arm(), path.into(), config);
        let stats = sim.run(10);
        assert_eq!(stats.ticks, 10);
        assert_eq!(
            stats.converged + stats.stalled + stats.non_converged + stats.failed,
            10
        );
        assert!(sim.current_end_effector().is_finite());
    }
}
