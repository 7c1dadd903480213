use super::arm::Arm;
use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Squared distance below which the tip counts as on target.
    pub tolerance: f32,
    /// Smallest change in squared error that still counts as progress.
    pub min_improvement: f32,
    pub max_iterations: u32,
    pub initial_strength: f32,
    /// Strength multiplier applied after a step that made things worse.
    pub backoff: f32,
    /// Seeds the progress test so the first step always runs.
    pub initial_previous_error: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            min_improvement: 1e-6,
            max_iterations: 100,
            initial_strength: 1.0,
            backoff: 0.5,
            initial_previous_error: 1000.0,
        }
    }
}

impl SolverConfig {
    pub fn new(tolerance: f32) -> Self {
        Self {
            tolerance,
            ..Default::default()
        }
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = iterations;
        self
    }

    pub fn with_min_improvement(mut self, min_improvement: f32) -> Self {
        self.min_improvement = min_improvement;
        self
    }

    pub fn with_strength(mut self, strength: f32) -> Self {
        self.initial_strength = strength;
        self
    }

    pub fn with_backoff(mut self, backoff: f32) -> Self {
        self.backoff = backoff;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Squared error fell below the tolerance.
    Converged,
    /// Error stopped changing before reaching the tolerance.
    Stalled,
    /// The iteration cap was hit while still making progress.
    IterationLimit,
    /// The linear solve failed; the arm keeps its last configuration.
    Failed,
}

#[derive(Debug, Clone, Copy)]
pub struct SolveResult {
    pub status: SolveStatus,
    pub iterations: u32,
    /// Squared distance between tip and target after the last step.
    pub final_error: f32,
    /// Step strength in effect when the loop stopped.
    pub strength: f32,
}

impl SolveResult {
    pub fn converged(&self) -> bool {
        self.status == SolveStatus::Converged
    }

    pub fn final_distance(&self) -> f32 {
        self.final_error.sqrt()
    }
}

/// Damped Gauss-Newton loop over [`Arm::approach_point`].
pub struct JacobianSolver;

impl JacobianSolver {
    pub fn solve(arm: &mut Arm, target: Vec3, config: &SolverConfig) -> SolveResult {
        let mut previous = config.initial_previous_error;
        let mut current = arm.end_effector().distance_squared(target);
        let mut strength = config.initial_strength;
        let mut iterations = 0;

        while current > config.tolerance && (previous - current).abs() > config.min_improvement {
            if iterations >= config.max_iterations {
                log::warn!(
                    "no convergence after {} iterations, error {:.3e}",
                    iterations,
                    current
                );
                return SolveResult {
                    status: SolveStatus::IterationLimit,
                    iterations,
                    final_error: current,
                    strength,
                };
            }

            previous = current;
            if let Err(e) = arm.approach_point(target, strength) {
                log::error!("{}", e);
                return SolveResult {
                    status: SolveStatus::Failed,
                    iterations,
                    final_error: current,
                    strength,
                };
            }
            current = arm.end_effector().distance_squared(target);
            iterations += 1;

            if current > previous {
                strength *= config.backoff;
            }
            log::trace!(
                "iteration {}: error {:.3e}, strength {}",
                iterations,
                current,
                strength
            );
        }

        let status = if current <= config.tolerance {
            SolveStatus::Converged
        } else {
            SolveStatus::Stalled
        };

        SolveResult {
            status,
            iterations,
            final_error: current,
            strength,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ik::JointKind;
    use approx::assert_abs_diff_eq;

    fn two_pins() -> Arm {
        Arm::builder()
            .joint_with_configuration(JointKind::Pin, 1.0, &[0.3])
            .joint_with_configuration(JointKind::Pin, 1.0, &[0.6])
            .build()
    }

    #[test]
    fn already_on_target_does_nothing() {
        let mut arm = two_pins();
        let tip = arm.end_effector();
        let result = JacobianSolver::solve(&mut arm, tip, &SolverConfig::default());
        assert!(result.converged());
        assert_eq!(result.iterations, 0);
        assert_eq!(arm.joints()[0].configuration(), &[0.3]);
    }

    #[test]
    fn converges_on_reachable_target() {
        let mut arm = two_pins();
        let target = Vec3::new(1.4, 0.0, 0.0);
        let result = JacobianSolver::solve(&mut arm, target, &SolverConfig::default());
        assert!(result.converged(), "{result:?}");
        assert!(result.final_error < 1e-4);
        assert!(arm.end_effector().distance(target) < 1e-2);
    }

    #[test]
    fn iteration_cap_is_recoverable() {
        let mut arm = two_pins();
        let config = SolverConfig::default().with_iterations(1);
        let result = JacobianSolver::solve(&mut arm, Vec3::new(1.4, 0.0, 0.0), &config);
        assert_eq!(result.status, SolveStatus::IterationLimit);
        assert_eq!(result.iterations, 1);
        assert!(arm.end_effector().is_finite());
    }

    #[test]
    fn unreachable_target_stalls_on_reach_sphere() {
        let mut arm = two_pins();
        let result = JacobianSolver::solve(&mut arm, Vec3::new(5.0, 0.0, 0.0), &SolverConfig::default());
        assert_eq!(result.status, SolveStatus::Stalled);
        assert_abs_diff_eq!(arm.end_effector().x, 2.0, epsilon = 1e-2);
        assert_abs_diff_eq!(arm.end_effector().y, 0.0, epsilon = 1e-2);
    }

    #[test]
    fn overshoot_halves_strength() {
        // One unit pin at angle 0 aiming at +y: a step of strength 4 swings
        // past the target to roughly 4 rad and the error grows.
        let mut arm = Arm::builder().joint(JointKind::Pin, 1.0).build();
        let config = SolverConfig::default().with_strength(4.0);
        let result = JacobianSolver::solve(&mut arm, Vec3::Y, &config);
        assert!(result.strength <= 2.0, "{result:?}");
        assert!(arm.end_effector().is_finite());
    }

    #[test]
    fn empty_arm_stalls_immediately() {
        let mut arm = Arm::new();
        let result = JacobianSolver::solve(&mut arm, Vec3::X, &SolverConfig::default());
        assert_eq!(result.status, SolveStatus::Stalled);
        assert_eq!(result.iterations, 1);
    }
}
