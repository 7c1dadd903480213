use approx::assert_abs_diff_eq;
use glam::Vec3;
use ik_jacobian::{
    Arm, JacobianSolver, JointKind, Path, SceneBuilder, SimulationConfig, SolveStatus, SolverConfig,
    TargetPath,
};

#[test]
fn two_pin_arm_reaches_point_inside_reach() {
    let mut arm = Arm::builder()
        .joint_with_configuration(JointKind::Pin, 1.0, &[0.3])
        .joint_with_configuration(JointKind::Pin, 1.0, &[0.6])
        .build();
    let target = Vec3::new(1.4, 0.0, 0.0);

    let result = JacobianSolver::solve(&mut arm, target, &SolverConfig::default());

    assert_eq!(result.status, SolveStatus::Converged);
    assert!(result.iterations <= 100);
    assert!(arm.end_effector().distance(target) < 1e-2);
}

#[test]
fn two_pin_arm_converges_from_rest_pose() {
    let mut arm = Arm::builder()
        .joint(JointKind::Pin, 1.0)
        .joint(JointKind::Pin, 1.0)
        .build();
    let target = Vec3::new(1.4, 0.0, 0.0);

    let result = JacobianSolver::solve(&mut arm, target, &SolverConfig::default());

    // Straight start: both columns point along +y, so progress needs backoff.
    assert_eq!(result.status, SolveStatus::Converged, "{result:?}");
    assert!(result.iterations <= 100);
    assert!(result.strength < 1.0, "{result:?}");
    assert!(arm.end_effector().distance(target) < 1e-2);
}

#[test]
fn prismatic_arm_extends_past_body_lengths() {
    let mut arm = Arm::builder()
        .joint(JointKind::Prismatic, 0.5)
        .joint_with_configuration(JointKind::Pin, 0.5, &[0.3])
        .build();
    let target = Vec3::new(2.0, 0.2, 0.0);

    let result = JacobianSolver::solve(&mut arm, target, &SolverConfig::default());

    assert!(result.converged(), "{result:?}");
    assert!(arm.joints()[0].configuration()[0] > 0.5);
}

#[test]
fn clamped_target_lands_on_reach_sphere() {
    let mut arm = Arm::builder()
        .joint_with_configuration(JointKind::Pin, 1.0, &[0.3])
        .joint_with_configuration(JointKind::Pin, 1.0, &[0.6])
        .build();

    JacobianSolver::solve(&mut arm, Vec3::new(5.0, 0.0, 0.0), &SolverConfig::default());

    let tip = arm.end_effector();
    assert_abs_diff_eq!(tip.length(), 2.0, epsilon = 1e-2);
    assert_abs_diff_eq!(tip.y, 0.0, epsilon = 1e-2);
}

#[test]
fn ball_arm_tracks_ellipse() {
    let scene = SceneBuilder::new()
        .joint_tags(["ba/0.5", "ba/0.5", "ba/0.5"])
        .coefficients(0.1, 0.1)
        .ellipse(1.0, 0.8)
        .build();
    let mut sim = scene
        .into_simulation(SimulationConfig::default())
        .expect("non-empty arm");

    let stats = sim.run(240);

    assert_eq!(stats.ticks, 240);
    assert!(stats.converged >= 200, "{stats:?}");
    assert_eq!(stats.failed, 0);
    assert!(sim.current_end_effector().is_finite());
    assert!(sim
        .current_end_effector()
        .distance(sim.current_target_point())
        < 0.1);
}

#[test]
fn mixed_joint_arm_stays_finite() {
    let scene = SceneBuilder::new()
        .joint_tags(["pn/0.4", "dp/0.4", "ba/0.4", "pm/0.3"])
        .coefficients(0.1, 0.1)
        .ellipse(1.0, 0.8)
        .build();
    let mut sim = scene
        .into_simulation(SimulationConfig::default())
        .expect("non-empty arm");

    for _ in 0..120 {
        sim.tick();
        for i in 0..sim.joint_count() {
            let joint = sim.joint_snapshot(i).expect("in range");
            assert!(joint.configuration.iter().all(|v| v.is_finite()));
            if joint.kind == JointKind::Prismatic {
                assert!(joint.configuration[0] >= 0.0);
            }
        }
    }
    assert_eq!(sim.stats().ticks, 120);
}

#[test]
fn path_is_periodic_through_the_driver() {
    let path = Path::new(0.0, 0.0, 1.0, 1.0).expect("valid radii");
    let start = path.current_point();
    let arm = Arm::builder().joint(JointKind::Ball, 1.0).build();
    let mut sim = ik_jacobian::Simulation::new(arm, TargetPath::Curve(path), SimulationConfig::default());

    sim.run(240);

    assert_eq!(sim.path().degree(), 0.0);
    assert_eq!(sim.current_target_point(), start);
    assert_eq!(start.z, -0.5);
}
