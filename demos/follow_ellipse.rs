use ik_jacobian::sim::{SceneBuilder, SimulationConfig};
use ik_jacobian::SolveStatus;

fn main() {
    env_logger::init();

    let scene = SceneBuilder::new()
        .joint_tags(["ba/0.5", "ba/0.5", "ba/0.5"])
        .coefficients(0.1, 0.1)
        .ellipse(1.0, 0.8)
        .build();

    let mut sim = match scene.into_simulation(SimulationConfig::default()) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("{}", e);
            return;
        }
    };

    for tick in 0..240 {
        let result = sim.tick();
        if tick % 24 == 0 || result.status != SolveStatus::Converged {
            let tip = sim.current_end_effector();
            println!(
                "tick {:3} tip ({:+.3}, {:+.3}, {:+.3}) {:?} in {} iterations",
                tick, tip.x, tip.y, tip.z, result.status, result.iterations
            );
        }
    }

    for i in 0..sim.joint_count() {
        if let Some(joint) = sim.joint_snapshot(i) {
            println!("{}: {:?}", joint.kind, joint.configuration);
        }
    }

    let stats = sim.stats();
    println!(
        "{} of {} ticks converged ({} iterations)",
        stats.converged, stats.ticks, stats.iterations
    );
}
