use clap::Parser;
use ik_jacobian::{SceneBuilder, SceneError, SimulationConfig, SolverConfig};

/// Headless arm simulation: builds a chain, then tracks a path for a fixed
/// number of ticks.
#[derive(Parser, Debug)]
#[command(name = "ik-sim", version)]
struct Args {
    /// Joint as TAG/LENGTH (tags: ba, pn, pm, dp) or a bare LENGTH for a ball
    /// joint. Repeat in chain order.
    #[arg(short, long = "joint", required = true)]
    joints: Vec<String>,

    /// Cubic height coefficients A B.
    #[arg(long, num_args = 2, value_names = ["A", "B"], allow_negative_numbers = true)]
    coefficients: Option<Vec<f32>>,

    /// Circular path radius.
    #[arg(long, conflicts_with = "ellipse")]
    circle: Option<f32>,

    /// Elliptical path radii RX RY.
    #[arg(long, num_args = 2, value_names = ["RX", "RY"])]
    ellipse: Option<Vec<f32>>,

    #[arg(long, default_value_t = 240)]
    ticks: u64,

    /// Path advance per tick, in degrees.
    #[arg(long, default_value_t = 1.5)]
    step_degrees: f32,

    #[arg(long, default_value_t = 100)]
    max_iterations: u32,
}

fn main() -> Result<(), SceneError> {
    env_logger::init();
    let args = Args::parse();

    let mut builder = SceneBuilder::new().joint_tags(&args.joints);
    if let Some(c) = args.coefficients.as_deref() {
        builder = builder.coefficients(c[0], c[1]);
    }
    if let Some(r) = args.circle {
        builder = builder.circle(r);
    }
    if let Some(r) = args.ellipse.as_deref() {
        builder = builder.ellipse(r[0], r[1]);
    }
    let scene = builder.build();

    log::info!("arm:\n{}", scene.arm);
    if let ik_jacobian::TargetPath::Curve(path) = &scene.path {
        log::info!("{}", path);
    }
    log::info!("scene size hint {:.3}", scene.size_hint);

    let config = SimulationConfig::default()
        .with_step_degrees(args.step_degrees)
        .with_solver(SolverConfig::default().with_iterations(args.max_iterations));
    let mut sim = scene.into_simulation(config)?;

    for _ in 0..args.ticks {
        let result = sim.tick();
        let tip = sim.current_end_effector();
        let target = sim.current_target_point();
        log::info!(
            "target ({:.3}, {:.3}, {:.3}) tip ({:.3}, {:.3}, {:.3}) {:?}",
            target.x,
            target.y,
            target.z,
            tip.x,
            tip.y,
            tip.z,
            result.status
        );
    }

    let stats = sim.stats();
    log::info!(
        "{} ticks: {} converged, {} stalled, {} hit the iteration cap, {} failed, {} iterations",
        stats.ticks,
        stats.converged,
        stats.stalled,
        stats.non_converged,
        stats.failed,
        stats.iterations
    );

    Ok(())
}
