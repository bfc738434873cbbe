use anyhow::Result;
use clap::Parser;
use log::info;

use crossroads_sim::{
    config::SimulationConfig,
    control::LightController,
    simulation::{SpawnScheduler, TickTimer, ViewSide, World},
};

#[derive(Parser)]
#[command(name = "crossroads-sim")]
#[command(about = "Headless side-by-side comparison of a Smart and a Basic traffic light controller")]
struct Args {
    /// Simulation configuration file
    #[arg(short, long, default_value = "sim.toml")]
    config: String,

    /// Random seed for reproducible runs (overrides the config)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Simulated seconds to run
    #[arg(short, long, default_value_t = 300.0)]
    duration: f32,

    /// Fixed simulation ticks per simulated second
    #[arg(short, long, default_value_t = 60.0)]
    tick_rate: f32,

    /// Game speed multiplier (0.0 to 5.0)
    #[arg(long, default_value_t = 1.0)]
    speed: f32,

    /// Enable verbose logging for detailed simulation progress
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .init();
    info!("Starting crossroads simulation (headless)");

    let mut config = SimulationConfig::load_from_file(&args.config)?;
    if args.seed.is_some() {
        config.world.seed = args.seed;
    }
    if args.tick_rate <= 0.0 {
        anyhow::bail!("Tick rate must be positive, got {}", args.tick_rate);
    }

    info!(
        "Loaded configuration: {}x{} window, Smart offset {:.0}, Basic value {:.0}, seed {:?}",
        config.world.width,
        config.world.height,
        config.controllers.smart.base_offset,
        config.controllers.basic.value,
        config.world.seed
    );

    let mut world = World::new(config);
    world.set_time_speed(args.speed);
    let mut spawner = SpawnScheduler::new();
    let mut timer = TickTimer::new(600);

    let dt = 1.0 / args.tick_rate;
    let total_ticks = (args.duration * args.tick_rate).ceil() as u64;
    let ticks_per_report = args.tick_rate.round().max(1.0) as u64;

    info!("Running {} ticks ({:.0} simulated seconds)...", total_ticks, args.duration);

    for tick in 1..=total_ticks {
        timer.start_tick();
        spawner.update(&mut world, dt);
        world.tick(dt);
        timer.end_tick();

        if tick % ticks_per_report == 0 {
            report(&world, &timer);
        }
    }

    info!("SIMULATION COMPLETE");
    info!("Simulated time: {}s over {} ticks", world.elapsed_secs(), timer.total_ticks());
    info!("Spawn rolls: {} attempted, {} succeeded", spawner.attempts(), spawner.spawned());
    for side in ViewSide::ALL {
        let intersection = world.intersection(side);
        info!(
            "{} ({:?} view): {} cars left, {} leaves/min, {} still on the map",
            world.controller(side).get_name(),
            side,
            intersection.car_leaves(),
            world.leave_rate_label(side),
            intersection.car_count()
        );
    }

    Ok(())
}

fn report(world: &World, timer: &TickTimer) {
    let left = world.intersection(ViewSide::Left);
    let right = world.intersection(ViewSide::Right);
    info!(
        "t={}s speed {} | Smart [{}] cars {} left {} | Basic [{}] cars {} left {} | tick {:.3}ms (max {:.3}ms)",
        world.elapsed_secs(),
        world.speed_label(),
        world.controller_value(ViewSide::Left),
        left.car_count(),
        left.car_leaves(),
        world.controller_value(ViewSide::Right),
        right.car_count(),
        right.car_leaves(),
        timer.average_tick_time().as_secs_f64() * 1000.0,
        timer.max_tick_time().as_secs_f64() * 1000.0
    );
}
