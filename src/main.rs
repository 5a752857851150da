mod simulation;

#[cfg(feature = "ui")]
mod ui;

use anyhow::ensure;
use clap::Parser;

#[derive(Parser)]
#[command(name = "signal_sim")]
#[command(about = "Traffic signal simulation with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "1000")]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value = "0.05")]
    delta: f32,

    /// Seed for the spawn RNG (omit for a nondeterministic run)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui();
        }
        #[cfg(not(feature = "ui"))]
        {
            eprintln!("Error: UI feature is not enabled. Rebuild with --features ui");
            std::process::exit(1);
        }
        Ok(())
    } else {
        run_headless(cli.ticks, cli.delta, cli.seed)
    }
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(ticks: u32, delta: f32, seed: Option<u64>) -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    ensure!(
        delta.is_finite() && delta > 0.0,
        "--delta must be a positive number of seconds, got {delta}"
    );

    println!("Running traffic signal simulation in headless mode...");
    println!("Ticks: {}, Delta: {}s", ticks, delta);

    // Calculate how many ticks equal 1 second of simulation time
    let ticks_per_second = (1.0 / delta).ceil() as u32;
    println!("Running {} ticks per second (simulated time)", ticks_per_second);
    println!();

    let mut world = match seed {
        Some(seed) => simulation::SimWorld::new_with_seed(seed),
        None => simulation::SimWorld::new(),
    };

    println!("Initial state:");
    world.print_summary();
    world.draw_map();
    println!();

    // Run simulation
    let mut tick = 0;
    while tick < ticks {
        // Run ticks_per_second ticks (or remaining ticks if fewer)
        let ticks_to_run = ticks_per_second.min(ticks - tick);

        for _ in 0..ticks_to_run {
            tick += 1;
            world.advance(delta);
        }

        // Print summary after running 1 second worth of ticks
        println!(
            "--- After tick {} ({:.1}s simulated time) ---",
            tick,
            tick as f32 * delta
        );
        world.print_summary();
        world.draw_map();
        println!();

        if tick < ticks {
            std::thread::sleep(std::time::Duration::from_millis(200));
        }
    }

    println!("=== Final State ===");
    world.print_summary();
    world.draw_map();
    println!("Simulation complete.");

    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui() {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    println!("Starting Signal Sim UI...");
    println!();
    println!("Controls:");
    println!("  Space  - Pause/resume the simulation");
    println!("  ESC    - Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,signal_sim=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Signal Sim - Traffic Light Simulation".into(),
                        resolution: (900, 900).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(ui::SignalSimUIPlugin)
        .run();
}
