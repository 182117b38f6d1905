mod simulation;

#[cfg(feature = "ui")]
mod ui;

use anyhow::{bail, Result};
use clap::Parser;

use simulation::{SimParams, SimWorld};

#[derive(Parser)]
#[command(name = "signal_sim")]
#[command(about = "Signal-controlled traffic simulation with optional UI")]
struct Cli {
    /// Run with the Bevy UI
    #[arg(long)]
    ui: bool,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "600")]
    ticks: u32,

    /// Elapsed time per tick in milliseconds
    #[arg(long, default_value = "100")]
    delta_ms: f64,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Number of horizontal lanes
    #[arg(long, default_value = "4")]
    rows: usize,

    /// Number of vertical lanes
    #[arg(long, default_value = "4")]
    cols: usize,

    /// Scene width
    #[arg(long, default_value = "800")]
    width: f32,

    /// Scene height
    #[arg(long, default_value = "600")]
    height: f32,

    /// Base interval between vehicle spawns per lane, in milliseconds
    #[arg(long, default_value = "2000")]
    spawn_interval_ms: f64,

    /// Vehicle acceleration in scene units per second squared
    #[arg(long, default_value = "50")]
    acceleration: f32,

    /// Vehicle speed cap in scene units per second
    #[arg(long, default_value = "100")]
    max_speed: f32,

    /// Pause between printed frames so the run can be watched live
    #[arg(long)]
    watch: bool,
}

fn main() -> Result<()> {
    env_logger::init();
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
    } else {
        run_headless(&cli)?;
    }

    Ok(())
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli) -> Result<()> {
    if cli.delta_ms <= 0.0 {
        bail!("tick delta must be positive, got {}ms", cli.delta_ms);
    }
    let params = SimParams::new(cli.spawn_interval_ms, cli.acceleration, cli.max_speed)?;
    let mut world = match cli.seed {
        Some(seed) => SimWorld::grid_with_seed(cli.rows, cli.cols, cli.width, cli.height, seed)?,
        None => SimWorld::grid(cli.rows, cli.cols, cli.width, cli.height)?,
    };

    println!("Running signal simulation in headless mode...");
    println!("Ticks: {}, Delta: {}ms", cli.ticks, cli.delta_ms);
    let ticks_per_second = (1000.0 / cli.delta_ms).ceil().max(1.0) as u32;
    println!(
        "Running {} ticks per second (simulated time)",
        ticks_per_second
    );
    println!();

    println!("Initial state:");
    world.print_summary();
    world.draw_map();
    println!();

    let mut tick = 0;
    while tick < cli.ticks {
        // Run one second worth of ticks (or the remaining ticks if fewer)
        let ticks_to_run = ticks_per_second.min(cli.ticks - tick);

        for _ in 0..ticks_to_run {
            tick += 1;
            world.step(cli.delta_ms, &params)?;
        }

        println!(
            "--- After tick {} ({:.1}s simulated time) ---",
            tick,
            f64::from(tick) * cli.delta_ms / 1000.0
        );
        world.print_summary();
        world.draw_map();
        println!();

        if cli.watch && tick < cli.ticks {
            std::thread::sleep(std::time::Duration::from_millis(500));
        }
    }

    println!("=== Final State ===");
    world.print_summary();
    world.draw_map();

    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui() {
    use bevy::prelude::*;

    println!("Starting Signal Sim UI...");
    println!();
    println!("Close the window or press ESC to exit.");
    println!();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Signal Sim".into(),
                resolution: (1280, 720).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(ui::SignalSimUiPlugin)
        .run();
}
