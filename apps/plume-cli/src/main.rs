mod app;
mod demo;

use anyhow::Context;
use app::App;
use clap::{Parser, Subcommand};
use plume_render::EngineConfig;
use plume_tools::SceneInspector;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plume-cli", about = "Headless host for the plume engine")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and the default configuration
    Info,
    /// Run a scripted fly-through of the demo scene
    Run {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "120")]
        frames: u32,
        /// Engine config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Seconds per frame
        #[arg(long, default_value = "0.016")]
        dt: f32,
    },
    /// Render one frame and print the outliner and properties panels
    Inspect {
        /// Engine config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("plume-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("default config:");
            println!("{}", EngineConfig::default().to_json_pretty()?);
        }
        Commands::Run { frames, config, dt } => {
            let config = load_config(config.as_ref())?;
            let mut app = App::new(&config)?;
            println!("Scripted session: frames={frames}, dt={dt}");

            let report = app.run(frames, dt, demo::scripted_events);
            let camera = app.camera();
            let p = camera.position();
            println!(
                "Frames: {} draw_calls={} failed_draws={} quit={}",
                report.frames, report.draw_calls, report.failed_draws, report.quit_requested
            );
            println!(
                "Camera: pos=({:.2}, {:.2}, {:.2}) yaw={:.1} pitch={:.1} roll={:.1} fov={:.1}",
                p.x,
                p.y,
                p.z,
                camera.yaw(),
                camera.pitch(),
                camera.roll(),
                camera.fov()
            );
            println!("Last frame:");
            print!("{}", app.device());
        }
        Commands::Inspect { config } => {
            let config = load_config(config.as_ref())?;
            let mut app = App::new(&config)?;
            app.frame(Vec::new(), 0.0);

            println!("{}", SceneInspector::summary(app.scene()));
            println!("Meshes drawn: {}", app.inspector().meshes_drawn());

            let (scene, inspector) = app.scene_and_inspector();
            let rows = inspector.outliner(scene);
            println!("Outliner:");
            for row in &rows {
                println!("  {} {}", row.entity.id(), row.tag);
            }
            println!("Properties:");
            for row in rows {
                inspector.select(scene, row.entity)?;
                if let Some(properties) = inspector.properties(scene) {
                    print!("{properties}");
                }
            }
            inspector.clear_selection();
        }
    }

    Ok(())
}
