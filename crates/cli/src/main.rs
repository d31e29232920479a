#![deny(unsafe_code)]
//! CLI binary for the particle field.
//!
//! Subcommands:
//! - `run`: simulate a field under an orbiting cursor, write a PNG and
//!   optionally the saved particles
//! - `shuffle`: load saved particles, scatter them over a fresh field, write a PNG
//! - `schema`: print the physics parameter schema
//!
//! Logging goes to stderr and follows `RUST_LOG` (default `info`).

mod drive;
mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use particle_field_core::{Engine, Scene, Srgb};
use particle_field_render::snapshot::write_png;
use particle_field_render::Raster;
use particle_field_swarm::{ParticleField, ParticleSnapshot, PhysicsSettings};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "particle-field", about = "Cursor-driven particle field, rendered headless")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Canvas and simulation options shared by `run` and `shuffle`.
#[derive(Args)]
struct SceneArgs {
    /// Canvas width in pixels.
    #[arg(short = 'W', long, default_value_t = 512)]
    width: usize,

    /// Canvas height in pixels.
    #[arg(short = 'H', long, default_value_t = 512)]
    height: usize,

    /// Number of frames to simulate.
    #[arg(short, long, default_value_t = 600)]
    frames: usize,

    /// PRNG seed for spawning and shuffling.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Physics parameters as a JSON string.
    #[arg(long, default_value = "{}")]
    params: String,

    /// Scene JSON file; replaces the options above.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Background color of the output image.
    #[arg(long, default_value = "#000000")]
    background: String,

    /// Output PNG path.
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate the field under an orbiting cursor and write a PNG.
    Run {
        #[command(flatten)]
        scene: SceneArgs,

        /// Hold the pointer down with painting enabled for the first N frames.
        #[arg(long, default_value_t = 0)]
        paint: usize,

        /// Save the final particles as JSON to this path.
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Scatter saved particles over a fresh field and simulate it.
    Shuffle {
        /// Snapshot JSON written by `run --snapshot`.
        input: PathBuf,

        #[command(flatten)]
        scene: SceneArgs,
    },
    /// Print the physics parameter schema.
    Schema,
}

impl SceneArgs {
    fn scene(&self) -> Result<Scene, CliError> {
        if let Some(path) = &self.scene {
            let text = read_file(path)?;
            let scene: Scene = serde_json::from_str(&text)
                .map_err(|e| CliError::Input(format!("invalid scene {}: {e}", path.display())))?;
            return Ok(scene);
        }
        let params: serde_json::Value = serde_json::from_str(&self.params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        Ok(Scene {
            params,
            frames: self.frames,
            ..Scene::new(self.width, self.height, self.seed)
        })
    }

    fn raster(&self, scene: &Scene) -> Result<Raster, CliError> {
        let background =
            Srgb::from_hex(&self.background).map_err(|e| CliError::Input(e.to_string()))?;
        Ok(Raster::new(scene.width, scene.height, background)?)
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|e| CliError::Io(format!("{}: {e}", path.display())))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn report(json: bool, info: serde_json::Value, line: String) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        eprintln!("{line}");
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Schema => {
            let schema = PhysicsSettings::schema();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&schema)?);
            } else if let Some(entries) = schema.as_object() {
                for (name, entry) in entries {
                    let default = entry.get("default").cloned().unwrap_or_default();
                    println!("{name:<22} default {default}");
                }
            }
        }
        Command::Run {
            scene: args,
            paint,
            snapshot,
        } => {
            let scene = args.scene()?;
            let mut raster = args.raster(&scene)?;
            let mut field = ParticleField::from_scene(&scene)?;
            info!(
                width = scene.width,
                height = scene.height,
                particles = field.particles().len(),
                "starting run"
            );

            let summary = drive::simulate(&mut field, &mut raster, scene.frames, paint)?;
            write_png(&raster, &args.output)?;

            if let Some(path) = &snapshot {
                let saved = field.save();
                fs::write(path, serde_json::to_string_pretty(saved)?)
                    .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
            }

            report(
                cli.json,
                serde_json::json!({
                    "width": scene.width,
                    "height": scene.height,
                    "frames": summary.frames,
                    "seed": scene.seed,
                    "particles": field.particles().len(),
                    "painted": summary.painted,
                    "params": field.params(),
                    "output": args.output.display().to_string(),
                    "snapshot": snapshot.as_ref().map(|p| p.display().to_string()),
                }),
                format!(
                    "rendered {} particles ({}x{}, {} frames, seed {}) -> {}",
                    field.particles().len(),
                    scene.width,
                    scene.height,
                    summary.frames,
                    scene.seed,
                    args.output.display()
                ),
            )?;
        }
        Command::Shuffle { input, scene: args } => {
            let text = read_file(&input)?;
            let saved: ParticleSnapshot = serde_json::from_str(&text)
                .map_err(|e| CliError::Input(format!("invalid snapshot {}: {e}", input.display())))?;

            let scene = args.scene()?;
            let mut raster = args.raster(&scene)?;
            let mut field = ParticleField::from_scene(&scene)?;
            field.load_snapshot(saved);
            let count = field.shuffle()?;
            info!(count, "shuffled saved particles");

            let summary = drive::simulate(&mut field, &mut raster, scene.frames, 0)?;
            write_png(&raster, &args.output)?;

            report(
                cli.json,
                serde_json::json!({
                    "input": input.display().to_string(),
                    "width": scene.width,
                    "height": scene.height,
                    "frames": summary.frames,
                    "seed": scene.seed,
                    "particles": count,
                    "output": args.output.display().to_string(),
                }),
                format!(
                    "shuffled {count} particles ({} frames) -> {}",
                    summary.frames,
                    args.output.display()
                ),
            )?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
