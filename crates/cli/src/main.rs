#![deny(unsafe_code)]
//! CLI driver for rrt-sketch.
//!
//! Subcommands:
//! - `run <grower>`: grow a tree and report it
//! - `replay <seed-file>`: regrow the tree a saved seed describes
//! - `list`: print available growers

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use rrt_sketch_core::{Grower, Seed};
use rrt_sketch_growers::{grow, GrowerKind, Snapshot};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "rrt-sketch", about = "Randomized tree line-art generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Grow a tree until it is exhausted and report the edge set.
    Run {
        /// Grower name ("rrt" or "rrt-star").
        grower: String,

        /// Region width in drawing units.
        #[arg(short = 'W', long, default_value_t = 21.0)]
        width: f64,

        /// Region height in drawing units.
        #[arg(short = 'H', long, default_value_t = 29.7)]
        height: f64,

        /// Frontier grid spacing; overrides `resolution` in --params.
        #[arg(short, long)]
        resolution: Option<f64>,

        /// Maximum number of ticks (0 runs until the grower is exhausted).
        #[arg(short, long, default_value_t = 0)]
        steps: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Grower parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Regrow the tree described by a seed JSON file.
    Replay {
        /// Path to a seed JSON file, e.g. the `seed` object printed by `run --json`.
        seed_file: PathBuf,
    },
    /// List available growers.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let growers = GrowerKind::list_growers();
            if cli.json {
                let info = serde_json::json!({ "growers": growers });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Growers:");
                for name in growers {
                    println!("  {name}");
                }
            }
        }
        Command::Run {
            grower,
            width,
            height,
            resolution,
            steps,
            seed,
            params,
        } => {
            let params = parse_params(&params, resolution)?;
            let mut plan = Seed::new(&grower, width, height, seed);
            plan.params = params;
            plan.steps = steps;
            grow_and_report(&plan, cli.json)?;
        }
        Command::Replay { seed_file } => {
            let text = std::fs::read_to_string(&seed_file)
                .map_err(|e| CliError::Io(format!("{}: {e}", seed_file.display())))?;
            let plan: Seed = serde_json::from_str(&text)
                .map_err(|e| CliError::Input(format!("invalid seed file: {e}")))?;
            grow_and_report(&plan, cli.json)?;
        }
    }

    Ok(())
}

/// Parses `--params` and folds in the dedicated flags.
fn parse_params(raw: &str, resolution: Option<f64>) -> Result<serde_json::Value, CliError> {
    let mut params: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    if let Some(resolution) = resolution {
        let obj = params
            .as_object_mut()
            .ok_or_else(|| CliError::Input("--params must be a JSON object".into()))?;
        obj.insert("resolution".into(), serde_json::json!(resolution));
    }
    Ok(params)
}

fn grow_and_report(plan: &Seed, json: bool) -> Result<(), CliError> {
    let mut grower = GrowerKind::from_seed(plan)?;
    let taken = grow(&mut grower, plan.steps)?;
    let snapshot = Snapshot::capture(&grower);

    if json {
        let out = serde_json::json!({
            "seed": plan,
            "steps_taken": taken,
            "snapshot": snapshot,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let builder = grower.builder();
        eprintln!(
            "grew {} ({}x{}, seed {}) in {taken} steps: {} edges, length {:.3}, {} rewires, {} cells unclaimed",
            plan.grower,
            plan.width,
            plan.height,
            plan.seed,
            snapshot.edge_count,
            snapshot.total_length,
            builder.rewire_count(),
            grower.frontier().len(),
        );
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
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
