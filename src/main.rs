use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use tensor_forge::dataset::template_examples;
use tensor_forge::engine::{Engine, HintRequest, SimulateRequest, TrainRequest};
use tensor_forge::error::EngineError;
use tensor_forge::level::LevelCatalog;
use tensor_forge::logging;

#[derive(Parser)]
#[command(name = "tensor-forge", version, about = "Train stroke classifiers and score network sketches")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Train on the examples in a request file and print the result
    Train {
        #[arg(long, value_name = "PATH")]
        request: PathBuf,
        #[arg(long, value_name = "PATH")]
        levels: Option<PathBuf>,
        /// Overrides the seed in the request
        #[arg(long, value_name = "INT")]
        seed: Option<u64>,
    },
    /// Score a component chain from a request file
    Simulate {
        #[arg(long, value_name = "PATH")]
        request: PathBuf,
        #[arg(long, value_name = "PATH")]
        levels: Option<PathBuf>,
    },
    /// Suggest a next step for a chain from a request file
    Hint {
        #[arg(long, value_name = "PATH")]
        request: PathBuf,
        #[arg(long, value_name = "PATH")]
        levels: Option<PathBuf>,
        /// Overrides the attempt count in the request
        #[arg(long, value_name = "INT")]
        attempts: Option<u32>,
    },
    /// Print the level catalog
    Levels {
        #[arg(long, value_name = "PATH")]
        levels: Option<PathBuf>,
    },
    /// Train on generated template drawings
    Demo {
        #[arg(long, value_name = "ID", default_value_t = 1)]
        level: u32,
        #[arg(long, value_name = "INT", default_value_t = 8)]
        per_class: usize,
        #[arg(long, value_name = "INT", default_value_t = 7)]
        seed: u64,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("warning: {e}");
    }
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Train { request, levels, seed } => {
            let engine = Engine::new(load_catalog(levels.as_deref())?);
            let mut req: TrainRequest = read_json(&request)?;
            if seed.is_some() {
                req.seed = seed;
            }
            print_json(&engine.train(&req)?)
        }
        Command::Simulate { request, levels } => {
            let engine = Engine::new(load_catalog(levels.as_deref())?);
            let req: SimulateRequest = read_json(&request)?;
            print_json(&engine.simulate(&req)?)
        }
        Command::Hint { request, levels, attempts } => {
            let engine = Engine::new(load_catalog(levels.as_deref())?);
            let mut req: HintRequest = read_json(&request)?;
            if let Some(attempts) = attempts {
                req.attempt_count = attempts;
            }
            print_json(&engine.hint(&req)?)
        }
        Command::Levels { levels } => print_json(&load_catalog(levels.as_deref())?),
        Command::Demo { level, per_class, seed } => {
            let engine = Engine::default();
            let config = engine
                .catalog()
                .get(level)
                .ok_or_else(|| EngineError::validation(format!("unknown level {level}")))?;
            let mut rng = StdRng::seed_from_u64(seed);
            let examples = template_examples(&config.class_labels, per_class, &mut rng)?;
            info!(level, examples = examples.len(), "generated demo drawings");

            let result = engine.train(&TrainRequest::new(examples, level).with_seed(seed))?;
            for point in &result.curve {
                println!("epoch {:>4}  loss {:.4}  accuracy {:.3}", point.epoch, point.loss, point.accuracy);
            }
            println!("{}", result.message);
            for sample in &result.sample_predictions {
                println!(
                    "  #{:<3} {:>9} -> {:<9} ({:.0}%){}",
                    sample.index,
                    sample.true_label,
                    sample.predicted_label,
                    sample.confidence * 100.0,
                    if sample.correct { "" } else { "  x" }
                );
            }
            Ok(())
        }
    }
}

fn load_catalog(path: Option<&Path>) -> Result<LevelCatalog, EngineError> {
    match path {
        Some(path) => LevelCatalog::load_json(path),
        None => Ok(LevelCatalog::builtin()),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, EngineError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
