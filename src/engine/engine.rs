use std::time::Instant;

use tracing::{info, warn};

use crate::architecture::simulator::{self, SimulationResult};
use crate::dataset::builder::DatasetBuilder;
use crate::education::hint::{hint_for, Hint};
use crate::engine::attempt::AttemptState;
use crate::engine::request::{HintRequest, SimulateRequest, TrainRequest};
use crate::error::{EngineError, Result};
use crate::level::catalog::LevelCatalog;
use crate::level::config::LevelConfig;
use crate::result::training::{build_training_result, TrainingResult};
use crate::train::train_config::TrainConfig;
use crate::train::trainer::Trainer;

// ---------------------------------------------------------------------------
// Free entry points
// ---------------------------------------------------------------------------

/// Runs one training attempt for `level`.
///
/// Builds the dataset, trains a fresh classifier and packages the outcome.
/// Missing the target accuracy is reported through `success: false`.
///
/// # Errors
/// `InsufficientData` when too few usable examples remain after filtering,
/// `Validation` when the level itself is unusable.
pub fn train(request: &TrainRequest, level: &LevelConfig) -> Result<TrainingResult> {
    let mut state = AttemptState::Idle.start()?;
    let t_start = Instant::now();

    let outcome = run_training(request, level);
    match &outcome {
        Ok(result) => {
            state = state.finish(result.success)?;
            info!(
                level = level.id,
                state = state.as_str(),
                accuracy = result.accuracy,
                epochs = result.epochs_run,
                used = result.examples_used,
                dropped = result.examples_dropped,
                elapsed_ms = t_start.elapsed().as_millis() as u64,
                "training attempt finished"
            );
        }
        Err(e) => {
            state = state.finish(false)?;
            warn!(level = level.id, state = state.as_str(), error = %e, "training attempt rejected");
        }
    }
    outcome
}

/// Scores a component chain for `level`. See [`simulator::simulate`].
pub fn simulate(request: &SimulateRequest, level: &LevelConfig) -> Result<SimulationResult> {
    let state = AttemptState::Idle.start()?;
    let result = simulator::simulate(&request.components, level)?;
    let state = state.finish(result.success)?;
    info!(
        level = level.id,
        state = state.as_str(),
        components = request.components.len(),
        score = result.score,
        "simulation finished"
    );
    Ok(result)
}

/// Picks the next hint for a player. See [`hint_for`].
pub fn hint(request: &HintRequest, level: &LevelConfig) -> Hint {
    let chosen = hint_for(request.components.as_deref(), level, request.attempt_count);
    info!(
        level = level.id,
        attempts = request.attempt_count,
        kind = ?chosen.kind,
        difficulty = chosen.difficulty,
        "hint given"
    );
    chosen
}

fn run_training(request: &TrainRequest, level: &LevelConfig) -> Result<TrainingResult> {
    level.validate()?;
    let built = DatasetBuilder::for_level(level)?.build(&request.examples)?;

    let mut trainer = Trainer::for_dataset(&built.dataset, TrainConfig::for_level(level), request.seed);
    let run = trainer.run(&built.dataset)?;

    Ok(build_training_result(trainer.network(), &built.dataset, &run, built.dropped.len()))
}

// ---------------------------------------------------------------------------
// Catalog-backed facade
// ---------------------------------------------------------------------------

/// Resolves `level_id`s against a catalog before calling [`train`] or
/// [`simulate`]. Holds nothing mutable, so one instance can serve any number
/// of threads.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    catalog: LevelCatalog,
}

impl Engine {
    pub fn new(catalog: LevelCatalog) -> Self {
        Engine { catalog }
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    /// # Errors
    /// `Validation` for an unknown level, plus everything [`train`] raises.
    pub fn train(&self, request: &TrainRequest) -> Result<TrainingResult> {
        let level = self.catalog.get(request.level_id).ok_or_else(|| {
            EngineError::validation(format!("unknown level {}", request.level_id))
        })?;
        train(request, level)
    }

    /// An unknown level is not an error here: the result carries
    /// `success: false`, score 0 and the problem in its message.
    pub fn simulate(&self, request: &SimulateRequest) -> Result<SimulationResult> {
        match self.catalog.get(request.level_id) {
            Some(level) => simulate(request, level),
            None => {
                warn!(level = request.level_id, "simulation requested for unknown level");
                Ok(SimulationResult::rejected(format!(
                    "Level {} does not exist. Available levels: {}",
                    request.level_id,
                    self.catalog
                        .ids()
                        .iter()
                        .map(|id| id.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )))
            }
        }
    }

    /// # Errors
    /// `Validation` for an unknown level.
    pub fn hint(&self, request: &HintRequest) -> Result<Hint> {
        let level = self.catalog.get(request.level_id).ok_or_else(|| {
            EngineError::validation(format!("unknown level {}", request.level_id))
        })?;
        Ok(hint(request, level))
    }
}
