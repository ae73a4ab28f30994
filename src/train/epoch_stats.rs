use serde::{Deserialize, Serialize};

/// One point of the learning curve, appended at the end of every epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingCurvePoint {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Mean cross-entropy over the samples seen this epoch.
    pub loss: f64,
    /// Fraction of the training set classified correctly after the epoch.
    pub accuracy: f64,
}

/// What a finished `train_loop` reports back.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRun {
    pub curve: Vec<TrainingCurvePoint>,
    pub epoch_budget: usize,
    pub target_accuracy: f64,
    pub elapsed_ms: u64,
}

impl TrainingRun {
    pub fn final_point(&self) -> Option<&TrainingCurvePoint> {
        self.curve.last()
    }

    pub fn final_accuracy(&self) -> f64 {
        self.final_point().map(|p| p.accuracy).unwrap_or(0.0)
    }

    pub fn epochs_run(&self) -> usize {
        self.curve.len()
    }

    /// Success is judged on the last recorded epoch only.
    pub fn reached_target(&self) -> bool {
        self.final_point().is_some_and(|p| p.accuracy >= self.target_accuracy)
    }

    pub fn stopped_early(&self) -> bool {
        self.reached_target() && self.epochs_run() < self.epoch_budget
    }
}
