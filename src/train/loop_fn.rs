use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::dataset::builder::Dataset;
use crate::error::{EngineError, Result};
use crate::loss::cross_entropy::CrossEntropyLoss;
use crate::math::matrix::Matrix;
use crate::network::network::{argmax, Network};
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::{TrainingCurvePoint, TrainingRun};
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` on `dataset` with mini-batch SGD on softmax cross-entropy.
///
/// One [`TrainingCurvePoint`] is recorded per epoch. The loop stops after the
/// first epoch whose training accuracy reaches `config.target_accuracy`, and
/// otherwise runs the full `config.epochs` budget. Falling short is not an
/// error; the caller reads the outcome from the returned [`TrainingRun`].
///
/// Sample order is shuffled every epoch from `rng`, so a seeded rng gives a
/// reproducible run.
///
/// # Errors
/// `Validation` if the dataset is empty, a feature vector does not match the
/// network input, a label is out of range, or the config is degenerate.
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut Network,
    dataset: &Dataset,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<TrainingRun> {
    check_inputs(network, dataset, config)?;

    let optimizer = Sgd::new(config.learning_rate);
    let t_start = Instant::now();
    let mut curve = Vec::new();

    for epoch in 1..=config.epochs {
        let loss = run_one_epoch(network, dataset, &optimizer, config.batch_size, rng);
        let accuracy = compute_accuracy(network, dataset);
        debug!(epoch, loss, accuracy, "epoch finished");

        curve.push(TrainingCurvePoint { epoch, loss, accuracy });

        if accuracy >= config.target_accuracy {
            break;
        }
    }

    Ok(TrainingRun {
        curve,
        epoch_budget: config.epochs,
        target_accuracy: config.target_accuracy,
        elapsed_ms: t_start.elapsed().as_millis() as u64,
    })
}

/// Fraction of `dataset` the network classifies correctly (argmax match).
pub fn compute_accuracy(network: &Network, dataset: &Dataset) -> f64 {
    if dataset.is_empty() {
        return 0.0;
    }
    let correct = dataset
        .features
        .iter()
        .zip(dataset.labels.iter())
        .filter(|&(input, &label)| argmax(&network.predict(input)) == label)
        .count();
    correct as f64 / dataset.len() as f64
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn check_inputs(network: &Network, dataset: &Dataset, config: &TrainConfig) -> Result<()> {
    if dataset.is_empty() {
        return Err(EngineError::validation("cannot train on an empty dataset"));
    }
    if dataset.features.len() != dataset.labels.len() {
        return Err(EngineError::validation(format!(
            "{} feature vectors but {} labels",
            dataset.features.len(),
            dataset.labels.len()
        )));
    }
    let expected = network.input_size();
    if let Some((i, f)) = dataset.features.iter().enumerate().find(|(_, f)| f.len() != expected) {
        return Err(EngineError::validation(format!(
            "feature vector {i} has length {}, network expects {expected}",
            f.len()
        )));
    }
    let classes = network.output_size();
    if let Some(&bad) = dataset.labels.iter().find(|&&l| l >= classes) {
        return Err(EngineError::validation(format!(
            "class index {bad} out of range for {classes} outputs"
        )));
    }
    if config.epochs == 0 || config.batch_size == 0 {
        return Err(EngineError::validation("epochs and batch_size must be at least 1"));
    }
    if !(config.learning_rate.is_finite() && config.learning_rate > 0.0) {
        return Err(EngineError::validation("learning_rate must be a positive number"));
    }
    Ok(())
}

/// Runs one full epoch of mini-batch SGD over the dataset.
/// Returns the mean loss over all samples.
fn run_one_epoch<R: Rng + ?Sized>(
    network: &mut Network,
    dataset: &Dataset,
    optimizer: &Sgd,
    batch_size: usize,
    rng: &mut R,
) -> f64 {
    let n = dataset.len();
    let mut total_loss = 0.0;

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);

    for batch in indices.chunks(batch_size) {
        let mut acc_grads: Vec<(Matrix, Matrix)> = network
            .layers
            .iter()
            .map(|layer| {
                (
                    Matrix::zeros(layer.weights.rows, layer.weights.cols),
                    Matrix::zeros(layer.biases.rows, layer.biases.cols),
                )
            })
            .collect();

        for &idx in batch {
            let input = &dataset.features[idx];
            let class = dataset.labels[idx];

            let output = network.forward(input);
            total_loss += CrossEntropyLoss::loss(&output, class);

            let mut delta = Matrix::row(CrossEntropyLoss::derivative(&output, class));

            // Backward pass.
            for i in (0..network.layers.len()).rev() {
                let input_for_layer = if i == 0 {
                    Matrix::row(input.clone())
                } else {
                    network.layers[i - 1].neurons.clone()
                };

                let (w_grad, b_grad) = network.layers[i].compute_gradients(&delta, &input_for_layer);

                if i > 0 {
                    delta = &b_grad * &network.layers[i].weights.transpose();
                }

                let (w_acc, b_acc) = std::mem::take(&mut acc_grads[i]);
                acc_grads[i] = (w_acc + w_grad, b_acc + b_grad);
            }
        }

        for (layer, (w_acc, b_acc)) in network.layers.iter_mut().zip(acc_grads) {
            optimizer.step_batch(layer, w_acc, b_acc, batch.len());
        }
    }

    total_loss / n as f64
}
