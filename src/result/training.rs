use serde::{Deserialize, Serialize};

use crate::dataset::builder::Dataset;
use crate::network::network::{argmax, Network};
use crate::train::epoch_stats::{TrainingCurvePoint, TrainingRun};

/// How many dataset examples are echoed back as sample predictions.
pub const SAMPLE_PREDICTIONS: usize = 5;

/// One example run through the trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplePrediction {
    /// Position in the accepted dataset.
    pub index: usize,
    pub true_label: String,
    pub predicted_label: String,
    /// Softmax probability of the predicted class.
    pub confidence: f64,
    pub correct: bool,
}

/// The only thing a training request hands back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    pub success: bool,
    pub accuracy: f64,
    pub message: String,
    pub curve: Vec<TrainingCurvePoint>,
    pub sample_predictions: Vec<SamplePrediction>,
    pub epochs_run: usize,
    pub examples_used: usize,
    pub examples_dropped: usize,
    pub feedback: Vec<String>,
}

/// Packages a finished run. Pure: reads the model and dataset, writes nothing.
pub fn build_training_result(
    network: &Network,
    dataset: &Dataset,
    run: &TrainingRun,
    examples_dropped: usize,
) -> TrainingResult {
    let accuracy = run.final_accuracy();
    let success = run.reached_target();

    let message = if success {
        format!(
            "Your AI learned the shapes! Final accuracy: {:.1}% after {} epoch{}.",
            accuracy * 100.0,
            run.epochs_run(),
            if run.epochs_run() == 1 { "" } else { "s" }
        )
    } else {
        format!(
            "Your AI reached {:.1}% accuracy after {} epochs but needs {:.1}%. Try drawing more, clearer examples.",
            accuracy * 100.0,
            run.epochs_run(),
            run.target_accuracy * 100.0
        )
    };

    TrainingResult {
        success,
        accuracy,
        message,
        curve: run.curve.clone(),
        sample_predictions: sample_predictions(network, dataset),
        epochs_run: run.epochs_run(),
        examples_used: dataset.len(),
        examples_dropped,
        feedback: feedback(dataset, run, examples_dropped),
    }
}

/// Picks the first example of each class (in class order), then tops up with
/// the remaining examples in dataset order.
fn pick_samples(dataset: &Dataset) -> Vec<usize> {
    let mut picked: Vec<usize> = (0..dataset.class_count())
        .filter_map(|class| dataset.labels.iter().position(|&l| l == class))
        .take(SAMPLE_PREDICTIONS)
        .collect();
    for i in 0..dataset.len() {
        if picked.len() >= SAMPLE_PREDICTIONS {
            break;
        }
        if !picked.contains(&i) {
            picked.push(i);
        }
    }
    picked
}

fn sample_predictions(network: &Network, dataset: &Dataset) -> Vec<SamplePrediction> {
    pick_samples(dataset)
        .into_iter()
        .map(|index| {
            let probs = network.predict(&dataset.features[index]);
            let predicted = argmax(&probs);
            let actual = dataset.labels[index];
            SamplePrediction {
                index,
                true_label: dataset.label_name(actual).to_owned(),
                predicted_label: dataset.label_name(predicted).to_owned(),
                confidence: probs.get(predicted).copied().unwrap_or(0.0),
                correct: predicted == actual,
            }
        })
        .collect()
}

fn feedback(dataset: &Dataset, run: &TrainingRun, dropped: usize) -> Vec<String> {
    let mut notes = vec![format!(
        "Your AI learned from {} example{}.",
        dataset.len(),
        if dataset.len() == 1 { "" } else { "s" }
    )];

    let unseen: Vec<&str> = dataset
        .class_counts()
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count == 0)
        .map(|(class, _)| dataset.label_name(class))
        .collect();
    if !unseen.is_empty() {
        notes.push(format!(
            "It has never seen a {}, so it cannot recognise one yet.",
            unseen.join(" or ")
        ));
    }
    if dropped > 0 {
        notes.push(format!(
            "{dropped} drawing{} could not be used: check the label and draw a longer line.",
            if dropped == 1 { "" } else { "s" }
        ));
    }
    if run.stopped_early() {
        notes.push("Training stopped early because the target was reached.".to_owned());
    } else if !run.reached_target() {
        notes.push("More examples of every shape usually lead to better accuracy.".to_owned());
    }
    notes.push("During training the network nudged its weights a little after every batch.".to_owned());
    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::spec::ClassifierTopology;
    use rand::{rngs::StdRng, SeedableRng};

    fn dataset(labels: Vec<usize>) -> Dataset {
        let features = labels.iter().map(|&l| vec![l as f64; 4]).collect();
        Dataset::new(features, labels, vec!["circle".into(), "square".into(), "triangle".into()])
    }

    fn run(accuracy: f64, epochs: usize, budget: usize) -> TrainingRun {
        TrainingRun {
            curve: (1..=epochs)
                .map(|epoch| TrainingCurvePoint { epoch, loss: 1.0 / epoch as f64, accuracy })
                .collect(),
            epoch_budget: budget,
            target_accuracy: 0.8,
            elapsed_ms: 0,
        }
    }

    #[test]
    fn samples_cover_each_seen_class_first() {
        let ds = dataset(vec![0, 0, 0, 2, 0, 0, 1, 0]);
        assert_eq!(pick_samples(&ds), vec![0, 6, 3, 1, 2]);
    }

    #[test]
    fn small_datasets_report_every_example() {
        let ds = dataset(vec![1, 0, 1]);
        assert_eq!(pick_samples(&ds), vec![1, 0, 2]);
    }

    #[test]
    fn result_reflects_run_outcome() {
        let ds = dataset(vec![0, 0, 0, 0, 0]);
        let net = Network::classifier(&ClassifierTopology::new(4, 3), &mut StdRng::seed_from_u64(5));

        let ok = build_training_result(&net, &ds, &run(1.0, 3, 100), 0);
        assert!(ok.success);
        assert_eq!(ok.epochs_run, 3);
        assert_eq!(ok.examples_used, 5);
        assert_eq!(ok.sample_predictions.len(), 5);
        assert!(ok.sample_predictions.iter().all(|s| s.true_label == "circle"));
        assert!(ok.feedback.iter().any(|f| f.contains("square or triangle")));

        let short = build_training_result(&net, &ds, &run(0.4, 100, 100), 2);
        assert!(!short.success);
        assert!(short.message.contains("needs 80.0%"));
        assert_eq!(short.examples_dropped, 2);
    }
}
