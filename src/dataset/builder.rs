use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EngineError, Result};
use crate::features::extractor::{FeatureExtractor, FeatureVector};
use crate::features::stroke::Stroke;
use crate::level::config::{match_label, LevelConfig};

/// A stroke with the label the player gave it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledExample {
    pub stroke: Stroke,
    pub label: String,
}

impl LabeledExample {
    pub fn new(stroke: impl Into<Stroke>, label: impl Into<String>) -> Self {
        LabeledExample { stroke: stroke.into(), label: label.into() }
    }
}

/// Feature vectors with their class indices. Lives for one request only.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub features: Vec<FeatureVector>,
    pub labels: Vec<usize>,
    pub class_labels: Vec<String>,
}

impl Dataset {
    pub fn new(features: Vec<FeatureVector>, labels: Vec<usize>, class_labels: Vec<String>) -> Self {
        Dataset { features, labels, class_labels }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn class_count(&self) -> usize {
        self.class_labels.len()
    }

    pub fn feature_length(&self) -> Option<usize> {
        self.features.first().map(Vec::len)
    }

    pub fn label_name(&self, class: usize) -> &str {
        self.class_labels.get(class).map(String::as_str).unwrap_or("?")
    }

    /// Number of examples per class, indexed by class.
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.class_count()];
        for &label in &self.labels {
            if let Some(c) = counts.get_mut(label) {
                *c += 1;
            }
        }
        counts
    }
}

/// Why an example was left out of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    UnknownLabel,
    TooFewPoints,
}

/// Result of filtering and encoding a batch of examples.
#[derive(Debug, Clone)]
pub struct BuiltDataset {
    pub dataset: Dataset,
    pub accepted: usize,
    /// `(index in the request, reason)` for every example that was skipped.
    pub dropped: Vec<(usize, DropReason)>,
}

/// Turns labeled strokes into a [`Dataset`] for one level.
pub struct DatasetBuilder<'a> {
    extractor: FeatureExtractor,
    class_labels: &'a [String],
    min_stroke_points: usize,
    min_examples: usize,
}

impl<'a> DatasetBuilder<'a> {
    pub fn new(
        extractor: FeatureExtractor,
        class_labels: &'a [String],
        min_stroke_points: usize,
        min_examples: usize,
    ) -> Self {
        DatasetBuilder { extractor, class_labels, min_stroke_points, min_examples }
    }

    pub fn for_level(level: &'a LevelConfig) -> Result<Self> {
        Ok(DatasetBuilder::new(
            level.extractor()?,
            &level.class_labels,
            level.min_stroke_points,
            level.min_examples,
        ))
    }

    /// Encodes every usable example; drops (never fails on) unknown labels and
    /// short or non-finite strokes.
    ///
    /// Fails with `InsufficientData` when fewer than the minimum remain.
    pub fn build(&self, examples: &[LabeledExample]) -> Result<BuiltDataset> {
        let mut features = Vec::with_capacity(examples.len());
        let mut labels = Vec::with_capacity(examples.len());
        let mut dropped = Vec::new();

        for (i, example) in examples.iter().enumerate() {
            let Some(class) = match_label(self.class_labels, &example.label) else {
                debug!(index = i, label = %example.label, "dropping example with unknown label");
                dropped.push((i, DropReason::UnknownLabel));
                continue;
            };
            if !example.stroke.is_usable(self.min_stroke_points) {
                debug!(index = i, points = example.stroke.len(), "dropping unusable stroke");
                dropped.push((i, DropReason::TooFewPoints));
                continue;
            }
            features.push(self.extractor.extract(&example.stroke));
            labels.push(class);
        }

        if !dropped.is_empty() {
            warn!(dropped = dropped.len(), accepted = labels.len(), "some examples were skipped");
        }

        let accepted = labels.len();
        if accepted < self.min_examples {
            return Err(EngineError::insufficient(self.min_examples, accepted, "training examples"));
        }

        Ok(BuiltDataset {
            dataset: Dataset::new(features, labels, self.class_labels.to_vec()),
            accepted,
            dropped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extractor::FeatureEncoding;
    use crate::features::templates::Shape;

    fn labels() -> Vec<String> {
        vec!["circle".into(), "square".into(), "triangle".into()]
    }

    fn example(shape: Shape, label: &str) -> LabeledExample {
        LabeledExample::new(shape.stroke(50.0, 50.0, 20.0, 12), label)
    }

    #[test]
    fn drops_unknown_labels() {
        let labels = labels();
        let fx = FeatureExtractor::new(16, FeatureEncoding::Raster).unwrap();
        let builder = DatasetBuilder::new(fx, &labels, 5, 3);
        let examples = vec![
            example(Shape::Circle, "circle"),
            example(Shape::Circle, "circle"),
            example(Shape::Square, "square"),
            example(Shape::Triangle, "unknown"),
            example(Shape::Square, "square"),
        ];
        let built = builder.build(&examples).unwrap();
        assert_eq!(built.accepted, 4);
        assert_eq!(built.dataset.len(), 4);
        assert_eq!(built.dataset.labels, vec![0, 0, 1, 1]);
        assert_eq!(built.dropped, vec![(3, DropReason::UnknownLabel)]);
        assert_eq!(built.dataset.class_counts(), vec![2, 2, 0]);
        assert!(built.dataset.features.iter().all(|f| f.len() == 16));
    }

    #[test]
    fn drops_short_strokes_then_reports_shortfall() {
        let labels = labels();
        let fx = FeatureExtractor::new(16, FeatureEncoding::Raster).unwrap();
        let builder = DatasetBuilder::new(fx, &labels, 5, 3);
        let short = LabeledExample::new(vec![[0.0, 0.0], [1.0, 1.0]], "circle");
        let examples = vec![example(Shape::Circle, "circle"), short, example(Shape::Square, "Square")];

        match builder.build(&examples) {
            Err(EngineError::InsufficientData { needed, found, missing, .. }) => {
                assert_eq!((needed, found, missing), (3, 2, 1));
            }
            other => panic!("expected InsufficientData, got {other:?}"),
        }
    }
}
