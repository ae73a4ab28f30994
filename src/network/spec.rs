use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;

/// Negative slope of the hidden LeakyReLU layers.
pub const HIDDEN_LEAK: f64 = 0.01;

/// Describes one dense layer of the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub input_size: usize,
    pub activation: ActivationFunction,
}

/// The fixed `N → H1 → H2 → C` classifier shape.
///
/// Only the feature length `N` and class count `C` are free; the hidden widths
/// are derived from them so every level gets a network proportionate to its
/// input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierTopology {
    pub inputs: usize,
    pub hidden1: usize,
    pub hidden2: usize,
    pub classes: usize,
}

impl ClassifierTopology {
    pub fn new(inputs: usize, classes: usize) -> Self {
        let hidden1 = (inputs / 2).clamp(8, 64);
        let hidden2 = (hidden1 / 2).max(classes).max(4);
        ClassifierTopology { inputs, hidden1, hidden2, classes }
    }

    pub fn layer_specs(&self) -> Vec<LayerSpec> {
        let hidden = ActivationFunction::LeakyReLU { alpha: HIDDEN_LEAK };
        vec![
            LayerSpec { size: self.hidden1, input_size: self.inputs, activation: hidden.clone() },
            LayerSpec { size: self.hidden2, input_size: self.hidden1, activation: hidden },
            LayerSpec { size: self.classes, input_size: self.hidden2, activation: ActivationFunction::Softmax },
        ]
    }
}
