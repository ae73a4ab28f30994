use rand::Rng;

use crate::layers::dense::Layer;
use crate::network::spec::{ClassifierTopology, LayerSpec};

/// A stack of dense layers. Built fresh for every training request and owned
/// by that request alone.
#[derive(Debug, Clone)]
pub struct Network {
    pub layers: Vec<Layer>,
}

impl Network {
    pub fn new<R: Rng + ?Sized>(layer_specs: &[LayerSpec], rng: &mut R) -> Network {
        let layers = layer_specs
            .iter()
            .map(|spec| Layer::new(spec.size, spec.input_size, spec.activation.clone(), rng))
            .collect();
        Network { layers }
    }

    pub fn classifier<R: Rng + ?Sized>(topology: &ClassifierTopology, rng: &mut R) -> Network {
        Network::new(&topology.layer_specs(), rng)
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map(|l| l.input_size()).unwrap_or(0)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map(|l| l.size).unwrap_or(0)
    }

    /// Forward pass; stores activations in each layer for backprop.
    pub fn forward(&mut self, input: &[f64]) -> Vec<f64> {
        let mut current = input.to_vec();
        for layer in &mut self.layers {
            current = layer.feed_from(&current);
        }
        current
    }

    /// Forward pass for evaluation; leaves the backprop caches alone.
    pub fn predict(&self, input: &[f64]) -> Vec<f64> {
        self.layers
            .iter()
            .fold(input.to_vec(), |current, layer| layer.infer(&current))
    }
}

/// Index of the maximum element in a slice.
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
