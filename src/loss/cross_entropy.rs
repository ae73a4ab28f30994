/// Categorical cross-entropy loss for use with a Softmax output layer.
pub struct CrossEntropyLoss;

/// Keeps log() away from zero.
const EPS: f64 = 1e-12;

impl CrossEntropyLoss {
    /// L = -log(predicted[class] + eps) for a one-hot target at `class`.
    pub fn loss(predicted: &[f64], class: usize) -> f64 {
        predicted
            .get(class)
            .map(|p| -(p + EPS).ln())
            .unwrap_or(f64::INFINITY)
    }

    /// Gradient of softmax + cross-entropy w.r.t. the logits:
    ///   ∂L/∂z_i = predicted[i] - [i == class]
    ///
    /// The Softmax layer's own derivative is the identity, so this is the
    /// delta fed straight into the backward pass.
    pub fn derivative(predicted: &[f64], class: usize) -> Vec<f64> {
        predicted
            .iter()
            .enumerate()
            .map(|(i, p)| if i == class { p - 1.0 } else { *p })
            .collect()
    }
}
