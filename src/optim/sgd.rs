use crate::{layers::dense::Layer, math::matrix::Matrix};

/// Plain mini-batch gradient descent with a fixed learning rate.
#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies gradients summed over `batch_len` samples, averaged first so the
    /// step size does not depend on the batch size.
    pub fn step_batch(&self, layer: &mut Layer, weights_sum: Matrix, biases_sum: Matrix, batch_len: usize) {
        let scale = self.learning_rate / batch_len.max(1) as f64;
        layer.apply_gradients(weights_sum, biases_sum, scale);
    }
}
