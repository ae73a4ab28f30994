use rand::Rng;

use crate::{activation::activation::ActivationFunction, math::matrix::Matrix};

#[derive(Debug, Clone)]
pub struct Layer {
    pub size: usize,
    pub neurons: Matrix,
    pre_neurons: Matrix, // z = xW + b, kept for the derivative
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction,
}

impl Layer {
    /// Creates a layer with `input_size × size` weights and zero biases.
    ///
    /// Rectifier-style activations get He initialization, everything else Xavier.
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        let weights = match activation {
            ActivationFunction::ReLU | ActivationFunction::LeakyReLU { .. } => {
                Matrix::he(input_size, size, rng)
            }
            _ => Matrix::xavier(input_size, size, rng),
        };

        Layer {
            size,
            neurons: Matrix::zeros(1, size),
            pre_neurons: Matrix::zeros(1, size),
            weights,
            biases: Matrix::zeros(1, size),
            activator: activation,
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    fn linear(&self, input: &[f64]) -> Matrix {
        &Matrix::row(input.to_vec()) * &self.weights + self.biases.clone()
    }

    /// Forward step that records `z` and `a` for backprop.
    pub fn feed_from(&mut self, input: &[f64]) -> Vec<f64> {
        let z = self.linear(input);
        let a = Matrix::row(self.activator.apply(&z.data[0]));
        self.pre_neurons = z;
        self.neurons = a.clone();
        a.into_row()
    }

    /// Forward step without touching the cached activations.
    pub fn infer(&self, input: &[f64]) -> Vec<f64> {
        let z = self.linear(input);
        self.activator.apply(&z.data[0])
    }

    /// Computes gradient adjustments. Returns (weights_grad, biases_grad).
    /// `next_layer_delta` is ∂L/∂a for this layer (error in activation space).
    pub fn compute_gradients(&self, next_layer_delta: &Matrix, inputs: &Matrix) -> (Matrix, Matrix) {
        let act_derivative = self.pre_neurons.map(|x| self.activator.derivative(x));
        // δ = error ⊙ σ'(z)
        let layer_delta = next_layer_delta.hadamard(&act_derivative);

        let weights_adjustment = &inputs.transpose() * &layer_delta;
        (weights_adjustment, layer_delta)
    }

    /// Applies pre-computed gradients scaled by lr.
    pub fn apply_gradients(&mut self, weights_grad: Matrix, biases_grad: Matrix, lr: f64) {
        self.weights = self.weights.clone() - weights_grad.map(|x| x * lr);
        self.biases = self.biases.clone() - biases_grad.map(|x| x * lr);
    }
}
