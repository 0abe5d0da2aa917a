use ndarray::{Array, Array1, ArrayView1};
use ndarray_rand::rand::{thread_rng, Rng};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

use crate::activation::{Activation, Step};
use crate::data::Example;
use crate::error::{ensure_len, Error, Result};

/// A single linear threshold unit (perceptron).
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    weights: Array1<f64>,
    bias: f64,
    learning_rate: f64,
    activation: Step,
}

impl Unit {
    /// Create a unit with weights and bias drawn uniformly from `[-1, 1)`.
    pub fn new(input_size: usize, learning_rate: f64) -> Self {
        Unit::with_rng(input_size, learning_rate, &mut thread_rng())
    }

    pub fn with_rng<R>(input_size: usize, learning_rate: f64, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let weights = Array::random_using(input_size, Uniform::new(-1.0, 1.0), rng);
        let bias = rng.gen_range(-1.0..1.0);
        Unit::with_weights(weights, bias, learning_rate)
    }

    pub fn with_weights(weights: Array1<f64>, bias: f64, learning_rate: f64) -> Self {
        Self {
            weights,
            bias,
            learning_rate,
            activation: Step,
        }
    }

    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.weights.view()
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn input_size(&self) -> usize {
        self.weights.len()
    }

    /// Replace the weights and bias. The input width may not change.
    pub fn reset(&mut self, weights: Array1<f64>, bias: f64) -> Result<()> {
        ensure_len(self.input_size(), weights.len())?;
        self.weights = weights;
        self.bias = bias;
        Ok(())
    }

    /// `weights · input + bias`.
    pub fn weighted_sum(&self, input: ArrayView1<f64>) -> Result<f64> {
        ensure_len(self.input_size(), input.len())?;
        Ok(self.weights.dot(&input) + self.bias)
    }

    /// Classify `input` as `+1.0` or `-1.0`.
    pub fn predict(&self, input: ArrayView1<f64>) -> Result<f64> {
        Ok(self.activation.compute(self.weighted_sum(input)?))
    }

    /// Apply the perceptron rule for one labeled input and return `label - prediction`.
    ///
    /// The bias moves by the raw error; only the weights are scaled by the
    /// learning rate.
    pub fn learn(&mut self, input: ArrayView1<f64>, label: f64) -> Result<f64> {
        let error = label - self.predict(input)?;
        self.weights.scaled_add(self.learning_rate * error, &input);
        self.bias += error;
        Ok(error)
    }

    /// Run one epoch over `examples` in order and return the mean error halved,
    /// which maps the `{-2, 0, 2}` error range onto `{-1, 0, 1}`.
    pub fn train_network(&mut self, examples: &[Example]) -> Result<f64> {
        if examples.is_empty() {
            return Err(Error::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        for example in examples {
            ensure_len(self.input_size(), example.len())?;
        }

        let mut total_error = 0.0;
        for example in examples {
            total_error += self.learn(example.view(), example.label() as f64)?;
        }
        Ok(total_error / (2 * examples.len()) as f64)
    }

    pub(crate) fn activation(&self) -> Step {
        self.activation
    }

    /// Move every weight by `step * input[k]` and the bias by `step`.
    pub(crate) fn nudge(&mut self, input: ArrayView1<f64>, step: f64) {
        self.weights.scaled_add(step, &input);
        self.bias += step;
    }
}
