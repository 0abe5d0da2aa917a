use ndarray::{Array1, Array2, ArrayView1};
use ndarray_rand::rand::{thread_rng, Rng};

use crate::activation::Activation;
use crate::error::{ensure_len, Error, Result};
use crate::unit::Unit;

/// Independent units reading the same input vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    units: Vec<Unit>,
}

impl Layer {
    pub fn new(input_size: usize, output_size: usize, learning_rate: f64) -> Result<Self> {
        Layer::with_rng(input_size, output_size, learning_rate, &mut thread_rng())
    }

    /// Random units; a layer needs at least one of them.
    pub fn with_rng<R>(
        input_size: usize,
        output_size: usize,
        learning_rate: f64,
        rng: &mut R,
    ) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        if output_size == 0 {
            return Err(Error::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        let units = (0..output_size)
            .map(|_| Unit::with_rng(input_size, learning_rate, rng))
            .collect();
        Ok(Self { units })
    }

    /// Build a layer from existing units, which must all share one input width.
    pub fn from_units(units: Vec<Unit>) -> Result<Self> {
        let first = units.first().ok_or(Error::InsufficientData {
            required: 1,
            actual: 0,
        })?;
        let input_size = first.input_size();
        for unit in &units {
            ensure_len(input_size, unit.input_size())?;
        }
        Ok(Self { units })
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn input_size(&self) -> usize {
        self.units.first().map_or(0, Unit::input_size)
    }

    pub fn output_size(&self) -> usize {
        self.units.len()
    }

    /// Weights as a (output_size, input_size) matrix, one row per unit.
    pub fn weight_matrix(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.output_size(), self.input_size()), |(j, k)| {
            self.units[j].weights()[k]
        })
    }

    pub fn predict(&self, inputs: ArrayView1<f64>) -> Result<Array1<f64>> {
        ensure_len(self.input_size(), inputs.len())?;
        self.units.iter().map(|unit| unit.predict(inputs)).collect()
    }

    /// Run the perceptron rule on every unit with its own target.
    pub fn learn(&mut self, inputs: ArrayView1<f64>, targets: ArrayView1<f64>) -> Result<()> {
        ensure_len(self.output_size(), targets.len())?;
        ensure_len(self.input_size(), inputs.len())?;
        for (unit, &target) in self.units.iter_mut().zip(targets) {
            unit.learn(inputs, target)?;
        }
        Ok(())
    }

    /// Move unit `j` by `learning_rate * deltas[j]` along `inputs`.
    pub(crate) fn apply_deltas(
        &mut self,
        inputs: ArrayView1<f64>,
        deltas: ArrayView1<f64>,
        learning_rate: f64,
    ) {
        for (unit, &delta) in self.units.iter_mut().zip(deltas) {
            unit.nudge(inputs, learning_rate * delta);
        }
    }

    /// Deltas for the layer feeding this one, gated by the activation
    /// derivative of that layer's outputs.
    pub(crate) fn backpropagate(
        &self,
        deltas: ArrayView1<f64>,
        previous_outputs: ArrayView1<f64>,
    ) -> Array1<f64> {
        let gate = match self.units.first() {
            Some(unit) => unit.activation().derivative_all(previous_outputs),
            None => Array1::zeros(previous_outputs.len()),
        };
        self.weight_matrix().t().dot(&deltas) * gate
    }
}
