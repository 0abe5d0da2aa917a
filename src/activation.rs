use ndarray::{Array1, ArrayView1};

pub trait Activation {
    fn compute(&self, x: f64) -> f64;

    /// Gate applied to an output when pushing errors back through a unit.
    fn derivative(&self, output: f64) -> f64;

    fn derivative_all(&self, outputs: ArrayView1<f64>) -> Array1<f64> {
        outputs.map(|&v| self.derivative(v))
    }
}

/// Symmetric step: `+1` for a strictly positive sum, `-1` otherwise.
///
/// Its derivative is the step surrogate `1 if v > 0 else 0`, not the true
/// (zero almost everywhere) derivative of the step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Step;

impl Activation for Step {
    fn compute(&self, x: f64) -> f64 {
        if x > 0.0 {
            1.0
        } else {
            -1.0
        }
    }

    fn derivative(&self, output: f64) -> f64 {
        if output > 0.0 {
            1.0
        } else {
            0.0
        }
    }
}
