use ndarray::{Array1, ArrayView1, ArrayView2, Zip};
use ndarray_rand::rand::{thread_rng, Rng};
use tracing::debug;

use crate::error::{ensure_len, Error, Result};
use crate::layer::Layer;

/// Feed-forward stack of layers trained with a gated error-propagation rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    layers: Vec<Layer>,
}

impl Network {
    /// `layer_sizes` lists the input width followed by every layer's width,
    /// so `[2, 3, 1]` builds a 2-3-1 network of two layers.
    pub fn new(layer_sizes: &[usize], learning_rate: f64) -> Result<Self> {
        Network::with_rng(layer_sizes, learning_rate, &mut thread_rng())
    }

    pub fn with_rng<R>(layer_sizes: &[usize], learning_rate: f64, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        if layer_sizes.len() < 2 {
            return Err(Error::InsufficientData {
                required: 2,
                actual: layer_sizes.len(),
            });
        }
        if layer_sizes.contains(&0) {
            return Err(Error::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        let layers = layer_sizes
            .windows(2)
            .map(|pair| Layer::with_rng(pair[0], pair[1], learning_rate, rng))
            .collect::<Result<Vec<_>>>()?;
        Network::from_layers(layers)
    }

    /// Every layer's output width must equal the next layer's input width.
    pub fn from_layers(layers: Vec<Layer>) -> Result<Self> {
        if layers.is_empty() {
            return Err(Error::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        for pair in layers.windows(2) {
            ensure_len(pair[0].output_size(), pair[1].input_size())?;
        }
        Ok(Self { layers })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].input_size()
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].output_size()
    }

    pub fn predict(&self, input: ArrayView1<f64>) -> Result<Array1<f64>> {
        let mut activations = input.to_owned();
        for layer in &self.layers {
            activations = layer.predict(activations.view())?;
        }
        Ok(activations)
    }

    // activations[0] is the input and activations[i + 1] the output of layer i.
    fn forward(&self, input: ArrayView1<f64>) -> Result<Vec<Array1<f64>>> {
        let mut activations = Vec::with_capacity(self.layers.len() + 1);
        activations.push(input.to_owned());
        for layer in &self.layers {
            let outputs = layer.predict(activations[activations.len() - 1].view())?;
            activations.push(outputs);
        }
        Ok(activations)
    }

    fn train_example(
        &mut self,
        input: ArrayView1<f64>,
        target: ArrayView1<f64>,
        learning_rate: f64,
    ) -> Result<()> {
        ensure_len(self.input_size(), input.len())?;
        ensure_len(self.output_size(), target.len())?;

        let activations = self.forward(input)?;
        let outputs = &activations[activations.len() - 1];
        // Outputs that did not fire carry no error.
        let mut deltas = Zip::from(target)
            .and(outputs)
            .map_collect(|&t, &o| if o > 0.0 { t - o } else { 0.0 });

        for (index, layer) in self.layers.iter_mut().enumerate().rev() {
            let layer_inputs = activations[index].view();
            layer.apply_deltas(layer_inputs, deltas.view(), learning_rate);
            if index > 0 {
                deltas = layer.backpropagate(deltas.view(), layer_inputs);
            }
        }
        Ok(())
    }

    /// Train for exactly `epochs` passes over `(inputs, targets)`, one row per example.
    ///
    /// Shapes are checked before the first update, so a mismatch never leaves
    /// the network partially trained on an example.
    pub fn train(
        &mut self,
        inputs: ArrayView2<f64>,
        targets: ArrayView2<f64>,
        learning_rate: f64,
        epochs: usize,
    ) -> Result<()> {
        ensure_len(inputs.nrows(), targets.nrows())?;
        ensure_len(self.input_size(), inputs.ncols())?;
        ensure_len(self.output_size(), targets.ncols())?;

        for epoch in 0..epochs {
            for (input, target) in inputs.outer_iter().zip(targets.outer_iter()) {
                self.train_example(input, target, learning_rate)?;
            }
            debug!(epoch, epochs, "network epoch finished");
        }
        Ok(())
    }
}
