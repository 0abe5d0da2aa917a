//! Training sessions driven by a configuration.

use ndarray::ArrayView2;
use ndarray_rand::rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::data::Example;
use crate::error::Result;
use crate::network::Network;
use crate::unit::Unit;

/// Knobs the training front end exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Upper bound on epochs. The single-unit loop may stop earlier.
    pub epochs: usize,
    pub learning_rate: f64,
    /// Seed for weight initialization and random projection.
    pub seed: Option<u64>,
    /// Widths of the hidden layers between input and output.
    pub hidden_layers: Vec<usize>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 100,
            learning_rate: 0.1,
            seed: None,
            hidden_layers: Vec::new(),
        }
    }
}

impl TrainingConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// A seeded generator when `seed` is set, an entropy-seeded one otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// `[input, hidden.., output]`, the layout accepted by `Network::new`.
    pub fn layer_sizes(&self, input_size: usize, output_size: usize) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.hidden_layers.len() + 2);
        sizes.push(input_size);
        sizes.extend_from_slice(&self.hidden_layers);
        sizes.push(output_size);
        sizes
    }
}

/// Outcome of a single-unit training loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainingReport {
    pub epochs: usize,
    /// Value returned by the last `Unit::train_network` call, `None` when no epoch ran.
    pub final_error: Option<f64>,
    pub converged: bool,
}

/// Run epochs until the averaged error is exactly zero or `max_epochs` have run.
///
/// Non-convergence is reported, not treated as an error.
pub fn fit_unit(unit: &mut Unit, examples: &[Example], max_epochs: usize) -> Result<TrainingReport> {
    let mut report = TrainingReport {
        epochs: 0,
        final_error: None,
        converged: false,
    };
    while report.epochs < max_epochs {
        let error = unit.train_network(examples)?;
        report.final_error = Some(error);
        report.epochs += 1;
        debug!(epoch = report.epochs, error, "unit epoch finished");
        if error == 0.0 {
            report.converged = true;
            break;
        }
    }

    if report.converged {
        info!(epochs = report.epochs, "unit converged");
    } else {
        info!(
            epochs = report.epochs,
            error = ?report.final_error,
            "epoch budget exhausted before convergence"
        );
    }
    Ok(report)
}

/// Build a network shaped by `config` and train it for `config.epochs` epochs.
pub fn fit_network(
    config: &TrainingConfig,
    inputs: ArrayView2<f64>,
    targets: ArrayView2<f64>,
) -> Result<Network> {
    let mut rng = config.rng();
    let sizes = config.layer_sizes(inputs.ncols(), targets.ncols());
    let mut network = Network::with_rng(&sizes, config.learning_rate, &mut rng)?;
    network.train(inputs, targets, config.learning_rate, config.epochs)?;
    info!(layers = ?sizes, epochs = config.epochs, "network trained");
    Ok(network)
}
