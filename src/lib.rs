//! Perceptrons, small gated feed-forward networks and the projections used
//! to plot what they learn.

pub mod activation;
pub mod boundary;
pub mod data;
pub mod eigen;
pub mod error;
pub mod layer;
pub mod linalg;
pub mod metrics;
pub mod network;
pub mod reduce;
pub mod training;
pub mod unit;

pub use boundary::{
    analytical_boundary, decision_boundary, decision_region, Boundary, DEFAULT_RESOLUTION,
    REGION_RESOLUTION,
};
pub use data::Example;
pub use error::{Error, Result};
pub use layer::Layer;
pub use network::Network;
pub use reduce::{calculate_centroid, pca, project_for_display, random_projection, Projection};
pub use training::{fit_network, fit_unit, TrainingConfig, TrainingReport};
pub use unit::Unit;

#[macro_export]
macro_rules! assert_rel_eq_arr1 {
    ($actual:expr, $expected:expr) => {
        assert_eq!($actual.shape(), $expected.shape());
        ndarray::Zip::from(&$actual)
            .and(&$expected)
            .for_each(|v, w| {
                assert_relative_eq!(v, w);
            });
    };
}

#[macro_export]
macro_rules! assert_rel_eq_arr2 {
    ($actual:expr, $expected:expr) => {
        assert_eq!($actual.shape(), $expected.shape());
        ndarray::Zip::from(&$actual)
            .and(&$expected)
            .for_each(|v, w| {
                assert_relative_eq!(v, w);
            });
    };
}
