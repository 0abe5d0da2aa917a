//! Reduce labeled points to 2 or 3 dimensions for plotting.

use ndarray::{s, Array, Array1, Array2, ArrayView2};
use ndarray_rand::rand::Rng;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use serde::Serialize;

use crate::data::{self, Example};
use crate::eigen::symmetric_eigen;
use crate::error::{Error, Result};
use crate::linalg;

/// Points ready for a scatter plot, paired positionally with their labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub points: Array2<f64>,
    pub labels: Vec<i32>,
}

/// Project centered examples onto their `dimensions` principal components.
///
/// Components come in descending order of explained variance. The sign of
/// each component is arbitrary.
pub fn pca(examples: &[Example], dimensions: usize) -> Result<Array2<f64>> {
    if examples.len() < 2 {
        return Err(Error::InsufficientData {
            required: 2,
            actual: examples.len(),
        });
    }
    let features = data::features(examples)?;
    if dimensions > features.ncols() {
        return Err(Error::InsufficientData {
            required: dimensions,
            actual: features.ncols(),
        });
    }

    let centered = linalg::center(features.view())?;
    let covariance = linalg::covariance(centered.view())?;
    let eigen = symmetric_eigen(covariance.view())?;
    let components = eigen.vectors.slice(s![.., ..dimensions]);
    Ok(centered.dot(&components))
}

/// Multiply every example by a fresh `target_dimensions × source` matrix of
/// uniform values in `[-1, 1)`.
///
/// Two calls give different projections unless `rng` is seeded identically.
pub fn random_projection<R>(
    examples: &[Example],
    target_dimensions: usize,
    rng: &mut R,
) -> Result<Array2<f64>>
where
    R: Rng + ?Sized,
{
    if examples.is_empty() {
        return Err(Error::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    let features = data::features(examples)?;
    let matrix: Array2<f64> = Array::random_using(
        (target_dimensions, features.ncols()),
        Uniform::new(-1.0, 1.0),
        rng,
    );
    let mut projected = Array2::zeros((features.nrows(), target_dimensions));
    for (row, mut out) in features.outer_iter().zip(projected.outer_iter_mut()) {
        out.assign(&linalg::mat_vec(matrix.view(), row)?);
    }
    Ok(projected)
}

/// Arithmetic mean of the rows of `points`.
pub fn calculate_centroid(points: ArrayView2<f64>) -> Result<Array1<f64>> {
    linalg::column_means(points)
}

/// Points as they are when they already fit in 3 dimensions, otherwise a
/// random projection down to 3.
pub fn project_for_display<R>(examples: &[Example], rng: &mut R) -> Result<Projection>
where
    R: Rng + ?Sized,
{
    let features = data::features(examples)?;
    let points = if features.ncols() <= 3 {
        features
    } else {
        random_projection(examples, 3, rng)?
    };
    Ok(Projection {
        points,
        labels: data::labels(examples),
    })
}
