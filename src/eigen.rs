//! Eigendecomposition of small symmetric matrices by cyclic Jacobi rotations.

use ndarray::{Array1, Array2, ArrayView2};
use tracing::warn;

use crate::error::{ensure_len, Result};

const MAX_SWEEPS: usize = 64;
const TOLERANCE: f64 = 1e-12;

/// Eigenpairs of a symmetric matrix.
/// `values` are sorted in descending order and `vectors` holds the matching
/// unit eigenvectors as columns.
#[derive(Debug, Clone)]
pub struct SymmetricEigen {
    pub values: Array1<f64>,
    pub vectors: Array2<f64>,
}

fn off_diagonal_norm(a: &Array2<f64>) -> f64 {
    a.indexed_iter()
        .filter(|((i, j), _)| i != j)
        .map(|(_, v)| v * v)
        .sum::<f64>()
        .sqrt()
}

// Apply the rotation in the (p, q) plane that zeroes a[p][q]:
// a <- J^T a J, v <- v J.
fn rotate(a: &mut Array2<f64>, v: &mut Array2<f64>, p: usize, q: usize) {
    let apq = a[[p, q]];
    if apq == 0.0 {
        return;
    }
    let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
    let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
    let c = 1.0 / (t * t + 1.0).sqrt();
    let s = t * c;

    let n = a.nrows();
    for k in 0..n {
        let (akp, akq) = (a[[k, p]], a[[k, q]]);
        a[[k, p]] = c * akp - s * akq;
        a[[k, q]] = s * akp + c * akq;
    }
    for k in 0..n {
        let (apk, aqk) = (a[[p, k]], a[[q, k]]);
        a[[p, k]] = c * apk - s * aqk;
        a[[q, k]] = s * apk + c * aqk;
    }
    for k in 0..n {
        let (vkp, vkq) = (v[[k, p]], v[[k, q]]);
        v[[k, p]] = c * vkp - s * vkq;
        v[[k, q]] = s * vkp + c * vkq;
    }
}

/// Decompose a symmetric matrix. Only the square shape is checked;
/// asymmetric input gives meaningless results.
pub fn symmetric_eigen(matrix: ArrayView2<f64>) -> Result<SymmetricEigen> {
    let n = matrix.nrows();
    ensure_len(n, matrix.ncols())?;

    let mut a = matrix.to_owned();
    let mut v = Array2::eye(n);
    let scale = a.iter().map(|x| x * x).sum::<f64>().sqrt();

    let mut converged = false;
    for _ in 0..MAX_SWEEPS {
        if off_diagonal_norm(&a) <= TOLERANCE * scale {
            converged = true;
            break;
        }
        for p in 0..n {
            for q in (p + 1)..n {
                rotate(&mut a, &mut v, p, q);
            }
        }
    }
    if !converged && off_diagonal_norm(&a) > TOLERANCE * scale {
        warn!(size = n, "jacobi eigensolver did not converge");
    }

    let mut order = (0..n).collect::<Vec<_>>();
    order.sort_by(|&i, &j| a[[j, j]].total_cmp(&a[[i, i]]));

    let values = order.iter().map(|&i| a[[i, i]]).collect::<Array1<_>>();
    let vectors = Array2::from_shape_fn((n, n), |(row, col)| v[[row, order[col]]]);
    Ok(SymmetricEigen { values, vectors })
}
