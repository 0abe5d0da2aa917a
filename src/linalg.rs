//! Vector and matrix primitives shared by the models and the reducers.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::error::{ensure_len, Error, Result};

/// Dot product of two equally long vectors.
pub fn dot(a: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<f64> {
    ensure_len(a.len(), b.len())?;
    Ok(a.dot(&b))
}

/// Stack equally long rows into a (n_rows, width) matrix.
/// An empty iterator produces a (0, 0) matrix.
pub fn stack_rows<'a, I>(rows: I) -> Result<Array2<f64>>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut width = None;
    let mut n_rows = 0;
    let mut values = Vec::new();
    for row in rows {
        let expected = *width.get_or_insert(row.len());
        ensure_len(expected, row.len())?;
        values.extend_from_slice(row);
        n_rows += 1;
    }
    let width = width.unwrap_or(0);
    Ok(Array2::from_shape_vec((n_rows, width), values)
        .expect("row widths were checked while stacking"))
}

/// Per-column arithmetic mean. Fails with `EmptySet` on a matrix without rows.
pub fn column_means(matrix: ArrayView2<f64>) -> Result<Array1<f64>> {
    matrix.mean_axis(Axis(0)).ok_or(Error::EmptySet)
}

/// Subtract the column means from every row.
pub fn center(matrix: ArrayView2<f64>) -> Result<Array2<f64>> {
    let means = column_means(matrix)?;
    Ok(&matrix - &means)
}

/// Empirical covariance of already-centered rows, normalized by `n - 1`.
pub fn covariance(centered: ArrayView2<f64>) -> Result<Array2<f64>> {
    let n = centered.nrows();
    if n < 2 {
        return Err(Error::InsufficientData {
            required: 2,
            actual: n,
        });
    }
    Ok(centered.t().dot(&centered) / (n - 1) as f64)
}

/// `matrix · vector`, where the vector length must equal the column count.
pub fn mat_vec(matrix: ArrayView2<f64>, vector: ArrayView1<f64>) -> Result<Array1<f64>> {
    ensure_len(matrix.ncols(), vector.len())?;
    Ok(matrix.dot(&vector))
}
