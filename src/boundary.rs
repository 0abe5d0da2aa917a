//! Sampled decision boundaries for overlaying on projected points.

use ndarray::{aview1, s, Array1, ArrayView1, ArrayView2, Axis};
use serde::Serialize;
use tracing::warn;

use crate::error::{ensure_len, Error, Result};
use crate::linalg;
use crate::reduce::calculate_centroid;

/// Subdivisions per axis used by the plotting front end.
pub const DEFAULT_RESOLUTION: usize = 10;

/// Subdivisions per axis for model regions drawn as heatmaps.
pub const REGION_RESOLUTION: usize = 100;

/// A boundary sampled over the bounding box of the plotted points.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Boundary {
    Line {
        x: Vec<f64>,
        y: Vec<f64>,
    },
    /// Grid samples in x-major order with two triangles per grid cell.
    Plane {
        x: Vec<f64>,
        y: Vec<f64>,
        z: Vec<f64>,
        triangles: Vec<[usize; 3]>,
    },
    /// Model outputs at every grid sample, last axis varying fastest.
    Region {
        x: Vec<f64>,
        y: Vec<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        z: Option<Vec<f64>>,
        values: Vec<f64>,
    },
}

fn axis_range(points: ArrayView2<f64>, axis: usize) -> (f64, f64) {
    points
        .column(axis)
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
            (min.min(v), max.max(v))
        })
}

// `resolution + 1` evenly spaced values from `min` to `max`, or just `min`
// when the range is empty.
fn samples(min: f64, max: f64, resolution: usize) -> Vec<f64> {
    if resolution == 0 || max <= min {
        return vec![min];
    }
    let step = (max - min) / resolution as f64;
    (0..=resolution)
        .map(|i| if i == resolution { max } else { min + step * i as f64 })
        .collect()
}

// Solve `weights · x + bias = 0` for the last coordinate.
fn solve_last(weights: ArrayView1<f64>, bias: f64, leading: &[f64]) -> Result<f64> {
    let last = weights.len() - 1;
    let partial = linalg::dot(weights.slice(s![..last]), aview1(leading))?;
    Ok(-(partial + bias) / weights[last])
}

fn grid_triangles(nx: usize, ny: usize) -> Vec<[usize; 3]> {
    let mut triangles = Vec::with_capacity(2 * nx.saturating_sub(1) * ny.saturating_sub(1));
    for i in 0..nx.saturating_sub(1) {
        for j in 0..ny.saturating_sub(1) {
            let a = i * ny + j;
            triangles.push([a, a + ny, a + 1]);
            triangles.push([a + 1, a + ny, a + ny + 1]);
        }
    }
    triangles
}

/// Sample the hyperplane `weights · x + bias = 0` over the bounding box of `points`.
///
/// 2D points give a line `y(x)`, 3D points a plane `z(x, y)`.
pub fn decision_boundary(
    points: ArrayView2<f64>,
    weights: ArrayView1<f64>,
    bias: f64,
    resolution: usize,
) -> Result<Boundary> {
    if points.nrows() == 0 {
        return Err(Error::EmptySet);
    }
    let dimensions = points.ncols();
    ensure_len(dimensions, weights.len())?;
    if !(2..=3).contains(&dimensions) {
        return Err(Error::UnsupportedDimensions(dimensions));
    }
    if weights[dimensions - 1] == 0.0 {
        warn!(?weights, "boundary is parallel to the last axis");
        return Err(Error::DegenerateBoundary);
    }

    let (x_min, x_max) = axis_range(points, 0);
    let xs = samples(x_min, x_max, resolution);
    if dimensions == 2 {
        let y = xs
            .iter()
            .map(|&x| solve_last(weights, bias, &[x]))
            .collect::<Result<_>>()?;
        return Ok(Boundary::Line { x: xs, y });
    }

    let (y_min, y_max) = axis_range(points, 1);
    let ys = samples(y_min, y_max, resolution);
    let capacity = xs.len() * ys.len();
    let (mut x, mut y, mut z) = (
        Vec::with_capacity(capacity),
        Vec::with_capacity(capacity),
        Vec::with_capacity(capacity),
    );
    for &px in &xs {
        for &py in &ys {
            x.push(px);
            y.push(py);
            z.push(solve_last(weights, bias, &[px, py])?);
        }
    }
    Ok(Boundary::Plane {
        x,
        y,
        z,
        triangles: grid_triangles(xs.len(), ys.len()),
    })
}

/// Boundary halfway between the centroids of the first two distinct labels,
/// perpendicular to the segment joining them.
pub fn analytical_boundary(
    points: ArrayView2<f64>,
    labels: &[i32],
    resolution: usize,
) -> Result<Boundary> {
    ensure_len(points.nrows(), labels.len())?;
    let mut kinds = Vec::new();
    for &label in labels {
        if !kinds.contains(&label) {
            kinds.push(label);
        }
    }
    if kinds.len() < 2 {
        return Err(Error::InsufficientData {
            required: 2,
            actual: kinds.len(),
        });
    }

    let centroid_of = |kind: i32| {
        let rows = labels
            .iter()
            .enumerate()
            .filter(|(_, label)| **label == kind)
            .map(|(index, _)| index)
            .collect::<Vec<_>>();
        calculate_centroid(points.select(Axis(0), &rows).view())
    };
    let first = centroid_of(kinds[0])?;
    let second = centroid_of(kinds[1])?;

    let normal: Array1<f64> = &second - &first;
    let midpoint = (&first + &second) / 2.0;
    let bias = -normal.dot(&midpoint);
    decision_boundary(points, normal.view(), bias, resolution)
}

/// Evaluate `model` on a grid spanning the bounding box of `points`.
///
/// Unlike `decision_boundary` this works for any model, including
/// multi-layer networks whose boundary is not a single hyperplane.
pub fn decision_region<F>(
    points: ArrayView2<f64>,
    mut model: F,
    resolution: usize,
) -> Result<Boundary>
where
    F: FnMut(ArrayView1<f64>) -> Result<f64>,
{
    if points.nrows() == 0 {
        return Err(Error::EmptySet);
    }
    let dimensions = points.ncols();
    if !(2..=3).contains(&dimensions) {
        return Err(Error::UnsupportedDimensions(dimensions));
    }

    let axes = (0..dimensions)
        .map(|axis| {
            let (min, max) = axis_range(points, axis);
            samples(min, max, resolution)
        })
        .collect::<Vec<_>>();
    let total = axes.iter().map(Vec::len).product::<usize>();

    let mut coordinates = (0..dimensions)
        .map(|_| Vec::with_capacity(total))
        .collect::<Vec<Vec<f64>>>();
    let mut values = Vec::with_capacity(total);
    let mut sample = Array1::zeros(dimensions);
    for flat in 0..total {
        let mut rest = flat;
        for axis in (0..dimensions).rev() {
            let n = axes[axis].len();
            sample[axis] = axes[axis][rest % n];
            rest /= n;
        }
        for (axis, column) in coordinates.iter_mut().enumerate() {
            column.push(sample[axis]);
        }
        values.push(model(sample.view())?);
    }

    let mut coordinates = coordinates.into_iter();
    let x = coordinates.next().unwrap_or_default();
    let y = coordinates.next().unwrap_or_default();
    Ok(Boundary::Region {
        x,
        y,
        z: coordinates.next(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{layer::Layer, network::Network, unit::Unit};
    use approx::assert_abs_diff_eq;
    use ndarray::{arr1, arr2};

    #[test]
    fn line_through_origin() {
        let points = arr2(&[[-1.0, 0.5], [0.0, -0.2], [1.0, 0.3]]);
        let boundary =
            decision_boundary(points.view(), arr1(&[1.0, 1.0]).view(), 0.0, DEFAULT_RESOLUTION)
                .unwrap();
        match boundary {
            Boundary::Line { x, y } => {
                assert_eq!(11, x.len());
                assert_abs_diff_eq!(x[0], -1.0);
                assert_abs_diff_eq!(x[10], 1.0);
                for (x, y) in x.iter().zip(&y) {
                    assert_abs_diff_eq!(*y, -x, epsilon = 1e-12);
                }
            }
            other => panic!("expected a line, got {:?}", other),
        }
    }

    #[test]
    fn plane_mesh() {
        let points = arr2(&[[0.0, 0.0, 0.0], [2.0, 1.0, 5.0]]);
        let boundary = decision_boundary(
            points.view(),
            arr1(&[1.0, 2.0, -1.0]).view(),
            0.5,
            DEFAULT_RESOLUTION,
        )
        .unwrap();
        match boundary {
            Boundary::Plane { x, y, z, triangles } => {
                assert_eq!(121, x.len());
                assert_eq!(121, z.len());
                assert_eq!(200, triangles.len());
                assert!(triangles.iter().flatten().all(|&i| i < 121));
                for ((x, y), z) in x.iter().zip(&y).zip(&z) {
                    assert_abs_diff_eq!(*z, x + 2.0 * y + 0.5, epsilon = 1e-12);
                }
                assert_abs_diff_eq!(x[120], 2.0);
                assert_abs_diff_eq!(y[120], 1.0);
            }
            other => panic!("expected a plane, got {:?}", other),
        }
    }

    #[test]
    fn collapsed_range_gives_single_sample() {
        let points = arr2(&[[3.0, 1.0], [3.0, 2.0]]);
        let boundary = decision_boundary(points.view(), arr1(&[1.0, 2.0]).view(), 1.0, 10).unwrap();
        assert_eq!(
            Boundary::Line {
                x: vec![3.0],
                y: vec![-2.0]
            },
            boundary
        );
    }

    #[test]
    fn rejected_inputs() {
        let points = arr2(&[[0.0, 1.0], [1.0, 0.0]]);
        assert!(matches!(
            decision_boundary(points.view(), arr1(&[1.0, 0.0]).view(), 0.0, 10),
            Err(Error::DegenerateBoundary)
        ));
        assert!(matches!(
            decision_boundary(points.view(), arr1(&[1.0]).view(), 0.0, 10),
            Err(Error::DimensionMismatch { .. })
        ));
        let wide = arr2(&[[0.0, 1.0, 2.0, 3.0]]);
        assert!(matches!(
            decision_boundary(wide.view(), arr1(&[1.0; 4]).view(), 0.0, 10),
            Err(Error::UnsupportedDimensions(4))
        ));
    }

    #[test]
    fn analytical_separator_bisects_centroids() {
        let points = arr2(&[[1.0, 1.0], [2.0, 2.0], [-1.0, -1.0], [-2.0, -2.0]]);
        let labels = [1, 1, -1, -1];
        match analytical_boundary(points.view(), &labels, 4).unwrap() {
            Boundary::Line { x, y } => {
                assert_eq!(5, x.len());
                for (x, y) in x.iter().zip(&y) {
                    assert_abs_diff_eq!(*y, -x, epsilon = 1e-12);
                }
            }
            other => panic!("expected a line, got {:?}", other),
        }
    }

    #[test]
    fn analytical_needs_two_labels() {
        let points = arr2(&[[1.0, 1.0], [2.0, 2.0]]);
        assert!(matches!(
            analytical_boundary(points.view(), &[1, 1], 10),
            Err(Error::InsufficientData {
                required: 2,
                actual: 1
            })
        ));
        assert!(analytical_boundary(points.view(), &[1], 10).is_err());
    }

    #[test]
    fn region_of_two_layer_network() {
        // Hidden units fire on x > 0 and y > 0; the output fires when both do.
        let hidden = Layer::from_units(vec![
            Unit::with_weights(arr1(&[1.0, 0.0]), 0.0, 0.1),
            Unit::with_weights(arr1(&[0.0, 1.0]), 0.0, 0.1),
        ])
        .unwrap();
        let output =
            Layer::from_units(vec![Unit::with_weights(arr1(&[1.0, 1.0]), -1.5, 0.1)]).unwrap();
        let network = Network::from_layers(vec![hidden, output]).unwrap();

        let points = arr2(&[[-1.0, 1.0], [1.0, -1.0]]);
        let region =
            decision_region(points.view(), |p| Ok(network.predict(p)?[0]), 2).unwrap();
        match region {
            Boundary::Region { x, y, z, values } => {
                assert_eq!(vec![-1.0, -1.0, -1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0], x);
                assert_eq!(vec![-1.0, 0.0, 1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 1.0], y);
                assert_eq!(None, z);
                assert_eq!(
                    vec![-1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, 1.0],
                    values
                );
            }
            other => panic!("expected a region, got {:?}", other),
        }
    }

    #[test]
    fn region_in_three_dimensions() {
        let points = arr2(&[[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]]);
        let region = decision_region(points.view(), |p| Ok(p.sum()), 4).unwrap();
        match region {
            Boundary::Region { x, y, z, values } => {
                let z = z.unwrap();
                assert_eq!(125, values.len());
                for (((x, y), z), v) in x.iter().zip(&y).zip(&z).zip(&values) {
                    assert_abs_diff_eq!(*v, x + y + z, epsilon = 1e-12);
                }
                assert_abs_diff_eq!(z[124], 3.0);
            }
            other => panic!("expected a region, got {:?}", other),
        }
    }

    #[test]
    fn region_propagates_model_errors() {
        let network = Network::new(&[3, 1], 0.1).unwrap();
        let points = arr2(&[[0.0, 1.0], [1.0, 0.0]]);
        assert!(matches!(
            decision_region(points.view(), |p| Ok(network.predict(p)?[0]), 10),
            Err(Error::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
        let wide = arr2(&[[0.0, 1.0, 2.0, 3.0]]);
        assert!(matches!(
            decision_region(wide.view(), |_| Ok(0.0), 10),
            Err(Error::UnsupportedDimensions(4))
        ));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let boundary = Boundary::Line {
            x: vec![0.0],
            y: vec![1.0],
        };
        let json = serde_json::to_value(&boundary).unwrap();
        assert_eq!("line", json["kind"]);
    }
}
