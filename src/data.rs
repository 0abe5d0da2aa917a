use ndarray::{Array2, ArrayView1};
use ndarray_rand::rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::{error::Result, linalg};

/// A labeled point. Labels follow the `{-1, +1}` convention of the step activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    data: Vec<f64>,
    label: i32,
}

impl Example {
    pub fn new(data: Vec<f64>, label: i32) -> Self {
        Self { data, label }
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(self.data.as_slice())
    }

    pub fn label(&self) -> i32 {
        self.label
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Parse examples in the `[{"data": [..], "label": 1}, ..]` layout.
pub fn from_json_str(json: &str) -> Result<Vec<Example>> {
    Ok(serde_json::from_str(json)?)
}

/// Feature matrix whose shape is (n_examples, n_features).
pub fn features(examples: &[Example]) -> Result<Array2<f64>> {
    linalg::stack_rows(examples.iter().map(Example::data))
}

pub fn labels(examples: &[Example]) -> Vec<i32> {
    examples.iter().map(Example::label).collect()
}

/// Split examples into train and test sets after shuffling them.
/// `test_ratio` is a ratio of the number of test examples to the whole set.
pub fn train_test_split<R>(
    examples: Vec<Example>,
    test_ratio: f64,
    rng: &mut R,
) -> (Vec<Example>, Vec<Example>)
where
    R: Rng + ?Sized,
{
    assert!((0.0..=1.0).contains(&test_ratio));

    let n_trains = (examples.len() as f64 * (1.0 - test_ratio)) as usize;
    let mut train = examples;
    train.shuffle(rng);
    let test = train.split_off(n_trains);
    (train, test)
}
