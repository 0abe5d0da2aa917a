use approx::assert_relative_eq;
use csv::Reader;
use ndarray::{arr1, Array2};
use ndarray_rand::rand::{rngs::StdRng, SeedableRng};
use percept::{data, fit_unit, metrics::accuracy, Example, Layer, Network, Unit};
use std::path::Path;

// Columns: x1, x2, and, or.
fn load_gates(file_path: impl AsRef<Path>) -> (Vec<Example>, Vec<Example>) {
    let mut reader = Reader::from_path(file_path).unwrap();
    let mut and = Vec::new();
    let mut or = Vec::new();
    for row in reader.records() {
        let row = row.unwrap();
        let inputs = row
            .iter()
            .take(2)
            .map(|v| v.parse().unwrap())
            .collect::<Vec<f64>>();
        and.push(Example::new(inputs.clone(), row[2].parse().unwrap()));
        or.push(Example::new(inputs, row[3].parse().unwrap()));
    }
    (and, or)
}

fn fixture() -> (Vec<Example>, Vec<Example>) {
    load_gates(Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/gates.csv"))
}

fn predictions(unit: &Unit, examples: &[Example]) -> Vec<i32> {
    examples
        .iter()
        .map(|e| unit.predict(e.view()).unwrap() as i32)
        .collect()
}

#[test]
fn seeded_units_learn_and_and_or_within_ten_epochs() {
    let (and, or) = fixture();
    for seed in 0..32 {
        for examples in [&and, &or] {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut unit = Unit::with_rng(2, 1.0, &mut rng);
            let errors = (0..10)
                .map(|_| unit.train_network(examples).unwrap())
                .collect::<Vec<_>>();
            assert!(errors.contains(&0.0), "seed {}: {:?}", seed, errors);
            assert_relative_eq!(
                1.0,
                accuracy(&data::labels(examples), &predictions(&unit, examples))
            );
        }
    }
}

#[test]
fn fit_unit_signals_convergence() {
    let (and, _) = fixture();
    let mut unit = Unit::with_weights(arr1(&[0.0, 0.0]), 0.0, 1.0);
    let report = fit_unit(&mut unit, &and, 100).unwrap();
    assert!(report.converged);
    assert!(report.epochs <= 10);
}

#[test]
fn single_unit_network_learns_and_with_gated_rule() {
    // One unit, one layer: the gated rule only moves the unit while it fires.
    let (and, _) = fixture();
    let unit = Unit::with_weights(arr1(&[0.5, 0.5]), 0.5, 1.0);
    let mut network =
        Network::from_layers(vec![Layer::from_units(vec![unit]).unwrap()]).unwrap();

    let inputs = data::features(&and).unwrap();
    let targets = Array2::from_shape_vec(
        (and.len(), 1),
        and.iter().map(|e| e.label() as f64).collect(),
    )
    .unwrap();
    network.train(inputs.view(), targets.view(), 0.5, 20).unwrap();

    let outputs = and
        .iter()
        .map(|e| network.predict(e.view()).unwrap()[0] as i32)
        .collect::<Vec<_>>();
    assert_eq!(data::labels(&and), outputs);
}
