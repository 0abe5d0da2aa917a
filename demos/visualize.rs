use ndarray::Array2;
use percept::{
    data, decision_boundary, decision_region, fit_network, fit_unit, metrics::success_rate, pca,
    project_for_display, Example, TrainingConfig, Unit, DEFAULT_RESOLUTION, REGION_RESOLUTION,
};
use serde_json::json;
use std::{env, fs};

// Usage: visualize <examples.json> [config.json]
// Examples use the `[{"data": [...], "label": 1}, ...]` layout.
fn main() -> percept::Result<()> {
    tracing_subscriber::fmt::init();

    let args = env::args().collect::<Vec<_>>();
    let examples_path = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("tests/fixtures/clusters.json");
    let examples =
        data::from_json_str(&fs::read_to_string(examples_path).expect("readable examples file"))?;
    let config = match args.get(2) {
        Some(path) => {
            TrainingConfig::from_json_str(&fs::read_to_string(path).expect("readable config file"))?
        }
        None => TrainingConfig::default(),
    };
    let mut rng = config.rng();

    let (train, test) = data::train_test_split(examples.clone(), 0.25, &mut rng);
    let width = examples[0].len();
    let mut unit = Unit::with_rng(width, config.learning_rate, &mut rng);
    let report = fit_unit(&mut unit, &train, config.epochs)?;
    let predicted = test
        .iter()
        .map(|e| unit.predict(e.view()).map(|p| p as i32))
        .collect::<percept::Result<Vec<_>>>()?;
    println!(
        "unit: {:?}, success on held-out data: {}%",
        report,
        success_rate(&data::labels(&test), &predicted)
    );

    let inputs = data::features(&train)?;
    let targets = Array2::from_shape_vec(
        (train.len(), 1),
        train.iter().map(|e| e.label() as f64).collect(),
    )
    .expect("one target per example");
    let network = fit_network(&config, inputs.view(), targets.view())?;
    let network_predicted = test
        .iter()
        .map(|e| network.predict(e.view()).map(|p| p[0] as i32))
        .collect::<percept::Result<Vec<_>>>()?;
    println!(
        "network: success on held-out data: {}%",
        success_rate(&data::labels(&test), &network_predicted)
    );

    // Retrain a 2D unit on the principal components so its boundary can be drawn.
    let projected = pca(&examples, 2)?;
    let reduced = projected
        .outer_iter()
        .zip(&examples)
        .map(|(row, e)| Example::new(row.to_vec(), e.label()))
        .collect::<Vec<_>>();
    let mut planar = Unit::with_rng(2, config.learning_rate, &mut rng);
    fit_unit(&mut planar, &reduced, config.epochs)?;
    let boundary = decision_boundary(
        projected.view(),
        planar.weights(),
        planar.bias(),
        DEFAULT_RESOLUTION,
    )?;

    // A network has no single hyperplane, so sample its outputs over the plot instead.
    let targets = Array2::from_shape_vec(
        (reduced.len(), 1),
        reduced.iter().map(|e| e.label() as f64).collect(),
    )
    .expect("one target per example");
    let planar_network = fit_network(&config, projected.view(), targets.view())?;
    let region = decision_region(
        projected.view(),
        |point| Ok(planar_network.predict(point)?[0]),
        REGION_RESOLUTION,
    )?;

    let scatter = project_for_display(&examples, &mut rng)?;
    println!(
        "{}",
        json!({
            "scatter": scatter,
            "pca": projected,
            "boundary": boundary,
            "network_region": region,
        })
    );
    Ok(())
}
