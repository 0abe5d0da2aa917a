/// Fraction of positions where the predicted label `y_pred` equals the true label `y_true`.
pub fn accuracy<Label>(y_true: &[Label], y_pred: &[Label]) -> f64
where
    Label: PartialEq,
{
    if y_true.is_empty() {
        return 0.0;
    }
    let n_corrects = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();
    n_corrects as f64 / y_true.len() as f64
}

/// Accuracy as a percentage, the way the test panel reports it.
pub fn success_rate<Label>(y_true: &[Label], y_pred: &[Label]) -> f64
where
    Label: PartialEq,
{
    100.0 * accuracy(y_true, y_pred)
}

/// Construct confusion matrix from `y_true` and `y_pred`.
/// An item in i-th row and j-th column is the number of predicted j-th label where a true label is
/// i-th one.
pub fn confusion_matrix<Label>(
    y_true: &[Label],
    y_pred: &[Label],
    label_kinds: &[Label],
) -> Vec<Vec<usize>>
where
    Label: PartialEq,
{
    label_kinds
        .iter()
        .map(|true_label| {
            label_kinds
                .iter()
                .map(|pred_label| {
                    y_true
                        .iter()
                        .zip(y_pred.iter())
                        .filter(|(t, p)| *t == true_label && *p == pred_label)
                        .count()
                })
                .collect()
        })
        .collect()
}
