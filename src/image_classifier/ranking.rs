use crate::image_classifier::interface::Classification;

pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    if !max.is_finite() {
        return vec![0.0; scores.len()];
    }

    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();

    exps.iter().map(|e| e / sum).collect()
}

/// Pair scores with their labels, sort by descending confidence and keep the
/// best `top_k`. Ties keep the model's index order.
pub fn rank(scores: &[f32], labels: &[String], top_k: usize) -> Vec<Classification> {
    let mut predictions: Vec<(usize, f32)> = scores
        .iter()
        .cloned()
        .enumerate()
        .filter(|(_, score)| score.is_finite())
        .collect();

    predictions.sort_by(|a, b| b.1.total_cmp(&a.1));
    predictions.truncate(top_k);

    predictions
        .into_iter()
        .map(|(index, confidence)| {
            let label = labels
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("class_{}", index));
            Classification { label, confidence }
        })
        .collect()
}
