//! Put heterogeneous score components on a comparable scale.

const EPSILON: f64 = 1e-12;

/// z-score with population standard deviation. Fewer than three samples or
/// a degenerate spread fall back to [`min_max`].
pub fn standardize(values: &[f64]) -> Vec<f64> {
    if values.len() < 3 {
        return min_max(values);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();
    if !std.is_finite() || std < EPSILON {
        return min_max(values);
    }
    values.iter().map(|v| (v - mean) / std).collect()
}

/// Rescale to [0, 1]; all zeros when every value is equal.
pub fn min_max(values: &[f64]) -> Vec<f64> {
    let Some(min) = values.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let max = values.iter().copied().fold(min, f64::max);
    let span = max - min;
    if !span.is_finite() || span < EPSILON {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - min) / span).collect()
}
