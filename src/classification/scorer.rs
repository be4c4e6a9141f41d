//! Log-space score normalization.
//!
//! Class scores are accumulated as sums of log probabilities; multiplying raw
//! probabilities would underflow for documents of moderate length. The
//! scores are turned into a distribution by subtracting the maximum before
//! exponentiating, so the largest term is always `exp(0) = 1`.

/// Convert log-scores into probabilities that sum to 1.
///
/// If every score is `-inf` the result is uniform. An empty input yields an
/// empty output.
///
/// # Examples
///
/// ```
/// use tweet_sentiment::classification::scorer::normalize_log_scores;
///
/// let probabilities = normalize_log_scores(&[-1000.0, -1000.0 + 2f64.ln()]);
/// assert!((probabilities[0] - 1.0 / 3.0).abs() < 1e-12);
/// assert!((probabilities[1] - 2.0 / 3.0).abs() < 1e-12);
/// ```
pub fn normalize_log_scores(log_scores: &[f64]) -> Vec<f64> {
    if log_scores.is_empty() {
        return Vec::new();
    }

    let max = log_scores
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    if max == f64::NEG_INFINITY {
        let uniform = 1.0 / log_scores.len() as f64;
        return vec![uniform; log_scores.len()];
    }

    let exponentiated: Vec<f64> = log_scores.iter().map(|score| (score - max).exp()).collect();
    let total: f64 = exponentiated.iter().sum();

    exponentiated.into_iter().map(|value| value / total).collect()
}

/// `ln(Σ exp(x))` computed without overflow.
pub fn log_sum_exp(log_scores: &[f64]) -> f64 {
    let max = log_scores
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }

    max + log_scores
        .iter()
        .map(|score| (score - max).exp())
        .sum::<f64>()
        .ln()
}

/// Index of the largest value; ties go to the lowest index.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &value) in values.iter().enumerate() {
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((idx, value)),
        }
    }
    best.map(|(idx, _)| idx)
}
