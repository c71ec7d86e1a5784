//! Centered moving-average smoothing.

/// Smooth a series with a centered window of `radius` samples on each side
///
/// Windows are clipped at both ends of the series, so edge points average
/// fewer samples. A radius of 0 returns the input values unchanged.
pub fn smooth(values: &[f64], radius: usize) -> Vec<f64> {
    if radius < 1 || values.is_empty() {
        return values.to_vec();
    }

    let last = values.len() - 1;
    (0..values.len())
        .map(|i| {
            let bot = i.saturating_sub(radius);
            let top = i.saturating_add(radius).min(last);
            let window = &values[bot..=top];
            window.iter().sum::<f64>() / window.len() as f64
        })
        .collect()
}
