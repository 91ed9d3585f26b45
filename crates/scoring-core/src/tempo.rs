//! Tempo analyzer (C5): segments the timing residual between aligned
//! reference and played notes into piecewise-constant tempo sections, and
//! summarizes overall timing stability as a single scalar.

use crate::edit::TempoSection;

/// Configuration knobs for [`analyze_tempo`]. Defaults reproduce the
/// documented behavior exactly; callers tune these only to experiment
/// with segmentation sensitivity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempoParams {
    /// Lower bound on the smoothing window width.
    pub smoothing_window_floor: usize,
    /// Divisor applied to the residual count when sizing the smoothing
    /// window (`w = max(floor, |d| / divisor)`).
    pub smoothing_window_divisor: usize,
    /// Multiplier on the slope standard deviation used to set the
    /// change-point threshold.
    pub threshold_stddev_multiplier: f64,
    /// Lower bound on the minimum separation enforced between accepted
    /// change points.
    pub min_separation_floor: usize,
    /// Scale applied to the slope standard deviation to produce
    /// `unstable_rate`.
    pub unstable_rate_scale: f64,
}

impl Default for TempoParams {
    fn default() -> Self {
        Self {
            smoothing_window_floor: 3,
            smoothing_window_divisor: 20,
            threshold_stddev_multiplier: 2.0,
            min_separation_floor: 5,
            unstable_rate_scale: 1e4,
        }
    }
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

fn population_stddev(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let m = mean(xs);
    let variance = xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / xs.len() as f64;
    variance.sqrt()
}

/// Centered moving average with window `w`, truncating the window at
/// sequence boundaries rather than reflecting (one of the two boundary
/// treatments the spec allows). Output length equals input length.
fn moving_average(values: &[f64], w: usize) -> Vec<f64> {
    let half = w / 2;
    let n = values.len();
    (0..n)
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half).min(n.saturating_sub(1));
            let window = &values[start..=end];
            mean(window)
        })
        .collect()
}

/// Centered finite difference of `values` (the standard numerical
/// gradient): second-order accurate interior points, first-order
/// one-sided differences at the two endpoints. Step size is 1 (the
/// residuals are indexed by aligned-pair position, not by time).
fn gradient(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![0.0];
    }
    let mut out = vec![0.0; n];
    out[0] = values[1] - values[0];
    out[n - 1] = values[n - 1] - values[n - 2];
    for i in 1..n - 1 {
        out[i] = (values[i + 1] - values[i - 1]) / 2.0;
    }
    out
}

/// Greedily selects change-point indices from `candidates` (already in
/// ascending order), keeping a candidate only if it is at least
/// `min_separation` past the previously accepted one.
fn select_change_points(candidates: &[usize], min_separation: usize) -> Vec<usize> {
    let mut accepted = Vec::new();
    let mut last: Option<usize> = None;
    for &c in candidates {
        let far_enough = match last {
            Some(prev) => c.saturating_sub(prev) >= min_separation,
            None => true,
        };
        if far_enough {
            accepted.push(c);
            last = Some(c);
        }
    }
    accepted
}

/// Runs the tempo analysis over `aligned` pairs of `(reference_index,
/// played_index)`, using `actual_times`/`played_times` (the full,
/// preprocessed time arrays for each sequence) to compute residuals.
///
/// Returns `([], 0.0)` when fewer than two pairs are aligned — there is
/// nothing to fit a slope to.
pub fn analyze_tempo(
    actual_times: &[f64],
    played_times: &[f64],
    aligned: &[(usize, usize)],
    params: &TempoParams,
) -> (Vec<TempoSection>, f64) {
    if aligned.len() < 2 {
        return (Vec::new(), 0.0);
    }

    let residuals: Vec<f64> = aligned
        .iter()
        .map(|&(a, p)| actual_times[a] - played_times[p])
        .collect();

    let w = params
        .smoothing_window_floor
        .max(residuals.len() / params.smoothing_window_divisor.max(1));
    let smoothed = moving_average(&residuals, w);
    let slopes = gradient(&smoothed);

    let abs_slopes: Vec<f64> = slopes.iter().map(|s| s.abs()).collect();
    let threshold =
        mean(&abs_slopes) + params.threshold_stddev_multiplier * population_stddev(&abs_slopes);

    let candidates: Vec<usize> = abs_slopes
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s > threshold)
        .map(|(i, _)| i)
        .collect();

    let min_separation = params.min_separation_floor.max(w);
    let change_points = select_change_points(&candidates, min_separation);

    let mut starts = vec![0usize];
    starts.extend(change_points.iter().copied().filter(|&c| c > 0));
    starts.dedup();

    let mut sections = Vec::with_capacity(starts.len());
    for (idx, &start) in starts.iter().enumerate() {
        let end_exclusive = starts.get(idx + 1).copied().unwrap_or(slopes.len());
        let tempo = mean(&slopes[start..end_exclusive]);
        let start_index = aligned[start].0;
        let end_index = match starts.get(idx + 1) {
            Some(&next_start) => aligned[next_start].0,
            None => aligned[aligned.len() - 1].0,
        };
        let end_index = if end_index > start_index {
            end_index
        } else {
            start_index + 1
        };
        sections.push(TempoSection {
            start_index,
            end_index,
            tempo,
        });
    }

    let unstable_rate = population_stddev(&abs_slopes) * params.unstable_rate_scale;
    (sections, unstable_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fewer_than_two_pairs_returns_empty() {
        let (sections, rate) = analyze_tempo(&[0.0], &[0.0], &[(0, 0)], &TempoParams::default());
        assert!(sections.is_empty());
        assert_eq!(rate, 0.0);
    }

    #[test]
    fn constant_tempo_yields_stable_single_section() {
        // Perfectly synced performance: residual is always zero.
        let times: Vec<f64> = (0..30).map(|i| i as f64 * 0.5).collect();
        let aligned: Vec<(usize, usize)> = (0..30).map(|i| (i, i)).collect();
        let (sections, rate) = analyze_tempo(&times, &times, &aligned, &TempoParams::default());
        assert!(!sections.is_empty());
        assert!(rate.abs() < 1e-6);
    }

    #[test]
    fn sections_partition_contiguously_in_order() {
        let actual: Vec<f64> = (0..40).map(|i| i as f64 * 0.5).collect();
        // Performer speeds up halfway through: residual slope changes.
        let played: Vec<f64> = (0..40)
            .map(|i| if i < 20 { i as f64 * 0.5 } else { 10.0 + (i - 20) as f64 * 0.3 })
            .collect();
        let aligned: Vec<(usize, usize)> = (0..40).map(|i| (i, i)).collect();
        let (sections, _) = analyze_tempo(&actual, &played, &aligned, &TempoParams::default());

        for w in sections.windows(2) {
            assert_eq!(w[0].end_index, w[1].start_index);
        }
        for s in &sections {
            assert!(s.start_index < s.end_index);
        }
    }
}
