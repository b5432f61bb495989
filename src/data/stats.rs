use serde::Serialize;

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------
//
// All functions return `None` instead of a sentinel value when the
// statistic is undefined for the input. Inputs are expected to be finite
// (the loader drops NaN/Inf cells at ingestion).

/// Arithmetic mean, via Neumaier compensated summation.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Population standard deviation (n denominator), two-pass.
pub fn population_std_dev(data: &[f64]) -> Option<f64> {
    let m = mean(data)?;
    let n = data.len() as f64;
    let sum2: f64 = data.iter().map(|&x| (x - m) * (x - m)).sum();
    Some((sum2 / n).sqrt())
}

/// Smallest value.
pub fn min(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::min)
}

/// Largest value.
pub fn max(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::max)
}

/// Median without mutating the input.
pub fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    median_sorted(&sorted)
}

/// Median of pre-sorted data.
fn median_sorted(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// Most frequent value and its occurrence count.
///
/// Ties break towards the smaller value: counts are scanned in ascending
/// value order and only a strictly greater count replaces the candidate.
pub fn mode(data: &[f64]) -> Option<(f64, usize)> {
    if data.is_empty() {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    mode_from_counts(&value_counts(&sorted))
}

fn mode_from_counts(counts: &[(f64, usize)]) -> Option<(f64, usize)> {
    let mut best: Option<(f64, usize)> = None;
    for &(value, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((value, count)),
        }
    }
    best
}

/// Run-length counts over pre-sorted data, in ascending value order.
fn value_counts(sorted: &[f64]) -> Vec<(f64, usize)> {
    let mut counts: Vec<(f64, usize)> = Vec::new();
    for &v in sorted {
        match counts.last_mut() {
            Some((value, count)) if *value == v => *count += 1,
            _ => counts.push((v, 1)),
        }
    }
    counts
}

/// The `p`-th percentile for `p` in `[0, 100]`, by linear interpolation
/// between order statistics (the NumPy default method).
pub fn percentile(data: &[f64], p: f64) -> Option<f64> {
    if data.is_empty() || !(0.0..=100.0).contains(&p) {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    let n = sorted.len();
    if n == 1 {
        return Some(sorted[0]);
    }
    let h = (n - 1) as f64 * (p / 100.0);
    let j = h.floor() as usize;
    let g = h - h.floor();
    if j + 1 >= n {
        Some(sorted[n - 1])
    } else {
        Some((1.0 - g) * sorted[j] + g * sorted[j + 1])
    }
}

/// Biased sample skewness `g1 = m3 / m2^(3/2)`.
///
/// Undefined (and `None`) for fewer than two values or zero variance.
pub fn skewness(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let m = kahan_sum(data) / nf;
    let mut sum2 = 0.0;
    let mut sum3 = 0.0;
    for &x in data {
        let d = x - m;
        let d2 = d * d;
        sum2 += d2;
        sum3 += d2 * d;
    }
    let m2 = sum2 / nf;
    if m2 == 0.0 {
        return None;
    }
    Some((sum3 / nf) / m2.powf(1.5))
}

/// Biased excess kurtosis `g2 = m4 / m2² − 3`.
///
/// Undefined (and `None`) for fewer than two values or zero variance.
pub fn kurtosis(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let m = kahan_sum(data) / nf;
    let mut sum2 = 0.0;
    let mut sum4 = 0.0;
    for &x in data {
        let d = x - m;
        let d2 = d * d;
        sum2 += d2;
        sum4 += d2 * d2;
    }
    let m2 = sum2 / nf;
    if m2 == 0.0 {
        return None;
    }
    Some((sum4 / nf) / (m2 * m2) - 3.0)
}

/// Shannon entropy of the empirical value distribution, natural log.
///
/// The probability mass function is built from exact value frequencies,
/// not bins. A single distinct value has entropy 0.
pub fn entropy(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    Some(entropy_from_counts(&value_counts(&sorted), data.len()))
}

fn entropy_from_counts(counts: &[(f64, usize)], total: usize) -> f64 {
    if counts.len() == 1 {
        return 0.0;
    }
    let n = total as f64;
    counts
        .iter()
        .map(|&(_, count)| {
            let p = count as f64 / n;
            -p * p.ln()
        })
        .sum()
}

/// Neumaier compensated summation, O(ε) error independent of length.
fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

// ---------------------------------------------------------------------------
// Summary – everything the stats panel displays
// ---------------------------------------------------------------------------

/// Descriptive statistics over one value sequence.
///
/// `None` fields mark statistics that are undefined for the input: the
/// standard deviation of a single value, skewness/kurtosis of constant
/// data. The UI renders them as "undefined".
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: Option<f64>,
    pub median: Option<f64>,
    pub mode: f64,
    pub mode_count: usize,
    pub min: f64,
    pub max: f64,
    pub skewness: Option<f64>,
    pub kurtosis: Option<f64>,
    pub entropy: f64,
}

impl Summary {
    /// Compute all statistics over `values`; `None` if empty.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_unstable_by(f64::total_cmp);
        let counts = value_counts(&sorted);
        let (mode, mode_count) = mode_from_counts(&counts)?;

        Some(Summary {
            count: values.len(),
            mean: mean(values)?,
            // A single value has no spread to report.
            std_dev: if values.len() == 1 {
                None
            } else {
                population_std_dev(values)
            },
            median: median_sorted(&sorted),
            mode,
            mode_count,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            skewness: skewness(values),
            kurtosis: kurtosis(values),
            entropy: entropy_from_counts(&counts, values.len()),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_basic() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(3.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn population_std_dev_known_value() {
        // np.std([2, 4, 4, 4, 5, 5, 7, 9]) == 2.0
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((population_std_dev(&v).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn mode_counts_occurrences() {
        assert_eq!(mode(&[1.0, 2.0, 2.0, 3.0, 2.0]), Some((2.0, 3)));
    }

    #[test]
    fn mode_tie_breaks_to_smaller_value() {
        assert_eq!(mode(&[5.0, 5.0, 1.0, 1.0, 3.0]), Some((1.0, 2)));
    }

    #[test]
    fn percentile_extremes_are_min_max() {
        let data = [3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(percentile(&data, 0.0), Some(1.0));
        assert_eq!(percentile(&data, 100.0), Some(5.0));
    }

    #[test]
    fn percentile_interpolates() {
        // h = 3 * 0.25 = 0.75 → 0.25*1 + 0.75*2 = 1.75
        let data = [1.0, 2.0, 3.0, 4.0];
        assert!((percentile(&data, 25.0).unwrap() - 1.75).abs() < 1e-15);
        assert_eq!(percentile(&data, 50.0), Some(2.5));
    }

    #[test]
    fn percentile_rejects_out_of_range_p() {
        assert_eq!(percentile(&[1.0, 2.0], -0.1), None);
        assert_eq!(percentile(&[1.0, 2.0], 100.1), None);
    }

    #[test]
    fn percentile_single_value() {
        assert_eq!(percentile(&[42.0], 0.0), Some(42.0));
        assert_eq!(percentile(&[42.0], 73.5), Some(42.0));
    }

    #[test]
    fn skewness_symmetric_is_zero() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!(skewness(&data).unwrap().abs() < 1e-14);
    }

    #[test]
    fn skewness_sign_follows_tail() {
        assert!(skewness(&[1.0, 2.0, 3.0, 4.0, 50.0]).unwrap() > 0.0);
        assert!(skewness(&[-50.0, 1.0, 2.0, 3.0, 4.0]).unwrap() < 0.0);
    }

    #[test]
    fn skewness_kurtosis_undefined_for_constant_data() {
        assert_eq!(skewness(&[5.0, 5.0, 5.0]), None);
        assert_eq!(kurtosis(&[5.0, 5.0, 5.0]), None);
        assert_eq!(skewness(&[1.0]), None);
        assert_eq!(kurtosis(&[1.0]), None);
    }

    #[test]
    fn kurtosis_known_value() {
        // scipy.stats.kurtosis([1, 2, 3, 4, 5]) == -1.3
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((kurtosis(&data).unwrap() - (-1.3)).abs() < 1e-12);
    }

    #[test]
    fn entropy_constant_is_zero() {
        let e = entropy(&[7.0, 7.0, 7.0, 7.0]).unwrap();
        assert_eq!(e, 0.0);
    }

    #[test]
    fn entropy_uniform_is_ln_n() {
        let e = entropy(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((e - 4.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn summary_over_known_sequence() {
        let s = Summary::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(s.count, 5);
        assert_eq!(s.mean, 3.0);
        assert_eq!(s.median, Some(3.0));
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 5.0);
        assert_eq!((s.mode, s.mode_count), (1.0, 1));
        assert!(s.std_dev.is_some());
    }

    #[test]
    fn summary_single_value_has_undefined_std_dev() {
        let s = Summary::from_values(&[9.0]).unwrap();
        assert_eq!(s.count, 1);
        assert_eq!(s.std_dev, None);
        assert_eq!(s.median, Some(9.0));
        assert_eq!(s.entropy, 0.0);
    }

    #[test]
    fn summary_empty_is_none() {
        assert!(Summary::from_values(&[]).is_none());
    }
}
