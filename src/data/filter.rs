use thiserror::Error;

use super::stats;

// ---------------------------------------------------------------------------
// User-facing query failures
// ---------------------------------------------------------------------------

/// Everything a range / percentile / threshold query can reject.
///
/// The display strings double as the dialog text shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Minimum value is greater than maximum value.")]
    InvertedRange,
    #[error("The value corresponding to the condition does not exist.")]
    NoMatchingValues,
    #[error("Percentiles must be in the range [0, 100].")]
    PercentileOutOfRange,
    #[error("Please enter a number between min range and max range.")]
    ReferenceOutOfRange,
}

// ---------------------------------------------------------------------------
// Range filter
// ---------------------------------------------------------------------------

/// Values of `values` within `[min, max]` inclusive, in their original
/// order. The input is never mutated.
pub fn filter_range(values: &[f64], min: f64, max: f64) -> Result<Vec<f64>, QueryError> {
    if min > max {
        return Err(QueryError::InvertedRange);
    }
    let selected: Vec<f64> = values
        .iter()
        .copied()
        .filter(|v| (min..=max).contains(v))
        .collect();
    if selected.is_empty() {
        return Err(QueryError::NoMatchingValues);
    }
    Ok(selected)
}

// ---------------------------------------------------------------------------
// Threshold ratio
// ---------------------------------------------------------------------------

/// Percentage of in-range values that are `>= reference`.
///
/// `reference` must itself lie within `[min, max]`.
pub fn threshold_ratio(
    values: &[f64],
    min: f64,
    max: f64,
    reference: f64,
) -> Result<f64, QueryError> {
    if !(min..=max).contains(&reference) {
        return Err(QueryError::ReferenceOutOfRange);
    }
    let mut in_range = 0_usize;
    let mut above = 0_usize;
    for &v in values {
        if (min..=max).contains(&v) {
            in_range += 1;
            if v >= reference {
                above += 1;
            }
        }
    }
    if in_range == 0 {
        return Err(QueryError::NoMatchingValues);
    }
    Ok(above as f64 / in_range as f64 * 100.0)
}

// ---------------------------------------------------------------------------
// Percentile query
// ---------------------------------------------------------------------------

/// The `p`-th percentile of `values`, rejecting `p` outside `[0, 100]`.
pub fn percentile_query(values: &[f64], p: f64) -> Result<f64, QueryError> {
    if !(0.0..=100.0).contains(&p) {
        return Err(QueryError::PercentileOutOfRange);
    }
    stats::percentile(values, p).ok_or(QueryError::NoMatchingValues)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_keeps_only_in_range_values() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let selected = filter_range(&values, 2.0, 4.0).unwrap();
        assert_eq!(selected, vec![2.0, 3.0, 4.0]);
        assert!(selected.len() <= values.len());
    }

    #[test]
    fn filter_bounds_are_inclusive() {
        let selected = filter_range(&[1.0, 2.0, 3.0], 1.0, 3.0).unwrap();
        assert_eq!(selected, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn filter_rejects_inverted_range() {
        assert_eq!(
            filter_range(&[1.0, 2.0], 5.0, 1.0),
            Err(QueryError::InvertedRange)
        );
    }

    #[test]
    fn filter_rejects_empty_selection() {
        assert_eq!(
            filter_range(&[1.0, 2.0], 10.0, 20.0),
            Err(QueryError::NoMatchingValues)
        );
    }

    #[test]
    fn ratio_at_minimum_is_hundred_percent() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let pct = threshold_ratio(&values, 1.0, 5.0, 1.0).unwrap();
        assert_eq!(pct, 100.0);
    }

    #[test]
    fn ratio_counts_values_at_or_above_reference() {
        // In [1, 5], values >= 4 are 4 and 5: 2 of 5.
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let pct = threshold_ratio(&values, 1.0, 5.0, 4.0).unwrap();
        assert!((pct - 40.0).abs() < 1e-12);
    }

    #[test]
    fn ratio_only_considers_in_range_values() {
        // Range [2, 4] keeps 2, 3, 4; of those, >= 3 are 3 and 4.
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let pct = threshold_ratio(&values, 2.0, 4.0, 3.0).unwrap();
        assert!((pct - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn ratio_rejects_reference_outside_range() {
        assert_eq!(
            threshold_ratio(&[1.0, 2.0], 1.0, 2.0, 5.0),
            Err(QueryError::ReferenceOutOfRange)
        );
    }

    #[test]
    fn ratio_rejects_empty_in_range_subset() {
        assert_eq!(
            threshold_ratio(&[1.0, 2.0], 10.0, 20.0, 15.0),
            Err(QueryError::NoMatchingValues)
        );
    }

    #[test]
    fn percentile_query_rejects_out_of_range_p() {
        assert_eq!(
            percentile_query(&[1.0, 2.0], 101.0),
            Err(QueryError::PercentileOutOfRange)
        );
        assert_eq!(
            percentile_query(&[1.0, 2.0], -1.0),
            Err(QueryError::PercentileOutOfRange)
        );
    }

    #[test]
    fn percentile_query_passes_through() {
        assert_eq!(percentile_query(&[1.0, 2.0, 3.0], 50.0), Ok(2.0));
    }
}
