// ---------------------------------------------------------------------------
// Adaptive histogram binning
// ---------------------------------------------------------------------------

/// Bin count for wide value ranges.
pub const DEFAULT_BIN_COUNT: usize = 20;
/// Below this span the bin count narrows to avoid sparse bins.
pub const NARROW_RANGE_SPAN: f64 = 100.0;
/// Target bin width for narrow ranges.
pub const NARROW_BIN_WIDTH: f64 = 5.0;

/// Binned frequency view of a value sequence.
///
/// Edges are evenly spaced across `[min, max]`; the maximum value counts
/// into the last bin. A zero-span sequence collapses to a single bin.
#[derive(Debug, Clone)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

/// Number of bins for a value span: 20 by default, `floor(span/5) + 1`
/// when the span is under 100 units.
pub fn bin_count_for_span(span: f64) -> usize {
    if span < NARROW_RANGE_SPAN {
        (span / NARROW_BIN_WIDTH).floor() as usize + 1
    } else {
        DEFAULT_BIN_COUNT
    }
}

impl Histogram {
    /// Bin `values`; `None` if empty.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let min = super::stats::min(values)?;
        let max = super::stats::max(values)?;
        let span = max - min;

        let bins = bin_count_for_span(span);
        let bin_width = if span > 0.0 { span / bins as f64 } else { 1.0 };

        let mut counts = vec![0_usize; bins];
        for &v in values {
            let idx = if span > 0.0 {
                (((v - min) / bin_width).floor() as usize).min(bins - 1)
            } else {
                0
            };
            counts[idx] += 1;
        }

        Some(Histogram {
            min,
            max,
            bin_width,
            counts,
        })
    }

    /// Number of bins.
    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    /// Centre of bin `i`, for bar placement.
    pub fn center(&self, i: usize) -> f64 {
        self.min + (i as f64 + 0.5) * self.bin_width
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_range_uses_default_bin_count() {
        assert_eq!(bin_count_for_span(100.0), DEFAULT_BIN_COUNT);
        assert_eq!(bin_count_for_span(5000.0), DEFAULT_BIN_COUNT);
    }

    #[test]
    fn narrow_range_narrows_bin_count() {
        assert_eq!(bin_count_for_span(99.9), 20);
        assert_eq!(bin_count_for_span(50.0), 11);
        assert_eq!(bin_count_for_span(4.0), 1);
        assert_eq!(bin_count_for_span(0.0), 1);
    }

    #[test]
    fn counts_cover_every_value() {
        let values: Vec<f64> = (0..=200).map(f64::from).collect();
        let hist = Histogram::from_values(&values).unwrap();
        assert_eq!(hist.bin_count(), DEFAULT_BIN_COUNT);
        assert_eq!(hist.counts.iter().sum::<usize>(), values.len());
    }

    #[test]
    fn maximum_value_lands_in_last_bin() {
        let values: Vec<f64> = (0..=200).map(f64::from).collect();
        let hist = Histogram::from_values(&values).unwrap();
        assert!(*hist.counts.last().unwrap() > 0);
    }

    #[test]
    fn zero_span_collapses_to_one_bin() {
        let hist = Histogram::from_values(&[3.0, 3.0, 3.0]).unwrap();
        assert_eq!(hist.bin_count(), 1);
        assert_eq!(hist.counts, vec![3]);
        assert_eq!(hist.bin_width, 1.0);
    }

    #[test]
    fn empty_input_has_no_histogram() {
        assert!(Histogram::from_values(&[]).is_none());
    }

    #[test]
    fn centers_sit_between_edges() {
        let values = [0.0, 10.0];
        let hist = Histogram::from_values(&values).unwrap();
        // span 10 → 3 bins of width 10/3
        assert_eq!(hist.bin_count(), 3);
        assert!((hist.center(0) - 10.0 / 6.0).abs() < 1e-12);
        assert!(hist.center(2) < 10.0);
    }
}
