use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

use crate::color::HistogramRole;
use crate::data::filter;
use crate::data::histogram::Histogram;
use crate::data::loader;
use crate::data::model::PixelDataset;
use crate::data::stats::Summary;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

const SELECT_FOLDER_FIRST: &str = "Please select a folder first.";
const RANGE_NOT_NUMERIC: &str = "Enter a number in the min range and max range.";
const REFERENCE_NOT_NUMERIC: &str = "Please enter a number between min range and max range.";
const PERCENTILE_NOT_NUMERIC: &str = "Enter a number for the percentile.";
const NO_MATCHING_VALUES: &str = "The value corresponding to the condition does not exist.";

/// Which sequence percentile queries run against.
///
/// Full dataset by default; switches to the current selection after a
/// successful range filter, and back on every fresh folder load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PercentileScope {
    #[default]
    FullDataset,
    Selection,
}

/// The histogram currently on screen, with its colour role.
pub struct HistogramView {
    pub histogram: Histogram,
    pub role: HistogramRole,
}

/// A computed percentile readout: the requested `p` and its value.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PercentileResult {
    pub p: f64,
    pub value: f64,
}

/// The full UI state, independent of rendering.
///
/// Every user action is a method here: it parses the relevant input
/// fields, runs the query against the data layer, and either updates the
/// readouts or sets `error` for the modal dialog. Nothing retries; the
/// state stays consistent after any failure.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until the user picks a folder).
    pub dataset: Option<PixelDataset>,

    /// Folder the dataset was loaded from.
    pub source_dir: Option<PathBuf>,

    /// Current range-filtered subset, if any.
    pub selection: Option<Vec<f64>>,

    /// Target of percentile queries.
    pub percentile_scope: PercentileScope,

    /// Statistics currently displayed (full dataset or selection).
    pub summary: Option<Summary>,

    /// Histogram currently displayed.
    pub histogram: Option<HistogramView>,

    /// Reference line drawn over the histogram after a ratio query.
    pub threshold_line: Option<f64>,

    // -- editable numeric fields, parsed when an action fires --
    pub min_range_input: String,
    pub max_range_input: String,
    pub reference_input: String,
    pub percentile_input: String,

    // -- query readouts --
    pub percentile_result: Option<PercentileResult>,
    /// Percentage of in-range values at or above the reference.
    pub ratio_result: Option<f64>,

    // -- dialogs --
    pub error: Option<String>,
    pub show_info: bool,
}

impl AppState {
    /// Load a folder of ROI exports, replacing the dataset wholesale.
    pub fn load_directory(&mut self, dir: PathBuf) {
        match loader::load_directory(&dir) {
            Ok(dataset) => {
                if dataset.is_empty() {
                    self.error = Some(NO_MATCHING_VALUES.to_string());
                    return;
                }
                log::info!(
                    "Loaded {} pixel values from {} files in {}",
                    dataset.len(),
                    dataset.file_count(),
                    dir.display()
                );
                self.set_dataset(dir, dataset);
            }
            Err(e) => {
                log::error!("Failed to load folder: {e:#}");
                self.error = Some(format!("{e:#}"));
            }
        }
    }

    /// Ingest a freshly loaded dataset, resetting every derived readout.
    pub fn set_dataset(&mut self, dir: PathBuf, dataset: PixelDataset) {
        self.summary = Summary::from_values(&dataset.values);
        self.histogram = Histogram::from_values(&dataset.values).map(|histogram| HistogramView {
            histogram,
            role: HistogramRole::FullDataset,
        });

        let min = dataset.min().unwrap_or(0.0);
        let max = dataset.max().unwrap_or(0.0);
        self.min_range_input = format_number(min);
        self.max_range_input = format_number(max);
        self.reference_input = format_number(min);

        self.percentile_input.clear();
        self.percentile_result = None;
        self.percentile_scope = PercentileScope::FullDataset;
        self.ratio_result = None;
        self.threshold_line = None;
        self.selection = None;

        self.dataset = Some(dataset);
        self.source_dir = Some(dir);
        self.error = None;
    }

    /// Apply the `[min, max]` range filter and recompute the displayed
    /// statistics and histogram over the selection.
    pub fn apply_range_filter(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.error = Some(SELECT_FOLDER_FIRST.to_string());
            return;
        };
        let (Some(min_r), Some(max_r)) = (
            parse_field(&self.min_range_input),
            parse_field(&self.max_range_input),
        ) else {
            self.error = Some(RANGE_NOT_NUMERIC.to_string());
            return;
        };

        match filter::filter_range(&dataset.values, min_r, max_r) {
            Ok(selection) => {
                // A range that still covers the whole dataset keeps the
                // full-dataset colour.
                let covers_all = dataset.min().is_some_and(|lo| min_r <= lo)
                    && dataset.max().is_some_and(|hi| max_r >= hi);
                let role = if covers_all {
                    HistogramRole::FullDataset
                } else {
                    HistogramRole::Selection
                };

                let summary = Summary::from_values(&selection);
                if let Some(s) = &summary {
                    // Displayed bounds follow the values actually kept.
                    self.min_range_input = format_number(s.min);
                    self.max_range_input = format_number(s.max);
                    self.reference_input = format_number(s.min);
                }
                self.summary = summary;
                self.histogram = Histogram::from_values(&selection)
                    .map(|histogram| HistogramView { histogram, role });

                self.percentile_input.clear();
                self.percentile_result = None;
                self.percentile_scope = PercentileScope::Selection;
                self.ratio_result = None;
                self.threshold_line = None;
                self.selection = Some(selection);
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Compute the requested percentile against the active scope.
    pub fn compute_percentile(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.error = Some(SELECT_FOLDER_FIRST.to_string());
            return;
        };
        let Some(p) = parse_field(&self.percentile_input) else {
            self.error = Some(PERCENTILE_NOT_NUMERIC.to_string());
            return;
        };

        let values = match self.percentile_scope {
            PercentileScope::FullDataset => &dataset.values,
            PercentileScope::Selection => self.selection.as_deref().unwrap_or(&dataset.values),
        };
        match filter::percentile_query(values, p) {
            Ok(value) => self.percentile_result = Some(PercentileResult { p, value }),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Compute the fraction of in-range values at or above the reference.
    pub fn compute_threshold_ratio(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.error = Some(SELECT_FOLDER_FIRST.to_string());
            return;
        };
        let Some(reference) = parse_field(&self.reference_input) else {
            self.error = Some(REFERENCE_NOT_NUMERIC.to_string());
            return;
        };
        let (Some(min_r), Some(max_r)) = (
            parse_field(&self.min_range_input),
            parse_field(&self.max_range_input),
        ) else {
            self.error = Some(RANGE_NOT_NUMERIC.to_string());
            return;
        };

        match filter::threshold_ratio(&dataset.values, min_r, max_r, reference) {
            Ok(pct) => {
                self.ratio_result = Some(pct);
                self.threshold_line = Some(reference);
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Write the current statistics and query readouts as pretty JSON.
    pub fn export_report(&self, path: &Path) -> anyhow::Result<()> {
        let summary = self.summary.as_ref().context("no statistics to export")?;
        let dataset = self.dataset.as_ref().context("no dataset loaded")?;

        let report = StatisticsReport {
            source_dir: self
                .source_dir
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_default(),
            file_count: dataset.file_count(),
            scope: match self.percentile_scope {
                PercentileScope::FullDataset => "full-dataset",
                PercentileScope::Selection => "selection",
            },
            summary,
            percentile: self.percentile_result.as_ref(),
            threshold: self
                .threshold_line
                .zip(self.ratio_result)
                .map(|(reference, ratio_percent)| ThresholdReadout {
                    reference,
                    ratio_percent,
                }),
        };

        let json = serde_json::to_string_pretty(&report).context("serializing report")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Report export
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct StatisticsReport<'a> {
    source_dir: String,
    file_count: usize,
    scope: &'static str,
    summary: &'a Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    percentile: Option<&'a PercentileResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    threshold: Option<ThresholdReadout>,
}

#[derive(Serialize)]
struct ThresholdReadout {
    reference: f64,
    ratio_percent: f64,
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// Compact display for values that are usually integral pixel levels:
/// no decimals when whole, four places otherwise.
pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        format!("{v:.4}")
    }
}

fn parse_field(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
