/// Presentation layer: panels, dialogs, and the histogram plot.
pub mod panels;
pub mod plot;
