use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot, VLine};

use crate::color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Histogram plot (central panel)
// ---------------------------------------------------------------------------

/// Render the histogram of the currently displayed sequence, plus the
/// threshold reference line when a ratio query is active.
pub fn histogram_plot(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.histogram else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a folder to view the histogram  (File → Open Folder…)");
        });
        return;
    };

    let hist = &view.histogram;
    let colors = color::bar_colors(view.role, hist.bin_count());

    let bars: Vec<Bar> = hist
        .counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            Bar::new(hist.center(i), count as f64)
                .width(hist.bin_width * 0.95)
                .fill(colors[i])
        })
        .collect();

    Plot::new("histogram")
        .x_axis_label("Pixel value")
        .y_axis_label("Count")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Pixel values"));

            if let Some(reference) = state.threshold_line {
                plot_ui.vline(
                    VLine::new(reference)
                        .color(color::threshold_color())
                        .width(1.5)
                        .name("Reference"),
                );
            }
        });
}
