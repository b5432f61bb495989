use eframe::egui::{self, Ui};

use crate::state::{format_number, AppState, PercentileScope};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open Folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            let can_export = state.summary.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export Statistics…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.menu_button("Help", |ui: &mut Ui| {
            if ui.button("Info").clicked() {
                state.show_info = true;
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(dir) = &state.source_dir {
            ui.label(dir.display().to_string());
        }
        if let Some(ds) = &state.dataset {
            ui.separator();
            ui.label(format!(
                "{} files, {} pixel values",
                ds.file_count(),
                ds.len()
            ));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – statistics & query widgets
// ---------------------------------------------------------------------------

/// Render the statistics panel with the range, percentile, and ratio
/// query controls.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading("Basic Statistics");
    ui.separator();

    // Clone the readouts so the query widgets below can borrow mutably.
    let Some(summary) = state.summary.clone() else {
        ui.label("No folder loaded.  (File → Open Folder…)");
        return;
    };
    let file_count = state.dataset.as_ref().map_or(0, |ds| ds.file_count());

    egui::Grid::new("stats_grid")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            stat_row(ui, "# of Files", file_count.to_string());
            stat_row(ui, "# of Pixels", summary.count.to_string());
            stat_row(ui, "Mean", format!("{:.4}", summary.mean));
            stat_row(ui, "Std Deviation", undefined_or(summary.std_dev));
            stat_row(
                ui,
                "Median",
                summary
                    .median
                    .map(format_number)
                    .unwrap_or_else(|| "undefined".into()),
            );
            stat_row(
                ui,
                "Mode (Count)",
                format!("{} ({})", format_number(summary.mode), summary.mode_count),
            );
            stat_row(ui, "Minimum", format_number(summary.min));
            stat_row(ui, "Maximum", format_number(summary.max));
            stat_row(ui, "Skewness", undefined_or(summary.skewness));
            stat_row(ui, "Kurtosis", undefined_or(summary.kurtosis));
            stat_row(ui, "Entropy", format!("{:.4}", summary.entropy));
        });

    // ---- Range filter ----
    ui.add_space(10.0);
    ui.heading("Range Filter");
    ui.separator();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Min");
        ui.add(egui::TextEdit::singleline(&mut state.min_range_input).desired_width(70.0));
        ui.label("Max");
        ui.add(egui::TextEdit::singleline(&mut state.max_range_input).desired_width(70.0));
    });
    if ui.button("Calculate").clicked() {
        state.apply_range_filter();
    }

    // ---- Percentile query ----
    ui.add_space(10.0);
    ui.heading("Percentile");
    ui.separator();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("n%");
        ui.add(egui::TextEdit::singleline(&mut state.percentile_input).desired_width(60.0));
        if ui.button("Compute").clicked() {
            state.compute_percentile();
        }
    });
    let scope_label = match state.percentile_scope {
        PercentileScope::FullDataset => "of full dataset",
        PercentileScope::Selection => "of selection",
    };
    match state.percentile_result {
        Some(result) => {
            ui.label(format!(
                "P{} = {}  ({scope_label})",
                format_number(result.p),
                format_number(result.value)
            ));
        }
        None => {
            ui.weak(format!("computes {scope_label}"));
        }
    }

    // ---- Threshold ratio ----
    ui.add_space(10.0);
    ui.heading("Pixel Ratio");
    ui.separator();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Pixel value");
        ui.add(egui::TextEdit::singleline(&mut state.reference_input).desired_width(70.0));
        if ui.button("Calculate ratio").clicked() {
            state.compute_threshold_ratio();
        }
    });
    if let Some(pct) = state.ratio_result {
        ui.label(format!("{pct:.2}% of in-range pixels >= reference"));
    }
}

fn stat_row(ui: &mut Ui, label: &str, value: String) {
    ui.label(label);
    ui.monospace(value);
    ui.end_row();
}

fn undefined_or(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.4}"))
        .unwrap_or_else(|| "undefined".into())
}

// ---------------------------------------------------------------------------
// Modal dialogs
// ---------------------------------------------------------------------------

/// Render the error and info dialogs on top of everything else.
pub fn dialogs(ctx: &egui::Context, state: &mut AppState) {
    let mut dismissed = false;
    if let Some(message) = &state.error {
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui: &mut Ui| {
                ui.label(message);
                ui.add_space(6.0);
                ui.vertical_centered(|ui: &mut Ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });
    }
    if dismissed {
        state.error = None;
    }

    let mut show_info = state.show_info;
    if show_info {
        egui::Window::new("Information")
            .open(&mut show_info)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui: &mut Ui| {
                info_contents(ui, ctx);
            });
    }
    state.show_info = show_info;
}

fn info_contents(ui: &mut Ui, ctx: &egui::Context) {
    ui.label(format!("ROI Scope {}", env!("CARGO_PKG_VERSION")));
    ui.label("Pixel statistics for folders of ROI exports.");
    ui.add_space(8.0);
    ui.strong("Keyboard shortcuts");
    egui::Grid::new("shortcut_grid")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            shortcut_row(ui, ctx, &crate::app::OPEN_FOLDER, "Open folder");
            shortcut_row(ui, ctx, &crate::app::SHOW_INFO, "Show this window");
            shortcut_row(ui, ctx, &crate::app::APPLY_FILTER, "Apply range filter");
            shortcut_row(ui, ctx, &crate::app::PERCENTILE, "Compute percentile");
            shortcut_row(ui, ctx, &crate::app::PIXEL_RATIO, "Compute pixel ratio");
        });
}

fn shortcut_row(
    ui: &mut Ui,
    ctx: &egui::Context,
    shortcut: &egui::KeyboardShortcut,
    description: &str,
) {
    ui.monospace(ctx.format_shortcut(shortcut));
    ui.label(description);
    ui.end_row();
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

/// Pick a folder of ROI exports and load it. Cancelling is a no-op.
pub fn open_folder_dialog(state: &mut AppState) {
    let mut dialog = rfd::FileDialog::new().set_title("Open ROI folder");
    if let Some(dir) = &state.source_dir {
        dialog = dialog.set_directory(dir);
    }

    if let Some(dir) = dialog.pick_folder() {
        state.load_directory(dir);
    }
}

/// Pick a destination and write the statistics report.
pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export statistics")
        .set_file_name("roi_statistics.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match state.export_report(&path) {
            Ok(()) => log::info!("Exported statistics to {}", path.display()),
            Err(e) => {
                log::error!("Failed to export statistics: {e:#}");
                state.error = Some(format!("{e:#}"));
            }
        }
    }
}
