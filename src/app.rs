use eframe::egui::{self, Key, KeyboardShortcut, Modifiers};

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// Keyboard accelerators, matching the button labels in the side panel.
pub const OPEN_FOLDER: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::O);
pub const SHOW_INFO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::I);
pub const APPLY_FILTER: KeyboardShortcut = KeyboardShortcut::new(Modifiers::ALT, Key::C);
pub const PERCENTILE: KeyboardShortcut = KeyboardShortcut::new(Modifiers::ALT, Key::N);
pub const PIXEL_RATIO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::ALT, Key::R);

pub struct RoiScopeApp {
    pub state: AppState,
}

impl Default for RoiScopeApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for RoiScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: statistics & queries ----
        egui::SidePanel::left("stats_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: histogram ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::histogram_plot(ui, &self.state);
        });

        // ---- Modal dialogs on top of everything ----
        panels::dialogs(ctx, &mut self.state);
    }
}

impl RoiScopeApp {
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.input_mut(|i| i.consume_shortcut(&OPEN_FOLDER)) {
            panels::open_folder_dialog(&mut self.state);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&SHOW_INFO)) {
            self.state.show_info = true;
        }
        if ctx.input_mut(|i| i.consume_shortcut(&APPLY_FILTER)) {
            self.state.apply_range_filter();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&PERCENTILE)) {
            self.state.compute_percentile();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&PIXEL_RATIO)) {
            self.state.compute_threshold_ratio();
        }
    }
}
