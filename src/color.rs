use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Histogram colours
// ---------------------------------------------------------------------------

/// Which sequence the histogram currently shows.
///
/// The full dataset draws in indigo, a range-filtered selection in sea
/// green. A filter whose range covers the whole dataset still counts as
/// the full dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistogramRole {
    FullDataset,
    Selection,
}

impl HistogramRole {
    fn hue(self) -> f32 {
        match self {
            HistogramRole::FullDataset => 263.0,
            HistogramRole::Selection => 120.0,
        }
    }
}

/// One fill colour per bin: the role's hue with a subtle lightness ramp,
/// darkest on the left.
pub fn bar_colors(role: HistogramRole, n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let t = if n == 1 { 0.0 } else { i as f32 / (n - 1) as f32 };
            hsl_color(role.hue(), 0.45, 0.32 + 0.18 * t)
        })
        .collect()
}

/// Colour of the threshold reference line.
pub fn threshold_color() -> Color32 {
    hsl_color(195.0, 0.95, 0.55)
}

fn hsl_color(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_color_per_bin() {
        assert_eq!(bar_colors(HistogramRole::FullDataset, 20).len(), 20);
        assert!(bar_colors(HistogramRole::Selection, 0).is_empty());
    }

    #[test]
    fn ramp_brightens_to_the_right() {
        let colors = bar_colors(HistogramRole::FullDataset, 5);
        let brightness =
            |c: &Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(brightness(&colors[4]) > brightness(&colors[0]));
    }

    #[test]
    fn roles_use_distinct_hues() {
        let full = bar_colors(HistogramRole::FullDataset, 1);
        let selection = bar_colors(HistogramRole::Selection, 1);
        assert_ne!(full[0], selection[0]);
    }
}
