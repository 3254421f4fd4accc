//! Shared surface colors.

use egui::Color32;

/// Accent color for indicators, strokes, and the envelope outline.
pub const ACCENT: Color32 = Color32::from_rgb(0, 123, 255);

/// Translucent accent used to fill the area under the envelope curve.
pub fn envelope_fill() -> Color32 {
    Color32::from_rgba_unmultiplied(0, 123, 255, 26)
}

/// Background of an idle knob face.
pub const KNOB_FACE: Color32 = Color32::from_rgb(42, 46, 54);

/// Key fill colors for the virtual keyboard.
pub const WHITE_KEY: Color32 = Color32::from_rgb(235, 235, 235);
pub const BLACK_KEY: Color32 = Color32::from_rgb(25, 25, 28);
