//! Rotary parameter knob.
//!
//! Vertical-drag rotary control bound to one surface parameter. The pointer
//! math and the outbound traffic live in `fascia-core`
//! ([`Surface::drag_to`]); this widget feeds it pointer positions and paints
//! the result. egui keeps pointer capture for the duration of a drag, so the
//! gesture survives the pointer leaving the widget bounds.

use egui::{CursorIcon, Response, Sense, Stroke, Ui, Vec2, Widget};
use fascia_core::{knob_angle, ParamIndex, Surface};

use crate::style;

/// Default knob face diameter in points.
const DEFAULT_DIAMETER: f32 = 48.0;

/// A rotary knob bound to a surface parameter.
///
/// ```ignore
/// ui.add(Knob::new(&mut surface, poly_params::CUTOFF, "Cutoff"));
/// ```
pub struct Knob<'a> {
    surface: &'a mut Surface,
    idx: ParamIndex,
    label: &'a str,
    diameter: f32,
}

impl<'a> Knob<'a> {
    /// Bind a knob to `idx`, labeled below the face.
    pub fn new(surface: &'a mut Surface, idx: ParamIndex, label: &'a str) -> Self {
        Self {
            surface,
            idx,
            label,
            diameter: DEFAULT_DIAMETER,
        }
    }

    /// Override the face diameter.
    pub fn diameter(mut self, diameter: f32) -> Self {
        self.diameter = diameter;
        self
    }
}

impl Widget for Knob<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let Self {
            surface,
            idx,
            label,
            diameter,
        } = self;
        surface.bind(idx);

        ui.vertical_centered(|ui| {
            let (rect, response) =
                ui.allocate_exact_size(Vec2::splat(diameter), Sense::drag());

            if response.drag_started() {
                if let Some(pos) = response.interact_pointer_pos() {
                    surface.begin_drag(idx, pos.y);
                }
            }
            if response.dragged() {
                if let Some(pos) = response.interact_pointer_pos() {
                    surface.drag_to(idx, pos.y);
                }
            }
            if response.drag_stopped() {
                surface.end_drag(idx);
            }

            let value = surface.value(idx);
            if ui.is_rect_visible(rect) {
                let painter = ui.painter();
                let center = rect.center();
                let radius = diameter * 0.5;
                let rim = ui.style().interact(&response).fg_stroke;

                painter.circle(center, radius - 1.0, style::KNOB_FACE, rim);

                // Indicator line from the hub toward the rim; the sweep runs
                // -135 deg (value 0) to +135 deg (value 1), zero at 12 o'clock.
                let angle = (knob_angle(value) - 90.0).to_radians();
                let direction = Vec2::angled(angle);
                painter.line_segment(
                    [
                        center + direction * (radius * 0.35),
                        center + direction * (radius * 0.85),
                    ],
                    Stroke::new(2.0, style::ACCENT),
                );
            }

            ui.label(label);
            ui.small(surface.display_text(idx));

            response.on_hover_cursor(CursorIcon::ResizeVertical)
        })
        .inner
    }
}
