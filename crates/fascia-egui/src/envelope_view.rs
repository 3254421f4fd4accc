//! ADSR envelope display.
//!
//! Strokes the polyline computed by [`EnvelopeShape::points`] and fills the
//! area below it at low opacity. The geometry is recomputed from the
//! allocated rect every frame, so value changes and resizes both redraw for
//! free. With no shape (no ADSR sources declared) the widget draws nothing.

use egui::{pos2, Pos2, Response, Sense, Shape, Stroke, Ui, Vec2, Widget};
use fascia_core::EnvelopeShape;

use crate::style;

/// Default display height in points.
const DEFAULT_HEIGHT: f32 = 110.0;

/// Read-only view of an amplitude envelope.
pub struct EnvelopeView {
    shape: Option<EnvelopeShape>,
    height: f32,
}

impl EnvelopeView {
    /// Display the given shape; `None` allocates the space but draws nothing.
    pub fn new(shape: Option<EnvelopeShape>) -> Self {
        Self {
            shape,
            height: DEFAULT_HEIGHT,
        }
    }

    /// Override the display height.
    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }
}

impl Widget for EnvelopeView {
    fn ui(self, ui: &mut Ui) -> Response {
        let width = ui.available_width();
        let (rect, response) =
            ui.allocate_exact_size(Vec2::new(width, self.height), Sense::hover());

        let Some(shape) = self.shape else {
            return response;
        };
        if !ui.is_rect_visible(rect) {
            return response;
        }

        let points = shape.points(f64::from(rect.width()), f64::from(rect.height()));
        let to_screen =
            |(x, y): (f64, f64)| rect.min + Vec2::new(x as f32, y as f32);

        // Fill the area under the curve. The region is x-monotone, so each
        // polyline segment closes into a convex trapezoid against the
        // baseline; filling them side by side covers the whole area.
        let baseline = rect.bottom();
        for segment in points.windows(2) {
            let a = to_screen(segment[0]);
            let b = to_screen(segment[1]);
            if b.x - a.x < f32::EPSILON {
                continue;
            }
            let mut quad: Vec<Pos2> = vec![pos2(a.x, baseline)];
            if a.y < baseline {
                quad.push(a);
            }
            if b.y < baseline {
                quad.push(b);
            }
            quad.push(pos2(b.x, baseline));
            if quad.len() >= 3 {
                ui.painter()
                    .add(Shape::convex_polygon(quad, style::envelope_fill(), Stroke::NONE));
            }
        }

        ui.painter().add(Shape::line(
            points.iter().copied().map(to_screen).collect(),
            Stroke::new(2.0, style::ACCENT),
        ));

        response
    }
}
