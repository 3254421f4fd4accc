//! Linear fader.
//!
//! Vertical slider bound to one surface parameter. Unlike the knob there is
//! no pointer math: the control's reported position *is* the normalized
//! value, passed straight through [`Surface::set_dragged`].

use egui::{Response, Slider, Ui, Widget};
use fascia_core::{ParamIndex, Surface};

/// Default fader track length in points.
const DEFAULT_LENGTH: f32 = 96.0;

/// A vertical fader bound to a surface parameter.
pub struct Fader<'a> {
    surface: &'a mut Surface,
    idx: ParamIndex,
    label: &'a str,
    length: f32,
}

impl<'a> Fader<'a> {
    /// Bind a fader to `idx`, labeled below the track.
    pub fn new(surface: &'a mut Surface, idx: ParamIndex, label: &'a str) -> Self {
        Self {
            surface,
            idx,
            label,
            length: DEFAULT_LENGTH,
        }
    }

    /// Override the track length.
    pub fn length(mut self, length: f32) -> Self {
        self.length = length;
        self
    }
}

impl Widget for Fader<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let Self {
            surface,
            idx,
            label,
            length,
        } = self;
        surface.bind(idx);

        ui.vertical_centered(|ui| {
            ui.spacing_mut().slider_width = length;

            let mut value = surface.value(idx);
            let response = ui.add(
                Slider::new(&mut value, 0.0..=1.0)
                    .vertical()
                    .show_value(false),
            );

            if response.drag_started() {
                let y = response
                    .interact_pointer_pos()
                    .map_or(0.0, |pos| pos.y);
                surface.begin_drag(idx, y);
            }
            if response.changed() {
                surface.set_dragged(idx, value);
            }
            if response.drag_stopped() {
                surface.end_drag(idx);
            }

            ui.label(label);
            ui.small(surface.display_text(idx));

            response
        })
        .inner
    }
}
