//! Command pads: demo/preset buttons and the virtual keyboard.
//!
//! Everything here is fire-and-forget: the pads transmit opaque action tags
//! through the surface and keep only enough local state to highlight the
//! active demo or the held key.

use egui::{pos2, Rect, Response, Sense, Stroke, Ui, Vec2};
use fascia_core::{tag, Surface};

use crate::style;

/// Which demo sequence the host is currently running, as far as the surface
/// knows. The host does not acknowledge, so this is display state only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DemoMode {
    Mono,
    Poly,
    Fx,
}

/// Demo and preset command buttons.
#[derive(Debug, Default)]
pub struct DemoPad {
    active: Option<DemoMode>,
}

impl DemoPad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the pad and transmit any clicked commands.
    pub fn ui(&mut self, ui: &mut Ui, surface: &Surface) {
        for (label, mode, msg_tag) in [
            ("Demo Mono", DemoMode::Mono, tag::DEMO_MONO),
            ("Demo Poly", DemoMode::Poly, tag::DEMO_POLY),
            ("FX Demo", DemoMode::Fx, tag::FX_DEMO),
        ] {
            let selected = self.active == Some(mode);
            if ui.selectable_label(selected, label).clicked() {
                // The same tag starts and stops a demo; the host toggles.
                self.active = if selected { None } else { Some(mode) };
                surface.send_action(msg_tag);
            }
        }

        ui.separator();

        if ui.button("Save Preset").clicked() {
            surface.send_action(tag::SAVE_PRESET);
        }
        if ui.button("Load Preset").clicked() {
            surface.send_action(tag::LOAD_PRESET);
        }

        ui.separator();

        for (label, msg_tag) in [
            ("Warm Pad", tag::FACTORY_PRESET_1),
            ("Bright Lead", tag::FACTORY_PRESET_2),
            ("Dark Bass", tag::FACTORY_PRESET_3),
        ] {
            if ui.button(label).clicked() {
                surface.send_action(msg_tag);
            }
        }
    }
}

/// White key width plus margin: the horizontal stride of the keyboard.
const KEY_STRIDE: f32 = 42.0;
const WHITE_KEY_WIDTH: f32 = 40.0;
const WHITE_KEY_HEIGHT: f32 = 120.0;
const BLACK_KEY_WIDTH: f32 = 24.0;
const BLACK_KEY_HEIGHT: f32 = 72.0;

/// White key notes for one octave, C4 to C5.
const WHITE_NOTES: [u8; 8] = [60, 62, 64, 65, 67, 69, 71, 72];

/// Black keys as `(note, left edge)`, centered on the white-key boundaries.
const BLACK_KEYS: [(u8, f32); 5] = [
    (61, 30.0),
    (63, 72.0),
    (66, 156.0),
    (68, 198.0),
    (70, 240.0),
];

/// One-octave virtual keyboard.
///
/// Note-on when a key is pressed, note-off when the pointer releases or
/// leaves; dragging across keys re-articulates. Notes travel as opaque
/// actions with the note number in the control tag.
#[derive(Debug, Default)]
pub struct KeyboardPad {
    held: Option<u8>,
}

impl KeyboardPad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the keyboard and transmit note on/off transitions.
    pub fn ui(&mut self, ui: &mut Ui, surface: &Surface) -> Response {
        let width = WHITE_NOTES.len() as f32 * KEY_STRIDE - (KEY_STRIDE - WHITE_KEY_WIDTH);
        let (rect, response) =
            ui.allocate_exact_size(Vec2::new(width, WHITE_KEY_HEIGHT), Sense::drag());

        let pressed = if response.is_pointer_button_down_on() {
            response
                .interact_pointer_pos()
                .and_then(|pos| Self::note_at(pos, rect))
        } else {
            None
        };

        if pressed != self.held {
            if let Some(note) = self.held {
                log::trace!("keyboard note off: {note}");
                surface.note_off(note);
            }
            if let Some(note) = pressed {
                log::trace!("keyboard note on: {note}");
                surface.note_on(note);
            }
            self.held = pressed;
        }

        if ui.is_rect_visible(rect) {
            self.paint(ui, rect);
        }

        response
    }

    /// Hit-test a pointer position (in screen space) against the key layout.
    /// Black keys sit on top of the whites, so they win inside their rects.
    fn note_at(pos: egui::Pos2, rect: Rect) -> Option<u8> {
        if !rect.contains(pos) {
            return None;
        }
        let local = pos - rect.min;

        if local.y <= BLACK_KEY_HEIGHT {
            for (note, left) in BLACK_KEYS {
                if (left..left + BLACK_KEY_WIDTH).contains(&local.x) {
                    return Some(note);
                }
            }
        }

        let slot = (local.x / KEY_STRIDE).floor() as usize;
        WHITE_NOTES.get(slot.min(WHITE_NOTES.len() - 1)).copied()
    }

    fn paint(&self, ui: &Ui, rect: Rect) {
        let painter = ui.painter();

        for (slot, note) in WHITE_NOTES.iter().enumerate() {
            let left = rect.left() + slot as f32 * KEY_STRIDE;
            let key = Rect::from_min_size(
                pos2(left, rect.top()),
                Vec2::new(WHITE_KEY_WIDTH, WHITE_KEY_HEIGHT),
            );
            let fill = if self.held == Some(*note) {
                style::ACCENT
            } else {
                style::WHITE_KEY
            };
            painter.rect(key, 2.0, fill, Stroke::new(1.0, style::BLACK_KEY));
        }

        for (note, left) in BLACK_KEYS {
            let key = Rect::from_min_size(
                pos2(rect.left() + left, rect.top()),
                Vec2::new(BLACK_KEY_WIDTH, BLACK_KEY_HEIGHT),
            );
            let fill = if self.held == Some(note) {
                style::ACCENT
            } else {
                style::BLACK_KEY
            };
            painter.rect(key, 2.0, fill, Stroke::new(1.0, style::BLACK_KEY));
        }
    }
}
