//! Full PolySynth surface layout.
//!
//! Wires the stock parameter indices to widgets, grouped the way the
//! hardware panel reads: oscillators, filter, and LFO up top; envelope,
//! master, and the command pads below; keyboard along the bottom. Hosts with
//! their own layout compose the widgets directly instead.

use egui::Ui;
use fascia_core::registry::poly_params as p;
use fascia_core::Surface;

use crate::{DemoPad, EnvelopeView, Fader, KeyboardPad, Knob};

/// Retained state of the stock surface layout.
#[derive(Debug, Default)]
pub struct SurfacePanel {
    demo: DemoPad,
    keyboard: KeyboardPad,
}

impl SurfacePanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four stock ADSR source indices, in attack/decay/sustain/release
    /// order. Pass to [`Surface::with_adsr_sources`] at composition time.
    pub const ADSR_SOURCES: [fascia_core::ParamIndex; 4] =
        [p::ATTACK, p::DECAY, p::SUSTAIN, p::RELEASE];

    /// Render the whole surface.
    pub fn ui(&mut self, ui: &mut Ui, surface: &mut Surface) {
        ui.heading("PolySynth");
        ui.add_space(8.0);

        ui.horizontal_top(|ui| {
            module(ui, "Oscillators", |ui| {
                ui.horizontal(|ui| {
                    ui.add(Knob::new(surface, p::OSC_WAVE, "Waveform"));
                    ui.add(Knob::new(surface, p::OSC_MIX, "Mix"));
                });
            });

            module(ui, "Filter", |ui| {
                ui.horizontal(|ui| {
                    ui.add(Knob::new(surface, p::CUTOFF, "Cutoff"));
                    ui.add(Knob::new(surface, p::RESONANCE, "Resonance"));
                });
            });

            module(ui, "LFO", |ui| {
                ui.horizontal(|ui| {
                    ui.add(Knob::new(surface, p::LFO_SHAPE, "Shape"));
                    ui.add(Knob::new(surface, p::LFO_RATE, "Rate"));
                    ui.add(Knob::new(surface, p::LFO_DEPTH, "Depth"));
                });
            });
        });

        ui.add_space(8.0);

        ui.horizontal_top(|ui| {
            module(ui, "Amplitude Envelope", |ui| {
                ui.set_min_width(320.0);
                ui.add(EnvelopeView::new(surface.envelope_shape()));
                ui.horizontal(|ui| {
                    ui.add(Fader::new(surface, p::ATTACK, "A"));
                    ui.add(Fader::new(surface, p::DECAY, "D"));
                    ui.add(Fader::new(surface, p::SUSTAIN, "S"));
                    ui.add(Fader::new(surface, p::RELEASE, "R"));
                });
            });

            module(ui, "Master", |ui| {
                ui.add(Knob::new(surface, p::GAIN, "Gain"));
            });

            module(ui, "Demo", |ui| {
                self.demo.ui(ui, surface);
            });
        });

        ui.add_space(8.0);
        self.keyboard.ui(ui, surface);
    }
}

fn module(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.strong(title);
            ui.add_space(4.0);
            add_contents(ui);
        });
    });
}
