//! # fascia-egui
//!
//! egui widget layer for the Fascia control-surface framework.
//!
//! Widgets bind to a [`fascia_core::Surface`] by parameter index and render
//! its state; all drag math, animation, and host traffic stays in
//! `fascia-core`. The composition root pumps host events and ticks
//! animations once per frame:
//!
//! ```ignore
//! if surface.pump_host_events() | surface.tick_animations() {
//!     ctx.request_repaint();
//! }
//! panel.ui(ui, &mut surface);
//! ```

pub mod envelope_view;
pub mod fader;
pub mod knob;
pub mod pads;
pub mod style;
pub mod surface_panel;

pub use envelope_view::EnvelopeView;
pub use fader::Fader;
pub use knob::Knob;
pub use pads::{DemoPad, KeyboardPad};
pub use surface_panel::SurfacePanel;
