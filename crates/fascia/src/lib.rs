//! # Fascia
//!
//! Control surface and parameter bridge for webview-hosted audio plugins.
//!
//! Fascia is the UI side of a host/surface pair: the host owns the DSP and
//! the parameter store; the surface renders interactive controls and keeps
//! them synchronized with the host over an asynchronous message channel.
//!
//! ## Architecture
//!
//! ```text
//! gesture → widget → Surface → Bridge ── SPVFUI/SAMFUI ──→ host
//! host ──→ HostEndpoint → Surface (animate) → formatter → screen
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fascia::prelude::*;
//!
//! let (bridge, endpoint) = Bridge::connect(MyHostLink::new());
//! let mut surface = Surface::new(ParamRegistry::poly_synth(), bridge)
//!     .with_adsr_sources(SurfacePanel::ADSR_SOURCES);
//! // hand `endpoint` to the host; render `surface` with SurfacePanel
//! ```

// Re-export sub-crates
pub use fascia_core as core;
#[cfg(feature = "egui")]
pub use fascia_egui as egui_impl;

/// Prelude module for convenient imports.
///
/// Import everything you need to compose a surface:
/// ```rust,ignore
/// use fascia::prelude::*;
/// ```
pub mod prelude {
    // Core types and state machines
    pub use fascia_core::{
        // Channel
        Bridge, DisconnectedLink, HostEndpoint, HostLink,
        // Wire protocol
        tag, HostEvent, UiMessage,
        // Registry and formatting
        format_param, ParamKind, ParamRegistry, ParamSpec, RegistryConfig, RegistryError,
        // Control state machines
        knob_angle, ControlState, DragGesture, DRAG_SENSITIVITY,
        // Envelope geometry
        EnvelopeShape,
        // Composition
        Surface,
        // Value model
        clamp01, ParamIndex, ParamValue,
    };

    // Widget layer
    #[cfg(feature = "egui")]
    pub use fascia_egui::{DemoPad, EnvelopeView, Fader, KeyboardPad, Knob, SurfacePanel};
}
