//! # fascia-core
//!
//! Core abstractions for the Fascia control-surface framework.
//!
//! This crate is the GUI-free half of the surface: the normalized-value data
//! model, the wire protocol spoken with the host, the registry and value
//! formatter, and the drag/animate state machines the widgets drive. Every
//! state machine here runs and tests without a display.
//!
//! ## Main Types
//!
//! - [`Surface`] - registry + control states + bridge, wired together
//! - [`Bridge`] / [`HostEndpoint`] - the two ends of the host channel
//! - [`HostLink`] - the host-provided outbound primitive
//! - [`ParamRegistry`] / [`ParamSpec`] - versioned display metadata
//! - [`ControlState`] / [`DragGesture`] - per-control drag state machine
//! - [`EnvelopeShape`] - ADSR polyline geometry
//! - [`UiMessage`] / [`HostEvent`] - the wire protocol

pub mod animate;
pub mod bridge;
pub mod control;
pub mod envelope;
pub mod format;
pub mod message;
pub mod registry;
pub mod surface;
pub mod types;

// Re-exports for convenience
pub use bridge::{Bridge, DisconnectedLink, HostEndpoint, HostLink};
pub use control::{knob_angle, ControlState, DragGesture, DRAG_SENSITIVITY};
pub use envelope::{EnvelopeShape, MIN_SEGMENT};
pub use format::format_param;
pub use message::{tag, HostEvent, UiMessage};
pub use registry::{
    ParamKind, ParamRegistry, ParamSpec, RegistryConfig, RegistryEntry, RegistryError,
    REGISTRY_VERSION,
};
pub use surface::Surface;
pub use types::{clamp01, ParamIndex, ParamValue};
