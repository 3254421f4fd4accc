//! Wire protocol between the control surface and the host.
//!
//! Outbound traffic is JSON with the exact field names the host expects:
//!
//! ```json
//! { "msg": "SPVFUI", "paramIdx": 11, "value": 0.5 }
//! { "msg": "SAMFUI", "msgTag": 7, "ctrlTag": 0, "data": "" }
//! ```
//!
//! Inbound traffic arrives as host invocations (a single value change, or a
//! bulk init sequence) and is modeled by [`HostEvent`]. Messages are
//! fire-and-forget, at-most-once, unacknowledged; this layer adds no delivery
//! or ordering guarantees of its own.

use serde::Serialize;

use crate::types::{clamp01, ParamIndex, ParamValue};

/// Action tags understood by the stock PolySynth host.
///
/// Opaque to this layer; the surface only transmits them. [`tag::UI_READY`]
/// is the one exception: the bridge sends it itself during the ready
/// handshake.
pub mod tag {
    /// Ready handshake: the surface has installed its inbound hooks.
    pub const UI_READY: i32 = 6;
    /// Start/stop the monophonic demo sequence.
    pub const DEMO_MONO: i32 = 7;
    /// Start/stop the polyphonic demo sequence.
    pub const DEMO_POLY: i32 = 8;
    /// Save the current settings as a preset.
    pub const SAVE_PRESET: i32 = 9;
    /// Load a preset from disk.
    pub const LOAD_PRESET: i32 = 10;
    /// Factory preset "Warm Pad".
    pub const FACTORY_PRESET_1: i32 = 11;
    /// Factory preset "Bright Lead".
    pub const FACTORY_PRESET_2: i32 = 12;
    /// Factory preset "Dark Bass".
    pub const FACTORY_PRESET_3: i32 = 13;
    /// Start/stop the FX showcase demo.
    pub const FX_DEMO: i32 = 14;
    /// Note on; `ctrl_tag` carries the MIDI note number.
    pub const NOTE_ON: i32 = 20;
    /// Note off; `ctrl_tag` carries the MIDI note number.
    pub const NOTE_OFF: i32 = 21;
}

/// Outbound message from the surface to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "msg")]
pub enum UiMessage {
    /// Set one parameter to a normalized value.
    #[serde(rename = "SPVFUI")]
    SetParam {
        /// Host parameter index.
        #[serde(rename = "paramIdx")]
        param_idx: ParamIndex,
        /// Normalized value, clamped to [0, 1] before construction.
        value: ParamValue,
    },

    /// Fire-and-forget command.
    #[serde(rename = "SAMFUI")]
    Action {
        /// Command tag; see [`tag`].
        #[serde(rename = "msgTag")]
        msg_tag: i32,
        /// Control tag; command-specific payload (e.g. a note number).
        #[serde(rename = "ctrlTag")]
        ctrl_tag: i32,
        /// Free-form string payload.
        data: String,
    },
}

impl UiMessage {
    /// Build a `SetParam` message, clamping the value first.
    pub fn set_param(param_idx: ParamIndex, value: ParamValue) -> Self {
        Self::SetParam {
            param_idx,
            value: clamp01(value),
        }
    }

    /// Build an `Action` message with no payload.
    pub fn action(msg_tag: i32) -> Self {
        Self::action_with(msg_tag, 0, String::new())
    }

    /// Build an `Action` message with a control tag and string payload.
    pub fn action_with(msg_tag: i32, ctrl_tag: i32, data: String) -> Self {
        Self::Action {
            msg_tag,
            ctrl_tag,
            data,
        }
    }

    /// The ready handshake, sent exactly once by the bridge after its inbound
    /// hooks are installed.
    pub fn ready() -> Self {
        Self::action(tag::UI_READY)
    }
}

/// Inbound event delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// One parameter changed on the host side (automation, preset load, echo).
    ParamChanged {
        /// Host parameter index.
        idx: ParamIndex,
        /// Normalized value, clamped on receipt.
        value: ParamValue,
    },

    /// Bulk initialization: position in the sequence is the parameter index.
    ///
    /// Entries are kept as raw JSON values so non-numeric entries can be
    /// skipped individually when the sequence is applied.
    InitParams(Vec<serde_json::Value>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_param_wire_format() {
        let json = serde_json::to_string(&UiMessage::set_param(11, 0.5)).unwrap();
        assert_eq!(json, r#"{"msg":"SPVFUI","paramIdx":11,"value":0.5}"#);
    }

    #[test]
    fn action_wire_format() {
        let json = serde_json::to_string(&UiMessage::action(tag::DEMO_MONO)).unwrap();
        assert_eq!(json, r#"{"msg":"SAMFUI","msgTag":7,"ctrlTag":0,"data":""}"#);
    }

    #[test]
    fn note_actions_carry_the_note_in_ctrl_tag() {
        let msg = UiMessage::action_with(tag::NOTE_ON, 60, String::new());
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"msg":"SAMFUI","msgTag":20,"ctrlTag":60,"data":""}"#);
    }

    #[test]
    fn set_param_clamps_before_serialization() {
        assert_eq!(
            UiMessage::set_param(0, 1.7),
            UiMessage::SetParam {
                param_idx: 0,
                value: 1.0
            }
        );
        assert_eq!(
            UiMessage::set_param(0, -0.2),
            UiMessage::SetParam {
                param_idx: 0,
                value: 0.0
            }
        );
    }

    #[test]
    fn ready_is_the_reserved_handshake_action() {
        assert_eq!(
            UiMessage::ready(),
            UiMessage::Action {
                msg_tag: 6,
                ctrl_tag: 0,
                data: String::new()
            }
        );
    }
}
