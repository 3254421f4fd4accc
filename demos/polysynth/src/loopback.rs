//! Loopback host: a stand-in engine that talks the wire protocol back.
//!
//! Echoes every `SPVFUI` as a `ParamChanged`, answers the ready handshake
//! with a bulk init, and serves the factory-preset actions with canned
//! tables. Everything else is logged and dropped, which is exactly what a
//! real host does with tags it does not implement.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use fascia::prelude::*;
use serde_json::{json, Value};

/// The stand-in host. Hand an `Rc` of it to [`Bridge::connect`], then attach
/// the returned endpoint with [`LoopbackHost::attach`].
#[derive(Default)]
pub struct LoopbackHost {
    endpoint: RefCell<Option<HostEndpoint>>,
    ready_seen: Cell<bool>,
}

impl LoopbackHost {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Wire the inbound half of the channel back into this host.
    ///
    /// The ready handshake arrives during [`Bridge::connect`], before the
    /// endpoint exists; the initial table owed to it is sent from here.
    pub fn attach(&self, endpoint: HostEndpoint) {
        *self.endpoint.borrow_mut() = Some(endpoint);
        if self.ready_seen.get() {
            log::info!("surface ready; sending initial parameter table");
            self.with_endpoint(|ep| ep.init_params(init_table()));
        }
    }

    fn with_endpoint(&self, f: impl FnOnce(&HostEndpoint)) {
        if let Some(endpoint) = self.endpoint.borrow().as_ref() {
            f(endpoint);
        }
    }

    fn handle_action(&self, msg_tag: i64, ctrl_tag: i64) {
        match msg_tag as i32 {
            tag::UI_READY => {
                self.ready_seen.set(true);
                if self.endpoint.borrow().is_some() {
                    log::info!("surface ready; sending initial parameter table");
                    self.with_endpoint(|ep| ep.init_params(init_table()));
                }
            }
            tag::FACTORY_PRESET_1 => {
                self.with_endpoint(|ep| ep.init_params(preset_warm_pad()))
            }
            tag::FACTORY_PRESET_2 => {
                self.with_endpoint(|ep| ep.init_params(preset_bright_lead()))
            }
            tag::FACTORY_PRESET_3 => {
                self.with_endpoint(|ep| ep.init_params(preset_dark_bass()))
            }
            other => log::info!("action {other} (ctrlTag {ctrl_tag}) acknowledged"),
        }
    }
}

/// Newtype wrapper so the foreign [`HostLink`] trait can be implemented for the
/// `Rc`-shared host without tripping the orphan rule.
pub struct LoopbackLink(pub Rc<LoopbackHost>);

impl HostLink for LoopbackLink {
    fn post(&self, json: &str) {
        let host = &self.0;
        let Ok(msg) = serde_json::from_str::<Value>(json) else {
            log::warn!("unparseable outbound message: {json}");
            return;
        };

        match msg.get("msg").and_then(Value::as_str) {
            Some("SPVFUI") => {
                let idx = msg.get("paramIdx").and_then(Value::as_u64);
                let value = msg.get("value").and_then(Value::as_f64);
                if let (Some(idx), Some(value)) = (idx, value) {
                    // Echo the change back, the way a live engine confirms
                    // automation.
                    host.with_endpoint(|ep| ep.param_changed(idx as ParamIndex, value));
                }
            }
            Some("SAMFUI") => {
                let msg_tag = msg.get("msgTag").and_then(Value::as_i64).unwrap_or(-1);
                let ctrl_tag = msg.get("ctrlTag").and_then(Value::as_i64).unwrap_or(0);
                host.handle_action(msg_tag, ctrl_tag);
            }
            _ => log::warn!("unknown outbound message shape: {json}"),
        }
    }
}

/// Startup values; positions 1, 8, and 9 are host-internal and stay null.
fn init_table() -> Vec<Value> {
    vec![
        json!(0.8),  // Gain
        Value::Null,
        json!(0.1),  // Attack
        json!(0.25), // Decay
        json!(0.6),  // Sustain
        json!(0.3),  // Release
        json!(0.0),  // LFO Shape
        json!(0.12), // LFO Rate
        Value::Null,
        Value::Null,
        json!(0.0),  // LFO Depth
        json!(0.55), // Cutoff
        json!(0.2),  // Resonance
        json!(0.0),  // Osc Wave
        json!(0.0),  // Osc B Wave
        json!(0.5),  // Osc Mix
        json!(0.5),  // Pulse Width A
        json!(0.5),  // Pulse Width B
        json!(0.3),  // Filter Env
        json!(0.0),
        json!(0.0),
        json!(0.0),
        json!(0.0),
        json!(0.0),
        json!(0.0),
        json!(0.25), // Filter Model
    ]
}

fn preset_warm_pad() -> Vec<Value> {
    vec![
        json!(0.7),
        Value::Null,
        json!(0.6),
        json!(0.5),
        json!(0.8),
        json!(0.7),
        json!(0.0),
        json!(0.08),
        Value::Null,
        Value::Null,
        json!(0.25),
        json!(0.35),
        json!(0.15),
        json!(0.5),
        json!(0.75),
        json!(0.5),
        json!(0.5),
        json!(0.5),
        json!(0.2),
    ]
}

fn preset_bright_lead() -> Vec<Value> {
    vec![
        json!(0.8),
        Value::Null,
        json!(0.02),
        json!(0.3),
        json!(0.7),
        json!(0.2),
        json!(0.25),
        json!(0.3),
        Value::Null,
        Value::Null,
        json!(0.15),
        json!(0.9),
        json!(0.4),
        json!(0.0),
        json!(0.0),
        json!(0.3),
        json!(0.5),
        json!(0.5),
        json!(0.6),
    ]
}

fn preset_dark_bass() -> Vec<Value> {
    vec![
        json!(0.85),
        Value::Null,
        json!(0.01),
        json!(0.4),
        json!(0.5),
        json!(0.15),
        json!(0.0),
        json!(0.05),
        Value::Null,
        Value::Null,
        json!(0.0),
        json!(0.18),
        json!(0.55),
        json!(0.25),
        json!(0.25),
        json!(0.7),
        json!(0.5),
        json!(0.5),
        json!(0.4),
    ]
}
