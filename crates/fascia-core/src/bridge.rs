//! The bridge channel between the control surface and its host.
//!
//! The host provides two primitives: an outbound send function and an inbound
//! callback surface. [`Bridge`] wraps both behind an explicit object with a
//! scoped lifecycle:
//!
//! - **Uninitialized**: nothing exists yet.
//! - [`Bridge::connect`] installs the inbound hooks and transmits the ready
//!   handshake exactly once → **Active**.
//! - **Active**: outbound [`set_param`](Bridge::set_param) /
//!   [`send_action`](Bridge::send_action) at any time; inbound events are
//!   delivered in host order through the paired [`HostEndpoint`] and drained
//!   with [`drain`](Bridge::drain). No reordering, no coalescing.
//! - Dropping the `Bridge` tears the channel down: the endpoint's sends are
//!   discarded and no further inbound delivery is possible.
//!
//! Running without a live host is supported through [`DisconnectedLink`],
//! which drops outbound traffic on the floor with a log line. That degraded
//! mode is the only supported hostless configuration; nothing on this path
//! ever raises.

use std::sync::mpsc::{channel, Receiver, Sender, TryIter};

use crate::message::{HostEvent, UiMessage};
use crate::types::{clamp01, ParamIndex, ParamValue};

/// The host-provided outbound primitive: posts one JSON-encoded message.
///
/// Implementations must not fail; a link that cannot deliver logs and drops.
pub trait HostLink {
    /// Post one serialized [`UiMessage`] to the host.
    fn post(&self, json: &str);
}

/// Degraded outbound link for running without a host.
///
/// Every message is dropped with a `debug!` line. Never raises.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisconnectedLink;

impl HostLink for DisconnectedLink {
    fn post(&self, json: &str) {
        log::debug!("no host attached; dropping outbound message: {json}");
    }
}

/// UI-side handle of the channel.
///
/// Owned by the surface; see the module docs for the lifecycle.
pub struct Bridge {
    link: Box<dyn HostLink>,
    events: Receiver<HostEvent>,
}

impl Bridge {
    /// Install the inbound hooks, transmit the ready handshake, and return
    /// the active channel plus the endpoint the host calls into.
    ///
    /// The ready handshake is sent exactly once, before any other outbound
    /// message, and never again for the lifetime of the channel.
    pub fn connect(link: impl HostLink + 'static) -> (Self, HostEndpoint) {
        let (tx, rx) = channel();
        let bridge = Self {
            link: Box::new(link),
            events: rx,
        };
        bridge.send(&UiMessage::ready());
        (bridge, HostEndpoint { tx })
    }

    /// Connect in degraded hostless mode (see [`DisconnectedLink`]).
    pub fn disconnected() -> (Self, HostEndpoint) {
        Self::connect(DisconnectedLink)
    }

    /// Send a `SetParam` message; the value is clamped to [0, 1] first.
    pub fn set_param(&self, idx: ParamIndex, value: ParamValue) {
        self.send(&UiMessage::set_param(idx, value));
    }

    /// Send an `Action` message with no payload.
    pub fn send_action(&self, msg_tag: i32) {
        self.send(&UiMessage::action(msg_tag));
    }

    /// Send an `Action` message with a control tag and string payload.
    pub fn send_action_with(&self, msg_tag: i32, ctrl_tag: i32, data: String) {
        self.send(&UiMessage::action_with(msg_tag, ctrl_tag, data));
    }

    /// Inbound events in host delivery order, without blocking.
    pub fn drain(&self) -> TryIter<'_, HostEvent> {
        self.events.try_iter()
    }

    fn send(&self, msg: &UiMessage) {
        match serde_json::to_string(msg) {
            Ok(json) => self.link.post(&json),
            // Serialization of these enums cannot fail with well-formed
            // strings; keep the wire path non-raising regardless.
            Err(err) => log::error!("failed to encode outbound message: {err}"),
        }
    }
}

/// Host-side handle of the channel.
///
/// Cloneable so a host can fan it out to whichever threads produce parameter
/// traffic. After the surface tears the bridge down, every send is discarded.
#[derive(Debug, Clone)]
pub struct HostEndpoint {
    tx: Sender<HostEvent>,
}

impl HostEndpoint {
    /// Deliver a single parameter change. The value is clamped on receipt.
    pub fn param_changed(&self, idx: ParamIndex, value: ParamValue) {
        self.push(HostEvent::ParamChanged {
            idx,
            value: clamp01(value),
        });
    }

    /// Deliver a bulk initialization sequence; position = parameter index.
    ///
    /// Non-numeric entries survive to the application site, where they are
    /// skipped individually.
    pub fn init_params(&self, values: Vec<serde_json::Value>) {
        self.push(HostEvent::InitParams(values));
    }

    fn push(&self, event: HostEvent) {
        if self.tx.send(event).is_err() {
            log::debug!("surface torn down; dropping inbound host event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::tag;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct RecordingLink {
        sent: Rc<RefCell<Vec<String>>>,
    }

    impl HostLink for RecordingLink {
        fn post(&self, json: &str) {
            self.sent.borrow_mut().push(json.to_owned());
        }
    }

    #[test]
    fn ready_is_sent_once_and_first() {
        let link = RecordingLink::default();
        let sent = link.sent.clone();
        let (bridge, _endpoint) = Bridge::connect(link);

        bridge.set_param(0, 0.25);
        bridge.send_action(tag::DEMO_POLY);

        let sent = sent.borrow();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0], r#"{"msg":"SAMFUI","msgTag":6,"ctrlTag":0,"data":""}"#);
        assert_eq!(sent[1], r#"{"msg":"SPVFUI","paramIdx":0,"value":0.25}"#);
    }

    #[test]
    fn inbound_events_arrive_in_host_order() {
        let (bridge, endpoint) = Bridge::disconnected();
        endpoint.param_changed(2, 0.1);
        endpoint.param_changed(5, 0.9);
        endpoint.param_changed(2, 0.3);

        let events: Vec<_> = bridge.drain().collect();
        assert_eq!(
            events,
            vec![
                HostEvent::ParamChanged { idx: 2, value: 0.1 },
                HostEvent::ParamChanged { idx: 5, value: 0.9 },
                HostEvent::ParamChanged { idx: 2, value: 0.3 },
            ]
        );
    }

    #[test]
    fn inbound_values_are_clamped_on_receipt() {
        let (bridge, endpoint) = Bridge::disconnected();
        endpoint.param_changed(0, 1.8);
        endpoint.param_changed(1, -0.5);

        let events: Vec<_> = bridge.drain().collect();
        assert_eq!(
            events,
            vec![
                HostEvent::ParamChanged { idx: 0, value: 1.0 },
                HostEvent::ParamChanged { idx: 1, value: 0.0 },
            ]
        );
    }

    #[test]
    fn endpoint_outlives_torn_down_bridge() {
        let (bridge, endpoint) = Bridge::disconnected();
        drop(bridge);
        // Must not panic; the event is silently discarded.
        endpoint.param_changed(0, 0.5);
        endpoint.init_params(vec![serde_json::json!(0.1)]);
    }

    #[test]
    fn disconnected_outbound_never_raises() {
        let (bridge, _endpoint) = Bridge::disconnected();
        bridge.set_param(0, 0.5);
        bridge.send_action_with(tag::NOTE_ON, 60, String::new());
    }
}
