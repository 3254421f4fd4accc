//! End-to-end tests of the surface against a recording host link.

use std::cell::RefCell;
use std::rc::Rc;

use fascia_core::registry::poly_params;
use fascia_core::{tag, Bridge, HostLink, ParamRegistry, Surface};

/// Captures every outbound JSON message for inspection.
#[derive(Clone, Default)]
struct RecordingLink {
    sent: Rc<RefCell<Vec<String>>>,
}

impl RecordingLink {
    fn messages(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }
}

impl HostLink for RecordingLink {
    fn post(&self, json: &str) {
        self.sent.borrow_mut().push(json.to_owned());
    }
}

#[test]
fn ready_handshake_leads_all_traffic() {
    let link = RecordingLink::default();
    let recorder = link.clone();

    let (bridge, _endpoint) = Bridge::connect(link);
    let mut surface = Surface::new(ParamRegistry::poly_synth(), bridge);

    surface.begin_drag(poly_params::GAIN, 200.0);
    surface.drag_to(poly_params::GAIN, 190.0);
    surface.end_drag(poly_params::GAIN);

    let sent = recorder.messages();
    assert_eq!(
        sent[0],
        r#"{"msg":"SAMFUI","msgTag":6,"ctrlTag":0,"data":""}"#,
        "ready must be the first message"
    );
    assert_eq!(
        sent.iter().filter(|m| m.contains("\"msgTag\":6")).count(),
        1,
        "ready must be sent exactly once"
    );
}

#[test]
fn one_set_param_per_pointer_move_tick() {
    let link = RecordingLink::default();
    let recorder = link.clone();

    let (bridge, _endpoint) = Bridge::connect(link);
    let mut surface = Surface::new(ParamRegistry::poly_synth(), bridge);

    // 100 px upward in ten ticks from the default 0.5: pins at 1.0.
    surface.begin_drag(poly_params::CUTOFF, 300.0);
    for step in 1..=10 {
        surface.drag_to(poly_params::CUTOFF, 300.0 - step as f32 * 10.0);
    }
    surface.end_drag(poly_params::CUTOFF);

    let set_params: Vec<String> = recorder
        .messages()
        .into_iter()
        .filter(|m| m.contains("SPVFUI"))
        .collect();
    assert_eq!(set_params.len(), 10);
    assert_eq!(
        set_params.last().unwrap(),
        r#"{"msg":"SPVFUI","paramIdx":11,"value":1.0}"#
    );
    assert_eq!(surface.value(poly_params::CUTOFF), 1.0);
}

#[test]
fn fader_positions_pass_through_unscaled() {
    let link = RecordingLink::default();
    let recorder = link.clone();

    let (bridge, _endpoint) = Bridge::connect(link);
    let mut surface = Surface::new(ParamRegistry::poly_synth(), bridge);

    surface.begin_drag(poly_params::SUSTAIN, 0.0);
    surface.set_dragged(poly_params::SUSTAIN, 0.25);
    surface.set_dragged(poly_params::SUSTAIN, 1.5);
    surface.end_drag(poly_params::SUSTAIN);

    let set_params: Vec<String> = recorder
        .messages()
        .into_iter()
        .filter(|m| m.contains("SPVFUI"))
        .collect();
    assert_eq!(set_params.len(), 2);
    assert_eq!(
        set_params[1],
        r#"{"msg":"SPVFUI","paramIdx":4,"value":1.0}"#,
        "out-of-range positions clamp before transmission"
    );
}

#[test]
fn keyboard_notes_are_opaque_actions() {
    let link = RecordingLink::default();
    let recorder = link.clone();

    let (bridge, _endpoint) = Bridge::connect(link);
    let surface = Surface::new(ParamRegistry::poly_synth(), bridge);

    surface.note_on(60);
    surface.note_off(60);
    surface.send_action(tag::FACTORY_PRESET_1);

    let sent = recorder.messages();
    assert_eq!(sent[1], r#"{"msg":"SAMFUI","msgTag":20,"ctrlTag":60,"data":""}"#);
    assert_eq!(sent[2], r#"{"msg":"SAMFUI","msgTag":21,"ctrlTag":60,"data":""}"#);
    assert_eq!(sent[3], r#"{"msg":"SAMFUI","msgTag":11,"ctrlTag":0,"data":""}"#);
}

#[test]
fn host_round_trip_glides_the_displayed_value() {
    let (bridge, endpoint) = Bridge::disconnected();
    let mut surface = Surface::new(ParamRegistry::poly_synth(), bridge)
        .with_adsr_sources([
            poly_params::ATTACK,
            poly_params::DECAY,
            poly_params::SUSTAIN,
            poly_params::RELEASE,
        ]);

    endpoint.param_changed(poly_params::SUSTAIN, 1.0);
    assert!(surface.pump_host_events());

    let mut frames = 0;
    while surface.tick_animations() {
        frames += 1;
        assert!(frames < 100, "convergence must terminate");
    }

    assert_eq!(surface.value(poly_params::SUSTAIN), 1.0);
    assert_eq!(surface.display_text(poly_params::SUSTAIN), "100 %");
    assert_eq!(surface.envelope_shape().unwrap().sustain, 1.0);
}
