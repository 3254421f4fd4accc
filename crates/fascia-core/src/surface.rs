//! The control surface: registry + control states + bridge, wired together.
//!
//! [`Surface`] owns the single piece of state touched by both event sources:
//! the map of [`ControlState`]s. Local gestures mutate it through the
//! `begin_drag`/`drag_to`/`set_dragged`/`end_drag` path; host traffic mutates
//! it through `pump_host_events`; `tick_animations` advances convergence runs
//! one step per display refresh. Execution is cooperative and single-threaded
//! on the UI side; correctness rests on events interleaving, never running
//! concurrently.
//!
//! Arbitration between the two writers is the drag flag: a host update for a
//! parameter that is mid-drag is dropped, not queued. Widgets bind to
//! parameter indices and read everything they render from here.

use std::collections::BTreeMap;

use crate::animate;
use crate::bridge::Bridge;
use crate::control::{ControlState, DragGesture};
use crate::envelope::EnvelopeShape;
use crate::format::format_param;
use crate::message::{tag, HostEvent};
use crate::registry::ParamRegistry;
use crate::types::{clamp01, ParamIndex, ParamValue};

/// One live pointer gesture; at most one exists at any instant.
#[derive(Debug, Clone, Copy)]
struct ActiveDrag {
    idx: ParamIndex,
    gesture: DragGesture,
}

/// The parameter bridge and widget state for one control surface.
pub struct Surface {
    registry: ParamRegistry,
    bridge: Bridge,
    controls: BTreeMap<ParamIndex, ControlState>,
    active_drag: Option<ActiveDrag>,
    adsr: Option<[ParamIndex; 4]>,
}

impl Surface {
    /// Build a surface over an active bridge, binding one control per
    /// registry entry at its default value.
    pub fn new(registry: ParamRegistry, bridge: Bridge) -> Self {
        let controls = registry
            .indices()
            .map(|idx| (idx, ControlState::at(registry.default_value(idx))))
            .collect();
        Self {
            registry,
            bridge,
            controls,
            active_drag: None,
            adsr: None,
        }
    }

    /// Declare which four parameters feed the envelope view, in
    /// attack/decay/sustain/release order.
    pub fn with_adsr_sources(mut self, sources: [ParamIndex; 4]) -> Self {
        for idx in sources {
            self.bind(idx);
        }
        self.adsr = Some(sources);
        self
    }

    /// Ensure a control exists for `idx`, binding it at the registry default
    /// (0.5 when unregistered).
    pub fn bind(&mut self, idx: ParamIndex) {
        let default = self.registry.default_value(idx);
        self.controls
            .entry(idx)
            .or_insert_with(|| ControlState::at(default));
    }

    /// The rendered value of a control; registry default if never bound.
    pub fn value(&self, idx: ParamIndex) -> ParamValue {
        self.controls
            .get(&idx)
            .map_or_else(|| self.registry.default_value(idx), |state| state.current)
    }

    /// The display string for a control's rendered value.
    pub fn display_text(&self, idx: ParamIndex) -> String {
        format_param(&self.registry, idx, self.value(idx))
    }

    /// Read access to a bound control's state.
    pub fn control(&self, idx: ParamIndex) -> Option<&ControlState> {
        self.controls.get(&idx)
    }

    /// True while a local gesture owns this parameter.
    pub fn is_dragging(&self, idx: ParamIndex) -> bool {
        self.controls.get(&idx).is_some_and(|state| state.dragging)
    }

    /// True while any control is mid-gesture.
    pub fn dragging_any(&self) -> bool {
        self.active_drag.is_some()
    }

    /// The registry this surface renders from.
    pub fn registry(&self) -> &ParamRegistry {
        &self.registry
    }

    // -------------------------------------------------------------------------
    // Local gestures
    // -------------------------------------------------------------------------

    /// Pointer-down on a control. Returns false (and changes nothing) if
    /// another control already owns the pointer; a single pointer means a
    /// single drag, globally.
    pub fn begin_drag(&mut self, idx: ParamIndex, pointer_y: f32) -> bool {
        if let Some(active) = &self.active_drag {
            if active.idx != idx {
                log::warn!(
                    "ignoring drag on parameter {idx}: parameter {} owns the pointer",
                    active.idx
                );
            }
            return false;
        }

        let default = self.registry.default_value(idx);
        let state = self
            .controls
            .entry(idx)
            .or_insert_with(|| ControlState::at(default));
        state.dragging = true;
        // The gesture takes over from any convergence run in flight.
        state.animating = false;
        state.target = state.current;

        self.active_drag = Some(ActiveDrag {
            idx,
            gesture: DragGesture::begin(pointer_y),
        });
        true
    }

    /// Pointer-move of a rotary drag. Emits exactly one `SetParam` per call.
    pub fn drag_to(&mut self, idx: ParamIndex, pointer_y: f32) {
        let Some(active) = &mut self.active_drag else {
            return;
        };
        if active.idx != idx {
            return;
        }

        let Some(state) = self.controls.get_mut(&idx) else {
            return;
        };
        let value = active.gesture.update(pointer_y, state.current);
        state.set_from_gesture(value);
        self.bridge.set_param(idx, value);
    }

    /// Position report of a linear control mid-drag. The control's reported
    /// position is the value; no pointer math. Emits one `SetParam` per call.
    pub fn set_dragged(&mut self, idx: ParamIndex, value: ParamValue) {
        if !self.is_dragging(idx) {
            return;
        }

        let value = clamp01(value);
        let Some(state) = self.controls.get_mut(&idx) else {
            return;
        };
        state.set_from_gesture(value);
        self.bridge.set_param(idx, value);
    }

    /// Pointer-up, anywhere. Ends the gesture on `idx` if it owns one.
    pub fn end_drag(&mut self, idx: ParamIndex) {
        if self
            .active_drag
            .is_some_and(|active| active.idx == idx)
        {
            self.active_drag = None;
        }
        if let Some(state) = self.controls.get_mut(&idx) {
            state.dragging = false;
        }
    }

    // -------------------------------------------------------------------------
    // Host traffic
    // -------------------------------------------------------------------------

    /// Drain and apply pending host events, in host delivery order.
    ///
    /// Returns true if any control changed (the caller owes a repaint).
    /// A `ParamChanged` for a parameter mid-drag is dropped; a bulk init
    /// applies per-entry, skipping the dragged index and every non-numeric
    /// entry individually.
    pub fn pump_host_events(&mut self) -> bool {
        let events: Vec<HostEvent> = self.bridge.drain().collect();
        let mut changed = false;

        for event in events {
            match event {
                HostEvent::ParamChanged { idx, value } => {
                    changed |= self.apply_host_value(idx, value);
                }
                HostEvent::InitParams(values) => {
                    for (position, entry) in values.iter().enumerate() {
                        let idx = position as ParamIndex;
                        match entry.as_f64() {
                            Some(value) => changed |= self.apply_host_init(idx, clamp01(value)),
                            None => {
                                log::trace!("skipping non-numeric init entry at index {idx}")
                            }
                        }
                    }
                }
            }
        }

        changed
    }

    /// Advance every live convergence run one step.
    ///
    /// Returns true while any run is still live, i.e. another display frame
    /// is needed.
    pub fn tick_animations(&mut self) -> bool {
        let mut live = false;
        for state in self.controls.values_mut() {
            let was_animating = state.animating;
            live |= animate::step(state);
            // The settling step snapped and ended the run; it still needs
            // one more repaint to show the exact target.
            live |= was_animating && !state.animating;
        }
        live
    }

    /// The envelope shape derived from the declared ADSR sources, if any.
    pub fn envelope_shape(&self) -> Option<EnvelopeShape> {
        self.adsr.map(|[a, d, s, r]| {
            EnvelopeShape::new(self.value(a), self.value(d), self.value(s), self.value(r))
        })
    }

    fn apply_host_value(&mut self, idx: ParamIndex, value: ParamValue) -> bool {
        if self.is_dragging(idx) {
            log::trace!("dropping host update for parameter {idx}: drag in progress");
            return false;
        }
        let default = self.registry.default_value(idx);
        let state = self
            .controls
            .entry(idx)
            .or_insert_with(|| ControlState::at(default));
        animate::retarget(state, value);
        true
    }

    /// Bulk init snaps directly; only single `ParamChanged` updates animate.
    fn apply_host_init(&mut self, idx: ParamIndex, value: ParamValue) -> bool {
        if self.is_dragging(idx) {
            log::trace!("dropping init entry for parameter {idx}: drag in progress");
            return false;
        }
        let default = self.registry.default_value(idx);
        let state = self
            .controls
            .entry(idx)
            .or_insert_with(|| ControlState::at(default));
        state.current = value;
        state.target = value;
        state.animating = false;
        true
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Send a fire-and-forget action to the host.
    pub fn send_action(&self, msg_tag: i32) {
        self.bridge.send_action(msg_tag);
    }

    /// Send an action with a control tag and payload.
    pub fn send_action_with(&self, msg_tag: i32, ctrl_tag: i32, data: String) {
        self.bridge.send_action_with(msg_tag, ctrl_tag, data);
    }

    /// Press a key on the virtual keyboard.
    pub fn note_on(&self, note: u8) {
        self.bridge
            .send_action_with(tag::NOTE_ON, i32::from(note), String::new());
    }

    /// Release a key on the virtual keyboard.
    pub fn note_off(&self, note: u8) {
        self.bridge
            .send_action_with(tag::NOTE_OFF, i32::from(note), String::new());
    }
}
