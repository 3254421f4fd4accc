//! Display-value animation toward host targets.
//!
//! When the host moves a parameter that is not being dragged, the rendered
//! value glides toward the new target instead of snapping: one damping step
//! per display refresh until the remaining distance falls under
//! [`SETTLE_EPSILON`], then an exact snap and the run ends. The run is
//! explicit state on the [`ControlState`]: retargeting a live run updates
//! its goal; it never spawns a second run for the same parameter.

use crate::control::ControlState;
use crate::types::{clamp01, ParamValue};

/// Fraction of the remaining distance covered per step.
pub const DAMPING_FACTOR: f64 = 0.2;

/// Remaining distance below which the value snaps to the target exactly.
pub const SETTLE_EPSILON: f64 = 1e-3;

/// Point a control at a new host target.
///
/// Starts a run if none is live; a live run is re-aimed in place. Callers
/// arbitrate against drags before calling this; a dragged control never
/// animates.
pub fn retarget(state: &mut ControlState, target: ParamValue) {
    state.target = clamp01(target);
    state.animating = true;
}

/// Advance one display-refresh step.
///
/// Returns true while the run is still live (another frame is needed). The
/// final step snaps `current` to `target` exactly, so a run always
/// terminates once the target stops moving.
pub fn step(state: &mut ControlState) -> bool {
    if !state.animating {
        return false;
    }

    state.current += (state.target - state.current) * DAMPING_FACTOR;
    if (state.target - state.current).abs() < SETTLE_EPSILON {
        state.current = state.target;
        state.animating = false;
    }
    state.animating
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_in_bounded_steps_without_overshoot() {
        let mut state = ControlState::at(0.0);
        retarget(&mut state, 0.8);

        let mut previous = state.current;
        let mut steps = 0;
        while step(&mut state) {
            assert!(state.current >= previous, "no overshoot for damping < 1");
            assert!(state.current <= 0.8);
            previous = state.current;
            steps += 1;
            assert!(steps < 100, "run must self-terminate");
        }

        assert_eq!(state.current, 0.8, "final step snaps exactly");
        assert!(!state.animating);
    }

    #[test]
    fn retarget_redirects_a_live_run() {
        let mut state = ControlState::at(0.0);
        retarget(&mut state, 1.0);
        step(&mut state);
        assert!(state.animating);

        // New host value mid-flight: same run, new goal.
        retarget(&mut state, 0.1);
        while step(&mut state) {}
        assert_eq!(state.current, 0.1);
    }

    #[test]
    fn settled_control_steps_are_free() {
        let mut state = ControlState::at(0.4);
        assert!(!step(&mut state));
        assert_eq!(state.current, 0.4);
    }

    #[test]
    fn tiny_moves_settle_immediately() {
        let mut state = ControlState::at(0.5);
        retarget(&mut state, 0.5004);
        assert!(!step(&mut state));
        assert_eq!(state.current, 0.5004);
    }
}
