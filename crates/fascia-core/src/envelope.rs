//! ADSR envelope geometry.
//!
//! Pure derivation from four normalized values to the polyline a drawing
//! surface strokes and fills. All coordinates are in the surface's own pixel
//! space; the widget layer recomputes on every value change and on resize.

use crate::types::{clamp01, ParamValue};

/// Floor applied to attack/decay/release so no segment collapses to zero
/// width on screen.
pub const MIN_SEGMENT: f64 = 0.01;

/// The four normalized values an amplitude envelope is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeShape {
    pub attack: ParamValue,
    pub decay: ParamValue,
    pub sustain: ParamValue,
    pub release: ParamValue,
}

impl EnvelopeShape {
    /// Build a shape, clamping each source value to [0, 1].
    pub fn new(attack: ParamValue, decay: ParamValue, sustain: ParamValue, release: ParamValue) -> Self {
        Self {
            attack: clamp01(attack),
            decay: clamp01(decay),
            sustain: clamp01(sustain),
            release: clamp01(release),
        }
    }

    /// Compute the envelope polyline for a `width` x `height` surface.
    ///
    /// Attack, decay, and release each occupy at most a quarter of the width;
    /// the sustain line holds between decay end and release start:
    ///
    /// ```text
    /// (0,h) → (attack_x, 0) → (decay_x, sustain_y) → (release_x, sustain_y) → (w,h)
    /// ```
    pub fn points(&self, width: f64, height: f64) -> [(f64, f64); 5] {
        let attack = self.attack.max(MIN_SEGMENT);
        let decay = self.decay.max(MIN_SEGMENT);
        let release = self.release.max(MIN_SEGMENT);

        let attack_x = width * attack * 0.25;
        let decay_x = attack_x + width * decay * 0.25;
        let release_x = width - width * release * 0.25;
        let sustain_y = height - self.sustain * height;

        [
            (0.0, height),
            (attack_x, 0.0),
            (decay_x, sustain_y),
            (release_x, sustain_y),
            (width, height),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_times_keep_the_minimum_segment_width() {
        let shape = EnvelopeShape::new(0.0, 0.0, 0.5, 0.0);
        let [start, peak, knee, hold, end] = shape.points(200.0, 100.0);

        assert_eq!(start, (0.0, 100.0));
        assert_eq!(peak, (0.5, 0.0));
        assert_eq!(knee, (1.0, 50.0));
        assert_eq!(hold, (199.5, 50.0));
        assert_eq!(end, (200.0, 100.0));
    }

    #[test]
    fn full_times_split_the_width_in_quarters() {
        let shape = EnvelopeShape::new(1.0, 1.0, 1.0, 1.0);
        let [_, peak, knee, hold, _] = shape.points(400.0, 100.0);

        assert_eq!(peak.0, 100.0);
        assert_eq!(knee, (200.0, 0.0));
        assert_eq!(hold, (300.0, 0.0));
    }

    #[test]
    fn sustain_level_maps_top_down() {
        // Full sustain draws the hold line along the top edge.
        let top = EnvelopeShape::new(0.2, 0.2, 1.0, 0.2).points(100.0, 80.0);
        assert_eq!(top[2].1, 0.0);

        // Zero sustain drops it to the baseline.
        let bottom = EnvelopeShape::new(0.2, 0.2, 0.0, 0.2).points(100.0, 80.0);
        assert_eq!(bottom[2].1, 80.0);
    }

    #[test]
    fn sources_are_clamped() {
        let shape = EnvelopeShape::new(3.0, -1.0, 2.0, 0.5);
        assert_eq!(shape.attack, 1.0);
        assert_eq!(shape.decay, 0.0);
        assert_eq!(shape.sustain, 1.0);
    }
}
