//! Parameter value formatting.
//!
//! [`format_param`] turns `(index, normalized value)` into the human-readable
//! string shown under a control. It is a pure function of the registry
//! metadata and the value, with no side effects, and it is total: every
//! normalized value produces a string for every index, registered or not.

use crate::registry::{ParamKind, ParamRegistry};
use crate::types::{clamp01, ParamIndex, ParamValue};

/// Format a normalized value for display.
///
/// - Unregistered index: generic percentage, e.g. `"42%"`.
/// - Stepped parameter: the selected item label prefixed with the parameter
///   name, e.g. `"LFO Shape: Sine"`.
/// - Continuous parameter: the value mapped linearly into `[min, max]`,
///   rounded to `decimals` places, with the unit appended when present,
///   e.g. `"440 Hz"`.
pub fn format_param(registry: &ParamRegistry, idx: ParamIndex, value: ParamValue) -> String {
    let value = clamp01(value);

    let Some(spec) = registry.spec(idx) else {
        return percent_fallback(value);
    };

    match &spec.kind {
        ParamKind::Stepped { items } => {
            if items.is_empty() {
                return percent_fallback(value);
            }
            let slot = ((value * items.len() as f64).floor() as usize).min(items.len() - 1);
            format!("{}: {}", spec.name, items[slot])
        }
        ParamKind::Continuous {
            min,
            max,
            unit,
            decimals,
        } => {
            let plain = min + value * (max - min);
            match unit {
                Some(unit) => format!("{:.prec$} {}", plain, unit, prec = *decimals),
                None => format!("{:.prec$}", plain, prec = *decimals),
            }
        }
    }
}

fn percent_fallback(value: ParamValue) -> String {
    format!("{}%", (value * 100.0).round())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ParamSpec;

    fn registry() -> ParamRegistry {
        ParamRegistry::new([
            (0, ParamSpec::continuous("Gain", 0.0, 100.0).with_unit("%")),
            (
                7,
                ParamSpec::continuous("LFO Rate", 0.01, 40.0)
                    .with_unit("Hz")
                    .with_decimals(2),
            ),
            (
                6,
                ParamSpec::stepped("LFO Shape", ["Sine", "Triangle", "Square", "Saw"]),
            ),
            (12, ParamSpec::continuous("Morph", 0.0, 1.0).with_decimals(2)),
        ])
    }

    #[test]
    fn unregistered_index_formats_as_percentage() {
        assert_eq!(format_param(&registry(), 99, 0.42), "42%");
        assert_eq!(format_param(&registry(), 99, 0.0), "0%");
        assert_eq!(format_param(&registry(), 99, 1.0), "100%");
    }

    #[test]
    fn continuous_maps_into_display_range() {
        let registry = registry();
        assert_eq!(format_param(&registry, 0, 0.5), "50 %");
        assert_eq!(format_param(&registry, 7, 1.0), "40.00 Hz");
        assert_eq!(format_param(&registry, 12, 0.25), "0.25");
    }

    #[test]
    fn stepped_selects_item_by_floor() {
        let registry = registry();
        assert_eq!(format_param(&registry, 6, 0.0), "LFO Shape: Sine");
        assert_eq!(format_param(&registry, 6, 0.26), "LFO Shape: Triangle");
        // value == 1.0 would floor past the end; the last item is kept.
        assert_eq!(format_param(&registry, 6, 1.0), "LFO Shape: Saw");
    }

    #[test]
    fn never_panics_for_any_input() {
        let registry = registry();
        for idx in [0, 6, 7, 12, 99, u32::MAX] {
            for value in [-2.0, 0.0, 0.33, 1.0, 7.5, f64::NAN, f64::INFINITY] {
                let text = format_param(&registry, idx, value);
                assert!(!text.is_empty());
            }
        }
    }
}
