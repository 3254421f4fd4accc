//! Parameter registry: display metadata keyed by parameter index.
//!
//! The registry maps a stable [`ParamIndex`] to the metadata needed to render
//! a value on the surface: a name plus either a continuous display range or an
//! ordered list of item labels. It is immutable after load and owned by the
//! surface.
//!
//! Parameter tables have diverged between host builds, so the registry is
//! versioned data rather than a compile-time constant: hosts ship a
//! [`RegistryConfig`] JSON document, and [`ParamRegistry::poly_synth`] provides
//! the built-in factory table for the stock PolySynth engine.
//!
//! # Example
//!
//! ```
//! use fascia_core::registry::{ParamRegistry, ParamSpec};
//!
//! let registry = ParamRegistry::new([
//!     (0, ParamSpec::continuous("Gain", 0.0, 100.0).with_unit("%")),
//!     (6, ParamSpec::stepped("LFO Shape", ["Sine", "Triangle", "Square", "Saw"])),
//! ]);
//! assert_eq!(registry.spec(0).unwrap().name, "Gain");
//! assert!(registry.spec(1).is_none());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{clamp01, ParamIndex, ParamValue};

/// Current registry document version.
pub const REGISTRY_VERSION: u32 = 1;

/// Errors raised while loading a registry document.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The document is not valid JSON or does not match the schema.
    #[error("malformed registry document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The document declares a version this build does not understand.
    #[error("unsupported registry version {found} (this build reads version {REGISTRY_VERSION})")]
    UnsupportedVersion {
        /// Version found in the document.
        found: u32,
    },
}

/// The shape of one parameter: continuous range or discrete items.
///
/// Exactly one of the two shapes applies per entry. In the JSON schema the
/// shape is inferred from the fields present: an `items` list makes the entry
/// stepped, anything else is continuous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamKind {
    /// Discrete/enumerated parameter: ordered item labels.
    Stepped {
        /// Ordered labels; the normalized value selects one.
        items: Vec<String>,
    },

    /// Continuous parameter with a linear display range.
    Continuous {
        /// Lower bound of the display range.
        #[serde(default)]
        min: f64,
        /// Upper bound of the display range.
        #[serde(default = "default_max")]
        max: f64,
        /// Unit label appended to the display string (e.g. "Hz", "ms").
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
        /// Number of decimal places in the display string.
        #[serde(default)]
        decimals: usize,
    },
}

fn default_max() -> f64 {
    1.0
}

fn default_normalized() -> ParamValue {
    0.5
}

/// Display metadata for a single parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Full parameter name (e.g. "LFO Rate").
    pub name: String,

    /// Continuous range or stepped item list.
    #[serde(flatten)]
    pub kind: ParamKind,

    /// Default value in normalized form (0.0 to 1.0).
    #[serde(default = "default_normalized")]
    pub default: ParamValue,
}

impl ParamSpec {
    /// Create a continuous parameter with the given display range.
    pub fn continuous(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Continuous {
                min,
                max,
                unit: None,
                decimals: 0,
            },
            default: default_normalized(),
        }
    }

    /// Create a stepped parameter from ordered item labels.
    pub fn stepped<I, S>(name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: ParamKind::Stepped {
                items: items.into_iter().map(Into::into).collect(),
            },
            default: default_normalized(),
        }
    }

    /// Set the unit label (continuous parameters only; no-op for stepped).
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        if let ParamKind::Continuous { unit: slot, .. } = &mut self.kind {
            *slot = Some(unit.into());
        }
        self
    }

    /// Set the number of decimal places (continuous parameters only).
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        if let ParamKind::Continuous { decimals: slot, .. } = &mut self.kind {
            *slot = decimals;
        }
        self
    }

    /// Set the default normalized value.
    pub fn with_default(mut self, default: ParamValue) -> Self {
        self.default = clamp01(default);
        self
    }

    /// True if this parameter selects from discrete items.
    pub fn is_stepped(&self) -> bool {
        matches!(self.kind, ParamKind::Stepped { .. })
    }
}

/// Serializable registry document.
///
/// ```json
/// {
///   "version": 1,
///   "params": [
///     { "idx": 0, "name": "Gain", "min": 0, "max": 100, "unit": "%", "decimals": 0 },
///     { "idx": 6, "name": "LFO Shape", "items": ["Sine", "Triangle", "Square", "Saw"] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Schema version; see [`REGISTRY_VERSION`].
    pub version: u32,
    /// Parameter entries in any order.
    pub params: Vec<RegistryEntry>,
}

/// One entry of a [`RegistryConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Host parameter index.
    pub idx: ParamIndex,
    /// Display metadata.
    #[serde(flatten)]
    pub spec: ParamSpec,
}

/// Immutable table mapping parameter indices to display metadata.
///
/// Indices are not necessarily contiguous; lookups for unknown indices return
/// `None` and callers fall back to generic percentage display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamRegistry {
    version: u32,
    params: BTreeMap<ParamIndex, ParamSpec>,
}

impl ParamRegistry {
    /// Build a registry from `(index, spec)` pairs at [`REGISTRY_VERSION`].
    ///
    /// A duplicated index keeps the last entry.
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ParamIndex, ParamSpec)>,
    {
        let mut params = BTreeMap::new();
        for (idx, spec) in entries {
            if params.insert(idx, spec).is_some() {
                log::warn!("registry index {idx} declared twice; keeping the later entry");
            }
        }
        Self {
            version: REGISTRY_VERSION,
            params,
        }
    }

    /// Build a registry from a parsed configuration document.
    pub fn from_config(config: RegistryConfig) -> Result<Self, RegistryError> {
        if config.version == 0 || config.version > REGISTRY_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                found: config.version,
            });
        }
        let mut registry =
            Self::new(config.params.into_iter().map(|entry| (entry.idx, entry.spec)));
        registry.version = config.version;
        Ok(registry)
    }

    /// Parse and build a registry from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let config: RegistryConfig = serde_json::from_str(json)?;
        Self::from_config(config)
    }

    /// Export the registry as a configuration document.
    pub fn to_config(&self) -> RegistryConfig {
        RegistryConfig {
            version: self.version,
            params: self
                .params
                .iter()
                .map(|(idx, spec)| RegistryEntry {
                    idx: *idx,
                    spec: spec.clone(),
                })
                .collect(),
        }
    }

    /// Look up the metadata for a parameter index.
    pub fn spec(&self, idx: ParamIndex) -> Option<&ParamSpec> {
        self.params.get(&idx)
    }

    /// Default normalized value for a parameter; 0.5 when unregistered.
    pub fn default_value(&self, idx: ParamIndex) -> ParamValue {
        self.spec(idx).map_or(0.5, |spec| spec.default)
    }

    /// Registered indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = ParamIndex> + '_ {
        self.params.keys().copied()
    }

    /// Number of registered parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True if no parameters are registered.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Document version this registry was loaded from.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Built-in factory table for the stock PolySynth engine.
    ///
    /// Hosts with a divergent parameter table load their own
    /// [`RegistryConfig`] instead; this table is not canonical.
    pub fn poly_synth() -> Self {
        use poly_params::*;

        const WAVEFORMS: [&str; 4] = ["Saw", "Square", "Triangle", "Sine"];

        Self::new([
            (GAIN, ParamSpec::continuous("Gain", 0.0, 100.0).with_unit("%")),
            (
                ATTACK,
                ParamSpec::continuous("Attack", 1.0, 1000.0).with_unit("ms"),
            ),
            (
                DECAY,
                ParamSpec::continuous("Decay", 1.0, 1000.0).with_unit("ms"),
            ),
            (
                SUSTAIN,
                ParamSpec::continuous("Sustain", 0.0, 100.0).with_unit("%"),
            ),
            (
                RELEASE,
                ParamSpec::continuous("Release", 2.0, 1000.0).with_unit("ms"),
            ),
            (
                LFO_SHAPE,
                ParamSpec::stepped("LFO Shape", ["Sine", "Triangle", "Square", "Saw"]),
            ),
            (
                LFO_RATE,
                ParamSpec::continuous("LFO Rate", 0.01, 40.0)
                    .with_unit("Hz")
                    .with_decimals(2),
            ),
            (
                LFO_DEPTH,
                ParamSpec::continuous("LFO Depth", 0.0, 100.0).with_unit("%"),
            ),
            (
                CUTOFF,
                ParamSpec::continuous("Cutoff", 20.0, 20000.0).with_unit("Hz"),
            ),
            (
                RESONANCE,
                ParamSpec::continuous("Resonance", 0.0, 100.0).with_unit("%"),
            ),
            (OSC_WAVE, ParamSpec::stepped("Osc Wave", WAVEFORMS)),
            (OSC_B_WAVE, ParamSpec::stepped("Osc B Wave", WAVEFORMS)),
            (
                OSC_MIX,
                ParamSpec::continuous("Osc Mix", 0.0, 100.0).with_unit("%"),
            ),
            (
                OSC_PULSE_A,
                ParamSpec::continuous("Pulse Width A", 0.0, 100.0).with_unit("%"),
            ),
            (
                OSC_PULSE_B,
                ParamSpec::continuous("Pulse Width B", 0.0, 100.0).with_unit("%"),
            ),
            (
                FILTER_ENV,
                ParamSpec::continuous("Filter Env", 0.0, 100.0).with_unit("%"),
            ),
            (
                POLY_OSC_B_FREQ_A,
                ParamSpec::continuous("B -> Freq A", 0.0, 100.0).with_unit("%"),
            ),
            (
                POLY_OSC_B_PWM,
                ParamSpec::continuous("B -> PWM A", 0.0, 100.0).with_unit("%"),
            ),
            (
                POLY_OSC_B_FILTER,
                ParamSpec::continuous("B -> Filter", 0.0, 100.0).with_unit("%"),
            ),
            (
                POLY_ENV_FREQ_A,
                ParamSpec::continuous("Env -> Freq A", 0.0, 100.0).with_unit("%"),
            ),
            (
                POLY_ENV_PWM,
                ParamSpec::continuous("Env -> PWM A", 0.0, 100.0).with_unit("%"),
            ),
            (
                POLY_ENV_FILTER,
                ParamSpec::continuous("Env -> Filter", 0.0, 100.0).with_unit("%"),
            ),
            (
                FILTER_MODEL,
                ParamSpec::stepped(
                    "Filter Model",
                    ["Classic", "Ladder", "Prophet 12", "Prophet 24"],
                ),
            ),
        ])
    }
}

/// Parameter indices of the stock PolySynth engine.
///
/// The gaps (1, 8, 9) are host-internal parameters the surface does not bind.
pub mod poly_params {
    use crate::types::ParamIndex;

    pub const GAIN: ParamIndex = 0;
    pub const ATTACK: ParamIndex = 2;
    pub const DECAY: ParamIndex = 3;
    pub const SUSTAIN: ParamIndex = 4;
    pub const RELEASE: ParamIndex = 5;
    pub const LFO_SHAPE: ParamIndex = 6;
    pub const LFO_RATE: ParamIndex = 7;
    pub const LFO_DEPTH: ParamIndex = 10;
    pub const CUTOFF: ParamIndex = 11;
    pub const RESONANCE: ParamIndex = 12;
    pub const OSC_WAVE: ParamIndex = 13;
    pub const OSC_B_WAVE: ParamIndex = 14;
    pub const OSC_MIX: ParamIndex = 15;
    pub const OSC_PULSE_A: ParamIndex = 16;
    pub const OSC_PULSE_B: ParamIndex = 17;
    pub const FILTER_ENV: ParamIndex = 18;
    pub const POLY_OSC_B_FREQ_A: ParamIndex = 19;
    pub const POLY_OSC_B_PWM: ParamIndex = 20;
    pub const POLY_OSC_B_FILTER: ParamIndex = 21;
    pub const POLY_ENV_FREQ_A: ParamIndex = 22;
    pub const POLY_ENV_PWM: ParamIndex = 23;
    pub const POLY_ENV_FILTER: ParamIndex = 24;
    pub const FILTER_MODEL: ParamIndex = 25;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poly_synth_table_lookups() {
        let registry = ParamRegistry::poly_synth();
        assert_eq!(registry.spec(poly_params::GAIN).unwrap().name, "Gain");
        assert!(registry.spec(poly_params::LFO_SHAPE).unwrap().is_stepped());
        // Host-internal indices are absent, not zero-filled.
        assert!(registry.spec(1).is_none());
        assert!(registry.spec(8).is_none());
        assert_eq!(registry.len(), 23);
    }

    #[test]
    fn default_value_falls_back_to_midpoint() {
        let registry = ParamRegistry::new([(
            3,
            ParamSpec::continuous("Depth", 0.0, 100.0).with_default(0.25),
        )]);
        assert_eq!(registry.default_value(3), 0.25);
        assert_eq!(registry.default_value(99), 0.5);
    }

    #[test]
    fn config_round_trip() {
        let registry = ParamRegistry::poly_synth();
        let json = serde_json::to_string(&registry.to_config()).unwrap();
        let reloaded = ParamRegistry::from_json(&json).unwrap();
        assert_eq!(reloaded, registry);
    }

    #[test]
    fn from_json_reads_both_shapes() {
        let json = r#"{
            "version": 1,
            "params": [
                { "idx": 0, "name": "Gain", "min": 0.0, "max": 100.0, "unit": "%" },
                { "idx": 6, "name": "LFO Shape", "items": ["Sine", "Triangle"] }
            ]
        }"#;
        let registry = ParamRegistry::from_json(json).unwrap();
        assert!(!registry.spec(0).unwrap().is_stepped());
        assert!(registry.spec(6).unwrap().is_stepped());
    }

    #[test]
    fn unknown_version_is_rejected() {
        let json = r#"{ "version": 99, "params": [] }"#;
        match ParamRegistry::from_json(json) {
            Err(RegistryError::UnsupportedVersion { found: 99 }) => {}
            other => panic!("expected version error, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_index_keeps_last_entry() {
        let registry = ParamRegistry::new([
            (0, ParamSpec::continuous("First", 0.0, 1.0)),
            (0, ParamSpec::continuous("Second", 0.0, 1.0)),
        ]);
        assert_eq!(registry.spec(0).unwrap().name, "Second");
        assert_eq!(registry.len(), 1);
    }
}
