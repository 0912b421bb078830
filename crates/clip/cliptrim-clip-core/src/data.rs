//! Canonical keyframe/curve data model.
//! Bindings and whole clips live in binding.rs and clip.rs.

use serde::{Deserialize, Serialize};

/// Tangent constraint recorded on a keyframe. The trimmer only reads the
/// numeric tangents; the mode is carried through untouched so the dump and
/// the stored clip format stay faithful to the authoring tool.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TangentMode {
    #[default]
    Free,
    Auto,
    Linear,
    Constant,
}

impl TangentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TangentMode::Free => "Free",
            TangentMode::Auto => "Auto",
            TangentMode::Linear => "Linear",
            TangentMode::Constant => "Constant",
        }
    }
}

/// Extrapolation behavior outside the keyed range.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum WrapMode {
    #[default]
    Clamp,
    Loop,
    PingPong,
}

impl WrapMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WrapMode::Clamp => "Clamp",
            WrapMode::Loop => "Loop",
            WrapMode::PingPong => "PingPong",
        }
    }
}

/// A single sampled keyframe. Immutable once built; times are unique and
/// ascending within a curve.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    pub time: f64,
    pub value: f64,
    pub in_tangent: f64,
    pub out_tangent: f64,
    #[serde(default)]
    pub tangent_mode: TangentMode,
}

impl Keyframe {
    pub fn new(time: f64, value: f64, in_tangent: f64, out_tangent: f64) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
            tangent_mode: TangentMode::default(),
        }
    }
}

/// One scalar animated channel: ordered keyframes plus wrap modes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Curve {
    #[serde(default)]
    pub pre_wrap: WrapMode,
    #[serde(default)]
    pub post_wrap: WrapMode,
    pub keys: Vec<Keyframe>,
}

impl Curve {
    pub fn new(keys: Vec<Keyframe>) -> Self {
        Self {
            pre_wrap: WrapMode::default(),
            post_wrap: WrapMode::default(),
            keys,
        }
    }

    /// Validate basic invariants (finite fields, strictly increasing times).
    pub fn validate_basic(&self) -> Result<(), String> {
        let mut last = f64::NEG_INFINITY;
        for k in &self.keys {
            if !k.time.is_finite()
                || !k.value.is_finite()
                || !k.in_tangent.is_finite()
                || !k.out_tangent.is_finite()
            {
                return Err(format!("keyframe at t={} has non-finite fields", k.time));
            }
            if k.time <= last {
                return Err(format!(
                    "keyframe times must be strictly increasing (t={} after t={})",
                    k.time, last
                ));
            }
            last = k.time;
        }
        Ok(())
    }
}
