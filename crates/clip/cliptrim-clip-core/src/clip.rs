//! Whole-clip container: a named set of bound curves.

use serde::{Deserialize, Serialize};

use crate::binding::CurveBinding;
use crate::data::Curve;

/// One bound channel of a clip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipCurve {
    pub binding: CurveBinding,
    pub curve: Curve,
}

/// An animation clip: ordered curves, each with its binding. Asset paths
/// are a pipeline concern and never stored on the clip itself.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    /// Clip duration in seconds.
    pub length: f64,
    pub curves: Vec<ClipCurve>,
}

impl AnimationClip {
    pub fn new(name: &str, length: f64) -> Self {
        Self {
            name: name.to_string(),
            length,
            curves: Vec::new(),
        }
    }

    pub fn push_curve(&mut self, binding: CurveBinding, curve: Curve) {
        self.curves.push(ClipCurve { binding, curve });
    }

    /// Total keyframe count across all curves.
    pub fn key_count(&self) -> usize {
        self.curves.iter().map(|c| c.curve.keys.len()).sum()
    }

    /// Validate every curve and the clip length.
    pub fn validate_basic(&self) -> Result<(), String> {
        if !self.length.is_finite() || self.length < 0.0 {
            return Err(format!("clip '{}' has invalid length", self.name));
        }
        for c in &self.curves {
            c.curve.validate_basic().map_err(|e| {
                format!(
                    "curve '{}'/'{}': {e}",
                    c.binding.target_path, c.binding.property_name
                )
            })?;
        }
        Ok(())
    }
}
