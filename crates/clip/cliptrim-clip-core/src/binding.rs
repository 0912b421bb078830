//! Curve bindings: which target a curve animates.
//!
//! A binding identifies one scalar channel by hierarchy path and property
//! name (e.g. "root/spine/arm_l" + "m_LocalPosition.x"). The value type and
//! the path depth jointly select the error tolerance during trimming.

use serde::{Deserialize, Serialize};

/// Broad classification of an animated property, used to pick the error
/// tolerance for a channel.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Position,
    Rotation,
    Scale,
    #[default]
    Other,
}

impl ValueType {
    /// Classify a property name by substring, first match wins:
    /// Scale, then Position, then Rotation.
    pub fn classify(property_name: &str) -> Self {
        if property_name.contains("Scale") {
            ValueType::Scale
        } else if property_name.contains("Position") {
            ValueType::Position
        } else if property_name.contains("Rotation") {
            ValueType::Rotation
        } else {
            ValueType::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Position => "Position",
            ValueType::Rotation => "Rotation",
            ValueType::Scale => "Scale",
            ValueType::Other => "Other",
        }
    }
}

/// Identifies a curve's target within a clip.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveBinding {
    /// Hierarchy path of the animated node ("/"-separated, "" for the root).
    pub target_path: String,
    /// Property name on that node (e.g. "m_LocalPosition.x").
    pub property_name: String,
    pub value_type: ValueType,
}

impl CurveBinding {
    pub fn new(target_path: &str, property_name: &str, value_type: ValueType) -> Self {
        Self {
            target_path: target_path.to_string(),
            property_name: property_name.to_string(),
            value_type,
        }
    }

    /// Build a binding classifying the value type from the property name.
    pub fn classified(target_path: &str, property_name: &str) -> Self {
        Self::new(
            target_path,
            property_name,
            ValueType::classify(property_name),
        )
    }

    /// Number of "/"-separated segments in the target path. Deeper joints
    /// accumulate more visual error per unit of local error, so tolerance
    /// scales with this.
    pub fn depth(&self) -> usize {
        self.target_path.split('/').count()
    }
}
