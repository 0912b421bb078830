//! Per-clip compression arguments.
//!
//! Args travel in two text forms: the human-readable argument string that is
//! embedded in compression-record fingerprints, and a short-key JSON object
//! (`p`/`r`/`s`/`d`/`rms`) stored in the per-clip metadata sidecar. Sidecar
//! parsing defaults missing or malformed fields instead of failing.

use std::fmt;

use serde_json::Value as JsonValue;

/// Error tolerances and options for one clip. Cloned before edit so callers
/// can cancel or reset without touching the stored value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CompressionArgs {
    /// Position tolerance in [0,1]; 0 disables position trimming.
    pub position_error: f32,
    /// Rotation tolerance in [0,1]; 0 disables rotation trimming.
    pub rotation_error: f32,
    /// Scale tolerance in [0,1]; 0 disables scale trimming.
    pub scale_error: f32,
    /// Per-depth tolerance multiplier in [1,2].
    pub depth_scale: f32,
    /// Drop scale curves from the output clip entirely.
    pub remove_scale_curve: bool,
}

impl CompressionArgs {
    pub const DEFAULT_POSITION_ERROR: f32 = 0.01;
    pub const DEFAULT_ROTATION_ERROR: f32 = 0.05;
    pub const DEFAULT_SCALE_ERROR: f32 = 0.01;
    pub const DEFAULT_DEPTH_SCALE: f32 = 1.125;

    /// Clamp all fields into their documented ranges.
    pub fn clamped(mut self) -> Self {
        self.position_error = self.position_error.clamp(0.0, 1.0);
        self.rotation_error = self.rotation_error.clamp(0.0, 1.0);
        self.scale_error = self.scale_error.clamp(0.0, 1.0);
        self.depth_scale = self.depth_scale.clamp(1.0, 2.0);
        self
    }

    /// Parse the short-key JSON sidecar form. Missing or malformed fields
    /// fall back to their defaults; a non-object document yields defaults.
    pub fn from_json_str(s: &str) -> Self {
        let root: JsonValue = serde_json::from_str(s).unwrap_or(JsonValue::Null);
        let defaults = Self::default();
        let field = |key: &str, fallback: f32| -> f32 {
            root.get(key)
                .and_then(JsonValue::as_f64)
                .map(|v| v as f32)
                .unwrap_or(fallback)
        };
        Self {
            position_error: field("p", defaults.position_error),
            rotation_error: field("r", defaults.rotation_error),
            scale_error: field("s", defaults.scale_error),
            depth_scale: field("d", defaults.depth_scale),
            remove_scale_curve: root
                .get("rms")
                .and_then(JsonValue::as_bool)
                .unwrap_or(defaults.remove_scale_curve),
        }
        .clamped()
    }

    /// Render the short-key JSON sidecar form.
    pub fn to_json_string(&self) -> String {
        serde_json::json!({
            "p": self.position_error,
            "r": self.rotation_error,
            "s": self.scale_error,
            "d": self.depth_scale,
            "rms": self.remove_scale_curve,
        })
        .to_string()
    }
}

impl Default for CompressionArgs {
    fn default() -> Self {
        Self {
            position_error: Self::DEFAULT_POSITION_ERROR,
            rotation_error: Self::DEFAULT_ROTATION_ERROR,
            scale_error: Self::DEFAULT_SCALE_ERROR,
            depth_scale: Self::DEFAULT_DEPTH_SCALE,
            remove_scale_curve: false,
        }
    }
}

/// Canonical argument string, embedded verbatim in record fingerprints.
impl fmt::Display for CompressionArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "p = {}, r = {}, s = {}, d = {}, rms = {}",
            self.position_error,
            self.rotation_error,
            self.scale_error,
            self.depth_scale,
            self.remove_scale_curve
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_short_key_argument_string() {
        let args = CompressionArgs::default();
        assert_eq!(
            args.to_string(),
            "p = 0.01, r = 0.05, s = 0.01, d = 1.125, rms = false"
        );
    }

    #[test]
    fn sidecar_roundtrip() {
        let args = CompressionArgs {
            position_error: 0.2,
            rotation_error: 0.0,
            scale_error: 0.05,
            depth_scale: 1.5,
            remove_scale_curve: true,
        };
        let parsed = CompressionArgs::from_json_str(&args.to_json_string());
        assert_eq!(parsed, args);
    }

    #[test]
    fn malformed_fields_default_instead_of_failing() {
        let parsed = CompressionArgs::from_json_str(r#"{"p": "oops", "rms": 3}"#);
        assert_eq!(parsed, CompressionArgs::default());
        assert_eq!(
            CompressionArgs::from_json_str("not json"),
            CompressionArgs::default()
        );
    }

    #[test]
    fn parse_clamps_out_of_range_fields() {
        let parsed = CompressionArgs::from_json_str(r#"{"p": 5.0, "d": 0.5}"#);
        assert_eq!(parsed.position_error, 1.0);
        assert_eq!(parsed.depth_scale, 1.0);
    }
}
