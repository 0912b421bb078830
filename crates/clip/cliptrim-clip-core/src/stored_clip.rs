//! Stored clip file format (JSON).
//!
//! Clips persist as JSON documents mapping directly onto the serde derives
//! in data.rs/binding.rs/clip.rs. Parsing validates basic invariants so the
//! rest of the pipeline can assume ordered, finite keyframes.

use crate::clip::AnimationClip;

/// Parse a stored clip JSON document and validate it.
pub fn parse_clip_json(s: &str) -> Result<AnimationClip, String> {
    let clip: AnimationClip =
        serde_json::from_str(s).map_err(|e| format!("parse error: {e}"))?;
    clip.validate_basic()?;
    Ok(clip)
}

/// Serialize a clip to the stored JSON format.
pub fn clip_to_json(clip: &AnimationClip) -> String {
    // Serialization of these plain data types cannot fail.
    serde_json::to_string_pretty(clip).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::CurveBinding;
    use crate::data::{Curve, Keyframe, WrapMode};

    #[test]
    fn roundtrip_preserves_clip() {
        let mut clip = AnimationClip::new("idle", 2.0);
        let mut curve = Curve::new(vec![
            Keyframe::new(0.0, 1.0, 0.0, 0.5),
            Keyframe::new(2.0, 2.0, 0.5, 0.0),
        ]);
        curve.post_wrap = WrapMode::Loop;
        clip.push_curve(
            CurveBinding::classified("root", "m_LocalScale.y"),
            curve,
        );
        let text = clip_to_json(&clip);
        let parsed = parse_clip_json(&text).expect("roundtrip parse");
        assert_eq!(parsed, clip);
    }

    #[test]
    fn parse_rejects_unordered_keys() {
        let mut clip = AnimationClip::new("bad", 1.0);
        clip.push_curve(
            CurveBinding::classified("root", "m_LocalPosition.x"),
            Curve::new(vec![
                Keyframe::new(1.0, 0.0, 0.0, 0.0),
                Keyframe::new(0.0, 0.0, 0.0, 0.0),
            ]),
        );
        let text = clip_to_json(&clip);
        assert!(parse_clip_json(&text).is_err());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_clip_json("not json").is_err());
    }
}
