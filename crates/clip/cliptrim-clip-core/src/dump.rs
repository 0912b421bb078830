//! Canonical clip dump and content fingerprinting.
//!
//! The dump is a newline-separated text serialization of every curve's
//! binding, wrap modes, and full keyframe list, in the clip's native curve
//! order. Fingerprints hash this text, so asset renames and on-disk metadata
//! churn never change a clip's fingerprint.

use std::fmt::Write as _;

use crate::clip::AnimationClip;

/// Content-address a piece of text as a hex digest.
pub fn hash_text(text: &str) -> String {
    hex::encode(blake3::hash(text.as_bytes()).as_bytes())
}

/// Canonical text serialization of a clip.
pub fn canonical_clip_dump(clip: &AnimationClip) -> String {
    let mut out = String::new();
    // Infallible on String; keep the pushes terse.
    let _ = writeln!(out, "{}", clip.name);
    for c in &clip.curves {
        let curve = &c.curve;
        let _ = writeln!(out, "{}", c.binding.value_type.as_str());
        let _ = writeln!(out, "{}", c.binding.property_name);
        let _ = writeln!(out, "{}", c.binding.target_path);
        let _ = writeln!(out, "{}", curve.pre_wrap.as_str());
        let _ = writeln!(out, "{}", curve.post_wrap.as_str());
        let _ = writeln!(out, "{}", curve.keys.len());
        for k in &curve.keys {
            let _ = writeln!(out, "{}", k.time);
            let _ = writeln!(out, "{}", k.value);
            let _ = writeln!(out, "{}", k.in_tangent);
            let _ = writeln!(out, "{}", k.out_tangent);
            let _ = writeln!(out, "{}", k.tangent_mode.as_str());
        }
    }
    out
}

/// Fingerprint of a clip's content (hash of the canonical dump).
pub fn clip_fingerprint(clip: &AnimationClip) -> String {
    hash_text(&canonical_clip_dump(clip))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::CurveBinding;
    use crate::data::{Curve, Keyframe};

    fn sample_clip() -> AnimationClip {
        let mut clip = AnimationClip::new("walk", 1.0);
        clip.push_curve(
            CurveBinding::classified("root/hip", "m_LocalPosition.x"),
            Curve::new(vec![
                Keyframe::new(0.0, 0.0, 0.0, 1.0),
                Keyframe::new(1.0, 1.0, 1.0, 1.0),
            ]),
        );
        clip
    }

    #[test]
    fn dump_is_stable_for_equal_clips() {
        assert_eq!(
            canonical_clip_dump(&sample_clip()),
            canonical_clip_dump(&sample_clip())
        );
        assert_eq!(clip_fingerprint(&sample_clip()), clip_fingerprint(&sample_clip()));
    }

    #[test]
    fn dump_reflects_value_changes() {
        let a = sample_clip();
        let mut b = sample_clip();
        b.curves[0].curve.keys[1].value = 2.0;
        assert_ne!(clip_fingerprint(&a), clip_fingerprint(&b));
    }

    #[test]
    fn dump_lists_binding_before_keys() {
        let dump = canonical_clip_dump(&sample_clip());
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines[0], "walk");
        assert_eq!(lines[1], "Position");
        assert_eq!(lines[2], "m_LocalPosition.x");
        assert_eq!(lines[3], "root/hip");
        assert_eq!(lines[6], "2");
    }
}
