//! Shared clip and curve builders for the cliptrim test suites.

use cliptrim_clip_core::{AnimationClip, Curve, CurveBinding, Keyframe};

/// Keyframe with explicit tangents and the default tangent mode.
pub fn key(time: f64, value: f64, in_tangent: f64, out_tangent: f64) -> Keyframe {
    Keyframe::new(time, value, in_tangent, out_tangent)
}

/// Curve whose tangents are consistent with linear interpolation between
/// the given (time, value) points: each keyframe's in/out tangent equals the
/// slope of the adjacent segment.
pub fn linear_curve(points: &[(f64, f64)]) -> Curve {
    let n = points.len();
    let slope = |a: (f64, f64), b: (f64, f64)| (b.1 - a.1) / (b.0 - a.0);
    let mut keys = Vec::with_capacity(n);
    for (i, p) in points.iter().enumerate() {
        let in_t = if i > 0 { slope(points[i - 1], *p) } else { 0.0 };
        let out_t = if i + 1 < n { slope(*p, points[i + 1]) } else { 0.0 };
        let in_t = if i == 0 { out_t } else { in_t };
        let out_t = if i + 1 == n { in_t } else { out_t };
        keys.push(key(p.0, p.1, in_t, out_t));
    }
    Curve::new(keys)
}

/// Curve holding a constant value with zero tangents.
pub fn flat_curve(value: f64, times: &[f64]) -> Curve {
    Curve::new(times.iter().map(|t| key(*t, value, 0.0, 0.0)).collect())
}

pub fn position_binding(path: &str, axis: char) -> CurveBinding {
    CurveBinding::classified(path, &format!("m_LocalPosition.{axis}"))
}

pub fn rotation_binding(path: &str, axis: char) -> CurveBinding {
    CurveBinding::classified(path, &format!("m_LocalRotation.{axis}"))
}

pub fn scale_binding(path: &str, axis: char) -> CurveBinding {
    CurveBinding::classified(path, &format!("m_LocalScale.{axis}"))
}

/// Clip from a list of bound curves; length is the max keyed time.
pub fn transform_clip(name: &str, curves: Vec<(CurveBinding, Curve)>) -> AnimationClip {
    let length = curves
        .iter()
        .flat_map(|(_, c)| c.keys.last().map(|k| k.time))
        .fold(0.0f64, f64::max);
    let mut clip = AnimationClip::new(name, length);
    for (binding, curve) in curves {
        clip.push_curve(binding, curve);
    }
    clip
}
