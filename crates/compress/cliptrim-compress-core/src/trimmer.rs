//! Keyframe trimmer.
//!
//! Reduces a curve's keyframe count while keeping the reconstructed curve
//! within a value-error tolerance of the original:
//! - the first and last keyframe are always kept;
//! - a keyframe whose tangents match the last kept keyframe's out-tangent and
//!   whose value sits within epsilon of the line implied by that keyframe is
//!   removal-eligible ("redundant-linear");
//! - a keyframe is force-kept on slope reversal, tangent sign flip, tangent
//!   discontinuity, or when the accumulated value drift exceeds epsilon;
//! - when a keyframe is force-kept, the single most recently removed
//!   candidate is re-inserted ahead of it. Earlier candidates in a longer
//!   removal run are not re-evaluated against the new anchor.

use std::borrow::Cow;

use cliptrim_clip_core::{Curve, Keyframe};

/// Tangent comparisons treat magnitudes below this as zero.
pub const TANGENT_EPSILON: f64 = 1e-4;

#[inline]
fn round0(f: f64) -> f64 {
    if f.abs() < TANGENT_EPSILON {
        0.0
    } else {
        f
    }
}

/// Trim interior keyframes from an ordered slice of more than two keys.
/// Deterministic and side-effect-free; `epsilon` is the maximum permitted
/// accumulated value deviation per kept interval.
pub fn trim_keyframes(keys: &[Keyframe], epsilon: f64) -> Vec<Keyframe> {
    let count = keys.len();
    debug_assert!(count > 2, "caller filters short curves");

    let mut kept: Vec<Keyframe> = Vec::with_capacity(count);
    let mut last_removed: Option<Keyframe> = None;
    let mut error = 0.0f64;
    let mut last_out = round0(keys[0].out_tangent);
    kept.push(keys[0]);

    for k in 1..count - 1 {
        let kf = keys[k];
        let diff = keys[k].value - keys[k - 1].value;
        let in_slope =
            round0((keys[k].value - keys[k - 1].value) / (keys[k].time - keys[k - 1].time));
        let out_slope =
            round0((keys[k + 1].value - keys[k].value) / (keys[k + 1].time - keys[k].time));
        let cur_in = round0(kf.in_tangent);
        error += diff;

        let anchor = kept[kept.len() - 1];
        let next_linear_value = anchor.value + (kf.time - anchor.time) * anchor.out_tangent;
        let skip = (kf.in_tangent - anchor.out_tangent).abs() < TANGENT_EPSILON
            && (kf.in_tangent - kf.out_tangent).abs() < TANGENT_EPSILON
            && (next_linear_value - kf.value).abs() < epsilon;

        if !skip
            && (in_slope * out_slope < 0.0
                || cur_in * last_out < 0.0
                || error.abs() > epsilon
                || (cur_in - last_out).abs() > TANGENT_EPSILON)
        {
            // Re-insert the held candidate so removal never silently spans
            // more than one keyframe past the previous sample.
            if let Some(prev) = last_removed.take() {
                kept.push(prev);
            }
            kept.push(kf);
            error = 0.0;
            last_out = round0(kf.out_tangent);
        } else {
            last_removed = Some(kf);
        }
    }

    kept.push(keys[count - 1]);
    kept
}

/// Trim a single curve. Curves with two or fewer keyframes, and curves where
/// no keyframe was removable, are returned borrowed; a new curve is only
/// allocated when the keyframe count actually changed.
pub fn trim(curve: &Curve, epsilon: f64) -> Cow<'_, Curve> {
    if curve.keys.len() <= 2 {
        return Cow::Borrowed(curve);
    }
    let kept = trim_keyframes(&curve.keys, epsilon);
    if kept.len() == curve.keys.len() {
        Cow::Borrowed(curve)
    } else {
        Cow::Owned(Curve {
            pre_wrap: curve.pre_wrap,
            post_wrap: curve.post_wrap,
            keys: kept,
        })
    }
}
