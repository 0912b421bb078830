//! Whole-clip trimming: tolerance derivation, channel selection, reassembly.

use std::borrow::Cow;

use cliptrim_clip_core::{AnimationClip, CurveBinding, ValueType};

use crate::args::CompressionArgs;
use crate::trimmer::trim;

/// Per-clip trim statistics, reported back to the pipeline.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TrimStats {
    pub curves_trimmed: usize,
    pub scale_curves_removed: usize,
    pub keys_before: usize,
    pub keys_after: usize,
}

/// Resolve the error tolerance for one channel, or None when the channel is
/// copied unmodified. Priority: scale, then position, then rotation (rotation
/// trimming is suppressed while scale curves are being removed). The
/// tolerance scales with the binding's path depth.
pub fn channel_epsilon(binding: &CurveBinding, args: &CompressionArgs) -> Option<f64> {
    let depth = binding.depth() as f64;
    let scaled = |base: f32| (base.abs() as f64) * (args.depth_scale as f64) * depth;
    match binding.value_type {
        ValueType::Scale if args.scale_error > 0.0 => Some(scaled(args.scale_error)),
        ValueType::Position if args.position_error > 0.0 => Some(scaled(args.position_error)),
        ValueType::Rotation if !args.remove_scale_curve && args.rotation_error > 0.0 => {
            Some(scaled(args.rotation_error))
        }
        _ => None,
    }
}

/// Trim every curve of a clip according to `args`, dropping scale curves
/// entirely when requested. Name, length, and curve order are preserved.
pub fn trim_clip(clip: &AnimationClip, args: &CompressionArgs) -> (AnimationClip, TrimStats) {
    let mut out = AnimationClip::new(&clip.name, clip.length);
    let mut stats = TrimStats::default();
    for c in &clip.curves {
        stats.keys_before += c.curve.keys.len();
        if args.remove_scale_curve && c.binding.value_type == ValueType::Scale {
            stats.scale_curves_removed += 1;
            continue;
        }
        let trimmed = match channel_epsilon(&c.binding, args) {
            Some(epsilon) => trim(&c.curve, epsilon),
            None => Cow::Borrowed(&c.curve),
        };
        if trimmed.keys.len() != c.curve.keys.len() {
            stats.curves_trimmed += 1;
        }
        stats.keys_after += trimmed.keys.len();
        out.push_curve(c.binding.clone(), trimmed.into_owned());
    }
    (out, stats)
}
