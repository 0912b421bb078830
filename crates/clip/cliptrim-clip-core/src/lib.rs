//! cliptrim Clip Core (engine-agnostic)
//!
//! This crate defines the canonical animation-clip data model shared by the
//! compressor and the pipeline: keyframes, curves, curve bindings, clips,
//! the canonical text dump, and content fingerprinting.

pub mod binding;
pub mod clip;
pub mod data;
pub mod dump;
pub mod stored_clip;

// Re-exports for consumers (compressor, pipeline, CLI)
pub use binding::{CurveBinding, ValueType};
pub use clip::{AnimationClip, ClipCurve};
pub use data::{Curve, Keyframe, TangentMode, WrapMode};
pub use dump::{canonical_clip_dump, clip_fingerprint, hash_text};
pub use stored_clip::{clip_to_json, parse_clip_json};
