//! cliptrim Compress Core
//!
//! The lossy curve-reduction engine: compression arguments, the keyframe
//! trimmer, per-channel tolerance derivation, and whole-clip trimming.
//! Pure and synchronous; persistence and batching live in the pipeline crate.

pub mod args;
pub mod clip_trim;
pub mod trimmer;

pub use args::CompressionArgs;
pub use clip_trim::{channel_epsilon, trim_clip, TrimStats};
pub use trimmer::{trim, trim_keyframes, TANGENT_EPSILON};
