//! cliptrim Pipeline Core
//!
//! The batch compression pipeline: decides which clips need recompression
//! from content fingerprints, performs the backup/trim/swap sequence with
//! crash-safety, and persists the compression record so repeated runs are
//! idempotent. Single-threaded and cooperative: progress is reported and
//! cancellation checked once per clip.

pub mod error;
pub mod pipeline;
pub mod progress;
pub mod record;
pub mod repo;
pub mod report;
pub mod roots;
pub mod similarity;

pub use error::PipelineError;
pub use pipeline::{ClipDescriptor, CompressOptions, PipelineContext};
pub use progress::{NullProgress, ProgressSink};
pub use record::{RecordMap, RecordStore};
pub use repo::{args_sidecar_path, AssetRepository, FsAssetRepository, CLIP_FILE_EXT};
pub use report::{format_memory_size, ClipReport, CompressionReport, Overall};
pub use roots::{BackupRoots, RECORD_FILE_NAME};
pub use similarity::{levenshtein, similarity_percent, SIMILAR_NAME_THRESHOLD};
