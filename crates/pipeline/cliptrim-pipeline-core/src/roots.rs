//! Root directories and path rewriting.
//!
//! The backup store mirrors the source tree under a sibling root; rewriting
//! is a prefix substitution anchored at the start of the path. The record
//! file lives under its own root next to both.

use serde::{Deserialize, Serialize};

pub const RECORD_FILE_NAME: &str = "AnimationCompressRecord.json";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackupRoots {
    /// Root holding the source clips.
    pub input_root: String,
    /// Sibling root mirroring the source tree with pre-compression originals.
    pub output_root: String,
    /// Root holding the compression record.
    pub record_root: String,
}

impl Default for BackupRoots {
    fn default() -> Self {
        Self {
            input_root: "assets".to_string(),
            output_root: "__backup_animations__".to_string(),
            record_root: "__export_record__".to_string(),
        }
    }
}

/// Anchored prefix substitution; paths outside `from` are returned unchanged.
fn rewrite_prefix(path: &str, from: &str, to: &str) -> String {
    if path == from {
        return to.to_string();
    }
    match path.strip_prefix(&format!("{from}/")) {
        Some(rest) => format!("{to}/{rest}"),
        None => path.to_string(),
    }
}

impl BackupRoots {
    pub fn new(input_root: &str, output_root: &str, record_root: &str) -> Self {
        Self {
            input_root: input_root.to_string(),
            output_root: output_root.to_string(),
            record_root: record_root.to_string(),
        }
    }

    pub fn record_file(&self) -> String {
        format!("{}/{}", self.record_root, RECORD_FILE_NAME)
    }

    pub fn temp_record_file(&self) -> String {
        format!("{}.tmp", self.record_file())
    }

    /// Backup location for a source clip path.
    pub fn backup_path_for(&self, source: &str) -> String {
        rewrite_prefix(source, &self.input_root, &self.output_root)
    }

    /// Source location for a backup clip path.
    pub fn source_path_for(&self, backup: &str) -> String {
        rewrite_prefix(backup, &self.output_root, &self.input_root)
    }

    pub fn in_backup_root(&self, path: &str) -> bool {
        path == self.output_root || path.starts_with(&format!("{}/", self.output_root))
    }
}
