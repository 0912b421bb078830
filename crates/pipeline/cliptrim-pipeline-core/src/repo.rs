//! Asset repository: the storage seam of the pipeline.
//!
//! All trait methods address assets by repository-relative, "/"-separated
//! paths; `FsAssetRepository` maps those onto a base directory. Clips are
//! stored as JSON documents (see cliptrim-clip-core::stored_clip); per-clip
//! compression args live in a `<clip>.meta` sidecar.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cliptrim_clip_core::{clip_to_json, parse_clip_json, AnimationClip};
use cliptrim_compress_core::CompressionArgs;

use crate::error::PipelineError;

/// File extension of stored clips.
pub const CLIP_FILE_EXT: &str = ".clip.json";

/// Location of a clip's args metadata sidecar.
pub fn args_sidecar_path(clip_path: &str) -> String {
    format!("{clip_path}.meta")
}

pub trait AssetRepository {
    fn load_clip(&self, path: &str) -> Result<AnimationClip, PipelineError>;
    fn write_clip(&self, path: &str, clip: &AnimationClip) -> Result<(), PipelineError>;
    /// Copy an asset; false on failure (the caller logs and skips the clip).
    fn copy_asset(&self, src: &str, dst: &str) -> bool;
    /// Remove an asset; removing a missing asset is not an error.
    fn delete_asset(&self, path: &str) -> Result<(), PipelineError>;
    fn rename_asset(&self, from: &str, to: &str) -> Result<(), PipelineError>;
    fn exists(&self, path: &str) -> bool;
    fn size_of(&self, path: &str) -> Option<u64>;
    /// All clip files under `root`, recursively, sorted.
    fn list_clips(&self, root: &str) -> Vec<String>;
    fn read_text(&self, path: &str) -> Option<String>;
    fn write_text(&self, path: &str, text: &str) -> Result<(), PipelineError>;
    /// Flush pending writes so subsequent reads observe them.
    fn refresh(&mut self);

    /// Read the args sidecar; None when absent or empty (use batch defaults).
    fn load_args(&self, clip_path: &str) -> Option<CompressionArgs> {
        let text = self.read_text(&args_sidecar_path(clip_path))?;
        if text.trim().is_empty() {
            return None;
        }
        Some(CompressionArgs::from_json_str(&text))
    }

    /// Write or clear the args sidecar.
    fn save_args(
        &self,
        clip_path: &str,
        args: Option<&CompressionArgs>,
    ) -> Result<(), PipelineError> {
        let sidecar = args_sidecar_path(clip_path);
        match args {
            Some(a) => self.write_text(&sidecar, &a.to_json_string()),
            None => self.delete_asset(&sidecar),
        }
    }
}

/// Filesystem-backed repository rooted at a base directory.
pub struct FsAssetRepository {
    base: PathBuf,
}

impl FsAssetRepository {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base.join(path)
    }

    fn ensure_parent(full: &Path) -> io::Result<()> {
        match full.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }

    fn to_repo_path(&self, full: &Path) -> Option<String> {
        let rel = full.strip_prefix(&self.base).ok()?;
        let mut out = String::new();
        for comp in rel.components() {
            if !out.is_empty() {
                out.push('/');
            }
            out.push_str(&comp.as_os_str().to_string_lossy());
        }
        Some(out)
    }

    fn walk_files(dir: &Path, out: &mut Vec<PathBuf>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => return,
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                Self::walk_files(&path, out);
            } else {
                out.push(path);
            }
        }
    }
}

impl AssetRepository for FsAssetRepository {
    fn load_clip(&self, path: &str) -> Result<AnimationClip, PipelineError> {
        let full = self.resolve(path);
        let text = fs::read_to_string(&full).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                PipelineError::Missing {
                    path: path.to_string(),
                }
            } else {
                PipelineError::io(path, e)
            }
        })?;
        parse_clip_json(&text).map_err(|reason| PipelineError::Parse {
            path: path.to_string(),
            reason,
        })
    }

    fn write_clip(&self, path: &str, clip: &AnimationClip) -> Result<(), PipelineError> {
        self.write_text(path, &clip_to_json(clip))
    }

    fn copy_asset(&self, src: &str, dst: &str) -> bool {
        let to = self.resolve(dst);
        if let Err(e) = Self::ensure_parent(&to) {
            log::error!("create directory for {dst} failed: {e}");
            return false;
        }
        match fs::copy(self.resolve(src), to) {
            Ok(_) => true,
            Err(e) => {
                log::error!("copy asset failed: {src} -> {dst}: {e}");
                false
            }
        }
    }

    fn delete_asset(&self, path: &str) -> Result<(), PipelineError> {
        let full = self.resolve(path);
        if !full.exists() {
            return Ok(());
        }
        fs::remove_file(full).map_err(|e| PipelineError::io(path, e))
    }

    fn rename_asset(&self, from: &str, to: &str) -> Result<(), PipelineError> {
        let target = self.resolve(to);
        Self::ensure_parent(&target).map_err(|e| PipelineError::io(to, e))?;
        fs::rename(self.resolve(from), target).map_err(|e| PipelineError::io(from, e))
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }

    fn size_of(&self, path: &str) -> Option<u64> {
        fs::metadata(self.resolve(path)).ok().map(|m| m.len())
    }

    fn list_clips(&self, root: &str) -> Vec<String> {
        let mut files = Vec::new();
        Self::walk_files(&self.resolve(root), &mut files);
        let mut clips: Vec<String> = files
            .iter()
            .filter_map(|p| self.to_repo_path(p))
            .filter(|p| p.ends_with(CLIP_FILE_EXT))
            .collect();
        clips.sort();
        clips
    }

    fn read_text(&self, path: &str) -> Option<String> {
        fs::read_to_string(self.resolve(path)).ok()
    }

    fn write_text(&self, path: &str, text: &str) -> Result<(), PipelineError> {
        let full = self.resolve(path);
        Self::ensure_parent(&full).map_err(|e| PipelineError::io(path, e))?;
        // Stage next to the target, then rename into place.
        let staging = PathBuf::from(format!("{}.partial", full.display()));
        fs::write(&staging, text).map_err(|e| PipelineError::io(path, e))?;
        fs::rename(&staging, &full).map_err(|e| PipelineError::io(path, e))
    }

    fn refresh(&mut self) {
        // Local filesystem writes are visible immediately.
    }
}
