#![allow(dead_code)]
//! In-memory repository used by the pipeline test suites.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use cliptrim_clip_core::{clip_to_json, parse_clip_json, AnimationClip};
use cliptrim_pipeline_core::{AssetRepository, PipelineError, CLIP_FILE_EXT};

#[derive(Default)]
pub struct MemoryRepo {
    files: RefCell<HashMap<String, String>>,
    /// Paths whose delete reports success but leaves the file in place.
    pub sticky: RefCell<HashSet<String>>,
    /// Rename sources that fail with an io error.
    pub fail_rename_from: RefCell<HashSet<String>>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_clip(&self, path: &str, clip: &AnimationClip) {
        self.files
            .borrow_mut()
            .insert(path.to_string(), clip_to_json(clip));
    }

    pub fn put_text(&self, path: &str, text: &str) {
        self.files
            .borrow_mut()
            .insert(path.to_string(), text.to_string());
    }

    pub fn raw(&self, path: &str) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    pub fn remove(&self, path: &str) {
        self.files.borrow_mut().remove(path);
    }

    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.files.borrow().keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl AssetRepository for MemoryRepo {
    fn load_clip(&self, path: &str) -> Result<AnimationClip, PipelineError> {
        let text = self.raw(path).ok_or_else(|| PipelineError::Missing {
            path: path.to_string(),
        })?;
        parse_clip_json(&text).map_err(|reason| PipelineError::Parse {
            path: path.to_string(),
            reason,
        })
    }

    fn write_clip(&self, path: &str, clip: &AnimationClip) -> Result<(), PipelineError> {
        self.put_clip(path, clip);
        Ok(())
    }

    fn copy_asset(&self, src: &str, dst: &str) -> bool {
        match self.raw(src) {
            Some(text) => {
                self.put_text(dst, &text);
                true
            }
            None => false,
        }
    }

    fn delete_asset(&self, path: &str) -> Result<(), PipelineError> {
        if self.sticky.borrow().contains(path) {
            return Ok(());
        }
        self.files.borrow_mut().remove(path);
        Ok(())
    }

    fn rename_asset(&self, from: &str, to: &str) -> Result<(), PipelineError> {
        if self.fail_rename_from.borrow().contains(from) {
            return Err(PipelineError::Io {
                path: from.to_string(),
                message: "simulated rename failure".to_string(),
            });
        }
        let text = self
            .files
            .borrow_mut()
            .remove(from)
            .ok_or_else(|| PipelineError::Missing {
                path: from.to_string(),
            })?;
        self.put_text(to, &text);
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn size_of(&self, path: &str) -> Option<u64> {
        self.files.borrow().get(path).map(|t| t.len() as u64)
    }

    fn list_clips(&self, root: &str) -> Vec<String> {
        let prefix = format!("{root}/");
        let mut clips: Vec<String> = self
            .files
            .borrow()
            .keys()
            .filter(|p| p.starts_with(&prefix) && p.ends_with(CLIP_FILE_EXT))
            .cloned()
            .collect();
        clips.sort();
        clips
    }

    fn read_text(&self, path: &str) -> Option<String> {
        self.raw(path)
    }

    fn write_text(&self, path: &str, text: &str) -> Result<(), PipelineError> {
        self.put_text(path, text);
        Ok(())
    }

    fn refresh(&mut self) {}
}
