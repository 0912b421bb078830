//! Compression record: the persisted source-path -> fingerprint map.
//!
//! The record is the pipeline's only persistent state. It loads leniently
//! (an unparsable file is a cold start, stale entries drop) and saves
//! exactly once per run, sorted by key, through a temp file.

use std::collections::BTreeMap;

use hashbrown::HashMap;

use crate::error::PipelineError;
use crate::repo::AssetRepository;
use crate::roots::BackupRoots;

pub type RecordMap = HashMap<String, String>;

#[derive(Default)]
pub struct RecordStore {
    map: RecordMap,
    loaded: bool,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the record once per run. Entries survive only when both the
    /// source file and its backup still exist; entries keyed inside the
    /// backup root are ignored. A corrupt file rebuilds from empty.
    pub fn ensure_loaded(&mut self, repo: &dyn AssetRepository, roots: &BackupRoots) {
        if self.loaded {
            return;
        }
        self.map.clear();
        if let Some(text) = repo.read_text(&roots.record_file()) {
            match serde_json::from_str::<BTreeMap<String, String>>(&text) {
                Ok(parsed) => {
                    for (path, fingerprint) in parsed {
                        if roots.in_backup_root(&path) {
                            continue;
                        }
                        if !repo.exists(&path) {
                            continue;
                        }
                        if !repo.exists(&roots.backup_path_for(&path)) {
                            continue;
                        }
                        self.map.insert(path, fingerprint);
                    }
                }
                Err(e) => {
                    log::warn!("compression record unreadable, rebuilding: {e}");
                }
            }
        }
        self.loaded = true;
    }

    pub fn get(&self, path: &str) -> Option<&String> {
        self.map.get(path)
    }

    pub fn set(&mut self, path: &str, fingerprint: String) {
        self.map.insert(path.to_string(), fingerprint);
    }

    pub fn remove(&mut self, path: &str) -> bool {
        self.map.remove(path).is_some()
    }

    pub fn map(&self) -> &RecordMap {
        &self.map
    }

    /// Persist the record sorted by key: write the temp file, then rename it
    /// over the final location.
    pub fn save(&self, repo: &dyn AssetRepository, roots: &BackupRoots) -> Result<(), PipelineError> {
        let sorted: BTreeMap<&String, &String> = self.map.iter().collect();
        let text = serde_json::to_string_pretty(&sorted).unwrap_or_default();
        let temp = roots.temp_record_file();
        repo.write_text(&temp, &text)?;
        repo.rename_asset(&temp, &roots.record_file())
    }

    /// Drop any leftover temp record file from an interrupted run.
    pub fn remove_temp(&self, repo: &dyn AssetRepository, roots: &BackupRoots) {
        let temp = roots.temp_record_file();
        if repo.exists(&temp) {
            if let Err(e) = repo.delete_asset(&temp) {
                log::warn!("failed to remove temp record file: {e}");
            }
        }
    }
}
