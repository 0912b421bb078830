//! The batch compression pipeline.
//!
//! One `PipelineContext` owns the compression record for exactly one run.
//! Per clip, the flow is: fingerprint compare -> (re-)backup when the source
//! content changed -> trim the pristine backup -> atomically swap the
//! trimmed result over the source -> queue the record update. Queued record
//! updates are applied in a second pass after the repository flush, and the
//! record file is persisted exactly once, even on failure or cancellation.

use cliptrim_clip_core::clip_fingerprint;
use cliptrim_compress_core::{trim_clip, CompressionArgs};

use crate::error::PipelineError;
use crate::progress::ProgressSink;
use crate::record::{RecordMap, RecordStore};
use crate::repo::AssetRepository;
use crate::report::{ClipReport, CompressionReport, Overall};
use crate::roots::BackupRoots;

/// One clip the caller wants considered by a batch run.
#[derive(Clone, Debug)]
pub struct ClipDescriptor {
    /// Source path, repository-relative.
    pub path: String,
    pub selected: bool,
    /// Per-clip args; falls back to the sidecar, then the batch default.
    pub args: Option<CompressionArgs>,
}

impl ClipDescriptor {
    pub fn selected(path: &str) -> Self {
        Self {
            path: path.to_string(),
            selected: true,
            args: None,
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct CompressOptions {
    /// Refresh record fingerprints without trimming or backing up.
    pub save_only: bool,
    /// Report what would recompress without touching files or records.
    pub dry_run: bool,
}

/// Record update queued during the clip loop and applied after the flush,
/// when both the swapped source and the backup are in their final state.
struct DeferredRecord {
    source: String,
    backup: String,
    args_string: String,
}

/// Owns the record map and root configuration for one batch run.
pub struct PipelineContext {
    pub roots: BackupRoots,
    records: RecordStore,
}

impl PipelineContext {
    pub fn new(roots: BackupRoots) -> Self {
        Self {
            roots,
            records: RecordStore::new(),
        }
    }

    /// The in-memory record map (for inspection by hosts and tests).
    pub fn records(&self) -> &RecordMap {
        self.records.map()
    }

    /// Run the batch: garbage-collect wild backups, recompress every selected
    /// clip whose fingerprint changed, and persist the updated record.
    pub fn compress_all(
        &mut self,
        repo: &mut dyn AssetRepository,
        clips: &[ClipDescriptor],
        defaults: &CompressionArgs,
        options: CompressOptions,
        progress: &mut dyn ProgressSink,
    ) -> CompressionReport {
        let mut report = CompressionReport::default();
        self.records.ensure_loaded(repo, &self.roots);
        if !options.dry_run {
            report.wild_removed = self.clear_wild_backups(repo);
            self.records.remove_temp(repo, &self.roots);
        }

        let selected: Vec<&ClipDescriptor> = clips.iter().filter(|c| c.selected).collect();
        report.selected = selected.len();
        let mut deferred: Vec<DeferredRecord> = Vec::new();

        for (i, desc) in selected.iter().enumerate() {
            // Clips already inside the backup root must never be processed.
            if self.roots.in_backup_root(&desc.path) {
                continue;
            }
            let fraction = i as f32 / selected.len().max(1) as f32;
            if progress.report("backup", &desc.path, fraction) {
                report.cancelled = true;
                break;
            }

            let args = desc
                .args
                .or_else(|| repo.load_args(&desc.path))
                .unwrap_or(*defaults)
                .clamped();
            let backup = self.roots.backup_path_for(&desc.path);
            let src_hash = hash_clip_at(repo, &desc.path);
            let backup_hash = hash_clip_at(repo, &backup);
            let full_hash = format!("{src_hash} | {backup_hash} : {args}");
            let old_hash = self
                .records
                .get(&desc.path)
                .cloned()
                .unwrap_or_default();
            if old_hash == full_hash {
                report.unchanged += 1;
                continue;
            }
            if options.dry_run {
                report.recompressed += 1;
                continue;
            }

            match process_clip(
                repo,
                &desc.path,
                &backup,
                &args,
                &old_hash,
                &src_hash,
                options.save_only,
            ) {
                Ok(()) => deferred.push(DeferredRecord {
                    source: desc.path.clone(),
                    backup,
                    args_string: args.to_string(),
                }),
                Err(e) => {
                    log::error!("compress failed for {}: {e}", desc.path);
                    report.failed.push(desc.path.clone());
                }
            }
        }

        // Second pass: recompute fingerprints once writes are flushed, then
        // fold the queued updates into the record map.
        if !deferred.is_empty() {
            repo.refresh();
            for (i, d) in deferred.iter().enumerate() {
                let _ = progress.report("save", &d.source, i as f32 / deferred.len() as f32);
                let src_hash = hash_clip_at(repo, &d.source);
                let backup_hash = hash_clip_at(repo, &d.backup);
                self.records.set(
                    &d.source,
                    format!("{src_hash} | {backup_hash} : {}", d.args_string),
                );
            }
            report.recompressed = deferred.len();
        }

        // Persist once per run, also after per-clip failures or cancellation,
        // so the record keeps every clip that did succeed.
        if !options.dry_run {
            if let Err(e) = self.records.save(repo, &self.roots) {
                log::error!("failed to save compression record: {e}");
            }
            self.records.remove_temp(repo, &self.roots);
        }

        self.fill_sizes(repo, &selected, &mut report);
        report
    }

    /// Delete backup files whose source no longer exists, dropping their
    /// record entries with them.
    fn clear_wild_backups(&mut self, repo: &mut dyn AssetRepository) -> usize {
        let mut count = 0;
        for backup in repo.list_clips(&self.roots.output_root) {
            let source = self.roots.source_path_for(&backup);
            if repo.exists(&source) {
                continue;
            }
            log::info!("deleting wild backup: {backup}");
            if let Err(e) = repo.delete_asset(&backup) {
                log::error!("failed to delete wild backup {backup}: {e}");
                continue;
            }
            self.records.remove(&source);
            count += 1;
        }
        count
    }

    fn fill_sizes(
        &self,
        repo: &dyn AssetRepository,
        selected: &[&ClipDescriptor],
        report: &mut CompressionReport,
    ) {
        let mut overall = Overall::default();
        for desc in selected {
            let backup = self.roots.backup_path_for(&desc.path);
            let src_size = repo.size_of(&desc.path);
            // The backup holds the original; once it exists, the source file
            // is the compressed copy.
            let clip = match repo.size_of(&backup) {
                Some(original) => ClipReport {
                    path: desc.path.clone(),
                    size: Some(original),
                    compressed_size: src_size,
                },
                None => ClipReport {
                    path: desc.path.clone(),
                    size: src_size,
                    compressed_size: None,
                },
            };
            let size = clip.size.unwrap_or(0);
            overall.total_size += size;
            overall.compressed_size += clip.compressed_size.unwrap_or(size);
            report.clips.push(clip);
        }
        overall.saved_size = overall.total_size as i64 - overall.compressed_size as i64;
        report.overall = overall;
    }
}

/// Fingerprint of the clip stored at `path`; empty when missing or unreadable.
fn hash_clip_at(repo: &dyn AssetRepository, path: &str) -> String {
    if !repo.exists(path) {
        return String::new();
    }
    match repo.load_clip(path) {
        Ok(clip) => clip_fingerprint(&clip),
        Err(e) => {
            log::warn!("unreadable clip at {path}: {e}");
            String::new()
        }
    }
}

/// Backup (when the source content itself changed), trim, and swap one clip.
fn process_clip(
    repo: &mut dyn AssetRepository,
    source: &str,
    backup: &str,
    args: &CompressionArgs,
    old_hash: &str,
    src_hash: &str,
    save_only: bool,
) -> Result<(), PipelineError> {
    // The backup must mirror the true pre-compression original before the
    // trimmer runs again. The source-hash component leads the fingerprint,
    // so a prefix match means the source content itself is unchanged.
    if !save_only && !old_hash.starts_with(src_hash) {
        if repo.exists(backup) {
            repo.delete_asset(backup)?;
            repo.refresh();
        }
        if !repo.copy_asset(source, backup) {
            return Err(PipelineError::CopyFailed {
                src: source.to_string(),
                dst: backup.to_string(),
            });
        }
        repo.refresh();
    }

    if !save_only {
        let original = repo.load_clip(backup)?;
        let (trimmed, stats) = trim_clip(&original, args);
        log::debug!(
            "trimmed {source}: {} -> {} keys ({} curves, {} scale curves dropped)",
            stats.keys_before,
            stats.keys_after,
            stats.curves_trimmed,
            stats.scale_curves_removed
        );
        swap_in_trimmed(repo, source, backup, &trimmed)?;
    }
    Ok(())
}

/// Atomically replace the source with the trimmed clip: write to a temp
/// location, delete the original, then rename the temp into place. If the
/// original survives the delete, the temp artifact is discarded and the old
/// file (and its record entry) stay untouched.
fn swap_in_trimmed(
    repo: &mut dyn AssetRepository,
    source: &str,
    backup: &str,
    trimmed: &cliptrim_clip_core::AnimationClip,
) -> Result<(), PipelineError> {
    let temp = format!("{backup}.swap");
    if repo.exists(&temp) {
        repo.delete_asset(&temp)?;
    }
    repo.write_clip(&temp, trimmed)?;

    if let Err(e) = repo.delete_asset(source) {
        let _ = repo.delete_asset(&temp);
        return Err(e);
    }
    if repo.exists(source) {
        let _ = repo.delete_asset(&temp);
        return Err(PipelineError::SwapConflict {
            path: source.to_string(),
        });
    }
    if let Err(e) = repo.rename_asset(&temp, source) {
        log::error!("rename {temp} -> {source} failed: {e}");
        let _ = repo.delete_asset(&temp);
        return Err(e);
    }
    Ok(())
}
