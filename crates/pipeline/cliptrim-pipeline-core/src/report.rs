//! Batch run reporting.

use serde::Serialize;

/// Per-clip size accounting. `size` is the pre-compression size (the backup
/// once one exists); `compressed_size` is the source file after trimming.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ClipReport {
    pub path: String,
    pub size: Option<u64>,
    pub compressed_size: Option<u64>,
}

/// Aggregate size totals across the selected clips.
#[derive(Copy, Clone, Debug, Default, Serialize)]
pub struct Overall {
    pub total_size: u64,
    pub compressed_size: u64,
    pub saved_size: i64,
}

/// Outcome of one `compress_all` run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CompressionReport {
    /// Clips the caller marked selected.
    pub selected: usize,
    /// Clips whose fingerprint changed and were (or, on a dry run, would be)
    /// recompressed.
    pub recompressed: usize,
    /// Clips whose fingerprint matched the record.
    pub unchanged: usize,
    /// Backup files deleted because their source disappeared.
    pub wild_removed: usize,
    /// True when the run was cancelled before finishing the batch.
    pub cancelled: bool,
    /// Source paths of clips that failed; retried on the next run.
    pub failed: Vec<String>,
    pub clips: Vec<ClipReport>,
    pub overall: Overall,
}

impl CompressionReport {
    pub fn fully_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Human-readable byte count.
pub fn format_memory_size(size: u64) -> String {
    const KB: f64 = 1024.0;
    let s = size as f64;
    if s < KB {
        format!("{size} B")
    } else if s < KB * KB {
        format!("{:.2} KB", s / KB)
    } else if s < KB * KB * KB {
        format!("{:.2} MB", s / (KB * KB))
    } else if s < KB * KB * KB * KB {
        format!("{:.2} GB", s / (KB * KB * KB))
    } else {
        format!("{:.2} TB", s / (KB * KB * KB * KB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_size_units() {
        assert_eq!(format_memory_size(512), "512 B");
        assert_eq!(format_memory_size(2048), "2.00 KB");
        assert_eq!(format_memory_size(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(format_memory_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }
}
