//! cliptrim command-line tool.
//!
//! Batch surface over the compression pipeline: `compress` runs the
//! fingerprint-driven batch, `dump` prints a clip's canonical dump, and
//! `args` shows or edits the per-clip metadata sidecar.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use cliptrim_clip_core::{canonical_clip_dump, clip_fingerprint};
use cliptrim_compress_core::CompressionArgs;
use cliptrim_pipeline_core::{
    format_memory_size, similarity_percent, AssetRepository, BackupRoots, ClipDescriptor,
    CompressOptions, CompressionReport, FsAssetRepository, PipelineContext, ProgressSink,
    CLIP_FILE_EXT, SIMILAR_NAME_THRESHOLD,
};

#[derive(Parser)]
#[command(name = "cliptrim", version, about = "Batch animation clip compressor")]
struct Cli {
    /// Repository base directory; all clip paths are relative to it.
    #[arg(long, default_value = ".", global = true)]
    base: PathBuf,
    #[command(flatten)]
    roots: RootArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct RootArgs {
    /// Root directory of the source clips.
    #[arg(long, default_value = "assets", global = true)]
    input_root: String,
    /// Sibling root holding pre-compression backups.
    #[arg(long, default_value = "__backup_animations__", global = true)]
    output_root: String,
    /// Root holding the compression record.
    #[arg(long, default_value = "__export_record__", global = true)]
    record_root: String,
}

#[derive(Subcommand)]
enum Command {
    /// Compress clips whose content fingerprint changed since the last run.
    Compress {
        /// Clip files or directories to scan; defaults to the input root.
        clips: Vec<String>,
        /// Batch-default args as comma-separated k=v pairs (p, r, s, d, rms).
        #[arg(long)]
        args: Option<String>,
        /// Refresh record fingerprints without trimming or backing up.
        #[arg(long)]
        save_only: bool,
        /// Report what would change without writing anything.
        #[arg(long)]
        dry_run: bool,
        /// Keep only clips whose name is similar to this one.
        #[arg(long)]
        similar_to: Option<String>,
    },
    /// Print a clip's canonical dump and content fingerprint.
    Dump { clip: String },
    /// Show, set, or reset per-clip compression args.
    Args {
        /// Clip files or directories.
        clips: Vec<String>,
        /// New args as comma-separated k=v pairs (p, r, s, d, rms).
        #[arg(long, conflicts_with = "reset")]
        set: Option<String>,
        /// Clear the sidecar so the clips use batch defaults.
        #[arg(long)]
        reset: bool,
    },
}

struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn report(&mut self, stage: &str, detail: &str, fraction: f32) -> bool {
        log::info!("[{stage}] {:3.0}% {detail}", fraction * 100.0);
        false
    }
}

/// Parse a "p=0.01,r=0.05,rms=true" spec on top of the defaults.
fn parse_args_spec(spec: &str) -> Result<CompressionArgs> {
    let mut args = CompressionArgs::default();
    for pair in spec.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("malformed arg pair '{pair}'"))?;
        let value = value.trim();
        match key.trim() {
            "p" => args.position_error = value.parse::<f32>()?,
            "r" => args.rotation_error = value.parse::<f32>()?,
            "s" => args.scale_error = value.parse::<f32>()?,
            "d" => args.depth_scale = value.parse::<f32>()?,
            "rms" => args.remove_scale_curve = value.parse::<bool>()?,
            other => bail!("unknown arg key '{other}'"),
        }
    }
    Ok(args.clamped())
}

/// Expand files and directories into a sorted list of clip paths.
fn collect_clips(
    repo: &FsAssetRepository,
    operands: &[String],
    input_root: &str,
) -> Vec<String> {
    if operands.is_empty() {
        return repo.list_clips(input_root);
    }
    let mut clips = Vec::new();
    for op in operands {
        if op.ends_with(CLIP_FILE_EXT) && repo.exists(op) {
            clips.push(op.clone());
        } else {
            clips.extend(repo.list_clips(op));
        }
    }
    clips.sort();
    clips.dedup();
    clips
}

/// Clip display name: file name without the clip extension.
fn clip_stem(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.strip_suffix(CLIP_FILE_EXT).unwrap_or(name)
}

fn print_report(report: &CompressionReport) {
    for clip in &report.clips {
        let size = clip.size.map(format_memory_size).unwrap_or_else(|| "--".into());
        let compressed = clip
            .compressed_size
            .map(format_memory_size)
            .unwrap_or_else(|| "--".into());
        println!("{:<56} {size} / {compressed}", clip.path);
    }
    println!(
        "size = {}, compressed = {}, saved = {}",
        format_memory_size(report.overall.total_size),
        format_memory_size(report.overall.compressed_size),
        format_memory_size(report.overall.saved_size.max(0) as u64),
    );
    println!(
        "selected: {}, recompressed: {}, unchanged: {}, wild backups removed: {}{}",
        report.selected,
        report.recompressed,
        report.unchanged,
        report.wild_removed,
        if report.cancelled { " (cancelled)" } else { "" },
    );
    for path in &report.failed {
        eprintln!("failed: {path}");
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut repo = FsAssetRepository::new(&cli.base);
    let roots = BackupRoots::new(
        &cli.roots.input_root,
        &cli.roots.output_root,
        &cli.roots.record_root,
    );

    match cli.command {
        Command::Compress {
            clips,
            args,
            save_only,
            dry_run,
            similar_to,
        } => {
            let defaults = match args.as_deref() {
                Some(spec) => parse_args_spec(spec)?,
                None => CompressionArgs::default(),
            };
            let mut descriptors: Vec<ClipDescriptor> =
                collect_clips(&repo, &clips, &roots.input_root)
                    .iter()
                    .map(|p| ClipDescriptor::selected(p))
                    .collect();
            if let Some(reference) = similar_to.as_deref() {
                descriptors.retain(|d| {
                    similarity_percent(clip_stem(&d.path), reference) > SIMILAR_NAME_THRESHOLD
                });
            }
            if descriptors.is_empty() {
                bail!("no clips selected");
            }
            let mut ctx = PipelineContext::new(roots);
            let report = ctx.compress_all(
                &mut repo,
                &descriptors,
                &defaults,
                CompressOptions { save_only, dry_run },
                &mut ConsoleProgress,
            );
            print_report(&report);
            Ok(if report.fully_succeeded() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Dump { clip } => {
            let loaded = repo
                .load_clip(&clip)
                .with_context(|| format!("loading {clip}"))?;
            print!("{}", canonical_clip_dump(&loaded));
            println!("fingerprint: {}", clip_fingerprint(&loaded));
            Ok(ExitCode::SUCCESS)
        }
        Command::Args { clips, set, reset } => {
            let new_args = match set.as_deref() {
                Some(spec) => Some(parse_args_spec(spec)?),
                None => None,
            };
            for path in collect_clips(&repo, &clips, &roots.input_root) {
                if reset {
                    repo.save_args(&path, None)
                        .with_context(|| format!("resetting args for {path}"))?;
                    println!("{path}: reset to defaults");
                } else if let Some(args) = new_args.as_ref() {
                    repo.save_args(&path, Some(args))
                        .with_context(|| format!("saving args for {path}"))?;
                    println!("{path}: {args}");
                } else {
                    match repo.load_args(&path) {
                        Some(args) => println!("{path}: {args}"),
                        None => println!("{path}: default"),
                    }
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_spec_overrides_defaults_and_clamps() {
        let args = parse_args_spec("p=0.2, rms=true, d=5").unwrap();
        assert_eq!(args.position_error, 0.2);
        assert!(args.remove_scale_curve);
        assert_eq!(args.depth_scale, 2.0);
        assert_eq!(args.rotation_error, CompressionArgs::DEFAULT_ROTATION_ERROR);
    }

    #[test]
    fn args_spec_rejects_unknown_keys() {
        assert!(parse_args_spec("q=1").is_err());
        assert!(parse_args_spec("p0.2").is_err());
    }

    #[test]
    fn clip_stem_strips_directories_and_extension() {
        assert_eq!(clip_stem("assets/anims/walk_01.clip.json"), "walk_01");
        assert_eq!(clip_stem("walk_01.clip.json"), "walk_01");
        assert_eq!(clip_stem("assets/readme.txt"), "readme.txt");
    }
}
