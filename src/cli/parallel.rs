/// Parallel directory processing
///
/// Uses a dedicated Rayon pool to parse files; outcomes flow over a channel to a
/// single consumer that owns the MarkdownWriter, so output blocks never interleave.
/// Blocks are written in completion order.
use crate::cli::markdown::MarkdownWriter;
use crate::cli::progress::ProgressReporter;
use crate::config::ProcessorConfig;
use crate::error::{ClassmapError, Result};
use crate::extractors::{ClassInfo, ExtractorManager};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use tracing::{error, info};
use walkdir::WalkDir;

/// Result of parsing one source file
#[derive(Debug)]
pub struct FileOutcome {
    /// Dotted path relative to the source root (`com.foo.Bar.java`)
    pub class_path: String,
    pub result: std::result::Result<Vec<ClassInfo>, String>,
}

/// Totals of a directory run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessSummary {
    pub total_files: usize,
    pub processed: usize,
    pub failed: usize,
    pub classes: usize,
    pub output_files: Vec<PathBuf>,
}

/// Discover all Java and Kotlin files below `directory`, sorted by path
pub fn discover_source_files(directory: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(directory)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| ExtractorManager::is_supported_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Path relative to `root` with components joined by `.`
pub fn format_class_path(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join(".")
}

/// Read and extract a single file; failures are captured, never propagated
pub fn parse_file(manager: &mut ExtractorManager, path: &Path, root: &Path) -> FileOutcome {
    let class_path = format_class_path(path, root);
    let result = manager.extract_file(path).map_err(|e| e.to_string());
    FileOutcome { class_path, result }
}

/// Walks a source tree and renders every class outline to Markdown
pub struct DirectoryProcessor {
    config: ProcessorConfig,
}

impl DirectoryProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Process the configured source directory
    pub fn run(&self) -> Result<ProcessSummary> {
        self.config.validate().map_err(ClassmapError::InvalidConfig)?;

        let source_dir = self.config.source_dir.clone();
        let files = discover_source_files(&source_dir);
        let total_files = files.len();
        info!("Found {} Java and Kotlin files to process", total_files);

        let mut writer = MarkdownWriter::new(
            &self.config.output_dir,
            &self.config.base_name,
            self.config.max_lines,
            &self.config.intro,
        )?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|i| format!("classmap-worker-{}", i))
            .build()?;

        let (sender, receiver) = mpsc::channel::<FileOutcome>();
        pool.spawn(move || {
            files.into_par_iter().for_each_init(
                || (sender.clone(), ExtractorManager::new()),
                |(sender, manager), path| {
                    // The receiver only disappears if the consumer failed
                    let _ = sender.send(parse_file(manager, &path, &source_dir));
                },
            );
        });

        let mut summary = ProcessSummary {
            total_files,
            ..Default::default()
        };
        let mut progress = ProgressReporter::new(total_files);

        for outcome in receiver {
            summary.processed += 1;
            match outcome.result {
                Err(e) => {
                    error!("Error processing {}: {}", outcome.class_path, e);
                    summary.failed += 1;
                }
                Ok(classes) if !classes.is_empty() => {
                    writer.write_class_info(&outcome.class_path, &classes)?;
                    summary.classes += classes.len();
                }
                Ok(_) => {}
            }
            progress.report(summary.processed);
        }

        summary.output_files = writer.close()?;
        progress.complete(summary.classes, summary.failed);
        info!(
            "Markdown files generated with base name: {}",
            self.config.base_name
        );
        Ok(summary)
    }
}
