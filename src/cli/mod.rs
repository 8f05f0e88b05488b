/// CLI building blocks for the classmap binary
///
/// Modules:
/// - markdown: Markdown rendering and the size-bounded file writer
/// - merge: Concatenating a samples tree into fenced Markdown
/// - output: Output formats for single-file extraction (JSON, Markdown)
/// - parallel: Parallel directory processing with Rayon
/// - progress: Progress reporting for long-running operations
pub mod markdown;
pub mod merge;
pub mod output;
pub mod parallel;
pub mod progress;

pub use markdown::{MarkdownWriter, render_class_info};
pub use merge::{MergeSummary, merge_tree};
pub use output::{OutputFormat, OutputWriter};
pub use parallel::{DirectoryProcessor, FileOutcome, ProcessSummary};
pub use progress::ProgressReporter;
