// Classmap - Java/Kotlin Class Outline Extractor Library
//!
//! Classmap walks a source tree, extracts the class outline of every Java and
//! Kotlin file with tree-sitter, and renders the result as size-bounded
//! Markdown files.

pub mod cli;
pub mod config;
pub mod error;
pub mod extractors;

#[cfg(test)]
pub mod tests;

// Re-export common types
pub use cli::{DirectoryProcessor, MarkdownWriter, ProcessSummary};
pub use config::ProcessorConfig;
pub use error::{ClassmapError, Result};
pub use extractors::{ClassInfo, ExtractorManager, Member, SourceLanguage};
