//! ExtractorManager - Public API for class outline extraction
//!
//! Detects the language of a file, parses it with a pooled tree-sitter parser
//! and delegates to the language-specific extractor.

use crate::error::{ClassmapError, Result};
use crate::extractors::base::{ClassInfo, SourceLanguage};
use crate::extractors::java::JavaExtractor;
use crate::extractors::kotlin::KotlinExtractor;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;
use tree_sitter::Parser;

/// Manager for the language extractors.
///
/// Parsers are created lazily and reused for every file of the same language,
/// so one manager per worker thread is enough.
#[derive(Default)]
pub struct ExtractorManager {
    parsers: HashMap<SourceLanguage, Parser>,
}

impl ExtractorManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if file extension is supported
    pub fn is_supported_file(path: &Path) -> bool {
        SourceLanguage::from_path(path).is_some()
    }

    /// Extract class outlines from file content using the appropriate language extractor
    pub fn extract_classes(&mut self, file_path: &str, content: &str) -> Result<Vec<ClassInfo>> {
        let language = SourceLanguage::from_path(Path::new(file_path))
            .ok_or_else(|| ClassmapError::UnsupportedLanguage(file_path.to_string()))?;

        let parser = self.get_parser(language)?;
        let tree = parser
            .parse(content, None)
            .ok_or_else(|| ClassmapError::Parse(file_path.to_string()))?;

        let classes = match language {
            SourceLanguage::Java => {
                JavaExtractor::new(file_path.to_string(), content.to_string()).extract_classes(&tree)
            }
            SourceLanguage::Kotlin => {
                KotlinExtractor::new(file_path.to_string(), content.to_string()).extract_classes(&tree)
            }
        };

        debug!(
            "Extracted {} classes from {} file: {}",
            classes.len(),
            language,
            file_path
        );
        Ok(classes)
    }

    /// Read a file from disk and extract its class outlines
    pub fn extract_file(&mut self, path: &Path) -> Result<Vec<ClassInfo>> {
        let content = std::fs::read_to_string(path)?;
        self.extract_classes(&path.to_string_lossy(), &content)
    }

    /// Get or create a parser for the specified language
    fn get_parser(&mut self, language: SourceLanguage) -> Result<&mut Parser> {
        if !self.parsers.contains_key(&language) {
            let mut parser = Parser::new();
            parser
                .set_language(&language.tree_sitter_language())
                .map_err(|e| ClassmapError::Language {
                    language: language.to_string(),
                    message: e.to_string(),
                })?;
            self.parsers.insert(language, parser);
            debug!("🔧 Created new parser for language: {}", language);
        }

        self.parsers
            .get_mut(&language)
            .ok_or_else(|| ClassmapError::Parse(format!("no parser for {}", language)))
    }
}
