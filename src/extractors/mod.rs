// Classmap's Language Extractors Module
//
// Tree-sitter based extractors that turn Java and Kotlin sources into class
// outlines (classes, constants, methods, properties and their comments).

pub mod base;
pub mod java;
pub mod kotlin;
pub mod manager;

// Re-export the base extractor types
pub use base::{ClassInfo, CommentTracker, Member, NO_COMMENT, SourceLanguage};
pub use manager::ExtractorManager;
