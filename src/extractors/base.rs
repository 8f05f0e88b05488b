// Base Extractor Types for Classmap
//
// Shared outline model (ClassInfo/Member), comment tracking and the tree-sitter
// helpers used by both the Java and the Kotlin extractor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tree_sitter::Node;

/// Placeholder rendered for members without a preceding comment
pub const NO_COMMENT: &str = "No Comment";

/// Languages with a class outline extractor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    Java,
    Kotlin,
}

impl SourceLanguage {
    /// Detect language from the file extension (`.java` / `.kt`)
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("java") => Some(SourceLanguage::Java),
            Some("kt") => Some(SourceLanguage::Kotlin),
            _ => None,
        }
    }

    pub fn tree_sitter_language(&self) -> tree_sitter::Language {
        match self {
            SourceLanguage::Java => tree_sitter_java::LANGUAGE.into(),
            SourceLanguage::Kotlin => tree_sitter_kotlin_ng::LANGUAGE.into(),
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLanguage::Java => write!(f, "java"),
            SourceLanguage::Kotlin => write!(f, "kotlin"),
        }
    }
}

/// A named class member (constant, method, property, companion object or enum value)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    /// Nearest comment preceding the member, if it was not claimed earlier
    pub comment: Option<String>,
}

impl Member {
    pub fn new(name: impl Into<String>, comment: Option<String>) -> Self {
        Self {
            name: name.into(),
            comment,
        }
    }

    /// Comment text, or the `No Comment` placeholder
    pub fn comment_or_placeholder(&self) -> &str {
        self.comment.as_deref().unwrap_or(NO_COMMENT)
    }
}

/// Outline of one class-like declaration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassInfo {
    pub name: String,
    pub comment: Option<String>,
    pub constants: Vec<Member>,
    pub methods: Vec<Member>,
    pub properties: Vec<Member>,
    pub companion_objects: Vec<Member>,
    pub enum_values: Vec<Member>,
    /// Annotations on the declaration itself, without the leading `@`
    pub annotations: Vec<String>,
    pub is_enum: bool,
    pub is_interface: bool,
    pub is_data_class: bool,
}

impl ClassInfo {
    pub fn new(name: impl Into<String>, comment: Option<String>) -> Self {
        Self {
            name: name.into(),
            comment,
            ..Default::default()
        }
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m.name == name)
    }

    pub fn member_count(&self) -> usize {
        self.constants.len()
            + self.methods.len()
            + self.properties.len()
            + self.companion_objects.len()
            + self.enum_values.len()
    }
}

/// Hands out each comment to at most one declaration.
///
/// A declaration on line `n` receives the last comment that starts strictly
/// after the previously served line and strictly before `n`. Serving a line
/// moves the cursor even when no comment matched.
#[derive(Debug, Clone, Default)]
pub struct CommentTracker {
    comments: Vec<(String, usize)>,
    last_processed_line: Option<usize>,
}

impl CommentTracker {
    /// `comments` are `(cleaned text, 1-based start line)` in source order
    pub fn new(comments: Vec<(String, usize)>) -> Self {
        Self {
            comments,
            last_processed_line: None,
        }
    }

    /// Collect every comment node below `root`
    pub fn from_tree(root: &Node, content: &str) -> Self {
        Self::new(collect_comments(root, content))
    }

    pub fn nearest_comment(&mut self, target_line: usize) -> Option<String> {
        let floor = self.last_processed_line;
        let found = self
            .comments
            .iter()
            .rev()
            .find(|(_, line)| floor.is_none_or(|f| *line > f) && *line < target_line)
            .map(|(text, _)| text.clone())
            .filter(|text| !text.is_empty());

        self.last_processed_line = Some(target_line);
        found
    }
}

/// Gather `(cleaned comment, 1-based start line)` pairs in source order
pub fn collect_comments(root: &Node, content: &str) -> Vec<(String, usize)> {
    let mut comments = Vec::new();
    let mut stack = vec![*root];

    while let Some(node) = stack.pop() {
        if node.kind().contains("comment") {
            let raw = node.utf8_text(content.as_bytes()).unwrap_or_default();
            comments.push((clean_comment(raw), node.start_position().row + 1));
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    comments
}

/// Strip comment markers and doc-comment gutters, joining lines with spaces
pub fn clean_comment(raw: &str) -> String {
    let raw = raw.trim();

    if let Some(body) = raw.strip_prefix("/*").and_then(|b| b.strip_suffix("*/")) {
        let body = body.strip_prefix('*').unwrap_or(body);
        return body
            .lines()
            .map(|line| line.trim().trim_start_matches('*').trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
    }

    if let Some(body) = raw.strip_prefix("//") {
        return body.trim_start_matches('/').trim().to_string();
    }

    raw.to_string()
}

/// Node helpers shared by the language extractors
pub struct BaseExtractor {
    pub file_path: String,
    pub content: String,
}

impl BaseExtractor {
    pub fn new(file_path: String, content: String) -> Self {
        Self {
            file_path,
            content,
        }
    }

    /// Get text from a tree-sitter node
    pub fn get_node_text(&self, node: &Node) -> String {
        let start_byte = node.start_byte();
        let end_byte = node.end_byte();

        // Use byte slice but handle UTF-8 boundaries properly
        let content_bytes = self.content.as_bytes();
        if start_byte < content_bytes.len() && end_byte <= content_bytes.len() {
            String::from_utf8_lossy(&content_bytes[start_byte..end_byte]).to_string()
        } else {
            String::new()
        }
    }

    /// 1-based line of the node's first token (modifiers and annotations included)
    pub fn start_line(&self, node: &Node) -> usize {
        node.start_position().row + 1
    }

    /// Get field text safely
    pub fn get_field_text(&self, node: &Node, field_name: &str) -> Option<String> {
        node.child_by_field_name(field_name)
            .map(|field_node| self.get_node_text(&field_node))
    }

    /// Find first child by type
    pub fn find_child_by_type<'a>(&self, node: &Node<'a>, child_type: &str) -> Option<Node<'a>> {
        let mut cursor = node.walk();
        let found = node.children(&mut cursor).find(|c| c.kind() == child_type);
        found
    }

    /// Find children by type
    pub fn find_children_by_type<'a>(&self, node: &Node<'a>, child_type: &str) -> Vec<Node<'a>> {
        let mut cursor = node.walk();
        node.children(&mut cursor)
            .filter(|c| c.kind() == child_type)
            .collect()
    }

    /// Walk up until `stop` matches, returning the first matching ancestor
    pub fn find_ancestor<'a, F>(&self, node: &Node<'a>, mut stop: F) -> Option<Node<'a>>
    where
        F: FnMut(&Node<'a>) -> bool,
    {
        let mut current = node.parent();
        while let Some(parent) = current {
            if stop(&parent) {
                return Some(parent);
            }
            current = parent.parent();
        }
        None
    }

    /// Check if node has error
    pub fn has_error(&self, node: &Node) -> bool {
        node.has_error() || node.kind() == "ERROR"
    }
}
