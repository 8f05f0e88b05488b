// Kotlin Extractor
//
// Builds a class outline from a tree-sitter-kotlin-ng tree. Only top-level
// declarations (class, interface, enum class, data class, object) produce an
// outline; members declared anywhere in their class bodies, including nested
// classes and companion objects, are attributed to the top-level declaration.
//
// Handles:
// - const val constants and non-private val/var properties
// - Member functions and extension functions (named by function, not receiver)
// - Companion objects (explicit name or `Companion`)
// - Data class primary constructor parameters
// - Enum entries of top-level enum classes

use crate::extractors::base::{BaseExtractor, ClassInfo, CommentTracker, Member};
use tracing::debug;
use tree_sitter::{Node, Tree};

/// Scopes that end the search for an enclosing class body
const LOCAL_SCOPES: &[&str] = &[
    "function_body",
    "block",
    "statements",
    "lambda_literal",
    "annotated_lambda",
    "anonymous_initializer",
    "control_structure_body",
    "getter",
    "setter",
    "source_file",
];

/// Walk events; `Leave` closes the class declaration entered before its children
enum Step<'a> {
    Visit(Node<'a>),
    Leave { top_level: bool },
}

pub struct KotlinExtractor {
    base: BaseExtractor,
    comments: CommentTracker,
    classes: Vec<ClassInfo>,
    current_class: Option<ClassInfo>,
    /// Node id of the top-level declaration being filled
    current_node_id: Option<usize>,
    nesting_level: usize,
}

impl KotlinExtractor {
    pub fn new(file_path: String, content: String) -> Self {
        Self {
            base: BaseExtractor::new(file_path, content),
            comments: CommentTracker::default(),
            classes: Vec::new(),
            current_class: None,
            current_node_id: None,
            nesting_level: 0,
        }
    }

    pub fn extract_classes(&mut self, tree: &Tree) -> Vec<ClassInfo> {
        let root = tree.root_node();
        if self.base.has_error(&root) {
            debug!("Syntax errors in {}, extracting from partial tree", self.base.file_path);
        }

        self.comments = CommentTracker::from_tree(&root, &self.base.content);
        self.classes.clear();
        self.current_class = None;
        self.current_node_id = None;
        self.nesting_level = 0;

        // Iterative walk: generated sources nest expressions thousands deep
        let mut steps = vec![Step::Visit(root)];
        while let Some(step) = steps.pop() {
            match step {
                Step::Leave { top_level } => self.leave_class_declaration(top_level),
                Step::Visit(node) => {
                    if !node.is_named() {
                        continue; // Skip unnamed nodes
                    }
                    if let Some(top_level) = self.visit_node(node) {
                        steps.push(Step::Leave { top_level });
                    }
                    let children: Vec<Node> = node.children(&mut node.walk()).collect();
                    steps.extend(children.into_iter().rev().map(Step::Visit));
                }
            }
        }

        std::mem::take(&mut self.classes)
    }

    /// Handle one node before its children.
    ///
    /// Returns `Some(top_level)` when a class declaration was entered.
    fn visit_node(&mut self, node: Node) -> Option<bool> {
        match node.kind() {
            "class_declaration" | "interface_declaration" | "object_declaration" => {
                return Some(self.enter_class_declaration(node));
            }
            "property_declaration" => self.extract_property(node),
            "function_declaration" => self.extract_function(node),
            "companion_object" => self.extract_companion_object(node),
            "class_parameter" => self.extract_class_parameter(node),
            "enum_entry" => self.extract_enum_entry(node),
            _ => {}
        }
        None
    }

    fn enter_class_declaration(&mut self, node: Node) -> bool {
        self.nesting_level += 1;
        let top_level = self.nesting_level == 1;
        if top_level {
            self.enter_top_level_class(node);
        }
        top_level
    }

    fn leave_class_declaration(&mut self, top_level: bool) {
        if top_level {
            if let Some(class_info) = self.current_class.take() {
                self.classes.push(class_info);
            }
            self.current_node_id = None;
        }
        self.nesting_level -= 1;
    }

    fn enter_top_level_class(&mut self, node: Node) {
        let Some(name_node) = self.base.find_child_by_type(&node, "identifier") else {
            debug!("No class identifier found for {}", node.kind());
            return;
        };
        let name = self.base.get_node_text(&name_node);
        let modifiers = self.extract_modifiers(&node);

        let comment = self.comments.nearest_comment(self.base.start_line(&node));
        let mut class_info = ClassInfo::new(name, comment);

        class_info.annotations = modifiers
            .iter()
            .filter(|m| m.starts_with('@'))
            .map(|m| m.trim_start_matches('@').to_string())
            .collect();
        class_info.is_data_class = modifiers.iter().any(|m| m == "data");
        class_info.is_interface = node.kind() == "interface_declaration"
            || self.base.find_child_by_type(&node, "interface").is_some();
        class_info.is_enum = modifiers.iter().any(|m| m == "enum")
            || self.base.find_child_by_type(&node, "enum_class_body").is_some();

        debug!(
            "Created new {}: {}",
            if class_info.is_interface { "interface" } else { "class" },
            class_info.name
        );
        self.current_class = Some(class_info);
        self.current_node_id = Some(node.id());
    }

    fn extract_property(&mut self, node: Node) {
        if self.current_class.is_none() || !self.is_member_level(&node) {
            return;
        }

        let Some(name) = self.extract_property_name(&node) else {
            return;
        };
        let modifiers = self.extract_modifiers(&node);
        if modifiers.iter().any(|m| m == "private") {
            return;
        }

        let is_const = modifiers.iter().any(|m| m == "const");
        let has_binding = node
            .children(&mut node.walk())
            .any(|c| matches!(c.kind(), "val" | "var" | "binding_pattern_kind"));
        if !is_const && !has_binding {
            return;
        }

        let comment = self.comments.nearest_comment(self.base.start_line(&node));
        if let Some(class_info) = self.current_class.as_mut() {
            let member = Member::new(name, comment);
            if is_const {
                class_info.constants.push(member);
            } else {
                class_info.properties.push(member);
            }
        }
    }

    fn extract_function(&mut self, node: Node) {
        if self.current_class.is_none() || !self.is_member_level(&node) {
            return;
        }

        // The receiver of an extension function is a user_type, so the first
        // direct identifier is always the function name
        let Some(name_node) = self.base.find_child_by_type(&node, "identifier") else {
            return;
        };
        let name = self.base.get_node_text(&name_node);
        let comment = self.comments.nearest_comment(self.base.start_line(&node));

        if let Some(class_info) = self.current_class.as_mut() {
            debug!("Added function '{}' to class {}", name, class_info.name);
            class_info.methods.push(Member::new(name, comment));
        }
    }

    fn extract_companion_object(&mut self, node: Node) {
        if self.current_class.is_none() {
            return;
        }

        let name = self
            .base
            .find_child_by_type(&node, "identifier")
            .map(|n| self.base.get_node_text(&n))
            .unwrap_or_else(|| "Companion".to_string());
        let comment = self.comments.nearest_comment(self.base.start_line(&node));

        if let Some(class_info) = self.current_class.as_mut() {
            debug!("Added companion object '{}' to class {}", name, class_info.name);
            class_info.companion_objects.push(Member::new(name, comment));
        }
    }

    /// Data class constructor parameters become properties
    fn extract_class_parameter(&mut self, node: Node) {
        let is_data_class = self
            .current_class
            .as_ref()
            .is_some_and(|c| c.is_data_class);
        if !is_data_class || !self.belongs_to_current_constructor(&node) {
            return;
        }

        let Some(name_node) = self.base.find_child_by_type(&node, "identifier") else {
            return;
        };
        if self.extract_modifiers(&node).iter().any(|m| m == "private") {
            return;
        }

        let name = self.base.get_node_text(&name_node);
        let comment = self.comments.nearest_comment(self.base.start_line(&node));
        if let Some(class_info) = self.current_class.as_mut() {
            debug!("Added data class parameter '{}' as property to class {}", name, class_info.name);
            class_info.properties.push(Member::new(name, comment));
        }
    }

    fn extract_enum_entry(&mut self, node: Node) {
        let is_enum = self.current_class.as_ref().is_some_and(|c| c.is_enum);
        if !is_enum {
            return;
        }

        // Only entries of the top-level enum body, not of nested enum classes
        let owner = node
            .parent()
            .filter(|p| p.kind() == "enum_class_body")
            .and_then(|body| body.parent());
        if owner.map(|o| o.id()) != self.current_node_id {
            return;
        }

        let Some(name_node) = self.base.find_child_by_type(&node, "identifier") else {
            return;
        };
        let name = self.base.get_node_text(&name_node);
        let comment = self.comments.nearest_comment(self.base.start_line(&node));
        if let Some(class_info) = self.current_class.as_mut() {
            debug!("Added enum value '{}' to enum class {}", name, class_info.name);
            class_info.enum_values.push(Member::new(name, comment));
        }
    }

    // Helper methods for extraction

    /// Members count only when the nearest enclosing scope is a class body
    fn is_member_level(&self, node: &Node) -> bool {
        self.base
            .find_ancestor(node, |p| {
                matches!(p.kind(), "class_body" | "enum_class_body") || LOCAL_SCOPES.contains(&p.kind())
            })
            .is_some_and(|scope| matches!(scope.kind(), "class_body" | "enum_class_body"))
    }

    fn belongs_to_current_constructor(&self, node: &Node) -> bool {
        self.base
            .find_ancestor(node, |p| p.kind() == "primary_constructor")
            .and_then(|ctor| ctor.parent())
            .map(|owner| owner.id())
            == self.current_node_id
    }

    fn extract_property_name(&self, node: &Node) -> Option<String> {
        // Look for name in variable_declaration first (the proper place for property names)
        let name_node = self
            .base
            .find_child_by_type(node, "variable_declaration")
            .and_then(|var_decl| self.base.find_child_by_type(&var_decl, "identifier"))
            .or_else(|| self.base.find_child_by_type(node, "identifier"))?;
        Some(self.base.get_node_text(&name_node))
    }

    /// Texts of the direct modifier list: keywords and `@Annotation(...)` entries
    fn extract_modifiers(&self, node: &Node) -> Vec<String> {
        let Some(modifiers_list) = self.base.find_child_by_type(node, "modifiers") else {
            return Vec::new();
        };

        modifiers_list
            .children(&mut modifiers_list.walk())
            .map(|child| self.base.get_node_text(&child).trim().to_string())
            .collect()
    }
}
