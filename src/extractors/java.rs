// Java Extractor Implementation
//
// Builds a class outline from a tree-sitter-java tree:
// - Classes, interfaces, enums, records and annotation types (@interface)
// - Methods, constructors and annotation elements, first overload wins
// - Constants (static final fields, interface and annotation fields)
// - Nearest preceding comment for every recorded declaration
//
// Type-use annotations (on type parameters, bounds, array dimensions, varargs)
// live inside the type nodes and never change which declarations are reported.

use crate::extractors::base::{BaseExtractor, ClassInfo, CommentTracker, Member};
use tracing::debug;
use tree_sitter::{Node, Tree};

/// Entry on the declaration stack: the class being filled and, for top-level
/// declarations, the result slot reserved when it was entered.
struct OpenClass {
    info: ClassInfo,
    slot: Option<usize>,
}

/// Walk events; `Leave` closes the declaration entered before its children
enum Step<'a> {
    Visit(Node<'a>),
    Leave,
}

/// Brace span `{ ... }` of a top-level type body and the result slot it fills
struct OwnedBody {
    open: usize,
    close: usize,
    slot: usize,
}

/// Nodes whose insides never hold the name of a broken method header
const RECOVERY_BARRIERS: &[&str] = &[
    "block",
    "class_body",
    "method_declaration",
    "constructor_declaration",
    "annotation",
    "marker_annotation",
    "method_invocation",
    "argument_list",
];

pub struct JavaExtractor {
    base: BaseExtractor,
    comments: CommentTracker,
    classes: Vec<ClassInfo>,
    class_stack: Vec<OpenClass>,
    /// Depth-0 brace spans by byte offset, only computed for trees with errors
    top_level_spans: Vec<(usize, usize)>,
    owned_bodies: Vec<OwnedBody>,
}

impl JavaExtractor {
    pub fn new(file_path: String, content: String) -> Self {
        Self {
            base: BaseExtractor::new(file_path, content),
            comments: CommentTracker::default(),
            classes: Vec::new(),
            class_stack: Vec::new(),
            top_level_spans: Vec::new(),
            owned_bodies: Vec::new(),
        }
    }

    /// Extract class outlines.
    ///
    /// Top-level declarations are listed in source order; nested declarations
    /// follow once their body has been fully walked.
    ///
    /// When error recovery closes a class early, the declarations that follow
    /// it end up at the top of the tree. Those are attributed to the top-level
    /// type whose braces still enclose them in the source text.
    pub fn extract_classes(&mut self, tree: &Tree) -> Vec<ClassInfo> {
        let root = tree.root_node();
        self.comments = CommentTracker::from_tree(&root, &self.base.content);
        self.classes.clear();
        self.class_stack.clear();
        self.owned_bodies.clear();
        self.top_level_spans = if self.base.has_error(&root) {
            debug!("Syntax errors in {}, extracting from partial tree", self.base.file_path);
            top_level_brace_spans(&root)
        } else {
            Vec::new()
        };

        // Iterative walk: generated sources nest expressions thousands deep
        let mut steps = vec![Step::Visit(root)];
        while let Some(step) = steps.pop() {
            match step {
                Step::Leave => self.exit_type_declaration(),
                Step::Visit(node) => {
                    if self.visit_node(node) {
                        steps.push(Step::Leave);
                    }
                    let children: Vec<Node> = node.children(&mut node.walk()).collect();
                    steps.extend(children.into_iter().rev().map(Step::Visit));
                }
            }
        }

        std::mem::take(&mut self.classes)
    }

    /// Handle one node before its children; true when a type was entered
    fn visit_node(&mut self, node: Node) -> bool {
        match node.kind() {
            "class_declaration"
            | "interface_declaration"
            | "enum_declaration"
            | "record_declaration"
            | "annotation_type_declaration" => self.enter_type_declaration(node),
            "method_declaration"
            | "constructor_declaration"
            | "compact_constructor_declaration"
            | "annotation_type_element_declaration" => {
                self.extract_method(node);
                false
            }
            "field_declaration" | "constant_declaration" => {
                self.extract_constants(node);
                false
            }
            "ERROR" => {
                self.recover_method(node);
                false
            }
            _ => false,
        }
    }

    fn enter_type_declaration(&mut self, node: Node) -> bool {
        let Some(name) = self.base.get_field_text(&node, "name") else {
            debug!("No identifier found for {}", node.kind());
            return false;
        };

        let comment = self.comments.nearest_comment(self.base.start_line(&node));
        let mut info = ClassInfo::new(name, comment);
        info.annotations = self.extract_annotations(node);
        info.is_enum = node.kind() == "enum_declaration";
        info.is_interface = matches!(
            node.kind(),
            "interface_declaration" | "annotation_type_declaration"
        );

        // Top-level declarations keep their source position in the result.
        // A type pushed out of a broken class body is still nested.
        let top_level =
            self.class_stack.is_empty() && self.owning_slot(node.start_byte()).is_none();
        let slot = if top_level {
            self.classes.push(ClassInfo::default());
            let slot = self.classes.len() - 1;
            self.register_body(node, slot);
            Some(slot)
        } else {
            None
        };

        debug!("Created new {}: {}", node.kind(), info.name);
        self.class_stack.push(OpenClass { info, slot });
        true
    }

    fn exit_type_declaration(&mut self) {
        if let Some(open) = self.class_stack.pop() {
            match open.slot {
                Some(index) => self.classes[index] = open.info,
                None => self.classes.push(open.info),
            }
        }
    }

    /// Remember which depth-0 brace span belongs to a top-level type
    fn register_body(&mut self, node: Node, slot: usize) {
        let Some(body) = node.child_by_field_name("body") else {
            return;
        };
        if let Some(&(open, close)) = self
            .top_level_spans
            .iter()
            .find(|(open, _)| *open == body.start_byte())
        {
            self.owned_bodies.push(OwnedBody { open, close, slot });
        }
    }

    /// Result slot of the top-level type whose braces enclose `byte`
    fn owning_slot(&self, byte: usize) -> Option<usize> {
        self.owned_bodies
            .iter()
            .find(|body| body.open < byte && byte < body.close)
            .map(|body| body.slot)
    }

    /// Class that receives a member starting at `byte`
    fn target_class(&mut self, byte: usize) -> Option<&mut ClassInfo> {
        if !self.class_stack.is_empty() {
            return self.class_stack.last_mut().map(|open| &mut open.info);
        }
        let slot = self.owning_slot(byte)?;
        self.classes.get_mut(slot)
    }

    fn extract_method(&mut self, node: Node) {
        let Some(name) = self.base.get_field_text(&node, "name") else {
            debug!("No {} identifier found", node.kind());
            return;
        };
        self.add_method(name, self.base.start_line(&node), node.start_byte());
    }

    /// Overloads share one entry and leave the comment for later declarations
    fn add_method(&mut self, name: String, line: usize, byte: usize) {
        let known = match self.target_class(byte) {
            Some(target) => target.has_method(&name),
            None => return,
        };
        if known {
            return;
        }

        let comment = self.comments.nearest_comment(line);
        if let Some(target) = self.target_class(byte) {
            debug!("Added method '{}' to {}", name, target.name);
            target.methods.push(Member::new(name, comment));
        }
    }

    /// Recover a method name from a header the grammar could not parse:
    /// an identifier directly followed by its parameter list
    fn recover_method(&mut self, node: Node) {
        let mut pending = vec![node];
        while let Some(current) = pending.pop() {
            if current.kind() == "identifier" && self.is_method_name(&current) {
                let name = self.base.get_node_text(&current);
                debug!("Recovered method '{}' from syntax error", name);
                self.add_method(name, self.base.start_line(&current), current.start_byte());
                return;
            }
            if current.id() != node.id() && RECOVERY_BARRIERS.contains(&current.kind()) {
                continue;
            }
            let children: Vec<Node> = current.children(&mut current.walk()).collect();
            pending.extend(children.into_iter().rev());
        }
    }

    fn is_method_name(&self, identifier: &Node) -> bool {
        let followed_by_parameters = identifier
            .next_sibling()
            .is_some_and(|next| matches!(next.kind(), "formal_parameters" | "("));
        let qualified = identifier
            .prev_sibling()
            .is_some_and(|prev| matches!(prev.kind(), "@" | "." | "new"));
        followed_by_parameters && !qualified
    }

    fn extract_constants(&mut self, node: Node) {
        if !self.is_constant(node) {
            return;
        }

        let line = self.base.start_line(&node);
        let byte = node.start_byte();
        if self.target_class(byte).is_none() {
            return;
        }

        let names: Vec<String> = self
            .base
            .find_children_by_type(&node, "variable_declarator")
            .iter()
            .filter_map(|declarator| self.base.get_field_text(declarator, "name"))
            .collect();

        for name in names {
            let comment = self.comments.nearest_comment(line);
            if let Some(target) = self.target_class(byte) {
                target.constants.push(Member::new(name, comment));
            }
        }
    }

    /// Interface and annotation fields are implicitly `static final`
    fn is_constant(&self, node: Node) -> bool {
        if node.kind() == "constant_declaration" {
            return true;
        }
        if node
            .parent()
            .is_some_and(|p| matches!(p.kind(), "interface_body" | "annotation_type_body"))
        {
            return true;
        }

        let modifiers = self.extract_modifiers(node);
        modifiers.iter().any(|m| m == "static") && modifiers.iter().any(|m| m == "final")
    }

    // Helper methods for Java-specific parsing
    fn extract_modifiers(&self, node: Node) -> Vec<String> {
        self.base
            .find_child_by_type(&node, "modifiers")
            .map(|modifiers_node| {
                modifiers_node
                    .children(&mut modifiers_node.walk())
                    .map(|c| self.base.get_node_text(&c))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn extract_annotations(&self, node: Node) -> Vec<String> {
        self.base
            .find_child_by_type(&node, "modifiers")
            .map(|modifiers_node| {
                modifiers_node
                    .children(&mut modifiers_node.walk())
                    .filter(|c| matches!(c.kind(), "annotation" | "marker_annotation"))
                    .map(|c| self.base.get_node_text(&c).trim_start_matches('@').to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Byte spans of every depth-0 `{ ... }` pair, counted over the tree's tokens.
///
/// Inserted (missing) braces are ignored so the spans follow the source text.
/// An unclosed span runs to the end of the file.
fn top_level_brace_spans(root: &Node) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut open = 0usize;
    let mut pending = vec![*root];

    while let Some(node) = pending.pop() {
        if node.child_count() > 0 {
            let children: Vec<Node> = node.children(&mut node.walk()).collect();
            pending.extend(children.into_iter().rev());
            continue;
        }
        if node.is_missing() {
            continue;
        }
        match node.kind() {
            "{" => {
                if depth == 0 {
                    open = node.start_byte();
                }
                depth += 1;
            }
            "}" if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    spans.push((open, node.end_byte()));
                }
            }
            _ => {}
        }
    }

    if depth > 0 {
        spans.push((open, root.end_byte()));
    }
    spans
}
