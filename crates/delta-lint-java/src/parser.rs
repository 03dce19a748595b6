//! Java source parser using Tree-sitter.

use delta_lint_core::tree::{NodeId, NodeSpec, Position, TreeBuilder};
use delta_lint_core::{NodeKind, ParseError, SourceParser, SyntaxTree};
use tracing::debug;
use tree_sitter::{Language, Node, Parser, TreeCursor};

/// Builds delta-lint syntax trees from Java source.
///
/// Every node of the concrete syntax tree, named or anonymous, becomes an
/// arena node. Block comments and text blocks are leaves followed by a
/// synthetic end node on their last line.
pub struct JavaParser {
    language: Language,
}

impl JavaParser {
    /// Creates a new Java parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_java::LANGUAGE.into(),
        }
    }
}

impl Default for JavaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for JavaParser {
    fn language_id(&self) -> &'static str {
        "java"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["java"]
    }

    fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::Language {
                language: "java",
                message: e.to_string(),
            })?;

        let src = source.as_bytes();
        let tree = parser.parse(src, None).ok_or(ParseError::NoTree)?;
        let root = tree.root_node();

        if root.has_error() {
            let at = first_error(root).unwrap_or(root);
            return Err(ParseError::Syntax {
                line: at.start_position().row + 1,
                column: at.start_position().column + 1,
            });
        }

        let unit = NodeSpec::new(NodeKind::CompilationUnit, root.kind(), Position::new(1, 1))
            .end_line(root.end_position().row + 1);
        let mut builder = TreeBuilder::new(unit);
        let unit = builder.root();

        mirror(root, unit, &mut builder, src);

        let tree = builder.finish();
        debug!("Built Java tree with {} nodes", tree.len());
        Ok(tree)
    }
}

/// What to do with a node's children after classifying it.
enum Shape {
    /// Mirror the children.
    Descend,
    /// Do not descend; add a synthetic end marker of this kind.
    Leaf(NodeKind),
}

/// Copies every node below `root` into `builder` under `unit`.
///
/// Walks with one cursor and an explicit parent stack.
fn mirror(root: Node<'_>, unit: NodeId, builder: &mut TreeBuilder, src: &[u8]) {
    let mut cursor = root.walk();
    if !cursor.goto_first_child() {
        return;
    }
    let mut parents: Vec<(NodeId, NodeKind)> = vec![(unit, NodeKind::CompilationUnit)];

    loop {
        let Some(&(parent, parent_kind)) = parents.last() else {
            return;
        };
        let (id, kind, descend) = push_node(&cursor, parent, parent_kind, builder, src);

        if descend && cursor.goto_first_child() {
            parents.push((id, kind));
            continue;
        }

        while !cursor.goto_next_sibling() {
            parents.pop();
            if parents.is_empty() || !cursor.goto_parent() {
                return;
            }
        }
    }
}

/// Adds the cursor's node; returns its id, its kind and whether to descend.
fn push_node(
    cursor: &TreeCursor<'_>,
    parent: NodeId,
    parent_kind: NodeKind,
    builder: &mut TreeBuilder,
    src: &[u8],
) -> (NodeId, NodeKind, bool) {
    let node = cursor.node();
    let (kind, shape) = classify(node, cursor.field_name(), parent_kind, src);

    let start = node.start_position();
    let end = node.end_position();
    let spec = NodeSpec::new(
        kind,
        node.kind(),
        Position::new(start.row + 1, start.column + 1),
    )
    .text(node_text(node, kind, src))
    .end_line(end.row + 1);
    let id = builder.push(parent, spec);

    match shape {
        Shape::Leaf(end_kind) => {
            builder.push(
                id,
                NodeSpec::new(end_kind, node.kind(), Position::new(end.row + 1, end.column + 1)),
            );
            (id, kind, false)
        }
        Shape::Descend => (id, kind, true),
    }
}

fn classify(
    node: Node<'_>,
    field: Option<&'static str>,
    parent_kind: NodeKind,
    src: &[u8],
) -> (NodeKind, Shape) {
    let kind = match node.kind() {
        "class_declaration" => NodeKind::ClassDef,
        "interface_declaration" => NodeKind::InterfaceDef,
        "enum_declaration" => NodeKind::EnumDef,
        "record_declaration" => NodeKind::RecordDef,
        "annotation_type_declaration" => NodeKind::AnnotationDef,
        "method_declaration" => NodeKind::Method,
        "constructor_declaration" => NodeKind::Constructor,
        "compact_constructor_declaration" => NodeKind::CompactConstructor,
        "modifiers" => NodeKind::Modifiers,
        "marker_annotation" | "annotation" => NodeKind::Annotation,
        "block" | "constructor_body" => NodeKind::Block,
        "{" if parent_kind == NodeKind::Block => NodeKind::BlockOpen,
        "}" if parent_kind == NodeKind::Block => NodeKind::BlockClose,
        "line_comment" => NodeKind::LineComment,
        "block_comment" => {
            return (
                NodeKind::BlockCommentBegin,
                Shape::Leaf(NodeKind::BlockCommentEnd),
            );
        }
        "string_literal" if raw_text(node, src).starts_with("\"\"\"") => {
            return (NodeKind::TextBlockBegin, Shape::Leaf(NodeKind::TextBlockEnd));
        }
        "identifier" => NodeKind::Identifier,
        "type_parameters" => NodeKind::TypeParameters,
        "formal_parameters" => NodeKind::Parameters,
        "formal_parameter" | "spread_parameter" => NodeKind::Parameter,
        "return_statement" => NodeKind::ReturnStatement,
        "expression_statement" => NodeKind::ExpressionStatement,
        "assignment_expression" => NodeKind::Assignment,
        "object_creation_expression" => NodeKind::ObjectCreation,
        _ if parent_kind == NodeKind::Modifiers && !node.is_named() => NodeKind::Modifier,
        _ if field == Some("type") => NodeKind::TypeReference,
        _ => NodeKind::Other,
    };
    (kind, Shape::Descend)
}

fn node_text(node: Node<'_>, kind: NodeKind, src: &[u8]) -> String {
    match kind {
        NodeKind::Annotation => node
            .child_by_field_name("name")
            .map_or_else(String::new, |name| raw_text(name, src).to_string()),
        NodeKind::Identifier
        | NodeKind::Modifier
        | NodeKind::TypeReference
        | NodeKind::LineComment
        | NodeKind::BlockCommentBegin
        | NodeKind::TextBlockBegin => raw_text(node, src).to_string(),
        _ if node.child_count() == 0 => raw_text(node, src).to_string(),
        _ => String::new(),
    }
}

fn raw_text<'a>(node: Node<'_>, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}

fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    let mut node = root;
    loop {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        let mut cursor = node.walk();
        let next = node.children(&mut cursor).find(Node::has_error);
        node = next?;
    }
}
