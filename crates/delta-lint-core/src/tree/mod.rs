//! Arena syntax tree and read-only navigation.
//!
//! A [`SyntaxTree`] owns every node of one source file in a flat arena.
//! Nodes are addressed by [`NodeId`] and linked to their parent, children
//! and siblings by index, so the tree has no owning pointers and no cycles.
//! Checks navigate through [`NodeRef`], a copyable `(tree, id)` handle whose
//! traversal methods return lazy, finite, restartable iterators.
//!
//! Trees are produced by a [`SourceParser`](crate::SourceParser) through
//! [`TreeBuilder`] and are never mutated afterwards.

mod access;
mod iter;

pub use access::{
    access_level, root_type_name, surrounding_access_level, AccessLevel, ParseAccessLevelError,
};
pub use iter::{Ancestors, Descendants, Siblings};

use std::collections::HashMap;
use std::fmt;

/// Kind of a syntax tree node.
///
/// Kinds are language-level categories; the parser's own node name is kept
/// separately in [`NodeRef::grammar_kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    /// Root of a file.
    CompilationUnit,
    /// `class Foo { ... }`
    ClassDef,
    /// `interface Foo { ... }`
    InterfaceDef,
    /// `enum Foo { ... }`
    EnumDef,
    /// `record Foo(...) { ... }`
    RecordDef,
    /// `@interface Foo { ... }`
    AnnotationDef,
    /// Method declaration.
    Method,
    /// Constructor declaration.
    Constructor,
    /// Compact canonical constructor of a record.
    CompactConstructor,
    /// Modifier list (annotations, keywords and interleaved comments).
    Modifiers,
    /// A modifier keyword such as `public` or `static`.
    Modifier,
    /// An annotation; its text is the annotation name.
    Annotation,
    /// A braced statement block.
    Block,
    /// Opening `{`.
    BlockOpen,
    /// Closing `}`.
    BlockClose,
    /// `// ...`
    LineComment,
    /// Start of a `/* ... */` comment; its text is the whole comment.
    BlockCommentBegin,
    /// Synthetic child marking the last line of a block comment.
    BlockCommentEnd,
    /// Start of a `""" ... """` literal; its text is the whole literal.
    TextBlockBegin,
    /// Synthetic child marking the last line of a text block.
    TextBlockEnd,
    /// An identifier.
    Identifier,
    /// A type in type position; its text is the source text of the type.
    TypeReference,
    /// `<T, U>` type parameter list.
    TypeParameters,
    /// Formal parameter list.
    Parameters,
    /// A single formal parameter.
    Parameter,
    /// `return ...;`
    ReturnStatement,
    /// An expression used as a statement.
    ExpressionStatement,
    /// An assignment expression.
    Assignment,
    /// `new Foo(...)`, possibly with an anonymous class body.
    ObjectCreation,
    /// Any other token or construct.
    Other,
}

impl NodeKind {
    /// Returns true for type declarations (class, interface, enum, record, annotation type).
    #[must_use]
    pub fn is_type_declaration(self) -> bool {
        matches!(
            self,
            Self::ClassDef
                | Self::InterfaceDef
                | Self::EnumDef
                | Self::RecordDef
                | Self::AnnotationDef
        )
    }

    /// Returns true for methods, constructors and compact constructors.
    #[must_use]
    pub fn is_declaration(self) -> bool {
        matches!(
            self,
            Self::Method | Self::Constructor | Self::CompactConstructor
        )
    }

    /// Returns true for comment nodes (line comments and block comment starts).
    #[must_use]
    pub fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockCommentBegin)
    }
}

/// Stable index of a node within its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Attributes of a node handed to [`TreeBuilder::push`].
#[derive(Debug, Clone)]
pub struct NodeSpec {
    /// Node kind.
    pub kind: NodeKind,
    /// The parser's own name for the node (e.g., `"method_declaration"`).
    pub grammar_kind: &'static str,
    /// Text carried by the node, empty when irrelevant.
    pub text: String,
    /// Start position.
    pub start: Position,
    /// Last line covered by the node (1-indexed).
    pub end_line: usize,
}

impl NodeSpec {
    /// Creates a spec for a node occupying a single position.
    #[must_use]
    pub fn new(kind: NodeKind, grammar_kind: &'static str, start: Position) -> Self {
        Self {
            kind,
            grammar_kind,
            text: String::new(),
            start,
            end_line: start.line,
        }
    }

    /// Sets the node text.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the last line covered by the node.
    #[must_use]
    pub fn end_line(mut self, end_line: usize) -> Self {
        self.end_line = end_line.max(self.start.line);
        self
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    spec: NodeSpec,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

/// Error raised when an expected structural element is missing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeShapeError {
    /// No child of the requested kind exists.
    #[error("no {kind:?} child under {parent:?} at {line}:{column}")]
    NotFound {
        /// Requested kind.
        kind: NodeKind,
        /// Kind of the node that was searched.
        parent: NodeKind,
        /// Line of the searched node.
        line: usize,
        /// Column of the searched node.
        column: usize,
    },
}

/// Immutable arena holding the syntax tree of one file.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
    /// Javadoc comments keyed by their last line, first in document order.
    doc_comments: HashMap<usize, NodeId>,
}

impl SyntaxTree {
    /// Returns the root node.
    ///
    /// Every tree built by [`TreeBuilder`] has a root.
    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId(0),
        }
    }

    /// Returns a handle for the given id, if it belongs to this tree.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.index() < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the `/** ... */` comment whose last line is `line`, if any.
    #[must_use]
    pub fn doc_comment_ending_at(&self, line: usize) -> Option<NodeRef<'_>> {
        self.doc_comments.get(&line).and_then(|&id| self.get(id))
    }

    fn index_doc_comments(&mut self) {
        let index: HashMap<usize, NodeId> = self
            .root()
            .subtree()
            .filter(|n| {
                n.kind() == NodeKind::BlockCommentBegin
                    && n.text().starts_with("/**")
                    && !n.text().starts_with("/**/")
            })
            .fold(HashMap::new(), |mut index, n| {
                index.entry(n.end_line()).or_insert(n.id());
                index
            });
        self.doc_comments = index;
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

/// Builds a [`SyntaxTree`] by appending nodes under existing parents.
///
/// Children are appended in source order; the first pushed node is the root.
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
}

impl TreeBuilder {
    /// Starts a tree with the given root.
    #[must_use]
    pub fn new(root: NodeSpec) -> Self {
        Self {
            nodes: vec![NodeData {
                spec: root,
                parent: None,
                first_child: None,
                last_child: None,
                prev_sibling: None,
                next_sibling: None,
            }],
        }
    }

    /// Id of the root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends a node as the last child of `parent` and returns its id.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not produced by this builder.
    pub fn push(&mut self, parent: NodeId, spec: NodeSpec) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        let prev = self.nodes[parent.index()].last_child;

        self.nodes.push(NodeData {
            spec,
            parent: Some(parent),
            first_child: None,
            last_child: None,
            prev_sibling: prev,
            next_sibling: None,
        });

        if let Some(prev) = prev {
            self.nodes[prev.index()].next_sibling = Some(id);
        } else {
            self.nodes[parent.index()].first_child = Some(id);
        }
        self.nodes[parent.index()].last_child = Some(id);

        id
    }

    /// Finishes the tree and indexes its Javadoc comments by last line.
    #[must_use]
    pub fn finish(self) -> SyntaxTree {
        let mut tree = SyntaxTree {
            nodes: self.nodes,
            doc_comments: HashMap::new(),
        };
        tree.index_doc_comments();
        tree
    }
}

/// Copyable handle to a node of a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> NodeRef<'t> {
    fn data(self) -> &'t NodeData {
        self.tree.data(self.id)
    }

    fn wrap(self, id: Option<NodeId>) -> Option<NodeRef<'t>> {
        id.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    /// Arena id of this node.
    #[must_use]
    pub fn id(self) -> NodeId {
        self.id
    }

    /// Tree this node belongs to.
    #[must_use]
    pub fn tree(self) -> &'t SyntaxTree {
        self.tree
    }

    /// Node kind.
    #[must_use]
    pub fn kind(self) -> NodeKind {
        self.data().spec.kind
    }

    /// The parser's own name for this node.
    #[must_use]
    pub fn grammar_kind(self) -> &'static str {
        self.data().spec.grammar_kind
    }

    /// Text carried by the node (empty for most interior nodes).
    #[must_use]
    pub fn text(self) -> &'t str {
        &self.data().spec.text
    }

    /// Start line (1-indexed).
    #[must_use]
    pub fn line(self) -> usize {
        self.data().spec.start.line
    }

    /// Start column (1-indexed).
    #[must_use]
    pub fn column(self) -> usize {
        self.data().spec.start.column
    }

    /// Last line covered by the node (1-indexed).
    #[must_use]
    pub fn end_line(self) -> usize {
        self.data().spec.end_line
    }

    /// Parent node, `None` for the root.
    #[must_use]
    pub fn parent(self) -> Option<NodeRef<'t>> {
        self.wrap(self.data().parent)
    }

    /// First child.
    #[must_use]
    pub fn first_child(self) -> Option<NodeRef<'t>> {
        self.wrap(self.data().first_child)
    }

    /// Last child.
    #[must_use]
    pub fn last_child(self) -> Option<NodeRef<'t>> {
        self.wrap(self.data().last_child)
    }

    /// Next sibling.
    #[must_use]
    pub fn next_sibling(self) -> Option<NodeRef<'t>> {
        self.wrap(self.data().next_sibling)
    }

    /// Previous sibling.
    #[must_use]
    pub fn prev_sibling(self) -> Option<NodeRef<'t>> {
        self.wrap(self.data().prev_sibling)
    }

    /// Direct children in source order.
    #[must_use]
    pub fn children(self) -> Siblings<'t> {
        Siblings::new(self.tree, self.data().first_child)
    }

    /// This node followed by its next siblings.
    #[must_use]
    pub fn siblings_from(self) -> Siblings<'t> {
        Siblings::new(self.tree, Some(self.id))
    }

    /// Pre-order traversal of everything below this node (the node itself excluded).
    #[must_use]
    pub fn descendants(self) -> Descendants<'t> {
        Descendants::below(self)
    }

    /// Pre-order traversal of this node and everything below it.
    #[must_use]
    pub fn subtree(self) -> Descendants<'t> {
        Descendants::including(self)
    }

    /// Parent, grandparent, ... up to the root.
    #[must_use]
    pub fn ancestors(self) -> Ancestors<'t> {
        Ancestors::new(self.parent())
    }

    /// First direct child of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`TreeShapeError::NotFound`] if no such child exists.
    pub fn first_child_of_kind(self, kind: NodeKind) -> Result<NodeRef<'t>, TreeShapeError> {
        self.try_first_child_of_kind(kind)
            .ok_or_else(|| TreeShapeError::NotFound {
                kind,
                parent: self.kind(),
                line: self.line(),
                column: self.column(),
            })
    }

    /// First direct child of the given kind, if any.
    #[must_use]
    pub fn try_first_child_of_kind(self, kind: NodeKind) -> Option<NodeRef<'t>> {
        self.children().find(|c| c.kind() == kind)
    }

    /// Last direct child of the given kind, if any.
    #[must_use]
    pub fn last_child_of_kind(self, kind: NodeKind) -> Option<NodeRef<'t>> {
        let mut child = self.last_child();
        while let Some(c) = child {
            if c.kind() == kind {
                return Some(c);
            }
            child = c.prev_sibling();
        }
        None
    }

    /// Name of a declaration: the text of its first identifier child.
    #[must_use]
    pub fn name(self) -> Option<&'t str> {
        self.try_first_child_of_kind(NodeKind::Identifier)
            .map(NodeRef::text)
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}({}) @{}:{}",
            self.kind(),
            self.grammar_kind(),
            self.line(),
            self.column()
        )
    }
}
