//! Effective access level of declarations.

use super::{NodeKind, NodeRef};
use std::fmt;
use std::str::FromStr;

/// Access level of a declaration or type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccessLevel {
    /// `public`
    Public,
    /// `protected`
    Protected,
    /// No access keyword.
    PackagePrivate,
    /// `private`
    Private,
}

impl AccessLevel {
    /// All access levels, most visible first.
    pub const ALL: [Self; 4] = [
        Self::Public,
        Self::Protected,
        Self::PackagePrivate,
        Self::Private,
    ];

    /// Lowercase name used in configuration files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::PackagePrivate => "package",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an access level name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown access level `{0}` (expected public, protected, package or private)")]
pub struct ParseAccessLevelError(pub String);

impl FromStr for AccessLevel {
    type Err = ParseAccessLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "protected" => Ok(Self::Protected),
            "package" | "package-private" | "package_private" => Ok(Self::PackagePrivate),
            "private" => Ok(Self::Private),
            _ => Err(ParseAccessLevelError(s.to_string())),
        }
    }
}

/// Type declaration that directly owns `node` as a member.
///
/// Returns `None` when the node sits in an anonymous class body or is not
/// inside any type.
fn owning_type(node: NodeRef<'_>) -> Option<NodeRef<'_>> {
    for ancestor in node.ancestors() {
        match ancestor.kind() {
            kind if kind.is_type_declaration() => return Some(ancestor),
            NodeKind::ObjectCreation => return None,
            kind if kind.is_declaration() => return None,
            _ => {}
        }
    }
    None
}

/// Resolves the effective access level of a declaration or type.
///
/// The explicit keyword in the modifier list wins. Without one, members of
/// interfaces and annotation types are public, enum constructors are private
/// and everything else is package-private.
#[must_use]
pub fn access_level(decl: NodeRef<'_>) -> AccessLevel {
    let keyword = decl
        .try_first_child_of_kind(NodeKind::Modifiers)
        .into_iter()
        .flat_map(NodeRef::children)
        .filter(|m| m.kind() == NodeKind::Modifier)
        .find_map(|m| match m.text() {
            "public" => Some(AccessLevel::Public),
            "protected" => Some(AccessLevel::Protected),
            "private" => Some(AccessLevel::Private),
            _ => None,
        });

    if let Some(level) = keyword {
        return level;
    }

    match owning_type(decl).map(NodeRef::kind) {
        Some(NodeKind::InterfaceDef | NodeKind::AnnotationDef) => AccessLevel::Public,
        Some(NodeKind::EnumDef) if decl.kind() == NodeKind::Constructor => AccessLevel::Private,
        _ => AccessLevel::PackagePrivate,
    }
}

/// Access level of the nearest type declaration enclosing `node`.
///
/// Returns `None` when the walk crosses an object creation (anonymous class)
/// or reaches the root without finding a type.
#[must_use]
pub fn surrounding_access_level(node: NodeRef<'_>) -> Option<AccessLevel> {
    for ancestor in node.ancestors() {
        match ancestor.kind() {
            kind if kind.is_type_declaration() => return Some(access_level(ancestor)),
            NodeKind::ObjectCreation => return None,
            _ => {}
        }
    }
    None
}

/// Name of the outermost type declaration enclosing (or being) `node`.
#[must_use]
pub fn root_type_name(node: NodeRef<'_>) -> Option<&str> {
    std::iter::once(node)
        .chain(node.ancestors())
        .filter(|n| n.kind().is_type_declaration())
        .last()
        .and_then(NodeRef::name)
}
