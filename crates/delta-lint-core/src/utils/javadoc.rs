//! Javadoc lookup for declarations.

use crate::context::FileContext;
use crate::tree::NodeRef;

/// Returns the `/** ... */` comment documenting `decl`, if any.
///
/// Scans upward from the line above the declaration (its first modifier or
/// annotation), skipping blank lines and `//` comment lines. The first
/// remaining line must be where a Javadoc comment ends.
#[must_use]
pub fn javadoc_before<'t>(ctx: &FileContext<'_>, decl: NodeRef<'t>) -> Option<NodeRef<'t>> {
    let mut line = decl.line().checked_sub(1)?;
    while line > 1 && (ctx.is_blank(line) || is_line_comment(ctx.line(line))) {
        line -= 1;
    }
    if line == 0 || !ctx.line(line).is_some_and(|l| l.trim_end().ends_with("*/")) {
        return None;
    }
    decl.tree().doc_comment_ending_at(line)
}

fn is_line_comment(line: Option<&str>) -> bool {
    line.is_some_and(|l| l.trim_start().starts_with("//"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{ChangeSet, RunContext};
    use crate::tree::{NodeKind, NodeSpec, Position, SyntaxTree, TreeBuilder};
    use std::path::Path;

    /// Tree with a block comment on lines `comment` and a method at `method_line`.
    fn tree(comment: (usize, usize), text: &str, method_line: usize) -> SyntaxTree {
        let mut b = TreeBuilder::new(NodeSpec::new(
            NodeKind::CompilationUnit,
            "program",
            Position::new(1, 1),
        ));
        let class = b.push(
            b.root(),
            NodeSpec::new(NodeKind::ClassDef, "class_declaration", Position::new(1, 1)),
        );
        b.push(
            class,
            NodeSpec::new(
                NodeKind::BlockCommentBegin,
                "block_comment",
                Position::new(comment.0, 5),
            )
            .text(text)
            .end_line(comment.1),
        );
        b.push(
            class,
            NodeSpec::new(NodeKind::Method, "method_declaration", Position::new(method_line, 5)),
        );
        b.finish()
    }

    fn method(tree: &SyntaxTree) -> NodeRef<'_> {
        tree.root()
            .subtree()
            .find(|n| n.kind() == NodeKind::Method)
            .unwrap()
    }

    #[test]
    fn finds_javadoc_across_blank_and_line_comments() {
        let src = "class A {\n    /**\n     * Doc.\n     */\n\n    // note\n    void run() {}\n}";
        let t = tree((2, 4), "/**\n     * Doc.\n     */", 7);
        let run = RunContext::with_changes(ChangeSet::new());
        let ctx = FileContext::new(Path::new("A.java"), src, Path::new("/"), &run);

        let doc = javadoc_before(&ctx, method(&t)).unwrap();
        assert_eq!(doc.line(), 2);
    }

    #[test]
    fn plain_block_comment_is_not_javadoc() {
        let src = "class A {\n    /* not doc */\n    void run() {}\n}";
        let t = tree((2, 2), "/* not doc */", 3);
        let run = RunContext::with_changes(ChangeSet::new());
        let ctx = FileContext::new(Path::new("A.java"), src, Path::new("/"), &run);

        assert!(javadoc_before(&ctx, method(&t)).is_none());
    }

    #[test]
    fn code_between_comment_and_declaration_hides_javadoc() {
        let src = "class A {\n    /** Doc. */\n    int x;\n    void run() {}\n}";
        let t = tree((2, 2), "/** Doc. */", 4);
        let run = RunContext::with_changes(ChangeSet::new());
        let ctx = FileContext::new(Path::new("A.java"), src, Path::new("/"), &run);

        assert!(javadoc_before(&ctx, method(&t)).is_none());
    }
}
