//! Rule to require Javadoc on declarations changed on the current branch.
//!
//! # Rationale
//!
//! Enforcing Javadoc on a whole legacy code base at once is impractical.
//! Requiring it only where the branch touches code lets the documentation
//! grow with every change.
//!
//! # Detected Patterns
//!
//! A method or constructor is reported when all of these hold:
//!
//! 1. its file name is in the changed-file allowlist,
//! 2. its outermost type is not matched by `ignoreClassNameRegex`,
//! 3. both its own and its enclosing type's access levels are selected,
//! 4. an added or deleted line falls inside its body,
//! 5. no `/** ... */` comment precedes it,
//! 6. it is not exempt: the body is longer than `minLineCount`, no
//!    `allowedAnnotations` entry is present and, with
//!    `allowMissingPropertyJavadoc`, it is not a plain getter or setter.
//!
//! # Configuration
//!
//! ```toml
//! [rules.scoped-javadoc]
//! ignoreClassNameRegex = ".*Test"
//! minLineCount = 2
//! allowMissingPropertyJavadoc = true
//! allowedAnnotations = ["Override"]
//! accessModifiers = ["public", "protected"]
//! fileExtensions = ["java"]
//! enabledGit = true            # false requires changedFileSet
//! changedFileSet = []
//! mainBranch = "main"
//! ```

use crate::factory::{bool_option, int_option, str_option, RuleConfigError};
use delta_lint_core::tree::{access_level, root_type_name, surrounding_access_level, AccessLevel};
use delta_lint_core::utils::javadoc_before;
use delta_lint_core::{
    DiffError, Diagnostics, FileContext, NodeKind, NodeRef, Rule, RuleConfig, RuleError,
    Severity,
};
use regex::Regex;
use std::collections::BTreeSet;
use tracing::debug;

/// Rule code for scoped-javadoc.
pub const CODE: &str = "DL004";

/// Rule name for scoped-javadoc.
pub const NAME: &str = "scoped-javadoc";

/// Message key for a missing Javadoc comment.
pub const KEY: &str = "javadoc.missing";

const DEFAULT_MIN_LINE_COUNT: i64 = -1;
const DEFAULT_MAIN_BRANCH: &str = "main";
const DEFAULT_EXTENSION: &str = ".java";

/// Validated options of [`ScopedJavadoc`].
///
/// Built with [`ScopedJavadocConfig::builder`] or read from a
/// `[rules.scoped-javadoc]` table with [`ScopedJavadocConfig::from_rule_config`].
#[derive(Debug, Clone)]
pub struct ScopedJavadocConfig {
    ignore_class_name_regex: Option<Regex>,
    min_line_count: i64,
    allow_missing_property_javadoc: bool,
    allowed_annotations: BTreeSet<String>,
    access_modifiers: BTreeSet<AccessLevel>,
    file_extensions: Vec<String>,
    enabled_git: bool,
    changed_file_set: BTreeSet<String>,
    main_branch: String,
}

impl Default for ScopedJavadocConfig {
    fn default() -> Self {
        Self {
            ignore_class_name_regex: None,
            min_line_count: DEFAULT_MIN_LINE_COUNT,
            allow_missing_property_javadoc: false,
            allowed_annotations: BTreeSet::new(),
            access_modifiers: AccessLevel::ALL.into_iter().collect(),
            file_extensions: vec![DEFAULT_EXTENSION.to_string()],
            enabled_git: true,
            changed_file_set: BTreeSet::new(),
            main_branch: DEFAULT_MAIN_BRANCH.to_string(),
        }
    }
}

impl ScopedJavadocConfig {
    /// Creates a builder with default options.
    #[must_use]
    pub fn builder() -> ScopedJavadocConfigBuilder {
        ScopedJavadocConfigBuilder::default()
    }

    /// Reads options from a rule configuration table.
    ///
    /// Unset options keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RuleConfigError`] if an option has the wrong type or value.
    pub fn from_rule_config(options: &RuleConfig) -> Result<Self, RuleConfigError> {
        let mut builder = Self::builder();

        if let Some(pattern) = str_option(options, NAME, "ignoreClassNameRegex")? {
            builder = builder.ignore_class_name_regex(pattern);
        }
        if let Some(count) = int_option(options, NAME, "minLineCount")? {
            builder = builder.min_line_count(count);
        }
        if let Some(allow) = bool_option(options, NAME, "allowMissingPropertyJavadoc")? {
            builder = builder.allow_missing_property_javadoc(allow);
        }
        if options.has_option("allowedAnnotations") {
            builder = builder.allowed_annotations(options.get_str_array("allowedAnnotations"));
        }
        if options.has_option("accessModifiers") {
            let levels = options
                .get_str_array("accessModifiers")
                .iter()
                .map(|s| s.parse::<AccessLevel>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| RuleConfigError::InvalidAccessLevel { rule: NAME, source })?;
            builder = builder.access_modifiers(levels);
        }
        if options.has_option("fileExtensions") {
            builder = builder.file_extensions(options.get_str_array("fileExtensions"));
        }
        if let Some(enabled) = bool_option(options, NAME, "enabledGit")? {
            builder = builder.enabled_git(enabled);
        }
        if options.has_option("changedFileSet") {
            builder = builder.changed_file_set(options.get_str_array("changedFileSet"));
        }
        if let Some(branch) = str_option(options, NAME, "mainBranch")? {
            builder = builder.main_branch(branch);
        }

        builder.build()
    }

    /// Minimum body line count above which Javadoc is required.
    #[must_use]
    pub fn min_line_count(&self) -> i64 {
        self.min_line_count
    }

    /// Access levels that are checked.
    #[must_use]
    pub fn access_modifiers(&self) -> &BTreeSet<AccessLevel> {
        &self.access_modifiers
    }

    /// File extensions of the allowlist, each with a leading dot.
    #[must_use]
    pub fn file_extensions(&self) -> &[String] {
        &self.file_extensions
    }

    /// Whether the allowlist comes from git.
    #[must_use]
    pub fn enabled_git(&self) -> bool {
        self.enabled_git
    }

    /// Base branch the changes are computed against.
    #[must_use]
    pub fn main_branch(&self) -> &str {
        &self.main_branch
    }
}

/// Builder for [`ScopedJavadocConfig`].
#[derive(Debug, Clone)]
pub struct ScopedJavadocConfigBuilder {
    ignore_class_name_regex: Option<String>,
    min_line_count: i64,
    allow_missing_property_javadoc: bool,
    allowed_annotations: BTreeSet<String>,
    access_modifiers: BTreeSet<AccessLevel>,
    file_extensions: Vec<String>,
    enabled_git: bool,
    changed_file_set: BTreeSet<String>,
    main_branch: String,
}

impl Default for ScopedJavadocConfigBuilder {
    fn default() -> Self {
        let defaults = ScopedJavadocConfig::default();
        Self {
            ignore_class_name_regex: None,
            min_line_count: defaults.min_line_count,
            allow_missing_property_javadoc: defaults.allow_missing_property_javadoc,
            allowed_annotations: defaults.allowed_annotations,
            access_modifiers: defaults.access_modifiers,
            file_extensions: defaults.file_extensions,
            enabled_git: defaults.enabled_git,
            changed_file_set: defaults.changed_file_set,
            main_branch: defaults.main_branch,
        }
    }
}

impl ScopedJavadocConfigBuilder {
    /// Skips types whose outermost name fully matches `pattern`.
    #[must_use]
    pub fn ignore_class_name_regex(mut self, pattern: impl Into<String>) -> Self {
        self.ignore_class_name_regex = Some(pattern.into());
        self
    }

    /// Exempts bodies with at most `count` lines.
    #[must_use]
    pub fn min_line_count(mut self, count: i64) -> Self {
        self.min_line_count = count;
        self
    }

    /// Exempts plain getters and setters.
    #[must_use]
    pub fn allow_missing_property_javadoc(mut self, allow: bool) -> Self {
        self.allow_missing_property_javadoc = allow;
        self
    }

    /// Exempts declarations carrying one of these annotations.
    #[must_use]
    pub fn allowed_annotations<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_annotations = names.into_iter().map(Into::into).collect();
        self
    }

    /// Access levels to check.
    #[must_use]
    pub fn access_modifiers(mut self, levels: impl IntoIterator<Item = AccessLevel>) -> Self {
        self.access_modifiers = levels.into_iter().collect();
        self
    }

    /// Extensions used to filter changed files, with or without a leading dot.
    #[must_use]
    pub fn file_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Whether to derive the allowlist from git.
    #[must_use]
    pub fn enabled_git(mut self, enabled: bool) -> Self {
        self.enabled_git = enabled;
        self
    }

    /// File names to check when git is disabled.
    #[must_use]
    pub fn changed_file_set<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.changed_file_set = names.into_iter().map(Into::into).collect();
        self
    }

    /// Base branch to compare against.
    #[must_use]
    pub fn main_branch(mut self, branch: impl Into<String>) -> Self {
        self.main_branch = branch.into();
        self
    }

    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns [`RuleConfigError`] if the class name pattern does not
    /// compile, an extension is empty, or git is disabled without a
    /// `changedFileSet`.
    pub fn build(self) -> Result<ScopedJavadocConfig, RuleConfigError> {
        let ignore_class_name_regex = self
            .ignore_class_name_regex
            .map(|pattern| Regex::new(&format!("^(?:{pattern})$")))
            .transpose()
            .map_err(|source| RuleConfigError::InvalidRegex {
                rule: NAME,
                option: "ignoreClassNameRegex",
                source,
            })?;

        let file_extensions = self
            .file_extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.trim();
                if ext.is_empty() || ext == "." {
                    Err(RuleConfigError::EmptyExtension { rule: NAME })
                } else if ext.starts_with('.') {
                    Ok(ext.to_string())
                } else {
                    Ok(format!(".{ext}"))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        if !self.enabled_git && self.changed_file_set.is_empty() {
            return Err(RuleConfigError::MissingChangedFileSet { rule: NAME });
        }

        Ok(ScopedJavadocConfig {
            ignore_class_name_regex,
            min_line_count: self.min_line_count,
            allow_missing_property_javadoc: self.allow_missing_property_javadoc,
            allowed_annotations: self.allowed_annotations,
            access_modifiers: self.access_modifiers,
            file_extensions,
            enabled_git: self.enabled_git,
            changed_file_set: self.changed_file_set,
            main_branch: self.main_branch,
        })
    }
}

/// Requires Javadoc on methods and constructors whose body changed.
#[derive(Debug, Clone, Default)]
pub struct ScopedJavadoc {
    config: ScopedJavadocConfig,
    severity: Option<Severity>,
}

impl ScopedJavadoc {
    /// Creates the rule with validated options.
    #[must_use]
    pub fn new(config: ScopedJavadocConfig) -> Self {
        Self {
            config,
            severity: None,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// The rule's options.
    #[must_use]
    pub fn config(&self) -> &ScopedJavadocConfig {
        &self.config
    }

    fn in_allowlist(&self, ctx: &FileContext<'_>) -> Result<bool, DiffError> {
        let Some(name) = ctx.file_name() else {
            return Ok(false);
        };
        if !self.config.enabled_git {
            return Ok(self.config.changed_file_set.contains(name));
        }
        let names = ctx
            .run
            .changed_file_names(&self.config.main_branch, &self.config.file_extensions)?;
        Ok(names.contains(name))
    }

    fn is_ignored_class(&self, node: NodeRef<'_>) -> bool {
        match (&self.config.ignore_class_name_regex, root_type_name(node)) {
            (Some(regex), Some(name)) => regex.is_match(name),
            _ => false,
        }
    }

    fn is_access_selected(&self, node: NodeRef<'_>) -> bool {
        let selected = &self.config.access_modifiers;
        surrounding_access_level(node).is_some_and(|outer| selected.contains(&outer))
            && selected.contains(&access_level(node))
    }

    fn is_exempt(&self, node: NodeRef<'_>, body: &Body) -> bool {
        body.line_count() <= self.config.min_line_count
            || self.has_allowed_annotation(node)
            || (self.config.allow_missing_property_javadoc && (is_getter(node) || is_setter(node)))
    }

    fn has_allowed_annotation(&self, node: NodeRef<'_>) -> bool {
        let allowed = &self.config.allowed_annotations;
        node.try_first_child_of_kind(NodeKind::Modifiers)
            .into_iter()
            .flat_map(NodeRef::children)
            .filter(|c| c.kind() == NodeKind::Annotation)
            .any(|a| {
                let full = a.text();
                let simple = full.rsplit('.').next().unwrap_or(full);
                allowed.contains(full) || allowed.contains(simple)
            })
    }
}

impl Rule for ScopedJavadoc {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires Javadoc on methods and constructors whose body changed on this branch"
    }

    fn default_severity(&self) -> Severity {
        self.severity.unwrap_or(Severity::Warning)
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[
            NodeKind::Method,
            NodeKind::Constructor,
            NodeKind::CompactConstructor,
        ]
    }

    fn message(&self, _key: &str, _args: &[String]) -> String {
        "You are missing a JavaDoc comment in a project. Please provide information about the \
         purpose and functionality of the method. The more detailed the information you \
         provide, the more helpful it will be for your colleagues."
            .to_string()
    }

    fn check_node(
        &self,
        ctx: &FileContext<'_>,
        node: NodeRef<'_>,
        out: &mut Diagnostics,
    ) -> Result<(), RuleError> {
        if !self.in_allowlist(ctx)? {
            return Ok(());
        }
        if self.is_ignored_class(node) {
            debug!("{}: ignored class {:?}", ctx.relative_path.display(), root_type_name(node));
            return Ok(());
        }
        if !self.is_access_selected(node) {
            return Ok(());
        }
        let Some(body) = Body::of(node) else {
            debug!("{}:{}: no body", ctx.relative_path.display(), node.line());
            return Ok(());
        };

        let changes = ctx.run.changes(&self.config.main_branch)?;
        let Some(change) = changes.changes_for(&ctx.relative_path) else {
            debug!("{}: no changes recorded", ctx.relative_path.display());
            return Ok(());
        };
        if !change.added_intersects(body.open, body.close)
            && !change.deleted_intersects(body.open, body.close)
        {
            return Ok(());
        }

        if javadoc_before(ctx, node).is_some() || self.is_exempt(node, &body) {
            return Ok(());
        }

        out.log(node.line(), node.column(), KEY, Vec::new());
        Ok(())
    }
}

/// Lines of a declaration's body delimiters.
struct Body {
    open: usize,
    close: usize,
    empty: bool,
}

impl Body {
    fn of(decl: NodeRef<'_>) -> Option<Self> {
        let block = decl.try_first_child_of_kind(NodeKind::Block)?;
        let open = block.try_first_child_of_kind(NodeKind::BlockOpen)?;
        let close = block.last_child_of_kind(NodeKind::BlockClose)?;
        Some(Self {
            open: open.line(),
            close: close.line(),
            empty: statements(block).next().is_none(),
        })
    }

    /// 1 for an empty body, otherwise the lines strictly between the braces.
    fn line_count(&self) -> i64 {
        if self.empty {
            return 1;
        }
        i64::try_from(self.close - self.open).map_or(i64::MAX, |span| span - 1)
    }
}

/// Statements of a block, without its braces and comments.
fn statements<'t>(block: NodeRef<'t>) -> impl Iterator<Item = NodeRef<'t>> {
    block.children().filter(|c| {
        !matches!(c.kind(), NodeKind::BlockOpen | NodeKind::BlockClose) && !c.kind().is_comment()
    })
}

fn only_statement(decl: NodeRef<'_>) -> Option<NodeRef<'_>> {
    let block = decl.try_first_child_of_kind(NodeKind::Block)?;
    let mut stmts = statements(block);
    let first = stmts.next()?;
    stmts.next().is_none().then_some(first)
}

fn has_property_prefix(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_uppercase)
}

fn parameter_count(decl: NodeRef<'_>) -> usize {
    decl.try_first_child_of_kind(NodeKind::Parameters)
        .map_or(0, |p| p.children().filter(|c| c.kind() == NodeKind::Parameter).count())
}

fn return_type(decl: NodeRef<'_>) -> Option<&str> {
    decl.try_first_child_of_kind(NodeKind::TypeReference)
        .map(NodeRef::text)
}

/// `getX()`/`isX()` with no parameters, a non-void type and a single `return`.
fn is_getter(decl: NodeRef<'_>) -> bool {
    decl.kind() == NodeKind::Method
        && decl
            .name()
            .is_some_and(|n| has_property_prefix(n, "get") || has_property_prefix(n, "is"))
        && parameter_count(decl) == 0
        && return_type(decl).is_some_and(|t| t != "void")
        && only_statement(decl).is_some_and(|s| s.kind() == NodeKind::ReturnStatement)
}

/// `setX(v)` returning void whose body is a single assignment.
fn is_setter(decl: NodeRef<'_>) -> bool {
    decl.kind() == NodeKind::Method
        && decl.name().is_some_and(|n| has_property_prefix(n, "set"))
        && parameter_count(decl) == 1
        && return_type(decl) == Some("void")
        && only_statement(decl).is_some_and(|s| {
            s.kind() == NodeKind::ExpressionStatement
                && s.try_first_child_of_kind(NodeKind::Assignment).is_some()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{added, all_added, check_with, lines, FILE};
    use delta_lint_core::{ChangeSet, FileChange, RunContext};

    fn offline(config: ScopedJavadocConfigBuilder) -> ScopedJavadoc {
        ScopedJavadoc::new(config.enabled_git(false).changed_file_set([FILE]).build().unwrap())
    }

    const DOCUMENTED: &str = "public class Sample {\n\n    /**\n     * Runs.\n     */\n    public void run() {\n        a();\n    }\n}\n";

    const UNDOCUMENTED: &str = "public class Sample {\n\n    public void run() {\n        a();\n        b();\n        c();\n    }\n}\n";

    #[test]
    fn test_undocumented_changed_method_is_reported() {
        let violations = check_with(
            offline(ScopedJavadocConfig::builder()),
            UNDOCUMENTED,
            all_added(UNDOCUMENTED),
        );
        assert_eq!(lines(&violations), vec![3]);
        assert_eq!(violations[0].location.column, 5);
        assert_eq!(violations[0].key, KEY);
        assert!(violations[0].message.starts_with("You are missing a JavaDoc comment"));
    }

    #[test]
    fn test_documented_method_passes() {
        let violations = check_with(
            offline(ScopedJavadocConfig::builder()),
            DOCUMENTED,
            all_added(DOCUMENTED),
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_only_changes_inside_body_count() {
        // Body spans lines 3..=7; 0-based 2 is line 3.
        for (changed, expected) in [(0, 0), (1, 0), (2, 1), (6, 1), (7, 0)] {
            let violations = check_with(
                offline(ScopedJavadocConfig::builder()),
                UNDOCUMENTED,
                added([changed]),
            );
            assert_eq!(violations.len(), expected, "changed line {changed}");
        }
    }

    #[test]
    fn test_deleted_lines_count() {
        let run = RunContext::with_changes(
            ChangeSet::new().with(FileChange::new(FILE).with_deleted([4])),
        );
        let violations = check_with(offline(ScopedJavadocConfig::builder()), UNDOCUMENTED, run);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_file_outside_allowlist_is_skipped() {
        let rule = ScopedJavadoc::new(
            ScopedJavadocConfig::builder()
                .enabled_git(false)
                .changed_file_set(["Other.java"])
                .build()
                .unwrap(),
        );
        assert!(check_with(rule, UNDOCUMENTED, all_added(UNDOCUMENTED)).is_empty());
    }

    #[test]
    fn test_git_allowlist_from_change_set() {
        let rule = ScopedJavadoc::default();
        let violations = check_with(rule, UNDOCUMENTED, all_added(UNDOCUMENTED));
        assert_eq!(violations.len(), 1);

        let rule = ScopedJavadoc::new(
            ScopedJavadocConfig::builder()
                .file_extensions(["kt"])
                .build()
                .unwrap(),
        );
        assert!(check_with(rule, UNDOCUMENTED, all_added(UNDOCUMENTED)).is_empty());
    }

    #[test]
    fn test_min_line_count() {
        // Three body lines.
        for (min, expected) in [(-1, 1), (1, 1), (2, 1), (3, 0), (10, 0)] {
            let rule = offline(ScopedJavadocConfig::builder().min_line_count(min));
            let violations = check_with(rule, UNDOCUMENTED, all_added(UNDOCUMENTED));
            assert_eq!(violations.len(), expected, "minLineCount {min}");
        }
    }

    #[test]
    fn test_empty_body_counts_as_one_line() {
        let src = "class Sample {\n    void run() {\n\n    }\n}\n";
        let rule = offline(ScopedJavadocConfig::builder().min_line_count(0));
        assert_eq!(check_with(rule, src, all_added(src)).len(), 1);
        let rule = offline(ScopedJavadocConfig::builder().min_line_count(1));
        assert!(check_with(rule, src, all_added(src)).is_empty());
    }

    #[test]
    fn test_ignore_class_name_regex_is_anchored() {
        let rule = offline(ScopedJavadocConfig::builder().ignore_class_name_regex("Sam"));
        assert_eq!(check_with(rule, UNDOCUMENTED, all_added(UNDOCUMENTED)).len(), 1);

        let rule = offline(ScopedJavadocConfig::builder().ignore_class_name_regex("Sam.*"));
        assert!(check_with(rule, UNDOCUMENTED, all_added(UNDOCUMENTED)).is_empty());
    }

    #[test]
    fn test_access_filter_applies_to_declaration_and_type() {
        let public_only = || {
            offline(ScopedJavadocConfig::builder().access_modifiers([AccessLevel::Public]))
        };
        assert_eq!(
            check_with(public_only(), UNDOCUMENTED, all_added(UNDOCUMENTED)).len(),
            1
        );

        let hidden_type = UNDOCUMENTED.replace("public class", "class");
        assert!(check_with(public_only(), &hidden_type, all_added(&hidden_type)).is_empty());

        let private_method = UNDOCUMENTED.replace("public void", "private void");
        assert!(check_with(public_only(), &private_method, all_added(&private_method)).is_empty());
    }

    #[test]
    fn test_anonymous_class_members_are_skipped() {
        let src = "class Sample {\n    Object o = new Object() {\n        public String toString() {\n            return \"x\";\n        }\n    };\n}\n";
        let rule = offline(ScopedJavadocConfig::builder());
        assert!(check_with(rule, src, all_added(src)).is_empty());
    }

    #[test]
    fn test_allowed_annotations_match_simple_names() {
        let src = "class Sample {\n    @java.lang.Override\n    public String toString() {\n        return \"x\";\n    }\n}\n";
        let rule = offline(ScopedJavadocConfig::builder().allowed_annotations(["Override"]));
        assert!(check_with(rule, src, all_added(src)).is_empty());

        let rule = offline(ScopedJavadocConfig::builder().allowed_annotations(["Deprecated"]));
        assert_eq!(check_with(rule, src, all_added(src)).len(), 1);
    }

    #[test]
    fn test_property_accessors() {
        let src = "class Sample {\n    private int size;\n    private boolean open;\n\n    int getSize() {\n        return size;\n    }\n\n    boolean isOpen() {\n        return open;\n    }\n\n    void setSize(int size) {\n        this.size = size;\n    }\n\n    int getsize() {\n        return size;\n    }\n\n    void setOpen(boolean open) {\n        this.open = open;\n        this.size = 0;\n    }\n}\n";
        let rule = offline(ScopedJavadocConfig::builder());
        assert_eq!(lines(&check_with(rule, src, all_added(src))), vec![5, 9, 13, 17, 21]);

        let rule = offline(ScopedJavadocConfig::builder().allow_missing_property_javadoc(true));
        assert_eq!(lines(&check_with(rule, src, all_added(src))), vec![17, 21]);
    }

    #[test]
    fn test_constructors_are_checked() {
        let src = "class Sample {\n    Sample() {\n        init();\n    }\n}\n";
        let rule = offline(ScopedJavadocConfig::builder());
        assert_eq!(lines(&check_with(rule, src, all_added(src))), vec![2]);
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let run = all_added(UNDOCUMENTED);
        let analyzer = delta_lint_core::Analyzer::builder()
            .root("/repo")
            .parser(delta_lint_java::JavaParser::new())
            .run_context(run)
            .rule(offline(ScopedJavadocConfig::builder()))
            .build()
            .unwrap();
        let path = std::path::Path::new("/repo").join(FILE);
        let first = analyzer.check_source(&path, UNDOCUMENTED).unwrap();
        let second = analyzer.check_source(&path, UNDOCUMENTED).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_builder_validation() {
        assert!(matches!(
            ScopedJavadocConfig::builder().enabled_git(false).build(),
            Err(RuleConfigError::MissingChangedFileSet { .. })
        ));
        assert!(matches!(
            ScopedJavadocConfig::builder().file_extensions(["java", ""]).build(),
            Err(RuleConfigError::EmptyExtension { .. })
        ));
        let config = ScopedJavadocConfig::builder()
            .file_extensions(["java", ".kt"])
            .build()
            .unwrap();
        assert_eq!(config.file_extensions(), [".java", ".kt"]);
    }

    #[test]
    fn test_from_rule_config() {
        let options = RuleConfig::default()
            .with_option("minLineCount", 2)
            .with_option("accessModifiers", "public, protected")
            .with_option("enabledGit", false)
            .with_option("changedFileSet", vec!["A.java", "B.java"])
            .with_option("mainBranch", "develop");
        let config = ScopedJavadocConfig::from_rule_config(&options).unwrap();

        assert_eq!(config.min_line_count(), 2);
        assert_eq!(
            config.access_modifiers().iter().copied().collect::<Vec<_>>(),
            vec![AccessLevel::Public, AccessLevel::Protected]
        );
        assert!(!config.enabled_git());
        assert_eq!(config.main_branch(), "develop");

        let bad = RuleConfig::default().with_option("accessModifiers", vec!["friend"]);
        assert!(matches!(
            ScopedJavadocConfig::from_rule_config(&bad),
            Err(RuleConfigError::InvalidAccessLevel { .. })
        ));
    }
}
