//! End-to-end checks of the built-in rules over Java fixture files.

use delta_lint_core::{Analyzer, ChangeSet, Config, FileChange, RunContext, Violation};
use delta_lint_java::JavaParser;
use delta_lint_rules::{rules_from_config, ScopedJavadoc, ScopedJavadocConfig};
use std::path::Path;

const SAMPLE: &str = include_str!("fixtures/SampleTestClass.java");
const SUB_METHODS: &str = include_str!("fixtures/SubMethodsTestClass.java");
const RECORD: &str = include_str!("fixtures/RecordTestClass.java");
const SPACING: &str = include_str!("fixtures/Spacing.java");

/// Offline context where every line of `file` was added.
fn everything_added(file: &str, source: &str) -> RunContext {
    RunContext::with_changes(
        ChangeSet::new().with(FileChange::new(file).with_added(0..source.lines().count())),
    )
}

fn scoped(file: &str, min_line_count: i64) -> ScopedJavadoc {
    ScopedJavadoc::new(
        ScopedJavadocConfig::builder()
            .file_extensions(["java"])
            .changed_file_set([file])
            .enabled_git(false)
            .min_line_count(min_line_count)
            .build()
            .unwrap(),
    )
}

fn check(rule: ScopedJavadoc, file: &str, source: &str) -> Vec<Violation> {
    let analyzer = Analyzer::builder()
        .root("/project")
        .parser(JavaParser::new())
        .run_context(everything_added(file, source))
        .rule(rule)
        .build()
        .unwrap();
    analyzer
        .check_source(&Path::new("/project").join(file), source)
        .unwrap()
}

#[test]
fn test_scoped_javadoc_reports_long_private_method() {
    let violations = check(scoped("SampleTestClass.java", 1), "SampleTestClass.java", SAMPLE);

    assert_eq!(violations.len(), 1);
    assert_eq!((violations[0].location.line, violations[0].location.column), (11, 3));
    assert_eq!(
        violations[0].message,
        "You are missing a JavaDoc comment in a project. Please provide information about the \
         purpose and functionality of the method. The more detailed the information you \
         provide, the more helpful it will be for your colleagues."
    );
}

#[test]
fn test_scoped_javadoc_min_line_count_exempts_short_bodies() {
    let violations = check(scoped("SampleTestClass.java", 10), "SampleTestClass.java", SAMPLE);
    assert!(violations.is_empty());
}

#[test]
fn test_scoped_javadoc_walks_nested_types() {
    let violations = check(
        scoped("SubMethodsTestClass.java", 0),
        "SubMethodsTestClass.java",
        SUB_METHODS,
    );
    let places: Vec<usize> = violations.iter().map(|v| v.location.line).collect();
    assert_eq!(places, vec![18, 22, 28, 35]);
}

#[test]
fn test_scoped_javadoc_in_record() {
    let violations = check(scoped("RecordTestClass.java", 0), "RecordTestClass.java", RECORD);
    assert_eq!(violations.len(), 1);
    assert_eq!((violations[0].location.line, violations[0].location.column), (25, 3));
}

#[test]
fn test_scoped_javadoc_ignores_unchanged_file() {
    let analyzer = Analyzer::builder()
        .root("/project")
        .parser(JavaParser::new())
        .run_context(RunContext::with_changes(ChangeSet::new()))
        .rule(scoped("SampleTestClass.java", 1))
        .build()
        .unwrap();
    let violations = analyzer
        .check_source(Path::new("/project/SampleTestClass.java"), SAMPLE)
        .unwrap();
    assert!(violations.is_empty());
}

#[test]
fn test_minimal_preset_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src/demo");
    std::fs::create_dir_all(&src).unwrap();
    std::fs::write(src.join("Spacing.java"), SPACING).unwrap();
    std::fs::write(src.join("Broken.java"), "class Broken {\n    void run( {\n}\n").unwrap();

    let config = Config::parse("preset = \"minimal\"\n").unwrap();
    let analyzer = Analyzer::builder()
        .root(dir.path())
        .parser(JavaParser::new())
        .run_context(RunContext::with_changes(ChangeSet::new()))
        .rules(rules_from_config(&config).unwrap())
        .config(config)
        .build()
        .unwrap();
    let result = analyzer.analyze().unwrap();

    assert_eq!(result.files_checked, 1);
    assert_eq!(result.files_skipped, 1);

    let found: Vec<(usize, &str)> = result
        .violations
        .iter()
        .map(|v| (v.location.line, v.code.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            (7, "DL001"),
            (8, "DL002"),
            (10, "DL003"),
            (11, "DL003"),
            (13, "DL002"),
            (17, "DL001"),
            (21, "DL003"),
            (22, "DL003"),
            (22, "DL003"),
            (23, "DL003"),
        ]
    );
    assert!(result
        .violations
        .iter()
        .all(|v| v.location.file == Path::new("src/demo/Spacing.java")));
}

#[test]
fn test_allow_directive_silences_rule() {
    let source = SPACING.replace(
        "    public String toString() {\n",
        "    public String toString() { // delta-lint: allow(annotation-gap) reason=\"generated\"\n",
    );
    let config = Config::parse("preset = \"minimal\"\n").unwrap();
    let analyzer = Analyzer::builder()
        .root("/project")
        .parser(JavaParser::new())
        .run_context(RunContext::with_changes(ChangeSet::new()))
        .rules(rules_from_config(&config).unwrap())
        .build()
        .unwrap();
    let violations = analyzer
        .check_source(Path::new("/project/Spacing.java"), &source)
        .unwrap();

    let gaps: Vec<usize> = violations
        .iter()
        .filter(|v| v.code == "DL001")
        .map(|v| v.location.line)
        .collect();
    assert_eq!(gaps, vec![17]);
    assert_eq!(violations.len(), 9);
}
