//! Shared output formatting for lint results.

use anyhow::Result;
use delta_lint_core::{LintResult, Severity};
use std::fmt::Write;
use std::io::IsTerminal;

/// How results are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Grouped per violation, colored on a terminal.
    #[default]
    Text,
    /// Pretty-printed JSON of the whole result.
    Json,
    /// `file:line:col: severity [code] message`, one per line.
    Compact,
}

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(result, std::io::stdout().is_terminal()),
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
        OutputFormat::Compact => render_compact(result),
    };
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}

fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("\x1b[{color}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

/// Renders the human-readable report, with ANSI colors when `color` is set.
pub fn render_text(result: &LintResult, color: bool) -> String {
    let (errors, warnings, _) = result.count_by_severity();
    let mut out = String::new();

    for violation in &result.violations {
        let severity = match violation.severity {
            Severity::Error => paint("error", "31", color),
            Severity::Warning => paint("warning", "33", color),
            Severity::Info => paint("info", "34", color),
        };

        let _ = writeln!(
            out,
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        let _ = writeln!(out, "  {severity}: {}", violation.message);
        out.push('\n');
    }

    let summary_color = if errors > 0 {
        "31"
    } else if warnings > 0 {
        "33"
    } else {
        "32"
    };
    let mut summary = result.summary();
    if result.files_skipped > 0 {
        let _ = write!(summary, ", {} file(s) skipped", result.files_skipped);
    }
    out.push_str(&paint(&summary, summary_color, color));
    out
}

/// Renders one `file:line:col: severity [code] message` line per violation.
pub fn render_compact(result: &LintResult) -> String {
    result
        .violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use delta_lint_core::{Location, Violation};
    use std::path::PathBuf;

    fn sample() -> LintResult {
        let mut result = LintResult::new();
        result.files_checked = 3;
        result.files_skipped = 1;
        result.violations.push(Violation::new(
            "DL002",
            "trailing-blank-line",
            Severity::Warning,
            Location::new(PathBuf::from("src/demo/Spacing.java"), 8, 1),
            "Empty lines are not allowed at the beginning or the end of a body",
        ));
        result.violations.push(Violation::new(
            "DL004",
            "scoped-javadoc",
            Severity::Error,
            Location::new(PathBuf::from("src/demo/Service.java"), 12, 5),
            "Missing Javadoc",
        ));
        result
    }

    #[test]
    fn test_compact_output() {
        insta::assert_snapshot!(render_compact(&sample()), @r"
        src/demo/Spacing.java:8:1: warning [DL002] Empty lines are not allowed at the beginning or the end of a body
        src/demo/Service.java:12:5: error [DL004] Missing Javadoc
        ");
    }

    #[test]
    fn test_text_output_without_color() {
        insta::assert_snapshot!(render_text(&sample(), false), @r"
        DL002 trailing-blank-line at src/demo/Spacing.java:8:1
          warning: Empty lines are not allowed at the beginning or the end of a body

        DL004 scoped-javadoc at src/demo/Service.java:12:5
          error: Missing Javadoc

        Found 1 error(s), 1 warning(s), 0 info(s) in 3 file(s), 1 file(s) skipped
        ");
    }

    #[test]
    fn test_text_output_colors_summary() {
        let rendered = render_text(&LintResult::new(), true);
        assert_eq!(
            rendered,
            "\x1b[32mFound 0 error(s), 0 warning(s), 0 info(s) in 0 file(s)\x1b[0m"
        );
    }

    #[test]
    fn test_empty_compact_output() {
        assert_eq!(render_compact(&LintResult::new()), "");
    }
}
