//! Changes command implementation.
//!
//! Prints the added and deleted lines that change-scoped rules see, which
//! helps explain why a declaration was or was not checked.

use anyhow::{Context, Result};
use delta_lint_core::{ChangeSet, Config, FileChange, RunContext};
use delta_lint_rules::{Rule, ScopedJavadoc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Write;
use std::path::Path;

use super::output::OutputFormat;

#[derive(Serialize)]
struct ChangeReport<'a> {
    base: &'a str,
    files: Vec<&'a FileChange>,
}

/// Runs the changes command.
///
/// Without `--base`, compares against the `mainBranch` of `scoped-javadoc`
/// so the output matches what that rule sees.
pub fn run(path: &Path, base: Option<&str>, format: OutputFormat, config: &Config) -> Result<()> {
    let base = base_branch(base, config);
    let base = base.as_str();
    let run = RunContext::git(path);
    let changes = run
        .changes(base)
        .with_context(|| format!("Failed to diff against origin/{base}"))?;

    tracing::debug!("{} changed file(s) against {}", changes.len(), base);

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&ChangeReport {
            base,
            files: changes.iter().collect(),
        })?,
        OutputFormat::Text | OutputFormat::Compact => render_text(&changes),
    };
    println!("{rendered}");
    Ok(())
}

fn base_branch(flag: Option<&str>, config: &Config) -> String {
    flag.map(str::to_string)
        .or_else(|| {
            config
                .rule(ScopedJavadoc::default().name())
                .and_then(|rule| rule.options.get("mainBranch"))
                .and_then(|value| value.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "main".to_string())
}

/// One line per file with 1-based line ranges.
fn render_text(changes: &ChangeSet) -> String {
    if changes.is_empty() {
        return "No changes".to_string();
    }
    let mut out = String::new();
    for change in changes.iter() {
        let _ = write!(out, "{}", change.path.display());
        if !change.added.is_empty() {
            let _ = write!(out, " +{}", ranges(&change.added));
        }
        if !change.deleted.is_empty() {
            let _ = write!(out, " -{}", ranges(&change.deleted));
        }
        out.push('\n');
    }
    out.pop();
    out
}

/// Collapses 0-based line numbers into 1-based `a-b` runs.
fn ranges(lines: &BTreeSet<usize>) -> String {
    let mut runs: Vec<(usize, usize)> = Vec::new();
    for &line in lines {
        match runs.last_mut() {
            Some((_, end)) if *end + 1 == line => *end = line,
            _ => runs.push((line, line)),
        }
    }
    runs.iter()
        .map(|&(start, end)| {
            if start == end {
                (start + 1).to_string()
            } else {
                format!("{}-{}", start + 1, end + 1)
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_branch_follows_scoped_javadoc() {
        let config = Config::parse("[rules.scoped-javadoc]\nmainBranch = \"develop\"\n").unwrap();
        assert_eq!(base_branch(None, &config), "develop");
        assert_eq!(base_branch(Some("release"), &config), "release");
        assert_eq!(base_branch(None, &Config::default()), "main");
    }

    #[test]
    fn test_ranges_are_one_based() {
        let lines: BTreeSet<usize> = [0, 1, 2, 6, 9, 10].into_iter().collect();
        assert_eq!(ranges(&lines), "1-3,7,10-11");
    }

    #[test]
    fn test_render_text() {
        let changes = ChangeSet::new()
            .with(FileChange::new("src/A.java").with_added([4, 5]).with_deleted([2]))
            .with(FileChange::new("src/B.java").with_deleted([0]));
        insta::assert_snapshot!(render_text(&changes), @r"
        src/A.java +5-6 -3
        src/B.java -1
        ");
    }

    #[test]
    fn test_render_nothing_changed() {
        assert_eq!(render_text(&ChangeSet::new()), "No changes");
    }
}
