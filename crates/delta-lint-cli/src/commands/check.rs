//! Check command implementation.

use anyhow::{Context, Result};
use delta_lint_core::{Analyzer, Config, RuleBox};
use delta_lint_java::JavaParser;
use delta_lint_rules::rules_from_config;
use std::path::Path;

use super::output::OutputFormat;

/// Command-line options of `delta-lint check`.
#[derive(Debug, Default)]
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes to keep.
    pub rules_filter: Option<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
    /// Parallel file checks.
    pub jobs: Option<usize>,
    /// Abort on unparsable files.
    pub fail_on_parse_error: bool,
}

/// Runs the check command.
pub fn run(path: &Path, options: &CheckOptions, config: Config) -> Result<()> {
    let fail_on = config
        .fail_on_severity()
        .context("Invalid `fail_on` severity")?;

    let rules = select_rules(&config, options.rules_filter.as_deref())?;

    let mut builder = Analyzer::builder()
        .root(path)
        .parser(JavaParser::new())
        .excludes(options.exclude.iter().cloned())
        .fail_on_parse_error(options.fail_on_parse_error)
        .rules(rules)
        .config(config);
    if let Some(jobs) = options.jobs {
        builder = builder.parallelism(jobs);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!("Analyzing {:?} with {} rules", path, analyzer.rule_count());

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, options.format)?;

    if result.has_violations_at(fail_on) {
        std::process::exit(1);
    }

    Ok(())
}

/// Builds the configured rules, optionally narrowed to `filter`.
///
/// A filter may name any built-in rule, including ones outside the
/// configured preset.
fn select_rules(config: &Config, filter: Option<&str>) -> Result<Vec<RuleBox>> {
    let Some(filter) = filter else {
        return rules_from_config(config).context("Invalid rule configuration");
    };

    let wanted: Vec<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let mut everything = config.clone();
    everything.preset = Some("strict".to_string());
    let rules = rules_from_config(&everything).context("Invalid rule configuration")?;

    for name in &wanted {
        if !rules.iter().any(|r| r.name() == *name || r.code() == *name) {
            tracing::warn!("Unknown rule: {}", name);
        }
    }

    Ok(rules
        .into_iter()
        .filter(|r| wanted.iter().any(|w| r.name() == *w || r.code() == *w))
        .collect())
}
