//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::FileContext;
use crate::diff::{DiffError, RunContext};
use crate::parser::{ParseError, SourceParser};
use crate::rule::{Diagnostics, Finding, Rule, RuleBox, RuleError};
use crate::tree::NodeKind;
use crate::types::{LintResult, Location, Violation};
use crate::utils::allowance::AllowDirectives;

use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a source file.
    #[error("Parse error in {path}: {source}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Underlying parse error.
        source: ParseError,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Version-control query failed while checking a file.
    #[error("Version control error while checking {path}: {source}")]
    Diff {
        /// File being checked.
        path: PathBuf,
        /// Underlying error.
        source: DiffError,
    },

    /// No parser was configured.
    #[error("No source parser configured")]
    MissingParser,

    /// The worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    parser: Option<Box<dyn SourceParser>>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    run: Option<Arc<RunContext>>,
    parallelism: Option<usize>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the parser used for every file.
    #[must_use]
    pub fn parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules, keeping their order.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the run context shared by all checks (default: git in the root).
    #[must_use]
    pub fn run_context(mut self, run: impl Into<Arc<RunContext>>) -> Self {
        self.run = Some(run.into());
        self
    }

    /// Sets the number of worker threads (default: rayon's global pool).
    #[must_use]
    pub fn parallelism(mut self, workers: usize) -> Self {
        self.parallelism = Some(workers);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser was set or the working directory is unavailable.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let parser = self.parser.ok_or(AnalyzerError::MissingParser)?;
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());

        let extensions = if config.analyzer.extensions.is_empty() {
            parser.extensions().iter().map(|e| (*e).to_string()).collect()
        } else {
            config
                .analyzer
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect()
        };

        let rules: Vec<RuleBox> = self
            .rules
            .into_iter()
            .filter(|r| {
                let enabled = config.is_rule_enabled(r.name());
                if !enabled {
                    debug!("Skipping disabled rule: {}", r.name());
                }
                enabled
            })
            .collect();

        let mut dispatch: HashMap<NodeKind, Vec<usize>> = HashMap::new();
        for (index, rule) in rules.iter().enumerate() {
            for kind in rule.node_kinds() {
                dispatch.entry(*kind).or_default().push(index);
            }
        }

        let run = self
            .run
            .unwrap_or_else(|| Arc::new(RunContext::git(root.clone())));
        let parallelism = self.parallelism.or(config.analyzer.parallelism);
        let fail_on_parse_error = self.fail_on_parse_error || config.analyzer.fail_on_parse_error;

        Ok(Analyzer {
            root,
            parser,
            rules,
            dispatch,
            exclude_patterns,
            extensions,
            config,
            run,
            parallelism,
            fail_on_parse_error,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    parser: Box<dyn SourceParser>,
    rules: Vec<RuleBox>,
    dispatch: HashMap<NodeKind, Vec<usize>>,
    exclude_patterns: Vec<String>,
    extensions: Vec<String>,
    config: Config,
    run: Arc<RunContext>,
    parallelism: Option<usize>,
    fail_on_parse_error: bool,
}

enum FileOutcome {
    Checked(Vec<Violation>),
    Skipped,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of active rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the run context shared by the checks.
    #[must_use]
    pub fn run_context(&self) -> &RunContext {
        &self.run
    }

    /// Analyzes all files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails, a version-control query
    /// fails, or a file fails to parse while `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files = self.discover_files()?;
        info!("Found {} files to analyze", files.len());

        let outcomes = match self.parallelism {
            Some(workers) => rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()
                .map_err(|e| AnalyzerError::ThreadPool(e.to_string()))?
                .install(|| self.analyze_all(&files)),
            None => self.analyze_all(&files),
        }?;

        let mut result = LintResult::new();
        for outcome in outcomes {
            match outcome {
                FileOutcome::Checked(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                FileOutcome::Skipped => result.files_skipped += 1,
            }
        }
        result.sort();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Checks `files` in parallel, stopping at the first fatal error.
    fn analyze_all(&self, files: &[PathBuf]) -> Result<Vec<FileOutcome>, AnalyzerError> {
        files
            .par_iter()
            .map(|path| match self.analyze_file(path) {
                Ok(violations) => Ok(FileOutcome::Checked(violations)),
                Err(AnalyzerError::Parse { path, source }) if !self.fail_on_parse_error => {
                    warn!("Skipping {}: {}", path.display(), source);
                    Ok(FileOutcome::Skipped)
                }
                Err(e) => Err(e),
            })
            .collect::<Result<Vec<_>, _>>()
    }

    /// Analyzes a single file and returns violations.
    fn analyze_file(&self, path: &Path) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        self.check_source(path, &content)
    }

    /// Checks in-memory source as if it were the file at `path`.
    ///
    /// Runs every active rule over the parsed tree, then applies allow
    /// directives and severity overrides. Violations are returned in
    /// (line, column) order, ties in emission order.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Parse`] if the source does not parse and
    /// [`AnalyzerError::Diff`] if a version-control query fails.
    pub fn check_source(&self, path: &Path, content: &str) -> Result<Vec<Violation>, AnalyzerError> {
        let tree = self
            .parser
            .parse(content)
            .map_err(|source| AnalyzerError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let ctx = FileContext::new(path, content, &self.root, &self.run);
        let mut sink = Diagnostics::new();
        let mut findings: Vec<(usize, Finding)> = Vec::new();

        for node in tree.root().subtree() {
            let Some(indices) = self.dispatch.get(&node.kind()) else {
                continue;
            };
            for &index in indices {
                match self.rules[index].check_node(&ctx, node, &mut sink) {
                    Ok(()) => {}
                    Err(RuleError::Shape(e)) => {
                        debug!("{}: skipping node in {}: {e}", self.rules[index].name(), path.display());
                        sink.clear();
                        continue;
                    }
                    Err(RuleError::Diff(source)) => {
                        return Err(AnalyzerError::Diff {
                            path: path.to_path_buf(),
                            source,
                        });
                    }
                }
                findings.extend(sink.drain().into_iter().map(|f| (index, f)));
            }
        }

        let directives = AllowDirectives::scan(content);
        let mut violations: Vec<Violation> = findings
            .into_iter()
            .filter_map(|(index, finding)| {
                let rule = self.rules[index].as_ref();
                self.to_violation(&ctx, &directives, rule, finding)
            })
            .collect();
        violations.sort_by(|a, b| {
            a.location
                .line
                .cmp(&b.location.line)
                .then(a.location.column.cmp(&b.location.column))
        });

        Ok(violations)
    }

    fn to_violation(
        &self,
        ctx: &FileContext<'_>,
        directives: &AllowDirectives,
        rule: &dyn Rule,
        finding: Finding,
    ) -> Option<Violation> {
        let allow = directives.check(finding.line, rule.name());
        if allow.is_allowed() {
            if allow.reason().is_none() && rule.requires_allow_reason() {
                warn!(
                    "{}:{}: allow({}) without reason=\"...\"",
                    ctx.relative_path.display(),
                    finding.line,
                    rule.name()
                );
            }
            return None;
        }

        let severity = self
            .config
            .rule_severity(rule.name())
            .unwrap_or_else(|| rule.default_severity());
        let message = rule.message(finding.key, &finding.args);

        Some(
            Violation::new(
                rule.code(),
                rule.name(),
                severity,
                Location::new(ctx.relative_path.clone(), finding.line, finding.column),
                message,
            )
            .with_key(finding.key, finding.args),
        )
    }

    /// Discovers all source files to analyze, sorted by path.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut files = Vec::new();

        for ext in &self.extensions {
            let pattern = format!("{}/**/*.{ext}", self.root.display());
            for entry in glob::glob(&pattern)? {
                let path = entry.map_err(|e| AnalyzerError::Io(e.into_error()))?;
                if self.should_exclude(&path) {
                    debug!("Excluding: {}", path.display());
                    continue;
                }
                files.push(path);
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let candidates = [path.to_string_lossy(), relative.to_string_lossy()];

        self.exclude_patterns.iter().any(|pattern| {
            let globbed = glob::Pattern::new(pattern)
                .is_ok_and(|p| candidates.iter().any(|c| p.matches(c)));
            // "**/build/**" also excludes "build/..." directly under the root
            let trimmed = pattern.trim_start_matches("**/").trim_end_matches("/**");
            globbed
                || (!trimmed.is_empty()
                    && !trimmed.contains('*')
                    && relative
                        .components()
                        .any(|c| c.as_os_str() == std::ffi::OsStr::new(trimmed)))
        })
    }
}
