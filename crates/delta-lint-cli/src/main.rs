//! `delta-lint`: Java spacing and Javadoc checks, with the Javadoc rule
//! limited to what the current branch changed.
//!
//! ```bash
//! delta-lint check src/main/java          # lint, exit 1 at or above `fail_on`
//! delta-lint check --rules DL004 -f json  # one rule, machine-readable
//! delta-lint changes --base develop       # lines the diff-scoped rule sees
//! delta-lint list-rules
//! delta-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

use commands::output::OutputFormat;

#[derive(Parser)]
#[command(name = "delta-lint", author, version, about, long_about = None)]
struct Cli {
    /// Log every per-declaration decision (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file; skips the project and user lookup
    #[arg(short, long, global = true, env = "DELTA_LINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lint Java sources under a directory
    Check {
        /// Directory whose `.java` files are checked
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Report layout
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,

        /// Keep only these rules, by name or DL code, comma separated
        #[arg(long, value_name = "RULES")]
        rules: Option<String>,

        /// Extra glob of files to leave out; repeatable
        #[arg(short, long, value_name = "GLOB")]
        exclude: Vec<String>,

        /// Worker threads (defaults to `analyzer.parallelism`, then one per core)
        #[arg(short = 'j', long)]
        jobs: Option<usize>,

        /// Stop at the first file tree-sitter cannot parse instead of skipping it
        #[arg(long)]
        fail_on_parse_error: bool,
    },

    /// Print the added and deleted lines against `origin/<base>...`
    Changes {
        /// Any directory inside the repository
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Base branch (defaults to `mainBranch` of scoped-javadoc, then `main`)
        #[arg(short, long)]
        base: Option<String>,

        /// `json` prints raw 0-based line numbers
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Show rule codes, names and preset membership
    ListRules,

    /// Write a starter delta-lint.toml into the current directory
    Init {
        /// Replace an existing delta-lint.toml
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Check {
            path,
            format,
            rules,
            exclude,
            jobs,
            fail_on_parse_error,
        } => {
            let config = load_config(&path, cli.config.as_deref())?;
            let options = commands::check::CheckOptions {
                format,
                rules_filter: rules,
                exclude,
                jobs,
                fail_on_parse_error,
            };
            commands::check::run(&path, &options, config)
        }
        Command::Changes { path, base, format } => {
            let config = load_config(&path, cli.config.as_deref())?;
            commands::changes::run(&path, base.as_deref(), format, &config)
        }
        Command::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Command::Init { force } => commands::init::run(force),
    }
}

fn load_config(path: &Path, flag: Option<&Path>) -> Result<delta_lint_core::Config> {
    let resolved = config_resolver::load(path, flag)?;
    match (&resolved.origin, &resolved.path) {
        (config_resolver::Origin::User, Some(file)) => {
            tracing::info!("Using user config: {}", file.display());
        }
        (origin, file) => tracing::debug!(?origin, ?file, "Configuration resolved"),
    }
    Ok(resolved.config)
}
