//! Init command implementation.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "delta-lint.toml";

const DEFAULT_CONFIG: &str = r#"# delta-lint configuration

# recommended | strict | minimal
preset = "recommended"

# Lowest severity that makes `delta-lint check` exit non-zero
fail_on = "error"

[analyzer]
# Glob patterns to exclude from analysis
exclude = [
    "**/build/**",
    "**/target/**",
    "**/generated/**",
]

# File extensions to analyze (default: java)
# extensions = ["java"]

# Abort instead of skipping files that fail to parse
fail_on_parse_error = false

# Javadoc is required only on declarations touched by the current change
[rules.scoped-javadoc]
enabled = true
# severity = "error"
mainBranch = "main"
minLineCount = -1
allowMissingPropertyJavadoc = true
allowedAnnotations = ["Override"]
accessModifiers = ["public", "protected", "package", "private"]
# ignoreClassNameRegex = ".*Test"

# [rules.long-method-javadoc]
# enabled = true
# max = 150
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = write_config(Path::new("."), force)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: delta-lint check");

    Ok(())
}

fn write_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    Ok(config_path)
}
