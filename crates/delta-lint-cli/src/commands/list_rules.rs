//! List rules command implementation.

use delta_lint_rules::{all_rules, Preset};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<25} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<25} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nPresets:");
    for (name, preset, note) in [
        ("recommended", Preset::Recommended, " (default)"),
        ("strict", Preset::Strict, ""),
        ("minimal", Preset::Minimal, ", no git access"),
    ] {
        let codes: Vec<&str> = preset.rules().iter().map(|r| r.code()).collect();
        println!("  {name:<12} - {}{note}", codes.join(", "));
    }

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  delta-lint check --rules annotation-gap,trailing-blank-line");
    println!("  delta-lint check --rules DL001,DL004");
}
