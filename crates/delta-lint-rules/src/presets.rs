//! Rule presets for common configurations.

use crate::{
    AnnotationGap, IntermediateBlankRun, LongMethodJavadoc, RuleConfigError, ScopedJavadoc,
    TrailingBlankLine,
};
use delta_lint_core::RuleBox;
use std::str::FromStr;

/// Preset configurations for delta-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Spacing rules plus change-scoped Javadoc.
    Recommended,
    /// Recommended rules plus Javadoc on long methods.
    Strict,
    /// Spacing rules only; no version-control access.
    Minimal,
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }

    /// Names of the rules in this preset, in registration order.
    #[must_use]
    pub fn rule_names(self) -> &'static [&'static str] {
        match self {
            Self::Recommended => &RECOMMENDED,
            Self::Strict => &ALL,
            Self::Minimal => &MINIMAL,
        }
    }

    /// Names of every built-in rule.
    #[must_use]
    pub fn all_rule_names() -> &'static [&'static str] {
        &ALL
    }
}

impl FromStr for Preset {
    type Err = RuleConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recommended" => Ok(Self::Recommended),
            "strict" => Ok(Self::Strict),
            "minimal" => Ok(Self::Minimal),
            _ => Err(RuleConfigError::UnknownPreset(s.to_string())),
        }
    }
}

const MINIMAL: [&str; 3] = [
    crate::annotation_gap::NAME,
    crate::trailing_blank_line::NAME,
    crate::intermediate_blank_run::NAME,
];

const RECOMMENDED: [&str; 4] = [
    crate::annotation_gap::NAME,
    crate::trailing_blank_line::NAME,
    crate::intermediate_blank_run::NAME,
    crate::scoped_javadoc::NAME,
];

const ALL: [&str; 5] = [
    crate::annotation_gap::NAME,
    crate::trailing_blank_line::NAME,
    crate::intermediate_blank_run::NAME,
    crate::scoped_javadoc::NAME,
    crate::long_method_javadoc::NAME,
];

/// Returns the recommended set of rules.
///
/// Includes:
/// - `annotation-gap` (DL001)
/// - `trailing-blank-line` (DL002)
/// - `intermediate-blank-run` (DL003)
/// - `scoped-javadoc` (DL004) with default options
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    vec![
        Box::new(AnnotationGap::new()),
        Box::new(TrailingBlankLine::new()),
        Box::new(IntermediateBlankRun::new()),
        Box::new(ScopedJavadoc::default()),
    ]
}

/// Returns the strict set of rules.
///
/// Includes all recommended rules plus `long-method-javadoc` (DL005).
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    let mut rules = recommended_rules();
    rules.push(Box::new(LongMethodJavadoc::default()));
    rules
}

/// Returns the minimal set of rules.
///
/// For gradual adoption, only the spacing rules, which never query git.
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![
        Box::new(AnnotationGap::new()),
        Box::new(TrailingBlankLine::new()),
        Box::new(IntermediateBlankRun::new()),
    ]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    strict_rules()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_rules() {
        assert!(!Preset::Recommended.rules().is_empty());
        assert!(!Preset::Strict.rules().is_empty());
        assert!(!Preset::Minimal.rules().is_empty());
    }

    #[test]
    fn test_rule_names_match_rules() {
        for preset in [Preset::Recommended, Preset::Strict, Preset::Minimal] {
            let names: Vec<&str> = preset.rules().iter().map(|r| r.name()).collect();
            assert_eq!(names, preset.rule_names(), "{preset:?}");
        }
        assert_eq!(all_rules().len(), Preset::all_rule_names().len());
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<&str> = all_rules().iter().map(|r| r.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes, vec!["DL001", "DL002", "DL003", "DL004", "DL005"]);
    }

    #[test]
    fn test_parse_preset() {
        assert_eq!("Strict".parse::<Preset>().unwrap(), Preset::Strict);
        assert!("loose".parse::<Preset>().is_err());
    }
}
