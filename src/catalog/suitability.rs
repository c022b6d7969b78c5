//! Parameter-size suitability heuristic

use regex::Regex;
use std::sync::LazyLock;

static NUMERIC_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9.]+").expect("static regex"));

/// Extract the first numeric token from a parameter-size string
///
/// Returns `None` when the string has no numeric token or the token does
/// not parse as a number (e.g. a bare `.`).
pub fn parse_param_count(size: &str) -> Option<f64> {
    let token = NUMERIC_TOKEN.find(size)?;
    token.as_str().parse::<f64>().ok()
}

/// Decides whether a model's parameter count fits the target GPU
#[derive(Debug, Clone, Copy)]
pub struct SizeClassifier {
    threshold_b: f64,
}

impl SizeClassifier {
    /// `threshold_b` is the largest parameter count (in billions) the
    /// target GPU is considered able to run.
    pub fn new(threshold_b: f64) -> Self {
        Self { threshold_b }
    }

    /// `true` iff the first numeric token in `size` parses and is at or
    /// below the threshold. Unparseable sizes are never suitable.
    pub fn is_suitable(&self, size: &str) -> bool {
        match parse_param_count(size) {
            Some(value) => value <= self.threshold_b,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> SizeClassifier {
        SizeClassifier::new(7.0)
    }

    #[test]
    fn test_size_at_threshold_is_suitable() {
        assert!(classifier().is_suitable("7B"));
    }

    #[test]
    fn test_size_above_threshold_is_not_suitable() {
        assert!(!classifier().is_suitable("7.5B"));
        assert!(!classifier().is_suitable("13B"));
    }

    #[test]
    fn test_small_sizes_are_suitable() {
        assert!(classifier().is_suitable("2B"));
        assert!(classifier().is_suitable("4.2B"));
    }

    #[test]
    fn test_sentinel_is_not_suitable() {
        assert!(!classifier().is_suitable("Unknown"));
    }

    #[test]
    fn test_empty_string_is_not_suitable() {
        assert!(!classifier().is_suitable(""));
    }

    #[test]
    fn test_bare_dot_does_not_parse() {
        assert_eq!(parse_param_count("."), None);
        assert!(!classifier().is_suitable(".B"));
    }

    #[test]
    fn test_token_found_anywhere_in_string() {
        assert_eq!(parse_param_count("about 3.8 billion"), Some(3.8));
        assert!(classifier().is_suitable("about 3.8 billion"));
    }

    #[test]
    fn test_custom_threshold() {
        let classifier = SizeClassifier::new(13.0);
        assert!(classifier.is_suitable("13B"));
        assert!(!classifier.is_suitable("13.2B"));
    }
}
