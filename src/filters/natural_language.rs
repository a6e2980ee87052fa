//! Plain-English phrase to [`FilterSet`] translation.
//!
//! The parser is a fixed, ordered table of `(pattern, effect)` rules matched
//! against the lower-cased phrase. Every matching rule applies its effect in
//! table order, so when two rules of the same category match, the later one
//! wins. Rules from different categories combine freely.
//!
//! ## Example Phrases
//!
//! - "all single word palindromic strings"
//! - "strings longer than 10 characters"
//! - "strings containing the letter z"
//! - "palindromic strings that contain the first vowel"

use regex::{Captures, Regex};
use serde::Serialize;
use thiserror::Error;

use super::FilterSet;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unable to parse natural language query into valid filters")]
    Unparsable,
    #[error("conflicting length filters: {0}")]
    ConflictingFilters(String),
    #[error("number out of range in query: {0}")]
    InvalidNumber(String),
}

/// Which FilterSet field a rule writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCategory {
    Palindrome,
    WordCount,
    Length,
    Character,
}

type Effect = fn(&Captures, &mut FilterSet) -> Result<(), ParseError>;

struct FilterRule {
    category: FilterCategory,
    regex: Regex,
    apply: Effect,
}

/// Natural language filter parser
pub struct FilterParser {
    rules: Vec<FilterRule>,
}

impl Default for FilterParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterParser {
    pub fn new() -> Self {
        Self {
            rules: Self::build_rules(),
        }
    }

    fn build_rules() -> Vec<FilterRule> {
        // Patterns are compile-time constants; a failure here is a typo in this table.
        fn rule(category: FilterCategory, pattern: &str, apply: Effect) -> FilterRule {
            FilterRule {
                category,
                regex: Regex::new(pattern).expect("filter rule pattern must compile"),
                apply,
            }
        }

        vec![
            rule(FilterCategory::Palindrome, r"palindrom(?:e|ic)", |_, f| {
                f.is_palindrome = Some(true);
                Ok(())
            }),
            rule(
                FilterCategory::WordCount,
                r"single word|one word|1 word",
                |_, f| {
                    f.word_count = Some(1);
                    Ok(())
                },
            ),
            rule(FilterCategory::WordCount, r"two word|2 word", |_, f| {
                f.word_count = Some(2);
                Ok(())
            }),
            rule(FilterCategory::WordCount, r"three word|3 word", |_, f| {
                f.word_count = Some(3);
                Ok(())
            }),
            rule(FilterCategory::Length, r"longer than ([0-9]+)", |caps, f| {
                let n = capture_number(caps)?;
                let min = n
                    .checked_add(1)
                    .ok_or_else(|| ParseError::InvalidNumber(n.to_string()))?;
                f.min_length = Some(min);
                Ok(())
            }),
            rule(FilterCategory::Length, r"shorter than ([0-9]+)", |caps, f| {
                let n = capture_number(caps)?;
                match n.checked_sub(1) {
                    Some(max) => set_max_length(f, max),
                    // Left for validate; a later max_length rule may still replace it
                    None => {
                        f.max_length = None;
                        f.max_below_zero = true;
                    }
                }
                Ok(())
            }),
            rule(
                FilterCategory::Length,
                r"at least ([0-9]+) character",
                |caps, f| {
                    f.min_length = Some(capture_number(caps)?);
                    Ok(())
                },
            ),
            rule(
                FilterCategory::Length,
                r"at most ([0-9]+) character",
                |caps, f| {
                    set_max_length(f, capture_number(caps)?);
                    Ok(())
                },
            ),
            rule(
                FilterCategory::Length,
                r"exactly ([0-9]+) character",
                |caps, f| {
                    let n = capture_number(caps)?;
                    f.min_length = Some(n);
                    set_max_length(f, n);
                    Ok(())
                },
            ),
            rule(
                FilterCategory::Character,
                r"(?:containing|contains|with) (?:the )?letter ([a-z])",
                capture_character,
            ),
            rule(
                FilterCategory::Character,
                r"(?:containing|contains|with) (?:the )?character (\S)",
                capture_character,
            ),
            // Vowel ordinals run highest first so the lowest one named wins
            rule(FilterCategory::Character, r"fifth vowel", |_, f| {
                f.contains_character = Some('u');
                Ok(())
            }),
            rule(FilterCategory::Character, r"fourth vowel", |_, f| {
                f.contains_character = Some('o');
                Ok(())
            }),
            rule(FilterCategory::Character, r"third vowel", |_, f| {
                f.contains_character = Some('i');
                Ok(())
            }),
            rule(FilterCategory::Character, r"second vowel", |_, f| {
                f.contains_character = Some('e');
                Ok(())
            }),
            rule(FilterCategory::Character, r"first vowel", |_, f| {
                f.contains_character = Some('a');
                Ok(())
            }),
        ]
    }

    /// Apply every matching rule in table order. The result may be empty or
    /// contradictory; see [`FilterParser::validate`].
    pub fn parse(&self, phrase: &str) -> Result<FilterSet, ParseError> {
        let lowered = phrase.to_lowercase();
        let mut filters = FilterSet::default();

        for rule in &self.rules {
            if let Some(caps) = rule.regex.captures(&lowered) {
                (rule.apply)(&caps, &mut filters)?;
            }
        }

        Ok(filters)
    }

    /// Reject filter sets that matched nothing or whose length bounds cross.
    pub fn validate(filters: &FilterSet) -> Result<(), ParseError> {
        if filters.is_empty() {
            return Err(ParseError::Unparsable);
        }
        if filters.max_below_zero {
            return Err(ParseError::ConflictingFilters(
                "no string is shorter than 0 characters".to_string(),
            ));
        }
        if let (Some(min), Some(max)) = (filters.min_length, filters.max_length) {
            if min > max {
                return Err(ParseError::ConflictingFilters(format!(
                    "min_length ({min}) cannot be greater than max_length ({max})"
                )));
            }
        }
        Ok(())
    }

    /// `parse` followed by `validate`.
    pub fn interpret(&self, phrase: &str) -> Result<FilterSet, ParseError> {
        let filters = self.parse(phrase)?;
        Self::validate(&filters)?;
        Ok(filters)
    }
}

fn capture_number(caps: &Captures) -> Result<usize, ParseError> {
    let raw = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    raw.parse()
        .map_err(|_| ParseError::InvalidNumber(raw.to_string()))
}

fn set_max_length(filters: &mut FilterSet, max: usize) {
    filters.max_length = Some(max);
    filters.max_below_zero = false;
}

fn capture_character(caps: &Captures, filters: &mut FilterSet) -> Result<(), ParseError> {
    if let Some(c) = caps.get(1).and_then(|m| m.as_str().chars().next()) {
        filters.contains_character = Some(c);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(phrase: &str) -> FilterSet {
        FilterParser::new().parse(phrase).unwrap()
    }

    #[test]
    fn test_palindromic_and_longer_than() {
        let filters = parse("strings that are palindromic and longer than 5");
        assert_eq!(
            filters,
            FilterSet {
                is_palindrome: Some(true),
                min_length: Some(6),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_single_word_palindromic() {
        let filters = parse("all single word palindromic strings");
        assert_eq!(filters.is_palindrome, Some(true));
        assert_eq!(filters.word_count, Some(1));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let filters = parse("PALINDROME strings With The Letter Q");
        assert_eq!(filters.is_palindrome, Some(true));
        assert_eq!(filters.contains_character, Some('q'));
    }

    #[test]
    fn test_word_count_last_rule_wins() {
        assert_eq!(parse("two word or three word").word_count, Some(3));
        assert_eq!(parse("three word or two word").word_count, Some(3));
        assert_eq!(parse("1 word or 2 words").word_count, Some(2));
    }

    #[test]
    fn test_shorter_than() {
        assert_eq!(parse("shorter than 10").max_length, Some(9));
    }

    #[test]
    fn test_shorter_than_zero_is_a_conflict() {
        let filters = parse("shorter than 0");
        assert!(!filters.is_empty());
        assert_eq!(filters.max_length, None);
        assert!(matches!(
            FilterParser::validate(&filters),
            Err(ParseError::ConflictingFilters(_))
        ));
    }

    #[test]
    fn test_later_max_rule_replaces_shorter_than_zero() {
        let parser = FilterParser::new();
        let filters = parser
            .interpret("shorter than 0 characters or at most 5 characters")
            .unwrap();
        assert_eq!(filters.max_length, Some(5));

        let filters = parser
            .interpret("shorter than 0 or exactly 4 characters")
            .unwrap();
        assert_eq!(filters.min_length, Some(4));
        assert_eq!(filters.max_length, Some(4));
    }

    #[test]
    fn test_min_rule_does_not_clear_shorter_than_zero() {
        let parser = FilterParser::new();
        assert!(matches!(
            parser.interpret("shorter than 0 and at least 2 characters"),
            Err(ParseError::ConflictingFilters(_))
        ));
    }

    #[test]
    fn test_at_least_and_at_most() {
        let filters = parse("at least 3 characters and at most 8 characters");
        assert_eq!(filters.min_length, Some(3));
        assert_eq!(filters.max_length, Some(8));
    }

    #[test]
    fn test_at_least_overrides_longer_than() {
        // Same category, later rule in the table
        let filters = parse("longer than 20 and at least 4 characters");
        assert_eq!(filters.min_length, Some(4));
    }

    #[test]
    fn test_exactly_sets_both_bounds() {
        let filters = parse("exactly 7 characters");
        assert_eq!(filters.min_length, Some(7));
        assert_eq!(filters.max_length, Some(7));
        assert!(FilterParser::validate(&filters).is_ok());
    }

    #[test]
    fn test_contains_letter_variants() {
        assert_eq!(parse("strings containing the letter z").contains_character, Some('z'));
        assert_eq!(parse("contains letter b").contains_character, Some('b'));
        assert_eq!(parse("words with the character x").contains_character, Some('x'));
    }

    #[test]
    fn test_vowel_ordinals() {
        assert_eq!(parse("contain the first vowel").contains_character, Some('a'));
        assert_eq!(parse("second vowel").contains_character, Some('e'));
        assert_eq!(parse("third vowel").contains_character, Some('i'));
        assert_eq!(parse("fourth vowel").contains_character, Some('o'));
        assert_eq!(parse("fifth vowel").contains_character, Some('u'));
    }

    #[test]
    fn test_lowest_vowel_ordinal_wins() {
        assert_eq!(
            parse("the first vowel or the second vowel").contains_character,
            Some('a')
        );
        assert_eq!(
            parse("the fifth vowel or the third vowel").contains_character,
            Some('i')
        );
    }

    #[test]
    fn test_vowel_overrides_explicit_letter() {
        let filters = parse("containing the letter z and the first vowel");
        assert_eq!(filters.contains_character, Some('a'));
    }

    #[test]
    fn test_categories_combine() {
        let filters = parse("palindromic two word strings longer than 3 containing the letter a");
        assert_eq!(
            filters,
            FilterSet {
                is_palindrome: Some(true),
                min_length: Some(4),
                max_length: None,
                word_count: Some(2),
                contains_character: Some('a'),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_unmatched_phrase_is_unparsable() {
        let filters = parse("banana");
        assert!(filters.is_empty());
        assert_eq!(FilterParser::validate(&filters), Err(ParseError::Unparsable));
    }

    #[test]
    fn test_cross_rule_conflict_detected_after_parse() {
        let parser = FilterParser::new();
        let filters = parser
            .parse("shorter than 3 characters and at least 10 characters")
            .unwrap();
        assert_eq!(filters.min_length, Some(10));
        assert_eq!(filters.max_length, Some(2));
        assert!(matches!(
            FilterParser::validate(&filters),
            Err(ParseError::ConflictingFilters(_))
        ));
    }

    #[test]
    fn test_overflowing_number_is_rejected() {
        let err = FilterParser::new()
            .parse("longer than 999999999999999999999999999")
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber(_)));
    }

    #[test]
    fn test_interpret_runs_validation() {
        let parser = FilterParser::new();
        assert_eq!(parser.interpret("hello there"), Err(ParseError::Unparsable));
        assert!(parser.interpret("palindrome").is_ok());
    }

    #[test]
    fn test_rule_table_order_is_stable() {
        let parser = FilterParser::new();
        let categories: Vec<FilterCategory> = parser.rules.iter().map(|r| r.category).collect();
        assert_eq!(categories.len(), 16);
        assert_eq!(categories[0], FilterCategory::Palindrome);
        assert_eq!(categories[1..4], [FilterCategory::WordCount; 3]);
        assert_eq!(categories[4..9], [FilterCategory::Length; 5]);
        assert_eq!(categories[9..], [FilterCategory::Character; 7]);
    }
}
