//! Structured string filters.
//!
//! A [`FilterSet`] is produced either from GET /strings query parameters or
//! by the [`natural_language`] parser. The store evaluates the palindrome,
//! length and word-count predicates; `contains_character` is always applied
//! by the caller on the rows the store returns.

pub mod natural_language;

use serde::{Deserialize, Serialize};

use crate::models::AnalyzedString;
use crate::store::StorePredicate;

/// Partial query over analyzed strings. Unset fields are omitted from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<char>,
    /// Set by "shorter than 0"; no length satisfies it.
    #[serde(skip)]
    pub(crate) max_below_zero: bool,
}

/// How `contains_character` compares against stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterMatch {
    Exact,
    IgnoreCase,
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The predicates a record store can evaluate itself.
    pub fn store_predicate(&self) -> StorePredicate {
        StorePredicate {
            is_palindrome: self.is_palindrome,
            min_length: self.min_length,
            max_length: self.max_length,
            word_count: self.word_count,
        }
    }

    /// Residual `contains_character` check on a row returned by the store.
    pub fn matches_residual(&self, record: &AnalyzedString, mode: CharacterMatch) -> bool {
        let Some(needle) = self.contains_character else {
            return true;
        };
        match mode {
            CharacterMatch::Exact => record.value.contains(needle),
            CharacterMatch::IgnoreCase => {
                let needle: String = needle.to_lowercase().collect();
                record.value.to_lowercase().contains(&needle)
            }
        }
    }

    /// Drop rows failing the residual predicate.
    pub fn apply_residual(
        &self,
        records: Vec<AnalyzedString>,
        mode: CharacterMatch,
    ) -> Vec<AnalyzedString> {
        if self.contains_character.is_none() {
            return records;
        }
        records
            .into_iter()
            .filter(|r| self.matches_residual(r, mode))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::StringAnalyzer;

    fn record(value: &str) -> AnalyzedString {
        StringAnalyzer::default().analyze(value).unwrap()
    }

    #[test]
    fn test_absent_fields_are_omitted_from_json() {
        let filters = FilterSet {
            is_palindrome: Some(true),
            min_length: Some(6),
            ..Default::default()
        };
        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(json, serde_json::json!({"is_palindrome": true, "min_length": 6}));
        assert_eq!(
            serde_json::to_value(FilterSet::default()).unwrap(),
            serde_json::json!({})
        );
    }

    #[test]
    fn test_contains_character_serializes_as_string() {
        let filters = FilterSet {
            contains_character: Some('z'),
            ..Default::default()
        };
        let json = serde_json::to_string(&filters).unwrap();
        assert_eq!(json, r#"{"contains_character":"z"}"#);
    }

    #[test]
    fn test_is_empty() {
        assert!(FilterSet::default().is_empty());
        let filters = FilterSet {
            word_count: Some(1),
            ..Default::default()
        };
        assert!(!filters.is_empty());

        let impossible = FilterSet {
            max_below_zero: true,
            ..Default::default()
        };
        assert!(!impossible.is_empty());
        assert_eq!(serde_json::to_value(&impossible).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_store_predicate_excludes_contains_character() {
        let filters = FilterSet {
            is_palindrome: Some(false),
            word_count: Some(2),
            contains_character: Some('a'),
            ..Default::default()
        };
        let predicate = filters.store_predicate();
        assert_eq!(predicate.is_palindrome, Some(false));
        assert_eq!(predicate.word_count, Some(2));
        assert_eq!(predicate.min_length, None);
    }

    #[test]
    fn test_residual_case_modes() {
        let filters = FilterSet {
            contains_character: Some('a'),
            ..Default::default()
        };
        let upper = record("ABC");
        assert!(!filters.matches_residual(&upper, CharacterMatch::Exact));
        assert!(filters.matches_residual(&upper, CharacterMatch::IgnoreCase));
        assert!(filters.matches_residual(&record("cat"), CharacterMatch::Exact));
    }

    #[test]
    fn test_apply_residual_without_character_keeps_everything() {
        let rows = vec![record("one"), record("two")];
        let kept = FilterSet::default().apply_residual(rows, CharacterMatch::Exact);
        assert_eq!(kept.len(), 2);
    }
}
