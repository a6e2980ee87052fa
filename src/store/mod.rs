//! Persistence for analyzed strings.
//!
//! [`RecordStore`] is the contract the handlers rely on. Two backends exist:
//! [`memory::MemoryStore`] (process-local, optionally persisted to a JSON
//! file) and [`rest::RestTableStore`] (a hosted PostgREST-style table).

pub mod memory;
pub mod rest;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::AnalyzedString;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("string already exists in the system (id {0})")]
    Conflict(String),
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Predicates a store evaluates itself: equality on palindrome and word
/// count, inclusive range on length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorePredicate {
    pub is_palindrome: Option<bool>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub word_count: Option<usize>,
}

impl StorePredicate {
    pub fn matches(&self, record: &AnalyzedString) -> bool {
        let props = &record.properties;
        self.is_palindrome.map_or(true, |p| props.is_palindrome == p)
            && self.min_length.map_or(true, |min| props.length >= min)
            && self.max_length.map_or(true, |max| props.length <= max)
            && self.word_count.map_or(true, |wc| props.word_count == wc)
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new record. Fails with [`StoreError::Conflict`] when the id
    /// is already present.
    async fn insert(&self, record: &AnalyzedString) -> Result<AnalyzedString, StoreError>;

    async fn get_by_value(&self, value: &str) -> Result<Option<AnalyzedString>, StoreError>;

    async fn list_where(
        &self,
        predicate: &StorePredicate,
    ) -> Result<Vec<AnalyzedString>, StoreError>;

    /// Returns `false` when nothing matched.
    async fn delete_by_value(&self, value: &str) -> Result<bool, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::StringAnalyzer;

    fn record(value: &str) -> AnalyzedString {
        StringAnalyzer::default().analyze(value).unwrap()
    }

    #[test]
    fn test_empty_predicate_matches_everything() {
        assert!(StorePredicate::default().matches(&record("")));
        assert!(StorePredicate::default().matches(&record("anything at all")));
    }

    #[test]
    fn test_length_range_is_inclusive() {
        let predicate = StorePredicate {
            min_length: Some(3),
            max_length: Some(5),
            ..Default::default()
        };
        assert!(!predicate.matches(&record("ab")));
        assert!(predicate.matches(&record("abc")));
        assert!(predicate.matches(&record("abcde")));
        assert!(!predicate.matches(&record("abcdef")));
    }

    #[test]
    fn test_equality_predicates() {
        let predicate = StorePredicate {
            is_palindrome: Some(true),
            word_count: Some(1),
            ..Default::default()
        };
        assert!(predicate.matches(&record("level")));
        assert!(!predicate.matches(&record("step on no pets")));
        assert!(!predicate.matches(&record("hello")));
    }
}
