//! Derives the deterministic properties of a string.
//!
//! All counts are in Unicode codepoints. Whitespace is dropped before the
//! palindrome check and the distinct-character count, but it stays in the
//! frequency map, so `sum(character_frequency_map) == length` always holds.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

use crate::models::{AnalyzedString, StringProperties};

/// Default upper bound on value length, in codepoints.
pub const DEFAULT_MAX_LENGTH: usize = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("value is {length} characters long; the maximum is {max}")]
    ValueTooLong { length: usize, max: usize },
    #[error("invalid data type for \"value\" (must be string, got {0})")]
    InvalidType(&'static str),
}

/// Stateless analyzer configured with a single length bound.
#[derive(Debug, Clone, Copy)]
pub struct StringAnalyzer {
    max_length: usize,
}

impl Default for StringAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LENGTH)
    }
}

impl StringAnalyzer {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Analyze `value`, stamping it with the current time.
    pub fn analyze(&self, value: &str) -> Result<AnalyzedString, AnalyzeError> {
        self.analyze_at(value, Utc::now())
    }

    /// Analyze a JSON value, rejecting anything that is not a string.
    pub fn analyze_json(&self, value: &serde_json::Value) -> Result<AnalyzedString, AnalyzeError> {
        match value {
            serde_json::Value::String(s) => self.analyze(s),
            other => Err(AnalyzeError::InvalidType(json_kind(other))),
        }
    }

    /// Analyze with an explicit timestamp. The bound is checked before
    /// anything is hashed.
    pub fn analyze_at(
        &self,
        value: &str,
        created_at: DateTime<Utc>,
    ) -> Result<AnalyzedString, AnalyzeError> {
        let length = value.chars().count();
        if length > self.max_length {
            return Err(AnalyzeError::ValueTooLong {
                length,
                max: self.max_length,
            });
        }

        let hash = sha256_hex(value);
        Ok(AnalyzedString {
            id: hash.clone(),
            value: value.to_string(),
            properties: StringProperties {
                length,
                is_palindrome: is_palindrome(value),
                unique_characters: unique_characters(value),
                word_count: word_count(value),
                sha256_hash: hash,
                character_frequency_map: character_frequency_map(value),
            },
            created_at,
        })
    }
}

/// Hex SHA-256 of the UTF-8 bytes.
pub fn sha256_hex(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}

/// Simple lowercase with all whitespace removed, compared against its own
/// reversal. Empty and single-character strings are palindromes.
pub fn is_palindrome(value: &str) -> bool {
    let cleaned: Vec<char> = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(simple_lowercase)
        .collect();
    cleaned.iter().eq(cleaned.iter().rev())
}

/// One codepoint in, one codepoint out. Characters whose full lowercase
/// mapping expands (e.g. 'İ' to "i\u{307}") are kept as they are.
fn simple_lowercase(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

pub fn unique_characters(value: &str) -> usize {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<HashSet<char>>()
        .len()
}

/// Maximal runs of non-whitespace. Empty or all-whitespace input is 0.
pub fn word_count(value: &str) -> usize {
    value.split_whitespace().count()
}

pub fn character_frequency_map(value: &str) -> BTreeMap<char, usize> {
    let mut freq = BTreeMap::new();
    for c in value.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }
    freq
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
