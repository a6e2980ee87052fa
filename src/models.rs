use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::filters::FilterSet;

/// An analyzed string as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedString {
    /// SHA-256 hex digest of the UTF-8 bytes of `value`
    pub id: String,
    pub value: String,
    pub properties: StringProperties,
    pub created_at: DateTime<Utc>,
}

/// Properties derived from the value at analysis time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringProperties {
    /// Unicode codepoints, not bytes
    pub length: usize,
    pub is_palindrome: bool,
    /// Distinct codepoints, whitespace excluded
    pub unique_characters: usize,
    pub word_count: usize,
    pub sha256_hash: String,
    /// Every codepoint, whitespace included
    pub character_frequency_map: BTreeMap<char, usize>,
}

/// Raw GET /strings query parameters, validated by the handler.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListStringsQuery {
    pub is_palindrome: Option<String>,
    pub min_length: Option<String>,
    pub max_length: Option<String>,
    pub word_count: Option<String>,
    pub contains_character: Option<String>,
}

/// GET /strings response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListStringsResponse {
    pub data: Vec<AnalyzedString>,
    pub count: usize,
    pub filters_applied: FilterSet,
}

/// GET /strings/filter-by-natural-language query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NaturalLanguageQuery {
    pub query: Option<String>,
}

/// GET /strings/filter-by-natural-language response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaturalLanguageResponse {
    pub data: Vec<AnalyzedString>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpretedQuery {
    pub original: String,
    pub parsed_filters: FilterSet,
}

/// Body of every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}
