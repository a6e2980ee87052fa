//! # strings-api
//!
//! A small REST service that analyzes strings, stores the results, and
//! filters them either with structured query parameters or with a short
//! plain-English phrase.
//!
//! ## Architecture
//!
//! ```text
//!   POST /strings {value}                GET /strings/filter-by-natural-language?query=
//!          │                                              │
//!          ▼                                              ▼
//!   ┌──────────────┐                            ┌───────────────────┐
//!   │StringAnalyzer│ length bound, SHA-256 id,  │   FilterParser    │ ordered rule table,
//!   │              │ palindrome, counts, freq   │                   │ last write wins
//!   └──────┬───────┘                            └─────────┬─────────┘
//!          │ AnalyzedString                               │ FilterSet
//!          ▼                                              ▼
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                 RecordStore (memory | hosted table)          │
//!   │  insert (409 on duplicate id) · get · list_where · delete    │
//!   └──────────────────────────────┬───────────────────────────────┘
//!                                  │ rows matching palindrome/length/word_count
//!                                  ▼
//!                     contains_character applied in-process
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for the server, length bound and store
//! - [`models`] - `AnalyzedString` and request/response types
//! - [`analyzer`] - Deterministic string properties and the SHA-256 content id
//! - [`filters`] - `FilterSet` and residual character matching
//! - [`filters::natural_language`] - English phrase to `FilterSet` rule table
//! - [`store`] - `RecordStore` trait with in-memory and PostgREST-style backends
//! - [`api`] - Axum router, handlers and error rendering
//! - [`state`] - Shared application state

pub mod analyzer;
pub mod api;
pub mod config;
pub mod filters;
pub mod models;
pub mod state;
pub mod store;
