//! Hosted table store speaking the PostgREST dialect (`/rest/v1/<table>`).
//!
//! Rows are flat: the nested `properties` object is spread into columns on
//! the way in and rebuilt on the way out.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use super::{RecordStore, StoreError, StorePredicate};
use crate::config::StoreConfig;
use crate::models::{AnalyzedString, StringProperties};

/// One row of the `strings` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StringRow {
    id: String,
    value: String,
    length: usize,
    is_palindrome: bool,
    unique_characters: usize,
    word_count: usize,
    sha256_hash: String,
    character_frequency_map: BTreeMap<char, usize>,
    created_at: DateTime<Utc>,
}

impl From<&AnalyzedString> for StringRow {
    fn from(record: &AnalyzedString) -> Self {
        let props = &record.properties;
        Self {
            id: record.id.clone(),
            value: record.value.clone(),
            length: props.length,
            is_palindrome: props.is_palindrome,
            unique_characters: props.unique_characters,
            word_count: props.word_count,
            sha256_hash: props.sha256_hash.clone(),
            character_frequency_map: props.character_frequency_map.clone(),
            created_at: record.created_at,
        }
    }
}

impl From<StringRow> for AnalyzedString {
    fn from(row: StringRow) -> Self {
        Self {
            id: row.id,
            value: row.value,
            properties: StringProperties {
                length: row.length,
                is_palindrome: row.is_palindrome,
                unique_characters: row.unique_characters,
                word_count: row.word_count,
                sha256_hash: row.sha256_hash,
                character_frequency_map: row.character_frequency_map,
            },
            created_at: row.created_at,
        }
    }
}

pub struct RestTableStore {
    client: reqwest::Client,
    table_url: String,
    api_key: String,
    timeout: Duration,
}

impl RestTableStore {
    pub fn new(client: reqwest::Client, config: &StoreConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .context("Store base_url not configured")?;
        let api_key = config
            .api_key
            .clone()
            .context("Store api_key not configured")?;

        Ok(Self {
            client,
            table_url: format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), config.table),
            api_key,
            timeout: Duration::from_secs(config.timeout_secs.min(30)),
        })
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        self.client
            .request(method, &self.table_url)
            .timeout(self.timeout)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn rows(resp: reqwest::Response) -> Result<Vec<AnalyzedString>, StoreError> {
        let resp = check_status(resp).await?;
        let rows: Vec<StringRow> = resp.json().await?;
        Ok(rows.into_iter().map(AnalyzedString::from).collect())
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Err(StoreError::Status { status, body })
}

fn eq_filter(value: &str) -> String {
    format!("eq.{value}")
}

/// PostgREST query parameters for the pushed-down predicates.
fn predicate_params(predicate: &StorePredicate) -> Vec<(&'static str, String)> {
    let mut params = vec![("select", "*".to_string())];
    if let Some(p) = predicate.is_palindrome {
        params.push(("is_palindrome", format!("eq.{p}")));
    }
    if let Some(min) = predicate.min_length {
        params.push(("length", format!("gte.{min}")));
    }
    if let Some(max) = predicate.max_length {
        params.push(("length", format!("lte.{max}")));
    }
    if let Some(wc) = predicate.word_count {
        params.push(("word_count", format!("eq.{wc}")));
    }
    params
}

#[async_trait]
impl RecordStore for RestTableStore {
    async fn insert(&self, record: &AnalyzedString) -> Result<AnalyzedString, StoreError> {
        let resp = self
            .request(reqwest::Method::POST)
            .header("Prefer", "return=representation")
            .json(&[StringRow::from(record)])
            .send()
            .await?;

        if resp.status() == StatusCode::CONFLICT {
            return Err(StoreError::Conflict(record.id.clone()));
        }

        let mut rows = Self::rows(resp).await?;
        // Representation is empty when the table hides inserted rows from this key
        Ok(rows.pop().unwrap_or_else(|| record.clone()))
    }

    async fn get_by_value(&self, value: &str) -> Result<Option<AnalyzedString>, StoreError> {
        let resp = self
            .request(reqwest::Method::GET)
            .query(&[("select", "*".to_string()), ("value", eq_filter(value))])
            .query(&[("limit", "1")])
            .send()
            .await?;
        Ok(Self::rows(resp).await?.into_iter().next())
    }

    async fn list_where(
        &self,
        predicate: &StorePredicate,
    ) -> Result<Vec<AnalyzedString>, StoreError> {
        let resp = self
            .request(reqwest::Method::GET)
            .query(&predicate_params(predicate))
            .send()
            .await?;
        Self::rows(resp).await
    }

    async fn delete_by_value(&self, value: &str) -> Result<bool, StoreError> {
        let resp = self
            .request(reqwest::Method::DELETE)
            .header("Prefer", "return=representation")
            .query(&[("value", eq_filter(value))])
            .send()
            .await?;
        Ok(!Self::rows(resp).await?.is_empty())
    }
}
