use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use super::ApiError;
use crate::filters::{CharacterMatch, FilterSet};
use crate::models::{
    AnalyzedString, InterpretedQuery, ListStringsQuery, ListStringsResponse,
    NaturalLanguageQuery, NaturalLanguageResponse,
};
use crate::state::AppState;

/// POST /strings - Analyze and store a new string
pub async fn create_string(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<AnalyzedString>), ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let value = body
        .get("value")
        .ok_or_else(|| ApiError::bad_request("Missing required field: value"))?;

    let analyzed = state.analyzer.analyze_json(value)?;

    // Duplicates surface as a store conflict; there is no separate existence check
    let stored = match state.store.insert(&analyzed).await {
        Ok(stored) => stored,
        Err(e) => {
            tracing::debug!("Insert of {} rejected: {e}", analyzed.id);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Stored string {} ({} chars)",
        stored.id,
        stored.properties.length
    );
    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /strings/{value} - Fetch one string by its exact value
pub async fn get_string(
    State(state): State<AppState>,
    Path(value): Path<String>,
) -> Result<Json<AnalyzedString>, ApiError> {
    state
        .store
        .get_by_value(&value)
        .await?
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

/// GET /strings - List strings matching optional structured filters
pub async fn list_strings(
    State(state): State<AppState>,
    query: Result<Query<ListStringsQuery>, QueryRejection>,
) -> Result<Json<ListStringsResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let filters = parse_list_filters(&query)?;

    let rows = state.store.list_where(&filters.store_predicate()).await?;
    let data = filters.apply_residual(rows, CharacterMatch::Exact);

    Ok(Json(ListStringsResponse {
        count: data.len(),
        data,
        filters_applied: filters,
    }))
}

/// GET /strings/filter-by-natural-language?query=... - Filter by an English phrase
pub async fn filter_by_natural_language(
    State(state): State<AppState>,
    params: Result<Query<NaturalLanguageQuery>, QueryRejection>,
) -> Result<Json<NaturalLanguageResponse>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let original = params
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing or invalid query parameter"))?;

    let filters = match state.parser.interpret(original.trim()) {
        Ok(filters) => filters,
        Err(e) => {
            tracing::info!("Rejected natural language query {original:?}: {e}");
            return Err(e.into());
        }
    };
    tracing::debug!("Interpreted {original:?} as {filters:?}");

    let rows = state.store.list_where(&filters.store_predicate()).await?;
    let data = filters.apply_residual(rows, CharacterMatch::IgnoreCase);

    Ok(Json(NaturalLanguageResponse {
        count: data.len(),
        data,
        interpreted_query: InterpretedQuery {
            original,
            parsed_filters: filters,
        },
    }))
}

/// DELETE /strings/{value} - Remove a string by its exact value
pub async fn delete_string(
    State(state): State<AppState>,
    Path(value): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !state.store.delete_by_value(&value).await? {
        return Err(ApiError::not_found());
    }
    tracing::info!("Deleted string {value:?}");
    Ok(StatusCode::NO_CONTENT)
}

/// Validate GET /strings query parameters into a FilterSet.
pub fn parse_list_filters(query: &ListStringsQuery) -> Result<FilterSet, ApiError> {
    let mut filters = FilterSet::default();

    if let Some(raw) = &query.is_palindrome {
        filters.is_palindrome = Some(match raw.as_str() {
            "true" => true,
            "false" => false,
            _ => {
                return Err(ApiError::bad_request(
                    "Invalid value for is_palindrome. Must be true or false",
                ))
            }
        });
    }
    filters.min_length = non_negative("min_length", query.min_length.as_deref())?;
    filters.max_length = non_negative("max_length", query.max_length.as_deref())?;
    filters.word_count = non_negative("word_count", query.word_count.as_deref())?;

    if let Some(raw) = &query.contains_character {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => filters.contains_character = Some(c),
            _ => {
                return Err(ApiError::bad_request(
                    "Invalid value for contains_character. Must be a single character",
                ))
            }
        }
    }

    Ok(filters)
}

fn non_negative(name: &str, raw: Option<&str>) -> Result<Option<usize>, ApiError> {
    raw.map(|v| {
        v.trim().parse::<usize>().map_err(|_| {
            ApiError::bad_request(format!(
                "Invalid value for {name}. Must be a non-negative integer"
            ))
        })
    })
    .transpose()
}
