use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use strana::{AnalysisError, FilterCriteria, PipelineError};

/// Static segment that shadows `/strings/{key}` for every method it serves.
pub const NATURAL_LANGUAGE_SEGMENT: &str = "filter-by-natural-language";

/// Body of `POST /strings`
///
/// `value` is kept untyped so a missing field and a non-string value can be
/// told apart.
#[derive(Debug, Deserialize)]
pub struct CreateStringRequest {
    #[serde(default)]
    pub value: Option<Value>,
}

/// Query parameters for `GET /strings/filter-by-natural-language`
#[derive(Debug, Deserialize)]
pub struct NaturalLanguageQuery {
    pub query: String,
}

/// Analyze and store a new string
///
/// Responds `201 Created` with the full record. Missing or blank values are
/// `400`, non-string values `422`, and an already stored value `409`.
pub async fn create_string(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<CreateStringRequest>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(request) = body.map_err(json_rejection)?;

    let value = match request.value {
        None | Some(Value::Null) => {
            return Err(PipelineError::Analysis(AnalysisError::EmptyValue).into());
        }
        Some(Value::String(value)) => value,
        Some(_) => {
            return Err(ServerError::UnprocessableEntity(
                "Value must be a string".to_string(),
            ));
        }
    };

    let record = strana::submit_value(&state.store, &value)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Fetch a stored record by its SHA-256 id
pub async fn get_string(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ServerResult<impl IntoResponse> {
    let record = strana::fetch_by_id(&state.store, &id)?;
    Ok(Json(record))
}

/// List stored strings matching optional query-string filters
///
/// Supported parameters: `is_palindrome`, `min_length`, `max_length`,
/// `word_count`, `contains_character`.
pub async fn list_strings(
    State(state): State<Arc<ServerState>>,
    query: Result<Query<FilterCriteria>, QueryRejection>,
) -> ServerResult<impl IntoResponse> {
    let Query(criteria) = query.map_err(query_rejection)?;
    let outcome = strana::search(&state.store, &criteria)?;
    Ok(Json(outcome))
}

/// Translate `?query=` into filters and list the matching strings
pub async fn filter_by_natural_language(
    State(state): State<Arc<ServerState>>,
    query: Result<Query<NaturalLanguageQuery>, QueryRejection>,
) -> ServerResult<impl IntoResponse> {
    let Query(params) = query.map_err(query_rejection)?;
    let outcome =
        strana::search_natural_language(&state.store, &state.translator, &params.query)?;
    Ok(Json(outcome))
}

/// Delete a stored string
///
/// The path segment is the raw string value, not its id; the id is derived
/// from it. Responds `204 No Content`.
pub async fn delete_string(
    State(state): State<Arc<ServerState>>,
    Path(value): Path<String>,
) -> ServerResult<impl IntoResponse> {
    strana::remove_value(&state.store, &value)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete the stored value that collides with the natural-language route
///
/// `DELETE /strings/filter-by-natural-language` lands on the static route, so
/// the value is supplied here instead of from the path.
pub async fn delete_natural_language_segment(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    strana::remove_value(&state.store, NATURAL_LANGUAGE_SEGMENT)?;
    Ok(StatusCode::NO_CONTENT)
}

fn json_rejection(rejection: JsonRejection) -> ServerError {
    match rejection {
        JsonRejection::JsonDataError(err) => ServerError::UnprocessableEntity(err.body_text()),
        other => ServerError::BadRequest(other.body_text()),
    }
}

fn query_rejection(rejection: QueryRejection) -> ServerError {
    ServerError::UnprocessableEntity(rejection.body_text())
}
