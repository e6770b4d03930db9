
use std::path::Path;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::model::{
    attendee::{AttendeeBmc, AttendeeForCheckIn, AttendeeForRegister, CheckIn, SearchResult},
    ModelManager,
};
use crate::web::{routes_static, Error, Result};

/// The action paths are POST only; a browser GET on them loads the front end.
pub fn routes(mm: ModelManager, web_folder: &Path) -> Router {
    let index = routes_static::index_file(web_folder);

    Router::new()
        .route("/register", post(api_register).get_service(index.clone()))
        .route("/search", get(api_search))
        .route("/checkin", post(api_check_in).get_service(index))
        .with_state(mm)
}

/// An unreadable body counts as one with every field missing.
fn body_or_default<T: Default>(payload: core::result::Result<Json<T>, JsonRejection>) -> T {
    payload
        .map(|Json(body)| body)
        .unwrap_or_else(|rejection| {
            debug!("{:<12} - rejected body: {rejection}", "HANDLER");
            T::default()
        })
}

async fn api_register(
    State(mm): State<ModelManager>,
    payload: core::result::Result<Json<AttendeeForRegister>, JsonRejection>,
) -> Result<Json<Value>> {
    debug!("{:<12} - api_register", "HANDLER");

    AttendeeBmc::register(&mm, body_or_default(payload))
        .await
        .map_err(Error::action)?;

    Ok(Json(json!({
        "success": true,
        "message": "User registered & checked in",
    })))
}

#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: Option<String>,
}

async fn api_search(
    State(mm): State<ModelManager>,
    params: core::result::Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResult>> {
    debug!("{:<12} - api_search", "HANDLER");

    // An unparseable query string searches for nothing.
    let params = params
        .map(|Query(params)| params)
        .unwrap_or_else(|rejection| {
            debug!("{:<12} - rejected query: {rejection}", "HANDLER");
            SearchParams::default()
        });
    let query = params.q.unwrap_or_default();
    let result = AttendeeBmc::search(&mm, &query)
        .await
        .map_err(Error::search)?;

    Ok(Json(result))
}

async fn api_check_in(
    State(mm): State<ModelManager>,
    payload: core::result::Result<Json<AttendeeForCheckIn>, JsonRejection>,
) -> Result<Json<Value>> {
    debug!("{:<12} - api_check_in", "HANDLER");

    let outcome = AttendeeBmc::check_in(&mm, body_or_default(payload))
        .await
        .map_err(Error::action)?;

    let body = match outcome {
        CheckIn::Updated { row } => {
            debug!("{:<12} - checked in row {}", "HANDLER", row + 1);
            json!({ "success": true, "message": "Check-in updated" })
        }
        CheckIn::NotFound => json!({ "success": false, "error": "User not found" }),
    };

    Ok(Json(body))
}
