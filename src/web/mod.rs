
mod error;
pub mod mw_res_map;
pub mod routes_attendee;
pub mod routes_static;

use std::path::Path;

use axum::{middleware, Router};
use tower_http::cors::CorsLayer;

pub use self::error::{Error, Result};

use crate::model::ModelManager;
use mw_res_map::mw_response_map;

pub fn routes_all(mm: ModelManager, web_folder: &Path) -> Router {
    Router::new()
        .merge(routes_attendee::routes(mm, web_folder))
        .layer(middleware::map_response(mw_response_map))
        .layer(CorsLayer::permissive())
        .fallback_service(routes_static::serve_dir(web_folder))
}
