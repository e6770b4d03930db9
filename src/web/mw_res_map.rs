
use std::sync::Arc;

use crate::web;
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Turns a `web::Error` left in the response extensions into its JSON client
/// body, and writes the access log line.
pub async fn mw_response_map(uri: Uri, req_method: Method, res: Response) -> Response {
    debug!("{:<12} - mw_response_map", "RES_MAPPER");

    let uuid = Uuid::new_v4();
    let web_error = res.extensions().get::<Arc<web::Error>>().cloned();

    let Some(web_error) = web_error else {
        info!("{:<12} - {req_method} {uri} {} req_uuid={uuid}", "REQUEST", res.status());
        return res;
    };

    let (status_code, client_error) = web_error.client_status_and_error();

    if web_error.is_service_error() {
        error!(
            "{:<12} - {req_method} {uri} {status_code} req_uuid={uuid} \
             error={web_error} client_error={}",
            "REQUEST",
            client_error.as_ref()
        );
    } else {
        info!("{:<12} - {req_method} {uri} {status_code} req_uuid={uuid}", "REQUEST");
    }

    (status_code, Json(client_error.body())).into_response()
}
