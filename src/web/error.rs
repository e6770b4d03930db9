
use std::sync::Arc;

use crate::model;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use tracing::debug;

pub type Result<T> = core::result::Result<T, Error>;

/// Which response body family a failing endpoint answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// `{success:false, error}`
    Action,
    /// `{found:false, users:[], error}`
    Search,
}

#[derive(Debug, Clone)]
pub enum Error {
    Model { surface: Surface, source: model::Error },
}

impl Error {
    pub fn action(source: model::Error) -> Self {
        Self::Model { surface: Surface::Action, source }
    }

    pub fn search(source: model::Error) -> Self {
        Self::Model { surface: Surface::Search, source }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        debug!("{:<12} - web::Error {self:?}", "INTO_RES");
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(Arc::new(self));
        response
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Model { source, .. } => write!(f, "{source}"),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn client_status_and_error(&self) -> (StatusCode, ClientError) {
        let Self::Model { surface, source } = self;

        match source {
            model::Error::MissingFields => (StatusCode::BAD_REQUEST, ClientError::FIELDS_REQUIRED),
            model::Error::PhoneRequired => (StatusCode::BAD_REQUEST, ClientError::PHONE_REQUIRED),
            model::Error::Store(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ClientError::SERVICE_ERROR {
                    surface: *surface,
                    detail: err.to_string(),
                },
            ),
        }
    }

    pub fn is_service_error(&self) -> bool {
        matches!(self, Self::Model { source: model::Error::Store(_), .. })
    }
}

#[derive(Debug, Clone, strum_macros::AsRefStr)]
#[allow(non_camel_case_types)]
pub enum ClientError {
    FIELDS_REQUIRED,
    PHONE_REQUIRED,
    SERVICE_ERROR { surface: Surface, detail: String },
}

impl ClientError {
    pub fn body(&self) -> Value {
        match self {
            Self::FIELDS_REQUIRED => json!({
                "success": false,
                "error": model::Error::MissingFields.to_string(),
            }),
            Self::PHONE_REQUIRED => json!({
                "success": false,
                "error": model::Error::PhoneRequired.to_string(),
            }),
            Self::SERVICE_ERROR { surface: Surface::Action, detail } => json!({
                "success": false,
                "error": detail,
            }),
            Self::SERVICE_ERROR { surface: Surface::Search, detail } => json!({
                "found": false,
                "users": [],
                "error": detail,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store;

    #[test]
    fn validation_errors_are_bad_requests() {
        let (status, client) = Error::action(model::Error::MissingFields).client_status_and_error();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            client.body(),
            json!({"success": false, "error": "All fields are required"})
        );

        let (status, client) = Error::action(model::Error::PhoneRequired).client_status_and_error();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(client.body(), json!({"success": false, "error": "phone required"}));
    }

    #[test]
    fn store_errors_keep_the_surface_shape() {
        let source = model::Error::Store(store::Error::Api {
            status: 403,
            message: "The caller does not have permission".to_string(),
        });

        let err = Error::search(source.clone());
        assert!(err.is_service_error());
        let (status, client) = err.client_status_and_error();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            client.body(),
            json!({
                "found": false,
                "users": [],
                "error": "Sheets API error (403): The caller does not have permission",
            })
        );

        let (_, client) = Error::action(source).client_status_and_error();
        assert_eq!(
            client.body(),
            json!({
                "success": false,
                "error": "Sheets API error (403): The caller does not have permission",
            })
        );
    }
}
