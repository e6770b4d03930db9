use std::path::Path;

use axum::routing::{any_service, MethodRouter};
use tower_http::services::{ServeDir, ServeFile};

/// Files under `web_folder`; any other path gets the front-end entry point.
pub fn serve_dir(web_folder: &Path) -> MethodRouter {
    any_service(ServeDir::new(web_folder).fallback(index_file(web_folder)))
}

pub fn index_file(web_folder: &Path) -> ServeFile {
    ServeFile::new(web_folder.join("index.html"))
}
