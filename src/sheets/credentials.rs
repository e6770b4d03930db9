use std::{fs, path::PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;

use crate::model::store::{Error, Result};

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Where the service-account key comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Base64(String),
    Json(String),
    File(PathBuf),
}

impl CredentialSource {
    /// Inline base64 wins over inline JSON, which wins over the key file.
    pub fn pick(base64: Option<String>, json: Option<String>, file: PathBuf) -> Self {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        match (present(base64), present(json)) {
            (Some(encoded), _) => Self::Base64(encoded),
            (None, Some(json)) => Self::Json(json),
            (None, None) => Self::File(file),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Base64(_) => "GOOGLE_SERVICE_ACCOUNT_BASE64".to_string(),
            Self::Json(_) => "GOOGLE_SERVICE_ACCOUNT".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

impl std::fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CredentialSource({})", self.describe())
    }
}

#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn load(source: &CredentialSource) -> Result<Self> {
        let fail = |msg: String| Error::Credentials(format!("{}: {msg}", source.describe()));

        let json = match source {
            CredentialSource::Base64(encoded) => {
                let bytes = STANDARD
                    .decode(encoded.trim())
                    .map_err(|e| fail(e.to_string()))?;
                String::from_utf8(bytes).map_err(|e| fail(e.to_string()))?
            }
            CredentialSource::Json(json) => json.clone(),
            CredentialSource::File(path) => {
                fs::read_to_string(path).map_err(|e| fail(e.to_string()))?
            }
        };

        let mut key: ServiceAccountKey =
            serde_json::from_str(&json).map_err(|e| fail(e.to_string()))?;

        // Hosting dashboards often store the PEM with escaped newlines.
        key.private_key = key.private_key.replace("\\n", "\n");

        Ok(key)
    }
}
