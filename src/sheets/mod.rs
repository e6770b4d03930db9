//! Google Sheets v4 backed [`RowStore`].
//!
//! Only the `values` endpoints are used: one GET for the whole tracked range,
//! `:append` for new rows and a PUT on a single-row range for updates. Values
//! are written RAW so phone numbers are never reinterpreted as numbers.

mod auth;
mod credentials;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use auth::TokenProvider;
pub use credentials::{CredentialSource, ServiceAccountKey};

use crate::model::store::{Error, Result, Row, RowStore, SheetRange};

pub const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

pub struct SheetsClient {
    http: Client,
    tokens: TokenProvider,
    base_url: String,
    spreadsheet_id: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Row>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl SheetsClient {
    pub fn new(
        key: ServiceAccountKey,
        spreadsheet_id: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(Self {
            http,
            tokens: TokenProvider::new(key)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id,
        })
    }

    fn values_url(&self, segment: &str) -> Result<Url> {
        values_url(&self.base_url, &self.spreadsheet_id, segment)
    }

    async fn request(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let token = self.tokens.access_token(&self.http).await?;
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.error.message)
            .unwrap_or(body);

        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// `{base}/{spreadsheet_id}/values/{segment}` with the segment percent-encoded.
fn values_url(base_url: &str, spreadsheet_id: &str, segment: &str) -> Result<Url> {
    let mut url = Url::parse(base_url).map_err(|e| Error::Transport(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| Error::Transport(format!("cannot use {base_url} as a base url")))?
        .push(spreadsheet_id)
        .push("values")
        .push(segment);
    Ok(url)
}

#[async_trait]
impl RowStore for SheetsClient {
    async fn fetch_rows(&self, range: &SheetRange) -> Result<Vec<Row>> {
        debug!("{:<12} - get {range}", "SHEETS");
        let url = self.values_url(&range.to_string())?;
        let response = self.send(self.request(Method::GET, url).await?).await?;

        let body: ValueRange = response
            .json()
            .await
            .map_err(|e| Error::MalformedResponse(e.to_string()))?;

        Ok(body.values)
    }

    async fn append_row(&self, range: &SheetRange, row: Row) -> Result<()> {
        debug!("{:<12} - append {range}", "SHEETS");
        let mut url = self.values_url(&format!("{range}:append"))?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let request = self
            .request(Method::POST, url)
            .await?
            .json(&json!({ "values": [row] }));
        self.send(request).await?;

        Ok(())
    }

    async fn update_row(&self, range: &SheetRange, row_index: usize, row: Row) -> Result<()> {
        let target = range.row_a1(row_index);
        debug!("{:<12} - update {target}", "SHEETS");
        let mut url = self.values_url(&target)?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let request = self
            .request(Method::PUT, url)
            .await?
            .json(&json!({ "values": [row] }));
        self.send(request).await?;

        Ok(())
    }
}
