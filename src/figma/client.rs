//! Minimal Figma REST client: whole-file and node-subset fetches.

use std::time::Duration;

#[cfg(test)]
use reqwest::header::HeaderMap;
use reqwest::{header::RETRY_AFTER, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use super::api_types::{FigmaFile, FigmaNodesResponse};
use crate::config::{ApiConfig, DEFAULT_API_BASE_URL};
use crate::error::{FctxError, Result};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub enum FigmaAuth {
    PersonalAccessToken(String),
    OAuthToken(String),
}

impl FigmaAuth {
    /// `FIGMA_TOKEN` wins over `FIGMA_OAUTH_TOKEN`; empty values are ignored.
    pub fn from_env() -> Option<Self> {
        if let Ok(token) = std::env::var("FIGMA_TOKEN") {
            if !token.is_empty() {
                return Some(Self::PersonalAccessToken(token));
            }
        }

        if let Ok(token) = std::env::var("FIGMA_OAUTH_TOKEN") {
            if !token.is_empty() {
                return Some(Self::OAuthToken(token));
            }
        }

        None
    }

    fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            FigmaAuth::PersonalAccessToken(token) => builder.header("X-FIGMA-TOKEN", token),
            FigmaAuth::OAuthToken(token) => builder.bearer_auth(token),
        }
    }

    #[cfg(test)]
    fn apply_to_header_map(&self, headers: &mut HeaderMap) {
        match self {
            FigmaAuth::PersonalAccessToken(token) => {
                headers.insert("X-FIGMA-TOKEN", token.parse().unwrap());
            }
            FigmaAuth::OAuthToken(token) => {
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    format!("Bearer {token}").parse().unwrap(),
                );
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct FigmaClient {
    http: Client,
    auth: FigmaAuth,
    base_url: Url,
}

impl FigmaClient {
    pub fn new(auth: FigmaAuth) -> Result<Self> {
        Self::with_base_url_and_timeout(auth, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT)
    }

    pub fn from_config(auth: FigmaAuth, api: &ApiConfig) -> Result<Self> {
        Self::with_base_url_and_timeout(auth, &api.base_url, api.timeout)
    }

    pub fn with_base_url_and_timeout(
        auth: FigmaAuth,
        base_url: impl AsRef<str>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FctxError::Network)?;

        Ok(Self {
            http,
            auth,
            base_url,
        })
    }

    /// `GET /v1/files/{key}`, optionally limited to `depth` levels.
    pub async fn fetch_file(&self, file_key: &str, depth: Option<usize>) -> Result<FigmaFile> {
        let mut url = self.endpoint(&format!("/v1/files/{file_key}"))?;
        if let Some(depth) = depth {
            url.query_pairs_mut()
                .append_pair("depth", &depth.to_string());
        }
        log::info!("fetching Figma file {file_key}");
        self.send_json(self.authed(self.http.get(url))).await
    }

    /// `GET /v1/files/{key}/nodes?ids=..`, optionally limited to `depth` levels.
    pub async fn fetch_nodes(
        &self,
        file_key: &str,
        node_ids: &[String],
        depth: Option<usize>,
    ) -> Result<FigmaNodesResponse> {
        validate_node_ids(node_ids, "fetching nodes from Figma")?;

        let mut url = self.endpoint(&format!("/v1/files/{file_key}/nodes"))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("ids", &node_ids.join(","));
            if let Some(depth) = depth {
                query.append_pair("depth", &depth.to_string());
            }
        }
        log::info!(
            "fetching {} node(s) from Figma file {file_key}",
            node_ids.len()
        );
        self.send_json(self.authed(self.http.get(url))).await
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        self.auth.apply(builder)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(FctxError::InvalidUrl)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(FctxError::Network)?;
        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let body = response.text().await.unwrap_or_default();
        log::debug!("Figma API responded {} ({} bytes)", status.as_u16(), body.len());

        if status.is_success() {
            return serde_json::from_str(&body).map_err(FctxError::Serialization);
        }

        Err(FctxError::figma_api(
            Some(status),
            error_message(status, &body, retry_after.as_deref()),
        ))
    }
}

fn validate_node_ids(node_ids: &[String], context: &str) -> Result<()> {
    if node_ids.is_empty() {
        return Err(FctxError::Config(format!(
            "node_ids cannot be empty when {context}"
        )));
    }
    Ok(())
}

fn error_message(status: StatusCode, body: &str, retry_after: Option<&str>) -> String {
    let fallback = format!("Figma API returned status {}", status.as_u16());
    let parsed = serde_json::from_str::<Value>(body).ok();
    let from_body = parsed
        .as_ref()
        .and_then(|value| value.get("err").or_else(|| value.get("error")))
        .and_then(Value::as_str)
        .map(str::to_owned);

    match (status, retry_after, from_body) {
        (StatusCode::TOO_MANY_REQUESTS, Some(retry), Some(msg)) => {
            format!("{msg} (rate limited, retry after {retry}s)")
        }
        (StatusCode::TOO_MANY_REQUESTS, Some(retry), None) => {
            format!("rate limited by Figma API, retry after {retry}s")
        }
        (_, _, Some(msg)) => msg,
        _ => fallback,
    }
}
