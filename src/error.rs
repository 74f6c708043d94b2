use crate::simplify::SimplifyError;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

#[derive(Debug, Error)]
pub enum FctxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Figma API error (status: {status:?}): {message}")]
    FigmaApi {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Simplification error: {0}")]
    Simplify(#[from] SimplifyError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FctxError {
    pub fn figma_api(status: Option<StatusCode>, message: impl Into<String>) -> Self {
        FctxError::FigmaApi {
            status,
            message: message.into(),
        }
    }

    /// True when a requested node could not be found in the fetched payload.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FctxError::Simplify(SimplifyError::NodeNotFound(_)))
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            FctxError::Io(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            FctxError::Network(e) => ErrorPayload::new(
                ErrorCategory::Network,
                e.to_string(),
                "Check connectivity/proxy/VPN and retry.",
            ),
            FctxError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Verify the URL (e.g., https://www.figma.com/design/<FILE_KEY>/...).",
            ),
            FctxError::FigmaApi { status, message } => ErrorPayload::new(
                ErrorCategory::Figma,
                format!("Figma API error (status {:?}): {}", status, message),
                "Check FIGMA_TOKEN/URL and rate limits; retry after waiting.",
            ),
            FctxError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Check that the input is a Figma file or nodes response in JSON form.",
            ),
            FctxError::Yaml(e) => ErrorPayload::new(
                ErrorCategory::Output,
                e.to_string(),
                "Retry with --format json; file an issue if persistent.",
            ),
            FctxError::Simplify(SimplifyError::NodeNotFound(id)) => ErrorPayload::new(
                ErrorCategory::NotFound,
                format!("Node {id} was not found in the fetched design"),
                "Check the node-id in the URL (e.g., ?node-id=1-2) and that it belongs to this file.",
            ),
            FctxError::Simplify(err @ SimplifyError::Integrity(_)) => ErrorPayload::new(
                ErrorCategory::Internal,
                err.to_string(),
                "This is a bug; re-run with -vv and file an issue with the input.",
            ),
            FctxError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("figma_token") || lower.contains("figma token") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Set FIGMA_TOKEN (or FIGMA_OAUTH_TOKEN) before fetching from Figma.",
                    )
                } else if lower.contains("file key") && lower.contains("figma") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Use a Figma URL with a file key: https://www.figma.com/design/<FILE_KEY>/... with node-id if needed.",
                    )
                } else if lower.contains("unsupported file extension") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Pass a Figma URL or a local .json file saved from the Figma REST API.",
                    )
                } else if lower.contains("file not found") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Verify the file exists; use an absolute path or run from the working directory.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags/paths (e.g., --depth N) and the config file.",
                    )
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FctxError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCategory {
    Config,
    Network,
    Figma,
    Input,
    Output,
    NotFound,
    Internal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
