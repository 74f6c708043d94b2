use std::fs;
use std::path::Path;
use thiserror::Error;
use url::Url;

/// Where a design comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Figma,
    LocalJson,
}

#[derive(Debug, Clone)]
pub struct ParsedResource {
    pub kind: ResourceKind,
    pub value: String,
    pub figma_info: Option<FigmaInfo>,
}

#[derive(Debug, Clone)]
pub struct FigmaInfo {
    pub file_key: String,
    pub node_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum ResourceParseError {
    #[error("Invalid URL '{value}': {message}. Hint: include http(s):// and ensure the URL is well-formed.")]
    InvalidUrl { value: String, message: String },
    #[error("Figma URL missing file key in '{url}'. Hint: use https://www.figma.com/design/<FILE_KEY>/... and node-id if needed.")]
    FigmaMissingFileKey { url: String },
    #[error("Only figma.com URLs are supported, got '{url}'.")]
    NotFigma { url: String },
    #[error("Local file not found: {path}. Hint: check the path relative to the current working directory or use an absolute path.")]
    FileNotFound { path: String },
    #[error("Unsupported file extension '{extension}'. Supported extensions: {supported}.")]
    UnsupportedExtension {
        extension: String,
        supported: String,
    },
}

const JSON_EXTENSIONS: &[&str] = &["json"];

pub fn parse_resource(value: &str) -> Result<ParsedResource, ResourceParseError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        parse_url_resource(value)
    } else {
        parse_local_resource(value)
    }
}

fn parse_url_resource(value: &str) -> Result<ParsedResource, ResourceParseError> {
    let url = Url::parse(value).map_err(|e| ResourceParseError::InvalidUrl {
        value: value.to_string(),
        message: e.to_string(),
    })?;

    let host = url.host_str().unwrap_or("");
    if !host.contains("figma.com") {
        return Err(ResourceParseError::NotFigma {
            url: value.to_string(),
        });
    }

    Ok(ParsedResource {
        kind: ResourceKind::Figma,
        value: value.to_string(),
        figma_info: Some(parse_figma_url(&url)?),
    })
}

fn parse_figma_url(url: &Url) -> Result<FigmaInfo, ResourceParseError> {
    let path_segments: Vec<&str> = url.path_segments().map(|c| c.collect()).unwrap_or_default();

    let file_key = path_segments
        .iter()
        .position(|&s| s == "file" || s == "design")
        .and_then(|i| path_segments.get(i + 1))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .ok_or_else(|| ResourceParseError::FigmaMissingFileKey {
            url: url.to_string(),
        })?;

    // Browser URLs spell `1:2` as `1-2`.
    let node_id = url
        .query_pairs()
        .find(|(k, _)| k == "node-id")
        .map(|(_, v)| v.replace('-', ":"))
        .filter(|v| !v.is_empty());

    Ok(FigmaInfo { file_key, node_id })
}

fn parse_local_resource(value: &str) -> Result<ParsedResource, ResourceParseError> {
    let path = Path::new(value);

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !JSON_EXTENSIONS.contains(&extension.as_str()) {
        let extension = if extension.is_empty() {
            "no extension".to_string()
        } else {
            extension
        };
        return Err(ResourceParseError::UnsupportedExtension {
            extension,
            supported: JSON_EXTENSIONS.join(", "),
        });
    }

    let is_file = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
    if !is_file {
        return Err(ResourceParseError::FileNotFound {
            path: path.to_string_lossy().into_owned(),
        });
    }

    Ok(ParsedResource {
        kind: ResourceKind::LocalJson,
        value: value.to_string(),
        figma_info: None,
    })
}
