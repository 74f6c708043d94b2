use std::path::{Path, PathBuf};
use std::process::ExitCode;

use fctx_lib::figma::api_types::{FigmaFile, FigmaNodesResponse};
use fctx_lib::{
    parse_resource, simplify_file, simplify_file_nodes, simplify_nodes, FctxError, FigmaAuth,
    FigmaClient, FigmaInfo, OutputFormat, ResourceKind, SimplifiedDesign, SimplifyOptions,
};

use crate::formatting::{format_summary, render_error, write_output};
use crate::settings::{
    format_effective_config, load_config, normalize_node_id, resolve_simplify_settings,
    SimplifyFlagSources,
};

/// Run the simplify command.
#[allow(clippy::too_many_arguments)]
pub async fn run_simplify(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    input: String,
    node_ids: Vec<String>,
    depth: Option<usize>,
    skip_invisible: bool,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output),
    };
    let flags = SimplifyFlagSources::from_args(raw_args);
    let settings = match resolve_simplify_settings(depth, skip_invisible, format, &config, &flags)
    {
        Ok(settings) => settings,
        Err(err) => return render_error(err, format, output),
    };
    log::info!(
        "{}",
        format_effective_config(&settings, &config, config_path.as_deref())
    );
    let format = settings.format;

    let resource = match parse_resource(&input) {
        Ok(res) => res,
        Err(err) => return render_error(FctxError::Config(err.to_string()), format, output),
    };
    let requested: Vec<String> = node_ids.iter().map(|id| normalize_node_id(id)).collect();

    let design = match resource.kind {
        ResourceKind::Figma => {
            let Some(info) = resource.figma_info else {
                return render_error(
                    FctxError::Config(format!("Figma URL missing file key: {}", resource.value)),
                    format,
                    output,
                );
            };
            simplify_remote(&config, &info, requested, &settings.options).await
        }
        ResourceKind::LocalJson => {
            simplify_local(Path::new(&resource.value), &requested, &settings.options).await
        }
    };

    let design = match design {
        Ok(design) => design,
        Err(err) => return render_error(err, format, output),
    };
    log::info!("{}", format_summary(&design));

    if let Err(err) = write_output(&design, format, output.as_deref()) {
        return render_error(err, format, output);
    }
    ExitCode::SUCCESS
}

async fn simplify_remote(
    config: &fctx_lib::Config,
    info: &FigmaInfo,
    mut node_ids: Vec<String>,
    options: &SimplifyOptions,
) -> fctx_lib::Result<SimplifiedDesign> {
    let auth = FigmaAuth::from_env().ok_or_else(|| {
        FctxError::Config(
            "FIGMA_TOKEN environment variable is required to fetch from Figma".to_string(),
        )
    })?;
    let client = FigmaClient::from_config(auth, &config.api)?;

    if node_ids.is_empty() {
        if let Some(id) = &info.node_id {
            node_ids.push(id.clone());
        }
    }

    if node_ids.is_empty() {
        // The file endpoint counts the document itself as depth 0.
        let depth = options.max_depth.map(|d| d + 1);
        let file = client.fetch_file(&info.file_key, depth).await?;
        Ok(simplify_file(&file, options)?)
    } else {
        let response = client
            .fetch_nodes(&info.file_key, &node_ids, options.max_depth)
            .await?;
        Ok(simplify_nodes(&response, &node_ids, options)?)
    }
}

/// Local input is a saved whole-file or nodes response.
async fn simplify_local(
    path: &Path,
    node_ids: &[String],
    options: &SimplifyOptions,
) -> fctx_lib::Result<SimplifiedDesign> {
    let raw = tokio::fs::read_to_string(path).await?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;

    if value.get("document").is_some() {
        let file: FigmaFile = serde_json::from_value(value)?;
        log::debug!("read whole-file response '{}' from {}", file.name, path.display());
        if node_ids.is_empty() {
            Ok(simplify_file(&file, options)?)
        } else {
            Ok(simplify_file_nodes(&file, node_ids, options)?)
        }
    } else if value.get("nodes").is_some() {
        let response: FigmaNodesResponse = serde_json::from_value(value)?;
        log::debug!(
            "read nodes response with {} entr(ies) from {}",
            response.nodes.len(),
            path.display()
        );
        if node_ids.is_empty() {
            // Without explicit ids, take every entry the source resolved.
            let mut all: Vec<&str> = response
                .nodes
                .iter()
                .filter(|(_, wrapper)| wrapper.is_some())
                .map(|(id, _)| id.as_str())
                .collect();
            all.sort_unstable();
            Ok(simplify_nodes(&response, &all, options)?)
        } else {
            Ok(simplify_nodes(&response, node_ids, options)?)
        }
    } else {
        Err(FctxError::Config(format!(
            "{} is neither a Figma file response (no \"document\") nor a nodes response (no \"nodes\")",
            path.display()
        )))
    }
}
