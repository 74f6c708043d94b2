use std::path::Path;

use fctx_lib::{Config, FctxError, OutputFormat, SimplifyOptions};

/// Tracks which CLI flags were explicitly provided vs. defaulted.
#[derive(Debug, Default)]
pub struct SimplifyFlagSources {
    pub format: bool,
}

impl SimplifyFlagSources {
    pub fn from_args(args: &[String]) -> Self {
        Self {
            format: flag_present(args, "--format"),
        }
    }
}

/// Checks if a flag was present in the command-line arguments.
pub fn flag_present(args: &[String], flag: &str) -> bool {
    args.iter()
        .any(|arg| arg == flag || arg.starts_with(&format!("{flag}=")))
}

/// Resolved settings after merging CLI args and config file.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSimplifySettings {
    pub options: SimplifyOptions,
    pub format: OutputFormat,
}

/// Merge CLI arguments with config file, preferring CLI when flags are present.
pub fn resolve_simplify_settings(
    cli_depth: Option<usize>,
    cli_skip_invisible: bool,
    cli_format: OutputFormat,
    config: &Config,
    flags: &SimplifyFlagSources,
) -> Result<ResolvedSimplifySettings, FctxError> {
    if cli_depth == Some(0) {
        return Err(FctxError::Config(
            "--depth must be at least 1".to_string(),
        ));
    }

    let options = SimplifyOptions {
        max_depth: cli_depth.or(config.simplify.max_depth),
        skip_invisible: cli_skip_invisible || config.simplify.skip_invisible,
        skip_zero_size: config.simplify.skip_zero_size,
    };

    Ok(ResolvedSimplifySettings {
        options,
        format: if flags.format {
            cli_format
        } else {
            config.output.format
        },
    })
}

/// Browser URLs and users write `1-2`; the API expects `1:2`.
pub fn normalize_node_id(id: &str) -> String {
    id.trim().replace('-', ":")
}

/// Load config from a TOML file, central config, or return defaults.
/// Priority: explicit path > ~/.config/fctx/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, FctxError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        FctxError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        FctxError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Format effective config as a single-line string.
pub fn format_effective_config(
    settings: &ResolvedSimplifySettings,
    config: &Config,
    config_source: Option<&Path>,
) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    let depth = settings
        .options
        .max_depth
        .map(|d| d.to_string())
        .unwrap_or_else(|| "unlimited".to_string());
    format!(
        "Effective config [{source}]: depth={depth}, skip_invisible={}, skip_zero_size={}, format={:?}, api={} (timeout {}s)",
        settings.options.skip_invisible,
        settings.options.skip_zero_size,
        settings.format,
        config.api.base_url,
        config.api.timeout.as_secs(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fctx_lib::config::{ApiConfig, OutputConfig};
    use std::time::Duration;

    fn custom_config() -> Config {
        Config {
            simplify: SimplifyOptions {
                max_depth: Some(4),
                skip_invisible: true,
                skip_zero_size: true,
            },
            api: ApiConfig {
                base_url: "http://localhost:9000".to_string(),
                timeout: Duration::from_secs(5),
            },
            output: OutputConfig {
                format: OutputFormat::Yaml,
            },
        }
    }

    #[test]
    fn resolve_prefers_config_when_flags_absent() {
        let cfg = custom_config();
        let resolved = resolve_simplify_settings(
            None,
            false,
            OutputFormat::Json,
            &cfg,
            &SimplifyFlagSources::default(),
        )
        .unwrap();

        assert_eq!(resolved.options.max_depth, Some(4));
        assert!(resolved.options.skip_invisible);
        assert!(resolved.options.skip_zero_size);
        assert_eq!(resolved.format, OutputFormat::Yaml);
    }

    #[test]
    fn resolve_prefers_cli_when_flags_present() {
        let cfg = custom_config();
        let flags = SimplifyFlagSources { format: true };
        let resolved =
            resolve_simplify_settings(Some(1), true, OutputFormat::Pretty, &cfg, &flags).unwrap();

        assert_eq!(resolved.options.max_depth, Some(1));
        assert_eq!(resolved.format, OutputFormat::Pretty);
    }

    #[test]
    fn resolve_rejects_zero_depth() {
        let err = resolve_simplify_settings(
            Some(0),
            false,
            OutputFormat::Json,
            &Config::default(),
            &SimplifyFlagSources::default(),
        )
        .unwrap_err();
        assert!(matches!(err, FctxError::Config(msg) if msg.contains("--depth")));
    }

    #[test]
    fn flag_present_matches_equals_form() {
        let args = vec!["fctx".to_string(), "--format=yaml".to_string()];
        assert!(flag_present(&args, "--format"));
        assert!(!flag_present(&args, "--depth"));
        assert!(SimplifyFlagSources::from_args(&args).format);
    }

    #[test]
    fn normalize_node_id_accepts_dash_form() {
        assert_eq!(normalize_node_id("12-34"), "12:34");
        assert_eq!(normalize_node_id(" 1:2 "), "1:2");
    }

    #[test]
    fn format_effective_config_includes_all_fields() {
        let cfg = custom_config();
        let resolved = resolve_simplify_settings(
            None,
            false,
            OutputFormat::Json,
            &cfg,
            &SimplifyFlagSources::default(),
        )
        .unwrap();
        let summary = format_effective_config(&resolved, &cfg, Some(Path::new("fctx.toml")));

        assert!(summary.contains("depth=4"));
        assert!(summary.contains("skip_invisible=true"));
        assert!(summary.contains("format=Yaml"));
        assert!(summary.contains("localhost:9000"));
        assert!(summary.contains("timeout 5s"));
        assert!(summary.contains("fctx.toml"));
    }

    #[test]
    fn load_config_reports_invalid_values() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[simplify]\nmax_depth = 0\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, FctxError::Config(msg) if msg.contains("Invalid config")));
    }
}
