use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use fctx_lib::{write_design, ErrorOutput, FctxError, OutputFormat, SimplifiedDesign};

/// Write a design in the requested format to a file or stdout.
pub fn write_output(
    design: &SimplifiedDesign,
    format: OutputFormat,
    output: Option<&Path>,
) -> fctx_lib::Result<()> {
    match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_design(design, format, &mut writer)
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write_design(design, format, &mut writer)
        }
    }
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: FctxError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    log::debug!("command failed: {err:?}");
    let payload = ErrorOutput::new(err.to_payload());

    let content = match format {
        OutputFormat::Json => serde_json::to_string(&payload).ok(),
        OutputFormat::Pretty => {
            if output.is_none() && io::stdout().is_terminal() {
                Some(format_pretty_error(&payload, true))
            } else {
                serde_json::to_string_pretty(&payload).ok()
            }
        }
        OutputFormat::Yaml => serde_yaml::to_string(&payload).ok(),
    }
    .unwrap_or_else(|| "{\"error\":{\"category\":\"internal\"}}".to_string());

    match output {
        Some(path) => {
            if let Err(write_err) = std::fs::write(&path, &content) {
                eprintln!("Failed to write error output: {}", write_err);
                println!("{}", content.trim_end());
            }
        }
        None => println!("{}", content.trim_end()),
    }

    // Exit code 2 is reserved for fatal errors.
    ExitCode::from(2)
}

/// Format an error for human consumption in a terminal.
pub fn format_pretty_error(out: &ErrorOutput, colorize: bool) -> String {
    let mut buf = String::new();
    let header = color("[ERROR]", "31", colorize);
    writeln!(buf, "{} {}", header, out.error.message).ok();
    if let Some(remediation) = &out.error.remediation {
        writeln!(buf, "Hint: {}", remediation).ok();
    }
    buf
}

/// One-line summary of a finished conversion for stderr.
pub fn format_summary(design: &SimplifiedDesign) -> String {
    format!(
        "Simplified '{}': {} root(s), {} node(s), {} shared style(s)",
        design.name,
        design.nodes.len(),
        design.iter_nodes().count(),
        design.global_vars.len()
    )
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}
