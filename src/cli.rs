use clap::{ArgAction, Parser, Subcommand};
use fctx_lib::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fctx")]
#[command(
    version,
    about = "Figma context simplifier - compact, deduplicated design trees for downstream tools",
    long_about = "Figma context simplifier (fctx)\n\nFetches a Figma file (or selected nodes) and emits a simplified tree where repeated fills, strokes, effects, typography and layout live once in `globalVars` and are referenced by id.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        short,
        global = true,
        action = ArgAction::Count,
        help = "Increase log verbosity (-v info, -vv debug, -vvv trace)"
    )]
    pub verbose: u8,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) with [simplify], [api] and [output] defaults; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simplify a Figma file or node subset
    Simplify {
        #[arg(help = "Figma URL (file/design, optional node-id) or a local .json API response")]
        input: String,

        #[arg(
            long = "node-id",
            value_name = "ID",
            help = "Node to simplify (repeatable; `1-2` and `1:2` are both accepted). Overrides the URL's node-id"
        )]
        node_ids: Vec<String>,

        #[arg(
            long,
            value_name = "N",
            help = "Maximum depth below each requested root (root = 0)"
        )]
        depth: Option<usize>,

        #[arg(long, help = "Drop hidden and fully transparent nodes")]
        skip_invisible: bool,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
