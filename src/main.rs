mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::run_simplify;

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let raw_args: Vec<String> = std::env::args().collect();
    let args = cli::parse();
    setup_logging(args.verbose);

    match args.command {
        Commands::Simplify {
            input,
            node_ids,
            depth,
            skip_invisible,
            format,
            output,
        } => {
            run_simplify(
                &raw_args,
                args.config,
                input,
                node_ids,
                depth,
                skip_invisible,
                format,
                output,
            )
            .await
        }
    }
}

/// `-v` count picks the level; `RUST_LOG` still wins when set.
fn setup_logging(verbose_count: u8) {
    let log_level = match verbose_count {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .format_timestamp_secs()
        .init();
}
