use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use squidpress_core::config::{DEFAULT_MAX_LINES, FormatterConfig, OutputFormat};
use squidpress_core::logging::init_logging;
use squidpress_core::pipeline::run_pipeline;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    name = "squidpress",
    version,
    about = "Squidpress: chunked, compressed proxy access-log formatter"
)]
struct Cli {
    /// Output path prefix; chunks are written as <PREFIX>_<NN>.log.gz
    prefix: String,

    /// Records per chunk (default targets ~50MB of compressed output)
    #[arg(long, default_value_t = DEFAULT_MAX_LINES)]
    max_lines: usize,

    /// Write uncompressed .log files instead of .log.gz
    #[arg(long)]
    plain: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "formatting failed");
            eprintln!("squidpress error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = FormatterConfig::from_env();
    config.max_lines = cli.max_lines;
    if cli.plain {
        config.format = OutputFormat::Plain;
    }

    let stdin = io::stdin();
    let summary = run_pipeline(stdin.lock(), &cli.prefix, &config)
        .with_context(|| format!("failed to format stream into '{}_NN'", cli.prefix))?;

    info!(
        chunks = summary.chunks,
        records = summary.records,
        "formatting complete"
    );

    Ok(())
}
