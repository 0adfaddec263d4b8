mod commands;

use anyhow::Result;
use clap::Parser;
use execjs_core::{ExecConfig, Registry};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "execjs")]
#[command(about = "Run JavaScript with whichever engine is available")]
#[command(version)]
pub struct Cli {
    /// Print the runtimes available on this system and exit
    #[arg(long)]
    pub print_available_runtimes: bool,

    /// Runtime to use (auto-detected when omitted)
    #[arg(short, long)]
    pub runtime: Option<String>,

    /// Expression to evaluate (read from stdin when omitted)
    #[arg(short, long)]
    pub eval: Option<String>,

    /// Encoding of the context files
    #[arg(long, default_value = "utf8", value_parser = ["utf8", "ascii"])]
    pub encoding: String,

    /// Configuration file (defaults to ~/.config/execjs/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Files compiled into the context before evaluating
    pub files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => ExecConfig::load(path)?,
        None => ExecConfig::load_default()?,
    };
    let registry = Registry::builtin(&config);

    if cli.print_available_runtimes {
        for name in commands::available_runtime_names(&registry) {
            println!("{}", name);
        }
        return Ok(());
    }

    let request = commands::EvalRequest {
        runtime: cli.runtime.or(config.runtime),
        files: cli.files,
        encoding: cli.encoding.parse()?,
        expression: cli.eval,
    };

    match commands::execute_eval(&registry, request).await {
        Ok(value) => {
            println!("{}", serde_json::to_string(&value)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Filter used when `RUST_LOG` is unset; quiet unless `--verbose`
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "execjs=debug,execjs_core=debug"
    } else {
        "warn"
    }
}

fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose))),
        )
        .with_writer(std::io::stderr)
        .init();
}
