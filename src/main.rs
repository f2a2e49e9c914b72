use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use wasm_invoke::cli::{Config, LogFormat, init_logging};
use wasm_invoke::{EXIT_SETUP, execute};

/// Call an exported WebAssembly function with parameters from a JSON request on stdin.
#[derive(Parser, Debug)]
#[command(name = "wasm-invoke")]
#[command(about = "Invoke a WebAssembly export with typed parameters read as JSON from stdin")]
struct Args {
    /// Name of the export to call [default: sum]
    #[arg(long, env = "WASM_INVOKE_EXPORT")]
    export: Option<String>,

    /// Stop after a single 1024-byte read of stdin, like the legacy tool
    #[arg(long)]
    single_read: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, env = "WASM_INVOKE_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter directive (e.g. "debug" or "wasm_invoke=trace")
    #[arg(long, env = "WASM_INVOKE_LOG")]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

impl Args {
    /// Load the config file (if any) and apply command-line overrides.
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(export) = &self.export {
            config.invoke.export = export.clone();
        }
        if self.single_read {
            config.input.single_read = true;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
        Ok(config)
    }
}

fn setup(args: &Args) -> anyhow::Result<Config> {
    let config = args.load_config()?;
    init_logging(&config.logging).context("initializing logging")?;
    Ok(config)
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(EXIT_SETUP),
            };
        }
    };

    let config = match setup(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(EXIT_SETUP);
        }
    };

    let options = config.options();
    tracing::debug!(export = %options.export, read_mode = ?options.read_mode, "starting");

    match execute(io::stdin().lock(), io::stdout().lock(), &options) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, exit_code = e.exit_code(), "invocation failed");
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
