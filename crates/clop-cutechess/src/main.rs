use std::ffi::OsString;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clop_cutechess::config::AdapterConfig;
use clop_cutechess::runner::ProcessRunner;
use clop_cutechess::{AdapterError, EXIT_FAILURE};
use tracing_subscriber::EnvFilter;

const LONG_ABOUT: &str = "\
Run cutechess-cli with CLOP_PARAM(s).

CLOP is a black-box parameter tuning tool designed and written by Remi Coulom.
More information about CLOP can be found at the CLOP website:
http://remi.coulom.free.fr/CLOP/

This program works between CLOP and cutechess-cli. Its path, without any
arguments, should be on the \"Script\" line of the .clop file. 'Replications'
in the .clop file should be set to 2 so that the engine's playing side
alternates correctly.

The cutechess-cli path, the tuned engine, the parameter command, the
opponents and the match options are compiled in from adapter.toml.

Run without arguments, or with --help as the first argument, to show this
text.

When the game is completed the game outcome is written to standard output:
  W = win
  L = loss
  D = draw";

#[derive(Parser, Debug)]
#[command(name = "clop-cutechess")]
#[command(about = "Run cutechess-cli with CLOP_PARAM(s)")]
#[command(long_about = LONG_ABOUT)]
#[command(disable_help_flag = true)]
struct Cli {
    /// Symbolic name of the CPU or machine that should run the game
    #[arg(allow_hyphen_values = true)]
    cpu_id: String,
    /// SEED (running number of the game), then PARAM_NAME PARAM_VALUE pairs
    /// for the parameters being optimized
    #[arg(
        value_name = "SEED [PARAM_NAME PARAM_VALUE]...",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    args: Vec<String>,
}

/// Flags that ask for help when given as the first argument.
const HELP_FLAGS: [&str; 2] = ["--help", "-h"];

/// Parses the process arguments.
///
/// Returns `Ok(None)` when help was asked for: no arguments at all, or a help
/// flag as the first argument. Anything later, including `--help`, is passed
/// on as a raw value.
fn parse_cli<I, T>(args: I) -> Result<Option<Cli>, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    match args.get(1) {
        None => return Ok(None),
        Some(first) if HELP_FLAGS.iter().any(|flag| first.as_os_str() == *flag) => return Ok(None),
        Some(_) => {}
    }
    Cli::try_parse_from(args).map(Some)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let cli = match parse_cli(std::env::args_os()) {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            if let Err(e) = Cli::command().print_long_help() {
                eprintln!("{}", e);
                return ExitCode::from(EXIT_FAILURE);
            }
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EXIT_FAILURE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let config = match AdapterConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", AdapterError::from(e));
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    match clop_cutechess::run(&config, &cli.cpu_id, &cli.args, &ProcessRunner) {
        Ok(result) => {
            println!("{}", result);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "invocation failed");
            eprintln!("{}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
