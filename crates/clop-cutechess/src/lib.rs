//! CLOP to cutechess-cli adapter.
//!
//! CLOP runs this adapter once per game with a machine id, a seed and the
//! parameter values under test. The adapter picks an opponent and sides from
//! the seed, plays one game through cutechess-cli with the parameters passed
//! to the tuned engine as init strings, and reports `W`, `L` or `D` from the
//! tuned engine's point of view.
//!
//! # Modules
//!
//! - [`config`] - Compiled-in deployment configuration
//! - [`request`] - Argument validation
//! - [`planner`] - Opponent and side selection from the seed
//! - [`command`] - Engine specifications and the cutechess-cli invocation
//! - [`runner`] - Running cutechess-cli
//! - [`outcome`] - Translating cutechess-cli output into W/L/D

pub mod command;
pub mod config;
pub mod outcome;
pub mod planner;
pub mod request;
pub mod runner;

use thiserror::Error;

use command::{CutechessCommand, MatchPlan};
use config::{AdapterConfig, ConfigError};
use outcome::{ResultCode, TranslationError};
use request::{ArgsError, InvocationRequest};
use runner::{MatchRunner, RunnerError};

/// Exit status for every failed invocation.
pub const EXIT_FAILURE: u8 = 2;

/// Any failure of one adapter invocation.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// The built-in configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The command-line arguments are malformed.
    #[error(transparent)]
    Args(#[from] ArgsError),
    /// cutechess-cli could not be run or failed.
    #[error(transparent)]
    Execution(#[from] RunnerError),
    /// cutechess-cli output holds no usable result.
    #[error(transparent)]
    Translation(#[from] TranslationError),
}

/// Plays the game described by `request` and returns the tuned engine's
/// result.
///
/// # Errors
///
/// Returns [`AdapterError::Config`] if `config` has no opponents or no
/// engine, [`AdapterError::Execution`] if `runner` fails and
/// [`AdapterError::Translation`] if its output cannot be translated.
///
/// # Example
///
/// ```
/// use clop_cutechess::command::CutechessCommand;
/// use clop_cutechess::config::AdapterConfig;
/// use clop_cutechess::outcome::ResultCode;
/// use clop_cutechess::request::InvocationRequest;
/// use clop_cutechess::runner::{MatchRunner, RunnerError};
///
/// struct WhiteWins;
///
/// impl MatchRunner for WhiteWins {
///     fn run(&self, _: &CutechessCommand) -> Result<String, RunnerError> {
///         Ok("Finished game 1 (A vs B): 1-0 {White mates}\n".to_string())
///     }
/// }
///
/// let config = AdapterConfig::default();
/// let request = InvocationRequest::parse("cpu0", &["0", "Weight", "150"])?;
/// let result = clop_cutechess::play(&config, &request, &WhiteWins)?;
/// assert_eq!(result, ResultCode::Win);
/// # Ok::<(), clop_cutechess::AdapterError>(())
/// ```
pub fn play<R: MatchRunner + ?Sized>(
    config: &AdapterConfig,
    request: &InvocationRequest,
    runner: &R,
) -> Result<ResultCode, AdapterError> {
    let span = tracing::info_span!("game", cpu = %request.cpu_id, seed = request.seed);
    let _guard = span.enter();

    config.validate()?;

    let plan = MatchPlan::build(config, request);
    tracing::info!(
        opponent = plan.opponent().base(),
        tuned_first = plan.tuned_side_is_first,
        params = request.params.len(),
        "planned game"
    );
    for param in &request.params {
        tracing::debug!(name = %param.name, value = param.numeric, "tuned parameter");
    }

    let command = CutechessCommand::new(config, &plan);
    tracing::debug!(%command, "built cutechess-cli command");

    let output = runner.run(&command)?;
    let result = outcome::translate(&output, plan.tuned_side_is_first)?;
    tracing::info!(%result, "game finished");

    Ok(result)
}

/// Validates the arguments after `CPU_ID` and plays the game.
///
/// # Errors
///
/// Returns [`AdapterError::Args`] for malformed arguments, otherwise the
/// errors of [`play`].
pub fn run<S: AsRef<str>, R: MatchRunner + ?Sized>(
    config: &AdapterConfig,
    cpu_id: &str,
    args: &[S],
    runner: &R,
) -> Result<ResultCode, AdapterError> {
    let request = InvocationRequest::parse(cpu_id, args)?;
    play(config, &request, runner)
}
