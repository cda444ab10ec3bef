//! Construction of the cutechess-cli invocation.
//!
//! The tuned engine receives one `initstr` per parameter, rendered from the
//! configured template. The opponent is passed as configured. The final
//! invocation is an argument vector; no shell is involved.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::AdapterConfig;
use crate::planner::Pairing;
use crate::request::{InvocationRequest, Param};

/// Template for the command that sets one engine parameter.
///
/// Occurrences of `{name}` and `{value}` are replaced in a single pass, so
/// text coming from a substitution is never substituted again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitTemplate(String);

impl InitTemplate {
    /// Wraps a template such as `setvalue {name} {value}`.
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Renders the init directive for one parameter.
    ///
    /// # Example
    ///
    /// ```
    /// use clop_cutechess::command::InitTemplate;
    ///
    /// let template = InitTemplate::new("setoption name {name} value {value}");
    /// assert_eq!(template.render("Hash", "64"), "setoption name Hash value 64");
    /// ```
    pub fn render(&self, name: &str, value: &str) -> String {
        let mut out = String::with_capacity(self.0.len() + name.len() + value.len());
        let mut rest = self.0.as_str();

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix("{name}") {
                out.push_str(name);
                rest = after;
            } else if let Some(after) = tail.strip_prefix("{value}") {
                out.push_str(value);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        out
    }
}

/// One side's engine specification as understood by cutechess-cli.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSpec {
    base: String,
    init_strings: Vec<String>,
}

impl EngineSpec {
    /// An engine used as configured, without init strings.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            init_strings: Vec::new(),
        }
    }

    /// The engine being tuned, with one init directive per parameter in
    /// the order given.
    pub fn tuned(base: impl Into<String>, template: &InitTemplate, params: &[Param]) -> Self {
        Self {
            base: base.into(),
            init_strings: params
                .iter()
                .map(|p| template.render(&p.name, &p.value))
                .collect(),
        }
    }

    /// The configured engine identifier (e.g. `conf=MyEngine`).
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Init directives sent to the engine at startup.
    pub fn init_strings(&self) -> &[String] {
        &self.init_strings
    }

    /// Arguments following `-engine` for this side.
    pub fn to_args(&self) -> Vec<String> {
        self.base
            .split_whitespace()
            .map(str::to_string)
            .chain(self.init_strings.iter().map(|s| format!("initstr={}", s)))
            .collect()
    }
}

impl fmt::Display for EngineSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        for init in &self.init_strings {
            write!(f, " initstr=\"{}\"", init)?;
        }
        Ok(())
    }
}

/// Both engines of one game, in cutechess-cli order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPlan {
    /// Engine passed as the first `-engine`.
    pub first: EngineSpec,
    /// Engine passed as the second `-engine`.
    pub second: EngineSpec,
    /// `true` if `first` is the tuned engine.
    pub tuned_side_is_first: bool,
    /// Index of the opponent in the configured pool.
    pub opponent_index: usize,
}

impl MatchPlan {
    /// Plans the game for `request` against the configured opponent pool.
    ///
    /// `config` must have passed [`AdapterConfig::validate`].
    pub fn build(config: &AdapterConfig, request: &InvocationRequest) -> Self {
        let pairing = Pairing::for_seed(request.seed, config.pool_size());
        let template = InitTemplate::new(config.engine_param_cmd.as_str());
        let tuned = EngineSpec::tuned(config.engine.as_str(), &template, &request.params);
        let opponent = EngineSpec::new(config.opponents[pairing.opponent_index].as_str());

        let (first, second) = if pairing.tuned_side_is_first {
            (tuned, opponent)
        } else {
            (opponent, tuned)
        };

        Self {
            first,
            second,
            tuned_side_is_first: pairing.tuned_side_is_first,
            opponent_index: pairing.opponent_index,
        }
    }

    /// The tuned engine's side.
    pub fn tuned(&self) -> &EngineSpec {
        if self.tuned_side_is_first {
            &self.first
        } else {
            &self.second
        }
    }

    /// The opponent's side.
    pub fn opponent(&self) -> &EngineSpec {
        if self.tuned_side_is_first {
            &self.second
        } else {
            &self.first
        }
    }
}

/// A complete cutechess-cli invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutechessCommand {
    program: PathBuf,
    args: Vec<String>,
    display_args: String,
}

impl CutechessCommand {
    /// Assembles `-engine <first> -engine <second> <options>`.
    pub fn new(config: &AdapterConfig, plan: &MatchPlan) -> Self {
        let mut args = Vec::new();
        args.push("-engine".to_string());
        args.extend(plan.first.to_args());
        args.push("-engine".to_string());
        args.extend(plan.second.to_args());
        args.extend(config.options.split_whitespace().map(str::to_string));

        let display_args = format!(
            "-engine {} -engine {} {}",
            plan.first, plan.second, config.options
        );

        Self {
            program: config.cutechess_cli_path.clone(),
            args,
            display_args: display_args.trim_end().to_string(),
        }
    }

    /// Path of the cutechess-cli executable.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Argument vector passed to the executable.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// A process builder for this invocation.
    ///
    /// Stdin is closed and stdout is piped; stderr is inherited.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        command
    }
}

impl fmt::Display for CutechessCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program.display(), self.display_args)
    }
}
