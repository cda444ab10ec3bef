//! Validation of the arguments CLOP passes for one game.
//!
//! CLOP calls the adapter as `CPU_ID SEED [PARAM_NAME PARAM_VALUE]...`. This
//! module turns everything after `CPU_ID` into an [`InvocationRequest`].

use thiserror::Error;

/// Errors caused by malformed command-line arguments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    /// Fewer than three values after `CPU_ID`, or a name without a value.
    #[error("Too few arguments: expected SEED followed by PARAM_NAME PARAM_VALUE pairs, got {0} value(s)")]
    TooFewArguments(usize),
    /// The seed is not an unsigned integer.
    #[error("invalid seed value: {0}")]
    InvalidSeed(String),
    /// A parameter value is not a real number.
    #[error("invalid value for parameter {name}: {value}")]
    InvalidParameterValue {
        /// Name of the offending parameter.
        name: String,
        /// The raw value as given on the command line.
        value: String,
    },
}

/// One tuned parameter as passed by CLOP.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter name, forwarded verbatim to the engine.
    pub name: String,
    /// Raw value text, forwarded verbatim to the engine.
    pub value: String,
    /// The value as a number, logged with the planned game.
    pub numeric: f64,
}

/// A validated request to play one game.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRequest {
    /// Symbolic name of the machine running the game.
    pub cpu_id: String,
    /// Running game number chosen by CLOP.
    pub seed: u64,
    /// Tuned parameters in command-line order.
    pub params: Vec<Param>,
}

impl InvocationRequest {
    /// Validates the values following `CPU_ID`.
    ///
    /// `args` must hold the seed followed by name/value pairs. At least one
    /// pair is required.
    ///
    /// # Errors
    ///
    /// - [`ArgsError::TooFewArguments`] if `args` has fewer than three
    ///   entries or an even number of entries
    /// - [`ArgsError::InvalidSeed`] if the seed is not a `u64`
    /// - [`ArgsError::InvalidParameterValue`] for the first value that is
    ///   not a real number
    ///
    /// # Example
    ///
    /// ```
    /// use clop_cutechess::request::InvocationRequest;
    ///
    /// let args = ["7".to_string(), "Weight".to_string(), "150".to_string()];
    /// let request = InvocationRequest::parse("cpu0", &args)?;
    /// assert_eq!(request.seed, 7);
    /// assert_eq!(request.params[0].name, "Weight");
    /// # Ok::<(), clop_cutechess::request::ArgsError>(())
    /// ```
    pub fn parse<S: AsRef<str>>(cpu_id: &str, args: &[S]) -> Result<Self, ArgsError> {
        if args.len() < 3 || args.len() % 2 == 0 {
            return Err(ArgsError::TooFewArguments(args.len()));
        }

        let raw_seed = args[0].as_ref();
        let seed = raw_seed
            .parse::<u64>()
            .map_err(|_| ArgsError::InvalidSeed(raw_seed.to_string()))?;

        let params = args[1..]
            .chunks_exact(2)
            .map(|pair| Param::parse(pair[0].as_ref(), pair[1].as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            cpu_id: cpu_id.to_string(),
            seed,
            params,
        })
    }
}

impl Param {
    /// Builds a parameter, checking that `value` is numeric.
    pub fn parse(name: &str, value: &str) -> Result<Self, ArgsError> {
        let numeric = value
            .parse::<f64>()
            .map_err(|_| ArgsError::InvalidParameterValue {
                name: name.to_string(),
                value: value.to_string(),
            })?;
        Ok(Self {
            name: name.to_string(),
            value: value.to_string(),
            numeric,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_single_parameter() {
        let request = InvocationRequest::parse("cpuA", &args(&["2", "Weight", "150"])).unwrap();

        assert_eq!(request.cpu_id, "cpuA");
        assert_eq!(request.seed, 2);
        assert_eq!(request.params.len(), 1);
        assert_eq!(request.params[0].name, "Weight");
        assert_eq!(request.params[0].value, "150");
        assert_eq!(request.params[0].numeric, 150.0);
    }

    #[test]
    fn test_parse_keeps_parameter_order() {
        let request =
            InvocationRequest::parse("cpuA", &args(&["9", "B", "1", "A", "2", "C", "3"])).unwrap();

        let names: Vec<&str> = request.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_parse_keeps_raw_value_text() {
        let request =
            InvocationRequest::parse("cpuA", &args(&["0", "Margin", "-12.50", "Exp", "1e2"]))
                .unwrap();

        assert_eq!(request.params[0].value, "-12.50");
        assert_eq!(request.params[0].numeric, -12.5);
        assert_eq!(request.params[1].value, "1e2");
        assert_eq!(request.params[1].numeric, 100.0);
    }

    #[test]
    fn test_too_few_arguments() {
        assert_eq!(
            InvocationRequest::parse::<String>("cpuA", &[]),
            Err(ArgsError::TooFewArguments(0))
        );
        assert_eq!(
            InvocationRequest::parse("cpuA", &args(&["0"])),
            Err(ArgsError::TooFewArguments(1))
        );
        assert_eq!(
            InvocationRequest::parse("cpuA", &args(&["0", "Weight"])),
            Err(ArgsError::TooFewArguments(2))
        );
    }

    #[test]
    fn test_even_argument_count_is_rejected() {
        let result = InvocationRequest::parse("cpuA", &args(&["0", "A", "1", "B"]));
        assert_eq!(result, Err(ArgsError::TooFewArguments(4)));
    }

    #[test]
    fn test_invalid_seed() {
        let result = InvocationRequest::parse("cpuA", &args(&["seven", "A", "1"]));
        assert_eq!(result, Err(ArgsError::InvalidSeed("seven".to_string())));
    }

    #[test]
    fn test_negative_seed_is_rejected() {
        let result = InvocationRequest::parse("cpuA", &args(&["-4", "A", "1"]));
        assert_eq!(result, Err(ArgsError::InvalidSeed("-4".to_string())));
    }

    #[test]
    fn test_invalid_parameter_value_names_parameter() {
        let result = InvocationRequest::parse("cpuA", &args(&["5", "X", "notanumber"]));

        match result {
            Err(ArgsError::InvalidParameterValue { name, value }) => {
                assert_eq!(name, "X");
                assert_eq!(value, "notanumber");
            }
            other => panic!("Expected InvalidParameterValue, got {:?}", other),
        }
    }

    #[test]
    fn test_first_invalid_parameter_is_reported() {
        let result = InvocationRequest::parse("cpuA", &args(&["5", "A", "1", "B", "x", "C", "y"]));

        assert_eq!(
            result,
            Err(ArgsError::InvalidParameterValue {
                name: "B".to_string(),
                value: "x".to_string(),
            })
        );
    }

    #[test]
    fn test_args_error_display() {
        assert_eq!(
            ArgsError::InvalidSeed("abc".to_string()).to_string(),
            "invalid seed value: abc"
        );
        assert_eq!(
            ArgsError::InvalidParameterValue {
                name: "X".to_string(),
                value: "notanumber".to_string(),
            }
            .to_string(),
            "invalid value for parameter X: notanumber"
        );
        assert!(ArgsError::TooFewArguments(1)
            .to_string()
            .starts_with("Too few arguments"));
    }
}
