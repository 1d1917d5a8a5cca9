//! Command-line front end: clap `Command` tree and argument → parameter
//! conversion.

use clap::{Arg, ArgAction, ArgMatches, Command};
use serde_json::Value;

use crate::error::CliError;
use crate::params::ParameterSet;

/// Build the `prompt-spec` command.
///
/// Structure: `<name> <FILE> [-p key=value]... [--model M] [--no-validate] [--dry-run]`
pub fn build_command(name: &'static str) -> Command {
    Command::new(name)
        .about("Fill a prompt spec with parameters and send it to its model endpoint")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .help("Path to the YAML prompt spec")
                .required(true),
        )
        .arg(
            Arg::new("param")
                .long("param")
                .short('p')
                .value_name("KEY=VALUE")
                .help("Set a parameter: key=value (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("model")
                .long("model")
                .short('m')
                .help("Model to use for endpoint and credential inference")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("no-validate")
                .long("no-validate")
                .help("Do not check required parameters")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Print the resolved request instead of sending it")
                .action(ArgAction::SetTrue),
        )
}

/// Collect `--param` values in command-line order.
pub fn parameters_from_matches(matches: &ArgMatches) -> Result<ParameterSet, CliError> {
    let mut parameters = ParameterSet::new();
    let Some(assignments) = matches.get_many::<String>("param") else {
        return Ok(parameters);
    };

    for assignment in assignments {
        let (key, value) = parse_assignment(assignment)?;
        parameters.insert(key, value);
    }
    Ok(parameters)
}

/// Split `key=value`; the value is read as JSON when it parses, else as a string.
fn parse_assignment(assignment: &str) -> Result<(String, Value), CliError> {
    let (key, raw) = assignment
        .split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| CliError::InvalidParamFormat {
            param: assignment.to_string(),
        })?;

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn matches(args: &[&str]) -> ArgMatches {
        build_command("prompt-spec").try_get_matches_from(args).unwrap()
    }

    #[test]
    fn build_command_requires_file() {
        let result = build_command("prompt-spec").try_get_matches_from(["prompt-spec"]);
        assert!(result.is_err());
    }

    #[test]
    fn build_command_parses_flags() {
        let m = matches(&[
            "prompt-spec",
            "greet.yaml",
            "--model",
            "gpt-4",
            "--no-validate",
            "--dry-run",
        ]);

        assert_eq!(m.get_one::<String>("file").unwrap(), "greet.yaml");
        assert_eq!(m.get_one::<String>("model").unwrap(), "gpt-4");
        assert!(m.get_flag("no-validate"));
        assert!(m.get_flag("dry-run"));
    }

    #[test]
    fn parameters_from_matches_parses_json_scalars() {
        let m = matches(&["prompt-spec", "f.yaml", "-p", "name=Ana", "-p", "age=30"]);

        let params = parameters_from_matches(&m).unwrap();
        assert_eq!(params.get("name"), Some(&json!("Ana")));
        assert_eq!(params.get("age"), Some(&json!(30)));
    }

    #[test]
    fn parameters_from_matches_keeps_command_line_order() {
        let m = matches(&["prompt-spec", "f.yaml", "-p", "b=1", "-p", "a=2"]);

        let params = parameters_from_matches(&m).unwrap();
        let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn parameters_from_matches_string_fallback() {
        let m = matches(&["prompt-spec", "f.yaml", "--param", "topic=hello world=ok"]);

        let params = parameters_from_matches(&m).unwrap();
        assert_eq!(params.get("topic"), Some(&json!("hello world=ok")));
    }

    #[test]
    fn parameters_from_matches_empty_without_params() {
        let m = matches(&["prompt-spec", "f.yaml"]);
        assert!(parameters_from_matches(&m).unwrap().is_empty());
    }

    #[test]
    fn parameters_from_matches_rejects_missing_equals() {
        let m = matches(&["prompt-spec", "f.yaml", "-p", "no-equals-sign"]);

        let err = parameters_from_matches(&m).unwrap_err();
        assert!(
            err.to_string().contains("invalid --param format"),
            "got: {err}"
        );
    }

    #[test]
    fn parameters_from_matches_rejects_empty_key() {
        let m = matches(&["prompt-spec", "f.yaml", "-p", "=value"]);
        assert!(parameters_from_matches(&m).is_err());
    }
}
