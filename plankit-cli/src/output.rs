use serde::Serialize;

use crate::OutputArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn print_json<T: Serialize>(quiet: bool, result: &T) {
    if quiet {
        return;
    }
    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("error: failed to serialize output as JSON: {e}"),
    }
}

/// Reports a failure on stderr and hands back the exit code the command should return.
pub fn print_error(output: &OutputArgs, exit_code: i32, message: &str) -> i32 {
    if output.quiet {
        return exit_code;
    }
    match output.format {
        OutputFormat::Text => eprintln!("error: {message}"),
        OutputFormat::Json => {
            let err = serde_json::json!({ "error": message, "exitCode": exit_code });
            eprintln!("{}", serde_json::to_string(&err).unwrap_or_default());
        }
    }
    exit_code
}
