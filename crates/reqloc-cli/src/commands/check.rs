//! Implementation of the `reqloc check` command.

use std::fs::File;
use std::path::PathBuf;

use clap::Args;
use gettext::Catalog;
use miette::IntoDiagnostic;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::mo;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Catalog files to check (.mo)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for one checked file.
#[derive(Debug, Serialize)]
struct CheckJson {
    path: String,
    ok: bool,
    messages: usize,
    error: Option<String>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut results: Vec<CheckJson> = Vec::new();
    let mut failures = 0;

    for path in &args.files {
        // Validate through the same parser the runtime uses.
        let outcome = match File::open(path) {
            Ok(file) => Catalog::parse(file).map_err(|error| format!("{error}")),
            Err(error) => Err(format!("{error}")),
        };

        match outcome {
            Ok(_) => {
                let messages = mo::read_index(path)
                    .map(|index| index.msgids.len())
                    .unwrap_or(0);
                results.push(CheckJson {
                    path: path.display().to_string(),
                    ok: true,
                    messages,
                    error: None,
                });
            }
            Err(error) => {
                failures += 1;
                results.push(CheckJson {
                    path: path.display().to_string(),
                    ok: false,
                    messages: 0,
                    error: Some(error),
                });
            }
        }
    }

    if args.json {
        let json_output = serde_json::to_string_pretty(&results).into_diagnostic()?;
        println!("{}", json_output);
    } else {
        for result in &results {
            if result.ok {
                println!(
                    "{} {} ({} messages)",
                    "ok".green(),
                    result.path,
                    result.messages
                );
            } else {
                println!(
                    "{} {}: {}",
                    "error".red(),
                    result.path,
                    result.error.as_deref().unwrap_or("unknown")
                );
            }
        }
    }

    if failures > 0 {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
