//! Implementation of the `reqloc locales` command.

use std::path::PathBuf;

use clap::Args;
use miette::IntoDiagnostic;
use reqloc::catalog::scan_locales;
use serde::Serialize;

use crate::mo;
use crate::output::table::{format_locales_table, LocaleRow};

/// Arguments for the locales command.
#[derive(Debug, Args)]
pub struct LocalesArgs {
    /// Directories containing translation trees.
    #[arg(long = "translations", default_value = "translations")]
    pub translations: Vec<PathBuf>,

    /// Gettext domain to look for.
    #[arg(long, default_value = "messages")]
    pub domain: String,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for one discovered locale.
#[derive(Debug, Serialize)]
struct LocaleJson {
    locale: String,
    path: String,
    messages: usize,
}

/// Run the locales command.
pub fn run_locales(args: LocalesArgs) -> miette::Result<i32> {
    let mut rows: Vec<LocaleRow> = Vec::new();

    for dir in &args.translations {
        for locale in scan_locales(dir, &args.domain) {
            let path = dir
                .join(&locale)
                .join("LC_MESSAGES")
                .join(format!("{}.mo", args.domain));
            // Unreadable catalogs still list; the check command reports why.
            let messages = mo::read_index(&path)
                .map(|index| index.msgids.len())
                .unwrap_or(0);
            rows.push(LocaleRow {
                locale,
                path,
                messages,
            });
        }
    }

    if args.json {
        let json_data: Vec<LocaleJson> = rows
            .iter()
            .map(|row| LocaleJson {
                locale: row.locale.clone(),
                path: row.path.display().to_string(),
                messages: row.messages,
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{}", json_output);
    } else if rows.is_empty() {
        println!("No catalogs found.");
    } else {
        let table = format_locales_table(&rows);
        println!("{}", table);
    }

    Ok(exitcode::OK)
}
