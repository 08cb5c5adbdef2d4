//! Table formatting utilities for CLI output.

use std::path::PathBuf;

use comfy_table::{presets, ContentArrangement, Table};

/// One discovered locale catalog.
pub struct LocaleRow {
    /// Locale directory name (e.g. "de_AT").
    pub locale: String,
    /// Path of the compiled catalog.
    pub path: PathBuf,
    /// Number of messages in the catalog.
    pub messages: usize,
}

/// Format discovered locales as an ASCII table.
pub fn format_locales_table(rows: &[LocaleRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Locale", "Messages", "Catalog"]);

    for row in rows {
        table.add_row(vec![
            row.locale.clone(),
            row.messages.to_string(),
            row.path.display().to_string(),
        ]);
    }

    table
}
