//! Shared fixtures: builds compiled gettext catalogs on disk.
//!
//! The writer emits the standard `.mo` layout (header, original and
//! translation string tables, NUL-terminated string data) so tests exercise
//! the real catalog loading path end to end.

use std::fs;
use std::path::Path;

/// One catalog entry.
pub struct MoMessage {
    context: Option<String>,
    id: String,
    plural_id: Option<String>,
    translations: Vec<String>,
}

impl MoMessage {
    pub fn simple(id: &str, translation: &str) -> MoMessage {
        MoMessage {
            context: None,
            id: id.to_string(),
            plural_id: None,
            translations: vec![translation.to_string()],
        }
    }

    pub fn plural(id: &str, plural_id: &str, forms: &[&str]) -> MoMessage {
        MoMessage {
            context: None,
            id: id.to_string(),
            plural_id: Some(plural_id.to_string()),
            translations: forms.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn with_context(context: &str, id: &str, translation: &str) -> MoMessage {
        MoMessage {
            context: Some(context.to_string()),
            id: id.to_string(),
            plural_id: None,
            translations: vec![translation.to_string()],
        }
    }

    pub fn context_plural(
        context: &str,
        id: &str,
        plural_id: &str,
        forms: &[&str],
    ) -> MoMessage {
        MoMessage {
            context: Some(context.to_string()),
            id: id.to_string(),
            plural_id: Some(plural_id.to_string()),
            translations: forms.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Write a little-endian `.mo` file containing `messages` plus the metadata
/// entry. All fixture languages use the two-form germanic plural rule.
pub fn write_mo(path: &Path, messages: &[MoMessage]) {
    let metadata =
        "Content-Type: text/plain; charset=UTF-8\nPlural-Forms: nplurals=2; plural=(n != 1);\n";

    let mut entries: Vec<(Vec<u8>, Vec<u8>)> = Vec::with_capacity(messages.len() + 1);
    entries.push((Vec::new(), metadata.as_bytes().to_vec()));

    for message in messages {
        let mut key = Vec::new();
        if let Some(context) = &message.context {
            key.extend_from_slice(context.as_bytes());
            key.push(0x04);
        }
        key.extend_from_slice(message.id.as_bytes());
        if let Some(plural_id) = &message.plural_id {
            key.push(0);
            key.extend_from_slice(plural_id.as_bytes());
        }
        let value = message.translations.join("\0").into_bytes();
        entries.push((key, value));
    }

    // The original-string table must be sorted for binary search.
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let count = entries.len() as u32;
    let orig_table = 28u32;
    let trans_table = orig_table + 8 * count;
    let data_start = trans_table + 8 * count;

    let mut data: Vec<u8> = Vec::new();
    let mut tables: Vec<(u32, u32)> = Vec::with_capacity(2 * entries.len());
    for (key, _) in &entries {
        tables.push((key.len() as u32, data_start + data.len() as u32));
        data.extend_from_slice(key);
        data.push(0);
    }
    for (_, value) in &entries {
        tables.push((value.len() as u32, data_start + data.len() as u32));
        data.extend_from_slice(value);
        data.push(0);
    }

    let mut bytes: Vec<u8> = Vec::new();
    let header = [
        0x9504_12de_u32,
        0,
        count,
        orig_table,
        trans_table,
        0,
        data_start + data.len() as u32,
    ];
    for word in header {
        bytes.extend_from_slice(&word.to_le_bytes());
    }
    for (length, offset) in tables {
        bytes.extend_from_slice(&length.to_le_bytes());
        bytes.extend_from_slice(&offset.to_le_bytes());
    }
    bytes.extend_from_slice(&data);

    fs::create_dir_all(path.parent().expect("catalog path should have a parent")).unwrap();
    fs::write(path, bytes).unwrap();
}

/// Install a catalog for `locale` under `root` using the default domain.
pub fn install_catalog(root: &Path, locale: &str, messages: &[MoMessage]) {
    let path = root
        .join(locale)
        .join("LC_MESSAGES")
        .join("messages.mo");
    write_mo(&path, messages);
}
