//! INI backup of a settings store.
//!
//! The backup mirrors the layout a desktop settings registry produces, so it
//! can be restored by copying it back into place:
//!
//! ```text
//! [General]
//! fHideTrayIcon=false
//! nDatabaseCache=450
//! strThirdPartyTxUrls=
//! ```

use std::path::Path;

use nodeopts_core::SettingValue;

use crate::application::settings_store::StoreError;

/// Renders entries as an INI document with a single `[General]` section.
pub fn render_ini<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a SettingValue)>,
{
    let mut out = String::from("[General]\n");
    for (key, value) in entries {
        out.push_str(key);
        out.push('=');
        out.push_str(&ini_value(value));
        out.push('\n');
    }
    out
}

/// Writes the backup to `path`, creating its directory if needed.
///
/// # Errors
///
/// Returns [`StoreError::Io`] when the directory or file cannot be written.
pub fn write_ini_backup<'a, I>(path: &Path, entries: I) -> Result<(), StoreError>
where
    I: IntoIterator<Item = (&'a str, &'a SettingValue)>,
{
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, render_ini(entries)).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn ini_value(value: &SettingValue) -> String {
    let SettingValue::Text(text) = value else {
        return value.to_string();
    };
    let needs_quotes = text.trim() != text
        || text.contains(|c| matches!(c, ';' | '#' | '=' | '"' | ',' | '\\'));
    if !needs_quotes {
        return text.clone();
    }
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
