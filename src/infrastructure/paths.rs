//! Path helpers for per-user storage and config files.

use crate::domain::error::Result;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Returns the data directory, `$HOME/.local/share/candidate-admin`.
///
/// Falls back to `<temp dir>/candidate-admin` when `HOME` is unset.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    home_dir().map_or_else(
        || std::env::temp_dir().join("candidate-admin"),
        |home| home.join(".local").join("share").join("candidate-admin"),
    )
}

/// Expands a leading `~` against `$HOME`. Other paths are returned unchanged.
///
/// # Examples
///
/// ```
/// use candidate_admin::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/etc/candidate-admin.toml"), "/etc/candidate-admin.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    let Some(home) = home_dir() else {
        return path.to_string();
    };
    let home = home.to_string_lossy();

    if path == "~" {
        home.into_owned()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{}/{rest}", home.trim_end_matches('/'))
    } else {
        path.to_string()
    }
}

/// Reads and parses a JSON file, such as a create or update payload.
///
/// # Errors
///
/// Returns [`AdminError::Io`](crate::AdminError::Io) if the file cannot be read,
/// or [`AdminError::Serialization`](crate::AdminError::Serialization) if it is not
/// valid JSON for `T`.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").filter(|home| !home.is_empty()).map(PathBuf::from)
}
