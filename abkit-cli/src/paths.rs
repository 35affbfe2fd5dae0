//! XDG Base Directory paths for abkit.
//!
//! The catalog lives under the XDG data dir by default; `--root`
//! overrides it.

use std::path::PathBuf;

/// Get the abkit data directory.
///
/// Returns `$XDG_DATA_HOME/abkit` if set, otherwise `~/.local/share/abkit`.
pub fn data_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("abkit")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".local/share/abkit")
    } else {
        PathBuf::from(".local/share/abkit")
    }
}
