use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Default location of the user store, `users.json` under
    /// `$HOME/.local/state/fingerspell` (XDG state dir), with a
    /// platform-specific fallback.
    pub fn store_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("fingerspell");
            Some(state_dir.join("users.json"))
        } else {
            ProjectDirs::from("", "", "fingerspell")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("users.json"))
        }
    }
}
