//! Bookmark file discovery.
//!
//! Deployments keep bookmarks either next to the process or under
//! `~/.rig-remote`; lookups honor both locations, oldest filename first.

use std::env;
use std::path::{Path, PathBuf};

/// Directory under the home dir holding rig-remote state.
pub const CONFIG_DIR: &str = ".rig-remote";

/// Preferred filename for newly created bookmark files.
pub const DEFAULT_BOOKMARK_FILENAME: &str = "rig-remote-bookmarks.csv";

/// Older filename, still honored on lookup.
pub const LEGACY_BOOKMARK_FILENAME: &str = "rig-bookmarks.csv";

/// Locate an existing bookmark file.
///
/// Search order:
/// 1. `rig-bookmarks.csv` in the current working directory,
/// 2. `~/.rig-remote/rig-bookmarks.csv`,
/// 3. `~/.rig-remote/rig-remote-bookmarks.csv`.
///
/// The first that exists wins; `None` when no candidate does.
pub fn find_bookmark_file() -> Option<PathBuf> {
    find_in(env::current_dir().ok().as_deref(), dirs::home_dir().as_deref())
}

/// Where a fresh bookmark file belongs: the preferred filename under the
/// config directory. `None` when the home directory cannot be resolved.
pub fn default_bookmark_path() -> Option<PathBuf> {
    Some(dirs::home_dir()?.join(CONFIG_DIR).join(DEFAULT_BOOKMARK_FILENAME))
}

fn find_in(cwd: Option<&Path>, home: Option<&Path>) -> Option<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(cwd) = cwd {
        candidates.push(cwd.join(LEGACY_BOOKMARK_FILENAME));
    }
    if let Some(home) = home {
        let prefix = home.join(CONFIG_DIR);
        candidates.push(prefix.join(LEGACY_BOOKMARK_FILENAME));
        candidates.push(prefix.join(DEFAULT_BOOKMARK_FILENAME));
    }
    candidates.into_iter().find(|p| p.is_file())
}
