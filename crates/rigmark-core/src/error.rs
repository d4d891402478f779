use std::io;
use std::path::PathBuf;

use crate::bookmark::Mode;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong in the bookmark core.
///
/// All failures are immediate and synchronous; nothing retries. The
/// front-end decides how a failure is presented.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backing file does not exist. [`crate::BookmarkSet::load`]
    /// recovers from this ("no bookmarks yet"); it only escapes the raw
    /// csv layer.
    #[error("bookmark file not found: {}", path.display())]
    PathNotFound { path: PathBuf },

    /// A record failed validation, on load or on append.
    #[error("malformed bookmark: {reason}")]
    MalformedBookmark { reason: String },

    /// An id key that cannot address a record: empty on delete, or
    /// unmatched on update.
    #[error("invalid bookmark key {key:?}")]
    InvalidKey { key: String },

    /// A display row with the same frequency and mode already exists.
    #[error("duplicate bookmark: {frequency} {mode}")]
    DuplicateBookmark { frequency: String, mode: Mode },

    /// I/O failure other than a missing file.
    #[error(transparent)]
    Io(#[from] io::Error),
}
