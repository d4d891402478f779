//! Display-side insertion.
//!
//! The store never touches a concrete widget; it drives an abstract
//! ordered view through [`BookmarkDisplay`]. A front-end binds the trait
//! to whatever it renders with (a UI tree, a terminal table), and the
//! sorting and duplicate rules stay here where they can be tested.

use crate::bookmark::{Bookmark, Lock, Mode};
use crate::error::{Error, Result};
use crate::frequency::{format_with_separator, strip_separator};

/// The four values a display renders for one bookmark row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Frequency text with thousands separators.
    pub frequency: String,
    pub mode: Mode,
    pub description: String,
    pub lock: Lock,
}

/// An ordered bookmark view.
///
/// Rows stay sorted ascending by frequency; [`insert_bookmark`] computes
/// each insertion position, implementations only honor it.
pub trait BookmarkDisplay {
    /// Displayed frequency text and mode of every row, in display order.
    fn rows(&self) -> Vec<(String, Mode)>;

    /// Insert a row at `index` (append when `None`); returns an
    /// identifier for the new row, unique within this display.
    fn insert(&mut self, index: Option<usize>, row: DisplayRow) -> String;

    /// Apply the lock-state visual tag to the row `id`.
    fn set_lock_tag(&mut self, id: &str, lock: Lock);
}

/// Insert `bookmark` into `display`, keeping rows frequency-sorted.
///
/// The scan walks the displayed rows in order: the first row with a
/// greater frequency fixes the insertion position (append when none is
/// greater), and a row with the same frequency and mode aborts with
/// [`Error::DuplicateBookmark`] before anything is inserted. On success
/// the displayed frequency carries thousands separators (the stored
/// value stays a plain digit string), the lock tag is applied, and the
/// new row's identifier is returned for use as the bookmark's `id_key`.
pub fn insert_bookmark<D>(bookmark: &Bookmark, display: &mut D) -> Result<String>
where
    D: BookmarkDisplay + ?Sized,
{
    let frequency = parse_frequency(&bookmark.frequency)?;
    let mut index = None;
    for (i, (row_frequency, row_mode)) in display.rows().into_iter().enumerate() {
        let digits = strip_separator(&row_frequency).ok_or_else(|| Error::MalformedBookmark {
            reason: format!("display row {i} has frequency {row_frequency:?}"),
        })?;
        let row_value = parse_frequency(&digits)?;
        if frequency < row_value {
            index = Some(i);
            break;
        }
        if frequency == row_value && bookmark.mode == row_mode {
            return Err(Error::DuplicateBookmark {
                frequency: bookmark.frequency.clone(),
                mode: bookmark.mode,
            });
        }
    }
    let row = DisplayRow {
        frequency: format_with_separator(&bookmark.frequency)?,
        mode: bookmark.mode,
        description: bookmark.description.clone(),
        lock: bookmark.lock,
    };
    let id = display.insert(index, row);
    display.set_lock_tag(&id, bookmark.lock);
    Ok(id)
}

fn parse_frequency(text: &str) -> Result<u64> {
    text.parse().map_err(|_| Error::MalformedBookmark {
        reason: format!("frequency {text:?} is not a number"),
    })
}
