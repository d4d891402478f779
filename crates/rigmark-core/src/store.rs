//! The bookmark collection and its file synchronization.

use std::path::{Path, PathBuf};

use log::info;

use crate::bookmark::{Bookmark, Lock, ROW_LEN};
use crate::csv;
use crate::display::{insert_bookmark, BookmarkDisplay};
use crate::error::{Error, Result};

/// Field delimiter of the bookmark file format.
pub const DELIMITER: char = ',';

/// An ordered collection of bookmarks bound to one backing file.
///
/// Construction does no I/O; [`BookmarkSet::load`] pulls the file in and
/// [`BookmarkSet::save`] writes the sequence back out. Order is insertion
/// order; the display layer sorts, the collection never does. The
/// collection is not synchronized; a multi-threaded caller needs its own
/// guard around load/save/mutation.
#[derive(Debug)]
pub struct BookmarkSet {
    bookmarks: Vec<Bookmark>,
    path: PathBuf,
}

impl BookmarkSet {
    pub fn new(path: impl Into<PathBuf>) -> BookmarkSet {
        BookmarkSet {
            bookmarks: Vec::new(),
            path: path.into(),
        }
    }

    /// The backing file this set loads from and saves to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The bookmarks in sequence order.
    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    /// Load bookmarks from the backing file, appending to the sequence.
    ///
    /// A missing file means "no bookmarks yet": logged at info level, the
    /// sequence is left unchanged. Validation is fail-fast: the first bad
    /// row aborts with [`Error::MalformedBookmark`], and rows read before
    /// it stay appended. Calling `load` twice appends the file content
    /// twice.
    pub fn load(&mut self) -> Result<()> {
        let rows = match csv::read_rows(&self.path, DELIMITER) {
            Err(Error::PathNotFound { path }) => {
                info!("no bookmark file at {}, skipping", path.display());
                return Ok(());
            }
            other => other?,
        };
        for mut row in rows {
            // Three-field rows predate the lock column.
            if row.len() < ROW_LEN {
                row.push(Lock::Open.token().to_string());
            }
            self.bookmarks.push(Bookmark::from_row(&row)?);
        }
        Ok(())
    }

    /// Write the sequence to the backing file, replacing its content.
    /// An empty sequence writes an empty file.
    pub fn save(&self) -> Result<()> {
        let rows: Vec<Vec<String>> = self.bookmarks.iter().map(Bookmark::to_row).collect();
        csv::write_rows(&self.path, DELIMITER, &rows)
    }

    /// Validate raw field text and append one bookmark at the end.
    ///
    /// The frequency must parse as a decimal integer and the mode and
    /// lock tokens must be in their accepted sets. Duplicates are not
    /// rejected here; only display insertion checks for them.
    pub fn append(
        &mut self,
        id_key: &str,
        frequency: &str,
        mode: &str,
        description: &str,
        lock: &str,
    ) -> Result<()> {
        let mut bookmark = Bookmark::validated(frequency, mode, description, lock)?;
        bookmark.id_key = id_key.to_string();
        self.bookmarks.push(bookmark);
        Ok(())
    }

    /// Remove every bookmark carrying `id_key`.
    ///
    /// The empty key is the "no key assigned" sentinel and is rejected
    /// with [`Error::InvalidKey`]; a key that matches nothing is a no-op.
    pub fn delete(&mut self, id_key: &str) -> Result<()> {
        if id_key.is_empty() {
            return Err(Error::InvalidKey {
                key: id_key.to_string(),
            });
        }
        self.bookmarks.retain(|b| b.id_key != id_key);
        Ok(())
    }

    /// Rebind the first bookmark keyed `old_key` to `new_key`.
    ///
    /// Fails with [`Error::InvalidKey`] when no bookmark carries
    /// `old_key`. Collisions with existing keys are not checked.
    pub fn update_id_key(&mut self, old_key: &str, new_key: &str) -> Result<()> {
        let bookmark = self
            .bookmarks
            .iter_mut()
            .find(|b| b.id_key == old_key)
            .ok_or_else(|| Error::InvalidKey {
                key: old_key.to_string(),
            })?;
        bookmark.id_key = new_key.to_string();
        Ok(())
    }

    /// Push every bookmark onto `display`, recording the returned row ids.
    ///
    /// Iterates in sequence order; display insertion keeps the rows
    /// frequency-sorted. Fail-fast: a [`Error::DuplicateBookmark`] aborts
    /// the batch, and bookmarks already inserted keep their assigned keys.
    pub fn load_into_display<D>(&mut self, display: &mut D) -> Result<()>
    where
        D: BookmarkDisplay + ?Sized,
    {
        for bookmark in self.bookmarks.iter_mut() {
            let id = insert_bookmark(bookmark, display)?;
            bookmark.id_key = id;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmark::Mode;
    use crate::display::fake::FakeDisplay;

    fn set() -> BookmarkSet {
        // Path is never touched by these tests.
        BookmarkSet::new("unused.csv")
    }

    #[test]
    fn append_pushes_at_the_end() {
        let mut set = set();
        set.append("", "89300000", "WFM", "NPR", "O").unwrap();
        set.append("", "155000400", "CW", "", "").unwrap();
        assert_eq!(set.len(), 2);
        let last = &set.bookmarks()[1];
        assert_eq!(last.frequency, "155000400");
        assert_eq!(last.mode, Mode::Cw);
        assert_eq!(last.description, "");
        assert_eq!(last.lock, Lock::Unset);
    }

    #[test]
    fn append_rejects_bad_fields_without_growing() {
        let mut set = set();
        assert!(set.append("", "", "CW", "", "").is_err());
        assert!(set.append("", "155000400", "ZZ", "", "").is_err());
        assert!(set.append("", "155000400", "CW", "", "D").is_err());
        assert!(set.is_empty());
    }

    #[test]
    fn append_allows_duplicates() {
        // Uniqueness is a display concern, not a storage one.
        let mut set = set();
        set.append("", "89300000", "WFM", "", "").unwrap();
        set.append("", "89300000", "WFM", "", "").unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn delete_rejects_the_empty_key() {
        let mut set = set();
        assert!(matches!(
            set.delete(""),
            Err(Error::InvalidKey { .. })
        ));
    }

    #[test]
    fn delete_removes_matches_only() {
        let mut set = set();
        set.append("a", "89300000", "WFM", "", "").unwrap();
        set.append("b", "145500000", "FM", "", "").unwrap();
        set.delete("a").unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.bookmarks()[0].id_key, "b");
        // Deleting the same key again is a no-op, not an error.
        set.delete("a").unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn delete_removes_every_match() {
        let mut set = set();
        set.append("a", "89300000", "WFM", "", "").unwrap();
        set.append("a", "145500000", "FM", "", "").unwrap();
        set.append("b", "155000400", "CW", "", "").unwrap();
        set.delete("a").unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.bookmarks()[0].id_key, "b");
    }

    #[test]
    fn update_id_key_rebinds_first_match() {
        let mut set = set();
        set.append("a", "89300000", "WFM", "", "").unwrap();
        set.append("a", "145500000", "FM", "", "").unwrap();
        set.update_id_key("a", "c").unwrap();
        assert_eq!(set.bookmarks()[0].id_key, "c");
        assert_eq!(set.bookmarks()[1].id_key, "a");
    }

    #[test]
    fn update_id_key_requires_a_match() {
        let mut set = set();
        set.append("a", "89300000", "WFM", "", "").unwrap();
        assert!(matches!(
            set.update_id_key("missing", "c"),
            Err(Error::InvalidKey { .. })
        ));
    }

    #[test]
    fn load_into_display_assigns_keys_in_sequence_order() {
        let mut set = set();
        set.append("", "155000400", "CW", "", "").unwrap();
        set.append("", "89300000", "WFM", "", "").unwrap();
        let mut display = FakeDisplay::default();
        set.load_into_display(&mut display).unwrap();
        // Ids are handed out in sequence order even though the display
        // sorts by frequency.
        assert_eq!(set.bookmarks()[0].id_key, "item1");
        assert_eq!(set.bookmarks()[1].id_key, "item2");
        let freqs: Vec<&str> = display.rows.iter().map(|(_, r)| r.frequency.as_str()).collect();
        assert_eq!(freqs, ["89,300,000", "155,000,400"]);
    }

    #[test]
    fn load_into_display_stops_on_duplicates() {
        let mut set = set();
        set.append("", "89300000", "WFM", "", "").unwrap();
        set.append("", "89300000", "WFM", "", "").unwrap();
        set.append("", "155000400", "CW", "", "").unwrap();
        let mut display = FakeDisplay::default();
        let err = set.load_into_display(&mut display).unwrap_err();
        assert!(matches!(err, Error::DuplicateBookmark { .. }));
        // The first bookmark made it in and kept its key; the rest did not.
        assert_eq!(set.bookmarks()[0].id_key, "item1");
        assert_eq!(set.bookmarks()[1].id_key, "");
        assert_eq!(set.bookmarks()[2].id_key, "");
        assert_eq!(display.rows.len(), 1);
    }
}
