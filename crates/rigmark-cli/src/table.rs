//! Terminal rendering of the bookmark table.

use rigmark_core::display::{BookmarkDisplay, DisplayRow};
use rigmark_core::{Lock, Mode};

/// Frequency-sorted bookmark table, the terminal stand-in for a GUI tree.
///
/// Row ids come from a counter and stay stable across later insertions,
/// like tree item handles. Positions (what `render` prints and `remove`
/// takes) are 1-based and shift as rows are inserted.
#[derive(Default)]
pub struct TableDisplay {
    rows: Vec<TableRow>,
    next_id: usize,
}

struct TableRow {
    id: String,
    values: DisplayRow,
    locked: bool,
}

impl TableDisplay {
    pub fn new() -> TableDisplay {
        TableDisplay::default()
    }

    /// Row id at 1-based position `position`, as printed by `render`.
    pub fn id_at(&self, position: usize) -> Option<&str> {
        if position == 0 {
            return None;
        }
        self.rows.get(position - 1).map(|r| r.id.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Aligned columns: position, lock marker, frequency, mode,
    /// description. Locked rows carry a `*` where the GUI paints a red
    /// background.
    pub fn render(&self) -> String {
        let freq_width = self
            .rows
            .iter()
            .map(|r| r.values.frequency.len())
            .max()
            .unwrap_or(0);
        let mode_width = self
            .rows
            .iter()
            .map(|r| r.values.mode.token().len())
            .max()
            .unwrap_or(0);
        let mut out = String::new();
        for (i, row) in self.rows.iter().enumerate() {
            let marker = if row.locked { '*' } else { ' ' };
            let line = format!(
                "{:>3} {} {:>fw$}  {:<mw$}  {}",
                i + 1,
                marker,
                row.values.frequency,
                row.values.mode.token(),
                row.values.description,
                fw = freq_width,
                mw = mode_width,
            );
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

impl BookmarkDisplay for TableDisplay {
    fn rows(&self) -> Vec<(String, Mode)> {
        self.rows
            .iter()
            .map(|r| (r.values.frequency.clone(), r.values.mode))
            .collect()
    }

    fn insert(&mut self, index: Option<usize>, row: DisplayRow) -> String {
        self.next_id += 1;
        let id = format!("row{}", self.next_id);
        let entry = TableRow {
            id: id.clone(),
            locked: row.lock == Lock::Locked,
            values: row,
        };
        match index {
            Some(i) => self.rows.insert(i, entry),
            None => self.rows.push(entry),
        }
        id
    }

    fn set_lock_tag(&mut self, id: &str, lock: Lock) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.id == id) {
            row.locked = lock == Lock::Locked;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigmark_core::{insert_bookmark, Bookmark};

    fn bookmark(frequency: &str, mode: &str, lock: &str) -> Bookmark {
        Bookmark::validated(frequency, mode, "", lock).unwrap()
    }

    #[test]
    fn positions_follow_frequency_order() {
        let mut table = TableDisplay::new();
        let high = insert_bookmark(&bookmark("155000400", "CW", ""), &mut table).unwrap();
        let low = insert_bookmark(&bookmark("89300000", "WFM", ""), &mut table).unwrap();
        // The later, lower-frequency row sorts first.
        assert_eq!(table.id_at(1), Some(low.as_str()));
        assert_eq!(table.id_at(2), Some(high.as_str()));
        assert_eq!(table.id_at(3), None);
        assert_eq!(table.id_at(0), None);
    }

    #[test]
    fn render_marks_locked_rows() {
        let mut table = TableDisplay::new();
        insert_bookmark(&bookmark("89300000", "WFM", "L"), &mut table).unwrap();
        insert_bookmark(&bookmark("155000400", "CW", "O"), &mut table).unwrap();
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].contains('*'));
        assert!(lines[0].contains("89,300,000"));
        assert!(!lines[1].contains('*'));
    }
}
