use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of persisted fields per bookmark row.
pub const ROW_LEN: usize = 4;

/// Modulation modes accepted in a bookmark's `mode` field.
///
/// The token set is fixed: the mode labels a gqrx-style receiver exposes
/// over its remote-control protocol, plus `Unset` (the empty token) for
/// rows that never had a mode assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "OFF")]
    Off,
    #[serde(rename = "RAW")]
    Raw,
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "FM")]
    Fm,
    #[serde(rename = "WFM")]
    Wfm,
    #[serde(rename = "WFM_ST")]
    WfmSt,
    #[serde(rename = "LSB")]
    Lsb,
    #[serde(rename = "USB")]
    Usb,
    #[serde(rename = "CW")]
    Cw,
    #[serde(rename = "CWL")]
    Cwl,
    #[serde(rename = "CWU")]
    Cwu,
}

impl Mode {
    /// Every accepted mode, in token order.
    pub const ALL: [Mode; 12] = [
        Mode::Unset,
        Mode::Off,
        Mode::Raw,
        Mode::Am,
        Mode::Fm,
        Mode::Wfm,
        Mode::WfmSt,
        Mode::Lsb,
        Mode::Usb,
        Mode::Cw,
        Mode::Cwl,
        Mode::Cwu,
    ];

    /// The token as it appears in the bookmark file.
    pub fn token(&self) -> &'static str {
        match self {
            Mode::Unset => "",
            Mode::Off => "OFF",
            Mode::Raw => "RAW",
            Mode::Am => "AM",
            Mode::Fm => "FM",
            Mode::Wfm => "WFM",
            Mode::WfmSt => "WFM_ST",
            Mode::Lsb => "LSB",
            Mode::Usb => "USB",
            Mode::Cw => "CW",
            Mode::Cwl => "CWL",
            Mode::Cwu => "CWU",
        }
    }

    /// Parse a mode token; `None` for anything outside the accepted set.
    pub fn from_token(token: &str) -> Option<Mode> {
        match token {
            "" => Some(Mode::Unset),
            "OFF" => Some(Mode::Off),
            "RAW" => Some(Mode::Raw),
            "AM" => Some(Mode::Am),
            "FM" => Some(Mode::Fm),
            "WFM" => Some(Mode::Wfm),
            "WFM_ST" => Some(Mode::WfmSt),
            "LSB" => Some(Mode::Lsb),
            "USB" => Some(Mode::Usb),
            "CW" => Some(Mode::Cw),
            "CWL" => Some(Mode::Cwl),
            "CWU" => Some(Mode::Cwu),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Lock state of a bookmark: whether the scanner may stop on it.
///
/// `Unset` is treated as open everywhere; it exists so files written
/// without a lock column round-trip unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lock {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "O")]
    Open,
    #[serde(rename = "L")]
    Locked,
}

impl Lock {
    /// The token as it appears in the bookmark file.
    pub fn token(&self) -> &'static str {
        match self {
            Lock::Unset => "",
            Lock::Open => "O",
            Lock::Locked => "L",
        }
    }

    /// Parse a lock token; `None` for anything outside `O`/`L`/empty.
    pub fn from_token(token: &str) -> Option<Lock> {
        match token {
            "" => Some(Lock::Unset),
            "O" => Some(Lock::Open),
            "L" => Some(Lock::Locked),
            _ => None,
        }
    }

    /// Parse a lock token read from a file, mapping unknown tokens to
    /// `Open`. Load never rejects a lock value; only append does.
    pub fn from_token_lenient(token: &str) -> Lock {
        Lock::from_token(token).unwrap_or(Lock::Open)
    }
}

impl fmt::Display for Lock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One saved frequency: the four persisted fields plus the runtime display
/// handle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Decimal digit string, stored as text to keep the file byte-exact.
    pub frequency: String,
    pub mode: Mode,
    pub description: String,
    pub lock: Lock,
    /// Correlation handle to a display row. Assigned at runtime, never
    /// persisted; empty means "no key assigned".
    #[serde(skip)]
    pub id_key: String,
}

impl Bookmark {
    /// Validate raw field text into a bookmark, with append-time rules:
    /// the frequency must parse as a decimal integer and the mode and lock
    /// tokens must be in their accepted sets.
    pub fn validated(frequency: &str, mode: &str, description: &str, lock: &str) -> Result<Bookmark> {
        if frequency.parse::<u64>().is_err() {
            return Err(Error::MalformedBookmark {
                reason: format!("frequency {frequency:?} is not a number"),
            });
        }
        let mode = Mode::from_token(mode).ok_or_else(|| Error::MalformedBookmark {
            reason: format!("unknown mode {mode:?}"),
        })?;
        let lock = Lock::from_token(lock).ok_or_else(|| Error::MalformedBookmark {
            reason: format!("unknown lock state {lock:?}"),
        })?;
        Ok(Bookmark {
            frequency: frequency.to_string(),
            mode,
            description: description.to_string(),
            lock,
            id_key: String::new(),
        })
    }

    /// Build a bookmark from a persisted row, field order
    /// `(frequency, mode, description, lock)`.
    ///
    /// Load-time validation matches the historical file tolerance: the
    /// frequency only has to be non-empty (numeric form is enforced on
    /// append, not here), the mode token must be known, and the lock token
    /// is read leniently. Fields past the fourth are ignored.
    pub fn from_row(row: &[String]) -> Result<Bookmark> {
        if row.len() < ROW_LEN {
            return Err(Error::MalformedBookmark {
                reason: format!("row has {} fields, expected {}", row.len(), ROW_LEN),
            });
        }
        if row[0].is_empty() {
            return Err(Error::MalformedBookmark {
                reason: "empty frequency".to_string(),
            });
        }
        let mode = Mode::from_token(&row[1]).ok_or_else(|| Error::MalformedBookmark {
            reason: format!("unknown mode {:?}", row[1]),
        })?;
        Ok(Bookmark {
            frequency: row[0].clone(),
            mode,
            description: row[2].clone(),
            lock: Lock::from_token_lenient(&row[3]),
            id_key: String::new(),
        })
    }

    /// The four persisted fields in file order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.frequency.clone(),
            self.mode.token().to_string(),
            self.description.clone(),
            self.lock.token().to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn mode_tokens_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_token(mode.token()), Some(mode));
        }
        assert_eq!(Mode::from_token("ZZ"), None);
        assert_eq!(Mode::from_token("cw"), None); // tokens are case-sensitive
    }

    #[test]
    fn lock_tokens() {
        assert_eq!(Lock::from_token("O"), Some(Lock::Open));
        assert_eq!(Lock::from_token("L"), Some(Lock::Locked));
        assert_eq!(Lock::from_token(""), Some(Lock::Unset));
        assert_eq!(Lock::from_token("D"), None);
        assert_eq!(Lock::from_token_lenient("D"), Lock::Open);
        assert_eq!(Lock::from_token_lenient("L"), Lock::Locked);
    }

    #[test]
    fn validated_accepts_plain_fields() {
        let bookmark = Bookmark::validated("155000400", "CW", "", "").unwrap();
        assert_eq!(bookmark.frequency, "155000400");
        assert_eq!(bookmark.mode, Mode::Cw);
        assert_eq!(bookmark.lock, Lock::Unset);
        assert!(bookmark.id_key.is_empty());
    }

    #[test]
    fn validated_rejects_bad_fields() {
        assert!(matches!(
            Bookmark::validated("", "CW", "", ""),
            Err(Error::MalformedBookmark { .. })
        ));
        assert!(matches!(
            Bookmark::validated("abc", "CW", "", ""),
            Err(Error::MalformedBookmark { .. })
        ));
        assert!(matches!(
            Bookmark::validated("155000400", "ZZ", "", ""),
            Err(Error::MalformedBookmark { .. })
        ));
        assert!(matches!(
            Bookmark::validated("155000400", "CW", "", "D"),
            Err(Error::MalformedBookmark { .. })
        ));
    }

    #[test]
    fn from_row_reads_four_fields() {
        let bookmark = Bookmark::from_row(&row(&["89300000", "WFM", "NPR", "L"])).unwrap();
        assert_eq!(bookmark.frequency, "89300000");
        assert_eq!(bookmark.mode, Mode::Wfm);
        assert_eq!(bookmark.description, "NPR");
        assert_eq!(bookmark.lock, Lock::Locked);
        assert!(bookmark.id_key.is_empty());
    }

    #[test]
    fn from_row_ignores_extra_fields() {
        let bookmark = Bookmark::from_row(&row(&["89300000", "WFM", "NPR", "O", "extra"])).unwrap();
        assert_eq!(bookmark.lock, Lock::Open);
    }

    #[test]
    fn from_row_allows_non_numeric_frequency() {
        // Load is more tolerant than append: only emptiness is checked.
        let bookmark = Bookmark::from_row(&row(&["89.3M", "WFM", "", "O"])).unwrap();
        assert_eq!(bookmark.frequency, "89.3M");
    }

    #[test]
    fn from_row_rejects_bad_rows() {
        assert!(matches!(
            Bookmark::from_row(&row(&["", "WFM", "", "O"])),
            Err(Error::MalformedBookmark { .. })
        ));
        assert!(matches!(
            Bookmark::from_row(&row(&["89300000", "ZZ", "", "O"])),
            Err(Error::MalformedBookmark { .. })
        ));
        assert!(matches!(
            Bookmark::from_row(&row(&["89300000", "WFM"])),
            Err(Error::MalformedBookmark { .. })
        ));
    }

    #[test]
    fn row_round_trip() {
        let original = row(&["144800000", "FM", "APRS", ""]);
        let bookmark = Bookmark::from_row(&original).unwrap();
        assert_eq!(bookmark.to_row(), original);
    }

    #[test]
    fn serialize_uses_file_tokens() {
        let bookmark = Bookmark::validated("89300000", "WFM_ST", "NPR", "L").unwrap();
        let json = serde_json::to_string(&bookmark).unwrap();
        assert!(json.contains("\"WFM_ST\""));
        assert!(json.contains("\"L\""));
        assert!(!json.contains("id_key"));
    }
}
