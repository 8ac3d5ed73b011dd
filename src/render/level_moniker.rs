//! Fixed-width level abbreviations

use super::text_format::format_case;
use crate::core::LogLevel;

const LOWERCASE: [[&str; 4]; 6] = [
    ["v", "vb", "vrb", "verb"],
    ["d", "de", "dbg", "dbug"],
    ["i", "in", "inf", "info"],
    ["w", "wn", "wrn", "warn"],
    ["e", "er", "err", "eror"],
    ["f", "fa", "ftl", "fatl"],
];

const TITLE_CASE: [[&str; 4]; 6] = [
    ["V", "Vb", "Vrb", "Verb"],
    ["D", "De", "Dbg", "Dbug"],
    ["I", "In", "Inf", "Info"],
    ["W", "Wn", "Wrn", "Warn"],
    ["E", "Er", "Err", "Eror"],
    ["F", "Fa", "Ftl", "Fatl"],
];

const UPPERCASE: [[&str; 4]; 6] = [
    ["V", "VB", "VRB", "VERB"],
    ["D", "DE", "DBG", "DBUG"],
    ["I", "IN", "INF", "INFO"],
    ["W", "WN", "WRN", "WARN"],
    ["E", "ER", "ERR", "EROR"],
    ["F", "FA", "FTL", "FATL"],
];

/// Moniker for `level` under a `{Level:format}` specifier.
///
/// | format | result for Information |
/// |--------|------------------------|
/// | `u3` | `INF` |
/// | `t4` | `Info` |
/// | `w1` | `i` |
/// | `u5` | `INFOR` |
/// | `u0` | empty |
/// | `u` or none | `INFORMATION` / `Information` |
pub fn level_moniker(level: LogLevel, format: &str) -> String {
    let name = level.to_str();

    let Some(width) = parse_width(format) else {
        return format_case(name, format);
    };

    if width < 1 {
        return String::new();
    }

    if width > 4 {
        let truncated: String = name.chars().take(width).collect();
        return format_case(&truncated, format);
    }

    let table = match format.chars().next() {
        Some('w') => &LOWERCASE,
        Some('u') => &UPPERCASE,
        Some('t') => &TITLE_CASE,
        _ => return format_case(name, format),
    };
    table[level.index()][width - 1].to_string()
}

/// Width digits after the case character, for two or three character formats
fn parse_width(format: &str) -> Option<usize> {
    let len = format.chars().count();
    if len != 2 && len != 3 {
        return None;
    }

    let digits: String = format.chars().skip(1).collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Monikers for every level, computed once per format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelMonikers {
    monikers: [String; 6],
}

impl LevelMonikers {
    pub fn new(format: &str) -> Self {
        Self {
            monikers: LogLevel::ALL.map(|level| level_moniker(level, format)),
        }
    }

    #[inline]
    pub fn get(&self, level: LogLevel) -> &str {
        &self.monikers[level.index()]
    }
}
