//! Timestamp formatting for the `{Timestamp:pattern}` placeholder
//!
//! Patterns use the custom date/time specifiers familiar from log output
//! templates (`yyyy-MM-dd HH:mm:ss.fff zzz`). A pattern is compiled once into
//! a list of pieces: runs that chrono formats directly (optionally with a
//! locale) plus the few specifiers chrono has no equivalent for.
//!
//! | Specifier | Meaning |
//! |-----------|---------|
//! | `yyyy` `yy` `y` | year, two-digit year, unpadded two-digit year |
//! | `MMMM` `MMM` `MM` `M` | month name, abbreviation, padded, unpadded |
//! | `dddd` `ddd` `dd` `d` | weekday name, abbreviation, padded day, unpadded day |
//! | `HH` `H` `hh` `h` | 24h and 12h hour |
//! | `mm` `m` `ss` `s` | minute, second |
//! | `f`..`fffffffff` | fraction digits |
//! | `F`..`FFFFFFFFF` | fraction digits without trailing zeros |
//! | `tt` `t` | AM/PM designator, first letter |
//! | `z` `zz` `zzz` `K` | UTC offset |
//! | `'text'` `"text"` `\c` | literal text |

use chrono::{DateTime, FixedOffset, Locale, Timelike};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    /// chrono strftime text (literals already escaped)
    Strftime(String),
    Fraction { digits: u32, trim_zeros: bool },
    Offset { width: usize },
    MeridiemInitial,
}

/// A compiled timestamp pattern
///
/// # Examples
///
/// ```
/// use rust_rich_log::core::TimestampPattern;
/// use chrono::DateTime;
///
/// let ts = DateTime::parse_from_rfc3339("2025-01-08T10:30:45.123+02:00").unwrap();
/// let pattern = TimestampPattern::new("HH:mm:ss.fff");
/// assert_eq!(pattern.format(&ts, None), "10:30:45.123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampPattern {
    source: String,
    pieces: Vec<Piece>,
}

impl TimestampPattern {
    /// Pattern used when a template gives `{Timestamp}` without a format
    pub const DEFAULT_PATTERN: &'static str = "yyyy-MM-dd HH:mm:ss.fff zzz";

    #[must_use]
    pub fn new(pattern: &str) -> Self {
        let source = if pattern.is_empty() {
            Self::DEFAULT_PATTERN
        } else {
            pattern
        };

        Self {
            source: source.to_string(),
            pieces: compile(source),
        }
    }

    /// The pattern text this was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Format a timestamp, localizing month and day names when a locale is given
    #[must_use]
    pub fn format(&self, timestamp: &DateTime<FixedOffset>, locale: Option<Locale>) -> String {
        let mut out = String::with_capacity(self.source.len() + 8);

        for piece in &self.pieces {
            // Compiled strftime runs contain only valid specifiers, so the
            // fmt::Result of these writes is always Ok.
            let _ = match piece {
                Piece::Strftime(strftime) => match locale {
                    Some(locale) => write!(out, "{}", timestamp.format_localized(strftime, locale)),
                    None => write!(out, "{}", timestamp.format(strftime)),
                },
                Piece::Fraction { digits, trim_zeros } => write_fraction(
                    &mut out,
                    timestamp.nanosecond() % 1_000_000_000,
                    *digits,
                    *trim_zeros,
                ),
                Piece::Offset { width } => {
                    write_offset(&mut out, timestamp.offset().local_minus_utc(), *width)
                }
                Piece::MeridiemInitial => {
                    out.push(if timestamp.hour() < 12 { 'A' } else { 'P' });
                    Ok(())
                }
            };
        }

        out
    }
}

impl Default for TimestampPattern {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATTERN)
    }
}

fn write_fraction(out: &mut String, nanos: u32, digits: u32, trim_zeros: bool) -> std::fmt::Result {
    let value = nanos / 10u32.pow(9 - digits);
    let mut text = format!("{:0width$}", value, width = digits as usize);
    if trim_zeros {
        let trimmed = text.trim_end_matches('0').len();
        text.truncate(trimmed);
    }
    out.write_str(&text)
}

fn write_offset(out: &mut String, seconds: i32, width: usize) -> std::fmt::Result {
    let sign = if seconds < 0 { '-' } else { '+' };
    let total_minutes = seconds.unsigned_abs() / 60;
    let (hours, minutes) = (total_minutes / 60, total_minutes % 60);
    match width {
        1 => write!(out, "{}{}", sign, hours),
        2 => write!(out, "{}{:02}", sign, hours),
        _ => write!(out, "{}{:02}:{:02}", sign, hours, minutes),
    }
}

fn compile(pattern: &str) -> Vec<Piece> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut pieces = Vec::new();
    let mut strftime = String::new();
    let mut i = 0;

    let flush = |strftime: &mut String, pieces: &mut Vec<Piece>| {
        if !strftime.is_empty() {
            pieces.push(Piece::Strftime(std::mem::take(strftime)));
        }
    };

    while i < chars.len() {
        let ch = chars[i];
        let run = chars[i..].iter().take_while(|&&c| c == ch).count();

        match ch {
            'y' => strftime.push_str(match run {
                1 => "%-y",
                2 => "%y",
                _ => "%Y",
            }),
            'M' => strftime.push_str(match run {
                1 => "%-m",
                2 => "%m",
                3 => "%b",
                _ => "%B",
            }),
            'd' => strftime.push_str(match run {
                1 => "%-d",
                2 => "%d",
                3 => "%a",
                _ => "%A",
            }),
            'H' => strftime.push_str(if run == 1 { "%-H" } else { "%H" }),
            'h' => strftime.push_str(if run == 1 { "%-I" } else { "%I" }),
            'm' => strftime.push_str(if run == 1 { "%-M" } else { "%M" }),
            's' => strftime.push_str(if run == 1 { "%-S" } else { "%S" }),
            'f' | 'F' => {
                flush(&mut strftime, &mut pieces);
                pieces.push(Piece::Fraction {
                    digits: run.min(9) as u32,
                    trim_zeros: ch == 'F',
                });
            }
            't' => {
                if run == 1 {
                    flush(&mut strftime, &mut pieces);
                    pieces.push(Piece::MeridiemInitial);
                } else {
                    strftime.push_str("%p");
                }
            }
            'z' => {
                flush(&mut strftime, &mut pieces);
                pieces.push(Piece::Offset { width: run.min(3) });
            }
            'K' => {
                flush(&mut strftime, &mut pieces);
                pieces.push(Piece::Offset { width: 3 });
            }
            '\'' | '"' => {
                let close = chars[i + 1..].iter().position(|&c| c == ch);
                let end = close.map_or(chars.len(), |p| i + 1 + p);
                push_literal(&mut strftime, chars[i + 1..end].iter().copied());
                i = (end + 1).min(chars.len());
                continue;
            }
            '\\' => {
                if let Some(&next) = chars.get(i + 1) {
                    push_literal(&mut strftime, std::iter::once(next));
                }
                i += 2;
                continue;
            }
            // single-specifier marker, as in "%d"
            '%' => {
                i += 1;
                continue;
            }
            _ => {
                push_literal(&mut strftime, std::iter::repeat(ch).take(run));
            }
        }

        i += run;
    }

    flush(&mut strftime, &mut pieces);
    pieces
}

fn push_literal(strftime: &mut String, text: impl Iterator<Item = char>) {
    for ch in text {
        if ch == '%' {
            strftime.push_str("%%");
        } else {
            strftime.push(ch);
        }
    }
}
