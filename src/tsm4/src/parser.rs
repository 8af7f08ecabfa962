//! Line-oriented parser for the AppHelper dump
//!
//! The dump is read in one forward pass. Each line either matches the
//! `LoadData(...)` template and yields a table, is a known benign metadata
//! line (consumed silently), or is reported as skipped. Fatal conditions
//! (unknown category tag, bad row token, ragged row) are yielded as errors
//! so the caller decides whether to halt.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::data::{AuctionTable, DataCategory};
use crate::decode::{unpack_row, DecodeError};

/// Substring marking benign application metadata lines that never carry
/// table data
const APP_INFO_SENTINEL: &str = "APP_INFO";

/// How much of a skipped line to keep for the diagnostic
const SKIP_PREVIEW_CHARS: usize = 50;

/// Static regex for the LoadData line template. Compiled once at first use.
/// Groups: data-type tag, scope name, download timestamp, quoted header
/// list, braced row groups.
static LOAD_DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"LoadData\("([^"]+)",\s*"([^"]+)",.*\{downloadTime=(\d+),fields=\{([^}]+)\},data=\{(.+)\}\}\]\]"#,
    )
    .expect("invalid LoadData regex pattern")
});

/// Per-line outcome the parser can yield
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    /// A structurally valid line, decoded into a table
    Table(AuctionTable),
    /// A line that matched neither the template nor the metadata sentinel
    Skipped {
        /// 1-based line number
        line: usize,
        /// First characters of the line, for diagnostics
        preview: String,
    },
}

/// Fatal parse errors. Skipped lines are not errors; they surface as
/// [`ParseEvent::Skipped`].
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: unknown data category tag {tag:?}")]
    UnknownCategory { line: usize, tag: String },

    #[error("line {line}: download timestamp {value:?} out of range")]
    Timestamp { line: usize, value: String },

    #[error("line {line}: {source}")]
    Row {
        line: usize,
        #[source]
        source: DecodeError,
    },

    #[error("line {line}: row has {found} values but {expected} columns")]
    ArityMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("read error: {0}")]
    Io(#[from] io::Error),
}

/// Iterator over the per-line outcomes of an AppData dump.
///
/// Single forward pass; no state is carried across lines beyond the line
/// counter, and the iterator is not restartable once consumed.
pub struct AppDataParser<R: BufRead> {
    lines: Lines<R>,
    line: usize,
}

impl AppDataParser<BufReader<File>> {
    /// Open a dump file for parsing
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> AppDataParser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    /// Parse one line. `Ok(None)` means the line was a benign metadata line
    /// and produces no event at all.
    fn parse_line(&self, text: &str) -> Result<Option<ParseEvent>, ParseError> {
        let Some(caps) = LOAD_DATA_RE.captures(text) else {
            if text.contains(APP_INFO_SENTINEL) {
                return Ok(None);
            }
            return Ok(Some(ParseEvent::Skipped {
                line: self.line,
                preview: text.chars().take(SKIP_PREVIEW_CHARS).collect(),
            }));
        };

        let tag = &caps[1];
        let category =
            DataCategory::from_tag(tag).ok_or_else(|| ParseError::UnknownCategory {
                line: self.line,
                tag: tag.to_string(),
            })?;

        // the group is all digits, so this only fails on overflow
        let captured_at = caps[3].parse::<u64>().map_err(|_| ParseError::Timestamp {
            line: self.line,
            value: caps[3].to_string(),
        })?;

        let columns: Vec<String> = caps[4]
            .replace('"', "")
            .split(',')
            .map(str::to_string)
            .collect();

        // The captured blob still carries the first row group's `{` and the
        // last one's `}`; trim those, then split on the group separator.
        let blob = &caps[5];
        let inner = blob.strip_prefix('{').unwrap_or(blob);
        let inner = inner.strip_suffix('}').unwrap_or(inner);

        let mut rows = Vec::new();
        for group in inner.split("},{") {
            let row = unpack_row(group).map_err(|source| ParseError::Row {
                line: self.line,
                source,
            })?;
            if row.len() != columns.len() {
                return Err(ParseError::ArityMismatch {
                    line: self.line,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            rows.push(row);
        }

        Ok(Some(ParseEvent::Table(AuctionTable {
            category,
            scope: caps[2].to_string(),
            captured_at,
            columns,
            rows,
        })))
    }
}

impl<R: BufRead> Iterator for AppDataParser<R> {
    type Item = Result<ParseEvent, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(err) => return Some(Err(ParseError::Io(err))),
            };
            self.line += 1;
            match self.parse_line(&text) {
                Ok(Some(event)) => return Some(Ok(event)),
                Ok(None) => continue,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}
