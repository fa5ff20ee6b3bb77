use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Line/column tracking for a code-point cursor.
///
/// `advance` and `retreat` are exact inverses. Retreating over a line feed
/// needs the length of the line above, which cannot be recomputed from text
/// once the stream has compacted it away, so the tracker keeps that history
/// itself: the length of every completed line and the indices at which
/// carriage returns and line feeds were consumed.
#[derive(Debug, Clone)]
pub struct Position {
    /// Index of the last consumed code point, `-1` before the first one.
    pub index: i64,
    /// 1-based line.
    pub line: usize,
    /// Code points consumed on the current line.
    pub column: usize,
    line_lengths: BTreeMap<usize, usize>,
    carriage_returns: BTreeSet<i64>,
    line_feeds: BTreeSet<i64>,
}

impl Position {
    pub fn new() -> Self {
        Self::at(1, 0)
    }

    pub fn at(line: usize, column: usize) -> Self {
        Self {
            index: -1,
            line,
            column,
            line_lengths: BTreeMap::new(),
            carriage_returns: BTreeSet::new(),
            line_feeds: BTreeSet::new(),
        }
    }

    pub fn advance(&mut self, c: char) {
        self.index += 1;
        match c {
            '\r' => {
                self.carriage_returns.insert(self.index);
            }
            '\n' => {
                self.line_lengths.insert(self.line, self.column);
                self.line_feeds.insert(self.index);
                self.line += 1;
                self.column = 0;
            }
            _ => self.column += 1,
        }
    }

    /// Un-consumes `c`, the code point at [`index`](Position::index).
    pub fn retreat(&mut self, c: char) {
        let at = self.index;
        self.index -= 1;
        if self.carriage_returns.remove(&at) {
            debug_assert_eq!(c, '\r');
            return;
        }
        if self.line_feeds.remove(&at) {
            debug_assert_eq!(c, '\n');
            self.line -= 1;
            self.column = self.line_lengths.get(&self.line).copied().unwrap_or(0);
            return;
        }
        self.column = self.column.saturating_sub(1);
    }

    /// Drops history that can no longer be retreated into: markers before
    /// `index` and the lengths of lines above the current one.
    pub fn forget_before(&mut self, index: i64) {
        self.carriage_returns = self.carriage_returns.split_off(&index);
        self.line_feeds = self.line_feeds.split_off(&index);
        self.line_lengths = self.line_lengths.split_off(&self.line);
    }

    /// Number of history entries currently retained.
    pub fn history_len(&self) -> usize {
        self.line_lengths.len() + self.carriage_returns.len() + self.line_feeds.len()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

/// Positions compare by line and column only.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line && self.column == other.column
    }
}

impl Eq for Position {}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line: {}, Col: {}", self.line, self.column)
    }
}
