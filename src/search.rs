//! Note search over a single `PositionTable`.
//!
//! A pattern matches a cell either when it equals the full pitch name, octave
//! included, or when it equals the bare letter. `E` therefore finds every E,
//! E♭ and E♯ in any octave while `E4` only finds E4 itself. Comparison is
//! case-insensitive.

use crate::table::PositionTable;

/// A display coordinate: row index and column index (strings are `1..=7`).
pub type Coord = (usize, usize);

/// Search results and the match currently selected.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Search {
    matches: Vec<Coord>,
    current: Option<usize>,
}

impl Search {
    /// Construct an empty search.
    pub fn new() -> Search {
        Search::default()
    }

    /// Scan `table` for `pattern`, replacing any previous results.
    ///
    /// Returns the number of matches. An empty pattern clears the results.
    pub fn run(&mut self, table: &PositionTable, pattern: &str) -> usize {
        let pattern = pattern.trim().to_uppercase();
        if pattern.is_empty() {
            self.clear();
            return 0;
        }

        self.matches = table
            .notes()
            .filter(|&(_, _, pitch)| {
                pitch.to_string().to_uppercase() == pattern
                    || pitch.base_letter().to_string() == pattern
            })
            .map(|(row, column, _)| (row, column))
            .collect();
        self.current = if self.matches.is_empty() { None } else { Some(0) };

        self.matches.len()
    }

    /// Advance to the next match, wrapping around after the last one.
    ///
    /// Returns the newly selected coordinate, or `None` if there are no
    /// matches.
    pub fn next(&mut self) -> Option<Coord> {
        self.step(1)
    }

    /// Retreat to the previous match, wrapping around before the first one.
    pub fn prev(&mut self) -> Option<Coord> {
        self.step(-1)
    }

    fn step(&mut self, direction: isize) -> Option<Coord> {
        if self.matches.is_empty() {
            return None;
        }

        let count = self.matches.len() as isize;
        let index = self.current.map_or(0, |i| i as isize);
        let index = (index + direction).rem_euclid(count) as usize;
        self.current = Some(index);

        Some(self.matches[index])
    }

    /// Forget all matches.
    pub fn clear(&mut self) {
        self.matches.clear();
        self.current = None;
    }

    /// All matches in scan order.
    pub fn matches(&self) -> &[Coord] {
        &self.matches
    }

    /// Index of the selected match.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Coordinate of the selected match.
    pub fn current_coord(&self) -> Option<Coord> {
        self.current.map(|i| self.matches[i])
    }

    /// Returns true if `coord` is one of the matches.
    pub fn contains(&self, coord: Coord) -> bool {
        self.matches.contains(&coord)
    }

    /// Returns true if there are no matches.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
