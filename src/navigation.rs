//! Cursor, highlight and search state for one position table.
//!
//! The navigator owns its table. Retuning replaces the navigator wholesale, so
//! no cursor or highlight outlives the table it referred to.

use std::collections::HashSet;

use crate::note::Pitch;
use crate::search::{Coord, Search};
use crate::table::{PositionTable, COLUMN_COUNT};

/// Cursor movement by one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A table together with everything the user has done to it.
#[derive(Clone, Debug)]
pub struct Navigator {
    table: PositionTable,
    row: usize,
    column: usize,
    highlighted: HashSet<Pitch>,
    search: Search,
}

impl Navigator {
    /// Wrap a freshly built table, cursor on the first string of the first
    /// row.
    pub fn new(table: PositionTable) -> Navigator {
        Navigator {
            table,
            row: 0,
            column: 1,
            highlighted: HashSet::new(),
            search: Search::new(),
        }
    }

    /// The table being browsed.
    pub fn table(&self) -> &PositionTable {
        &self.table
    }

    /// Cursor position as `(row, column)`.
    pub fn cursor(&self) -> Coord {
        (self.row, self.column)
    }

    /// Pitches currently highlighted.
    pub fn highlighted(&self) -> &HashSet<Pitch> {
        &self.highlighted
    }

    /// Search results for this table.
    pub fn search(&self) -> &Search {
        &self.search
    }

    fn last_row(&self) -> usize {
        self.table.len().saturating_sub(1)
    }

    /// Move the cursor one cell, stopping at the edges.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.row = self.row.saturating_sub(1),
            Direction::Down => self.row = (self.row + 1).min(self.last_row()),
            Direction::Left => self.column = self.column.saturating_sub(1),
            Direction::Right => self.column = (self.column + 1).min(COLUMN_COUNT - 1),
        }
    }

    /// Jump to the first row, keeping the column.
    pub fn top(&mut self) {
        self.row = 0;
    }

    /// Jump to the last row, keeping the column.
    pub fn bottom(&mut self) {
        self.row = self.last_row();
    }

    /// Move the cursor by `rows`, negative values moving up, clamped to the
    /// table.
    pub fn scroll(&mut self, rows: isize) {
        let target = self.row as isize + rows;
        self.row = target.clamp(0, self.last_row() as isize) as usize;
    }

    /// Pitch under the cursor, if the cursor sits on a note cell.
    pub fn current_note(&self) -> Option<Pitch> {
        self.table.note_at(self.row, self.column)
    }

    /// Highlight every cell sharing the pitch under the cursor, replacing any
    /// earlier highlight. Returns the highlighted pitch.
    pub fn highlight_current(&mut self) -> Option<Pitch> {
        let note = self.current_note()?;
        self.highlighted.clear();
        self.highlighted.insert(note);

        Some(note)
    }

    /// Returns true if `pitch` is part of the current highlight.
    pub fn is_highlighted(&self, pitch: &Pitch) -> bool {
        self.highlighted.contains(pitch)
    }

    /// Run a search over this table. Returns the number of matches.
    ///
    /// The cursor moves to the first match, if there is one.
    pub fn find(&mut self, pattern: &str) -> usize {
        let count = self.search.run(&self.table, pattern);
        if let Some(coord) = self.search.current_coord() {
            self.jump(coord);
        }

        count
    }

    /// Select the next match and move the cursor onto it.
    ///
    /// Returns false, leaving the cursor alone, when there are no matches.
    pub fn next_match(&mut self) -> bool {
        match self.search.next() {
            Some(coord) => {
                self.jump(coord);
                true
            }
            None => false,
        }
    }

    /// Select the previous match and move the cursor onto it.
    pub fn prev_match(&mut self) -> bool {
        match self.search.prev() {
            Some(coord) => {
                self.jump(coord);
                true
            }
            None => false,
        }
    }

    fn jump(&mut self, (row, column): Coord) {
        self.row = row;
        self.column = column;
    }

    /// Drop highlights and search results together. The cursor stays put.
    pub fn clear(&mut self) {
        self.highlighted.clear();
        self.search.clear();
    }
}
