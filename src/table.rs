//! Builds the stopped-note and harmonic tables for a tuning.
//!
//! A `PositionTable` is computed once per tuning and never modified. Retuning
//! builds a fresh pair of tables.

use std::fmt;

use log::debug;

use crate::error::{Error, Result};
use crate::interval::{self, Catalog, Position};
use crate::note::Pitch;

/// The number of strings on the instrument.
pub const STRING_COUNT: usize = 7;

/// The open-string pitches, string one first.
#[derive(Clone, Debug, PartialEq)]
pub struct Tuning([Pitch; STRING_COUNT]);

impl Tuning {
    /// Construct a `Tuning` from already parsed pitches.
    pub fn new(strings: [Pitch; STRING_COUNT]) -> Tuning {
        Tuning(strings)
    }

    /// Parse a tuning from exactly seven pitch names.
    ///
    /// Every token is validated before the tuning is returned, so a single bad
    /// token rejects the whole tuning.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Tuning> {
        if tokens.len() != STRING_COUNT {
            return Err(Error::StringCount { found: tokens.len() });
        }

        let mut strings = [Pitch::from_linear(0); STRING_COUNT];
        for (slot, token) in strings.iter_mut().zip(tokens) {
            *slot = Pitch::parse(token.as_ref())?;
        }

        Ok(Tuning(strings))
    }

    /// Returns the open-string pitches.
    pub fn strings(&self) -> &[Pitch; STRING_COUNT] {
        &self.0
    }
}

impl Default for Tuning {
    /// The standard tuning, `C2 D2 F2 G2 A2 C3 D3`.
    fn default() -> Tuning {
        let linear = [36, 38, 41, 43, 45, 48, 50];
        let mut strings = [Pitch::from_linear(0); STRING_COUNT];
        for (slot, &number) in strings.iter_mut().zip(linear.iter()) {
            *slot = Pitch::from_linear(number);
        }

        Tuning(strings)
    }
}

impl fmt::Display for Tuning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, pitch) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", pitch)?;
        }
        Ok(())
    }
}

/// Column holding the position labels.
pub const LABEL_COLUMN: usize = 0;

/// Column holding the interval names.
pub const INTERVAL_COLUMN: usize = STRING_COUNT + 1;

/// Total number of displayed columns: label, seven strings, interval.
pub const COLUMN_COUNT: usize = STRING_COUNT + 2;

/// One row of a table: a position and the pitch it gives on each string.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    /// The catalog entry this row was computed from
    pub position: Position,

    /// Pitch per string, `None` when the interval could not be resolved
    pub cells: [Option<Pitch>; STRING_COUNT],
}

/// An immutable grid of pitches, one row per catalog position.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionTable {
    catalog: Catalog,
    rows: Vec<Row>,
}

impl PositionTable {
    /// Build the table for one of the static catalogs.
    pub fn build(tuning: &Tuning, catalog: Catalog) -> PositionTable {
        let rows = PositionTable::compute(tuning, catalog.positions());
        debug!("built {} table: {} rows for {}", catalog.title(), rows.len(), tuning);

        PositionTable { catalog, rows }
    }

    /// Build both tables for a tuning, stopped notes first.
    pub fn build_pair(tuning: &Tuning) -> (PositionTable, PositionTable) {
        (
            PositionTable::build(tuning, Catalog::Stopped),
            PositionTable::build(tuning, Catalog::Harmonics),
        )
    }

    /// Compute the rows for an arbitrary list of positions.
    ///
    /// A position whose interval is unknown yields a row of empty cells rather
    /// than an error.
    pub fn compute(tuning: &Tuning, positions: &[Position]) -> Vec<Row> {
        positions
            .iter()
            .map(|&position| {
                let semitones = match interval::semitones(position.interval) {
                    Ok(semitones) => Some(semitones),
                    Err(e) => {
                        debug!("{}: {}, leaving row empty", position.label, e);
                        None
                    }
                };

                let mut cells = [None; STRING_COUNT];
                if let Some(semitones) = semitones {
                    for (cell, open) in cells.iter_mut().zip(tuning.strings()) {
                        *cell = Some(open.transpose(semitones));
                    }
                }

                Row { position, cells }
            })
            .collect()
    }

    /// Construct a table directly from computed rows.
    pub fn from_rows(catalog: Catalog, rows: Vec<Row>) -> PositionTable {
        PositionTable { catalog, rows }
    }

    /// The catalog this table was built from.
    pub fn catalog(&self) -> Catalog {
        self.catalog
    }

    /// All rows in catalog order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the pitch at a display coordinate, `None` for label and
    /// interval columns, empty cells and out-of-range coordinates.
    pub fn note_at(&self, row: usize, column: usize) -> Option<Pitch> {
        if column == LABEL_COLUMN || column >= INTERVAL_COLUMN {
            return None;
        }

        self.rows.get(row).and_then(|r| r.cells[column - 1])
    }

    /// Iterate over every note cell in row-major order, yielding the display
    /// coordinate and its pitch.
    pub fn notes(&self) -> impl Iterator<Item = (usize, usize, Pitch)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, r)| {
            r.cells
                .iter()
                .enumerate()
                .filter_map(move |(string, cell)| cell.map(|pitch| (row, string + 1, pitch)))
        })
    }
}
