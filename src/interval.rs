//! Static interval and position catalogs.
//!
//! Every hui position on the instrument is described by the interval it
//! sounds above the open string. The two catalogs list the positions in the
//! order they are read off the soundboard, which for harmonics means the
//! pitches rise and fall symmetrically around the seventh hui.

use crate::error::Error;

/// Interval names and the number of semitones they span.
static INTERVALS: [(&str, i32); 24] = [
    ("minor 2nd", 1),
    ("major 2nd", 2),
    ("minor 3rd", 3),
    ("major 3rd", 4),
    ("perfect 4th", 5),
    ("perfect 5th", 7),
    ("minor 6th", 8),
    ("major 6th", 9),
    ("minor 7th", 10),
    ("major 7th", 11),
    ("octave", 12),
    ("major 9th", 14),
    ("minor 10th", 15),
    ("major 10th", 16),
    ("perfect 11th", 17),
    ("perfect 12th", 19),
    ("major 13th", 21),
    ("perfect 15th", 24),
    ("major 16th", 26),
    ("major 17th", 28),
    ("perfect 19th", 31),
    ("perfect 22nd", 36),
    // Compound harmonics, summed ahead of time.
    ("minor 9th + perfect 5th", 20),
    ("major 9th + perfect 5th", 21),
];

/// Returns the number of semitones spanned by the named interval.
pub fn semitones(name: &str) -> Result<i32, Error> {
    INTERVALS
        .iter()
        .find(|&&(interval, _)| interval == name)
        .map(|&(_, semitones)| semitones)
        .ok_or_else(|| Error::UnknownInterval(name.to_string()))
}

/// A named location on the string paired with the interval it produces.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Position {
    /// Hui label shown in the first column
    pub label: &'static str,

    /// Interval name shown in the last column
    pub interval: &'static str,
}

const fn position(label: &'static str, interval: &'static str) -> Position {
    Position { label, interval }
}

/// Stopped notes, from the third hui down to beyond the thirteenth.
pub static STOPPED: [Position; 19] = [
    position("Hui 3", "major 17th"),
    position("Hui 3.5", "major 16th"),
    position("Hui 4", "perfect 15th"),
    position("Hui 4.6", "major 13th"),
    position("Hui 5", "perfect 12th"),
    position("Hui 5.6", "perfect 11th"),
    position("Hui 6", "major 10th"),
    position("Hui 6.2", "minor 10th"),
    position("Hui 6.5", "major 9th"),
    position("Hui 7", "octave"),
    position("Hui 7.3", "major 7th"),
    position("Hui 7.6", "minor 7th"),
    position("Hui 7.9", "major 6th"),
    position("Hui 8.5", "minor 6th"),
    position("Hui 9", "perfect 5th"),
    position("Hui 10", "perfect 4th"),
    position("Hui 10.8", "major 3rd"),
    position("Hui 12", "minor 3rd"),
    position("Beyond hui", "major 2nd"),
];

/// Harmonic nodes, from the bridge end to the nut end.
pub static HARMONICS: [Position; 17] = [
    position("Hidden 4", "major 9th + perfect 5th"),
    position("Hui 13", "perfect 22nd"),
    position("Hidden 3", "minor 9th + perfect 5th"),
    position("Hui 12", "perfect 19th"),
    position("Hui 11", "major 17th"),
    position("Hui 10", "perfect 15th"),
    position("Hui 9", "perfect 12th"),
    position("Hui 8", "major 17th"),
    position("Hui 7", "octave"),
    position("Hui 6", "major 17th"),
    position("Hui 5", "perfect 12th"),
    position("Hui 4", "perfect 15th"),
    position("Hui 3", "major 17th"),
    position("Hui 2", "perfect 19th"),
    position("Hidden 2", "minor 9th + perfect 5th"),
    position("Hui 1", "perfect 22nd"),
    position("Hidden 1", "major 9th + perfect 5th"),
];

/// Selects one of the two position catalogs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Catalog {
    Stopped,
    Harmonics,
}

impl Catalog {
    /// Returns the ordered positions of this catalog.
    pub fn positions(&self) -> &'static [Position] {
        match *self {
            Catalog::Stopped => &STOPPED,
            Catalog::Harmonics => &HARMONICS,
        }
    }

    /// Human readable table title.
    pub fn title(&self) -> &'static str {
        match *self {
            Catalog::Stopped => "Stopped notes",
            Catalog::Harmonics => "Harmonics",
        }
    }
}
