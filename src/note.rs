//! Defines the pitch types used throughout the position tables.
//!
//! A `Pitch` is a letter, an optional accidental and an octave. Arithmetic is
//! done on the linear pitch number, where `C4` is `60` and every semitone adds
//! one.
//!
//! ```
//! use huiwei::note::{Accidental, NoteClass, Pitch};
//!
//! let open = Pitch::new(NoteClass::C, Accidental::Natural, 2);
//! assert_eq!(open.linear(), 36);
//! assert_eq!(open.transpose(15).to_string(), "E♭3");
//! ```
//!
//! Pitches built from a linear number always take one fixed spelling per
//! semitone, so enharmonic spellings such as `D♭` do not survive a
//! round trip through `Pitch::from_linear`.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::parser;

/// A single note letter without accidentals.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NoteClass {
    C, D, E, F, G, A, B
}

/// The total number of `NoteClass` elements.
pub const NOTE_CLASS_COUNT: usize = 7;

/// The number of semitones in an octave.
pub const OCTAVE: i32 = 12;

/// Largest octave magnitude a pitch name may carry. Linear numbers of such
/// pitches stay at least four octaves clear of the `i32` limits, so any
/// catalog interval can be added to them.
pub const MAX_OCTAVE: i32 = i32::MAX / OCTAVE - 6;

impl NoteClass {
    /// Construct a `NoteClass` from an upper-case letter.
    pub fn from_char(input: char) -> Option<NoteClass> {
        use self::NoteClass::*;

        match input {
            'C' => Some(C),
            'D' => Some(D),
            'E' => Some(E),
            'F' => Some(F),
            'G' => Some(G),
            'A' => Some(A),
            'B' => Some(B),
            _   => None
        }
    }

    /// Returns the upper-case letter for this class.
    pub fn to_char(&self) -> char {
        use self::NoteClass::*;

        match *self {
            C => 'C',
            D => 'D',
            E => 'E',
            F => 'F',
            G => 'G',
            A => 'A',
            B => 'B',
        }
    }

    /// Returns the semitone offset of the natural note above `C`.
    pub fn semitone(&self) -> i32 {
        const OFFSETS: [i32; NOTE_CLASS_COUNT] = [
            0, 2, 4, 5, 7, 9, 11,
        ];

        OFFSETS[*self as usize]
    }
}

/// At most one sharp or flat applied to a `NoteClass`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Accidental {
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    /// Semitone adjustment applied to the natural note.
    pub fn offset(&self) -> i32 {
        match *self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }

    /// The symbol written after the letter. Naturals are not written.
    pub fn symbol(&self) -> &'static str {
        match *self {
            Accidental::Natural => "",
            Accidental::Sharp => "♯",
            Accidental::Flat => "♭",
        }
    }
}

/// Spelling used for each semitone within an octave when a pitch is built
/// from its linear number.
const SPELLINGS: [(NoteClass, Accidental); OCTAVE as usize] = [
    (NoteClass::C, Accidental::Natural),
    (NoteClass::C, Accidental::Sharp),
    (NoteClass::D, Accidental::Natural),
    (NoteClass::E, Accidental::Flat),
    (NoteClass::E, Accidental::Natural),
    (NoteClass::F, Accidental::Natural),
    (NoteClass::F, Accidental::Sharp),
    (NoteClass::G, Accidental::Natural),
    (NoteClass::A, Accidental::Flat),
    (NoteClass::A, Accidental::Natural),
    (NoteClass::B, Accidental::Flat),
    (NoteClass::B, Accidental::Natural),
];

/// A note at a particular octave.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pitch {
    /// The base letter
    pub root: NoteClass,

    /// The accidental applied to the letter
    pub accidental: Accidental,

    /// Octave number, `4` being the octave starting at middle C
    pub octave: i32,
}

impl Pitch {
    /// Construct and return a new `Pitch`.
    pub fn new(root: NoteClass, accidental: Accidental, octave: i32) -> Pitch {
        Pitch { root, accidental, octave }
    }

    /// Parse a pitch name such as `C2`, `d#3`, `B♭-1`.
    pub fn parse(name: &str) -> Result<Pitch, Error> {
        parser::pitch(name)
    }

    /// Returns the linear pitch number, `(octave + 1) * 12 + semitone`.
    pub fn linear(&self) -> i32 {
        self.root.semitone() + self.accidental.offset() + (self.octave + 1) * OCTAVE
    }

    /// Construct the canonically spelled pitch for a linear pitch number.
    ///
    /// Any integer is accepted, negative numbers give negative octaves.
    pub fn from_linear(number: i32) -> Pitch {
        let octave = number.div_euclid(OCTAVE) - 1;
        let (root, accidental) = SPELLINGS[number.rem_euclid(OCTAVE) as usize];

        Pitch { root, accidental, octave }
    }

    /// Return the pitch `semitones` above (or below, when negative) this one.
    pub fn transpose(&self, semitones: i32) -> Pitch {
        Pitch::from_linear(self.linear() + semitones)
    }

    /// Return the same pitch under its canonical spelling.
    pub fn canonical(&self) -> Pitch {
        Pitch::from_linear(self.linear())
    }

    /// The letter without accidental or octave, used for colouring and
    /// letter-only searches.
    pub fn base_letter(&self) -> char {
        self.root.to_char()
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.root.to_char(), self.accidental.symbol(), self.octave)
    }
}

impl FromStr for Pitch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Pitch, Error> {
        Pitch::parse(s)
    }
}
