//! Handles parsing of free-form pitch names.
//!
//! ```text
//! Pitch : Letter Accidental? Octave
//!       ;
//! ```
//!
//! Letters are accepted in either case. Anything trailing a complete pitch is
//! rejected.

use combine::parser::char::digit;
use combine::{eof, many1, one_of, optional, satisfy_map, token, ParseError, Parser, Stream};

use crate::error::Error;
use crate::note::{Accidental, NoteClass, Pitch, MAX_OCTAVE};

/// Parses a single note letter, case-folded.
///
/// ```text
/// Letter : [A-G] | [a-g]
///        ;
/// ```
fn letter<Input>() -> impl Parser<Input, Output = NoteClass>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    satisfy_map(|c: char| NoteClass::from_char(c.to_ascii_uppercase()))
        .expected("Letter: [A-G]")
}

/// Parses a single accidental.
///
/// ```text
/// Accidental : 'b' '#' '♭' '♯'
///            ;
/// ```
fn accidental<Input>() -> impl Parser<Input, Output = Accidental>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    one_of("b#♭♯".chars())
        .map(|x| match x {
            '#' | '♯' => Accidental::Sharp,
            _ => Accidental::Flat,
        })
}

/// Parses the octave digits with an optional leading minus sign.
///
/// The digits are handed back as text so that out-of-range octaves can be
/// reported against the whole pitch name.
///
/// ```text
/// Octave : '-'? [0-9]+
///        ;
/// ```
fn octave<Input>() -> impl Parser<Input, Output = (bool, String)>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    (optional(token('-')), many1::<String, _, _>(digit()))
        .map(|(sign, digits)| (sign.is_some(), digits))
        .expected("Octave: -?[0-9]+")
}

/// Parses a complete pitch name such as `C2`, `f#3` or `B♭-1`.
pub fn pitch(name: &str) -> Result<Pitch, Error> {
    let invalid = || Error::InvalidPitchName(name.to_string());

    let ((root, accidental, (negative, digits)), _) =
        (letter(), optional(accidental()), octave())
            .skip(eof())
            .map(|(root, accidental, octave)| {
                (root, accidental.unwrap_or(Accidental::Natural), octave)
            })
            .parse(name)
            .map_err(|_| invalid())?;

    let magnitude: i32 = digits.parse().map_err(|_| invalid())?;
    if magnitude > MAX_OCTAVE {
        return Err(invalid());
    }
    let octave = if negative { -magnitude } else { magnitude };

    Ok(Pitch::new(root, accidental, octave))
}
