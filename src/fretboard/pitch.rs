use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::fretboard::noteparser::pest::Parser;
use crate::fretboard::noteparser::{NoteParser, Rule};
use crate::fretboard::util::title_case;

pub const SEMITONES: u8 = 12;

/// Sharp-preferring note names, indexed by chromatic step from A.
pub const SHARP_NAMES: [&str; 12] = [
    "A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#",
];

/// Flat-preferring note names, same indexing.
pub const FLAT_NAMES: [&str; 12] = [
    "A", "Bb", "B", "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab",
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown note '{0}'")]
pub struct UnknownNoteError(pub String);

/// Which of the two name tables renders a pitch class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spelling {
    Sharp,
    Flat,
}

impl Spelling {
    /// Flat spelling iff the name's second character is a flat marker.
    pub fn for_name(name: &str) -> Spelling {
        match title_case(name).as_bytes().get(1) {
            Some(b'b') => Spelling::Flat,
            _ => Spelling::Sharp,
        }
    }
}

/// One of the 12 equal-tempered chromatic steps, wrapping modulo 12.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PitchClass(u8);

impl PitchClass {
    pub fn new(value: u8) -> PitchClass {
        PitchClass(value % SEMITONES)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Case-insensitive lookup, sharp table first, then flat.
    pub fn from_name(name: &str) -> Result<PitchClass, UnknownNoteError> {
        let normalized = title_case(name);
        SHARP_NAMES
            .iter()
            .position(|n| *n == normalized)
            .or_else(|| FLAT_NAMES.iter().position(|n| *n == normalized))
            .map(|index| PitchClass(index as u8))
            .ok_or_else(|| UnknownNoteError(name.to_string()))
    }

    pub fn transpose(self, semitones: i32) -> PitchClass {
        PitchClass((i32::from(self.0) + semitones).rem_euclid(i32::from(SEMITONES)) as u8)
    }

    pub fn name(self, spelling: Spelling) -> &'static str {
        match spelling {
            Spelling::Sharp => SHARP_NAMES[self.0 as usize],
            Spelling::Flat => FLAT_NAMES[self.0 as usize],
        }
    }
}

/// A note as the user wrote it: its pitch class plus the spelling implied
/// by the accidental it carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub pitch: PitchClass,
    pub spelling: Spelling,
}

impl Note {
    pub fn name(self) -> &'static str {
        self.pitch.name(self.spelling)
    }
}

impl FromStr for Note {
    type Err = UnknownNoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The grammar rejects anything but one letter and at most one
        // accidental; the table lookup then rejects names like "E#" that
        // are well-formed but not spelled in either table.
        if NoteParser::parse(Rule::FULL_NOTE, s).is_err() {
            return Err(UnknownNoteError(s.to_string()));
        }
        let pitch = PitchClass::from_name(s)?;
        Ok(Note {
            pitch,
            spelling: Spelling::for_name(s),
        })
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        for name in ["c#", "C#", "c#"] {
            assert_eq!(PitchClass::from_name(name), Ok(PitchClass(4)));
        }
        assert_eq!(PitchClass::from_name("bb"), PitchClass::from_name("Bb"));
    }

    #[test]
    fn lookup_reads_both_tables() {
        assert_eq!(PitchClass::from_name("Db"), Ok(PitchClass(4)));
        assert_eq!(PitchClass::from_name("C#"), Ok(PitchClass(4)));
        assert_eq!(PitchClass::from_name("A"), Ok(PitchClass(0)));
    }

    #[test]
    fn unknown_names_fail() {
        for name in ["H", "C##", "E#", "", "10"] {
            assert_eq!(
                PitchClass::from_name(name),
                Err(UnknownNoteError(name.to_string()))
            );
        }
    }

    #[test]
    fn octave_closure() {
        for step in 0..SEMITONES {
            let pitch = PitchClass::new(step);
            assert_eq!(pitch.transpose(12), pitch);
            assert_eq!(pitch.transpose(-12), pitch);
        }
    }

    #[test]
    fn negative_transposition_stays_in_range() {
        assert_eq!(PitchClass::new(0).transpose(-1), PitchClass(11));
        assert_eq!(PitchClass::new(3).transpose(-15), PitchClass(0));
    }

    #[test]
    fn spelling_follows_the_flat_marker() {
        assert_eq!(Spelling::for_name("Bb"), Spelling::Flat);
        assert_eq!(Spelling::for_name("bB"), Spelling::Flat);
        assert_eq!(Spelling::for_name("C#"), Spelling::Sharp);
        assert_eq!(Spelling::for_name("E"), Spelling::Sharp);
    }

    #[test]
    fn parse_keeps_the_spelling() {
        let flat: Note = "eb".parse().unwrap();
        assert_eq!(flat.name(), "Eb");
        let sharp: Note = "d#".parse().unwrap();
        assert_eq!(sharp.name(), "D#");
        assert_eq!(flat.pitch, sharp.pitch);
    }

    #[test]
    fn parse_rejects_malformed_tokens() {
        assert!("H".parse::<Note>().is_err());
        assert!("C#b".parse::<Note>().is_err());
        assert!("".parse::<Note>().is_err());
        assert!("C 4".parse::<Note>().is_err());
    }
}
