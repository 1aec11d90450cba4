use std::fmt;

use itertools::Itertools;
use thiserror::Error;

use crate::fretboard::pitch::{PitchClass, Spelling, SEMITONES};

pub const STRING_COUNT: usize = 6;

/// Open-string pitch classes in standard tuning, listed top-to-bottom as
/// rendered (high e, B, G, D, A, low E), against the A-rooted name tables.
pub const TUNING: [u8; STRING_COUNT] = [7, 2, 10, 5, 0, 7];

/// Prompt names for the game, same order as `TUNING`.
pub const STRING_NAMES: [&str; STRING_COUNT] = ["high E", "B", "G", "D", "A", "low E"];

/// Pitch class sounding at a fret of a string.
pub fn fret_pitch(string: usize, fret: usize) -> PitchClass {
    PitchClass::new(((usize::from(TUNING[string]) + fret) % usize::from(SEMITONES)) as u8)
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("cell at string {string}, fret {fret} already holds two labels")]
pub struct CellFullError {
    pub string: usize,
    pub fret: usize,
}

/// One string/fret intersection: room for at most two stacked labels, so
/// overlapping pattern markers are kept rather than overwritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    slots: [Option<&'static str>; 2],
}

impl Cell {
    fn single(label: &'static str) -> Cell {
        Cell {
            slots: [Some(label), None],
        }
    }

    /// Insert at the first free slot.
    fn push(&mut self, label: &'static str) -> Option<()> {
        let slot = self.slots.iter_mut().find(|slot| slot.is_none())?;
        *slot = Some(label);
        Some(())
    }

    pub fn is_empty(&self) -> bool {
        self.slots[0].is_none()
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.slots.iter().flatten().copied().collect()
    }

    fn render(&self) -> String {
        self.slots.iter().flatten().join("")
    }
}

/// A transient text-renderable grid: one row per string, one cell per fret.
/// Built fresh per invocation and discarded after printing.
pub struct FretDiagram {
    frets: usize,
    rows: Vec<Vec<Cell>>,
}

impl FretDiagram {
    pub fn new(frets: usize) -> FretDiagram {
        FretDiagram {
            frets,
            rows: vec![vec![Cell::default(); frets]; STRING_COUNT],
        }
    }

    pub fn frets(&self) -> usize {
        self.frets
    }

    pub fn cell(&self, string: usize, fret: usize) -> &Cell {
        &self.rows[string][fret]
    }

    /// Stack a pattern label onto a cell, keeping whatever is already there.
    pub fn put(
        &mut self,
        string: usize,
        fret: usize,
        label: &'static str,
    ) -> Result<(), CellFullError> {
        self.rows[string][fret]
            .push(label)
            .ok_or(CellFullError { string, fret })
    }

    /// Set a cell that is written exactly once (plain note projection).
    pub fn mark(&mut self, string: usize, fret: usize, label: &'static str) {
        self.rows[string][fret] = Cell::single(label);
    }

    /// Label every fret whose pitch class is in `notes`.
    pub fn project(notes: &[PitchClass], spelling: Spelling, frets: usize) -> FretDiagram {
        let mut diagram = FretDiagram::new(frets);
        for string in 0..STRING_COUNT {
            for fret in 0..frets {
                let pitch = fret_pitch(string, fret);
                if notes.contains(&pitch) {
                    diagram.mark(string, fret, pitch.name(spelling));
                }
            }
        }
        diagram
    }
}

impl fmt::Display for FretDiagram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{}",
            (0..self.frets).map(|fret| format!(" {:<2} ", fret)).join("|")
        )?;
        writeln!(f, "{}", (0..self.frets).map(|_| "----").join("+"))?;
        for row in &self.rows {
            writeln!(
                f,
                "{}",
                row.iter()
                    .map(|cell| format!(" {:<2} ", cell.render()))
                    .join("|")
            )?;
        }
        Ok(())
    }
}
