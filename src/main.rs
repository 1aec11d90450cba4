//! Fretboard: learn notes on a guitar.
//!
//! Shows notes, chords and scales across a 6-string fretboard, plus the
//! CAGED and pentatonic box pattern systems, as text diagrams. `game`
//! runs a name-that-note drill.

mod fretboard {
    pub mod game;
    pub mod neck;
    pub mod noteparser;
    pub mod pitch;
    pub mod quality;
    pub mod shapes;
    pub mod util;
}

use std::process::ExitCode;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};
use itertools::Itertools;

use crate::fretboard::game;
use crate::fretboard::neck::FretDiagram;
use crate::fretboard::pitch::{Note, PitchClass, Spelling, SEMITONES};
use crate::fretboard::quality::{self, ChordQuality, ScaleKind};
use crate::fretboard::shapes::{self, BoxForm};

/// Fretboard - music-theory diagrams for 6-string guitar
#[derive(Parser, Debug)]
#[command(name = "fretboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of frets to display
    #[arg(short, long, global = true, default_value_t = 12)]
    frets: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show notes across the fretboard
    Note {
        /// Show only the seven natural notes
        #[arg(long)]
        whole: bool,

        /// Notes to show (default: all twelve)
        notes: Vec<String>,
    },

    /// Resolve a chord and show its tones across the fretboard
    Chord {
        /// Chord root
        root: String,

        /// Minor triad
        #[arg(long, group = "quality")]
        minor: bool,

        /// Dominant seventh
        #[arg(long, group = "quality")]
        seventh: bool,

        /// Augmented triad
        #[arg(long, group = "quality")]
        aug: bool,

        /// Major seventh
        #[arg(long, group = "quality")]
        major7: bool,

        /// Minor seventh
        #[arg(long, group = "quality")]
        minor7: bool,

        /// Diminished triad
        #[arg(long, group = "quality")]
        dim: bool,
    },

    /// Resolve a scale and show it across the fretboard
    Scale {
        /// Scale root
        root: String,

        /// 7-note diatonic scale (default: pentatonic)
        #[arg(long)]
        diatonic: bool,

        /// Minor (default: major)
        #[arg(long)]
        minor: bool,

        /// Print the key's diatonic chords instead of a diagram
        #[arg(long)]
        chords: bool,

        /// Print the scale as a numbered degree listing
        #[arg(long)]
        list: bool,

        /// With --list, leave a gap before whole-step degrees
        #[arg(long)]
        full: bool,
    },

    /// Show pentatonic box shapes
    Box {
        /// Box form: G, E, D, C, A or 1-5
        #[arg(long, default_value = "g")]
        form: String,

        /// Key root: show all five forms superimposed in this key
        root: Option<String>,
    },

    /// Show the five-shape CAGED system for a root
    Caged {
        /// Chord root
        root: String,

        /// Show the compact triad layout instead
        #[arg(long)]
        triads: bool,
    },

    /// Guess the marked note
    Game,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let frets = cli.frets;
    match cli.command {
        Commands::Note { whole, notes } => show_notes(whole, &notes, frets),
        Commands::Chord {
            root,
            minor,
            seventh,
            aug,
            major7,
            minor7,
            dim,
        } => {
            let quality = chord_quality(minor, seventh, aug, major7, minor7, dim);
            show_chord(&root, quality, frets)
        }
        Commands::Scale {
            root,
            diatonic,
            minor,
            chords,
            list,
            full,
        } => show_scale(&root, diatonic, minor, chords, list, full, frets),
        Commands::Box { form, root } => show_box(&form, root.as_deref()),
        Commands::Caged { root, triads } => show_caged(&root, triads, frets),
        Commands::Game => game::run(frets),
    }
}

/// The quality flags form one clap group, so at most one can be set.
fn chord_quality(
    minor: bool,
    seventh: bool,
    aug: bool,
    major7: bool,
    minor7: bool,
    dim: bool,
) -> ChordQuality {
    if minor {
        ChordQuality::Minor
    } else if seventh {
        ChordQuality::Seventh
    } else if aug {
        ChordQuality::Augmented
    } else if major7 {
        ChordQuality::MajorSeventh
    } else if minor7 {
        ChordQuality::MinorSeventh
    } else if dim {
        ChordQuality::Diminished
    } else {
        ChordQuality::Major
    }
}

fn show_notes(whole: bool, tokens: &[String], frets: usize) -> Result<()> {
    let columns = frets + 1;
    if !tokens.is_empty() {
        let notes = tokens
            .iter()
            .map(|token| Note::from_str(token))
            .collect::<Result<Vec<_>, _>>()?;
        println!("Notes: {}", notes.iter().map(|note| note.name()).join(", "));
        println!();
        let pitches: Vec<PitchClass> = notes.iter().map(|note| note.pitch).unique().collect();
        print!(
            "{}",
            FretDiagram::project(&pitches, notes[0].spelling, columns)
        );
    } else {
        let pitches: Vec<PitchClass> = (0..SEMITONES)
            .map(PitchClass::new)
            .filter(|pitch| !whole || pitch.name(Spelling::Sharp).len() == 1)
            .collect();
        if whole {
            println!("Fretboard -- Whole notes");
        } else {
            println!("Fretboard -- All notes");
        }
        println!();
        print!(
            "{}",
            FretDiagram::project(&pitches, Spelling::Sharp, columns)
        );
    }
    Ok(())
}

fn chord_header(root: Note, quality: ChordQuality) -> String {
    format!(
        "Chord: {}{} -- {}",
        root.name(),
        quality.suffix(),
        quality::resolve_chord(root, quality).iter().join(", ")
    )
}

fn show_chord(root: &str, quality: ChordQuality, frets: usize) -> Result<()> {
    let root = Note::from_str(root)?;
    log::debug!("chord root {} is pitch class {}", root, root.pitch.value());
    println!("{}", chord_header(root, quality));
    println!();
    let pitches = quality::chord_pitches(root.pitch, quality);
    print!(
        "{}",
        FretDiagram::project(&pitches, root.spelling, frets + 1)
    );
    Ok(())
}

fn show_scale(
    root: &str,
    diatonic: bool,
    minor: bool,
    chords: bool,
    list: bool,
    full: bool,
    frets: usize,
) -> Result<()> {
    let root = Note::from_str(root)?;
    let marker = if minor { "m" } else { "" };

    if chords {
        let names = quality::resolve_scale(root, ScaleKind::new(true, minor));
        println!(
            "Notes in the {}{} scale: {}",
            root.name(),
            marker,
            names.iter().join(", ")
        );
        println!("Chords");
        for row in quality::key_chords(root, minor) {
            println!(
                "{:>5} {:<5} {}",
                row.numeral,
                row.name,
                row.tones.iter().join(", ")
            );
        }
        return Ok(());
    }

    let kind = ScaleKind::new(diatonic, minor);
    let names = quality::resolve_scale(root, kind);

    if list || full {
        println!("Notes in the {}{} scale", root.name(), marker);
        for (degree, (name, step)) in names.iter().zip(kind.steps()).enumerate() {
            if full && *step > 1 {
                println!();
            }
            println!("{} - {}", degree + 1, name);
        }
        return Ok(());
    }

    println!(
        "Scale: {}{} -- {}",
        root.name(),
        marker,
        names.iter().join(", ")
    );
    println!();
    let pitches = quality::scale_pitches(root.pitch, kind);
    print!(
        "{}",
        FretDiagram::project(&pitches, root.spelling, frets + 1)
    );
    Ok(())
}

fn show_box(form: &str, root: Option<&str>) -> Result<()> {
    match root {
        // a root takes precedence: all five forms keyed to it
        Some(token) => {
            let root = Note::from_str(token)?;
            println!("Boxes: all five forms in {}", root.name());
            println!();
            print!("{}", shapes::layout_box_all(root.pitch));
        }
        None => {
            let form = BoxForm::from_str(form)?;
            println!("Box: {} form", form.letter());
            println!();
            print!("{}", shapes::layout_box(form));
        }
    }
    Ok(())
}

fn show_caged(root: &str, triads: bool, frets: usize) -> Result<()> {
    let root = Note::from_str(root)?;
    if triads {
        println!("Triads: {}", root.name());
        println!();
        print!("{}", shapes::layout_triad(root.pitch, frets + 1)?);
    } else {
        println!("CAGED: {}", root.name());
        println!();
        print!("{}", shapes::layout_caged(root.pitch, frets + 1)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chord_header_contract() {
        let root: Note = "C".parse().unwrap();
        assert_eq!(
            chord_header(root, ChordQuality::Major),
            "Chord: CMaj -- C, E, G"
        );
    }

    #[test]
    fn chord_header_follows_the_root_spelling() {
        let root: Note = "eb".parse().unwrap();
        assert_eq!(
            chord_header(root, ChordQuality::Minor),
            "Chord: EbMin -- Eb, Gb, Bb"
        );
    }

    #[test]
    fn quality_defaults_to_major() {
        assert_eq!(
            chord_quality(false, false, false, false, false, false),
            ChordQuality::Major
        );
        assert_eq!(
            chord_quality(false, false, false, true, false, false),
            ChordQuality::MajorSeventh
        );
    }

    #[test]
    fn cli_parses_and_rejects() {
        use clap::error::ErrorKind;

        assert!(Cli::try_parse_from(["fretboard", "chord", "C", "--minor"]).is_ok());
        assert!(Cli::try_parse_from(["fretboard", "-f", "15", "note"]).is_ok());
        // two quality flags at once is a usage error
        let err =
            Cli::try_parse_from(["fretboard", "chord", "C", "--minor", "--aug"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
        // a subcommand is required
        assert!(Cli::try_parse_from(["fretboard"]).is_err());
    }
}
