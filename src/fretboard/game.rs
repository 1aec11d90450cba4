use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use rand::Rng;

use crate::fretboard::neck::{fret_pitch, FretDiagram, STRING_COUNT, STRING_NAMES};
use crate::fretboard::pitch::{Note, Spelling};

const TRIES: u32 = 3;

/// Running tally across rounds. A round counts once it is answered or the
/// tries run out; an interrupted round is never counted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GameStats {
    pub rounds: u32,
    pub correct: u32,
}

impl GameStats {
    pub fn accuracy(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            100.0 * f64::from(self.correct) / f64::from(self.rounds)
        }
    }
}

/// Pick a random string/fret, show only that position, and read guesses.
/// Wrong notes burn one of the three tries; tokens that are not notes at
/// all are reported and asked again for free.
pub fn run(frets: usize) -> Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = Arc::clone(&running);
    ctrlc::set_handler(move || handler_flag.store(false, Ordering::SeqCst))
        .context("setting Ctrl-C handler")?;

    let mut rng = rand::thread_rng();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stats = GameStats::default();

    println!("Name the marked note. {} tries per round, Ctrl-C to stop.", TRIES);
    'rounds: while running.load(Ordering::SeqCst) {
        let string = rng.gen_range(0..STRING_COUNT);
        let fret = rng.gen_range(0..=frets);
        let answer = fret_pitch(string, fret);
        log::debug!("round target: string {} fret {}", string, fret);

        let mut diagram = FretDiagram::new(frets + 1);
        diagram.mark(string, fret, "?");
        println!();
        print!("{}", diagram);
        println!("Which note is marked on the {} string?", STRING_NAMES[string]);

        let mut tries = 0;
        let correct = loop {
            if tries == TRIES {
                break false;
            }
            print!("note> ");
            io::stdout().flush()?;
            let mut line = String::new();
            match input.read_line(&mut line) {
                Ok(0) => break 'rounds,
                Ok(_) => {}
                Err(err) if err.kind() == io::ErrorKind::Interrupted => break 'rounds,
                Err(err) => return Err(err.into()),
            }
            if !running.load(Ordering::SeqCst) {
                break 'rounds;
            }
            let guess = line.trim();
            if guess.is_empty() {
                continue;
            }
            match Note::from_str(guess) {
                Ok(note) if note.pitch == answer => break true,
                Ok(note) => {
                    tries += 1;
                    if tries < TRIES {
                        println!("no, not {} ({} tries left)", note.name(), TRIES - tries);
                    }
                }
                Err(err) => println!("{}", err),
            }
        };

        stats.rounds += 1;
        if correct {
            stats.correct += 1;
            println!("correct! it is {}", answer.name(Spelling::Sharp));
        } else {
            println!("out of tries -- the note was {}", answer.name(Spelling::Sharp));
        }
        println!(
            "score: {}/{} ({:.0}%)",
            stats.correct,
            stats.rounds,
            stats.accuracy()
        );
    }

    if stats.rounds > 0 {
        println!();
        println!(
            "final score: {}/{} ({:.0}%)",
            stats.correct,
            stats.rounds,
            stats.accuracy()
        );
    }
    Ok(())
}
