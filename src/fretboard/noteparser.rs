pub extern crate pest;
pub extern crate pest_derive;

use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "fretboard/note.pest"]
pub struct NoteParser;
