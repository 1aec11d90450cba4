use crate::fretboard::pitch::{Note, PitchClass};

/// Fixed chord templates: semitone offsets from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordQuality {
    Major,
    Minor,
    Seventh,
    MajorSeventh,
    MinorSeventh,
    Augmented,
    Diminished,
}

impl ChordQuality {
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Seventh => &[0, 4, 7, 10],
            ChordQuality::MajorSeventh => &[0, 4, 7, 11],
            ChordQuality::MinorSeventh => &[0, 3, 7, 10],
            ChordQuality::Augmented => &[0, 4, 8],
            ChordQuality::Diminished => &[0, 3, 6],
        }
    }

    /// Suffix used in the "Chord: CMaj -- ..." header line.
    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "Maj",
            ChordQuality::Minor => "Min",
            ChordQuality::Seventh => "7",
            ChordQuality::MajorSeventh => "Maj7",
            ChordQuality::MinorSeventh => "Min7",
            ChordQuality::Augmented => "Aug",
            ChordQuality::Diminished => "Dim",
        }
    }
}

/// Scales as step patterns: each entry is the distance from the previous
/// degree, the first always 0 so the root is included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    DiatonicMajor,
    DiatonicMinor,
    PentatonicMajor,
    PentatonicMinor,
}

impl ScaleKind {
    pub fn new(diatonic: bool, minor: bool) -> ScaleKind {
        match (diatonic, minor) {
            (true, false) => ScaleKind::DiatonicMajor,
            (true, true) => ScaleKind::DiatonicMinor,
            (false, false) => ScaleKind::PentatonicMajor,
            (false, true) => ScaleKind::PentatonicMinor,
        }
    }

    pub fn steps(self) -> &'static [u8] {
        match self {
            // diatonic major is WWHWWW from the root
            ScaleKind::DiatonicMajor => &[0, 2, 2, 1, 2, 2, 2],
            // natural minor WHWWHW
            ScaleKind::DiatonicMinor => &[0, 2, 1, 2, 2, 1, 2],
            ScaleKind::PentatonicMajor => &[0, 2, 2, 3, 2],
            ScaleKind::PentatonicMinor => &[0, 3, 2, 2, 3],
        }
    }
}

pub fn chord_pitches(root: PitchClass, quality: ChordQuality) -> Vec<PitchClass> {
    quality
        .intervals()
        .iter()
        .map(|&offset| root.transpose(i32::from(offset)))
        .collect()
}

/// Scale degrees in order, walking the cumulative step pattern.
pub fn scale_pitches(root: PitchClass, kind: ScaleKind) -> Vec<PitchClass> {
    let mut degree = root;
    kind.steps()
        .iter()
        .map(|&step| {
            degree = degree.transpose(i32::from(step));
            degree
        })
        .collect()
}

pub fn resolve_chord(root: Note, quality: ChordQuality) -> Vec<&'static str> {
    chord_pitches(root.pitch, quality)
        .into_iter()
        .map(|pitch| pitch.name(root.spelling))
        .collect()
}

pub fn resolve_scale(root: Note, kind: ScaleKind) -> Vec<&'static str> {
    scale_pitches(root.pitch, kind)
        .into_iter()
        .map(|pitch| pitch.name(root.spelling))
        .collect()
}

/// One row of a key's diatonic chord table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeChord {
    pub numeral: &'static str,
    pub name: String,
    pub tones: Vec<&'static str>,
}

static MAJOR_DEGREES: [(&str, u8, ChordQuality); 7] = [
    ("I", 0, ChordQuality::Major),
    ("ii", 2, ChordQuality::Minor),
    ("iii", 4, ChordQuality::Minor),
    ("IV", 5, ChordQuality::Major),
    ("V", 7, ChordQuality::Major),
    ("vi", 9, ChordQuality::Minor),
    ("vii0", 11, ChordQuality::Diminished),
];

static MINOR_DEGREES: [(&str, u8, ChordQuality); 7] = [
    ("i", 0, ChordQuality::Minor),
    ("ii0", 2, ChordQuality::Diminished),
    ("III", 3, ChordQuality::Major),
    ("iv", 5, ChordQuality::Minor),
    ("v", 7, ChordQuality::Minor),
    ("VI", 8, ChordQuality::Major),
    ("VII", 10, ChordQuality::Major),
];

/// The seven chords a diatonic key yields, one per scale degree.
pub fn key_chords(root: Note, minor: bool) -> Vec<DegreeChord> {
    let degrees = if minor { &MINOR_DEGREES } else { &MAJOR_DEGREES };
    degrees
        .iter()
        .map(|&(numeral, offset, quality)| {
            let degree_root = root.pitch.transpose(i32::from(offset));
            let marker = match quality {
                ChordQuality::Minor => "m",
                ChordQuality::Diminished => "dim",
                _ => "",
            };
            DegreeChord {
                numeral,
                name: format!("{}{}", degree_root.name(root.spelling), marker),
                tones: chord_pitches(degree_root, quality)
                    .into_iter()
                    .map(|pitch| pitch.name(root.spelling))
                    .collect(),
            }
        })
        .collect()
}
