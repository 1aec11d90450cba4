use std::str::FromStr;

use thiserror::Error;

use crate::fretboard::neck::{CellFullError, FretDiagram, STRING_COUNT};
use crate::fretboard::pitch::PitchClass;

/// Fret of a pitch class on the low-E string. The open low E sits at
/// index 7 of the A-rooted tables, so +5 realigns index 0 with the nut.
pub fn root_fret(pitch: PitchClass) -> usize {
    usize::from((pitch.value() + 5) % 12)
}

/// Re-base a mod-12 candidate into the octave above the root fret.
fn rebase_above(candidate: usize, root: usize) -> usize {
    if candidate <= root {
        candidate + 12
    } else {
        candidate
    }
}

/// Promote an anchor that lands on the open position up an octave, so no
/// shape collapses onto the nut.
fn rebase_anchor(candidate: usize) -> usize {
    if candidate == 0 {
        12
    } else {
        candidate
    }
}

/// Root, third and fifth of the major triad on every string, anchored at
/// the root's low-E fret.
///
/// The anchors come from the +9/+1/+4 offsets (the root and third
/// positions on the inner strings); the +1/+2/+3 terms are where the same
/// pitch class recurs on the neighboring string, a 5-semitone-per-string
/// standard-tuning fact.
pub fn layout_triad(root: PitchClass, min_frets: usize) -> Result<FretDiagram, CellFullError> {
    let r = root_fret(root);
    let p9 = rebase_above((r + 9) % 12, r);
    let p1 = rebase_above((r + 1) % 12, r);
    let p4 = rebase_above((r + 4) % 12, r);
    log::debug!("triad anchors for {:?}: r={} p9={} p1={} p4={}", root, r, p9, p1, p4);

    let markers: [(usize, usize, &'static str); 18] = [
        (0, r, "R"),
        (0, p4, "3"),
        (0, p4 + 3, "5"),
        (1, r, "5"),
        (1, p4 + 1, "R"),
        (1, p9, "3"),
        (2, p1, "3"),
        (2, p4, "5"),
        (2, p9, "R"),
        (3, p1 + 1, "R"),
        (3, p4 + 2, "3"),
        (3, p9, "5"),
        (4, p1 + 1, "5"),
        (4, p9 + 2, "3"),
        (4, p4 + 3, "R"),
        (5, r, "R"),
        (5, p4, "3"),
        (5, p4 + 3, "5"),
    ];

    let width = markers
        .iter()
        .map(|&(_, fret, _)| fret + 1)
        .max()
        .unwrap_or(0)
        .max(min_frets);
    let mut diagram = FretDiagram::new(width);
    for (string, fret, label) in markers {
        diagram.put(string, fret, label)?;
    }
    Ok(diagram)
}

/// The five CAGED shapes: label, anchor offset from the root fret, and the
/// open-chord grip per string (high e down to low E, None = unplayed).
static CAGED_SHAPES: [(&str, usize, [Option<usize>; STRING_COUNT]); 5] = [
    ("C", 4, [Some(0), Some(1), Some(0), Some(2), Some(3), None]),
    ("A", 7, [Some(0), Some(2), Some(2), Some(2), Some(0), None]),
    ("G", 9, [Some(3), Some(0), Some(0), Some(0), Some(2), Some(3)]),
    ("E", 0, [Some(0), Some(0), Some(1), Some(2), Some(2), Some(0)]),
    ("D", 2, [Some(2), Some(3), Some(2), Some(0), None, None]),
];

/// The five overlapping CAGED shape outlines for a root, each grip cell
/// labelled with its shape letter. Where two shapes meet on one cell both
/// letters are kept, stacked.
pub fn layout_caged(root: PitchClass, min_frets: usize) -> Result<FretDiagram, CellFullError> {
    let r = root_fret(root);
    let anchored: Vec<(&str, usize, &[Option<usize>; STRING_COUNT])> = CAGED_SHAPES
        .iter()
        .map(|(label, offset, grip)| (*label, rebase_anchor((r + offset) % 12), grip))
        .collect();
    for (label, anchor, _) in &anchored {
        log::debug!("caged shape {} for {:?} anchored at fret {}", label, root, anchor);
    }

    let width = anchored
        .iter()
        .flat_map(|(_, anchor, grip)| grip.iter().flatten().map(move |offset| anchor + offset + 1))
        .max()
        .unwrap_or(0)
        .max(min_frets);
    let mut diagram = FretDiagram::new(width);
    for (label, anchor, grip) in anchored {
        for (string, offset) in grip.iter().enumerate() {
            if let Some(offset) = offset {
                diagram.put(string, anchor + offset, label)?;
            }
        }
    }
    Ok(diagram)
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown box form '{0}'")]
pub struct UnknownFormError(pub String);

/// The five pentatonic box forms, in neck order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxForm {
    G,
    E,
    D,
    C,
    A,
}

impl BoxForm {
    pub const ALL: [BoxForm; 5] = [BoxForm::G, BoxForm::E, BoxForm::D, BoxForm::C, BoxForm::A];

    pub fn letter(self) -> &'static str {
        match self {
            BoxForm::G => "G",
            BoxForm::E => "E",
            BoxForm::D => "D",
            BoxForm::C => "C",
            BoxForm::A => "A",
        }
    }

    fn index(self) -> usize {
        match self {
            BoxForm::G => 0,
            BoxForm::E => 1,
            BoxForm::D => 2,
            BoxForm::C => 3,
            BoxForm::A => 4,
        }
    }
}

impl FromStr for BoxForm {
    type Err = UnknownFormError;

    /// Forms are addressable by shape letter or by 1-5 neck position.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "g" | "1" => Ok(BoxForm::G),
            "e" | "2" => Ok(BoxForm::E),
            "d" | "3" => Ok(BoxForm::D),
            "c" | "4" => Ok(BoxForm::C),
            "a" | "5" => Ok(BoxForm::A),
            _ => Err(UnknownFormError(s.to_string())),
        }
    }
}

pub const BOX_FRETS: usize = 5;

/// Static 6x5 pentatonic box templates, rows high e down to low E.
/// M = major root, m = relative-minor root, * = other scale tone.
static BOXES: [[[&str; BOX_FRETS]; STRING_COUNT]; 5] = [
    // G form
    [
        ["m", "", "", "M", ""],
        ["*", "", "", "*", ""],
        ["M", "", "*", "", ""],
        ["*", "", "m", "", ""],
        ["*", "", "*", "", ""],
        ["m", "", "", "M", ""],
    ],
    // E form
    [
        ["", "M", "", "*", ""],
        ["", "*", "", "m", ""],
        ["*", "", "*", "", ""],
        ["m", "", "", "M", ""],
        ["*", "", "", "*", ""],
        ["", "M", "", "*", ""],
    ],
    // D form
    [
        ["", "*", "", "*", ""],
        ["", "m", "", "", "M"],
        ["*", "", "", "*", ""],
        ["", "M", "", "*", ""],
        ["", "*", "", "m", ""],
        ["", "*", "", "*", ""],
    ],
    // C form
    [
        ["*", "", "", "*", ""],
        ["", "M", "", "*", ""],
        ["*", "", "m", "", ""],
        ["*", "", "*", "", ""],
        ["m", "", "", "M", ""],
        ["*", "", "", "*", ""],
    ],
    // A form
    [
        ["", "*", "", "m", ""],
        ["", "*", "", "*", ""],
        ["m", "", "", "M", ""],
        ["*", "", "", "*", ""],
        ["", "M", "", "*", ""],
        ["", "*", "", "m", ""],
    ],
];

/// One static box template as a 5-fret diagram. Pure table lookup.
pub fn layout_box(form: BoxForm) -> FretDiagram {
    let template = &BOXES[form.index()];
    let mut diagram = FretDiagram::new(BOX_FRETS);
    for (string, row) in template.iter().enumerate() {
        for (fret, label) in row.iter().enumerate() {
            if !label.is_empty() {
                diagram.mark(string, fret, label);
            }
        }
    }
    diagram
}

pub const BOX_ALL_FRETS: usize = 15;

/// All five boxes superimposed across one octave, authored for root E
/// (whose low-E root fret is 0, making the rotation the identity). Each
/// occupied cell names the two adjacent boxes that meet on it.
static BOX_ALL: [[&str; 12]; STRING_COUNT] = [
    ["ge", "", "ed", "", "dc", "", "", "ca", "", "ag", "", ""],
    ["ge", "", "ed", "", "", "dc", "", "ca", "", "ag", "", ""],
    ["", "ed", "", "", "dc", "", "ca", "", "", "ag", "", "ge"],
    ["", "", "ed", "", "dc", "", "ca", "", "", "ag", "", "ge"],
    ["", "", "ed", "", "dc", "", "", "ca", "", "ag", "", "ge"],
    ["ge", "", "ed", "", "dc", "", "", "ca", "", "ag", "", ""],
];

/// The superimposed box view keyed to a root: the 12-fret template rotated
/// so the patterns sit over the root's frets, then widened to 15 columns
/// by wrapping the first rotated columns onto the end.
pub fn layout_box_all(root: PitchClass) -> FretDiagram {
    let rotation = 12 - root_fret(root);
    let mut diagram = FretDiagram::new(BOX_ALL_FRETS);
    for (string, row) in BOX_ALL.iter().enumerate() {
        for fret in 0..BOX_ALL_FRETS {
            let label = row[(fret + rotation) % 12];
            if !label.is_empty() {
                diagram.mark(string, fret, label);
            }
        }
    }
    diagram
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fretboard::neck::fret_pitch;
    use crate::fretboard::pitch::SHARP_NAMES;

    fn pitch(name: &str) -> PitchClass {
        PitchClass::from_name(name).unwrap()
    }

    #[test]
    fn root_fret_aligns_with_the_low_e_string() {
        assert_eq!(root_fret(pitch("E")), 0);
        assert_eq!(root_fret(pitch("F")), 1);
        assert_eq!(root_fret(pitch("A")), 5);
        assert_eq!(root_fret(pitch("C")), 8);
    }

    #[test]
    fn triad_markers_carry_their_chord_tones() {
        for root_name in SHARP_NAMES {
            let root = pitch(root_name);
            let diagram = layout_triad(root, 0).unwrap();
            let mut seen = 0;
            for string in 0..STRING_COUNT {
                for fret in 0..diagram.frets() {
                    for label in diagram.cell(string, fret).labels() {
                        let offset = match label {
                            "R" => 0,
                            "3" => 4,
                            "5" => 7,
                            other => panic!("unexpected marker {}", other),
                        };
                        assert_eq!(fret_pitch(string, fret), root.transpose(offset));
                        seen += 1;
                    }
                }
            }
            // three chord tones on each of six strings
            assert_eq!(seen, 18);
        }
    }

    #[test]
    fn triad_markers_sit_at_or_above_the_root_fret() {
        for root_name in SHARP_NAMES {
            let root = pitch(root_name);
            let r = root_fret(root);
            let diagram = layout_triad(root, 0).unwrap();
            for string in 0..STRING_COUNT {
                for fret in 0..r {
                    assert!(diagram.cell(string, fret).is_empty());
                }
            }
        }
    }

    #[test]
    fn caged_grips_spell_the_major_chord() {
        for root_name in SHARP_NAMES {
            let root = pitch(root_name);
            let diagram = layout_caged(root, 0).unwrap();
            let chord = [root, root.transpose(4), root.transpose(7)];
            let mut stamped = 0;
            for string in 0..STRING_COUNT {
                for fret in 0..diagram.frets() {
                    for _label in diagram.cell(string, fret).labels() {
                        assert!(chord.contains(&fret_pitch(string, fret)));
                        stamped += 1;
                    }
                }
            }
            // 5 + 5 + 6 + 6 + 4 grip cells across the five shapes
            assert_eq!(stamped, 26);
        }
    }

    #[test]
    fn caged_keeps_both_labels_on_shared_cells() {
        // For root C the E and D shapes meet on the D string at fret 10,
        // and the C and D shapes share three cells near fret 12.
        let diagram = layout_caged(pitch("C"), 0).unwrap();
        assert_eq!(diagram.cell(3, 10).labels(), vec!["E", "D"]);
        assert_eq!(diagram.cell(0, 12).labels(), vec!["C", "D"]);
        assert_eq!(diagram.cell(1, 13).labels(), vec!["C", "D"]);
        assert_eq!(diagram.cell(0, 8).labels(), vec!["G", "E"]);
    }

    #[test]
    fn caged_anchor_positions_for_c() {
        // C shape promoted off the nut to fret 12; the G anchor is +9.
        let diagram = layout_caged(pitch("C"), 0).unwrap();
        assert_eq!(diagram.cell(2, 12).labels(), vec!["C", "D"]);
        assert_eq!(diagram.cell(4, 7).labels(), vec!["G"]);
        assert_eq!(diagram.cell(1, 5).labels(), vec!["A", "G"]);
    }

    #[test]
    fn box_forms_parse_by_letter_and_position() {
        assert_eq!("g".parse::<BoxForm>(), Ok(BoxForm::G));
        assert_eq!("1".parse::<BoxForm>(), Ok(BoxForm::G));
        assert_eq!("C".parse::<BoxForm>(), Ok(BoxForm::C));
        assert_eq!("4".parse::<BoxForm>(), Ok(BoxForm::C));
        assert_eq!(
            "x".parse::<BoxForm>(),
            Err(UnknownFormError("x".to_string()))
        );
        assert_eq!(
            "6".parse::<BoxForm>(),
            Err(UnknownFormError("6".to_string()))
        );
    }

    #[test]
    fn box_templates_hold_two_tones_per_string() {
        for form in BoxForm::ALL {
            let diagram = layout_box(form);
            for string in 0..STRING_COUNT {
                let marked = (0..BOX_FRETS)
                    .filter(|&fret| !diagram.cell(string, fret).is_empty())
                    .count();
                assert_eq!(marked, 2, "form {:?} string {}", form, string);
            }
        }
    }

    #[test]
    fn box_by_letter_equals_box_by_position() {
        let by_letter = layout_box("g".parse().unwrap());
        let by_position = layout_box("1".parse().unwrap());
        for string in 0..STRING_COUNT {
            for fret in 0..BOX_FRETS {
                assert_eq!(
                    by_letter.cell(string, fret),
                    by_position.cell(string, fret)
                );
            }
        }
    }

    #[test]
    fn box_all_for_e_is_the_unrotated_template() {
        let diagram = layout_box_all(pitch("E"));
        assert_eq!(diagram.frets(), BOX_ALL_FRETS);
        for (string, row) in BOX_ALL.iter().enumerate() {
            for fret in 0..BOX_ALL_FRETS {
                let expected = row[fret % 12];
                let cell = diagram.cell(string, fret);
                if expected.is_empty() {
                    assert!(cell.is_empty());
                } else {
                    assert_eq!(cell.labels(), vec![expected]);
                }
            }
        }
    }

    #[test]
    fn box_all_marks_the_pentatonic_frets_of_the_key() {
        // A major pentatonic on the low E string: frets 0 2 5 7 9.
        let diagram = layout_box_all(pitch("A"));
        let marked: Vec<usize> = (0..12)
            .filter(|&fret| !diagram.cell(5, fret).is_empty())
            .collect();
        assert_eq!(marked, vec![0, 2, 5, 7, 9]);
        // every occupied cell is a scale member
        let scale: Vec<PitchClass> = [0u8, 2, 4, 7, 9]
            .iter()
            .map(|&offset| pitch("A").transpose(i32::from(offset)))
            .collect();
        for string in 0..STRING_COUNT {
            for fret in 0..BOX_ALL_FRETS {
                if !diagram.cell(string, fret).is_empty() {
                    assert!(scale.contains(&fret_pitch(string, fret)));
                }
            }
        }
    }

    #[test]
    fn box_all_wraps_its_first_columns_onto_the_end() {
        for root_name in SHARP_NAMES {
            let diagram = layout_box_all(pitch(root_name));
            for string in 0..STRING_COUNT {
                for fret in 12..BOX_ALL_FRETS {
                    assert_eq!(
                        diagram.cell(string, fret),
                        diagram.cell(string, fret - 12)
                    );
                }
            }
        }
    }
}
