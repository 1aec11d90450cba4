/// Title-case a note token: first character uppercased, the rest lowered,
/// so "c#", "C#" and "bB" all normalize to their table form.
pub fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_up_rest_down() {
        assert_eq!(title_case("c#"), "C#");
        assert_eq!(title_case("BB"), "Bb");
        assert_eq!(title_case("eb"), "Eb");
        assert_eq!(title_case("a"), "A");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(title_case(""), "");
    }
}
