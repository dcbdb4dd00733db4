//! Translation of typed words into calculator key tokens
//!
//! Keycap legends pass through unchanged. A few ASCII aliases stand in for
//! legends that are awkward to type, and a multi-digit number is expanded
//! into one key press per character, so `1234,5` presses `1 2 3 4 , 5`.

/// ASCII spellings of keycap legends
const ALIASES: &[(&str, &str)] = &[
    ("*", "×"),
    ("/", "÷"),
    ("enter", "ENTER"),
    ("backspace", "CLx"),
    ("bs", "CLx"),
    ("sqrt", "√x"),
    ("swap", "x<>y"),
    ("rdn", "R↓"),
    ("pow", "y^x"),
    ("inv", "1/x"),
];

/// Every alias, for completion
pub fn aliases() -> impl Iterator<Item = &'static str> {
    ALIASES.iter().map(|(alias, _)| *alias)
}

/// Keycap legend for an alias, or the word itself
pub fn canonical(word: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == word)
        .map_or(word, |(_, legend)| *legend)
}

fn is_number(word: &str) -> bool {
    word.chars().count() > 1 && word.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.')
}

/// Key tokens for one typed word
pub fn expand(word: &str) -> Vec<String> {
    if is_number(word) {
        word.chars().map(String::from).collect()
    } else {
        vec![canonical(word).to_string()]
    }
}

/// Key tokens for a whitespace separated line
pub fn expand_line(line: &str) -> Vec<String> {
    line.split_whitespace().flat_map(expand).collect()
}
