//! Name collation for asteroid lists
//!
//! Approximates a root-locale collation in three levels. The primary key
//! is the decomposed, case-folded name with accents stripped, where
//! whitespace sorts before punctuation, punctuation before symbols,
//! symbols before digits and digits before letters. Accents break ties
//! next, then case (lowercase first).
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

const SYMBOLS: &str = "`^+<=>|~$";

fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_ascii_punctuation() && !SYMBOLS.contains(c) {
        1
    } else if c.is_numeric() {
        3
    } else if c.is_alphabetic() {
        4
    } else {
        2
    }
}

/// Base characters of `s`, accents removed
fn base_chars(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().filter(|c| !is_combining_mark(*c))
}

fn primary_key(s: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    base_chars(s)
        .flat_map(char::to_lowercase)
        .map(|c| (char_class(c), c))
}

fn accent_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn case_key(s: &str) -> impl Iterator<Item = bool> + '_ {
    base_chars(s).map(char::is_uppercase)
}

/// Compare two names the way a locale-aware string comparison would
pub fn compare_names(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| accent_key(a).cmp(accent_key(b)))
        .then_with(|| case_key(a).cmp(case_key(b)))
        .then_with(|| a.cmp(b))
}
