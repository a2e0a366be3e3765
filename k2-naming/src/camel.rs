//! Camel-case tokenizer.
//!
//! Splits a name into runs of one character class, treating an upper-case
//! letter followed by lower-case letters as the start of a word, then
//! re-joins the lower-cased fragments with `_`.

/// Character classes, after the Unicode general categories.
///
/// Non-ASCII punctuation and symbols outside the listed ones fall into
/// `OtherSymbol`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Upper,
    Lower,
    Digit,
    OtherNumber,
    OtherLetter,
    Control,
    Whitespace,
    Connector,
    Dash,
    OpenPunctuation,
    ClosePunctuation,
    OtherPunctuation,
    Currency,
    Math,
    ModifierSymbol,
    OtherSymbol,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_uppercase() {
            CharClass::Upper
        } else if c.is_lowercase() {
            CharClass::Lower
        } else if c.is_ascii_digit() {
            CharClass::Digit
        } else if c.is_numeric() {
            CharClass::OtherNumber
        } else if c.is_alphabetic() {
            CharClass::OtherLetter
        } else if c.is_control() {
            CharClass::Control
        } else if c.is_whitespace() {
            CharClass::Whitespace
        } else {
            match c {
                '_' | '\u{203f}' | '\u{2040}' => CharClass::Connector,
                '-' | '\u{2010}'..='\u{2015}' => CharClass::Dash,
                '(' | '[' | '{' => CharClass::OpenPunctuation,
                ')' | ']' | '}' => CharClass::ClosePunctuation,
                '!' | '"' | '#' | '%' | '&' | '\'' | '*' | ',' | '.' | '/' | ':' | ';' | '?'
                | '@' | '\\' | '\u{a1}' | '\u{a7}' | '\u{b6}' | '\u{b7}' | '\u{bf}' => {
                    CharClass::OtherPunctuation
                }
                '$' | '\u{a2}'..='\u{a5}' | '\u{20a0}'..='\u{20c0}' => CharClass::Currency,
                '+' | '<' | '=' | '>' | '|' | '~' | '\u{ac}' | '\u{b1}' | '\u{d7}' | '\u{f7}'
                | '\u{2200}'..='\u{22ff}' => CharClass::Math,
                '^' | '`' | '\u{a8}' | '\u{af}' | '\u{b4}' | '\u{b8}' => CharClass::ModifierSymbol,
                _ => CharClass::OtherSymbol,
            }
        }
    }
}

/// Split `input` into character-class runs with camel-case word boundaries.
///
/// `"URLForImage"` yields `["URL", "For", "Image"]`, `"a11"` yields
/// `["a", "11"]`. Underscores form their own fragments.
pub fn split_camel_case(input: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut chars = input.char_indices();
    let Some((_, first)) = chars.next() else {
        return fragments;
    };

    let mut token_start = 0usize;
    let mut current = CharClass::of(first);
    // Byte offset of the previous character, needed to split before it.
    let mut prev_start = 0usize;

    for (pos, c) in chars {
        let class = CharClass::of(c);
        if class != current {
            if class == CharClass::Lower && current == CharClass::Upper {
                // The last upper-case letter begins the new word.
                if prev_start != token_start {
                    fragments.push(&input[token_start..prev_start]);
                    token_start = prev_start;
                }
            } else {
                fragments.push(&input[token_start..pos]);
                token_start = pos;
            }
            current = class;
        }
        prev_start = pos;
    }
    fragments.push(&input[token_start..]);
    fragments
}

/// Convert a camel-case name to lower-case words separated by `_`.
///
/// Underscores are removed from every fragment and blank fragments are
/// dropped, so the output never has leading, trailing or doubled
/// separators.
///
/// ```
/// use k2_naming::camel::to_snake_case;
///
/// assert_eq!(to_snake_case("imageURL"), "image_url");
/// assert_eq!(to_snake_case("URLForImage"), "url_for_image");
/// assert_eq!(to_snake_case("a11"), "a_11");
/// ```
pub fn to_snake_case(input: &str) -> String {
    split_camel_case(input)
        .into_iter()
        .map(|fragment| fragment.replace('_', ""))
        .filter(|fragment| !is_blank(fragment))
        .map(|fragment| fragment.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Blank means only control characters and ASCII spaces; a no-break
/// space is kept.
fn is_blank(fragment: &str) -> bool {
    fragment.chars().all(|c| c <= ' ')
}
