use regex::Regex;

/// String heuristics shared by the bookmark and credits parsers.
///
/// These are deliberately small, deterministic helpers; the interesting
/// behaviour lives in how the parsers combine them.

const CARDINALS: [&str; 20] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen",
    "eighteen", "nineteen", "twenty",
];

const ORDINALS: [&str; 20] = [
    "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth",
    "ninth", "tenth", "eleventh", "twelfth", "thirteenth", "fourteenth", "fifteenth",
    "sixteenth", "seventeenth", "eighteenth", "nineteenth", "twentieth",
];

/// Convert a spelled-out cardinal ("one".."twenty") to its number
pub fn cardinal_number(word: &str) -> Option<u32> {
    let word = word.trim().to_lowercase();
    CARDINALS.iter().position(|c| *c == word).map(|i| i as u32 + 1)
}

/// Convert a spelled-out ordinal ("first".."twentieth") to its number
pub fn ordinal_number(word: &str) -> Option<u32> {
    let word = word.trim().to_lowercase();
    ORDINALS.iter().position(|o| *o == word).map(|i| i as u32 + 1)
}

/// Convert a small number back to its cardinal word
pub fn number_word(n: u32) -> Option<&'static str> {
    if (1..=20).contains(&n) {
        Some(CARDINALS[(n - 1) as usize])
    } else {
        None
    }
}

/// Case-insensitive whole-word containment check
pub fn contains_word(haystack: &str, phrase: &str) -> bool {
    let pattern = format!(r"(?i)\b{}\b", regex::escape(phrase));
    Regex::new(&pattern)
        .map(|re| re.is_match(haystack))
        .unwrap_or(false)
}

/// Extract a named capture group from text
pub fn capture<'t>(pattern: &str, text: &'t str, group: &str) -> Option<&'t str> {
    let re = Regex::new(pattern).ok()?;
    re.captures(text)?.name(group).map(|m| m.as_str())
}

/// Title-case a phrase word by word.
///
/// Exceptions: "of" and "vs" stay lowercase, short roman numerals and dotted
/// initialisms (S.T.A.R.S) are uppercased, the literal sequence "abc" becomes
/// "ABC", and a capital letter sitting directly after a digit goes back down
/// ("3rillers", not "3Rillers").
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn case_word(word: &str) -> String {
    // Surrounding punctuation is carried through unchanged; the casing rules
    // only look at the bare word between the first and last alphanumeric.
    let Some(start) = word.find(|c: char| c.is_alphanumeric()) else {
        return word.to_string();
    };
    let last = word
        .rfind(|c: char| c.is_alphanumeric())
        .unwrap_or(word.len() - 1);
    let end = last + word[last..].chars().next().map_or(1, char::len_utf8);

    let mut out = word[..start].to_string();
    out.push_str(&case_core(&word[start..end]));
    out.push_str(&word[end..]);
    out
}

fn case_core(core: &str) -> String {
    let lower = core.to_lowercase();
    if lower == "of" || lower == "vs" {
        return lower;
    }
    if lower == "abc" {
        return core.to_uppercase();
    }
    if is_roman_numeral(&lower) || is_dotted_initialism(core) {
        return core.to_uppercase();
    }

    let mut out = String::with_capacity(core.len());
    let mut capitalized = false;
    let mut prev: Option<char> = None;
    for c in core.chars() {
        if !capitalized && c.is_alphabetic() {
            if prev.map_or(false, |p| p.is_ascii_digit()) {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            capitalized = true;
        } else {
            out.extend(c.to_lowercase());
        }
        prev = Some(c);
    }
    out
}

fn is_roman_numeral(lower: &str) -> bool {
    (1..=4).contains(&lower.len()) && lower.chars().all(|c| matches!(c, 'i' | 'v' | 'x'))
}

fn is_dotted_initialism(core: &str) -> bool {
    core.contains('.') && core.chars().all(|c| c.is_ascii_alphabetic() || c == '.')
}

/// Trim non-alphanumeric characters from both ends of a title.
///
/// A leading apostrophe and a trailing period or exclamation mark are part of
/// the title and survive the trim.
pub fn trim_non_alphanumeric(text: &str) -> String {
    let mut s = text.trim();
    while let Some(c) = s.chars().next() {
        if c.is_alphanumeric() || c == '\'' {
            break;
        }
        s = &s[c.len_utf8()..];
    }
    while let Some(c) = s.chars().last() {
        if c.is_alphanumeric() || c == '.' || c == '!' {
            break;
        }
        s = &s[..s.len() - c.len_utf8()];
    }
    s.to_string()
}
