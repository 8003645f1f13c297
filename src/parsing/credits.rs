/// Credits-block tokenizer.
///
/// Splits a raw credits blob on whitespace and walks the tokens with a
/// current-role state machine: a token that parses as a role flushes the
/// accumulated names under the previous role and switches; anything else is
/// part of a creator's name. Unrecognized role words are therefore harmless,
/// they just become name text.
use crate::model::{Credits, Role};
use crate::text;

/// Parse a raw credits text blob into a role -> creators mapping
pub fn parse(raw: &str) -> Credits {
    let mut credits = Credits::new();
    let mut current = Role::Unknown;
    let mut names: Vec<&str> = Vec::new();

    for token in raw.split_whitespace() {
        match token.parse::<Role>() {
            Ok(role) if role != current => {
                flush(&mut credits, current, &mut names);
                current = role;
            }
            _ => names.push(token),
        }
    }
    flush(&mut credits, current, &mut names);

    credits
}

/// Flush accumulated name tokens under a role: join, title-case, then split
/// on "&" into individual trimmed creators.
fn flush(credits: &mut Credits, role: Role, names: &mut Vec<&str>) {
    if names.is_empty() {
        return;
    }
    let joined = text::title_case(&names.join(" "));
    let creators: Vec<String> = joined
        .split('&')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    if !creators.is_empty() {
        credits.entry(role).or_default().extend(creators);
    }
    names.clear();
}
