/// Heuristic bookmark-title parser.
///
/// Turns one raw table-of-contents title into (part, series, storyline).
/// The pipeline is a fixed sequence of stages: normalize book markers, split
/// on separators, take the canonical 3-way form if it applies, otherwise
/// strip a "part N" phrase, re-split, recombine, then case-normalize. The
/// stage order matters: real-world titles are ambiguous and reordering the
/// stages changes results.
use crate::text;
use regex::Regex;

/// Structured result of parsing one bookmark title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTitle {
    /// Installment number, defaults to 1
    pub part: u32,
    /// Series name; empty when the title could not be interpreted
    pub series: String,
    /// Storyline; equals the series for eponymous episodes
    pub title: String,
}

/// Parse a raw bookmark title into part, series and storyline
pub fn parse(raw: &str) -> ParsedTitle {
    let normalized = normalize_book_markers(raw);
    let fragments = split_fragments(&normalized);

    // Canonical 3-way form: series / storyline / part fragment.
    if fragments.len() == 3 {
        return ParsedTitle {
            part: part_number(&fragments[2]),
            series: finish(&fragments[0]),
            title: finish(&fragments[1]),
        };
    }

    let (part, reduced) = match find_part_phrase(&normalized) {
        Some((part, reduced)) => (Some(part), reduced),
        None => (None, normalized),
    };

    let fragments = split_fragments(&reduced);
    let (series, title) = match fragments.as_slice() {
        [] => (String::new(), String::new()),
        // Eponymous default: a bare title is both series and storyline.
        [only] => (only.clone(), only.clone()),
        [first, second] => (first.clone(), second.clone()),
        // "Part N" sat mid-string; stitch the remainder back together.
        [first, rest @ ..] => (first.clone(), rest.join(": ")),
    };

    ParsedTitle {
        part: part.unwrap_or(1),
        series: finish(&series),
        title: finish(&title),
    }
}

/// Extract a part number from a fragment, defaulting to 1.
///
/// Best effort, not a validator: anything after the word "part" is tried as
/// digits, then as a spelled-out cardinal or ordinal up to twenty.
pub fn part_number(fragment: &str) -> u32 {
    let lower = fragment.to_lowercase();
    let Some(idx) = lower.find("part") else {
        return 1;
    };
    let token = lower[idx + 4..]
        .trim()
        .trim_matches(|c: char| !c.is_alphanumeric());
    parse_part_token(token).unwrap_or(1)
}

fn parse_part_token(token: &str) -> Option<u32> {
    if let Ok(n) = token.trim().parse::<u32>() {
        return Some(n.max(1));
    }
    text::cardinal_number(token).or_else(|| text::ordinal_number(token))
}

/// Rewrite "Book <digit>" markers to their word form ("Book 2" -> "Book two")
/// with a separator colon re-inserted so split counts stay consistent with
/// titles that spell the book number out.
fn normalize_book_markers(title: &str) -> String {
    let re = Regex::new(r"(?i)\bbook\s+(\d+)").unwrap();
    re.replace_all(title, |caps: &regex::Captures| {
        let digits = &caps[1];
        match digits.parse::<u32>().ok().and_then(text::number_word) {
            Some(word) => format!(": book {}", word),
            None => format!(": book {}", digits),
        }
    })
    .into_owned()
}

/// Split a title on the fixed separator set: colon, underscore, double quote,
/// dash-space, ellipsis. Empty fragments are discarded.
fn split_fragments(title: &str) -> Vec<String> {
    let re = Regex::new(r#":|_|"|- |\.\.\.|…"#).unwrap();
    re.split(title)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Find a "part <token>" phrase anywhere in the title; return the parsed part
/// number and the title with the phrase (plus trailing punctuation) removed.
fn find_part_phrase(title: &str) -> Option<(u32, String)> {
    let re = Regex::new(r"(?i)\bpart\s+(\w+)").unwrap();
    let caps = re.captures(title)?;
    let matched = caps.get(0)?;
    let part = parse_part_token(caps.get(1)?.as_str()).unwrap_or(1);

    let mut reduced = title[..matched.start()].to_string();
    reduced.push_str(title[matched.end()..].trim_start_matches(|c: char| !c.is_alphanumeric()));
    Some((part, reduced))
}

fn finish(fragment: &str) -> String {
    text::trim_non_alphanumeric(&text::title_case(fragment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_three_way_form() {
        let parsed = parse("Judge Dredd: Get Sin - Part 2");
        assert_eq!(parsed.part, 2);
        assert_eq!(parsed.series, "Judge Dredd");
        assert_eq!(parsed.title, "Get Sin");
    }

    #[test]
    fn test_eponymous_default() {
        let parsed = parse("Cover");
        assert_eq!(parsed.part, 1);
        assert_eq!(parsed.series, "Cover");
        assert_eq!(parsed.title, "Cover");
    }

    #[test]
    fn test_book_marker_normalization() {
        let parsed = parse("Savage: Book 10: The Marze Murderer - Part 2");
        assert_eq!(parsed.part, 2);
        assert_eq!(parsed.series, "Savage");
        assert_eq!(parsed.title, "Book Ten: The Marze Murderer");
    }

    #[test]
    fn test_parenthesized_part_marker() {
        let parsed = parse("Anderson, Psi-Division: Dead End (Part 1)");
        assert_eq!(parsed.part, 1);
        assert_eq!(parsed.series, "Anderson, Psi-division");
        assert_eq!(parsed.title, "Dead End");
    }

    #[test]
    fn test_spelled_out_part_word() {
        let parsed = parse("Zenith: Phase One Part Three");
        assert_eq!(parsed.part, 3);
        assert_eq!(parsed.series, "Zenith");
        assert_eq!(parsed.title, "Phase One");
    }

    #[test]
    fn test_underscore_and_ellipsis_separators() {
        let parsed = parse("Tharg The Mighty_Thrill Sucker");
        assert_eq!(parsed.series, "Tharg The Mighty");
        assert_eq!(parsed.title, "Thrill Sucker");

        let parsed = parse("Meltdown Man...The End");
        assert_eq!(parsed.series, "Meltdown Man");
        assert_eq!(parsed.title, "The End");
    }

    #[test]
    fn test_part_mid_string_recombination() {
        let parsed = parse("Nikolai Dante: Tsar Wars Part 2 - The Syndicate: Moscow");
        assert_eq!(parsed.part, 2);
        assert_eq!(parsed.series, "Nikolai Dante");
        assert_eq!(parsed.title, "Tsar Wars The Syndicate: Moscow");
    }

    #[test]
    fn test_part_always_at_least_one() {
        for title in [
            "Cover",
            "Future Shocks: Gateway",
            "Savage: Book 3: Rise Like Lions - Part 0",
            "Ace Trucking Co: Park 9",
        ] {
            let parsed = parse(title);
            assert!(parsed.part >= 1, "part must never be 0 for {title}");
            assert!(
                !parsed.title.is_empty(),
                "storyline must be non-empty for {title}"
            );
        }
    }

    #[test]
    fn test_part_number_extractor() {
        assert_eq!(part_number("Part 2"), 2);
        assert_eq!(part_number("part twelve"), 12);
        assert_eq!(part_number("PART TWENTY"), 20);
        assert_eq!(part_number("no marker here"), 1);
        assert_eq!(part_number("Part unknowable"), 1);
        assert_eq!(part_number(""), 1);
    }
}
