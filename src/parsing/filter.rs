/// Inclusion filter for parsed episodes.
///
/// Rejects caller-listed series outright, then screens both series and
/// storyline against a fixed vocabulary of non-story page types. The fuzzy
/// check uses a fixed distance threshold regardless of string length: it
/// exists to catch OCR and typo variants of this small vocabulary, not to do
/// general fuzzy series matching.
use crate::text;

/// Page types that are not story installments
const NON_STORY_PAGES: [&str; 15] = [
    "Cover",
    "Nerve Centre",
    "Pin-up",
    "Feature",
    "Input",
    "Output",
    "Droid Life",
    "Star Scan",
    "Gallery",
    "Poster",
    "Tribute",
    "Obituary",
    "Crossword",
    "Advertisement",
    "Thrill-Power",
];

/// Fixed fuzzy-match threshold against the non-story vocabulary
const NEAR_MISS_DISTANCE: usize = 5;

/// Decide whether a parsed (series, storyline) pair is a story episode
pub fn include(skip_series: &[String], series: &str, title: &str) -> bool {
    if skip_series.iter().any(|skipped| skipped == series) {
        return false;
    }

    for phrase in NON_STORY_PAGES {
        let phrase_lower = phrase.to_lowercase();
        for field in [series, title] {
            if text::contains_word(field, phrase) {
                return false;
            }
            if strsim::levenshtein(&phrase_lower, &field.to_lowercase()) < NEAR_MISS_DISTANCE {
                return false;
            }
        }
    }

    true
}
