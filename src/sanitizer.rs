/// Global title-sanitization pass.
///
/// Runs once after a scan: counts how often each series title occurs across
/// every issue, finds near-duplicate titles by Levenshtein distance, and
/// folds the lower-frequency spelling into the higher-frequency one. The pass
/// is split into an explicit plan step (produce suggestions) and an apply
/// step (rewrite by key), so the frequency table is never aliased against the
/// structures being mutated. A second pass does the same for storyline titles,
/// scoped within each series.
use crate::model::Issue;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// What a suggestion renames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SuggestionKind {
    SeriesTitle,
    EpisodeTitle,
}

/// A proposed canonicalizing rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub from: String,
    pub to: String,
    pub kind: SuggestionKind,
}

/// Length-scaled rename threshold: short titles must be near-identical,
/// longer ones get more slack.
pub fn target_distance(title: &str) -> usize {
    match title.chars().count() {
        0..=5 => 1,
        6..=8 => 2,
        9..=10 => 3,
        11..=12 => 4,
        _ => 5,
    }
}

/// Fuzzy title sanitizer
pub struct Sanitizer {
    known_titles: Vec<String>,
}

impl Sanitizer {
    pub fn new(known_titles: Vec<String>) -> Self {
        Self { known_titles }
    }

    /// Run the rename pass over all issues, in place.
    ///
    /// Returns the suggestions that were applied. Running the pass again on
    /// the same issues yields nothing new: every surviving pair of titles is
    /// either identical or further apart than its target distance.
    pub fn sanitize(&self, issues: &mut [Issue]) -> Vec<Suggestion> {
        let counts = series_counts(issues);
        let mut suggestions = self.plan(&counts, SuggestionKind::SeriesTitle);
        for suggestion in &suggestions {
            info!(
                "✏️ Renaming series '{}' -> '{}'",
                suggestion.from, suggestion.to
            );
        }
        apply_series(issues, &suggestions);

        let episode_suggestions = self.sanitize_episode_titles(issues);
        suggestions.extend(episode_suggestions);
        suggestions
    }

    /// Propose renames from a frequency table.
    ///
    /// The lower-count title folds into the higher-count one; equal counts
    /// fold the lexicographically later title into the earlier so the pass
    /// stays deterministic and idempotent. Known titles are never renamed
    /// away.
    fn plan(&self, counts: &HashMap<String, usize>, kind: SuggestionKind) -> Vec<Suggestion> {
        let mut entries: Vec<(&str, usize)> =
            counts.iter().map(|(title, n)| (title.as_str(), *n)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

        let mut suggestions = Vec::new();
        for &(to, to_count) in &entries {
            for &(from, from_count) in &entries {
                if from == to {
                    continue;
                }
                if self.known_titles.iter().any(|known| known == from) {
                    continue;
                }
                let folds = from_count < to_count || (from_count == to_count && from > to);
                if !folds {
                    continue;
                }
                if strsim::levenshtein(to, from) <= target_distance(from) {
                    debug!("Suggesting rename '{}' -> '{}' ({:?})", from, to, kind);
                    suggestions.push(Suggestion {
                        from: from.to_string(),
                        to: to.to_string(),
                        kind,
                    });
                }
            }
        }
        suggestions
    }

    /// Storyline-title pass, scoped within each (already sanitized) series
    fn sanitize_episode_titles(&self, issues: &mut [Issue]) -> Vec<Suggestion> {
        let mut per_series: HashMap<String, HashMap<String, usize>> = HashMap::new();
        for issue in issues.iter() {
            for episode in &issue.episodes {
                *per_series
                    .entry(episode.series.clone())
                    .or_default()
                    .entry(episode.title.clone())
                    .or_insert(0) += 1;
            }
        }

        let mut series_names: Vec<&String> = per_series.keys().collect();
        series_names.sort_unstable();

        let mut applied = Vec::new();
        for series in series_names {
            let suggestions = self.plan(&per_series[series], SuggestionKind::EpisodeTitle);
            if suggestions.is_empty() {
                continue;
            }
            for suggestion in &suggestions {
                info!(
                    "✏️ Renaming '{}' episode '{}' -> '{}'",
                    series, suggestion.from, suggestion.to
                );
            }
            apply_episode_titles(issues, series, &suggestions);
            applied.extend(suggestions);
        }
        applied
    }
}

/// Per-title occurrence counts of every episode's series across all issues
fn series_counts(issues: &[Issue]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for issue in issues {
        for episode in &issue.episodes {
            *counts.entry(episode.series.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Rewrite series titles by key. Later suggestions for the same source title
/// overwrite earlier ones, so the last planned rename wins.
fn apply_series(issues: &mut [Issue], suggestions: &[Suggestion]) {
    let renames: HashMap<&str, &str> = suggestions
        .iter()
        .map(|s| (s.from.as_str(), s.to.as_str()))
        .collect();
    if renames.is_empty() {
        return;
    }
    for issue in issues.iter_mut() {
        for episode in issue.episodes.iter_mut() {
            if let Some(to) = renames.get(episode.series.as_str()) {
                episode.series = to.to_string();
            }
        }
    }
}

fn apply_episode_titles(issues: &mut [Issue], series: &str, suggestions: &[Suggestion]) {
    let renames: HashMap<&str, &str> = suggestions
        .iter()
        .map(|s| (s.from.as_str(), s.to.as_str()))
        .collect();
    for issue in issues.iter_mut() {
        for episode in issue.episodes.iter_mut() {
            if episode.series != series {
                continue;
            }
            if let Some(to) = renames.get(episode.title.as_str()) {
                episode.title = to.to_string();
            }
        }
    }
}
