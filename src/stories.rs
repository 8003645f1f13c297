/// Story aggregation.
///
/// A Story is a derived view grouping every episode that shares a
/// (series, storyline) pair across all scanned issues. It is recomputed from
/// the current issue set on demand and never persisted, so a sanitizer rename
/// simply moves episodes into a different story on the next aggregation.
use crate::model::{Episode, ExportPage, Issue};
use serde::Serialize;
use std::collections::HashMap;

/// One episode occurrence inside a story
#[derive(Debug, Clone, Serialize)]
pub struct StoryEpisode {
    pub episode: Episode,
    pub filename: String,
    pub issue_number: u32,
}

/// All installments of one storyline across every scanned issue
#[derive(Debug, Clone, Serialize)]
pub struct Story {
    pub title: String,
    pub series: String,
    /// Kept sorted by ascending issue number
    pub episodes: Vec<StoryEpisode>,
    pub first_issue: u32,
    pub last_issue: u32,
    pub issues: Vec<u32>,
}

impl Story {
    fn new(first: StoryEpisode) -> Self {
        Self {
            title: first.episode.title.clone(),
            series: first.episode.series.clone(),
            first_issue: first.issue_number,
            last_issue: first.issue_number,
            issues: vec![first.issue_number],
            episodes: vec![first],
        }
    }

    fn add(&mut self, entry: StoryEpisode) {
        self.first_issue = self.first_issue.min(entry.issue_number);
        self.last_issue = self.last_issue.max(entry.issue_number);
        self.issues.push(entry.issue_number);
        let position = self
            .episodes
            .partition_point(|existing| existing.issue_number <= entry.issue_number);
        self.episodes.insert(position, entry);
    }

    /// Render the story's issue numbers as compact comma-separated runs,
    /// e.g. {1,2,3,7,9,10} -> "1 - 3, 7, 9 - 10".
    pub fn issue_summary(&self) -> String {
        let mut numbers = self.issues.clone();
        numbers.sort_unstable();
        numbers.dedup();

        let mut runs: Vec<(u32, u32)> = Vec::new();
        for n in numbers {
            match runs.last_mut() {
                Some((_, end)) if *end + 1 == n => *end = n,
                _ => runs.push((n, n)),
            }
        }
        runs.iter()
            .map(|(start, end)| {
                if start == end {
                    start.to_string()
                } else {
                    format!("{} - {}", start, end)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Flatten the story into the records the page-export collaborator
    /// consumes, one per episode, ordered by issue number.
    pub fn export_pages(&self) -> Vec<ExportPage> {
        self.episodes
            .iter()
            .map(|entry| ExportPage {
                filename: entry.filename.clone(),
                page_from: entry.episode.first_page,
                page_to: entry.episode.last_page,
                title: entry.episode.display_title(),
                issue_number: entry.issue_number,
            })
            .collect()
    }
}

/// Group every episode of every issue into stories.
///
/// Grouping is by exact (series, storyline) match, so this is meant to run
/// after the sanitizer has reconciled near-duplicate titles. Output is sorted
/// by series, then first issue.
pub fn aggregate(issues: &[Issue]) -> Vec<Story> {
    let mut stories: HashMap<(String, String), Story> = HashMap::new();
    for issue in issues {
        for episode in &issue.episodes {
            let entry = StoryEpisode {
                episode: episode.clone(),
                filename: issue.filename.clone(),
                issue_number: issue.issue_number,
            };
            let key = (episode.series.clone(), episode.title.clone());
            match stories.get_mut(&key) {
                Some(story) => story.add(entry),
                None => {
                    stories.insert(key, Story::new(entry));
                }
            }
        }
    }

    let mut ordered: Vec<Story> = stories.into_values().collect();
    ordered.sort_by(|a, b| {
        a.series
            .cmp(&b.series)
            .then(a.first_issue.cmp(&b.first_issue))
            .then(a.title.cmp(&b.title))
    });
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Credits;

    fn episode(series: &str, title: &str, part: u32) -> Episode {
        Episode {
            series: series.to_string(),
            title: title.to_string(),
            part,
            first_page: 3,
            last_page: 9,
            credits: Credits::new(),
        }
    }

    fn issue(number: u32, episodes: Vec<Episode>) -> Issue {
        Issue {
            publication: "2000AD".to_string(),
            issue_number: number,
            filename: format!("2000AD {:04}.pdf", number),
            episodes,
        }
    }

    fn story_with_issues(numbers: &[u32]) -> Story {
        let issues: Vec<Issue> = numbers
            .iter()
            .map(|n| issue(*n, vec![episode("Judge Dredd", "Get Sin", 1)]))
            .collect();
        aggregate(&issues).into_iter().next().unwrap()
    }

    #[test]
    fn test_aggregate_groups_by_series_and_storyline() {
        let issues = vec![
            issue(
                366,
                vec![
                    episode("Judge Dredd", "Get Sin", 1),
                    episode("Strontium Dog", "The Son", 4),
                ],
            ),
            issue(367, vec![episode("Judge Dredd", "Get Sin", 2)]),
            issue(368, vec![episode("Judge Dredd", "Traitor To His Kind", 1)]),
        ];
        let stories = aggregate(&issues);

        assert_eq!(stories.len(), 3);
        // Sorted by series then first issue.
        assert_eq!(stories[0].series, "Judge Dredd");
        assert_eq!(stories[0].title, "Get Sin");
        assert_eq!(stories[0].episodes.len(), 2);
        assert_eq!(stories[0].first_issue, 366);
        assert_eq!(stories[0].last_issue, 367);
        assert_eq!(stories[1].title, "Traitor To His Kind");
        assert_eq!(stories[2].series, "Strontium Dog");
    }

    #[test]
    fn test_episodes_sorted_by_issue_number() {
        // Issues arrive out of order; the story keeps episode order anyway.
        let issues = vec![
            issue(367, vec![episode("Judge Dredd", "Get Sin", 2)]),
            issue(365, vec![episode("Judge Dredd", "Get Sin", 1)]),
            issue(366, vec![episode("Judge Dredd", "Get Sin", 1)]),
        ];
        let story = aggregate(&issues).into_iter().next().unwrap();
        let order: Vec<u32> = story.episodes.iter().map(|e| e.issue_number).collect();
        assert_eq!(order, vec![365, 366, 367]);
        assert_eq!(story.first_issue, 365);
        assert_eq!(story.last_issue, 367);
    }

    #[test]
    fn test_issue_summary_runs() {
        assert_eq!(
            story_with_issues(&[1, 2, 3, 7, 9, 10]).issue_summary(),
            "1 - 3, 7, 9 - 10"
        );
        assert_eq!(story_with_issues(&[5]).issue_summary(), "5");
        assert_eq!(story_with_issues(&[10, 9, 3, 2, 1, 7]).issue_summary(), "1 - 3, 7, 9 - 10");
    }

    #[test]
    fn test_issue_summary_deduplicates() {
        let mut story = story_with_issues(&[1, 2]);
        story.issues.push(2);
        assert_eq!(story.issue_summary(), "1 - 2");
    }

    #[test]
    fn test_export_pages_shape() {
        let issues = vec![
            issue(367, vec![episode("Judge Dredd", "Get Sin", 2)]),
            issue(366, vec![episode("Judge Dredd", "Get Sin", 1)]),
        ];
        let story = aggregate(&issues).into_iter().next().unwrap();
        let pages = story.export_pages();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].issue_number, 366);
        assert_eq!(pages[0].filename, "2000AD 0366.pdf");
        assert_eq!(pages[0].page_from, 3);
        assert_eq!(pages[0].page_to, 9);
        assert_eq!(pages[0].title, "Judge Dredd: Get Sin");
        assert_eq!(pages[1].title, "Judge Dredd: Get Sin - Part 2");
    }
}
