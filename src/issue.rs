/// Builds one Issue record from one file's raw bookmark list.
///
/// Combines the bookmark-title parser, the credits tokenizer and the
/// inclusion filter, plus a distance snap onto caller-supplied known series
/// titles for spellings the global sanitizer would otherwise miss on small
/// scans.
use crate::error::{CatalogError, Result};
use crate::model::{Episode, Issue};
use crate::parsing;
use crate::pdf::PdfEngine;
use crate::sanitizer;
use crate::text;
use std::path::Path;
use tracing::{debug, warn};

pub struct IssueBuilder {
    skip_series: Vec<String>,
    known_titles: Vec<String>,
    extension: String,
}

impl IssueBuilder {
    pub fn new(skip_series: Vec<String>, known_titles: Vec<String>) -> Self {
        Self {
            skip_series,
            known_titles,
            extension: "pdf".to_string(),
        }
    }

    /// Accept a different file extension than the default `pdf`
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().to_lowercase();
        self
    }

    /// File extension this builder accepts; the scanner filters discovery
    /// against the same value.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Build an Issue from a single file.
    ///
    /// A filename with the wrong extension is a hard error: the scanner
    /// never feeds one, so it signals a caller bug rather than bad data.
    /// Episodes whose series could not be extracted, and non-story pages,
    /// are dropped quietly.
    pub async fn build(&self, engine: &dyn PdfEngine, path: &Path) -> Result<Issue> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        if extension.as_deref() != Some(self.extension.as_str()) {
            return Err(CatalogError::UnsupportedFile(path.to_path_buf()));
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CatalogError::Path(format!("unusable filename: {}", path.display())))?
            .to_string();
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let (publication, issue_number) = parse_issue_filename(stem);

        let details = engine.bookmarks(path).await?;
        let mut episodes = Vec::new();
        for detail in details {
            let parsed = parsing::parse_bookmark_title(&detail.bookmark.title);
            if parsed.series.is_empty() {
                debug!(
                    "Odd bookmark title '{}' in {}, skipping",
                    detail.bookmark.title, filename
                );
                continue;
            }
            if !parsing::include(&self.skip_series, &parsed.series, &parsed.title) {
                debug!("⏭️ Skipping non-story page '{}'", detail.bookmark.title);
                continue;
            }
            let series = self.snap_to_known(parsed.series);

            let raw_credits = if detail.credits.is_empty() {
                match engine
                    .credits(path, detail.bookmark.page_from, detail.bookmark.page_thru)
                    .await
                {
                    Ok(raw) => raw,
                    Err(CatalogError::CreditsNotFound(..)) => String::new(),
                    Err(e) => {
                        warn!("Credits extraction failed for '{}' in {}: {}", series, filename, e);
                        String::new()
                    }
                }
            } else {
                detail.credits
            };

            episodes.push(Episode {
                series,
                title: parsed.title,
                part: parsed.part,
                first_page: detail.bookmark.page_from,
                last_page: detail.bookmark.page_thru,
                credits: parsing::parse_credits(&raw_credits),
            });
        }

        Ok(Issue {
            publication,
            issue_number,
            filename,
            episodes,
        })
    }

    /// Snap a parsed series onto a known title when it is within the
    /// length-scaled rename distance of one.
    fn snap_to_known(&self, series: String) -> String {
        for known in &self.known_titles {
            if known == &series {
                return series;
            }
            if strsim::levenshtein(known, &series) <= sanitizer::target_distance(&series) {
                debug!("📌 Snapping series '{}' to known title '{}'", series, known);
                return known.clone();
            }
        }
        series
    }
}

/// Derive (publication, issue number) from a filename stem.
///
/// The first standalone run of digits is the issue number and everything
/// before it is the publication, e.g. "2000AD 0366 (1984)" -> ("2000AD", 366).
/// A stem with no standalone number yields issue number 0, which marks the
/// issue as unparseable downstream.
pub fn parse_issue_filename(stem: &str) -> (String, u32) {
    let mut publication_tokens: Vec<&str> = Vec::new();
    for token in stem.split_whitespace() {
        if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(number) = token.parse::<u32>() {
                let publication = text::trim_non_alphanumeric(&publication_tokens.join(" "));
                return (publication, number);
            }
        }
        publication_tokens.push(token);
    }
    (text::trim_non_alphanumeric(stem), 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bookmark, EpisodeDetails};
    use async_trait::async_trait;

    struct CannedEngine {
        details: Vec<EpisodeDetails>,
        credits: &'static str,
    }

    #[async_trait]
    impl PdfEngine for CannedEngine {
        async fn bookmarks(&self, _path: &Path) -> Result<Vec<EpisodeDetails>> {
            Ok(self.details.clone())
        }

        async fn credits(&self, _path: &Path, page_from: u32, page_thru: u32) -> Result<String> {
            if self.credits.is_empty() {
                Err(CatalogError::CreditsNotFound(page_from, page_thru))
            } else {
                Ok(self.credits.to_string())
            }
        }
    }

    fn detail(title: &str, page_from: u32, page_thru: u32) -> EpisodeDetails {
        EpisodeDetails {
            bookmark: Bookmark {
                title: title.to_string(),
                page_from,
                page_thru,
            },
            credits: String::new(),
        }
    }

    #[test]
    fn test_parse_issue_filename() {
        assert_eq!(
            parse_issue_filename("2000AD 0366 (1984)"),
            ("2000AD".to_string(), 366)
        );
        assert_eq!(
            parse_issue_filename("Judge Dredd Megazine 201"),
            ("Judge Dredd Megazine".to_string(), 201)
        );
        assert_eq!(parse_issue_filename("0042"), (String::new(), 42));
        assert_eq!(
            parse_issue_filename("unnumbered special"),
            ("unnumbered special".to_string(), 0)
        );
    }

    #[tokio::test]
    async fn test_wrong_extension_is_a_hard_error() {
        let engine = CannedEngine {
            details: Vec::new(),
            credits: "",
        };
        let builder = IssueBuilder::new(Vec::new(), Vec::new());
        let result = builder.build(&engine, Path::new("2000AD 0001.cbz")).await;
        assert!(matches!(result, Err(CatalogError::UnsupportedFile(_))));
    }

    #[tokio::test]
    async fn test_configured_extension_replaces_default() {
        let engine = CannedEngine {
            details: vec![detail("Judge Dredd: Get Sin - Part 2", 3, 9)],
            credits: "",
        };
        let builder = IssueBuilder::new(Vec::new(), Vec::new()).with_extension("CBZ");
        assert_eq!(builder.extension(), "cbz");

        let issue = builder
            .build(&engine, Path::new("2000AD 0366.cbz"))
            .await
            .unwrap();
        assert_eq!(issue.issue_number, 366);

        // The default extension no longer passes.
        let result = builder.build(&engine, Path::new("2000AD 0366.pdf")).await;
        assert!(matches!(result, Err(CatalogError::UnsupportedFile(_))));
    }

    #[tokio::test]
    async fn test_build_filters_and_fills_credits() {
        let engine = CannedEngine {
            details: vec![
                detail("Cover", 1, 3),
                detail("Judge Dredd: Get Sin - Part 2", 3, 9),
                detail("::", 9, 12),
            ],
            credits: "Script John Wagner & Alan Grant",
        };
        let builder = IssueBuilder::new(Vec::new(), Vec::new());
        let issue = builder
            .build(&engine, Path::new("2000AD 0366.pdf"))
            .await
            .unwrap();

        assert_eq!(issue.publication, "2000AD");
        assert_eq!(issue.issue_number, 366);
        // The cover page and the unparseable bookmark are both dropped.
        assert_eq!(issue.episodes.len(), 1);

        let episode = &issue.episodes[0];
        assert_eq!(episode.series, "Judge Dredd");
        assert_eq!(episode.title, "Get Sin");
        assert_eq!(episode.part, 2);
        assert_eq!(episode.first_page, 3);
        assert_eq!(episode.last_page, 9);
        assert_eq!(
            episode.credits.get(&crate::model::Role::Script),
            Some(&vec!["John Wagner".to_string(), "Alan Grant".to_string()])
        );
    }

    #[tokio::test]
    async fn test_missing_credits_is_not_fatal() {
        let engine = CannedEngine {
            details: vec![detail("Judge Dredd: Get Sin - Part 2", 3, 9)],
            credits: "",
        };
        let builder = IssueBuilder::new(Vec::new(), Vec::new());
        let issue = builder
            .build(&engine, Path::new("2000AD 0366.pdf"))
            .await
            .unwrap();
        assert!(issue.episodes[0].credits.is_empty());
    }

    #[tokio::test]
    async fn test_series_snaps_to_known_title() {
        let engine = CannedEngine {
            details: vec![detail("Strontium Dug: The Son", 10, 16)],
            credits: "",
        };
        let builder =
            IssueBuilder::new(Vec::new(), vec!["Strontium Dog".to_string()]);
        let issue = builder
            .build(&engine, Path::new("2000AD 0366.pdf"))
            .await
            .unwrap();
        assert_eq!(issue.episodes[0].series, "Strontium Dog");
    }
}
