/// PDF engine collaborator boundary.
///
/// The cataloguing core only needs two operations from a PDF engine: the
/// table-of-contents bookmarks of a file, and best-effort text for a page
/// range that may contain a credits block. `MutoolEngine` implements the
/// contract by shelling out to the `mutool` command-line tool.
use crate::error::{CatalogError, Result};
use crate::model::{Bookmark, EpisodeDetails};
use async_trait::async_trait;
use regex::Regex;
use std::path::Path;
use tracing::{debug, warn};

/// Operations the catalog requires from a PDF engine
#[async_trait]
pub trait PdfEngine: Send + Sync {
    /// One entry per table-of-contents bookmark, with 1-indexed page ranges.
    /// `page_thru` is the next bookmark's start page, or the document's final
    /// page for the last entry.
    async fn bookmarks(&self, path: &Path) -> Result<Vec<EpisodeDetails>>;

    /// Best-effort credits text within the given page range.
    /// `CatalogError::CreditsNotFound` is a valid, non-fatal outcome.
    async fn credits(&self, path: &Path, page_from: u32, page_thru: u32) -> Result<String>;
}

/// PDF engine backed by the `mutool` command-line tool
#[derive(Clone)]
pub struct MutoolEngine {
    binary: String,
}

impl MutoolEngine {
    pub fn new() -> Self {
        Self {
            binary: "mutool".to_string(),
        }
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    async fn page_count(&self, path: &str) -> Result<u32> {
        let output = tokio::process::Command::new(&self.binary)
            .args(["info", path])
            .output()
            .await?;
        if !output.status.success() {
            return Err(CatalogError::Engine(format!("mutool info failed for {}", path)));
        }
        let text = String::from_utf8_lossy(&output.stdout);
        let pages = crate::text::capture(r"Pages:\s*(?P<pages>\d+)", &text, "pages")
            .and_then(|m| m.parse().ok())
            .unwrap_or(0);
        Ok(pages)
    }
}

impl Default for MutoolEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PdfEngine for MutoolEngine {
    async fn bookmarks(&self, path: &Path) -> Result<Vec<EpisodeDetails>> {
        let path_str = path
            .to_str()
            .ok_or_else(|| CatalogError::Path(format!("non-UTF8 path: {}", path.display())))?;

        let output = tokio::process::Command::new(&self.binary)
            .args(["show", path_str, "outline"])
            .output()
            .await?;
        if !output.status.success() {
            return Err(CatalogError::Engine(format!(
                "mutool outline failed for {}",
                path.display()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        let page_count = self.page_count(path_str).await?;
        let details = parse_outline(&text, page_count);
        debug!("📑 {} bookmarks in {}", details.len(), path.display());
        Ok(details)
    }

    async fn credits(&self, path: &Path, page_from: u32, page_thru: u32) -> Result<String> {
        let path_str = path
            .to_str()
            .ok_or_else(|| CatalogError::Path(format!("non-UTF8 path: {}", path.display())))?;

        let output = tokio::process::Command::new(&self.binary)
            .args([
                "draw",
                "-F",
                "text",
                "-o",
                "-",
                path_str,
                &format!("{}-{}", page_from, page_thru),
            ])
            .output()
            .await?;
        if !output.status.success() {
            warn!(
                "mutool draw failed for {} pages {} - {}",
                path.display(),
                page_from,
                page_thru
            );
            return Err(CatalogError::CreditsNotFound(page_from, page_thru));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        extract_credits_block(&text).ok_or(CatalogError::CreditsNotFound(page_from, page_thru))
    }
}

/// Parse `mutool show <file> outline` output into bookmarked page ranges
fn parse_outline(text: &str, page_count: u32) -> Vec<EpisodeDetails> {
    let re = Regex::new(r#""(?P<title>[^"]*)"\s+#(?:page=)?(?P<page>\d+)"#).unwrap();
    let entries: Vec<(String, u32)> = text
        .lines()
        .filter_map(|line| {
            let caps = re.captures(line)?;
            Some((caps["title"].to_string(), caps["page"].parse().ok()?))
        })
        .collect();

    entries
        .iter()
        .enumerate()
        .map(|(i, (title, page_from))| {
            let page_thru = entries
                .get(i + 1)
                .map(|(_, next_from)| *next_from)
                .unwrap_or_else(|| page_count.max(*page_from));
            EpisodeDetails {
                bookmark: Bookmark {
                    title: title.clone(),
                    page_from: *page_from,
                    page_thru,
                },
                credits: String::new(),
            }
        })
        .collect()
}

/// Pick the lines of extracted page text that look like a credits block
fn extract_credits_block(text: &str) -> Option<String> {
    let role_re = Regex::new(r"(?i)\b(script|art|colours|colors|letters)\b").unwrap();
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| role_re.is_match(line))
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_outline_page_ranges() {
        let outline = concat!(
            "+\t\"Cover\"\t#page=1\n",
            "+\t\"Judge Dredd: Get Sin - Part 1\"\t#page=3\n",
            "+\t\"Savage: Book 1: Taking Liberties\"\t#page=9\n",
        );
        let details = parse_outline(outline, 32);

        assert_eq!(details.len(), 3);
        assert_eq!(details[0].bookmark.title, "Cover");
        assert_eq!(details[0].bookmark.page_from, 1);
        assert_eq!(details[0].bookmark.page_thru, 3);
        assert_eq!(details[1].bookmark.page_thru, 9);
        // Last entry runs to the end of the document.
        assert_eq!(details[2].bookmark.page_thru, 32);
    }

    #[test]
    fn test_parse_outline_bare_page_references() {
        let details = parse_outline("|\t\"Tharg's Future Shocks\"\t#12\n", 20);
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].bookmark.page_from, 12);
        assert_eq!(details[0].bookmark.page_thru, 20);
    }

    #[test]
    fn test_parse_outline_ignores_noise() {
        assert!(parse_outline("no outline here\n", 10).is_empty());
    }

    #[test]
    fn test_extract_credits_block() {
        let page = "GET SIN\nSCRIPT John Wagner\nART Carlos Ezquerra\nsome story text\n";
        assert_eq!(
            extract_credits_block(page).as_deref(),
            Some("SCRIPT John Wagner ART Carlos Ezquerra")
        );
        assert!(extract_credits_block("just story text").is_none());
    }
}
