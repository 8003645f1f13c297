use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// A titled page-range marker from a file's table of contents.
///
/// Page numbers are 1-indexed; `page_thru` is the start of the next bookmark,
/// or the final page of the document for the last entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub title: String,
    pub page_from: u32,
    pub page_thru: u32,
}

/// Raw per-bookmark material handed to the issue builder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeDetails {
    pub bookmark: Bookmark,
    /// Raw credits text believed to cover this bookmark's pages (may be empty)
    pub credits: String,
}

/// Creative role in a credits block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Unknown,
    Script,
    Art,
    Colours,
    Letters,
}

impl FromStr for Role {
    type Err = CatalogError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.to_lowercase().as_str() {
            "script" => Ok(Role::Script),
            "art" => Ok(Role::Art),
            "colours" | "colors" => Ok(Role::Colours),
            "letters" => Ok(Role::Letters),
            other => Err(CatalogError::UnknownRole(other.to_string())),
        }
    }
}

/// Role to ordered creator names
pub type Credits = HashMap<Role, Vec<String>>;

/// One story installment within an issue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    /// Ongoing strip/serial name, e.g. "Judge Dredd"
    pub series: String,
    /// Storyline within the series
    pub title: String,
    /// Installment number, never 0
    pub part: u32,
    pub first_page: u32,
    pub last_page: u32,
    pub credits: Credits,
}

impl Episode {
    /// Human-readable title for exports and bookmarks
    pub fn display_title(&self) -> String {
        let base = if self.series == self.title {
            self.series.clone()
        } else {
            format!("{}: {}", self.series, self.title)
        };
        if self.part > 1 {
            format!("{} - Part {}", base, self.part)
        } else {
            base
        }
    }
}

/// One scanned comic file and its extracted episodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub publication: String,
    /// Issue number within the publication; 0 means the filename could not
    /// be numbered and the issue is excluded from downstream results
    pub issue_number: u32,
    pub filename: String,
    pub episodes: Vec<Episode>,
}

/// Input record for the page-export collaborator.
///
/// Page numbers are 1-indexed and inclusive at both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPage {
    pub filename: String,
    pub page_from: u32,
    pub page_to: u32,
    pub title: String,
    pub issue_number: u32,
}
