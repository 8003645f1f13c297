/// Comic Cataloger
///
/// Catalogs digital comic-book issues by parsing each issue's
/// table-of-contents bookmarks into structured episode metadata, then
/// aggregating episodes across issues into continuing stories with
/// near-duplicate titles reconciled.

pub mod config;
pub mod error;
pub mod issue;
pub mod model;
pub mod parsing;
pub mod pdf;
pub mod sanitizer;
pub mod scanner;
pub mod stories;
pub mod text;

// Re-export main types for easy access
pub use crate::config::Config;
pub use crate::error::{CatalogError, Result};
pub use crate::issue::IssueBuilder;
pub use crate::model::{Bookmark, Credits, Episode, EpisodeDetails, ExportPage, Issue, Role};
pub use crate::parsing::{parse_bookmark_title, parse_credits, ParsedTitle};
pub use crate::pdf::{MutoolEngine, PdfEngine};
pub use crate::sanitizer::{Sanitizer, Suggestion, SuggestionKind};
pub use crate::scanner::DirectoryScanner;
pub use crate::stories::{aggregate, Story, StoryEpisode};
