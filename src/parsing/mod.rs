/// Bookmark and credits parsing pipeline
///
/// This module turns raw table-of-contents titles and on-page credit text
/// into structured episode metadata, and decides which parsed episodes are
/// actual story installments.

pub mod bookmark;
pub mod credits;
pub mod filter;

pub use bookmark::{parse as parse_bookmark_title, ParsedTitle};
pub use credits::parse as parse_credits;
pub use filter::include;
