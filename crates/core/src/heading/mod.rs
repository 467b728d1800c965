//! Level-1 heading generation.
//!
//! A note's title is its file name. [`plan`] inspects the note's heading
//! outline and decides how to make the title the note's single level-1
//! heading; [`apply`] performs that edit on the raw text.

mod rewriter;
mod types;

pub use rewriter::{apply, heading_block, plan};
pub use types::{HeadingEntry, HeadingError, RewritePlan, SkipReason};
