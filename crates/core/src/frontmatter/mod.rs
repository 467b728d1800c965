//! Frontmatter location, parsing, and serialization.
//!
//! This module provides functionality to:
//! - Locate the YAML frontmatter block at the start of a note
//! - Parse it into an order-preserving mapping
//! - Write a modified mapping back without disturbing the note body

pub mod parser;
pub mod serializer;
pub mod types;

pub use parser::{FrontmatterParseError, locate, parse};
pub use serializer::{replace_frontmatter, to_yaml};
pub use types::{Frontmatter, FrontmatterSpan, ParsedDocument};
