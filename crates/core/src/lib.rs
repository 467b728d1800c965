#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

//! Core library for `nstore`: a vault of markdown notes and assets with a
//! flat store folder, link-aware renames, title headings, aliases, archiving
//! and packing of a note's link closure.

pub mod aliases;
pub mod config;
pub mod frontmatter;
pub mod graph;
pub mod heading;
pub mod ids;
pub mod metadata;
pub mod store;
pub mod vault;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
