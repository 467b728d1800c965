//! Link graph traversal.
//!
//! [`collect`] computes every file reachable from a note through links and
//! embeds, the root included. The graph itself is supplied by the caller
//! through [`LinkGraph`], so traversal never touches the file system.

mod collector;

pub use collector::{LinkGraph, LinkReference, collect, collect_with};
