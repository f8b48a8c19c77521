//! Version tag parsing.

pub mod parse;

pub use parse::{parse_version, tag_for};
