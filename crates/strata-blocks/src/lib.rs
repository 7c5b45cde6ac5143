//! Terrain materials and block matching.
#![forbid(unsafe_code)]

pub mod matcher;
pub mod types;

pub use matcher::BlockMatcher;
pub use types::Block;
