//! Set-based block predicates.
//!
//! A matcher is either a whitelist (only the listed blocks match) or a
//! blacklist (everything except the listed blocks matches). Reports use them
//! to decide what counts as "surface" when scanning a column from the top.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::Block;

/// Fields missing from a config table keep their [`Default`] values, so an
/// empty table is the same as no table at all.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockMatcher {
    pub blocks: HashSet<Block>,
    pub blacklist: bool,
}

impl BlockMatcher {
    pub fn all() -> Self {
        Self {
            blocks: HashSet::new(),
            blacklist: true,
        }
    }

    pub fn none() -> Self {
        Self {
            blocks: HashSet::new(),
            blacklist: false,
        }
    }

    pub fn is(block: Block) -> Self {
        Self {
            blocks: HashSet::from([block]),
            blacklist: false,
        }
    }

    pub fn is_not(block: Block) -> Self {
        Self {
            blocks: HashSet::from([block]),
            blacklist: true,
        }
    }

    pub fn include<'a, I>(blocks: I) -> Self
    where
        I: IntoIterator<Item = &'a Block>,
    {
        Self {
            blocks: blocks.into_iter().copied().collect(),
            blacklist: false,
        }
    }

    pub fn exclude<'a, I>(blocks: I) -> Self
    where
        I: IntoIterator<Item = &'a Block>,
    {
        Self {
            blocks: blocks.into_iter().copied().collect(),
            blacklist: true,
        }
    }

    /// Solid ground: stone and ice.
    pub fn solid() -> Self {
        Self::include(Block::ALL.iter().filter(|b| b.is_solid()))
    }

    #[inline]
    pub fn matches(&self, block: &Block) -> bool {
        // listed ^ blacklist: a listed block matches a whitelist only.
        self.blocks.contains(block) ^ self.blacklist
    }
}

impl Default for BlockMatcher {
    fn default() -> Self {
        Self::is_not(Block::Air)
    }
}
