use std::fmt;

use serde::{Deserialize, Serialize};

/// Material written into a chunk by the density pass.
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    #[default]
    Air = 0,
    Stone = 1,
    StationaryWater = 2,
    Ice = 3,
}

impl Block {
    pub const AIR: Block = Block::Air;
    pub const COUNT: usize = 4;
    pub const ALL: [Block; Block::COUNT] =
        [Block::Air, Block::Stone, Block::StationaryWater, Block::Ice];

    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn from_id(id: u8) -> Option<Block> {
        match id {
            0 => Some(Block::Air),
            1 => Some(Block::Stone),
            2 => Some(Block::StationaryWater),
            3 => Some(Block::Ice),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Block::Air => "air",
            Block::Stone => "stone",
            Block::StationaryWater => "stationary_water",
            Block::Ice => "ice",
        }
    }

    pub fn by_name(name: &str) -> Option<Block> {
        Block::ALL.into_iter().find(|b| b.name() == name)
    }

    /// Blocks an entity can stand on.
    #[inline]
    pub const fn is_solid(self) -> bool {
        matches!(self, Block::Stone | Block::Ice)
    }

    #[inline]
    pub const fn is_liquid(self) -> bool {
        matches!(self, Block::StationaryWater)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
