use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CHUNK_SIZE_X, CHUNK_SIZE_Z};

/// Largest `|cx|` or `|cz|` that can be generated. Block positions of the chunk
/// and the lattice samples one chunk past it must fit in `i32`.
pub const MAX_CHUNK_COORD: i32 = i32::MAX / CHUNK_SIZE_X as i32 - 1;

/// Horizontal chunk position. Chunks span the full world height, so there is
/// no vertical component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cz: self.cz + dz,
        }
    }

    /// Whether every block and lattice sample of this chunk has an `i32`
    /// world position.
    #[inline]
    pub fn in_range(self) -> bool {
        (-MAX_CHUNK_COORD..=MAX_CHUNK_COORD).contains(&self.cx)
            && (-MAX_CHUNK_COORD..=MAX_CHUNK_COORD).contains(&self.cz)
    }

    /// World block position of local (0, 0). Only meaningful for coords that
    /// are [`in_range`](Self::in_range).
    #[inline]
    pub fn origin(self) -> (i32, i32) {
        (
            self.cx * CHUNK_SIZE_X as i32,
            self.cz * CHUNK_SIZE_Z as i32,
        )
    }

    /// Chunk containing world block column (wx, wz).
    #[inline]
    pub fn containing(wx: i32, wz: i32) -> Self {
        Self {
            cx: wx.div_euclid(CHUNK_SIZE_X as i32),
            cz: wz.div_euclid(CHUNK_SIZE_Z as i32),
        }
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cz)
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.cx, self.cz)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseChunkCoordError {
    #[error("expected chunk coordinate as `X,Z`, got `{0}`")]
    Malformed(String),
    #[error("chunk coordinate {0} is outside ±{max}", max = MAX_CHUNK_COORD)]
    OutOfRange(ChunkCoord),
}

impl FromStr for ChunkCoord {
    type Err = ParseChunkCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseChunkCoordError::Malformed(s.to_string());
        let (x, z) = s.split_once(',').ok_or_else(err)?;
        let cx = x.trim().parse().map_err(|_| err())?;
        let cz = z.trim().parse().map_err(|_| err())?;
        let coord = Self::new(cx, cz);
        if !coord.in_range() {
            return Err(ParseChunkCoordError::OutOfRange(coord));
        }
        Ok(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_and_containing_agree() {
        let c = ChunkCoord::new(-3, 7);
        let (ox, oz) = c.origin();
        assert_eq!((ox, oz), (-48, 112));
        assert_eq!(ChunkCoord::containing(ox, oz), c);
        assert_eq!(ChunkCoord::containing(ox + 15, oz + 15), c);
        assert_eq!(ChunkCoord::containing(ox - 1, oz), c.offset(-1, 0));
    }

    #[test]
    fn parses_pairs() {
        assert_eq!("4,-2".parse::<ChunkCoord>(), Ok(ChunkCoord::new(4, -2)));
        assert_eq!(" 0 , 9 ".parse::<ChunkCoord>(), Ok(ChunkCoord::new(0, 9)));
        assert!("4".parse::<ChunkCoord>().is_err());
        assert!("a,b".parse::<ChunkCoord>().is_err());
    }

    #[test]
    fn far_coordinates_are_rejected() {
        assert_eq!(
            "200000000,0".parse::<ChunkCoord>(),
            Err(ParseChunkCoordError::OutOfRange(ChunkCoord::new(200_000_000, 0)))
        );
        assert!(format!("0,{}", -MAX_CHUNK_COORD - 1).parse::<ChunkCoord>().is_err());
        let edge: ChunkCoord = format!("{MAX_CHUNK_COORD},{}", -MAX_CHUNK_COORD).parse().unwrap();
        assert!(edge.in_range());
        let (ox, oz) = edge.origin();
        assert!(ox.checked_add(16).is_some() && oz < 0);
    }

    #[test]
    fn every_block_column_maps_to_a_chunk_origin() {
        for w in [i32::MIN, i32::MAX] {
            let c = ChunkCoord::containing(w, w);
            assert!(!c.in_range());
            let (ox, _) = c.origin();
            assert!(ox <= w && w - ox < 16);
        }
    }
}
