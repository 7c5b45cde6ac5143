use strata_blocks::Block;

pub const SEA_LEVEL: i32 = 63;

const ICE_TEMPERATURE: f64 = 0.5;

/// Material for one block. Order matters: solid density wins, then the ice
/// skin on the sea surface, then water at or below sea level.
pub fn select_block(density: f64, temperature: f64, y: i32) -> Block {
    if density > 0.0 {
        Block::Stone
    } else if y == SEA_LEVEL && temperature < ICE_TEMPERATURE {
        Block::Ice
    } else if y <= SEA_LEVEL {
        Block::StationaryWater
    } else {
        Block::Air
    }
}
