use crate::lattice::{
    Inner, NoiseLattice, PIECE_HEIGHT, PIECE_WIDTH, PIECES_XZ, PIECES_Y, Piece, split_local,
};

/// `a` at `t = 0`, `b` at `t = 1`.
#[inline]
pub fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + (b - a) * t
}

/// Trilinear blend of the eight samples around `piece`.
///
/// Vertical pairs are blended first, then z, then x. With a zero `inner`
/// offset the result is exactly the piece's lower corner sample.
///
/// Panics if `piece` has no upper neighbour in the lattice; that only happens
/// when a caller's coordinate mapping is broken.
pub fn trilinear(lattice: &NoiseLattice, piece: Piece, inner: Inner) -> f64 {
    assert!(
        piece.x < PIECES_XZ && piece.z < PIECES_XZ && piece.y < PIECES_Y,
        "piece ({}, {}, {}) has no upper corner in the lattice",
        piece.x,
        piece.z,
        piece.y
    );
    debug_assert!(inner.x < PIECE_WIDTH && inner.z < PIECE_WIDTH && inner.y < PIECE_HEIGHT);

    let fx = inner.x as f64 / PIECE_WIDTH as f64;
    let fy = inner.y as f64 / PIECE_HEIGHT as f64;
    let fz = inner.z as f64 / PIECE_WIDTH as f64;

    let (x0, x1) = (piece.x, piece.x + 1);
    let (z0, z1) = (piece.z, piece.z + 1);
    let (y0, y1) = (piece.y, piece.y + 1);

    let c00 = lerp(fy, lattice.get(x0, z0, y0), lattice.get(x0, z0, y1));
    let c01 = lerp(fy, lattice.get(x0, z1, y0), lattice.get(x0, z1, y1));
    let c10 = lerp(fy, lattice.get(x1, z0, y0), lattice.get(x1, z0, y1));
    let c11 = lerp(fy, lattice.get(x1, z1, y0), lattice.get(x1, z1, y1));

    let c0 = lerp(fz, c00, c01);
    let c1 = lerp(fz, c10, c11);
    lerp(fx, c0, c1)
}

/// Interpolated value at local block (x, y, z).
#[inline]
pub fn sample_block(lattice: &NoiseLattice, x: usize, y: usize, z: usize) -> f64 {
    let (piece, inner) = split_local(x, y, z);
    trilinear(lattice, piece, inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> NoiseLattice {
        NoiseLattice::from_fn(|x, z, y| (x * 1000 + z * 100 + y) as f64)
    }

    #[test]
    fn zero_offset_returns_corner() {
        let lattice = ramp();
        let inner = Inner { x: 0, y: 0, z: 0 };
        for (px, pz, py) in [(0, 0, 0), (3, 3, 15), (1, 2, 7)] {
            let v = trilinear(&lattice, Piece { x: px, z: pz, y: py }, inner);
            assert_eq!(v, lattice.get(px, pz, py));
        }
    }

    #[test]
    fn midpoints_average_neighbours() {
        let lattice = ramp();
        // inner (2, 4, 2) is the centre of the piece
        let v = trilinear(
            &lattice,
            Piece { x: 1, z: 1, y: 1 },
            Inner { x: 2, y: 4, z: 2 },
        );
        let expected = 1.5 * 1000.0 + 1.5 * 100.0 + 1.5;
        assert!((v - expected).abs() < 1e-9);
    }

    #[test]
    #[should_panic(expected = "no upper corner")]
    fn far_edge_piece_panics() {
        let lattice = ramp();
        let _ = trilinear(&lattice, Piece { x: 4, z: 0, y: 0 }, Inner { x: 0, y: 0, z: 0 });
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(0.0, 3.0, 9.0), 3.0);
        assert_eq!(lerp(1.0, 3.0, 9.0), 9.0);
        assert_eq!(lerp(0.5, -2.0, 2.0), 0.0);
    }
}
