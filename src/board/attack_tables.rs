//! Precomputed attack tables.
//!
//! Built once on first use and read-only afterwards. Leaper tables are
//! square sets; slider tables are rays ordered outward from the piece so
//! that ray marching can stop at the first occupied square.

#![allow(clippy::needless_range_loop)] // Index loops are clearer for board coordinates

use once_cell::sync::Lazy;

use super::types::{Bitboard, Square};

const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const KING_DELTAS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Toward rank 0 (the eighth rank), toward rank 7, toward the h-file, toward the a-file
pub(crate) const ROOK_DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

pub(crate) const BISHOP_DIRECTIONS: [(isize, isize); 4] = [(-1, 1), (-1, -1), (1, 1), (1, -1)];

/// Squares along one direction, nearest first.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    squares: [Square; 7],
    len: u8,
}

impl Ray {
    const EMPTY: Ray = Ray {
        squares: [Square::from_index(0); 7],
        len: 0,
    };

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len as usize]
    }

    fn push(&mut self, sq: Square) {
        self.squares[self.len as usize] = sq;
        self.len += 1;
    }
}

/// All per-square lookup data used by move generation and check detection.
pub struct Tables {
    /// (rank, file) of each square
    pub coords: [(u8, u8); 64],
    pub knight: [Bitboard; 64],
    pub king: [Bitboard; 64],
    /// Squares attacked by a pawn of the given color index standing on the square
    pub pawn: [[Bitboard; 64]; 2],
    pub rook_rays: [[Ray; 4]; 64],
    pub bishop_rays: [[Ray; 4]; 64],
}

static TABLES: Lazy<Tables> = Lazy::new(build_tables);

/// The process-wide tables, built on first access.
#[inline]
pub fn tables() -> &'static Tables {
    &TABLES
}

fn on_board(r: isize, f: isize) -> bool {
    (0..8).contains(&r) && (0..8).contains(&f)
}

fn leaper_mask(sq: usize, deltas: &[(isize, isize)]) -> Bitboard {
    let r = (sq / 8) as isize;
    let f = (sq % 8) as isize;
    let mut mask = 0u64;
    for &(dr, df) in deltas {
        let nr = r + dr;
        let nf = f + df;
        if on_board(nr, nf) {
            mask |= 1u64 << ((nr as usize) * 8 + (nf as usize));
        }
    }
    Bitboard(mask)
}

fn ray(sq: usize, (dr, df): (isize, isize)) -> Ray {
    let mut ray = Ray::EMPTY;
    let mut nr = (sq / 8) as isize + dr;
    let mut nf = (sq % 8) as isize + df;
    while on_board(nr, nf) {
        ray.push(Square::from_index((nr as usize) * 8 + (nf as usize)));
        nr += dr;
        nf += df;
    }
    ray
}

/// Compute every table from scratch. Deterministic; `tables()` memoizes it.
#[must_use]
pub fn build_tables() -> Tables {
    let mut tables = Tables {
        coords: [(0, 0); 64],
        knight: [Bitboard::EMPTY; 64],
        king: [Bitboard::EMPTY; 64],
        pawn: [[Bitboard::EMPTY; 64]; 2],
        rook_rays: [[Ray::EMPTY; 4]; 64],
        bishop_rays: [[Ray::EMPTY; 4]; 64],
    };

    for sq in 0..64 {
        tables.coords[sq] = ((sq / 8) as u8, (sq % 8) as u8);
        tables.knight[sq] = leaper_mask(sq, &KNIGHT_DELTAS);
        tables.king[sq] = leaper_mask(sq, &KING_DELTAS);
        // White pawns advance toward rank 0, Black toward rank 7
        tables.pawn[0][sq] = leaper_mask(sq, &[(-1, -1), (-1, 1)]);
        tables.pawn[1][sq] = leaper_mask(sq, &[(1, -1), (1, 1)]);
        for d in 0..4 {
            tables.rook_rays[sq][d] = ray(sq, ROOK_DIRECTIONS[d]);
            tables.bishop_rays[sq][d] = ray(sq, BISHOP_DIRECTIONS[d]);
        }
    }
    tables
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> usize {
        name.parse::<Square>().unwrap().index()
    }

    #[test]
    fn test_knight_edges() {
        let t = tables();
        assert_eq!(t.knight[sq("a1")].popcount(), 2);
        assert_eq!(t.knight[sq("d4")].popcount(), 8);
        assert_eq!(t.knight[sq("h8")].popcount(), 2);
    }

    #[test]
    fn test_king_edges() {
        let t = tables();
        assert_eq!(t.king[sq("a8")].popcount(), 3);
        assert_eq!(t.king[sq("e4")].popcount(), 8);
        assert_eq!(t.king[sq("e1")].popcount(), 5);
    }

    #[test]
    fn test_rays_ordered_outward() {
        let t = tables();
        let up: Vec<String> = t.rook_rays[sq("a1")][0]
            .as_slice()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(up, vec!["a2", "a3", "a4", "a5", "a6", "a7", "a8"]);

        let diag = t.bishop_rays[sq("c1")][0].as_slice();
        assert_eq!(diag[0].to_string(), "d2");
        assert_eq!(diag.last().unwrap().to_string(), "h6");
    }

    #[test]
    fn test_slider_coverage() {
        let t = tables();
        for s in 0..64 {
            let rook: usize = t.rook_rays[s].iter().map(|r| r.as_slice().len()).sum();
            assert_eq!(rook, 14);
        }
        let corner: usize = t.bishop_rays[sq("a1")].iter().map(|r| r.as_slice().len()).sum();
        assert_eq!(corner, 7);
    }

    #[test]
    fn test_pawn_attacks() {
        let t = tables();
        let white = t.pawn[0][sq("e2")];
        assert!(white.contains("d3".parse().unwrap()));
        assert!(white.contains("f3".parse().unwrap()));
        assert_eq!(t.pawn[1][sq("a7")].popcount(), 1);
    }

    #[test]
    fn test_build_deterministic() {
        let a = build_tables();
        let b = build_tables();
        assert_eq!(a.knight, b.knight);
        assert_eq!(a.coords, b.coords);
    }
}
