use super::super::attack_tables::{tables, Ray};
use super::super::state::Placement;
use super::super::{Bitboard, Color, Piece, Square};

impl Placement {
    /// Whether any piece of `by` attacks `square`.
    ///
    /// Sliders are found by marching the square's rays outward and looking
    /// at the first occupied square of each.
    #[must_use]
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        let t = tables();
        let idx = square.index();
        let attackers = self.color_mask(by);

        // A pawn of `by` hits `square` iff an opposite pawn on `square` would hit it back
        let pawn_sources = t.pawn[by.opposite().index()][idx];
        if !(pawn_sources & self.piece_mask(Piece::Pawn) & attackers).is_empty() {
            return true;
        }
        if !(t.knight[idx] & self.piece_mask(Piece::Knight) & attackers).is_empty() {
            return true;
        }
        if !(t.king[idx] & self.piece_mask(Piece::King) & attackers).is_empty() {
            return true;
        }

        let queens = self.piece_mask(Piece::Queen);
        let rook_like = (self.piece_mask(Piece::Rook) | queens) & attackers;
        let bishop_like = (self.piece_mask(Piece::Bishop) | queens) & attackers;
        self.first_blocker_in(&t.rook_rays[idx], rook_like)
            || self.first_blocker_in(&t.bishop_rays[idx], bishop_like)
    }

    fn first_blocker_in(&self, rays: &[Ray; 4], targets: Bitboard) -> bool {
        if targets.is_empty() {
            return false;
        }
        let all_occ = self.occupied();
        rays.iter().any(|ray| {
            ray.as_slice()
                .iter()
                .find(|&&sq| all_occ.contains(sq))
                .map_or(false, |&sq| targets.contains(sq))
        })
    }
}

/// Whether `color`'s king is attacked. A board without that king is never in check.
pub(crate) fn is_in_check(board: &Placement, color: Color) -> bool {
    board
        .king_square(color)
        .map_or(false, |king| board.is_square_attacked(king, color.opposite()))
}
