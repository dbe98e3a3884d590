use super::super::attack_tables::tables;
use super::super::{BoardState, CastleSide, Move, Piece, Square};

impl BoardState {
    /// King steps plus castle candidates.
    ///
    /// Castling only requires the right, the rook on its home square and
    /// empty squares between; attacked squares are rejected by the legality pass.
    pub(crate) fn generate_king_moves(&self, from: Square, moves: &mut Vec<Move>) {
        let us = self.side_to_move;
        let own_occ = self.board.color_mask(us);
        let all_occ = self.board.occupied();

        for to in (tables().king[from.index()] & !own_occ).iter() {
            moves.push(Move::Normal { from, to });
        }

        for side in CastleSide::BOTH {
            if !self.castle_rights.has(us, side) {
                continue;
            }
            let (king_from, _) = side.king_squares(us);
            let (rook_from, _) = side.rook_squares(us);
            if from == king_from
                && self.board.pieces(us, Piece::Rook).contains(rook_from)
                && all_occ.0 & side.between_mask(us) == 0
            {
                moves.push(Move::Castle { color: us, side });
            }
        }
    }
}
