use super::super::attack_tables::tables;
use super::super::{BoardState, Move, Piece, Square, PROMOTION_PIECES};

impl BoardState {
    pub(crate) fn generate_pawn_moves(&self, from: Square, moves: &mut Vec<Move>) {
        let us = self.side_to_move;
        let them = us.opposite();
        let all_occ = self.board.occupied();
        let promotion_rank = us.promotion_rank();

        if let Some(to) = from.offset(us.pawn_step(), 0) {
            if !all_occ.contains(to) {
                if to.rank() == promotion_rank {
                    for piece in PROMOTION_PIECES {
                        moves.push(Move::Promotion { from, to, piece });
                    }
                } else {
                    moves.push(Move::Normal { from, to });
                    if from.rank() == us.pawn_rank() {
                        if let Some(double) = to.offset(us.pawn_step(), 0) {
                            if !all_occ.contains(double) {
                                moves.push(Move::Normal { from, to: double });
                            }
                        }
                    }
                }
            }
        }

        let attacks = tables().pawn[us.index()][from.index()];
        for to in (attacks & self.board.color_mask(them)).iter() {
            if to.rank() == promotion_rank {
                for piece in PROMOTION_PIECES {
                    moves.push(Move::PromotionCapture { from, to, piece });
                }
            } else {
                moves.push(Move::Normal { from, to });
            }
        }

        if let Some(target) = self.en_passant_target {
            if attacks.contains(target) && !all_occ.contains(target) {
                // The passed pawn stands beside us, on our rank and the target's file
                let victim = Square::from_index(from.rank() * 8 + target.file());
                if self.board.pieces(them, Piece::Pawn).contains(victim) {
                    moves.push(Move::EnPassant { from, to: target });
                }
            }
        }
    }
}
