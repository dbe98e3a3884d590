use super::super::attack_tables::tables;
use super::super::{BoardState, Move, Square};

impl BoardState {
    pub(crate) fn generate_knight_moves(&self, from: Square, moves: &mut Vec<Move>) {
        let own_occ = self.board.color_mask(self.side_to_move);
        let targets = tables().knight[from.index()] & !own_occ;

        for to in targets.iter() {
            moves.push(Move::Normal { from, to });
        }
    }
}
