use super::super::attack_tables::{tables, Ray};
use super::super::{BoardState, Move, Square};

/// Type of sliding piece for move generation
#[derive(Clone, Copy)]
pub(crate) enum SliderType {
    Bishop,
    Rook,
    Queen,
}

impl BoardState {
    pub(crate) fn generate_slider_moves(
        &self,
        from: Square,
        slider: SliderType,
        moves: &mut Vec<Move>,
    ) {
        let t = tables();
        let idx = from.index();
        match slider {
            SliderType::Bishop => self.march_rays(from, &t.bishop_rays[idx], moves),
            SliderType::Rook => self.march_rays(from, &t.rook_rays[idx], moves),
            SliderType::Queen => {
                self.march_rays(from, &t.rook_rays[idx], moves);
                self.march_rays(from, &t.bishop_rays[idx], moves);
            }
        }
    }

    /// Walk each ray outward, stopping before a friendly piece and on an enemy one.
    fn march_rays(&self, from: Square, rays: &[Ray; 4], moves: &mut Vec<Move>) {
        let own_occ = self.board.color_mask(self.side_to_move);
        let all_occ = self.board.occupied();
        for ray in rays {
            for &to in ray.as_slice() {
                if own_occ.contains(to) {
                    break;
                }
                moves.push(Move::Normal { from, to });
                if all_occ.contains(to) {
                    break;
                }
            }
        }
    }
}
