use crate::types::*;
use super::Board;

impl Board {
    /// Generate all legal moves for the current player
    ///
    /// Brute force over every own piece and all 64 destinations, each filtered through
    /// full check-aware legality. Fine for one ply on a fixed 8×8 board.
    pub fn generate_legal_moves(&self) -> Vec<Move> {
        let our_color = self.current_turn;

        self.pieces()
            .filter(|&(_, piece)| piece.color == our_color)
            .flat_map(|(from, _)| {
                self.legal_moves_from(from)
                    .into_iter()
                    .map(move |to| Move::new(from, to))
            })
            .collect()
    }

    /// Legal destinations for the piece at `square`, ignoring whose turn it is.
    pub fn legal_moves_from(&self, square: Square) -> Vec<Square> {
        if self.is_empty(square) {
            return Vec::new();
        }

        Square::all()
            .filter(|&target| self.is_legal(square, target, true))
            .collect()
    }

    /// Check if current player has any legal moves
    pub fn can_player_move(&self) -> bool {
        self.pieces()
            .filter(|&(_, piece)| piece.color == self.current_turn)
            .any(|(from, _)| Square::all().any(|to| self.is_legal(from, to, true)))
    }
}
