use crate::types::*;
use super::Board;

impl Board {
    /// Debug game state information
    pub fn debug_game_state(&self) -> Vec<String> {
        let mut debug_info = Vec::new();
        let rights = self.castling_rights;

        debug_info.push(format!("Current turn: {}", self.current_turn));
        debug_info.push(format!(
            "Has moved: K={} Ra={} Rh={} | k={} ra={} rh={}",
            rights.white_king_moved,
            rights.white_rook_a_moved,
            rights.white_rook_h_moved,
            rights.black_king_moved,
            rights.black_rook_a_moved,
            rights.black_rook_h_moved,
        ));

        match self.en_passant_target {
            Some(target) => debug_info.push(format!("En passant target: {}", target)),
            None => debug_info.push("En passant target: None".to_string()),
        }

        debug_info.push(format!("Pieces on board: {}", self.piece_count()));
        for color in [Color::White, Color::Black] {
            if self.is_in_check(color) {
                debug_info.push(format!("{} is in check", color));
            }
        }

        debug_info
    }

    /// Text diagram, rank 8 on top, `.` for empty squares.
    pub fn render_ascii(&self) -> String {
        let mut out = String::new();
        out.push_str("  a b c d e f g h\n");
        out.push_str("  ---------------\n");

        for rank in (0..8).rev() {
            let row: Vec<String> = (0..8)
                .map(|file| {
                    self.get_piece(Square::new(file, rank))
                        .map_or('.', |piece| piece.symbol())
                        .to_string()
                })
                .collect();
            out.push_str(&format!("{}| {}\n", rank + 1, row.join(" ")));
        }

        out
    }
}
