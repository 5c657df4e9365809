use crate::types::*;
use super::Board;

impl Board {
    /// Raw reachability: geometry, blocking and own-color capture, ignoring check.
    pub fn is_pseudo_legal(&self, from: Square, to: Square) -> bool {
        self.is_legal(from, to, false)
    }

    /// Full legality, including that the mover's king is not left in check.
    pub fn is_legal_move(&self, from: Square, to: Square) -> bool {
        self.is_legal(from, to, true)
    }

    /// Central legality predicate. Turn order is not considered here.
    ///
    /// With `enforce_check_safety` off this is pure reachability and never looks at
    /// check; attack detection must only ever take that path.
    pub fn is_legal(&self, from: Square, to: Square, enforce_check_safety: bool) -> bool {
        let piece = match self.get_piece(from) {
            Some(piece) => piece,
            None => return false,
        };

        if from == to {
            return false;
        }

        if let Some(target) = self.get_piece(to) {
            if target.color == piece.color {
                return false; // Can't capture your own piece
            }
        }

        let reachable = if piece.kind == PieceKind::King && is_castling_candidate(from, to) {
            self.is_valid_castling(from, to, piece.color, enforce_check_safety)
        } else {
            self.piece_reaches(piece.kind, piece.color, from, to)
        };

        if !reachable {
            return false;
        }

        !enforce_check_safety || !self.leaves_king_in_check(Move::new(from, to), piece.color)
    }

    /// Whether `color` may castle toward `side` right now, check safety included.
    pub fn can_castle(&self, color: Color, side: CastlingSide) -> bool {
        let king_square = king_home_square(color);
        if self.get_piece(king_square) != Some(Piece::new(PieceKind::King, color)) {
            return false;
        }
        let target = Square::new(side.king_target_file(), color.back_rank());
        self.is_legal(king_square, target, true)
    }

    /// Check if a square is attacked by any piece of `by_color`.
    ///
    /// Uses capture geometry only: no castling, no check safety, so this cannot recurse
    /// back into [`Board::is_legal`] with the flag on.
    pub fn is_square_attacked(&self, square: Square, by_color: Color) -> bool {
        self.pieces()
            .any(|(from, piece)| piece.color == by_color && self.attacks_square(from, square))
    }

    /// `false` when `color` has no king on the board.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.find_king(color) {
            Some(king_square) => self.is_square_attacked(king_square, color.opposite()),
            None => false,
        }
    }

    /// Play the move on a scratch copy and look at the mover's king.
    fn leaves_king_in_check(&self, mv: Move, color: Color) -> bool {
        let mut scratch = *self;
        scratch.apply_unchecked(mv);
        scratch.is_in_check(color)
    }

    /// Whether the piece on `from` could capture something standing on `to`.
    fn attacks_square(&self, from: Square, to: Square) -> bool {
        let piece = match self.get_piece(from) {
            Some(piece) => piece,
            None => return false,
        };
        if from == to {
            return false;
        }

        match piece.kind {
            PieceKind::Pawn => pawn_attack_geometry(from, to, piece.color),
            kind => self.piece_reaches(kind, piece.color, from, to),
        }
    }

    fn piece_reaches(&self, kind: PieceKind, color: Color, from: Square, to: Square) -> bool {
        match kind {
            PieceKind::Pawn => self.pawn_reaches(from, to, color),
            PieceKind::Knight => knight_geometry(from, to),
            PieceKind::Bishop => self.bishop_reaches(from, to),
            PieceKind::Rook => self.rook_reaches(from, to),
            PieceKind::Queen => self.rook_reaches(from, to) || self.bishop_reaches(from, to),
            PieceKind::King => king_geometry(from, to),
        }
    }

    fn pawn_reaches(&self, from: Square, to: Square, color: Color) -> bool {
        let direction = color.pawn_direction();
        let (file_diff, rank_diff) = deltas(from, to);

        // Straight ahead, never a capture
        if file_diff == 0 {
            if !self.is_empty(to) {
                return false;
            }
            if rank_diff == direction {
                return true;
            }
            if rank_diff == 2 * direction && from.rank() == color.pawn_home_rank() {
                return from.offset(0, direction).is_some_and(|middle| self.is_empty(middle));
            }
            return false;
        }

        if !pawn_attack_geometry(from, to, color) {
            return false;
        }

        match self.get_piece(to) {
            Some(target) => target.color != color,
            None => self.is_en_passant_capture(from, to, color),
        }
    }

    /// Diagonal step onto the recorded target, with the double-stepped pawn beside us.
    fn is_en_passant_capture(&self, from: Square, to: Square, color: Color) -> bool {
        if self.en_passant_target != Some(to) || to.rank() != color.en_passant_capture_rank() {
            return false;
        }
        let victim_square = Square::new(to.file(), from.rank());
        self.get_piece(victim_square) == Some(Piece::new(PieceKind::Pawn, color.opposite()))
    }

    fn rook_reaches(&self, from: Square, to: Square) -> bool {
        if from.file() != to.file() && from.rank() != to.rank() {
            return false; // Not on same rank or file
        }
        self.is_clear_path(from, to)
    }

    fn bishop_reaches(&self, from: Square, to: Square) -> bool {
        let (file_diff, rank_diff) = deltas(from, to);
        if file_diff.abs() != rank_diff.abs() {
            return false; // Not on diagonal
        }
        self.is_clear_path(from, to)
    }

    /// Check if every square strictly between two aligned squares is empty.
    pub fn is_clear_path(&self, from: Square, to: Square) -> bool {
        let (file_diff, rank_diff) = deltas(from, to);
        let direction = (file_diff.signum(), rank_diff.signum());

        let mut current = from;
        loop {
            current = match current.offset(direction.0, direction.1) {
                Some(square) => square,
                None => return false,
            };
            if current == to {
                return true;
            }
            if !self.is_empty(current) {
                return false; // Path is blocked
            }
        }
    }

    /// Castling rule for a two-file king move.
    ///
    /// Requires the king on its home square and unmoved, the chosen rook unmoved and
    /// still on its corner, and nothing between them. With check safety on, the king
    /// must also not be in check and must not pass over an attacked square; the landing
    /// square is covered by the general check-safety simulation.
    fn is_valid_castling(&self, from: Square, to: Square, color: Color, enforce_check_safety: bool) -> bool {
        if from != king_home_square(color) || to.rank() != color.back_rank() {
            return false;
        }

        if enforce_check_safety && self.is_in_check(color) {
            return false;
        }

        let side = CastlingSide::from_king_move(from.file(), to.file());
        if !self.castling_rights.has_castling_right(color, side) {
            return false;
        }

        let rook_square = rook_home_square(color, side);
        if self.get_piece(rook_square) != Some(Piece::new(PieceKind::Rook, color)) {
            return false;
        }

        if !self.is_clear_path(from, rook_square) {
            return false;
        }

        if enforce_check_safety {
            let transit = Square::new(side.rook_target_file(), color.back_rank());
            if self.is_square_attacked(transit, color.opposite()) {
                return false;
            }
        }

        true
    }
}

fn deltas(from: Square, to: Square) -> (i8, i8) {
    (
        to.file() as i8 - from.file() as i8,
        to.rank() as i8 - from.rank() as i8,
    )
}

pub(crate) fn is_castling_candidate(from: Square, to: Square) -> bool {
    let (file_diff, rank_diff) = deltas(from, to);
    rank_diff == 0 && file_diff.abs() == 2
}

fn pawn_attack_geometry(from: Square, to: Square, color: Color) -> bool {
    let (file_diff, rank_diff) = deltas(from, to);
    file_diff.abs() == 1 && rank_diff == color.pawn_direction()
}

fn knight_geometry(from: Square, to: Square) -> bool {
    let (file_diff, rank_diff) = deltas(from, to);
    let (file_diff, rank_diff) = (file_diff.abs(), rank_diff.abs());
    (file_diff == 2 && rank_diff == 1) || (file_diff == 1 && rank_diff == 2)
}

fn king_geometry(from: Square, to: Square) -> bool {
    let (file_diff, rank_diff) = deltas(from, to);
    file_diff.abs() <= 1 && rank_diff.abs() <= 1 && (file_diff != 0 || rank_diff != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(notation: &str) -> Square {
        Square::from_notation(notation).unwrap()
    }

    fn place(board: &mut Board, notation: &str, kind: PieceKind, color: Color) {
        board.set_piece(sq(notation), Some(Piece::new(kind, color)));
    }

    /// Kings on e1/e8, white rooks on a1/h1, black rooks on a8/h8.
    fn castling_board() -> Board {
        let mut board = Board::empty(Color::White);
        place(&mut board, "e1", PieceKind::King, Color::White);
        place(&mut board, "a1", PieceKind::Rook, Color::White);
        place(&mut board, "h1", PieceKind::Rook, Color::White);
        place(&mut board, "e8", PieceKind::King, Color::Black);
        place(&mut board, "a8", PieceKind::Rook, Color::Black);
        place(&mut board, "h8", PieceKind::Rook, Color::Black);
        board
    }

    #[test]
    fn sliders_are_blocked_by_intermediate_pieces() {
        let mut board = Board::empty(Color::White);
        place(&mut board, "a1", PieceKind::Rook, Color::White);
        place(&mut board, "a4", PieceKind::Pawn, Color::Black);
        place(&mut board, "c1", PieceKind::Bishop, Color::White);
        place(&mut board, "e3", PieceKind::Knight, Color::White);
        place(&mut board, "d1", PieceKind::Queen, Color::White);

        assert!(board.is_pseudo_legal(sq("a1"), sq("a3")));
        assert!(board.is_pseudo_legal(sq("a1"), sq("a4")));
        assert!(!board.is_pseudo_legal(sq("a1"), sq("a5")));
        assert!(!board.is_pseudo_legal(sq("a1"), sq("b2")));

        assert!(board.is_pseudo_legal(sq("c1"), sq("d2")));
        assert!(!board.is_pseudo_legal(sq("c1"), sq("e3")), "own piece on e3");
        assert!(!board.is_pseudo_legal(sq("c1"), sq("f4")), "blocked by e3");
        assert!(!board.is_pseudo_legal(sq("c1"), sq("c2")));

        assert!(board.is_pseudo_legal(sq("d1"), sq("d8")));
        assert!(board.is_pseudo_legal(sq("d1"), sq("h5")));
        assert!(!board.is_pseudo_legal(sq("d1"), sq("c1")), "own bishop");
        assert!(!board.is_pseudo_legal(sq("d1"), sq("e3")), "own knight");
        assert!(!board.is_pseudo_legal(sq("d1"), sq("e4")));
    }

    #[test]
    fn knight_jumps_and_king_steps() {
        let mut board = Board::new();
        assert!(board.is_pseudo_legal(sq("g1"), sq("f3")));
        assert!(board.is_pseudo_legal(sq("g1"), sq("h3")));
        assert!(!board.is_pseudo_legal(sq("g1"), sq("e2")), "own pawn");
        assert!(!board.is_pseudo_legal(sq("g1"), sq("g3")));

        board = Board::empty(Color::White);
        place(&mut board, "d4", PieceKind::King, Color::White);
        for target in ["c3", "c4", "c5", "d3", "d5", "e3", "e4", "e5"] {
            assert!(board.is_pseudo_legal(sq("d4"), sq(target)), "{target}");
        }
        assert!(!board.is_pseudo_legal(sq("d4"), sq("d6")));
        assert!(!board.is_pseudo_legal(sq("d4"), sq("d4")));
    }

    #[test]
    fn pawn_moves() {
        let mut board = Board::new();
        assert!(board.is_pseudo_legal(sq("e2"), sq("e3")));
        assert!(board.is_pseudo_legal(sq("e2"), sq("e4")));
        assert!(!board.is_pseudo_legal(sq("e2"), sq("e5")));
        assert!(!board.is_pseudo_legal(sq("e2"), sq("d3")), "diagonal onto empty square");
        assert!(board.is_pseudo_legal(sq("e7"), sq("e5")), "black moves down");
        assert!(!board.is_pseudo_legal(sq("e7"), sq("e8")));

        place(&mut board, "e3", PieceKind::Knight, Color::Black);
        assert!(!board.is_pseudo_legal(sq("e2"), sq("e3")), "forward onto occupied");
        assert!(!board.is_pseudo_legal(sq("e2"), sq("e4")), "double step through a piece");
        assert!(board.is_pseudo_legal(sq("d2"), sq("e3")), "diagonal capture");
        assert!(board.is_pseudo_legal(sq("f2"), sq("e3")));

        board = Board::empty(Color::White);
        place(&mut board, "e4", PieceKind::Pawn, Color::White);
        assert!(!board.is_pseudo_legal(sq("e4"), sq("e3")), "backward");
        assert!(!board.is_pseudo_legal(sq("e4"), sq("d4")), "sideways");
        assert!(!board.is_pseudo_legal(sq("e4"), sq("e6")), "double step off the home rank");
    }

    #[test]
    fn pawns_attack_diagonally_even_onto_empty_squares() {
        let mut board = Board::empty(Color::White);
        place(&mut board, "e4", PieceKind::Pawn, Color::Black);
        assert!(board.is_square_attacked(sq("d3"), Color::Black));
        assert!(board.is_square_attacked(sq("f3"), Color::Black));
        assert!(!board.is_square_attacked(sq("e3"), Color::Black));
        assert!(!board.is_square_attacked(sq("d5"), Color::Black));
        assert!(!board.is_square_attacked(sq("d3"), Color::White));
    }

    #[test]
    fn check_detection() {
        let mut board = Board::empty(Color::White);
        place(&mut board, "e1", PieceKind::King, Color::White);
        place(&mut board, "e8", PieceKind::Rook, Color::Black);
        assert!(board.is_in_check(Color::White));
        assert!(!board.is_in_check(Color::Black), "black has no king");

        place(&mut board, "e4", PieceKind::Pawn, Color::White);
        assert!(!board.is_in_check(Color::White), "blocked file");

        place(&mut board, "f2", PieceKind::Pawn, Color::Black);
        assert!(board.is_in_check(Color::White));
    }

    #[test]
    fn pinned_piece_cannot_leave_the_pin_line() {
        let mut board = Board::empty(Color::White);
        place(&mut board, "e1", PieceKind::King, Color::White);
        place(&mut board, "e2", PieceKind::Rook, Color::White);
        place(&mut board, "e8", PieceKind::Rook, Color::Black);
        place(&mut board, "a8", PieceKind::King, Color::Black);

        assert!(board.is_pseudo_legal(sq("e2"), sq("d2")));
        assert!(!board.is_legal_move(sq("e2"), sq("d2")), "exposes the king");
        assert!(!board.is_legal_move(sq("e2"), sq("h2")));
        assert!(board.is_legal_move(sq("e2"), sq("e5")), "stays on the file");
        assert!(board.is_legal_move(sq("e2"), sq("e8")), "captures the pinner");
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let mut board = Board::empty(Color::White);
        place(&mut board, "e1", PieceKind::King, Color::White);
        place(&mut board, "d8", PieceKind::Rook, Color::Black);
        assert!(!board.is_legal_move(sq("e1"), sq("d1")));
        assert!(!board.is_legal_move(sq("e1"), sq("d2")));
        assert!(board.is_legal_move(sq("e1"), sq("f2")));
    }

    #[test]
    fn castling_when_all_conditions_hold() {
        let board = castling_board();
        assert!(board.can_castle(Color::White, CastlingSide::KingSide));
        assert!(board.can_castle(Color::White, CastlingSide::QueenSide));
        assert!(board.can_castle(Color::Black, CastlingSide::KingSide));
        assert!(board.is_legal_move(sq("e1"), sq("g1")));
        assert!(board.is_legal_move(sq("e1"), sq("c1")));
    }

    #[test]
    fn castling_rejected_after_king_moved() {
        let mut board = castling_board();
        board.castling_rights.mark_king_moved(Color::White);
        assert!(!board.is_legal_move(sq("e1"), sq("g1")));
        assert!(!board.is_legal_move(sq("e1"), sq("c1")));
    }

    #[test]
    fn castling_rejected_after_rook_moved() {
        let mut board = castling_board();
        board.castling_rights.mark_rook_moved(Color::White, CastlingSide::KingSide);
        assert!(!board.is_legal_move(sq("e1"), sq("g1")));
        assert!(board.is_legal_move(sq("e1"), sq("c1")), "other side unaffected");
    }

    #[test]
    fn castling_rejected_through_occupied_squares() {
        let mut board = castling_board();
        place(&mut board, "b1", PieceKind::Knight, Color::White);
        assert!(!board.is_legal_move(sq("e1"), sq("c1")), "b1 is between king and rook");
        assert!(board.is_legal_move(sq("e1"), sq("g1")));

        place(&mut board, "g1", PieceKind::Bishop, Color::Black);
        assert!(!board.is_legal_move(sq("e1"), sq("g1")));
    }

    #[test]
    fn castling_rejected_while_in_check() {
        let mut board = castling_board();
        place(&mut board, "e5", PieceKind::Rook, Color::Black);
        assert!(board.is_in_check(Color::White));
        assert!(!board.is_legal_move(sq("e1"), sq("g1")));
        assert!(!board.is_legal_move(sq("e1"), sq("c1")));
    }

    #[test]
    fn castling_rejected_through_or_into_attacked_squares() {
        let mut board = castling_board();
        place(&mut board, "f5", PieceKind::Rook, Color::Black);
        assert!(!board.is_legal_move(sq("e1"), sq("g1")), "f1 is attacked");

        let mut board = castling_board();
        place(&mut board, "g5", PieceKind::Rook, Color::Black);
        assert!(!board.is_legal_move(sq("e1"), sq("g1")), "g1 is attacked");

        let mut board = castling_board();
        place(&mut board, "b5", PieceKind::Rook, Color::Black);
        assert!(board.is_legal_move(sq("e1"), sq("c1")), "only the rook crosses b1");
    }

    #[test]
    fn castling_needs_the_rook_on_its_corner() {
        let mut board = castling_board();
        board.set_piece(sq("h1"), None);
        assert!(!board.is_legal_move(sq("e1"), sq("g1")));
    }

    #[test]
    fn raw_castling_reachability_skips_check_conditions() {
        let mut board = castling_board();
        place(&mut board, "e5", PieceKind::Rook, Color::Black);
        assert!(board.is_pseudo_legal(sq("e1"), sq("g1")));
        assert!(!board.is_legal_move(sq("e1"), sq("g1")));
    }

    #[test]
    fn starting_position_attack_map() {
        let board = Board::new();
        for file in 0..8 {
            assert!(board.is_square_attacked(Square::new(file, 2), Color::White));
            assert!(board.is_square_attacked(Square::new(file, 5), Color::Black));
            assert!(!board.is_square_attacked(Square::new(file, 3), Color::White));
            assert!(!board.is_square_attacked(Square::new(file, 4), Color::Black));
        }
        assert!(!board.is_in_check(Color::White));
        assert!(!board.is_in_check(Color::Black));
    }
}
