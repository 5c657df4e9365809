use crate::error::MoveError;
use crate::types::*;
use super::validation::is_castling_candidate;
use super::Board;

impl Board {
    /// Apply a move given as two algebraic squares, e.g. `move_piece("e2", "e4")`.
    ///
    /// This is the single entry point for local and remote input alike; every request is
    /// validated from scratch. On error the board is left exactly as it was.
    pub fn move_piece(&mut self, start_notation: &str, end_notation: &str) -> Result<GameMove, MoveError> {
        let from = parse_square(start_notation)?;
        let to = parse_square(end_notation)?;
        self.try_make_move(Move::new(from, to))
    }

    /// Execute a move and update game state
    pub fn try_make_move(&mut self, mv: Move) -> Result<GameMove, MoveError> {
        let piece = self.get_piece(mv.from).ok_or(MoveError::EmptySource(mv.from))?;

        if piece.color != self.current_turn {
            return Err(MoveError::WrongTurn {
                square: mv.from,
                turn: self.current_turn,
                owner: piece.color,
            });
        }

        if !self.is_legal_move(mv.from, mv.to) {
            return Err(MoveError::IllegalMove {
                piece,
                from: mv.from,
                to: mv.to,
            });
        }

        self.apply_unchecked(mv).ok_or(MoveError::EmptySource(mv.from))
    }

    /// Board mutation and bookkeeping for a move already known to be legal.
    ///
    /// Also used on scratch copies by the check-safety test. Returns `None` only when
    /// `mv.from` is empty.
    pub(crate) fn apply_unchecked(&mut self, mv: Move) -> Option<GameMove> {
        let piece = self.get_piece(mv.from)?;
        let mut game_move = GameMove::new(mv, piece);

        if piece.kind == PieceKind::King && is_castling_candidate(mv.from, mv.to) {
            let side = CastlingSide::from_king_move(mv.from.file(), mv.to.file());
            self.execute_castling(mv, piece.color, side);
            game_move.castling = Some(side);
        } else if piece.kind == PieceKind::Pawn && mv.from.file() != mv.to.file() && self.is_empty(mv.to) {
            // Diagonal pawn step onto an empty square can only be en passant
            game_move.captured_piece = self.execute_en_passant(mv);
            game_move.is_en_passant = true;
        } else {
            game_move.captured_piece = self.get_piece(mv.to);
            self.relocate(mv);
        }

        if piece.kind == PieceKind::Pawn && mv.to.rank() == piece.color.promotion_rank() {
            let queen = Piece::new(PieceKind::Queen, piece.color);
            self.set_piece(mv.to, Some(queen));
            game_move.promotion = Some(queen);
        }

        self.update_castling_rights(mv, piece, game_move.captured_piece);
        self.setup_en_passant(mv, piece);
        self.current_turn = self.current_turn.opposite();

        Some(game_move)
    }

    fn relocate(&mut self, mv: Move) {
        let piece = self.get_piece(mv.from);
        self.set_piece(mv.to, piece);
        self.set_piece(mv.from, None);
    }

    /// Move the king, then bring the rook over to the other side of it.
    fn execute_castling(&mut self, mv: Move, color: Color, side: CastlingSide) {
        self.relocate(mv);
        let rook_start = rook_home_square(color, side);
        let rook_end = Square::new(side.rook_target_file(), color.back_rank());
        self.relocate(Move::new(rook_start, rook_end));
    }

    /// Move the capturing pawn and remove the victim, which sits beside the origin square.
    fn execute_en_passant(&mut self, mv: Move) -> Option<Piece> {
        let captured_pawn_square = Square::new(mv.to.file(), mv.from.rank());
        let captured = self.get_piece(captured_pawn_square);
        self.set_piece(captured_pawn_square, None);
        self.relocate(mv);
        captured
    }

    /// King moves, moves off a rook's home square, and captures on a rook's home square
    /// all forfeit castling for good.
    fn update_castling_rights(&mut self, mv: Move, moving_piece: Piece, captured_piece: Option<Piece>) {
        match moving_piece.kind {
            PieceKind::King => self.castling_rights.mark_king_moved(moving_piece.color),
            PieceKind::Rook => {
                if let Some(side) = rook_home_side(moving_piece.color, mv.from) {
                    self.castling_rights.mark_rook_moved(moving_piece.color, side);
                }
            }
            _ => {}
        }

        if let Some(captured) = captured_piece {
            if captured.kind == PieceKind::Rook {
                if let Some(side) = rook_home_side(captured.color, mv.to) {
                    self.castling_rights.mark_rook_moved(captured.color, side);
                }
            }
        }
    }

    /// Only a double pawn push from the home rank leaves a target; anything else clears it.
    fn setup_en_passant(&mut self, mv: Move, moving_piece: Piece) {
        self.en_passant_target = None;

        if moving_piece.kind != PieceKind::Pawn || mv.from.rank() != moving_piece.color.pawn_home_rank() {
            return;
        }

        let rank_diff = mv.to.rank() as i8 - mv.from.rank() as i8;
        if rank_diff == 2 * moving_piece.color.pawn_direction() {
            self.en_passant_target = mv.from.offset(0, moving_piece.color.pawn_direction());
        }
    }
}

fn parse_square(notation: &str) -> Result<Square, MoveError> {
    Square::from_notation(notation).ok_or_else(|| MoveError::MalformedNotation(notation.to_string()))
}
