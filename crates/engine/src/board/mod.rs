use crate::types::*;

// Declare submodules
pub mod debug;
pub mod moves;
pub mod state;
pub mod validation;

/// Full game position: piece placement, side to move, castling flags and en-passant target.
///
/// `Board` is a plain `Copy` value so hypothetical positions are cheap scratch copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    current_turn: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// The standard starting position, white to move.
    pub fn new() -> Self {
        let mut board = Self::empty(Color::White);
        board.setup_starting_position();
        board
    }

    /// A board with no pieces. Castling flags start out "never moved".
    pub fn empty(turn: Color) -> Self {
        Self {
            squares: [None; 64],
            current_turn: turn,
            castling_rights: CastlingRights::default(),
            en_passant_target: None,
        }
    }

    fn setup_starting_position(&mut self) {
        for color in [Color::White, Color::Black] {
            for (file, kind) in BACK_RANK.iter().enumerate() {
                self.set_piece(
                    Square::new(file as u8, color.back_rank()),
                    Some(Piece::new(*kind, color)),
                );
            }
            for file in 0..8 {
                self.set_piece(
                    Square::new(file, color.pawn_home_rank()),
                    Some(Piece::new(PieceKind::Pawn, color)),
                );
            }
        }
    }

    // Basic board operations
    pub fn get_piece(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Place or clear a square directly, bypassing every rule. Meant for setting up positions.
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index()] = piece;
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.get_piece(square).is_none()
    }

    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    /// Every occupied square with its piece, a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| self.get_piece(square).map(|piece| (square, piece)))
    }

    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|square| square.is_some()).count()
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceKind::King, color);
        self.pieces()
            .find(|&(_, piece)| piece == king)
            .map(|(square, _)| square)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
