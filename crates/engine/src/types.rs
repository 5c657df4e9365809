use std::fmt;

/// A board square, stored as `rank * 8 + file` (a1 = 0, h8 = 63).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square(pub u8);

impl Square {
    pub const fn new(file: u8, rank: u8) -> Self {
        Self(rank * 8 + file)
    }

    /// Signed constructor for offset arithmetic; `None` when off the board.
    pub fn try_new(file: i8, rank: i8) -> Option<Self> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Self::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    pub fn file(&self) -> u8 {
        self.0 % 8
    }

    pub fn rank(&self) -> u8 {
        self.0 / 8
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Step by a (file, rank) delta.
    pub fn offset(&self, df: i8, dr: i8) -> Option<Self> {
        Self::try_new(self.file() as i8 + df, self.rank() as i8 + dr)
    }

    pub fn from_coords(x: f32, y: f32, square_size: f32) -> Option<Self> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let file = (x / square_size) as u8;
        let row = (y / square_size) as u8;

        if file < 8 && row < 8 {
            // Flip rank for screen coordinates
            Some(Self::new(file, 7 - row))
        } else {
            None
        }
    }

    /// Parse algebraic notation such as `"e4"`. The file letter may be upper case.
    pub fn from_notation(notation: &str) -> Option<Self> {
        let (rank, file) = notation_to_coords(notation)?;
        Some(Self::new(file, rank))
    }

    pub fn to_notation(&self) -> String {
        format!("{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }

    /// All 64 squares, a1 first, h8 last.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}

/// Map a signed (rank, file) pair to notation; `None` for anything off the board.
pub fn coords_to_notation(rank: i8, file: i8) -> Option<String> {
    Square::try_new(file, rank).map(|square| square.to_notation())
}

/// Inverse of [`coords_to_notation`], returning `(rank, file)`.
pub fn notation_to_coords(notation: &str) -> Option<(u8, u8)> {
    let mut chars = notation.chars();
    let (file_char, rank_char) = match (chars.next(), chars.next(), chars.next()) {
        (Some(file), Some(rank), None) => (file, rank),
        _ => return None,
    };

    if !file_char.is_ascii_alphabetic() || !rank_char.is_ascii_digit() {
        return None;
    }

    let file_char = file_char.to_ascii_lowercase();
    if !('a'..='h').contains(&file_char) || !('1'..='8').contains(&rank_char) {
        return None;
    }

    Some((rank_char as u8 - b'1', file_char as u8 - b'a'))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a forward pawn step.
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank the pieces start on.
    pub fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub fn pawn_home_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    pub fn promotion_rank(self) -> u8 {
        self.opposite().back_rank()
    }

    /// Rank an en-passant capture by this color lands on.
    pub fn en_passant_capture_rank(self) -> u8 {
        match self {
            Color::White => 5,
            Color::Black => 2,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// Single-letter symbol, upper case for white.
    pub fn symbol(&self) -> char {
        let symbol = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.color {
            Color::White => symbol.to_ascii_uppercase(),
            Color::Black => symbol,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match (self.kind, self.color) {
            (PieceKind::King, Color::White) => "♔",
            (PieceKind::Queen, Color::White) => "♕",
            (PieceKind::Rook, Color::White) => "♖",
            (PieceKind::Bishop, Color::White) => "♗",
            (PieceKind::Knight, Color::White) => "♘",
            (PieceKind::Pawn, Color::White) => "♙",
            (PieceKind::King, Color::Black) => "♚",
            (PieceKind::Queen, Color::Black) => "♛",
            (PieceKind::Rook, Color::Black) => "♜",
            (PieceKind::Bishop, Color::Black) => "♝",
            (PieceKind::Knight, Color::Black) => "♞",
            (PieceKind::Pawn, Color::Black) => "♟",
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind.name())
    }
}

/// A (from, to) pair, the unit exchanged with the frontend and any relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    pub fn rook_file(self) -> u8 {
        match self {
            CastlingSide::KingSide => 7,
            CastlingSide::QueenSide => 0,
        }
    }

    pub fn king_target_file(self) -> u8 {
        match self {
            CastlingSide::KingSide => 6,
            CastlingSide::QueenSide => 2,
        }
    }

    pub fn rook_target_file(self) -> u8 {
        match self {
            CastlingSide::KingSide => 5,
            CastlingSide::QueenSide => 3,
        }
    }

    /// Side implied by a two-file king move toward `to_file`.
    pub fn from_king_move(from_file: u8, to_file: u8) -> Self {
        if to_file > from_file {
            CastlingSide::KingSide
        } else {
            CastlingSide::QueenSide
        }
    }
}

pub const KING_HOME_FILE: u8 = 4;

/// "Has moved" flags for the pieces castling depends on. Flags are only ever set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights {
    pub white_king_moved: bool,
    pub black_king_moved: bool,
    pub white_rook_a_moved: bool,
    pub white_rook_h_moved: bool,
    pub black_rook_a_moved: bool,
    pub black_rook_h_moved: bool,
}

impl CastlingRights {
    pub fn king_moved(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_king_moved,
            Color::Black => self.black_king_moved,
        }
    }

    pub fn rook_moved(&self, color: Color, side: CastlingSide) -> bool {
        match (color, side) {
            (Color::White, CastlingSide::QueenSide) => self.white_rook_a_moved,
            (Color::White, CastlingSide::KingSide) => self.white_rook_h_moved,
            (Color::Black, CastlingSide::QueenSide) => self.black_rook_a_moved,
            (Color::Black, CastlingSide::KingSide) => self.black_rook_h_moved,
        }
    }

    pub fn has_castling_right(&self, color: Color, side: CastlingSide) -> bool {
        !self.king_moved(color) && !self.rook_moved(color, side)
    }

    pub fn mark_king_moved(&mut self, color: Color) {
        match color {
            Color::White => self.white_king_moved = true,
            Color::Black => self.black_king_moved = true,
        }
    }

    pub fn mark_rook_moved(&mut self, color: Color, side: CastlingSide) {
        match (color, side) {
            (Color::White, CastlingSide::QueenSide) => self.white_rook_a_moved = true,
            (Color::White, CastlingSide::KingSide) => self.white_rook_h_moved = true,
            (Color::Black, CastlingSide::QueenSide) => self.black_rook_a_moved = true,
            (Color::Black, CastlingSide::KingSide) => self.black_rook_h_moved = true,
        }
    }

}

/// Which castling rook of `color` starts on `square`, if any.
pub fn rook_home_side(color: Color, square: Square) -> Option<CastlingSide> {
    [CastlingSide::KingSide, CastlingSide::QueenSide]
        .into_iter()
        .find(|&side| rook_home_square(color, side) == square)
}

pub fn rook_home_square(color: Color, side: CastlingSide) -> Square {
    Square::new(side.rook_file(), color.back_rank())
}

pub fn king_home_square(color: Color) -> Square {
    Square::new(KING_HOME_FILE, color.back_rank())
}

/// Record of an applied move, returned by the board after a successful application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMove {
    pub mv: Move,
    pub piece: Piece,
    pub captured_piece: Option<Piece>,
    pub castling: Option<CastlingSide>,
    pub is_en_passant: bool,
    pub promotion: Option<Piece>,
}

impl GameMove {
    pub fn new(mv: Move, piece: Piece) -> Self {
        Self {
            mv,
            piece,
            captured_piece: None,
            castling: None,
            is_en_passant: false,
            promotion: None,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured_piece.is_some()
    }

    /// Human-readable description of what happened on the board.
    pub fn describe(&self) -> String {
        let mut text = match self.castling {
            Some(CastlingSide::KingSide) => format!("{} castles kingside", self.piece.color),
            Some(CastlingSide::QueenSide) => format!("{} castles queenside", self.piece.color),
            None => format!("{} {} to {}", self.piece, self.mv.from, self.mv.to),
        };

        if let Some(captured) = self.captured_piece {
            text.push_str(&format!(", capturing {}", captured));
            if self.is_en_passant {
                text.push_str(" en passant");
            }
        }

        if let Some(promoted) = self.promotion {
            text.push_str(&format!(", promoting to {}", promoted.kind.name()));
        }

        text
    }
}

impl fmt::Display for GameMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
