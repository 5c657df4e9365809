use std::fmt;
use std::path::PathBuf;

use chess_rules::{Board, ChessLogger, Color, Piece, Square};
use egui::{Color32, Rect, Sense, Vec2};

use crate::config::Config;

/// Outcome of the position for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Check(Color),
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    pub fn of(board: &Board) -> Self {
        let side = board.current_turn();
        let in_check = board.is_in_check(side);
        let can_move = board.can_player_move();

        match (in_check, can_move) {
            (true, false) => GameStatus::Checkmate { winner: side.opposite() },
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check(side),
            (false, true) => GameStatus::InProgress,
        }
    }

    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Check(color) => write!(f, "{} is in check", color),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameStatus::Stalemate => write!(f, "stalemate"),
        }
    }
}

pub struct ChessApp {
    board: Board,
    selected_square: Option<Square>,
    legal_moves: Vec<Square>,
    status: GameStatus,
    logger: ChessLogger,
    log_dir: PathBuf,
    message: String,
}

impl ChessApp {
    pub fn new(config: Config) -> Self {
        let mut logger = ChessLogger::new();
        if config.verbose {
            logger.enable_advanced_logging();
        }

        let board = Board::new();
        Self {
            status: GameStatus::of(&board),
            board,
            selected_square: None,
            legal_moves: Vec::new(),
            logger,
            log_dir: config.log_dir,
            message: timestamped("White to move"),
        }
    }

    fn new_game(&mut self) {
        if self.logger.move_count() > 0 && !self.status.is_over() {
            self.logger.log_game_over("abandoned");
        }
        self.logger.log("=== New game ===");

        self.board = Board::new();
        self.status = GameStatus::of(&self.board);
        self.clear_selection();
        self.message = timestamped("New game, white to move");
    }

    fn save_log(&mut self) {
        self.message = match self.logger.save_to_file(&self.log_dir, "requested from the board") {
            Ok(path) => timestamped(&format!("Log saved to {}", path.display())),
            Err(e) => timestamped(&format!("Could not save log: {}", e)),
        };
    }

    fn clear_selection(&mut self) {
        self.selected_square = None;
        self.legal_moves.clear();
    }

    fn select(&mut self, square: Square) {
        self.selected_square = Some(square);
        self.legal_moves = self.board.legal_moves_from(square);
    }

    fn owns(&self, square: Square) -> bool {
        self.board
            .get_piece(square)
            .is_some_and(|piece| piece.color == self.board.current_turn())
    }

    fn handle_square_click(&mut self, clicked_square: Square) {
        if self.status.is_over() {
            return;
        }

        match self.selected_square {
            Some(selected) if selected == clicked_square => self.clear_selection(),
            Some(selected) if self.legal_moves.contains(&clicked_square) => {
                self.submit_move(selected, clicked_square);
            }
            _ if self.owns(clicked_square) => self.select(clicked_square),
            _ => self.clear_selection(),
        }
    }

    /// Forward the pair as notation, the same path a remote move would take.
    fn submit_move(&mut self, from: Square, to: Square) {
        let (start, end) = (from.to_notation(), to.to_notation());
        self.clear_selection();

        match self.board.move_piece(&start, &end) {
            Ok(game_move) => {
                self.logger.log_move(&game_move, &self.board);
                self.status = GameStatus::of(&self.board);
                self.message = timestamped(&game_move.describe());

                if self.status.is_over() {
                    self.logger.log_game_over(&self.status.to_string());
                }
            }
            Err(e) => {
                self.logger.log_rejection(&start, &end, &e);
                self.message = timestamped(&e.to_string());
            }
        }
    }

    fn status_line(&self) -> String {
        match self.status {
            GameStatus::InProgress => format!("{} to move", capitalize(self.board.current_turn())),
            other => capitalize_str(&other.to_string()),
        }
    }
}

impl eframe::App for ChessApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(self.status_line()).strong());
                ui.separator();
                ui.label(self.message.as_str());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Save log").clicked() {
                        self.save_log();
                    }
                    if ui.button("New game").clicked() {
                        self.new_game();
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available_size = ui.available_size();
            let board_size = available_size.x.min(available_size.y) - 20.0;
            let square_size = board_size / 8.0;

            let board_rect = Rect::from_min_size(ui.cursor().min, Vec2::splat(board_size));
            let response = ui.allocate_rect(board_rect, Sense::click());

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let relative_pos = pos - board_rect.min;
                    if let Some(clicked_square) =
                        Square::from_coords(relative_pos.x, relative_pos.y, square_size)
                    {
                        self.handle_square_click(clicked_square);
                    }
                }
            }

            self.draw_board(ui, board_rect, square_size);
        });
    }
}

impl ChessApp {
    fn draw_board(&self, ui: &mut egui::Ui, board_rect: Rect, square_size: f32) {
        let painter = ui.painter();
        let checked_king = match self.status {
            GameStatus::Check(color) => self.board.find_king(color),
            GameStatus::Checkmate { winner } => self.board.find_king(winner.opposite()),
            _ => None,
        };

        for square in Square::all() {
            let (file, rank) = (square.file(), square.rank());
            let is_light = (file + rank) % 2 == 1;

            let square_rect = Rect::from_min_size(
                board_rect.min + Vec2::new(file as f32 * square_size, (7 - rank) as f32 * square_size),
                Vec2::splat(square_size),
            );

            let base_color = if is_light {
                Color32::from_rgb(240, 217, 181)
            } else {
                Color32::from_rgb(181, 136, 99)
            };

            let square_color = if Some(square) == self.selected_square {
                Color32::from_rgb(255, 255, 0)
            } else if Some(square) == checked_king {
                Color32::from_rgb(220, 80, 80)
            } else {
                base_color
            };

            painter.rect_filled(square_rect, 0.0, square_color);

            if self.legal_moves.contains(&square) {
                let center = square_rect.center();
                let hint = Color32::from_rgba_premultiplied(128, 128, 128, 179);

                if self.board.is_empty(square) {
                    painter.circle_filled(center, square_size * 0.15, hint);
                } else {
                    // Capture ring
                    painter.circle_filled(center, square_size * 0.4, hint);
                    painter.circle_filled(center, square_size * 0.25, square_color);
                }
            }

            if let Some(piece) = self.board.get_piece(square) {
                draw_piece(painter, piece, square_rect);
            }
        }

        painter.rect_stroke(board_rect, 0.0, egui::Stroke::new(2.0, Color32::BLACK));
    }
}

fn draw_piece(painter: &egui::Painter, piece: Piece, square_rect: Rect) {
    let size = square_rect.size() * 0.8;
    painter.text(
        square_rect.center(),
        egui::Align2::CENTER_CENTER,
        piece.glyph(),
        egui::FontId::proportional(size.x),
        Color32::BLACK,
    );
}

fn timestamped(message: &str) -> String {
    format!("[{}] {}", chrono::Local::now().format("%H:%M:%S"), message)
}

fn capitalize(color: Color) -> String {
    capitalize_str(&color.to_string())
}

fn capitalize_str(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
