use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::MoveError;
use crate::{Board, GameMove};

/// In-memory game log, one line per event, flushed to disk on request.
///
/// In advanced mode every applied move is followed by a board diagram and a state dump.
#[derive(Debug)]
pub struct ChessLogger {
    pub log_buffer: String,
    pub advanced_logging: bool,
    game_start_time: Instant,
    move_count: u32,
    indent_level: usize,
}

impl ChessLogger {
    pub fn new() -> Self {
        let mut logger = Self {
            log_buffer: String::with_capacity(64 * 1024),
            advanced_logging: false,
            game_start_time: Instant::now(),
            move_count: 0,
            indent_level: 0,
        };

        logger.log("=== Chess Game Log Started ===");
        logger.log(&format!("Date: {}", chrono::Local::now().format("%m/%d/%Y %H:%M:%S")));
        logger
    }

    pub fn should_log_advanced(&self) -> bool {
        self.advanced_logging
    }

    pub fn enable_advanced_logging(&mut self) {
        self.advanced_logging = true;
        self.log("Advanced logging enabled - board snapshots after every move");
    }

    pub fn disable_advanced_logging(&mut self) {
        self.advanced_logging = false;
        self.log("Advanced logging disabled");
    }

    pub fn log(&mut self, message: &str) {
        self.log_buffer.push_str(message);
        self.log_buffer.push('\n');
    }

    pub fn log_with_indent(&mut self, message: &str) {
        let indent = "  ".repeat(self.indent_level);
        self.log_buffer.push_str(&format!("{}{}\n", indent, message));
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Record an applied move; `board` is the position after it.
    pub fn log_move(&mut self, game_move: &GameMove, board: &Board) {
        self.move_count += 1;
        let elapsed = self.game_start_time.elapsed().as_millis();
        self.log(&format!(
            "{}. {} ({}) [{}ms]",
            self.move_count,
            move_to_string(game_move),
            game_move.describe(),
            elapsed
        ));

        if self.should_log_advanced() {
            self.log_board(board);
        }
    }

    pub fn log_rejection(&mut self, start: &str, end: &str, error: &MoveError) {
        self.log(&format!("Rejected {}-{}: {}", start, end, error));
    }

    pub fn log_board(&mut self, board: &Board) {
        self.increase_indent();
        for line in board.render_ascii().lines() {
            self.log_with_indent(line);
        }
        for line in board.debug_game_state() {
            self.log_with_indent(&line);
        }
        self.decrease_indent();
    }

    pub fn log_game_over(&mut self, result: &str) {
        self.log(&format!("Game over after {} moves: {}", self.move_count, result));
    }

    /// Write the buffer to `<dir>/<MM_DD_YYYY_HH_MM_SS>.txt`, creating `dir` if needed.
    pub fn save_to_file(&mut self, dir: &Path, reason: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;

        let now = chrono::Local::now();
        let path = dir.join(format!("{}.txt", now.format("%m_%d_%Y_%H_%M_%S")));

        self.log(&format!("Game log saved: {}", reason));

        let mut file = File::create(&path)?;
        file.write_all(self.log_buffer.as_bytes())?;
        Ok(path)
    }
}

fn move_to_string(game_move: &GameMove) -> String {
    let mv = game_move.mv;
    let separator = if game_move.is_capture() { 'x' } else { '-' };
    let mut text = format!("{}{}{}", mv.from, separator, mv.to);
    if let Some(promoted) = game_move.promotion {
        text.push('=');
        text.push(promoted.symbol().to_ascii_uppercase());
    }
    text
}

impl Default for ChessLogger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_moves_and_rejections() {
        let mut board = Board::new();
        let mut logger = ChessLogger::new();

        let game_move = board.move_piece("e2", "e4").unwrap();
        logger.log_move(&game_move, &board);

        let error = board.move_piece("e2", "e3").unwrap_err();
        logger.log_rejection("e2", "e3", &error);

        assert_eq!(logger.move_count(), 1);
        assert!(logger.log_buffer.contains("1. e2-e4 (white pawn e2 to e4)"));
        assert!(logger.log_buffer.contains("Rejected e2-e3: there is no piece on e2"));
        assert!(!logger.log_buffer.contains("a b c d e f g h"));
    }

    #[test]
    fn advanced_mode_adds_board_snapshots() {
        let mut board = Board::new();
        let mut logger = ChessLogger::new();
        logger.enable_advanced_logging();

        let game_move = board.move_piece("g1", "f3").unwrap();
        logger.log_move(&game_move, &board);

        assert!(logger.log_buffer.contains("  3| . . . . . N . ."));
        assert!(logger.log_buffer.contains("  Current turn: black"));
    }

    #[test]
    fn saves_into_the_requested_directory() {
        let dir = std::env::temp_dir().join(format!("chess_rules_log_{}", std::process::id()));
        let mut logger = ChessLogger::new();
        logger.log_game_over("white resigns");

        let path = logger.save_to_file(&dir, "test").unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("Game over after 0 moves: white resigns"));
        assert!(written.ends_with("Game log saved: test\n"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
