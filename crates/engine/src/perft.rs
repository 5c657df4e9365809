use crate::{Board, Color};
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerftResult {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
    pub time_ms: u128,
}

impl PerftResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes_per_second(&self) -> u64 {
        if self.time_ms == 0 {
            return 0;
        }
        (self.nodes * 1000) / (self.time_ms as u64)
    }
}

/// Known leaf counts from the standard starting position, as (depth, nodes).
pub const STARTING_POSITION_PERFT: &[(u32, u64)] = &[
    (1, 20),
    (2, 400),
    (3, 8_902),
    (4, 197_281),
    (5, 4_865_609),
];

pub fn expected_nodes(depth: u32) -> Option<u64> {
    STARTING_POSITION_PERFT
        .iter()
        .find(|&&(d, _)| d == depth)
        .map(|&(_, nodes)| nodes)
}

/// Count leaf nodes of the legal move tree.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.generate_legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mv| {
            let mut child = *board;
            match child.try_make_move(mv) {
                Ok(_) => perft(&child, depth - 1),
                Err(_) => 0,
            }
        })
        .sum()
}

/// Perft with a breakdown of what the final ply consisted of.
pub fn perft_detailed(board: &Board, depth: u32) -> PerftResult {
    let start_time = Instant::now();
    let mut result = PerftResult::new();

    if depth == 0 {
        result.nodes = 1;
    } else {
        perft_recursive(board, depth, &mut result);
    }

    result.time_ms = start_time.elapsed().as_millis();
    result
}

fn perft_recursive(board: &Board, depth: u32, result: &mut PerftResult) {
    for mv in board.generate_legal_moves() {
        let mut child = *board;
        let game_move = match child.try_make_move(mv) {
            Ok(game_move) => game_move,
            Err(_) => continue,
        };

        if depth > 1 {
            perft_recursive(&child, depth - 1, result);
            continue;
        }

        result.nodes += 1;
        if game_move.is_capture() {
            result.captures += 1;
        }
        if game_move.is_en_passant {
            result.en_passant += 1;
        }
        if game_move.castling.is_some() {
            result.castles += 1;
        }
        if game_move.promotion.is_some() {
            result.promotions += 1;
        }

        let side_to_move: Color = child.current_turn();
        if child.is_in_check(side_to_move) {
            result.checks += 1;
            if !child.can_player_move() {
                result.checkmates += 1;
            }
        }
    }
}
