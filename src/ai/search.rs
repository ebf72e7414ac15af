use std::time::Duration;

use tracing::debug;
use web_time::Instant;

use crate::board::{Board, Mark};

pub const WIN_SCORE: i32 = 10;
pub const LOSS_SCORE: i32 = -10;
pub const TIE_SCORE: i32 = 0;

/// A candidate cell together with its minimax score from the computer's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub index: usize,
    pub score: i32,
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub elapsed: Duration,
}

/// Full-depth minimax over the empty cells, no pruning.
///
/// Scores are always from the computer's point of view: the computer layer
/// maximizes and the human layer minimizes. Ties keep the lowest cell index.
#[derive(Debug, Default)]
pub struct Searcher {
    stats: SearchStats,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Searches the best cell for `mark`.
    /// Returns `None` when the board is already decided or full.
    pub fn search(&mut self, board: &Board, mark: Mark) -> Option<Move> {
        let start_time = Instant::now();
        self.stats = SearchStats::default();

        let result = if board.outcome().is_terminal() {
            None
        } else {
            self.minimax(board, mark).1
        };

        self.stats.elapsed = start_time.elapsed();
        debug!(
            ?mark,
            nodes = self.stats.nodes,
            elapsed_us = self.stats.elapsed.as_micros() as u64,
            best = ?result,
            "minimax search finished"
        );
        result
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Returns the position score and, for non-terminal positions, the chosen move.
    fn minimax(&mut self, board: &Board, mark: Mark) -> (i32, Option<Move>) {
        self.stats.nodes += 1;

        if let Some(score) = terminal_score(board) {
            return (score, None);
        }

        let mut best: Option<Move> = None;
        for index in board.empty_cells() {
            let mut next = *board;
            // `index` comes from `empty_cells`, so placement cannot fail.
            if next.place(index, mark).is_err() {
                continue;
            }
            let (score, _) = self.minimax(&next, mark.opponent());
            let candidate = Move { index, score };

            if is_better_move(mark, candidate, best) {
                best = Some(candidate);
            }
        }

        match best {
            Some(mv) => (mv.score, Some(mv)),
            None => (TIE_SCORE, None),
        }
    }
}

/// Score of a decided position, checked as human win, computer win, full board.
fn terminal_score(board: &Board) -> Option<i32> {
    if board.winning_line(Mark::Human).is_some() {
        Some(LOSS_SCORE)
    } else if board.winning_line(Mark::Computer).is_some() {
        Some(WIN_SCORE)
    } else if board.is_full() {
        Some(TIE_SCORE)
    } else {
        None
    }
}

/// Strict comparison so the earliest cell wins among equal scores.
fn is_better_move(mark: Mark, candidate: Move, best: Option<Move>) -> bool {
    match (mark, best) {
        (_, None) => true,
        (Mark::Computer, Some(best)) => candidate.score > best.score,
        (Mark::Human, Some(best)) => candidate.score < best.score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    const E: Cell = Cell::Empty;
    const O: Cell = Cell::Marked(Mark::Human);
    const X: Cell = Cell::Marked(Mark::Computer);

    #[test]
    fn empty_board_is_a_forced_tie() {
        let mut searcher = Searcher::new();
        let board = Board::new();

        let mv = searcher.search(&board, Mark::Computer).unwrap();

        assert_eq!(mv.score, TIE_SCORE);
        assert!([0, 2, 4, 6, 8].contains(&mv.index));
        // 1 root + every reachable line of play: 549_946 positions in total.
        assert_eq!(searcher.stats().nodes, 549_946);
    }

    #[test]
    fn takes_immediate_win() {
        let mut searcher = Searcher::new();
        let board = Board::from_cells([X, X, E, O, O, E, E, E, E]);

        let mv = searcher.search(&board, Mark::Computer).unwrap();

        assert_eq!(mv, Move { index: 2, score: WIN_SCORE });
    }

    #[test]
    fn blocks_human_threat() {
        let mut searcher = Searcher::new();
        let board = Board::from_cells([O, O, E, X, E, E, E, E, E]);

        let mv = searcher.search(&board, Mark::Computer).unwrap();

        assert_eq!(mv.index, 2);
    }

    #[test]
    fn blocks_when_no_win_is_available() {
        let mut searcher = Searcher::new();
        // Human threatens 2-4-6 through the empty 6.
        let board = Board::from_cells([X, E, O, E, O, E, E, E, X]);

        let mv = searcher.search(&board, Mark::Computer).unwrap();

        assert_eq!(mv.index, 6);
    }

    #[test]
    fn human_layer_minimizes() {
        let mut searcher = Searcher::new();
        let board = Board::from_cells([O, O, E, X, X, E, E, E, E]);

        let mv = searcher.search(&board, Mark::Human).unwrap();

        assert_eq!(mv, Move { index: 2, score: LOSS_SCORE });
    }

    #[test]
    fn last_empty_cell_is_chosen() {
        let mut searcher = Searcher::new();
        let board = Board::from_cells([X, O, X, X, O, O, O, X, E]);

        let mv = searcher.search(&board, Mark::Computer).unwrap();

        assert_eq!(mv, Move { index: 8, score: TIE_SCORE });
    }

    #[test]
    fn decided_or_full_board_has_no_move() {
        let mut searcher = Searcher::new();
        let won = Board::from_cells([X, X, X, O, O, E, E, E, E]);
        let full = Board::from_cells([X, O, X, X, O, O, O, X, X]);

        assert_eq!(searcher.search(&won, Mark::Human), None);
        assert_eq!(searcher.search(&full, Mark::Computer), None);
        assert_eq!(searcher.stats().nodes, 0);
    }

    #[test]
    fn search_leaves_board_untouched() {
        let mut searcher = Searcher::new();
        let board = Board::from_cells([O, E, E, E, X, E, E, E, O]);
        let before = board;

        let _ = searcher.search(&board, Mark::Computer);

        assert_eq!(board, before);
    }

    #[test]
    fn equal_scores_keep_lowest_index() {
        let candidate = Move { index: 5, score: 0 };
        let best = Some(Move { index: 1, score: 0 });

        assert!(!is_better_move(Mark::Computer, candidate, best));
        assert!(!is_better_move(Mark::Human, candidate, best));
        assert!(is_better_move(Mark::Computer, candidate, None));
    }
}
