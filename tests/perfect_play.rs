//! Minimax against minimax, and minimax against every possible human line.

use tictactoe::ai::Searcher;
use tictactoe::game::FirstEmptySelector;
use tictactoe::{Board, Game, GameEvent, Mark, Outcome};

fn play_optimal_game() -> Board {
    let mut board = Board::new();
    let mut searcher = Searcher::new();
    let mut mover = Mark::Human;

    while !board.outcome().is_terminal() {
        let mv = searcher
            .search(&board, mover)
            .expect("undecided board has a move");
        board.place(mv.index, mover).expect("search returns an empty cell");
        mover = mover.opponent();
    }
    board
}

#[test]
fn optimal_play_from_empty_board_is_a_tie() {
    let board = play_optimal_game();

    assert_eq!(board.outcome(), Outcome::Tie);
}

/// Tries every human reply; the computer answers with minimax each time.
fn explore(board: Board, searcher: &mut Searcher, human_wins: &mut u32, games: &mut u32) {
    for index in board.empty_cells() {
        let mut next = board;
        next.place(index, Mark::Human).expect("empty cell");

        if !next.outcome().is_terminal() {
            let reply = searcher
                .search(&next, Mark::Computer)
                .expect("undecided board has a move");
            next.place(reply.index, Mark::Computer)
                .expect("search returns an empty cell");
        }

        match next.outcome() {
            Outcome::InProgress => explore(next, searcher, human_wins, games),
            Outcome::HumanWin(_) => {
                *games += 1;
                *human_wins += 1;
            }
            _ => *games += 1,
        }
    }
}

#[test]
fn computer_never_loses_against_any_human_line() {
    let mut human_wins = 0;
    let mut games = 0;

    explore(Board::new(), &mut Searcher::new(), &mut human_wins, &mut games);

    assert!(games > 0);
    assert_eq!(human_wins, 0);
}

#[test]
fn computer_punishes_a_careless_human() {
    // The human always takes the first empty cell.
    let human = FirstEmptySelector;
    let mut game = Game::with_minimax();
    let mut last = Vec::new();

    while !game.is_over() {
        let index = tictactoe::MoveSelector::select_move(&human, game.board(), Mark::Human)
            .expect("game not over");
        last = game.on_cell_activated(index);
    }

    assert!(matches!(
        last.last(),
        Some(GameEvent::GameEnded {
            outcome: Outcome::ComputerWin(_)
        })
    ));
}
