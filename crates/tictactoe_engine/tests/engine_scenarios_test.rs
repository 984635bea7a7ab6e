//! Scenario tests for the game engine.

use tictactoe_engine::{Board, Cell, GameEngine, GameStatus, Intent, Mark, MoveOutcome, Position};

fn play(engine: &mut GameEngine, moves: &[usize]) {
    for &index in moves {
        let outcome = engine.apply_move(index);
        assert!(outcome.is_applied(), "move {index} rejected: {outcome:?}");
    }
}

fn board(cells: &str) -> Board {
    let mut cells_out = [Cell::Empty; 9];
    for (cell, ch) in cells_out.iter_mut().zip(cells.chars()) {
        *cell = match ch {
            'X' => Cell::Occupied(Mark::X),
            'O' => Cell::Occupied(Mark::O),
            _ => Cell::Empty,
        };
    }
    Board::from_cells(cells_out)
}

#[test]
fn test_x_completes_top_row() {
    let mut engine = GameEngine::with_seed(1);
    play(&mut engine, &[0, 3, 1, 4]);
    assert_eq!(engine.state().board(), &board("XX_OO____"));

    let outcome = engine.apply_move(2);

    assert!(matches!(outcome, MoveOutcome::Won(_)));
    let state = engine.state();
    assert_eq!(state.status().winner(), Some(Mark::X));
    assert_eq!(
        state.winning_line(),
        Some([Position::TopLeft, Position::TopCenter, Position::TopRight])
    );
    assert_eq!(state.scores().x(), 1);
    assert_eq!(state.scores().o(), 0);
    assert_eq!(state.scores().draws(), 0);
    assert_eq!(state.history().len(), 1);
    assert_eq!(state.history()[0].winner(), &Some(Mark::X));
    assert_eq!(state.history()[0].board(), &board("XXXOO____"));
}

#[test]
fn test_full_board_without_line_is_draw() {
    let mut engine = GameEngine::with_seed(1);
    play(&mut engine, &[0, 1, 2, 4, 3, 5, 7, 6]);
    assert_eq!(engine.state().status(), &GameStatus::Playing);

    assert_eq!(engine.apply_move(8), MoveOutcome::Drawn);

    let state = engine.state();
    assert_eq!(state.board(), &board("XOXXOOOXX"));
    assert_eq!(state.status(), &GameStatus::Draw);
    assert_eq!(state.winning_line(), None);
    assert_eq!(state.scores().draws(), 1);
    assert_eq!(state.scores().total(), 1);
    assert_eq!(state.history()[0].winner(), &None);
    assert_eq!(state.status_message(), "It's a draw!");
}

#[test]
fn test_undo_after_three_moves() {
    let mut engine = GameEngine::with_seed(1);
    play(&mut engine, &[4, 0]);
    let after_two = engine.state().clone();
    play(&mut engine, &[8]);

    assert!(engine.undo());

    let state = engine.state();
    assert_eq!(state.board(), after_two.board());
    assert_eq!(state.next(), after_two.next());
    assert_eq!(state.status(), &GameStatus::Playing);
    assert_eq!(state.winning_line(), None);
    assert_eq!(state.scores(), after_two.scores());
    assert_eq!(state.history(), after_two.history());
}

#[test]
fn test_undo_walks_back_every_move() {
    let mut engine = GameEngine::with_seed(1);
    let moves = [4, 0, 8, 2, 1, 7];
    let mut states = vec![engine.state().clone()];
    for index in moves {
        engine.apply_move(index);
        states.push(engine.state().clone());
    }

    for expected in states.iter().rev().skip(1) {
        assert!(engine.undo());
        assert_eq!(engine.state().board(), expected.board());
        assert_eq!(engine.state().next(), expected.next());
    }
    assert!(!engine.undo());
}

#[test]
fn test_reset_stats_after_several_games() {
    let mut engine = GameEngine::with_seed(1);
    play(&mut engine, &[0, 3, 1, 4, 2]);
    engine.reset_game();
    play(&mut engine, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    engine.reset_game();
    play(&mut engine, &[4, 0, 8, 1, 7]);
    play(&mut engine, &[2]);
    assert_eq!(engine.state().scores().total(), 3);
    assert_eq!(engine.state().scores().o(), 1);

    engine.reset_stats();

    let state = engine.state();
    assert_eq!(state.scores().x(), 0);
    assert_eq!(state.scores().o(), 0);
    assert_eq!(state.scores().draws(), 0);
    assert!(state.history().is_empty());
    assert_eq!(state.board(), &Board::new());
    assert_eq!(state.undo_depth(), 0);
    assert_eq!(state.next(), Mark::X);
}

#[test]
fn test_status_messages_use_names() {
    let mut engine = GameEngine::with_seed(1);
    engine.dispatch(Intent::SetPlayerName(Mark::X, "Ada".into()));
    engine.dispatch(Intent::SetPlayerName(Mark::O, "Grace".into()));
    assert_eq!(engine.state().status_message(), "Next player: Ada");

    play(&mut engine, &[4]);
    assert_eq!(engine.state().status_message(), "Next player: Grace");

    play(&mut engine, &[0, 3, 1, 5]);
    assert_eq!(engine.state().status_message(), "Player Ada wins!");
}

#[test]
fn test_blank_name_falls_back_to_mark() {
    let mut engine = GameEngine::with_seed(1);
    engine.set_name(Mark::X, "   ");
    assert_eq!(engine.state().status_message(), "Next player: X");
}

#[test]
fn test_ai_game_against_itself_finishes() {
    let mut engine = GameEngine::with_seed(99);
    engine.set_ai_enabled(true);

    while !engine.state().status().is_over() {
        let pos = Position::valid_moves(engine.state().board())[0];
        engine.apply_move(pos.to_index());
        if let Some(outcome) = engine.play_ai_move() {
            assert!(outcome.is_applied());
        }
    }

    assert_eq!(engine.state().scores().total(), 1);
    assert_eq!(engine.state().history().len(), 1);
}

#[test]
fn test_snapshot_serializes_to_json() {
    let mut engine = GameEngine::with_seed(1);
    play(&mut engine, &[0, 3, 1, 4, 2]);

    let json = serde_json::to_value(engine.state()).expect("state serializes");
    assert_eq!(json["scores"]["x"], 1);
    assert_eq!(json["next"], "O");
    assert_eq!(json["history"].as_array().map(Vec::len), Some(1));
}
