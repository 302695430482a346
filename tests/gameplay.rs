use tetris::brick::BrickKind;
use tetris::game::{Command, Difficulty, Game, GameEvent, Phase, CLEAR_DELAY};
use tetris::generator::{RandomBrickGenerator, SequenceGenerator};
use tetris::grid::{GRID_HEIGHT, GRID_WIDTH};

fn scripted(kinds: &[BrickKind]) -> Game {
    let mut game = Game::new(Box::new(SequenceGenerator::new(kinds.to_vec())), Difficulty::Normal, 0);
    assert!(game.start().is_empty());
    game
}

fn drop_at(game: &mut Game, lefts: u32, rights: u32) -> Vec<GameEvent> {
    for _ in 0..lefts {
        game.handle(Command::MoveLeft);
    }
    for _ in 0..rights {
        game.handle(Command::MoveRight);
    }
    game.handle(Command::HardDrop)
}

fn finish_flash(game: &mut Game) -> Vec<GameEvent> {
    game.tick(CLEAR_DELAY + 0.01, false)
}

#[test]
fn open_last_column_clears_nothing() {
    let mut game = scripted(&[
        BrickKind::O,
        BrickKind::O,
        BrickKind::O,
        BrickKind::O,
        BrickKind::I,
    ]);
    // O sits in matrix columns 1..=2, spawned at x = 3 (board columns 4..=5).
    drop_at(&mut game, 4, 0); // columns 0..=1
    drop_at(&mut game, 2, 0); // columns 2..=3
    drop_at(&mut game, 0, 0); // columns 4..=5
    drop_at(&mut game, 0, 2); // columns 6..=7

    // Vertical I occupies matrix column 2; x = 6 puts it in column 8.
    game.handle(Command::RotateClockwise);
    let events = drop_at(&mut game, 0, 3);
    assert!(events.contains(&GameEvent::Locked));
    // Column 9 is still empty, nothing to clear.
    assert_eq!(*game.phase(), Phase::Falling);
    let bottom = GRID_HEIGHT - 1;
    assert_eq!(game.board().grid().cell(8, bottom), Some(BrickKind::I));
    assert_eq!(game.board().grid().cell(9, bottom), None);
}

#[test]
fn tetris_clears_four_rows_and_scores() {
    let mut game = scripted(&[BrickKind::I]);
    let bottom = GRID_HEIGHT - 1;
    for row in bottom - 3..=bottom {
        game.board_mut().grid_mut().fill_row(row, BrickKind::Z, &[GRID_WIDTH - 1]);
    }
    // Put one stray cell above the well so we can see it shift.
    game.board_mut().grid_mut().set(0, bottom - 4, Some(BrickKind::T));

    game.handle(Command::RotateClockwise);
    let events = drop_at(&mut game, 0, 4);
    assert!(events.contains(&GameEvent::Locked));
    assert_eq!(game.clearing_rows().len(), 4);

    let events = finish_flash(&mut game);
    assert_eq!(events, vec![GameEvent::LinesCleared { count: 4, bonus: 800 }]);
    assert_eq!(game.board().score().lines(), 4);
    assert_eq!(game.board().grid().cell(0, bottom), Some(BrickKind::T));
    assert_eq!(game.board().grid().stack_height(), 1);
}

#[test]
fn tenth_line_levels_up() {
    let mut game = scripted(&[BrickKind::I]);
    let bottom = GRID_HEIGHT - 1;
    for _ in 0..10 {
        game.board_mut().grid_mut().fill_row(bottom, BrickKind::L, &[3, 4, 5, 6]);
        drop_at(&mut game, 0, 0);
        let events = finish_flash(&mut game);
        assert!(matches!(events[0], GameEvent::LinesCleared { count: 1, .. }));
        if game.board().score().lines() == 10 {
            assert!(events.contains(&GameEvent::LevelUp { level: 1 }));
        }
    }
    assert_eq!(game.board().score().level(), 1);
    assert!(game.fall_interval(false) < 1.0 / Difficulty::Normal.base_speed());
}

#[test]
fn stacking_to_the_top_ends_the_game() {
    let mut game = scripted(&[BrickKind::O]);
    let mut over = false;
    for _ in 0..GRID_HEIGHT {
        let events = game.handle(Command::HardDrop);
        if events.contains(&GameEvent::GameOver) {
            over = true;
            break;
        }
    }
    assert!(over);
    assert!(game.is_over());
    assert!(game.handle(Command::MoveLeft).is_empty());
    assert!(game.view().brick.is_none());
}

#[test]
fn restart_clears_board_and_score() {
    let mut game = scripted(&[BrickKind::O]);
    while !game.is_over() {
        game.handle(Command::HardDrop);
    }
    assert!(game.start().is_empty());
    assert_eq!(game.board().score().points(), 0);
    assert_eq!(game.board().grid().stack_height(), 0);
    assert!(!game.is_over());
}

#[test]
fn random_play_never_overlaps_locked_cells() {
    let mut game = Game::new(Box::new(RandomBrickGenerator::seeded(2024)), Difficulty::Hard, 0);
    game.start();
    let commands = [
        Command::MoveLeft,
        Command::RotateClockwise,
        Command::MoveRight,
        Command::RotateCounterClockwise,
        Command::SoftDrop,
        Command::Hold,
    ];
    for step in 0..5_000 {
        if game.is_over() {
            break;
        }
        game.handle(commands[step % commands.len()]);
        game.tick(0.05, step % 7 == 0);
        if let Some(brick) = game.view().brick {
            assert!(!game
                .board()
                .grid()
                .intersects(&brick.shape(), brick.x(), brick.y()));
        }
    }
}
