use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::game::PLAYER_START_FOOD;
use crate::game::board::{setup_scene, BoardConfig, PLAYER_START};
use crate::game::types::{Count, Direction, Enemy, EnemyKind, Pickup, PickupKind, Position};
use crate::game::{ActionError, GameEvent, GameState, Phase};

fn empty_level(seed: u64) -> GameState {
    let config = BoardConfig {
        wall_count: Count::new(0, 0),
        food_count: Count::new(0, 0),
        ..BoardConfig::default()
    };
    let mut state = GameState::with_config(seed, config);
    state.finish_intro();
    state
}

#[test]
fn test_same_seed_same_board() {
    let a = GameState::new(1234);
    let b = GameState::new(1234);
    assert_eq!(a.board, b.board);

    let mut rng = StdRng::seed_from_u64(99);
    let c = setup_scene(&BoardConfig::default(), 1, &mut rng);
    assert!(c.enemies.is_empty());
}

#[test]
fn test_new_run_starts_with_intro() {
    let state = GameState::new(1);
    assert_eq!(state.level, 1);
    assert_eq!(state.phase, Phase::LevelIntro);
    assert_eq!(state.player.pos, PLAYER_START);
    assert_eq!(state.player.food, PLAYER_START_FOOD);
    assert_eq!(state.level_text(), "Day 1");
}

#[test]
fn test_input_rejected_during_intro() {
    let mut state = GameState::new(1);
    let before = state.player.clone();
    assert_eq!(state.apply_player_action(Direction::Up), Err(ActionError::NotPlayersTurn));
    assert_eq!(state.player, before);
    assert!(state.finish_intro());
    assert!(!state.finish_intro());
}

#[test]
fn test_player_move_hands_turn_to_enemies() {
    let mut state = empty_level(5);
    let events = state.apply_player_action(Direction::Up).unwrap();
    assert_eq!(events, vec![GameEvent::PlayerMoved { from: Position::new(0, 0), to: Position::new(0, 1) }]);
    assert_eq!(state.phase, Phase::EnemyTurn { next: 0 });
    assert_eq!(state.apply_player_action(Direction::Up), Err(ActionError::NotPlayersTurn));

    // No enemies on day 1: the first step hands the turn straight back.
    assert_eq!(state.move_next_enemy(), Some(vec![]));
    assert_eq!(state.phase, Phase::PlayerTurn);
    assert_eq!(state.move_next_enemy(), None);
    assert_eq!(state.level_text(), "Food: 99");
}

#[test]
fn test_enemies_move_in_order_and_see_each_other() {
    let mut state = empty_level(5);
    state.board.enemies = vec![
        Enemy::new(0, Position::new(2, 0), EnemyKind::Weak),
        Enemy::new(1, Position::new(3, 0), EnemyKind::Weak),
    ];
    state.apply_player_action(Direction::Up).unwrap();

    let events = state.move_enemies();
    // Enemy 0 steps left; enemy 1 then moves into the cell enemy 0 just left.
    assert_eq!(events, vec![
        GameEvent::EnemyMoved { id: 0, from: Position::new(2, 0), to: Position::new(1, 0) },
        GameEvent::EnemyMoved { id: 1, from: Position::new(3, 0), to: Position::new(2, 0) },
    ]);
    assert_eq!(state.phase, Phase::PlayerTurn);
}

#[test]
fn test_reaching_exit_completes_level_and_keeps_food() {
    let mut state = empty_level(8);
    state.player.pos = Position::new(7, 6);
    let events = state.apply_player_action(Direction::Up).unwrap();
    assert!(events.contains(&GameEvent::LevelCompleted { level: 1 }));
    assert_eq!(state.phase, Phase::LevelComplete);
    assert_eq!(state.move_enemies(), vec![]);

    let food = state.player.food;
    assert_eq!(state.next_level(), Ok(GameEvent::LevelStarted { level: 2 }));
    assert_eq!(state.level, 2);
    assert_eq!(state.phase, Phase::LevelIntro);
    assert_eq!(state.player.pos, PLAYER_START);
    assert_eq!(state.player.food, food);
    assert_eq!(state.board.enemies.len(), 1);
    assert_eq!(state.level_text(), "Day 2");
}

#[test]
fn test_next_level_rejected_mid_day() {
    let mut state = empty_level(8);
    assert_eq!(state.next_level(), Err(ActionError::LevelInProgress));
    assert_eq!(state.restart(), Err(ActionError::LevelInProgress));
}

#[test]
fn test_starving_on_last_step_ends_game() {
    let mut state = empty_level(3);
    state.player.food = 1;
    let events = state.apply_player_action(Direction::Right).unwrap();
    assert_eq!(events.last(), Some(&GameEvent::Starved { days: 1 }));
    assert_eq!(state.phase, Phase::GameOver);
    assert_eq!(state.level_text(), "After 1 days, you starved.");
    assert_eq!(state.apply_player_action(Direction::Right), Err(ActionError::GameOver));
}

#[test]
fn test_pickup_saves_a_starving_player() {
    let mut state = empty_level(3);
    state.player.food = 1;
    state.board.pickups.push(Pickup { pos: Position::new(1, 0), kind: PickupKind::Food });
    state.apply_player_action(Direction::Right).unwrap();
    assert_eq!(state.player.food, 10);
    assert_eq!(state.phase, Phase::EnemyTurn { next: 0 });
}

#[test]
fn test_enemy_attack_can_end_the_game() {
    let mut state = empty_level(3);
    state.player.food = 15;
    state.board.enemies = vec![
        Enemy::new(0, Position::new(1, 1), EnemyKind::Strong),
        Enemy::new(1, Position::new(3, 1), EnemyKind::Weak),
    ];
    // Player steps up to (0, 1); enemy 0 is then adjacent.
    state.apply_player_action(Direction::Up).unwrap();

    let events = state.move_next_enemy().unwrap();
    assert_eq!(events, vec![
        GameEvent::EnemyAttacked { id: 0, damage: 20, food: 0 },
        GameEvent::Starved { days: 1 },
    ]);
    assert_eq!(state.phase, Phase::GameOver);
    // The remaining enemy does not act after the game ended.
    assert_eq!(state.move_next_enemy(), None);
    assert_eq!(state.board.enemies[1].pos, Position::new(3, 1));
}

#[test]
fn test_restart_after_game_over() {
    let mut state = empty_level(3);
    state.player.food = 1;
    state.apply_player_action(Direction::Right).unwrap();
    let old_seed = state.seed;

    assert_eq!(state.restart(), Ok(GameEvent::LevelStarted { level: 1 }));
    assert_ne!(state.seed, old_seed);
    assert_eq!(state.level, 1);
    assert_eq!(state.player.food, PLAYER_START_FOOD);
    assert_eq!(state.phase, Phase::LevelIntro);
}

#[test]
fn test_enemy_turn_lead_in_doubles_without_enemies() {
    let mut state = empty_level(3);
    let empty = state.enemy_turn_lead_in();
    state.board.enemies.push(Enemy::new(0, Position::new(4, 4), EnemyKind::Weak));
    assert_eq!(empty, state.enemy_turn_lead_in() * 2);
}
