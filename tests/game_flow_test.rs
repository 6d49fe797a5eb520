use flappy::audio::{NullAudio, play_events};
use flappy::render::{Frame, NullRenderer, RenderSink};
use flappy::sim::{
    Command, GameEvent, GamePhase, GameState, TickInput, pipe_pair, spawn_pipes, tick,
};
use flappy::{Config, Scheduler};
use glam::IVec2;

fn count(events: &[GameEvent], kind: GameEvent) -> usize {
    events.iter().filter(|e| **e == kind).count()
}

#[test]
fn test_weightless_bird_plays_forever() {
    let config = Config {
        gravity: 0,
        pipe_velocity_x: 0,
        ..Config::default()
    };
    let mut state = GameState::with_config(config, 1);
    state.handle_command(Command::Start);

    for _ in 0..10_000 {
        tick(&mut state, &TickInput::default());
    }
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.bird.pos, IVec2::new(50, 320));
    assert_eq!(state.time_ticks, 10_000);
}

#[test]
fn test_overlapping_pair_ends_game() {
    let mut state = GameState::new(1);
    state.handle_command(Command::Start);
    state.drain_events();

    for mut pipe in pipe_pair(&state.config, -128) {
        pipe.pos.x = 0;
        state.pipes.push(pipe);
    }
    tick(&mut state, &TickInput::default());

    assert_eq!(state.phase, GamePhase::GameOver);
    let events = state.drain_events();
    assert_eq!(count(&events, GameEvent::Died), 1);
}

#[test]
fn test_falling_off_bottom_ends_game() {
    let config = Config {
        gravity: 0,
        ..Config::default()
    };
    let mut state = GameState::with_config(config, 1);
    state.handle_command(Command::Start);
    state.bird.pos.y = state.config.board_height + 1;

    tick(&mut state, &TickInput::default());
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(count(&state.drain_events(), GameEvent::Died), 1);
}

#[test]
fn test_pair_geometry() {
    let config = Config::default();
    assert_eq!(config.opening_space(), 160);
    let [top, bottom] = pipe_pair(&config, 100);
    assert_eq!(top.pos.y, 100);
    assert_eq!(bottom.pos.y, 772);
}

#[test]
fn test_spawned_pairs_keep_gap() {
    let mut state = GameState::new(2024);
    state.handle_command(Command::Start);
    for _ in 0..200 {
        spawn_pipes(&mut state);
    }
    for pair in state.pipes.chunks(2) {
        assert_eq!(pair[1].pos.y - pair[0].pos.y, 512 + 160);
        assert!(pair[0].pos.y <= -128 && pair[0].pos.y > -384);
    }
}

#[test]
fn test_restart_after_speed_up_resets_everything() {
    let mut state = GameState::new(1);
    state.handle_command(Command::Start);
    spawn_pipes(&mut state);
    state.score = 1000.0;
    state.flap();
    tick(&mut state, &TickInput::default());
    assert_eq!(state.velocity_x, -6);
    assert_eq!(state.tick_rate_hz, 75);

    state.bird.pos.y = 1000;
    tick(&mut state, &TickInput::default());
    assert_eq!(state.phase, GamePhase::GameOver);

    assert!(state.handle_command(Command::Restart));
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.bird.pos, IVec2::new(50, 320));
    assert_eq!(state.velocity_y, 0);
    assert_eq!(state.velocity_x, -4);
    assert_eq!(state.tick_rate_hz, 60);
    assert!(state.pipes.is_empty());
    assert_eq!(state.score, 0.0);
    assert!(!state.game_over);
}

#[test]
fn test_pipes_accumulate_without_pruning() {
    let config = Config {
        prune_offscreen_pipes: false,
        ..Config::default()
    };
    let mut scheduler = Scheduler::new();
    let mut state = GameState::with_config(config, 9);
    state.handle_command(Command::Start);

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    for _ in 0..(30_000 / 16) {
        scheduler.advance(&mut state, 16, &input);
    }
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.pipes.len() as u64, state.pairs_spawned * 2);
    assert!(state.pairs_spawned >= 19);
}

#[test]
fn test_autopilot_session_with_null_sinks() {
    let mut scheduler = Scheduler::new();
    let mut state = GameState::new(7);
    let mut audio = NullAudio;
    let mut renderer = NullRenderer;
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut scored = 0;
    let mut last_score = 0.0;
    for _ in 0..(60_000 / 16) {
        scheduler.advance(&mut state, 16, &input);
        let events = state.drain_events();
        scored += count(&events, GameEvent::Scored);
        play_events(&mut audio, &events);
        renderer.render(&Frame::capture(&state));

        assert!(state.score >= last_score);
        assert!(state.bird.pos.y >= 0);
        last_score = state.score;
    }

    assert_eq!(state.phase, GamePhase::Playing);
    assert!(state.display_score() >= 30, "score {}", state.score);
    assert_eq!(scored as f64 * 0.5, state.score);
    // Passed pipes are pruned once off-screen
    assert!(state.pipes.len() <= 8);
}
