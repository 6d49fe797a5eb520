//! Game state and core simulation types
//!
//! A `GameState` is one play session: it is created once by the host and
//! reused across every replay. All transitions between phases go through it.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::Config;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Side effects emitted by the simulation, consumed by audio/render hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new game began (from the menu or a restart)
    Started,
    /// Bird received an upward impulse
    Flapped,
    /// Bird cleared one pipe
    Scored,
    /// Bird hit a pipe or fell off the bottom
    Died,
    /// Score threshold crossed, pipes and tick rate sped up
    SpeedUp,
}

/// The player's bird
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Top-left corner
    pub pos: IVec2,
    pub size: IVec2,
}

impl Bird {
    pub fn new(config: &Config) -> Self {
        Self {
            pos: config.bird_start(),
            size: IVec2::new(config.bird_width, config.bird_height),
        }
    }

    /// Move back to the starting position
    pub fn reset(&mut self, config: &Config) {
        self.pos = config.bird_start();
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Which half of a pair a pipe is (selects the sprite only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipeKind {
    Top,
    Bottom,
}

/// A single pipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub pos: IVec2,
    pub size: IVec2,
    pub kind: PipeKind,
    /// Set once the bird has cleared this pipe; never unset
    pub passed: bool,
}

impl Pipe {
    pub fn new(kind: PipeKind, x: i32, y: i32, config: &Config) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(config.pipe_width, config.pipe_height),
            kind,
            passed: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Right edge (the trailing edge while scrolling left)
    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// Number of unit samples drawn so far
    pub draws: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    /// Rebuild the generator at the recorded position
    ///
    /// Each `f64` sample consumes one `u64`, i.e. two 32-bit PCG steps.
    pub fn to_rng(&self) -> Pcg32 {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        rng.advance(self.draws.wrapping_mul(2));
        rng
    }
}

/// Input commands delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Space bar / tap
    Flap,
    /// Start button on the menu
    Start,
    /// Restart button on the game-over panel
    Restart,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: Config,
    pub phase: GamePhase,
    pub bird: Bird,
    /// Bird vertical velocity (positive = falling)
    pub velocity_y: i32,
    /// Pipe horizontal velocity (negative = leftward)
    pub velocity_x: i32,
    /// Active pipes, in spawn order (top then bottom of each pair)
    pub pipes: Vec<Pipe>,
    pub score: f64,
    /// Terminal flag, set together with `GamePhase::GameOver`
    pub game_over: bool,
    /// Current simulation tick rate
    pub tick_rate_hz: u32,
    /// Whether the score speed-up has been applied this game
    pub sped_up: bool,
    /// Incremented on every start/restart
    pub game_number: u32,
    /// Ticks simulated in the current game
    pub time_ticks: u64,
    /// Pairs spawned in the current game
    pub pairs_spawned: u64,
    pub rng_state: RngState,
    #[serde(skip, default = "unseeded_rng")]
    rng: Pcg32,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

fn unseeded_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl GameState {
    /// Create a session with the default arcade config
    pub fn new(seed: u64) -> Self {
        Self::with_config(Config::default(), seed)
    }

    pub fn with_config(config: Config, seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        Self {
            bird: Bird::new(&config),
            velocity_y: 0,
            velocity_x: config.pipe_velocity_x,
            pipes: Vec::new(),
            score: 0.0,
            game_over: false,
            tick_rate_hz: config.base_tick_rate_hz,
            sped_up: false,
            game_number: 0,
            time_ticks: 0,
            pairs_spawned: 0,
            phase: GamePhase::Menu,
            rng: rng_state.to_rng(),
            rng_state,
            events: Vec::new(),
            config,
        }
    }

    /// Re-sync the generator after deserializing
    pub fn restore_rng(&mut self) {
        self.rng = self.rng_state.to_rng();
    }

    /// Draw a uniform sample in [0, 1)
    pub fn next_unit(&mut self) -> f64 {
        self.rng_state.draws += 1;
        self.rng.random()
    }

    /// Score as shown on screen
    #[inline]
    pub fn display_score(&self) -> u64 {
        self.score as u64
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events emitted since the last drain, oldest first
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Menu → Playing. Returns false in any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            return false;
        }
        self.begin_game();
        true
    }

    /// GameOver → Playing. Returns false in any other phase.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.begin_game();
        true
    }

    /// Flap while playing, or start the game from the menu.
    /// Ignored after game over; only the restart command leaves that phase.
    pub fn flap(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => {
                self.velocity_y = self.config.jump_velocity;
                self.emit(GameEvent::Flapped);
                true
            }
            GamePhase::Menu => self.start(),
            GamePhase::GameOver => false,
        }
    }

    /// Apply a host command. Returns whether it caused a change.
    pub fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Flap => self.flap(),
            Command::Start => self.start(),
            Command::Restart => self.restart(),
        }
    }

    fn begin_game(&mut self) {
        self.bird.reset(&self.config);
        self.velocity_y = 0;
        self.velocity_x = self.config.pipe_velocity_x;
        self.pipes.clear();
        self.score = 0.0;
        self.game_over = false;
        self.tick_rate_hz = self.config.base_tick_rate_hz;
        self.sped_up = false;
        self.time_ticks = 0;
        self.pairs_spawned = 0;
        self.game_number += 1;
        self.phase = GamePhase::Playing;
        self.emit(GameEvent::Started);
        log::info!("Game {} started", self.game_number);
    }

    /// Playing → GameOver. Repeated calls within the same game are no-ops,
    /// so `Died` fires once even when several hazards trigger together.
    pub(crate) fn end_game(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.game_over = true;
        self.phase = GamePhase::GameOver;
        self.emit(GameEvent::Died);
        log::info!(
            "Game {} over after {} ticks, score {}",
            self.game_number,
            self.time_ticks,
            self.display_score()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_in_menu() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.bird.pos, IVec2::new(50, 320));
        assert_eq!(state.bird.size, IVec2::new(34, 24));
        assert!(state.pipes.is_empty());
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_flap_in_menu_starts_game() {
        let mut state = GameState::new(1);
        assert!(state.handle_command(Command::Flap));
        assert_eq!(state.phase, GamePhase::Playing);
        // Starting does not also apply an impulse
        assert_eq!(state.velocity_y, 0);
        assert_eq!(state.drain_events(), vec![GameEvent::Started]);
    }

    #[test]
    fn test_flap_while_playing_sets_velocity() {
        let mut state = GameState::new(1);
        state.start();
        state.velocity_y = 12;
        assert!(state.flap());
        assert_eq!(state.velocity_y, -9);
        assert_eq!(state.pending_events().last(), Some(&GameEvent::Flapped));
    }

    #[test]
    fn test_commands_outside_their_phase_are_ignored() {
        let mut state = GameState::new(1);
        assert!(!state.handle_command(Command::Restart));
        assert_eq!(state.phase, GamePhase::Menu);

        state.start();
        assert!(!state.handle_command(Command::Start));
        assert!(!state.handle_command(Command::Restart));

        state.end_game();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.handle_command(Command::Flap));
        assert!(!state.handle_command(Command::Start));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.handle_command(Command::Restart));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_end_game_fires_died_once() {
        let mut state = GameState::new(1);
        state.start();
        state.drain_events();
        state.end_game();
        state.end_game();
        assert!(state.game_over);
        assert_eq!(state.drain_events(), vec![GameEvent::Died]);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut state = GameState::new(1);
        state.start();
        state.bird.pos = IVec2::new(50, 10);
        state.velocity_y = 7;
        state.velocity_x = -6;
        state.tick_rate_hz = 75;
        state.sped_up = true;
        state.score = 12.5;
        state.pipes.push(Pipe::new(PipeKind::Top, 100, -200, &state.config));
        state.end_game();

        assert!(state.restart());
        assert_eq!(state.bird.pos, IVec2::new(50, 320));
        assert_eq!(state.velocity_y, 0);
        assert_eq!(state.velocity_x, -4);
        assert_eq!(state.tick_rate_hz, 60);
        assert!(!state.sped_up);
        assert!(!state.game_over);
        assert_eq!(state.score, 0.0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.game_number, 2);
    }

    #[test]
    fn test_rng_restores_after_serde() {
        let mut state = GameState::new(42);
        state.next_unit();
        state.next_unit();

        let json = serde_json::to_string(&state).unwrap();
        let mut restored: GameState = serde_json::from_str(&json).unwrap();
        restored.restore_rng();

        assert_eq!(state.next_unit(), restored.next_unit());
    }

    #[test]
    fn test_rng_jumps_to_recorded_position() {
        let mut state = GameState::new(99);
        for _ in 0..10_000 {
            state.next_unit();
        }
        assert_eq!(state.rng_state.draws, 10_000);

        let mut rng = state.rng_state.to_rng();
        for _ in 0..5 {
            let expected: f64 = rng.random();
            assert_eq!(state.next_unit(), expected);
        }
    }

    #[test]
    fn test_rng_restore_at_huge_draw_count_is_immediate() {
        let rng_state = RngState {
            seed: 3,
            draws: u64::MAX / 4,
        };
        let mut rng = rng_state.to_rng();
        let u: f64 = rng.random();
        assert!((0.0..1.0).contains(&u));
    }

    #[test]
    fn test_unit_samples_in_range() {
        let mut state = GameState::new(7);
        for _ in 0..1000 {
            let u = state.next_unit();
            assert!((0.0..1.0).contains(&u));
        }
    }
}
