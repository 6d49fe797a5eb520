//! Fixed-rate timers driving the simulation
//!
//! Two timers run while a game is playing: the simulation tick
//! (`1000 / tick_rate_hz` ms) and the pipe spawner (`spawn_period_ms`).
//! Both start when a game begins and stop together in the tick that ends it.
//! The host feeds wall-clock deltas into [`Scheduler::advance`]; due timers
//! fire in timestamp order, the tick first when both are due together.

use crate::consts::MAX_CATCH_UP_MS;
use crate::sim::{GamePhase, GameState, TickInput, spawn_pipes, tick};
use crate::tick_interval_ms;

/// What one call to [`Scheduler::advance`] did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    pub ticks: u32,
    pub spawns: u32,
}

/// Timer pair for one session
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    /// Scheduler clock (ms)
    now_ms: u64,
    next_tick_ms: Option<u64>,
    next_spawn_ms: Option<u64>,
    /// Game the timers were started for
    game_number: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_running(&self) -> bool {
        self.next_tick_ms.is_some()
    }

    /// Start or stop the timers to match the game phase
    pub fn sync(&mut self, state: &GameState) {
        let playing = state.phase == GamePhase::Playing;
        if playing && (!self.is_running() || self.game_number != state.game_number) {
            self.start(state);
        } else if !playing && self.is_running() {
            self.stop();
        }
    }

    fn start(&mut self, state: &GameState) {
        self.game_number = state.game_number;
        self.next_tick_ms = Some(self.now_ms + tick_interval_ms(state.tick_rate_hz));
        self.next_spawn_ms = Some(self.now_ms + state.config.spawn_period_ms);
        log::debug!("Timers started for game {} at {} ms", state.game_number, self.now_ms);
    }

    fn stop(&mut self) {
        self.next_tick_ms = None;
        self.next_spawn_ms = None;
        log::debug!("Timers stopped at {} ms", self.now_ms);
    }

    /// Run one simulation tick immediately, stopping the timers if it ends the game
    pub fn tick_now(&mut self, state: &mut GameState, input: &TickInput) {
        tick(state, input);
        self.sync(state);
    }

    /// Spawn one pipe pair immediately
    pub fn spawn_now(&mut self, state: &mut GameState) {
        spawn_pipes(state);
    }

    /// Advance host time by `elapsed_ms`, firing every due timer
    ///
    /// A flap in `input` is applied at once (it starts the game from the
    /// menu, as does idle mode); the ticks that follow see only `idle_mode`.
    /// Deltas longer than `MAX_CATCH_UP_MS` are clamped.
    pub fn advance(
        &mut self,
        state: &mut GameState,
        elapsed_ms: u64,
        input: &TickInput,
    ) -> AdvanceReport {
        if input.flap || (input.idle_mode && state.phase == GamePhase::Menu) {
            state.flap();
        }
        let input = TickInput {
            flap: false,
            ..input.clone()
        };

        let target = self.now_ms + elapsed_ms.min(MAX_CATCH_UP_MS);
        let mut report = AdvanceReport::default();
        self.sync(state);

        while let (Some(tick_at), Some(spawn_at)) = (self.next_tick_ms, self.next_spawn_ms) {
            let due = tick_at.min(spawn_at);
            if due > target {
                break;
            }
            self.now_ms = due;

            if tick_at <= spawn_at {
                self.tick_now(state, &input);
                report.ticks += 1;
                if let Some(next) = self.next_tick_ms.as_mut() {
                    *next = tick_at + tick_interval_ms(state.tick_rate_hz);
                }
            } else {
                self.spawn_now(state);
                report.spawns += 1;
                if let Some(next) = self.next_spawn_ms.as_mut() {
                    *next = spawn_at + state.config.spawn_period_ms;
                }
            }
        }

        self.now_ms = target;
        report
    }
}
