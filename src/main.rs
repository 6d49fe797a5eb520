//! Flappy entry point
//!
//! Headless native host: runs the game on the scheduler with the autopilot
//! flapping, logs sound effects and prints frames as text. The host presses
//! `[Restart]` after each game over until the game limit is reached, then
//! `[Quit]`.
//!
//! Usage: `flappy [config.json] [seconds] [games]`

use flappy::audio::{AudioManager, AudioSink, SoundEffect, play_events};
use flappy::render::{Button, Frame, RenderSink, TextRenderer};
use flappy::sim::{Command, GamePhase, GameState, TickInput};
use flappy::{Config, Scheduler};

/// Host frame time (ms)
const FRAME_MS: u64 = 16;
const DEFAULT_SECONDS: u64 = 60;
const DEFAULT_GAMES: u32 = 3;

/// Host-side session: game state plus its collaborators
struct Game {
    state: GameState,
    scheduler: Scheduler,
    audio: AudioManager,
    renderer: TextRenderer,
    input: TickInput,
    best_score: u64,
    quit: bool,
}

impl Game {
    fn new(config: Config, seed: u64) -> Self {
        let mut audio = AudioManager::default();
        audio.play(SoundEffect::Music);
        Self {
            state: GameState::with_config(config, seed),
            scheduler: Scheduler::new(),
            audio,
            renderer: TextRenderer::default(),
            input: TickInput {
                idle_mode: true,
                ..Default::default()
            },
            best_score: 0,
            quit: false,
        }
    }

    fn command(&mut self, command: Command) {
        if !self.state.handle_command(command) {
            log::debug!("{:?} ignored in {:?}", command, self.state.phase);
        }
    }

    /// Press an on-screen button; only the buttons shown in the current
    /// phase respond
    fn press(&mut self, button: Button) {
        if !Button::for_phase(self.state.phase).contains(&button) {
            log::debug!("{:?} not shown in {:?}", button, self.state.phase);
            return;
        }
        match button.command() {
            Some(command) => self.command(command),
            None => {
                log::info!("Quit selected");
                self.quit = true;
            }
        }
    }

    /// Advance one host frame; returns the phase afterwards
    fn update(&mut self) -> GamePhase {
        self.scheduler.advance(&mut self.state, FRAME_MS, &self.input);
        let events = self.state.drain_events();
        play_events(&mut self.audio, &events);
        self.state.phase
    }

    fn render(&mut self) {
        self.renderer.render(&Frame::capture(&self.state));
        println!("{}\n", self.renderer.last);
    }
}

fn main() {
    env_logger::init();
    log::info!("Flappy (native) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => Config::load_or_default(path),
        None => Config::default(),
    };
    let seconds = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SECONDS);
    let games = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_GAMES);

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut game = Game::new(config, seed);

    game.render();
    game.press(Button::Start);

    let frames = seconds * 1000 / FRAME_MS;
    let mut played = 1;
    for _ in 0..frames {
        if game.update() != GamePhase::GameOver {
            continue;
        }
        game.best_score = game.best_score.max(game.state.display_score());
        game.render();
        if played >= games {
            game.press(Button::Quit);
        } else {
            played += 1;
            game.press(Button::Restart);
        }
        if game.quit {
            break;
        }
    }

    if game.state.phase == GamePhase::Playing {
        game.best_score = game.best_score.max(game.state.display_score());
        game.render();
    }
    log::info!(
        "Played {} game(s), best score {}, {} sounds",
        played,
        game.best_score,
        game.audio.played.len()
    );
}
