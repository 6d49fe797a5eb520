//! Frame snapshots and a text renderer
//!
//! Renderers only read a [`Frame`] captured from the game state; they never
//! touch the simulation.

use glam::IVec2;

use crate::sim::{Command, GamePhase, GameState, PipeKind, Rect};

/// Title shown on the menu
pub const TITLE: &str = "Flappy Bird";
pub const MENU_PROMPT: &str = "Press Start to Play";
pub const GAME_OVER_TEXT: &str = "Game Over";

/// Menu and game-over buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Start,
    Restart,
    Quit,
}

impl Button {
    pub fn label(&self) -> &'static str {
        match self {
            Button::Start => "[Start]",
            Button::Restart => "[Restart]",
            Button::Quit => "[Quit]",
        }
    }

    /// The game command a press sends; `Quit` is handled by the host alone
    pub fn command(&self) -> Option<Command> {
        match self {
            Button::Start => Some(Command::Start),
            Button::Restart => Some(Command::Restart),
            Button::Quit => None,
        }
    }

    /// Buttons offered in a phase
    pub fn for_phase(phase: GamePhase) -> &'static [Button] {
        match phase {
            GamePhase::Menu => &[Button::Start, Button::Quit],
            GamePhase::Playing => &[],
            GamePhase::GameOver => &[Button::Restart, Button::Quit],
        }
    }
}

/// A pipe as drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipeView {
    pub rect: Rect,
    pub kind: PipeKind,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub phase: GamePhase,
    pub board: IVec2,
    pub bird: Rect,
    /// Pipes in spawn order (empty on the menu)
    pub pipes: Vec<PipeView>,
    /// Score truncated for display
    pub score: u64,
    /// The HUD score is hidden once the game is over; the game-over panel
    /// shows it instead
    pub show_hud_score: bool,
    pub buttons: &'static [Button],
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        let pipes = match state.phase {
            GamePhase::Menu => Vec::new(),
            GamePhase::Playing | GamePhase::GameOver => state
                .pipes
                .iter()
                .map(|p| PipeView {
                    rect: p.rect(),
                    kind: p.kind,
                })
                .collect(),
        };
        Self {
            phase: state.phase,
            board: IVec2::new(state.config.board_width, state.config.board_height),
            bird: state.bird.rect(),
            pipes,
            score: state.display_score(),
            show_hud_score: state.phase == GamePhase::Playing,
            buttons: Button::for_phase(state.phase),
        }
    }
}

/// Host-side frame consumer
pub trait RenderSink {
    fn render(&mut self, frame: &Frame);
}

/// Discards every frame
#[derive(Debug, Default)]
pub struct NullRenderer;

impl RenderSink for NullRenderer {
    fn render(&mut self, _frame: &Frame) {}
}

/// Down-scaled character-grid renderer
#[derive(Debug, Clone)]
pub struct TextRenderer {
    pub cols: usize,
    pub rows: usize,
    /// Most recent frame, as text
    pub last: String,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(36, 32)
    }
}

impl TextRenderer {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            last: String::new(),
        }
    }

    /// Draw a frame to a string, one line per row
    pub fn draw(&self, frame: &Frame) -> String {
        let mut grid = vec![vec![' '; self.cols]; self.rows];
        let cell = IVec2::new(
            (frame.board.x / self.cols as i32).max(1),
            (frame.board.y / self.rows as i32).max(1),
        );

        for pipe in &frame.pipes {
            let ch = match pipe.kind {
                PipeKind::Top => 'v',
                PipeKind::Bottom => '^',
            };
            self.fill(&mut grid, &pipe.rect, cell, ch);
        }
        self.fill(&mut grid, &frame.bird, cell, '@');

        let buttons_row = match frame.phase {
            GamePhase::Menu => {
                self.text(&mut grid, self.rows / 6, TITLE);
                self.text(&mut grid, self.rows / 3, MENU_PROMPT);
                self.rows * 2 / 5
            }
            GamePhase::Playing => 0,
            GamePhase::GameOver => {
                let mid = self.rows / 2;
                self.text(&mut grid, mid.saturating_sub(2), GAME_OVER_TEXT);
                self.text(&mut grid, mid, &format!("Score: {}", frame.score));
                mid + 2
            }
        };
        if !frame.buttons.is_empty() {
            let labels: Vec<&str> = frame.buttons.iter().map(Button::label).collect();
            self.text(&mut grid, buttons_row, &labels.join("  "));
        }
        if frame.show_hud_score {
            let score = frame.score.to_string();
            for (i, ch) in score.chars().take(self.cols).enumerate() {
                grid[0][i] = ch;
            }
        }

        grid.into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Fill every cell the rectangle touches
    fn fill(&self, grid: &mut [Vec<char>], rect: &Rect, cell: IVec2, ch: char) {
        let c0 = rect.left().div_euclid(cell.x).max(0);
        let c1 = (rect.right() - 1).div_euclid(cell.x).min(self.cols as i32 - 1);
        let r0 = rect.top().div_euclid(cell.y).max(0);
        let r1 = (rect.bottom() - 1).div_euclid(cell.y).min(self.rows as i32 - 1);
        for row in r0..=r1 {
            for col in c0..=c1 {
                grid[row as usize][col as usize] = ch;
            }
        }
    }

    /// Centered text on a row, clipped to the grid
    fn text(&self, grid: &mut [Vec<char>], row: usize, text: &str) {
        let Some(line) = grid.get_mut(row) else { return };
        let len = text.chars().count().min(self.cols);
        let start = (self.cols - len) / 2;
        for (i, ch) in text.chars().take(len).enumerate() {
            line[start + i] = ch;
        }
    }
}

impl RenderSink for TextRenderer {
    fn render(&mut self, frame: &Frame) {
        self.last = self.draw(frame);
    }
}
