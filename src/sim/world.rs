/// WorldState: the complete snapshot of a running game.
///
/// The board owns the creatures; everything else here is game-flow
/// bookkeeping (score, lives, phase, transient HUD message). The
/// score is monotonically non-decreasing while a level runs — only
/// gold collection touches it, inside the conflict rule.

use crate::domain::board::Board;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Title,
    Playing,
    Dying,
    LevelComplete,
    GameOver,
    GameComplete,
}

pub struct WorldState {
    pub board: Board,

    // ── Game tracking ──
    pub score: u32,
    pub lives: u32,
    pub current_level: usize,
    pub total_levels: usize,
    pub tick: u64,

    // ── Meta ──
    pub phase: Phase,
    pub paused: bool,

    // ── UI ──
    pub message: String,
    pub message_timer: u32,
    pub anim_tick: u32,
}

impl WorldState {
    pub fn new() -> Self {
        WorldState {
            board: Board::new(0, 0),
            score: 0,
            lives: 3,
            current_level: 0,
            total_levels: 0,
            tick: 0,
            phase: Phase::Title,
            paused: false,
            message: String::new(),
            message_timer: 0,
            anim_tick: 0,
        }
    }

    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }

    /// Tick the transient message timer; clears the message on expiry.
    pub fn tick_message(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message.clear();
            }
        }
    }
}
