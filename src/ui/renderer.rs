/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` (a grid of Cells)
///   2. Compare each cell with `back` (the previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once
///   5. Swap front/back
///
/// This eliminates flicker caused by full-screen redraws. One game
/// cell occupies two terminal columns, so the map reads roughly
/// square.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::creature::Creature;
use crate::sim::world::{Phase, WorldState};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit dark background for all "empty" terminal cells, so the
    /// cleared screen and the drawn cells match exactly.
    const BASE_BG: Color = Color::Rgb { r: 20, g: 16, b: 12 };

    const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::White,
        bg: Cell::BASE_BG,
    };

    /// Sentinel used to invalidate the back buffer after a resize:
    /// never equal to a real cell, so every position gets redrawn.
    const INVALID: Cell = Cell {
        ch: '\0',
        fg: Color::Magenta,
        bg: Color::Magenta,
    };
}

// ── Sprites ──

/// Two terminal columns per creature, keyed off the stable asset key.
fn sprite(creature: &Creature) -> (char, char, Color) {
    match creature.image_file_name() {
        "Terrain.png" => ('▒', '▒', Color::DarkYellow),
        "Digger.png" => ('@', ' ', Color::Cyan),
        "Gold.png" => ('$', ' ', Color::Yellow),
        "Sack.png" => ('[', ']', Color::DarkMagenta),
        "Monster.png" => ('&', ' ', Color::Red),
        _ => ('?', '?', Color::White),
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer {
            width: w,
            height: h,
            cells: vec![Cell::BLANK; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize, fill: Cell) -> bool {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![fill; w * h];
            return true;
        }
        false
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Cell { ch, fg, bg: Cell::BASE_BG });
            cx += 1;
        }
    }

    fn put_centered(&mut self, y: usize, s: &str, fg: Color) {
        let len = s.chars().count();
        let x = (self.width.saturating_sub(len)) / 2;
        self.put_str(x, y, s, fg);
    }
}

// ── Renderer ──

/// One game cell = 2 terminal columns.
const CELL_W: usize = 2;

const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(64 * 1024, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All),
        )?;
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            Clear(ClearType::All),
            Show,
            terminal::LeaveAlternateScreen,
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn render(&mut self, world: &WorldState) -> io::Result<()> {
        let (tw, th) = terminal::size()?;
        let (tw, th) = (tw as usize, th as usize);
        self.front.resize(tw, th, Cell::BLANK);
        if self.back.resize(tw, th, Cell::INVALID) {
            queue!(
                self.writer,
                SetBackgroundColor(Cell::BASE_BG),
                Clear(ClearType::All),
            )?;
        }
        self.front.clear();

        match world.phase {
            Phase::Title => self.draw_title(),
            _ => {
                self.draw_hud(world);
                self.draw_map(world);
                self.draw_message(world);
                self.draw_overlay(world);
            }
        }

        self.flush_diff()
    }

    // ── Frame composition ──

    fn draw_title(&mut self) {
        let mid = self.front.height / 2;
        let top = mid.saturating_sub(6);
        self.front.put_centered(top, "T U N N E L E R", Color::Yellow);
        self.front
            .put_centered(top + 2, "dig for gold — dodge falling sacks", Color::Grey);

        // Legend, lowest drawing priority first (the render order).
        let mut legend: Vec<Creature> = vec![
            Creature::Terrain,
            Creature::Player,
            Creature::sack(),
            Creature::Monster,
            Creature::Gold,
        ];
        legend.sort_by_key(|c| c.drawing_priority());
        for (i, c) in legend.iter().enumerate() {
            let (a, b, color) = sprite(c);
            let y = top + 4 + i;
            let x = (self.front.width / 2).saturating_sub(8);
            self.front.set(x, y, Cell { ch: a, fg: color, bg: Cell::BASE_BG });
            self.front.set(x + 1, y, Cell { ch: b, fg: color, bg: Cell::BASE_BG });
            self.front.put_str(x + 4, y, name_of(c), Color::Grey);
        }

        self.front
            .put_centered(top + 10, "[Enter] start    [Q] quit", Color::White);
        self.front.put_centered(
            top + 11,
            "arrows/WASD move   [F1] pause   [F2] restart",
            Color::DarkGrey,
        );
    }

    fn draw_hud(&mut self, world: &WorldState) {
        let hud = format!(
            "SCORE {:06}   LIVES {}   TUNNEL {}/{}",
            world.score,
            world.lives,
            world.current_level + 1,
            world.total_levels.max(1),
        );
        self.front.put_str(1, HUD_ROW, &hud, Color::White);
    }

    fn draw_map(&mut self, world: &WorldState) {
        for (x, y) in world.board.positions() {
            let (a, b, color) = match world.board.creature_at(x, y) {
                Some(c) => sprite(c),
                None => (' ', ' ', Color::White),
            };
            let sx = x * CELL_W + 1;
            let sy = y + MAP_ROW;
            let fg = color;
            self.front.set(sx, sy, Cell { ch: a, fg, bg: Cell::BASE_BG });
            self.front.set(sx + 1, sy, Cell { ch: b, fg, bg: Cell::BASE_BG });
        }
    }

    fn draw_message(&mut self, world: &WorldState) {
        if world.message_timer > 0 || !world.message.is_empty() {
            let y = MAP_ROW + world.board.height() + 1;
            self.front.put_str(1, y, &world.message, Color::Yellow);
        }
    }

    fn draw_overlay(&mut self, world: &WorldState) {
        let mid = MAP_ROW + world.board.height() / 2;
        match world.phase {
            Phase::Dying => {
                // Blink while the death pause runs out.
                if world.anim_tick % 2 == 0 {
                    self.front.put_centered(mid, "  O U C H !  ", Color::Red);
                }
            }
            Phase::LevelComplete => {
                self.front
                    .put_centered(mid, " TUNNEL CLEARED — [Enter] onward ", Color::Green);
            }
            Phase::GameOver => {
                self.front.put_centered(mid, "  G A M E   O V E R  ", Color::Red);
                self.front
                    .put_centered(mid + 2, "[Enter] title screen", Color::Grey);
            }
            Phase::GameComplete => {
                self.front
                    .put_centered(mid, " ALL TUNNELS CLEARED! ", Color::Yellow);
                self.front
                    .put_centered(mid + 2, "[Enter] title screen", Color::Grey);
            }
            _ => {}
        }
        if world.paused {
            self.front.put_centered(mid, " PAUSED — [F1] resume ", Color::Cyan);
        }
    }

    // ── Diff emit ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = None;
        let mut last_bg = None;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let i = y * self.front.width + x;
                let cell = self.front.cells[i];
                if cell == self.back.cells[i] {
                    continue;
                }
                queue!(self.writer, MoveTo(x as u16, y as u16))?;
                if last_fg != Some(cell.fg) {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = Some(cell.fg);
                }
                if last_bg != Some(cell.bg) {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = Some(cell.bg);
                }
                queue!(self.writer, Print(cell.ch))?;
            }
        }

        self.writer.flush()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }
}

fn name_of(creature: &Creature) -> &'static str {
    match creature.image_file_name() {
        "Terrain.png" => "earth — dig through it",
        "Digger.png" => "you",
        "Sack.png" => "sack — falls, crushes, turns to gold",
        "Monster.png" => "monster — hunts you",
        "Gold.png" => "gold — grab it",
        _ => "?",
    }
}
