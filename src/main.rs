/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use config::GameConfig;
use domain::creature::Direction;
use sim::event::GameEvent;
use sim::level::load_level;
use sim::step;
use sim::world::{Phase, WorldState};
use ui::input::InputState;
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

fn main() {
    let config = GameConfig::load();

    let mut world = WorldState::new();
    world.lives = config.start_lives;

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = game_loop(&mut world, &mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }
    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing Tunneler!");
    println!("Final Score: {}", world.score);
}

fn game_loop(
    world: &mut WorldState,
    renderer: &mut Renderer,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(config.speed.tick_rate_ms);

    loop {
        kb.drain_events();

        if kb.ctrl_c_pressed() {
            break;
        }
        if handle_meta(world, &kb, config) {
            break;
        }

        if last_tick.elapsed() >= tick_rate {
            if world.paused {
                world.anim_tick = world.anim_tick.wrapping_add(1);
            } else {
                match world.phase {
                    Phase::Playing => {
                        let events = step::step(world, detect_movement(&kb));
                        apply_event_feedback(world, &events);
                    }
                    Phase::Dying => tick_dying(world),
                    _ => {
                        world.anim_tick = world.anim_tick.wrapping_add(1);
                        world.tick_message();
                    }
                }
            }
            last_tick = Instant::now();
        }

        renderer.render(world)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

/// Turn this tick's events into a transient HUD message. The engine
/// owns the level-clear message and the dying overlay covers kills, so
/// those phases are left alone; the last notable event of the tick wins.
fn apply_event_feedback(world: &mut WorldState, events: &[GameEvent]) {
    if world.phase != Phase::Playing {
        return;
    }

    let mut msg = None;
    for event in events {
        msg = match event {
            GameEvent::GoldCollected { .. } => Some("Gold +10"),
            GameEvent::SackSolidified { .. } => Some("A sack hardens into gold"),
            GameEvent::GoldDestroyed { .. } => Some("A monster tramples the gold"),
            GameEvent::MonsterKilled { .. } => Some("Monster down"),
            _ => msg,
        };
    }
    if let Some(m) = msg {
        world.set_message(m, 25);
    }
}

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_RESTART: &[KeyCode] = &[KeyCode::Char('r'), KeyCode::Char('R')];
const KEYS_CONFIRM: &[KeyCode] = &[KeyCode::Enter, KeyCode::Char(' ')];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Char('q'), KeyCode::Char('Q')];

/// The captured directional input for this tick: a single direction,
/// so simultaneous opposing keys can never produce a diagonal.
fn detect_movement(kb: &InputState) -> Option<Direction> {
    if kb.any_held(KEYS_UP) || kb.any_pressed(KEYS_UP) {
        Some(Direction::Up)
    } else if kb.any_held(KEYS_DOWN) || kb.any_pressed(KEYS_DOWN) {
        Some(Direction::Down)
    } else if kb.any_held(KEYS_LEFT) || kb.any_pressed(KEYS_LEFT) {
        Some(Direction::Left)
    } else if kb.any_held(KEYS_RIGHT) || kb.any_pressed(KEYS_RIGHT) {
        Some(Direction::Right)
    } else {
        None
    }
}

/// Reset to the title screen, preserving nothing but the lives config.
fn return_to_title(world: &mut WorldState, config: &GameConfig) {
    *world = WorldState::new();
    world.lives = config.start_lives;
}

fn start_new_game(world: &mut WorldState, config: &GameConfig) {
    world.score = 0;
    world.lives = config.start_lives;
    load_level(world, 0);
}

fn handle_meta(world: &mut WorldState, kb: &InputState, config: &GameConfig) -> bool {
    let confirm = kb.any_pressed(KEYS_CONFIRM);
    let esc = kb.any_pressed(&[KeyCode::Esc]);

    let in_game = matches!(world.phase, Phase::Playing | Phase::LevelComplete);

    if in_game || world.paused {
        // F1: Pause / Resume
        if kb.any_pressed(&[KeyCode::F(1)]) {
            world.paused = !world.paused;
            if world.paused {
                world.set_message("PAUSED  [F1] Resume", 0);
            } else {
                world.message.clear();
                world.message_timer = 0;
            }
            return false;
        }
        if world.paused {
            if esc {
                world.paused = false;
                return_to_title(world, config);
            }
            return false; // Block all other input while paused
        }

        // F2 / R: restart the current level, keeping score and lives
        if kb.any_pressed(&[KeyCode::F(2)]) || kb.any_pressed(KEYS_RESTART) {
            if world.phase == Phase::Playing {
                let level = world.current_level;
                load_level(world, level);
                world.set_message("Tunnel restarted", 30);
            }
            return false;
        }
    }

    match world.phase {
        Phase::Title => {
            if confirm {
                start_new_game(world, config);
            } else if kb.any_pressed(KEYS_QUIT) || esc {
                return true;
            }
        }

        Phase::Playing => {
            if esc {
                return_to_title(world, config);
            }
        }

        Phase::Dying => {
            // Can't skip
        }

        Phase::LevelComplete => {
            if confirm {
                let next = world.current_level + 1;
                load_level(world, next);
            } else if esc {
                return_to_title(world, config);
            }
        }

        Phase::GameOver | Phase::GameComplete => {
            if confirm || esc {
                return_to_title(world, config);
            }
        }
    }

    false
}

// ── Death pause ──

const DYING_TICKS: u32 = 10;

fn tick_dying(world: &mut WorldState) {
    world.anim_tick += 1;
    if world.anim_tick >= DYING_TICKS {
        world.lives = world.lives.saturating_sub(1);
        if world.lives == 0 {
            world.phase = Phase::GameOver;
            world.set_message("The tunnels claim another digger", 120);
        } else {
            let level = world.current_level;
            load_level(world, level);
        }
    }
}
