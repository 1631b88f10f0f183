/// The tick engine: advances the world by one turn.
///
/// Two passes per tick, both in row-major order:
///   1. **Collect** — every creature decides once, against the board
///      as it stood at the start of the tick. Commands are queued.
///   2. **Apply** — transforms replace the creature in its slot;
///      moves resolve conflicts by asking the stationary creature
///      whether it dies (`dead_in_conflict`, called with the incoming
///      kind). If the stationary creature survives, the move is
///      cancelled. A creature destroyed before its own command comes
///      up forfeits that command.
///
/// Single-threaded and deterministic: one tick at a time, fixed
/// iteration order, decisions never see partially-applied state.

use crate::domain::creature::{Command, Direction, Kind, TickContext};
use super::event::GameEvent;
use super::world::{Phase, WorldState};

struct Pending {
    x: usize,
    y: usize,
    command: Command,
    cancelled: bool,
}

pub fn step(world: &mut WorldState, input: Option<Direction>) -> Vec<GameEvent> {
    if world.phase != Phase::Playing {
        return vec![];
    }

    let mut events: Vec<GameEvent> = Vec::new();
    world.tick += 1;
    world.tick_message();

    // One player scan per tick; every creature sees the same position.
    let ctx = TickContext {
        input,
        player: world.board.find_player(),
    };

    // ── Pass 1: collect decisions against the start-of-tick board ──
    let snapshot = world.board.clone();
    let mut pending: Vec<Pending> = Vec::new();
    for (x, y) in snapshot.positions() {
        if let Some(creature) = world.board.creature_at_mut(x, y) {
            let command = creature.act(x, y, &snapshot, &ctx);
            pending.push(Pending { x, y, command, cancelled: false });
        }
    }

    // ── Pass 2: apply in the same order ──
    for i in 0..pending.len() {
        if pending[i].cancelled {
            continue;
        }
        let (x, y) = (pending[i].x, pending[i].y);

        if let Some(into) = pending[i].command.transforms_into().cloned() {
            apply_transform(world, x, y, into.kind(), &mut events);
            world.board.place(x, y, into);
            continue;
        }

        if !pending[i].command.is_move() {
            continue;
        }

        let tx = x as i32 + pending[i].command.dx();
        let ty = y as i32 + pending[i].command.dy();
        debug_assert!(
            tx >= 0
                && ty >= 0
                && world.board.in_bounds(tx as usize, ty as usize),
            "creature at ({x}, {y}) issued an out-of-bounds move"
        );
        let (tx, ty) = (tx as usize, ty as usize);

        let mover_kind = match world.board.kind_at(x, y) {
            Some(k) => k,
            None => continue,
        };

        let defender_kind = world.board.kind_at(tx, ty);
        let enter = match defender_kind {
            None => true,
            Some(dk) => {
                let dies = match world.board.creature_at(tx, ty) {
                    Some(defender) => defender.dead_in_conflict(mover_kind, &mut world.score),
                    None => false,
                };
                if dies {
                    record_death(dk, mover_kind, tx, ty, &mut events);
                    // The defender's own command (if still queued) dies with it.
                    for later in pending[i + 1..].iter_mut() {
                        if later.x == tx && later.y == ty {
                            later.cancelled = true;
                        }
                    }
                    world.board.take(tx, ty);
                }
                dies
            }
        };

        if enter {
            if let Some(mover) = world.board.take(x, y) {
                world.board.place(tx, ty, mover);
            }
        }
    }

    if events.iter().any(|e| matches!(e, GameEvent::PlayerKilled | GameEvent::PlayerCrushed)) {
        world.phase = Phase::Dying;
        world.anim_tick = 0;
        return events;
    }

    // Level clear: nothing left to collect and nothing left that can
    // still become gold.
    if world.board.count(Kind::Gold) == 0 && world.board.count(Kind::Sack) == 0 {
        world.phase = Phase::LevelComplete;
        world.anim_tick = 0;
        events.push(GameEvent::LevelCleared);
        world.set_message("Tunnel cleared!", 80);
    }

    events
}

fn apply_transform(
    world: &WorldState,
    x: usize,
    y: usize,
    into: Kind,
    events: &mut Vec<GameEvent>,
) {
    if world.board.kind_at(x, y) == Some(Kind::Sack) && into == Kind::Gold {
        events.push(GameEvent::SackSolidified { x, y });
    }
}

fn record_death(
    defender: Kind,
    mover: Kind,
    x: usize,
    y: usize,
    events: &mut Vec<GameEvent>,
) {
    match defender {
        Kind::Terrain => events.push(GameEvent::TerrainDug { x, y }),
        Kind::Gold => {
            if mover == Kind::Player {
                events.push(GameEvent::GoldCollected { x, y });
            } else {
                events.push(GameEvent::GoldDestroyed { x, y });
            }
        }
        Kind::Player => {
            if mover == Kind::Sack {
                events.push(GameEvent::PlayerCrushed);
            } else {
                events.push(GameEvent::PlayerKilled);
            }
        }
        Kind::Monster => events.push(GameEvent::MonsterKilled { x, y }),
        Kind::Sack => {}
    }
}
