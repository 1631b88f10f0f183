/// Embedded level layouts and the char-legend parser.
///
/// ## Tile legend:
///   '#' = Terrain (diggable earth)   '.' = Empty tunnel
///   'P' = Player spawn               '$' = Gold
///   'S' = Sack                       'M' = Monster
///
/// Per the project's scope there is no file or pack loading — the
/// built-in layouts below are the whole campaign. Rows may be ragged;
/// the board width is the longest row and short rows pad with empty.

use crate::domain::board::Board;
use crate::domain::creature::Creature;
use super::world::{Phase, WorldState};

pub const LEVELS: &[&[&str]] = &[
    // Level 1 — first dig: one monster, sacks resting on thin ledges.
    &[
        "####################",
        "#P.....#######...###",
        "#.#####.S.###..$.###",
        "#.#$###...###.##.###",
        "#.#.#####.###.##.###",
        "#...##S##..##.##...#",
        "#.####.###.##.####.#",
        "#.####.###....####.#",
        "#..$##.#######$###.#",
        "##.###.###......#..#",
        "##.....####.##.##.M#",
        "####################",
    ],
    // Level 2 — sack alley: gold is locked behind falling sacks.
    &[
        "####################",
        "#P...##S##S##S##...#",
        "#.##.##.##.##.##.#.#",
        "#.##.##.##.##.##.#.#",
        "#.##....$..$.....#.#",
        "#.#####.##.#######.#",
        "#.#####.##.###...#.#",
        "#...$...##...#.#.#M#",
        "#.#######$####.#...#",
        "#.#######.####.##.##",
        "#..........##..$..##",
        "####################",
    ],
    // Level 3 — the pit: two monsters, long drops that mint gold.
    &[
        "####################",
        "#P......S...S.....M#",
        "#.#####.#.#.#.######",
        "#.##$##...#...#.$###",
        "#.##.#####.####..###",
        "#....#####.#####.###",
        "#.##.......#####.###",
        "#.##.#####.##....###",
        "#$##.#####.##.###..#",
        "#.##.##$...##.####.#",
        "#M........###....$.#",
        "####################",
    ],
];

/// Build a board from layout rows. Unknown characters parse as empty.
pub fn parse_rows(rows: &[&str]) -> Board {
    let height = rows.len();
    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let mut board = Board::new(width, height);

    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            let creature = match ch {
                '#' => Some(Creature::Terrain),
                'P' => Some(Creature::Player),
                '$' => Some(Creature::Gold),
                'S' => Some(Creature::sack()),
                'M' => Some(Creature::Monster),
                _ => None,
            };
            if let Some(c) = creature {
                board.place(x, y, c);
            }
        }
    }

    board
}

/// Load a level into the world state. Preserves score and lives.
pub fn load_level(world: &mut WorldState, level_idx: usize) {
    if level_idx >= LEVELS.len() {
        world.phase = Phase::GameComplete;
        return;
    }

    world.board = parse_rows(LEVELS[level_idx]);
    world.current_level = level_idx;
    world.total_levels = LEVELS.len();
    world.tick = 0;
    world.anim_tick = 0;
    world.phase = Phase::Playing;
    world.set_message(&format!("Tunnel {}", level_idx + 1), 40);
}
