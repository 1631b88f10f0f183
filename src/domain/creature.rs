/// The creature behavior core: one decision per tick, one conflict rule.
///
/// Every grid occupant is a `Creature` — a closed enum over the five
/// kinds, so conflict rules match on `Kind` instead of downcasting.
/// A creature never mutates the board; it returns a `Command` and the
/// tick engine (sim/step) applies it.
///
/// Per-instance state exists only on Sack (its fall counter). The grid
/// cell owns the creature value; a transform replaces the value stored
/// in that slot.

use super::board::Board;

/// Score awarded when the player collects one gold.
pub const GOLD_VALUE: u32 = 10;

/// Directional input, as captured by the UI layer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Per-tick context, populated by the engine at the start of the tick.
///
/// Every creature acting in a tick sees the same input and the same
/// player position, so decisions cannot depend on iteration order.
/// `player` is `None` when no player is on the board — monsters go
/// inert rather than chasing a stale position.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickContext {
    pub input: Option<Direction>,
    pub player: Option<(usize, usize)>,
}

/// The declared outcome of one creature's turn: a one-cell relative
/// move, or a transformation into another creature. Never both — the
/// three constructors are the only way to build one, and `transform`
/// always carries a zero delta.
#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    dx: i32,
    dy: i32,
    transform: Option<Creature>,
}

impl Command {
    pub fn stay() -> Self {
        Command { dx: 0, dy: 0, transform: None }
    }

    pub fn walk(dx: i32, dy: i32) -> Self {
        debug_assert!(dx.abs() <= 1 && dy.abs() <= 1, "delta out of range");
        Command { dx, dy, transform: None }
    }

    pub fn transform(into: Creature) -> Self {
        Command { dx: 0, dy: 0, transform: Some(into) }
    }

    pub fn dx(&self) -> i32 {
        self.dx
    }

    pub fn dy(&self) -> i32 {
        self.dy
    }

    pub fn is_move(&self) -> bool {
        self.transform.is_none() && (self.dx != 0 || self.dy != 0)
    }

    pub fn transforms_into(&self) -> Option<&Creature> {
        self.transform.as_ref()
    }
}

/// The closed set of occupant kinds.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Kind {
    Terrain,
    Player,
    Gold,
    Sack,
    Monster,
}

/// A grid occupant. At most one per cell; empty cells are `None` on
/// the board, not a creature variant.
#[derive(Clone, Debug, PartialEq)]
pub enum Creature {
    /// Inert diggable floor. Displaced by anything that walks into it.
    Terrain,
    /// User-controlled digger.
    Player,
    /// Collectible. Never moves; born from level data or a landed sack.
    Gold,
    /// Falls when unsupported; solidifies into gold after a long fall.
    /// `falling` counts consecutive airborne ticks.
    Sack { falling: u32 },
    /// Chases the player greedily, horizontal axis first.
    Monster,
}

impl Creature {
    /// A fresh sack at rest.
    pub fn sack() -> Self {
        Creature::Sack { falling: 0 }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Creature::Terrain => Kind::Terrain,
            Creature::Player => Kind::Player,
            Creature::Gold => Kind::Gold,
            Creature::Sack { .. } => Kind::Sack,
            Creature::Monster => Kind::Monster,
        }
    }

    /// Decide this creature's action for the tick. `(x, y)` is its
    /// current cell; the board is the state at the start of the tick.
    /// Only the creature's own private state may be mutated here.
    pub fn act(&mut self, x: usize, y: usize, board: &Board, ctx: &TickContext) -> Command {
        debug_assert!(board.in_bounds(x, y), "acting creature off the board");
        match self {
            Creature::Terrain | Creature::Gold => Command::stay(),
            Creature::Player => player_act(x, y, board, ctx),
            Creature::Sack { falling } => sack_act(falling, x, y, board),
            Creature::Monster => monster_act(x, y, board, ctx),
        }
    }

    /// Conflict rule: does THIS creature die when `other` moves onto
    /// its cell? The score increment for gold collection happens here
    /// and nowhere else.
    pub fn dead_in_conflict(&self, other: Kind, score: &mut u32) -> bool {
        match self {
            Creature::Terrain => true,
            Creature::Player => matches!(other, Kind::Monster | Kind::Sack),
            Creature::Gold => {
                if other == Kind::Player {
                    *score += GOLD_VALUE;
                    return true;
                }
                other == Kind::Monster
            }
            Creature::Sack { .. } => false,
            Creature::Monster => matches!(other, Kind::Monster | Kind::Sack),
        }
    }

    /// Rendering order hint: lower draws first. Not used in decisions.
    pub fn drawing_priority(&self) -> u8 {
        match self.kind() {
            Kind::Terrain => 0,
            Kind::Player => 1,
            Kind::Sack | Kind::Monster => 2,
            Kind::Gold => 3,
        }
    }

    /// Stable visual-asset key, one per kind, never computed.
    pub fn image_file_name(&self) -> &'static str {
        match self.kind() {
            Kind::Terrain => "Terrain.png",
            Kind::Player => "Digger.png",
            Kind::Gold => "Gold.png",
            Kind::Sack => "Sack.png",
            Kind::Monster => "Monster.png",
        }
    }
}

// ── Player ──

/// One-cell move in the input direction, clamped to the board. Input
/// is a single direction, so a diagonal can never be produced.
fn player_act(x: usize, y: usize, board: &Board, ctx: &TickContext) -> Command {
    match ctx.input {
        Some(Direction::Left) if x > 0 => Command::walk(-1, 0),
        Some(Direction::Right) if x < board.width() - 1 => Command::walk(1, 0),
        Some(Direction::Up) if y > 0 => Command::walk(0, -1),
        Some(Direction::Down) if y < board.height() - 1 => Command::walk(0, 1),
        _ => Command::stay(),
    }
}

// ── Sack ──

/// The sack state machine, keyed off the cell directly below:
///   - bottom row: rest (counter untouched; it can never fall again)
///   - below empty, or already falling with the player below: keep
///     falling — this is the only path that moves the sack, and it is
///     what crushes a player standing under a dropping sack
///   - landed after falling more than one tick: solidify into gold
///   - landed early: reset the counter, stay a sack at rest
fn sack_act(falling: &mut u32, x: usize, y: usize, board: &Board) -> Command {
    if y + 1 >= board.height() {
        return Command::stay();
    }

    if board.is_empty(x, y + 1)
        || (*falling > 0 && board.kind_at(x, y + 1) == Some(Kind::Player))
    {
        *falling += 1;
        return Command::walk(0, 1);
    }

    if *falling > 1 {
        return Command::transform(Creature::Gold);
    }

    *falling = 0;
    Command::stay()
}

// ── Monster ──

/// Greedy chase: sign of the distance on each axis, horizontal
/// preferred. With no player on the board the monster is inert.
fn monster_act(x: usize, y: usize, board: &Board, ctx: &TickContext) -> Command {
    let (px, py) = match ctx.player {
        Some(p) => p,
        None => return Command::stay(),
    };

    let dx = (px as i32 - x as i32).signum();
    let dy = (py as i32 - y as i32).signum();

    if dx != 0 && can_enter(board, x as i32 + dx, y as i32) {
        return Command::walk(dx, 0);
    }
    if dy != 0 && can_enter(board, x as i32, y as i32 + dy) {
        return Command::walk(0, dy);
    }
    Command::stay()
}

/// Monster admissibility, shared by both axes: in bounds, and the cell
/// is empty, the player (the engine resolves the kill), or gold
/// (monsters destroy gold they touch). Terrain, sacks, and other
/// monsters block.
fn can_enter(board: &Board, x: i32, y: i32) -> bool {
    if x < 0 || y < 0 || x >= board.width() as i32 || y >= board.height() as i32 {
        return false;
    }
    matches!(
        board.kind_at(x as usize, y as usize),
        None | Some(Kind::Player) | Some(Kind::Gold)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_board(w: usize, h: usize) -> Board {
        Board::new(w, h)
    }

    fn ctx_with_input(input: Direction) -> TickContext {
        TickContext { input: Some(input), player: None }
    }

    fn ctx_with_player(px: usize, py: usize) -> TickContext {
        TickContext { input: None, player: Some((px, py)) }
    }

    // ── Command invariant ──

    #[test]
    fn transform_command_has_zero_delta() {
        let cmd = Command::transform(Creature::Gold);
        assert_eq!(cmd.dx(), 0);
        assert_eq!(cmd.dy(), 0);
        assert!(!cmd.is_move());
        assert!(cmd.transforms_into().is_some());
    }

    #[test]
    fn no_creature_emits_move_and_transform_together() {
        // Probe every kind on a board where each decision path can fire.
        let mut board = empty_board(5, 5);
        board.place(2, 3, Creature::Terrain);
        let ctx = TickContext { input: Some(Direction::Left), player: Some((0, 0)) };

        let mut creatures = vec![
            Creature::Terrain,
            Creature::Player,
            Creature::Gold,
            Creature::Sack { falling: 3 }, // lands on terrain → transform path
            Creature::Monster,
        ];
        for c in &mut creatures {
            let cmd = c.act(2, 2, &board, &ctx);
            if cmd.transforms_into().is_some() {
                assert_eq!((cmd.dx(), cmd.dy()), (0, 0), "{:?}", c.kind());
            }
        }
    }

    // ── Terrain ──

    #[test]
    fn terrain_never_moves_and_always_dies() {
        let board = empty_board(3, 3);
        let mut terrain = Creature::Terrain;
        let cmd = terrain.act(1, 1, &board, &ctx_with_input(Direction::Down));
        assert_eq!((cmd.dx(), cmd.dy()), (0, 0));
        assert!(cmd.transforms_into().is_none());

        let mut score = 0;
        for other in [Kind::Terrain, Kind::Player, Kind::Gold, Kind::Sack, Kind::Monster] {
            assert!(terrain.dead_in_conflict(other, &mut score));
        }
        assert_eq!(score, 0);
    }

    // ── Player ──

    #[test]
    fn player_moves_with_input() {
        let board = empty_board(5, 5);
        let mut player = Creature::Player;

        let cmd = player.act(2, 2, &board, &ctx_with_input(Direction::Left));
        assert_eq!((cmd.dx(), cmd.dy()), (-1, 0));
        let cmd = player.act(2, 2, &board, &ctx_with_input(Direction::Right));
        assert_eq!((cmd.dx(), cmd.dy()), (1, 0));
        let cmd = player.act(2, 2, &board, &ctx_with_input(Direction::Up));
        assert_eq!((cmd.dx(), cmd.dy()), (0, -1));
        let cmd = player.act(2, 2, &board, &ctx_with_input(Direction::Down));
        assert_eq!((cmd.dx(), cmd.dy()), (0, 1));
    }

    #[test]
    fn player_is_clamped_at_every_edge() {
        let board = empty_board(5, 5);
        let mut player = Creature::Player;

        let cmd = player.act(0, 2, &board, &ctx_with_input(Direction::Left));
        assert_eq!((cmd.dx(), cmd.dy()), (0, 0));
        let cmd = player.act(4, 2, &board, &ctx_with_input(Direction::Right));
        assert_eq!((cmd.dx(), cmd.dy()), (0, 0));
        let cmd = player.act(2, 0, &board, &ctx_with_input(Direction::Up));
        assert_eq!((cmd.dx(), cmd.dy()), (0, 0));
        let cmd = player.act(2, 4, &board, &ctx_with_input(Direction::Down));
        assert_eq!((cmd.dx(), cmd.dy()), (0, 0));
    }

    #[test]
    fn player_stays_without_input() {
        let board = empty_board(5, 5);
        let mut player = Creature::Player;
        let cmd = player.act(2, 2, &board, &TickContext::default());
        assert_eq!((cmd.dx(), cmd.dy()), (0, 0));
    }

    #[test]
    fn player_dies_only_to_monster_and_sack() {
        let player = Creature::Player;
        let mut score = 0;
        assert!(player.dead_in_conflict(Kind::Monster, &mut score));
        assert!(player.dead_in_conflict(Kind::Sack, &mut score));
        assert!(!player.dead_in_conflict(Kind::Gold, &mut score));
        assert!(!player.dead_in_conflict(Kind::Terrain, &mut score));
        assert!(!player.dead_in_conflict(Kind::Player, &mut score));
        assert_eq!(score, 0);
    }

    // ── Gold ──

    #[test]
    fn gold_collection_scores_ten_per_pickup() {
        let gold = Creature::Gold;
        let mut score = 0;
        assert!(gold.dead_in_conflict(Kind::Player, &mut score));
        assert_eq!(score, 10);
        assert!(gold.dead_in_conflict(Kind::Player, &mut score));
        assert_eq!(score, 20);
    }

    #[test]
    fn monster_destroys_gold_without_score() {
        let gold = Creature::Gold;
        let mut score = 0;
        assert!(gold.dead_in_conflict(Kind::Monster, &mut score));
        assert_eq!(score, 0);
    }

    #[test]
    fn gold_survives_terrain_and_sack() {
        let gold = Creature::Gold;
        let mut score = 0;
        assert!(!gold.dead_in_conflict(Kind::Terrain, &mut score));
        assert!(!gold.dead_in_conflict(Kind::Sack, &mut score));
        assert_eq!(score, 0);
    }

    // ── Sack ──

    #[test]
    fn sack_accumulates_fall_then_solidifies() {
        // Three empty cells below, then a terrain floor appears.
        let mut board = empty_board(1, 5);
        board.place(0, 4, Creature::Terrain);

        let mut sack = Creature::sack();
        for (y, expected) in [(0, 1), (1, 2), (2, 3)] {
            let cmd = sack.act(0, y, &board, &TickContext::default());
            assert_eq!((cmd.dx(), cmd.dy()), (0, 1));
            assert_eq!(sack, Creature::Sack { falling: expected });
        }

        // Now resting on terrain with falling = 3 > 1: solidify.
        let cmd = sack.act(0, 3, &board, &TickContext::default());
        assert_eq!(cmd.transforms_into(), Some(&Creature::Gold));
        assert_eq!((cmd.dx(), cmd.dy()), (0, 0));
    }

    #[test]
    fn sack_at_rest_on_solid_ground_stays_a_sack() {
        let mut board = empty_board(1, 2);
        board.place(0, 1, Creature::Terrain);

        let mut sack = Creature::sack();
        let cmd = sack.act(0, 0, &board, &TickContext::default());
        assert_eq!((cmd.dx(), cmd.dy()), (0, 0));
        assert!(cmd.transforms_into().is_none());
        assert_eq!(sack, Creature::Sack { falling: 0 });
    }

    #[test]
    fn short_fall_resets_counter_instead_of_solidifying() {
        let mut board = empty_board(1, 3);
        board.place(0, 2, Creature::Terrain);

        // One tick of falling only: falling = 1, not > 1.
        let mut sack = Creature::Sack { falling: 1 };
        let cmd = sack.act(0, 1, &board, &TickContext::default());
        assert_eq!((cmd.dx(), cmd.dy()), (0, 0));
        assert!(cmd.transforms_into().is_none());
        assert_eq!(sack, Creature::Sack { falling: 0 });
    }

    #[test]
    fn falling_sack_keeps_dropping_onto_the_player() {
        let mut board = empty_board(1, 3);
        board.place(0, 2, Creature::Player);

        let mut sack = Creature::Sack { falling: 1 };
        let cmd = sack.act(0, 1, &board, &TickContext::default());
        assert_eq!((cmd.dx(), cmd.dy()), (0, 1));
        assert_eq!(sack, Creature::Sack { falling: 2 });
    }

    #[test]
    fn resting_sack_does_not_drop_onto_the_player() {
        let mut board = empty_board(1, 2);
        board.place(0, 1, Creature::Player);

        let mut sack = Creature::sack();
        let cmd = sack.act(0, 0, &board, &TickContext::default());
        assert_eq!((cmd.dx(), cmd.dy()), (0, 0));
        assert_eq!(sack, Creature::Sack { falling: 0 });
    }

    #[test]
    fn sack_on_bottom_row_stays_put() {
        let board = empty_board(1, 3);
        let mut sack = Creature::Sack { falling: 5 };
        let cmd = sack.act(0, 2, &board, &TickContext::default());
        assert_eq!((cmd.dx(), cmd.dy()), (0, 0));
        assert!(cmd.transforms_into().is_none());
    }

    #[test]
    fn sack_is_never_destroyed_by_collision() {
        let sack = Creature::sack();
        let mut score = 0;
        for other in [Kind::Terrain, Kind::Player, Kind::Gold, Kind::Sack, Kind::Monster] {
            assert!(!sack.dead_in_conflict(other, &mut score));
        }
    }

    // ── Monster ──

    #[test]
    fn monster_without_target_stays_put() {
        let board = empty_board(5, 5);
        let mut monster = Creature::Monster;
        for (x, y) in [(0, 0), (2, 2), (4, 4)] {
            let cmd = monster.act(x, y, &board, &TickContext::default());
            assert_eq!((cmd.dx(), cmd.dy()), (0, 0));
        }
    }

    #[test]
    fn monster_prefers_horizontal_approach() {
        let board = empty_board(8, 8);
        let mut monster = Creature::Monster;
        // Player down-right: horizontal wins.
        let cmd = monster.act(2, 2, &board, &ctx_with_player(5, 5));
        assert_eq!((cmd.dx(), cmd.dy()), (1, 0));
        // Player straight left.
        let cmd = monster.act(2, 2, &board, &ctx_with_player(0, 2));
        assert_eq!((cmd.dx(), cmd.dy()), (-1, 0));
    }

    #[test]
    fn monster_falls_back_to_vertical_when_blocked() {
        let mut board = empty_board(8, 8);
        board.place(3, 2, Creature::sack()); // sack blocks the horizontal path
        let mut monster = Creature::Monster;
        let cmd = monster.act(2, 2, &board, &ctx_with_player(5, 5));
        assert_eq!((cmd.dx(), cmd.dy()), (0, 1));
    }

    #[test]
    fn monster_blocked_on_both_axes_stays() {
        let mut board = empty_board(8, 8);
        board.place(3, 2, Creature::Terrain);
        board.place(2, 3, Creature::Monster);
        let mut monster = Creature::Monster;
        let cmd = monster.act(2, 2, &board, &ctx_with_player(5, 5));
        assert_eq!((cmd.dx(), cmd.dy()), (0, 0));
    }

    #[test]
    fn monster_walks_onto_player_and_gold() {
        let mut board = empty_board(8, 8);
        board.place(3, 2, Creature::Gold);
        let mut monster = Creature::Monster;
        let cmd = monster.act(2, 2, &board, &ctx_with_player(5, 2));
        assert_eq!((cmd.dx(), cmd.dy()), (1, 0));

        let mut board = empty_board(8, 8);
        board.place(3, 2, Creature::Player);
        let cmd = monster.act(2, 2, &board, &ctx_with_player(3, 2));
        assert_eq!((cmd.dx(), cmd.dy()), (1, 0));
    }

    #[test]
    fn monster_never_walks_off_the_board() {
        let board = empty_board(3, 3);
        let mut monster = Creature::Monster;
        // Target shares the monster's cell: both signs are zero.
        let cmd = monster.act(0, 0, &board, &ctx_with_player(0, 0));
        assert_eq!((cmd.dx(), cmd.dy()), (0, 0));
    }

    #[test]
    fn monster_dies_to_monster_and_sack() {
        let monster = Creature::Monster;
        let mut score = 0;
        assert!(monster.dead_in_conflict(Kind::Monster, &mut score));
        assert!(monster.dead_in_conflict(Kind::Sack, &mut score));
        assert!(!monster.dead_in_conflict(Kind::Player, &mut score));
        assert!(!monster.dead_in_conflict(Kind::Gold, &mut score));
        assert!(!monster.dead_in_conflict(Kind::Terrain, &mut score));
    }

    // ── Rendering contract ──

    #[test]
    fn drawing_priorities_are_fixed_per_kind() {
        assert_eq!(Creature::Terrain.drawing_priority(), 0);
        assert_eq!(Creature::Player.drawing_priority(), 1);
        assert_eq!(Creature::sack().drawing_priority(), 2);
        assert_eq!(Creature::Monster.drawing_priority(), 2);
        assert_eq!(Creature::Gold.drawing_priority(), 3);
    }

    #[test]
    fn image_file_names_are_stable() {
        assert_eq!(Creature::Terrain.image_file_name(), "Terrain.png");
        assert_eq!(Creature::Player.image_file_name(), "Digger.png");
        assert_eq!(Creature::Gold.image_file_name(), "Gold.png");
        assert_eq!(Creature::sack().image_file_name(), "Sack.png");
        assert_eq!(Creature::Monster.image_file_name(), "Monster.png");
    }
}
