/// Events emitted during a simulation step. The game loop turns them
/// into transient HUD messages; tests assert on them directly.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    GoldCollected { x: usize, y: usize },
    GoldDestroyed { x: usize, y: usize },
    TerrainDug { x: usize, y: usize },
    SackSolidified { x: usize, y: usize },
    MonsterKilled { x: usize, y: usize },
    PlayerCrushed,
    PlayerKilled,
    LevelCleared,
}
