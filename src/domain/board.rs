/// The board: a fixed-size 2D grid holding at most one creature per
/// cell. An empty cell is `None` — a first-class value, never an error.
///
/// The board doubles as the occupant arena: each slot owns its
/// creature value, so "replace this occupant in place" is a plain
/// slot assignment and per-instance state (the sack's fall counter)
/// lives where the creature lives.
///
/// Accessors take in-bounds coordinates; an out-of-bounds index is a
/// contract violation, checked with `debug_assert!`, not a runtime
/// condition.

use super::creature::{Creature, Kind};

#[derive(Clone, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Option<Creature>>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Board {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(self.in_bounds(x, y), "cell ({x}, {y}) out of bounds");
        y * self.width + x
    }

    pub fn creature_at(&self, x: usize, y: usize) -> Option<&Creature> {
        self.cells[self.idx(x, y)].as_ref()
    }

    pub fn creature_at_mut(&mut self, x: usize, y: usize) -> Option<&mut Creature> {
        let i = self.idx(x, y);
        self.cells[i].as_mut()
    }

    pub fn kind_at(&self, x: usize, y: usize) -> Option<Kind> {
        self.creature_at(x, y).map(Creature::kind)
    }

    pub fn is_empty(&self, x: usize, y: usize) -> bool {
        self.creature_at(x, y).is_none()
    }

    /// Put a creature into a cell, overwriting whatever was there.
    pub fn place(&mut self, x: usize, y: usize, creature: Creature) {
        let i = self.idx(x, y);
        self.cells[i] = Some(creature);
    }

    /// Remove and return the creature at (x, y), leaving the cell empty.
    pub fn take(&mut self, x: usize, y: usize) -> Option<Creature> {
        let i = self.idx(x, y);
        self.cells[i].take()
    }

    /// All coordinates in row-major order — the tick iteration order.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.width;
        (0..self.cells.len()).map(move |i| (i % w, i / w))
    }

    /// First player cell in row-major order, if any.
    pub fn find_player(&self) -> Option<(usize, usize)> {
        self.positions()
            .find(|&(x, y)| self.kind_at(x, y) == Some(Kind::Player))
    }

    pub fn count(&self, kind: Kind) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| c.kind() == kind)
            .count()
    }
}
