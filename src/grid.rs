use log::debug;
use rand::Rng;

use crate::{cell, step, Bounds, Cell, HashedWorld, Pattern, World};

/// The live cells of the simulation, and the edits a user can make to them.
#[derive(Debug, Clone, Default)]
pub struct Grid<W = HashedWorld>
where
    W: World,
{
    world: W,
}

impl<W> Grid<W>
where
    W: World,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pattern(pattern: &Pattern) -> Self {
        let mut grid = Self::new();
        grid.reset(pattern);
        grid
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn is_alive(&self, cell: Cell) -> bool {
        self.world.is_alive(cell)
    }

    pub fn population(&self) -> usize {
        self.world.len()
    }

    /// Every live cell; cheap to call again each frame.
    pub fn live_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.world.actives()
    }

    /// Flips a cell and returns whether it is now alive.
    pub fn toggle(&mut self, cell: Cell) -> bool {
        if self.world.remove(cell) {
            false
        } else {
            self.world.insert(cell);
            true
        }
    }

    pub fn set_alive(&mut self, cell: Cell, alive: bool) {
        if alive {
            self.world.insert(cell);
        } else {
            self.world.remove(cell);
        }
    }

    pub fn clear(&mut self) {
        self.world.clear();
    }

    /// Replaces every live cell with the cells of `pattern`.
    pub fn reset(&mut self, pattern: &Pattern) {
        self.world = W::from_cells(pattern.cells.iter().copied());
        debug!("reset to {:?}, {} cells", pattern.name, self.population());
    }

    /// Makes exactly the cells of `bounds` alive.
    pub fn fill_all(&mut self, bounds: Bounds) {
        self.world = W::from_cells(bounds.cells());
        debug!("filled {bounds:?}");
    }

    /// Clears the grid, then makes `floor(area * density)` uniformly drawn
    /// cells of `bounds` alive. Draws may repeat, so fewer cells can end up
    /// alive. The density is clamped into `[0, 1]`, NaN counts as zero.
    pub fn fill_random(&mut self, bounds: Bounds, density: f64, rng: &mut impl Rng) {
        self.world.clear();
        if bounds.is_empty() {
            return;
        }
        let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
        let draws = (bounds.area() as f64 * density).floor() as u64;
        let Bounds { min, max } = bounds;
        for _ in 0..draws {
            let x = rng.gen_range(min.x..max.x);
            let y = rng.gen_range(min.y..max.y);
            self.world.insert(cell!(x, y));
        }
        debug!("drew {draws} random cells, {} alive", self.population());
    }

    /// Moves on to the next generation.
    pub fn advance(&mut self) {
        self.world = step::step(&self.world);
    }

    /// Like [`Grid::advance`], tallying neighbors on `shards` threads.
    pub fn advance_sharded(&mut self, shards: usize) {
        self.world = step::step_sharded(&self.world, shards);
    }
}
