use crate::Cell;

/// Storage for the set of live cells.
///
/// Presence in the world is the only notion of aliveness: there are no dead
/// entries, and inserting a live cell twice keeps a single entry.
pub trait World: Default + Clone + Send + Sync + 'static {
    fn is_alive(&self, cell: Cell) -> bool;

    /// Returns `true` if the cell was dead before.
    fn insert(&mut self, cell: Cell) -> bool;

    /// Returns `true` if the cell was alive before.
    fn remove(&mut self, cell: Cell) -> bool;

    fn clear(&mut self);

    fn len(&self) -> usize;

    /// Every live cell once, in no particular order.
    fn actives(&self) -> Box<dyn Iterator<Item = Cell> + '_>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut world = Self::default();
        for cell in cells {
            world.insert(cell);
        }
        world
    }

    /// Live cells in `(x, y)` order, for comparisons and printing.
    fn sorted(&self) -> Vec<Cell> {
        let mut cells: Vec<_> = self.actives().collect();
        cells.sort_unstable();
        cells
    }
}

pub use chunked_world::ChunkedWorld;
mod chunked_world;

pub use hashed_world::HashedWorld;
mod hashed_world;
