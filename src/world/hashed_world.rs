use std::collections::HashSet;

use metrohash::MetroBuildHasher;

use crate::{Cell, World};

/// The plain sparse world: one hash set entry per live cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashedWorld {
    cells: HashSet<Cell, MetroBuildHasher>,
}

impl World for HashedWorld {
    fn is_alive(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    fn remove(&mut self, cell: Cell) -> bool {
        self.cells.remove(&cell)
    }

    fn clear(&mut self) {
        self.cells.clear()
    }

    fn len(&self) -> usize {
        self.cells.len()
    }

    fn actives(&self) -> Box<dyn Iterator<Item = Cell> + '_> {
        Box::new(self.cells.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell;

    #[test]
    fn test_set_semantics() {
        let mut world = HashedWorld::default();
        assert!(world.is_empty());
        assert!(world.insert(cell!(3, -4)));
        assert!(!world.insert(cell!(3, -4)));
        assert_eq!(world.len(), 1);
        assert!(world.is_alive(cell!(3, -4)));
        assert!(!world.is_alive(cell!(-4, 3)));
        assert!(world.remove(cell!(3, -4)));
        assert!(!world.remove(cell!(3, -4)));
        assert!(world.is_empty());
    }

    #[test]
    fn test_far_coordinates() {
        let far = [cell!(i32::MAX, i32::MIN), cell!(-1_000_000, 1_000_000)];
        let world = HashedWorld::from_cells(far);
        assert_eq!(world.len(), 2);
        assert!(far.iter().all(|&c| world.is_alive(c)));
    }
}
