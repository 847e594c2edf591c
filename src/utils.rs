use std::ops::{Add, Sub};

/// A position on the unbounded grid.
///
/// Coordinates are plain `i32`s; keeping them away from the extremes of that
/// range is up to the caller, neighbor and pixel arithmetic is unchecked.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

#[macro_export]
macro_rules! cell {
    ($x:expr, $y:expr) => {
        $crate::Cell { x: $x, y: $y }
    };
}

impl Add for Cell {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        cell!(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Cell {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        cell!(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A rectangle of cells, `min` inclusive and `max` exclusive on both axes.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Bounds {
    pub min: Cell,
    pub max: Cell,
}

impl Bounds {
    pub fn new(min: Cell, max: Cell) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> u64 {
        (self.max.x as i64 - self.min.x as i64).max(0) as u64
    }

    pub fn height(&self) -> u64 {
        (self.max.y as i64 - self.min.y as i64).max(0) as u64
    }

    pub fn area(&self) -> u64 {
        self.width() * self.height()
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (self.min.x..self.max.x).contains(&cell.x) && (self.min.y..self.max.y).contains(&cell.y)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let Bounds { min, max } = *self;
        (min.x..max.x).flat_map(move |x| (min.y..max.y).map(move |y| cell!(x, y)))
    }
}

#[test]
fn test_bounds() {
    let bounds = Bounds::new(cell!(-1, 2), cell!(2, 4));
    assert_eq!(bounds.width(), 3);
    assert_eq!(bounds.height(), 2);
    assert_eq!(bounds.area(), 6);
    assert_eq!(bounds.cells().count(), 6);
    assert!(bounds.contains(cell!(-1, 2)));
    assert!(!bounds.contains(cell!(2, 3)));
    assert!(bounds.cells().all(|c| bounds.contains(c)));

    let inverted = Bounds::new(cell!(3, 3), cell!(0, 5));
    assert!(inverted.is_empty());
    assert_eq!(inverted.cells().count(), 0);
}
