use crate::{cell, Bounds, Cell};

pub const MIN_CELL_SIZE: i32 = 2;
pub const MAX_CELL_SIZE: i32 = 50;
pub const DEFAULT_CELL_SIZE: i32 = 10;

/// A position in screen space, in pixels from the top-left corner.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
}

impl Pixel {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Finds the cell under a screen pixel.
///
/// Divides with flooring, so pixels left of or above the offset land in
/// negative cells instead of being folded onto cell zero. `cell_size` must
/// be positive.
pub fn screen_to_grid(pixel: Pixel, cell_size: i32, offset: Pixel) -> Cell {
    cell!(
        (pixel.x - offset.x).div_euclid(cell_size),
        (pixel.y - offset.y).div_euclid(cell_size)
    )
}

/// Top-left pixel of a cell.
pub fn grid_to_screen(cell: Cell, cell_size: i32, offset: Pixel) -> Pixel {
    Pixel::new(cell.x * cell_size + offset.x, cell.y * cell_size + offset.y)
}

/// Whether a cell drawn at `pixel` overlaps the `width` by `height` screen.
pub fn is_visible(pixel: Pixel, cell_size: i32, width: i32, height: i32) -> bool {
    pixel.x >= -cell_size && pixel.x < width && pixel.y >= -cell_size && pixel.y < height
}

fn ceil_div(n: i32, d: i32) -> i32 {
    -(-n).div_euclid(d)
}

/// Zoom and pan of the window onto the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    cell_size: i32,
    min_cell_size: i32,
    max_cell_size: i32,
    offset: Pixel,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE, MIN_CELL_SIZE, MAX_CELL_SIZE)
    }
}

impl Viewport {
    /// The starting size is clamped into the limits; limits below one pixel
    /// are raised to one.
    pub fn new(cell_size: i32, min_cell_size: i32, max_cell_size: i32) -> Self {
        let min_cell_size = min_cell_size.max(1);
        let max_cell_size = max_cell_size.max(min_cell_size);
        let cell_size = cell_size.clamp(min_cell_size, max_cell_size);
        let offset = Pixel::default();
        Self {
            cell_size,
            min_cell_size,
            max_cell_size,
            offset,
        }
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn offset(&self) -> Pixel {
        self.offset
    }

    pub fn set_cell_size(&mut self, cell_size: i32) {
        self.cell_size = cell_size.clamp(self.min_cell_size, self.max_cell_size);
    }

    pub fn zoom_in(&mut self) {
        self.set_cell_size(self.cell_size.saturating_add(1));
    }

    pub fn zoom_out(&mut self) {
        self.set_cell_size(self.cell_size.saturating_sub(1));
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.offset = Pixel::new(self.offset.x + dx, self.offset.y + dy);
    }

    pub fn screen_to_grid(&self, pixel: Pixel) -> Cell {
        screen_to_grid(pixel, self.cell_size, self.offset)
    }

    pub fn grid_to_screen(&self, cell: Cell) -> Pixel {
        grid_to_screen(cell, self.cell_size, self.offset)
    }

    /// Screen position of the cell when any part of it is on screen.
    pub fn place(&self, cell: Cell, width: i32, height: i32) -> Option<Pixel> {
        let pixel = self.grid_to_screen(cell);
        is_visible(pixel, self.cell_size, width, height).then_some(pixel)
    }

    /// The cells lying entirely inside a `width` by `height` screen.
    pub fn visible_bounds(&self, width: i32, height: i32) -> Bounds {
        let Pixel { x, y } = self.offset;
        let size = self.cell_size;
        let min = cell!(ceil_div(-x, size), ceil_div(-y, size));
        let max = cell!((width - x).div_euclid(size), (height - y).div_euclid(size));
        Bounds::new(min, max)
    }
}
