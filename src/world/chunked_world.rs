use std::collections::HashMap;

use metrohash::MetroBuildHasher;

use crate::{cell, Cell, World};

const CHUNK_SIZE: i32 = 16;

/// One bit per cell, `rows[y]` holds the row at local height `y`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Chunk {
    rows: [u16; CHUNK_SIZE as usize],
    population: u32,
}

impl Chunk {
    fn mask(local: Cell) -> (usize, u16) {
        (local.y as usize, 1 << local.x)
    }

    fn get(&self, local: Cell) -> bool {
        let (row, bit) = Self::mask(local);
        self.rows[row] & bit != 0
    }

    fn insert(&mut self, local: Cell) -> bool {
        let (row, bit) = Self::mask(local);
        let was_dead = self.rows[row] & bit == 0;
        self.rows[row] |= bit;
        self.population += was_dead as u32;
        was_dead
    }

    fn remove(&mut self, local: Cell) -> bool {
        let (row, bit) = Self::mask(local);
        let was_alive = self.rows[row] & bit != 0;
        self.rows[row] &= !bit;
        self.population -= was_alive as u32;
        was_alive
    }

    fn get_actives(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            (0..CHUNK_SIZE)
                .filter(move |&x| *row & (1 << x) != 0)
                .map(move |x| cell!(x, y as i32))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ChunkPos(Cell);

/// A sparse world storing live cells in bit-packed square chunks.
///
/// Chunks are created on first insertion and dropped as soon as their last
/// cell dies, so memory still follows the live population.
#[derive(Debug, Clone, Default)]
pub struct ChunkedWorld {
    chunks: HashMap<ChunkPos, Chunk, MetroBuildHasher>,
    population: usize,
}

impl ChunkedWorld {
    /// gets the position of the chunk containing the passed cell
    fn get_chunk_pos(Cell { x, y }: Cell) -> ChunkPos {
        ChunkPos(cell!(snap(x, CHUNK_SIZE), snap(y, CHUNK_SIZE)))
    }

    /// gets the position of a cell local to its parent chunk.
    fn get_local_pos(cell: Cell) -> Cell {
        let ChunkPos(chunk_pos) = Self::get_chunk_pos(cell);
        cell - chunk_pos
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}

/// Rounds `n` down to a multiple of `step`, towards negative infinity.
pub fn snap(n: i32, step: i32) -> i32 {
    n - n.rem_euclid(step)
}

impl World for ChunkedWorld {
    fn is_alive(&self, cell: Cell) -> bool {
        self.chunks
            .get(&Self::get_chunk_pos(cell))
            .map_or(false, |chunk| chunk.get(Self::get_local_pos(cell)))
    }

    fn insert(&mut self, cell: Cell) -> bool {
        let chunk = self.chunks.entry(Self::get_chunk_pos(cell)).or_default();
        let inserted = chunk.insert(Self::get_local_pos(cell));
        self.population += inserted as usize;
        inserted
    }

    fn remove(&mut self, cell: Cell) -> bool {
        let chunk_pos = Self::get_chunk_pos(cell);
        let Some(chunk) = self.chunks.get_mut(&chunk_pos) else {
            return false;
        };
        let removed = chunk.remove(Self::get_local_pos(cell));
        if chunk.population == 0 {
            self.chunks.remove(&chunk_pos);
        }
        self.population -= removed as usize;
        removed
    }

    fn clear(&mut self) {
        self.chunks.clear();
        self.population = 0;
    }

    fn len(&self) -> usize {
        self.population
    }

    fn actives(&self) -> Box<dyn Iterator<Item = Cell> + '_> {
        Box::new(
            self.chunks
                .iter()
                .flat_map(|(ChunkPos(chunk_pos), chunk)| {
                    chunk.get_actives().map(move |local| *chunk_pos + local)
                }),
        )
    }
}
