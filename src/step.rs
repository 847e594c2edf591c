use std::{collections::HashMap, thread};

use log::trace;
use metrohash::MetroBuildHasher;

use crate::{cell, Cell, World};

/// Live-neighbor counts, keyed by every cell adjacent to at least one live
/// cell. Cells without live neighbors never appear.
pub type Tally = HashMap<Cell, u8, MetroBuildHasher>;

const NEIGHBOR_OFFSETS: [Cell; 8] = [
    cell!(-1, -1),
    cell!(0, -1),
    cell!(1, -1),
    cell!(-1, 0),
    cell!(1, 0),
    cell!(-1, 1),
    cell!(0, 1),
    cell!(1, 1),
];

/// The Moore neighborhood of a cell, excluding the cell itself.
pub fn neighbors(cell: Cell) -> impl Iterator<Item = Cell> {
    NEIGHBOR_OFFSETS.into_iter().map(move |offset| cell + offset)
}

pub fn tally(actives: impl IntoIterator<Item = Cell>) -> Tally {
    let actives = actives.into_iter();
    let mut tally = Tally::with_capacity_and_hasher(actives.size_hint().0 * 8, Default::default());
    for active in actives {
        for neighbor in neighbors(active) {
            *tally.entry(neighbor).or_insert(0) += 1;
        }
    }
    tally
}

/// Sums `other` into `into`. Counts from disjoint sets of live cells add up
/// to the count of their union, whatever the merge order.
pub fn merge_tallies(into: &mut Tally, other: Tally) {
    for (cell, count) in other {
        *into.entry(cell).or_insert(0) += count;
    }
}

/// Applies the birth / survival rule to a finished tally.
pub fn next_generation<W>(current: &W, tally: &Tally) -> W
where
    W: World,
{
    let mut next = W::default();
    for (&cell, &count) in tally {
        match (current.is_alive(cell), count) {
            (_, 3) | (true, 2) => {
                next.insert(cell);
            }
            _ => (), // dies or stays dead
        }
    }
    next
}

/// Computes the generation following `current`.
pub fn step<W>(current: &W) -> W
where
    W: World,
{
    let tally = tally(current.actives());
    trace!("stepping {} cells, {} candidates", current.len(), tally.len());
    next_generation(current, &tally)
}

/// Same result as [`step`], with the tally split across `shards` threads.
pub fn step_sharded<W>(current: &W, shards: usize) -> W
where
    W: World,
{
    let actives: Vec<Cell> = current.actives().collect();
    let shard_len = actives.len().div_ceil(shards.max(1)).max(1);
    if shard_len >= actives.len() {
        return step(current);
    }

    let tally = thread::scope(|scope| {
        let workers: Vec<_> = actives
            .chunks(shard_len)
            .map(|shard| scope.spawn(move || tally(shard.iter().copied())))
            .collect();
        let mut total = Tally::default();
        for worker in workers {
            match worker.join() {
                Ok(partial) => merge_tallies(&mut total, partial),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        total
    });
    trace!("stepped {} cells over {} shards", actives.len(), actives.len().div_ceil(shard_len));
    next_generation(current, &tally)
}
