use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use crate::{Cell, Grid, Pattern, Pixel, Settings, Viewport, World};

/// Paces automatic generations: one advance every `tick_rate` driver frames
/// while running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clock {
    tick: u32,
    tick_rate: u32,
    paused: bool,
    generation: u64,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Clock {
    /// Starts paused. A zero tick rate behaves like one.
    pub fn new(tick_rate: u32) -> Self {
        Self {
            tick: 0,
            tick_rate: tick_rate.max(1),
            paused: true,
            generation: 0,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    pub fn set_tick_rate(&mut self, tick_rate: u32) {
        self.tick_rate = tick_rate.max(1);
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Counts one driver frame, returns whether a generation is due.
    pub fn tick(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.tick += 1;
        if self.tick >= self.tick_rate {
            self.tick = 0;
            true
        } else {
            false
        }
    }
}

/// Everything a front-end can ask of the simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimCmd {
    Toggle(Cell),
    /// Toggle the cell under a screen pixel.
    ToggleAt(Pixel),
    Clear,
    Reset,
    FillAll,
    FillRandom(f64),
    Advance,
    TogglePause,
    ZoomIn,
    ZoomOut,
    SetCellSize(i32),
    Pan(i32, i32),
    SetTickRate(u32),
}

/// The grid together with its clock, its view, and the logical screen size
/// fills are computed against.
#[derive(Debug)]
pub struct Sim<W>
where
    W: World,
{
    grid: Grid<W>,
    clock: Clock,
    viewport: Viewport,
    seed: Pattern,
    screen: (i32, i32),
    rng: StdRng,
    shards: usize,
}

impl<W> Sim<W>
where
    W: World,
{
    pub fn new(seed: Pattern, settings: &Settings) -> Self {
        let grid = Grid::with_pattern(&seed);
        let clock = Clock::new(settings.tick_rate);
        let viewport = Viewport::new(
            settings.cell_size,
            settings.min_cell_size,
            settings.max_cell_size,
        );
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!("starting with {:?}, {} cells", seed.name, grid.population());
        Self {
            grid,
            clock,
            viewport,
            seed,
            screen: (0, 0),
            rng,
            shards: settings.shards,
        }
    }

    pub fn grid(&self) -> &Grid<W> {
        &self.grid
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn screen(&self) -> (i32, i32) {
        self.screen
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.screen = (width.max(0), height.max(0));
    }

    /// Moves to the next generation, running or not.
    pub fn advance(&mut self) {
        if self.shards > 1 {
            self.grid.advance_sharded(self.shards);
        } else {
            self.grid.advance();
        }
        self.clock.generation += 1;
    }

    /// Call once per driver frame.
    pub fn update(&mut self) -> bool {
        let due = self.clock.tick();
        if due {
            self.advance();
        }
        due
    }

    pub fn apply(&mut self, cmd: SimCmd) {
        debug!("applying {cmd:?}");
        let (width, height) = self.screen;
        match cmd {
            SimCmd::Toggle(cell) => {
                self.grid.toggle(cell);
            }
            SimCmd::ToggleAt(pixel) => {
                let cell = self.viewport.screen_to_grid(pixel);
                self.grid.toggle(cell);
            }
            SimCmd::Clear => {
                self.grid.clear();
                self.clock.set_paused(true);
            }
            SimCmd::Reset => self.grid.reset(&self.seed),
            SimCmd::FillAll => {
                let bounds = self.viewport.visible_bounds(width, height);
                self.grid.fill_all(bounds);
            }
            SimCmd::FillRandom(density) => {
                let bounds = self.viewport.visible_bounds(width, height);
                self.grid.fill_random(bounds, density, &mut self.rng);
            }
            SimCmd::Advance => self.advance(),
            SimCmd::TogglePause => self.clock.toggle_pause(),
            SimCmd::ZoomIn => self.viewport.zoom_in(),
            SimCmd::ZoomOut => self.viewport.zoom_out(),
            SimCmd::SetCellSize(size) => self.viewport.set_cell_size(size),
            SimCmd::Pan(dx, dy) => self.viewport.pan(dx, dy),
            SimCmd::SetTickRate(rate) => self.clock.set_tick_rate(rate),
        }
    }
}
