use std::io::{stdout, Write};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;

pub use utils::{Bounds, Cell};
mod utils;

pub use world::{ChunkedWorld, HashedWorld, World};
pub mod world;

pub mod step;

pub use grid::Grid;
mod grid;

pub use pattern::Pattern;
mod pattern;

pub use viewport::{Pixel, Viewport};
pub mod viewport;

pub use sim::{Clock, Sim, SimCmd};
mod sim;

pub use config::{Args, Settings, Storage};
mod config;

mod view;

fn load_pattern(args: &Args) -> Result<Pattern> {
    match &args.pattern {
        Some(path) => Pattern::load(path),
        None => Pattern::named(&args.preset)
            .ok_or_else(|| anyhow!("unknown preset {:?}", args.preset)),
    }
}

/// Runs without a terminal and prints the survivors as `x,y` lines.
fn run_headless<W>(sim: &mut Sim<W>, generations: u64, out: &mut impl Write) -> Result<()>
where
    W: World,
{
    for _ in 0..generations {
        sim.advance();
    }
    info!(
        "{} cells alive after {} generations",
        sim.grid().population(),
        sim.clock().generation()
    );

    for Cell { x, y } in sim.grid().world().sorted() {
        writeln!(out, "{x},{y}")?;
    }
    Ok(())
}

fn run<W>(seed: Pattern, settings: &Settings, generations: Option<u64>) -> Result<()>
where
    W: World,
{
    let mut sim: Sim<W> = Sim::new(seed, settings);
    match generations {
        Some(generations) => run_headless(&mut sim, generations, &mut stdout().lock()),
        None => view::run(sim, settings),
    }
}

pub fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::resolve(&args)?;
    let level = settings.logger_level(args.generations.is_none())?;
    simple_logger::init_with_level(level).context("could not start logger")?;

    let seed = load_pattern(&args)?;
    match settings.storage {
        Storage::Hashed => run::<HashedWorld>(seed, &settings, args.generations),
        Storage::Chunked => run::<ChunkedWorld>(seed, &settings, args.generations),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_prints_sorted_survivors() {
        let mut sim: Sim<ChunkedWorld> = Sim::new(Pattern::glider(), &Settings::default());
        let mut out = Vec::new();
        run_headless(&mut sim, 4, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "1,3\n2,1\n2,3\n3,2\n3,3\n");
    }

    #[test]
    fn test_unknown_preset() {
        let args = Args::parse_from(["golrs", "--preset", "spaceship"]);
        assert!(load_pattern(&args).is_err());
        let args = Args::parse_from(["golrs", "--preset", "blinker"]);
        assert_eq!(load_pattern(&args).unwrap(), Pattern::blinker());
    }
}
