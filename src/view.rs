use std::{
    io::{stdin, stdout, Write},
    sync::mpsc,
    thread,
    time::Duration,
};

use anyhow::Result;
use log::{debug, info};
use termion::{
    cursor,
    event::{Event, Key, MouseButton, MouseEvent},
    input::{MouseTerminal, TermRead},
    raw::IntoRawMode,
};

use crate::{Pixel, Settings, Sim, SimCmd, World};

pub use canvas::Canvas;
mod canvas;

/// Arrow keys move the view by this many characters.
const PAN_STEP: i32 = 4;

#[derive(Debug)]
pub enum InputCmd {
    Exit,
    ToggleDebug,
    ToggleGrid,
    Sim(SimCmd),
}

fn translate(event: Event, density: f64) -> Option<InputCmd> {
    let sim = |cmd| Some(InputCmd::Sim(cmd));
    match event {
        Event::Key(Key::Char('q')) | Event::Key(Key::Ctrl('c')) => Some(InputCmd::Exit),
        Event::Key(Key::Char('d')) => Some(InputCmd::ToggleDebug),
        Event::Key(Key::Char('g')) => Some(InputCmd::ToggleGrid),
        Event::Key(Key::Char(' ')) => sim(SimCmd::TogglePause),
        Event::Key(Key::Char('n')) => sim(SimCmd::Advance),
        Event::Key(Key::Char('c')) => sim(SimCmd::Clear),
        Event::Key(Key::Char('s')) => sim(SimCmd::Reset),
        Event::Key(Key::Char('f')) => sim(SimCmd::FillAll),
        Event::Key(Key::Char('r')) => sim(SimCmd::FillRandom(density)),
        Event::Key(Key::Char('+' | '=')) => sim(SimCmd::ZoomIn),
        Event::Key(Key::Char('-')) => sim(SimCmd::ZoomOut),
        Event::Key(Key::Up) => sim(SimCmd::Pan(0, PAN_STEP)),
        Event::Key(Key::Down) => sim(SimCmd::Pan(0, -PAN_STEP)),
        Event::Key(Key::Left) => sim(SimCmd::Pan(PAN_STEP, 0)),
        Event::Key(Key::Right) => sim(SimCmd::Pan(-PAN_STEP, 0)),
        // termion reports 1-based terminal positions
        Event::Mouse(MouseEvent::Press(MouseButton::Left, x, y)) => {
            sim(SimCmd::ToggleAt(Pixel::new(x as i32 - 1, y as i32 - 1)))
        }
        _ => None,
    }
}

fn input_loop(sender: mpsc::Sender<InputCmd>, density: f64) {
    for event in stdin().events() {
        let Ok(event) = event else { break };
        if let Some(command) = translate(event, density) {
            if sender.send(command).is_err() {
                break;
            }
        }
    }
}

fn status_line<W>(sim: &Sim<W>, show_debug: bool) -> String
where
    W: World,
{
    let state = if sim.clock().is_paused() { "PAUSED" } else { "RUNNING" };
    if show_debug {
        format!(
            "{state} | generation {} | cells {} | cell size {} | offset {},{} | tick rate {}",
            sim.clock().generation(),
            sim.grid().population(),
            sim.viewport().cell_size(),
            sim.viewport().offset().x,
            sim.viewport().offset().y,
            sim.clock().tick_rate(),
        )
    } else {
        format!("{state} | space: run/pause  n: step  c: clear  s: seed  f: fill  r: random  +/-: zoom  arrows: pan  g: grid  d: debug  q: quit")
    }
}

fn draw<W>(sim: &Sim<W>, canvas: &mut Canvas, show_grid: bool)
where
    W: World,
{
    let (width, height) = sim.screen();
    let size = sim.viewport().cell_size();
    if show_grid {
        canvas.grid_lines(size, sim.viewport().offset(), '.');
    }
    for cell in sim.grid().live_cells() {
        if let Some(corner) = sim.viewport().place(cell, width, height) {
            canvas.square(corner, size, '#');
        }
    }
}

/// Runs the interactive front-end until the user quits.
pub fn run<W>(mut sim: Sim<W>, settings: &Settings) -> Result<()>
where
    W: World,
{
    let mut out = MouseTerminal::from(stdout().into_raw_mode()?);
    write!(out, "{}", cursor::Hide)?;

    let (sender, receiver) = mpsc::channel();
    let density = settings.random_density;
    thread::spawn(move || input_loop(sender, density));

    let frame_interval = Duration::from_millis(settings.frame_interval_ms);
    let mut show_debug = false;
    let mut show_grid = false;
    info!("terminal front-end started");
    'frames: loop {
        let mut canvas = Canvas::from_screen()?;
        sim.resize(canvas.width() as i32, canvas.height() as i32);

        for cmd in receiver.try_iter() {
            match cmd {
                InputCmd::Exit => break 'frames,
                InputCmd::ToggleDebug => show_debug = !show_debug,
                InputCmd::ToggleGrid => show_grid = !show_grid,
                InputCmd::Sim(cmd) => sim.apply(cmd),
            }
        }
        if sim.update() {
            debug!("generation {}", sim.clock().generation());
        }

        draw(&sim, &mut canvas, show_grid);
        canvas.display(&status_line(&sim, show_debug), &mut out)?;
        thread::sleep(frame_interval);
    }

    write!(out, "{}{}{}", termion::clear::All, cursor::Goto(1, 1), cursor::Show)?;
    out.flush()?;
    info!("terminal front-end stopped at generation {}", sim.clock().generation());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cell, HashedWorld, Pattern};

    #[test]
    fn test_translate_keys() {
        let cmd = translate(Event::Key(Key::Char('r')), 0.5);
        assert!(matches!(cmd, Some(InputCmd::Sim(SimCmd::FillRandom(d))) if d == 0.5));
        let cmd = translate(Event::Mouse(MouseEvent::Press(MouseButton::Left, 1, 3)), 0.5);
        assert!(matches!(cmd, Some(InputCmd::Sim(SimCmd::ToggleAt(Pixel { x: 0, y: 2 })))));
        assert!(matches!(translate(Event::Key(Key::Char('g')), 0.5), Some(InputCmd::ToggleGrid)));
        assert!(translate(Event::Key(Key::Char('z')), 0.5).is_none());
    }

    #[test]
    fn test_default_seed_fits_a_terminal() {
        let mut sim: Sim<HashedWorld> = Sim::new(Pattern::seed(), &Settings::default());
        sim.resize(80, 23);
        let placed: Vec<_> = sim
            .grid()
            .live_cells()
            .filter_map(|c| sim.viewport().place(c, 80, 23))
            .collect();
        assert_eq!(placed.len(), 5);
        assert!(placed.iter().all(|p| p.x >= 0 && p.x + 2 <= 80 && p.y >= 0 && p.y + 2 <= 23));
    }

    #[test]
    fn test_grid_overlay_sits_under_cells() {
        let dot = Pattern::new("dot", [cell!(1, 1)]);
        let mut sim: Sim<HashedWorld> = Sim::new(dot, &Settings::default());
        sim.resize(6, 4);
        let mut canvas = Canvas::new(6, 4);
        draw(&sim, &mut canvas, true);
        let mut out = Vec::new();
        canvas.display("", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches('#').count(), 4);
        // rows 0 to 3, minus the three line marks the cell covers
        assert_eq!(text.matches('.').count(), 6 + 3 + 4 + 2);
    }

    #[test]
    fn test_draw_places_cells() {
        let settings = Settings {
            cell_size: 2,
            ..Settings::default()
        };
        let mut sim: Sim<HashedWorld> = Sim::new(Pattern::new("dot", [cell!(1, 0)]), &settings);
        sim.resize(6, 2);
        let mut canvas = Canvas::new(6, 2);
        draw(&sim, &mut canvas, false);
        let mut out = Vec::new();
        canvas.display("", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches('#').count(), 4);
    }
}
