use std::io::{self, Write};

use termion::{clear, cursor};

use crate::Pixel;

/// A character buffer the size of the terminal, flushed in one write.
pub struct Canvas {
    lines: Vec<Vec<char>>,
    width: usize,
    height: usize,
}

impl Canvas {
    /// Leaves the bottom row of the terminal for the status line.
    pub fn from_screen() -> io::Result<Self> {
        let (width, height) = termion::terminal_size()?;
        Ok(Self::new(width as usize, height.saturating_sub(1) as usize))
    }

    pub fn new(width: usize, height: usize) -> Self {
        let lines = vec![vec![' '; width]; height];
        Self {
            lines,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Fills a square, clipped to the canvas.
    pub fn square(&mut self, corner: Pixel, size: i32, char: char) {
        let clip = |from: i32, len: usize| {
            let start = from.clamp(0, len as i32) as usize;
            let end = from.saturating_add(size).clamp(0, len as i32) as usize;
            start..end
        };
        for y in clip(corner.y, self.height) {
            for x in clip(corner.x, self.width) {
                self.lines[y][x] = char;
            }
        }
    }

    /// Marks cell boundaries: every column and row lying a multiple of
    /// `spacing` away from `origin`. Only blank characters are overwritten.
    pub fn grid_lines(&mut self, spacing: i32, origin: Pixel, char: char) {
        let on_line = |at: usize, from: i32| (at as i32 - from).rem_euclid(spacing) == 0;
        for (y, line) in self.lines.iter_mut().enumerate() {
            let row_on_line = on_line(y, origin.y);
            for (x, slot) in line.iter_mut().enumerate() {
                if *slot == ' ' && (row_on_line || on_line(x, origin.x)) {
                    *slot = char;
                }
            }
        }
    }

    pub fn display(&self, status: &str, out: &mut impl Write) -> io::Result<()> {
        let mut frame = format!("{}", clear::All);
        for (index, line) in self.lines.iter().enumerate() {
            let goto = cursor::Goto(1, index as u16 + 1);
            frame += &format!("{goto}");
            frame.extend(line);
        }
        let goto = cursor::Goto(1, self.height as u16 + 1);
        let status: String = status.chars().take(self.width).collect();
        frame += &format!("{goto}{status}");
        out.write_all(frame.as_bytes())?;
        out.flush()
    }
}
