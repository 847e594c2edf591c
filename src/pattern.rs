use std::{fs, path::Path};

use anyhow::{bail, Context, Result};

use crate::{cell, viewport::MAX_CELL_SIZE, Cell};

/// A named set of cells used to seed a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Pattern {
    pub fn new(name: impl Into<String>, cells: impl IntoIterator<Item = Cell>) -> Self {
        let name = name.into();
        let cells = cells.into_iter().collect();
        Self { name, cells }
    }

    /// The pattern a fresh game starts with.
    pub fn seed() -> Self {
        let cells = [cell!(5, 5), cell!(6, 6), cell!(6, 7), cell!(5, 7), cell!(4, 7)];
        Self::new("seed", cells)
    }

    pub fn glider() -> Self {
        let cells = [cell!(1, 0), cell!(2, 1), cell!(0, 2), cell!(1, 2), cell!(2, 2)];
        Self::new("glider", cells)
    }

    pub fn block() -> Self {
        Self::new("block", [cell!(0, 0), cell!(1, 0), cell!(0, 1), cell!(1, 1)])
    }

    pub fn blinker() -> Self {
        Self::new("blinker", [cell!(1, 0), cell!(1, 1), cell!(1, 2)])
    }

    pub fn named(name: &str) -> Option<Self> {
        match name {
            "seed" => Some(Self::seed()),
            "glider" => Some(Self::glider()),
            "block" => Some(Self::block()),
            "blinker" => Some(Self::blinker()),
            _ => None,
        }
    }

    /// Reads a pattern from a plain-text picture where `#`, `O` or `*` mark
    /// live cells. Lines starting with `!` are comments.
    pub fn from_plaintext(name: impl Into<String>, text: &str) -> Self {
        let mut cells = vec![];
        let rows = text.lines().filter(|line| !line.starts_with('!'));
        for (y, row) in rows.enumerate() {
            for (x, c) in row.chars().enumerate() {
                if matches!(c, '#' | 'O' | '*') {
                    cells.push(cell!(x as i32, y as i32));
                }
            }
        }
        Self::new(name, cells)
    }

    /// Reads a pattern from one `x,y` pair per line. Blank lines and lines
    /// starting with `#` are skipped.
    pub fn from_coords(name: impl Into<String>, text: &str) -> Result<Self> {
        let mut cells = vec![];
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let cell = parse_coord(line).with_context(|| format!("line {}", index + 1))?;
            cells.push(cell);
        }
        Ok(Self::new(name, cells))
    }

    /// Loads a pattern file, `.csv` and `.coords` files as coordinate lists
    /// and anything else as a plain-text picture.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not read pattern file {}", path.display()))?;
        let name = path
            .file_stem()
            .map_or_else(|| "pattern".into(), |stem| stem.to_string_lossy().into_owned());
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("csv" | "coords") => Self::from_coords(name, &text)
                .with_context(|| format!("invalid coordinates in {}", path.display())),
            _ => Ok(Self::from_plaintext(name, &text)),
        }
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::seed()
    }
}

/// Largest coordinate a pattern file may use. Neighbor and pixel arithmetic
/// on cells up to this far out stays within `i32`.
pub const COORD_LIMIT: i32 = i32::MAX / MAX_CELL_SIZE;

fn parse_coord(line: &str) -> Result<Cell> {
    let Some((x, y)) = line.split_once(',') else {
        bail!("expected `x,y`, found {line:?}");
    };
    let x: i32 = x.trim().parse().with_context(|| format!("invalid x coordinate {x:?}"))?;
    let y: i32 = y.trim().parse().with_context(|| format!("invalid y coordinate {y:?}"))?;
    if x.unsigned_abs() > COORD_LIMIT as u32 || y.unsigned_abs() > COORD_LIMIT as u32 {
        bail!("coordinate {x},{y} is outside ±{COORD_LIMIT}");
    }
    Ok(cell!(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HashedWorld, World};

    #[test]
    fn test_seed_cells() {
        let seed = Pattern::default();
        assert_eq!(
            seed.cells,
            vec![cell!(5, 5), cell!(6, 6), cell!(6, 7), cell!(5, 7), cell!(4, 7)]
        );
    }

    #[test]
    fn test_named() {
        assert_eq!(Pattern::named("block"), Some(Pattern::block()));
        assert_eq!(Pattern::named("nope"), None);
    }

    #[test]
    fn test_plaintext() {
        let text = "!Name: glider\n.O.\n..O\nOOO\n";
        let pattern = Pattern::from_plaintext("glider", text);
        assert_eq!(pattern.cells, Pattern::glider().cells);

        let hashes = Pattern::from_plaintext("hash", "# #\n\n #");
        assert_eq!(pattern_cells(&hashes), vec![(0, 0), (1, 2), (2, 0)]);
    }

    #[test]
    fn test_coords() {
        let text = "# a blinker\n1,0\n 1 , 1 \n\n-1,-2\n";
        let pattern = Pattern::from_coords("blinker", text).unwrap();
        assert_eq!(pattern.cells, vec![cell!(1, 0), cell!(1, 1), cell!(-1, -2)]);
    }

    #[test]
    fn test_coords_errors_name_the_line() {
        let err = Pattern::from_coords("bad", "0,0\n1;2\n").unwrap_err();
        assert_eq!(err.to_string(), "line 2");
        assert!(format!("{err:#}").contains("expected `x,y`"));

        let err = Pattern::from_coords("bad", "0,zero").unwrap_err();
        assert!(format!("{err:#}").contains("invalid y coordinate"));
    }

    #[test]
    fn test_coords_far_out_are_rejected() {
        let err = Pattern::from_coords("far", "0,0\n2147483647,0\n").unwrap_err();
        assert_eq!(err.to_string(), "line 2");
        assert!(format!("{err:#}").contains("outside"));
        assert!(Pattern::from_coords("far", "0,-2147483648").is_err());

        let edge = format!("{COORD_LIMIT},-{COORD_LIMIT}");
        let pattern = Pattern::from_coords("edge", &edge).unwrap();
        let world = HashedWorld::from_cells(pattern.cells);
        assert!(crate::step::step(&world).is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Pattern::load(Path::new("/definitely/not/here.cells")).unwrap_err();
        assert!(err.to_string().contains("could not read pattern file"));
    }

    fn pattern_cells(pattern: &Pattern) -> Vec<(i32, i32)> {
        let mut cells: Vec<_> = pattern.cells.iter().map(|c| (c.x, c.y)).collect();
        cells.sort_unstable();
        cells
    }
}
