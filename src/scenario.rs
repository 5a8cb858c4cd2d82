use anyhow::{anyhow, bail, Context, Result};
use std::fs;
use tracing::info;

use crate::common::Cell;
use crate::map::Map;

/// Coordinates that fall one after another onto an initially open grid.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub width: usize,
    pub height: usize,
    pub falling: Vec<Cell>,
}

impl Scenario {
    pub fn load_from_file(path: &str, width: usize, height: usize) -> Result<Scenario> {
        let text =
            fs::read_to_string(path).with_context(|| format!("failed to read scenario {path}"))?;
        Self::parse(&text, width, height).with_context(|| format!("failed to parse scenario {path}"))
    }

    pub fn parse(text: &str, width: usize, height: usize) -> Result<Scenario> {
        if width == 0 || height == 0 {
            bail!("grid must not be empty, got {width}x{height}");
        }
        let mut falling = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (x, y) = line
                .split_once(',')
                .ok_or_else(|| anyhow!("line {}: expected `x,y`, got {line:?}", line_no + 1))?;
            let cell = Cell::new(
                x.trim()
                    .parse()
                    .with_context(|| format!("line {}: bad x coordinate", line_no + 1))?,
                y.trim()
                    .parse()
                    .with_context(|| format!("line {}: bad y coordinate", line_no + 1))?,
            );
            if cell.x >= width || cell.y >= height {
                bail!(
                    "line {}: {cell} lies outside the {width}x{height} grid",
                    line_no + 1
                );
            }
            falling.push(cell);
        }

        info!("Loaded {} falling coordinates", falling.len());
        Ok(Scenario {
            width,
            height,
            falling,
        })
    }

    pub fn start(&self) -> Cell {
        Cell::new(0, 0)
    }

    pub fn exit(&self) -> Cell {
        Cell::new(self.width - 1, self.height - 1)
    }

    /// The grid once the first `fallen` coordinates have landed.
    pub fn map_after(&self, fallen: usize) -> Map {
        let mut map = Map::open(self.width, self.height);
        for &cell in self.falling.iter().take(fallen) {
            map.set_wall(cell);
        }
        map
    }
}
