use anyhow::{anyhow, bail, Context};
use std::fs;
use std::str::FromStr;

use crate::algorithm::Pather;
use crate::common::{Cell, CostModel, Direction, Node};

pub const TRAILHEAD: u8 = 0;
pub const SUMMIT: u8 = 9;

/// Topographic map of single-digit heights. `.` marks ground that no trail
/// may cross.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightMap {
    pub height: usize,
    pub width: usize,
    grid: Vec<Vec<Option<u8>>>, // grid[y][x]
}

impl HeightMap {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read height map {path}"))?;
        text.parse::<HeightMap>()
            .with_context(|| format!("failed to parse height map {path}"))
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    pub fn height_at(&self, cell: Cell) -> Option<u8> {
        if self.contains(cell) {
            self.grid[cell.y][cell.x]
        } else {
            None
        }
    }

    /// Cells at `level`, row by row.
    pub fn cells_at(&self, level: u8) -> Vec<Cell> {
        self.grid
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(move |&(_, &h)| h == Some(level))
                    .map(move |(x, _)| Cell::new(x, y))
            })
            .collect()
    }
}

/// Trails only climb, one level per step.
impl Pather for HeightMap {
    fn is_open(&self, cell: Cell) -> bool {
        self.height_at(cell).is_some()
    }

    fn transitions(&self, node: Node, cost_model: &CostModel) -> Vec<(Node, usize)> {
        let Some(level) = self.height_at(node.cell) else {
            return Vec::new();
        };
        Direction::ALL
            .iter()
            .filter_map(|&direction| {
                let (dx, dy) = direction.delta();
                node.cell.offset(dx, dy)
            })
            .filter(|&next| self.height_at(next) == Some(level + 1))
            .map(|next| (Node::at(next), cost_model.step))
            .collect()
    }
}

impl FromStr for HeightMap {
    type Err = anyhow::Error;

    fn from_str(text: &str) -> anyhow::Result<Self> {
        let mut grid = Vec::new();
        for (y, line) in text.trim().lines().enumerate() {
            let row = line
                .trim_end()
                .chars()
                .enumerate()
                .map(|(x, ch)| match ch {
                    '.' => Ok(None),
                    _ => match ch.to_digit(10) {
                        Some(digit) => Ok(Some(digit as u8)),
                        None => Err(anyhow!("unknown symbol {ch:?} at {x},{y}")),
                    },
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            grid.push(row);
        }

        let height = grid.len();
        let width = grid.first().map_or(0, |row| row.len());
        if height == 0 || width == 0 {
            bail!("height map must have at least one row and one column");
        }
        if let Some(y) = grid.iter().position(|row| row.len() != width) {
            bail!("row {y} has width {} but expected {width}", grid[y].len());
        }
        Ok(HeightMap {
            height,
            width,
            grid,
        })
    }
}
