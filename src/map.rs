use anyhow::{anyhow, bail, Context};
use std::fs;
use std::str::FromStr;

use crate::algorithm::Pather;
use crate::common::{Cell, CostModel, Direction, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    passable: bool,
}

impl Tile {
    pub const OPEN: Tile = Tile { passable: true };
    pub const WALL: Tile = Tile { passable: false };

    pub fn is_passable(&self) -> bool {
        self.passable
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    pub height: usize,
    pub width: usize,
    grid: Vec<Vec<Tile>>, // grid[y][x]
}

impl Map {
    pub fn open(width: usize, height: usize) -> Self {
        Map {
            height,
            width,
            grid: vec![vec![Tile::OPEN; width]; height],
        }
    }

    /// Builds a map from rows of tiles; every row must have the same width.
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> anyhow::Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        if height == 0 || width == 0 {
            bail!("map must have at least one row and one column");
        }
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                bail!("row {y} has width {} but expected {width}", row.len());
            }
        }
        Ok(Map {
            height,
            width,
            grid: rows,
        })
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Out-of-bounds cells are never passable.
    pub fn is_passable(&self, cell: Cell) -> bool {
        self.contains(cell) && self.grid[cell.y][cell.x].is_passable()
    }

    /// The neighbouring cell in `direction`, if it lies inside the map.
    pub fn step(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        let (dx, dy) = direction.delta();
        cell.offset(dx, dy).filter(|&next| self.contains(next))
    }

    pub fn get_neighbors(&self, cell: Cell) -> Vec<Cell> {
        Direction::ALL
            .iter()
            .filter_map(|&direction| self.step(cell, direction))
            .filter(|&next| self.is_passable(next))
            .collect()
    }

    pub fn set_wall(&mut self, cell: Cell) {
        if self.contains(cell) {
            self.grid[cell.y][cell.x] = Tile::WALL;
        }
    }

    pub fn with_wall(&self, cell: Cell) -> Map {
        let mut map = self.clone();
        map.set_wall(cell);
        map
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.grid.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, tile)| tile.is_passable())
                .map(move |(x, _)| Cell::new(x, y))
        })
    }
}

impl Pather for Map {
    fn is_open(&self, cell: Cell) -> bool {
        self.is_passable(cell)
    }

    fn transitions(&self, node: Node, cost_model: &CostModel) -> Vec<(Node, usize)> {
        match (node.facing, cost_model.turn) {
            (Some(facing), Some(turn)) => {
                let mut moves = Vec::with_capacity(3);
                if let Some(ahead) = self
                    .step(node.cell, facing)
                    .filter(|&cell| self.is_passable(cell))
                {
                    moves.push((Node::facing(ahead, facing), cost_model.step));
                }
                moves.push((Node::facing(node.cell, facing.left()), turn));
                moves.push((Node::facing(node.cell, facing.right()), turn));
                moves
            }
            _ => self
                .get_neighbors(node.cell)
                .into_iter()
                .map(|cell| (Node::at(cell), cost_model.step))
                .collect(),
        }
    }
}

/// A map with a marked start (`S`) and end (`E`).
#[derive(Debug, Clone)]
pub struct Maze {
    pub map: Map,
    pub start: Cell,
    pub end: Cell,
}

impl Maze {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("failed to read maze {path}"))?;
        text.parse::<Maze>()
            .with_context(|| format!("failed to parse maze {path}"))
    }
}

impl FromStr for Maze {
    type Err = anyhow::Error;

    fn from_str(text: &str) -> anyhow::Result<Self> {
        let mut start = None;
        let mut end = None;
        let mut rows = Vec::new();

        for (y, line) in text.trim().lines().enumerate() {
            let mut row = Vec::with_capacity(line.len());
            for (x, ch) in line.trim_end().chars().enumerate() {
                let tile = match ch {
                    '#' => Tile::WALL,
                    '.' => Tile::OPEN,
                    'S' => {
                        if start.replace(Cell::new(x, y)).is_some() {
                            bail!("second start marker at {x},{y}");
                        }
                        Tile::OPEN
                    }
                    'E' => {
                        if end.replace(Cell::new(x, y)).is_some() {
                            bail!("second end marker at {x},{y}");
                        }
                        Tile::OPEN
                    }
                    other => bail!("unknown symbol {other:?} at {x},{y}"),
                };
                row.push(tile);
            }
            rows.push(row);
        }

        Ok(Maze {
            map: Map::from_rows(rows)?,
            start: start.ok_or_else(|| anyhow!("maze has no start marker"))?,
            end: end.ok_or_else(|| anyhow!("maze has no end marker"))?,
        })
    }
}
