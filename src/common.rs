use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub const fn new(x: usize, y: usize) -> Self {
        Cell { x, y }
    }

    pub fn manhattan(&self, other: Cell) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The cell `(dx, dy)` away, or `None` when that leaves the first quadrant.
    pub fn offset(&self, dx: isize, dy: isize) -> Option<Cell> {
        Some(Cell::new(
            self.x.checked_add_signed(dx)?,
            self.y.checked_add_signed(dy)?,
        ))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Offset of one step, y grows downwards.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub const fn right(self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    pub const fn left(self) -> Direction {
        match self {
            Direction::North => Direction::West,
            Direction::East => Direction::North,
            Direction::South => Direction::East,
            Direction::West => Direction::South,
        }
    }
}

/// A search state: a cell, plus a facing when turning has a cost.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Node {
    pub cell: Cell,
    pub facing: Option<Direction>,
}

impl Node {
    pub const fn at(cell: Cell) -> Self {
        Node { cell, facing: None }
    }

    pub const fn facing(cell: Cell, direction: Direction) -> Self {
        Node {
            cell,
            facing: Some(direction),
        }
    }
}

/// Edge weights of a search.
///
/// Without a turn cost the search only tracks positions and every move to one
/// of the four neighbours costs `step`. With a turn cost each node carries a
/// facing: moving forward costs `step`, rotating a quarter in place costs
/// `turn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostModel {
    pub step: usize,
    pub turn: Option<usize>,
}

impl Default for CostModel {
    fn default() -> Self {
        Self::uniform()
    }
}

impl CostModel {
    pub const fn uniform() -> Self {
        CostModel {
            step: 1,
            turn: None,
        }
    }

    pub const fn turn_penalty(step: usize, turn: usize) -> Self {
        CostModel {
            step,
            turn: Some(turn),
        }
    }

    pub fn is_oriented(&self) -> bool {
        self.turn.is_some()
    }
}

pub type CostMap = HashMap<Node, usize>;
pub type PredecessorMap = HashMap<Node, HashSet<Node>>;
