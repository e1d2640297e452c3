//! Turn choices available when leaving an edge.
//!
//! The symbol set matches the connection codes used by microscopic traffic
//! simulators (`s`, `t`, `l`, `r`, `L`, `R`).  At a given edge there is at
//! most one outgoing edge per direction.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// A discrete turn choice.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Straight,
    TurnAround,
    Left,
    Right,
    SlightLeft,
    SlightRight,
}

impl Direction {
    /// Number of directions; sizes per-edge adjacency arrays.
    pub const COUNT: usize = 6;

    /// All directions in their canonical order.  Iteration over an edge's
    /// outgoing map always follows this order, which keeps tie-breaking in
    /// the pathfinder deterministic.
    pub const ALL: [Direction; Direction::COUNT] = [
        Direction::Straight,
        Direction::TurnAround,
        Direction::Left,
        Direction::Right,
        Direction::SlightLeft,
        Direction::SlightRight,
    ];

    /// Position in [`Direction::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Direction::Straight    => 0,
            Direction::TurnAround  => 1,
            Direction::Left        => 2,
            Direction::Right       => 3,
            Direction::SlightLeft  => 4,
            Direction::SlightRight => 5,
        }
    }

    /// Single-character connection code.
    pub fn symbol(self) -> char {
        match self {
            Direction::Straight    => 's',
            Direction::TurnAround  => 't',
            Direction::Left        => 'l',
            Direction::Right       => 'r',
            Direction::SlightLeft  => 'L',
            Direction::SlightRight => 'R',
        }
    }

    /// Parse a connection code.  Case matters: `l` is left, `L` slight-left.
    pub fn from_symbol(c: char) -> Option<Direction> {
        match c {
            's' => Some(Direction::Straight),
            't' => Some(Direction::TurnAround),
            'l' => Some(Direction::Left),
            'r' => Some(Direction::Right),
            'L' => Some(Direction::SlightLeft),
            'R' => Some(Direction::SlightRight),
            _   => None,
        }
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Direction::from_symbol(c)
                .ok_or_else(|| CoreError::UnknownDirection(trimmed.to_owned())),
            _ => Err(CoreError::UnknownDirection(trimmed.to_owned())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
