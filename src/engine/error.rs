use std::fmt;

use super::models::Coord;

/// Which input a rejected coordinate was supplied for.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Role {
    Start,
    Base,
    Goal(usize),
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Start => write!(f, "start"),
            Role::Base => write!(f, "base"),
            Role::Goal(i) => write!(f, "goal G{}", i + 1),
        }
    }
}

/// Errors raised by terrain construction and planning.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PlanError {
    #[error("grid dimensions must be non-zero, got {0}x{1}x{2}")]
    EmptyGrid(usize, usize, usize),

    #[error("grid {0}x{1}x{2} is too large to address")]
    GridTooLarge(usize, usize, usize),

    #[error("terrain has {actual} cells, expected {expected}")]
    CellCountMismatch { expected: usize, actual: usize },

    #[error("{role} {coord} is outside the grid")]
    OutOfBounds { role: Role, coord: Coord },

    #[error("{role} {coord} is on a blocked cell")]
    Blocked { role: Role, coord: Coord },

    #[error("{count} goals exceed the {max}-bit visit mask")]
    TooManyGoals { count: usize, max: usize },

    #[error("search stopped after expanding {0} nodes (expansion limit)")]
    ExpansionLimit(usize),

    #[error("search deadline passed after expanding {0} nodes")]
    DeadlineExceeded(usize),
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseCoordError {
    #[error("expected x,y,z but got {0:?}")]
    Arity(String),

    #[error("invalid coordinate component {0:?}")]
    Component(String),
}
