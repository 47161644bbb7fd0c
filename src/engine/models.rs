use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ParseCoordError;

/// A cell position in the terrain grid.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Straight-line distance in continuous space, ignoring terrain.
    pub fn euclidean(&self, other: &Coord) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        let dz = f64::from(self.z - other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<[i32; 3]> for Coord {
    fn from(v: [i32; 3]) -> Self {
        Coord::new(v[0], v[1], v[2])
    }
}

// format: x,y,z
impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(|p| p.trim()).collect();
        if parts.len() != 3 {
            return Err(ParseCoordError::Arity(s.to_string()));
        }
        let mut v = [0i32; 3];
        for (slot, part) in v.iter_mut().zip(parts.iter()) {
            *slot = part
                .parse::<i32>()
                .map_err(|_| ParseCoordError::Component(part.to_string()))?;
        }
        Ok(Coord::from(v))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    Free,
    Fire,
    Goal,
    Base,
    Start,
    Recharge,
    Blocked,
}

impl TerrainKind {
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '0' => Some(TerrainKind::Free),
            'F' => Some(TerrainKind::Fire),
            'G' => Some(TerrainKind::Goal),
            'B' => Some(TerrainKind::Base),
            'S' => Some(TerrainKind::Start),
            'R' => Some(TerrainKind::Recharge),
            '1' => Some(TerrainKind::Blocked),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            TerrainKind::Free => '0',
            TerrainKind::Fire => 'F',
            TerrainKind::Goal => 'G',
            TerrainKind::Base => 'B',
            TerrainKind::Start => 'S',
            TerrainKind::Recharge => 'R',
            TerrainKind::Blocked => '1',
        }
    }

    pub fn is_traversable(self) -> bool {
        self != TerrainKind::Blocked
    }

    /// Cost of entering a cell of this kind before any vertical bias.
    /// `None` for blocked cells.
    pub fn base_cost(self) -> Option<u32> {
        match self {
            TerrainKind::Blocked => None,
            TerrainKind::Fire => Some(3),
            _ => Some(1),
        }
    }
}

/// Largest goal count the visit mask can track.
pub const MAX_GOALS: usize = u64::BITS as usize;

/// Bit `i` is set once goal `i` has been reached.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct GoalMask(pub u64);

impl GoalMask {
    pub const EMPTY: GoalMask = GoalMask(0);

    /// Mask with the low `k` bits set.
    pub fn full(k: usize) -> Self {
        debug_assert!(k <= MAX_GOALS);
        if k >= MAX_GOALS {
            GoalMask(u64::MAX)
        } else {
            GoalMask((1u64 << k) - 1)
        }
    }

    pub fn contains(self, i: usize) -> bool {
        self.0 & (1u64 << i) != 0
    }

    pub fn with(self, i: usize) -> Self {
        GoalMask(self.0 | (1u64 << i))
    }

    pub fn is_full(self, k: usize) -> bool {
        self == GoalMask::full(k)
    }
}

/// Search node identity: the same cell with different goal progress is a
/// different state.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct State {
    pub pos: Coord,
    pub mask: GoalMask,
}
