//! Multi-goal route planning over a 3D terrain grid.
//!
//! The planner searches the product of grid cells and the power set of
//! goals, so the state count is bounded by `cells * 2^k`. Goal counts beyond
//! [`MAX_GOALS`] are rejected; in practice the search becomes intractable
//! long before that, and [`SearchLimits`] exists to bound it.

pub mod error;
pub mod heuristic;
pub mod models;
pub mod neighbor_policy;
pub mod reconstruct;
pub mod search;
pub mod terrain;

pub use error::{ParseCoordError, PlanError, Role};
pub use models::{Coord, GoalMask, State, TerrainKind, MAX_GOALS};
pub use search::{Plan, Planner, SearchLimits, SearchStats};
pub use terrain::{Dims, Terrain};
