//! Best-first search over (position, visited-goal mask) states.
//!
//! The frontier holds node ids into a per-call [`NodeArena`]; the best-cost
//! table maps each [`State`] to the lowest `f` it was expanded with. Entries
//! are never removed from the frontier eagerly: a popped entry whose state
//! already has a recorded `f` lower than or equal to its own is stale and is
//! dropped on the spot.
//!
//! Equal-`f` entries pop in insertion order (lowest node id first), so the
//! returned path is reproducible for identical inputs.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::Instant;

use super::error::{PlanError, Role};
use super::heuristic;
use super::models::{Coord, GoalMask, State, MAX_GOALS};
use super::neighbor_policy::{arrive, move_cost, MOVES};
use super::reconstruct::{rescue_order, NodeArena, NodeId, SearchNode};
use super::terrain::Terrain;

/// Cooperative stop conditions, checked between loop iterations.
#[derive(Clone, Debug, Default)]
pub struct SearchLimits {
    pub max_expansions: Option<usize>,
    pub deadline: Option<Instant>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct SearchStats {
    pub nodes_expanded: usize,
    pub nodes_pushed: usize,
    pub stale_skipped: usize,
    pub peak_frontier: usize,
}

/// A successful route: start to base, every goal visited.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Plan {
    pub path: Vec<Coord>,
    pub total_cost: u32,
    /// Goal indices in the order they were first reached.
    pub rescue_order: Vec<usize>,
    pub stats: SearchStats,
}

struct FrontierEntry {
    f: f64,
    node: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; older node wins ties.
        other.f.total_cmp(&self.f).then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Multi-goal route planner bound to one terrain, goal list and base.
///
/// The planner is immutable after construction; concurrent `find_path`
/// calls each own their frontier, table and arena.
#[derive(Clone, Debug)]
pub struct Planner {
    terrain: Terrain,
    goals: Vec<Coord>,
    base: Coord,
}

impl Planner {
    pub fn new(terrain: Terrain, goals: Vec<Coord>, base: Coord) -> Result<Self, PlanError> {
        if goals.len() > MAX_GOALS {
            return Err(PlanError::TooManyGoals { count: goals.len(), max: MAX_GOALS });
        }
        if !terrain.in_bounds(base) {
            return Err(PlanError::OutOfBounds { role: Role::Base, coord: base });
        }
        if let Some((i, g)) = goals.iter().enumerate().find(|(_, g)| !terrain.in_bounds(**g)) {
            return Err(PlanError::OutOfBounds { role: Role::Goal(i), coord: *g });
        }
        Ok(Self { terrain, goals, base })
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn goals(&self) -> &[Coord] {
        &self.goals
    }

    pub fn base(&self) -> Coord {
        self.base
    }

    pub fn heuristic(&self, pos: Coord, mask: GoalMask) -> f64 {
        heuristic::estimate(pos, mask, &self.goals, self.base)
    }

    pub fn is_terminal(&self, state: State) -> bool {
        state.mask.is_full(self.goals.len()) && state.pos == self.base
    }

    /// In-bounds, unblocked neighbours of `pos` with the cost of moving there.
    pub fn successors(&self, pos: Coord) -> impl Iterator<Item = (Coord, u32)> + '_ {
        MOVES.into_iter().filter_map(move |off| {
            let next = off.apply(pos);
            let kind = self.terrain.kind(next)?;
            move_cost(kind, off.dz()).map(|cost| (next, cost))
        })
    }

    /// First target (base, then goals) sitting on a blocked cell.
    pub fn blocked_target(&self) -> Option<Role> {
        if !self.terrain.is_traversable(self.base) {
            return Some(Role::Base);
        }
        self.goals
            .iter()
            .position(|g| !self.terrain.is_traversable(*g))
            .map(Role::Goal)
    }

    pub fn find_path(&self, start: Coord) -> Result<Option<Plan>, PlanError> {
        self.find_path_with(start, &SearchLimits::default())
    }

    /// Returns `Ok(None)` when no route visits every goal and returns to base.
    pub fn find_path_with(&self, start: Coord, limits: &SearchLimits) -> Result<Option<Plan>, PlanError> {
        if !self.terrain.in_bounds(start) {
            return Err(PlanError::OutOfBounds { role: Role::Start, coord: start });
        }
        if !self.terrain.is_traversable(start) {
            return Err(PlanError::Blocked { role: Role::Start, coord: start });
        }
        if self.blocked_target().is_some() {
            return Ok(None);
        }

        let mut stats = SearchStats::default();
        let mut arena = NodeArena::new();
        let mut frontier: BinaryHeap<FrontierEntry> = BinaryHeap::new();
        let mut best: HashMap<State, f64> = HashMap::new();

        let root = arena.push(SearchNode {
            state: State { pos: start, mask: GoalMask::EMPTY },
            g: 0,
            parent: None,
        });
        frontier.push(FrontierEntry { f: self.heuristic(start, GoalMask::EMPTY), node: root });
        stats.nodes_pushed = 1;
        stats.peak_frontier = 1;

        while let Some(FrontierEntry { f, node: id }) = frontier.pop() {
            if let Some(deadline) = limits.deadline {
                if Instant::now() >= deadline {
                    return Err(PlanError::DeadlineExceeded(stats.nodes_expanded));
                }
            }

            let SearchNode { state, g, .. } = *arena.get(id);
            if best.get(&state).is_some_and(|&recorded| recorded <= f) {
                stats.stale_skipped += 1;
                continue;
            }
            if limits.max_expansions.is_some_and(|max| stats.nodes_expanded >= max) {
                return Err(PlanError::ExpansionLimit(stats.nodes_expanded));
            }
            best.insert(state, f);
            stats.nodes_expanded += 1;

            let mask = arrive(state.mask, state.pos, &self.goals);
            if self.is_terminal(State { pos: state.pos, mask }) {
                let path = arena.path_to(id);
                let rescue_order = rescue_order(&path, &self.goals);
                return Ok(Some(Plan { path, total_cost: g, rescue_order, stats }));
            }

            for (next, cost) in self.successors(state.pos) {
                debug_assert!(cost > 0, "move cost must be positive");
                let g_new = g + cost;
                let f_new = f64::from(g_new) + self.heuristic(next, mask);
                let nid = arena.push(SearchNode {
                    state: State { pos: next, mask },
                    g: g_new,
                    parent: Some(id),
                });
                frontier.push(FrontierEntry { f: f_new, node: nid });
                stats.nodes_pushed += 1;
            }
            stats.peak_frontier = stats.peak_frontier.max(frontier.len());
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::models::TerrainKind;
    use crate::engine::terrain::Dims;

    fn column() -> Planner {
        let terrain = Terrain::open(Dims::new(1, 1, 3)).unwrap();
        Planner::new(terrain, vec![Coord::new(0, 0, 2)], Coord::new(0, 0, 0)).unwrap()
    }

    #[test]
    fn climb_then_descend_column() {
        // two climbs at 1+2, two descents at 1+1
        let plan = column().find_path(Coord::new(0, 0, 0)).unwrap().unwrap();
        assert_eq!(plan.total_cost, 2 * 3 + 2 * 2);
        assert_eq!(
            plan.path,
            vec![
                Coord::new(0, 0, 0),
                Coord::new(0, 0, 1),
                Coord::new(0, 0, 2),
                Coord::new(0, 0, 1),
                Coord::new(0, 0, 0),
            ]
        );
        assert_eq!(plan.rescue_order, vec![0]);
        // (0,0,0) is pushed again from z=1 before the goal is reached and popped after it was expanded
        assert_eq!(
            plan.stats,
            SearchStats { nodes_expanded: 5, nodes_pushed: 7, stale_skipped: 1, peak_frontier: 2 }
        );
    }

    #[test]
    fn equal_f_pops_in_insertion_order() {
        // two optimal routes to the far corner; +x is generated before +y, so it is expanded first
        let terrain = Terrain::open(Dims::new(2, 2, 1)).unwrap();
        let planner = Planner::new(terrain, vec![], Coord::new(1, 1, 0)).unwrap();
        let plan = planner.find_path(Coord::new(0, 0, 0)).unwrap().unwrap();
        assert_eq!(plan.total_cost, 2);
        assert_eq!(plan.path, vec![Coord::new(0, 0, 0), Coord::new(1, 0, 0), Coord::new(1, 1, 0)]);
        assert_eq!(
            plan.stats,
            SearchStats { nodes_expanded: 4, nodes_pushed: 7, stale_skipped: 0, peak_frontier: 4 }
        );
    }

    #[test]
    fn start_on_base_without_goals_is_zero_cost() {
        let terrain = Terrain::open(Dims::new(2, 2, 1)).unwrap();
        let planner = Planner::new(terrain, vec![], Coord::new(1, 1, 0)).unwrap();
        let plan = planner.find_path(Coord::new(1, 1, 0)).unwrap().unwrap();
        assert_eq!(plan.total_cost, 0);
        assert_eq!(plan.path, vec![Coord::new(1, 1, 0)]);
    }

    #[test]
    fn rejects_invalid_configuration() {
        let terrain = Terrain::open(Dims::new(2, 2, 2)).unwrap();
        let err = Planner::new(terrain.clone(), vec![Coord::new(0, 0, 5)], Coord::new(0, 0, 0)).unwrap_err();
        assert_eq!(err, PlanError::OutOfBounds { role: Role::Goal(0), coord: Coord::new(0, 0, 5) });

        let err = Planner::new(terrain.clone(), vec![], Coord::new(-1, 0, 0)).unwrap_err();
        assert!(matches!(err, PlanError::OutOfBounds { role: Role::Base, .. }));

        let goals = vec![Coord::new(0, 0, 0); MAX_GOALS + 1];
        let err = Planner::new(terrain, goals, Coord::new(0, 0, 0)).unwrap_err();
        assert_eq!(err, PlanError::TooManyGoals { count: MAX_GOALS + 1, max: MAX_GOALS });
    }

    #[test]
    fn invalid_start_is_an_error_not_a_crash() {
        let terrain = Terrain::from_fn(Dims::new(2, 1, 1), |c| {
            if c.x == 1 { TerrainKind::Blocked } else { TerrainKind::Free }
        })
        .unwrap();
        let planner = Planner::new(terrain, vec![], Coord::new(0, 0, 0)).unwrap();
        assert!(matches!(
            planner.find_path(Coord::new(1, 0, 0)),
            Err(PlanError::Blocked { role: Role::Start, .. })
        ));
        assert!(matches!(
            planner.find_path(Coord::new(0, 3, 0)),
            Err(PlanError::OutOfBounds { role: Role::Start, .. })
        ));
    }

    #[test]
    fn blocked_goal_means_no_plan() {
        let terrain = Terrain::from_fn(Dims::new(3, 1, 1), |c| {
            if c.x == 2 { TerrainKind::Blocked } else { TerrainKind::Free }
        })
        .unwrap();
        let planner = Planner::new(terrain, vec![Coord::new(2, 0, 0)], Coord::new(0, 0, 0)).unwrap();
        assert_eq!(planner.blocked_target(), Some(Role::Goal(0)));
        assert_eq!(planner.find_path(Coord::new(0, 0, 0)), Ok(None));
    }

    #[test]
    fn walled_off_base_exhausts_frontier() {
        // x = 1 is a wall across the whole layer
        let terrain = Terrain::from_fn(Dims::new(3, 2, 1), |c| {
            if c.x == 1 { TerrainKind::Blocked } else { TerrainKind::Free }
        })
        .unwrap();
        let planner = Planner::new(terrain, vec![Coord::new(0, 1, 0)], Coord::new(2, 0, 0)).unwrap();
        assert_eq!(planner.blocked_target(), None);
        assert_eq!(planner.find_path(Coord::new(0, 0, 0)), Ok(None));
    }

    #[test]
    fn limits_stop_the_loop() {
        let terrain = Terrain::open(Dims::new(4, 4, 2)).unwrap();
        let planner = Planner::new(terrain, vec![Coord::new(3, 3, 1)], Coord::new(0, 0, 0)).unwrap();

        let limits = SearchLimits { max_expansions: Some(2), deadline: None };
        assert_eq!(planner.find_path_with(Coord::new(0, 0, 0), &limits), Err(PlanError::ExpansionLimit(2)));

        let limits = SearchLimits { max_expansions: None, deadline: Some(Instant::now()) };
        assert_eq!(planner.find_path_with(Coord::new(0, 0, 0), &limits), Err(PlanError::DeadlineExceeded(0)));

        let limits = SearchLimits { max_expansions: Some(10_000), deadline: None };
        assert!(planner.find_path_with(Coord::new(0, 0, 0), &limits).unwrap().is_some());
    }

    #[test]
    fn fire_is_avoided_when_cheaper_around() {
        // fire strip along y = 1; straight through costs 3 * 3 + 1, around costs 6
        let terrain = Terrain::from_fn(Dims::new(5, 3, 1), |c| {
            if c.y == 1 && (1..=3).contains(&c.x) { TerrainKind::Fire } else { TerrainKind::Free }
        })
        .unwrap();
        let planner = Planner::new(terrain, vec![], Coord::new(4, 1, 0)).unwrap();
        let plan = planner.find_path(Coord::new(0, 1, 0)).unwrap().unwrap();
        assert_eq!(plan.total_cost, 6);
        assert!(plan
            .path
            .iter()
            .all(|c| planner.terrain().kind(*c) != Some(TerrainKind::Fire)));
    }

    #[test]
    fn successors_skip_walls_and_edges() {
        let terrain = Terrain::from_fn(Dims::new(2, 2, 2), |c| {
            if c == Coord::new(1, 0, 0) { TerrainKind::Blocked } else { TerrainKind::Free }
        })
        .unwrap();
        let planner = Planner::new(terrain, vec![], Coord::new(0, 0, 0)).unwrap();
        let succ: Vec<_> = planner.successors(Coord::new(0, 0, 0)).collect();
        assert_eq!(succ, vec![(Coord::new(0, 1, 0), 1), (Coord::new(0, 0, 1), 3)]);
    }
}
