//! Admissible lower bound on the remaining cost of an augmented state.
//!
//! Every move costs at least 1 and covers exactly one unit of straight-line
//! distance, so Euclidean distance never exceeds the terrain-costed cost.
//! The remaining route must pass through every unvisited goal and end at
//! base; in particular it passes through the goal nearest to `pos`, which
//! bounds it below by `d(pos, nearest) + d(nearest, base)`.

use super::models::{Coord, GoalMask};

pub fn estimate(pos: Coord, mask: GoalMask, goals: &[Coord], base: Coord) -> f64 {
    // Nearest unvisited goal; the first one wins on equal distance.
    let mut nearest: Option<(f64, Coord)> = None;
    for (i, g) in goals.iter().enumerate() {
        if mask.contains(i) {
            continue;
        }
        let d = pos.euclidean(g);
        if nearest.map_or(true, |(best, _)| d < best) {
            nearest = Some((d, *g));
        }
    }
    match nearest {
        Some((d, g)) => d + g.euclidean(&base),
        None => pos.euclidean(&base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_visited_uses_distance_to_base() {
        let goals = [Coord::new(5, 5, 5)];
        let h = estimate(Coord::new(3, 4, 0), GoalMask(1), &goals, Coord::new(0, 0, 0));
        assert_eq!(h, 5.0);
    }

    #[test]
    fn only_nearest_goal_contributes_to_base_leg() {
        let base = Coord::new(0, 0, 0);
        let goals = [Coord::new(10, 0, 0), Coord::new(0, 2, 0)];
        let pos = Coord::new(0, 4, 0);
        // nearest is goal 1 at distance 2, then 2 to base
        assert_eq!(estimate(pos, GoalMask::EMPTY, &goals, base), 4.0);
        // with goal 1 visited only goal 0 remains
        let h = estimate(pos, GoalMask(0b10), &goals, base);
        assert!((h - (116f64.sqrt() + 10.0)).abs() < 1e-9);
    }

    #[test]
    fn zero_at_base_with_no_goals() {
        assert_eq!(estimate(Coord::new(1, 1, 1), GoalMask::EMPTY, &[], Coord::new(1, 1, 1)), 0.0);
    }
}
