use crate::engine::neighbor_policy::move_cost;
use crate::engine::{Coord, Plan, Terrain, TerrainKind};

pub fn cell_description(kind: TerrainKind) -> &'static str {
    match kind {
        TerrainKind::Start => "Start",
        TerrainKind::Free => "Free space",
        TerrainKind::Fire => "Fire zone",
        TerrainKind::Goal => "Rescue",
        TerrainKind::Recharge => "Recharge",
        TerrainKind::Base => "Base",
        TerrainKind::Blocked => "",
    }
}

/// One line per path step, with the energy each step used.
pub fn step_lines(terrain: &Terrain, path: &[Coord]) -> Vec<String> {
    let describe = |c: Coord| terrain.kind(c).map(cell_description).unwrap_or("");
    let mut out = Vec::with_capacity(path.len());
    for (i, &cur) in path.iter().enumerate() {
        if i == 0 {
            out.push(format!("Step 1: Start at {} -> {} (Energy used: 0)", cur, describe(cur)));
            continue;
        }
        let dz = cur.z - path[i - 1].z;
        let verb = match dz {
            1 => "Climb to",
            -1 => "Descend to",
            _ => "Move to",
        };
        let cost = terrain.kind(cur).and_then(|k| move_cost(k, dz)).unwrap_or(0);
        out.push(format!("Step {}: {} {} -> {} (Energy used: {})", i + 1, verb, cur, describe(cur), cost));
    }
    out
}

pub fn plan_report(terrain: &Terrain, plan: &Plan, base: Coord) -> String {
    let mut lines = vec!["Optimal Path Using A*:".to_string(), String::new()];
    lines.extend(step_lines(terrain, &plan.path));
    lines.push(String::new());
    lines.push(format!("Total Energy Used: {} units", plan.total_cost));
    let status = plan
        .rescue_order
        .iter()
        .map(|i| format!("G{}", i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!("Rescue Status: {}", status));
    lines.push(format!("Mission Completion: Success! The drone returned to base {}", base));
    lines.join("\n")
}

/// Layer-by-layer dump of the grid symbols.
pub fn grid_dump(terrain: &Terrain) -> String {
    let dims = terrain.dims();
    let mut out = String::from("The Grid is:\n");
    for z in 0..dims.nz {
        out.push_str(&format!("Layer {}:\n", z));
        for x in 0..dims.nx {
            let row: Vec<String> = (0..dims.ny)
                .map(|y| {
                    let c = Coord::new(x as i32, y as i32, z as i32);
                    terrain.kind(c).map(|k| k.symbol()).unwrap_or('?').to_string()
                })
                .collect();
            out.push_str(&row.join(" "));
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Dims, SearchStats};

    fn tower() -> Terrain {
        Terrain::from_fn(Dims::new(1, 2, 2), |c| match (c.y, c.z) {
            (0, 0) => TerrainKind::Start,
            (0, 1) => TerrainKind::Goal,
            (1, 1) => TerrainKind::Fire,
            _ => TerrainKind::Base,
        })
        .unwrap()
    }

    #[test]
    fn steps_name_moves_and_costs() {
        let path = [Coord::new(0, 0, 0), Coord::new(0, 0, 1), Coord::new(0, 1, 1), Coord::new(0, 1, 0)];
        let lines = step_lines(&tower(), &path);
        assert_eq!(lines[0], "Step 1: Start at (0, 0, 0) -> Start (Energy used: 0)");
        assert_eq!(lines[1], "Step 2: Climb to (0, 0, 1) -> Rescue (Energy used: 3)");
        assert_eq!(lines[2], "Step 3: Move to (0, 1, 1) -> Fire zone (Energy used: 3)");
        assert_eq!(lines[3], "Step 4: Descend to (0, 1, 0) -> Base (Energy used: 2)");
    }

    #[test]
    fn report_lists_rescues_in_order() {
        let plan = Plan {
            path: vec![Coord::new(0, 0, 0), Coord::new(0, 0, 1)],
            total_cost: 3,
            rescue_order: vec![1, 0],
            stats: SearchStats::default(),
        };
        let report = plan_report(&tower(), &plan, Coord::new(0, 1, 0));
        assert!(report.contains("Total Energy Used: 3 units"));
        assert!(report.contains("Rescue Status: G2, G1"));
        assert!(report.ends_with("returned to base (0, 1, 0)"));
    }

    #[test]
    fn grid_dump_prints_layers() {
        let dump = grid_dump(&tower());
        assert_eq!(dump, "The Grid is:\nLayer 0:\nS B\nLayer 1:\nG F\n");
    }
}
