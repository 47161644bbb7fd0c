use super::models::{Coord, GoalMask, TerrainKind};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Offset(pub i32, pub i32, pub i32);

impl Offset {
    pub fn apply(self, c: Coord) -> Coord {
        Coord::new(c.x + self.0, c.y + self.1, c.z + self.2)
    }

    pub fn dz(self) -> i32 {
        self.2
    }
}

/// The six axis-aligned moves, in expansion order: -x, +x, -y, +y, -z, +z.
pub const MOVES: [Offset; 6] = [
    Offset(-1, 0, 0),
    Offset(1, 0, 0),
    Offset(0, -1, 0),
    Offset(0, 1, 0),
    Offset(0, 0, -1),
    Offset(0, 0, 1),
];

/// Extra cost for changing layer: +2 to climb, +1 to descend.
pub fn vertical_bias(dz: i32) -> u32 {
    match dz {
        1 => 2,
        -1 => 1,
        _ => 0,
    }
}

/// Cost of stepping into a cell of kind `dest` with vertical delta `dz`.
/// `None` when the destination is blocked.
pub fn move_cost(dest: TerrainKind, dz: i32) -> Option<u32> {
    dest.base_cost().map(|base| base + vertical_bias(dz))
}

/// Sets the bit of every not-yet-visited goal located at `pos`.
pub fn arrive(mask: GoalMask, pos: Coord, goals: &[Coord]) -> GoalMask {
    goals
        .iter()
        .enumerate()
        .filter(|&(i, g)| !mask.contains(i) && *g == pos)
        .fold(mask, |m, (i, _)| m.with(i))
}
