use super::error::PlanError;
use super::models::{Coord, TerrainKind};

/// Grid extent along x, y and z.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Dims {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl Dims {
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self { nx, ny, nz }
    }

    /// Total cell count, or `None` when the grid cannot be addressed with
    /// `i32` coordinates and a `usize` index.
    pub fn cell_count(&self) -> Option<usize> {
        let max = i32::MAX as usize;
        if self.nx > max || self.ny > max || self.nz > max {
            return None;
        }
        self.nx.checked_mul(self.ny)?.checked_mul(self.nz)
    }

    fn checked_count(&self) -> Result<usize, PlanError> {
        if self.nx == 0 || self.ny == 0 || self.nz == 0 {
            return Err(PlanError::EmptyGrid(self.nx, self.ny, self.nz));
        }
        self.cell_count().ok_or(PlanError::GridTooLarge(self.nx, self.ny, self.nz))
    }
}

/// Read-only 3D occupancy and cost grid.
///
/// Cells are stored x-major: `index = (x * ny + y) * nz + z`.
#[derive(Clone, Debug)]
pub struct Terrain {
    dims: Dims,
    cells: Vec<TerrainKind>,
}

impl Terrain {
    pub fn new(dims: Dims, cells: Vec<TerrainKind>) -> Result<Self, PlanError> {
        let expected = dims.checked_count()?;
        if cells.len() != expected {
            return Err(PlanError::CellCountMismatch { expected, actual: cells.len() });
        }
        Ok(Self { dims, cells })
    }

    /// Builds a grid by asking `f` for the kind of every cell.
    pub fn from_fn<F>(dims: Dims, mut f: F) -> Result<Self, PlanError>
    where
        F: FnMut(Coord) -> TerrainKind,
    {
        let mut cells = Vec::with_capacity(dims.checked_count()?);
        for x in 0..dims.nx {
            for y in 0..dims.ny {
                for z in 0..dims.nz {
                    cells.push(f(Coord::new(x as i32, y as i32, z as i32)));
                }
            }
        }
        Self::new(dims, cells)
    }

    /// All-free grid, handy for tests and synthetic scenarios.
    pub fn open(dims: Dims) -> Result<Self, PlanError> {
        Self::from_fn(dims, |_| TerrainKind::Free)
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn in_bounds(&self, c: Coord) -> bool {
        self.index(c).is_some()
    }

    pub fn kind(&self, c: Coord) -> Option<TerrainKind> {
        self.index(c).map(|i| self.cells[i])
    }

    /// In bounds and not blocked.
    pub fn is_traversable(&self, c: Coord) -> bool {
        self.kind(c).map(TerrainKind::is_traversable).unwrap_or(false)
    }

    /// Every in-bounds coordinate, in storage order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let Dims { nx, ny, nz } = self.dims;
        (0..nx).flat_map(move |x| {
            (0..ny).flat_map(move |y| (0..nz).map(move |z| Coord::new(x as i32, y as i32, z as i32)))
        })
    }

    fn index(&self, c: Coord) -> Option<usize> {
        if c.x < 0 || c.y < 0 || c.z < 0 {
            return None;
        }
        let (x, y, z) = (c.x as usize, c.y as usize, c.z as usize);
        if x >= self.dims.nx || y >= self.dims.ny || z >= self.dims.nz {
            return None;
        }
        Some((x * self.dims.ny + y) * self.dims.nz + z)
    }
}
