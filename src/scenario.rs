use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::engine::{Coord, Dims, Planner, Terrain, TerrainKind};

/// On-disk scenario. `layers[z][x]` is a row whose `y`-th symbol is a cell.
#[derive(Deserialize, Debug)]
struct ScenarioFile {
    layers: Vec<Vec<String>>,
    #[serde(default)]
    start: Option<[i32; 3]>,
    #[serde(default)]
    base: Option<[i32; 3]>,
    #[serde(default)]
    goals: Option<Vec<[i32; 3]>>,
}

/// Everything the planner needs, translated from a scenario file.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub terrain: Terrain,
    pub goals: Vec<Coord>,
    pub base: Coord,
    pub start: Coord,
}

impl Scenario {
    pub fn planner(&self) -> Result<Planner> {
        Ok(Planner::new(self.terrain.clone(), self.goals.clone(), self.base)?)
    }
}

pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let file = File::open(path).with_context(|| format!("open scenario {}", path.display()))?;
    let raw: ScenarioFile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse scenario JSON {}", path.display()))?;
    build(raw).with_context(|| format!("invalid scenario {}", path.display()))
}

pub fn parse_scenario(json: &str) -> Result<Scenario> {
    let raw: ScenarioFile = serde_json::from_str(json).context("parse scenario JSON")?;
    build(raw)
}

fn build(raw: ScenarioFile) -> Result<Scenario> {
    let nz = raw.layers.len();
    if nz == 0 {
        bail!("scenario has no layers");
    }
    let nx = raw.layers[0].len();
    let ny = raw.layers[0].first().map(|r| row_symbols(r).count()).unwrap_or(0);

    // grid[x][y][z], filled layer by layer
    let mut grid = vec![vec![vec![TerrainKind::Free; nz]; ny]; nx];
    let mut starts = Vec::new();
    let mut bases = Vec::new();
    let mut marked_goals = Vec::new();

    for (z, layer) in raw.layers.iter().enumerate() {
        if layer.len() != nx {
            bail!("layer {} has {} rows, expected {}", z, layer.len(), nx);
        }
        for (x, row) in layer.iter().enumerate() {
            let symbols: Vec<char> = row_symbols(row).collect();
            if symbols.len() != ny {
                bail!("layer {} row {} has {} cells, expected {}", z, x, symbols.len(), ny);
            }
            for (y, c) in symbols.into_iter().enumerate() {
                let kind = TerrainKind::from_symbol(c)
                    .with_context(|| format!("unknown cell symbol {:?} at layer {} row {} col {}", c, z, x, y))?;
                let here = Coord::new(x as i32, y as i32, z as i32);
                match kind {
                    TerrainKind::Start => starts.push(here),
                    TerrainKind::Base => bases.push(here),
                    TerrainKind::Goal => marked_goals.push(here),
                    _ => {}
                }
                grid[x][y][z] = kind;
            }
        }
    }

    let dims = Dims::new(nx, ny, nz);
    let terrain = Terrain::from_fn(dims, |c| grid[c.x as usize][c.y as usize][c.z as usize])?;

    let start = match raw.start {
        Some(s) => Coord::from(s),
        None => single_marker("start", 'S', &starts)?,
    };
    let base = match raw.base {
        Some(b) => Coord::from(b),
        None => single_marker("base", 'B', &bases)?,
    };
    let goals = match raw.goals {
        Some(gs) => gs.into_iter().map(Coord::from).collect(),
        None => marked_goals,
    };

    Ok(Scenario { terrain, goals, base, start })
}

fn row_symbols(row: &str) -> impl Iterator<Item = char> + '_ {
    row.chars().filter(|c| !c.is_whitespace())
}

fn single_marker(what: &str, symbol: char, found: &[Coord]) -> Result<Coord> {
    match found {
        [one] => Ok(*one),
        [] => bail!("grid has no {} cell ('{}') and no explicit {}", what, symbol, what),
        many => bail!("grid has {} {} cells ('{}'); give an explicit {}", many.len(), what, symbol, what),
    }
}
