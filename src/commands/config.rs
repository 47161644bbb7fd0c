use std::time::{Duration, Instant};
use std::{env, path::PathBuf};

use crate::engine::SearchLimits;

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub grid: Option<PathBuf>,
    pub max_expansions: Option<usize>,
    pub deadline_ms: Option<u64>,
    pub threads: Option<usize>,
    pub json: bool,
    pub log_level: Option<String>,
}

impl Config {
    pub fn from_env_defaults() -> Self {
        let grid = env::var("RESCUE_GRID").ok().map(PathBuf::from);
        let max_expansions = env::var("RESCUE_MAX_EXPANSIONS").ok().and_then(|s| s.trim().parse::<usize>().ok());
        let deadline_ms = env::var("RESCUE_DEADLINE_MS").ok().and_then(|s| s.trim().parse::<u64>().ok());
        let threads = env::var("RESCUE_THREADS").ok().and_then(|s| s.trim().parse::<usize>().ok());
        let json = env::var("RESCUE_JSON").ok().map(|v| parse_flag(&v)).unwrap_or(false);
        let log_level = env::var("RESCUE_LOG_LEVEL").ok();
        Self { grid, max_expansions, deadline_ms, threads, json, log_level }
    }

    /// Overlay `other` on top of `self`; set values in `other` win.
    pub fn overlay(&mut self, other: Config) {
        if other.grid.is_some() { self.grid = other.grid; }
        if other.max_expansions.is_some() { self.max_expansions = other.max_expansions; }
        if other.deadline_ms.is_some() { self.deadline_ms = other.deadline_ms; }
        if other.threads.is_some() { self.threads = other.threads; }
        if other.json { self.json = true; }
        if other.log_level.is_some() { self.log_level = other.log_level; }
    }

    /// Search limits for a call starting now.
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_expansions: self.max_expansions,
            deadline: self.deadline_ms.map(|ms| Instant::now() + Duration::from_millis(ms)),
        }
    }
}

fn parse_flag(v: &str) -> bool {
    let t = v.trim();
    t == "1" || t.eq_ignore_ascii_case("true") || t.eq_ignore_ascii_case("yes")
}
