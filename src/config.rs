use std::str::FromStr;

use crate::generate::Algorithm;

const DEFAULT_ROWS: usize = 10;
const DEFAULT_COLS: usize = 10;
const DEFAULT_CELL_SIZE: usize = 10;

/// Settings for carving and drawing a maze.
///
/// Values come from `MAZES_*` environment variables; anything missing,
/// unparsable or zero falls back to the default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub cell_size: usize,
    pub algorithm: Algorithm,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            cell_size: DEFAULT_CELL_SIZE,
            algorithm: Algorithm::default(),
            seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let positive = |key: &str, default: usize| {
            parse::<usize>(&lookup, key)
                .filter(|v| *v > 0)
                .unwrap_or(default)
        };
        Config {
            rows: positive("MAZES_ROWS", DEFAULT_ROWS),
            cols: positive("MAZES_COLS", DEFAULT_COLS),
            cell_size: positive("MAZES_CELL_SIZE", DEFAULT_CELL_SIZE),
            algorithm: parse(&lookup, "MAZES_ALGORITHM").unwrap_or_default(),
            seed: parse(&lookup, "MAZES_SEED"),
        }
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse::<T>().ok())
}
