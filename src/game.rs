use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::{default_threads, LifeConfig};
use crate::error::{LifeError, LifeResult};
use crate::grid::{Grid, GridPair, ALIVE_THRESHOLD};
use crate::implementations::safe::barrier::barrier_parallel::barrier_parallel;
use crate::implementations::safe::rayon::rayon_parallel;
use crate::implementations::safe::single::life_step;
use crate::report::GenerationSink;

/// How generations are computed. All strategies produce the same sequence
/// of grids for the same starting grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Serial,
    Parallel,
    Barrier,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Serial, Strategy::Parallel, Strategy::Barrier];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Serial => "serial",
            Strategy::Parallel => "parallel",
            Strategy::Barrier => "barrier",
        })
    }
}

impl FromStr for Strategy {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "serial" | "single" => Ok(Strategy::Serial),
            "parallel" | "rayon" => Ok(Strategy::Parallel),
            "barrier" => Ok(Strategy::Barrier),
            other => Err(LifeError::invalid(format!(
                "unknown strategy {other:?} (expected serial, parallel or barrier)"
            ))),
        }
    }
}

/// A Game of Life simulation that owns both grid buffers.
///
/// Each `run_*` method advances the grid by `iterations` generations and
/// reports one alive-cell count per generation to `sink`.
#[derive(Clone, Debug)]
pub struct GameOfLife {
    pair: GridPair,
    workers: usize,
}

impl GameOfLife {
    pub fn new(grid_size: usize) -> LifeResult<Self> {
        let pair = GridPair::initialize(grid_size, ALIVE_THRESHOLD, &mut rand::rng())?;
        Ok(GameOfLife {
            pair,
            workers: default_threads(),
        })
    }

    pub fn from_config(config: &LifeConfig) -> LifeResult<Self> {
        config.validate()?;
        let pair = match config.seed {
            Some(seed) => GridPair::initialize(config.grid_size, config.alive_percent, &mut StdRng::seed_from_u64(seed))?,
            None => GridPair::initialize(config.grid_size, config.alive_percent, &mut rand::rng())?,
        };
        Ok(GameOfLife {
            pair,
            workers: config.threads,
        })
    }

    pub fn from_grid(grid: Grid) -> Self {
        GameOfLife {
            pair: GridPair::from_grid(grid),
            workers: default_threads(),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn size(&self) -> usize {
        self.pair.size()
    }

    pub fn grid(&self) -> &Grid {
        self.pair.current()
    }

    pub fn alive_count(&self) -> usize {
        self.pair.current().alive_count()
    }

    pub fn into_grid(self) -> Grid {
        self.pair.into_current()
    }

    pub fn run_serial<S: GenerationSink + ?Sized>(&mut self, iterations: usize, sink: &mut S) {
        let start = Instant::now();
        info!(strategy = %Strategy::Serial, size = self.size(), iterations, "run started");
        life_step(&mut self.pair, iterations, sink);
        info!(strategy = %Strategy::Serial, elapsed = ?start.elapsed(), "run finished");
    }

    pub fn run_parallel<S: GenerationSink + ?Sized>(&mut self, iterations: usize, sink: &mut S) {
        let start = Instant::now();
        info!(strategy = %Strategy::Parallel, size = self.size(), iterations, "run started");
        rayon_parallel(&mut self.pair, iterations, sink);
        info!(strategy = %Strategy::Parallel, elapsed = ?start.elapsed(), "run finished");
    }

    pub fn run_barrier<S: GenerationSink + Send + ?Sized>(&mut self, iterations: usize, sink: &mut S) -> LifeResult<()> {
        let start = Instant::now();
        info!(
            strategy = %Strategy::Barrier,
            size = self.size(),
            iterations,
            workers = self.workers,
            "run started"
        );
        barrier_parallel(&mut self.pair, iterations, self.workers, sink)?;
        info!(strategy = %Strategy::Barrier, elapsed = ?start.elapsed(), "run finished");
        Ok(())
    }

    pub fn run<S: GenerationSink + Send + ?Sized>(
        &mut self,
        strategy: Strategy,
        iterations: usize,
        sink: &mut S,
    ) -> LifeResult<()> {
        match strategy {
            Strategy::Serial => self.run_serial(iterations, sink),
            Strategy::Parallel => self.run_parallel(iterations, sink),
            Strategy::Barrier => self.run_barrier(iterations, sink)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty_grid() {
        assert!(matches!(GameOfLife::new(0), Err(LifeError::InvalidConfiguration(_))));
    }

    #[test]
    fn strategy_names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
        }
        assert_eq!("rayon".parse::<Strategy>().unwrap(), Strategy::Parallel);
        assert!("toroidal".parse::<Strategy>().is_err());
    }

    #[test]
    fn seeded_config_is_reproducible() {
        let config = LifeConfig {
            grid_size: 24,
            seed: Some(3),
            threads: 2,
            ..LifeConfig::default()
        };
        let a = GameOfLife::from_config(&config).unwrap();
        let b = GameOfLife::from_config(&config).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.workers(), 2);
    }
}
