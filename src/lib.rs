//! Conway's Game of Life on a fixed, non-wrapping square grid, with a
//! sequential engine, a rayon engine that parallelises each generation over
//! rows, and a barrier engine that keeps a fixed set of workers alive for the
//! whole run.

pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod implementations;
pub mod report;
pub mod rules;

pub use config::LifeConfig;
pub use error::{LifeError, LifeResult};
pub use game::{GameOfLife, Strategy};
pub use grid::{Grid, GridPair};
pub use report::{ConsoleSink, FnSink, GenerationSink, NullSink};
