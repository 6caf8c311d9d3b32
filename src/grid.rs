use std::fmt;

use rand::Rng;

use crate::error::{LifeError, LifeResult};

pub const GRID_SIZE: usize = 512; // 一辺のセル数
pub const TIME_STEPS: usize = 100; // 世代数
pub const WARMUP_STEPS: usize = 5; // ウォームアップ世代数
pub const ALIVE_THRESHOLD: u32 = 25; // 初期状態で生きているセルの割合 (%)

/// Read access to a square board of cells.
///
/// The neighbor counter and the transition rule are written against this
/// trait so every engine evaluates cells through the same code path.
pub trait CellSource {
    fn size(&self) -> usize;
    fn is_alive(&self, row: usize, col: usize) -> bool;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    pub data: Vec<bool>,
}

impl Grid {
    pub fn new(size: usize) -> LifeResult<Self> {
        if size == 0 {
            return Err(LifeError::invalid("grid size must be positive"));
        }
        let cells = size
            .checked_mul(size)
            .ok_or_else(|| LifeError::invalid(format!("grid size {size} is too large")))?;
        Ok(Grid {
            size,
            data: vec![false; cells],
        })
    }

    /// Each cell is alive with probability `alive_percent / 100`, drawn
    /// independently from `rng`.
    pub fn random<R: Rng>(size: usize, alive_percent: u32, rng: &mut R) -> LifeResult<Self> {
        if alive_percent > 100 {
            return Err(LifeError::invalid(format!(
                "alive percentage must be within 0..=100, got {alive_percent}"
            )));
        }
        let mut grid = Grid::new(size)?;
        for cell in grid.data.iter_mut() {
            *cell = rng.random_range(0..100) < alive_percent;
        }
        Ok(grid)
    }

    pub fn from_cells(size: usize, cells: &[(usize, usize)]) -> LifeResult<Self> {
        let mut grid = Grid::new(size)?;
        for &(row, col) in cells {
            if row >= size || col >= size {
                return Err(LifeError::invalid(format!(
                    "cell ({row}, {col}) lies outside a {size}x{size} grid"
                )));
            }
            grid.set(row, col, true);
        }
        Ok(grid)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.data[self.index(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        let idx = self.index(row, col);
        self.data[idx] = alive;
    }

    pub fn row(&self, row: usize) -> &[bool] {
        &self.data[row * self.size..(row + 1) * self.size]
    }

    pub fn alive_count(&self) -> usize {
        self.data.iter().filter(|&&alive| alive).count()
    }

    pub fn alive_cells(&self) -> Vec<(usize, usize)> {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(|(idx, _)| (idx / self.size, idx % self.size))
            .collect()
    }

    // 盤面を表示
    pub fn print(&self) {
        print!("{self}");
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(
            row < self.size && col < self.size,
            "cell ({row}, {col}) outside {0}x{0} grid",
            self.size
        );
        row * self.size + col
    }
}

impl CellSource for Grid {
    #[inline]
    fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for &alive in self.row(row) {
                f.write_str(if alive { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The `current` / `next` buffers of one simulation.
///
/// `next` is scratch space: every engine overwrites all of it before calling
/// [`GridPair::swap`], so nothing stale is ever promoted to `current`.
#[derive(Clone, Debug)]
pub struct GridPair {
    current: Grid,
    next: Grid,
}

impl GridPair {
    /// Both buffers start all-dead, then `current` is seeded from `rng`.
    pub fn initialize<R: Rng>(size: usize, alive_percent: u32, rng: &mut R) -> LifeResult<Self> {
        let next = Grid::new(size)?;
        let current = Grid::random(size, alive_percent, rng)?;
        Ok(GridPair { current, next })
    }

    pub fn from_grid(grid: Grid) -> Self {
        let next = Grid {
            size: grid.size,
            data: vec![false; grid.data.len()],
        };
        GridPair {
            current: grid,
            next,
        }
    }

    pub fn size(&self) -> usize {
        self.current.size
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub(crate) fn current_mut(&mut self) -> &mut Grid {
        &mut self.current
    }

    pub fn split(&mut self) -> (&Grid, &mut Grid) {
        (&self.current, &mut self.next)
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    pub fn into_current(self) -> Grid {
        self.current
    }
}
