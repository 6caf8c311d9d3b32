use std::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use tracing::{debug, warn};

use super::cyclic::{BreakOnPanic, CyclicBarrier};
use crate::error::{LifeError, LifeResult};
use crate::grid::{CellSource, Grid, GridPair};
use crate::report::GenerationSink;
use crate::rules::evolve_cell;

/*
  バリア同期版

  1. ワーカーは実行全体で一度だけ起動し、担当行は最初に固定で割り当てる
  2. 各ワーカーは自分の行だけを next に書き込む（他スレッドと重ならない）
  3. 世代の終わりに全員が CyclicBarrier に到着し、最後に到着したスレッドが
     バッファの入れ替えと生存セル数の報告を一度だけ行う
  4. 全ワーカーの join を待ってから最終盤面を GridPair に書き戻す
*/

/// Cell buffer that scoped workers can write through a shared reference.
///
/// Workers only ever store into their own rows, and every cross-thread
/// handoff goes through the barrier's mutex, so relaxed accesses suffice.
struct AtomicGrid {
    size: usize,
    cells: Vec<AtomicBool>,
}

impl AtomicGrid {
    fn from_grid(grid: &Grid) -> Self {
        AtomicGrid {
            size: grid.size(),
            cells: grid.data.iter().map(|&alive| AtomicBool::new(alive)).collect(),
        }
    }

    #[inline]
    fn store(&self, row: usize, col: usize, alive: bool) {
        self.cells[row * self.size + col].store(alive, Ordering::Relaxed);
    }

    fn copy_into(&self, grid: &mut Grid) {
        for (dst, src) in grid.data.iter_mut().zip(&self.cells) {
            *dst = src.load(Ordering::Relaxed);
        }
    }
}

impl CellSource for AtomicGrid {
    #[inline]
    fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn is_alive(&self, row: usize, col: usize) -> bool {
        debug_assert!(row < self.size && col < self.size);
        self.cells[row * self.size + col].load(Ordering::Relaxed)
    }
}

/// Two atomic buffers plus the index of the one holding the current
/// generation. Swapping flips the index.
struct SharedGridPair {
    buffers: [AtomicGrid; 2],
    current: AtomicUsize,
}

impl SharedGridPair {
    fn new(current: &Grid) -> Self {
        SharedGridPair {
            buffers: [AtomicGrid::from_grid(current), AtomicGrid::from_grid(current)],
            current: AtomicUsize::new(0),
        }
    }

    fn current(&self) -> &AtomicGrid {
        &self.buffers[self.current.load(Ordering::Relaxed)]
    }

    fn next(&self) -> &AtomicGrid {
        &self.buffers[self.current.load(Ordering::Relaxed) ^ 1]
    }

    fn swap(&self) {
        self.current.fetch_xor(1, Ordering::Relaxed);
    }
}

/// Static row ranges covering `0..size`, one per worker. Every worker gets
/// `size / workers` rows and the last one also takes the remainder.
pub fn partition_rows(size: usize, workers: usize) -> Vec<Range<usize>> {
    assert!(workers > 0 && workers <= size, "cannot split {size} rows across {workers} workers");
    let chunk = size / workers;
    (0..workers)
        .map(|i| {
            let start = i * chunk;
            let end = if i == workers - 1 { size } else { start + chunk };
            start..end
        })
        .collect()
}

pub fn barrier_parallel<S>(pair: &mut GridPair, steps: usize, workers: usize, sink: &mut S) -> LifeResult<()>
where
    S: GenerationSink + Send + ?Sized,
{
    if workers == 0 {
        return Err(LifeError::invalid("barrier engine needs at least one worker"));
    }
    if steps == 0 {
        return Ok(());
    }

    let size = pair.size();
    let workers = if workers > size {
        warn!(requested = workers, rows = size, "more workers than rows, clamping");
        size
    } else {
        workers
    };
    let ranges = partition_rows(size, workers);
    debug!(?ranges, "barrier row partition");

    let shared = SharedGridPair::new(pair.current());
    let alive = AtomicUsize::new(0);
    let mut generation = 0usize;

    // 全員が到着した後、最後のスレッドだけが実行する
    let barrier = CyclicBarrier::new(workers, || {
        shared.swap();
        generation += 1;
        let count = alive.swap(0, Ordering::Relaxed);
        debug!(generation, alive = count, "barrier generation");
        sink.report(count);
    })?;

    let results: Vec<thread::Result<LifeResult<()>>> = thread::scope(|scope| {
        let handles: Vec<_> = ranges
            .into_iter()
            .map(|rows| {
                let (shared, alive, barrier) = (&shared, &alive, &barrier);
                scope.spawn(move || -> LifeResult<()> {
                    let _guard = BreakOnPanic(barrier);
                    for _step in 0..steps {
                        let src = shared.current();
                        let dst = shared.next();
                        let mut local = 0;
                        for i in rows.clone() {
                            for j in 0..size {
                                let cell = evolve_cell(src, i, j);
                                dst.store(i, j, cell);
                                local += usize::from(cell);
                            }
                        }
                        alive.fetch_add(local, Ordering::Relaxed);
                        barrier.wait()?;
                    }
                    Ok(())
                })
            })
            .collect();

        handles.into_iter().map(|handle| handle.join()).collect()
    });

    // パニックしたワーカーがいればそれを優先して報告する
    if let Some(id) = results.iter().position(|result| result.is_err()) {
        return Err(LifeError::WorkerPanicked(id));
    }
    for outcome in results.into_iter().flatten() {
        outcome?;
    }

    shared.current().copy_into(pair.current_mut());
    Ok(())
}
