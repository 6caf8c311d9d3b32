use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::debug;

use crate::grid::GridPair;
use crate::report::GenerationSink;
use crate::rules::evolve_row;

/*
  Rayon-based parallel implementation

  1. Rows of the next buffer are handed out with par_chunks_mut, so every
     task owns a disjoint &mut [bool] and no locking is needed
  2. The current buffer is only read during a generation
  3. Alive cells are summed into a shared AtomicUsize
  4. for_each returning is the fan-in; the swap happens after it and before
     the next generation's fan-out
*/
pub fn rayon_parallel<S: GenerationSink + ?Sized>(pair: &mut GridPair, steps: usize, sink: &mut S) {
    let size = pair.size();
    let alive = AtomicUsize::new(0);

    for step in 0..steps {
        alive.store(0, Ordering::Relaxed);
        {
            let (src, dst) = pair.split();
            dst.data
                .par_chunks_mut(size) // 行ごとにスライスを分割
                .enumerate()
                .for_each(|(i, dst_row)| {
                    let row_alive = evolve_row(src, i, dst_row);
                    alive.fetch_add(row_alive, Ordering::Relaxed);
                });
        }

        pair.swap();
        let count = alive.load(Ordering::Relaxed);
        debug!(generation = step + 1, alive = count, "rayon generation");
        sink.report(count);
    }
}
