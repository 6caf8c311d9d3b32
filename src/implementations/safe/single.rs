use tracing::debug;

use crate::grid::GridPair;
use crate::report::GenerationSink;
use crate::rules::evolve_cell;

pub fn life_step<S: GenerationSink + ?Sized>(pair: &mut GridPair, steps: usize, sink: &mut S) {
    let size = pair.size();

    for step in 0..steps {
        let mut alive = 0;
        {
            let (src, dst) = pair.split();
            for i in 0..size {
                for j in 0..size {
                    let cell = evolve_cell(src, i, j);
                    dst.set(i, j, cell);
                    alive += usize::from(cell);
                }
            }
        }

        pair.swap();
        debug!(generation = step + 1, alive, "serial generation");
        sink.report(alive);
    }
}
