use tracing::debug;

/// Receives the alive-cell count of every completed generation, in order.
pub trait GenerationSink {
    fn report(&mut self, alive: usize);
}

impl GenerationSink for Vec<usize> {
    fn report(&mut self, alive: usize) {
        self.push(alive);
    }
}

impl<S: GenerationSink + ?Sized> GenerationSink for &mut S {
    fn report(&mut self, alive: usize) {
        (**self).report(alive);
    }
}

#[derive(Debug, Default)]
pub struct ConsoleSink {
    generation: usize,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GenerationSink for ConsoleSink {
    fn report(&mut self, alive: usize) {
        self.generation += 1;
        debug!(generation = self.generation, alive, "generation complete");
        println!("{alive}");
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl GenerationSink for NullSink {
    fn report(&mut self, _alive: usize) {}
}

pub struct FnSink<F>(pub F);

impl<F: FnMut(usize)> GenerationSink for FnSink<F> {
    fn report(&mut self, alive: usize) {
        (self.0)(alive);
    }
}
