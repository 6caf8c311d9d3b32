use parking_lot::{Condvar, Mutex};

use crate::error::{LifeError, LifeResult};

struct BarrierState<F> {
    arrived: usize,
    generation: u64,
    broken: bool,
    action: F,
}

/// Reusable rendezvous for a fixed number of threads.
///
/// When the last party arrives it runs `action` while still holding the
/// lock, and only then releases everyone into the next phase. The action
/// therefore runs exactly once per phase and never overlaps with any party's
/// work on either side of the barrier.
pub struct CyclicBarrier<F> {
    parties: usize,
    state: Mutex<BarrierState<F>>,
    released: Condvar,
}

impl<F: FnMut()> CyclicBarrier<F> {
    pub fn new(parties: usize, action: F) -> LifeResult<Self> {
        if parties == 0 {
            return Err(LifeError::invalid("barrier needs at least one party"));
        }
        Ok(CyclicBarrier {
            parties,
            state: Mutex::new(BarrierState {
                arrived: 0,
                generation: 0,
                broken: false,
                action,
            }),
            released: Condvar::new(),
        })
    }

    /// Blocks until all parties have arrived. Returns `Ok(true)` on the thread
    /// that ran the completion action.
    pub fn wait(&self) -> LifeResult<bool> {
        let mut state = self.state.lock();
        if state.broken {
            return Err(LifeError::BarrierBroken);
        }

        state.arrived += 1;
        if state.arrived == self.parties {
            (state.action)();
            state.arrived = 0;
            state.generation = state.generation.wrapping_add(1);
            self.released.notify_all();
            return Ok(true);
        }

        let generation = state.generation;
        while state.generation == generation && !state.broken {
            self.released.wait(&mut state);
        }
        if state.generation == generation {
            return Err(LifeError::BarrierBroken);
        }
        Ok(false)
    }

    /// Wakes every waiter with an error; later calls to `wait` fail at once.
    pub fn break_barrier(&self) {
        let mut state = self.state.lock();
        state.broken = true;
        self.released.notify_all();
    }

    pub fn parties(&self) -> usize {
        self.parties
    }

    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }
}

/// Breaks the barrier if the owning thread unwinds, so the remaining parties
/// do not wait forever for it.
pub struct BreakOnPanic<'a, F: FnMut()>(pub &'a CyclicBarrier<F>);

impl<F: FnMut()> Drop for BreakOnPanic<'_, F> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.break_barrier();
        }
    }
}
