use thiserror::Error;

/// Errors raised while configuring or running a simulation.
///
/// Neighbor lookups outside the grid are not represented here: they can only
/// come from a broken boundary classification and are treated as assertions.
#[derive(Error, Debug)]
pub enum LifeError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Barrier worker {0} panicked")]
    WorkerPanicked(usize),
    #[error("Barrier was broken by a failed participant")]
    BarrierBroken,
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type LifeResult<T> = Result<T, LifeError>;

impl LifeError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        LifeError::InvalidConfiguration(msg.into())
    }
}
