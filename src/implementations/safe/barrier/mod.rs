pub mod barrier_parallel;
pub mod cyclic;
