use std::str::FromStr;
use std::thread;

use tracing_subscriber::EnvFilter;

use crate::error::{LifeError, LifeResult};
use crate::grid::{ALIVE_THRESHOLD, GRID_SIZE, TIME_STEPS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifeConfig {
    pub grid_size: usize,
    pub alive_percent: u32,
    pub iterations: usize,
    pub threads: usize,
    /// Fixed RNG seed; `None` draws the initial grid from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        LifeConfig {
            grid_size: GRID_SIZE,
            alive_percent: ALIVE_THRESHOLD,
            iterations: TIME_STEPS,
            threads: default_threads(),
            seed: None,
        }
    }
}

pub fn default_threads() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

impl LifeConfig {
    /// Positional arguments: `[threads] [grid_size] [iterations] [seed]`.
    /// Missing trailing values keep their defaults.
    pub fn from_args<I, A>(args: I) -> LifeResult<Self>
    where
        I: IntoIterator<Item = A>,
        A: AsRef<str>,
    {
        let args: Vec<A> = args.into_iter().collect();
        if args.len() > 4 {
            return Err(LifeError::invalid(format!(
                "expected at most 4 arguments ([threads] [grid_size] [iterations] [seed]), got {}",
                args.len()
            )));
        }

        let mut config = LifeConfig::default();
        let mut values = args.iter().map(AsRef::<str>::as_ref);
        if let Some(value) = values.next() {
            config.threads = parse_value(value, "threads")?;
        }
        if let Some(value) = values.next() {
            config.grid_size = parse_value(value, "grid_size")?;
        }
        if let Some(value) = values.next() {
            config.iterations = parse_value(value, "iterations")?;
        }
        if let Some(value) = values.next() {
            config.seed = Some(parse_value(value, "seed")?);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LifeResult<()> {
        if self.grid_size == 0 {
            return Err(LifeError::invalid("grid_size must be positive"));
        }
        if self.threads == 0 {
            return Err(LifeError::invalid("threads must be positive"));
        }
        if self.alive_percent > 100 {
            return Err(LifeError::invalid(format!(
                "alive_percent must be within 0..=100, got {}",
                self.alive_percent
            )));
        }
        Ok(())
    }
}

/// Installs the fmt subscriber for the binaries. `RUST_LOG` overrides the
/// default `warn` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // テストなどで既に登録済みなら何もしない
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

fn parse_value<T: FromStr>(value: &str, name: &str) -> LifeResult<T> {
    value
        .parse()
        .map_err(|_| LifeError::invalid(format!("{name} must be a non-negative integer, got {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_args_use_defaults() {
        let config = LifeConfig::from_args(Vec::<String>::new()).unwrap();
        assert_eq!(config, LifeConfig::default());
        assert_eq!(config.grid_size, GRID_SIZE);
        assert!(config.threads >= 1);
    }

    #[test]
    fn positional_values_override_defaults() {
        let config = LifeConfig::from_args(["4", "64", "10", "99"]).unwrap();
        assert_eq!(config.threads, 4);
        assert_eq!(config.grid_size, 64);
        assert_eq!(config.iterations, 10);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn invalid_values_are_configuration_errors() {
        for args in [vec!["0"], vec!["2", "0"], vec!["x"], vec!["2", "8", "-1"], vec!["1", "2", "3", "4", "5"]] {
            assert!(
                matches!(LifeConfig::from_args(args.clone()), Err(LifeError::InvalidConfiguration(_))),
                "{args:?}"
            );
        }
    }

    #[test]
    fn zero_iterations_is_allowed() {
        let config = LifeConfig::from_args(["1", "8", "0"]).unwrap();
        assert_eq!(config.iterations, 0);
    }
}
