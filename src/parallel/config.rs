//! Worker pool configuration.
//!
//! Configuration is read from environment variables with explicit error
//! handling. Unset variables fall back to defaults; set but invalid values
//! are reported as [`ConfigError::InvalidValue`].
//!
//! # Environment Variables
//!
//! - `LAZYSEQ_WORKERS`: number of worker threads, a positive integer
//!   (default: number of logical CPUs)
//! - `LAZYSEQ_THREAD_PREFIX`: worker thread name prefix, non-empty
//!   (default: `"lazyseq-worker"`)

use std::env;

/// Environment variable holding the worker count.
pub const WORKERS_KEY: &str = "LAZYSEQ_WORKERS";

/// Environment variable holding the worker thread name prefix.
pub const THREAD_PREFIX_KEY: &str = "LAZYSEQ_THREAD_PREFIX";

const DEFAULT_THREAD_PREFIX: &str = "lazyseq-worker";

/// Configuration error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but its value cannot be used.
    InvalidValue {
        /// The name of the environment variable.
        key: String,
        /// Description of why the value is invalid.
        message: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, message } => {
                write!(formatter, "Invalid value for {key}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings for a [`WorkerPool`](super::WorkerPool).
///
/// # Examples
///
/// ```rust
/// use lazyseq::parallel::ParallelConfig;
///
/// let config = ParallelConfig::default()
///     .with_workers(4)
///     .with_thread_name_prefix("pipeline");
/// assert_eq!(config.workers, 4);
/// assert_eq!(config.thread_name_prefix, "pipeline");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Number of worker threads.
    pub workers: usize,
    /// Prefix of worker thread names; the worker index is appended.
    pub thread_name_prefix: String,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            thread_name_prefix: DEFAULT_THREAD_PREFIX.to_string(),
        }
    }
}

impl ParallelConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set to an
    /// unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value if set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set to an
    /// unusable value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::parallel::ParallelConfig;
    ///
    /// let config = ParallelConfig::from_lookup(|key| match key {
    ///     "LAZYSEQ_WORKERS" => Some("3".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.workers, 3);
    /// assert_eq!(config.thread_name_prefix, "lazyseq-worker");
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let workers = lookup(WORKERS_KEY)
            .map(|value| parse_workers(&value))
            .transpose()?
            .unwrap_or(defaults.workers);

        let thread_name_prefix = lookup(THREAD_PREFIX_KEY)
            .map(parse_prefix)
            .transpose()?
            .unwrap_or(defaults.thread_name_prefix);

        Ok(Self {
            workers,
            thread_name_prefix,
        })
    }

    /// Returns the configuration with `workers` worker threads.
    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Returns the configuration with the given thread name prefix.
    #[must_use]
    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }
}

fn parse_workers(value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            key: WORKERS_KEY.to_string(),
            message: "worker count must be greater than 0".to_string(),
        }),
        Ok(workers) => Ok(workers),
        Err(error) => Err(ConfigError::InvalidValue {
            key: WORKERS_KEY.to_string(),
            message: error.to_string(),
        }),
    }
}

fn parse_prefix(value: String) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::InvalidValue {
            key: THREAD_PREFIX_KEY.to_string(),
            message: "thread name prefix must not be empty".to_string(),
        })
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key: &str| {
            pairs
                .iter()
                .find(|(candidate, _)| candidate == key)
                .map(|(_, value)| value.clone())
        }
    }

    #[rstest]
    fn test_unset_variables_use_defaults() {
        let config = ParallelConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ParallelConfig::default());
    }

    #[rstest]
    fn test_both_variables_are_read() {
        let config = ParallelConfig::from_lookup(lookup_from(&[
            (WORKERS_KEY, " 8 "),
            (THREAD_PREFIX_KEY, "sieve"),
        ]))
        .unwrap();
        assert_eq!(config.workers, 8);
        assert_eq!(config.thread_name_prefix, "sieve");
    }

    #[rstest]
    #[case("0")]
    #[case("-2")]
    #[case("many")]
    fn test_invalid_worker_count(#[case] value: &str) {
        let result = ParallelConfig::from_lookup(lookup_from(&[(WORKERS_KEY, value)]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref key, .. }) if key == WORKERS_KEY
        ));
    }

    #[rstest]
    fn test_blank_prefix_is_rejected() {
        let result = ParallelConfig::from_lookup(lookup_from(&[(THREAD_PREFIX_KEY, "  ")]));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Invalid value for LAZYSEQ_THREAD_PREFIX: thread name prefix must not be empty"
        );
    }

    #[rstest]
    fn test_default_has_at_least_one_worker() {
        assert!(ParallelConfig::default().workers >= 1);
    }
}
