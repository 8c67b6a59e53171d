//! Sampling hyperparameters.
//!
//! [`Hyperparams`] carries the options that shape one sampling round.

/// Configuration for neighborhood sampling.
///
/// The per-site mutation probability `p` is not part of this record; it is
/// passed alongside to [`sample_new_instances`](crate::sampling::sample_new_instances).
///
/// # Defaults
///
/// ```
/// use u_exprsearch::model::Hyperparams;
///
/// let config = Hyperparams::default();
/// assert_eq!(config.neighborhood_size, 20);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_exprsearch::model::Hyperparams;
///
/// let config = Hyperparams::default().with_neighborhood_size(50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hyperparams {
    /// Number of mutation trials per sampling round.
    ///
    /// Upper bound on the number of distinct neighbors produced.
    pub neighborhood_size: usize,
}

impl Default for Hyperparams {
    fn default() -> Self {
        Self {
            neighborhood_size: 20,
        }
    }
}

impl Hyperparams {
    /// Sets the number of mutation trials per round.
    pub fn with_neighborhood_size(mut self, n: usize) -> Self {
        self.neighborhood_size = n;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.neighborhood_size == 0 {
            return Err("neighborhood_size must be at least 1".into());
        }
        Ok(())
    }
}
