//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use serde::{Deserialize, Serialize};

use super::operators::MutationType;
use crate::error::{Result, TimetableError};

/// Configuration for the timetabling GA.
///
/// # Defaults
///
/// ```
/// use u_timetable::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 20);
/// assert_eq!(config.tournament_size, 3);
/// assert_eq!(config.convergence_window, 5);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::ga::{GaConfig, MutationType};
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_mutation_type(MutationType::SlotSwap)
///     .with_mutation_rate(0.3)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of individuals kept after every generation.
    pub population_size: usize,

    /// Probability that a parent pair is recombined (0.0–1.0).
    ///
    /// With probability `1 - crossover_rate` the child is a plain copy of
    /// the first parent.
    pub crossover_rate: f64,

    /// Probability that an offspring is mutated (0.0–1.0).
    pub mutation_rate: f64,

    /// Mutation strategy applied to offspring.
    pub mutation_type: MutationType,

    /// Number of individuals drawn per tournament.
    pub tournament_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Number of consecutive generations whose mean fitness must be
    /// identical to declare convergence.
    ///
    /// Set to 0 to disable convergence-based termination.
    pub convergence_window: usize,

    /// Random (room, meeting) tries per course when building a genome.
    pub placement_attempts: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            crossover_rate: 0.8,
            mutation_rate: 0.2,
            mutation_type: MutationType::default(),
            tournament_size: 3,
            max_generations: 1000,
            convergence_window: 5,
            placement_attempts: 10,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation strategy.
    pub fn with_mutation_type(mut self, mutation_type: MutationType) -> Self {
        self.mutation_type = mutation_type;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the convergence window (0 to disable).
    pub fn with_convergence_window(mut self, window: usize) -> Self {
        self.convergence_window = window;
        self
    }

    /// Sets the placement attempts per course.
    pub fn with_placement_attempts(mut self, attempts: usize) -> Self {
        self.placement_attempts = attempts;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(TimetableError::InvalidConfig(msg.into()));
        if self.population_size == 0 {
            return invalid("population_size must be at least 1");
        }
        if self.tournament_size == 0 {
            return invalid("tournament_size must be at least 1");
        }
        if self.max_generations == 0 {
            return invalid("max_generations must be at least 1");
        }
        if self.convergence_window == 1 {
            return invalid("convergence_window must be 0 (disabled) or at least 2");
        }
        if self.placement_attempts == 0 {
            return invalid("placement_attempts must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) || !(0.0..=1.0).contains(&self.mutation_rate)
        {
            return invalid("rates must lie in [0, 1]");
        }
        Ok(())
    }
}
