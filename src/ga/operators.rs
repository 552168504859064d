//! Configurable genetic operators for timetabling.
//!
//! Provides a runtime-selectable mutation strategy via
//! [`GeneticOperators`]. Crossover is always single-point at classroom
//! granularity.
//!
//! # Usage
//!
//! ```
//! use u_timetable::ga::{GaConfig, GeneticOperators, MutationType};
//!
//! let ops = GeneticOperators::from_config(&GaConfig::default());
//! assert_eq!(ops.mutation_type, MutationType::Consolidate);
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::chromosome::{
    Timetable, consolidation_mutation, single_point_crossover, slot_swap_mutation,
};
use super::{GaConfig, TimetableProblem};

/// Mutation strategy for timetable genomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MutationType {
    /// Move a meeting from a sparser used room into a denser one,
    /// pushing the population toward fewer classrooms.
    #[default]
    Consolidate,
    /// Exchange two meetings of one pattern inside a random room.
    SlotSwap,
}

/// Runtime-selectable genetic operators for the timetabling GA.
///
/// # Example
///
/// ```
/// use u_timetable::ga::{GeneticOperators, MutationType};
///
/// let ops = GeneticOperators {
///     crossover_rate: 1.0,
///     mutation_rate: 0.5,
///     mutation_type: MutationType::SlotSwap,
/// };
/// ```
#[derive(Debug, Clone)]
pub struct GeneticOperators {
    /// Probability of recombining instead of copying the first parent.
    pub crossover_rate: f64,
    /// Probability of mutating an offspring.
    pub mutation_rate: f64,
    /// Mutation strategy.
    pub mutation_type: MutationType,
}

impl Default for GeneticOperators {
    fn default() -> Self {
        Self::from_config(&GaConfig::default())
    }
}

impl GeneticOperators {
    /// Takes rates and strategy from a configuration.
    pub fn from_config(config: &GaConfig) -> Self {
        Self {
            crossover_rate: config.crossover_rate,
            mutation_rate: config.mutation_rate,
            mutation_type: config.mutation_type,
        }
    }

    /// Produces one unevaluated child from two parents.
    pub fn crossover<R: Rng>(&self, p1: &Timetable, p2: &Timetable, rng: &mut R) -> Timetable {
        single_point_crossover(p1, p2, self.crossover_rate, rng)
    }

    /// Mutates the child with probability `mutation_rate`.
    ///
    /// Returns whether the genome changed; its fitness memo is cleared
    /// when it did.
    pub fn mutate<R: Rng>(
        &self,
        child: &mut Timetable,
        problem: &TimetableProblem,
        rng: &mut R,
    ) -> bool {
        if rng.random::<f64>() >= self.mutation_rate {
            return false;
        }
        match self.mutation_type {
            MutationType::Consolidate => consolidation_mutation(child, problem, rng),
            MutationType::SlotSwap => slot_swap_mutation(child, &problem.layout, rng),
        }
    }
}
