//! Generational controller.
//!
//! [`TimetableGa`] drives one search as an explicit state machine:
//!
//! ```text
//! Init → EvaluatePopulation → Reproduce → SelectSurvivors ─┐
//!              ↑                                           │
//!              └───────────────────────────────────────────┘
//!        EvaluatePopulation → Terminated (converged or generation cap)
//! ```
//!
//! [`GaRunner::run`] is the one-shot entry for callers that only want the
//! outcome.
//!
//! # Reference
//! Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine
//! Learning", Ch. 1.4: a simple genetic algorithm

use std::mem;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use super::selection::{assign_selection_probs, select_parents, select_survivors};
use super::{GaConfig, GeneticOperators, Timetable, TimetableProblem};
use crate::error::{Result, TimetableError};

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GaPhase {
    /// No population yet.
    Init,
    /// Population awaits scoring and the termination check.
    EvaluatePopulation,
    /// Offspring are about to be produced.
    Reproduce,
    /// Parents and offspring are about to be merged and truncated.
    SelectSurvivors,
    /// Search finished.
    Terminated,
}

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Mean fitness stayed identical over the convergence window.
    Converged,
    /// `max_generations` was reached first.
    GenerationLimit,
}

/// Stateful generational GA over a borrowed problem.
///
/// # Example
/// ```
/// use u_timetable::ga::{GaConfig, GaPhase, TimetableGa, TimetableProblem};
/// use u_timetable::models::TimetableRequest;
///
/// let mut request = TimetableRequest::new();
/// let a = request.add_instructor("A");
/// request.add_course("CS-1", 20, a);
/// request.add_classroom("SIMP-120", 30);
/// let problem = TimetableProblem::new(request).unwrap();
///
/// let mut ga = TimetableGa::new(&problem, GaConfig::default().with_seed(42)).unwrap();
/// ga.run();
/// assert_eq!(ga.phase(), GaPhase::Terminated);
/// assert_eq!(ga.best().and_then(|t| t.fitness()), Some(1.0));
/// ```
pub struct TimetableGa<'a> {
    problem: &'a TimetableProblem,
    config: GaConfig,
    operators: GeneticOperators,
    rng: SmallRng,
    population: Vec<Timetable>,
    offspring: Vec<Timetable>,
    phase: GaPhase,
    generation: usize,
    mean_history: Vec<f64>,
    termination: Option<Termination>,
}

impl<'a> TimetableGa<'a> {
    /// Creates a controller in [`GaPhase::Init`].
    ///
    /// Fails if the configuration does not validate.
    pub fn new(problem: &'a TimetableProblem, config: GaConfig) -> Result<Self> {
        config.validate()?;
        let rng = config
            .seed
            .map_or_else(SmallRng::from_os_rng, SmallRng::seed_from_u64);
        Ok(Self {
            problem,
            operators: GeneticOperators::from_config(&config),
            config,
            rng,
            population: Vec::new(),
            offspring: Vec::new(),
            phase: GaPhase::Init,
            generation: 0,
            mean_history: Vec::new(),
            termination: None,
        })
    }

    /// Executes the current phase and returns the next one.
    pub fn advance(&mut self) -> GaPhase {
        self.phase = match self.phase {
            GaPhase::Init => {
                self.initialize();
                GaPhase::EvaluatePopulation
            }
            GaPhase::EvaluatePopulation => {
                self.evaluate_population();
                match self.check_termination() {
                    Some(reason) => {
                        self.termination = Some(reason);
                        info!(
                            "search stopped at generation {}: {:?}, best fitness {:.4}",
                            self.generation,
                            reason,
                            self.best_fitness().unwrap_or(f64::NEG_INFINITY)
                        );
                        GaPhase::Terminated
                    }
                    None => GaPhase::Reproduce,
                }
            }
            GaPhase::Reproduce => {
                self.reproduce();
                GaPhase::SelectSurvivors
            }
            GaPhase::SelectSurvivors => {
                self.select_survivors();
                self.generation += 1;
                GaPhase::EvaluatePopulation
            }
            GaPhase::Terminated => GaPhase::Terminated,
        };
        self.phase
    }

    /// Runs one generation.
    ///
    /// The first call builds and scores the initial population (generation
    /// 0). Every later call reproduces, selects survivors and scores them.
    /// Returns [`GaPhase::Reproduce`] while the search continues and
    /// [`GaPhase::Terminated`] once it has stopped.
    pub fn step(&mut self) -> GaPhase {
        loop {
            match self.advance() {
                phase @ (GaPhase::Reproduce | GaPhase::Terminated) => return phase,
                _ => {}
            }
        }
    }

    /// Steps until termination.
    pub fn run(&mut self) -> Termination {
        if self.phase == GaPhase::Init {
            info!(
                "starting search: {} courses, {} classrooms, {} slots, population {}",
                self.problem.courses.len(),
                self.problem.classrooms.len(),
                self.problem.layout.total_slots(),
                self.config.population_size
            );
        }
        loop {
            if self.step() == GaPhase::Terminated {
                if let Some(reason) = self.termination {
                    return reason;
                }
            }
        }
    }

    fn initialize(&mut self) {
        let attempts = self.config.placement_attempts;
        self.population = (0..self.config.population_size)
            .map(|_| self.problem.create_individual(attempts, &mut self.rng))
            .collect();
    }

    fn evaluate_population(&mut self) {
        let total = assign_selection_probs(&mut self.population, self.problem);
        let mean = if self.population.is_empty() {
            0.0
        } else {
            total / self.population.len() as f64
        };
        self.mean_history.push(mean);

        let population = mem::take(&mut self.population);
        self.population = select_survivors(population, self.config.population_size);
        debug!(
            "generation {}: mean {:.4}, best {:.4}",
            self.generation,
            mean,
            self.best_fitness().unwrap_or(f64::NEG_INFINITY)
        );
    }

    fn reproduce(&mut self) {
        let mut offspring = Vec::with_capacity(self.config.population_size);
        for _ in 0..self.config.population_size {
            let Some((i, j)) = select_parents(
                &self.population,
                self.problem,
                self.config.tournament_size,
                &mut self.rng,
            ) else {
                break;
            };
            let mut child =
                self.operators
                    .crossover(&self.population[i], &self.population[j], &mut self.rng);
            self.operators.mutate(&mut child, self.problem, &mut self.rng);
            self.problem.evaluate(&mut child);
            offspring.push(child);
        }
        self.offspring = offspring;
    }

    fn select_survivors(&mut self) {
        let mut pool = mem::take(&mut self.population);
        pool.append(&mut self.offspring);
        self.population = select_survivors(pool, self.config.population_size);
    }

    fn check_termination(&self) -> Option<Termination> {
        if self.is_converged() {
            Some(Termination::Converged)
        } else if self.generation >= self.config.max_generations {
            Some(Termination::GenerationLimit)
        } else {
            None
        }
    }

    /// Whether the last `convergence_window` recorded means are identical.
    ///
    /// Always `false` when the window is 0.
    pub fn is_converged(&self) -> bool {
        let window = self.config.convergence_window;
        if window == 0 || self.mean_history.len() < window {
            return false;
        }
        let recent = &self.mean_history[self.mean_history.len() - window..];
        recent.windows(2).all(|w| w[0] == w[1])
    }

    /// Current population, sorted by fitness descending after each evaluation.
    pub fn population(&self) -> &[Timetable] {
        &self.population
    }

    /// Fittest genome of the current population.
    pub fn best(&self) -> Option<&Timetable> {
        self.population.first()
    }

    fn best_fitness(&self) -> Option<f64> {
        self.best().and_then(Timetable::fitness)
    }

    /// Current phase.
    pub fn phase(&self) -> GaPhase {
        self.phase
    }

    /// Completed generations (0 until the first reproduction round).
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Mean population fitness, one entry per evaluated generation.
    pub fn mean_fitness_history(&self) -> &[f64] {
        &self.mean_history
    }

    /// Consumes the controller and packages its state.
    ///
    /// Returns `None` before the population has been built.
    pub fn into_result(self) -> Option<GaResult> {
        let termination = self.termination.unwrap_or(Termination::GenerationLimit);
        let best = self.population.first()?.clone();
        Some(GaResult {
            best_fitness: best.fitness().unwrap_or_else(|| self.problem.score(&best)),
            best,
            population: self.population,
            mean_fitness_history: self.mean_history,
            generations: self.generation,
            termination,
        })
    }
}

/// Outcome of a finished search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaResult {
    /// Fittest genome.
    pub best: Timetable,
    /// Its fitness.
    pub best_fitness: f64,
    /// Final population, fittest first.
    pub population: Vec<Timetable>,
    /// Mean fitness per evaluated generation, starting with generation 0.
    pub mean_fitness_history: Vec<f64>,
    /// Completed generations.
    pub generations: usize,
    /// Why the search stopped.
    pub termination: Termination,
}

impl GaResult {
    /// Whether the search stopped on convergence rather than the cap.
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

/// One-shot search entry.
///
/// # Example
/// ```
/// use u_timetable::ga::{GaConfig, GaRunner, TimetableProblem};
/// use u_timetable::models::TimetableRequest;
///
/// let mut request = TimetableRequest::new();
/// let a = request.add_instructor("A");
/// request.add_course("CS-1", 20, a);
/// request.add_classroom("SIMP-120", 30);
/// let problem = TimetableProblem::new(request).unwrap();
///
/// let result = GaRunner::run(&problem, &GaConfig::default().with_seed(7)).unwrap();
/// assert_eq!(result.best_fitness, 1.0);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs a full search with the given configuration.
    ///
    /// A validated configuration always yields a population, so
    /// [`TimetableError::EmptyPopulation`] is not expected in practice.
    pub fn run(problem: &TimetableProblem, config: &GaConfig) -> Result<GaResult> {
        let mut ga = TimetableGa::new(problem, config.clone())?;
        ga.run();
        ga.into_result()
            .ok_or(TimetableError::EmptyPopulation)
    }
}
