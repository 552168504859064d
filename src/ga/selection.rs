//! Parent and survivor selection.
//!
//! - [`tournament_selection`]: fittest of `k` distinct random individuals
//! - [`select_parents`]: two independent tournaments
//! - [`select_survivors`]: elitist truncation of parents ∪ offspring
//! - [`assign_selection_probs`]: fitness share per individual (reporting only)

use std::cmp::Ordering;

use rand::Rng;
use rand::seq::index;

use super::{Timetable, TimetableProblem};

/// Runs one tournament and returns the winner's index.
///
/// Draws `min(size, len)` distinct individuals uniformly and returns the one
/// with the strictly highest fitness; ties go to the first drawn. Returns
/// `None` for an empty population or a zero-sized tournament.
pub fn tournament_selection<R: Rng>(
    population: &[Timetable],
    problem: &TimetableProblem,
    size: usize,
    rng: &mut R,
) -> Option<usize> {
    let amount = size.min(population.len());
    if amount == 0 {
        return None;
    }

    let mut best: Option<(usize, f64)> = None;
    for i in index::sample(rng, population.len(), amount) {
        let genome = &population[i];
        let fitness = genome.fitness().unwrap_or_else(|| problem.score(genome));
        if best.map_or(true, |(_, f)| fitness > f) {
            best = Some((i, fitness));
        }
    }
    best.map(|(i, _)| i)
}

/// Selects two parents with independent tournaments.
///
/// The same individual may win both.
pub fn select_parents<R: Rng>(
    population: &[Timetable],
    problem: &TimetableProblem,
    size: usize,
    rng: &mut R,
) -> Option<(usize, usize)> {
    let first = tournament_selection(population, problem, size, rng)?;
    let second = tournament_selection(population, problem, size, rng)?;
    Some((first, second))
}

/// Keeps the `n` fittest of `pool`, sorted by fitness descending.
///
/// The sort is stable, so equal fitness keeps pool order (parents before
/// offspring when the pool is built that way). Unevaluated genomes rank last.
pub fn select_survivors(mut pool: Vec<Timetable>, n: usize) -> Vec<Timetable> {
    pool.sort_by(|a, b| descending(a.fitness(), b.fitness()));
    pool.truncate(n);
    pool
}

fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    let key = |f: Option<f64>| f.unwrap_or(f64::NEG_INFINITY);
    key(b).total_cmp(&key(a))
}

/// Evaluates every genome, sets its `selection_prob`, and returns the total fitness.
///
/// `selection_prob = fitness / total`, or `0.0` when the total is zero.
pub fn assign_selection_probs(population: &mut [Timetable], problem: &TimetableProblem) -> f64 {
    let total: f64 = population.iter_mut().map(|t| problem.evaluate(t)).sum();
    for genome in population.iter_mut() {
        genome.selection_prob = match genome.fitness() {
            Some(f) if total != 0.0 => f / total,
            _ => 0.0,
        };
    }
    total
}
