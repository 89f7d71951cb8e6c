//! Centralized defaults for Neuvo evolution parameters.
//!
//! All configurable parameters are defined here with the `NEUVO_` prefix.
//! [crate::options::Options::default] is assembled entirely from these values.

use crate::random::percent;

// ============================================================================
// Population Parameters
// ============================================================================

/// Number of networks produced for every generation
pub const NEUVO_POPULATION: usize = 50;

/// Fraction of the population carried over unchanged from the best genomes
pub const NEUVO_ELITISM: f64 = 0.2;

/// Fraction of the population replaced by networks with freshly drawn weights
pub const NEUVO_RANDOM_INJECTION: f64 = 0.2;

/// Number of children produced by every breeding pair
pub const NEUVO_CHILDREN_PER_PAIR: usize = 1;

// ============================================================================
// Mutation Parameters
// ============================================================================

/// Per-weight probability of mutation after crossover
pub const NEUVO_MUTATION_RATE: f64 = 0.1;

/// Mutations perturb a weight by a value drawn from [-range, range]
pub const NEUVO_MUTATION_RANGE: f64 = 0.5;

/// Per-weight probability of taking the second parent's weight during crossover
pub const NEUVO_CROSSOVER_PROB: u64 = percent(50);

// ============================================================================
// Topology Parameters
// ============================================================================

pub const NEUVO_INPUT: usize = 1;

pub const NEUVO_HIDDEN: [usize; 1] = [1];

pub const NEUVO_OUTPUT: usize = 1;

// ============================================================================
// History Parameters
// ============================================================================

/// Past generations kept besides the one currently being scored
pub const NEUVO_HISTORY_DEPTH: usize = 0;

/// Whether generations older than the previous one only keep their scores
pub const NEUVO_SCORE_ONLY: bool = false;
