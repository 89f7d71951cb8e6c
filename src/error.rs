//! The error type shared by every fallible operation of the engine.

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A topology contains a layer without neurons. Contains the layer index.
    #[error("layer {layer} has no neurons")]
    EmptyLayer { layer: usize },
    /// A rate expected as a fraction in [0, 1] is outside of it.
    #[error("{name} must be within [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },
    #[error("mutation range must be a non-negative number, got {0}")]
    NegativeRange(f64),
    #[error("population size must be at least 1")]
    EmptyPopulation,
    #[error("every breeding pair must produce at least 1 child")]
    NoChildren,

    /// The history has no generation to produce from or record into.
    #[error("no generation exists yet, produce a first population")]
    NoGeneration,
    #[error("cannot produce a population from a generation with no scored genomes")]
    EmptyGeneration,
    /// A genome's network was discarded by score-only retention.
    #[error("genome only retains its score")]
    ScoreOnly,

    #[error("topology implies {expected} weights, found {found}")]
    WeightCount { expected: usize, found: usize },
    #[error("network takes {expected} inputs, got {found}")]
    InputLength { expected: usize, found: usize },
    /// The layer sizes multiply into more weights than can be addressed.
    #[error("layers {0:?} imply too many weights")]
    WeightOverflow(Vec<usize>),
    /// A network scored into a generation whose population has other layer sizes.
    #[error("network has layers {found:?}, the population has {expected:?}")]
    ForeignTopology {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    #[error("parents carry {left} and {right} weights")]
    ParentShape { left: usize, right: usize },
    /// Networks need at least an input and an output layer. Contains the layer count.
    #[error("topology has {0} layers, at least 2 are required")]
    TopologyTooShort(usize),

    #[error("score {0} cannot be ranked")]
    Unranked(f64),
    #[error("population drifted to {found} networks, expected {expected}")]
    PopulationDrift { expected: usize, found: usize },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
