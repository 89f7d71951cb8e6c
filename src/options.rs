//! Configuration of an evolutionary run. [Options] is a plain value handed to the
//! [crate::Evolution] facade at construction, and threaded from there into every component.

use crate::{
    constants::*,
    error::{Error, Result},
    network::activate,
};
use serde::{Deserialize, Serialize};

/// Activation applied to every weighted sum of non-input neurons
pub type Activation = fn(f64) -> f64;

/// Fixed layer widths shared by every network of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub input: usize,
    pub hidden: Vec<usize>,
    pub output: usize,
}

impl Topology {
    pub fn new(input: usize, hidden: &[usize], output: usize) -> Self {
        Self {
            input,
            hidden: hidden.to_vec(),
            output,
        }
    }

    /// Neurons per layer, input first
    pub fn layers(&self) -> Vec<usize> {
        let mut layers = Vec::with_capacity(self.hidden.len() + 2);
        layers.push(self.input);
        layers.extend_from_slice(&self.hidden);
        layers.push(self.output);
        layers
    }

    pub fn validate(&self) -> Result<()> {
        match self.layers().iter().position(|n| *n == 0) {
            Some(layer) => Err(Error::EmptyLayer { layer }),
            None => Ok(()),
        }
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::new(NEUVO_INPUT, &NEUVO_HIDDEN, NEUVO_OUTPUT)
    }
}

/// Which end of the score range is fittest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreOrder {
    /// Higher scores are better
    #[default]
    Descending,
    /// Lower scores are better
    Ascending,
}

impl ScoreOrder {
    /// Whether `l` ranks strictly ahead of `r`
    #[inline]
    pub fn better(&self, l: f64, r: f64) -> bool {
        match self {
            Self::Descending => l > r,
            Self::Ascending => l < r,
        }
    }
}

/// How many generations are retained besides the one being scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryDepth {
    Finite(usize),
    Unbounded,
}

impl Default for HistoryDepth {
    fn default() -> Self {
        Self::Finite(NEUVO_HISTORY_DEPTH)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub topology: Topology,
    pub population: usize,
    pub elitism: f64,
    pub random_injection: f64,
    pub mutation_rate: f64,
    pub mutation_range: f64,
    pub history_depth: HistoryDepth,
    pub score_only: bool,
    pub score_order: ScoreOrder,
    pub children_per_pair: usize,
    #[serde(skip, default = "default_activation")]
    pub activation: Activation,
}

fn default_activation() -> Activation {
    activate::sigmoid
}

impl Default for Options {
    fn default() -> Self {
        Self {
            topology: Topology::default(),
            population: NEUVO_POPULATION,
            elitism: NEUVO_ELITISM,
            random_injection: NEUVO_RANDOM_INJECTION,
            mutation_rate: NEUVO_MUTATION_RATE,
            mutation_range: NEUVO_MUTATION_RANGE,
            history_depth: HistoryDepth::default(),
            score_only: NEUVO_SCORE_ONLY,
            score_order: ScoreOrder::default(),
            children_per_pair: NEUVO_CHILDREN_PER_PAIR,
            activation: default_activation(),
        }
    }
}

/// A single override of one [Options] field
#[derive(Debug, Clone)]
pub enum Setting {
    Topology(Topology),
    Population(usize),
    Elitism(f64),
    RandomInjection(f64),
    MutationRate(f64),
    MutationRange(f64),
    HistoryDepth(HistoryDepth),
    ScoreOnly(bool),
    ScoreOrder(ScoreOrder),
    ChildrenPerPair(usize),
    Activation(Activation),
}

fn check_rate(name: &'static str, value: f64) -> Result<()> {
    if (0. ..=1.).contains(&value) {
        Ok(())
    } else {
        Err(Error::RateOutOfRange { name, value })
    }
}

impl Options {
    pub fn with_overrides(mut self, updates: &[Setting]) -> Self {
        for update in updates {
            self.update(update.clone());
        }
        self
    }

    pub fn update(&mut self, setting: Setting) {
        match setting {
            Setting::Topology(v) => self.topology = v,
            Setting::Population(v) => self.population = v,
            Setting::Elitism(v) => self.elitism = v,
            Setting::RandomInjection(v) => self.random_injection = v,
            Setting::MutationRate(v) => self.mutation_rate = v,
            Setting::MutationRange(v) => self.mutation_range = v,
            Setting::HistoryDepth(v) => self.history_depth = v,
            Setting::ScoreOnly(v) => self.score_only = v,
            Setting::ScoreOrder(v) => self.score_order = v,
            Setting::ChildrenPerPair(v) => self.children_per_pair = v,
            Setting::Activation(v) => self.activation = v,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.topology.validate()?;
        if self.population == 0 {
            return Err(Error::EmptyPopulation);
        }
        check_rate("elitism", self.elitism)?;
        check_rate("random injection", self.random_injection)?;
        check_rate("mutation rate", self.mutation_rate)?;
        if !(self.mutation_range >= 0. && self.mutation_range.is_finite()) {
            return Err(Error::NegativeRange(self.mutation_range));
        }
        if self.children_per_pair == 0 {
            return Err(Error::NoChildren);
        }
        Ok(())
    }

    /// Genomes carried over unchanged into the next population
    pub fn elite_count(&self) -> usize {
        (self.elitism * self.population as f64).round() as usize
    }

    /// Networks with freshly drawn weights in the next population
    pub fn random_count(&self) -> usize {
        (self.random_injection * self.population as f64).round() as usize
    }

    pub fn to_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(s)?;
        options.validate()?;
        Ok(options)
    }
}
