//! A driver for runs whose evaluation is a plain function of each network, as opposed to an
//! external simulation reporting scores at its own pace.

use crate::{
    error::{Error, Result},
    evolution::Evolution,
    generation::Generation,
    genome::Genome,
    network::Network,
    options::ScoreOrder,
};
use core::ops::ControlFlow;
use log::info;
use rand::RngCore;

pub enum EvolutionTarget {
    /// Stop once any genome scores at least this well
    Score(f64),
    /// Stop after this many generations were scored
    Generation(usize),
}

impl EvolutionTarget {
    fn satisfied(&self, stats: &Stats<'_>) -> bool {
        match self {
            Self::Score(t) => stats.any_as_good_as(*t),
            Self::Generation(t) => *t <= stats.generation,
        }
    }
}

/// A freshly scored generation, handed to hooks
pub struct Stats<'a> {
    pub generation: usize,
    pub scored: &'a Generation,
    pub order: ScoreOrder,
}

impl Stats<'_> {
    pub fn best(&self) -> Option<&Genome> {
        self.scored.best()
    }

    pub fn any_as_good_as(&self, score: f64) -> bool {
        self.best()
            .is_some_and(|g| !self.order.better(score, g.score))
    }
}

pub trait Scenario {
    fn eval(&self, network: &mut impl Network) -> f64;
}

/// Evaluate and score generation after generation until `target` is met, or `hook` breaks.
/// Returns the best genome of the last scored generation.
pub fn evolve<R: RngCore>(
    evolution: &mut Evolution<R>,
    scenario: &impl Scenario,
    target: EvolutionTarget,
    mut hook: impl FnMut(&Stats<'_>) -> ControlFlow<()>,
) -> Result<Genome> {
    loop {
        let mut networks = evolution.next_generation()?;
        for network in networks.iter_mut() {
            let score = scenario.eval(network);
            evolution.report_score(&*network, score)?;
        }

        let stats = Stats {
            generation: evolution.generation(),
            scored: evolution.history().current().ok_or(Error::NoGeneration)?,
            order: evolution.options().score_order,
        };

        let met = target.satisfied(&stats);
        if met {
            info!("target met in generation {}", stats.generation);
        }
        if met || hook(&stats).is_break() {
            return stats.best().cloned().ok_or(Error::EmptyGeneration);
        }
    }
}
