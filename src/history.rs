//! Functions and structs related to managing generations across an evolutionary run.

use crate::{
    error::{Error, Result},
    generation::Generation,
    genome::Genome,
    network::Save,
    options::{HistoryDepth, Options},
    random::{EvolutionEvent, Happens, Probabilities},
};
use log::debug;
use rand::RngCore;

/// Generations of a run, oldest first. The last generation is the one currently being scored.
#[derive(Debug, Clone, Default)]
pub struct History {
    generations: Vec<Generation>,
    /// Layer sizes of the population last handed out
    neurons: Option<Vec<usize>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    #[inline]
    pub fn generations(&self) -> &[Generation] {
        &self.generations
    }

    /// The generation currently being scored
    #[inline]
    pub fn current(&self) -> Option<&Generation> {
        self.generations.last()
    }

    pub fn clear(&mut self) {
        self.generations.clear();
        self.neurons = None;
    }

    /// A population of randomly weighted networks, scored into a new, empty generation
    pub fn first_population(
        &mut self,
        options: &Options,
        rng: &mut impl RngCore,
    ) -> Result<Vec<Save>> {
        let pop = (0..options.population)
            .map(|_| Save::random(&options.topology, &mut *rng))
            .collect::<Result<Vec<_>>>()?;
        self.generations.push(Generation::new());
        self.neurons = Some(options.topology.layers());
        debug!("first population of {}", pop.len());
        Ok(pop)
    }

    /// A population bred from the current generation, scored into a new, empty generation
    pub fn next_population<H>(&mut self, options: &Options, rng: &mut H) -> Result<Vec<Save>>
    where
        H: Happens + Probabilities<Update = (EvolutionEvent, u64)>,
    {
        let pop = self
            .generations
            .last()
            .ok_or(Error::NoGeneration)?
            .generate_next(options, rng)?;
        self.generations.push(Generation::new());
        self.neurons = pop.first().map(|save| save.neurons.clone());
        Ok(pop)
    }

    /// Rank `genome` into the generation currently being scored. Its network must be shaped
    /// like the population it was handed out in.
    pub fn record(&mut self, genome: Genome, options: &Options) -> Result<()> {
        let generation = self.generations.last_mut().ok_or(Error::NoGeneration)?;
        if let (Some(expected), Some(save)) = (&self.neurons, genome.network()) {
            if *expected != save.neurons {
                return Err(Error::ForeignTopology {
                    expected: expected.clone(),
                    found: save.neurons.clone(),
                });
            }
        }
        generation.add(genome, options.score_order)
    }

    /// Strip the networks of the generation two back when only scores are kept, then drop the
    /// oldest generations beyond the configured depth
    pub fn retain(&mut self, options: &Options) {
        let len = self.generations.len();
        if options.score_only && len >= 2 {
            self.generations[len - 2].strip();
        }

        if let HistoryDepth::Finite(depth) = options.history_depth {
            let keep = depth + 1;
            if len > keep {
                self.generations.drain(..len - keep);
                debug!("dropped {} generations from history", len - keep);
            }
        }
    }
}
