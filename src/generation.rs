//! A single evolutionary round: genomes ranked by score as they are reported, and the
//! selection and breeding that turns them into the next round's population.

use crate::{
    error::{Error, Result},
    genome::Genome,
    network::Save,
    options::{Options, ScoreOrder},
    random::{fraction, EvolutionEvent, Happens, Probabilities},
};
use log::{debug, trace, warn};
use rand::RngCore;
use rand_distr::{Distribution, Uniform};

/// Genomes of one round, always sorted best first under the run's [ScoreOrder]
#[derive(Debug, Clone, Default)]
pub struct Generation {
    genomes: Vec<Genome>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    #[inline]
    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    #[inline]
    pub fn best(&self) -> Option<&Genome> {
        self.genomes.first()
    }

    pub fn scores(&self) -> Vec<f64> {
        self.genomes.iter().map(|g| g.score).collect()
    }

    /// Insert `genome` ahead of the first genome it outscores. Genomes with equal scores keep
    /// the order in which they were added.
    pub fn add(&mut self, genome: Genome, order: ScoreOrder) -> Result<()> {
        if genome.score.is_nan() {
            return Err(Error::Unranked(genome.score));
        }

        let idx = self
            .genomes
            .partition_point(|g| !order.better(genome.score, g.score));
        self.genomes.insert(idx, genome);
        Ok(())
    }

    /// Discard the network of every genome, keeping only scores
    pub fn strip(&mut self) {
        self.genomes.iter_mut().for_each(Genome::strip);
    }

    /// Produce the networks of the next round: the best genomes unchanged, then networks shaped
    /// like the best genome with fresh weights, then children bred from ranked pairs until the
    /// population is full. Children mutate at `options.mutation_rate`, whatever `rng` held before.
    pub fn generate_next<H>(&self, options: &Options, rng: &mut H) -> Result<Vec<Save>>
    where
        H: Happens + Probabilities<Update = (EvolutionEvent, u64)>,
    {
        rng.update((EvolutionEvent::Mutate, fraction(options.mutation_rate)));
        let best = self.best().ok_or(Error::EmptyGeneration)?;
        let template = best.network().ok_or(Error::ScoreOnly)?;
        let population = options.population;
        let mut pop = Vec::with_capacity(population);

        let elite = options.elite_count().min(population);
        if elite > self.len() {
            warn!(
                "{elite} elites requested from a generation of {}, keeping all of them",
                self.len()
            );
        }
        for genome in self.genomes.iter().take(elite) {
            pop.push(genome.network().ok_or(Error::ScoreOnly)?.clone());
        }
        let elites = pop.len();

        let random = options.random_count().min(population - pop.len());
        for _ in 0..random {
            pop.push(template.randomized(rng));
        }

        let mut pairs = Pairs::new(self.len());
        while pop.len() < population {
            let (l, r) = pairs.next_pair();
            trace!("breeding {l} with {r}");
            let children = breed(
                self.genomes[l].network().ok_or(Error::ScoreOnly)?,
                self.genomes[r].network().ok_or(Error::ScoreOnly)?,
                options.children_per_pair,
                options.mutation_range,
                rng,
            )?;
            for child in children {
                if pop.len() == population {
                    break;
                }
                pop.push(child);
            }
        }

        if pop.len() != population {
            return Err(Error::PopulationDrift {
                expected: population,
                found: pop.len(),
            });
        }

        debug!(
            "next population from {} genomes: {elites} elite, {random} random, {} bred",
            self.len(),
            population - elites - random
        );
        Ok(pop)
    }
}

/// Endless sequence of breeding pairs over a ranked generation of `len` genomes.
///
/// A cursor `max` walks up from 0, and every genome ranked above it is paired with it, so the
/// best genomes breed first and the best is progressively paired with each next-best. At
/// `max == 0` there is nobody ranked above, so the best genome breeds with itself. Once `max`
/// reaches the last genome the cursor wraps back to 0. Every pass through the cursor yields at
/// least the self pairing, so a single genome generation still makes progress.
#[derive(Debug)]
pub struct Pairs {
    len: usize,
    max: usize,
    i: usize,
}

impl Pairs {
    pub fn new(len: usize) -> Self {
        Self { len, max: 0, i: 0 }
    }

    pub fn next_pair(&mut self) -> (usize, usize) {
        loop {
            if self.max == 0 {
                if self.i == 0 {
                    self.i = 1;
                    return (0, 0);
                }
            } else if self.i < self.max {
                let pair = (self.i, self.max);
                self.i += 1;
                return pair;
            }

            self.i = 0;
            self.max += 1;
            if self.max + 1 >= self.len {
                self.max = 0;
            }
        }
    }
}

impl Iterator for Pairs {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_pair())
    }
}

/// Breed `children` children of `l` and `r`. Each child starts as a copy of `l`, takes each of
/// `r`'s weights at the crossover probability, then has each weight perturbed by a value within
/// [-mutation_range, mutation_range] at the mutation probability.
pub fn breed(
    l: &Save,
    r: &Save,
    children: usize,
    mutation_range: f64,
    rng: &mut (impl RngCore + Happens),
) -> Result<Vec<Save>> {
    if l.weights.len() != r.weights.len() {
        return Err(Error::ParentShape {
            left: l.weights.len(),
            right: r.weights.len(),
        });
    }
    let perturb = Uniform::new_inclusive(-mutation_range, mutation_range)
        .map_err(|_| Error::NegativeRange(mutation_range))?;

    let mut brood = Vec::with_capacity(children);
    for _ in 0..children {
        let mut child = l.clone();
        for (w, rw) in child.weights.iter_mut().zip(r.weights.iter()) {
            if rng.happens(EvolutionEvent::Crossover) {
                *w = *rw;
            }
        }
        for w in child.weights.iter_mut() {
            if rng.happens(EvolutionEvent::Mutate) {
                *w += perturb.sample(rng);
            }
        }
        brood.push(child);
    }

    Ok(brood)
}
