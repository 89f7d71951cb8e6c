use core::cmp::min;
use rand::{Rng, RngCore, SeedableRng};
use std::{
    fs::File,
    io::{self, Read},
};

use crate::constants::{NEUVO_CROSSOVER_PROB, NEUVO_MUTATION_RATE};

/// Per-weight events of breeding whose likelihood is configurable
#[derive(Debug, Clone, Copy)]
pub enum EvolutionEvent {
    /// A child takes the second parent's weight instead of the first's
    Crossover,
    /// A child's weight is perturbed after crossover
    Mutate,
}

pub const fn percent(x: u64) -> u64 {
    x * (u64::MAX / 100)
}

/// Convert a probability in [0, 1] into a threshold comparable against [RngCore::next_u64]
pub fn fraction(p: f64) -> u64 {
    if p >= 1. {
        u64::MAX
    } else if p <= 0. || p.is_nan() {
        0
    } else {
        (p * u64::MAX as f64) as u64
    }
}

pub trait Probabilities {
    type Update;
    fn probability(&self, evt: EvolutionEvent) -> u64;
    fn update(&mut self, stats: Self::Update);
}

pub trait Happens: RngCore + Probabilities {
    fn happens(&mut self, evt: EvolutionEvent) -> bool;
}

impl<T: RngCore + Probabilities> Happens for T {
    fn happens(&mut self, evt: EvolutionEvent) -> bool {
        self.probability(evt) > self.next_u64()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProbStatic {
    crossover: u64,
    mutate: u64,
}

impl ProbStatic {
    pub fn with_overrides(mut self, updates: &[(EvolutionEvent, u64)]) -> Self {
        for update in updates {
            self.update(*update);
        }
        self
    }

    /// Crossover at its fixed rate, mutation at `mutation_rate`
    pub fn with_mutation_rate(mutation_rate: f64) -> Self {
        Self::default().with_overrides(&[(EvolutionEvent::Mutate, fraction(mutation_rate))])
    }
}

impl Default for ProbStatic {
    fn default() -> Self {
        Self {
            crossover: NEUVO_CROSSOVER_PROB,
            mutate: fraction(NEUVO_MUTATION_RATE),
        }
    }
}

impl Probabilities for ProbStatic {
    type Update = (EvolutionEvent, u64);
    fn probability(&self, evt: EvolutionEvent) -> u64 {
        match evt {
            EvolutionEvent::Crossover => self.crossover,
            EvolutionEvent::Mutate => self.mutate,
        }
    }

    fn update(&mut self, (evt, v): Self::Update) {
        match evt {
            EvolutionEvent::Crossover => self.crossover = v,
            EvolutionEvent::Mutate => self.mutate = v,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WyRng {
    state: u64,
}

impl WyRng {
    pub fn seeded(state: u64) -> Self {
        Self { state }
    }
}

impl RngCore for WyRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        const WY_CONST_0: u64 = 0x2d35_8dcc_aa6c_78a5;
        const WY_CONST_1: u64 = 0x8bb8_4b93_962e_acc9;
        self.state = self.state.wrapping_add(WY_CONST_0);
        let t = u128::from(self.state) * u128::from(self.state ^ WY_CONST_1);
        (t as u64) ^ (t >> 64) as u64
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        let mut idx = 0;
        while idx < dst.len() {
            let lim = min(8, dst.len() - idx);
            dst[idx..idx + lim].copy_from_slice(&self.next_u64().to_ne_bytes()[..lim]);
            idx += lim;
        }
    }
}

impl SeedableRng for WyRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::seeded(u64::from_le_bytes(seed))
    }
}

/// An rng paired with the probabilities of the events it decides
#[derive(Debug, Clone)]
pub struct ProbBinding<P: Probabilities, R: RngCore> {
    p: P,
    r: R,
}

impl<P: Probabilities, R: RngCore> ProbBinding<P, R> {
    pub fn new(p: P, r: R) -> Self {
        Self { p, r }
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.r
    }
}

impl<P: Probabilities, R: RngCore> Probabilities for ProbBinding<P, R> {
    type Update = P::Update;
    fn probability(&self, evt: EvolutionEvent) -> u64 {
        self.p.probability(evt)
    }

    fn update(&mut self, stats: Self::Update) {
        self.p.update(stats);
    }
}

impl<P: Probabilities, R: RngCore> RngCore for ProbBinding<P, R> {
    fn next_u32(&mut self) -> u32 {
        self.r.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.r.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.r.fill_bytes(dest)
    }
}

/// Uniformly distributed value within [-1, 1], used for every fresh weight
#[inline]
pub fn random_unit(rng: &mut impl RngCore) -> f64 {
    rng.random_range(-1. ..=1.)
}

pub fn seed_urandom() -> io::Result<u64> {
    let mut file = File::open("/dev/urandom")?;
    let mut buffer = [0u8; 8];
    file.read_exact(&mut buffer)?;
    Ok(u64::from_le_bytes(buffer))
}

/// A [WyRng] seeded from the os, or from the thread rng where urandom is missing
pub fn default_rng() -> WyRng {
    WyRng::seeded(seed_urandom().unwrap_or_else(|_| rand::rng().next_u64()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_t;
    use core::iter::once;
    use rand::rngs::{StdRng, ThreadRng};

    const CHANCE_CROSSOVER: f64 = 0.5;
    const CHANCE_MUTATE: f64 = 0.1;

    fn assert_within_deviation(
        evt: EvolutionEvent,
        chance: f64,
        range: f64,
        happens: &mut impl Happens,
    ) {
        let samples = 10_000.;
        let expected = chance * samples;
        let max_deviation = expected * range;
        for _ in 0..100 {
            let incidence = once(())
                .cycle()
                .take(samples as usize)
                .filter(|()| happens.happens(evt))
                .count() as f64;
            assert!(
                (expected - incidence).abs() < max_deviation,
                "{evt:?}: {incidence} != {expected} ± {max_deviation}"
            );
        }
    }

    // control test - we are confident that rand generates good random numbers
    #[test]
    fn test_deviation_rand() {
        let mut p_bind = ProbBinding::new(ProbStatic::default(), ThreadRng::default());
        for (evt, chance) in [
            (EvolutionEvent::Crossover, CHANCE_CROSSOVER),
            (EvolutionEvent::Mutate, CHANCE_MUTATE),
        ] {
            assert_within_deviation(evt, chance, 0.33, &mut p_bind);
        }
    }

    #[test]
    fn test_deviation_wyrand() {
        let mut p_bind = ProbBinding::new(ProbStatic::default(), default_rng());
        for (evt, chance) in [
            (EvolutionEvent::Crossover, CHANCE_CROSSOVER),
            (EvolutionEvent::Mutate, CHANCE_MUTATE),
        ] {
            assert_within_deviation(evt, chance, 0.33, &mut p_bind);
        }
    }

    #[test]
    fn test_fraction_bounds() {
        assert_eq!(0, fraction(0.));
        assert_eq!(0, fraction(-0.5));
        assert_eq!(u64::MAX, fraction(1.));

        let mut never = ProbBinding::new(ProbStatic::with_mutation_rate(0.), default_rng());
        assert!((0..10_000).all(|_| !never.happens(EvolutionEvent::Mutate)));
    }

    #[test]
    fn test_fill_bytes_partial() {
        let mut l = WyRng::seeded(7);
        let mut r = WyRng::seeded(7);
        let mut buf = [0u8; 13];
        l.fill_bytes(&mut buf);

        let first = r.next_u64().to_ne_bytes();
        let second = r.next_u64().to_ne_bytes();
        assert_eq!(&first[..], &buf[..8]);
        assert_eq!(&second[..5], &buf[8..]);
    }

    test_t!(random_unit_bounds[T: WyRng | StdRng]() {
        let mut rng = T::seed_from_u64(42);
        for _ in 0..10_000 {
            let v = random_unit(&mut rng);
            assert!((-1. ..=1.).contains(&v), "{v} out of unit range");
        }
    });
}
