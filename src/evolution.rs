use crate::{
    error::Result,
    genome::Genome,
    history::History,
    network::{Layered, Network},
    options::{Options, Setting},
    random::{default_rng, ProbBinding, ProbStatic, WyRng},
};
use log::info;
use rand::RngCore;

/// Entry point of an evolutionary run. Hands out populations of live networks, and collects
/// the scores they earn so the next population can be bred from them.
pub struct Evolution<R: RngCore = WyRng> {
    options: Options,
    history: History,
    rng: ProbBinding<ProbStatic, R>,
    generation: usize,
}

impl Evolution<WyRng> {
    /// A run of `options`, drawing from a freshly seeded [WyRng]
    pub fn new(options: Options) -> Result<Self> {
        Self::with_rng(options, default_rng())
    }
}

impl<R: RngCore> Evolution<R> {
    pub fn with_rng(options: Options, rng: R) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            rng: ProbBinding::new(ProbStatic::with_mutation_rate(options.mutation_rate), rng),
            options,
            history: History::new(),
            generation: 0,
        })
    }

    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Populations produced since the run was created or last restarted
    #[inline]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Apply `settings` over the current options. Settings accumulate across calls, and are
    /// only applied if the result is valid. A new topology takes effect with the next first
    /// population.
    pub fn configure(&mut self, settings: &[Setting]) -> Result<()> {
        let options = self.options.clone().with_overrides(settings);
        options.validate()?;
        self.options = options;
        Ok(())
    }

    /// The networks to evaluate this generation. The first call produces randomly weighted
    /// networks, every later call breeds them from the scores reported since the previous call.
    pub fn next_generation(&mut self) -> Result<Vec<Layered>> {
        let saves = if self.history.is_empty() {
            self.history
                .first_population(&self.options, self.rng.rng_mut())?
        } else {
            self.history.next_population(&self.options, &mut self.rng)?
        };

        let networks = saves
            .iter()
            .map(|save| Layered::from_save(save, self.options.activation))
            .collect::<Result<Vec<_>>>()?;
        self.history.retain(&self.options);
        self.generation += 1;
        Ok(networks)
    }

    /// Record the score `network` earned in the current generation. Networks shaped unlike the
    /// current population are rejected.
    pub fn report_score(&mut self, network: &impl Network, score: f64) -> Result<()> {
        self.history
            .record(Genome::new(score, network.to_save()), &self.options)
    }

    /// Forget every generation, so that the next one starts from random networks again
    pub fn restart(&mut self) {
        info!("restarting after {} generations", self.generation);
        self.history.clear();
        self.generation = 0;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        error::Error,
        new_t,
        options::{HistoryDepth, ScoreOrder, Topology},
    };

    fn scenario_options() -> Options {
        new_t!(
            Options,
            topology = Topology::new(2, &[2], 1),
            population = 4,
            elitism = 0.25,
            random_injection = 0.25,
            score_order = ScoreOrder::Descending,
        )
    }

    #[test]
    fn test_scenario() {
        let mut options = scenario_options();
        options.mutation_rate = 0.;
        let mut evolution = Evolution::with_rng(options, WyRng::seeded(71)).unwrap();
        let first = evolution.next_generation().unwrap();
        assert_eq!(4, first.len());
        assert_eq!(1, evolution.generation());

        for (network, score) in first.iter().zip([10., 40., 20., 5.]) {
            evolution.report_score(network, score).unwrap();
        }
        assert_eq!(
            vec![40., 20., 10., 5.],
            evolution.history().current().unwrap().scores()
        );

        let next = evolution.next_generation().unwrap();
        assert_eq!(4, next.len());
        assert_eq!(first[1].to_save(), next[0].to_save());
        assert_eq!(first[1].topology(), next[1].topology());
        assert_ne!(first[1].to_save(), next[1].to_save());
        assert!(next.iter().all(|n| n.topology() == vec![2, 2, 1]));

        // the best genome breeds with itself, then with the runner up
        assert_eq!(first[1].to_save(), next[2].to_save());
        let (best, runner_up) = (first[1].to_save(), first[2].to_save());
        for (idx, w) in next[3].to_save().weights.iter().enumerate() {
            assert!(*w == best.weights[idx] || *w == runner_up.weights[idx]);
        }
    }

    #[test]
    fn test_report_foreign_topology() {
        let mut evolution = Evolution::with_rng(scenario_options(), WyRng::seeded(89)).unwrap();
        let first = evolution.next_generation().unwrap();
        let foreign = Layered::build(&Topology::new(3, &[5], 2), |x| x, || 1.).unwrap();
        assert!(matches!(
            evolution.report_score(&foreign, 100.),
            Err(Error::ForeignTopology { .. })
        ));

        for (network, score) in first.iter().zip([1., 2., 3., 4.]) {
            evolution.report_score(network, score).unwrap();
        }
        assert_eq!(4, evolution.history().current().unwrap().len());
        let next = evolution.next_generation().unwrap();
        assert!(next.iter().all(|n| n.topology() == vec![2, 2, 1]));
    }

    #[test]
    fn test_evaluate_handles() {
        let mut evolution = Evolution::with_rng(scenario_options(), WyRng::seeded(73)).unwrap();
        for mut network in evolution.next_generation().unwrap() {
            let output = network.evaluate(&[0.5, -0.5]).unwrap();
            assert_eq!(1, output.len());
            assert!((0. ..=1.).contains(&output[0]));
        }
    }

    #[test]
    fn test_report_before_generation() {
        let mut evolution = Evolution::new(scenario_options()).unwrap();
        let network = Layered::build(&Topology::new(2, &[2], 1), |x| x, || 0.).unwrap();
        assert!(matches!(
            evolution.report_score(&network, 1.),
            Err(Error::NoGeneration)
        ));
    }

    #[test]
    fn test_configure_keeps_prior_on_error() {
        let mut evolution = Evolution::new(scenario_options()).unwrap();
        evolution
            .configure(&[Setting::Population(8), Setting::MutationRate(0.5)])
            .unwrap();
        assert!(matches!(
            evolution.configure(&[Setting::Population(16), Setting::Elitism(2.)]),
            Err(Error::RateOutOfRange { .. })
        ));
        assert_eq!(8, evolution.options().population);
        assert_eq!(0.25, evolution.options().elitism);
        assert_eq!(0.5, evolution.options().mutation_rate);
        assert_eq!(8, evolution.next_generation().unwrap().len());
    }

    #[test]
    fn test_invalid_options() {
        assert!(Evolution::new(new_t!(Options, population = 0)).is_err());
    }

    #[test]
    fn test_population_held_across_generations() {
        let options = new_t!(
            Options,
            topology = Topology::new(3, &[4], 2),
            population = 13,
            children_per_pair = 3,
            history_depth = HistoryDepth::Finite(2),
        );
        let mut evolution = Evolution::with_rng(options, WyRng::seeded(79)).unwrap();
        for _ in 0..10 {
            let mut networks = evolution.next_generation().unwrap();
            assert_eq!(13, networks.len());
            assert!(evolution.history().len() <= 3);
            // only part of the population is reported
            for network in networks.iter_mut().step_by(3) {
                let score = network.evaluate(&[1., 0., -1.]).unwrap()[0];
                evolution.report_score(&*network, score).unwrap();
            }
        }
        assert_eq!(10, evolution.generation());
    }

    #[test]
    fn test_ascending() {
        let mut options = scenario_options();
        options.score_order = ScoreOrder::Ascending;
        let mut evolution = Evolution::with_rng(options, WyRng::seeded(83)).unwrap();
        let first = evolution.next_generation().unwrap();
        for (network, score) in first.iter().zip([10., 40., 20., 5.]) {
            evolution.report_score(network, score).unwrap();
        }
        let next = evolution.next_generation().unwrap();
        assert_eq!(first[3].to_save(), next[0].to_save());
    }

    #[test]
    fn test_seeded_reproducible() {
        let mut l = Evolution::with_rng(scenario_options(), WyRng::seeded(89)).unwrap();
        let mut r = Evolution::with_rng(scenario_options(), WyRng::seeded(89)).unwrap();
        for _ in 0..3 {
            let l_pop = l.next_generation().unwrap();
            let r_pop = r.next_generation().unwrap();
            for (idx, (ln, rn)) in l_pop.iter().zip(r_pop.iter()).enumerate() {
                assert_eq!(ln.to_save(), rn.to_save());
                l.report_score(ln, idx as f64).unwrap();
                r.report_score(rn, idx as f64).unwrap();
            }
        }
    }

    #[test]
    fn test_restart() {
        let mut evolution = Evolution::with_rng(scenario_options(), WyRng::seeded(97)).unwrap();
        evolution.next_generation().unwrap();
        evolution.restart();
        assert!(evolution.history().is_empty());
        assert_eq!(0, evolution.generation());

        // nothing was scored, yet a fresh first population is produced
        assert_eq!(4, evolution.next_generation().unwrap().len());
        assert_eq!(1, evolution.history().len());
    }

    #[test]
    fn test_next_from_unscored() {
        let mut evolution = Evolution::with_rng(scenario_options(), WyRng::seeded(101)).unwrap();
        evolution.next_generation().unwrap();
        assert!(matches!(
            evolution.next_generation(),
            Err(Error::EmptyGeneration)
        ));
        assert_eq!(1, evolution.history().len());
        assert_eq!(1, evolution.generation());
    }
}
