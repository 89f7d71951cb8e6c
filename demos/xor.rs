#![allow(mixed_script_confusables)]
#![allow(confusable_idents)]

use approx::relative_eq;
use core::ops::ControlFlow;
use neuvo::{
    activate::steep_sigmoid, evolve, new_t, EvolutionTarget, Evolution, Network, Options,
    Scenario, Stats, Topology,
};

const POPULATION: usize = 150;
const GENERATIONS: usize = 2_000;

/// Networks have no biases, so a constant third input stands in for one
struct Xor;

macro_rules! eval_pair {
    ($pair:expr, $want:expr, ($network:ident $fit:ident)) => {{
        let v = match $network.evaluate(&$pair) {
            Ok(output) => output[0],
            Err(_) => return f64::MIN,
        };
        if relative_eq!(v, $want, epsilon = 0.1) {
            $fit += 1.;
        }
        $fit -= ($want - v).abs();
    }};
}

impl Scenario for Xor {
    fn eval(&self, network: &mut impl Network) -> f64 {
        let mut fit = 0.;

        eval_pair!([0., 0., 1.], 0., (network fit));
        eval_pair!([1., 1., 1.], 0., (network fit));
        eval_pair!([1., 0., 1.], 1., (network fit));
        eval_pair!([0., 1., 1.], 1., (network fit));

        fit
    }
}

fn hook(stats: &Stats<'_>) -> ControlFlow<()> {
    if stats.generation % 100 == 1 {
        if let Some(best) = stats.best() {
            println!("best of gen {}: {:.4}", stats.generation, best.score);
        }
    }

    ControlFlow::Continue(())
}

fn main() -> neuvo::Result<()> {
    let options = new_t!(
        Options,
        topology = Topology::new(3, &[4], 1),
        population = POPULATION,
        elitism = 0.1,
        random_injection = 0.1,
        mutation_rate = 0.2,
        activation = steep_sigmoid,
    );
    let mut evolution = Evolution::new(options)?;

    // 4 points within 0.1 of their target score at least 3.6
    let best = evolve(
        &mut evolution,
        &Xor,
        EvolutionTarget::Score(3.6),
        |stats| match stats.generation {
            GENERATIONS => ControlFlow::Break(()),
            _ => hook(stats),
        },
    )?;

    println!(
        "finished after {} generations: {:.4}",
        evolution.generation(),
        best.score
    );
    if let Some(save) = best.network() {
        println!("{}", save.to_string()?);
    }
    Ok(())
}
