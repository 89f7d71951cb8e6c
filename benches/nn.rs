use criterion::Criterion;
use neuvo::{activate::sigmoid, random::WyRng, Layered, Network, Topology};

fn bench_nn(bench: &mut Criterion) {
    let mut rng = WyRng::seeded(1);
    let net = &mut Layered::random(&Topology::new(8, &[16, 16], 4), sigmoid, &mut rng).unwrap();
    let i = vec![0.7, 0.3, -0.2, 0.9, 0., 1., -1., 0.5];

    bench.bench_function("layered-evaluate", |b| b.iter(|| net.evaluate(&i).unwrap()[0]));

    let save = net.to_save();
    bench.bench_function("layered-from-save", |b| {
        b.iter(|| Layered::from_save(&save, sigmoid).unwrap())
    });
}

pub fn benches() {
    #[cfg(not(feature = "smol_bench"))]
    let mut criterion: criterion::Criterion<_> = Criterion::default()
        .sample_size(1000)
        .significance_level(0.1);
    #[cfg(feature = "smol_bench")]
    let mut criterion: criterion::Criterion<_> = {
        use core::time::Duration;
        Criterion::default()
            .measurement_time(Duration::from_millis(1))
            .sample_size(10)
            .nresamples(1)
            .without_plots()
            .configure_from_args()
    };
    bench_nn(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
