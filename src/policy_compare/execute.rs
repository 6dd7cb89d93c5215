use {
    super::parser::*,
    serde_json::Value,
    std::{num::*, fs::File, io::{BufWriter, Write}},
    crate::*,
    crate::vax_model::*,
    crate::strategies::*,
    crate::stats_methods::*,
    crate::json_parsing::*,
    rayon::prelude::*,
    rand_pcg::Pcg64,
    rand::SeedableRng,
};

pub fn run_simulation(param: PolicyCompareParams, json: Value, num_threads: Option<NonZeroUsize>){
    let opt = VaxOptions::from_policy_compare_param(&param);
    let base = GameSample::from_options(opt, param.sim_seed)
        .unwrap_or_else(|err|{
            eprintln!("{}", err);
            std::process::exit(1)
        });

    let j = num_threads.unwrap_or_else(|| NonZeroUsize::new(1).unwrap());
    // limit number of threads to j
    rayon::ThreadPoolBuilder::new().num_threads(j.get()).build_global().unwrap();
    let mut master_rng = Pcg64::seed_from_u64(param.sim_seed);

    println!("strategy a: {}", param.strategy_a.name());
    let outcomes_a = strategy_outcomes(&base, &param.strategy_a, param.trials, j, &mut master_rng);
    println!("strategy b: {}", param.strategy_b.name());
    let outcomes_b = strategy_outcomes(&base, &param.strategy_b, param.trials, j, &mut master_rng);

    let stats_a = TrialStats::from_slice(&outcomes_a);
    let stats_b = TrialStats::from_slice(&outcomes_b);
    let t = welch_t(&stats_a, &stats_b);

    println!("{}: mean {} pm {}", param.strategy_a.name(), stats_a.mean(), stats_a.standard_error());
    println!("{}: mean {} pm {}", param.strategy_b.name(), stats_b.mean(), stats_b.standard_error());
    println!("welch t: {}", t);

    let name = param.name("dat", num_threads);
    println!("creating: {name}");
    let file = File::create(name).expect("unable to create file");
    let mut buf = BufWriter::new(file);
    write_json(&mut buf, &json);
    writeln!(buf, "#outcomeA outcomeB").unwrap();
    for (a, b) in outcomes_a.iter().zip(outcomes_b.iter()){
        writeln!(buf, "{:e} {:e}", a, b).unwrap();
    }
}

fn strategy_outcomes(
    base: &GameSample,
    strategy: &GameStrategy,
    trials: usize,
    j: NonZeroUsize,
    master_rng: &mut Pcg64
) -> Vec<f64>
{
    let trials_per_thread = trials / j.get();
    let mut rngs: Vec<_> = (0..j.get())
        .map(
            |_|
                {
                    Pcg64::from_rng(&mut *master_rng).unwrap()
                }
            )
        .collect();
    let bar = indication_bar(trials as u64);

    let chunks: Vec<_> = rngs.par_iter_mut()
        .map(
            |rng|
            {
                let mut sample = base.clone();
                sample.reseed_rngs(rng);
                let mut outcomes = Vec::with_capacity(trials_per_thread);

                for i in 0..trials_per_thread
                {
                    let outcome = sample.play_until_completion(strategy)
                        .expect("unable to rebuild topology");
                    outcomes.push(outcome);
                    if i % 100 == 0 {
                        bar.inc(100)
                    }
                }
                outcomes
            }
        ).collect();
    bar.finish_with_message("Done");

    let mut outcomes = Vec::with_capacity(trials_per_thread * j.get());
    for chunk in chunks{
        outcomes.extend(chunk);
    }
    outcomes
}
