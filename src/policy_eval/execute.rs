use {
    super::parser::*,
    serde_json::Value,
    std::{num::*, fs::File, io::{BufWriter, Write}},
    crate::*,
    crate::vax_model::*,
    crate::stats_methods::*,
    crate::json_parsing::*,
    rayon::prelude::*,
    rand_pcg::Pcg64,
    rand::SeedableRng,
};

pub fn run_simulation(param: PolicyEvalParams, json: Value, num_threads: Option<NonZeroUsize>){
    let opt = VaxOptions::from_policy_eval_param(&param);
    let sample = GameSample::from_options(opt, param.sim_seed)
        .unwrap_or_else(|err|{
            eprintln!("{}", err);
            std::process::exit(1)
        });

    let j = num_threads.unwrap_or_else(|| NonZeroUsize::new(1).unwrap());
    // limit number of threads to j
    rayon::ThreadPoolBuilder::new().num_threads(j.get()).build_global().unwrap();
    let mut master_rng = Pcg64::seed_from_u64(param.sim_seed);

    let trials_per_thread = param.trials / j.get();

    let mut rngs: Vec<_> = (0..j.get())
        .map(
            |_|
                {
                    Pcg64::from_rng(&mut master_rng).unwrap()
                }
            )
        .collect();
    let bar = indication_bar(param.trials as u64);

    let chunks: Vec<_> = rngs.par_iter_mut()
        .map(
            |rng|
            {
                let mut sample = sample.clone();
                sample.reseed_rngs(rng);
                let mut outcomes = Vec::with_capacity(trials_per_thread);

                for i in 0..trials_per_thread
                {
                    let outcome = sample.play_until_completion(&param.strategy)
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

    let stats = TrialStats::from_slice(&outcomes);
    println!("trials: {}", outcomes.len());
    println!("mean score: {} pm {}", stats.mean(), stats.standard_error());
    println!("sample sd: {}", stats.sd());

    let name = param.name("dat", num_threads);
    println!("creating: {name}");
    let file = File::create(name).expect("unable to create file");
    let mut buf = BufWriter::new(file);
    write_json(&mut buf, &json);
    writeln!(buf, "#outcome").unwrap();
    for outcome in outcomes{
        writeln!(buf, "{:e}", outcome).unwrap();
    }
}
