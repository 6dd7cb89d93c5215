use {
    super::parser::*,
    serde_json::Value,
    std::{num::*, fs::File, io::{BufWriter, Write}},
    crate::vax_model::*,
    crate::strategies::*,
    crate::stats_methods::*,
    crate::json_parsing::*,
    indicatif::*,
    rayon::prelude::*,
    rand_pcg::Pcg64,
    rand::SeedableRng,
};

pub fn run_simulation(param: ScanWeightParams, json: Value, num_threads: Option<NonZeroUsize>){
    let opt = VaxOptions::from_weight_scan_param(&param);
    let base = GameSample::from_options(opt, param.sim_seed)
        .unwrap_or_else(|err|{
            eprintln!("{}", err);
            std::process::exit(1)
        });

    let k = num_threads.unwrap_or_else(|| NonZeroUsize::new(1).unwrap());
    rayon::ThreadPoolBuilder::new().num_threads(k.get()).build_global().unwrap();

    let weights = param.weight_range.get_range();
    let mut master_rng = Pcg64::seed_from_u64(param.sim_seed);

    //every weight step gets its own pre-seeded sample, drawn in weight
    //order so the thread count does not change the outcomes
    let mut samples: Vec<_> = weights.iter()
        .map(
            |_|
                {
                    let mut sample = base.clone();
                    sample.reseed_rngs(&mut master_rng);
                    sample
                }
            )
        .collect();

    let bar = crate::indication_bar(weights.len() as u64);

    let stats: Vec<_> = samples.par_iter_mut()
        .zip(weights.par_iter())
        .progress_with(bar)
        .map(
            |(sample, weight)|
            {
                let strategy = GameStrategy{
                    vaccine: param.vaccine,
                    quarantine: QuarantinePolicy::NearbySick(*weight),
                };
                let mut outcomes = Vec::with_capacity(param.trials_per_step);
                for _ in 0..param.trials_per_step{
                    let outcome = sample.play_until_completion(&strategy)
                        .expect("unable to rebuild topology");
                    outcomes.push(outcome);
                }
                TrialStats::from_slice(&outcomes)
            }
        ).collect();

    writing(&param, &json, num_threads, &weights, &stats);
}

fn writing(
    param: &ScanWeightParams,
    json: &Value,
    num_threads: Option<NonZeroUsize>,
    weights: &[f64],
    stats: &[TrialStats]
)
{
    let name = param.name("dat", num_threads);
    println!("creating: {name}");
    let file = File::create(name).expect("unable to create file");
    let mut buf = BufWriter::new(file);
    write_json(&mut buf, json);
    writeln!(buf, "#weight mean sd").unwrap();
    for (weight, stat) in weights.iter().zip(stats){
        writeln!(buf, "{} {:e} {:e}", weight, stat.mean(), stat.sd()).unwrap();
    }
}
