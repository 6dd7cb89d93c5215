use{
    super::*,
    serde_json::Value,
    std::{num::*, fs::File, io::BufWriter},
    crate::vax_model::*,
    crate::json_parsing::*,
};


pub fn run_simulation(param:PolicyRunParams, json: Value, num_threads: Option<NonZeroUsize>){
    let opt = VaxOptions::from_policy_run_param(&param);
    let mut sample = GameSample::from_options(opt, param.sim_seed)
        .unwrap_or_else(|err|{
            eprintln!("{}", err);
            std::process::exit(1)
        });

    let curves = sample.play_recording_curves(&param.strategy);

    let name = param.name("dat", num_threads);
    println!("creating: {name}");
    let file = File::create(name).expect("unable to create file");
    let mut buf = BufWriter::new(file);
    write_json(&mut buf, &json);
    curves.write(&mut buf).unwrap();

    let tally = sample.final_tally();
    println!("game over after {} time steps", sample.time_step());
    println!(
        "uninfected {} vaccinated {} quarantined {} infected {}",
        tally.uninfected,
        tally.vaccinated,
        tally.quarantined,
        tally.infected
    );
    println!("score: {}", sample.score_fraction());
}
