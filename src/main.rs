use{
    std::{
        time::Instant
    },
    structopt::StructOpt,
    indicatif::*
};

pub mod vax_model;
pub mod strategies;
pub mod misc_types;
pub mod stats_methods;
pub mod json_parsing;
pub mod policy_run;
pub mod policy_eval;
pub mod policy_compare;
pub mod scan_weight;


pub const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let start_time = Instant::now();
    let opt = CmdOption::from_args();
    match opt{
        CmdOption::PolicyRun(o) => o.execute(),
        CmdOption::PolicyEval(o) => o.execute(),
        CmdOption::PolicyCompare(o) => o.execute(),
        CmdOption::ScanWeight(o) => o.execute()
    }
    println!("Execution took {}",humantime::format_duration(start_time.elapsed()))

}

pub fn indication_bar(len: u64) -> ProgressBar
{
        // for indication on when it is finished
        let bar = ProgressBar::new(len);
        bar.set_style(ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise} - {eta_precise}] {wide_bar}"));
        bar
}


#[derive(Debug, StructOpt, Clone)]
#[structopt(about = "Strategy simulations for the Vax epidemic containment game!")]
pub enum CmdOption
{
    PolicyRun(policy_run::PolicyRun),
    PolicyEval(policy_eval::PolicyEval),
    PolicyCompare(policy_compare::PolicyCompare),
    ScanWeight(scan_weight::ScanWeight)
}
