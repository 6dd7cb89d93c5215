use std::fmt::Display;

use{
    super::*,
    structopt::StructOpt,
    std::num::*,
    crate::json_parsing::*,
    serde::{Serialize, Deserialize},
    serde_json::Value,

    crate::misc_types::*,
    crate::strategies::*,
};



#[derive(Debug, StructOpt, Clone)]
///Scan the degree weight of the nearby-sick quarantine policy
pub struct ScanWeight{
    #[structopt(long)]
    json: Option<String>,

    #[structopt(long)]
    num_threads:Option<NonZeroUsize>
}

impl ScanWeight{
    pub fn parse(&self) -> (ScanWeightParams, Value){
        parse(self.json.as_ref())
    }
    pub fn execute(&self){
        let (opt, json) = self.parse();
        run_simulation(opt,json,self.num_threads)
    }
}


#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ScanWeightParams{
    pub scenario: GameScenario,
    pub vaccine: VaccinePolicy,
    pub weight_range: F64RangeBuilder,
    pub trials_per_step: usize,
    pub graph_seed: u64,
    pub sim_seed: u64,
}

impl Default for ScanWeightParams{
    fn default() -> Self{
        let weight_range_def = F64RangeBuilder{
            start: 0.0,
            end: 1.0,
            steps: NonZeroUsize::new(20).unwrap()
        };
        Self{
            scenario: GameScenario::medium(),
            vaccine: VaccinePolicy::HighestDegree,
            weight_range: weight_range_def,
            trials_per_step: DEFAULT_TRIALS_PER_STEP,
            graph_seed: DEFAULT_GRAPH_SEED,
            sim_seed: DEFAULT_SIM_SEED
        }
    }
}

impl ScanWeightParams{
    pub fn name<E>(&self, file_ending:E , num_threads:Option<NonZeroUsize>) -> String where E:Display{
        let k = match num_threads{
            None => "".to_owned(),
            Some(v) => format!("k{}",v)
        };
        format!(
            "ver{}ScanWeight_{}_{}_w{}-{}-{}_TrialsStep{}_GSeed{}_SS{}{}.{}",
            crate::VERSION,
            self.vaccine.name(),
            self.scenario.name(),
            self.weight_range.start,
            self.weight_range.end,
            self.weight_range.steps,
            self.trials_per_step,
            self.graph_seed,
            self.sim_seed,
            k,
            file_ending
        )
    }
}
