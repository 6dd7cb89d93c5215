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
///Run two strategies on the same setup and test the score difference
pub struct PolicyCompare{
    #[structopt(long)]
    json: Option<String>,

    #[structopt(long)]
    num_threads:Option<NonZeroUsize>
}

impl PolicyCompare{
    pub fn parse(&self) -> (PolicyCompareParams, Value){
        parse(self.json.as_ref())
    }
    pub fn execute(&self){
        let (opt, json) = self.parse();
        run_simulation(opt,json,self.num_threads)
    }
}


#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PolicyCompareParams{
    pub scenario: GameScenario,
    pub strategy_a: GameStrategy,
    pub strategy_b: GameStrategy,
    pub trials: usize,
    pub graph_seed: u64,
    pub sim_seed: u64,
}

impl Default for PolicyCompareParams{
    fn default() -> Self{
        Self{
            scenario: GameScenario::medium(),
            strategy_a: GameStrategy::default(),
            strategy_b: GameStrategy::fully_random(),
            trials: DEFAULT_TRIALS,
            graph_seed: DEFAULT_GRAPH_SEED,
            sim_seed: DEFAULT_SIM_SEED
        }
    }
}

impl PolicyCompareParams{
    pub fn name<E>(&self, file_ending:E , num_threads:Option<NonZeroUsize>) -> String where E:Display{
        let k = match num_threads{
            None => "".to_owned(),
            Some(v) => format!("k{}",v)
        };
        format!(
            "ver{}PolicyComp_{}_vs_{}_{}_Trials{}_GSeed{}_SS{}{}.{}",
            crate::VERSION,
            self.strategy_a.name(),
            self.strategy_b.name(),
            self.scenario.name(),
            self.trials,
            self.graph_seed,
            self.sim_seed,
            k,
            file_ending
        )
    }
}
