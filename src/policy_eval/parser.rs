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
///Estimate the mean score of one strategy over many trials
pub struct PolicyEval{
    #[structopt(long)]
    json: Option<String>,

    #[structopt(long)]
    num_threads:Option<NonZeroUsize>
}

impl PolicyEval{
    pub fn parse(&self) -> (PolicyEvalParams, Value){
        parse(self.json.as_ref())
    }
    pub fn execute(&self){
        let (opt, json) = self.parse();
        run_simulation(opt,json,self.num_threads)
    }
}


#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PolicyEvalParams{
    pub scenario: GameScenario,
    pub strategy: GameStrategy,
    pub trials: usize,
    pub graph_seed: u64,
    pub sim_seed: u64,
}

impl Default for PolicyEvalParams{
    fn default() -> Self{
        Self{
            scenario: GameScenario::medium(),
            strategy: GameStrategy::default(),
            trials: DEFAULT_TRIALS,
            graph_seed: DEFAULT_GRAPH_SEED,
            sim_seed: DEFAULT_SIM_SEED
        }
    }
}

impl PolicyEvalParams{
    pub fn name<E>(&self, file_ending:E , num_threads:Option<NonZeroUsize>) -> String where E:Display{
        let k = match num_threads{
            None => "".to_owned(),
            Some(v) => format!("k{}",v)
        };
        format!(
            "ver{}PolicyEval_{}_{}_Trials{}_GSeed{}_SS{}{}.{}",
            crate::VERSION,
            self.strategy.name(),
            self.scenario.name(),
            self.trials,
            self.graph_seed,
            self.sim_seed,
            k,
            file_ending
        )
    }
}
