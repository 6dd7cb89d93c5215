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
///Play a single game with a fixed strategy and record its curves
pub struct PolicyRun{
    #[structopt(long)]
    json: Option<String>,

    #[structopt(long)]
    num_threads:Option<NonZeroUsize>
}

impl PolicyRun{
    pub fn parse(&self) -> (PolicyRunParams, Value){
        parse(self.json.as_ref())
    }
    pub fn execute(&self){
        let (opt, json) = self.parse();
        run_simulation(opt,json,self.num_threads)
    }
}


#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PolicyRunParams{
    pub scenario: GameScenario,
    pub strategy: GameStrategy,
    pub graph_seed: u64,
    pub sim_seed: u64,
}

impl Default for PolicyRunParams{
    fn default() -> Self{
        Self{
            scenario: GameScenario::medium(),
            strategy: GameStrategy::default(),
            graph_seed: DEFAULT_GRAPH_SEED,
            sim_seed: DEFAULT_SIM_SEED
        }
    }
}

impl PolicyRunParams{
    pub fn name<E>(&self, file_ending:E , num_threads:Option<NonZeroUsize>) -> String where E:Display{
        let k = match num_threads{
            None => "".to_owned(),
            Some(v) => format!("k{}",v)
        };
        format!(
            "ver{}PolicyRun_{}_{}_GSeed{}_SS{}{}.{}",
            crate::VERSION,
            self.strategy.name(),
            self.scenario.name(),
            self.graph_seed,
            self.sim_seed,
            k,
            file_ending
        )
    }
}
