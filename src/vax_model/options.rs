use{
    std::num::*,
    serde::{Serialize, Deserialize},
    crate::misc_types::*,
    crate::policy_run::*,
    crate::policy_eval::*,
    crate::policy_compare::*,
    crate::scan_weight::*,
};

/// Everything a `VaxModel` needs, flattened out of the subcommand
/// parameter structs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaxOptions{
    pub graph_seed: u64,
    pub system_size: NonZeroUsize,
    pub mean_degree: NonZeroUsize,
    pub rewire_prob: f64,
    pub transmission_rate: f64,
    pub recovery_rate: f64,
    pub vaccine_budget: usize,
    pub index_cases: usize,
    pub refuser_fraction: f64,
    pub latency: bool,
}

impl Default for VaxOptions{
    fn default() -> Self{
        Self::from_scenario(&GameScenario::default(), DEFAULT_GRAPH_SEED)
    }
}

impl VaxOptions{
    pub fn from_scenario(scenario: &GameScenario, graph_seed: u64) -> Self{
        Self{
            graph_seed,
            system_size: scenario.system_size,
            mean_degree: scenario.mean_degree,
            rewire_prob: scenario.rewire_prob,
            transmission_rate: scenario.transmission_rate,
            recovery_rate: scenario.recovery_rate,
            vaccine_budget: scenario.vaccine_budget,
            index_cases: scenario.index_cases,
            refuser_fraction: scenario.refuser_fraction,
            latency: scenario.latency,
        }
    }

    pub fn from_policy_run_param(param: &PolicyRunParams) -> Self{
        Self::from_scenario(&param.scenario, param.graph_seed)
    }

    pub fn from_policy_eval_param(param: &PolicyEvalParams) -> Self{
        Self::from_scenario(&param.scenario, param.graph_seed)
    }

    pub fn from_policy_compare_param(param: &PolicyCompareParams) -> Self{
        Self::from_scenario(&param.scenario, param.graph_seed)
    }

    pub fn from_weight_scan_param(param: &ScanWeightParams) -> Self{
        Self::from_scenario(&param.scenario, param.graph_seed)
    }
}
