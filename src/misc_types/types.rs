use{
    serde::{Serialize, Deserialize},

    std::{
        num::*,
    },
};
pub const DEFAULT_GRAPH_SEED: u64 = 875629289;
pub const DEFAULT_SIM_SEED: u64 = 1489264107025;
pub const DEFAULT_TRIALS: usize = 10000;
pub const DEFAULT_TRIALS_PER_STEP: usize = 1000;
pub const ONE: NonZeroUsize = unsafe{NonZeroUsize::new_unchecked(1)};

pub const DEFAULT_REWIRE_PROB: f64 = 0.1;
pub const DEFAULT_NEARBY_WEIGHT: f64 = 0.5;

/// The knobs of one game setup: population, contact structure, disease
/// strength and the player's resources.
#[derive(Serialize, Deserialize, Clone, Debug, Copy)]
pub struct GameScenario
{
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

impl Default for GameScenario{
    fn default() -> Self
    {
        Self::medium()
    }
}

impl GameScenario{
    pub fn easy() -> Self
    {
        Self{
            system_size: NonZeroUsize::new(50).unwrap(),
            mean_degree: NonZeroUsize::new(3).unwrap(),
            rewire_prob: DEFAULT_REWIRE_PROB,
            transmission_rate: 0.7,
            recovery_rate: 0.0,
            vaccine_budget: 5,
            index_cases: 1,
            refuser_fraction: 0.0,
            latency: true,
        }
    }

    pub fn medium() -> Self
    {
        Self{
            system_size: NonZeroUsize::new(75).unwrap(),
            mean_degree: NonZeroUsize::new(4).unwrap(),
            rewire_prob: DEFAULT_REWIRE_PROB,
            transmission_rate: 0.7,
            recovery_rate: 0.0,
            vaccine_budget: 7,
            index_cases: 2,
            refuser_fraction: 0.0,
            latency: true,
        }
    }

    pub fn hard() -> Self
    {
        Self{
            system_size: NonZeroUsize::new(100).unwrap(),
            mean_degree: NonZeroUsize::new(4).unwrap(),
            rewire_prob: DEFAULT_REWIRE_PROB,
            transmission_rate: 0.4,
            recovery_rate: 0.0,
            vaccine_budget: 15,
            index_cases: 3,
            refuser_fraction: 0.05,
            latency: true,
        }
    }

    pub fn custom() -> Self
    {
        Self{
            system_size: NonZeroUsize::new(75).unwrap(),
            mean_degree: NonZeroUsize::new(3).unwrap(),
            rewire_prob: DEFAULT_REWIRE_PROB,
            transmission_rate: 0.5,
            recovery_rate: 0.0,
            vaccine_budget: 10,
            index_cases: 2,
            refuser_fraction: 0.05,
            latency: true,
        }
    }

    pub fn name(&self) -> String
    {
        format!(
            "N{}c{}rw{}t{}g{}v{}o{}ref{}lat{}",
            self.system_size,
            self.mean_degree,
            self.rewire_prob,
            self.transmission_rate,
            self.recovery_rate,
            self.vaccine_budget,
            self.index_cases,
            self.refuser_fraction,
            self.latency as u8
        )
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct F64RangeBuilder
{
    pub start: f64,
    pub end: f64,
    pub steps: NonZeroUsize
}

impl F64RangeBuilder{
    pub fn get_range(&self) -> Vec<f64>
    {
        let steps = self.steps.get();
        if steps == 1{
            return vec![self.start];
        }
        let delta = (self.end - self.start) / (steps - 1) as f64;
        (0..steps)
            .map(|i| self.start + delta * i as f64)
            .collect()
    }
}
