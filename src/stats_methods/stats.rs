//mean, spread and the two-strategy t statistic for trial outcomes.

/// Mean, sample standard deviation and sample count of one batch of
/// trial outcomes.
#[derive(Debug, Clone, Copy)]
pub struct TrialStats
{
    pub mean: f64,
    pub sd: f64,
    pub n: usize
}

impl TrialStats{

    pub fn mean(&self) -> f64
    {
        self.mean
    }

    pub fn sd(&self) -> f64
    {
        self.sd
    }

    pub fn standard_error(&self) -> f64
    {
        self.sd / (self.n as f64).sqrt()
    }

    pub fn from_slice(outcomes: &[f64]) -> Self
    {
        let mean = calc_mean(outcomes);
        let sd = calc_sample_sd(outcomes, mean);
        Self{
            mean,
            sd,
            n: outcomes.len()
        }
    }
}

pub fn calc_mean(data: &[f64]) -> f64
{
    data.iter().sum::<f64>() / data.len() as f64
}

//sample standard deviation, n - 1 denominator. Zero below two samples.
pub fn calc_sample_sd(data: &[f64], mean: f64) -> f64
{
    if data.len() < 2{
        return 0.0;
    }
    let mut var_sum = 0.0;
    for &val in data{
        let dif = val - mean;
        var_sum += dif * dif;
    }
    (var_sum / (data.len() - 1) as f64).sqrt()
}

//Welch's t statistic for two independent outcome batches.
pub fn welch_t(a: &TrialStats, b: &TrialStats) -> f64
{
    let var_term = a.sd * a.sd / a.n as f64 + b.sd * b.sd / b.n as f64;
    (a.mean - b.mean) / var_term.sqrt()
}
