#[derive(Clone, Debug,PartialEq,Eq,Copy)]
pub enum HealthState{
    Susceptible,
    Exposed,
    Infectious,
    Recovered,
    Vaccinated,
    Quarantined,
}

impl HealthState{
    pub fn sus_check(&self) -> bool{
        matches!(self,HealthState::Susceptible)
    }
    pub fn exp_check(&self) -> bool{
        matches!(self,HealthState::Exposed)
    }
    pub fn inf_check(&self) -> bool{
        matches!(self,HealthState::Infectious)
    }
    pub fn rec_check(&self) -> bool{
        matches!(self,HealthState::Recovered)
    }

    /// Exposed or infectious, i.e. the node still drives the outbreak.
    pub fn active_case(&self) -> bool
    {
        matches!(self, Self::Exposed | Self::Infectious)
    }

    pub fn ever_infected(&self) -> bool
    {
        matches!(self, Self::Exposed | Self::Infectious | Self::Recovered)
    }

    pub fn never_infected(&self) -> bool
    {
        matches!(self, Self::Susceptible | Self::Vaccinated | Self::Quarantined)
    }

    /// Vaccinated and quarantined nodes keep their record but lose all edges.
    pub fn removed_from_contact(&self) -> bool
    {
        matches!(self, Self::Vaccinated | Self::Quarantined)
    }

    /// Statuses only ever move along S -> (V | Q | E -> I -> R).
    /// Direct S -> I covers index cases and the no-latency mode.
    pub fn may_become(&self, next: HealthState) -> bool
    {
        matches!(
            (self, next),
            (Self::Susceptible, Self::Exposed)
            | (Self::Susceptible, Self::Infectious)
            | (Self::Susceptible, Self::Vaccinated)
            | (Self::Susceptible, Self::Quarantined)
            | (Self::Exposed, Self::Infectious)
            | (Self::Infectious, Self::Recovered)
        )
    }
}

impl Default for HealthState{
    fn default() -> Self{
        HealthState::Susceptible
    }
}
