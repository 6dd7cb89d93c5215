use{
    rand::Rng,
    rand::distributions::{Distribution, Uniform},
    serde::{Serialize, Deserialize},
    crate::misc_types::*,
    crate::vax_model::*,
};

/// How the vaccination budget gets spent before the outbreak.
#[derive(Serialize, Deserialize, Clone, Debug, Copy, PartialEq)]
pub enum VaccinePolicy{
    /// Highest-degree susceptible non-refuser, first index on ties.
    HighestDegree,
    /// Uniform over the eligible nodes.
    Random,
}

impl Default for VaccinePolicy{
    fn default() -> Self{
        VaccinePolicy::HighestDegree
    }
}

impl VaccinePolicy{
    pub fn choose<R: Rng>(&self, graph: &ContactGraph, rng: &mut R) -> Result<usize, VaxError>{
        match self{
            VaccinePolicy::HighestDegree => choose_highest_degree(graph),
            VaccinePolicy::Random => choose_random_vaccination(graph, rng),
        }
    }

    pub fn name(&self) -> String{
        match self{
            VaccinePolicy::HighestDegree => "VacDeg".to_owned(),
            VaccinePolicy::Random => "VacRand".to_owned(),
        }
    }
}

/// Which susceptible node gets quarantined each round.
#[derive(Serialize, Deserialize, Clone, Debug, Copy, PartialEq)]
pub enum QuarantinePolicy{
    /// Scores each susceptible by infectious neighbors plus a degree
    /// term, weight times degree, and takes the best.
    NearbySick(f64),
    /// Uniform over the susceptibles.
    Random,
}

impl Default for QuarantinePolicy{
    fn default() -> Self{
        QuarantinePolicy::NearbySick(DEFAULT_NEARBY_WEIGHT)
    }
}

impl QuarantinePolicy{
    pub fn choose<R: Rng>(&self, graph: &ContactGraph, rng: &mut R) -> Result<usize, VaxError>{
        match self{
            QuarantinePolicy::NearbySick(weight) => choose_nearby_sick(graph, *weight),
            QuarantinePolicy::Random => choose_random_quarantine(graph, rng),
        }
    }

    pub fn name(&self) -> String{
        match self{
            QuarantinePolicy::NearbySick(weight) => format!("QNear{}", weight),
            QuarantinePolicy::Random => "QRand".to_owned(),
        }
    }
}

/// A full way of playing: one vaccination policy, one quarantine policy.
#[derive(Serialize, Deserialize, Clone, Debug, Copy, PartialEq)]
pub struct GameStrategy{
    pub vaccine: VaccinePolicy,
    pub quarantine: QuarantinePolicy,
}

impl Default for GameStrategy{
    fn default() -> Self{
        Self{
            vaccine: VaccinePolicy::default(),
            quarantine: QuarantinePolicy::default(),
        }
    }
}

impl GameStrategy{
    pub fn degree_then_nearby(weight: f64) -> Self{
        Self{
            vaccine: VaccinePolicy::HighestDegree,
            quarantine: QuarantinePolicy::NearbySick(weight),
        }
    }

    pub fn degree_then_random() -> Self{
        Self{
            vaccine: VaccinePolicy::HighestDegree,
            quarantine: QuarantinePolicy::Random,
        }
    }

    pub fn fully_random() -> Self{
        Self{
            vaccine: VaccinePolicy::Random,
            quarantine: QuarantinePolicy::Random,
        }
    }

    pub fn name(&self) -> String{
        format!("{}_{}", self.vaccine.name(), self.quarantine.name())
    }
}

pub fn choose_highest_degree(graph: &ContactGraph) -> Result<usize, VaxError>{
    let mut best_index = None;
    let mut best_degree = 0;
    for (index, node) in graph.nodes().iter().enumerate(){
        if !node.status.sus_check() || node.refuser{
            continue;
        }
        let degree = graph.degree_of(index);
        if best_index.is_none() || degree > best_degree{
            best_index = Some(index);
            best_degree = degree;
        }
    }
    match best_index{
        Some(index) => Ok(index),
        None => {
            if graph.nodes().iter().all(|node| node.refuser){
                Err(VaxError::AllNodesRefusers)
            } else {
                Err(VaxError::NoEligibleNode)
            }
        }
    }
}

pub fn choose_nearby_sick(graph: &ContactGraph, weight: f64) -> Result<usize, VaxError>{
    let mut best_index = None;
    let mut best_score = 0.0;
    for (index, node) in graph.nodes().iter().enumerate(){
        if !node.status.sus_check(){
            continue;
        }
        let score = graph.infectious_neighbor_count(index) as f64
            + weight * graph.degree_of(index) as f64;
        if best_index.is_none() || score > best_score{
            best_index = Some(index);
            best_score = score;
        }
    }
    best_index.ok_or(VaxError::NoEligibleNode)
}

pub fn choose_random_vaccination<R: Rng>(graph: &ContactGraph, rng: &mut R) -> Result<usize, VaxError>{
    let any_eligible = graph.nodes()
        .iter()
        .any(|node| node.status.sus_check() && !node.refuser);
    if !any_eligible{
        return if graph.nodes().iter().all(|node| node.refuser){
            Err(VaxError::AllNodesRefusers)
        } else {
            Err(VaxError::NoEligibleNode)
        };
    }
    let node_dist = Uniform::new(0, graph.vertex_count());
    loop{
        let index = node_dist.sample(rng);
        let node = graph.node(index);
        if node.status.sus_check() && !node.refuser{
            return Ok(index);
        }
    }
}

pub fn choose_random_quarantine<R: Rng>(graph: &ContactGraph, rng: &mut R) -> Result<usize, VaxError>{
    let any_eligible = graph.nodes()
        .iter()
        .any(|node| node.status.sus_check());
    if !any_eligible{
        return Err(VaxError::NoEligibleNode);
    }
    let node_dist = Uniform::new(0, graph.vertex_count());
    loop{
        let index = node_dist.sample(rng);
        if graph.node(index).status.sus_check(){
            return Ok(index);
        }
    }
}

#[cfg(test)]
mod tests{
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn hub_graph() -> ContactGraph{
        // node 0 touches everyone, plus one 1-2 edge
        let mut graph = ContactGraph::new(5);
        for other in 1..5{
            assert!(graph.add_edge(0, other));
        }
        assert!(graph.add_edge(1, 2));
        graph
    }

    #[test]
    fn highest_degree_takes_the_hub(){
        let graph = hub_graph();
        assert_eq!(choose_highest_degree(&graph), Ok(0));
    }

    #[test]
    fn highest_degree_skips_refusers_and_breaks_ties_low(){
        let mut graph = hub_graph();
        graph.node_mut(0).refuser = true;
        // 1 and 2 tie on degree 2, first index wins
        assert_eq!(choose_highest_degree(&graph), Ok(1));
    }

    #[test]
    fn highest_degree_skips_non_susceptibles(){
        let mut graph = hub_graph();
        graph.node_mut(0).status = HealthState::Vaccinated;
        graph.node_mut(1).status = HealthState::Infectious;
        assert_eq!(choose_highest_degree(&graph), Ok(2));
    }

    #[test]
    fn full_refusal_is_its_own_error(){
        let mut graph = hub_graph();
        for index in 0..graph.vertex_count(){
            graph.node_mut(index).refuser = true;
        }
        assert_eq!(choose_highest_degree(&graph), Err(VaxError::AllNodesRefusers));
        let mut rng = Pcg64::seed_from_u64(1);
        assert_eq!(
            choose_random_vaccination(&graph, &mut rng),
            Err(VaxError::AllNodesRefusers)
        );
    }

    #[test]
    fn no_susceptibles_left_is_no_eligible_node(){
        let mut graph = hub_graph();
        for index in 0..graph.vertex_count(){
            graph.node_mut(index).status = HealthState::Recovered;
        }
        assert_eq!(choose_highest_degree(&graph), Err(VaxError::NoEligibleNode));
        assert_eq!(choose_nearby_sick(&graph, 0.5), Err(VaxError::NoEligibleNode));
        let mut rng = Pcg64::seed_from_u64(1);
        assert_eq!(
            choose_random_quarantine(&graph, &mut rng),
            Err(VaxError::NoEligibleNode)
        );
    }

    #[test]
    fn nearby_sick_hugs_the_infection_front(){
        // path 0-1-2-3, node 3 sick: only 2 borders it
        let mut graph = ContactGraph::new(4);
        assert!(graph.add_edge(0, 1));
        assert!(graph.add_edge(1, 2));
        assert!(graph.add_edge(2, 3));
        graph.node_mut(3).status = HealthState::Infectious;
        assert_eq!(choose_nearby_sick(&graph, 0.0), Ok(2));
    }

    #[test]
    fn nearby_sick_weight_breaks_ties_by_degree(){
        // 0 and 1 both border the sick node 4, but 1 has an extra edge
        let mut graph = ContactGraph::new(5);
        assert!(graph.add_edge(0, 4));
        assert!(graph.add_edge(1, 4));
        assert!(graph.add_edge(1, 2));
        graph.node_mut(4).status = HealthState::Infectious;
        assert_eq!(choose_nearby_sick(&graph, 0.5), Ok(1));
        // without the degree term the tie stays with the first index
        assert_eq!(choose_nearby_sick(&graph, 0.0), Ok(0));
    }

    #[test]
    fn exposed_neighbors_do_not_count_as_sick(){
        let mut graph = ContactGraph::new(3);
        assert!(graph.add_edge(0, 1));
        assert!(graph.add_edge(1, 2));
        graph.node_mut(0).status = HealthState::Exposed;
        // no infectious anywhere: scores tie at 0, first susceptible wins
        assert_eq!(choose_nearby_sick(&graph, 0.0), Ok(1));
    }

    #[test]
    fn random_draws_land_on_the_only_eligible_node(){
        let mut graph = hub_graph();
        for index in 0..graph.vertex_count(){
            if index != 3{
                graph.node_mut(index).refuser = true;
            }
        }
        graph.node_mut(1).status = HealthState::Recovered;
        let mut rng = Pcg64::seed_from_u64(8127);
        for _ in 0..20{
            assert_eq!(choose_random_vaccination(&graph, &mut rng), Ok(3));
        }
        // quarantine ignores refuser flags
        let mut only_sus = ContactGraph::new(4);
        for index in [0, 1, 3]{
            only_sus.node_mut(index).status = HealthState::Quarantined;
        }
        for _ in 0..20{
            assert_eq!(choose_random_quarantine(&only_sus, &mut rng), Ok(2));
        }
    }

    #[test]
    fn strategy_names_are_filename_friendly(){
        assert_eq!(GameStrategy::degree_then_nearby(0.5).name(), "VacDeg_QNear0.5");
        assert_eq!(GameStrategy::degree_then_nearby(0.0).name(), "VacDeg_QNear0");
        assert_eq!(GameStrategy::degree_then_random().name(), "VacDeg_QRand");
        assert_eq!(GameStrategy::fully_random().name(), "VacRand_QRand");
        assert_eq!(GameStrategy::default().name(), "VacDeg_QNear0.5");
    }

    #[test]
    fn strategy_dispatch_matches_the_free_functions(){
        let mut graph = hub_graph();
        graph.node_mut(4).status = HealthState::Infectious;
        let mut rng = Pcg64::seed_from_u64(3);
        let strategy = GameStrategy::degree_then_nearby(0.001);
        assert_eq!(
            strategy.vaccine.choose(&graph, &mut rng),
            choose_highest_degree(&graph)
        );
        assert_eq!(
            strategy.quarantine.choose(&graph, &mut rng),
            choose_nearby_sick(&graph, 0.001)
        );
    }
}
