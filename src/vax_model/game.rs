use{
    std::ops::{Deref, DerefMut},
    std::io::Write,
    rand::Rng,
    rand::SeedableRng,
    rand::distributions::{Distribution, Uniform},
    rand_pcg::Pcg64,
    super::*,
    crate::strategies::*,
};

/// One running game: the contact network, the disease parameters and all
/// per-round state. Construction goes through `TryFrom<&VaxOptions>` so
/// broken topology parameters surface before anything is simulated.
#[derive(Clone)]
pub struct VaxModel{
    pub graph: ContactGraph,
    pub n: usize,
    transmission_rate: f64,
    recovery_rate: f64,
    latency: bool,
    vaccines_remaining: usize,
    index_cases: usize,
    number_vaccinated: usize,
    number_quarantined: usize,
    time_step: u32,
    outbreak_seeded: bool,
    halted: bool,
    infectious_list: Vec<usize>,
    exposed_list: Vec<usize>,
    new_infectious_list: Vec<usize>,
    newly_infected: Vec<usize>,
    transmission_pairs: Vec<[usize; 2]>,
    num_groups: usize,
}

impl TryFrom<&VaxOptions> for VaxModel{
    type Error = VaxError;

    fn try_from(opt: &VaxOptions) -> Result<Self, VaxError>{
        let mut graph_rng = Pcg64::seed_from_u64(opt.graph_seed);
        let graph = generate_contact_network(
            opt.system_size.get(),
            opt.mean_degree.get(),
            opt.rewire_prob,
            &mut graph_rng,
        )?;
        let mut model = Self{
            n: opt.system_size.get(),
            graph,
            transmission_rate: opt.transmission_rate,
            recovery_rate: opt.recovery_rate,
            latency: opt.latency,
            vaccines_remaining: opt.vaccine_budget,
            index_cases: opt.index_cases,
            number_vaccinated: 0,
            number_quarantined: 0,
            time_step: 0,
            outbreak_seeded: false,
            halted: false,
            infectious_list: Vec::new(),
            exposed_list: Vec::new(),
            new_infectious_list: Vec::new(),
            newly_infected: Vec::new(),
            transmission_pairs: Vec::new(),
            num_groups: 0,
        };
        let (_, count) = update_groups(&mut model.graph);
        model.num_groups = count;
        Ok(model)
    }
}

impl VaxModel{
    /// Flags each node as a refuser with the given probability. If the
    /// whole population came out refusing, node 0 is unflagged and the
    /// budget degrades to a single dose so a game remains playable.
    pub fn seed_refusers(&mut self, fraction: f64, rng: &mut Pcg64){
        let prob_dist = Uniform::new_inclusive(0.0, 1.0);
        for index in 0..self.n{
            self.graph.node_mut(index).refuser = prob_dist.sample(rng) < fraction;
        }
        if self.graph.nodes().iter().all(|node| node.refuser){
            self.graph.node_mut(0).refuser = false;
            self.vaccines_remaining = 1;
        }
    }

    /// Vaccination is only possible before the outbreak is seeded and
    /// while doses are left. Returns whether the dose was spent.
    pub fn apply_vaccination(&mut self, index: usize) -> bool{
        if self.outbreak_seeded || self.vaccines_remaining == 0{
            return false;
        }
        let node = self.graph.node(index);
        if !node.status.sus_check() || node.refuser{
            return false;
        }
        self.set_status(index, HealthState::Vaccinated);
        self.graph.isolate_node(index);
        self.vaccines_remaining -= 1;
        self.number_vaccinated += 1;
        true
    }

    pub fn apply_quarantine(&mut self, index: usize) -> bool{
        if !self.graph.node(index).status.sus_check(){
            return false;
        }
        self.set_status(index, HealthState::Quarantined);
        self.graph.isolate_node(index);
        self.number_quarantined += 1;
        true
    }

    /// Turns up to `index_cases` susceptible nodes infectious. Seeds
    /// fewer when the population has run out of susceptibles, possibly
    /// zero, in which case the game is already over.
    pub fn seed_index_cases(&mut self, rng: &mut Pcg64) -> usize{
        let available = self.graph.nodes()
            .iter()
            .filter(|node| node.status.sus_check())
            .count();
        let wanted = self.index_cases.min(available);
        let node_dist = Uniform::new(0, self.n);
        let mut seeded = 0;
        while seeded < wanted{
            let index = node_dist.sample(rng);
            if self.graph.node(index).status.sus_check(){
                let time_step = self.time_step;
                let node = self.graph.node_mut(index);
                node.status = HealthState::Infectious;
                node.exposure_time_step = Some(time_step);
                node.infected_by = Some(InfectionSource::IndexCase);
                self.infectious_list.push(index);
                seeded += 1;
            }
        }
        self.outbreak_seeded = true;
        self.detect_completion();
        seeded
    }

    /// One round of the epidemic: exposed nodes from earlier rounds turn
    /// infectious, the infectious roll against every susceptible live
    /// neighbor, then recovery. Fresh cases neither transmit nor recover
    /// in the round that created them. Returns the nodes infected this
    /// round.
    pub fn advance_tick(&mut self, rng: &mut Pcg64) -> &[usize]{
        debug_assert!(self.new_infectious_list.is_empty());
        self.newly_infected.clear();
        self.transmission_pairs.clear();

        let promoted = std::mem::take(&mut self.exposed_list);
        for index in promoted{
            debug_assert!(
                matches!(self.graph.node(index).exposure_time_step, Some(t) if t < self.time_step)
            );
            self.set_status(index, HealthState::Infectious);
            self.infectious_list.push(index);
        }

        let prob_dist = Uniform::new_inclusive(0.0, 1.0);
        let transmission_rate = self.transmission_rate;

        for pos in 0..self.infectious_list.len(){
            let index = self.infectious_list[pos];
            let neighbors = self.graph.neighbors_of(index).to_vec();
            for n_index in neighbors{
                if !self.graph.node(n_index).status.sus_check(){
                    continue;
                }
                if prob_dist.sample(rng) < transmission_rate{
                    self.infect(n_index, index);
                }
            }
        }

        for i in (0..self.infectious_list.len()).rev(){
            if prob_dist.sample(rng) < self.recovery_rate{
                let removed_index = self.infectious_list.swap_remove(i);
                self.set_status(removed_index, HealthState::Recovered);
            }
        }
        self.infectious_list.append(&mut self.new_infectious_list);

        self.time_step += 1;
        self.detect_completion();
        &self.newly_infected
    }

    fn infect(&mut self, n_index: usize, source: usize){
        let next = if self.latency{
            HealthState::Exposed
        } else {
            HealthState::Infectious
        };
        let time_step = self.time_step;
        let node = self.graph.node_mut(n_index);
        debug_assert!(node.status.may_become(next));
        node.status = next;
        node.exposure_time_step = Some(time_step);
        node.infected_by = Some(InfectionSource::Contact(source));
        self.newly_infected.push(n_index);
        self.transmission_pairs.push([source, n_index]);
        if self.latency{
            self.exposed_list.push(n_index);
        } else {
            self.new_infectious_list.push(n_index);
        }
    }

    fn set_status(&mut self, index: usize, next: HealthState){
        let node = self.graph.node_mut(index);
        debug_assert!(node.status.may_become(next));
        node.status = next;
    }

    /// Recomputes the components and the at-risk verdict. Does nothing
    /// before seeding: during the vaccination phase the predicate would
    /// hold vacuously.
    pub fn detect_completion(&mut self){
        if !self.outbreak_seeded{
            return;
        }
        let (labels, count) = update_groups(&mut self.graph);
        self.num_groups = count;
        self.halted = at_risk_components(&self.graph, &labels, count) == 0;
    }

    pub fn epidemic_over(&self) -> bool{
        self.halted
    }

    pub fn time_step(&self) -> u32{
        self.time_step
    }

    pub fn vaccines_remaining(&self) -> usize{
        self.vaccines_remaining
    }

    pub fn number_vaccinated(&self) -> usize{
        self.number_vaccinated
    }

    pub fn number_quarantined(&self) -> usize{
        self.number_quarantined
    }

    pub fn num_groups(&self) -> usize{
        self.num_groups
    }

    pub fn infectious_count(&self) -> usize{
        self.infectious_list.len()
    }

    pub fn newly_infected(&self) -> &[usize]{
        &self.newly_infected
    }

    /// The transmitter/receiver pairs of the last round, for callers
    /// drawing exposure chains.
    pub fn transmission_pairs(&self) -> &[[usize; 2]]{
        &self.transmission_pairs
    }

    pub fn count_with(&self, status: HealthState) -> usize{
        self.graph.nodes()
            .iter()
            .filter(|node| node.status == status)
            .count()
    }

    pub fn calculate_ever_infected(&self) -> usize{
        self.graph.nodes()
            .iter()
            .filter(|node| node.status.ever_infected())
            .count()
    }

    pub fn never_infected_count(&self) -> usize{
        self.graph.nodes()
            .iter()
            .filter(|node| node.status.never_infected())
            .count()
    }

    /// Fraction of the population the outbreak never reached.
    pub fn score_fraction(&self) -> f64{
        self.never_infected_count() as f64 / self.n as f64
    }

    pub fn final_tally(&self) -> GameTally{
        let mut tally = GameTally{
            uninfected: 0,
            vaccinated: 0,
            quarantined: 0,
            infected: 0,
        };
        for node in self.graph.nodes(){
            match node.status{
                HealthState::Susceptible => tally.uninfected += 1,
                HealthState::Vaccinated => tally.vaccinated += 1,
                HealthState::Quarantined => tally.quarantined += 1,
                _ => tally.infected += 1,
            }
        }
        tally
    }
}

/// End-of-game breakdown backing the result screen.
#[derive(Clone, Debug, PartialEq, Eq, Copy)]
pub struct GameTally{
    pub uninfected: usize,
    pub vaccinated: usize,
    pub quarantined: usize,
    pub infected: usize,
}

/// A model plus the two random number streams driving it: one for the
/// per-trial topologies, one for refusers, seeding, transmission and the
/// random policies. Repeated trials draw a fresh graph seed each time.
#[derive(Clone)]
pub struct GameSample{
    base_options: VaxOptions,
    model: VaxModel,
    graph_rng: Pcg64,
    sim_rng: Pcg64,
}

impl Deref for GameSample{
    type Target = VaxModel;
    fn deref(&self) -> &Self::Target{
        &self.model
    }
}

impl DerefMut for GameSample{
    fn deref_mut(&mut self) -> &mut Self::Target{
        &mut self.model
    }
}

impl GameSample{
    pub fn from_options(base_options: VaxOptions, sim_seed: u64) -> Result<Self, VaxError>{
        let graph_rng = Pcg64::seed_from_u64(base_options.graph_seed);
        let sim_rng = Pcg64::seed_from_u64(sim_seed);
        let model = VaxModel::try_from(&base_options)?;
        Ok(Self{
            base_options,
            model,
            graph_rng,
            sim_rng,
        })
    }

    pub fn reseed_rngs(&mut self, rng: &mut Pcg64){
        self.graph_rng = Pcg64::from_rng(&mut *rng).unwrap();
        self.sim_rng = Pcg64::from_rng(rng).unwrap();
    }

    /// Replaces the model with one built on a newly drawn graph seed.
    /// Construction already proved the parameters valid, so this only
    /// fails if they were tampered with since.
    pub fn reset_with_fresh_topology(&mut self) -> Result<(), VaxError>{
        let mut opt = self.base_options.clone();
        opt.graph_seed = self.graph_rng.gen::<u64>();
        self.model = VaxModel::try_from(&opt)?;
        Ok(())
    }

    /// One complete trial: fresh topology, refusers, the vaccination
    /// round, seeding, then quarantine decisions alternating with
    /// epidemic rounds until no component is at risk. Returns the saved
    /// fraction.
    pub fn play_until_completion(&mut self, strategy: &GameStrategy) -> Result<f64, VaxError>{
        self.reset_with_fresh_topology()?;
        let fraction = self.base_options.refuser_fraction;
        self.model.seed_refusers(fraction, &mut self.sim_rng);

        self.vaccination_phase(strategy);
        self.model.seed_index_cases(&mut self.sim_rng);

        while !self.model.epidemic_over(){
            if let Ok(index) = strategy.quarantine.choose(&self.model.graph, &mut self.sim_rng){
                self.model.apply_quarantine(index);
            }
            self.model.advance_tick(&mut self.sim_rng);
        }
        Ok(self.model.score_fraction())
    }

    /// Like `play_until_completion`, but on the already constructed
    /// topology, recording the compartment counts after seeding and
    /// after every round.
    pub fn play_recording_curves(&mut self, strategy: &GameStrategy) -> GameCurves{
        let fraction = self.base_options.refuser_fraction;
        self.model.seed_refusers(fraction, &mut self.sim_rng);

        self.vaccination_phase(strategy);
        let seeded = self.model.seed_index_cases(&mut self.sim_rng);

        let mut curves = GameCurves::default();
        curves.push_row(&self.model, seeded);
        while !self.model.epidemic_over(){
            if let Ok(index) = strategy.quarantine.choose(&self.model.graph, &mut self.sim_rng){
                self.model.apply_quarantine(index);
            }
            self.model.advance_tick(&mut self.sim_rng);
            curves.push_row(&self.model, self.model.newly_infected().len());
        }
        curves
    }

    fn vaccination_phase(&mut self, strategy: &GameStrategy){
        while self.model.vaccines_remaining() > 0{
            match strategy.vaccine.choose(&self.model.graph, &mut self.sim_rng){
                Ok(index) => {
                    let applied = self.model.apply_vaccination(index);
                    debug_assert!(applied);
                }
                Err(_) => break,
            }
        }
    }
}

/// Compartment counts per round of one recorded game.
#[derive(Clone, Debug, Default)]
pub struct GameCurves{
    pub sus: Vec<usize>,
    pub exp: Vec<usize>,
    pub inf: Vec<usize>,
    pub rec: Vec<usize>,
    pub vac: Vec<usize>,
    pub qua: Vec<usize>,
    pub new_cases: Vec<usize>,
}

impl GameCurves{
    fn push_row(&mut self, model: &VaxModel, new_cases: usize){
        self.sus.push(model.count_with(HealthState::Susceptible));
        self.exp.push(model.count_with(HealthState::Exposed));
        self.inf.push(model.count_with(HealthState::Infectious));
        self.rec.push(model.count_with(HealthState::Recovered));
        self.vac.push(model.count_with(HealthState::Vaccinated));
        self.qua.push(model.count_with(HealthState::Quarantined));
        self.new_cases.push(new_cases);
    }

    pub fn len(&self) -> usize{
        self.sus.len()
    }

    pub fn is_empty(&self) -> bool{
        self.sus.is_empty()
    }

    pub fn write<W>(&self, mut writer: W) -> std::io::Result<()>
    where W: Write
    {
        writeln!(writer, "#t sus exp inf rec vac qua new")?;
        for t in 0..self.len(){
            writeln!(
                writer,
                "{} {} {} {} {} {} {} {}",
                t,
                self.sus[t],
                self.exp[t],
                self.inf[t],
                self.rec[t],
                self.vac[t],
                self.qua[t],
                self.new_cases[t]
            )?
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests{
    use super::*;
    use std::num::NonZeroUsize;

    fn ring_options(transmission_rate: f64, latency: bool) -> VaxOptions{
        VaxOptions{
            graph_seed: 96213,
            system_size: NonZeroUsize::new(10).unwrap(),
            mean_degree: NonZeroUsize::new(2).unwrap(),
            rewire_prob: 0.0,
            transmission_rate,
            recovery_rate: 0.0,
            vaccine_budget: 0,
            index_cases: 1,
            refuser_fraction: 0.0,
            latency,
        }
    }

    #[test]
    fn certain_transmission_burns_the_whole_ring(){
        for latency in [false, true]{
            let mut model = VaxModel::try_from(&ring_options(1.0, latency)).unwrap();
            let mut rng = Pcg64::seed_from_u64(4821);
            assert_eq!(model.seed_index_cases(&mut rng), 1);
            assert!(!model.epidemic_over());

            let mut rounds = 0;
            while !model.epidemic_over(){
                model.advance_tick(&mut rng);
                rounds += 1;
                assert!(rounds < 100);
            }
            assert_eq!(model.calculate_ever_infected(), 10);
            assert_eq!(model.count_with(HealthState::Susceptible), 0);
            assert_eq!(model.score_fraction(), 0.0);
            // everyone knows who infected them
            for node in model.graph.nodes(){
                assert!(node.infected_by.is_some());
                assert!(node.exposure_time_step.is_some());
            }
        }
    }

    #[test]
    fn latency_delays_transmission_by_one_round(){
        let mut model = VaxModel::try_from(&ring_options(1.0, true)).unwrap();
        let mut rng = Pcg64::seed_from_u64(4821);
        model.seed_index_cases(&mut rng);

        // round 1: the index case exposes both ring neighbors
        model.advance_tick(&mut rng);
        assert_eq!(model.count_with(HealthState::Exposed), 2);
        assert_eq!(model.infectious_count(), 1);

        // round 2: the exposed promote and expose the next shell
        model.advance_tick(&mut rng);
        assert_eq!(model.infectious_count(), 3);
        assert_eq!(model.count_with(HealthState::Exposed), 2);
    }

    #[test]
    fn direct_mode_never_produces_exposed(){
        let mut model = VaxModel::try_from(&ring_options(1.0, false)).unwrap();
        let mut rng = Pcg64::seed_from_u64(77);
        model.seed_index_cases(&mut rng);
        while !model.epidemic_over(){
            model.advance_tick(&mut rng);
            assert_eq!(model.count_with(HealthState::Exposed), 0);
        }
    }

    #[test]
    fn fresh_cases_do_not_transmit_in_their_round(){
        // direct mode on the ring: infection can move at most one hop
        // per round on each side of the index case
        let mut model = VaxModel::try_from(&ring_options(1.0, false)).unwrap();
        let mut rng = Pcg64::seed_from_u64(5);
        model.seed_index_cases(&mut rng);
        model.advance_tick(&mut rng);
        assert_eq!(model.infectious_count(), 3);
        model.advance_tick(&mut rng);
        assert_eq!(model.infectious_count(), 5);
    }

    #[test]
    fn vaccinating_everyone_saves_everyone(){
        let mut opt = ring_options(1.0, true);
        opt.vaccine_budget = 10;
        let mut model = VaxModel::try_from(&opt).unwrap();
        let mut rng = Pcg64::seed_from_u64(11);
        model.seed_refusers(0.0, &mut rng);
        for index in 0..10{
            assert!(model.apply_vaccination(index));
        }
        assert_eq!(model.vaccines_remaining(), 0);
        assert_eq!(model.seed_index_cases(&mut rng), 0);
        assert!(model.epidemic_over());
        assert_eq!(model.score_fraction(), 1.0);
        assert_eq!(model.graph.edge_count(), 0);
    }

    #[test]
    fn vaccination_rejected_after_seeding(){
        let mut opt = ring_options(0.5, true);
        opt.vaccine_budget = 3;
        let mut model = VaxModel::try_from(&opt).unwrap();
        let mut rng = Pcg64::seed_from_u64(11);
        assert!(model.apply_vaccination(0));
        model.seed_index_cases(&mut rng);
        assert!(!model.apply_vaccination(1));
        assert_eq!(model.number_vaccinated(), 1);
        assert_eq!(model.vaccines_remaining(), 2);
    }

    #[test]
    fn refuser_guard_degrades_the_budget(){
        let mut opt = ring_options(0.5, true);
        opt.vaccine_budget = 5;
        let mut model = VaxModel::try_from(&opt).unwrap();
        let mut rng = Pcg64::seed_from_u64(3);
        model.seed_refusers(1.0, &mut rng);
        assert!(!model.graph.node(0).refuser);
        assert!(model.graph.nodes().iter().skip(1).all(|node| node.refuser));
        assert_eq!(model.vaccines_remaining(), 1);
    }

    #[test]
    fn interventions_only_remove_edges(){
        let mut opt = ring_options(0.7, true);
        opt.vaccine_budget = 2;
        opt.index_cases = 2;
        opt.system_size = NonZeroUsize::new(30).unwrap();
        opt.mean_degree = NonZeroUsize::new(4).unwrap();
        opt.rewire_prob = 0.2;
        let mut model = VaxModel::try_from(&opt).unwrap();
        let mut rng = Pcg64::seed_from_u64(9182);

        let mut edges = model.graph.edge_count();
        assert!(model.apply_vaccination(0));
        assert!(model.graph.edge_count() < edges);
        edges = model.graph.edge_count();

        model.seed_index_cases(&mut rng);
        while !model.epidemic_over(){
            model.advance_tick(&mut rng);
            assert_eq!(model.graph.edge_count(), edges);
        }
    }

    #[test]
    fn statuses_move_monotonically(){
        let mut opt = ring_options(0.6, true);
        opt.system_size = NonZeroUsize::new(40).unwrap();
        opt.mean_degree = NonZeroUsize::new(4).unwrap();
        opt.rewire_prob = 0.15;
        opt.recovery_rate = 0.2;
        opt.index_cases = 2;
        let mut model = VaxModel::try_from(&opt).unwrap();
        let mut rng = Pcg64::seed_from_u64(5150);
        model.seed_index_cases(&mut rng);

        let mut previous: Vec<_> = model.graph.nodes().iter().map(|node| node.status).collect();
        while !model.epidemic_over(){
            model.advance_tick(&mut rng);
            for (index, node) in model.graph.nodes().iter().enumerate(){
                if node.status != previous[index]{
                    assert!(previous[index].may_become(node.status));
                }
            }
            previous = model.graph.nodes().iter().map(|node| node.status).collect();
        }
    }

    #[test]
    fn completion_check_is_idempotent(){
        let mut opt = ring_options(0.6, true);
        opt.index_cases = 2;
        let mut model = VaxModel::try_from(&opt).unwrap();
        let mut rng = Pcg64::seed_from_u64(42);
        model.seed_index_cases(&mut rng);
        model.advance_tick(&mut rng);

        let halted = model.epidemic_over();
        let groups = model.num_groups();
        model.detect_completion();
        assert_eq!(model.epidemic_over(), halted);
        assert_eq!(model.num_groups(), groups);
    }

    #[test]
    fn fixed_seeds_reproduce_trials(){
        let mut opt = ring_options(0.5, true);
        opt.system_size = NonZeroUsize::new(50).unwrap();
        opt.mean_degree = NonZeroUsize::new(3).unwrap();
        opt.rewire_prob = 0.1;
        opt.vaccine_budget = 5;
        opt.index_cases = 2;
        opt.refuser_fraction = 0.05;

        let strategy = GameStrategy::degree_then_nearby(0.5);
        let mut outcomes_a = Vec::new();
        let mut outcomes_b = Vec::new();
        for outcomes in [&mut outcomes_a, &mut outcomes_b]{
            let mut sample = GameSample::from_options(opt.clone(), 777).unwrap();
            for _ in 0..3{
                outcomes.push(sample.play_until_completion(&strategy).unwrap());
            }
        }
        assert_eq!(outcomes_a, outcomes_b);
    }

    #[test]
    fn recorded_curves_cover_the_whole_game(){
        let mut opt = ring_options(0.7, true);
        opt.system_size = NonZeroUsize::new(50).unwrap();
        opt.mean_degree = NonZeroUsize::new(3).unwrap();
        opt.rewire_prob = 0.1;
        opt.vaccine_budget = 5;
        opt.index_cases = 2;

        let mut sample = GameSample::from_options(opt, 404).unwrap();
        let strategy = GameStrategy::degree_then_nearby(0.0);
        let curves = sample.play_recording_curves(&strategy);
        assert!(!curves.is_empty());
        assert!(sample.epidemic_over());

        let tally = sample.final_tally();
        let n = sample.n;
        assert_eq!(
            tally.uninfected + tally.vaccinated + tally.quarantined + tally.infected,
            n
        );
        let last = curves.len() - 1;
        assert_eq!(curves.sus[last], tally.uninfected);
        assert_eq!(curves.vac[last], tally.vaccinated);
        assert_eq!(curves.qua[last], tally.quarantined);
        // every row accounts for the full population
        for t in 0..curves.len(){
            let total = curves.sus[t] + curves.exp[t] + curves.inf[t]
                + curves.rec[t] + curves.vac[t] + curves.qua[t];
            assert_eq!(total, n);
        }
    }
}
