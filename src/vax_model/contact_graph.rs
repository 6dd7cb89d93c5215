use super::*;

/// Where an infection came from, kept for the exposure-chain display.
#[derive(Clone, Debug, PartialEq, Eq, Copy)]
pub enum InfectionSource{
    IndexCase,
    Contact(usize),
}

/// Per-person record. The node index into the graph is the identity,
/// so the record only carries simulation state.
#[derive(Clone, Debug, Default)]
pub struct ContactNode{
    pub status: HealthState,
    pub refuser: bool,
    pub group: Option<usize>,
    pub exposure_time_step: Option<u32>,
    pub infected_by: Option<InfectionSource>,
}

/// Undirected contact network with one record per node.
/// Edges only ever disappear after construction: isolating a node drops
/// all of its edges but keeps the record for scoring.
#[derive(Clone, Debug)]
pub struct ContactGraph{
    nodes: Vec<ContactNode>,
    adj: Vec<Vec<usize>>,
}

impl ContactGraph{
    pub fn new(n: usize) -> Self{
        Self{
            nodes: vec![ContactNode::default(); n],
            adj: vec![Vec::new(); n],
        }
    }

    pub fn vertex_count(&self) -> usize{
        self.nodes.len()
    }

    pub fn node(&self, index: usize) -> &ContactNode{
        &self.nodes[index]
    }

    pub fn node_mut(&mut self, index: usize) -> &mut ContactNode{
        &mut self.nodes[index]
    }

    pub fn nodes(&self) -> &[ContactNode]{
        &self.nodes
    }

    /// Inserts an undirected edge. Self loops and repeats are rejected,
    /// which makes the first occurrence of a pair the one that counts.
    pub fn add_edge(&mut self, a: usize, b: usize) -> bool{
        debug_assert!(a < self.nodes.len() && b < self.nodes.len());
        if a == b || self.adj[a].contains(&b){
            return false;
        }
        self.adj[a].push(b);
        self.adj[b].push(a);
        true
    }

    pub fn neighbors_of(&self, index: usize) -> &[usize]{
        &self.adj[index]
    }

    pub fn degree_of(&self, index: usize) -> usize{
        self.adj[index].len()
    }

    pub fn infectious_neighbor_count(&self, index: usize) -> usize{
        self.adj[index]
            .iter()
            .filter(|&&n_index| self.nodes[n_index].status.inf_check())
            .count()
    }

    /// Removes every live edge at `index`. Isolating an already
    /// isolated node changes nothing.
    pub fn isolate_node(&mut self, index: usize){
        let neighbors = std::mem::take(&mut self.adj[index]);
        for n_index in neighbors{
            self.adj[n_index].retain(|&other| other != index);
        }
    }

    /// All live edges as pairs with the smaller index first.
    pub fn live_edges(&self) -> Vec<[usize; 2]>{
        let mut pairs = Vec::with_capacity(self.edge_count());
        for (index, neighbors) in self.adj.iter().enumerate(){
            for &n_index in neighbors{
                if index < n_index{
                    pairs.push([index, n_index]);
                }
            }
        }
        pairs
    }

    pub fn edge_count(&self) -> usize{
        self.adj.iter().map(|neighbors| neighbors.len()).sum::<usize>() / 2
    }
}
