use{
    rand::Rng,
    rand::distributions::{Distribution, Uniform},
    super::*,
};

/// Builds the small world contact network: a ring lattice where node i
/// reaches e/2 + 1 steps forward for odd e and backward for even e
/// (e in 0..mean_degree), followed by random rewiring of the far
/// endpoints. The lattice pass emits repeated pairs on purpose, the
/// final insertion keeps the first occurrence of each one.
pub fn generate_contact_network<R>(
    system_size: usize,
    mean_degree: usize,
    rewire_prob: f64,
    rng: &mut R,
) -> Result<ContactGraph, VaxError>
where R: Rng
{
    if system_size < 2{
        return Err(VaxError::InvalidTopologyParameters(
            format!("system size {} is below 2", system_size)
        ));
    }
    if mean_degree == 0 || mean_degree >= system_size{
        return Err(VaxError::InvalidTopologyParameters(
            format!("mean degree {} has to lie in 1..{}", mean_degree, system_size)
        ));
    }
    if !(0.0..=1.0).contains(&rewire_prob){
        return Err(VaxError::InvalidTopologyParameters(
            format!("rewire probability {} outside [0,1]", rewire_prob)
        ));
    }

    let mut edges: Vec<[usize; 2]> = Vec::with_capacity(system_size * mean_degree);
    for index in 0..system_size{
        for e in 0..mean_degree{
            let offset = e / 2 + 1;
            let other = if e % 2 == 1{
                (index + offset) % system_size
            } else {
                (index + system_size - offset) % system_size
            };
            edges.push([index, other]);
        }
    }

    // one candidate draw per rewired edge, the rewire is dropped rather
    // than redrawn when the candidate is unusable
    let node_dist = Uniform::new(0, system_size);
    let prob_dist = Uniform::new_inclusive(0.0, 1.0);
    for k in 0..edges.len(){
        if prob_dist.sample(rng) < rewire_prob{
            let candidate = node_dist.sample(rng);
            let source = edges[k][0];
            if candidate == source{
                continue;
            }
            let rewired = [source, candidate];
            if edge_in_list(&edges, k, rewired){
                continue;
            }
            edges[k] = rewired;
        }
    }

    let mut graph = ContactGraph::new(system_size);
    for edge in edges{
        graph.add_edge(edge[0], edge[1]);
    }
    Ok(graph)
}

fn edge_in_list(edges: &[[usize; 2]], skip: usize, pair: [usize; 2]) -> bool{
    edges.iter()
        .enumerate()
        .any(|(k, edge)|
            k != skip
            && (
                (edge[0] == pair[0] && edge[1] == pair[1])
                || (edge[0] == pair[1] && edge[1] == pair[0])
            )
        )
}
