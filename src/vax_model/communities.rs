use{
    std::collections::VecDeque,
    super::*,
};

/// Breadth first component labeling over the live edges. Always starts
/// from scratch, labels are handed out in ascending first-node order, so
/// the same graph always yields the same labels.
pub fn component_labels(graph: &ContactGraph) -> (Vec<usize>, usize){
    let n = graph.vertex_count();
    let mut labels = vec![usize::MAX; n];
    let mut count = 0;
    let mut queue = VecDeque::new();
    for start in 0..n{
        if labels[start] != usize::MAX{
            continue;
        }
        labels[start] = count;
        queue.push_back(start);
        while let Some(index) = queue.pop_front(){
            for &n_index in graph.neighbors_of(index){
                if labels[n_index] == usize::MAX{
                    labels[n_index] = count;
                    queue.push_back(n_index);
                }
            }
        }
        count += 1;
    }
    (labels, count)
}

/// Relabels and writes the group field of every node.
pub fn update_groups(graph: &mut ContactGraph) -> (Vec<usize>, usize){
    let (labels, count) = component_labels(graph);
    for (index, label) in labels.iter().enumerate(){
        graph.node_mut(index).group = Some(*label);
    }
    (labels, count)
}

/// A component is still at risk while it holds at least one active case
/// and at least one susceptible node. The epidemic is over once no
/// component is at risk.
pub fn at_risk_components(graph: &ContactGraph, labels: &[usize], count: usize) -> usize{
    let mut has_susceptible = vec![false; count];
    let mut has_active = vec![false; count];
    for (index, node) in graph.nodes().iter().enumerate(){
        let label = labels[index];
        if node.status.sus_check(){
            has_susceptible[label] = true;
        }
        if node.status.active_case(){
            has_active[label] = true;
        }
    }
    has_susceptible.iter()
        .zip(has_active.iter())
        .filter(|(susceptible, active)| **susceptible && **active)
        .count()
}

#[cfg(test)]
mod tests{
    use super::*;

    fn two_triangles() -> ContactGraph{
        let mut graph = ContactGraph::new(6);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(2, 0);
        graph.add_edge(3, 4);
        graph.add_edge(4, 5);
        graph.add_edge(5, 3);
        graph
    }

    #[test]
    fn labels_split_components(){
        let graph = two_triangles();
        let (labels, count) = component_labels(&graph);
        assert_eq!(count, 2);
        assert_eq!(labels, vec![0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn labeling_twice_changes_nothing(){
        let graph = two_triangles();
        let first = component_labels(&graph);
        let second = component_labels(&graph);
        assert_eq!(first, second);
    }

    #[test]
    fn isolation_splits_a_component(){
        let mut graph = ContactGraph::new(5);
        for index in 0..4{
            graph.add_edge(index, index + 1);
        }
        let (_, count) = component_labels(&graph);
        assert_eq!(count, 1);

        graph.isolate_node(2);
        let (labels, count) = update_groups(&mut graph);
        assert_eq!(count, 3);
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[3], labels[4]);
        assert_ne!(labels[0], labels[3]);
        assert_eq!(graph.node(2).group, Some(labels[2]));
    }

    #[test]
    fn at_risk_needs_active_and_susceptible_together(){
        let mut graph = two_triangles();
        graph.node_mut(0).status = HealthState::Infectious;
        let (labels, count) = component_labels(&graph);
        assert_eq!(at_risk_components(&graph, &labels, count), 1);

        // no susceptible left next to the fire
        graph.node_mut(1).status = HealthState::Exposed;
        graph.node_mut(2).status = HealthState::Recovered;
        let (labels, count) = component_labels(&graph);
        assert_eq!(at_risk_components(&graph, &labels, count), 0);

        // an all-susceptible component alone is not at risk either
        assert!(graph.node(3).status.sus_check());
    }
}
