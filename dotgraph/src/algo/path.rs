//! Shortest paths between two nodes.
//!
//! The search covers the graph and all of its subgraphs. Edges of directed
//! graphs are only followed from tail to head; undirected edges are followed
//! both ways. A path is returned as the list of nodes from the source to the
//! target, inclusive. An empty list means that there is no path.

use super::edge_weight;
use crate::graph::factory::Factory;
use crate::graph::model::{GraphHandle, NodeHandle, Parse};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, VecDeque};

type Adjacency = HashMap<NodeHandle, Vec<(NodeHandle, f64)>>;

/// An entry in the Dijkstra work list. The ordering is reversed so that the
/// max-heap pops the cheapest entry, and entries that were pushed first win
/// ties.
#[derive(Debug)]
struct State {
    cost: f64,
    seq: usize,
    node: NodeHandle,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Walks the predecessor links back from \p target.
fn make_path(
    prev: &HashMap<NodeHandle, NodeHandle>,
    source: NodeHandle,
    target: NodeHandle,
) -> Vec<NodeHandle> {
    let mut path = vec![target];
    let mut curr = target;
    while curr != source {
        match prev.get(&curr) {
            Some(p) => {
                curr = *p;
                path.push(curr);
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

impl<F: Factory> Parse<F> {
    /// Collects the outgoing connections of every node, in edge declaration
    /// order, with the edge weights.
    fn adjacency(&self, graph: GraphHandle) -> Adjacency {
        let mut adj = Adjacency::new();
        for e in self.all_edges(graph) {
            let edge = self.edge(e);
            let mut weight = edge_weight(edge.attributes());
            if weight < 0. {
                #[cfg(feature = "log")]
                log::warn!(
                    "Negative weight {} on edge {} - {}; using 1.0",
                    weight,
                    self.node(edge.from()).name(),
                    self.node(edge.to()).name()
                );
                weight = super::DEFAULT_WEIGHT;
            }
            adj.entry(edge.from()).or_default().push((edge.to(), weight));
            if !edge.is_directed() {
                adj.entry(edge.to()).or_default().push((edge.from(), weight));
            }
        }
        adj
    }

    /// Returns the path from \p source to \p target with the fewest edges.
    pub fn shortest_path(
        &self,
        graph: GraphHandle,
        source: NodeHandle,
        target: NodeHandle,
    ) -> Vec<NodeHandle> {
        if source == target {
            return vec![source];
        }
        let adj = self.adjacency(graph);

        let mut prev: HashMap<NodeHandle, NodeHandle> = HashMap::new();
        let mut queue = VecDeque::new();
        queue.push_back(source);

        while let Some(curr) = queue.pop_front() {
            let next = match adj.get(&curr) {
                Some(next) => next,
                None => continue,
            };
            for (n, _) in next {
                if *n == source || prev.contains_key(n) {
                    continue;
                }
                prev.insert(*n, curr);
                if *n == target {
                    return make_path(&prev, source, target);
                }
                queue.push_back(*n);
            }
        }
        Vec::new()
    }

    /// Returns the path from \p source to \p target with the smallest total
    /// weight (Dijkstra). Negative weights are replaced with 1.0.
    pub fn shortest_path_weighted(
        &self,
        graph: GraphHandle,
        source: NodeHandle,
        target: NodeHandle,
    ) -> Vec<NodeHandle> {
        if source == target {
            return vec![source];
        }
        let adj = self.adjacency(graph);

        let mut dist: HashMap<NodeHandle, f64> = HashMap::new();
        let mut prev: HashMap<NodeHandle, NodeHandle> = HashMap::new();
        let mut heap = BinaryHeap::new();
        let mut seq = 0;

        dist.insert(source, 0.);
        heap.push(State {
            cost: 0.,
            seq,
            node: source,
        });

        while let Some(State { cost, node, .. }) = heap.pop() {
            if node == target {
                return make_path(&prev, source, target);
            }
            // Skip stale entries.
            if cost > dist[&node] {
                continue;
            }
            let next = match adj.get(&node) {
                Some(next) => next,
                None => continue,
            };
            for (n, w) in next {
                let new_cost = cost + w;
                let better = match dist.get(n) {
                    Some(d) => new_cost < *d,
                    None => true,
                };
                if better {
                    dist.insert(*n, new_cost);
                    prev.insert(*n, node);
                    seq += 1;
                    heap.push(State {
                        cost: new_cost,
                        seq,
                        node: *n,
                    });
                }
            }
        }
        Vec::new()
    }

    /// Returns the total weight of the edges along \p path. Consecutive nodes
    /// that are connected by several edges use the lightest one.
    pub fn path_weight(&self, graph: GraphHandle, path: &[NodeHandle]) -> f64 {
        let adj = self.adjacency(graph);
        let mut total = 0.;
        for pair in path.windows(2) {
            let lightest = adj
                .get(&pair[0])
                .into_iter()
                .flatten()
                .filter(|(n, _)| *n == pair[1])
                .map(|(_, w)| *w)
                .fold(f64::INFINITY, f64::min);
            total += lightest;
        }
        total
    }
}
