//! Minimum spanning tree (Kruskal's algorithm).
//!
//! Edge direction is ignored and the weight of an edge is its "weight"
//! attribute (1.0 when missing). Edges with equal weights are considered in
//! the order they were declared, so the result is deterministic. When the
//! graph is not connected the result is a spanning forest: every connected
//! component gets its own minimal tree, and there are no edges between the
//! components.

use super::edge_weight;
use crate::adt::disjoint::DisjointSet;
use crate::graph::factory::Factory;
use crate::graph::model::{EdgeHandle, Graph, GraphHandle, NodeHandle, Parse};
use std::collections::HashMap;

impl<F: Factory> Parse<F> {
    /// Computes the minimum spanning tree (or forest) of \p graph, including
    /// the nodes and edges of its subgraphs. The result is a new registry with
    /// one top level graph that contains a copy of every node and of the
    /// selected edges.
    pub fn minimum_spanning_tree(&self, graph: GraphHandle) -> Parse {
        // Index the nodes. Edges in subgraphs may refer to nodes that are
        // owned by an enclosing graph, so the endpoints are added too.
        let mut nodes: Vec<NodeHandle> = Vec::new();
        let mut index: HashMap<NodeHandle, usize> = HashMap::new();
        let edges = self.all_edges(graph);
        let endpoints = edges
            .iter()
            .flat_map(|e| [self.edge(*e).from(), self.edge(*e).to()]);
        for n in self.all_nodes(graph).into_iter().chain(endpoints) {
            if !index.contains_key(&n) {
                index.insert(n, nodes.len());
                nodes.push(n);
            }
        }

        // A stable sort keeps the declaration order for equal weights.
        let mut weighted: Vec<(f64, EdgeHandle)> = edges
            .iter()
            .map(|e| (edge_weight(self.edge(*e).attributes()), *e))
            .collect();
        weighted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut components = DisjointSet::new(nodes.len());
        let mut selected: Vec<EdgeHandle> = Vec::new();
        for (_, e) in weighted {
            if selected.len() + 1 >= nodes.len() {
                break;
            }
            let edge = self.edge(e);
            let from = index[&edge.from()];
            let to = index[&edge.to()];
            if components.union(from, to) {
                selected.push(e);
            }
        }
        selected.sort();

        #[cfg(feature = "log")]
        log::info!(
            "Spanning tree of \"{}\": {} nodes, {} edges, {} components.",
            self.graph(graph).name(),
            nodes.len(),
            selected.len(),
            components.num_sets()
        );

        // Build the result.
        let src = self.graph(graph);
        let mut tree = Parse::new();
        let root = tree.add_graph(
            Graph::new(src.name(), src.is_directed(), false),
            None,
        );
        tree.graph_mut(root).attributes_mut().merge(src.attributes());

        let mut new_nodes: Vec<NodeHandle> = Vec::with_capacity(nodes.len());
        for n in &nodes {
            let node = self.node(*n);
            let handle =
                tree.add_node(root, node.name(), node.attributes().clone());
            tree.add_member(root, handle);
            new_nodes.push(handle);
        }
        for e in selected {
            let edge = self.edge(e);
            let from = new_nodes[index[&edge.from()]];
            let to = new_nodes[index[&edge.to()]];
            tree.add_edge(root, from, to, edge.attributes().clone());
        }
        tree
    }
}
