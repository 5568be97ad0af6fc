//! This module implements the graph model that the parser builds: the Parse
//! registry, which owns every graph, node and edge that were created from one
//! input, and the Graph, Node and Edge records.
//!
//! Entities are stored in vectors and are referenced with handles. Handles
//! are indices that are only meaningful for the Parse that created them. The
//! parent link of a subgraph is a plain handle, so ownership always flows from
//! the Parse to the entities and never between graphs.

use super::attributes::AttributeTable;
use super::factory::{DefaultFactory, Factory};
use crate::core::error::ParseError;
use crate::core::options::ParseOptions;
use crate::core::utils::load_file;
use crate::gv::builder::GraphBuilder;
use crate::gv::parser::DotParser;
use std::collections::{HashMap, HashSet};

macro_rules! define_handle {
    ($name:ident) => {
        #[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash, Debug)]
        pub struct $name {
            idx: usize,
        }

        impl $name {
            pub fn new(x: usize) -> Self {
                $name { idx: x }
            }
            pub fn get_index(&self) -> usize {
                self.idx
            }
        }

        impl From<usize> for $name {
            fn from(idx: usize) -> Self {
                $name { idx }
            }
        }
    };
}

define_handle!(GraphHandle);
define_handle!(NodeHandle);
define_handle!(EdgeHandle);

/// Selects one of the three default attribute tables of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultKind {
    Graph,
    Node,
    Edge,
}

/// A top level graph or a subgraph.
#[derive(Debug, Clone)]
pub struct Graph {
    name: String,
    directed: bool,
    strict: bool,
    parent: Option<GraphHandle>,
    // Nodes that were created in this graph, in creation order.
    nodes: Vec<NodeHandle>,
    node_index: HashMap<String, NodeHandle>,
    // Nodes that were mentioned in the statements of this graph, including
    // nodes that are owned by one of the enclosing graphs.
    members: Vec<NodeHandle>,
    member_set: HashSet<NodeHandle>,
    edges: Vec<EdgeHandle>,
    children: Vec<GraphHandle>,
    attributes: AttributeTable,
    graph_defaults: AttributeTable,
    node_defaults: AttributeTable,
    edge_defaults: AttributeTable,
}

impl Graph {
    pub fn new(name: &str, directed: bool, strict: bool) -> Self {
        Self {
            name: name.to_string(),
            directed,
            strict,
            parent: None,
            nodes: Vec::new(),
            node_index: HashMap::new(),
            members: Vec::new(),
            member_set: HashSet::new(),
            edges: Vec::new(),
            children: Vec::new(),
            attributes: AttributeTable::new(),
            graph_defaults: AttributeTable::new(),
            node_defaults: AttributeTable::new(),
            edge_defaults: AttributeTable::new(),
        }
    }

    /// Creates a subgraph of \p parent. The subgraph starts with the
    /// attributes and the defaults that are in effect in the parent.
    pub fn new_subgraph(name: &str, parent: &Graph) -> Self {
        let mut graph = Graph::new(name, parent.directed, parent.strict);
        graph.attributes = parent.graph_defaults.clone();
        graph.graph_defaults = parent.graph_defaults.clone();
        graph.node_defaults = parent.node_defaults.clone();
        graph.edge_defaults = parent.edge_defaults.clone();
        graph
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn is_directed(&self) -> bool {
        self.directed
    }
    pub fn is_strict(&self) -> bool {
        self.strict
    }
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
    pub fn parent(&self) -> Option<GraphHandle> {
        self.parent
    }
    pub fn nodes(&self) -> &[NodeHandle] {
        &self.nodes
    }
    pub fn members(&self) -> &[NodeHandle] {
        &self.members
    }
    pub fn is_member(&self, node: NodeHandle) -> bool {
        self.member_set.contains(&node)
    }
    pub fn edges(&self) -> &[EdgeHandle] {
        &self.edges
    }
    pub fn children(&self) -> &[GraphHandle] {
        &self.children
    }
    /// Returns the node named \p name if it was created in this graph.
    pub fn local_node(&self, name: &str) -> Option<NodeHandle> {
        self.node_index.get(name).copied()
    }
    pub fn attributes(&self) -> &AttributeTable {
        &self.attributes
    }
    pub fn attributes_mut(&mut self) -> &mut AttributeTable {
        &mut self.attributes
    }
    pub fn defaults(&self, kind: DefaultKind) -> &AttributeTable {
        match kind {
            DefaultKind::Graph => &self.graph_defaults,
            DefaultKind::Node => &self.node_defaults,
            DefaultKind::Edge => &self.edge_defaults,
        }
    }
    pub fn defaults_mut(&mut self, kind: DefaultKind) -> &mut AttributeTable {
        match kind {
            DefaultKind::Graph => &mut self.graph_defaults,
            DefaultKind::Node => &mut self.node_defaults,
            DefaultKind::Edge => &mut self.edge_defaults,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    graph: GraphHandle,
    attributes: AttributeTable,
    out_edges: Vec<EdgeHandle>,
    in_edges: Vec<EdgeHandle>,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Returns the graph that owns the node.
    pub fn graph(&self) -> GraphHandle {
        self.graph
    }
    pub fn attributes(&self) -> &AttributeTable {
        &self.attributes
    }
    pub fn attributes_mut(&mut self) -> &mut AttributeTable {
        &mut self.attributes
    }
    pub fn out_edges(&self) -> &[EdgeHandle] {
        &self.out_edges
    }
    pub fn in_edges(&self) -> &[EdgeHandle] {
        &self.in_edges
    }
}

#[derive(Debug, Clone)]
pub struct Edge {
    from: NodeHandle,
    to: NodeHandle,
    directed: bool,
    graph: GraphHandle,
    attributes: AttributeTable,
}

impl Edge {
    /// The tail of the edge.
    pub fn from(&self) -> NodeHandle {
        self.from
    }
    /// The head of the edge.
    pub fn to(&self) -> NodeHandle {
        self.to
    }
    pub fn is_directed(&self) -> bool {
        self.directed
    }
    /// Returns the graph that owns the edge.
    pub fn graph(&self) -> GraphHandle {
        self.graph
    }
    /// Returns the endpoint that is not \p node. For self loops this is
    /// \p node itself.
    pub fn other(&self, node: NodeHandle) -> NodeHandle {
        if self.from == node {
            self.to
        } else {
            self.from
        }
    }
    pub fn attributes(&self) -> &AttributeTable {
        &self.attributes
    }
    pub fn attributes_mut(&mut self) -> &mut AttributeTable {
        &mut self.attributes
    }
}

/// Owns all of the graphs, nodes and edges that were created from one input.
pub struct Parse<F: Factory = DefaultFactory> {
    graphs: Vec<Graph>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    graph_data: Vec<F::GraphData>,
    node_data: Vec<F::NodeData>,
    edge_data: Vec<F::EdgeData>,
    // Top level graphs, in the order they were declared.
    roots: Vec<GraphHandle>,
    // The graphs that are open while the builder runs.
    scope: Vec<GraphHandle>,
    diagnostics: Vec<ParseError>,
    options: ParseOptions,
    factory: F,
}

impl Parse<DefaultFactory> {
    pub fn new() -> Self {
        Self::with_factory(DefaultFactory)
    }
}

impl Default for Parse<DefaultFactory> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Factory> std::fmt::Debug for Parse<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parse")
            .field("graphs", &self.graphs.len())
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edges.len())
            .field("diagnostics", &self.diagnostics.len())
            .finish()
    }
}

impl<F: Factory> Parse<F> {
    pub fn with_factory(factory: F) -> Self {
        Self {
            graphs: Vec::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            graph_data: Vec::new(),
            node_data: Vec::new(),
            edge_data: Vec::new(),
            roots: Vec::new(),
            scope: Vec::new(),
            diagnostics: Vec::new(),
            options: ParseOptions::default(),
            factory,
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.options.debug = debug;
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Parses the DOT program in \p input and adds the graphs that it
    /// declares to this registry.
    pub fn parse_str(&mut self, input: &str) -> Result<(), ParseError> {
        let mut parser = DotParser::with_options(input, self.options.clone());
        let result = parser.process();
        self.diagnostics.extend(parser.take_diagnostics());

        let graphs = match result {
            Result::Ok(graphs) => graphs,
            Result::Err(err) => {
                #[cfg(feature = "log")]
                log::error!("{}\n{}", err, parser.location_report(&err));
                return Result::Err(err);
            }
        };

        let mut builder = GraphBuilder::new(self);
        for graph in &graphs {
            builder.visit_graph(graph);
        }
        Result::Ok(())
    }

    /// Loads and parses the file \p filename.
    pub fn load_file(&mut self, filename: &str) -> Result<(), ParseError> {
        let content = match load_file(filename) {
            Result::Ok(content) => content,
            Result::Err(err) => {
                let err = ParseError::io(&format!("{}: {}", filename, err));
                #[cfg(feature = "log")]
                log::error!("{}", err);
                return Result::Err(err);
            }
        };
        self.parse_str(&content)
    }

    /// Returns the errors that the parser recovered from, and the warnings
    /// that were found while building the graph.
    pub fn diagnostics(&self) -> &[ParseError] {
        &self.diagnostics
    }

    pub fn add_diagnostic(&mut self, err: ParseError) {
        #[cfg(feature = "log")]
        log::warn!("{}", err);
        self.diagnostics.push(err);
    }

    /// Iterates over the top level graphs, in declaration order.
    pub fn graphs(&self) -> impl Iterator<Item = (&str, GraphHandle)> + '_ {
        self.roots
            .iter()
            .map(move |h| (self.graphs[h.idx].name(), *h))
    }

    /// Returns the first top level graph named \p name.
    pub fn graph_by_name(&self, name: &str) -> Option<GraphHandle> {
        self.graphs().find(|(n, _)| *n == name).map(|(_, h)| h)
    }

    pub fn root_graph(&self) -> Option<GraphHandle> {
        self.roots.first().copied()
    }

    /// Returns the innermost open graph while the graph is being built, and
    /// the last top level graph afterwards.
    pub fn current_graph(&self) -> Option<GraphHandle> {
        self.scope.last().or_else(|| self.roots.last()).copied()
    }

    pub fn push_scope(&mut self, graph: GraphHandle) {
        self.scope.push(graph);
    }

    pub fn pop_scope(&mut self) -> Option<GraphHandle> {
        self.scope.pop()
    }

    pub fn num_graphs(&self) -> usize {
        self.graphs.len()
    }
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn graph(&self, h: GraphHandle) -> &Graph {
        &self.graphs[h.idx]
    }
    pub fn graph_mut(&mut self, h: GraphHandle) -> &mut Graph {
        &mut self.graphs[h.idx]
    }
    pub fn node(&self, h: NodeHandle) -> &Node {
        &self.nodes[h.idx]
    }
    pub fn node_mut(&mut self, h: NodeHandle) -> &mut Node {
        &mut self.nodes[h.idx]
    }
    pub fn edge(&self, h: EdgeHandle) -> &Edge {
        &self.edges[h.idx]
    }
    pub fn edge_mut(&mut self, h: EdgeHandle) -> &mut Edge {
        &mut self.edges[h.idx]
    }

    pub fn graph_data(&self, h: GraphHandle) -> &F::GraphData {
        &self.graph_data[h.idx]
    }
    pub fn graph_data_mut(&mut self, h: GraphHandle) -> &mut F::GraphData {
        &mut self.graph_data[h.idx]
    }
    pub fn node_data(&self, h: NodeHandle) -> &F::NodeData {
        &self.node_data[h.idx]
    }
    pub fn node_data_mut(&mut self, h: NodeHandle) -> &mut F::NodeData {
        &mut self.node_data[h.idx]
    }
    pub fn edge_data(&self, h: EdgeHandle) -> &F::EdgeData {
        &self.edge_data[h.idx]
    }
    pub fn edge_data_mut(&mut self, h: EdgeHandle) -> &mut F::EdgeData {
        &mut self.edge_data[h.idx]
    }

    /// Registers the graph \p graph. Graphs without a parent are added to the
    /// list of top level graphs.
    pub fn add_graph(
        &mut self,
        mut graph: Graph,
        parent: Option<GraphHandle>,
    ) -> GraphHandle {
        let handle = GraphHandle::new(self.graphs.len());
        graph.parent = parent;
        match parent {
            Some(p) => self.graphs[p.idx].children.push(handle),
            None => self.roots.push(handle),
        }
        let data = self.factory.make_graph(&graph);
        self.graphs.push(graph);
        self.graph_data.push(data);
        handle
    }

    /// Creates the node \p name in the graph \p graph. This does not check if
    /// the name is already used in an enclosing scope; see `find_node`.
    pub fn add_node(
        &mut self,
        graph: GraphHandle,
        name: &str,
        attributes: AttributeTable,
    ) -> NodeHandle {
        let handle = NodeHandle::new(self.nodes.len());
        let node = Node {
            name: name.to_string(),
            graph,
            attributes,
            out_edges: Vec::new(),
            in_edges: Vec::new(),
        };
        let g = &mut self.graphs[graph.idx];
        g.nodes.push(handle);
        g.node_index.insert(name.to_string(), handle);
        let data = self.factory.make_node(&node);
        self.nodes.push(node);
        self.node_data.push(data);
        handle
    }

    /// Records that \p node is mentioned by the statements of \p graph.
    pub fn add_member(&mut self, graph: GraphHandle, node: NodeHandle) {
        let g = &mut self.graphs[graph.idx];
        if g.member_set.insert(node) {
            g.members.push(node);
        }
    }

    /// Creates an edge from \p from to \p to that is owned by \p graph. The
    /// edge is directed if the graph is directed.
    pub fn add_edge(
        &mut self,
        graph: GraphHandle,
        from: NodeHandle,
        to: NodeHandle,
        attributes: AttributeTable,
    ) -> EdgeHandle {
        let handle = EdgeHandle::new(self.edges.len());
        let edge = Edge {
            from,
            to,
            directed: self.graphs[graph.idx].directed,
            graph,
            attributes,
        };
        self.graphs[graph.idx].edges.push(handle);
        self.nodes[from.idx].out_edges.push(handle);
        self.nodes[to.idx].in_edges.push(handle);
        let data = self.factory.make_edge(&edge);
        self.edges.push(edge);
        self.edge_data.push(data);
        handle
    }

    /// Looks for the node \p name in \p graph and then in the enclosing
    /// graphs.
    pub fn find_node(&self, graph: GraphHandle, name: &str) -> Option<NodeHandle> {
        let mut curr = Some(graph);
        while let Some(g) = curr {
            let graph = &self.graphs[g.idx];
            if let Some(node) = graph.local_node(name) {
                return Some(node);
            }
            curr = graph.parent;
        }
        None
    }

    /// Looks for the node \p name in the subgraphs that are nested in
    /// \p graph, in depth first declaration order.
    pub fn find_nested_node(
        &self,
        graph: GraphHandle,
        name: &str,
    ) -> Option<NodeHandle> {
        self.sub_graphs(graph)
            .into_iter()
            .find_map(|g| self.graphs[g.idx].local_node(name))
    }

    /// Resolves the name \p name the way the statements of \p graph see it:
    /// first in \p graph and its enclosing graphs, and then in the subgraphs
    /// that \p graph already declared.
    pub fn resolve_node(
        &self,
        graph: GraphHandle,
        name: &str,
    ) -> Option<NodeHandle> {
        self.find_node(graph, name)
            .or_else(|| self.find_nested_node(graph, name))
    }

    /// Returns the direct subgraph of \p graph that is named \p name.
    pub fn find_child(&self, graph: GraphHandle, name: &str) -> Option<GraphHandle> {
        self.graphs[graph.idx]
            .children
            .iter()
            .find(|c| self.graphs[c.idx].name == name)
            .copied()
    }

    /// Returns an edge between \p from and \p to. Undirected edges match in
    /// both directions.
    pub fn find_edge(&self, from: NodeHandle, to: NodeHandle) -> Option<EdgeHandle> {
        let forward = self.nodes[from.idx]
            .out_edges
            .iter()
            .find(|e| self.edges[e.idx].to == to);
        if let Some(e) = forward {
            return Some(*e);
        }
        self.nodes[to.idx]
            .out_edges
            .iter()
            .find(|e| {
                let edge = &self.edges[e.idx];
                !edge.directed && edge.to == from
            })
            .copied()
    }

    /// Returns all of the subgraphs that are nested in \p graph, in depth
    /// first declaration order. \p graph itself is not included.
    pub fn sub_graphs(&self, graph: GraphHandle) -> Vec<GraphHandle> {
        let mut result = Vec::new();
        let mut stack: Vec<GraphHandle> =
            self.graphs[graph.idx].children.iter().rev().copied().collect();
        while let Some(g) = stack.pop() {
            result.push(g);
            stack.extend(self.graphs[g.idx].children.iter().rev());
        }
        result
    }

    /// Returns the nodes of \p graph followed by the nodes of all of its
    /// subgraphs.
    pub fn all_nodes(&self, graph: GraphHandle) -> Vec<NodeHandle> {
        let mut result = self.graphs[graph.idx].nodes.clone();
        for g in self.sub_graphs(graph) {
            result.extend(self.graphs[g.idx].nodes.iter());
        }
        result
    }

    /// Returns the edges of \p graph followed by the edges of all of its
    /// subgraphs.
    pub fn all_edges(&self, graph: GraphHandle) -> Vec<EdgeHandle> {
        let mut result = self.graphs[graph.idx].edges.clone();
        for g in self.sub_graphs(graph) {
            result.extend(self.graphs[g.idx].edges.iter());
        }
        result
    }

    /// Returns the names of the nodes in \p nodes.
    pub fn node_names(&self, nodes: &[NodeHandle]) -> Vec<String> {
        nodes.iter().map(|n| self.nodes[n.idx].name.clone()).collect()
    }
}
