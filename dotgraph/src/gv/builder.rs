//! A graph builder that converts parsed AST trees to the graph model.

use crate::core::error::{ErrorKind, ParseError};
use crate::graph::attributes::AttributeTable;
use crate::graph::factory::Factory;
use crate::graph::model::{
    DefaultKind, EdgeHandle, Graph, GraphHandle, NodeHandle, Parse,
};
use crate::gv::parser::ast;

// The methods in this file are responsible for converting the parsed Graphviz
// AST into the Parse registry. Default attributes live in the graph that
// declared them: a subgraph starts with a copy of the defaults of its parent,
// and the 'node', 'edge' and 'graph' statements only change the defaults of
// the graph that they appear in.

/// The nodes that an edge endpoint expands to, and the port of the endpoint.
struct EndpointNodes {
    nodes: Vec<NodeHandle>,
    port: Option<String>,
}

/// This class adds the graphs of a parsed AST to a Parse registry.
pub struct GraphBuilder<'a, F: Factory> {
    parse: &'a mut Parse<F>,
    debug: bool,
}

impl<'a, F: Factory> GraphBuilder<'a, F> {
    pub fn new(parse: &'a mut Parse<F>) -> Self {
        let debug = parse.options().debug;
        Self { parse, debug }
    }

    /// Adds the top level graph \p graph to the registry.
    pub fn visit_graph(&mut self, graph: &ast::Graph) -> GraphHandle {
        let g = Graph::new(&graph.name, graph.directed, graph.strict);
        let handle = self.parse.add_graph(g, None);
        self.trace_graph(handle);

        self.parse.push_scope(handle);
        self.visit_stmt_list(handle, &graph.list);
        self.parse.pop_scope();
        handle
    }

    fn visit_subgraph(
        &mut self,
        scope: GraphHandle,
        graph: &ast::Graph,
    ) -> GraphHandle {
        // Named subgraphs are reopened. Anonymous subgraphs are always new.
        let existing = if graph.name.is_empty() {
            None
        } else {
            self.parse.find_child(scope, &graph.name)
        };

        let handle = match existing {
            Some(handle) => handle,
            None => {
                let g = Graph::new_subgraph(&graph.name, self.parse.graph(scope));
                let handle = self.parse.add_graph(g, Some(scope));
                self.trace_graph(handle);
                handle
            }
        };

        self.parse.push_scope(handle);
        self.visit_stmt_list(handle, &graph.list);
        self.parse.pop_scope();
        handle
    }

    fn visit_stmt_list(&mut self, scope: GraphHandle, list: &ast::StmtList) {
        for stmt in &list.list {
            self.visit_stmt(scope, stmt);
        }
    }

    fn visit_stmt(&mut self, scope: GraphHandle, stmt: &ast::Stmt) {
        match stmt {
            ast::Stmt::Edge(e) => {
                self.visit_edge(scope, e);
            }
            ast::Stmt::Node(n) => {
                self.visit_node(scope, n);
            }
            ast::Stmt::Attribute(a) => {
                self.visit_att(scope, a);
            }
            ast::Stmt::Assignment(name, value) => {
                self.parse
                    .graph_mut(scope)
                    .attributes_mut()
                    .set(name, value.clone());
            }
            ast::Stmt::SubGraph(g) => {
                self.visit_subgraph(scope, g);
            }
        }
    }

    /// Returns the node \p name that is visible from \p scope, or creates it
    /// in \p scope with the node defaults of the scope. Nodes that were
    /// declared in a nested subgraph are visible to the enclosing graphs.
    fn resolve_node(&mut self, scope: GraphHandle, name: &str) -> NodeHandle {
        let node = match self.parse.resolve_node(scope, name) {
            Some(node) => node,
            None => {
                let attrs = self
                    .parse
                    .graph(scope)
                    .defaults(DefaultKind::Node)
                    .clone();
                let node = self.parse.add_node(scope, name, attrs);
                self.trace_node(node);
                node
            }
        };
        self.parse.add_member(scope, node);
        node
    }

    fn visit_node(&mut self, scope: GraphHandle, n: &ast::NodeStmt) {
        let node = self.resolve_node(scope, &n.id.name);
        self.parse.node_mut(node).attributes_mut().merge_list(&n.list);
    }

    fn resolve_endpoint(
        &mut self,
        scope: GraphHandle,
        endpoint: &ast::Endpoint,
    ) -> EndpointNodes {
        match endpoint {
            ast::Endpoint::Node(id) => EndpointNodes {
                nodes: vec![self.resolve_node(scope, &id.name)],
                port: id.port.clone(),
            },
            ast::Endpoint::SubGraph(g) => {
                // A subgraph endpoint stands for the nodes that the subgraph
                // mentions directly.
                let handle = self.visit_subgraph(scope, g);
                let nodes = self.parse.graph(handle).members().to_vec();
                for n in &nodes {
                    self.parse.add_member(scope, *n);
                }
                EndpointNodes { nodes, port: None }
            }
        }
    }

    fn check_arrow(&mut self, scope: GraphHandle, target: &ast::EdgeTarget) {
        let directed = self.parse.graph(scope).is_directed();
        let msg = match (target.arrow, directed) {
            (ast::ArrowKind::Line, true) => "'--' used in a directed graph",
            (ast::ArrowKind::Arrow, false) => "'->' used in an undirected graph",
            _ => return,
        };
        let loc = target.loc;
        let err = ParseError::new(
            ErrorKind::Semantic,
            msg,
            loc.line,
            loc.column,
            loc.pos,
        );
        self.parse.add_diagnostic(err);
    }

    fn visit_edge(&mut self, scope: GraphHandle, e: &ast::EdgeStmt) {
        let mut attrs =
            self.parse.graph(scope).defaults(DefaultKind::Edge).clone();
        attrs.merge_list(&e.list);

        let mut prev = self.resolve_endpoint(scope, &e.from);
        for dest in &e.to {
            // A mismatched operator is reported, and the edge takes the
            // direction of the graph.
            self.check_arrow(scope, dest);
            let curr = self.resolve_endpoint(scope, &dest.endpoint);

            for from in &prev.nodes {
                for to in &curr.nodes {
                    let mut edge_attrs = attrs.clone();
                    if let Some(port) = &prev.port {
                        edge_attrs.set_str("tailport", port);
                    }
                    if let Some(port) = &curr.port {
                        edge_attrs.set_str("headport", port);
                    }
                    self.create_edge(scope, *from, *to, edge_attrs);
                }
            }
            prev = curr;
        }
    }

    fn create_edge(
        &mut self,
        scope: GraphHandle,
        from: NodeHandle,
        to: NodeHandle,
        attrs: AttributeTable,
    ) {
        // Strict graphs don't have multi-edges. Merge into the existing edge.
        if self.parse.graph(scope).is_strict() {
            if let Some(edge) = self.parse.find_edge(from, to) {
                self.parse.edge_mut(edge).attributes_mut().merge(&attrs);
                return;
            }
        }
        let edge = self.parse.add_edge(scope, from, to, attrs);
        self.trace_edge(edge);
    }

    fn visit_att(&mut self, scope: GraphHandle, att: &ast::AttrStmt) {
        let graph = self.parse.graph_mut(scope);
        match att.target {
            ast::AttrStmtTarget::Graph => {
                graph.attributes_mut().merge_list(&att.list);
                graph.defaults_mut(DefaultKind::Graph).merge_list(&att.list);
            }
            ast::AttrStmtTarget::Node => {
                graph.defaults_mut(DefaultKind::Node).merge_list(&att.list);
            }
            ast::AttrStmtTarget::Edge => {
                graph.defaults_mut(DefaultKind::Edge).merge_list(&att.list);
            }
        }
    }

    fn trace_graph(&self, _graph: GraphHandle) {
        if self.debug {
            #[cfg(feature = "log")]
            {
                let g = self.parse.graph(_graph);
                log::debug!(
                    "graph \"{}\" (parent {:?}, directed {})",
                    g.name(),
                    g.parent().map(|p| p.get_index()),
                    g.is_directed()
                );
            }
        }
    }

    fn trace_node(&self, _node: NodeHandle) {
        if self.debug {
            #[cfg(feature = "log")]
            {
                let n = self.parse.node(_node);
                log::debug!(
                    "node \"{}\" in graph {}",
                    n.name(),
                    n.graph().get_index()
                );
            }
        }
    }

    fn trace_edge(&self, _edge: EdgeHandle) {
        if self.debug {
            #[cfg(feature = "log")]
            {
                let e = self.parse.edge(_edge);
                log::debug!(
                    "edge {} {} {}",
                    self.parse.node(e.from()).name(),
                    if e.is_directed() { "->" } else { "--" },
                    self.parse.node(e.to()).name()
                );
            }
        }
    }
}
