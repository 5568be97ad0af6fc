//! Factory hooks that let users attach their own data to the graphs, nodes
//! and edges that the parser creates.
//!
//! The parser calls the factory right after it creates an entity. The entity
//! is passed in, so the factory can look at its name and at the attributes it
//! was created with (the defaults that were in scope). The value that the
//! factory returns is stored next to the entity, and can be accessed with
//! `Parse::node_data` and friends.
//!
//! For example, a layout engine can attach a position to every node:
//!
//! ```rust
//! use dotgraph::graph::factory::Factory;
//! use dotgraph::graph::model::{Edge, Graph, Node, Parse};
//!
//! #[derive(Default)]
//! struct Layout {
//!     count: usize,
//! }
//!
//! impl Factory for Layout {
//!     type GraphData = ();
//!     type NodeData = (f64, f64);
//!     type EdgeData = ();
//!
//!     fn make_graph(&mut self, _graph: &Graph) {}
//!     fn make_node(&mut self, _node: &Node) -> (f64, f64) {
//!         self.count += 1;
//!         (self.count as f64, 0.)
//!     }
//!     fn make_edge(&mut self, _edge: &Edge) {}
//! }
//!
//! let mut parse = Parse::with_factory(Layout::default());
//! parse.parse_str("graph { a -- b }").unwrap();
//! let g = parse.root_graph().unwrap();
//! let b = parse.find_node(g, "b").unwrap();
//! assert_eq!(*parse.node_data(b), (2., 0.));
//! ```

use super::model::{Edge, Graph, Node};

pub trait Factory {
    type GraphData;
    type NodeData;
    type EdgeData;

    fn make_graph(&mut self, graph: &Graph) -> Self::GraphData;
    fn make_node(&mut self, node: &Node) -> Self::NodeData;
    fn make_edge(&mut self, edge: &Edge) -> Self::EdgeData;
}

/// The factory that does not attach anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFactory;

impl Factory for DefaultFactory {
    type GraphData = ();
    type NodeData = ();
    type EdgeData = ();

    fn make_graph(&mut self, _graph: &Graph) {}
    fn make_node(&mut self, _node: &Node) {}
    fn make_edge(&mut self, _edge: &Edge) {}
}
