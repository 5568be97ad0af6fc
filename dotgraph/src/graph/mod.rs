//! The graph model that the parser builds, and the writers that convert it
//! back to text.

pub mod attributes;
pub mod factory;
pub mod model;
pub mod writer;

pub use attributes::AttributeTable;
pub use factory::{DefaultFactory, Factory};
pub use model::{
    DefaultKind, Edge, EdgeHandle, Graph, GraphHandle, Node, NodeHandle, Parse,
};
