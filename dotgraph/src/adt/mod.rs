//! Generic data structures that the graph algorithms use.

pub mod disjoint;
