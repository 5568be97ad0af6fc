//! Graph algorithms that work on the parsed graph model.

pub mod mst;
pub mod path;

use crate::graph::attributes::AttributeTable;

/// The name of the attribute that holds the edge weight.
pub const WEIGHT_ATTR: &str = "weight";

/// The weight of an edge without a usable weight attribute.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Returns the weight of an edge with the attributes \p attrs.
pub fn edge_weight(attrs: &AttributeTable) -> f64 {
    match attrs.get_real(WEIGHT_ATTR) {
        Some(w) if w.is_finite() => w,
        _ => DEFAULT_WEIGHT,
    }
}
