//! Methods that convert the graph model back to text: DOT, CSV, and an
//! indented structural trace that is used for debugging.

use super::attributes::AttributeTable;
use super::factory::Factory;
use super::model::{GraphHandle, NodeHandle, Parse};
use crate::gv::parser::ast::DotString;
use crate::gv::parser::lexer::keyword;
use std::fmt::Write;

fn is_plain_id(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || !c.is_ascii() => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || !c.is_ascii())
}

fn is_numeral(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || digits == "." {
        return false;
    }
    let mut period = false;
    for c in digits.chars() {
        if c == '.' {
            if period {
                return false;
            }
            period = true;
        } else if !c.is_ascii_digit() {
            return false;
        }
    }
    true
}

/// Returns \p s as a DOT identifier, quoting it when needed. Escape sequences
/// in \p s are kept; only bare quotes are escaped.
pub fn quote_id(s: &str) -> String {
    if (is_plain_id(s) && keyword(s).is_none()) || is_numeral(s) {
        return s.to_string();
    }
    let mut result = String::from("\"");
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                result.push('\\');
                match chars.next() {
                    Some(next) => result.push(next),
                    // A trailing backslash would escape the closing quote.
                    None => result.push('\\'),
                }
            }
            '"' => result.push_str("\\\""),
            _ => result.push(c),
        }
    }
    result.push('"');
    result
}

fn quote_value(value: &DotString) -> String {
    match value {
        DotString::String(s) => quote_id(s),
        DotString::HtmlString(s) => format!("<{}>", s),
    }
}

fn format_attributes(attrs: &AttributeTable) -> String {
    let list: Vec<String> = attrs
        .iter()
        .map(|(name, value)| {
            format!("{}={}", quote_id(name), quote_value(value))
        })
        .collect();
    format!("[{}]", list.join(", "))
}

fn csv_field(s: &str) -> String {
    let special = |c: char| c == ',' || c == '"' || c == '\n' || c == '\r';
    let needs_quotes =
        s.contains(special) || s.starts_with(' ') || s.ends_with(' ');
    if !needs_quotes {
        return s.to_string();
    }
    format!("\"{}\"", s.replace('"', "\"\""))
}

impl<F: Factory> Parse<F> {
    /// Serializes the graph \p graph and its subgraphs as a DOT program.
    pub fn to_dot(&self, graph: GraphHandle) -> String {
        let mut out = String::new();
        self.write_dot_graph(&mut out, graph, 0);
        out
    }

    fn write_dot_graph(&self, out: &mut String, h: GraphHandle, indent: usize) {
        let graph = self.graph(h);
        let pad = "  ".repeat(indent);
        let inner = "  ".repeat(indent + 1);

        if graph.is_root() {
            if graph.is_strict() {
                out.push_str("strict ");
            }
            out.push_str(if graph.is_directed() { "digraph" } else { "graph" });
        } else {
            let _ = write!(out, "{}subgraph", pad);
        }
        if !graph.name().is_empty() {
            let _ = write!(out, " {}", quote_id(graph.name()));
        }
        out.push_str(" {\n");

        for (name, value) in graph.attributes().iter() {
            let name = quote_id(name);
            let _ = writeln!(out, "{}{}={};", inner, name, quote_value(value));
        }

        // Nodes that the graph owns carry their attributes. Nodes that belong
        // to an enclosing graph are only listed, to keep the membership.
        // Members that a subgraph owns are listed after the subgraphs, so that
        // they are declared in their own scope first.
        let (visible, nested): (Vec<NodeHandle>, Vec<NodeHandle>) = graph
            .members()
            .iter()
            .copied()
            .partition(|n| self.is_in_scope_chain(h, self.node(*n).graph()));
        let owned = graph.nodes().iter().filter(|n| !graph.is_member(**n));
        for n in visible.iter().chain(owned) {
            self.write_dot_node(out, h, *n, &inner);
        }

        for child in graph.children() {
            self.write_dot_graph(out, *child, indent + 1);
        }

        for n in &nested {
            self.write_dot_node(out, h, *n, &inner);
        }

        let op = if graph.is_directed() { "->" } else { "--" };
        for e in graph.edges() {
            let edge = self.edge(*e);
            let _ = write!(
                out,
                "{}{} {} {}",
                inner,
                quote_id(self.node(edge.from()).name()),
                op,
                quote_id(self.node(edge.to()).name())
            );
            if !edge.attributes().is_empty() {
                let attrs = format_attributes(edge.attributes());
                let _ = write!(out, " {}", attrs);
            }
            out.push_str(";\n");
        }
        let _ = writeln!(out, "{}}}", pad);
    }

    fn write_dot_node(
        &self,
        out: &mut String,
        scope: GraphHandle,
        n: NodeHandle,
        pad: &str,
    ) {
        let node = self.node(n);
        let _ = write!(out, "{}{}", pad, quote_id(node.name()));
        if node.graph() == scope && !node.attributes().is_empty() {
            let attrs = format_attributes(node.attributes());
            let _ = write!(out, " {}", attrs);
        }
        out.push_str(";\n");
    }

    /// Returns true if \p owner is \p graph or one of its enclosing graphs.
    fn is_in_scope_chain(&self, graph: GraphHandle, owner: GraphHandle) -> bool {
        let mut curr = Some(graph);
        while let Some(g) = curr {
            if g == owner {
                return true;
            }
            curr = self.graph(g).parent();
        }
        false
    }

    /// Exports the edges of \p graph and of its subgraphs as CSV. The first
    /// two columns are the tail and head node names, followed by one column
    /// for every edge attribute.
    pub fn to_csv(&self, graph: GraphHandle) -> String {
        let edges = self.all_edges(graph);

        let mut columns: Vec<&str> = Vec::new();
        for e in &edges {
            for name in self.edge(*e).attributes().names() {
                if !columns.contains(&name) {
                    columns.push(name);
                }
            }
        }

        let mut out = String::new();
        let mut header = vec!["from".to_string(), "to".to_string()];
        header.extend(columns.iter().map(|c| csv_field(c)));
        let _ = writeln!(out, "{}", header.join(","));

        for e in &edges {
            let edge = self.edge(*e);
            let mut row = vec![
                csv_field(self.node(edge.from()).name()),
                csv_field(self.node(edge.to()).name()),
            ];
            for c in &columns {
                let value = edge.attributes().get_string(c).unwrap_or("");
                row.push(csv_field(value));
            }
            let _ = writeln!(out, "{}", row.join(","));
        }
        out
    }

    /// Renders an indented description of the graph, its nodes, edges and
    /// subgraphs.
    pub fn trace(&self, graph: GraphHandle) -> String {
        let mut out = String::new();
        self.write_trace(&mut out, graph, 0);
        out
    }

    fn write_trace(&self, out: &mut String, h: GraphHandle, indent: usize) {
        let graph = self.graph(h);
        let pad = " ".repeat(indent);
        let _ = writeln!(
            out,
            "{}Graph \"{}\" ({}{}, {} nodes, {} edges)",
            pad,
            graph.name(),
            if graph.is_strict() { "strict " } else { "" },
            if graph.is_directed() { "directed" } else { "undirected" },
            graph.nodes().len(),
            graph.edges().len()
        );
        if !graph.attributes().is_empty() {
            let attrs = format_attributes(graph.attributes());
            let _ = writeln!(out, "{} Attributes {}", pad, attrs);
        }
        for n in graph.nodes() {
            let node = self.node(*n);
            let _ = writeln!(
                out,
                "{} Node {} {}",
                pad,
                quote_id(node.name()),
                format_attributes(node.attributes())
            );
        }
        for e in graph.edges() {
            let edge = self.edge(*e);
            let _ = writeln!(
                out,
                "{} Edge {} {} {} {}",
                pad,
                quote_id(self.node(edge.from()).name()),
                if edge.is_directed() { "->" } else { "--" },
                quote_id(self.node(edge.to()).name()),
                format_attributes(edge.attributes())
            );
        }
        for child in graph.children() {
            self.write_trace(out, *child, indent + 1);
        }
    }
}

#[test]
fn test_quote_id() {
    assert_eq!(quote_id("abc_1"), "abc_1");
    assert_eq!(quote_id("-1.5"), "-1.5");
    assert_eq!(quote_id(".5"), ".5");
    assert_eq!(quote_id("node"), "\"node\"");
    assert_eq!(quote_id("a b"), "\"a b\"");
    assert_eq!(quote_id("1a"), "\"1a\"");
    assert_eq!(quote_id(""), "\"\"");
    assert_eq!(quote_id("say \"hi\""), "\"say \\\"hi\\\"\"");
    // Escapes that came from the input are kept.
    assert_eq!(quote_id("a\\\"b"), "\"a\\\"b\"");
}

#[test]
fn test_csv_field() {
    assert_eq!(csv_field("a"), "a");
    assert_eq!(csv_field("a,b"), "\"a,b\"");
    assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
}
