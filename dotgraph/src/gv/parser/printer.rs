//! A collection of methods for printing the AST.

use super::ast::{self, DotString};
use std::fmt::Write;

fn print_node_id(out: &mut String, n: &ast::NodeId, indent: usize) {
    let _ = write!(out, "{}", " ".repeat(indent));
    if let Option::Some(port) = &n.port {
        let _ = writeln!(out, "{}:{}", n.name, port);
    } else {
        let _ = writeln!(out, "{}", n.name);
    }
}
fn print_endpoint(out: &mut String, e: &ast::Endpoint, indent: usize) {
    match e {
        ast::Endpoint::Node(n) => print_node_id(out, n, indent),
        ast::Endpoint::SubGraph(g) => print_graph(out, g, indent),
    }
}
fn print_arrow(out: &mut String, k: &ast::ArrowKind, indent: usize) {
    let _ = write!(out, "{}", " ".repeat(indent));
    match k {
        ast::ArrowKind::Arrow => {
            let _ = writeln!(out, "->");
        }
        ast::ArrowKind::Line => {
            let _ = writeln!(out, "--");
        }
    }
}
fn print_attribute(
    out: &mut String,
    a: &str,
    b: &DotString,
    indent: usize,
    i: usize,
) {
    let _ = write!(out, "{}", " ".repeat(indent));
    let _ = writeln!(out, "{})\"{}\" = \"{}\"", i, a, b);
}
fn print_attribute_list(out: &mut String, ll: &ast::AttributeList, indent: usize) {
    for (i, att) in ll.list.iter().enumerate() {
        print_attribute(out, &att.0, &att.1, indent, i);
    }
}
fn print_edge(out: &mut String, e: &ast::EdgeStmt, indent: usize) {
    let _ = writeln!(out, "{}Edge:", " ".repeat(indent));
    print_endpoint(out, &e.from, indent + 1);
    for dest in &e.to {
        print_arrow(out, &dest.arrow, indent + 1);
        print_endpoint(out, &dest.endpoint, indent + 1);
    }
    print_attribute_list(out, &e.list, indent + 1);
}
fn print_node(out: &mut String, n: &ast::NodeStmt, indent: usize) {
    let _ = write!(out, "{}Node ", " ".repeat(indent));
    print_node_id(out, &n.id, 0);
    print_attribute_list(out, &n.list, indent + 1);
}
fn print_att(out: &mut String, att: &ast::AttrStmt, indent: usize) {
    let _ = write!(out, "{}", " ".repeat(indent));

    match att.target {
        ast::AttrStmtTarget::Graph => {
            let _ = writeln!(out, "Attribute Graph:");
        }
        ast::AttrStmtTarget::Node => {
            let _ = writeln!(out, "Attribute Node:");
        }
        ast::AttrStmtTarget::Edge => {
            let _ = writeln!(out, "Attribute Edge:");
        }
    }
    print_attribute_list(out, &att.list, indent + 1);
}

fn print_stmt(out: &mut String, stmt: &ast::Stmt, indent: usize) {
    match stmt {
        ast::Stmt::Edge(e) => {
            print_edge(out, e, indent);
        }
        ast::Stmt::Node(n) => {
            print_node(out, n, indent);
        }
        ast::Stmt::Attribute(a) => {
            print_att(out, a, indent);
        }
        ast::Stmt::Assignment(name, value) => {
            let _ = write!(out, "{}", " ".repeat(indent));
            let _ = writeln!(out, "Assign \"{}\" = \"{}\"", name, value);
        }
        ast::Stmt::SubGraph(g) => {
            print_graph(out, g, indent);
        }
    }
}

fn print_graph(out: &mut String, graph: &ast::Graph, indent: usize) {
    let _ = write!(out, "{}", " ".repeat(indent));
    let _ = writeln!(out, "Graph: {}", graph.name);
    for stmt in &graph.list.list {
        print_stmt(out, stmt, indent + 1);
    }
}

/// Renders the AST as an indented tree.
pub fn ast_to_string(graph: &ast::Graph) -> String {
    let mut out = String::new();
    print_graph(&mut out, graph, 0);
    out
}

pub fn dump_ast(graph: &ast::Graph) {
    print!("{}", ast_to_string(graph));
}
