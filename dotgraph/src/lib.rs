/*!
This crate provides a library for parsing GraphViz DOT files into a typed graph
model, and a few graph algorithms that work on that model. It supports nested
subgraphs, scoped default attributes (`node [...]`, `edge [...]` and
`graph [...]`), edge chains, subgraph edge endpoints, ports, strict graphs,
html strings and string concatenation.

The project also comes with a command line utility that prints the parsed
graph, its spanning tree or the shortest path between two nodes.

# Parser example: parse a dot file

To parse a program and look at the nodes:

```rust
    use dotgraph::graph::Parse;

    let contents = "digraph G { node [color=red]; a -> b [weight=2]; }";
    let mut parse = Parse::new();

    match parse.parse_str(contents) {
        Result::Err(err) => {
            eprintln!("Error: {}", err);
        }

        Result::Ok(()) => {
            let g = parse.graph_by_name("G").unwrap();
            let a = parse.find_node(g, "a").unwrap();
            let color = parse.node(a).attributes().get_string("color");
            assert_eq!(color, Some("red"));
            println!("{}", parse.to_dot(g));
        }
    }
```

Malformed statements are skipped and recorded in `Parse::diagnostics`. Only
errors that make the rest of the file unreadable, such as a missing '}', fail
the whole parse. The low level API exposes the AST:

```rust
    use dotgraph::gv;

    let mut parser = gv::DotParser::new("graph { a -- b }");
    let graphs = parser.process().unwrap();
    gv::dump_ast(&graphs[0]);
```

# Algorithms example

```rust
fn spanning_tree() {
    use dotgraph::graph::Parse;

    let mut parse = Parse::new();
    parse
        .parse_str("graph { a -- b [weight=1]; b -- c [weight=5]; a -- c [weight=2]; }")
        .unwrap();
    let g = parse.root_graph().unwrap();

    // The tree is a new registry, with one top level graph.
    let tree = parse.minimum_spanning_tree(g);
    let t = tree.root_graph().unwrap();
    assert_eq!(tree.graph(t).edges().len(), 2);

    let a = parse.find_node(g, "a").unwrap();
    let c = parse.find_node(g, "c").unwrap();
    let path = parse.shortest_path(g, a, c);
    assert_eq!(parse.node_names(&path), vec!["a", "c"]);
}
```

*/

pub mod adt;
pub mod algo;
pub mod core;
pub mod graph;
pub mod gv;
