use dotgraph::graph::Parse;

fn parse_program(program: &str) -> Parse {
    let mut parse = Parse::new();
    if let Result::Err(err) = parse.parse_str(program) {
        println!("Error: {}", err);
        panic!();
    }
    parse
}

#[cfg(test)]
mod tests {

    use super::parse_program;
    use dotgraph::core::error::ErrorKind;
    use dotgraph::core::options::ParseOptions;
    use dotgraph::core::utils::save_to_file;
    use dotgraph::graph::{Edge, Factory, Graph, GraphHandle, Node, Parse};
    use dotgraph::gv::DotParser;
    use dotgraph::gv::Lexer;
    use dotgraph::gv::Token;
    use dotgraph::gv::parser::printer::ast_to_string;

    fn is_identifier(t: Token, target: &str) -> bool {
        match t {
            Token::Identifier(name) => target == name,
            _ => false,
        }
    }

    fn get_sample_program() -> String {
        r##"/* family tree */
        graph G {
            node [shape=box, color=blue];
            I1 [label="John Fitzgerald Kennedy\nb. 29.5.1917 Brookline"];
            I2 [shape=ellipse, color=red, label="Jaqueline Lee Bouvier"];
            I5 [shape=ellipse, color=red, label=<Caroline <b>Kennedy</b>>];
            edge [style=bold];
            I1 -- I5 [color=blue];
            I1 -- I2 [color=violet, weight=3];
            I2 -- I5 [color=red];
            subgraph cluster_parents {
                label = "Parents"
                I8 [label="Joseph Patrick " + "Kennedy"];
                I9; // Rose
                I8 -- I9 [color=violet];
                I8 -- I1;
            }
            I1 -- I2 [color=red]
        }
        "##
        .to_string()
    }

    #[test]
    fn simple() {
        let mut lexer = Lexer::from_string("a -> b");
        let t0 = lexer.next_token();
        let t1 = lexer.next_token();
        let t2 = lexer.next_token();
        assert!(is_identifier(t0, "a"));
        assert!(matches!(t1, Token::ArrowRight));
        assert!(is_identifier(t2, "b"));
        assert!(matches!(lexer.next_token(), Token::EOF));
    }

    #[test]
    fn simple_number() {
        let mut lexer = Lexer::from_string("-12345");
        assert!(is_identifier(lexer.next_token(), "-12345"));
        assert!(matches!(lexer.next_token(), Token::EOF));
    }

    #[test]
    fn simple_float_number() {
        let mut lexer = Lexer::from_string("1.12 -.5");
        assert!(is_identifier(lexer.next_token(), "1.12"));
        assert!(is_identifier(lexer.next_token(), "-.5"));
        assert!(matches!(lexer.next_token(), Token::EOF));
    }

    #[test]
    fn simple_program() {
        let mut lexer = Lexer::from_string("digraph { a -> b; } ");
        assert!(matches!(lexer.next_token(), Token::DigraphKW));
        assert!(matches!(lexer.next_token(), Token::OpenBrace));
        assert!(matches!(lexer.next_token(), Token::Identifier(_)));
        assert!(matches!(lexer.next_token(), Token::ArrowRight));
        assert!(matches!(lexer.next_token(), Token::Identifier(_)));
        assert!(matches!(lexer.next_token(), Token::Semicolon));
        assert!(matches!(lexer.next_token(), Token::CloseBrace));
        assert!(matches!(lexer.next_token(), Token::EOF));
    }

    #[test]
    fn lex_keywords() {
        let mut lexer = Lexer::from_string("STRICT DiGraph subgraph Node edge");
        assert_eq!(lexer.next_token(), Token::StrictKW);
        assert_eq!(lexer.next_token(), Token::DigraphKW);
        assert_eq!(lexer.next_token(), Token::SubgraphKW);
        assert_eq!(lexer.next_token(), Token::NodeKW);
        assert_eq!(lexer.next_token(), Token::EdgeKW);
        assert_eq!(lexer.next_token(), Token::EOF);
    }

    #[test]
    fn lex_comments() {
        let program = "// header\na /* inline\n comment */ b\n# line 3\n c";
        let mut lexer = Lexer::from_string(program);
        assert!(is_identifier(lexer.next_token(), "a"));
        assert!(is_identifier(lexer.next_token(), "b"));
        assert!(is_identifier(lexer.next_token(), "c"));
        assert!(matches!(lexer.next_token(), Token::EOF));
        assert_eq!(lexer.location(), (5, 3));
    }

    #[test]
    fn lex_hash_inside_line() {
        // '#' is only a comment at the start of a line.
        let mut lexer = Lexer::from_string("a # b\n#c\nd");
        assert!(is_identifier(lexer.next_token(), "a"));
        assert!(matches!(lexer.next_token(), Token::Error(_)));
        assert!(is_identifier(lexer.next_token(), "b"));
        assert!(is_identifier(lexer.next_token(), "d"));
        assert!(matches!(lexer.next_token(), Token::EOF));
    }

    #[test]
    fn lex_strings() {
        let mut lexer = Lexer::from_string("\"ab\" + \"cd\" x \"a\\\"b\"");
        assert!(is_identifier(lexer.next_token(), "abcd"));
        assert!(is_identifier(lexer.next_token(), "x"));
        // Escapes are kept as they are.
        assert!(is_identifier(lexer.next_token(), "a\\\"b"));
        assert!(matches!(lexer.next_token(), Token::EOF));

        let mut lexer = Lexer::from_string("<<b>bold</b>>");
        assert_eq!(
            lexer.next_token(),
            Token::HtmlString("<b>bold</b>".to_string())
        );
    }

    #[test]
    fn lex_errors() {
        let mut lexer = Lexer::from_string("\"abc");
        assert!(matches!(lexer.next_token(), Token::Error(_)));

        let mut lexer = Lexer::from_string("a ! b");
        assert!(is_identifier(lexer.next_token(), "a"));
        assert!(matches!(lexer.next_token(), Token::Error(_)));
        assert!(is_identifier(lexer.next_token(), "b"));
    }

    #[test]
    fn lex_program() {
        let program = get_sample_program();
        let mut lexer = Lexer::from_string(&program[..]);
        let mut tok = lexer.next_token();
        while !matches!(tok, Token::EOF) {
            if let Token::Error(_) = tok {
                lexer.print_error();
                panic!();
            }
            tok = lexer.next_token();
        }
    }

    #[test]
    fn parse_program0() {
        let mut parser = DotParser::new("graph { a -> b; b -> c;}");
        if let Result::Err(err) = parser.process() {
            parser.print_error();
            println!("Error: {}", err);
            panic!();
        }
    }

    #[test]
    fn parse_program1() {
        let mut parser = DotParser::new("graph { a -> b -> c; }");
        if let Result::Err(err) = parser.process() {
            parser.print_error();
            println!("Error: {}", err);
            panic!();
        }
    }

    #[test]
    fn parse_program2() {
        let program = get_sample_program();
        let mut parser = DotParser::new(&program[..]);
        match parser.process() {
            Result::Err(err) => {
                parser.print_error();
                println!("Error: {}", err);
                panic!();
            }
            Result::Ok(graphs) => {
                assert_eq!(graphs.len(), 1);
                assert!(parser.diagnostics().is_empty());
            }
        }
    }

    #[test]
    fn parse_program_fail() {
        let mut parser = DotParser::new("graph { } s");
        if parser.process().is_err() {
            return;
        }
        panic!();
    }

    #[test]
    fn parse_empty_input() {
        let mut parser = DotParser::new("  // nothing here\n");
        assert!(parser.process().is_err());
    }

    #[test]
    fn parse_eof_in_block() {
        let mut parser = DotParser::new("graph { a -- b");
        let err = parser.process().unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedEof);
        assert!(err.is_fatal());
    }

    #[test]
    fn parse_bad_header() {
        let mut parser = DotParser::new("grph { a }");
        let err = parser.process().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!((err.line, err.column), (1, 1));
    }

    #[test]
    fn parse_recovery() {
        let mut parser = DotParser::new("graph {\n a -- ;\n b; c -- d }");
        let graphs = parser.process().unwrap();
        assert_eq!(graphs[0].list.list.len(), 2);
        assert_eq!(parser.diagnostics().len(), 1);
        let err = &parser.diagnostics()[0];
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!((err.line, err.column), (2, 7));

        let parse = parse_program("graph {\n a -- ;\n b; c -- d }");
        assert_eq!(parse.diagnostics().len(), 1);
        assert_eq!(parse.num_nodes(), 3);
        assert_eq!(parse.num_edges(), 1);
    }

    #[test]
    fn error_location_report() {
        let mut parser = DotParser::new("graph {\n a = ;\n}");
        assert!(parser.process().is_ok());
        let err = &parser.diagnostics()[0];
        assert_eq!((err.line, err.column), (2, 6));
        assert_eq!(parser.location_report(err), " a = ;\n     ^");
        assert!(err.to_string().starts_with("2:6: syntax error"));
    }

    #[test]
    fn dump_ast() {
        let mut parser = DotParser::new("digraph { a -> {b c} [color=red] }");
        let graphs = parser.process().unwrap();
        let text = ast_to_string(&graphs[0]);
        assert!(text.contains("Edge:"));
        assert!(text.contains("->"));
        assert!(text.contains("\"color\" = \"red\""));
    }

    #[test]
    fn parse_too_many_errors() {
        let options = ParseOptions::new().with_max_errors(1);
        let mut parser =
            DotParser::with_options("graph { = ; = ; = ; }", options);
        let err = parser.process().unwrap_err();
        assert_eq!(err.kind, ErrorKind::TooManyErrors);

        let mut parser = DotParser::new("graph { = ; = ; = ; }");
        assert!(parser.process().is_ok());
        assert_eq!(parser.diagnostics().len(), 3);
    }

    #[test]
    fn parse_multiple_graphs() {
        let parse = parse_program("graph A { a } digraph B { b -> c }");
        assert_eq!(parse.graphs().count(), 2);
        let a = parse.graph_by_name("A").unwrap();
        let b = parse.graph_by_name("B").unwrap();
        assert!(!parse.graph(a).is_directed());
        assert!(parse.graph(b).is_directed());
        assert_eq!(parse.root_graph(), Some(a));
        assert_eq!(parse.current_graph(), Some(b));
    }

    #[test]
    fn build_sample_program() {
        let parse = parse_program(&get_sample_program());
        let g = parse.root_graph().unwrap();
        assert_eq!(parse.graph(g).name(), "G");
        assert_eq!(parse.all_nodes(g).len(), 5);
        assert_eq!(parse.all_edges(g).len(), 6);

        let i1 = parse.find_node(g, "I1").unwrap();
        let attrs = parse.node(i1).attributes();
        assert_eq!(attrs.get_string("shape"), Some("box"));
        assert_eq!(attrs.get_string("color"), Some("blue"));

        let i5 = parse.find_node(g, "I5").unwrap();
        let label = parse.node(i5).attributes().get("label").unwrap();
        assert!(label.is_html());
        assert_eq!(label.as_str(), "Caroline <b>Kennedy</b>");

        let sub = parse.graph(g).children()[0];
        let i8 = parse.find_node(sub, "I8").unwrap();
        assert_eq!(parse.node(i8).graph(), sub);
        assert_eq!(
            parse.node(i8).attributes().get_string("label"),
            Some("Joseph Patrick Kennedy")
        );
        assert_eq!(
            parse.graph(sub).attributes().get_string("label"),
            Some("Parents")
        );
        // Edges get the edge defaults of their scope.
        for e in parse.all_edges(g) {
            let style = parse.edge(e).attributes().get_string("style");
            assert_eq!(style, Some("bold"));
        }
    }

    #[test]
    fn node_count() {
        let parse = parse_program("graph { a -- b; b -- c; a; c [color=red] }");
        assert_eq!(parse.num_nodes(), 3);
        let g = parse.root_graph().unwrap();
        assert_eq!(parse.node_names(parse.graph(g).nodes()), ["a", "b", "c"]);
    }

    #[test]
    fn edge_chain() {
        let parse = parse_program("digraph { a -> b -> c [color=red] }");
        let g = parse.root_graph().unwrap();
        assert_eq!(parse.num_nodes(), 3);
        assert_eq!(parse.graph(g).edges().len(), 2);
        for e in parse.graph(g).edges() {
            let edge = parse.edge(*e);
            assert!(edge.is_directed());
            assert_eq!(edge.attributes().get_string("color"), Some("red"));
        }
        let b = parse.find_node(g, "b").unwrap();
        assert_eq!(parse.node(b).in_edges().len(), 1);
        assert_eq!(parse.node(b).out_edges().len(), 1);
    }

    #[test]
    fn scope_inheritance() {
        let program = r#"digraph {
            node [color=red];
            a;
            d [color=blue];
            subgraph s { node [color=blue]; b; }
            c;
        }"#;
        let parse = parse_program(program);
        let g = parse.root_graph().unwrap();
        let s = parse.graph(g).children()[0];
        let color = |graph: GraphHandle, name: &str| {
            let n = parse.find_node(graph, name).unwrap();
            parse.node(n).attributes().get_string("color").map(String::from)
        };
        assert_eq!(color(g, "a").as_deref(), Some("red"));
        assert_eq!(color(s, "b").as_deref(), Some("blue"));
        assert_eq!(color(g, "c").as_deref(), Some("red"));
        // Explicit attributes win over the defaults.
        assert_eq!(color(g, "d").as_deref(), Some("blue"));
    }

    #[test]
    fn graph_attributes() {
        let parse =
            parse_program("digraph G { rankdir=LR; graph [bgcolor=white] }");
        let g = parse.root_graph().unwrap();
        let attrs = parse.graph(g).attributes();
        assert_eq!(attrs.get_string("rankdir"), Some("LR"));
        assert_eq!(attrs.get_string("bgcolor"), Some("white"));
    }

    #[test]
    fn typed_attributes() {
        let parse = parse_program(
            "graph { a [width=1.5, fixed=true, pos=\"1,2!\", peripheries=2] }",
        );
        let g = parse.root_graph().unwrap();
        let a = parse.find_node(g, "a").unwrap();
        let attrs = parse.node(a).attributes();
        assert_eq!(attrs.get_real("width"), Some(1.5));
        assert_eq!(attrs.get_bool("fixed"), Some(true));
        assert_eq!(attrs.get_reals("pos"), Some(vec![1., 2.]));
        assert_eq!(attrs.get_integer("peripheries"), Some(2));
        assert_eq!(attrs.get_real("missing"), None);
        // Present but unparsable values are not replaced with a default.
        assert_eq!(attrs.get_real("fixed"), None);
        assert_eq!(attrs.get_bool("width"), None);
    }

    #[test]
    fn load_from_file() {
        let mut path = std::env::temp_dir();
        path.push(format!("dotgraph_test_{}.dot", std::process::id()));
        let filename = path.to_str().unwrap().to_string();
        save_to_file(&filename, "digraph { a -> b }").unwrap();

        let mut parse = Parse::new();
        parse.load_file(&filename).unwrap();
        assert_eq!(parse.num_edges(), 1);
        let _ = std::fs::remove_file(&filename);

        let err = parse.load_file(&format!("{}.missing", filename)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
    }

    #[test]
    fn subgraph_lookup() {
        let parse = parse_program("graph { a; subgraph s { a -- b } }");
        let g = parse.root_graph().unwrap();
        let s = parse.graph(g).children()[0];

        let a = parse.find_node(g, "a").unwrap();
        assert_eq!(parse.find_node(s, "a"), Some(a));
        assert_eq!(parse.node(a).graph(), g);
        assert!(parse.graph(s).is_member(a));

        // 'b' is only visible from the subgraph.
        assert!(parse.find_node(g, "b").is_none());
        let b = parse.find_node(s, "b").unwrap();
        assert_eq!(parse.node(b).graph(), s);

        let e = parse.graph(s).edges()[0];
        assert_eq!(parse.edge(e).from(), a);
        assert_eq!(parse.edge(e).other(a), b);
        assert_eq!(parse.num_nodes(), 2);
    }

    #[test]
    fn sibling_scopes() {
        let parse =
            parse_program("graph { subgraph x { a } subgraph y { a } }");
        let g = parse.root_graph().unwrap();
        let x = parse.find_child(g, "x").unwrap();
        let y = parse.find_child(g, "y").unwrap();
        assert_ne!(parse.find_node(x, "a"), parse.find_node(y, "a"));
        assert_eq!(parse.num_nodes(), 2);
    }

    #[test]
    fn nested_declaration() {
        let parse =
            parse_program("digraph G { subgraph cluster_0 { a0 -> a1 } start -> a0 }");
        let g = parse.root_graph().unwrap();
        let cluster = parse.find_child(g, "cluster_0").unwrap();
        assert_eq!(parse.num_nodes(), 3);

        // The root sees the node that the cluster declared.
        let a0 = parse.find_node(cluster, "a0").unwrap();
        assert_eq!(parse.resolve_node(g, "a0"), Some(a0));
        assert_eq!(parse.node(a0).graph(), cluster);
        assert!(parse.graph(g).is_member(a0));

        let start = parse.find_node(g, "start").unwrap();
        let a1 = parse.find_node(cluster, "a1").unwrap();
        let path = parse.shortest_path(g, start, a1);
        assert_eq!(parse.node_names(&path), ["start", "a0", "a1"]);

        let tree = parse.minimum_spanning_tree(g);
        assert_eq!(tree.num_nodes(), 3);
        assert_eq!(tree.num_edges(), 2);
    }

    #[test]
    fn subgraph_reopen() {
        let parse =
            parse_program("graph { subgraph s { a } subgraph s { b } {c} {d} }");
        let g = parse.root_graph().unwrap();
        // The anonymous subgraphs are never merged.
        assert_eq!(parse.graph(g).children().len(), 3);
        let s = parse.find_child(g, "s").unwrap();
        assert_eq!(parse.node_names(parse.graph(s).nodes()), ["a", "b"]);
    }

    #[test]
    fn subgraph_order() {
        let parse = parse_program(
            "graph { subgraph x { subgraph y { } } subgraph z { } }",
        );
        let g = parse.root_graph().unwrap();
        let names: Vec<&str> = parse
            .sub_graphs(g)
            .iter()
            .map(|h| parse.graph(*h).name())
            .collect();
        assert_eq!(names, ["x", "y", "z"]);
        let y = parse.sub_graphs(g)[1];
        assert!(!parse.graph(y).is_root());
        assert_eq!(parse.graph(y).parent(), parse.find_child(g, "x"));
    }

    #[test]
    fn subgraph_fan_out() {
        let parse = parse_program("digraph { {a b} -> {c d} }");
        let g = parse.root_graph().unwrap();
        let edges: Vec<(String, String)> = parse
            .all_edges(g)
            .iter()
            .map(|e| {
                let edge = parse.edge(*e);
                (
                    parse.node(edge.from()).name().to_string(),
                    parse.node(edge.to()).name().to_string(),
                )
            })
            .collect();
        let expected = [("a", "c"), ("a", "d"), ("b", "c"), ("b", "d")];
        assert_eq!(edges.len(), expected.len());
        for (edge, exp) in edges.iter().zip(expected.iter()) {
            assert_eq!((edge.0.as_str(), edge.1.as_str()), *exp);
        }
    }

    #[test]
    fn strict_graph() {
        let parse =
            parse_program("strict graph { a -- b; b -- a [color=red]; a -- b }");
        let g = parse.root_graph().unwrap();
        assert_eq!(parse.num_edges(), 1);
        let e = parse.graph(g).edges()[0];
        let color = parse.edge(e).attributes().get_string("color");
        assert_eq!(color, Some("red"));

        let parse = parse_program("graph { a -- b; b -- a }");
        assert_eq!(parse.num_edges(), 2);
    }

    #[test]
    fn edge_ports() {
        let parse = parse_program("digraph { a:p1:n -> b:p2 }");
        let g = parse.root_graph().unwrap();
        let e = parse.graph(g).edges()[0];
        let attrs = parse.edge(e).attributes();
        assert_eq!(attrs.get_string("tailport"), Some("p1:n"));
        assert_eq!(attrs.get_string("headport"), Some("p2"));
        // The port is not part of the node name.
        assert_eq!(parse.num_nodes(), 2);
        assert!(parse.find_node(g, "a").is_some());
    }

    #[test]
    fn arrow_mismatch() {
        let parse = parse_program("digraph { a -- b }");
        assert_eq!(parse.diagnostics().len(), 1);
        assert_eq!(parse.diagnostics()[0].kind, ErrorKind::Semantic);
        let g = parse.root_graph().unwrap();
        let e = parse.graph(g).edges()[0];
        assert!(parse.edge(e).is_directed());

        let err = &parse.diagnostics()[0];
        assert_eq!((err.line, err.column), (1, 13));
        assert!(err.to_string().starts_with("1:13: warning"));
    }

    #[test]
    fn round_trip() {
        let program = r#"digraph G {
            node [shape=box];
            a [label="x y"];
            a -> b [weight=2];
            subgraph cluster_0 { c; a -> c; }
        }"#;
        let first = parse_program(program);
        let g = first.root_graph().unwrap();
        let text = first.to_dot(g);

        let second = parse_program(&text);
        let g2 = second.root_graph().unwrap();
        assert_eq!(second.num_nodes(), first.num_nodes());
        assert_eq!(second.num_edges(), first.num_edges());
        assert_eq!(second.num_graphs(), first.num_graphs());
        assert_eq!(second.to_dot(g2), text);

        let c = second.find_node(second.graph(g2).children()[0], "c").unwrap();
        let shape = second.node(c).attributes().get_string("shape");
        assert_eq!(shape, Some("box"));
    }

    fn edge_names(parse: &Parse) -> Vec<(String, String)> {
        let g = parse.root_graph().unwrap();
        parse
            .all_edges(g)
            .iter()
            .map(|e| {
                let edge = parse.edge(*e);
                (
                    parse.node(edge.from()).name().to_string(),
                    parse.node(edge.to()).name().to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn round_trip_nested_nodes() {
        for program in [
            "digraph { {a b} -> c }",
            "digraph G { subgraph cluster_0 { a0 -> a1 } start -> a0 }",
            "graph { x -- {y z}; subgraph s { {p} -- q } }",
        ] {
            let first = parse_program(program);
            let text = first.to_dot(first.root_graph().unwrap());
            let second = parse_program(&text);

            assert_eq!(second.num_nodes(), first.num_nodes());
            assert_eq!(second.num_edges(), first.num_edges());
            assert_eq!(edge_names(&second), edge_names(&first));
            assert_eq!(second.to_dot(second.root_graph().unwrap()), text);
        }
    }

    #[test]
    fn parse_is_deterministic() {
        let program = get_sample_program();
        let first = parse_program(&program);
        let second = parse_program(&program);
        let g1 = first.root_graph().unwrap();
        let g2 = second.root_graph().unwrap();

        assert_eq!(first.num_graphs(), second.num_graphs());
        assert_eq!(
            first.node_names(&first.all_nodes(g1)),
            second.node_names(&second.all_nodes(g2))
        );
        assert_eq!(edge_names(&first), edge_names(&second));
        assert_eq!(first.to_dot(g1), second.to_dot(g2));
        assert_eq!(first.to_csv(g1), second.to_csv(g2));
    }

    #[test]
    fn csv_output() {
        let parse =
            parse_program("digraph { a -> b [color=red]; b -> c [weight=2] }");
        let g = parse.root_graph().unwrap();
        assert_eq!(
            parse.to_csv(g),
            "from,to,color,weight\na,b,red,\nb,c,,2\n"
        );
    }

    #[test]
    fn mst_cycle() {
        let parse = parse_program(
            "graph { a -- b [weight=1]; b -- c [weight=2]; \
             c -- d [weight=3]; d -- a [weight=4]; }",
        );
        let g = parse.root_graph().unwrap();
        let tree = parse.minimum_spanning_tree(g);
        let t = tree.root_graph().unwrap();
        assert_eq!(tree.num_nodes(), 4);
        assert_eq!(tree.graph(t).edges().len(), 3);

        let weights: Vec<f64> = tree
            .graph(t)
            .edges()
            .iter()
            .map(|e| tree.edge(*e).attributes().get_real("weight").unwrap())
            .collect();
        assert_eq!(weights.iter().sum::<f64>(), 6.);
        assert!(!weights.contains(&4.));
    }

    #[test]
    fn mst_equal_weights() {
        // Equal weights are taken in declaration order.
        let parse = parse_program(
            "graph { a -- b; b -- c; a -- c; c -- d [weight=0.5] }",
        );
        let g = parse.root_graph().unwrap();
        let tree = parse.minimum_spanning_tree(g);
        let names = edge_names(&tree);
        let expected = [("a", "b"), ("b", "c"), ("c", "d")];
        assert_eq!(names.len(), expected.len());
        for (edge, exp) in names.iter().zip(expected.iter()) {
            assert_eq!((edge.0.as_str(), edge.1.as_str()), *exp);
        }
    }

    #[test]
    fn mst_forest() {
        let parse = parse_program("graph { a -- b; c -- d; e; a -- b }");
        let g = parse.root_graph().unwrap();
        let tree = parse.minimum_spanning_tree(g);
        let t = tree.root_graph().unwrap();
        assert_eq!(tree.num_nodes(), 5);
        assert_eq!(tree.graph(t).edges().len(), 2);
    }

    #[test]
    fn mst_subgraphs() {
        let parse = parse_program(
            "graph { a; c; subgraph s { a -- b [weight=5]; b -- c } a -- c }",
        );
        let g = parse.root_graph().unwrap();
        let tree = parse.minimum_spanning_tree(g);
        let t = tree.root_graph().unwrap();
        assert_eq!(tree.num_nodes(), 3);
        for e in tree.graph(t).edges() {
            assert!(tree.edge(*e).attributes().get("weight").is_none());
        }
    }

    #[test]
    fn shortest_path() {
        let parse = parse_program("digraph { a -> b -> c; a -> c; d }");
        let g = parse.root_graph().unwrap();
        let a = parse.find_node(g, "a").unwrap();
        let c = parse.find_node(g, "c").unwrap();
        let d = parse.find_node(g, "d").unwrap();

        let path = parse.shortest_path(g, a, c);
        assert_eq!(parse.node_names(&path), ["a", "c"]);
        assert_eq!(parse.shortest_path(g, a, a), vec![a]);
        assert!(parse.shortest_path(g, a, d).is_empty());
        // Directed edges are only followed forward.
        assert!(parse.shortest_path(g, c, a).is_empty());
    }

    #[test]
    fn shortest_path_disconnected() {
        let parse = parse_program("graph { a; b }");
        let g = parse.root_graph().unwrap();
        let a = parse.find_node(g, "a").unwrap();
        let b = parse.find_node(g, "b").unwrap();
        assert!(parse.shortest_path(g, a, b).is_empty());
        assert!(parse.shortest_path_weighted(g, a, b).is_empty());
    }

    #[test]
    fn shortest_path_weighted() {
        let parse = parse_program(
            "graph { a -- b [weight=1]; b -- c [weight=1]; a -- c [weight=5] }",
        );
        let g = parse.root_graph().unwrap();
        let a = parse.find_node(g, "a").unwrap();
        let c = parse.find_node(g, "c").unwrap();

        let path = parse.shortest_path_weighted(g, a, c);
        assert_eq!(parse.node_names(&path), ["a", "b", "c"]);
        assert_eq!(parse.path_weight(g, &path), 2.);

        // Undirected edges are followed both ways.
        let back = parse.shortest_path_weighted(g, c, a);
        assert_eq!(parse.node_names(&back), ["c", "b", "a"]);

        let hops = parse.shortest_path(g, a, c);
        assert_eq!(parse.path_weight(g, &hops), 5.);
    }

    #[derive(Default)]
    struct Counter {
        graphs: usize,
        nodes: usize,
        edges: usize,
    }

    impl Factory for Counter {
        type GraphData = usize;
        type NodeData = String;
        type EdgeData = usize;

        fn make_graph(&mut self, _graph: &Graph) -> usize {
            self.graphs += 1;
            self.graphs
        }
        fn make_node(&mut self, node: &Node) -> String {
            self.nodes += 1;
            let color = node.attributes().get_string("color").unwrap_or("");
            format!("{}:{}", node.name(), color)
        }
        fn make_edge(&mut self, _edge: &Edge) -> usize {
            self.edges += 1;
            self.edges
        }
    }

    #[test]
    fn factory_data() {
        let mut parse = Parse::with_factory(Counter::default());
        let program = "graph { node [color=red]; a -- b; subgraph { c } }";
        parse.parse_str(program).unwrap();
        assert_eq!(parse.factory().graphs, 2);
        assert_eq!(parse.factory().nodes, 3);
        assert_eq!(parse.factory().edges, 1);

        let g = parse.root_graph().unwrap();
        let b = parse.find_node(g, "b").unwrap();
        assert_eq!(parse.node_data(b), "b:red");
        assert_eq!(*parse.graph_data(g), 1);
        let e = parse.graph(g).edges()[0];
        *parse.edge_data_mut(e) += 10;
        assert_eq!(*parse.edge_data(e), 11);
    }
}
