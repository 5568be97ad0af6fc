//! This is the command line tool that loads '.dot' files, parses them into
//! the graph model, and prints the graph, its spanning tree, the shortest
//! path between two nodes, or the list of subgraphs.

extern crate clap;
extern crate env_logger;
extern crate log;

use clap::{value_parser, Arg, ArgAction, Command};
use dotgraph::core::options::{ParseOptions, DEFAULT_MAX_ERRORS};
use dotgraph::core::utils::save_to_file;
use dotgraph::graph::{GraphHandle, Parse};
use dotgraph::gv;
use gv::parser::DotParser;
use gv::GraphBuilder;
use std::fs;
use std::process::exit;

struct CLIOptions {
    debug_mode: bool,
    dump_ast: bool,
    print: bool,
    csv: bool,
    mst: bool,
    sub_graphs: bool,
    path: Option<(String, String)>,
    weighted: bool,
    max_errors: usize,
    output_path: Option<String>,
}

impl CLIOptions {
    pub fn new() -> Self {
        Self {
            debug_mode: false,
            dump_ast: false,
            print: false,
            csv: false,
            mst: false,
            sub_graphs: false,
            path: None,
            weighted: false,
            max_errors: DEFAULT_MAX_ERRORS,
            output_path: None,
        }
    }

    fn parse_options(&self) -> ParseOptions {
        ParseOptions::new()
            .with_debug(self.debug_mode)
            .with_max_errors(self.max_errors)
    }
}

fn print_sub_graphs(parse: &Parse, graph: GraphHandle, out: &mut String) {
    for sub in parse.sub_graphs(graph) {
        let sg = parse.graph(sub);
        out.push_str(&format!("Sub Graph {}\n", sg.name()));
        for e in sg.edges() {
            let edge = parse.edge(*e);
            out.push_str(&format!(
                " {} {} {}\n",
                parse.node(edge.from()).name(),
                if edge.is_directed() { "->" } else { "--" },
                parse.node(edge.to()).name()
            ));
        }
    }
}

fn print_path(
    parse: &Parse,
    from: &str,
    to: &str,
    weighted: bool,
    out: &mut String,
) -> Result<(), String> {
    let graph = match parse.root_graph() {
        Some(g) => g,
        None => return Result::Err("The file has no graphs".to_string()),
    };
    let find = |name: &str| {
        parse
            .all_nodes(graph)
            .into_iter()
            .find(|n| parse.node(*n).name() == name)
            .ok_or(format!("Unknown node \"{}\"", name))
    };
    let source = find(from)?;
    let target = find(to)?;

    let path = if weighted {
        parse.shortest_path_weighted(graph, source, target)
    } else {
        parse.shortest_path(graph, source, target)
    };

    if path.is_empty() {
        out.push_str(&format!("No path from {} to {}\n", from, to));
        return Result::Ok(());
    }
    let names = parse.node_names(&path);
    out.push_str(&format!(
        "{} (weight {})\n",
        names.join(" -> "),
        parse.path_weight(graph, &path)
    ));
    Result::Ok(())
}

fn generate_output(parse: &Parse, options: &CLIOptions) -> String {
    let mut out = String::new();
    let roots: Vec<GraphHandle> = parse.graphs().map(|(_, h)| h).collect();

    for g in &roots {
        if options.debug_mode {
            eprint!("{}", parse.trace(*g));
        }
        if options.print {
            out.push_str(&parse.to_dot(*g));
        }
        if options.csv {
            out.push_str(&parse.to_csv(*g));
        }
        if options.mst {
            log::info!("Minimum spanning tree");
            let tree = parse.minimum_spanning_tree(*g);
            if let Some(t) = tree.root_graph() {
                out.push_str(&tree.to_dot(t));
            }
        }
        if options.sub_graphs {
            log::info!("Sub graphs");
            print_sub_graphs(parse, *g, &mut out);
        }
    }

    if let Some((from, to)) = &options.path {
        if let Result::Err(err) =
            print_path(parse, from, to, options.weighted, &mut out)
        {
            log::error!("{}", err);
        }
    }
    out
}

fn main() {
    let matches = Command::new("dotgraph")
        .version("1.x")
        .arg(
            Arg::new("d")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Trace the construction of the graph"),
        )
        .arg(
            Arg::new("a")
                .short('a')
                .long("ast")
                .action(ArgAction::SetTrue)
                .help("Dump the graph AST"),
        )
        .arg(
            Arg::new("print")
                .short('p')
                .long("print")
                .action(ArgAction::SetTrue)
                .help("Print the parsed graphs as DOT"),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .action(ArgAction::SetTrue)
                .help("Print the edges as CSV"),
        )
        .arg(
            Arg::new("mst")
                .long("mst")
                .action(ArgAction::SetTrue)
                .help("Print the minimum spanning tree of every graph"),
        )
        .arg(
            Arg::new("sub-graphs")
                .long("sub-graphs")
                .action(ArgAction::SetTrue)
                .help("List the subgraphs and their edges"),
        )
        .arg(
            Arg::new("path")
                .long("path")
                .num_args(2)
                .value_names(["FROM", "TO"])
                .help("Print the shortest path between two nodes"),
        )
        .arg(
            Arg::new("weighted")
                .long("weighted")
                .action(ArgAction::SetTrue)
                .help("Use the 'weight' attribute for --path"),
        )
        .arg(
            Arg::new("max-errors")
                .long("max-errors")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Give up after N syntax errors"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path of the output file"),
        )
        .arg(
            Arg::new("INPUT")
                .help("Sets the input file to use")
                .required(true)
                .index(1),
        )
        .get_matches();

    let mut cli = CLIOptions::new();
    cli.debug_mode = matches.get_flag("d");
    cli.dump_ast = matches.get_flag("a");
    cli.print = matches.get_flag("print");
    cli.csv = matches.get_flag("csv");
    cli.mst = matches.get_flag("mst");
    cli.sub_graphs = matches.get_flag("sub-graphs");
    cli.weighted = matches.get_flag("weighted");
    if let Some(mut names) = matches.get_many::<String>("path") {
        if let (Some(from), Some(to)) = (names.next(), names.next()) {
            cli.path = Some((from.clone(), to.clone()));
        }
    }
    if let Some(n) = matches.get_one::<usize>("max-errors") {
        cli.max_errors = *n;
    }
    cli.output_path = matches.get_one::<String>("output").cloned();

    let mut logger = env_logger::builder();
    logger.format_timestamp(None);
    if cli.debug_mode {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let input_path = match matches.get_one::<String>("INPUT") {
        Some(path) => path,
        None => exit(1),
    };
    let contents = match fs::read_to_string(input_path) {
        Result::Ok(contents) => contents,
        Result::Err(err) => {
            log::error!("Can't open the file {}: {}", input_path, err);
            exit(1);
        }
    };

    let options = cli.parse_options();
    let mut parser = DotParser::with_options(&contents, options.clone());
    let graphs = match parser.process() {
        Result::Err(err) => {
            eprintln!("{}", parser.location_report(&err));
            log::error!("Error: {}", err);
            exit(1);
        }
        Result::Ok(graphs) => graphs,
    };

    if cli.dump_ast {
        for g in &graphs {
            gv::dump_ast(g);
        }
    }

    let mut parse = Parse::new().with_options(options);
    let mut builder = GraphBuilder::new(&mut parse);
    for g in &graphs {
        builder.visit_graph(g);
    }

    let recovered = parser.diagnostics().len() + parse.diagnostics().len();
    if recovered > 0 {
        log::warn!("Parsed with {} errors and warnings", recovered);
    }
    log::info!(
        "Parsed {} graphs, {} nodes, {} edges",
        parse.num_graphs(),
        parse.num_nodes(),
        parse.num_edges()
    );

    let content = generate_output(&parse, &cli);
    match &cli.output_path {
        Some(path) => {
            if let Result::Err(err) = save_to_file(path, &content) {
                log::error!("Could not write the file {}", path);
                log::error!("Error {}", err);
                exit(1);
            }
        }
        None => print!("{}", content),
    }
}
