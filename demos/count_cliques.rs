use std::path::PathBuf;

use clap::Parser;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use clique_rs::dimacs;
use clique_rs::graph::{Graph, UndirectedGraph};
use clique_rs::pivot::PivotRule;
use clique_rs::search::{Search, SearchConfig};
use clique_rs::sink::{CollectingSink, CountingSink, TraceSink};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Input graph in DIMACS format. A random graph is generated if omitted.
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Pivot rule: tomita-et-al, naude or segundo-et-al.
    #[arg(short = 'r', long, value_name = "RULE", default_value = "tomita-et-al")]
    pivot: PivotRule,

    /// Renumber vertices max-degree-first before searching.
    #[arg(long)]
    degree_ordering: bool,

    /// Number of vertices of the random graph.
    #[arg(short, value_name = "INT", default_value = "100")]
    n: usize,

    /// Edge probability of the random graph.
    #[arg(short, value_name = "FLOAT", default_value = "0.3")]
    p: f64,

    /// Seed of the random graph.
    #[arg(long, value_name = "INT", default_value = "42")]
    seed: u64,

    /// Print every clique.
    #[arg(long)]
    print: bool,

    /// Print the search tree (small graphs only).
    #[arg(long)]
    trace: bool,

    /// Write the graph to this file in DIMACS format.
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,
}

fn random_graph(n: usize, p: f64, seed: u64) -> Graph {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut graph = Graph::new(n);
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.gen_bool(p) {
                graph.add_edge(u, v);
            }
        }
    }
    graph
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let graph = match &args.input {
        Some(path) => {
            println!("Loading graph from '{}'", path.display());
            dimacs::load(path)?
        }
        None => {
            println!("Generating G(n = {}, p = {}) with seed {}", args.n, args.p, args.seed);
            random_graph(args.n, args.p, args.seed)
        }
    };
    println!("Graph: {} vertices, {} edges", graph.vertex_count(), graph.edge_count());

    if let Some(path) = &args.save {
        dimacs::save(&graph, path)?;
        println!("Saved graph to '{}'", path.display());
    }

    let config = SearchConfig::new(args.pivot).with_degree_ordering(args.degree_ordering);
    println!("config = {:?}", config);

    let time_search = std::time::Instant::now();
    let stats = if args.trace {
        let (stats, trace) = Search::new(&graph, &config, TraceSink::new()).run();
        print!("{}", trace);
        stats
    } else if args.print {
        let (stats, sink) = Search::new(&graph, &config, CollectingSink::new()).run();
        for clique in sink.cliques() {
            println!("{:?}", clique);
        }
        stats
    } else {
        Search::new(&graph, &config, CountingSink::new()).run().0
    };
    let elapsed_search = time_search.elapsed();

    println!("cliques:    {}", stats.cliques);
    println!("recursions: {}", stats.recursions);
    println!("cut-offs:   {}", stats.cut_offs);
    println!("search time: {:.3} s", elapsed_search.as_secs_f64());

    let elapsed = time_total.elapsed();
    println!();
    println!("All done in {:.3} s", elapsed.as_secs_f64());

    Ok(())
}
