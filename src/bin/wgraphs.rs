//! Command-line harness: loads an edge list into one of the backends and runs a query on it.
//!
//! Logging is controlled via `RUST_LOG` (default `warn`), eg. `RUST_LOG=wgraphs=trace` reports
//! every dropped input line.

use std::{
    io::{Write, stdout},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wgraphs::{algo::*, error::GraphError, io::*, prelude::*};

/// Weighted directed graphs from edge-list files
#[derive(Parser, Debug)]
#[command(name = "wgraphs")]
#[command(version)]
struct Cli {
    /// Edge-list file: one `from [to [weight]]` record per line
    file: PathBuf,

    /// Storage backend (`sparse` or `dense`)
    #[arg(short, long, default_value_t = Backend::Sparse)]
    backend: Backend,

    /// Weight of edges given without one
    #[arg(short = 'w', long, default_value_t = DEFAULT_WEIGHT)]
    default_weight: Weight,

    /// Fail on malformed lines instead of dropping them
    #[arg(long, default_value_t = false)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the graph as an edge list
    Dump {
        /// Order edges by `(from, to)`
        #[arg(short, long, default_value_t = false)]
        sorted: bool,
    },

    /// Depth-first search along edge directions
    Dfs {
        #[arg(value_parser = clap::value_parser!(Node).range(0..))]
        source: Node,

        /// Defaults to the source
        #[arg(value_parser = clap::value_parser!(Node).range(0..))]
        sink: Option<Node>,

        /// Stop as soon as the sink is discovered
        #[arg(long, default_value_t = false)]
        stop_at_sink: bool,
    },

    /// Depth-first search ignoring edge directions
    Digress {
        #[arg(value_parser = clap::value_parser!(Node).range(0..))]
        source: Node,

        /// Defaults to the source
        #[arg(value_parser = clap::value_parser!(Node).range(0..))]
        sink: Option<Node>,

        /// Stop as soon as the sink is discovered
        #[arg(long, default_value_t = false)]
        stop_at_sink: bool,
    },

    /// Color the weakly connected components
    Components,

    /// Load the file into both backends and compare them
    Compare,
}

fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load(cli: &Cli, backend: Backend) -> Result<Box<dyn Graph>, GraphError> {
    let reader = EdgeListReader::new()
        .default_weight(cli.default_weight)
        .strict(cli.strict);

    let mut graph = backend.create();
    reader.try_read_file_into(&cli.file, &mut *graph)?;

    info!(
        file = %cli.file.display(),
        %backend,
        nodes = graph.node_count(),
        "loaded graph"
    );
    Ok(graph)
}

fn run(cli: Cli) -> Result<(), GraphError> {
    let mut out = stdout().lock();

    match cli.command {
        Command::Dump { sorted } => {
            let graph = load(&cli, cli.backend)?;
            EdgeListWriter::new()
                .sorted(sorted)
                .try_write_graph(&*graph, &mut out)?;
        }

        Command::Dfs {
            source,
            sink,
            stop_at_sink,
        } => {
            let graph = load(&cli, cli.backend)?;
            let dfs = ReachabilityDfs::new().stop_at_sink(stop_at_sink);
            report_search(&mut out, dfs, graph.as_ref(), source, sink.unwrap_or(source))?;
        }

        Command::Digress {
            source,
            sink,
            stop_at_sink,
        } => {
            let graph = load(&cli, cli.backend)?;
            let dfs = DigressDfs::new().stop_at_sink(stop_at_sink);
            report_search(&mut out, dfs, graph.as_ref(), source, sink.unwrap_or(source))?;
        }

        Command::Components => {
            let graph = load(&cli, cli.backend)?;
            let mut coloring = ComponentColoring::new();
            coloring.init(graph.as_ref());
            coloring.execute(0, 0);

            writeln!(out, "components: {}", coloring.component_count())?;
            writeln!(out, "weight: {}", coloring.total_weight())?;
            for (color, nodes) in coloring.components().iter().enumerate() {
                let nodes = nodes.iter().map(Node::to_string).collect::<Vec<_>>();
                writeln!(out, "{color}: {}", nodes.join(" "))?;
            }
        }

        Command::Compare => {
            let graphs = Backend::ALL.map(|backend| load(&cli, backend));
            let [sparse, dense] = graphs;
            let (sparse, dense) = (sparse?, dense?);

            let equal = *sparse == *dense;
            debug!(equal, "compared backends");
            for (backend, graph) in Backend::ALL.iter().zip([&sparse, &dense]) {
                writeln!(
                    out,
                    "{backend}: {} nodes, {} edges, end node {}",
                    graph.node_count(),
                    graph.edge_count(),
                    graph.end_node()
                )?;
            }
            writeln!(out, "{}", if equal { "equal" } else { "different" })?;
        }
    }

    out.flush()?;
    Ok(())
}

fn report_search<'a, X: Expansion>(
    out: &mut impl Write,
    mut dfs: DepthFirstQuery<'a, X>,
    graph: &'a dyn Graph,
    source: Node,
    sink: Node,
) -> Result<(), GraphError> {
    dfs.init(graph);
    dfs.execute(source, sink);

    writeln!(out, "weight: {}", dfs.yield_weight())?;
    if dfs.reached_sink() {
        writeln!(out, "reached: {}", dfs.yield_node())?;
    } else {
        writeln!(out, "reached: none")?;
    }

    let visited = dfs.visited_nodes().iter().map(Node::to_string).collect::<Vec<_>>();
    writeln!(out, "visited: {}", visited.join(" "))?;
    Ok(())
}
