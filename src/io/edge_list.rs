//! # EdgeList
//!
//! Reader and writer for the edge-list text format: one `from [to [weight]]` record per line.
//!
//! ```
//! use wgraphs::{prelude::*, io::*};
//!
//! let graph = DenseGraph::from_text("0 1 0.5\n1 2\n3\n");
//! assert_eq!(graph.weight(0, 1), 0.5);
//! assert_eq!(graph.weight(1, 2), DEFAULT_WEIGHT);
//! assert!(graph.has_node(3));
//!
//! assert_eq!(graph.to_edge_list_string(), "0 1 0.5\n1 2 1\n");
//! ```

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, ErrorKind, Write},
    path::Path,
};

use tracing::{debug, trace};

use super::*;

/// Interpretation of a single input line
#[derive(Debug, Clone, Copy, PartialEq)]
enum Record {
    Blank,
    Node(Node),
    Edge(Edge),
    Malformed(&'static str),
}

/// Line counters reported after reading
#[derive(Default)]
struct ReadStats {
    nodes: usize,
    edges: usize,
    dropped: usize,
}

impl ReadStats {
    fn report(&self, message: &str) {
        debug!(
            nodes = self.nodes,
            edges = self.edges,
            dropped = self.dropped,
            "{message}"
        );
    }
}

/// A GraphReader for the EdgeList-Format
#[derive(Debug, Clone)]
pub struct EdgeListReader {
    /// Weight of edges whose line has no weight field
    default_weight: Weight,
    /// Malformed lines raise an error instead of being dropped
    strict: bool,
}

impl Default for EdgeListReader {
    fn default() -> Self {
        Self {
            default_weight: DEFAULT_WEIGHT,
            strict: false,
        }
    }
}

impl EdgeListReader {
    /// Creates a new (default) reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the weight assigned to edges given without one.
    /// ** Panics if `weight` is `NaN` **
    #[track_caller]
    pub fn default_weight(mut self, weight: Weight) -> EdgeListReader {
        assert!(is_weight(weight), "default weight must not be NaN");
        self.default_weight = weight;
        self
    }

    /// If set, malformed lines are reported as errors instead of being dropped
    pub fn strict(mut self, strict: bool) -> EdgeListReader {
        self.strict = strict;
        self
    }

    /// Classifies a single line
    fn parse_record(&self, line: &str) -> Record {
        let mut fields = line.split_whitespace();

        let Some(from) = fields.next() else {
            return Record::Blank;
        };
        let Ok(from) = from.parse::<Node>() else {
            return Record::Malformed("source node is not an integer");
        };
        if !is_node(from) {
            return Record::Malformed("source node is negative");
        }
        if !is_addable(from) {
            return Record::Malformed("source node is out of range");
        }

        let Some(to) = fields.next() else {
            return Record::Node(from);
        };
        let Ok(to) = to.parse::<Node>() else {
            return Record::Malformed("target node is not an integer");
        };
        if !is_node(to) {
            return Record::Node(from);
        }
        if !is_addable(to) {
            return Record::Malformed("target node is out of range");
        }

        let weight = match fields.next().map(str::parse::<Weight>) {
            None => self.default_weight,
            Some(Ok(weight)) if is_weight(weight) => weight,
            Some(_) => return Record::Malformed("weight is not a number"),
        };

        Record::Edge(Edge(from, to, weight))
    }

    /// Inserts the record of line `number` into `graph`.
    /// Returns the reason if the line had to be dropped.
    fn insert_line<G>(
        &self,
        number: usize,
        line: &str,
        graph: &mut G,
        stats: &mut ReadStats,
    ) -> Option<&'static str>
    where
        G: GraphEdgeEditing + ?Sized,
    {
        match self.parse_record(line) {
            Record::Blank => {}
            Record::Node(node) => {
                graph.add_node(node);
                stats.nodes += 1;
            }
            Record::Edge(Edge(from, to, weight)) => {
                graph.add_edge(from, to, weight);
                stats.edges += 1;
            }
            Record::Malformed(reason) => {
                trace!(line = number, reason, "dropping malformed line");
                stats.dropped += 1;
                return Some(reason);
            }
        }
        None
    }

    /// Appends every well-formed line of `text` to `graph`; never fails as malformed lines are
    /// always dropped, regardless of [`EdgeListReader::strict`].
    pub fn read_str_into<G>(&self, text: &str, graph: &mut G)
    where
        G: GraphEdgeEditing + ?Sized,
    {
        let mut stats = ReadStats::default();
        for (i, line) in text.lines().enumerate() {
            self.insert_line(i + 1, line, graph, &mut stats);
        }
        stats.report("parsed edge list");
    }
}

impl GraphReader for EdgeListReader {
    fn try_read_into<G, R>(&self, reader: R, graph: &mut G) -> Result<()>
    where
        G: GraphEdgeEditing + ?Sized,
        R: BufRead,
    {
        let mut stats = ReadStats::default();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let dropped = self.insert_line(i + 1, &line, graph, &mut stats);
            if let Some(reason) = dropped {
                raise_error_unless!(
                    !self.strict,
                    ErrorKind::InvalidData,
                    format!("Malformed line {}: {reason}.", i + 1)
                );
            }
        }

        stats.report("read edge list");
        Ok(())
    }
}

/// Trait for creating graphs from the EdgeList-Format.
/// Used as shorthand for default EdgeListReader settings
pub trait EdgeListRead: Sized {
    /// Creates a graph from text; malformed lines are dropped
    fn from_text(text: &str) -> Self;

    /// Tries to read the graph from a given reader
    fn try_read_edge_list<R: BufRead>(reader: R) -> Result<Self>;

    /// Tries to read the graph from a given file
    fn try_read_edge_list_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::try_read_edge_list(BufReader::new(File::open(path)?))
    }
}

impl<G> EdgeListRead for G
where
    G: GraphNew + GraphEdgeEditing,
{
    fn from_text(text: &str) -> Self {
        let mut graph = G::new();
        graph.parse_str(text);
        graph
    }

    fn try_read_edge_list<R: BufRead>(reader: R) -> Result<Self> {
        EdgeListReader::default().try_read_graph(reader)
    }
}

/// Trait for appending the content of an edge list to an existing graph
pub trait EdgeListParse {
    /// Adds all nodes and edges described by `text`; malformed lines are dropped
    fn parse_str(&mut self, text: &str);

    /// Adds all nodes and edges described by the file at `path`
    fn parse_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()>;
}

impl<G> EdgeListParse for G
where
    G: GraphEdgeEditing + ?Sized,
{
    fn parse_str(&mut self, text: &str) {
        EdgeListReader::default().read_str_into(text, self);
    }

    fn parse_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        EdgeListReader::default().try_read_file_into(path, self)
    }
}

/// Formats an edge as a line of the EdgeList-Format (without line break)
struct EdgeLine(Edge);

impl std::fmt::Display for EdgeLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Edge(from, to, weight) = self.0;
        write!(f, "{from} {to} {weight}")
    }
}

/// A writer for the EdgeList-Format
#[derive(Debug, Clone, Default)]
pub struct EdgeListWriter {
    /// Emit edges ordered by `(from, to)` instead of the backend's iteration order
    sorted: bool,
}

impl EdgeListWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// If set, edges are written in ascending `(from, to)` order for every backend
    pub fn sorted(mut self, sorted: bool) -> EdgeListWriter {
        self.sorted = sorted;
        self
    }

    fn lines<G: Graph + ?Sized>(&self, graph: &G) -> impl Iterator<Item = EdgeLine> {
        let edges = if self.sorted {
            graph.ordered_edges()
        } else {
            graph.edges()
        };
        edges.into_iter().map(EdgeLine)
    }

    /// Returns the graph in the EdgeList-Format as a `String`
    pub fn write_string<G: Graph + ?Sized>(&self, graph: &G) -> String {
        self.lines(graph).map(|line| format!("{line}\n")).collect()
    }
}

impl GraphWriter for EdgeListWriter {
    fn try_write_graph<G, W>(&self, graph: &G, mut writer: W) -> Result<()>
    where
        G: Graph + ?Sized,
        W: Write,
    {
        let mut written = 0usize;
        for line in self.lines(graph) {
            writeln!(writer, "{line}")?;
            written += 1;
        }

        debug!(edges = written, sorted = self.sorted, "wrote edge list");
        Ok(())
    }
}

/// Trait for writing a graph to a writer in the EdgeList-Format.
/// Shorthand for default settings.
pub trait EdgeListWrite {
    /// Tries to write the graph to a writer
    fn try_write_edge_list<W: Write>(&self, writer: W) -> Result<()>;

    /// Tries to write the graph to a file
    fn try_write_edge_list_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.try_write_edge_list(&mut writer)?;
        writer.flush()
    }

    /// Returns the graph in the EdgeList-Format
    fn to_edge_list_string(&self) -> String;
}

impl<G: Graph + ?Sized> EdgeListWrite for G {
    fn try_write_edge_list<W: Write>(&self, writer: W) -> Result<()> {
        EdgeListWriter::default().try_write_graph(self, writer)
    }

    fn to_edge_list_string(&self) -> String {
        EdgeListWriter::default().write_string(self)
    }
}
