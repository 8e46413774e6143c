/*!
# IO

Utilities for reading and writing graphs in the flat edge-list text format.

## Format

Every line has the form `<from> [<to> [<weight>]]` with whitespace-separated fields:
- a line with only `from` adds an isolated node,
- a line with a negative `to` adds only `from`,
- a line without a weight adds an edge with the reader's default weight,
- trailing fields are ignored.

Blank lines are skipped. Lines that cannot be interpreted (non-integer or negative `from`,
non-integer `to`, non-numeric or `NaN` weight) are dropped, unless the reader is configured to
be strict, in which case they are reported as
[`ErrorKind::InvalidData`](std::io::ErrorKind::InvalidData).

Writing emits one `from to weight` line per edge. Weights use Rust's shortest round-trip
representation, so reading a written graph yields an equal graph.

## Traits

- [`GraphReader`] and [`GraphWriter`] are implemented by the configurable
  [`EdgeListReader`] and [`EdgeListWriter`].
- [`EdgeListRead`], [`EdgeListParse`] and [`EdgeListWrite`] are shorthands on the graphs
  themselves using default settings.
*/

pub mod edge_list;

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Result, Write},
    path::Path,
};

use crate::prelude::*;

pub use edge_list::*;

/// Trait for types that can read graphs in a specific format.
///
/// Reading *appends* to a graph: nodes and edges already present are kept unless overwritten by
/// an edge of the input.
pub trait GraphReader {
    /// Reads all lines of `reader` into `graph` according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if reading fails or, for strict readers, if a line is malformed.
    fn try_read_into<G, R>(&self, reader: R, graph: &mut G) -> Result<()>
    where
        G: GraphEdgeEditing + ?Sized,
        R: BufRead;

    /// Reads a file into `graph` according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or [`GraphReader::try_read_into`] fails.
    fn try_read_file_into<G, P>(&self, path: P, graph: &mut G) -> Result<()>
    where
        G: GraphEdgeEditing + ?Sized,
        P: AsRef<Path>,
    {
        self.try_read_into(BufReader::new(File::open(path)?), graph)
    }

    /// Reads a new graph from the given reader.
    ///
    /// # Errors
    /// See [`GraphReader::try_read_into`].
    fn try_read_graph<G, R>(&self, reader: R) -> Result<G>
    where
        G: GraphNew + GraphEdgeEditing,
        R: BufRead,
    {
        let mut graph = G::new();
        self.try_read_into(reader, &mut graph)?;
        Ok(graph)
    }

    /// Reads a new graph from a file.
    ///
    /// # Errors
    /// See [`GraphReader::try_read_file_into`].
    fn try_read_graph_file<G, P>(&self, path: P) -> Result<G>
    where
        G: GraphNew + GraphEdgeEditing,
        P: AsRef<Path>,
    {
        self.try_read_graph(BufReader::new(File::open(path)?))
    }
}

/// Trait for types that can write graphs in a specific format.
pub trait GraphWriter {
    /// Writes the given graph to the provided writer according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    fn try_write_graph<G, W>(&self, graph: &G, writer: W) -> Result<()>
    where
        G: Graph + ?Sized,
        W: Write;

    /// Writes the given graph to a file according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or if writing fails.
    fn try_write_graph_file<G, P>(&self, graph: &G, path: P) -> Result<()>
    where
        G: Graph + ?Sized,
        P: AsRef<Path>,
    {
        let mut writer = BufWriter::new(File::create(path)?);
        self.try_write_graph(graph, &mut writer)?;
        writer.flush()
    }
}

/// Shorthand for creating a new IO-error
macro_rules! io_error {
    ($kind: expr, $info: expr) => {
        std::io::Error::new($kind, $info)
    };
}

/// Shorthand for returning `Err(std::io::Error)` early when a condition fails
macro_rules! raise_error_unless {
    ($cond : expr, $kind : expr, $info : expr) => {
        if !($cond) {
            return Err(io_error!($kind, $info));
        }
    };
}

use io_error;
use raise_error_unless;
