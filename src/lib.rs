//! # dse-graph: Graph Queries over a DSE-style Cluster
//!
//! Client-side graph support on top of a query execution layer: build
//! parameters, attach graph headers, run, walk the typed result tree.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `GraphExecutor` is the contract with the execution layer
//! 2. **Writers own one document**: `GraphObject`/`GraphArray` know when they are complete
//! 3. **Headers are data**: `GraphOptions` is a value; statements copy it
//! 4. **Rows are borrowed**: a decoded row lives until the next one is read
//!
//! ## Quick Start
//!
//! ```rust
//! use dse_graph::{GraphObject, GraphOptions, GraphSession, GraphStatement, MemoryExecutor};
//!
//! # async fn example() -> dse_graph::Result<()> {
//! let executor = MemoryExecutor::new();
//! executor.respond(
//!     "g.V().has('name', name)",
//!     [r#"{"id":1,"label":"person","type":"vertex","properties":{"name":[{"id":2,"value":"marko"}]}}"#],
//! );
//! let session = GraphSession::new(executor);
//!
//! let mut options = GraphOptions::new();
//! options.set_name("classic");
//!
//! let mut values = GraphObject::new();
//! values.add_string("name", "marko");
//! values.finish();
//!
//! let mut statement = GraphStatement::new("g.V().has('name', name)", Some(&options));
//! statement.bind_values(Some(&values))?;
//!
//! let mut rows = session.execute_graph(&statement).await?;
//! while let Some(row) = rows.next() {
//!     let vertex = row?.as_vertex()?;
//!     println!("{:?}", vertex.label_str());
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod codec;
pub mod config;
pub mod executor;
pub mod guard;
pub mod model;
pub mod options;
pub mod request;
pub mod result;
pub mod statement;
pub mod writer;

// ============================================================================
// Re-exports
// ============================================================================

pub use codec::{decode_date_range, encode_date_range};
pub use config::GraphConfig;
pub use executor::{GraphExecutor, GraphSession, MemoryExecutor, ResultHandle};
pub use model::{
    Consistency, DateRange, DateRangeBound, DateRangePrecision, LineString, Point, Polygon,
};
pub use options::GraphOptions;
pub use request::{CustomPayload, RequestError, Statement};
pub use result::{
    FromGraphResult, GraphEdge, GraphPath, GraphResult, GraphResultSet, GraphResultType,
    GraphVertex,
};
pub use statement::GraphStatement;
pub use writer::{GraphArray, GraphObject, GraphWriter};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Type error: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    #[error("Execution error: {0}")]
    Execution(String),
}

pub type Result<T> = std::result::Result<T, Error>;
