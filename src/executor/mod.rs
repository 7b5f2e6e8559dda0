//! # Execution Seam
//!
//! The contract between graph statements and whatever actually runs
//! queries. Connection pooling, retries, protocol framing and routing all
//! live behind [`GraphExecutor`]; this crate only builds requests and
//! decodes what comes back.
//!
//! ## Implementations
//!
//! | Executor | Module | Description |
//! |----------|--------|-------------|
//! | `MemoryExecutor` | `memory` | Canned responses for testing/embedding |

pub mod memory;

use std::net::IpAddr;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::{ANALYTICS_LOCATION_KEY, ANALYTICS_LOOKUP_QUERY, ANALYTICS_SOURCE};
use crate::request::Statement;
use crate::result::GraphResultSet;
use crate::statement::GraphStatement;
use crate::Result;

pub use memory::MemoryExecutor;

// ============================================================================
// Result handle
// ============================================================================

/// Rows returned by an executor, consumed once, front to back.
///
/// Each row is handed over as JSON text: the graph payload column for graph
/// queries, or the row rendered as a JSON object for plain queries.
pub trait ResultHandle {
    /// Total rows in the result, known without iterating.
    fn row_count(&self) -> usize;

    /// Append the next row's JSON to `buf`. `Ok(false)` when exhausted.
    fn next_row(&mut self, buf: &mut String) -> Result<bool>;

    /// Free whatever the handle holds. Called exactly once, on drop of the
    /// owning result set.
    fn release(&mut self) {}
}

// ============================================================================
// GraphExecutor
// ============================================================================

/// Runs a request and returns its rows.
///
/// Failures are returned as the executor produced them; callers above this
/// trait pass them through untouched.
#[async_trait]
pub trait GraphExecutor: Send + Sync {
    type Handle: ResultHandle + Send + 'static;

    async fn execute(&self, statement: &Statement) -> Result<Self::Handle>;
}

// ============================================================================
// GraphSession
// ============================================================================

/// Runs graph statements on an executor.
pub struct GraphSession<E: GraphExecutor> {
    executor: E,
}

impl<E: GraphExecutor> GraphSession<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Execute a graph statement.
    ///
    /// Statements addressed to the analytics source are first pinned to the
    /// analytics master, if the cluster reports one. A failed lookup is
    /// logged and the statement runs unpinned.
    pub async fn execute_graph(&self, statement: &GraphStatement) -> Result<GraphResultSet<E::Handle>> {
        let handle = if statement.graph_source() == ANALYTICS_SOURCE {
            let mut request = statement.wrapped().clone();
            match self.analytics_master().await {
                Ok(Some(host)) => {
                    debug!(%host, "routing analytics graph query");
                    request.set_host(host);
                }
                Ok(None) => debug!("no analytics master reported"),
                Err(err) => warn!(error = %err, "analytics master lookup failed"),
            }
            self.executor.execute(&request).await?
        } else {
            self.executor.execute(statement.wrapped()).await?
        };
        Ok(GraphResultSet::new(handle))
    }

    async fn analytics_master(&self) -> Result<Option<IpAddr>> {
        let lookup = Statement::new(ANALYTICS_LOOKUP_QUERY, 0);
        let mut rows = GraphResultSet::new(self.executor.execute(&lookup).await?);
        let Some(row) = rows.next().transpose()? else {
            return Ok(None);
        };
        let location = row
            .member_by_key(ANALYTICS_LOCATION_KEY)
            .and_then(|v| v.value::<&str>().ok());
        Ok(location.and_then(parse_host))
    }
}

/// Host part of a `host:port` location. Accepts `[v6]:port` too.
fn parse_host(location: &str) -> Option<IpAddr> {
    if let Ok(ip) = location.parse() {
        return Some(ip);
    }
    let host = match location.rsplit_once(':') {
        Some((host, port)) if port.parse::<u16>().is_ok() => host,
        _ => location,
    };
    host.trim_start_matches('[').trim_end_matches(']').parse().ok()
}
