//! In-memory executor.
//!
//! This is the reference implementation of `GraphExecutor`. It answers
//! queries from canned responses keyed by query text and records every
//! request it receives.
//!
//! ## Limitations
//!
//! - **No query evaluation**: an unregistered query returns zero rows.
//! - **Exact matching**: responses are looked up by the full query string.
//!
//! Use this executor for:
//! - Testing statement construction, parameter binding and header propagation
//! - Testing result decoding against recorded server output

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use super::{GraphExecutor, ResultHandle};
use crate::request::Statement;
use crate::{Error, Result};

#[derive(Debug, Clone)]
enum Response {
    Rows(Vec<String>),
    Failure(String),
}

/// Executor backed by canned responses.
#[derive(Debug, Clone, Default)]
pub struct MemoryExecutor {
    inner: Arc<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    responses: Mutex<HashMap<String, Response>>,
    requests: Mutex<Vec<Statement>>,
    released: AtomicUsize,
}

impl MemoryExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` with `rows`, each one JSON text.
    pub fn respond<I, S>(&self, query: impl Into<String>, rows: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows.into_iter().map(Into::into).collect();
        self.inner.responses.lock().insert(query.into(), Response::Rows(rows));
    }

    /// Fail `query` with an execution error carrying `message`.
    pub fn fail(&self, query: impl Into<String>, message: impl Into<String>) {
        self.inner
            .responses
            .lock()
            .insert(query.into(), Response::Failure(message.into()));
    }

    /// Every request executed so far, oldest first.
    pub fn requests(&self) -> Vec<Statement> {
        self.inner.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<Statement> {
        self.inner.requests.lock().last().cloned()
    }

    /// How many result handles have been released.
    pub fn released_count(&self) -> usize {
        self.inner.released.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GraphExecutor for MemoryExecutor {
    type Handle = MemoryResult;

    async fn execute(&self, statement: &Statement) -> Result<MemoryResult> {
        self.inner.requests.lock().push(statement.clone());
        let response = self.inner.responses.lock().get(statement.query()).cloned();
        debug!(query = statement.query(), "memory executor request");

        match response {
            Some(Response::Failure(message)) => Err(Error::Execution(message)),
            Some(Response::Rows(rows)) => Ok(MemoryResult::new(rows, Arc::clone(&self.inner))),
            None => Ok(MemoryResult::new(Vec::new(), Arc::clone(&self.inner))),
        }
    }
}

// ============================================================================
// MemoryResult
// ============================================================================

/// Rows handed out by [`MemoryExecutor`].
#[derive(Debug)]
pub struct MemoryResult {
    rows: VecDeque<String>,
    count: usize,
    owner: Arc<MemoryInner>,
}

impl MemoryResult {
    fn new(rows: Vec<String>, owner: Arc<MemoryInner>) -> Self {
        Self { count: rows.len(), rows: rows.into(), owner }
    }
}

impl ResultHandle for MemoryResult {
    fn row_count(&self) -> usize {
        self.count
    }

    fn next_row(&mut self, buf: &mut String) -> Result<bool> {
        match self.rows.pop_front() {
            Some(row) => {
                buf.push_str(&row);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn release(&mut self) {
        self.rows.clear();
        self.owner.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_canned_rows_and_request_log() {
        let executor = MemoryExecutor::new();
        executor.respond("g.V().count()", ["6"]);

        let mut handle = executor.execute(&Statement::new("g.V().count()", 0)).await.unwrap();
        assert_eq!(handle.row_count(), 1);
        let mut buf = String::new();
        assert!(handle.next_row(&mut buf).unwrap());
        assert_eq!(buf, "6");
        assert!(!handle.next_row(&mut buf).unwrap());

        assert_eq!(executor.requests().len(), 1);
        assert_eq!(executor.last_request().unwrap().query(), "g.V().count()");
    }

    #[tokio::test]
    async fn test_unknown_query_is_empty() {
        let executor = MemoryExecutor::new();
        let handle = executor.execute(&Statement::new("g.E()", 0)).await.unwrap();
        assert_eq!(handle.row_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_passes_through() {
        let executor = MemoryExecutor::new();
        executor.fail("g.bad()", "No such property: bad");
        let err = executor.execute(&Statement::new("g.bad()", 0)).await.unwrap_err();
        assert!(matches!(err, Error::Execution(msg) if msg == "No such property: bad"));
    }
}
