//! Graph statements: query text, options and bound values.

use tracing::debug;

use crate::options::GraphOptions;
use crate::request::Statement;
use crate::writer::GraphObject;
use crate::Result;

/// A graph query ready to hand to an executor.
///
/// Construction copies the header map and timeout of the options onto the
/// underlying request, so later changes to the options do not leak in.
/// Without options the defaults are applied; a graph statement never goes
/// out without headers.
#[derive(Debug, Clone)]
pub struct GraphStatement {
    query: String,
    graph_source: String,
    wrapped: Statement,
}

impl GraphStatement {
    pub fn new(query: impl Into<String>, options: Option<&GraphOptions>) -> Self {
        let query = query.into();
        let mut wrapped = Statement::new(query.as_str(), 0);

        let defaults;
        let options = match options {
            Some(options) => options,
            None => {
                defaults = GraphOptions::new();
                &defaults
            }
        };
        wrapped.set_custom_payload(options.payload());
        // Setters reject negative timeouts, so the conversion cannot fail.
        wrapped.set_request_timeout(u64::try_from(options.request_timeout_ms()).unwrap_or(0));

        debug!(
            source = options.source(),
            timeout_ms = options.request_timeout_ms(),
            "graph statement created"
        );

        Self {
            query,
            graph_source: options.source().to_owned(),
            wrapped,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Traversal source taken from the options this statement was built with.
    pub fn graph_source(&self) -> &str {
        &self.graph_source
    }

    /// The request handed to the executor.
    pub fn wrapped(&self) -> &Statement {
        &self.wrapped
    }

    /// Bind the named parameters of the query.
    ///
    /// `Some(values)` leaves exactly one positional parameter holding the
    /// serialized object; `values` must be finished. `None` clears all
    /// parameters.
    pub fn bind_values(&mut self, values: Option<&GraphObject>) -> Result<()> {
        match values {
            Some(values) => {
                debug_assert!(values.is_complete(), "binding an unfinished graph object");
                self.wrapped.reset_parameters(1);
                self.wrapped.bind_string(0, values.as_str())?;
                debug!(bytes = values.len(), "bound graph values");
            }
            None => self.wrapped.reset_parameters(0),
        }
        Ok(())
    }

    /// Client-side write timestamp, milliseconds since epoch.
    pub fn set_timestamp(&mut self, timestamp_ms: i64) -> Result<()> {
        self.wrapped.set_timestamp(timestamp_ms)?;
        Ok(())
    }
}
