//! Graph configuration: header keys, defaults, and a serde-loadable
//! options config.
//!
//! Every literal the rest of the crate needs lives here as a named constant.
//! There is no process-wide mutable default anywhere else.

use serde::{Deserialize, Serialize};

use crate::model::Consistency;
use crate::options::GraphOptions;
use crate::Result;

// ============================================================================
// Header keys
// ============================================================================

/// Header carrying the query language.
pub const LANGUAGE_KEY: &str = "graph-language";
/// Header carrying the traversal source.
pub const SOURCE_KEY: &str = "graph-source";
/// Header carrying the graph name.
pub const NAME_KEY: &str = "graph-name";
/// Header carrying the read consistency name.
pub const READ_CONSISTENCY_KEY: &str = "graph-read-consistency";
/// Header carrying the write consistency name.
pub const WRITE_CONSISTENCY_KEY: &str = "graph-write-consistency";

// ============================================================================
// Defaults
// ============================================================================

/// Language used when none is configured.
pub const DEFAULT_LANGUAGE: &str = "gremlin-groovy";
/// Traversal source used when none is configured.
pub const DEFAULT_SOURCE: &str = "g";
/// Traversal source that routes a query to the analytics master.
pub const ANALYTICS_SOURCE: &str = "a";

/// Query that asks the cluster where the analytics graph server runs.
pub const ANALYTICS_LOOKUP_QUERY: &str = "CALL DseClientTool.getAnalyticsGraphServer()";
/// Member of the lookup row holding the `host:port` location.
pub const ANALYTICS_LOCATION_KEY: &str = "location";

// ============================================================================
// GraphConfig
// ============================================================================

/// Declarative graph options, suitable for loading from a config file.
///
/// Unset fields keep the [`GraphOptions`] defaults.
///
/// ```rust
/// use dse_graph::config::GraphConfig;
///
/// let config: GraphConfig = serde_json::from_str(
///     r#"{ "name": "social", "read_consistency": "LOCAL_ONE", "request_timeout_ms": 5000 }"#,
/// ).unwrap();
/// let options = config.into_options().unwrap();
/// assert_eq!(options.name(), Some("social"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub language: Option<String>,
    pub source: Option<String>,
    pub name: Option<String>,
    pub read_consistency: Option<Consistency>,
    pub write_consistency: Option<Consistency>,
    pub request_timeout_ms: Option<i64>,
}

impl GraphConfig {
    /// Build [`GraphOptions`] from this config.
    ///
    /// Fails only if the timeout is negative.
    pub fn into_options(self) -> Result<GraphOptions> {
        let mut options = GraphOptions::new();
        if let Some(language) = self.language {
            options.set_language(language);
        }
        if let Some(source) = self.source {
            options.set_source(source);
        }
        if let Some(name) = self.name {
            options.set_name(name);
        }
        if let Some(consistency) = self.read_consistency {
            options.set_read_consistency(consistency);
        }
        if let Some(consistency) = self.write_consistency {
            options.set_write_consistency(consistency);
        }
        if let Some(timeout_ms) = self.request_timeout_ms {
            options.set_request_timeout(timeout_ms)?;
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_yields_defaults() {
        let config: GraphConfig = serde_json::from_str("{}").unwrap();
        let options = config.into_options().unwrap();
        assert_eq!(options, GraphOptions::new());
    }

    #[test]
    fn test_config_applies_every_field() {
        let config = GraphConfig {
            language: Some("gremlin-groovy".into()),
            source: Some(ANALYTICS_SOURCE.into()),
            name: Some("social".into()),
            read_consistency: Some(Consistency::LocalOne),
            write_consistency: Some(Consistency::Quorum),
            request_timeout_ms: Some(2500),
        };
        let options = config.into_options().unwrap();
        assert_eq!(options.source(), "a");
        assert_eq!(options.name(), Some("social"));
        assert_eq!(options.read_consistency(), Some(Consistency::LocalOne));
        assert_eq!(options.write_consistency(), Some(Consistency::Quorum));
        assert_eq!(options.request_timeout_ms(), 2500);
        assert_eq!(options.payload().get(WRITE_CONSISTENCY_KEY), Some(&b"QUORUM"[..]));
    }

    #[test]
    fn test_negative_timeout_rejected() {
        let config = GraphConfig { request_timeout_ms: Some(-1), ..Default::default() };
        assert!(config.into_options().is_err());
    }
}
