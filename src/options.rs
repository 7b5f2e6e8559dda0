//! Graph options: query-scoped metadata carried as request headers.

use crate::config::{
    DEFAULT_LANGUAGE, DEFAULT_SOURCE, LANGUAGE_KEY, NAME_KEY, READ_CONSISTENCY_KEY, SOURCE_KEY,
    WRITE_CONSISTENCY_KEY,
};
use crate::model::Consistency;
use crate::request::CustomPayload;
use crate::{Error, Result};

/// Language, traversal source, graph name, consistency and timeout for a
/// graph query.
///
/// The typed fields and the header map are kept in step by every setter, so
/// `payload()` is always ready to attach to a request. Cloning copies the
/// header map; a statement built from options is unaffected by later changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphOptions {
    payload: CustomPayload,
    language: String,
    source: String,
    name: Option<String>,
    read_consistency: Option<Consistency>,
    write_consistency: Option<Consistency>,
    request_timeout_ms: i64,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphOptions {
    /// Options with the default language and traversal source set.
    pub fn new() -> Self {
        let mut options = Self {
            payload: CustomPayload::new(),
            language: String::new(),
            source: String::new(),
            name: None,
            read_consistency: None,
            write_consistency: None,
            request_timeout_ms: 0,
        };
        options.set_language(DEFAULT_LANGUAGE);
        options.set_source(DEFAULT_SOURCE);
        options
    }

    pub fn payload(&self) -> &CustomPayload {
        &self.payload
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn read_consistency(&self) -> Option<Consistency> {
        self.read_consistency
    }

    pub fn write_consistency(&self) -> Option<Consistency> {
        self.write_consistency
    }

    pub fn request_timeout_ms(&self) -> i64 {
        self.request_timeout_ms
    }

    pub fn set_language(&mut self, language: impl Into<String>) -> &mut Self {
        self.language = language.into();
        self.payload.set(LANGUAGE_KEY, self.language.as_bytes());
        self
    }

    pub fn set_source(&mut self, source: impl Into<String>) -> &mut Self {
        self.source = source.into();
        self.payload.set(SOURCE_KEY, self.source.as_bytes());
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.payload.set(NAME_KEY, name.as_bytes());
        self.name = Some(name);
        self
    }

    pub fn set_read_consistency(&mut self, consistency: Consistency) -> &mut Self {
        self.payload.set(READ_CONSISTENCY_KEY, consistency.as_str());
        self.read_consistency = Some(consistency);
        self
    }

    pub fn set_write_consistency(&mut self, consistency: Consistency) -> &mut Self {
        self.payload.set(WRITE_CONSISTENCY_KEY, consistency.as_str());
        self.write_consistency = Some(consistency);
        self
    }

    /// Per-request timeout in milliseconds; `0` means no override.
    ///
    /// The timeout travels on the request itself, not in the header map.
    pub fn set_request_timeout(&mut self, timeout_ms: i64) -> Result<&mut Self> {
        if timeout_ms < 0 {
            return Err(Error::InvalidArgument(format!(
                "request timeout must be non-negative, got {timeout_ms}"
            )));
        }
        self.request_timeout_ms = timeout_ms;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let options = GraphOptions::new();
        assert_eq!(options.language(), "gremlin-groovy");
        assert_eq!(options.source(), "g");
        assert_eq!(options.name(), None);
        assert_eq!(options.read_consistency(), None);
        assert_eq!(options.request_timeout_ms(), 0);
        assert_eq!(options.payload().len(), 2);
        assert_eq!(options.payload().get_str(LANGUAGE_KEY), Some("gremlin-groovy"));
        assert_eq!(options.payload().get_str(SOURCE_KEY), Some("g"));
    }

    #[test]
    fn test_setters_overwrite_headers() {
        let mut options = GraphOptions::new();
        options.set_name("first").set_name("second");
        options
            .set_read_consistency(Consistency::One)
            .set_write_consistency(Consistency::LocalQuorum);
        assert_eq!(options.name(), Some("second"));
        assert_eq!(options.payload().get_str(NAME_KEY), Some("second"));
        assert_eq!(options.payload().get_str(READ_CONSISTENCY_KEY), Some("ONE"));
        assert_eq!(options.payload().get_str(WRITE_CONSISTENCY_KEY), Some("LOCAL_QUORUM"));
        assert_eq!(options.payload().len(), 5);
    }

    #[test]
    fn test_timeout_validation() {
        let mut options = GraphOptions::new();
        options.set_request_timeout(1500).unwrap();
        assert_eq!(options.request_timeout_ms(), 1500);
        assert!(matches!(options.set_request_timeout(-5), Err(Error::InvalidArgument(_))));
        assert_eq!(options.request_timeout_ms(), 1500);
        assert!(options.payload().get("request-timeout").is_none());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut source = GraphOptions::new();
        source.set_name("social");
        let mut copy = source.clone();
        assert_eq!(copy, source);

        copy.set_name("other").set_source("a");
        source.set_read_consistency(Consistency::All);

        assert_eq!(source.name(), Some("social"));
        assert_eq!(source.source(), "g");
        assert_eq!(copy.read_consistency(), None);
        assert_eq!(copy.payload().get_str(READ_CONSISTENCY_KEY), None);
        assert_eq!(source.payload().get_str(NAME_KEY), Some("social"));
    }
}
