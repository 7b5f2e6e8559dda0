//! Request handle handed to the execution layer.
//!
//! [`Statement`] is what a [`GraphExecutor`](crate::executor::GraphExecutor)
//! receives: the query text, positional parameters, the custom payload
//! (header map), a per-request timeout, an optional write timestamp and an
//! optional host the request should be pinned to.

use std::collections::HashMap;
use std::net::IpAddr;

/// Failures signalled by the request handle itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("parameter index {index} out of bounds for {count} parameters")]
    IndexOutOfBounds { index: usize, count: usize },

    #[error("parameter value of {0} bytes exceeds the protocol limit")]
    ValueTooLarge(usize),
}

/// Largest value a single `[bytes]` parameter may carry.
pub const MAX_VALUE_LEN: usize = i32::MAX as usize;

// ============================================================================
// CustomPayload
// ============================================================================

/// Out-of-band key/value metadata sent alongside a query.
///
/// Setting an existing key replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomPayload {
    items: HashMap<String, Vec<u8>>,
}

impl CustomPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.items.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.items.get(key).map(Vec::as_slice)
    }

    /// Value as UTF-8 text, if present and valid.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| std::str::from_utf8(v).ok())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

// ============================================================================
// Statement
// ============================================================================

/// A simple (unprepared) query request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    query: String,
    parameters: Vec<Option<Vec<u8>>>,
    payload: CustomPayload,
    request_timeout_ms: u64,
    timestamp: Option<i64>,
    host: Option<IpAddr>,
}

impl Statement {
    /// New statement with `parameter_count` unset parameters.
    pub fn new(query: impl Into<String>, parameter_count: usize) -> Self {
        Self {
            query: query.into(),
            parameters: vec![None; parameter_count],
            ..Default::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Drop every bound value and resize to `count` unset parameters.
    pub fn reset_parameters(&mut self, count: usize) {
        self.parameters.clear();
        self.parameters.resize(count, None);
    }

    pub fn bind_string(&mut self, index: usize, value: &str) -> Result<(), RequestError> {
        self.bind_bytes(index, value.as_bytes())
    }

    pub fn bind_bytes(&mut self, index: usize, value: &[u8]) -> Result<(), RequestError> {
        if value.len() > MAX_VALUE_LEN {
            return Err(RequestError::ValueTooLarge(value.len()));
        }
        let count = self.parameters.len();
        let slot = self
            .parameters
            .get_mut(index)
            .ok_or(RequestError::IndexOutOfBounds { index, count })?;
        *slot = Some(value.to_vec());
        Ok(())
    }

    pub fn parameters(&self) -> &[Option<Vec<u8>>] {
        &self.parameters
    }

    /// Replace the payload with a copy of `payload`.
    pub fn set_custom_payload(&mut self, payload: &CustomPayload) {
        self.payload = payload.clone();
    }

    pub fn custom_payload(&self) -> &CustomPayload {
        &self.payload
    }

    /// `0` leaves the session-wide timeout in effect.
    pub fn set_request_timeout(&mut self, timeout_ms: u64) {
        self.request_timeout_ms = timeout_ms;
    }

    pub fn request_timeout_ms(&self) -> u64 {
        self.request_timeout_ms
    }

    /// Client-side write timestamp, milliseconds since epoch.
    pub fn set_timestamp(&mut self, timestamp_ms: i64) -> Result<(), RequestError> {
        self.timestamp = Some(timestamp_ms);
        Ok(())
    }

    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    /// Pin the request to one coordinator.
    pub fn set_host(&mut self, host: IpAddr) {
        self.host = Some(host);
    }

    pub fn host(&self) -> Option<IpAddr> {
        self.host
    }
}
