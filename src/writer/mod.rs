//! # Graph Value Writer
//!
//! Streaming JSON builder for graph query parameters.
//!
//! ```text
//! GraphObject::new()          → {
//!   add_string("name", ..)    → {"name":"marko"
//!   add_point("home", ..)     → {"name":"marko","home":"POINT (1 2)"
//!   finish()                  → {"name":"marko","home":"POINT (1 2)"}
//! ```
//!
//! A writer holds exactly one JSON document. It tracks nesting so it can
//! report when the document is complete; once complete, nothing more may be
//! written until [`GraphWriter::reset`].
//!
//! Misuse (a value after completion, a key outside an object, a value where
//! a key is expected, a non-finite double, splicing an incomplete fragment)
//! trips a `debug_assert!`. Release builds do not check and produce
//! malformed JSON.

pub mod structured;

pub use structured::{GraphArray, GraphObject};

use serde::Serialize;
use smallvec::SmallVec;

use crate::model::{LineString, Point, Polygon};

#[derive(Debug, Clone, Copy)]
struct Level {
    in_array: bool,
    value_count: usize,
}

/// Append-only JSON document builder.
#[derive(Debug, Clone, Default)]
pub struct GraphWriter {
    buffer: String,
    stack: SmallVec<[Level; 8]>,
    has_root: bool,
}

impl GraphWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The serialized document so far.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// True once the root value is written and every container is closed.
    pub fn is_complete(&self) -> bool {
        self.has_root && self.stack.is_empty()
    }

    /// Discard everything and start an empty document.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.stack.clear();
        self.has_root = false;
    }

    // ========================================================================
    // Scalars
    // ========================================================================

    pub fn add_null(&mut self) {
        self.prefix(false);
        self.buffer.push_str("null");
    }

    pub fn add_bool(&mut self, value: bool) {
        self.prefix(false);
        self.buffer.push_str(if value { "true" } else { "false" });
    }

    pub fn add_int32(&mut self, value: i32) {
        self.prefix(false);
        self.push_json(&value);
    }

    pub fn add_int64(&mut self, value: i64) {
        self.prefix(false);
        self.push_json(&value);
    }

    /// JSON has no NaN or infinity; `value` must be finite.
    pub fn add_double(&mut self, value: f64) {
        debug_assert!(value.is_finite(), "non-finite double {value} has no JSON form");
        self.prefix(false);
        self.push_json(&value);
    }

    pub fn add_string(&mut self, value: &str) {
        self.prefix(false);
        self.push_json(value);
    }

    /// Object member name. Only valid inside an object awaiting a key.
    pub fn add_key(&mut self, key: &str) {
        self.prefix(true);
        self.push_json(key);
    }

    // ========================================================================
    // Geospatial (embedded as WKT strings)
    // ========================================================================

    pub fn add_point(&mut self, x: f64, y: f64) {
        self.add_string(&Point::new(x, y).to_wkt());
    }

    pub fn add_line_string(&mut self, line_string: &LineString) {
        self.add_string(&line_string.to_wkt());
    }

    pub fn add_polygon(&mut self, polygon: &Polygon) {
        self.add_string(&polygon.to_wkt());
    }

    // ========================================================================
    // Fragments
    // ========================================================================

    /// Embed another writer's document as the next value, byte for byte.
    ///
    /// `fragment` must be complete; its bytes are not re-parsed.
    pub fn add_writer(&mut self, fragment: &GraphWriter) {
        debug_assert!(fragment.is_complete(), "embedded fragment is not a complete value");
        self.prefix(false);
        self.buffer.push_str(&fragment.buffer);
    }

    // ========================================================================
    // Containers (opened and closed by GraphObject / GraphArray)
    // ========================================================================

    pub(crate) fn start_object(&mut self) {
        self.prefix(false);
        self.stack.push(Level { in_array: false, value_count: 0 });
        self.buffer.push('{');
    }

    pub(crate) fn end_object(&mut self) {
        debug_assert!(
            matches!(self.stack.last(), Some(l) if !l.in_array && l.value_count % 2 == 0),
            "end_object without an open object awaiting a key"
        );
        self.stack.pop();
        self.buffer.push('}');
    }

    pub(crate) fn start_array(&mut self) {
        self.prefix(false);
        self.stack.push(Level { in_array: true, value_count: 0 });
        self.buffer.push('[');
    }

    pub(crate) fn end_array(&mut self) {
        debug_assert!(
            matches!(self.stack.last(), Some(l) if l.in_array),
            "end_array without an open array"
        );
        self.stack.pop();
        self.buffer.push(']');
    }

    /// Emit the separator for the next token and account for it.
    fn prefix(&mut self, is_key: bool) {
        match self.stack.last_mut() {
            Some(level) if level.in_array => {
                debug_assert!(!is_key, "key written inside an array");
                if level.value_count > 0 {
                    self.buffer.push(',');
                }
                level.value_count += 1;
            }
            Some(level) => {
                let awaiting_key = level.value_count % 2 == 0;
                debug_assert_eq!(is_key, awaiting_key, "object keys and values must alternate");
                if level.value_count > 0 {
                    self.buffer.push(if awaiting_key { ',' } else { ':' });
                }
                level.value_count += 1;
            }
            None => {
                debug_assert!(!self.has_root, "value written after the document was complete");
                debug_assert!(!is_key, "key written outside an object");
                self.has_root = true;
            }
        }
    }

    fn push_json<T: Serialize + ?Sized>(&mut self, value: &T) {
        // Strings and numbers always serialize.
        match serde_json::to_string(value) {
            Ok(json) => self.buffer.push_str(&json),
            Err(err) => debug_assert!(false, "scalar serialization failed: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_document() {
        let mut writer = GraphWriter::new();
        assert!(!writer.is_complete());
        writer.add_int64(-42);
        assert!(writer.is_complete());
        assert_eq!(writer.as_str(), "-42");
    }

    #[test]
    fn test_string_escaping() {
        let mut writer = GraphWriter::new();
        writer.add_string("say \"hi\"\n\\");
        assert_eq!(writer.as_str(), r#""say \"hi\"\n\\""#);
    }

    #[test]
    fn test_nested_containers_and_separators() {
        let mut writer = GraphWriter::new();
        writer.start_object();
        writer.add_key("a");
        writer.start_array();
        writer.add_int32(1);
        writer.add_double(2.5);
        writer.add_null();
        writer.end_array();
        writer.add_key("b");
        writer.add_bool(false);
        assert!(!writer.is_complete());
        writer.end_object();
        assert!(writer.is_complete());
        assert_eq!(writer.as_str(), r#"{"a":[1,2.5,null],"b":false}"#);
    }

    #[test]
    fn test_geometry_values() {
        let mut writer = GraphWriter::new();
        writer.start_array();
        writer.add_point(1.0, -2.5);
        writer.add_line_string(&LineString::new().with_point(0.0, 0.0).with_point(1.0, 1.0));
        writer.add_polygon(&Polygon::new().with_ring([(1.0, 3.0), (3.0, 1.0), (3.0, 6.0), (1.0, 3.0)]));
        writer.end_array();
        assert_eq!(
            writer.as_str(),
            r#"["POINT (1 -2.5)","LINESTRING (0 0, 1 1)","POLYGON ((1 3, 3 1, 3 6, 1 3))"]"#
        );
    }

    #[test]
    fn test_add_writer_splices_fragment() {
        let mut inner = GraphWriter::new();
        inner.start_array();
        inner.add_string("x");
        inner.end_array();

        let mut outer = GraphWriter::new();
        outer.start_array();
        outer.add_int32(0);
        outer.add_writer(&inner);
        outer.add_writer(&inner);
        outer.end_array();
        assert_eq!(outer.as_str(), r#"[0,["x"],["x"]]"#);
    }

    #[test]
    fn test_reset_matches_fresh_writer() {
        let mut writer = GraphWriter::new();
        writer.add_bool(true);
        writer.reset();
        assert!(!writer.is_complete());
        assert!(writer.is_empty());
        writer.add_null();
        assert_eq!(writer.as_str(), "null");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "after the document was complete")]
    fn test_write_after_complete_panics_in_debug() {
        let mut writer = GraphWriter::new();
        writer.add_int32(1);
        writer.add_int32(2);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "keys and values must alternate")]
    fn test_value_without_key_panics_in_debug() {
        let mut writer = GraphWriter::new();
        writer.start_object();
        writer.add_int32(1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "has no JSON form")]
    fn test_non_finite_double_panics_in_debug() {
        let mut writer = GraphWriter::new();
        writer.start_array();
        writer.add_double(f64::NAN);
    }
}
