//! Object and array writers.
//!
//! Both open their container on construction and on [`reset`](GraphObject::reset),
//! and close it on `finish` unless the caller already did.

use crate::model::{LineString, Polygon};

use super::GraphWriter;

// ============================================================================
// GraphObject
// ============================================================================

/// A JSON object under construction, the usual shape of bound graph values.
#[derive(Debug, Clone)]
pub struct GraphObject {
    writer: GraphWriter,
}

impl Default for GraphObject {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphObject {
    pub fn new() -> Self {
        let mut writer = GraphWriter::new();
        writer.start_object();
        Self { writer }
    }

    /// Discard all members and reopen an empty object.
    pub fn reset(&mut self) {
        self.writer.reset();
        self.writer.start_object();
    }

    /// Close the object. Does nothing if it is already closed.
    pub fn finish(&mut self) {
        if !self.writer.is_complete() {
            self.writer.end_object();
        }
    }

    pub fn is_complete(&self) -> bool {
        self.writer.is_complete()
    }

    pub fn as_str(&self) -> &str {
        self.writer.as_str()
    }

    pub fn len(&self) -> usize {
        self.writer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writer.is_empty()
    }

    pub fn as_writer(&self) -> &GraphWriter {
        &self.writer
    }

    pub fn add_null(&mut self, name: &str) {
        self.writer.add_key(name);
        self.writer.add_null();
    }

    pub fn add_bool(&mut self, name: &str, value: bool) {
        self.writer.add_key(name);
        self.writer.add_bool(value);
    }

    pub fn add_int32(&mut self, name: &str, value: i32) {
        self.writer.add_key(name);
        self.writer.add_int32(value);
    }

    pub fn add_int64(&mut self, name: &str, value: i64) {
        self.writer.add_key(name);
        self.writer.add_int64(value);
    }

    pub fn add_double(&mut self, name: &str, value: f64) {
        self.writer.add_key(name);
        self.writer.add_double(value);
    }

    pub fn add_string(&mut self, name: &str, value: &str) {
        self.writer.add_key(name);
        self.writer.add_string(value);
    }

    pub fn add_point(&mut self, name: &str, x: f64, y: f64) {
        self.writer.add_key(name);
        self.writer.add_point(x, y);
    }

    pub fn add_line_string(&mut self, name: &str, line_string: &LineString) {
        self.writer.add_key(name);
        self.writer.add_line_string(line_string);
    }

    pub fn add_polygon(&mut self, name: &str, polygon: &Polygon) {
        self.writer.add_key(name);
        self.writer.add_polygon(polygon);
    }

    /// Nest a finished object under `name`.
    pub fn add_object(&mut self, name: &str, value: &GraphObject) {
        self.writer.add_key(name);
        self.writer.add_writer(&value.writer);
    }

    /// Nest a finished array under `name`.
    pub fn add_array(&mut self, name: &str, value: &GraphArray) {
        self.writer.add_key(name);
        self.writer.add_writer(&value.writer);
    }
}

// ============================================================================
// GraphArray
// ============================================================================

/// A JSON array under construction.
#[derive(Debug, Clone)]
pub struct GraphArray {
    writer: GraphWriter,
}

impl Default for GraphArray {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphArray {
    pub fn new() -> Self {
        let mut writer = GraphWriter::new();
        writer.start_array();
        Self { writer }
    }

    /// Discard all elements and reopen an empty array.
    pub fn reset(&mut self) {
        self.writer.reset();
        self.writer.start_array();
    }

    /// Close the array. Does nothing if it is already closed.
    pub fn finish(&mut self) {
        if !self.writer.is_complete() {
            self.writer.end_array();
        }
    }

    pub fn is_complete(&self) -> bool {
        self.writer.is_complete()
    }

    pub fn as_str(&self) -> &str {
        self.writer.as_str()
    }

    pub fn len(&self) -> usize {
        self.writer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writer.is_empty()
    }

    pub fn as_writer(&self) -> &GraphWriter {
        &self.writer
    }

    pub fn add_null(&mut self) {
        self.writer.add_null();
    }

    pub fn add_bool(&mut self, value: bool) {
        self.writer.add_bool(value);
    }

    pub fn add_int32(&mut self, value: i32) {
        self.writer.add_int32(value);
    }

    pub fn add_int64(&mut self, value: i64) {
        self.writer.add_int64(value);
    }

    pub fn add_double(&mut self, value: f64) {
        self.writer.add_double(value);
    }

    pub fn add_string(&mut self, value: &str) {
        self.writer.add_string(value);
    }

    pub fn add_point(&mut self, x: f64, y: f64) {
        self.writer.add_point(x, y);
    }

    pub fn add_line_string(&mut self, line_string: &LineString) {
        self.writer.add_line_string(line_string);
    }

    pub fn add_polygon(&mut self, polygon: &Polygon) {
        self.writer.add_polygon(polygon);
    }

    pub fn add_object(&mut self, value: &GraphObject) {
        self.writer.add_writer(&value.writer);
    }

    pub fn add_array(&mut self, value: &GraphArray) {
        self.writer.add_writer(&value.writer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_finish_is_idempotent() {
        let mut object = GraphObject::new();
        object.add_string("name", "marko");
        object.add_int32("age", 29);
        assert!(!object.is_complete());
        object.finish();
        object.finish();
        assert!(object.is_complete());
        assert_eq!(object.as_str(), r#"{"name":"marko","age":29}"#);
    }

    #[test]
    fn test_empty_containers() {
        let mut object = GraphObject::new();
        object.finish();
        assert_eq!(object.as_str(), "{}");

        let mut array = GraphArray::new();
        array.finish();
        assert_eq!(array.as_str(), "[]");
    }

    #[test]
    fn test_reset_reopens_container() {
        let mut object = GraphObject::new();
        object.add_bool("flag", true);
        object.finish();
        object.reset();
        assert!(!object.is_complete());
        assert_eq!(object.as_str(), "{");

        let mut fresh = GraphObject::new();
        object.add_null("x");
        fresh.add_null("x");
        object.finish();
        fresh.finish();
        assert_eq!(object.as_str(), fresh.as_str());

        let mut array = GraphArray::new();
        array.add_int64(1);
        array.reset();
        assert_eq!(array.as_str(), "[");
    }

    #[test]
    fn test_nested_composition() {
        let mut tags = GraphArray::new();
        tags.add_string("a");
        tags.add_point(1.0, 2.0);
        tags.finish();

        let mut address = GraphObject::new();
        address.add_string("city", "Santa Clara");
        address.finish();

        let mut values = GraphObject::new();
        values.add_array("tags", &tags);
        values.add_object("address", &address);
        values.add_int64("big", i64::MAX);
        values.finish();

        assert_eq!(
            values.as_str(),
            r#"{"tags":["a","POINT (1 2)"],"address":{"city":"Santa Clara"},"big":9223372036854775807}"#
        );

        let mut list = GraphArray::new();
        list.add_object(&address);
        list.add_array(&tags);
        list.finish();
        assert_eq!(list.as_str(), r#"[{"city":"Santa Clara"},["a","POINT (1 2)"]]"#);
    }
}
