//! # Graph Results
//!
//! Each result row is one JSON value. [`GraphResult`] is that value as a
//! tagged tree; [`GraphResultSet`] iterates the rows of an execution.
//!
//! ## Numbers
//!
//! A JSON number carries no CQL type. Decimal, double and float columns all
//! arrive as plain numbers, and the only thing that tells them apart is the
//! type the caller asks for: `value::<f64>()` for a double, `value::<f32>()`
//! for a float, `value::<i32>()` for an int. The caller must know the
//! expected type; nothing here guesses it.

pub mod element;
pub mod set;

pub use element::{GraphEdge, GraphPath, GraphVertex};
pub use set::GraphResultSet;

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::Number;

use crate::{Error, Result};

/// Variant tag of a [`GraphResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphResultType {
    Null,
    Bool,
    Number,
    String,
    Object,
    Array,
}

impl fmt::Display for GraphResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GraphResultType::Null => "NULL",
            GraphResultType::Bool => "BOOL",
            GraphResultType::Number => "NUMBER",
            GraphResultType::String => "STRING",
            GraphResultType::Object => "OBJECT",
            GraphResultType::Array => "ARRAY",
        };
        f.write_str(name)
    }
}

/// One decoded JSON value from a graph result row.
///
/// Object members keep their wire order, duplicates included.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GraphResult {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<GraphResult>),
    Object(Vec<(String, GraphResult)>),
}

impl GraphResult {
    /// Parse one row of JSON text.
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Decode(e.to_string()))
    }

    pub fn result_type(&self) -> GraphResultType {
        match self {
            GraphResult::Null => GraphResultType::Null,
            GraphResult::Bool(_) => GraphResultType::Bool,
            GraphResult::Number(_) => GraphResultType::Number,
            GraphResult::String(_) => GraphResultType::String,
            GraphResult::Array(_) => GraphResultType::Array,
            GraphResult::Object(_) => GraphResultType::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, GraphResult::Null)
    }

    /// Whether [`value::<T>`](Self::value) would succeed.
    pub fn is_type<'a, T: FromGraphResult<'a>>(&'a self) -> bool {
        T::from_result(self).is_ok()
    }

    /// Project this value onto `T`.
    ///
    /// Fails with [`Error::TypeMismatch`] when the variant does not convert
    /// to `T` without loss.
    pub fn value<'a, T: FromGraphResult<'a>>(&'a self) -> Result<T> {
        T::from_result(self)
    }

    // ========================================================================
    // Objects
    // ========================================================================

    /// Number of object members; `0` for anything that is not an object.
    pub fn member_count(&self) -> usize {
        match self {
            GraphResult::Object(members) => members.len(),
            _ => 0,
        }
    }

    /// Key of the `index`-th object member.
    pub fn key(&self, index: usize) -> Option<&str> {
        match self {
            GraphResult::Object(members) => members.get(index).map(|(k, _)| k.as_str()),
            _ => None,
        }
    }

    /// Value of the `index`-th object member.
    pub fn member(&self, index: usize) -> Option<&GraphResult> {
        match self {
            GraphResult::Object(members) => members.get(index).map(|(_, v)| v),
            _ => None,
        }
    }

    /// First member named `key`.
    pub fn member_by_key(&self, key: &str) -> Option<&GraphResult> {
        match self {
            GraphResult::Object(members) => {
                members.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    // ========================================================================
    // Arrays
    // ========================================================================

    /// Number of array elements; `0` for anything that is not an array.
    pub fn element_count(&self) -> usize {
        match self {
            GraphResult::Array(elements) => elements.len(),
            _ => 0,
        }
    }

    pub fn element(&self, index: usize) -> Option<&GraphResult> {
        match self {
            GraphResult::Array(elements) => elements.get(index),
            _ => None,
        }
    }

    fn mismatch(&self, expected: &str) -> Error {
        Error::TypeMismatch {
            expected: expected.to_owned(),
            got: self.result_type().to_string(),
        }
    }
}

// ============================================================================
// Typed projection
// ============================================================================

/// Conversion from a borrowed [`GraphResult`].
pub trait FromGraphResult<'a>: Sized {
    fn from_result(result: &'a GraphResult) -> Result<Self>;
}

impl<'a> FromGraphResult<'a> for bool {
    fn from_result(result: &'a GraphResult) -> Result<Self> {
        match result {
            GraphResult::Bool(b) => Ok(*b),
            other => Err(other.mismatch("BOOL")),
        }
    }
}

impl<'a> FromGraphResult<'a> for i64 {
    fn from_result(result: &'a GraphResult) -> Result<Self> {
        match result {
            GraphResult::Number(n) => n.as_i64().ok_or_else(|| result.mismatch("INT64")),
            other => Err(other.mismatch("INT64")),
        }
    }
}

impl<'a> FromGraphResult<'a> for i32 {
    fn from_result(result: &'a GraphResult) -> Result<Self> {
        i64::from_result(result)
            .ok()
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(|| result.mismatch("INT32"))
    }
}

/// Integers are only readable as doubles when they survive the conversion.
impl<'a> FromGraphResult<'a> for f64 {
    fn from_result(result: &'a GraphResult) -> Result<Self> {
        match result {
            GraphResult::Number(n) => exact_f64(n).ok_or_else(|| result.mismatch("DOUBLE")),
            other => Err(other.mismatch("DOUBLE")),
        }
    }
}

/// Narrowed from the double reading; for CQL `float` columns. Values outside
/// the `f32` range are a mismatch.
impl<'a> FromGraphResult<'a> for f32 {
    fn from_result(result: &'a GraphResult) -> Result<Self> {
        f64::from_result(result)
            .ok()
            .map(|v| v as f32)
            .filter(|v| v.is_finite())
            .ok_or_else(|| result.mismatch("FLOAT"))
    }
}

fn exact_f64(n: &Number) -> Option<f64> {
    // 2^63; the first double past every i64.
    const I64_END: f64 = 9_223_372_036_854_775_808.0;

    if let Some(i) = n.as_i64() {
        let f = i as f64;
        return (f >= -I64_END && f < I64_END && f as i64 == i).then_some(f);
    }
    if let Some(u) = n.as_u64() {
        let f = u as f64;
        return (f < 2.0 * I64_END && f as u64 == u).then_some(f);
    }
    n.as_f64().filter(|f| f.is_finite())
}

impl<'a> FromGraphResult<'a> for &'a str {
    fn from_result(result: &'a GraphResult) -> Result<Self> {
        match result {
            GraphResult::String(s) => Ok(s),
            other => Err(other.mismatch("STRING")),
        }
    }
}

impl<'a> FromGraphResult<'a> for String {
    fn from_result(result: &'a GraphResult) -> Result<Self> {
        <&str>::from_result(result).map(str::to_owned)
    }
}

impl<'a> FromGraphResult<'a> for &'a [GraphResult] {
    fn from_result(result: &'a GraphResult) -> Result<Self> {
        match result {
            GraphResult::Array(elements) => Ok(elements),
            other => Err(other.mismatch("ARRAY")),
        }
    }
}

impl<'a> FromGraphResult<'a> for &'a [(String, GraphResult)] {
    fn from_result(result: &'a GraphResult) -> Result<Self> {
        match result {
            GraphResult::Object(members) => Ok(members),
            other => Err(other.mismatch("OBJECT")),
        }
    }
}

// ============================================================================
// Deserialize
// ============================================================================

impl<'de> Deserialize<'de> for GraphResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(GraphResultVisitor)
    }
}

struct GraphResultVisitor;

impl<'de> Visitor<'de> for GraphResultVisitor {
    type Value = GraphResult;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<GraphResult, E> {
        Ok(GraphResult::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<GraphResult, E> {
        Ok(GraphResult::Null)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<GraphResult, E> {
        Ok(GraphResult::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<GraphResult, E> {
        Ok(GraphResult::Number(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<GraphResult, E> {
        Ok(GraphResult::Number(v.into()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<GraphResult, E> {
        Number::from_f64(v)
            .map(GraphResult::Number)
            .ok_or_else(|| E::custom("non-finite number"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<GraphResult, E> {
        Ok(GraphResult::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<GraphResult, E> {
        Ok(GraphResult::String(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<GraphResult, A::Error> {
        let mut elements = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(GraphResult::Array(elements))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<GraphResult, A::Error> {
        let mut members = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, GraphResult>()? {
            members.push((key, value));
        }
        Ok(GraphResult::Object(members))
    }
}
