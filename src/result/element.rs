//! Typed views over graph elements in a result row.
//!
//! Elements are ordinary JSON objects with well-known members:
//!
//! ```text
//! vertex: {"id":..,"label":"person","type":"vertex",
//!          "properties":{"name":[{"id":..,"value":"marko"}]}}
//! edge:   {"id":..,"label":"knows","type":"edge",
//!          "inV":..,"inVLabel":"person","outV":..,"outVLabel":"person",
//!          "properties":{"weight":0.5}}
//! path:   {"labels":[[..],..],"objects":[..]}
//! ```
//!
//! The views borrow from the row and fail with [`Error::InvalidData`] when a
//! required member is missing or has the wrong shape.

use super::{GraphResult, GraphResultType};
use crate::{Error, Result};

/// Borrowed view of a vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphVertex<'a> {
    pub id: &'a GraphResult,
    pub label: &'a GraphResult,
    pub vertex_type: &'a GraphResult,
    pub properties: &'a GraphResult,
}

impl<'a> GraphVertex<'a> {
    pub fn label_str(&self) -> Option<&'a str> {
        self.label.value::<&str>().ok()
    }

    /// The first value of a vertex property.
    ///
    /// Vertex properties map a name to an array of `{"id","value"}` wrappers;
    /// this returns the `value` member of the first wrapper.
    pub fn property_value(&self, name: &str) -> Option<&'a GraphResult> {
        self.properties
            .member_by_key(name)?
            .element(0)?
            .member_by_key("value")
    }
}

/// Borrowed view of an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphEdge<'a> {
    pub id: &'a GraphResult,
    pub label: &'a GraphResult,
    pub edge_type: &'a GraphResult,
    pub properties: &'a GraphResult,
    pub in_vertex: &'a GraphResult,
    pub in_vertex_label: &'a GraphResult,
    pub out_vertex: &'a GraphResult,
    pub out_vertex_label: &'a GraphResult,
}

impl<'a> GraphEdge<'a> {
    pub fn label_str(&self) -> Option<&'a str> {
        self.label.value::<&str>().ok()
    }
}

/// Borrowed view of a traversal path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphPath<'a> {
    pub labels: &'a GraphResult,
    pub objects: &'a GraphResult,
}

impl<'a> GraphPath<'a> {
    pub fn len(&self) -> usize {
        self.objects.element_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GraphResult {
    /// View this value as a vertex.
    ///
    /// Requires `id`, `label`, `type` and `properties`, as a server vertex
    /// carries. A projection holding only `label` and `properties` is not a
    /// vertex here; walk it with [`member_by_key`](Self::member_by_key).
    pub fn as_vertex(&self) -> Result<GraphVertex<'_>> {
        self.expect_object("vertex")?;
        Ok(GraphVertex {
            id: self.required("id", None)?,
            label: self.required("label", Some(GraphResultType::String))?,
            vertex_type: self.required("type", Some(GraphResultType::String))?,
            properties: self.required("properties", Some(GraphResultType::Object))?,
        })
    }

    /// View this value as an edge.
    pub fn as_edge(&self) -> Result<GraphEdge<'_>> {
        self.expect_object("edge")?;
        Ok(GraphEdge {
            id: self.required("id", None)?,
            label: self.required("label", Some(GraphResultType::String))?,
            edge_type: self.required("type", Some(GraphResultType::String))?,
            properties: self.required("properties", Some(GraphResultType::Object))?,
            in_vertex: self.required("inV", None)?,
            in_vertex_label: self.required("inVLabel", Some(GraphResultType::String))?,
            out_vertex: self.required("outV", None)?,
            out_vertex_label: self.required("outVLabel", Some(GraphResultType::String))?,
        })
    }

    /// View this value as a path.
    pub fn as_path(&self) -> Result<GraphPath<'_>> {
        self.expect_object("path")?;
        Ok(GraphPath {
            labels: self.required("labels", Some(GraphResultType::Array))?,
            objects: self.required("objects", Some(GraphResultType::Array))?,
        })
    }

    fn expect_object(&self, what: &str) -> Result<()> {
        if self.result_type() == GraphResultType::Object {
            Ok(())
        } else {
            Err(Error::InvalidData(format!(
                "{what} must be an object, got {}",
                self.result_type()
            )))
        }
    }

    fn required(&self, key: &str, kind: Option<GraphResultType>) -> Result<&GraphResult> {
        let member = self
            .member_by_key(key)
            .ok_or_else(|| Error::InvalidData(format!("missing member '{key}'")))?;
        match kind {
            Some(kind) if member.result_type() != kind => Err(Error::InvalidData(format!(
                "member '{key}' must be {kind}, got {}",
                member.result_type()
            ))),
            _ => Ok(member),
        }
    }
}
