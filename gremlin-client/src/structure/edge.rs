use crate::structure::{Vertex, GID};
use std::collections::HashMap;

/// `{ id, label, in_vertex, out_vertex, properties }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: GID,
    label: String,
    in_vertex: Vertex,
    out_vertex: Vertex,
    properties: HashMap<String, crate::structure::GValue>,
}

impl Edge {
    pub fn new(
        id: GID,
        label: String,
        in_vertex: Vertex,
        out_vertex: Vertex,
        properties: HashMap<String, crate::structure::GValue>,
    ) -> Edge {
        Edge {
            id,
            label,
            in_vertex,
            out_vertex,
            properties,
        }
    }

    pub fn id(&self) -> &GID {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn in_vertex(&self) -> &Vertex {
        &self.in_vertex
    }

    pub fn out_vertex(&self) -> &Vertex {
        &self.out_vertex
    }

    pub fn properties(&self) -> &HashMap<String, crate::structure::GValue> {
        &self.properties
    }
}
