use crate::structure::{GValue, GID};
use std::collections::HashMap;

/// `{ id, value, vertex (optional), label, properties (optional meta) }`.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexProperty {
    id: GID,
    label: String,
    value: Box<GValue>,
    vertex: Option<GID>,
    properties: HashMap<String, GValue>,
}

impl VertexProperty {
    pub fn new(id: GID, label: String, value: GValue) -> VertexProperty {
        VertexProperty {
            id,
            label,
            value: Box::new(value),
            vertex: None,
            properties: HashMap::new(),
        }
    }

    pub fn with_meta(mut self, properties: HashMap<String, GValue>) -> VertexProperty {
        self.properties = properties;
        self
    }

    pub fn with_vertex(mut self, vertex: GID) -> VertexProperty {
        self.vertex = Some(vertex);
        self
    }

    pub fn id(&self) -> &GID {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &GValue {
        &self.value
    }

    pub fn vertex(&self) -> Option<&GID> {
        self.vertex.as_ref()
    }

    pub fn properties(&self) -> &HashMap<String, GValue> {
        &self.properties
    }
}
