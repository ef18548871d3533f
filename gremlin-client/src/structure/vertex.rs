use crate::structure::{PropertyMap, GID};

/// `{ id, label, properties }`. `properties` maps a key to its
/// ordered sequence of values (a vertex property can be multi-valued).
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    id: GID,
    label: String,
    properties: PropertyMap,
}

impl Vertex {
    pub fn new(id: GID, label: String, properties: PropertyMap) -> Vertex {
        Vertex {
            id,
            label,
            properties,
        }
    }

    /// A bare handle, used as a traversal argument (e.g. `V(1)` rendered by
    /// the encoder); properties are not known for a synthesized handle.
    pub fn partial(id: GID, label: String) -> Vertex {
        Vertex::new(id, label, PropertyMap::new())
    }

    pub fn id(&self) -> &GID {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }
}
