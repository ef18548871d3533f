use crate::structure::GValue;

/// A plain (non-vertex) edge property: `{ key, value }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    key: String,
    value: Box<GValue>,
}

impl Property {
    pub fn new(key: String, value: GValue) -> Property {
        Property {
            key,
            value: Box::new(value),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &GValue {
        &self.value
    }
}
