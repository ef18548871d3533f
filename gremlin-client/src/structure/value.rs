use crate::structure::{Edge, Path, Property, Vertex, VertexProperty};
use crate::{GremlinError, GremlinResult};
use std::convert::TryFrom;

pub type Date = chrono::DateTime<chrono::offset::Utc>;

/// A decoded graph value. `List` is ordered, `Set` is not
/// (though both decode the same way — see `io::graphson`).
#[derive(Debug, Clone, PartialEq)]
pub enum GValue {
    Null,
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    String(String),
    Uuid(uuid::Uuid),
    Date(Date),
    List(Vec<GValue>),
    Set(Vec<GValue>),
    Map(Vec<(GValue, GValue)>),
    Vertex(Vertex),
    Edge(Edge),
    VertexProperty(VertexProperty),
    Property(Property),
    Path(Path),
}

impl GValue {
    /// Looks up a string key in a decoded `g:Map` value; the common case
    /// for reading a `project`/`valueMap`/`elementMap` result.
    pub fn map_get(&self, key: &str) -> Option<&GValue> {
        match self {
            GValue::Map(entries) => entries.iter().find_map(|(k, v)| match k {
                GValue::String(s) if s == key => Some(v),
                _ => None,
            }),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            GValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[GValue]> {
        match self {
            GValue::List(l) | GValue::Set(l) => Some(l),
            _ => None,
        }
    }
}

macro_rules! from_impl {
    ($t:ty, $variant:ident) => {
        impl From<$t> for GValue {
            fn from(v: $t) -> Self {
                GValue::$variant(v)
            }
        }
    };
}

from_impl!(i32, Int32);
from_impl!(i64, Int64);
from_impl!(f32, Float);
from_impl!(f64, Double);
from_impl!(bool, Bool);
from_impl!(String, String);
from_impl!(uuid::Uuid, Uuid);
from_impl!(Date, Date);
from_impl!(Vertex, Vertex);
from_impl!(Edge, Edge);
from_impl!(VertexProperty, VertexProperty);
from_impl!(Property, Property);
from_impl!(Path, Path);

impl From<&str> for GValue {
    fn from(v: &str) -> Self {
        GValue::String(v.to_string())
    }
}

impl From<Vec<GValue>> for GValue {
    fn from(v: Vec<GValue>) -> Self {
        GValue::List(v)
    }
}

macro_rules! try_from_impl {
    ($t:ty, $variant:ident, $name:expr) => {
        impl TryFrom<GValue> for $t {
            type Error = GremlinError;

            fn try_from(value: GValue) -> GremlinResult<Self> {
                match value {
                    GValue::$variant(v) => Ok(v),
                    other => Err(GremlinError::Cast(format!(
                        "cannot cast {:?} to {}",
                        other, $name
                    ))),
                }
            }
        }
    };
}

try_from_impl!(i32, Int32, "i32");
try_from_impl!(i64, Int64, "i64");
try_from_impl!(f32, Float, "f32");
try_from_impl!(f64, Double, "f64");
try_from_impl!(bool, Bool, "bool");
try_from_impl!(String, String, "String");
try_from_impl!(uuid::Uuid, Uuid, "Uuid");
try_from_impl!(Date, Date, "Date");
try_from_impl!(Vertex, Vertex, "Vertex");
try_from_impl!(Edge, Edge, "Edge");
try_from_impl!(VertexProperty, VertexProperty, "VertexProperty");
try_from_impl!(Property, Property, "Property");
try_from_impl!(Path, Path, "Path");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_get_finds_string_keyed_entry() {
        let map = GValue::Map(vec![
            (GValue::from("id"), GValue::from("id1")),
            (GValue::from("label"), GValue::from("VERTEX")),
        ]);

        assert_eq!(Some(&GValue::from("id1")), map.map_get("id"));
        assert_eq!(None, map.map_get("missing"));
    }

    #[test]
    fn try_from_mismatched_variant_fails() {
        let value = GValue::from("not an int");
        let result: GremlinResult<i32> = i32::try_from(value);
        assert!(result.is_err());
    }
}
