/// A graph element id: an integer, string, or opaque server-assigned token.
///
/// An `id` is an integer, string, or opaque token, and is used
/// both for decoded responses and for Vertex handles built by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum GID {
    Int32(i32),
    Int64(i64),
    String(String),
}

impl std::fmt::Display for GID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GID::Int32(v) => write!(f, "{}", v),
            GID::Int64(v) => write!(f, "{}", v),
            GID::String(v) => write!(f, "{}", v),
        }
    }
}

impl From<i32> for GID {
    fn from(v: i32) -> Self {
        GID::Int32(v)
    }
}

impl From<i64> for GID {
    fn from(v: i64) -> Self {
        GID::Int64(v)
    }
}

impl From<String> for GID {
    fn from(v: String) -> Self {
        GID::String(v)
    }
}

impl From<&str> for GID {
    fn from(v: &str) -> Self {
        GID::String(v.to_string())
    }
}
