use crate::process::arg::Arg;
use crate::process::traversal::{root, Traversal};

/// The `g` entry point. Unlike a mutable traversal-source object, this is
/// just sugar over [`root`] — `GraphTraversalSource::new().v(vec![])` and
/// `root().v(vec![])` produce identical traversals.
#[derive(Clone, Copy, Debug, Default)]
pub struct GraphTraversalSource;

impl GraphTraversalSource {
    pub fn new() -> GraphTraversalSource {
        GraphTraversalSource
    }

    pub fn v(&self, ids: Vec<Arg>) -> Traversal {
        root().v(ids)
    }

    pub fn e(&self, ids: Vec<Arg>) -> Traversal {
        root().e(ids)
    }
}
