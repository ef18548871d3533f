use crate::structure::GValue;

/// `{ labels: ordered sequence of sets of labels; objects: ordered sequence
/// of graph values }`. The i-th label-set describes the i-th object.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    labels: Vec<Vec<String>>,
    objects: Vec<GValue>,
}

impl Path {
    pub fn new(labels: Vec<Vec<String>>, objects: Vec<GValue>) -> Path {
        Path { labels, objects }
    }

    pub fn labels(&self) -> &[Vec<String>] {
        &self.labels
    }

    pub fn objects(&self) -> &[GValue] {
        &self.objects
    }
}
