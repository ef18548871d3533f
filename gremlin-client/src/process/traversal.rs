use crate::process::arg::{render_args, Arg};
use crate::{GremlinError, GremlinResult};

/// Whether a `Traversal` is rooted at `g` (submittable on its own) or
/// anonymous, i.e. only valid nested as an argument of another step
/// (`__.has(...)`) — the "anonymous placement" invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Rooted,
    Anonymous,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub(crate) name: String,
    pub(crate) args: Vec<Arg>,
}

/// An append-only traversal value. Every builder method returns a new
/// `Traversal` with the step appended to a cloned step list; the receiver
/// is never mutated, so a partially-built traversal can be safely reused
/// as a template for several continuations.
#[derive(Debug, Clone, PartialEq)]
pub struct Traversal {
    kind: Kind,
    steps: Vec<Step>,
}

/// Starts a new traversal rooted at `g`.
pub fn root() -> Traversal {
    Traversal {
        kind: Kind::Rooted,
        steps: Vec::new(),
    }
}

/// Starts a new anonymous traversal, seeded with the `__` token that
/// identifies it as such when it is rendered nested inside another step.
pub fn anonymous() -> Traversal {
    Traversal {
        kind: Kind::Anonymous,
        steps: vec![Step {
            name: "__".to_string(),
            args: Vec::new(),
        }],
    }
}

impl Traversal {
    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Appends a step, returning a new traversal. Never mutates `self`.
    pub(crate) fn append(&self, name: &str, args: Vec<Arg>) -> Traversal {
        let mut steps = self.steps.clone();
        steps.push(Step {
            name: name.to_string(),
            args,
        });
        Traversal {
            kind: self.kind,
            steps,
        }
    }

    /// Renders the traversal as a submittable Gremlin-Groovy string. Only
    /// a `Rooted` traversal can be the top-level query; an anonymous one
    /// must be embedded in a parent step's arguments via `encode_nested`.
    pub fn encode(&self) -> GremlinResult<String> {
        match self.kind {
            Kind::Anonymous => Err(GremlinError::Generic(
                "anonymous traversal cannot be submitted on its own; it must be nested inside another step".to_string(),
            )),
            Kind::Rooted => encode_steps(&self.steps, "g".to_string()),
        }
    }

    /// Renders the traversal for embedding as a nested argument: a rooted
    /// traversal still starts from `g`, an anonymous one collapses its
    /// leading `__` token into the `__` prefix.
    pub(crate) fn encode_nested(&self) -> GremlinResult<String> {
        match self.kind {
            Kind::Rooted => encode_steps(&self.steps, "g".to_string()),
            Kind::Anonymous => encode_steps(&self.steps, String::new()),
        }
    }
}

fn encode_steps(steps: &[Step], mut acc: String) -> GremlinResult<String> {
    for step in steps {
        if step.name == "__" {
            if !acc.is_empty() {
                return Err(GremlinError::Generic(
                    "the anonymous traversal marker may only appear as the first step".to_string(),
                ));
            }
            acc = "__".to_string();
            continue;
        }

        let rendered_args = render_args(&step.args)?;
        acc = if acc.is_empty() {
            format!("{}({})", step.name, rendered_args)
        } else {
            format!("{}.{}({})", acc, step.name, rendered_args)
        };
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::arg::{gt, Arg};

    #[test]
    fn encodes_bare_root() {
        assert_eq!("g", root().encode().unwrap());
    }

    #[test]
    fn encodes_simple_chain() {
        let t = root()
            .append("V", vec![])
            .append("has", vec![Arg::from("price"), gt(100)]);
        assert_eq!("g.V().has('price', gt(100))", t.encode().unwrap());
    }

    #[test]
    fn anonymous_traversal_cannot_be_submitted_directly() {
        let t = anonymous().append("out", vec![]);
        assert!(t.encode().is_err());
    }

    #[test]
    fn anonymous_traversal_nests_with_double_underscore_prefix() {
        let t = anonymous().append("unfold", vec![]).append("count", vec![]);
        assert_eq!("__.unfold().count()", t.encode_nested().unwrap());
    }

    #[test]
    fn append_does_not_mutate_receiver() {
        let base = root().append("V", vec![]);
        let extended = base.append("count", vec![]);
        assert_eq!("g.V()", base.encode().unwrap());
        assert_eq!("g.V().count()", extended.encode().unwrap());
    }

    #[test]
    fn append_only_builder_supports_branching_from_a_shared_prefix() {
        let shared = root().append("V", vec![]).append("has", vec![Arg::from("type"), Arg::from("product")]);
        let branch_a = shared.append("count", vec![]);
        let branch_b = shared.append("values", vec![Arg::from("name")]);

        assert_eq!("g.V().has('type', 'product').count()", branch_a.encode().unwrap());
        assert_eq!("g.V().has('type', 'product').values('name')", branch_b.encode().unwrap());
    }

    #[test]
    fn encodes_a_nested_project_and_side_effect_chain() {
        let discount = anonymous().append("property", vec![Arg::from("discounted"), Arg::from("true")]);
        let count_unfolded = anonymous().append("unfold", vec![]).append("count", vec![]);
        let fold_unfolded = anonymous().append("unfold", vec![]).append("fold", vec![]);

        let t = root()
            .append("V", vec![])
            .append("has", vec![Arg::from("price"), gt(100)])
            .append("sideEffect", vec![Arg::from(discount)])
            .append("fold", vec![])
            .append("as", vec![Arg::from("discounted")])
            .append("project", vec![Arg::from("count"), Arg::from("products")])
            .append("by", vec![Arg::from(count_unfolded)])
            .append("by", vec![Arg::from(fold_unfolded)])
            .append("toList", vec![]);

        assert_eq!(
            "g.V().has('price', gt(100)).sideEffect(__.property('discounted', 'true')).fold().as('discounted').project('count', 'products').by(__.unfold().count()).by(__.unfold().fold()).toList()",
            t.encode().unwrap()
        );
    }
}
