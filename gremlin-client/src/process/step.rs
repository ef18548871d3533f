use crate::process::arg::Arg;
use crate::process::traversal::Traversal;

/// A step with no arguments.
macro_rules! nullary_step {
    ($(#[$meta:meta])* $fn_name:ident, $gremlin_name:expr) => {
        $(#[$meta])*
        pub fn $fn_name(&self) -> Traversal {
            self.append($gremlin_name, vec![])
        }
    };
}

/// A step taking a single argument of any `Into<Arg>` type (a literal, a
/// predicate, or a nested traversal).
macro_rules! unary_step {
    ($(#[$meta:meta])* $fn_name:ident, $gremlin_name:expr) => {
        $(#[$meta])*
        pub fn $fn_name<T: Into<Arg>>(&self, value: T) -> Traversal {
            self.append($gremlin_name, vec![value.into()])
        }
    };
}

/// A step taking a variable number of arguments, already converted
/// (callers build the `Vec<Arg>` with `.into()` at each call site).
macro_rules! variadic_step {
    ($(#[$meta:meta])* $fn_name:ident, $gremlin_name:expr) => {
        $(#[$meta])*
        pub fn $fn_name(&self, args: Vec<Arg>) -> Traversal {
            self.append($gremlin_name, args)
        }
    };
}

impl Traversal {
    // -- vertex/edge selection --------------------------------------

    /// `V(ids...)`. An empty `ids` selects every vertex.
    pub fn v(&self, ids: Vec<Arg>) -> Traversal {
        self.append("V", ids)
    }

    /// `E(ids...)`.
    pub fn e(&self, ids: Vec<Arg>) -> Traversal {
        self.append("E", ids)
    }

    // -- creation -----------------------------------------------------

    pub fn add_v(&self, label: Option<&str>) -> Traversal {
        match label {
            Some(label) => self.append("addV", vec![Arg::from(label)]),
            None => self.append("addV", vec![]),
        }
    }

    pub fn add_e(&self, label: &str) -> Traversal {
        self.append("addE", vec![Arg::from(label)])
    }

    // -- property mutation --------------------------------------------

    /// `property(key, value)`.
    pub fn property<T: Into<Arg>>(&self, key: &str, value: T) -> Traversal {
        self.append("property", vec![Arg::from(key), value.into()])
    }

    /// Same as [`property`](Self::property); named separately so internal
    /// callers (namespace sugar) don't read as a public two-arg overload.
    pub(crate) fn property_single<T: Into<Arg>>(&self, key: &str, value: T) -> Traversal {
        self.property(key, value)
    }

    /// `property(cardinality, key, value)`, where `cardinality` is one of
    /// `single`, `list`, `set`.
    pub fn property_with_cardinality<T: Into<Arg>>(
        &self,
        cardinality: &str,
        key: &str,
        value: T,
    ) -> Traversal {
        self.append(
            "property",
            vec![Arg::Ident(cardinality.to_string()), Arg::from(key), value.into()],
        )
    }

    // -- filtering ------------------------------------------------------

    pub fn has<T: Into<Arg>>(&self, key: &str, value: T) -> Traversal {
        self.append("has", vec![Arg::from(key), value.into()])
    }

    variadic_step!(has_label, "hasLabel");
    variadic_step!(has_id, "hasId");
    variadic_step!(has_key, "hasKey");

    pub fn has_not(&self, key: &str) -> Traversal {
        self.append("hasNot", vec![Arg::from(key)])
    }

    unary_step!(where_, "where");
    unary_step!(is, "is");
    unary_step!(not, "not");

    // -- traversal --------------------------------------------------

    variadic_step!(out, "out");
    variadic_step!(in_, "in");
    variadic_step!(both, "both");
    variadic_step!(out_e, "outE");
    variadic_step!(in_e, "inE");
    variadic_step!(both_e, "bothE");
    nullary_step!(out_v, "outV");
    nullary_step!(in_v, "inV");
    nullary_step!(both_v, "bothV");
    nullary_step!(other_v, "otherV");

    unary_step!(to, "to");
    unary_step!(from, "from");

    // -- composition --------------------------------------------------

    variadic_step!(and, "and");
    variadic_step!(or, "or");
    variadic_step!(coalesce, "coalesce");
    variadic_step!(union, "union");
    variadic_step!(choose, "choose");

    // -- reshaping ------------------------------------------------------

    nullary_step!(fold, "fold");
    nullary_step!(unfold, "unfold");
    variadic_step!(project, "project");
    variadic_step!(by, "by");
    variadic_step!(select, "select");
    unary_step!(as_, "as");
    nullary_step!(group, "group");
    nullary_step!(group_count, "groupCount");
    unary_step!(aggregate, "aggregate");
    unary_step!(store, "store");
    variadic_step!(cap, "cap");

    // -- paging -----------------------------------------------------

    pub fn limit(&self, n: i64) -> Traversal {
        self.append("limit", vec![Arg::from(n)])
    }

    pub fn range(&self, low: i64, high: i64) -> Traversal {
        self.append("range", vec![Arg::from(low), Arg::from(high)])
    }

    pub fn tail(&self, n: Option<i64>) -> Traversal {
        match n {
            Some(n) => self.append("tail", vec![Arg::from(n)]),
            None => self.append("tail", vec![]),
        }
    }

    nullary_step!(dedup, "dedup");

    // -- flow control -----------------------------------------------

    unary_step!(repeat, "repeat");
    unary_step!(until, "until");
    nullary_step!(emit, "emit");

    pub fn times(&self, n: i64) -> Traversal {
        self.append("times", vec![Arg::from(n)])
    }

    nullary_step!(loops, "loops");
    unary_step!(side_effect, "sideEffect");
    unary_step!(local, "local");
    nullary_step!(barrier, "barrier");

    // -- terminals ------------------------------------------------------

    nullary_step!(to_list, "toList");
    nullary_step!(to_set, "toSet");
    nullary_step!(to_bulk_set, "toBulkSet");
    nullary_step!(next, "next");
    nullary_step!(has_next, "hasNext");
    nullary_step!(drop, "drop");
    nullary_step!(iterate, "iterate");
    nullary_step!(count, "count");
    nullary_step!(sum, "sum");
    nullary_step!(min, "min");
    nullary_step!(max, "max");
    nullary_step!(label, "label");
    nullary_step!(id, "id");
    nullary_step!(key, "key");
    variadic_step!(values, "values");
    variadic_step!(value_map, "valueMap");
    variadic_step!(element_map, "elementMap");
    nullary_step!(path, "path");
    nullary_step!(simple_path, "simplePath");
    nullary_step!(cyclic_path, "cyclicPath");
    unary_step!(datetime, "datetime");
    unary_step!(constant, "constant");
    nullary_step!(identity, "identity");
    nullary_step!(order, "order");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::arg::VertexId;
    use crate::process::traversal::{anonymous, root};
    use crate::process::{eq, gt};

    #[test]
    fn has_label_takes_a_variadic_list() {
        let t = root()
            .v(vec![])
            .has_label(vec![Arg::from("person"), Arg::from("company")]);
        assert_eq!("g.V().hasLabel('person', 'company')", t.encode().unwrap());
    }

    #[test]
    fn has_accepts_a_predicate_value() {
        let t = root().v(vec![]).has("age", gt(30));
        assert_eq!("g.V().has('age', gt(30))", t.encode().unwrap());
    }

    #[test]
    fn property_with_cardinality_emits_the_bare_marker() {
        let t = root()
            .v(vec![Arg::Vertex(VertexId::Int(1))])
            .property_with_cardinality("list", "tag", "blue");
        assert_eq!(
            "g.V(V(1)).property(list, 'tag', 'blue')",
            t.encode().unwrap()
        );
    }

    #[test]
    fn nested_anonymous_traversal_renders_with_double_underscore() {
        let t = root()
            .v(vec![])
            .out(vec![Arg::from("knows")])
            .where_(anonymous().has("age", eq(29)));
        assert_eq!(
            "g.V().out('knows').where(__.has('age', eq(29)))",
            t.encode().unwrap()
        );
    }

    #[test]
    fn range_takes_two_integer_bounds() {
        let t = root().v(vec![]).range(0, 10);
        assert_eq!("g.V().range(0, 10)", t.encode().unwrap());
    }

    #[test]
    fn repeat_until_emit_chain() {
        let t = root()
            .v(vec![])
            .repeat(anonymous().out(vec![]))
            .until(anonymous().has_label(vec![Arg::from("target")]))
            .emit();
        assert_eq!(
            "g.V().repeat(__.out()).until(__.hasLabel('target')).emit()",
            t.encode().unwrap()
        );
    }
}
