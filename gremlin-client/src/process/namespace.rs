use crate::process::traversal::Traversal;

/// Default property name used by [`add_namespace`]/[`has_namespace`]
/// when the caller doesn't supply one.
pub const DEFAULT_NAMESPACE_PROPERTY: &str = "namespace";

/// Default namespace value used when the caller passes `None`.
pub const DEFAULT_NAMESPACE: &str = "default";

/// `property(property_name, ns)` sugar, defaulting the property name to
/// [`DEFAULT_NAMESPACE_PROPERTY`] and the value to [`DEFAULT_NAMESPACE`].
pub fn add_namespace(t: &Traversal, ns: Option<&str>, property_name: Option<&str>) -> Traversal {
    t.property_single(
        property_name.unwrap_or(DEFAULT_NAMESPACE_PROPERTY),
        ns.unwrap_or(DEFAULT_NAMESPACE),
    )
}

/// `has(property_name, ns)` sugar, with the same defaults as
/// [`add_namespace`].
pub fn has_namespace(t: &Traversal, ns: Option<&str>, property_name: Option<&str>) -> Traversal {
    t.has(
        property_name.unwrap_or(DEFAULT_NAMESPACE_PROPERTY),
        ns.unwrap_or(DEFAULT_NAMESPACE),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::traversal::root;

    #[test]
    fn add_namespace_uses_defaults() {
        let t = add_namespace(&root().v(vec![]), None, None);
        assert_eq!("g.V().property('namespace', 'default')", t.encode().unwrap());
    }

    #[test]
    fn has_namespace_accepts_an_explicit_value_and_property_name() {
        let t = has_namespace(&root().v(vec![]), Some("tenant-a"), Some("tenantId"));
        assert_eq!("g.V().has('tenantId', 'tenant-a')", t.encode().unwrap());
    }
}
