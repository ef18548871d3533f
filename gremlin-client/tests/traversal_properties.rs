use gremlin_client::process::{anonymous, eq, root, GraphTraversalSource};

#[test]
fn s6_predicate_and_escaping() {
    let g = GraphTraversalSource::new();
    let t = g.v(vec![]).has("name", "O'Brien").values(vec!["name".into()]);

    assert_eq!(
        "g.V().has('name', 'O\\'Brien').values('name')",
        t.encode().unwrap()
    );
}

#[test]
fn property_encoder_determinism() {
    let t = root().v(vec![]).has("name", eq("marko"));
    assert_eq!(t.encode().unwrap(), t.encode().unwrap());
}

#[test]
fn property_append_only_extends_the_previous_encoding() {
    let base = root().v(vec![]);
    let extended = base.has("name", "marko");

    let base_encoded = base.encode().unwrap();
    let extended_encoded = extended.encode().unwrap();

    assert!(extended_encoded.starts_with(&base_encoded));
    assert_eq!(
        format!("{}.has('name', 'marko')", base_encoded),
        extended_encoded
    );
}

#[test]
fn property_anonymous_placement_invariant() {
    let top_level = anonymous().out(vec![]);
    assert!(top_level.encode().is_err());

    let nested = root().v(vec![]).where_(anonymous().out(vec![]));
    assert!(nested.encode().is_ok());
}
