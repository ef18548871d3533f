//! GraphSON-v3 typed-JSON decoder.
//!
//! Dispatches on the `@type` tag of `{"@type": T, "@value": V}` wrappers.
//! Grounded on `maldrake-gremlin-rs`'s `serializer_v3.rs` dispatch table,
//! adapted to the exact type set this crate needs.

use crate::structure::{Edge, Path, Vertex, GID};
use crate::{GValue, GremlinError, GremlinResult};
use serde_json::Value;
use std::collections::HashMap;

pub fn decode(value: &Value) -> GremlinResult<GValue> {
    match value {
        Value::Null => Ok(GValue::Null),
        Value::Object(map) => match (map.get("@type"), map.get("@value")) {
            (Some(Value::String(tag)), Some(v)) => decode_typed(tag, v),
            _ => decode_plain(value),
        },
        _ => decode_plain(value),
    }
}

fn decode_plain(value: &Value) -> GremlinResult<GValue> {
    match value {
        Value::Null => Ok(GValue::Null),
        Value::Bool(b) => Ok(GValue::Bool(*b)),
        Value::String(s) => Ok(GValue::String(s.clone())),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(GValue::Int64(i))
            } else if let Some(f) = n.as_f64() {
                Ok(GValue::Double(f))
            } else {
                Err(GremlinError::Json(serde_json::Error::io(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("unrepresentable number {}", n),
                ))))
            }
        }
        Value::Array(items) => {
            let decoded: GremlinResult<Vec<GValue>> = items.iter().map(decode).collect();
            Ok(GValue::List(decoded?))
        }
        Value::Object(_) => decode(value),
    }
}

fn decode_typed(tag: &str, v: &Value) -> GremlinResult<GValue> {
    match tag {
        "g:Int32" => Ok(GValue::Int32(expect_i64(v)? as i32)),
        "g:Int64" => Ok(GValue::Int64(expect_i64(v)?)),
        "g:Float" => Ok(GValue::Float(expect_f64(v)? as f32)),
        "g:Double" => Ok(GValue::Double(expect_f64(v)?)),
        "g:UUID" => {
            let s = expect_str(v)?;
            Ok(GValue::Uuid(uuid::Uuid::parse_str(s)?))
        }
        "g:Date" | "g:Timestamp" => {
            let micros = expect_i64(v)?;
            Ok(GValue::Date(micros_to_datetime(micros)))
        }
        "g:List" => decode_list(v).map(GValue::List),
        "g:Set" => decode_list(v).map(GValue::Set),
        "g:Map" => decode_map(v),
        "g:Vertex" => decode_vertex(v),
        "g:Edge" => decode_edge(v),
        "g:VertexProperty" => decode_vertex_property(v),
        "g:Property" => decode_property(v),
        "g:Path" => decode_path(v),
        _ => decode(v),
    }
}

fn micros_to_datetime(micros: i64) -> chrono::DateTime<chrono::Utc> {
    let secs = micros.div_euclid(1_000_000);
    let subsec_micros = micros.rem_euclid(1_000_000);
    chrono::DateTime::from_timestamp(secs, (subsec_micros * 1_000) as u32)
        .unwrap_or_else(|| chrono::DateTime::from_timestamp(0, 0).unwrap())
}

fn expect_i64(v: &Value) -> GremlinResult<i64> {
    v.as_i64()
        .ok_or_else(|| GremlinError::Json(serde_json::Error::io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("expected integer, found {}", v),
        ))))
}

fn expect_f64(v: &Value) -> GremlinResult<f64> {
    v.as_f64()
        .ok_or_else(|| GremlinError::Json(serde_json::Error::io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("expected number, found {}", v),
        ))))
}

fn expect_str(v: &Value) -> GremlinResult<&str> {
    v.as_str()
        .ok_or_else(|| GremlinError::Json(serde_json::Error::io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("expected string, found {}", v),
        ))))
}

fn decode_list(v: &Value) -> GremlinResult<Vec<GValue>> {
    let items = v.as_array().ok_or_else(|| {
        GremlinError::Json(serde_json::Error::io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("expected array, found {}", v),
        )))
    })?;
    items.iter().map(decode).collect()
}

fn decode_map(v: &Value) -> GremlinResult<GValue> {
    let items = v.as_array().ok_or_else(|| {
        GremlinError::Json(serde_json::Error::io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("g:Map @value must be an array, found {}", v),
        )))
    })?;

    let mut entries = Vec::with_capacity(items.len() / 2);
    let mut i = 0;
    while i + 1 < items.len() {
        let key = decode(&items[i])?;
        let value = decode(&items[i + 1])?;
        entries.push((key, value));
        i += 2;
    }
    Ok(GValue::Map(entries))
}

fn gid_from(value: GValue) -> GremlinResult<GID> {
    match value {
        GValue::Int32(i) => Ok(GID::Int32(i)),
        GValue::Int64(i) => Ok(GID::Int64(i)),
        GValue::String(s) => Ok(GID::String(s)),
        other => Err(GremlinError::Cast(format!("{:?} cannot be an id", other))),
    }
}

fn decode_vertex_properties(
    properties: &Value,
) -> GremlinResult<HashMap<String, Vec<crate::structure::VertexProperty>>> {
    match properties {
        Value::Null => Ok(HashMap::new()),
        Value::Object(obj) => {
            let mut out = HashMap::new();
            for (key, arr) in obj {
                let values = arr.as_array().ok_or_else(|| {
                    GremlinError::Json(serde_json::Error::io(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("expected array of vertex properties for {}", key),
                    )))
                })?;
                let mut decoded = Vec::with_capacity(values.len());
                for raw in values {
                    match decode(raw)? {
                        GValue::VertexProperty(vp) => decoded.push(vp),
                        other => {
                            return Err(GremlinError::Cast(format!(
                                "expected VertexProperty, found {:?}",
                                other
                            )))
                        }
                    }
                }
                out.insert(key.clone(), decoded);
            }
            Ok(out)
        }
        _ => Err(GremlinError::Json(serde_json::Error::io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("expected object or null for properties, found {}", properties),
        )))),
    }
}

fn decode_vertex(v: &Value) -> GremlinResult<GValue> {
    let label = v
        .get("label")
        .and_then(Value::as_str)
        .unwrap_or("vertex")
        .to_string();
    let id = gid_from(decode(&v["id"])?)?;
    let properties = decode_vertex_properties(v.get("properties").unwrap_or(&Value::Null))?;
    Ok(GValue::Vertex(Vertex::new(id, label, properties)))
}

fn decode_edge(v: &Value) -> GremlinResult<GValue> {
    let label = v
        .get("label")
        .and_then(Value::as_str)
        .unwrap_or("edge")
        .to_string();
    let id = gid_from(decode(&v["id"])?)?;

    let in_id = gid_from(decode(&v["inV"])?)?;
    let in_label = expect_str(&v["inVLabel"])?.to_string();
    let out_id = gid_from(decode(&v["outV"])?)?;
    let out_label = expect_str(&v["outVLabel"])?.to_string();

    let mut properties = HashMap::new();
    if let Some(Value::Object(props)) = v.get("properties") {
        for (key, raw) in props {
            match decode(raw)? {
                GValue::Property(p) => {
                    properties.insert(key.clone(), p.value().clone());
                }
                other => {
                    properties.insert(key.clone(), other);
                }
            }
        }
    }

    Ok(GValue::Edge(Edge::new(
        id,
        label,
        Vertex::partial(in_id, in_label),
        Vertex::partial(out_id, out_label),
        properties,
    )))
}

fn decode_vertex_property(v: &Value) -> GremlinResult<GValue> {
    let label = v
        .get("label")
        .and_then(Value::as_str)
        .unwrap_or("vertex_property")
        .to_string();
    let id = gid_from(decode(&v["id"])?)?;
    let value = decode(&v["value"])?;

    let mut vp = crate::structure::VertexProperty::new(id, label, value);
    if let Some(vertex_id) = v.get("vertex") {
        vp = vp.with_vertex(gid_from(decode(vertex_id)?)?);
    }
    if let Some(Value::Object(meta)) = v.get("properties") {
        let mut decoded_meta = HashMap::new();
        for (key, raw) in meta {
            decoded_meta.insert(key.clone(), decode(raw)?);
        }
        vp = vp.with_meta(decoded_meta);
    }
    Ok(GValue::VertexProperty(vp))
}

fn decode_property(v: &Value) -> GremlinResult<GValue> {
    let key = expect_str(&v["key"])?.to_string();
    let value = decode(&v["value"])?;
    Ok(GValue::Property(crate::structure::Property::new(key, value)))
}

fn decode_path(v: &Value) -> GremlinResult<GValue> {
    let labels_value = decode(&v["labels"])?;
    let labels = match labels_value {
        GValue::List(sets) => sets
            .into_iter()
            .map(|set| match set {
                GValue::List(strings) | GValue::Set(strings) => strings
                    .into_iter()
                    .map(|s| match s {
                        GValue::String(s) => Ok(s),
                        other => Err(GremlinError::Cast(format!(
                            "expected string label, found {:?}",
                            other
                        ))),
                    })
                    .collect::<GremlinResult<Vec<String>>>(),
                other => Err(GremlinError::Cast(format!(
                    "expected a set of labels, found {:?}",
                    other
                ))),
            })
            .collect::<GremlinResult<Vec<Vec<String>>>>()?,
        other => {
            return Err(GremlinError::Cast(format!(
                "expected a list of label sets, found {:?}",
                other
            )))
        }
    };

    let objects = match decode(&v["objects"])? {
        GValue::List(objs) => objs,
        other => {
            return Err(GremlinError::Cast(format!(
                "expected a list of objects, found {:?}",
                other
            )))
        }
    };

    Ok(GValue::Path(Path::new(labels, objects)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::GID;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({"@type": "g:Int32", "@value": 31}), GValue::Int32(31))]
    #[case(json!({"@type": "g:Int64", "@value": 31}), GValue::Int64(31))]
    #[case(json!({"@type": "g:Float", "@value": 31.5}), GValue::Float(31.5))]
    #[case(json!({"@type": "g:Double", "@value": 31.5}), GValue::Double(31.5))]
    fn decodes_numeric_type_tags(#[case] input: Value, #[case] expected: GValue) {
        assert_eq!(expected, decode(&input).unwrap());
    }

    #[test]
    fn decodes_uuid() {
        let input = json!({"@type": "g:UUID", "@value": "41d2e28a-20a4-4ab0-b379-d810dede3786"});
        let result = decode(&input).unwrap();
        assert_eq!(
            GValue::Uuid(uuid::Uuid::parse_str("41d2e28a-20a4-4ab0-b379-d810dede3786").unwrap()),
            result
        );
    }

    #[test]
    fn decodes_date_as_microseconds_since_epoch() {
        let input = json!({"@type": "g:Date", "@value": 1_551_825_863_000_000i64});
        let result = decode(&input).unwrap();
        assert_eq!(GValue::Date(micros_to_datetime(1_551_825_863_000_000)), result);
    }

    #[test]
    fn decodes_list_and_set() {
        let list = json!({"@type": "g:List", "@value": [
            {"@type": "g:Int32", "@value": 1},
            {"@type": "g:Int32", "@value": 2},
            "3"
        ]});
        assert_eq!(
            GValue::List(vec![GValue::Int32(1), GValue::Int32(2), GValue::from("3")]),
            decode(&list).unwrap()
        );

        let set = json!({"@type": "g:Set", "@value": [{"@type": "g:Int32", "@value": 1}]});
        assert_eq!(GValue::Set(vec![GValue::Int32(1)]), decode(&set).unwrap());
    }

    #[test]
    fn decodes_map_with_flat_alternating_entries() {
        let input = json!({"@type": "g:Map", "@value": ["a", {"@type": "g:Int32", "@value": 1}, "b", "marko"]});
        let result = decode(&input).unwrap();
        assert_eq!(
            GValue::Map(vec![
                (GValue::from("a"), GValue::Int32(1)),
                (GValue::from("b"), GValue::from("marko")),
            ]),
            result
        );
    }

    #[test]
    fn decodes_map_with_typed_key() {
        // a key wrapped in an (unrecognized to this table) type tag decodes
        // to its inner raw value, which is then used as the real key.
        let input = json!({"@type": "g:Map", "@value": [
            {"@type": "g:T", "@value": "id"}, {"@type": "g:Int32", "@value": 7}
        ]});
        let result = decode(&input).unwrap();
        assert_eq!(GValue::Map(vec![(GValue::from("id"), GValue::Int32(7))]), result);
    }

    #[test]
    fn decodes_vertex_with_properties() {
        let raw = r#"{"@type":"g:Vertex","@value":{"id":{"@type":"g:Int64","@value":1},"label":"person","properties":{"name":[{"@type":"g:VertexProperty","@value":{"id":{"@type":"g:Int64","@value":0},"value":"marko","label":"name"}}]}}}"#;
        let value: Value = serde_json::from_str(raw).unwrap();
        let result = decode(&value).unwrap();

        match result {
            GValue::Vertex(v) => {
                assert_eq!(&GID::Int64(1), v.id());
                assert_eq!("person", v.label());
                let names = v.properties().get("name").unwrap();
                assert_eq!(1, names.len());
                assert_eq!(&GValue::from("marko"), names[0].value());
            }
            other => panic!("expected Vertex, got {:?}", other),
        }
    }

    #[test]
    fn decodes_edge() {
        let raw = r#"{"@type":"g:Edge","@value":{"id":{"@type":"g:Int32","@value":13},"label":"develops","inVLabel":"software","outVLabel":"person","inV":{"@type":"g:Int32","@value":10},"outV":{"@type":"g:Int32","@value":1},"properties":{"since":{"@type":"g:Property","@value":{"key":"since","value":{"@type":"g:Int32","@value":2009}}}}}}"#;
        let value: Value = serde_json::from_str(raw).unwrap();
        let result = decode(&value).unwrap();

        match result {
            GValue::Edge(e) => {
                assert_eq!(&GID::Int32(13), e.id());
                assert_eq!("develops", e.label());
                assert_eq!(&GID::Int32(10), e.in_vertex().id());
                assert_eq!("software", e.in_vertex().label());
                assert_eq!(&GID::Int32(1), e.out_vertex().id());
                assert_eq!(Some(&GValue::Int32(2009)), e.properties().get("since"));
            }
            other => panic!("expected Edge, got {:?}", other),
        }
    }

    #[test]
    fn decodes_path() {
        let raw = r#"{"@type":"g:Path","@value":{"labels":{"@type":"g:List","@value":[{"@type":"g:Set","@value":[]},{"@type":"g:Set","@value":[]}]},"objects":{"@type":"g:List","@value":[{"@type":"g:Vertex","@value":{"id":{"@type":"g:Int32","@value":1},"label":"person"}},{"@type":"g:Vertex","@value":{"id":{"@type":"g:Int32","@value":10},"label":"software"}}]}}}"#;
        let value: Value = serde_json::from_str(raw).unwrap();
        let result = decode(&value).unwrap();

        match result {
            GValue::Path(p) => {
                assert_eq!(2, p.labels().len());
                assert_eq!(2, p.objects().len());
            }
            other => panic!("expected Path, got {:?}", other),
        }
    }

    #[test]
    fn unknown_type_tag_returns_value_unchanged() {
        let input = json!({"@type": "g:SomeFutureType", "@value": "raw"});
        assert_eq!(GValue::from("raw"), decode(&input).unwrap());
    }

    #[test]
    fn null_data_decodes_to_null() {
        assert_eq!(GValue::Null, decode(&Value::Null).unwrap());
    }
}
