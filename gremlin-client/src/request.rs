use serde::Serialize;
use uuid::Uuid;

/// The Request Framer: wraps a rendered Gremlin-Groovy query string
/// in the envelope the server expects, with a fresh v4 `requestId`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    request_id: Uuid,
    op: &'static str,
    processor: &'static str,
    args: RequestArgs,
}

#[derive(Debug, Serialize)]
struct RequestArgs {
    gremlin: String,
    language: &'static str,
}

impl Request {
    /// Frames `gremlin` (an already-encoded Groovy source string) as an
    /// `eval` request, generating a fresh correlation id.
    pub fn eval(gremlin: String) -> Request {
        Request {
            request_id: Uuid::new_v4(),
            op: "eval",
            processor: "",
            args: RequestArgs {
                gremlin,
                language: "gremlin-groovy",
            },
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Serializes the envelope to the JSON text sent as the single
    /// outbound WebSocket text frame.
    pub fn to_json(&self) -> crate::GremlinResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_has_the_exact_shape_the_server_expects() {
        let request = Request::eval("g.V()".to_string());
        let value: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();

        assert_eq!(
            value["requestId"].as_str().unwrap(),
            request.request_id().to_string()
        );
        assert_eq!(value["op"], "eval");
        assert_eq!(value["processor"], "");
        assert_eq!(value["args"]["gremlin"], "g.V()");
        assert_eq!(value["args"]["language"], "gremlin-groovy");
    }

    #[test]
    fn each_request_gets_a_fresh_request_id() {
        let a = Request::eval("g.V()".to_string());
        let b = Request::eval("g.V()".to_string());
        assert_ne!(a.request_id(), b.request_id());
    }
}
