use serde::{Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

use crate::io::graphson;
use crate::structure::GValue;
use crate::{GremlinError, GremlinResult};

/// Error status codes in priority order: when a batch
/// contains more than one, the first one listed here wins.
const ERROR_CODES_IN_PRIORITY_ORDER: [i64; 7] = [401, 409, 499, 500, 597, 598, 599];

/// A single WebSocket frame as classified by the transport, handed to the
/// assembler by the Connection Worker's passive drain loop.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundFrame {
    Text(String),
    Ping(Vec<u8>),
    Pong(Vec<u8>),
    Close,
}

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    #[serde(rename = "requestId")]
    request_id: Uuid,
    status: ResponseStatus,
    result: ResponseResult,
}

#[derive(Debug, Deserialize)]
struct ResponseStatus {
    code: i64,
    #[serde(default, deserialize_with = "map_null_to_default")]
    message: String,
    #[serde(default, deserialize_with = "map_null_to_default")]
    error_message: String,
}

impl ResponseStatus {
    fn effective_message(&self) -> &str {
        if !self.message.is_empty() {
            &self.message
        } else {
            &self.error_message
        }
    }
}

#[derive(Debug, Deserialize)]
struct ResponseResult {
    data: Option<Value>,
}

fn map_null_to_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Option::unwrap_or_default)
}

/// The Response Assembler: reassembles one logical Gremlin response
/// from the text frames of one or more passive-drain batches, tracking the
/// accumulator across batches and filtering frames for the worker's
/// current `requestId`.
pub struct ResponseAssembler {
    request_id: Uuid,
    accumulator: Vec<GValue>,
}

impl ResponseAssembler {
    pub fn new(request_id: Uuid) -> ResponseAssembler {
        ResponseAssembler {
            request_id,
            accumulator: Vec::new(),
        }
    }

    /// Feeds one batch of frames (as delivered together by a single drain
    /// iteration). Returns `Ok(None)` to keep draining, `Ok(Some(values))`
    /// when the response is complete, or `Err` for a terminal error
    /// (including the connection having been closed by the server).
    pub fn process_batch(&mut self, frames: &[InboundFrame]) -> GremlinResult<Option<Vec<GValue>>> {
        if frames.len() == 1 && matches!(frames[0], InboundFrame::Ping(_) | InboundFrame::Pong(_)) {
            return Ok(None);
        }
        if frames.len() == 1 && matches!(frames[0], InboundFrame::Close) {
            return Err(GremlinError::Transport(
                "connection closed by server".to_string(),
            ));
        }

        let texts: Vec<&str> = frames
            .iter()
            .filter_map(|f| match f {
                InboundFrame::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect();

        if texts.is_empty() {
            return Ok(None);
        }

        self.process_text_batch(&texts)
    }

    fn process_text_batch(&mut self, texts: &[&str]) -> GremlinResult<Option<Vec<GValue>>> {
        let mut batch_results = Vec::new();
        let mut codes = Vec::new();
        let mut messages = Vec::new();

        for text in texts {
            let envelope: ResponseEnvelope = serde_json::from_str(text)?;

            if envelope.request_id != self.request_id {
                tracing::warn!(
                    request_id = %envelope.request_id,
                    expected = %self.request_id,
                    "discarding response frame for an unexpected request id"
                );
                continue;
            }

            batch_results.extend(decode_result_data(envelope.result.data)?);
            codes.push(envelope.status.code);
            if !envelope.status.effective_message().is_empty() {
                messages.push(envelope.status.effective_message().to_string());
            }
        }

        if codes.is_empty() {
            // every frame in this batch was unexpected/stale
            return Ok(None);
        }

        if codes.contains(&204) {
            self.accumulator.clear();
            return Ok(Some(Vec::new()));
        }

        self.accumulator.extend(batch_results);

        if codes.contains(&200) {
            return Ok(Some(std::mem::take(&mut self.accumulator)));
        }

        if codes.contains(&206) {
            return Ok(None);
        }

        for code in ERROR_CODES_IN_PRIORITY_ORDER {
            if codes.contains(&code) {
                let message = messages.join(", ");
                return Err(GremlinError::from_status(code, message.clone())
                    .unwrap_or(GremlinError::UnrecognizedStatus(code, message)));
            }
        }

        Err(GremlinError::UnrecognizedStatus(codes[0], messages.join(", ")))
    }
}

fn decode_result_data(data: Option<Value>) -> GremlinResult<Vec<GValue>> {
    match data {
        None => Ok(Vec::new()),
        Some(value) => match graphson::decode(&value)? {
            GValue::List(items) | GValue::Set(items) => Ok(items),
            other => Ok(vec![other]),
        },
    }
}
