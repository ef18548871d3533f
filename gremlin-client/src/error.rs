use thiserror::Error;

pub type GremlinResult<T> = Result<T, GremlinError>;

/// Caller-visible error taxonomy.
///
/// Server status codes from the response protocol are mapped to the
/// matching typed variant below by [`crate::response`]; transport and
/// programmer errors surface as the remaining variants.
#[derive(Debug, Error)]
pub enum GremlinError {
    #[error("no usable websocket: worker is reconnecting")]
    ConnectionUnavailable,

    #[error("UNAUTHORIZED: {0}")]
    Unauthorized(String),

    #[error("MALFORMED_REQUEST: {0}")]
    MalformedRequest(String),

    #[error("INVALID_REQUEST_ARGUMENTS: {0}")]
    InvalidRequestArguments(String),

    #[error("SERVER_ERROR: {0}")]
    ServerError(String),

    #[error("SCRIPT_EVALUATION_ERROR: {0}")]
    ScriptEvaluationError(String),

    #[error("SERVER_TIMEOUT: {0}")]
    ServerTimeout(String),

    #[error("SERVER_SERIALIZATION_ERROR: {0}")]
    ServerSerializationError(String),

    #[error("unrecognized server status code {0}: {1}")]
    UnrecognizedStatus(i64, String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("query timed out")]
    Timeout,

    #[error("{0}")]
    Generic(String),

    #[error("cast error: {0}")]
    Cast(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("websocket error: {0}")]
    WebSocket(#[from] async_tungstenite::tungstenite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid url: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("invalid uuid: {0}")]
    Uuid(#[from] uuid::Error),
}

impl GremlinError {
    /// Maps a server status code plus message to the error taxonomy above.
    /// `None` means the code is a non-terminal/continuation code and has no
    /// error representation.
    pub fn from_status(code: i64, message: String) -> Option<GremlinError> {
        match code {
            401 => Some(GremlinError::Unauthorized(message)),
            409 => Some(GremlinError::MalformedRequest(message)),
            499 => Some(GremlinError::InvalidRequestArguments(message)),
            500 => Some(GremlinError::ServerError(message)),
            597 => Some(GremlinError::ScriptEvaluationError(message)),
            598 => Some(GremlinError::ServerTimeout(message)),
            599 => Some(GremlinError::ServerSerializationError(message)),
            _ => None,
        }
    }
}
