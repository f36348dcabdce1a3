//! The `/chat` wire contract and its HTTP client.

use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::debug;

/// Request body: `{"message": "<text>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Parsed success body.
///
/// A field counts only when its JSON value is truthy: a non-empty string, a
/// non-zero number, `true`, an array or an object. A truthy `response` must be
/// a string to be shown; any other value hides the reply, `error` included.
/// A truthy `error` is shown in its script string form (`[1,2]` is `1,2`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatReply {
    pub response: Option<String>,
    pub error: Option<String>,
}

impl ChatReply {
    /// Reply carrying a response text.
    pub fn response(text: impl Into<String>) -> Self {
        Self {
            response: Some(text.into()),
            error: None,
        }
    }

    /// Reply carrying a server-side error text.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            response: None,
            error: Some(text.into()),
        }
    }

    /// Parse a JSON body.
    ///
    /// `null` and invalid JSON are malformed. Any other non-object value has
    /// no fields and yields an empty reply.
    pub fn from_body(body: &[u8]) -> Result<Self, RequestError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| RequestError::Malformed(e.to_string()))?;

        match value {
            Value::Null => Err(RequestError::Malformed("response body is null".into())),
            Value::Object(map) => match map.get("response").filter(|v| is_truthy(v)) {
                Some(Value::String(text)) => Ok(Self::response(text.clone())),
                Some(other) => {
                    debug!(response = %other, "reply response is not text");
                    Ok(Self::default())
                }
                None => Ok(Self {
                    response: None,
                    error: map.get("error").filter(|v| is_truthy(v)).map(script_text),
                }),
            },
            _ => Ok(Self::default()),
        }
    }

    /// Text of the bot entry this reply produces, if any.
    pub fn bot_text(&self) -> Option<String> {
        if let Some(response) = &self.response {
            Some(response.clone())
        } else {
            self.error.as_ref().map(|error| format!("Error: {error}"))
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::Bool(true) | Value::Array(_) | Value::Object(_) => true,
    }
}

/// String conversion used when a value is concatenated into text.
fn script_text(value: &Value) -> String {
    match value {
        Value::Null => "null".into(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => script_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".into(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

/// Errors that fail a request. All of them are shown to the user the same way.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Server answered with a non-success status.
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Network or protocol failure.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Body was not usable JSON.
    #[error("{0}")]
    Malformed(String),

    /// The task running the request did not finish.
    #[error("request task failed: {0}")]
    Task(String),
}

/// Future returned by [`ChatTransport::send`].
pub type SendFuture = Pin<Box<dyn Future<Output = Result<ChatReply, RequestError>> + Send>>;

/// Something that can deliver one chat message and return the reply.
pub trait ChatTransport {
    /// Send a message. The future owns everything it needs so it can be
    /// spawned onto a runtime.
    fn send(&self, message: String) -> SendFuture;

    /// Human-readable target, for status display and logs.
    fn describe(&self) -> String;
}

/// HTTP transport for `POST /chat`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    url: Url,
}

impl HttpTransport {
    /// Create a transport for a full endpoint URL.
    pub fn new(url: Url, timeout: Option<Duration>) -> Result<Self, RequestError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, url })
    }

    /// Endpoint this transport posts to.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl ChatTransport for HttpTransport {
    fn send(&self, message: String) -> SendFuture {
        let client = self.client.clone();
        let url = self.url.clone();

        Box::pin(async move {
            debug!(%url, "posting chat message");
            let response = client
                .post(url)
                .json(&ChatRequest { message })
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(RequestError::Status(status.as_u16()));
            }

            let body = response.bytes().await?;
            ChatReply::from_body(&body)
        })
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}
