//! HTTP transport over the Bot API's `https://api.telegram.org/bot<token>/<method>` endpoints.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tbot_core::{
    config::{BotConfig, HttpConfig},
    error::TbotError,
    model::File,
    request::{InputFile, Payload},
    traits::Transport,
};
use tracing::debug;


/// Extra time granted to a long poll on top of the server-side timeout.
const LONG_POLL_GRACE_SECS: u64 = 10;

/// Envelope wrapped around every Bot API response.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    result: Option<Value>,
    description: Option<String>,
    error_code: Option<i64>,
    parameters: Option<ResponseParameters>,
}

#[derive(Debug, Deserialize)]
struct ResponseParameters {
    retry_after: Option<u64>,
}

/// [`Transport`] backed by a `reqwest` client.
pub struct HttpTransport {
    client: reqwest::Client,
    api_base: String,
    token: String,
    request_timeout: Duration,
}

impl HttpTransport {
    /// Create a transport from config. Fails on an empty token or a non-HTTP base URL.
    pub fn new(bot: &BotConfig, http: &HttpConfig) -> Result<Self, TbotError> {
        Self::with_client(reqwest::Client::new(), bot, http)
    }

    /// Like [`HttpTransport::new`] with a preconfigured `reqwest` client (proxy, TLS, ...).
    pub fn with_client(
        client: reqwest::Client,
        bot: &BotConfig,
        http: &HttpConfig,
    ) -> Result<Self, TbotError> {
        bot.validate()?;
        Ok(Self {
            client,
            api_base: bot.api_base.trim_end_matches('/').to_string(),
            token: bot.token.clone(),
            request_timeout: Duration::from_secs(http.request_timeout_secs),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_base, self.token)
    }

    /// Download URL for a file returned by `getFile`, if the server provided a path.
    pub fn file_url(&self, file: &File) -> Option<String> {
        file.file_path
            .as_ref()
            .map(|path| format!("{}/file/bot{}/{path}", self.api_base, self.token))
    }

    fn timeout_for(&self, method: &str, payload: &Payload) -> Duration {
        let long_poll = match payload {
            Payload::Json(body) if method == "getUpdates" => {
                body.get("timeout").and_then(Value::as_u64)
            }
            _ => None,
        };
        match long_poll {
            Some(secs) => self
                .request_timeout
                .max(Duration::from_secs(secs + LONG_POLL_GRACE_SECS)),
            None => self.request_timeout,
        }
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked = match self.token.split_once(':') {
            Some((id, _)) => format!("{id}:***"),
            None => "***".to_string(),
        };
        f.debug_struct("HttpTransport")
            .field("api_base", &self.api_base)
            .field("token", &masked)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, method: &str, payload: Payload) -> Result<Value, TbotError> {
        let timeout = self.timeout_for(method, &payload);
        let url = self.method_url(method);

        let request = match payload {
            Payload::Json(body) => self.client.post(&url).json(&body),
            Payload::Multipart {
                fields,
                file_field,
                file,
            } => {
                let form = build_form(fields, file_field, file).await?;
                self.client.post(&url).multipart(form)
            }
        };

        // `without_url` keeps the token out of error messages.
        let resp = request.timeout(timeout).send().await.map_err(|e| {
            TbotError::Network(format!("telegram {method} failed: {}", e.without_url()))
        })?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| {
            TbotError::Network(format!("telegram {method} read failed: {}", e.without_url()))
        })?;
        debug!("telegram {method} -> {status} ({} bytes)", body.len());

        classify(method, status, &body)
    }
}

/// Map an HTTP status plus body onto the envelope result or a classified error.
fn classify(method: &str, status: StatusCode, body: &[u8]) -> Result<Value, TbotError> {
    let parsed: Result<ApiResponse, _> = serde_json::from_slice(body);

    if status.is_server_error() {
        let description = match parsed {
            Ok(ApiResponse {
                description: Some(d),
                ..
            }) => d,
            _ => String::from_utf8_lossy(body).trim().to_string(),
        };
        return Err(TbotError::Server {
            status: status.as_u16(),
            description,
        });
    }

    let envelope = match parsed {
        Ok(envelope) => envelope,
        Err(_) if status == StatusCode::TOO_MANY_REQUESTS => {
            return Err(TbotError::RateLimited { retry_after: None });
        }
        Err(e) => {
            return Err(TbotError::Decode(format!(
                "telegram {method} ({status}): {e}"
            )));
        }
    };

    if !envelope.ok {
        if status == StatusCode::TOO_MANY_REQUESTS || envelope.error_code == Some(429) {
            return Err(TbotError::RateLimited {
                retry_after: envelope.parameters.and_then(|p| p.retry_after),
            });
        }
        return Err(TbotError::Api {
            code: envelope.error_code.unwrap_or(i64::from(status.as_u16())),
            description: envelope.description.unwrap_or_default(),
        });
    }

    envelope
        .result
        .ok_or_else(|| TbotError::Decode(format!("telegram {method}: ok response without result")))
}

async fn build_form(
    fields: Vec<(String, String)>,
    file_field: &'static str,
    file: InputFile,
) -> Result<Form, TbotError> {
    let mut form = Form::new();
    for (name, value) in fields {
        form = form.text(name, value);
    }

    let part = match file {
        InputFile::Path(path) => {
            let data = tokio::fs::read(&path).await?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file_field.to_string());
            Part::bytes(data).file_name(file_name)
        }
        InputFile::Memory { file_name, data } => Part::bytes(data).file_name(file_name),
        InputFile::FileId(id) => return Ok(form.text(file_field, id)),
    };

    Ok(form.part(file_field, part))
}
