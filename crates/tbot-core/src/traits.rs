use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::{
    error::TbotError,
    model::{Update, User},
    request::Payload,
};

/// Remote-call capability: the only way the client talks to the Bot API.
///
/// Implementations perform the authenticated call, unwrap the API envelope
/// and classify failures into [`TbotError`] variants (see
/// [`TbotError::is_transient`]). The provided methods decode typed results
/// on top of [`Transport::call`]; test doubles may override them directly.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Invoke `method` with `payload` and return the envelope's `result`.
    async fn call(&self, method: &str, payload: Payload) -> Result<Value, TbotError>;

    /// Fetch the bot's own identity. Used once to verify the credential.
    async fn get_me(&self) -> Result<User, TbotError> {
        let result = self.call("getMe", Payload::Json(json!({}))).await?;
        decode(result)
    }

    /// Long-poll for updates starting at `offset`.
    ///
    /// The server holds the request for up to `timeout_secs` when nothing is
    /// pending and then answers with an empty batch.
    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TbotError> {
        let mut body = json!({ "timeout": timeout_secs });
        if let Some(offset) = offset {
            body["offset"] = json!(offset);
        }
        let result = self.call("getUpdates", Payload::Json(body)).await?;
        decode(result)
    }
}

/// Decode an envelope `result` into the expected type.
pub fn decode<T: DeserializeOwned>(result: Value) -> Result<T, TbotError> {
    serde_json::from_value(result).map_err(|e| TbotError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records calls and answers with a canned result.
    struct Canned {
        result: Value,
        calls: Mutex<Vec<(String, Payload)>>,
    }

    #[async_trait]
    impl Transport for Canned {
        async fn call(&self, method: &str, payload: Payload) -> Result<Value, TbotError> {
            self.calls
                .lock()
                .unwrap()
                .push((method.to_string(), payload));
            Ok(self.result.clone())
        }
    }

    #[tokio::test]
    async fn test_get_updates_encodes_offset_and_timeout() {
        let t = Canned {
            result: json!([{"update_id": 4}, {"update_id": 2}]),
            calls: Mutex::new(Vec::new()),
        };
        let updates = t.get_updates(Some(2), 60).await.unwrap();
        assert_eq!(updates.iter().map(|u| u.id).collect::<Vec<_>>(), vec![4, 2]);

        t.get_updates(None, 60).await.unwrap();

        let calls = t.calls.lock().unwrap();
        assert_eq!(calls[0].0, "getUpdates");
        assert_eq!(
            calls[0].1,
            Payload::Json(json!({"timeout": 60, "offset": 2}))
        );
        assert_eq!(calls[1].1, Payload::Json(json!({"timeout": 60})));
    }

    #[tokio::test]
    async fn test_get_me_decodes_user() {
        let t = Canned {
            result: json!({"id": 99, "first_name": "EchoBot", "username": "echo_bot"}),
            calls: Mutex::new(Vec::new()),
        };
        let me = t.get_me().await.unwrap();
        assert_eq!(me.id, 99);
        assert_eq!(me.username.as_deref(), Some("echo_bot"));
        assert_eq!(t.calls.lock().unwrap()[0].0, "getMe");
    }

    #[tokio::test]
    async fn test_unexpected_result_shape_is_decode_error() {
        let t = Canned {
            result: json!({"not": "a list"}),
            calls: Mutex::new(Vec::new()),
        };
        let err = t.get_updates(None, 60).await.unwrap_err();
        assert!(matches!(err, TbotError::Decode(_)));
        assert!(!err.is_transient());
    }
}
