use std::time::Duration;

use reqwest::Url;
use serde_json::Value;

use crate::error::DispatchError;

/// One-shot JSON POSTs to caller-supplied callback URLs
#[derive(Clone)]
pub struct CallbackDispatcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl CallbackDispatcher {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// POST `payload` to `url`. Any response counts as delivered; only
    /// transport failures are errors.
    pub async fn post_result(&self, url: &Url, payload: &Value) -> Result<(), DispatchError> {
        let response = self
            .client
            .post(url.clone())
            .json(payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| DispatchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!("Callback {} answered {}", url, response.status());
        Ok(())
    }

    /// Best-effort delivery: failures are logged and swallowed
    pub async fn notify(&self, url: &Url, payload: &Value) -> bool {
        match self.post_result(url, payload).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to deliver callback: {}", e);
                false
            }
        }
    }
}
