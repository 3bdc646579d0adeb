use crate::error::AlertaError;
use crate::types::WebhookPayload;
use async_trait::async_trait;
use reqwest::StatusCode;

/// Destino das mensagens já formatadas.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), AlertaError>;
}

/// Resposta do webhook: qualquer status fora de 2xx vira `Dispatch` com o corpo.
pub fn dispatch_outcome(status: StatusCode, body: &str) -> Result<(), AlertaError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(AlertaError::Dispatch(format!("{}: {}", status, body)))
    }
}

/// Webhook de entrada do chat (formato Mattermost/Slack: `text` + `username`).
pub struct WebhookNotifier {
    url: String,
    username: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, username: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            client,
        }
    }

    fn request(&self, text: &str) -> reqwest::RequestBuilder {
        let payload = WebhookPayload {
            text,
            username: &self.username,
        };
        // `.json()` já define Content-Type: application/json.
        self.client.post(&self.url).json(&payload)
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, text: &str) -> Result<(), AlertaError> {
        let response = self
            .request(text)
            .send()
            .await
            .map_err(|e| AlertaError::Dispatch(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        dispatch_outcome(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::CONTENT_TYPE;

    fn notifier() -> WebhookNotifier {
        WebhookNotifier::new("http://chat.local/hooks/x", "PRTG-ALERT", reqwest::Client::new())
    }

    #[test]
    fn post_carries_json_payload() {
        let request = notifier().request("oi").build().unwrap();
        assert_eq!(request.method(), &reqwest::Method::POST);
        assert_eq!(request.url().as_str(), "http://chat.local/hooks/x");
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(value, serde_json::json!({"text": "oi", "username": "PRTG-ALERT"}));
    }

    #[test]
    fn success_statuses_are_delivered() {
        assert!(dispatch_outcome(StatusCode::OK, "ok").is_ok());
        assert!(dispatch_outcome(StatusCode::NO_CONTENT, "").is_ok());
    }

    #[test]
    fn rejection_keeps_status_and_body() {
        let err = dispatch_outcome(StatusCode::BAD_REQUEST, "Unable to parse incoming data").unwrap_err();
        match err {
            AlertaError::Dispatch(m) => {
                assert!(m.contains("400"));
                assert!(m.contains("Unable to parse incoming data"));
            }
            other => panic!("erro inesperado: {other:?}"),
        }
    }
}
