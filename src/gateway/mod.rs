use crate::conversation::ConversationTurn;
use crate::error::GatewayFailure;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

pub mod routine;

/// Shown as the assistant reply whenever the completion call fails.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ConversationTurn],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Something that turns a full turn sequence into one assistant reply.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(
        &self,
        model: &str,
        messages: &[ConversationTurn],
    ) -> Result<String, GatewayFailure>;
}

/// Posts `{model, messages}` to a chat-completions style proxy.
#[derive(Debug, Clone)]
pub struct HttpCompletionBackend {
    endpoint_url: String,
    http: reqwest::Client,
}

impl HttpCompletionBackend {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CompletionBackend for HttpCompletionBackend {
    async fn complete(
        &self,
        model: &str,
        messages: &[ConversationTurn],
    ) -> Result<String, GatewayFailure> {
        let response = self
            .http
            .post(&self.endpoint_url)
            .json(&CompletionRequest { model, messages })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayFailure::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let parsed: CompletionResponse = serde_json::from_slice(&body)?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(GatewayFailure::EmptyChoices)
    }
}

/// Relays transcripts to the completion backend with a fixed model.
#[derive(Clone)]
pub struct AssistantGateway {
    backend: Arc<dyn CompletionBackend>,
    model: String,
}

impl AssistantGateway {
    pub fn new(backend: Arc<dyn CompletionBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    /// Never fails: any backend error becomes [`FALLBACK_REPLY`].
    pub async fn send(&self, messages: &[ConversationTurn]) -> String {
        match self.backend.complete(&self.model, messages).await {
            Ok(reply) => {
                info!(model = %self.model, turns = messages.len(), reply_len = reply.len(), "assistant replied");
                reply
            }
            Err(err) => {
                warn!(model = %self.model, error = %err, "assistant call failed, using fallback reply");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedBackend;
    use super::*;
    use crate::conversation::Role;

    fn turns() -> Vec<ConversationTurn> {
        vec![
            ConversationTurn::new(Role::System, "sys"),
            ConversationTurn::new(Role::User, "Which cleanser?"),
        ]
    }

    #[tokio::test]
    async fn http_backend_posts_model_and_full_transcript() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "model": "gpt-4o",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "Which cleanser?"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Use the foaming one."}}]}"#)
            .create_async()
            .await;

        let backend = HttpCompletionBackend::new(format!("{}/", server.url()));
        let reply = backend
            .complete("gpt-4o", &turns())
            .await
            .expect("completion should succeed");

        mock.assert_async().await;
        assert_eq!(reply, "Use the foaming one.");
    }

    #[tokio::test]
    async fn http_backend_rejects_unexpected_shapes() {
        let mut server = mockito::Server::new_async().await;
        let _empty = server
            .mock("POST", "/empty")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;
        let _shape = server
            .mock("POST", "/shape")
            .with_status(200)
            .with_body(r#"{"error":{"message":"quota"}}"#)
            .create_async()
            .await;
        let _status = server
            .mock("POST", "/status")
            .with_status(500)
            .create_async()
            .await;

        let empty = HttpCompletionBackend::new(format!("{}/empty", server.url()));
        assert!(matches!(
            empty.complete("m", &turns()).await,
            Err(GatewayFailure::EmptyChoices)
        ));

        let shape = HttpCompletionBackend::new(format!("{}/shape", server.url()));
        assert!(matches!(
            shape.complete("m", &turns()).await,
            Err(GatewayFailure::Decode(_))
        ));

        let status = HttpCompletionBackend::new(format!("{}/status", server.url()));
        assert!(matches!(
            status.complete("m", &turns()).await,
            Err(GatewayFailure::Status(500))
        ));
    }

    #[tokio::test]
    async fn gateway_failure_becomes_fallback_reply() {
        let backend = Arc::new(ScriptedBackend::replying(vec![Err(GatewayFailure::Status(502))]));
        let gateway = AssistantGateway::new(backend, "gpt-4o");

        assert_eq!(gateway.send(&turns()).await, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn gateway_passes_fixed_model() {
        let backend = Arc::new(ScriptedBackend::replying(vec![Ok("fine".to_string())]));
        let gateway = AssistantGateway::new(backend.clone(), "gpt-4o");

        assert_eq!(gateway.send(&turns()).await, "fine");
        let requests = backend.requests.lock().expect("request log should lock");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "gpt-4o");
        assert_eq!(requests[0].1, turns());
    }
}
