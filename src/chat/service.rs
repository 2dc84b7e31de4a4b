//! Chat orchestration shared by the HTTP handlers.
//!
//! Routes each request either to the scripted-dialogue responder (which
//! reads and writes the session store) or to the generation provider (which
//! doesn't touch sessions at all).

use std::sync::Arc;

use crate::dialogue::{self, PromptSource};
use crate::error::ChatError;
use crate::llms::GenerationProvider;
use crate::session::{SessionStore, Turn};

use super::types::ChatRequest;

/// Ties the dialogue engine, the session store and the generation provider
/// together.
#[derive(Clone)]
pub struct ChatService {
    scripted_model: String,
    sessions: Arc<dyn SessionStore>,
    provider: Arc<dyn GenerationProvider>,
    prompts: Arc<dyn PromptSource>,
}

impl ChatService {
    pub fn new(
        scripted_model: impl Into<String>,
        sessions: Arc<dyn SessionStore>,
        provider: Arc<dyn GenerationProvider>,
        prompts: Arc<dyn PromptSource>,
    ) -> Self {
        Self {
            scripted_model: scripted_model.into(),
            sessions,
            provider,
            prompts,
        }
    }

    pub fn scripted_model(&self) -> &str {
        &self.scripted_model
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    /// Scripted model first, then whatever the provider reports.
    pub async fn list_models(&self) -> Result<Vec<String>, ChatError> {
        let provided = self
            .provider
            .list_models()
            .await
            .map_err(ChatError::ModelsUnavailable)?;
        let mut models = Vec::with_capacity(provided.len() + 1);
        models.push(self.scripted_model.clone());
        models.extend(provided);
        Ok(models)
    }

    /// Validate and answer one chat request.
    pub async fn respond(&self, request: &ChatRequest) -> Result<String, ChatError> {
        let model = request
            .model
            .as_deref()
            .filter(|m| !m.is_empty())
            .ok_or(ChatError::MissingField("model"))?;

        if model == self.scripted_model {
            self.respond_scripted(request).await
        } else {
            let message = request
                .message
                .as_deref()
                .ok_or(ChatError::MissingField("message"))?;
            Ok(self.provider.generate(model, message).await?)
        }
    }

    async fn respond_scripted(&self, request: &ChatRequest) -> Result<String, ChatError> {
        let session_id = request.session_id();

        if request.is_initial() {
            let prompt = dialogue::opening_prompt(self.prompts.as_ref());
            self.sessions.record_prompt(session_id, prompt).await;
            tracing::debug!(session_id, "issued opening prompt");
            return Ok(prompt.to_string());
        }

        let message = request
            .message
            .as_deref()
            .ok_or(ChatError::MissingField("message"))?;
        let reply = dialogue::respond_to(message);
        self.sessions
            .append_exchange(session_id, vec![Turn::user(message), Turn::ai(reply)])
            .await;
        Ok(reply.to_string())
    }
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("scripted_model", &self.scripted_model)
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::dialogue::selector::{ELABORATION_REQUEST, NEGATIVE_REDIRECT};
    use crate::dialogue::{SeededSource, OPENING_PROMPTS};
    use crate::llms::ProviderError;
    use crate::session::{InMemorySessionStore, Role};

    /// Provider that echoes prompts, or fails every call when `fail` is set.
    #[derive(Debug, Default)]
    pub(crate) struct EchoProvider {
        pub fail: bool,
        pub calls: AtomicUsize,
    }

    #[async_trait]
    impl GenerationProvider for EchoProvider {
        async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ProviderError::Malformed("down".into()));
            }
            Ok(vec!["llama3:latest".into()])
        }

        async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ProviderError::Status {
                    status: 500,
                    body: "boom".into(),
                });
            }
            Ok(format!("[{model}] {prompt}"))
        }
    }

    fn service_with(provider: Arc<EchoProvider>) -> ChatService {
        ChatService::new(
            "AreciboAI",
            Arc::new(InMemorySessionStore::new()),
            provider,
            Arc::new(SeededSource::new(1)),
        )
    }

    fn service() -> ChatService {
        service_with(Arc::new(EchoProvider::default()))
    }

    #[tokio::test]
    async fn test_negative_message_scenario() {
        let svc = service();
        let req = ChatRequest::new("AreciboAI", "I miss my mother").session("s1");

        let reply = svc.respond(&req).await.unwrap();
        assert_eq!(reply, NEGATIVE_REDIRECT);

        let session = svc.sessions().get("s1").await.unwrap();
        assert_eq!(session.history.len(), 2);
        assert_eq!(session.history[0].role, Role::User);
        assert_eq!(session.history[0].text, "I miss my mother");
        assert_eq!(session.history[1].role, Role::Ai);
        assert_eq!(session.history[1].text, NEGATIVE_REDIRECT);
    }

    #[tokio::test]
    async fn test_two_calls_append_four_turns_to_one_session_only() {
        let svc = service();
        svc.respond(&ChatRequest::new("AreciboAI", "yes").session("s1"))
            .await
            .unwrap();
        svc.respond(&ChatRequest::new("AreciboAI", "the garden").session("s1"))
            .await
            .unwrap();
        svc.sessions().get_or_create("s2").await;

        assert_eq!(svc.sessions().get("s1").await.unwrap().history.len(), 4);
        assert!(svc.sessions().get("s2").await.unwrap().history.is_empty());
        assert_eq!(svc.sessions().len().await, 2);
    }

    #[tokio::test]
    async fn test_initial_ignores_message_and_records_prompt() {
        let svc = service();
        let with_text = svc
            .respond(&ChatRequest::new("AreciboAI", "I miss my mother").session("a").initial(true))
            .await
            .unwrap();
        let without_text = svc
            .respond(&ChatRequest {
                model: Some("AreciboAI".into()),
                session_id: Some("b".into()),
                is_initial: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();

        for (id, reply) in [("a", &with_text), ("b", &without_text)] {
            assert!(OPENING_PROMPTS.contains(&reply.as_str()));
            let session = svc.sessions().get(id).await.unwrap();
            assert_eq!(session.last_prompt.as_deref(), Some(reply.as_str()));
            assert_eq!(session.history.len(), 1);
            assert_eq!(session.history[0].role, Role::Ai);
        }
    }

    #[tokio::test]
    async fn test_initial_prompts_cover_catalog_regardless_of_message() {
        let svc = service();
        let mut seen_empty = HashSet::new();
        let mut seen_hello = HashSet::new();
        for i in 0..200 {
            let message = if i % 2 == 0 { "" } else { "hello" };
            let reply = svc
                .respond(&ChatRequest::new("AreciboAI", message).initial(true))
                .await
                .unwrap();
            if message.is_empty() {
                seen_empty.insert(reply);
            } else {
                seen_hello.insert(reply);
            }
        }
        let catalog: HashSet<String> = OPENING_PROMPTS.iter().map(|p| p.to_string()).collect();
        assert_eq!(seen_empty, catalog);
        assert_eq!(seen_hello, catalog);
    }

    #[tokio::test]
    async fn test_lastprompt_unchanged_by_scripted_reply() {
        let svc = service();
        let opener = svc
            .respond(&ChatRequest::new("AreciboAI", "").session("s").initial(true))
            .await
            .unwrap();
        svc.respond(&ChatRequest::new("AreciboAI", "ok").session("s"))
            .await
            .unwrap();

        let session = svc.sessions().get("s").await.unwrap();
        assert_eq!(session.last_prompt.as_deref(), Some(opener.as_str()));
        assert_eq!(session.history.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_message_is_answered() {
        let svc = service();
        let reply = svc
            .respond(&ChatRequest::new("AreciboAI", "").session("s"))
            .await
            .unwrap();
        assert_eq!(reply, ELABORATION_REQUEST);
    }

    #[tokio::test]
    async fn test_validation() {
        let svc = service();

        let err = svc.respond(&ChatRequest::default()).await.unwrap_err();
        assert!(matches!(err, ChatError::MissingField("model")));

        let err = svc
            .respond(&ChatRequest {
                model: Some(String::new()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::MissingField("model")));

        for model in ["AreciboAI", "llama3"] {
            let err = svc
                .respond(&ChatRequest {
                    model: Some(model.into()),
                    ..Default::default()
                })
                .await
                .unwrap_err();
            assert!(matches!(err, ChatError::MissingField("message")), "{model}");
        }
        assert_eq!(svc.sessions().len().await, 0);
    }

    #[tokio::test]
    async fn test_other_models_go_to_provider_without_sessions() {
        let provider = Arc::new(EchoProvider::default());
        let svc = service_with(Arc::clone(&provider));

        let reply = svc
            .respond(&ChatRequest::new("llama3", "Tell me a joke").session("s1"))
            .await
            .unwrap();
        assert_eq!(reply, "[llama3] Tell me a joke");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert!(svc.sessions().get("s1").await.is_none());
    }

    #[tokio::test]
    async fn test_scripted_path_makes_no_provider_calls() {
        let provider = Arc::new(EchoProvider::default());
        let svc = service_with(Arc::clone(&provider));
        svc.respond(&ChatRequest::new("AreciboAI", "hello").initial(true))
            .await
            .unwrap();
        svc.respond(&ChatRequest::new("AreciboAI", "hello")).await.unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_is_upstream_error() {
        let svc = service_with(Arc::new(EchoProvider {
            fail: true,
            ..Default::default()
        }));

        let err = svc
            .respond(&ChatRequest::new("llama3", "hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Upstream(_)));

        let err = svc.list_models().await.unwrap_err();
        assert!(matches!(err, ChatError::ModelsUnavailable(_)));
    }

    #[tokio::test]
    async fn test_models_list_scripted_first() {
        let svc = service();
        assert_eq!(svc.list_models().await.unwrap(), ["AreciboAI", "llama3:latest"]);
    }
}
