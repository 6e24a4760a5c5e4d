//! Query dispatch against the remote model

use std::sync::Arc;

use gemipy_core::{ChatConfig, Role, SessionManager};
use gemipy_providers::LLMProvider;
use tracing::{debug, info, warn};

use crate::context::build_request;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Result of one query, always displayable
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Text generated by the model
    Response(String),
    /// Error text shown in place of a response
    Failed(String),
}

impl QueryOutcome {
    /// Text to render and record
    pub fn text(&self) -> &str {
        match self {
            QueryOutcome::Response(text) | QueryOutcome::Failed(text) => text,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, QueryOutcome::Failed(_))
    }
}

/// Sends prompts to the provider, reading the credential per query
pub struct QueryDispatcher {
    provider: Arc<dyn LLMProvider>,
    credential_var: String,
}

impl QueryDispatcher {
    /// Create a dispatcher that reads [`API_KEY_ENV`]
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self {
            provider,
            credential_var: API_KEY_ENV.to_string(),
        }
    }

    /// Read the credential from a different environment variable
    pub fn with_credential_var(mut self, var: impl Into<String>) -> Self {
        self.credential_var = var.into();
        self
    }

    fn credential(&self) -> Option<String> {
        std::env::var(&self.credential_var)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Whether a non-empty credential is currently set
    pub fn has_credential(&self) -> bool {
        self.credential().is_some()
    }

    /// Ask the model about `user_prompt`, with the session's context prepended.
    ///
    /// Never fails: a missing credential or any provider error comes back as
    /// [`QueryOutcome::Failed`].
    pub async fn query(
        &self,
        session: &SessionManager,
        config: &ChatConfig,
        user_prompt: &str,
    ) -> QueryOutcome {
        let Some(api_key) = self.credential() else {
            return QueryOutcome::Failed(format!(
                "Error: no API key. Use: export {}='your_key'",
                self.credential_var
            ));
        };

        let request = build_request(session, config, user_prompt);
        debug!(
            "Querying {} (temperature {}, {} prompt chars)",
            request.model,
            request.config.temperature,
            request.prompt.chars().count()
        );

        match self.provider.generate(&api_key, &request).await {
            Ok(text) => {
                info!("Received {} chars from {}", text.chars().count(), request.model);
                QueryOutcome::Response(text)
            }
            Err(e) => {
                warn!("Query to {} failed: {}", request.model, e);
                QueryOutcome::Failed(format!("Error: {}", e))
            }
        }
    }

    /// Query, then record the prompt and the outcome as one turn.
    ///
    /// Failures are recorded as assistant messages too, so the next prompt's
    /// context shows what went wrong.
    pub async fn exchange(
        &self,
        session: &mut SessionManager,
        config: &ChatConfig,
        user_prompt: &str,
    ) -> QueryOutcome {
        let outcome = self.query(session, config, user_prompt).await;
        session.append(Role::User, user_prompt);
        session.append(Role::Assistant, outcome.text());
        outcome
    }
}
