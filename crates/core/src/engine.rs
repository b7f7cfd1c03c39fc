//! Turn engine: routes one utterance, invokes the selected backend, and
//! normalizes every outcome into a single reply string.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use parley_memory::ChatTurn;

use crate::formatter;
use crate::router;
use crate::types::{CapabilityKind, CapabilityReply, ResponseMode, RoutingDecision, Verbosity};

/// Failure of a capability backend call. `Http` covers transport faults,
/// `Api` non-success statuses, `Parse` undecodable payloads. Distinct from
/// an empty result list, which is a valid outcome.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Failure of the generative backend. A response with no candidate content
/// is treated the same as a transport failure by callers.
#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("No candidate content in response")]
    EmptyResponse,
}

#[async_trait]
pub trait CapabilityDispatcher: Send + Sync {
    async fn dispatch(
        &self,
        kind: CapabilityKind,
        argument: &str,
    ) -> Result<CapabilityReply, AdapterError>;
}

#[async_trait]
pub trait GenerativeResponder: Send + Sync {
    /// The current utterance is ignored in title mode; history is the full
    /// transcript the caller wants the backend to see.
    async fn respond(
        &self,
        utterance: &str,
        history: &[ChatTurn],
        mode: ResponseMode,
    ) -> Result<String, ResponderError>;
}

/// Fixed reply when the generative backend fails in reply mode.
pub const REPLY_FALLBACK: &str = "Sorry, there was an error. Please try again later.";

/// Fixed title when title generation fails.
pub const TITLE_FALLBACK: &str = "Untitled Chat";

pub struct ChatEngine {
    dispatcher: Arc<dyn CapabilityDispatcher>,
    responder: Arc<dyn GenerativeResponder>,
}

impl ChatEngine {
    pub fn new(
        dispatcher: Arc<dyn CapabilityDispatcher>,
        responder: Arc<dyn GenerativeResponder>,
    ) -> Self {
        Self {
            dispatcher,
            responder,
        }
    }

    /// Produce the bot reply for one utterance.
    ///
    /// Never fails: every backend error is converted to a user-visible
    /// string here. At most one capability call and one generative call are
    /// made per invocation.
    pub async fn reply(
        &self,
        utterance: &str,
        history: &[ChatTurn],
        verbosity: Verbosity,
    ) -> String {
        match router::route(utterance) {
            RoutingDecision::Capability { kind, argument } => {
                tracing::debug!("Routed to {} with argument '{}'", kind.as_str(), argument);
                self.capability_reply(kind, &argument, utterance, history, verbosity)
                    .await
            }
            RoutingDecision::Generative => {
                self.generative_reply(utterance, history, verbosity).await
            }
        }
    }

    /// Summarize the conversation into a short display title.
    pub async fn title(&self, history: &[ChatTurn]) -> String {
        match self.responder.respond("", history, ResponseMode::Title).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                tracing::warn!("Title generation returned blank text");
                TITLE_FALLBACK.to_string()
            }
            Err(e) => {
                tracing::warn!("Title generation failed: {}", e);
                TITLE_FALLBACK.to_string()
            }
        }
    }

    async fn capability_reply(
        &self,
        kind: CapabilityKind,
        argument: &str,
        utterance: &str,
        history: &[ChatTurn],
        verbosity: Verbosity,
    ) -> String {
        match self.dispatcher.dispatch(kind, argument).await {
            Ok(reply) if !reply.is_empty() => formatter::format(argument, &reply),
            Ok(_) => {
                // Zero results degrade to a plain chat answer for the
                // original utterance, not a "no results" message.
                tracing::debug!(
                    "{} returned no results for '{}', falling back to generative reply",
                    kind.as_str(),
                    argument
                );
                self.generative_reply(utterance, history, verbosity).await
            }
            Err(e) => {
                tracing::warn!("{} capability failed: {}", kind.as_str(), e);
                match kind {
                    CapabilityKind::PhoneValidation => {
                        formatter::PHONE_FAILURE_REPLY.to_string()
                    }
                    CapabilityKind::Screenshot => {
                        formatter::SCREENSHOT_FAILURE_REPLY.to_string()
                    }
                    // The list-shaped capabilities degrade the same way an
                    // empty result does.
                    CapabilityKind::News
                    | CapabilityKind::WebSearch
                    | CapabilityKind::VideoSearch => {
                        self.generative_reply(utterance, history, verbosity).await
                    }
                }
            }
        }
    }

    async fn generative_reply(
        &self,
        utterance: &str,
        history: &[ChatTurn],
        verbosity: Verbosity,
    ) -> String {
        match self
            .responder
            .respond(utterance, history, ResponseMode::Reply(verbosity))
            .await
        {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                tracing::warn!("Generative backend returned blank text");
                REPLY_FALLBACK.to_string()
            }
            Err(e) => {
                tracing::warn!("Generative reply failed: {}", e);
                REPLY_FALLBACK.to_string()
            }
        }
    }
}
