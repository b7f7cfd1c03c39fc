//! Chat session: owns the conversation log and drives one turn at a time.

use thiserror::Error;

use parley_core::engine::ChatEngine;
use parley_memory::{ChatTurn, MemoryError, TranscriptData, TranscriptStore};

use crate::config::Settings;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Message is empty")]
    EmptyMessage,
    #[error("Storage error: {0}")]
    Storage(#[from] MemoryError),
    #[error("No failed message to retry")]
    NothingToRetry,
}

/// One open conversation.
///
/// All turn handling goes through `&mut self`, so a second submission
/// cannot start while a prior one is still in flight. Backend failures
/// never surface here (the engine converts them to reply strings); the
/// only fallible part of a turn is the session's own orchestration, and
/// that failure is retryable.
pub struct ChatSession {
    engine: ChatEngine,
    store: TranscriptStore,
    settings: Settings,
    chat_id: String,
    transcript: TranscriptData,
    last_failed: Option<String>,
}

impl ChatSession {
    /// Open a session, restoring the persisted transcript when the user has
    /// local saving enabled.
    pub async fn open(
        engine: ChatEngine,
        store: TranscriptStore,
        settings: Settings,
        chat_id: String,
    ) -> Result<Self, SessionError> {
        store.initialize().await?;
        let transcript = if settings.save_chats_locally {
            store.load(&chat_id).await?
        } else {
            TranscriptData::default()
        };

        Ok(Self {
            engine,
            store,
            settings,
            chat_id,
            transcript,
            last_failed: None,
        })
    }

    pub fn title(&self) -> &str {
        &self.transcript.title
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.transcript.turns
    }

    /// Handle one user message and return the bot reply.
    pub async fn submit(&mut self, input: &str) -> Result<String, SessionError> {
        let input = input.trim().to_string();
        if input.is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        let turns_before = self.transcript.turns.len();
        let title_before = self.transcript.title.clone();

        match self.run_turn(&input).await {
            Ok(reply) => {
                self.last_failed = None;
                Ok(reply)
            }
            Err(e) => {
                // Roll back so a retry replays the turn from the same state
                self.transcript.turns.truncate(turns_before);
                self.transcript.title = title_before;
                self.last_failed = Some(input);
                Err(e)
            }
        }
    }

    /// Replay the most recent failed submission.
    pub async fn retry(&mut self) -> Result<String, SessionError> {
        let input = self
            .last_failed
            .take()
            .ok_or(SessionError::NothingToRetry)?;
        self.submit(&input).await
    }

    /// Start over: the log is replaced wholesale, not mutated turn by turn.
    pub async fn new_chat(&mut self) -> Result<(), SessionError> {
        self.transcript = TranscriptData::default();
        self.last_failed = None;
        self.persist().await
    }

    async fn run_turn(&mut self, input: &str) -> Result<String, SessionError> {
        let first_exchange = self.transcript.turns.is_empty();

        // The responder sees the transcript as it stood before this turn;
        // the new user turn rides along as the labeled current utterance.
        let history = self.transcript.turns.clone();
        self.transcript.turns.push(ChatTurn::user(input));

        let reply = self
            .engine
            .reply(input, &history, self.settings.ai_response_length)
            .await;
        self.transcript.turns.push(ChatTurn::bot(reply.as_str()));

        // The title request is chained after the reply is already in the
        // log, and happens only on a conversation's first exchange.
        if first_exchange {
            self.transcript.title = self.engine.title(&self.transcript.turns).await;
        }

        self.persist().await?;
        Ok(reply)
    }

    async fn persist(&self) -> Result<(), SessionError> {
        if !self.settings.save_chats_locally {
            return Ok(());
        }
        self.store.save(&self.chat_id, &self.transcript).await?;
        Ok(())
    }
}
