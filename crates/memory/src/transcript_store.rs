use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;

use crate::types::TranscriptData;

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// File-backed persistence for conversation transcripts.
///
/// One JSON file per chat under the base directory. Whether a transcript is
/// saved at all is the caller's decision (the `save_chats_locally` setting);
/// this store only knows how to read and write them.
pub struct TranscriptStore {
    base_path: PathBuf,
}

impl TranscriptStore {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub async fn initialize(&self) -> Result<(), MemoryError> {
        fs::create_dir_all(&self.base_path).await?;
        tracing::info!("Transcript store initialized at {:?}", self.base_path);
        Ok(())
    }

    /// Load a transcript, or the default empty one if none is stored yet.
    pub async fn load(&self, chat_id: &str) -> Result<TranscriptData, MemoryError> {
        let path = self.transcript_path(chat_id);

        if !path.exists() {
            tracing::info!("No stored transcript for chat: {}", chat_id);
            return Ok(TranscriptData::default());
        }

        let content = fs::read_to_string(&path).await?;
        let data: TranscriptData = serde_json::from_str(&content)?;

        tracing::info!(
            "Loaded transcript for chat {} ({} turns)",
            chat_id,
            data.turns.len()
        );
        Ok(data)
    }

    pub async fn save(&self, chat_id: &str, data: &TranscriptData) -> Result<(), MemoryError> {
        let path = self.transcript_path(chat_id);

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("tmp");
        let content = serde_json::to_string_pretty(data)?;

        fs::write(&temp_path, content).await?;
        fs::rename(&temp_path, &path).await?;

        tracing::debug!("Saved transcript for chat: {}", chat_id);
        Ok(())
    }

    pub async fn delete(&self, chat_id: &str) -> Result<(), MemoryError> {
        let path = self.transcript_path(chat_id);
        if path.exists() {
            fs::remove_file(&path).await?;
            tracing::info!("Deleted transcript for chat: {}", chat_id);
        }
        Ok(())
    }

    fn transcript_path(&self, chat_id: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", chat_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatTurn;

    #[tokio::test]
    async fn test_transcript_lifecycle() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(temp_dir.path());

        store.initialize().await.unwrap();

        let mut data = store.load("default").await.unwrap();
        assert_eq!(data.title, "New Chat");
        assert!(data.turns.is_empty());

        data.turns.push(ChatTurn::user("hello"));
        data.turns.push(ChatTurn::bot("hi there"));
        data.title = "Greetings".to_string();

        store.save("default", &data).await.unwrap();

        let loaded = store.load("default").await.unwrap();
        assert_eq!(loaded.title, "Greetings");
        assert_eq!(loaded.turns.len(), 2);
        assert_eq!(loaded.turns[0].text, "hello");

        store.delete("default").await.unwrap();
        let fresh = store.load("default").await.unwrap();
        assert!(fresh.turns.is_empty());
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_transcript() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(temp_dir.path());
        store.initialize().await.unwrap();

        let mut data = TranscriptData::default();
        data.turns.push(ChatTurn::user("first"));
        store.save("chat", &data).await.unwrap();

        // Full replace, not merge
        let replacement = TranscriptData::default();
        store.save("chat", &replacement).await.unwrap();

        let loaded = store.load("chat").await.unwrap();
        assert!(loaded.turns.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_transcript_is_ok() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = TranscriptStore::new(temp_dir.path());
        store.initialize().await.unwrap();

        assert!(store.delete("never-saved").await.is_ok());
    }
}
