pub mod transcript_store;
pub mod types;

pub use transcript_store::{MemoryError, TranscriptStore};
pub use types::*;
