//! The append-only transcript

use super::entities::TranscriptEntry;

/// System prompt used when none is configured
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an AI assistant that can read data from Azure Blob Storage using the BlobTools plugin. Always check what files are available first if you are unsure.";

/// Ordered, append-only log of dialogue turns.
///
/// The only mutation is [`append`](Self::append); [`snapshot`](Self::snapshot)
/// hands out an immutable view for transmission. One transcript belongs to
/// one conversation; concurrent conversations each own their own.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a transcript with a system entry
    pub fn with_system_prompt(prompt: impl Into<String>) -> Self {
        let mut transcript = Self::new();
        transcript.append(TranscriptEntry::system(prompt));
        transcript
    }

    pub fn append(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    /// All entries in append order
    pub fn snapshot(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }
}
