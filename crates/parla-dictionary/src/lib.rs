use parla_types::DictionaryEntry;

pub mod free_dictionary;

pub use free_dictionary::FreeDictionaryClient;

/// Remote dictionary lookup
#[async_trait::async_trait]
pub trait DictionaryProvider: Send + Sync {
    /// Look up a single word; `Ok(None)` means the provider has no entry
    async fn lookup(&self, word: &str) -> Result<Option<DictionaryEntry>, LookupError>;

    /// Get dictionary metadata
    fn metadata(&self) -> DictionaryMetadata;
}

#[derive(Debug, Clone)]
pub struct DictionaryMetadata {
    pub name: String,
    /// Language code of the words the provider understands
    pub language: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Invalid dictionary URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}
