use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use verbatim_core::{Document, Loader, VerbatimError};

use crate::transcript::{TimedTextClient, TranscriptFetcher};

/// Loader for YouTube video transcripts.
///
/// Takes a full video URL or a bare 11-character id, fetches the caption
/// track, and returns a single [`Document`] whose content is every
/// transcript segment joined by a space. The `url_or_id` metadata key
/// records the input exactly as given.
///
/// # Example
///
/// ```rust,no_run
/// use verbatim_loaders::YoutubeLoader;
/// use verbatim_core::Loader;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let loader = YoutubeLoader::new("https://youtu.be/bZQun8Y4L2A").with_language("en");
/// let docs = loader.load().await?;
/// println!("{}", docs[0].content);
/// # Ok(())
/// # }
/// ```
pub struct YoutubeLoader {
    fetcher: Arc<dyn TranscriptFetcher>,
    url_or_id: String,
    language: Option<String>,
}

impl YoutubeLoader {
    pub fn new(url_or_id: impl Into<String>) -> Self {
        Self {
            fetcher: Arc::new(TimedTextClient::new()),
            url_or_id: url_or_id.into(),
            language: None,
        }
    }

    /// Prefer a caption track in the given language code (e.g. "en", "de").
    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        self.language = Some(lang.into());
        self
    }

    /// Replace the transcript source. Useful for tests and for callers that
    /// already have a configured client.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn TranscriptFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }
}

#[async_trait]
impl Loader for YoutubeLoader {
    async fn load(&self) -> Result<Vec<Document>, VerbatimError> {
        if self.url_or_id.trim().is_empty() {
            return Err(VerbatimError::Config(
                "YoutubeLoader: url_or_id is empty".to_string(),
            ));
        }

        let segments = self
            .fetcher
            .fetch_transcript(&self.url_or_id, self.language.as_deref())
            .await
            .map_err(|e| {
                VerbatimError::Loader(format!("Failed to get youtube video transcription: {e}"))
            })?;

        let content = segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let mut metadata = HashMap::new();
        metadata.insert(
            "url_or_id".to_string(),
            Value::String(self.url_or_id.clone()),
        );

        Ok(vec![Document::with_metadata(
            self.url_or_id.clone(),
            content,
            metadata,
        )])
    }
}
