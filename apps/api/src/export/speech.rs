//! Text-to-speech export.
//!
//! `GoogleTranslateTts` uses the public translate TTS endpoint: English,
//! normal speed, MP3. The endpoint only accepts short inputs, so text is split
//! at whitespace into chunks of at most `MAX_CHUNK_CHARS` and the MP3 frames of
//! each chunk are concatenated in order.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::export::ExportError;

const TTS_URL: &str = "https://translate.google.com/translate_tts";
const LANGUAGE: &str = "en";
/// Longest text sent in one request.
pub const MAX_CHUNK_CHARS: usize = 100;

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Returns MP3 bytes for `text`.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ExportError>;
}

#[derive(Clone)]
pub struct GoogleTranslateTts {
    client: Client,
}

impl GoogleTranslateTts {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()?,
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateTts {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ExportError> {
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(ExportError::EmptyContent);
        }

        let total = chunks.len().to_string();
        let mut audio = Vec::new();

        for (idx, chunk) in chunks.iter().enumerate() {
            let idx = idx.to_string();
            let textlen = chunk.chars().count().to_string();

            let response = self
                .client
                .get(TTS_URL)
                .query(&[
                    ("ie", "UTF-8"),
                    ("q", chunk.as_str()),
                    ("tl", LANGUAGE),
                    ("client", "tw-ob"),
                    ("ttsspeed", "1"),
                    ("total", total.as_str()),
                    ("idx", idx.as_str()),
                    ("textlen", textlen.as_str()),
                ])
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(ExportError::Speech(format!(
                    "TTS endpoint returned {status} for chunk {idx}"
                )));
            }

            let bytes = response.bytes().await?;
            debug!("TTS chunk {idx}/{total}: {} bytes", bytes.len());
            audio.extend_from_slice(&bytes);
        }

        Ok(audio)
    }
}

/// Splits text at whitespace into chunks of at most `max_chars` characters.
/// A single word longer than the limit becomes its own chunk.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if !current.is_empty() && needed > max_chars {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(
            chunk_text("  Tell me about yourself.  ", MAX_CHUNK_CHARS),
            vec!["Tell me about yourself."]
        );
    }

    #[test]
    fn test_chunks_respect_limit_and_keep_words() {
        let text = "Describe a time you disagreed with a teammate and how you resolved it. ".repeat(5);
        let chunks = chunk_text(&text, MAX_CHUNK_CHARS);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= MAX_CHUNK_CHARS);
        }
        assert_eq!(
            chunks.join(" "),
            text.split_whitespace().collect::<Vec<_>>().join(" ")
        );
    }

    #[test]
    fn test_overlong_word_is_its_own_chunk() {
        let word = "a".repeat(150);
        let chunks = chunk_text(&format!("hi {word} there"), MAX_CHUNK_CHARS);
        assert_eq!(chunks, vec!["hi".to_string(), word, "there".to_string()]);
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected_before_any_request() {
        let tts = GoogleTranslateTts::new().unwrap();
        assert!(matches!(
            tts.synthesize(" \n ").await.unwrap_err(),
            ExportError::EmptyContent
        ));
    }
}
