use std::time::Duration;

use async_trait::async_trait;
use parla_types::{Definition, DictionaryEntry, Meaning};
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::{DictionaryMetadata, DictionaryProvider, LookupError};

/// Client for the dictionaryapi.dev English dictionary
#[derive(Clone)]
pub struct FreeDictionaryClient {
    client: reqwest::Client,
    base_url: Url,
}

impl FreeDictionaryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let base_url = Url::parse(base_url).map_err(|e| LookupError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(LookupError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    /// `<base>/<percent-encoded word>`
    fn entry_url(&self, word: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(word);
        }
        url
    }
}

#[async_trait]
impl DictionaryProvider for FreeDictionaryClient {
    async fn lookup(&self, word: &str) -> Result<Option<DictionaryEntry>, LookupError> {
        let url = self.entry_url(word);
        tracing::debug!("Dictionary lookup: {}", url);

        let response = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_entries(&body)
    }

    fn metadata(&self) -> DictionaryMetadata {
        DictionaryMetadata {
            name: "Free Dictionary API".to_string(),
            language: "EN".to_string(),
        }
    }
}

// JSON structures of the dictionaryapi.dev response
#[derive(Debug, Deserialize)]
struct ApiEntry {
    word: String,
    #[serde(default)]
    phonetic: Option<String>,
    #[serde(default)]
    phonetics: Vec<ApiPhonetic>,
    #[serde(default)]
    meanings: Vec<ApiMeaning>,
}

#[derive(Debug, Deserialize)]
struct ApiPhonetic {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    audio: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMeaning {
    #[serde(rename = "partOfSpeech", default)]
    part_of_speech: String,
    #[serde(default)]
    definitions: Vec<ApiDefinition>,
}

#[derive(Debug, Deserialize)]
struct ApiDefinition {
    definition: String,
    #[serde(default)]
    example: Option<String>,
}

/// First entry of the response, `None` for an empty list
fn parse_entries(body: &str) -> Result<Option<DictionaryEntry>, LookupError> {
    let entries: Vec<ApiEntry> = serde_json::from_str(body)?;
    Ok(entries.into_iter().next().map(ApiEntry::into_entry))
}

impl ApiEntry {
    fn into_entry(self) -> DictionaryEntry {
        let phonetic = non_empty(self.phonetic)
            .or_else(|| self.phonetics.iter().find_map(|p| non_empty(p.text.clone())));

        let audio_urls = self
            .phonetics
            .into_iter()
            .filter_map(|p| non_empty(p.audio))
            .collect();

        let meanings = self
            .meanings
            .into_iter()
            .map(|m| Meaning {
                part_of_speech: m.part_of_speech,
                definitions: m
                    .definitions
                    .into_iter()
                    .map(|d| Definition {
                        text: d.definition,
                        example: non_empty(d.example),
                    })
                    .collect(),
            })
            .collect();

        DictionaryEntry {
            word: self.word,
            phonetic,
            meanings,
            audio_urls,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUN: &str = r#"[
        {
            "word": "run",
            "phonetics": [
                {"text": "/ɹʌn/", "audio": ""},
                {"audio": "https://api.dictionaryapi.dev/media/pronunciations/en/run-us.mp3"}
            ],
            "meanings": [
                {
                    "partOfSpeech": "verb",
                    "definitions": [
                        {"definition": "To move swiftly.", "example": "Run to the store."},
                        {"definition": "To flow.", "synonyms": []}
                    ]
                },
                {"partOfSpeech": "noun", "definitions": [{"definition": "Act of running."}]}
            ]
        },
        {"word": "run", "meanings": []}
    ]"#;

    #[test]
    fn first_entry_is_mapped() {
        let entry = parse_entries(RUN).unwrap().unwrap();

        assert_eq!(entry.word, "run");
        assert_eq!(entry.phonetic.as_deref(), Some("/ɹʌn/"));
        assert_eq!(
            entry.audio_urls,
            vec!["https://api.dictionaryapi.dev/media/pronunciations/en/run-us.mp3".to_string()]
        );
        assert_eq!(entry.meanings.len(), 2);
        assert_eq!(entry.meanings[0].part_of_speech, "verb");
        assert_eq!(entry.meanings[0].definitions[0].example.as_deref(), Some("Run to the store."));
        assert_eq!(entry.meanings[0].definitions[1].example, None);
        assert!(entry.is_usable());
    }

    #[test]
    fn empty_list_means_no_entry() {
        assert!(parse_entries("[]").unwrap().is_none());
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(
            parse_entries(r#"{"title":"No Definitions Found"}"#),
            Err(LookupError::ParseError(_))
        ));
    }

    #[test]
    fn word_is_percent_encoded_as_last_segment() {
        let client = FreeDictionaryClient::new(
            "https://api.dictionaryapi.dev/api/v2/entries/en",
            Duration::from_secs(1),
        )
        .unwrap();

        assert_eq!(
            client.entry_url("ice cream").as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/ice%20cream"
        );
        assert_eq!(
            client.entry_url("a/b").as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/a%2Fb"
        );
    }

    #[test]
    fn trailing_slash_in_base_is_tolerated() {
        let client = FreeDictionaryClient::new("http://localhost:8080/entries/en/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.entry_url("run").as_str(), "http://localhost:8080/entries/en/run");
    }

    #[test]
    fn metadata_names_english_provider() {
        let client = FreeDictionaryClient::new(
            "https://api.dictionaryapi.dev/api/v2/entries/en",
            Duration::from_secs(1),
        )
        .unwrap();
        let metadata = client.metadata();
        assert_eq!(metadata.name, "Free Dictionary API");
        assert_eq!(metadata.language, "EN");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            FreeDictionaryClient::new("not a url", Duration::from_secs(1)),
            Err(LookupError::InvalidUrl(_))
        ));
    }
}
