//! spaCy HTTP Parser Implementation
//!
//! Talks to a spaCy-compatible parse service. The service receives
//! `{"text": "..."}` and answers with
//!
//! ```json
//! {
//!   "tokens": [{"text": "What", "idx": 0, "pos": "PRON", "dep": "det", "head": 1}],
//!   "noun_chunks": [{"start": 0, "end": 2}]
//! }
//! ```
//!
//! where `idx` is a character (code point) offset, `head` a token index and
//! noun chunks are token ranges. Offsets are translated to byte offsets before
//! the document reaches the engine.
//!
//! # Features
//!
//! - Async HTTP communication, driven by an owned runtime for the sync trait
//! - Configurable endpoint and timeout
//! - Retry logic with exponential backoff

use crate::ParserError;
use rqcnl_domain::traits::DocumentParser as DocumentParserTrait;
use rqcnl_domain::{DocumentBuilder, ParsedDocument, PosTag};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default parse service endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/parse";

/// Default timeout for parse requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// HTTP-backed parser
pub struct SpacyHttpParser {
    endpoint: String,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
    max_retries: u32,
}

/// Request body for the parse service
#[derive(Serialize)]
struct ParseRequest<'a> {
    text: &'a str,
}

/// Response from the parse service
#[derive(Debug, Deserialize)]
struct ParseResponse {
    tokens: Vec<WireToken>,
    #[serde(default)]
    noun_chunks: Vec<WireChunk>,
}

#[derive(Debug, Deserialize)]
struct WireToken {
    text: String,
    idx: usize,
    pos: String,
    dep: String,
    head: usize,
}

#[derive(Debug, Deserialize)]
struct WireChunk {
    start: usize,
    end: usize,
}

impl SpacyHttpParser {
    /// Create a new parser for `endpoint`
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client or the runtime cannot be built
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ParserError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ParserError::Other(format!("Failed to build HTTP client: {}", e)))?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| ParserError::Other(format!("Failed to start runtime: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
            runtime,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Create a parser for [`DEFAULT_ENDPOINT`] with the default timeout
    pub fn default_endpoint() -> Result<Self, ParserError> {
        Self::new(DEFAULT_ENDPOINT, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Set the maximum number of attempts per text
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Configured endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Parse `text` through the service
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - the service is not running or not found
    /// - network communication fails after all retries
    /// - the response cannot be decoded or describes an inconsistent document
    pub async fn parse_remote(&self, text: &str) -> Result<ParsedDocument, ParserError> {
        if text.is_empty() {
            return Ok(ParsedDocument::empty(text));
        }

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&self.endpoint)
                .json(&ParseRequest { text })
                .send()
                .await
            {
                Ok(response) => {
                    if response.status().is_success() {
                        let body = response.json::<ParseResponse>().await.map_err(|e| {
                            ParserError::InvalidResponse(format!("Failed to decode response: {}", e))
                        })?;
                        debug!("Parsed {} tokens for {:?}", body.tokens.len(), text);
                        return into_document(text, body);
                    } else if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Err(ParserError::ServiceUnavailable(self.endpoint.clone()));
                    } else {
                        let status = response.status();
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(ParserError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(ParserError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                warn!("Parse attempt {} failed, retrying in {:?}", attempts, delay);
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| ParserError::Communication("Max retries exceeded".to_string())))
    }
}

impl DocumentParserTrait for SpacyHttpParser {
    type Error = ParserError;

    fn parse(&self, text: &str) -> Result<ParsedDocument, Self::Error> {
        self.runtime.block_on(self.parse_remote(text))
    }
}

/// Convert a service response into a validated document
fn into_document(text: &str, response: ParseResponse) -> Result<ParsedDocument, ParserError> {
    // Code point offset -> byte offset, with one extra entry for the end
    let byte_offsets: Vec<usize> = text
        .char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(text.len()))
        .collect();

    let mut builder = DocumentBuilder::new(text);
    for token in &response.tokens {
        let start = *byte_offsets.get(token.idx).ok_or_else(|| {
            ParserError::InvalidDocument(format!(
                "Token '{}' starts at character {} beyond the text",
                token.text, token.idx
            ))
        })?;
        builder = builder.token_at(
            &token.text,
            start,
            PosTag::from_label(&token.pos),
            &token.dep,
            token.head,
        );
    }
    for chunk in &response.noun_chunks {
        builder = builder.noun_chunk(chunk.start, chunk.end);
    }

    builder.build().map_err(ParserError::InvalidDocument)
}
