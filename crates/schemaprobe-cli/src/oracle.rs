/// Networked [`SchemaOracle`] backed by the Generative Language API.
///
/// The request asks for `application/json` output; the reply text is handed
/// back untouched so that fence stripping and parsing stay in the core.
use std::time::Duration;

use schemaprobe_core::{OracleError, SchemaOracle};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cli::OracleArgs;

/// Connection settings for [`GeminiOracle`].
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// API credential.
    pub api_key: String,
    /// Model name, e.g. `gemini-2.5-flash`.
    pub model: String,
    /// API base URL without a trailing slash.
    pub base_url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl OracleConfig {
    /// Returns the oracle settings, or `None` when the schema should be
    /// derived locally (no key, an empty key, or `--mock`).
    pub fn from_args(args: &OracleArgs) -> Option<Self> {
        if args.mock {
            return None;
        }
        let api_key = args.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())?;
        Some(Self {
            api_key: api_key.to_owned(),
            model: args.model.clone(),
            base_url: args.oracle_url.trim_end_matches('/').to_owned(),
            timeout: Duration::from_secs(args.oracle_timeout),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ReplyContent>,
}

#[derive(Deserialize)]
struct ReplyContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts;
        let text: String = parts.into_iter().filter_map(|p| p.text).collect();
        Some(text).filter(|t| !t.trim().is_empty())
    }
}

/// Longest response body kept in [`OracleError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Blocking HTTP client for the `generateContent` endpoint.
pub struct GeminiOracle {
    config: OracleConfig,
    client: reqwest::blocking::Client,
}

impl GeminiOracle {
    /// Builds a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Request`] when the HTTP client cannot be
    /// constructed (for example, no TLS backend).
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| OracleError::Request(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn map_error(&self, err: &reqwest::Error) -> OracleError {
        if err.is_timeout() {
            OracleError::Timeout(self.config.timeout)
        } else {
            OracleError::Request(err.to_string())
        }
    }
}

impl SchemaOracle for GeminiOracle {
    fn complete(&self, prompt: &str) -> Result<String, OracleError> {
        let request = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };
        info!(model = %self.config.model, "requesting schema from oracle");
        debug!(prompt_bytes = prompt.len(), "oracle prompt");

        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .map_err(|e| self.map_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().unwrap_or_default();
            truncate_at_char_boundary(&mut body, MAX_ERROR_BODY);
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: GenerateResponse = response.json().map_err(|e| self.map_error(&e))?;
        reply.text().ok_or(OracleError::EmptyResponse)
    }
}

fn truncate_at_char_boundary(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}
