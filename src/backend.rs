// Backend communication: one JSON POST per generation request.
//
// The call runs on a worker thread and reports back over an mpsc channel so
// the draw loop keeps animating while the request is in flight. There is no
// retry, no queue and no timeout; the UI disables the trigger instead.

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;

/// Target markup/styling combination requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framework {
    #[default]
    HtmlCss,
    HtmlTailwind,
    HtmlBootstrap,
    HtmlCssJs,
    HtmlTailwindBootstrap,
}

impl Framework {
    pub const ALL: [Framework; 5] = [
        Framework::HtmlCss,
        Framework::HtmlTailwind,
        Framework::HtmlBootstrap,
        Framework::HtmlCssJs,
        Framework::HtmlTailwindBootstrap,
    ];

    /// Wire tag the backend expects. `html-bootstarp` is misspelled on the
    /// backend side too; the tag must match it byte for byte.
    pub fn tag(self) -> &'static str {
        match self {
            Framework::HtmlCss => "html-css",
            Framework::HtmlTailwind => "html-tailwind",
            Framework::HtmlBootstrap => "html-bootstarp",
            Framework::HtmlCssJs => "html-css-js",
            Framework::HtmlTailwindBootstrap => "html-tailwind-bootstrap",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Framework::HtmlCss => "HTML + CSS",
            Framework::HtmlTailwind => "HTML + Tailwind CSS",
            Framework::HtmlBootstrap => "HTML + Bootstrap",
            Framework::HtmlCssJs => "HTML + CSS + JavaScript",
            Framework::HtmlTailwindBootstrap => "HTML + Tailwind + Bootstrap",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    pub framework: String,
}

impl GenerateRequest {
    /// Build a request, rejecting blank prompts before any network traffic.
    pub fn new(prompt: &str, framework: Framework) -> Result<Self, GenError> {
        if prompt.trim().is_empty() {
            return Err(GenError::EmptyPrompt);
        }
        Ok(Self {
            prompt: prompt.to_string(),
            framework: framework.tag().to_string(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Error)]
pub enum GenError {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("could not reach the backend: {0}")]
    Transport(String),

    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("malformed backend response: {0}")]
    Malformed(String),
}

/// HTTP client for the generation endpoint. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Clone)]
pub struct GenClient {
    http: reqwest::blocking::Client,
    endpoint: String,
}

impl GenClient {
    pub fn new(config: &Config) -> Result<Self, GenError> {
        let http = reqwest::blocking::Client::builder()
            // The request waits as long as the transport does.
            .timeout(None)
            .build()
            .map_err(|e| GenError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issue one POST and return the raw `result` body.
    pub fn generate(&self, request: &GenerateRequest) -> Result<String, GenError> {
        let started = Instant::now();
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(|e| GenError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // The backend puts a human-readable reason in the error payload
            // when it has one.
            let message = response
                .json::<GenerateResponse>()
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| status.to_string());
            warn!(status = status.as_u16(), %message, "generation rejected");
            return Err(GenError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response
            .json()
            .map_err(|e| GenError::Malformed(e.to_string()))?;

        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "generation round trip");
        unpack(body)
    }
}

/// Pull the result string out of a decoded response body.
fn unpack(body: GenerateResponse) -> Result<String, GenError> {
    match body.result {
        Some(result) => Ok(result),
        None => Err(GenError::Malformed(
            body.error.unwrap_or_else(|| "missing result field".to_string()),
        )),
    }
}

/// Run the request on a worker thread. Exactly one message arrives on the
/// returned channel; the app polls it from its tick.
pub fn spawn_generate(
    client: GenClient,
    request: GenerateRequest,
) -> Receiver<Result<String, GenError>> {
    let (tx, rx) = mpsc::channel();
    info!(framework = %request.framework, endpoint = %client.endpoint, "dispatching generation request");
    thread::spawn(move || {
        let result = client.generate(&request);
        let _ = tx.send(result);
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_prompt_and_framework() {
        let request = GenerateRequest::new("a dark login form", Framework::HtmlTailwind).unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "prompt": "a dark login form",
                "framework": "html-tailwind"
            })
        );
    }

    #[test]
    fn request_keeps_prompt_untrimmed() {
        let request = GenerateRequest::new("  padded prompt  ", Framework::HtmlCss).unwrap();
        assert_eq!(request.prompt, "  padded prompt  ");
    }

    #[test]
    fn blank_prompt_is_rejected_before_dispatch() {
        assert!(matches!(
            GenerateRequest::new("", Framework::HtmlCss),
            Err(GenError::EmptyPrompt)
        ));
        assert!(matches!(
            GenerateRequest::new("   \n\t", Framework::HtmlCss),
            Err(GenError::EmptyPrompt)
        ));
    }

    #[test]
    fn framework_tags_match_the_backend() {
        let tags: Vec<&str> = Framework::ALL.iter().map(|f| f.tag()).collect();
        assert_eq!(
            tags,
            vec![
                "html-css",
                "html-tailwind",
                "html-bootstarp",
                "html-css-js",
                "html-tailwind-bootstrap",
            ]
        );
    }

    #[test]
    fn response_with_result_unpacks() {
        let body: GenerateResponse =
            serde_json::from_str(r#"{"result": "<div>hi</div>"}"#).unwrap();
        assert_eq!(unpack(body).unwrap(), "<div>hi</div>");
    }

    #[test]
    fn response_with_error_only_is_malformed() {
        let body: GenerateResponse =
            serde_json::from_str(r#"{"error": "model overloaded"}"#).unwrap();
        match unpack(body) {
            Err(GenError::Malformed(message)) => assert_eq!(message, "model overloaded"),
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn empty_response_body_is_malformed() {
        let body: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(unpack(body), Err(GenError::Malformed(_))));
    }

    #[test]
    fn error_messages_stay_generic_about_internals() {
        let error = GenError::Backend {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(error.to_string(), "backend returned 502: bad gateway");
    }
}
