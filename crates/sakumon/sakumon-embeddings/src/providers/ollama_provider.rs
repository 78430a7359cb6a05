//! Ollama embedding provider.
//!
//! Talks to an Ollama server over HTTP. Every request is bounded by the
//! configured timeout. A timeout or connection failure fails that request
//! only, and retrieval falls back to lexical search for it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use sakumon_core::errors::{EmbeddingError, SakumonResult};
use sakumon_core::traits::IEmbeddingProvider;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

pub struct OllamaProvider {
    base_url: String,
    model: String,
    dimensions: usize,
    timeout: Duration,
    available: AtomicBool,
}

#[derive(Serialize)]
struct OllamaEmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaProvider {
    /// `base_url` defaults to `http://localhost:11434`. The provider starts
    /// unavailable until a health check passes.
    pub fn new(model: String, dimensions: usize, base_url: Option<String>, timeout_ms: u64) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string()),
            model,
            dimensions,
            timeout: Duration::from_millis(timeout_ms),
            available: AtomicBool::new(false),
        }
    }

    fn runtime() -> SakumonResult<tokio::runtime::Runtime> {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                EmbeddingError::InferenceFailed {
                    reason: format!("runtime error: {e}"),
                }
                .into()
            })
    }

    /// Probe the server and record the result in `is_available()`.
    pub fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        let Ok(rt) = Self::runtime() else {
            return false;
        };

        let result = rt.block_on(async {
            reqwest::Client::new()
                .get(&url)
                .timeout(self.timeout)
                .send()
                .await
        });

        let ok = match result {
            Ok(resp) if resp.status().is_success() => {
                debug!(model = %self.model, "ollama health check passed");
                true
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "ollama health check failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "ollama unreachable");
                false
            }
        };
        self.available.store(ok, Ordering::Relaxed);
        ok
    }

    fn request_embeddings(&self, texts: &[String]) -> SakumonResult<Vec<Vec<f32>>> {
        if !self.available.load(Ordering::Relaxed) {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.name().to_string(),
            }
            .into());
        }

        let url = format!("{}/api/embed", self.base_url);
        let request = OllamaEmbedRequest {
            model: &self.model,
            input: texts,
        };
        let timeout_ms = self.timeout.as_millis() as u64;

        let rt = Self::runtime()?;
        let result: Result<OllamaEmbedResponse, EmbeddingError> = rt.block_on(async {
            let response = reqwest::Client::new()
                .post(&url)
                .timeout(self.timeout)
                .json(&request)
                .send()
                .await
                .map_err(|e| classify_http_error(e, &self.model, timeout_ms))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(EmbeddingError::InferenceFailed {
                    reason: format!("ollama returned {status}: {body}"),
                });
            }

            response
                .json()
                .await
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("ollama JSON parse error: {e}"),
                })
        });

        // Request failures leave availability alone; only health checks set it.
        match result {
            Ok(resp) => Ok(resp.embeddings),
            Err(e) => {
                warn!(model = %self.model, error = %e, "ollama embed request failed");
                Err(e.into())
            }
        }
    }
}

fn classify_http_error(e: reqwest::Error, model: &str, timeout_ms: u64) -> EmbeddingError {
    if e.is_timeout() {
        EmbeddingError::Timeout {
            operation: format!("ollama embed ({model})"),
            timeout_ms,
        }
    } else if e.is_connect() {
        EmbeddingError::ProviderUnavailable {
            provider: format!("ollama: {e}"),
        }
    } else {
        EmbeddingError::InferenceFailed {
            reason: format!("ollama HTTP error: {e}"),
        }
    }
}

impl IEmbeddingProvider for OllamaProvider {
    fn embed(&self, text: &str) -> SakumonResult<Vec<f32>> {
        let results = self.request_embeddings(&[text.to_string()])?;
        results.into_iter().next().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "empty ollama response".to_string(),
            }
            .into()
        })
    }

    fn embed_batch(&self, texts: &[String]) -> SakumonResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request_embeddings(texts)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}
