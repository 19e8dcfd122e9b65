//! `NarrativeSource` backed by an LLM.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use async_trait::async_trait;
use pharmagen_engine::{DrugAnalysis, NarrativeBatch, NarrativeSource};

use crate::audit::NarrativeAuditEntry;
use crate::backend::{LlmBackend, LlmError, LlmRequest, Message};
use crate::prompt::{build_batch_prompt, SYSTEM_PROMPT};

pub struct LlmNarrativeSource {
    backend: Arc<dyn LlmBackend>,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl LlmNarrativeSource {
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self { backend, temperature: 0.2, max_tokens: None }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

#[async_trait]
impl NarrativeSource for LlmNarrativeSource {
    async fn generate(
        &self,
        patient_id: &str,
        analyses: &[DrugAnalysis],
    ) -> anyhow::Result<Option<NarrativeBatch>> {
        if analyses.is_empty() {
            return Ok(None);
        }

        let req = LlmRequest {
            messages: vec![
                Message::system(SYSTEM_PROMPT),
                Message::user(build_batch_prompt(patient_id, analyses)),
            ],
            model: None,
            max_tokens: self.max_tokens,
            temperature: Some(self.temperature),
            json_mode: true,
        };

        let started = Instant::now();
        let response = self
            .backend
            .complete(req)
            .await
            .with_context(|| format!("{} request failed", self.backend.backend_name()))?;
        let latency_ms = started.elapsed().as_millis() as u64;

        let parsed = parse_narrative_batch(&response.content);
        NarrativeAuditEntry::new(
            self.backend.backend_name(),
            &response,
            analyses.len(),
            latency_ms,
            parsed.is_ok(),
        )
        .log();

        let batch = parsed.context("narrative response was not the expected JSON object")?;
        tracing::debug!(bundles = batch.len(), requested = analyses.len(), "Narrative batch parsed");
        Ok(Some(batch))
    }

    fn name(&self) -> &str {
        self.backend.backend_name()
    }
}

/// Parse model output into a batch, tolerating a Markdown code fence.
pub fn parse_narrative_batch(content: &str) -> Result<NarrativeBatch, LlmError> {
    let json = strip_code_fence(content);
    if json.is_empty() {
        return Err(LlmError::EmptyResponse("narrative backend".to_string()));
    }
    Ok(serde_json::from_str(json)?)
}

/// Remove a surrounding ```` ``` ```` / ```` ```json ```` fence, if any.
pub fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) up to the first newline
    let body = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LlmResponse;
    use pharmagen_engine::analyze;
    use pharmagen_kb::KnowledgeBase;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Answers every request with fixed content and records the last request.
    struct StubBackend {
        reply: Result<String, u16>,
        last: Mutex<Option<LlmRequest>>,
    }

    impl StubBackend {
        fn replying(content: &str) -> Self {
            Self { reply: Ok(content.to_string()), last: Mutex::new(None) }
        }

        fn failing(status: u16) -> Self {
            Self { reply: Err(status), last: Mutex::new(None) }
        }
    }

    #[async_trait]
    impl LlmBackend for StubBackend {
        async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
            *self.last.lock().unwrap() = Some(req);
            match &self.reply {
                Ok(content) => Ok(LlmResponse {
                    content: content.clone(),
                    model: "stub-model".to_string(),
                    prompt_tokens: 100,
                    completion_tokens: 50,
                }),
                Err(status) => Err(LlmError::ApiError { status: *status, message: "quota".to_string() }),
            }
        }

        fn model_id(&self) -> &str { "stub-model" }
        fn backend_name(&self) -> &str { "stub" }
        fn is_local(&self) -> bool { true }
    }

    fn codeine() -> Vec<DrugAnalysis> {
        let kb = KnowledgeBase::curated();
        vec![analyze(&kb, &[], "CODEINE").unwrap()]
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{}\n```\n"), "{}");
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn test_parse_narrative_batch_errors() {
        assert!(matches!(parse_narrative_batch("   "), Err(LlmError::EmptyResponse(_))));
        assert!(matches!(parse_narrative_batch("not json"), Err(LlmError::Serde(_))));
    }

    #[tokio::test]
    async fn test_generate_parses_fenced_json() {
        let stub = Arc::new(StubBackend::replying(
            "```json\n{\"CODEINE\": {\"summary\": \"Normal activation.\", \"monitoring_parameters\": [\"pain score\"]}}\n```",
        ));
        let source = LlmNarrativeSource::new(stub.clone()).with_temperature(0.1);
        let batch = source.generate("P1", &codeine()).await.unwrap().unwrap();

        let bundle = batch.get("CODEINE").unwrap();
        assert_eq!(bundle.summary(), Some("Normal activation."));
        assert_eq!(bundle.monitoring_parameters(), vec!["pain score".to_string()]);

        let req = stub.last.lock().unwrap().clone().unwrap();
        assert!(req.json_mode);
        assert_eq!(req.temperature, Some(0.1));
        assert_eq!(req.messages[0].content, SYSTEM_PROMPT);
        assert!(req.messages[1].content.contains("PATIENT ID: P1"));
    }

    #[tokio::test]
    async fn test_generate_propagates_backend_error() {
        let source = LlmNarrativeSource::new(Arc::new(StubBackend::failing(429)));
        let err = source.generate("P1", &codeine()).await.unwrap_err();
        assert!(format!("{err:#}").contains("429"));
    }

    #[tokio::test]
    async fn test_generate_rejects_malformed_json() {
        let source = LlmNarrativeSource::new(Arc::new(StubBackend::replying("[1, 2")));
        assert!(source.generate("P1", &codeine()).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_batch_skips_backend() {
        let stub = Arc::new(StubBackend::replying("{}"));
        let source = LlmNarrativeSource::new(stub.clone());
        assert!(source.generate("P1", &[]).await.unwrap().is_none());
        assert!(stub.last.lock().unwrap().is_none());
    }
}
