//! Audit logging for narrative calls.
//!
//! Records who/what/how-much for each call and a SHA-256 of the raw output.
//! Prompt and output text carry patient data and are never recorded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::backend::LlmResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeAuditEntry {
    pub id: Uuid,
    pub backend: String,
    pub model: String,
    pub drug_count: usize,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub output_hash: String,
    pub latency_ms: u64,
    pub succeeded: bool,
    pub called_at: DateTime<Utc>,
}

impl NarrativeAuditEntry {
    pub fn new(
        backend: &str,
        response: &LlmResponse,
        drug_count: usize,
        latency_ms: u64,
        succeeded: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            backend: backend.to_string(),
            model: response.model.clone(),
            drug_count,
            prompt_tokens: response.prompt_tokens,
            completion_tokens: response.completion_tokens,
            output_hash: sha256_hex(&response.content),
            latency_ms,
            succeeded,
            called_at: Utc::now(),
        }
    }

    /// Emit the entry on the `pharmagen::audit` target.
    pub fn log(&self) {
        tracing::info!(
            target: "pharmagen::audit",
            id = %self.id,
            backend = %self.backend,
            model = %self.model,
            drugs = self.drug_count,
            prompt_tokens = self.prompt_tokens,
            completion_tokens = self.completion_tokens,
            output_hash = %self.output_hash,
            latency_ms = self.latency_ms,
            succeeded = self.succeeded,
            "Narrative call"
        );
    }
}

fn sha256_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_hashes_output() {
        let response = LlmResponse {
            content: "abc".to_string(),
            model: "gpt-4o-mini".to_string(),
            prompt_tokens: 10,
            completion_tokens: 3,
        };
        let e = NarrativeAuditEntry::new("openai", &response, 2, 150, true);
        assert_eq!(
            e.output_hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(e.drug_count, 2);
        assert_eq!(e.model, "gpt-4o-mini");
        assert!(e.succeeded);
    }
}
