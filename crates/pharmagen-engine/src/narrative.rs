//! Seam to the external narrative generator.
//!
//! One request covers every supported drug in a batch. The generator is
//! optional: an absent batch, an absent bundle for a drug, and a blank field
//! inside a bundle all fall back to the same rule-based text.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::DrugAnalysis;

/// Free-text explanation for one drug. Every field may be missing; a field
/// of the wrong type reads as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeBundle {
    #[serde(deserialize_with = "lenient")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub mechanism_explanation: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub clinical_recommendation: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub alternative_drugs: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub monitoring_parameters: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub cpic_guideline_reference: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl NarrativeBundle {
    pub fn summary(&self) -> Option<&str> {
        non_blank(&self.summary)
    }

    pub fn mechanism_explanation(&self) -> Option<&str> {
        non_blank(&self.mechanism_explanation)
    }

    pub fn clinical_recommendation(&self) -> Option<&str> {
        non_blank(&self.clinical_recommendation)
    }

    pub fn cpic_guideline_reference(&self) -> Option<&str> {
        non_blank(&self.cpic_guideline_reference)
    }

    pub fn alternative_drugs(&self) -> Vec<String> {
        non_blank_items(&self.alternative_drugs)
    }

    pub fn monitoring_parameters(&self) -> Vec<String> {
        non_blank_items(&self.monitoring_parameters)
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn non_blank_items(field: &Option<Vec<String>>) -> Vec<String> {
    field
        .iter()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Narrative bundles keyed by uppercase drug name.
///
/// Deserialises from a JSON object of drug -> bundle. An entry that is not
/// an object (`null`, a string, ...) is dropped on its own; the other drugs
/// keep their bundles.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NarrativeBatch {
    bundles: HashMap<String, NarrativeBundle>,
}

impl<'de> Deserialize<'de> for NarrativeBatch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let bundles = raw
            .into_iter()
            .filter_map(|(drug, value)| match serde_json::from_value::<NarrativeBundle>(value) {
                Ok(bundle) => Some((drug, bundle)),
                Err(e) => {
                    tracing::debug!(drug = %drug, error = %e, "Dropping unusable narrative entry");
                    None
                }
            })
            .collect();
        Ok(Self { bundles })
    }
}

impl NarrativeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, drug: &str, bundle: NarrativeBundle) -> Self {
        self.bundles.insert(drug.trim().to_uppercase(), bundle);
        self
    }

    /// Bundle for `drug`, matching keys case-insensitively.
    pub fn get(&self, drug: &str) -> Option<&NarrativeBundle> {
        let key = drug.trim().to_uppercase();
        self.bundles.get(&key).or_else(|| {
            self.bundles
                .iter()
                .find(|(k, _)| k.trim().eq_ignore_ascii_case(&key))
                .map(|(_, b)| b)
        })
    }

    pub fn len(&self) -> usize { self.bundles.len() }
    pub fn is_empty(&self) -> bool { self.bundles.is_empty() }
}

/// Produces narrative text for a batch of analyses in one round trip.
///
/// `Ok(None)` means "no narrative"; `Err` is logged by the caller and
/// treated the same way.
#[async_trait]
pub trait NarrativeSource: Send + Sync {
    async fn generate(
        &self,
        patient_id: &str,
        analyses: &[DrugAnalysis],
    ) -> anyhow::Result<Option<NarrativeBatch>>;

    /// Short name for logs.
    fn name(&self) -> &str;
}

/// Narrative generation switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNarrative;

#[async_trait]
impl NarrativeSource for NoNarrative {
    async fn generate(&self, _patient_id: &str, _analyses: &[DrugAnalysis]) -> anyhow::Result<Option<NarrativeBatch>> {
        Ok(None)
    }

    fn name(&self) -> &str { "disabled" }
}

// ── Mock Implementation for Testing ────────────────────────────────────────

enum MockResponse {
    Batch(NarrativeBatch),
    Unavailable,
    Fail(String),
}

/// Mock source with canned responses; counts calls.
pub struct MockNarrativeSource {
    response: MockResponse,
    calls: AtomicUsize,
}

impl MockNarrativeSource {
    /// Returns an (initially empty) batch.
    pub fn new() -> Self {
        Self { response: MockResponse::Batch(NarrativeBatch::new()), calls: AtomicUsize::new(0) }
    }

    /// Add a bundle to the canned batch.
    pub fn with(mut self, drug: &str, bundle: NarrativeBundle) -> Self {
        self.response = match self.response {
            MockResponse::Batch(batch) => MockResponse::Batch(batch.with(drug, bundle)),
            other => other,
        };
        self
    }

    /// Always answers `Ok(None)`.
    pub fn unavailable() -> Self {
        Self { response: MockResponse::Unavailable, calls: AtomicUsize::new(0) }
    }

    /// Always answers with an error.
    pub fn failing(message: &str) -> Self {
        Self { response: MockResponse::Fail(message.to_string()), calls: AtomicUsize::new(0) }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockNarrativeSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NarrativeSource for MockNarrativeSource {
    async fn generate(&self, _patient_id: &str, _analyses: &[DrugAnalysis]) -> anyhow::Result<Option<NarrativeBatch>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            MockResponse::Batch(batch) => Ok(Some(batch.clone())),
            MockResponse::Unavailable => Ok(None),
            MockResponse::Fail(msg) => Err(anyhow::anyhow!(msg.clone())),
        }
    }

    fn name(&self) -> &str { "mock" }
}

// ── Tests ───────────────────────────────────────────────────────────────────
