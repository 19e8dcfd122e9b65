//! Subcommand implementations.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use pharmagen_engine::{parse_drug_list, run_batch, NarrativeSource, NoNarrative};
use pharmagen_kb::sample::{SAMPLE_DRUGS, SAMPLE_VCF};
use pharmagen_kb::KnowledgeBase;
use pharmagen_llm::{GeminiBackend, LlmBackend, LlmNarrativeSource, OpenAiBackend, OpenAiCompatibleBackend};
use tracing::{info, warn};

use crate::config::{BackendKind, LlmConfig, LlmMode};

pub struct AnalyzeArgs {
    pub vcf: Option<PathBuf>,
    pub drugs: Option<String>,
    pub sample: bool,
    pub output: Option<PathBuf>,
    pub no_narrative: bool,
}

pub async fn analyze(kb: &KnowledgeBase, llm: &LlmConfig, args: AnalyzeArgs) -> anyhow::Result<()> {
    let vcf_text = match (&args.vcf, args.sample) {
        (Some(path), _) => read_vcf(path)?,
        (None, true) => SAMPLE_VCF.to_string(),
        (None, false) => anyhow::bail!("either --vcf <path> or --sample is required"),
    };
    let drugs = parse_drug_list(&requested_drugs(args.drugs.as_deref(), args.sample));

    let narrative: Box<dyn NarrativeSource> = if args.no_narrative {
        Box::new(NoNarrative)
    } else {
        narrative_source(llm)?
    };
    info!(drugs = drugs.len(), narrative = narrative.name(), "Starting analysis");

    let batch = run_batch(kb, &vcf_text, &drugs, narrative.as_ref()).await?;
    let json = serde_json::to_string_pretty(&batch)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "Report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Run only the pre-flight gate. Returns whether the file passed.
pub fn validate(path: &Path) -> anyhow::Result<bool> {
    let text = read_vcf(path)?;
    match pharmagen_vcf::validate(&text) {
        Ok(()) => {
            println!("valid");
            Ok(true)
        }
        Err(e) => {
            println!("{e}");
            Ok(false)
        }
    }
}

pub fn list_drugs(kb: &KnowledgeBase) {
    print!("{}", render_drug_catalog(kb));
}

/// One line per supported drug: name, gene, mechanism.
pub fn render_drug_catalog(kb: &KnowledgeBase) -> String {
    let width = kb.drugs().iter().map(|d| d.name.len()).max().unwrap_or(0);
    kb.drugs()
        .iter()
        .map(|d| format!("{:<width$}  {:<8}  {}\n", d.name, d.gene, d.mechanism))
        .collect()
}

/// `--drugs` as given; the sample panel's drugs when running `--sample` without it.
pub fn requested_drugs(drugs: Option<&str>, sample: bool) -> String {
    match drugs {
        Some(d) => d.to_string(),
        None if sample => SAMPLE_DRUGS.to_string(),
        None => String::new(),
    }
}

fn read_vcf(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading VCF {}", path.display()))
}

/// Build the configured narrative source. Remote mode without a usable key
/// degrades to no narrative.
pub fn narrative_source(llm: &LlmConfig) -> anyhow::Result<Box<dyn NarrativeSource>> {
    if llm.mode == LlmMode::Disabled {
        return Ok(Box::new(NoNarrative));
    }

    let settings = llm.selected();
    let timeout = Duration::from_secs(llm.timeout_secs);
    let key = llm.resolve_api_key();

    let backend: Arc<dyn LlmBackend> = match (llm.backend, key) {
        (BackendKind::OpenAi, Some(key)) => {
            Arc::new(OpenAiBackend::new(key, &settings.model).with_timeout(timeout)?)
        }
        (BackendKind::Gemini, Some(key)) => {
            Arc::new(GeminiBackend::new(key, &settings.model).with_timeout(timeout)?)
        }
        (BackendKind::OpenAiCompatible, key) => {
            let base_url = settings.base_url.as_deref().unwrap_or("http://localhost:11434");
            Arc::new(OpenAiCompatibleBackend::new(base_url, &settings.model, key).with_timeout(timeout)?)
        }
        (kind, None) => {
            warn!(
                backend = ?kind,
                env = kind.api_key_env(),
                "No API key configured; narrative generation disabled"
            );
            return Ok(Box::new(NoNarrative));
        }
    };

    info!(backend = backend.backend_name(), model = backend.model_id(), "Narrative backend ready");
    let mut source = LlmNarrativeSource::new(backend).with_temperature(llm.temperature);
    if let Some(max) = llm.max_tokens {
        source = source.with_max_tokens(max);
    }
    Ok(Box::new(source))
}
