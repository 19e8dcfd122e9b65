//! pharmagen-llm — LLM-backed narrative generation.
//!
//! - `backend`   — `LlmBackend` trait with OpenAI, Gemini and OpenAI-compatible clients
//! - `prompt`    — batch prompt covering every supported drug in one request
//! - `narrative` — `LlmNarrativeSource`, the engine's narrative collaborator
//! - `audit`     — per-call audit record (hash of output, never the output itself)

pub mod backend;
pub mod prompt;
pub mod narrative;
pub mod audit;

pub use backend::{GeminiBackend, LlmBackend, LlmError, LlmRequest, LlmResponse, Message, OpenAiBackend, OpenAiCompatibleBackend};
pub use narrative::LlmNarrativeSource;
