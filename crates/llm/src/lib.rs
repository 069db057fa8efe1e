//! Generative-language client for Prediktor.
//!
//! [`TextGenerator`] is the seam the analysis services depend on;
//! [`GeminiProvider`] is the HTTP implementation.

mod errors;
pub mod providers;

pub use errors::{LlmError, LlmResult};
pub use providers::{GeminiProvider, GeminiSettings, GenerationConfig};

use async_trait::async_trait;

/// Turns a prompt into raw model text.
///
/// One call is one HTTP request: implementations do not retry.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> LlmResult<String>;

    /// Model name, for logging
    fn model(&self) -> &str;
}
