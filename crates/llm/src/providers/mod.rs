mod gemini_provider;

pub use gemini_provider::{GeminiProvider, GeminiSettings, GenerationConfig};
