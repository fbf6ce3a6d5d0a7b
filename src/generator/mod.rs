pub mod backend;
pub mod prompts;

pub use backend::{GeminiGenerator, MockGenerator, OllamaGenerator, TextGenerator};
