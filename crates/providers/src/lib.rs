pub mod gemini;
pub mod instructions;

pub use gemini::GeminiClient;
