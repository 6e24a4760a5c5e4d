//! Generative model provider integrations for gemipy
//!
//! This crate provides the provider abstraction and the Gemini REST client.

pub mod base;
pub mod gemini;

pub use base::{
    GenerationConfig, GenerationRequest, HarmBlockThreshold, HarmCategory, LLMProvider,
    ProviderError, ProviderResult, SafetySetting,
};
pub use gemini::GeminiClient;
