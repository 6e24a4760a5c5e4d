//! Context builder for assembling prompts

use gemipy_core::{ChatConfig, SessionManager};
use gemipy_providers::{
    GenerationConfig, GenerationRequest, HarmBlockThreshold, HarmCategory, SafetySetting,
};

/// Placed between the replayed context and the new prompt
pub const QUERY_SEPARATOR: &str = "\n\nNueva consulta: ";

pub const TOP_P: f64 = 0.8;
pub const TOP_K: u32 = 40;
pub const MAX_OUTPUT_TOKENS: u32 = 2048;

/// Threshold applied to every safety category
pub const SAFETY_THRESHOLD: HarmBlockThreshold = HarmBlockThreshold::BlockMediumAndAbove;

/// Build the full prompt text: replayed context followed by the new query
pub fn build_prompt(session: &SessionManager, config: &ChatConfig, user_prompt: &str) -> String {
    let mut prompt = session.build_context(config.use_context);
    prompt.push_str(QUERY_SEPARATOR);
    prompt.push_str(user_prompt);
    prompt
}

/// Sampling parameters for the configured temperature
pub fn generation_config(config: &ChatConfig) -> GenerationConfig {
    GenerationConfig {
        temperature: config.temperature,
        top_p: TOP_P,
        top_k: TOP_K,
        max_output_tokens: MAX_OUTPUT_TOKENS,
    }
}

/// One setting per category, all at [`SAFETY_THRESHOLD`]
pub fn safety_settings() -> Vec<SafetySetting> {
    HarmCategory::ALL
        .into_iter()
        .map(|category| SafetySetting {
            category,
            threshold: SAFETY_THRESHOLD,
        })
        .collect()
}

/// Build the complete request for one model call
pub fn build_request(
    session: &SessionManager,
    config: &ChatConfig,
    user_prompt: &str,
) -> GenerationRequest {
    GenerationRequest {
        model: config.model.clone(),
        prompt: build_prompt(session, config, user_prompt),
        config: generation_config(config),
        safety_settings: safety_settings(),
    }
}
