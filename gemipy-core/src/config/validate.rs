//! Configuration validation rules.

use super::schema::ChatConfig;

/// Validate configuration and return aggregated validation errors.
pub fn validate_config(config: &ChatConfig) -> crate::Result<()> {
    let mut errors = Vec::new();

    if config.max_history == 0 {
        errors.push("max_historial must be > 0".to_string());
    }
    if !config.temperature.is_finite() || !(0.0..=2.0).contains(&config.temperature) {
        errors.push("temperatura must be in [0.0, 2.0]".to_string());
    }
    if config.model.trim().is_empty() {
        errors.push("modelo must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::Error::Validation(errors.join("; ")))
    }
}
