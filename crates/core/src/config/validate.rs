use super::{types::Config, ConfigError};
use crate::keyword::KeywordExpression;

/// Validate configuration
/// Currently validates:
/// - Inference cues are non-empty and distinct
/// - max_order_candidates is not 0
/// - Every keyword expression parses
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    config
        .inference
        .validate()
        .map_err(|e| ConfigError::ValidationError(format!("inference: {}", e)))?;

    let expressions = [
        ("date_auto_select.keyword", &config.date_auto_select.keyword),
        ("area_auto_select.keyword", &config.area_auto_select.keyword),
        ("keyword_exclude", &config.keyword_exclude),
        ("schedule.idle_keyword", &config.schedule.idle_keyword),
        ("schedule.resume_keyword", &config.schedule.resume_keyword),
        ("schedule.idle_keyword_second", &config.schedule.idle_keyword_second),
        ("schedule.resume_keyword_second", &config.schedule.resume_keyword_second),
    ];

    for (field, expression) in expressions {
        KeywordExpression::parse(expression)
            .map_err(|e| ConfigError::ValidationError(format!("{}: {}", field, e)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_zero_order_candidates_fails() {
        let mut config = Config::default();
        config.inference.max_order_candidates = 0;
        let result = validate_config(&config);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_malformed_keyword_fails() {
        let mut config = Config::default();
        config.area_auto_select.keyword = r#""VIP","#.to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("area_auto_select.keyword"));
    }

    #[test]
    fn test_validate_display_form_keyword_is_accepted() {
        let mut config = Config::default();
        config.date_auto_select.keyword = "12/24;12/25".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
