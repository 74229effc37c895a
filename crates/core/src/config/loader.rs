use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment prefix for overrides, e.g. `TICKETEER_INFERENCE__MAX_ORDER_CANDIDATES`.
pub const ENV_PREFIX: &str = "TICKETEER_";

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::{SelectionMode, DEFAULT_KEYWORD_EXCLUDE};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[inference]
max_order_candidates = 24

[area_auto_select]
keyword = '"VIP"'
mode = "center"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.inference.max_order_candidates, 24);
        assert_eq!(config.area_auto_select.mode, SelectionMode::Center);
        assert_eq!(config.date_auto_select.mode, SelectionMode::Random);
        assert_eq!(config.keyword_exclude, DEFAULT_KEYWORD_EXCLUDE);
    }

    #[test]
    fn test_load_config_from_str_empty_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_from_str_bad_mode() {
        let toml = r#"
[date_auto_select]
mode = "middle"
"#;
        let result = load_config_from_str(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
keyword_exclude = '"輪椅"'

[inference]
example_cue = "EX"
input_cue = "IN"

[schedule]
idle_keyword = '"11:59:"'
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.inference.example_cue, "EX");
        assert_eq!(config.keyword_exclude, r#""輪椅""#);
        assert_eq!(config.schedule.idle_keyword, r#""11:59:""#);
    }
}
