use crate::error::TabsiftError;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for extraction and session handling.
///
/// Every field has a default, so an options file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Lines whose trimmed length is at or below this many characters are dropped.
    pub min_line_chars: usize,
    /// Lines shorter than this are skipped by the smart splitter.
    pub smart_min_line_chars: usize,
    /// Number of rows echoed back in an analysis summary.
    pub preview_rows: usize,
    /// How long a stored analysis stays available for generation.
    pub session_ttl_minutes: i64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            min_line_chars: 5,
            smart_min_line_chars: 20,
            preview_rows: 5,
            session_ttl_minutes: 10,
        }
    }
}

/// Upper bound on `session_ttl_minutes` (one year).
pub const MAX_SESSION_TTL_MINUTES: i64 = 525_600;

impl ExtractOptions {
    pub fn session_ttl(&self) -> Result<Duration, TabsiftError> {
        Duration::try_minutes(self.session_ttl_minutes).ok_or_else(|| {
            TabsiftError::ConfigInvalid(format!(
                "session_ttl_minutes out of range (got {})",
                self.session_ttl_minutes
            ))
        })
    }
}

/// Load options from a JSON file.
pub fn load_options(path: &Path) -> Result<ExtractOptions, TabsiftError> {
    let content = std::fs::read_to_string(path).map_err(|e| TabsiftError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let options: ExtractOptions =
        serde_json::from_str(&content).map_err(|e| TabsiftError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_options(&options)?;
    Ok(options)
}

/// Parse options from a JSON string (no file path context).
pub fn parse_options_str(json: &str) -> Result<ExtractOptions, TabsiftError> {
    let options: ExtractOptions = serde_json::from_str(json)?;
    validate_options(&options)?;
    Ok(options)
}

pub fn validate_options(options: &ExtractOptions) -> Result<(), TabsiftError> {
    if options.session_ttl_minutes <= 0 {
        return Err(TabsiftError::ConfigInvalid(format!(
            "session_ttl_minutes must be positive (got {})",
            options.session_ttl_minutes
        )));
    }

    if options.session_ttl_minutes > MAX_SESSION_TTL_MINUTES {
        return Err(TabsiftError::ConfigInvalid(format!(
            "session_ttl_minutes must be at most {MAX_SESSION_TTL_MINUTES} (got {})",
            options.session_ttl_minutes
        )));
    }

    if options.preview_rows == 0 {
        return Err(TabsiftError::ConfigInvalid(
            "preview_rows must be at least 1".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_service_behaviour() {
        let opts = ExtractOptions::default();
        assert_eq!(opts.min_line_chars, 5);
        assert_eq!(opts.smart_min_line_chars, 20);
        assert_eq!(opts.preview_rows, 5);
        assert_eq!(opts.session_ttl().unwrap(), Duration::minutes(10));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let opts = parse_options_str(r#"{ "preview_rows": 3 }"#).unwrap();
        assert_eq!(opts.preview_rows, 3);
        assert_eq!(opts.min_line_chars, 5);
    }

    #[test]
    fn test_zero_ttl_rejected() {
        assert!(matches!(
            parse_options_str(r#"{ "session_ttl_minutes": 0 }"#),
            Err(TabsiftError::ConfigInvalid(_))
        ));
    }

    #[test]
    fn test_huge_ttl_rejected() {
        assert!(matches!(
            parse_options_str(r#"{ "session_ttl_minutes": 1000000000000 }"#),
            Err(TabsiftError::ConfigInvalid(_))
        ));
        assert!(matches!(
            parse_options_str(&format!(r#"{{ "session_ttl_minutes": {} }}"#, i64::MAX)),
            Err(TabsiftError::ConfigInvalid(_))
        ));
    }

    #[test]
    fn test_year_ttl_accepted() {
        let json = format!(r#"{{ "session_ttl_minutes": {MAX_SESSION_TTL_MINUTES} }}"#);
        let opts = parse_options_str(&json).unwrap();
        assert_eq!(opts.session_ttl().unwrap(), Duration::days(365));
    }

    #[test]
    fn test_unvalidated_huge_ttl_is_error_not_panic() {
        let opts = ExtractOptions {
            session_ttl_minutes: i64::MAX,
            ..ExtractOptions::default()
        };
        assert!(matches!(
            opts.session_ttl(),
            Err(TabsiftError::ConfigInvalid(_))
        ));
    }

    #[test]
    fn test_zero_preview_rejected() {
        assert!(parse_options_str(r#"{ "preview_rows": 0 }"#).is_err());
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(matches!(
            parse_options_str(r#"{ "min_line_chars": "five" }"#),
            Err(TabsiftError::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_options(Path::new("/nonexistent/options.json")).unwrap_err();
        assert!(matches!(err, TabsiftError::ConfigLoad { .. }));
    }
}
