//! Directory validation with detailed error reporting.
//!
//! The [`validate`] function checks a parsed [`Directory`] against every
//! record-level invariant: empty required fields, malformed URLs,
//! unrecognized TTS engines, out-of-range callback modes, a missing
//! callback URL in deferred mode, and inconsistent geographic bounds.
//! Validation is exhaustive, not fail-fast — the returned list of
//! [`ValidationError`] values covers every offending extension and field
//! so operators can fix a whole file from one report.

use url::Url;

use super::model::{CallbackMode, Directory, ExtensionConfig, TtsEngine};
use crate::error::ValidationError;

pub const VALID_TTS_ENGINES: &[&str] = &["google", "edge-tts"];

/// Validate an absolute http/https URL. Returns `Ok(())` or a
/// human-readable error.
pub fn validate_url(url: &str) -> Result<(), String> {
    match Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            if scheme != "http" && scheme != "https" {
                Err(format!(
                    "unsupported scheme '{scheme}' (expected http or https)"
                ))
            } else {
                Ok(())
            }
        }
        Err(_) => Err(format!("'{url}' is not a valid URL")),
    }
}

/// Validate a TTS engine name. Returns `Ok(())` or a human-readable error.
pub fn validate_tts_engine(engine: &TtsEngine) -> Result<(), String> {
    match engine {
        TtsEngine::Google | TtsEngine::EdgeTts => Ok(()),
        TtsEngine::Unknown(other) => Err(format!(
            "'{other}' is not a recognized TTS engine (expected one of: {})",
            VALID_TTS_ENGINES.join(", ")
        )),
    }
}

pub fn validate(directory: &Directory) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if directory.is_empty() {
        errors.push(ValidationError {
            extension: "(root)".into(),
            field: "extensions".into(),
            message: "at least one extension must be defined".into(),
            suggestion: None,
        });
        return Err(errors);
    }

    for (extension, config) in directory.iter() {
        validate_extension(extension, config, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_extension(extension: &str, config: &ExtensionConfig, errors: &mut Vec<ValidationError>) {
    let mut push = |field: &str, message: String, suggestion: Option<String>| {
        errors.push(ValidationError {
            extension: extension.to_string(),
            field: field.into(),
            message,
            suggestion,
        });
    };

    for (field, value) in [
        ("name", &config.name),
        ("googleApiKey", &config.google_api_key),
        ("clientToken", &config.client_token),
        ("failCallTo", &config.fail_call_to),
        ("welcomePlayback", &config.welcome_playback),
        ("defaultLanguage", &config.default_language),
    ] {
        if value.trim().is_empty() {
            push(field, format!("{field} cannot be empty"), None);
        }
    }

    if let Err(msg) = validate_url(&config.register_base_url) {
        push("registerBaseUrl", msg, None);
    }

    if let Err(msg) = validate_tts_engine(&config.tts_engine) {
        push("ttsEngine", msg, None);
    }

    if config.days_valid == 0 {
        push(
            "daysValid",
            "daysValid must be greater than 0".into(),
            None,
        );
    }

    match config.callback_mode {
        CallbackMode::Immediate => {}
        CallbackMode::Deferred => match config.callback_url.as_deref() {
            None | Some("") => {
                push(
                    "callbackUrl",
                    "callbackUrl is required when callbackMode is 2 (deferred)".into(),
                    None,
                );
            }
            Some(url) => {
                if let Err(msg) = validate_url(url) {
                    push("callbackUrl", msg, None);
                }
            }
        },
        CallbackMode::Unknown(value) => {
            push(
                "callbackMode",
                format!("{value} is not a valid callback mode"),
                Some("use 1 (immediate) or 2 (deferred polling)".into()),
            );
        }
    }

    if config.max_retries == 0 {
        push(
            "maxRetries",
            "maxRetries must be greater than 0".into(),
            None,
        );
    }

    if !matches!(config.geocoding_api_version, 1 | 2) {
        push(
            "geocodingApiVersion",
            format!(
                "{} is not a valid geocoding API version",
                config.geocoding_api_version
            ),
            Some("use 1 (Geocoding API) or 2 (Places API)".into()),
        );
    }

    if let Some(bounds) = &config.bounds {
        if bounds.north <= bounds.south {
            push(
                "bounds",
                format!(
                    "north ({}) must be greater than south ({})",
                    bounds.north, bounds.south
                ),
                None,
            );
        }
        if bounds.east <= bounds.west {
            push(
                "bounds",
                format!(
                    "east ({}) must be greater than west ({})",
                    bounds.east, bounds.west
                ),
                None,
            );
        }
        for (name, lat) in [("north", bounds.north), ("south", bounds.south)] {
            if !(-90.0..=90.0).contains(&lat) {
                push("bounds", format!("{name} latitude {lat} is out of range"), None);
            }
        }
        for (name, lng) in [("east", bounds.east), ("west", bounds.west)] {
            if !(-180.0..=180.0).contains(&lng) {
                push("bounds", format!("{name} longitude {lng} is out of range"), None);
            }
        }
    }

    if let Some(bias) = &config.center_bias {
        if !(-90.0..=90.0).contains(&bias.lat) {
            push("centerBias", format!("latitude {} is out of range", bias.lat), None);
        }
        if !(-180.0..=180.0).contains(&bias.lng) {
            push("centerBias", format!("longitude {} is out of range", bias.lng), None);
        }
        if bias.radius <= 0.0 {
            push(
                "centerBias",
                "radius must be greater than 0 meters".into(),
                None,
            );
        }
    }

    if let Some(mode) = config.bounds_restriction_mode {
        if mode > 3 {
            push(
                "boundsRestrictionMode",
                format!("{mode} is not a valid restriction mode"),
                Some("use 0 (off), 1 (pickup), 2 (dropoff) or 3 (both)".into()),
            );
        }
    }

    if config.use_geocoding_proxy {
        match config.geocoding_proxy_base_url.as_deref() {
            None | Some("") => {
                push(
                    "geocodingProxyBaseUrl",
                    "geocodingProxyBaseUrl is required when useGeocodingProxy is true".into(),
                    None,
                );
            }
            Some(url) => {
                if let Err(msg) = validate_url(url) {
                    push("geocodingProxyBaseUrl", msg, None);
                }
            }
        }
    }
}

#[must_use]
pub fn format_validation_report(path: &str, directory: &Directory) -> String {
    let mut lines = vec![format!("  {} extensions\n", directory.len())];

    for (extension, config) in directory.iter() {
        let callback = match config.callback_mode {
            CallbackMode::Immediate => "immediate".to_string(),
            CallbackMode::Deferred => format!(
                "deferred -> {}",
                config.callback_url.as_deref().unwrap_or("none")
            ),
            CallbackMode::Unknown(v) => format!("unknown ({v})"),
        };

        lines.push(format!("  {extension}  {}", config.name));
        lines.push(format!(
            "    tts: {} ({}), callback: {callback}",
            config.tts_engine, config.default_language
        ));
        lines.push(format!(
            "    register: {} (valid {} days)",
            config.register_base_url, config.days_valid
        ));
    }

    format!("{} is valid\n{}", path, lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn minimal_extension() -> ExtensionConfig {
        serde_json::from_value(serde_json::json!({
            "name": "Test Extension",
            "googleApiKey": "key",
            "clientToken": "token",
            "registerBaseUrl": "https://www.example.com/api",
            "failCallTo": "PJSIP/100@trunk",
            "welcomePlayback": "custom/welcome",
            "ttsEngine": "google",
            "daysValid": 7,
            "defaultLanguage": "el",
            "callbackMode": 1,
            "repeatTimes": 10,
            "strictDropoffLocation": false
        }))
        .unwrap()
    }

    fn directory_of(entries: Vec<(&str, ExtensionConfig)>) -> Directory {
        Directory::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn valid_directory_passes() {
        let dir = directory_of(vec![("1234", minimal_extension())]);
        assert!(validate(&dir).is_ok());
    }

    #[test]
    fn empty_directory_fails() {
        let dir = Directory::default();
        let errors = validate(&dir).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("at least one extension"));
    }

    #[test]
    fn unknown_callback_mode_fails_with_suggestion() {
        let mut config = minimal_extension();
        config.callback_mode = CallbackMode::Unknown(3);
        let dir = directory_of(vec![("1234", config)]);
        let errors = validate(&dir).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.field == "callbackMode" && e.message.contains('3')));
        assert!(errors
            .iter()
            .any(|e| e.suggestion.as_deref() == Some("use 1 (immediate) or 2 (deferred polling)")));
    }

    #[test]
    fn bad_record_does_not_suppress_other_reports() {
        let mut bad_mode = minimal_extension();
        bad_mode.callback_mode = CallbackMode::Unknown(3);

        let mut bad_engine = minimal_extension();
        bad_engine.tts_engine = TtsEngine::Unknown("espeak".into());

        let dir = directory_of(vec![("4033", bad_mode), ("4036", bad_engine)]);
        let errors = validate(&dir).unwrap_err();

        assert!(errors
            .iter()
            .any(|e| e.extension == "4033" && e.field == "callbackMode"));
        assert!(errors
            .iter()
            .any(|e| e.extension == "4036" && e.field == "ttsEngine"));
    }

    #[test]
    fn deferred_mode_requires_callback_url() {
        let mut config = minimal_extension();
        config.callback_mode = CallbackMode::Deferred;
        config.callback_url = None;
        let dir = directory_of(vec![("4033", config)]);
        let errors = validate(&dir).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.field == "callbackUrl" && e.message.contains("required")));
    }

    #[test]
    fn deferred_mode_rejects_empty_callback_url() {
        let mut config = minimal_extension();
        config.callback_mode = CallbackMode::Deferred;
        config.callback_url = Some(String::new());
        let dir = directory_of(vec![("4033", config)]);
        assert!(validate(&dir).is_err());
    }

    #[test]
    fn deferred_mode_with_valid_url_passes() {
        let mut config = minimal_extension();
        config.tts_engine = TtsEngine::EdgeTts;
        config.callback_mode = CallbackMode::Deferred;
        config.callback_url = Some("http://79.129.41.206/callback.php".into());
        let dir = directory_of(vec![("4033", config)]);
        assert!(validate(&dir).is_ok());
    }

    #[test]
    fn invalid_register_url_fails() {
        let mut config = minimal_extension();
        config.register_base_url = "not a url".into();
        let dir = directory_of(vec![("1234", config)]);
        let errors = validate(&dir).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.field == "registerBaseUrl" && e.message.contains("not a valid URL")));
    }

    #[test]
    fn non_http_scheme_fails() {
        let mut config = minimal_extension();
        config.register_base_url = "ftp://example.com".into();
        let dir = directory_of(vec![("1234", config)]);
        let errors = validate(&dir).unwrap_err();
        assert!(errors.iter().any(|e| e.message.contains("unsupported scheme")));
    }

    #[test]
    fn zero_days_valid_fails() {
        let mut config = minimal_extension();
        config.days_valid = 0;
        let dir = directory_of(vec![("1234", config)]);
        let errors = validate(&dir).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "daysValid"));
    }

    #[test]
    fn empty_name_fails() {
        let mut config = minimal_extension();
        config.name = "  ".into();
        let dir = directory_of(vec![("1234", config)]);
        let errors = validate(&dir).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "name"));
    }

    #[test]
    fn inverted_bounds_fail() {
        let mut config = minimal_extension();
        config.bounds = Some(crate::config::model::GeoBounds {
            north: 37.8,
            south: 38.1,
            east: 24.0,
            west: 23.5,
        });
        let dir = directory_of(vec![("1234", config)]);
        let errors = validate(&dir).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.field == "bounds" && e.message.contains("north")));
    }

    #[test]
    fn geocoding_proxy_requires_base_url() {
        let mut config = minimal_extension();
        config.use_geocoding_proxy = true;
        config.geocoding_proxy_base_url = None;
        let dir = directory_of(vec![("1234", config)]);
        let errors = validate(&dir).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "geocodingProxyBaseUrl"));
    }

    #[test]
    fn error_count_is_cumulative_across_fields() {
        let mut config = minimal_extension();
        config.name = String::new();
        config.days_valid = 0;
        config.callback_mode = CallbackMode::Unknown(9);
        let dir = directory_of(vec![("5001", config)]);
        let errors = validate(&dir).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|e| e.extension == "5001"));
    }
}
