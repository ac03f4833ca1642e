//! Load-time resolution of `env:` secret references.
//!
//! The persisted directory should reference credentials rather than
//! embed them: `googleApiKey: "env:GOOGLE_API_KEY"` pulls the value
//! from the process environment while loading, so the file on disk
//! never carries the real key. The in-memory record holds the resolved
//! value. A reference to an unset variable is reported as a
//! [`ValidationError`], merged with the rest of the load report.

use super::model::Directory;
use crate::error::ValidationError;

const ENV_REF_PREFIX: &str = "env:";

/// Resolve every `env:VAR` reference in the directory's secret fields.
///
/// Returns the list of unresolvable references; empty means every
/// reference resolved (or none were present).
pub fn resolve(directory: &mut Directory) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (extension, config) in directory.iter_mut() {
        for (field, value) in [
            ("googleApiKey", &mut config.google_api_key),
            ("clientToken", &mut config.client_token),
        ] {
            if let Some(var) = value.strip_prefix(ENV_REF_PREFIX) {
                match std::env::var(var) {
                    Ok(resolved) if !resolved.is_empty() => *value = resolved,
                    Ok(_) => errors.push(ValidationError {
                        extension: extension.to_string(),
                        field: field.into(),
                        message: format!("environment variable '{var}' is empty"),
                        suggestion: None,
                    }),
                    Err(_) => errors.push(ValidationError {
                        extension: extension.to_string(),
                        field: field.into(),
                        message: format!("environment variable '{var}' is not set"),
                        suggestion: Some(format!("export {var}=... before loading")),
                    }),
                }
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::ExtensionConfig;
    use std::collections::BTreeMap;

    fn directory_with_secrets(api_key: &str, token: &str) -> Directory {
        let config: ExtensionConfig = serde_json::from_value(serde_json::json!({
            "name": "Test Extension",
            "googleApiKey": api_key,
            "clientToken": token,
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
        .unwrap();
        let mut map = BTreeMap::new();
        map.insert("1234".to_string(), config);
        Directory::new(map)
    }

    #[test]
    fn literal_values_pass_through_untouched() {
        let mut dir = directory_with_secrets("literal-key", "literal-token");
        let errors = resolve(&mut dir);
        assert!(errors.is_empty());
        let config = dir.lookup("1234").unwrap();
        assert_eq!(config.google_api_key, "literal-key");
        assert_eq!(config.client_token, "literal-token");
    }

    #[test]
    fn env_reference_resolves_from_environment() {
        std::env::set_var("EXTDIR_TEST_API_KEY_SET", "resolved-key");
        let mut dir = directory_with_secrets("env:EXTDIR_TEST_API_KEY_SET", "token");
        let errors = resolve(&mut dir);
        assert!(errors.is_empty());
        assert_eq!(dir.lookup("1234").unwrap().google_api_key, "resolved-key");
    }

    #[test]
    fn unset_variable_is_reported_per_field() {
        let mut dir = directory_with_secrets("env:EXTDIR_TEST_API_KEY_UNSET", "token");
        let errors = resolve(&mut dir);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].extension, "1234");
        assert_eq!(errors[0].field, "googleApiKey");
        assert!(errors[0].message.contains("EXTDIR_TEST_API_KEY_UNSET"));
        assert!(errors[0].suggestion.is_some());
    }
}
