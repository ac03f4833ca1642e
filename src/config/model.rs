//! Serde data structures for the extension tenant directory.
//!
//! Contains [`Directory`] (the root map from extension ID to tenant
//! record), [`ExtensionConfig`], and the [`TtsEngine`] / [`CallbackMode`]
//! enums. All types derive `Serialize` and `Deserialize` with
//! `deny_unknown_fields` for strict parsing.
//!
//! `ttsEngine` and `callbackMode` decode *leniently* — unrecognized
//! values are preserved in an `Unknown` variant instead of failing the
//! parse, so that validation can reject them per extension alongside
//! every other problem in the same file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const fn default_max_retries() -> u32 {
    5
}

const fn default_geocoding_api_version() -> u8 {
    1
}

const fn default_true() -> bool {
    true
}

fn is_default_max_retries(v: &u32) -> bool {
    *v == default_max_retries()
}

fn is_default_geocoding_api_version(v: &u8) -> bool {
    *v == default_geocoding_api_version()
}

fn is_true(v: &bool) -> bool {
    *v
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// The root document: extension ID -> tenant record.
///
/// Keys are opaque strings. `"1234"` and `"01234"` are distinct
/// extensions; no numeric normalization happens anywhere.
///
/// `BTreeMap` keeps listing and serialization order stable across
/// loads, which the round-trip and admin-listing behavior relies on.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Directory {
    extensions: BTreeMap<String, ExtensionConfig>,
}

impl Directory {
    #[must_use]
    pub fn new(extensions: BTreeMap<String, ExtensionConfig>) -> Self {
        Self { extensions }
    }

    /// Exact-match lookup. Absence is `None`; the caller decides any
    /// fallback policy (route to an operator, play a generic prompt).
    #[must_use]
    pub fn lookup(&self, extension: &str) -> Option<&ExtensionConfig> {
        self.extensions.get(extension)
    }

    #[must_use]
    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.contains_key(extension)
    }

    /// Snapshot iteration in stable (lexicographic) key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtensionConfig)> {
        self.extensions.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut ExtensionConfig)> {
        self.extensions.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn extension_ids(&self) -> Vec<&str> {
        self.extensions.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

/// One tenant's settings, keyed by its PBX extension.
///
/// Field names follow the wire shape consumed by the dialplan side
/// (camelCase); `tts` is accepted as a legacy alias for `ttsEngine`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ExtensionConfig {
    /// Human-readable tenant label.
    pub name: String,

    /// Google Maps API key. May be written as `env:VAR` in the file;
    /// resolved to the real value at load time.
    pub google_api_key: String,

    /// Registration API token. Supports `env:VAR` like the API key.
    pub client_token: String,

    /// Base URL of the tenant's registration/dispatch API.
    pub register_base_url: String,

    /// Dial string for the operator fallback transfer. Opaque here.
    pub fail_call_to: String,

    /// Audio prompt resource played at call start.
    pub welcome_playback: String,

    #[serde(rename = "ttsEngine", alias = "tts")]
    pub tts_engine: TtsEngine,

    /// Validity window in days for cached registration data.
    pub days_valid: u32,

    /// Language code for prompts and speech recognition (e.g. "el").
    pub default_language: String,

    pub callback_mode: CallbackMode,

    /// Target for deferred result delivery. Required when
    /// `callback_mode` is `Deferred`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,

    /// Number of times TTS prompts are repeated while waiting for input.
    pub repeat_times: u32,

    /// When true, only high-precision geocode result types are accepted
    /// for the dropoff address. Pickup is always strict downstream.
    pub strict_dropoff_location: bool,

    /// Retry budget for caller input collection.
    #[serde(
        default = "default_max_retries",
        skip_serializing_if = "is_default_max_retries"
    )]
    pub max_retries: u32,

    /// 1 = Geocoding API, 2 = Places API searchText.
    #[serde(
        default = "default_geocoding_api_version",
        skip_serializing_if = "is_default_geocoding_api_version"
    )]
    pub geocoding_api_version: u8,

    /// Post-processing bounding box for geocode results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<GeoBounds>,

    /// Bias geocode results toward a center point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_bias: Option<CenterBias>,

    /// 0/null = off, 1 = pickup only, 2 = dropoff only, 3 = both.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds_restriction_mode: Option<u8>,

    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub ask_for_name: bool,

    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub announce_name: bool,

    /// Redirect callers with non-local numbers straight to the operator.
    #[serde(default, skip_serializing_if = "is_false")]
    pub foreign_redirect: bool,

    /// Skip the welcome prompts and behave as if the caller chose ASAP.
    #[serde(default, skip_serializing_if = "is_false")]
    pub bypass_welcome: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub use_geocoding_proxy: bool,

    /// Base URL of the geocoding proxy. Required when
    /// `use_geocoding_proxy` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geocoding_proxy_base_url: Option<String>,
}

impl ExtensionConfig {
    /// Whether geographic restriction applies to the pickup address.
    #[must_use]
    pub fn restricts_pickup(&self) -> bool {
        matches!(self.bounds_restriction_mode, Some(1 | 3))
    }

    /// Whether geographic restriction applies to the dropoff address.
    #[must_use]
    pub fn restricts_dropoff(&self) -> bool {
        matches!(self.bounds_restriction_mode, Some(2 | 3))
    }
}

/// Which TTS backend renders this tenant's prompts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum TtsEngine {
    Google,
    EdgeTts,
    /// Anything the parser did not recognize. Rejected by validation;
    /// never present in a loaded directory.
    Unknown(String),
}

impl TtsEngine {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Google => "google",
            Self::EdgeTts => "edge-tts",
            Self::Unknown(other) => other,
        }
    }
}

impl From<String> for TtsEngine {
    fn from(value: String) -> Self {
        match value.as_str() {
            "google" => Self::Google,
            "edge-tts" => Self::EdgeTts,
            _ => Self::Unknown(value),
        }
    }
}

impl From<TtsEngine> for String {
    fn from(value: TtsEngine) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for TtsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How results are returned to the caller: immediate TTS read-back (1)
/// or deferred polling after dispatching a callback URL (2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "u8", into = "u8")]
pub enum CallbackMode {
    Immediate,
    Deferred,
    /// Out-of-range wire value. Rejected by validation; never present
    /// in a loaded directory.
    Unknown(u8),
}

impl CallbackMode {
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Immediate => 1,
            Self::Deferred => 2,
            Self::Unknown(other) => other,
        }
    }
}

impl From<u8> for CallbackMode {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Immediate,
            2 => Self::Deferred,
            other => Self::Unknown(other),
        }
    }
}

impl From<CallbackMode> for u8 {
    fn from(value: CallbackMode) -> Self {
        value.as_u8()
    }
}

/// Bounding box used to reject geocode results outside the service area.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    #[must_use]
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat <= self.north && lat >= self.south && lng <= self.east && lng >= self.west
    }
}

/// Center point (plus radius in meters) geocode results are biased toward.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CenterBias {
    pub lat: f64,
    pub lng: f64,
    pub radius: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tts_engine_round_trips_known_values() {
        assert_eq!(TtsEngine::from("google".to_string()), TtsEngine::Google);
        assert_eq!(TtsEngine::from("edge-tts".to_string()), TtsEngine::EdgeTts);
        assert_eq!(TtsEngine::Google.as_str(), "google");
        assert_eq!(TtsEngine::EdgeTts.as_str(), "edge-tts");
    }

    #[test]
    fn tts_engine_preserves_unrecognized_value() {
        let engine = TtsEngine::from("espeak".to_string());
        assert_eq!(engine, TtsEngine::Unknown("espeak".to_string()));
        assert_eq!(engine.as_str(), "espeak");
    }

    #[test]
    fn callback_mode_maps_wire_integers() {
        assert_eq!(CallbackMode::from(1), CallbackMode::Immediate);
        assert_eq!(CallbackMode::from(2), CallbackMode::Deferred);
        assert_eq!(CallbackMode::from(3), CallbackMode::Unknown(3));
        assert_eq!(CallbackMode::Deferred.as_u8(), 2);
    }

    #[test]
    fn directory_lookup_is_exact_match() {
        let json = r#"{
            "1234": {
                "name": "Test Extension",
                "googleApiKey": "key",
                "clientToken": "token",
                "registerBaseUrl": "https://example.com/api",
                "failCallTo": "PJSIP/100@trunk",
                "welcomePlayback": "custom/welcome",
                "ttsEngine": "google",
                "daysValid": 7,
                "defaultLanguage": "el",
                "callbackMode": 1,
                "repeatTimes": 10,
                "strictDropoffLocation": false
            }
        }"#;
        let dir: Directory = serde_json::from_str(json).unwrap();
        assert!(dir.lookup("1234").is_some());
        assert!(dir.lookup("01234").is_none());
        assert!(dir.lookup("9999").is_none());
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn legacy_tts_alias_is_accepted() {
        let json = r#"{
            "4033": {
                "name": "Hermis-Peireas",
                "googleApiKey": "key",
                "clientToken": "token",
                "registerBaseUrl": "http://79.129.41.206:8080/IQTaxiAPIV3",
                "failCallTo": "PJSIP/2104115200@trunk",
                "welcomePlayback": "custom/welcome-v3",
                "tts": "edge-tts",
                "daysValid": 30,
                "defaultLanguage": "el",
                "callbackMode": 2,
                "callbackUrl": "http://79.129.41.206/callback.php",
                "repeatTimes": 10,
                "strictDropoffLocation": false
            }
        }"#;
        let dir: Directory = serde_json::from_str(json).unwrap();
        let config = dir.lookup("4033").unwrap();
        assert_eq!(config.tts_engine, TtsEngine::EdgeTts);
        assert_eq!(config.callback_mode, CallbackMode::Deferred);
    }

    #[test]
    fn supplemental_fields_default_like_the_dialplan() {
        let json = r#"{
            "name": "Cosmos",
            "googleApiKey": "key",
            "clientToken": "token",
            "registerBaseUrl": "http://18300.fortiddns.com:8000/IQTaxiApi",
            "failCallTo": "PJSIP/2104118300@trunk",
            "welcomePlayback": "custom/welcome-kosmos-2",
            "ttsEngine": "edge-tts",
            "daysValid": 30,
            "defaultLanguage": "el",
            "callbackMode": 2,
            "callbackUrl": "https://18300.fortiddns.com/callback.php",
            "repeatTimes": 10,
            "strictDropoffLocation": false
        }"#;
        let config: ExtensionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.geocoding_api_version, 1);
        assert!(config.ask_for_name);
        assert!(config.announce_name);
        assert!(!config.foreign_redirect);
        assert!(!config.bypass_welcome);
        assert!(!config.use_geocoding_proxy);
        assert!(config.bounds.is_none());
        assert!(!config.restricts_pickup());
        assert!(!config.restricts_dropoff());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let json = r#"{
            "name": "Test",
            "googleApiKey": "key",
            "clientToken": "token",
            "registerBaseUrl": "https://example.com",
            "failCallTo": "PJSIP/1@t",
            "welcomePlayback": "custom/welcome",
            "ttsEngine": "google",
            "daysValid": 7,
            "defaultLanguage": "el",
            "callbackMode": 1,
            "repeatTimes": 10,
            "strictDropoffLocation": false,
            "welcomePlayback2": "typo"
        }"#;
        assert!(serde_json::from_str::<ExtensionConfig>(json).is_err());
    }

    #[test]
    fn bounds_restriction_modes() {
        let base = r#"{
            "name": "Test",
            "googleApiKey": "key",
            "clientToken": "token",
            "registerBaseUrl": "https://example.com",
            "failCallTo": "PJSIP/1@t",
            "welcomePlayback": "custom/welcome",
            "ttsEngine": "google",
            "daysValid": 7,
            "defaultLanguage": "el",
            "callbackMode": 1,
            "repeatTimes": 10,
            "strictDropoffLocation": false,
            "boundsRestrictionMode": 3
        }"#;
        let config: ExtensionConfig = serde_json::from_str(base).unwrap();
        assert!(config.restricts_pickup());
        assert!(config.restricts_dropoff());
    }

    #[test]
    fn geo_bounds_containment() {
        let bounds = GeoBounds {
            north: 38.1,
            south: 37.8,
            east: 24.0,
            west: 23.5,
        };
        assert!(bounds.contains(37.9755, 23.7348));
        assert!(!bounds.contains(40.0, 23.7348));
        assert!(!bounds.contains(37.9755, 22.0));
    }
}
