//! Static starter templates for `extdir init`.
//!
//! Creates a YAML, JSON, or TOML tenants file with either minimal
//! or fully documented templates. Secret fields use `env:` references
//! so credentials never land in the file.

use std::path::PathBuf;

use crate::cli::{ConfigFormat, InitArgs};
use crate::error::ExtdirError;

pub fn run(args: &InitArgs) -> Result<(), ExtdirError> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("extdir.{}", args.format.extension())));

    if output.exists() {
        return Err(ExtdirError::FileExists { path: output });
    }

    let content = match (&args.format, args.full) {
        (ConfigFormat::Yaml, false) => YAML_MINIMAL,
        (ConfigFormat::Yaml, true) => YAML_FULL,
        (ConfigFormat::Json, false) => JSON_MINIMAL,
        (ConfigFormat::Json, true) => JSON_FULL,
        (ConfigFormat::Toml, false) => TOML_MINIMAL,
        (ConfigFormat::Toml, true) => TOML_FULL,
    };

    std::fs::write(&output, content)?;
    println!("Created {}", output.display());
    Ok(())
}

const YAML_MINIMAL: &str = r#"# extdir tenants file — one entry per PBX extension

"1234":
  name: "Test Extension"
  googleApiKey: "env:GOOGLE_API_KEY"
  clientToken: "env:CLIENT_TOKEN"
  registerBaseUrl: "https://www.example.com/DispatchAPI"
  failCallTo: "PJSIP/1000@trunk"
  welcomePlayback: "custom/welcome"
  ttsEngine: "google"
  daysValid: 7
  defaultLanguage: "el"
  callbackMode: 1
  repeatTimes: 10
  strictDropoffLocation: false
"#;

const YAML_FULL: &str = r#"# extdir tenants file — one entry per PBX extension
#
# Secret fields (googleApiKey, clientToken) accept "env:VAR" references,
# resolved from the process environment at load time. Prefer references
# over embedding credentials in this file.

# Immediate mode: the call result is read back over TTS, then the call ends.
"1234":
  name: "Test Extension"
  googleApiKey: "env:GOOGLE_API_KEY"
  clientToken: "env:CLIENT_TOKEN"
  registerBaseUrl: "https://www.example.com/DispatchAPI"
  failCallTo: "PJSIP/1000@trunk"        # operator transfer on failure
  welcomePlayback: "custom/welcome"
  ttsEngine: "google"                   # google | edge-tts
  daysValid: 7                          # cached registration validity (days)
  defaultLanguage: "el"
  callbackMode: 1                       # 1 = immediate, 2 = deferred polling
  repeatTimes: 10                       # TTS prompt repetitions
  strictDropoffLocation: false          # true = precise dropoff geocodes only
  # maxRetries: 5                       # caller input retry budget
  # geocodingApiVersion: 1              # 1 = Geocoding API, 2 = Places API
  # askForName: true
  # announceName: true
  # foreignRedirect: false              # redirect foreign numbers to operator
  # bypassWelcome: false                # skip prompts, behave as ASAP request

# Deferred mode: results are delivered via the callback URL and the
# dialplan polls for the dispatch status.
"4033":
  name: "Hermis-Peireas"
  googleApiKey: "env:GOOGLE_API_KEY"
  clientToken: "env:CLIENT_TOKEN"
  registerBaseUrl: "http://79.129.41.206:8080/IQTaxiAPIV3"
  failCallTo: "PJSIP/2104115200@trunk"
  welcomePlayback: "custom/welcome-v3"
  ttsEngine: "edge-tts"
  daysValid: 30
  defaultLanguage: "el"
  callbackMode: 2
  callbackUrl: "http://79.129.41.206/callback.php"
  repeatTimes: 10
  strictDropoffLocation: false
  # Restrict geocode results to the service area:
  # bounds:
  #   north: 38.1
  #   south: 37.8
  #   east: 24.0
  #   west: 23.5
  # centerBias:
  #   lat: 37.9755
  #   lng: 23.7348
  #   radius: 50000                     # meters
  # boundsRestrictionMode: 3            # 0 off, 1 pickup, 2 dropoff, 3 both
  # useGeocodingProxy: true
  # geocodingProxyBaseUrl: "https://www.example.com/DispatchAPI/api/Proxy"
"#;

const JSON_MINIMAL: &str = r#"{
  "1234": {
    "name": "Test Extension",
    "googleApiKey": "env:GOOGLE_API_KEY",
    "clientToken": "env:CLIENT_TOKEN",
    "registerBaseUrl": "https://www.example.com/DispatchAPI",
    "failCallTo": "PJSIP/1000@trunk",
    "welcomePlayback": "custom/welcome",
    "ttsEngine": "google",
    "daysValid": 7,
    "defaultLanguage": "el",
    "callbackMode": 1,
    "repeatTimes": 10,
    "strictDropoffLocation": false
  }
}
"#;

const JSON_FULL: &str = r#"{
  "1234": {
    "name": "Test Extension",
    "googleApiKey": "env:GOOGLE_API_KEY",
    "clientToken": "env:CLIENT_TOKEN",
    "registerBaseUrl": "https://www.example.com/DispatchAPI",
    "failCallTo": "PJSIP/1000@trunk",
    "welcomePlayback": "custom/welcome",
    "ttsEngine": "google",
    "daysValid": 7,
    "defaultLanguage": "el",
    "callbackMode": 1,
    "repeatTimes": 10,
    "strictDropoffLocation": false,
    "maxRetries": 5,
    "geocodingApiVersion": 1,
    "askForName": true,
    "announceName": true,
    "foreignRedirect": false,
    "bypassWelcome": false
  },
  "4033": {
    "name": "Hermis-Peireas",
    "googleApiKey": "env:GOOGLE_API_KEY",
    "clientToken": "env:CLIENT_TOKEN",
    "registerBaseUrl": "http://79.129.41.206:8080/IQTaxiAPIV3",
    "failCallTo": "PJSIP/2104115200@trunk",
    "welcomePlayback": "custom/welcome-v3",
    "ttsEngine": "edge-tts",
    "daysValid": 30,
    "defaultLanguage": "el",
    "callbackMode": 2,
    "callbackUrl": "http://79.129.41.206/callback.php",
    "repeatTimes": 10,
    "strictDropoffLocation": false,
    "bounds": { "north": 38.1, "south": 37.8, "east": 24.0, "west": 23.5 },
    "centerBias": { "lat": 37.9755, "lng": 23.7348, "radius": 50000.0 },
    "boundsRestrictionMode": 3
  }
}
"#;

const TOML_MINIMAL: &str = r#"# extdir tenants file — one table per PBX extension

[1234]
name = "Test Extension"
googleApiKey = "env:GOOGLE_API_KEY"
clientToken = "env:CLIENT_TOKEN"
registerBaseUrl = "https://www.example.com/DispatchAPI"
failCallTo = "PJSIP/1000@trunk"
welcomePlayback = "custom/welcome"
ttsEngine = "google"
daysValid = 7
defaultLanguage = "el"
callbackMode = 1
repeatTimes = 10
strictDropoffLocation = false
"#;

const TOML_FULL: &str = r#"# extdir tenants file — one table per PBX extension
#
# Secret fields (googleApiKey, clientToken) accept "env:VAR" references,
# resolved from the process environment at load time.

[1234]
name = "Test Extension"
googleApiKey = "env:GOOGLE_API_KEY"
clientToken = "env:CLIENT_TOKEN"
registerBaseUrl = "https://www.example.com/DispatchAPI"
failCallTo = "PJSIP/1000@trunk"
welcomePlayback = "custom/welcome"
ttsEngine = "google"       # google | edge-tts
daysValid = 7              # cached registration validity (days)
defaultLanguage = "el"
callbackMode = 1           # 1 = immediate, 2 = deferred polling
repeatTimes = 10
strictDropoffLocation = false
# maxRetries = 5
# geocodingApiVersion = 1
# askForName = true
# announceName = true

[4033]
name = "Hermis-Peireas"
googleApiKey = "env:GOOGLE_API_KEY"
clientToken = "env:CLIENT_TOKEN"
registerBaseUrl = "http://79.129.41.206:8080/IQTaxiAPIV3"
failCallTo = "PJSIP/2104115200@trunk"
welcomePlayback = "custom/welcome-v3"
ttsEngine = "edge-tts"
daysValid = 30
defaultLanguage = "el"
callbackMode = 2
callbackUrl = "http://79.129.41.206/callback.php"
repeatTimes = 10
strictDropoffLocation = false
# boundsRestrictionMode = 3

# [4033.bounds]
# north = 38.1
# south = 37.8
# east = 24.0
# west = 23.5

# [4033.centerBias]
# lat = 37.9755
# lng = 23.7348
# radius = 50000.0
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::Directory;
    use crate::config::validation::validate;

    #[cfg(feature = "yaml")]
    #[test]
    fn yaml_templates_parse_and_validate() {
        for template in [YAML_MINIMAL, YAML_FULL] {
            let dir: Directory = serde_yml::from_str(template).unwrap();
            validate(&dir).unwrap();
        }
    }

    #[test]
    fn json_templates_parse_and_validate() {
        for template in [JSON_MINIMAL, JSON_FULL] {
            let dir: Directory = serde_json::from_str(template).unwrap();
            validate(&dir).unwrap();
        }
    }

    #[cfg(feature = "toml")]
    #[test]
    fn toml_templates_parse_and_validate() {
        for template in [TOML_MINIMAL, TOML_FULL] {
            let dir: Directory = toml::from_str(template).unwrap();
            validate(&dir).unwrap();
        }
    }
}
