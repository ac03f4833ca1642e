//! `extdir lookup` — resolve one extension from a local tenants file.
//!
//! Runs the same load pipeline as the server (parse, secret
//! resolution, validation), then performs a single exact-match lookup.
//! Text output masks credential fields unless `--reveal` is given;
//! `--json` prints the full record for scripting.

use crate::cli::LookupArgs;
use crate::config::model::{CallbackMode, ExtensionConfig};
use crate::config::sources::{parse_directory_str, resolve_and_validate};
use crate::error::ExtdirError;

pub fn execute(args: &LookupArgs) -> Result<(), ExtdirError> {
    let path = &args.config;

    if !path.exists() {
        return Err(ExtdirError::ConfigFileNotFound { path: path.clone() });
    }

    let content = std::fs::read_to_string(path)?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let mut directory = parse_directory_str(ext, &content, &path.display().to_string())?;

    resolve_and_validate(&mut directory)?;

    let Some(config) = directory.lookup(&args.extension) else {
        return Err(ExtdirError::ExtensionNotFound {
            extension: args.extension.clone(),
        });
    };

    if args.json {
        let rendered = serde_json::to_string_pretty(config)
            .map_err(|e| ExtdirError::Io(std::io::Error::other(e.to_string())))?;
        println!("{rendered}");
        return Ok(());
    }

    print_record(&args.extension, config, args.reveal);
    Ok(())
}

fn mask(secret: &str) -> String {
    match secret.get(..4) {
        Some(prefix) if secret.len() > 4 => format!("{prefix}\u{2026}"),
        _ => "****".to_string(),
    }
}

fn print_record(extension: &str, config: &ExtensionConfig, reveal: bool) {
    let (api_key, token) = if reveal {
        (config.google_api_key.clone(), config.client_token.clone())
    } else {
        (mask(&config.google_api_key), mask(&config.client_token))
    };

    println!("extension {extension} \u{2014} {}", config.name);
    println!("  googleApiKey:     {api_key}");
    println!("  clientToken:      {token}");
    println!("  registerBaseUrl:  {}", config.register_base_url);
    println!("  failCallTo:       {}", config.fail_call_to);
    println!("  welcomePlayback:  {}", config.welcome_playback);
    println!("  ttsEngine:        {}", config.tts_engine);
    println!("  daysValid:        {}", config.days_valid);
    println!("  defaultLanguage:  {}", config.default_language);

    match config.callback_mode {
        CallbackMode::Immediate => println!("  callbackMode:     1 (immediate)"),
        CallbackMode::Deferred => {
            println!(
                "  callbackMode:     2 (deferred \u{2192} {})",
                config.callback_url.as_deref().unwrap_or("none")
            );
        }
        CallbackMode::Unknown(v) => println!("  callbackMode:     {v} (unknown)"),
    }

    println!("  repeatTimes:      {}", config.repeat_times);
    println!("  maxRetries:       {}", config.max_retries);
    println!("  strictDropoff:    {}", config.strict_dropoff_location);
    println!("  geocoding:        v{}", config.geocoding_api_version);
    if config.use_geocoding_proxy {
        println!(
            "  geocodingProxy:   {}",
            config.geocoding_proxy_base_url.as_deref().unwrap_or("none")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::mask;

    #[test]
    fn mask_keeps_a_short_prefix() {
        assert_eq!(mask("AIzaSyDtMW5sRWQ2Is"), "AIza\u{2026}");
    }

    #[test]
    fn mask_hides_short_secrets_entirely() {
        assert_eq!(mask("abc"), "****");
        assert_eq!(mask(""), "****");
    }
}
