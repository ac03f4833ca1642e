//! Interactive wizard for step-by-step tenants file generation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use console::style;
use dialoguer::{Confirm, Input, Password, Select};

use crate::cli::{ConfigFormat, InitArgs};
use crate::config::model::{CallbackMode, Directory, ExtensionConfig, TtsEngine};
use crate::config::validation::{validate, validate_url};
use crate::error::ExtdirError;

use super::serialize::serialize_directory;

/// Map a `dialoguer::Error` to an `ExtdirError`.
fn map_prompt_err(e: dialoguer::Error) -> ExtdirError {
    ExtdirError::Io(std::io::Error::other(e.to_string()))
}

pub fn run(args: &InitArgs) -> Result<(), ExtdirError> {
    // Ensure we're running in an interactive terminal
    if !console::Term::stdout().is_term() {
        return Err(ExtdirError::Io(std::io::Error::other(
            "interactive mode requires a terminal (TTY). Use extdir init without -i for non-interactive mode.",
        )));
    }

    println!(
        "\n  {} Tenants Wizard\n  {}\n",
        style("extdir").cyan().bold(),
        style("─────────────────────────").dim()
    );

    // Step 1: Output settings
    println!("  {}\n", style("Step 1: Output").bold());
    let format = prompt_format(args)?;
    let output = prompt_output(args, &format)?;

    // Step 2: Extensions
    println!("\n  {}\n", style("Step 2: Extensions").bold());
    let extensions = prompt_extensions()?;

    let directory = Directory::new(extensions);

    // Validate the assembled directory
    if let Err(errors) = validate(&directory) {
        eprintln!(
            "\n  {} Tenants file has validation errors:",
            style("!").red().bold()
        );
        for e in &errors {
            eprintln!("    {e}");
        }
        return Err(ExtdirError::ConfigValidation { errors });
    }

    // Step 3: Review
    println!("\n  {}\n", style("Step 3: Review").bold());
    print_summary(&directory, &format, &output);

    let confirm = Confirm::new()
        .with_prompt(format!("Write tenants file to {}?", output.display()))
        .default(true)
        .interact()
        .map_err(map_prompt_err)?;

    if !confirm {
        println!("  Aborted.");
        return Ok(());
    }

    // Handle existing file
    if output.exists() {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", output.display()))
            .default(false)
            .interact()
            .map_err(map_prompt_err)?;
        if !overwrite {
            println!("  Aborted.");
            return Ok(());
        }
    }

    let content = serialize_directory(&directory, &format)?;
    std::fs::write(&output, content)?;
    println!(
        "\n  {} Created {}",
        style("✓").green().bold(),
        output.display()
    );
    Ok(())
}

fn prompt_format(args: &InitArgs) -> Result<ConfigFormat, ExtdirError> {
    let formats = &["yaml", "json", "toml"];
    let default_idx = match args.format {
        ConfigFormat::Yaml => 0,
        ConfigFormat::Json => 1,
        ConfigFormat::Toml => 2,
    };

    let selection = Select::new()
        .with_prompt("Tenants file format")
        .items(formats)
        .default(default_idx)
        .interact()
        .map_err(map_prompt_err)?;

    Ok(match selection {
        0 => ConfigFormat::Yaml,
        1 => ConfigFormat::Json,
        2 => ConfigFormat::Toml,
        _ => unreachable!(),
    })
}

fn prompt_output(args: &InitArgs, format: &ConfigFormat) -> Result<PathBuf, ExtdirError> {
    let default_path = args.output.as_ref().map_or_else(
        || format!("extdir.{}", format.extension()),
        |p| p.display().to_string(),
    );

    let path_str: String = Input::new()
        .with_prompt("Output file path")
        .default(default_path)
        .interact_text()
        .map_err(map_prompt_err)?;

    Ok(PathBuf::from(path_str))
}

fn prompt_extensions() -> Result<BTreeMap<String, ExtensionConfig>, ExtdirError> {
    let mut extensions = BTreeMap::new();
    loop {
        if !extensions.is_empty() {
            let add_another = Confirm::new()
                .with_prompt("Add another extension?")
                .default(false)
                .interact()
                .map_err(map_prompt_err)?;
            if !add_another {
                break;
            }
        }
        let idx = extensions.len() + 1;
        println!(
            "\n  {} Extension {} {}",
            style("──").dim(),
            idx,
            style("──").dim()
        );
        let (extension, config) = prompt_single_extension(&extensions)?;
        extensions.insert(extension, config);
    }
    Ok(extensions)
}

fn prompt_single_extension(
    existing: &BTreeMap<String, ExtensionConfig>,
) -> Result<(String, ExtensionConfig), ExtdirError> {
    let extension: String = Input::new()
        .with_prompt("Extension (dial-plan key, e.g. 4033)")
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                return Err("extension cannot be empty".into());
            }
            if existing.contains_key(input.trim()) {
                return Err(format!("extension '{}' is already defined", input.trim()));
            }
            Ok(())
        })
        .interact_text()
        .map_err(map_prompt_err)?;
    let extension = extension.trim().to_string();

    let name: String = Input::new()
        .with_prompt("Tenant name")
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                Err("name cannot be empty".into())
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(map_prompt_err)?;

    let (google_api_key, client_token) = prompt_secrets()?;

    let register_base_url: String = Input::new()
        .with_prompt("Registration API base URL")
        .validate_with(|input: &String| -> Result<(), String> { validate_url(input) })
        .interact_text()
        .map_err(map_prompt_err)?;

    let fail_call_to: String = Input::new()
        .with_prompt("Fallback dial string (e.g. PJSIP/1000@trunk)")
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                Err("dial string cannot be empty".into())
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(map_prompt_err)?;

    let welcome_playback: String = Input::new()
        .with_prompt("Welcome playback resource")
        .default("custom/welcome".into())
        .interact_text()
        .map_err(map_prompt_err)?;

    let engines = &["google", "edge-tts"];
    let engine_idx = Select::new()
        .with_prompt("TTS engine")
        .items(engines)
        .default(0)
        .interact()
        .map_err(map_prompt_err)?;
    let tts_engine = match engine_idx {
        0 => TtsEngine::Google,
        1 => TtsEngine::EdgeTts,
        _ => unreachable!(),
    };

    let days_valid: u32 = Input::new()
        .with_prompt("Registration validity (days)")
        .default(7)
        .validate_with(|input: &u32| -> Result<(), String> {
            if *input == 0 {
                Err("daysValid must be greater than 0".into())
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(map_prompt_err)?;

    let default_language: String = Input::new()
        .with_prompt("Default language code")
        .default("el".into())
        .interact_text()
        .map_err(map_prompt_err)?;

    let modes = &[
        "1 — immediate TTS read-back",
        "2 — deferred callback polling",
    ];
    let mode_idx = Select::new()
        .with_prompt("Callback mode")
        .items(modes)
        .default(0)
        .interact()
        .map_err(map_prompt_err)?;

    let (callback_mode, callback_url) = if mode_idx == 0 {
        (CallbackMode::Immediate, None)
    } else {
        let url: String = Input::new()
            .with_prompt("Callback URL")
            .validate_with(|input: &String| -> Result<(), String> { validate_url(input) })
            .interact_text()
            .map_err(map_prompt_err)?;
        (CallbackMode::Deferred, Some(url))
    };

    let repeat_times: u32 = Input::new()
        .with_prompt("TTS prompt repetitions")
        .default(10)
        .interact_text()
        .map_err(map_prompt_err)?;

    let strict_dropoff_location = Confirm::new()
        .with_prompt("Require precise geocodes for dropoff?")
        .default(false)
        .interact()
        .map_err(map_prompt_err)?;

    let config: ExtensionConfig = serde_json::from_value(serde_json::json!({
        "name": name,
        "googleApiKey": google_api_key,
        "clientToken": client_token,
        "registerBaseUrl": register_base_url,
        "failCallTo": fail_call_to,
        "welcomePlayback": welcome_playback,
        "ttsEngine": tts_engine.as_str(),
        "daysValid": days_valid,
        "defaultLanguage": default_language,
        "callbackMode": callback_mode.as_u8(),
        "callbackUrl": callback_url,
        "repeatTimes": repeat_times,
        "strictDropoffLocation": strict_dropoff_location,
    }))
    .map_err(|e| ExtdirError::Io(std::io::Error::other(e.to_string())))?;

    Ok((extension, config))
}

/// Secrets default to `env:` references so credentials stay out of the
/// file; literal entry falls back to hidden prompts.
fn prompt_secrets() -> Result<(String, String), ExtdirError> {
    let use_env = Confirm::new()
        .with_prompt("Reference secrets from environment variables?")
        .default(true)
        .interact()
        .map_err(map_prompt_err)?;

    if use_env {
        let api_var: String = Input::new()
            .with_prompt("Google API key variable")
            .default("GOOGLE_API_KEY".into())
            .interact_text()
            .map_err(map_prompt_err)?;
        let token_var: String = Input::new()
            .with_prompt("Client token variable")
            .default("CLIENT_TOKEN".into())
            .interact_text()
            .map_err(map_prompt_err)?;
        return Ok((format!("env:{api_var}"), format!("env:{token_var}")));
    }

    let api_key: String = Password::new()
        .with_prompt("Google API key")
        .interact()
        .map_err(map_prompt_err)?;
    let token: String = Password::new()
        .with_prompt("Client token")
        .interact()
        .map_err(map_prompt_err)?;
    Ok((api_key, token))
}

fn print_summary(directory: &Directory, format: &ConfigFormat, output: &Path) {
    println!(
        "  {}",
        style("┌─────────────────────────────────────────────┐").dim()
    );
    println!(
        "  {}  Format:      {:<32}{}",
        style("│").dim(),
        format.extension(),
        style("│").dim()
    );
    println!(
        "  {}  Output:      {:<32}{}",
        style("│").dim(),
        output.display(),
        style("│").dim()
    );
    println!(
        "  {}  Extensions:  {:<32}{}",
        style("│").dim(),
        directory.len(),
        style("│").dim()
    );

    for (extension, config) in directory.iter() {
        let mode = match config.callback_mode {
            CallbackMode::Immediate => "immediate",
            CallbackMode::Deferred => "deferred",
            CallbackMode::Unknown(_) => "unknown",
        };
        println!(
            "  {}    {} \u{2192} {} ({}, {mode})",
            style("│").dim(),
            extension,
            config.name,
            config.tts_engine,
        );
    }

    println!(
        "  {}\n",
        style("└─────────────────────────────────────────────┘").dim()
    );
}
