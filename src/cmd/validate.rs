//! `extdir validate` — check a tenants file for errors.
//!
//! Parses the file, resolves `env:` secret references, and runs the
//! exhaustive validator, reporting results in either human-readable
//! text or machine-readable JSON format.

use crate::cli::{ReportFormat, ValidateArgs};
use crate::config::sources::parse_directory_str;
use crate::config::{secrets, validation};
use crate::error::ExtdirError;

pub fn execute(args: &ValidateArgs) -> Result<(), ExtdirError> {
    let path = &args.config;

    if !path.exists() {
        return Err(ExtdirError::ConfigFileNotFound { path: path.clone() });
    }

    let content = std::fs::read_to_string(path)?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let mut directory = parse_directory_str(ext, &content, &path.display().to_string())?;

    let mut errors = secrets::resolve(&mut directory);
    if let Err(validation_errors) = validation::validate(&directory) {
        errors.extend(validation_errors);
    }

    if !errors.is_empty() {
        match args.format {
            ReportFormat::Text => {
                eprintln!("\u{2717} {} has {} errors\n", path.display(), errors.len());
                for error in &errors {
                    eprintln!("{error}");
                }
            }
            ReportFormat::Json => {
                let json_errors: Vec<serde_json::Value> = errors
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "extension": e.extension,
                            "field": e.field,
                            "message": e.message,
                            "suggestion": e.suggestion,
                        })
                    })
                    .collect();
                println!(
                    "{}",
                    serde_json::json!({
                        "valid": false,
                        "errors": json_errors,
                    })
                );
            }
        }
        return Err(ExtdirError::ConfigValidation { errors });
    }

    match args.format {
        ReportFormat::Text => {
            println!(
                "\u{2713} {}",
                validation::format_validation_report(&path.display().to_string(), &directory)
            );
        }
        ReportFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "valid": true,
                    "extensions": directory.len(),
                })
            );
        }
    }

    Ok(())
}
