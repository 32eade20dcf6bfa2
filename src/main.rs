//! The Mirror - CLI Entry Point
//!
//! Three commands:
//!   mirror-engine generate <profile.json> [short-code]
//!   mirror-engine show <short-code>
//!   mirror-engine settings [<key> <value>]

use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use mirror_core::streaming::GenerationEvent;
use mirror_core::Profile;
use mirror_engine::{AppError, AppResult, AppState, ReportView, SettingsUpdate};

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  mirror-engine generate <profile.json> [short-code]");
    eprintln!("  mirror-engine show <short-code>");
    eprintln!("  mirror-engine settings [<key> <value>]");
    eprintln!();
    eprintln!("Settings keys: api-key, model, base-url, temperature, max-tokens, language");
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let result = match args.first().map(String::as_str) {
        Some("generate") if args.len() >= 2 => {
            generate(&args[1], args.get(2).cloned()).await
        }
        Some("show") if args.len() == 2 => show(&args[1]).await,
        Some("settings") if args.len() == 1 => settings(None).await,
        Some("settings") if args.len() == 3 => settings(Some((&args[1], &args[2]))).await,
        _ => {
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

async fn generate(profile_path: &str, short_code: Option<String>) -> AppResult<()> {
    let content = std::fs::read_to_string(profile_path)?;
    let profile: Profile = serde_json::from_str(&content)?;

    let state = AppState::new();
    state.initialize().await?;

    let generation = state.generation().await?;
    let mut handle = generation.start_generation(profile, short_code).await?;

    println!("Report: {}", handle.short_code);

    while let Some(event) = handle.events.recv().await {
        match event {
            GenerationEvent::Snapshot { chars, .. } => {
                eprint!("\rstreaming... {} chars", chars);
            }
            GenerationEvent::Completed { sections, .. } => {
                eprintln!();
                println!("\n【镜像投射】\n{}", sections.mirror);
                println!("\n【病灶溯源】\n{}", sections.origin);
                println!("\n【宿命终局】\n{}", sections.fatal_simulation);
            }
            GenerationEvent::PersistFailed {
                message, sections, ..
            } => {
                eprintln!();
                eprintln!("warning: generation succeeded but was not saved: {}", message);
                println!("\n【镜像投射】\n{}", sections.mirror);
                println!("\n【病灶溯源】\n{}", sections.origin);
                println!("\n【宿命终局】\n{}", sections.fatal_simulation);
            }
            GenerationEvent::Failed { message } => {
                eprintln!();
                return Err(AppError::internal(format!(
                    "generation failed: {}",
                    message
                )));
            }
        }
    }

    Ok(())
}

async fn show(short_code: &str) -> AppResult<()> {
    let state = AppState::new();
    state.initialize().await?;

    let reports = state.reports().await?;
    let view: ReportView = reports.get_view(short_code).await?;

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

async fn settings(update: Option<(&str, &str)>) -> AppResult<()> {
    let state = AppState::new();
    state.initialize().await?;

    let config = match update {
        Some((key, value)) => state.update_config(parse_settings_update(key, value)?).await?,
        None => state.get_config().await?,
    };

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Turn a `<key> <value>` pair into a partial settings update.
fn parse_settings_update(key: &str, value: &str) -> AppResult<SettingsUpdate> {
    let mut update = SettingsUpdate::default();
    match key {
        "api-key" => update.api_key = Some(value.to_string()),
        "model" => update.model = Some(value.to_string()),
        "base-url" => update.base_url = Some(value.to_string()),
        "temperature" => {
            update.temperature = Some(value.parse().map_err(|_| {
                AppError::validation(format!("temperature must be a number, got '{}'", value))
            })?);
        }
        "max-tokens" => {
            update.max_tokens = Some(value.parse().map_err(|_| {
                AppError::validation(format!("max-tokens must be an integer, got '{}'", value))
            })?);
        }
        "language" => update.language = Some(value.to_string()),
        other => {
            return Err(AppError::validation(format!(
                "unknown settings key '{}'",
                other
            )));
        }
    }
    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_settings_update_known_keys() {
        let update = parse_settings_update("model", "gpt-4o-mini").unwrap();
        assert_eq!(update.model.as_deref(), Some("gpt-4o-mini"));

        let update = parse_settings_update("temperature", "0.5").unwrap();
        assert_eq!(update.temperature, Some(0.5));

        let update = parse_settings_update("max-tokens", "2048").unwrap();
        assert_eq!(update.max_tokens, Some(2048));
    }

    #[test]
    fn test_parse_settings_update_rejects_bad_input() {
        assert!(parse_settings_update("temperature", "hot").is_err());
        assert!(parse_settings_update("max-tokens", "-1").is_err());
        assert!(parse_settings_update("theme", "dark").is_err());
    }
}
