use crate::cli::parser::{ConfigArgs, ConfigCommands};
use crate::config::ConfigManager;
use crate::utils::{Result, TutorError};
use std::process::Command;

pub fn execute(args: ConfigArgs) -> Result<()> {
    match args.command {
        Some(ConfigCommands::Show) | None => execute_show(),
        Some(ConfigCommands::Path) => execute_path(),
        Some(ConfigCommands::Edit) => execute_edit(),
        Some(ConfigCommands::Reset) => execute_reset(),
    }
}

fn execute_show() -> Result<()> {
    match ConfigManager::load_or_create() {
        Ok(config) => {
            let json = serde_json::to_string_pretty(&config)
                .map_err(|e| TutorError::config_error(format!("Failed to render config: {e}")))?;
            println!("{}", json);
            Ok(())
        }
        Err(e) => Err(TutorError::config_error(format!(
            "Failed to load configuration: {e}"
        ))),
    }
}

fn execute_path() -> Result<()> {
    let config_path = ConfigManager::get_config_path()
        .map_err(|e| TutorError::config_error(format!("Failed to get config path: {e}")))?;
    println!("{}", config_path);
    Ok(())
}

fn execute_edit() -> Result<()> {
    let config_path = ConfigManager::get_config_path()
        .map_err(|e| TutorError::config_error(format!("Failed to get config path: {e}")))?;

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    let status = Command::new(&editor)
        .arg(&config_path)
        .status()
        .map_err(|e| TutorError::config_error(format!("Failed to launch editor: {e}")))?;

    if !status.success() {
        return Err(TutorError::config_error(format!(
            "Editor exited with non-zero status: {}",
            status.code().unwrap_or(-1)
        )));
    }

    println!("✅ Configuration file edited successfully");
    Ok(())
}

fn is_non_interactive() -> bool {
    std::env::var("TUTOR_NON_INTERACTIVE").is_ok() || std::env::var("CI").is_ok()
}

fn execute_reset() -> Result<()> {
    use dialoguer::{theme::ColorfulTheme, Confirm};

    if is_non_interactive() {
        return Err(TutorError::invalid_args(
            "Cannot reset configuration in non-interactive mode. Run interactively to confirm reset."
        ));
    }

    if !Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(
            "Are you sure you want to reset configuration to defaults? This cannot be undone.",
        )
        .default(false)
        .interact()
        .map_err(|e| TutorError::config_error(format!("Failed to read input: {e}")))?
    {
        println!("❌ Configuration reset cancelled");
        return Ok(());
    }

    let default_config = crate::config::defaults::default_config();
    ConfigManager::save(&default_config).map_err(|e| {
        TutorError::config_error(format!("Failed to save default configuration: {e}"))
    })?;

    println!("✅ Configuration reset to defaults successfully");
    Ok(())
}
