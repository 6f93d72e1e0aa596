pub mod commands;
pub mod parser;

pub use parser::{Cli, Commands};

use crate::config::ConfigManager;
use crate::utils::{Result, TutorError};

pub fn execute_command(cli: Cli) -> Result<()> {
    execute_command_with_config(cli, None)
}

pub fn execute_command_with_config(
    cli: Cli,
    test_config: Option<crate::config::Config>,
) -> Result<()> {
    let config = match cli.command {
        Commands::Config(_) | Commands::Completion(_) => None,
        _ => match test_config {
            Some(cfg) => Some(cfg),
            None => Some(
                ConfigManager::load_or_create()
                    .map_err(|e| TutorError::config_error(format!("Failed to load config: {}", e)))?,
            ),
        },
    };

    match cli.command {
        Commands::Import(args) => commands::import::execute(config.unwrap(), args),
        Commands::Export(args) => {
            args.validate()?;
            commands::export::execute(config.unwrap(), args)
        }
        Commands::List(args) => commands::list::execute(config.unwrap(), args),
        Commands::Show(args) => commands::show::execute(config.unwrap(), args),
        Commands::Delete(args) => commands::delete::execute(config.unwrap(), args),
        Commands::Config(args) => commands::config::execute(args),
        Commands::Completion(args) => commands::completion::execute(args),
    }
}
