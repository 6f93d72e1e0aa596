use crate::utils::{Result, TutorError};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tutor")]
#[command(about = "Local library and portable archives for generated learning sessions")]
#[command(version, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import every session from a package archive into the library
    Import(ImportArgs),
    /// Package saved sessions into a portable archive file
    Export(ExportArgs),
    /// List saved sessions, grouped
    #[command(alias = "ls")]
    List(ListArgs),
    /// Show one saved session in detail
    Show(ShowArgs),
    /// Remove a saved session from the library
    Delete(DeleteArgs),
    /// Manage configuration
    Config(ConfigArgs),
    /// Generate shell completion script
    Completion(CompletionArgs),
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Path to the package archive (.zip)
    pub package: PathBuf,

    /// Only list the sessions the package contains, import nothing
    #[arg(long, help = "List package contents without importing")]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
#[command(after_help = "EXAMPLES:
    # Export one session by id
    tutor export --id 1700000000000_abcdef

    # Export several sessions into one grouped archive
    tutor export --id ID1 --id ID2 -o backup.zip

    # Export the whole library
    tutor export --all")]
pub struct ExportArgs {
    /// Session id to export (repeatable)
    #[arg(long = "id", value_name = "ID")]
    pub ids: Vec<String>,

    /// Export every saved session
    #[arg(long, short = 'a')]
    pub all: bool,

    /// Output archive path (defaults to a timestamped name)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    pub fn validate(&self) -> Result<()> {
        if self.all && !self.ids.is_empty() {
            return Err(TutorError::invalid_args(
                "--all cannot be combined with --id",
            ));
        }
        if !self.all && self.ids.is_empty() {
            return Err(TutorError::invalid_args(
                "Specify at least one --id, or --all",
            ));
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show additional session details
    #[arg(long, short = 'v', help = "Show verbose session information")]
    pub verbose: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Session id
    pub id: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Session id
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short, help = "Skip confirmation prompt")]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Edit configuration file
    Edit,
    /// Reset configuration to defaults
    Reset,
}

#[derive(Args, Debug)]
pub struct CompletionArgs {
    /// Shell to generate completion for
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_export_args_validation() {
        let args = ExportArgs {
            ids: vec![],
            all: false,
            output: None,
        };
        assert!(args.validate().is_err());

        let args = ExportArgs {
            ids: vec!["x".to_string()],
            all: true,
            output: None,
        };
        assert!(args.validate().is_err());

        let args = ExportArgs {
            ids: vec!["x".to_string()],
            all: false,
            output: None,
        };
        assert!(args.validate().is_ok());

        let args = ExportArgs {
            ids: vec![],
            all: true,
            output: None,
        };
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_list_alias() {
        let cli = Cli::try_parse_from(["tutor", "ls"]).unwrap();
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn test_import_parses_package_path() {
        let cli = Cli::try_parse_from(["tutor", "import", "backup.zip", "--dry-run"]).unwrap();
        match cli.command {
            Commands::Import(args) => {
                assert_eq!(args.package, PathBuf::from("backup.zip"));
                assert!(args.dry_run);
            }
            _ => panic!("expected import"),
        }
    }
}
