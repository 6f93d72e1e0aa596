use crate::cli::parser::{Cli, CompletionArgs};
use crate::utils::Result;
use clap::CommandFactory;
use clap_complete::generate;

pub fn execute(args: CompletionArgs) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(args.shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
