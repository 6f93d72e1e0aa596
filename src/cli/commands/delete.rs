use crate::cli::commands::common::open_library_locked;
use crate::cli::parser::DeleteArgs;
use crate::config::Config;
use crate::utils::Result;
use dialoguer::Confirm;

pub fn execute(config: Config, args: DeleteArgs) -> Result<()> {
    let (mut library, _lock) = open_library_locked(&config)?;

    let name = library
        .entries()?
        .into_iter()
        .find(|entry| entry.id == args.id)
        .map(|entry| entry.name)
        .unwrap_or_else(|| args.id.clone());

    if !args.force && config.should_confirm_delete() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete session '{}'?", name))
            .default(false)
            .interact()
            .unwrap_or(false);
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    library.delete(&args.id)?;
    println!("✅ Deleted session '{}'", name);
    Ok(())
}
