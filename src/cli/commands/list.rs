use crate::cli::commands::common::{format_timestamp, open_library};
use crate::cli::parser::ListArgs;
use crate::config::Config;
use crate::utils::Result;

pub fn execute(config: Config, args: ListArgs) -> Result<()> {
    let library = open_library(&config);
    let groups = library.group_index()?;

    if groups.is_empty() {
        println!("No saved sessions.");
        return Ok(());
    }

    for (label, entries) in groups {
        println!("{}:", label);
        for entry in entries {
            if args.verbose {
                println!(
                    "  {}  {}  {} topic(s)  saved {}",
                    entry.id,
                    entry.name,
                    entry.topic_count,
                    format_timestamp(entry.timestamp)
                );
            } else {
                println!("  {} ({} topics)", entry.name, entry.topic_count);
            }
        }
    }

    Ok(())
}
