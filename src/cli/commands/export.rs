use crate::cli::commands::common::open_library;
use crate::cli::parser::ExportArgs;
use crate::config::Config;
use crate::core::session::{package_collection, package_session, NamedSessionBundle};
use crate::utils::names::generate_timestamp;
use crate::utils::{Result, TutorError};
use std::path::PathBuf;

pub fn execute(config: Config, args: ExportArgs) -> Result<()> {
    let library = open_library(&config);
    let entries = library.entries()?;

    let selected = if args.all {
        entries
    } else {
        args.ids
            .iter()
            .map(|id| {
                entries
                    .iter()
                    .find(|entry| &entry.id == id)
                    .cloned()
                    .ok_or_else(|| TutorError::session_not_found(id.clone()))
            })
            .collect::<Result<Vec<_>>>()?
    };

    if selected.is_empty() {
        return Err(TutorError::invalid_args("The library has nothing to export"));
    }

    let package = if !args.all && selected.len() == 1 {
        // A single explicitly chosen session exports flat, at the archive root.
        let bundle = library.load(&selected[0].id)?;
        package_session(&bundle)?
    } else {
        let mut sessions = Vec::with_capacity(selected.len());
        for entry in &selected {
            let bundle = library.load(&entry.id)?;
            sessions.push(NamedSessionBundle {
                name: entry.name.clone(),
                group: entry.group.clone(),
                bundle,
            });
        }
        package_collection(&sessions)?
    };

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("tutor-export-{}.zip", generate_timestamp())));
    package.write_to(&output)?;

    println!(
        "✅ Exported {} session(s) to {}",
        selected.len(),
        output.display()
    );
    Ok(())
}
