use crate::cli::commands::common::open_library_locked;
use crate::cli::parser::ImportArgs;
use crate::config::Config;
use crate::core::session::{import_package, scan_package, Package};
use crate::utils::Result;

pub fn execute(config: Config, args: ImportArgs) -> Result<()> {
    let package = Package::read_from(&args.package)?;
    let package_name = args
        .package
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("imported")
        .to_string();

    let discovered = scan_package(&package)?.len();
    let sessions = import_package(&package, &package_name)?;
    let skipped = discovered - sessions.len();

    if args.dry_run {
        println!("Package contains {} session(s):", sessions.len());
        for session in &sessions {
            match &session.group {
                Some(group) => println!("  {}/{}", group, session.name),
                None => println!("  {}", session.name),
            }
        }
        if skipped > 0 {
            println!("⚠ {} session(s) could not be parsed", skipped);
        }
        return Ok(());
    }

    let (mut library, _lock) = open_library_locked(&config)?;

    for session in &sessions {
        let entry = library.save(&session.bundle, &session.name, session.group.as_deref())?;
        println!(
            "✅ Imported '{}' ({} topics) as {}",
            entry.name, entry.topic_count, entry.id
        );
    }
    if skipped > 0 {
        println!("⚠ Skipped {} corrupt session(s)", skipped);
    }

    Ok(())
}
