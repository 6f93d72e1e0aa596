use crate::cli::commands::common::{format_timestamp, open_library};
use crate::cli::parser::ShowArgs;
use crate::config::Config;
use crate::core::session::PlaygroundKind;
use crate::utils::Result;

pub fn execute(config: Config, args: ShowArgs) -> Result<()> {
    let library = open_library(&config);
    let bundle = library.load(&args.id)?;

    let entry = library
        .entries()?
        .into_iter()
        .find(|entry| entry.id == args.id);

    match entry {
        Some(entry) => {
            println!("Session: {}", entry.name);
            if let Some(group) = &entry.group {
                println!("  Group: {}", group);
            }
            println!("  Saved: {}", format_timestamp(entry.timestamp));
        }
        None => println!("Session: {} (not indexed)", args.id),
    }

    println!("  Model: {}", bundle.model);
    println!("  Theme: {:?}", bundle.theme);
    println!("  Chat messages: {}", bundle.chat_history.len());

    if let Some(syllabus) = &bundle.syllabus {
        println!(
            "  Syllabus: {} ({}), {} concept(s)",
            syllabus.topic,
            syllabus.level,
            syllabus.concepts.len()
        );
    }

    if !bundle.whiteboards.is_empty() {
        println!("  Whiteboards:");
        for whiteboard in &bundle.whiteboards {
            println!("    • {}", whiteboard.topic);
        }
    }

    if !bundle.playgrounds.is_empty() {
        println!("  Playgrounds:");
        for playground in &bundle.playgrounds {
            let marker = match playground.kind {
                PlaygroundKind::Practice => "practice",
                PlaygroundKind::Assessment => "assessment",
            };
            println!("    • {} [{}]", playground.description, marker);
        }
    }

    Ok(())
}
