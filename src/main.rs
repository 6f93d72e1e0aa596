use clap::Parser;
use tutor::cli::{execute_command, Cli};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = execute_command(cli) {
        eprintln!("tutor: {}", e);
        std::process::exit(1);
    }
}
