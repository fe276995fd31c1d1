use std::env;

use anyhow::Result;

use crate::store::AppFlavor;

/// Handle the process arguments.
/// Returns the app flavor to run, or `None` when the invocation was fully
/// handled here (help or version output).
pub fn handle_cli() -> Result<Option<AppFlavor>> {
    let args: Vec<String> = env::args().collect();

    // No arguments: run the notes board
    if args.len() < 2 {
        return Ok(Some(AppFlavor::Notes));
    }

    match args[1].as_str() {
        "notes" => Ok(Some(AppFlavor::Notes)),
        "tasks" => Ok(Some(AppFlavor::Tasks)),
        "--help" | "-h" => {
            print_help();
            Ok(None)
        }
        "--version" | "-V" | "-v" => {
            print_version();
            Ok(None)
        }
        other => {
            eprintln!("Unknown mode: {}", other);
            eprintln!("Use 'rbd --help' for usage");
            std::process::exit(1);
        }
    }
}

fn print_help() {
    println!("Record Board (rbd) - terminal notes and to-do board\n");
    println!("USAGE:");
    println!("  rbd [MODE]\n");
    println!("MODES:");
    println!("  notes       Open the notes board (default)");
    println!("  tasks       Open the to-do board\n");
    println!("OPTIONS:");
    println!("  -h, --help     Show this help");
    println!("  -V, --version  Show version\n");
    println!("KEYS:");
    println!("  a            Add a record");
    println!("  e / Enter    Edit the selected description");
    println!("  d            Delete the selected record");
    println!("  1-4          Sort by id / description / priority / due date");
    println!("  l            Switch the display language");
    println!("  j/k          Move the selection");
    println!("  q            Quit");
}

fn print_version() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const NAME: &str = env!("CARGO_PKG_NAME");
    println!("{} {}", NAME, VERSION);
}
