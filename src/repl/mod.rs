//! Interactive read-analyze-print loop.

pub mod highlighter;
mod history;

use crate::engine::error::SchemeError;
use highlighter::ReplHelper;
use owo_colors::OwoColorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use std::path::PathBuf;
use tracing::{info, warn};

/// Rewrites one line of input and returns the printed form of each datum.
pub fn respond(input: &str) -> Result<Vec<String>, SchemeError> {
    Ok(crate::analyze_source(input, "repl")?
        .iter()
        .map(ToString::to_string)
        .collect())
}

#[tracing::instrument(skip(history_file))]
pub fn start_repl(history_file: Option<PathBuf>) -> anyhow::Result<()> {
    info!("Starting REPL session with rustyline");
    let mut rl = Editor::<ReplHelper, DefaultHistory>::new()?;
    rl.set_helper(Some(ReplHelper::new()));
    let mut line_number = 1;

    let history_path_opt = history::history_path(history_file);
    match history_path_opt {
        Some(ref history_path) => history::load(&mut rl, history_path),
        None => warn!("Could not determine history file path. History will not be saved."),
    }

    loop {
        let prompt = format!("analyze ({})> ", line_number);
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed_input = line.trim();
                if trimmed_input.is_empty() {
                    line_number += 1;
                    continue;
                }

                if let Err(err) = rl.add_history_entry(line.as_str()) {
                    warn!("Failed to add line to history: {}", err);
                }

                if trimmed_input == ".exit" || trimmed_input == "(exit)" {
                    info!("Exiting REPL session via user command.");
                    println!("Exiting.");
                    break;
                }

                match respond(trimmed_input) {
                    Ok(lines) => {
                        for output in lines {
                            println!("{}", output);
                        }
                    }
                    Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                info!("REPL interrupted (Ctrl-C).");
                println!("Interrupted. Type .exit, (exit), or Ctrl-D to exit.");
            }
            Err(ReadlineError::Eof) => {
                info!("REPL EOF detected (Ctrl-D).");
                println!("Exiting.");
                break;
            }
            Err(err) => {
                eprintln!("{} {:?}", "Readline error:".red().bold(), err);
                break;
            }
        }
        line_number += 1;
    }

    if let Some(ref history_path) = history_path_opt {
        history::save(&mut rl, history_path);
    }
    Ok(())
}
