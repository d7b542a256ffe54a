// main.rs - clacker command line: one-shot programs or an interactive REPL

use anyhow::{Context, Result};
use clacker::{Control, Interpreter};
use clap::Parser;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const HISTORY_FILE: &str = ".clacker_history";

#[derive(Debug, Parser)]
#[command(
    name = "clacker",
    version,
    disable_version_flag = true,
    about = "Reverse polish notation (RPN) calculator"
)]
struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,

    /// Show information about available operators and exit
    #[arg(short = 'c', long = "calc-help")]
    calc_help: bool,

    /// Do not display stack counter in interactive mode
    #[arg(short = 'n', long = "no-counter")]
    no_counter: bool,

    /// File of word definitions, one per line: the word, then its body
    /// (ex. `sqrt 0.5 ^`). Reads from standard in if '-'
    #[arg(short = 'w', long = "words-file", env = "CLACKER_WORDS", value_name = "PATH")]
    words_file: Option<PathBuf>,

    /// Program to run instead of entering interactive mode, with statements
    /// separated by a space
    program: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CLACKER_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut interpreter = Interpreter::new();

    if let Some(path) = &cli.words_file {
        let clean = load_words(&mut interpreter, path)?;
        if !clean {
            eprintln!("Run `help` to see list of operators that cannot be redefined");
        }
    }

    if cli.calc_help {
        interpreter.parse_input("help")?;
        return Ok(());
    }

    if let Some(program) = &cli.program {
        interpreter.parse_input(program)?;
        return Ok(());
    }

    interactive(&mut interpreter, !cli.no_counter)
}

fn load_words(interpreter: &mut Interpreter, path: &Path) -> Result<bool> {
    if path == Path::new("-") {
        let lines = io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<String>>>()
            .context("Failed to read words from standard input")?;
        return Ok(interpreter.parse_words_file(lines));
    }
    interpreter
        .load_words_file(path)
        .with_context(|| format!("Failed to read words file {}", path.display()))
}

fn interactive(interpreter: &mut Interpreter, display_counter: bool) -> Result<()> {
    // Create readline editor with history
    let mut rl = DefaultEditor::new()?;
    let history_file = dirs::home_dir().map(|mut p| {
        p.push(HISTORY_FILE);
        p
    });

    if let Some(ref path) = history_file {
        let _ = rl.load_history(path);
    }

    loop {
        let prompt = if display_counter {
            format!(" {} > ", interpreter.stack.len())
        } else {
            " > ".to_string()
        };

        match rl.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                if interpreter.parse_input(&line)? == Control::Quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Some(ref path) = history_file {
        let _ = rl.save_history(path);
    }

    Ok(())
}
