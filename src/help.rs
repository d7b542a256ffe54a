// help.rs - Presentation for the help, words and cls commands

use crate::dictionary::Dictionary;
use crate::operators::Registry;
use std::env;
use std::io::{self, Write};
use std::process;
use terminal_size::{Width, terminal_size};

const PREFIX: &str = "operator: ";
const GAP: usize = 2;
const DEFAULT_WIDTH: usize = 80;
const MIN_TEXT_WIDTH: usize = 20;

/// Terminal width: `COLUMNS` if set, then the attached terminal, then 80.
pub fn terminal_width() -> usize {
    let queried = terminal_size().map(|(Width(cols), _)| usize::from(cols));
    resolve_width(env::var("COLUMNS").ok().as_deref(), queried)
}

/// Pick a width from a `COLUMNS` value and a queried terminal size.
///
/// Unparsable or zero values are skipped.
pub fn resolve_width(columns: Option<&str>, queried: Option<usize>) -> usize {
    columns
        .and_then(|cols| cols.trim().parse::<usize>().ok())
        .filter(|&cols| cols > 0)
        .or(queried.filter(|&cols| cols > 0))
        .unwrap_or(DEFAULT_WIDTH)
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// One entry per operator: `operator: <token>` padded into a column,
/// followed by its help text wrapped to the remaining width.
pub fn write_help(out: &mut dyn Write, registry: &Registry, width: usize) -> io::Result<()> {
    let max_length = registry
        .iter()
        .map(|op| op.name().len())
        .max()
        .unwrap_or(0)
        + PREFIX.len();
    let indent = max_length + GAP;
    let text_width = width.saturating_sub(indent).max(MIN_TEXT_WIDTH);

    for op in registry.iter() {
        let label = format!("{}{}", PREFIX, op.name());
        write!(out, "{:<indent$}", label, indent = indent)?;
        let lines = wrap(op.help(), text_width);
        if lines.is_empty() {
            writeln!(out)?;
        }
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                write!(out, "{:indent$}", "", indent = indent)?;
            }
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

/// `name: body...`, one word per line in definition order.
pub fn write_words(out: &mut dyn Write, dictionary: &Dictionary) -> io::Result<()> {
    for word in dictionary.iter() {
        writeln!(out, "{}: {}", word.name, word.body.join(" "))?;
    }
    Ok(())
}

/// Clear the terminal with the platform's own command.
pub fn clear_screen() -> io::Result<()> {
    let status = if cfg!(windows) {
        process::Command::new("cmd").args(["/C", "cls"]).status()?
    } else {
        process::Command::new("clear").status()?
    };
    if !status.success() {
        tracing::debug!(?status, "screen clear command failed");
    }
    Ok(())
}
