// interpreter.rs - Token interpreter: literals, operators and word expansion

use crate::dictionary::Dictionary;
use crate::help;
use crate::lexer::{self, Lexer, DEFINE};
use crate::operators::{Operator, Registry, SessionAction};
use crate::primitives::{CalcError, Effect, Stack};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, trace, warn};

/// What the driver loop should do after a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Runs statements against one stack and one word table.
///
/// `parse_length` and `current` track where in the top-level statement the
/// interpreter is. Word bodies advance the same cursor as the statement
/// itself, so a literal pushed from deep inside an expansion still knows
/// whether it landed on the statement's last position, which is the only
/// time pushing a literal echoes the stack.
pub struct Interpreter {
    pub stack: Stack,
    pub dictionary: Dictionary,
    registry: Registry,
    parse_length: usize,
    current: usize,
    out: Box<dyn Write>,
    err: Box<dyn Write>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Empty stack, standard operators, `sqrt` and `pi` predefined,
    /// writing to stdout/stderr.
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub fn with_output(out: Box<dyn Write>, err: Box<dyn Write>) -> Self {
        Interpreter {
            stack: Stack::new(),
            dictionary: Dictionary::with_builtins(),
            registry: Registry::new(),
            parse_length: 0,
            current: 0,
            out,
            err,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn parse_length(&self) -> usize {
        self.parse_length
    }

    pub fn current(&self) -> usize {
        self.current
    }

    // ========================================================================
    // WORD DEFINITIONS
    // ========================================================================

    /// Apply `= name body...`; reports and returns `false` on a reserved name.
    pub fn add_word<S: AsRef<str>>(&mut self, definition: &[S]) -> bool {
        let registry = &self.registry;
        match self
            .dictionary
            .define(definition, |name| registry.contains(name))
        {
            Ok(()) => true,
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    /// Load one definition per line (`name body...`).
    ///
    /// Every line is attempted; the result is `false` if any was rejected.
    pub fn parse_words_file<I, S>(&mut self, lines: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut good_adds = true;
        for line in lines {
            let mut definition = vec![DEFINE];
            definition.extend(line.as_ref().trim().split(' '));
            if !self.add_word(definition.as_slice()) {
                good_adds = false;
            }
        }
        good_adds
    }

    pub fn load_words_file(&mut self, path: &Path) -> Result<bool, CalcError> {
        let contents = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading words file");
        Ok(self.parse_words_file(contents.lines()))
    }

    // ========================================================================
    // EVALUATION
    // ========================================================================

    /// Process one statement.
    ///
    /// Domain errors are written to the error sink and evaluation carries on
    /// with the next token; only a failing output sink is returned as an
    /// error. `quit` stops the statement and returns `Control::Quit`.
    pub fn parse_input(&mut self, input: &str) -> Result<Control, CalcError> {
        let tokens = Lexer::new(input).tokenize();
        self.parse_length = tokens.len();
        self.current = 0;

        for token in &tokens {
            if *token == DEFINE {
                // The definition starts at the cursor, which word expansion
                // may have carried past the `=` itself
                let definition = tokens.get(self.current..).unwrap_or(&[]);
                self.add_word(definition);
                return Ok(Control::Continue);
            }
            if self.parse_token(token)? == Control::Quit {
                return Ok(Control::Quit);
            }
            self.current += 1;
        }
        self.out.flush()?;
        Ok(Control::Continue)
    }

    fn parse_token(&mut self, token: &str) -> Result<Control, CalcError> {
        trace!(token, current = self.current, length = self.parse_length, "token");
        if self.dictionary.contains(token) {
            return self.expand_word(token);
        }
        if let Some(value) = lexer::parse_number(token) {
            self.stack.push(value);
            if self.current + 1 == self.parse_length {
                self.render(Effect::Display)?;
            }
            return Ok(Control::Continue);
        }
        self.execute(token)
    }

    // Recursion is unbounded: a word that refers to itself never returns.
    fn expand_word(&mut self, word: &str) -> Result<Control, CalcError> {
        let body = match self.dictionary.get(word) {
            Some(body) => body.to_vec(),
            None => return Ok(Control::Continue),
        };
        for token in &body {
            if self.parse_token(token)? == Control::Quit {
                return Ok(Control::Quit);
            }
            self.current += 1;
        }
        Ok(Control::Continue)
    }

    fn execute(&mut self, token: &str) -> Result<Control, CalcError> {
        let operator = match self.registry.get(token) {
            Some(operator) => operator,
            None => {
                debug!(token, "unknown token ignored");
                return Ok(Control::Continue);
            }
        };
        if self.stack.len() < operator.pops() {
            debug!(token, depth = self.stack.len(), pops = operator.pops(), "operator skipped");
            return Ok(Control::Continue);
        }

        match operator {
            Operator::Stack(prim) => {
                match self.stack.execute_primitive(prim) {
                    Ok(effect) => self.render(effect)?,
                    Err(e) => self.report(&e),
                }
                Ok(Control::Continue)
            }
            Operator::Session(action) => self.execute_session(action),
        }
    }

    fn execute_session(&mut self, action: SessionAction) -> Result<Control, CalcError> {
        match action {
            SessionAction::Quit => return Ok(Control::Quit),
            SessionAction::ClearScreen => {
                if let Err(e) = help::clear_screen() {
                    warn!(error = %e, "could not clear the screen");
                }
            }
            SessionAction::Words => help::write_words(&mut *self.out, &self.dictionary)?,
            SessionAction::Help => {
                help::write_help(&mut *self.out, &self.registry, help::terminal_width())?
            }
        }
        Ok(Control::Continue)
    }

    // ========================================================================
    // OUTPUT
    // ========================================================================

    fn render(&mut self, effect: Effect) -> Result<(), CalcError> {
        match effect {
            Effect::None => {}
            Effect::Display => writeln!(self.out, "{}", self.stack)?,
            Effect::Cleared(count) => writeln!(self.out, "cleared {} values", count)?,
        }
        Ok(())
    }

    fn report(&mut self, err: &CalcError) {
        if let Err(e) = writeln!(self.err, "{}", err) {
            warn!(error = %e, diagnostic = %err, "could not write diagnostic");
        }
    }
}
