// dictionary.rs - User-defined words: names that expand to token sequences

use crate::lexer::DEFINE;
use crate::primitives::CalcError;
use tracing::debug;

/// A named macro body.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub name: String,
    pub body: Vec<String>,
}

/// Word table, kept in definition order so `words` lists them the way they
/// were entered. Redefining a word keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: Vec<Word>,
}

impl Dictionary {
    pub fn new() -> Self {
        Dictionary { words: Vec::new() }
    }

    /// The two words every session starts with.
    pub fn with_builtins() -> Self {
        let mut dictionary = Dictionary::new();
        dictionary.insert("sqrt", &["0.5", "^"]);
        dictionary.insert("pi", &["3.141592653589793"]);
        dictionary
    }

    /// Apply a definition statement: `= name body...`.
    ///
    /// `definition[0]` is the `=` marker. Fewer than two tokens is a no-op,
    /// `= name` deletes `name`, anything longer upserts it. Names for which
    /// `is_reserved` holds, single digits and `=` itself are rejected and
    /// leave the table untouched.
    pub fn define<S: AsRef<str>>(
        &mut self,
        definition: &[S],
        is_reserved: impl Fn(&str) -> bool,
    ) -> Result<(), CalcError> {
        let name = match definition.get(1) {
            Some(name) => name.as_ref(),
            None => return Ok(()),
        };
        if definition.len() == 2 {
            self.remove(name);
            return Ok(());
        }
        if is_reserved(name) || is_digit(name) || name == DEFINE {
            return Err(CalcError::Redefinition(name.to_string()));
        }
        let body: Vec<&str> = definition[2..].iter().map(|t| t.as_ref()).collect();
        self.insert(name, &body);
        Ok(())
    }

    pub fn insert(&mut self, name: &str, body: &[&str]) {
        let body: Vec<String> = body.iter().map(|t| t.to_string()).collect();
        debug!(word = name, body = ?body, "defining word");
        match self.words.iter_mut().find(|w| w.name == name) {
            Some(word) => word.body = body,
            None => self.words.push(Word {
                name: name.to_string(),
                body,
            }),
        }
    }

    /// Returns whether the word existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.words.len();
        self.words.retain(|w| w.name != name);
        let removed = self.words.len() != before;
        if removed {
            debug!(word = name, "deleted word");
        }
        removed
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.words
            .iter()
            .find(|w| w.name == name)
            .map(|w| w.body.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }
}

fn is_digit(name: &str) -> bool {
    name.len() == 1 && name.as_bytes()[0].is_ascii_digit()
}
