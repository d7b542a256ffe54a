// lexer.rs - Statement tokenizer and numeric literal parsing

use crate::value::Value;

/// Marker that turns the rest of a statement into a word definition.
pub const DEFINE: &str = "=";

// ============================================================================
// LEXER
// ============================================================================

pub struct Lexer<'a> {
    input: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input }
    }

    /// Split on single spaces after trimming the statement.
    ///
    /// Runs of spaces produce empty tokens, which the interpreter treats like
    /// any other unknown token. An empty statement is one empty token.
    pub fn tokenize(&self) -> Vec<&'a str> {
        self.input.trim().split(' ').collect()
    }
}

// ============================================================================
// NUMBERS
// ============================================================================

/// Parse a numeric literal the way a float parser would.
///
/// Accepts an optional sign, decimal point, exponent, `inf`/`infinity`/`nan`
/// in any case, and `_` separators placed between two digits.
pub fn parse_number(token: &str) -> Option<Value> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    let cleaned;
    let literal = if token.contains('_') {
        cleaned = strip_separators(token)?;
        cleaned.as_str()
    } else {
        token
    };
    literal.parse::<f64>().ok().map(Value::from_f64)
}

fn strip_separators(token: &str) -> Option<String> {
    let chars: Vec<char> = token.chars().collect();
    let mut out = String::with_capacity(chars.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            let prev = i.checked_sub(1).and_then(|p| chars.get(p));
            let next = chars.get(i + 1);
            match (prev, next) {
                (Some(p), Some(n)) if p.is_ascii_digit() && n.is_ascii_digit() => continue,
                _ => return None,
            }
        }
        out.push(c);
    }
    Some(out)
}
