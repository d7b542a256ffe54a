// operators.rs - Operator registry: token -> stack or session operator

use crate::primitives::Primitive;
use std::collections::HashMap;

/// Commands that act on the whole session rather than the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionAction {
    Quit,
    ClearScreen,
    Words,
    Help,
}

impl SessionAction {
    pub const ALL: [SessionAction; 4] = [
        SessionAction::Quit,
        SessionAction::ClearScreen,
        SessionAction::Words,
        SessionAction::Help,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SessionAction::Quit => "quit",
            SessionAction::ClearScreen => "cls",
            SessionAction::Words => "words",
            SessionAction::Help => "help",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            SessionAction::Quit => "Exit interactive mode",
            SessionAction::ClearScreen => "Clear the terminal screen",
            SessionAction::Words => "Print all defined words to the screen",
            SessionAction::Help => "Print information about available operators to the screen",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Stack(Primitive),
    Session(SessionAction),
}

impl Operator {
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Stack(prim) => prim.name(),
            Operator::Session(action) => action.name(),
        }
    }

    /// Arity gate: the stack must hold at least this many values.
    pub fn pops(&self) -> usize {
        match self {
            Operator::Stack(prim) => prim.pops(),
            Operator::Session(_) => 0,
        }
    }

    pub fn pushes(&self) -> usize {
        match self {
            Operator::Stack(prim) => prim.pushes(),
            Operator::Session(_) => 0,
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            Operator::Stack(prim) => prim.help(),
            Operator::Session(action) => action.help(),
        }
    }
}

/// Fixed token table, built once per interpreter.
#[derive(Debug, Clone)]
pub struct Registry {
    operators: Vec<Operator>,
    index: HashMap<&'static str, usize>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        let operators: Vec<Operator> = Primitive::ALL
            .iter()
            .map(|&prim| Operator::Stack(prim))
            .chain(SessionAction::ALL.iter().map(|&action| Operator::Session(action)))
            .collect();
        let index = operators
            .iter()
            .enumerate()
            .map(|(i, op)| (op.name(), i))
            .collect();
        Registry { operators, index }
    }

    pub fn get(&self, token: &str) -> Option<Operator> {
        self.index.get(token).map(|&i| self.operators[i])
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// Operators in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Operator> {
        self.operators.iter()
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}
