pub mod value;
pub mod primitives;
pub mod lexer;
pub mod dictionary;
pub mod operators;
pub mod help;
pub mod interpreter;

pub use interpreter::{Control, Interpreter};
pub use primitives::{CalcError, Stack};
pub use value::Value;
