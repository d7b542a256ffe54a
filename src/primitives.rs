// primitives.rs - The calculator stack and the built-in stack operators
// Every operator here only touches the stack; session-level commands live in operators.rs

use crate::value::Value;
use std::fmt;
use thiserror::Error;

// ============================================================================
// STACK
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct Stack {
    data: Vec<Value>,
    stash: Option<Value>,
}

impl Stack {
    pub fn new() -> Self {
        Stack {
            data: Vec::with_capacity(64),
            stash: None,
        }
    }

    /// Push a value, collapsing integral floats to ints.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.data.push(value.into().normalize());
    }

    pub fn push_all(&mut self, values: &[Value]) {
        for &value in values {
            self.push(value);
        }
    }

    pub fn pop(&mut self) -> Result<Value, CalcError> {
        self.data.pop().ok_or(CalcError::Underflow)
    }

    /// Remove the value at `index` (0 = bottom of stack)
    pub fn pop_at(&mut self, index: usize) -> Result<Value, CalcError> {
        if index >= self.data.len() {
            return Err(CalcError::Underflow);
        }
        Ok(self.data.remove(index))
    }

    pub fn peek(&self) -> Result<Value, CalcError> {
        self.data.last().copied().ok_or(CalcError::Underflow)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Empty the stack, returning how many values were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.data.len();
        self.data.clear();
        count
    }

    /// Get a value at the given index (0 = bottom of stack)
    pub fn get(&self, index: usize) -> Option<Value> {
        self.data.get(index).copied()
    }

    /// Iterate over stack values from bottom to top
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.data.iter()
    }

    pub fn stashed(&self) -> Option<Value> {
        self.stash
    }
}

/// Values space-joined, bottom first.
impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, value) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

// ============================================================================
// ERROR TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Stack underflow")]
    Underflow,
    #[error("Cannot divide by 0")]
    DivideByZero,
    #[error("Negative number cannot be raised to non-integer power")]
    NegativeBaseFractionalPower,
    #[error("0 Cannot be raised to a negative power")]
    ZeroNegativePower,
    #[error("Cannot take the factorial of non-integer number")]
    FactorialNonInteger,
    #[error("Cannot take the factorial of negative number")]
    FactorialNegative,
    #[error("Precision must be an integer")]
    NonIntegerPrecision,
    #[error("Cannot take logarithm of non-positive number")]
    NonPositiveLogarithm,
    #[error("Nothing has been stashed")]
    EmptyStash,
    #[error("Cannot redefine: {0}")]
    Redefinition(String),
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for CalcError {
    fn from(err: std::io::Error) -> Self {
        CalcError::Io(err.to_string())
    }
}

/// What the caller should render after a successful operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Display,
    Cleared(usize),
}

// ============================================================================
// PRIMITIVE OPERATIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    // Arithmetic
    Add,        // + ( b a -- b+a )
    Sub,        // - ( b a -- b-a )
    Mul,        // * ( b a -- b*a )
    Div,        // / ( b a -- b/a )
    Pow,        // ^ ( b a -- b^a )
    Mod,        // % ( b a -- b%a )
    Factorial,  // ! ( a -- a! )

    // Angles and trigonometry
    Degrees,    // deg ( rad -- deg )
    Radians,    // rad ( deg -- rad )
    Sine,       // sin ( rad -- sin )
    Cosine,     // cos ( rad -- cos )

    // Logarithms
    Log,        // log ( a -- log10 a )
    Ln,         // ln ( a -- ln a )

    Round,      // round ( x digits -- x' )

    // Stack manipulation
    Display,    // . ( -- )
    Drop,       // , ( a -- )
    Clear,      // clear ( ... -- )
    Sum,        // sum ( ... -- total )
    Stash,      // stash ( a -- )
    Pull,       // pull ( -- a )
}

impl Primitive {
    pub const ALL: [Primitive; 20] = [
        Primitive::Add,
        Primitive::Sub,
        Primitive::Mul,
        Primitive::Div,
        Primitive::Pow,
        Primitive::Mod,
        Primitive::Factorial,
        Primitive::Degrees,
        Primitive::Radians,
        Primitive::Sine,
        Primitive::Cosine,
        Primitive::Log,
        Primitive::Ln,
        Primitive::Round,
        Primitive::Display,
        Primitive::Drop,
        Primitive::Clear,
        Primitive::Sum,
        Primitive::Stash,
        Primitive::Pull,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Add => "+",
            Primitive::Sub => "-",
            Primitive::Mul => "*",
            Primitive::Div => "/",
            Primitive::Pow => "^",
            Primitive::Mod => "%",
            Primitive::Factorial => "!",
            Primitive::Degrees => "deg",
            Primitive::Radians => "rad",
            Primitive::Sine => "sin",
            Primitive::Cosine => "cos",
            Primitive::Log => "log",
            Primitive::Ln => "ln",
            Primitive::Round => "round",
            Primitive::Display => ".",
            Primitive::Drop => ",",
            Primitive::Clear => "clear",
            Primitive::Sum => "sum",
            Primitive::Stash => "stash",
            Primitive::Pull => "pull",
        }
    }

    /// Values the stack must hold before the operator may run.
    pub fn pops(&self) -> usize {
        match self {
            Primitive::Add
            | Primitive::Sub
            | Primitive::Mul
            | Primitive::Div
            | Primitive::Pow
            | Primitive::Mod
            | Primitive::Round => 2,
            Primitive::Factorial
            | Primitive::Degrees
            | Primitive::Radians
            | Primitive::Sine
            | Primitive::Cosine
            | Primitive::Log
            | Primitive::Ln
            | Primitive::Drop
            | Primitive::Stash => 1,
            Primitive::Display | Primitive::Clear | Primitive::Sum | Primitive::Pull => 0,
        }
    }

    /// Informational only; never checked.
    pub fn pushes(&self) -> usize {
        match self {
            Primitive::Display
            | Primitive::Drop
            | Primitive::Clear
            | Primitive::Stash => 0,
            _ => 1,
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            Primitive::Add => "Pop 'a', 'b'; push the result of 'a' + 'b'",
            Primitive::Sub => "Pop 'a', 'b'; push the result of 'b' - 'a'",
            Primitive::Mul => "Pop 'a', 'b'; push the result of 'a' * 'b'",
            Primitive::Div => "Pop 'a', 'b'; push the result of 'b' / 'a'",
            Primitive::Pow => "Pop 'a', 'b'; push the result of raising 'b' to the power 'a'",
            Primitive::Mod => "Pop 'a', 'b'; push the remainder of 'b' / 'a'",
            Primitive::Factorial => "Pop 'a'; push the factorial of 'a'",
            Primitive::Degrees => {
                "Pop 'a'; push the result of converting 'a' from radians to degrees"
            }
            Primitive::Radians => {
                "Pop 'a'; push the result of converting 'a' from degrees to radians"
            }
            Primitive::Sine => "Pop 'a'; push the sine of 'a'",
            Primitive::Cosine => "Pop 'a'; push the cosine of 'a'",
            Primitive::Log => "Pop 'a'; push the logarithm base 10 of 'a'",
            Primitive::Ln => "Pop 'a'; push the natural logarithm of 'a'",
            Primitive::Round => {
                "Pop 'a', 'b'; push the result of rounding 'b' to 'a' number of decimal places"
            }
            Primitive::Display => "Print values from the stack",
            Primitive::Drop => "Pop 'a'; do not push anything",
            Primitive::Clear => "Pop the entire stack",
            Primitive::Sum => {
                "Pop all values from the stack; push the result of summing all values"
            }
            Primitive::Stash => "Pop 'a'; stash 'a'",
            Primitive::Pull => "Push the value currently stored in the stash",
        }
    }
}

impl Stack {
    /// Run `prim` against the stack.
    ///
    /// On a domain error the operands listed for that operator have already
    /// been pushed back when the error is returned. The arity gate is the
    /// caller's job; called on a short stack this reports `Underflow`.
    pub fn execute_primitive(&mut self, prim: Primitive) -> Result<Effect, CalcError> {
        match prim {
            // Arithmetic
            Primitive::Add => self.op_add(),
            Primitive::Sub => self.op_sub(),
            Primitive::Mul => self.op_mul(),
            Primitive::Div => self.op_div(),
            Primitive::Pow => self.op_pow(),
            Primitive::Mod => self.op_mod(),
            Primitive::Factorial => self.op_factorial(),

            // Angles and trigonometry
            Primitive::Degrees => self.op_unary(f64::to_degrees),
            Primitive::Radians => self.op_unary(f64::to_radians),
            Primitive::Sine => self.op_unary(f64::sin),
            Primitive::Cosine => self.op_unary(f64::cos),

            // Logarithms
            Primitive::Log => self.op_log(f64::log10),
            Primitive::Ln => self.op_log(f64::ln),

            Primitive::Round => self.op_round(),

            // Stack manipulation
            Primitive::Display => Ok(Effect::Display),
            Primitive::Drop => self.op_drop(),
            Primitive::Clear => Ok(Effect::Cleared(self.clear())),
            Primitive::Sum => self.op_sum(),
            Primitive::Stash => self.op_stash(),
            Primitive::Pull => self.op_pull(),
        }
    }

    /// Push `values` back and report `err`.
    fn fail(&mut self, err: CalcError, values: &[Value]) -> Result<Effect, CalcError> {
        self.push_all(values);
        Err(err)
    }

    // ========================================================================
    // ARITHMETIC
    // ========================================================================

    fn op_add(&mut self) -> Result<Effect, CalcError> {
        let a = self.pop()?;
        let b = self.pop()?;
        self.push(a.add(b));
        Ok(Effect::Display)
    }

    fn op_sub(&mut self) -> Result<Effect, CalcError> {
        let a = self.pop()?;
        let b = self.pop()?;
        self.push(b.sub(a));
        Ok(Effect::Display)
    }

    fn op_mul(&mut self) -> Result<Effect, CalcError> {
        let a = self.pop()?;
        let b = self.pop()?;
        self.push(a.mul(b));
        Ok(Effect::Display)
    }

    fn op_div(&mut self) -> Result<Effect, CalcError> {
        let divisor = self.pop()?;
        if divisor.is_zero() {
            // The dividend is never popped
            return self.fail(CalcError::DivideByZero, &[divisor]);
        }
        let dividend = self.pop()?;
        self.push(dividend.div(divisor));
        Ok(Effect::Display)
    }

    fn op_pow(&mut self) -> Result<Effect, CalcError> {
        let exponent = self.pop()?;
        let base = self.pop()?;
        if !exponent.is_integral() && base.is_negative() {
            return self.fail(CalcError::NegativeBaseFractionalPower, &[base, exponent]);
        }
        if exponent.is_negative() && base.is_zero() {
            return self.fail(CalcError::ZeroNegativePower, &[]);
        }
        self.push(base.pow(exponent));
        Ok(Effect::Display)
    }

    fn op_mod(&mut self) -> Result<Effect, CalcError> {
        let divisor = self.pop()?;
        if divisor.trunc() == 0 {
            return self.fail(CalcError::DivideByZero, &[divisor]);
        }
        let dividend = self.pop()?;
        self.push(dividend.rem(divisor));
        Ok(Effect::Display)
    }

    fn op_factorial(&mut self) -> Result<Effect, CalcError> {
        let x = self.pop()?;
        match x {
            Value::Float(_) => self.fail(CalcError::FactorialNonInteger, &[x]),
            Value::Int(n) if n < 0 => self.fail(CalcError::FactorialNegative, &[x]),
            Value::Int(n) => {
                self.push(Value::factorial(n));
                Ok(Effect::Display)
            }
        }
    }

    fn op_unary(&mut self, f: fn(f64) -> f64) -> Result<Effect, CalcError> {
        let x = self.pop()?;
        self.push(f(x.as_f64()));
        Ok(Effect::Display)
    }

    fn op_log(&mut self, f: fn(f64) -> f64) -> Result<Effect, CalcError> {
        let x = self.pop()?;
        if x.as_f64() <= 0.0 {
            return self.fail(CalcError::NonPositiveLogarithm, &[x]);
        }
        self.push(f(x.as_f64()));
        Ok(Effect::Display)
    }

    fn op_round(&mut self) -> Result<Effect, CalcError> {
        let precision = self.pop()?;
        if !precision.is_integral() {
            // The precision stays consumed
            return self.fail(CalcError::NonIntegerPrecision, &[]);
        }
        let x = self.pop()?;
        self.push(x.round_to(precision.trunc()));
        Ok(Effect::Display)
    }

    // ========================================================================
    // STACK MANIPULATION
    // ========================================================================

    fn op_drop(&mut self) -> Result<Effect, CalcError> {
        self.pop()?;
        Ok(Effect::Display)
    }

    fn op_sum(&mut self) -> Result<Effect, CalcError> {
        let total = self
            .data
            .drain(..)
            .fold(Value::Int(0), |acc, value| acc.add(value));
        self.push(total);
        Ok(Effect::Display)
    }

    fn op_stash(&mut self) -> Result<Effect, CalcError> {
        self.stash = Some(self.pop()?);
        Ok(Effect::None)
    }

    fn op_pull(&mut self) -> Result<Effect, CalcError> {
        let value = self.stash.ok_or(CalcError::EmptyStash)?;
        self.push(value);
        Ok(Effect::Display)
    }
}
