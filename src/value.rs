// value.rs - Calculator numbers: exact integers that spill over into floats

use std::fmt;

// Bounds of the f64 values that convert to i64 without saturating.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// A number on the calculator stack.
///
/// Whether a value is an `Int` or a `Float` is decided when it is built:
/// anything mathematically integral (and small enough for an `i64`) becomes
/// an `Int`, so `4.0` and `4` are the same value and both render as `4`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    /// Collapse a float into an `Int` when its fractional part is zero.
    pub fn from_f64(x: f64) -> Self {
        if x.is_finite() && x.fract() == 0.0 && (I64_LOWER..I64_UPPER).contains(&x) {
            Value::Int(x as i64)
        } else {
            Value::Float(x)
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Value::Int(n) => n as f64,
            Value::Float(x) => x,
        }
    }

    /// True for ints and for finite floats with no fractional part.
    pub fn is_integral(&self) -> bool {
        match *self {
            Value::Int(_) => true,
            Value::Float(x) => x.is_finite() && x.fract() == 0.0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.as_f64() == 0.0
    }

    pub fn is_negative(&self) -> bool {
        self.as_f64() < 0.0
    }

    /// Truncate toward zero, saturating at the `i64` bounds.
    pub fn trunc(&self) -> i64 {
        match *self {
            Value::Int(n) => n,
            Value::Float(x) => x as i64,
        }
    }

    /// Re-apply the integral collapse; used on values built by hand.
    pub fn normalize(self) -> Self {
        match self {
            Value::Float(x) => Value::from_f64(x),
            int => int,
        }
    }

    // ========================================================================
    // ARITHMETIC
    // ========================================================================

    pub fn add(self, rhs: Value) -> Value {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => a
                .checked_add(b)
                .map(Value::Int)
                .unwrap_or_else(|| Value::from_f64(a as f64 + b as f64)),
            (a, b) => Value::from_f64(a.as_f64() + b.as_f64()),
        }
    }

    pub fn sub(self, rhs: Value) -> Value {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => a
                .checked_sub(b)
                .map(Value::Int)
                .unwrap_or_else(|| Value::from_f64(a as f64 - b as f64)),
            (a, b) => Value::from_f64(a.as_f64() - b.as_f64()),
        }
    }

    pub fn mul(self, rhs: Value) -> Value {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) => a
                .checked_mul(b)
                .map(Value::Int)
                .unwrap_or_else(|| Value::from_f64(a as f64 * b as f64)),
            (a, b) => Value::from_f64(a.as_f64() * b.as_f64()),
        }
    }

    /// True division; the caller guards against a zero divisor.
    pub fn div(self, rhs: Value) -> Value {
        Value::from_f64(self.as_f64() / rhs.as_f64())
    }

    /// Floored remainder: the result takes the sign of the divisor.
    pub fn rem(self, rhs: Value) -> Value {
        match (self, rhs) {
            (Value::Int(a), Value::Int(b)) if b != 0 => {
                let r = a.wrapping_rem(b);
                if r != 0 && (r < 0) != (b < 0) {
                    Value::Int(r + b)
                } else {
                    Value::Int(r)
                }
            }
            (a, b) => {
                let (a, b) = (a.as_f64(), b.as_f64());
                let mut r = a % b;
                if r != 0.0 && (r < 0.0) != (b < 0.0) {
                    r += b;
                }
                Value::from_f64(r)
            }
        }
    }

    pub fn pow(self, exponent: Value) -> Value {
        match (self, exponent) {
            (Value::Int(base), Value::Int(exp)) if exp >= 0 => u32::try_from(exp)
                .ok()
                .and_then(|exp| base.checked_pow(exp))
                .map(Value::Int)
                .unwrap_or_else(|| Value::from_f64((base as f64).powf(exp as f64))),
            (base, exp) => Value::from_f64(base.as_f64().powf(exp.as_f64())),
        }
    }

    /// Factorial of a non-negative integer; spills into a float past `i64`.
    pub fn factorial(n: i64) -> Value {
        let mut exact: Option<i64> = Some(1);
        let mut approx = 1.0_f64;
        for k in 2..=n {
            exact = exact.and_then(|acc| acc.checked_mul(k));
            approx *= k as f64;
            if exact.is_none() && approx.is_infinite() {
                break;
            }
        }
        match exact {
            Some(product) => Value::Int(product),
            None => Value::from_f64(approx),
        }
    }

    /// Round to `digits` decimal places, halves to even.
    pub fn round_to(self, digits: i64) -> Value {
        if let Value::Int(n) = self {
            if digits >= 0 {
                return Value::Int(n);
            }
        }
        let x = self.as_f64();
        if !x.is_finite() {
            return self;
        }
        let digits = digits.clamp(-400, 400) as i32;
        if digits >= 0 {
            let factor = 10f64.powi(digits);
            let scaled = x * factor;
            if !factor.is_finite() || !scaled.is_finite() {
                return self;
            }
            Value::from_f64(scaled.round_ties_even() / factor)
        } else {
            let factor = 10f64.powi(-digits);
            if !factor.is_finite() {
                return Value::Int(0);
            }
            Value::from_f64((x / factor).round_ties_even() * factor)
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::from_f64(x)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write_float(f, *x),
        }
    }
}

/// Shortest round-trip digits, switching to `1e-05` / `1e+16` style
/// exponents outside `1e-4 <= |x| < 1e16`.
fn write_float(f: &mut fmt::Formatter, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("nan");
    }
    if !x.is_finite() || x == 0.0 {
        return write!(f, "{}", x);
    }
    let sci = format!("{:e}", x);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return write!(f, "{}", x),
    };
    if (-4..16).contains(&exponent) {
        return write!(f, "{}", x);
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    write!(f, "{}e{}{:02}", mantissa, sign, exponent.abs())
}
