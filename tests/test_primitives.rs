use clacker::primitives::{CalcError, Effect, Primitive, Stack};
use clacker::value::Value;

fn stack_of(values: &[f64]) -> Stack {
    let mut stack = Stack::new();
    for &v in values {
        stack.push(v);
    }
    stack
}

fn contents(stack: &Stack) -> Vec<Value> {
    stack.iter().copied().collect()
}

#[test]
fn test_stack_operations() {
    let mut stack = Stack::new();
    assert!(stack.is_empty());

    stack.push(42_i64);
    assert_eq!(stack.len(), 1);
    assert_eq!(stack.peek().unwrap(), Value::Int(42));

    stack.push(9.5);
    assert_eq!(stack.len(), 2);
    assert_eq!(stack.pop().unwrap(), Value::Float(9.5));
    assert_eq!(stack.pop().unwrap(), Value::Int(42));

    assert_eq!(stack.pop(), Err(CalcError::Underflow));
}

#[test]
fn test_push_normalizes_integral_floats() {
    let mut stack = Stack::new();
    stack.push(4.0);
    stack.push(Value::Float(6.0));
    assert_eq!(contents(&stack), vec![Value::Int(4), Value::Int(6)]);
}

#[test]
fn test_pop_at_and_get() {
    let mut stack = stack_of(&[10.0, 20.0, 30.0]);
    assert_eq!(stack.get(0), Some(Value::Int(10)));
    assert_eq!(stack.get(3), None);
    assert_eq!(stack.pop_at(0).unwrap(), Value::Int(10));
    assert_eq!(contents(&stack), vec![Value::Int(20), Value::Int(30)]);
    assert_eq!(stack.pop_at(5), Err(CalcError::Underflow));
}

#[test]
fn test_stack_display() {
    let stack = stack_of(&[1.0, 2.5, -3.0]);
    assert_eq!(stack.to_string(), "1 2.5 -3");
    assert_eq!(Stack::new().to_string(), "");
}

#[test]
fn test_add() {
    let mut stack = stack_of(&[3.0, 4.0]);
    assert_eq!(stack.execute_primitive(Primitive::Add), Ok(Effect::Display));
    assert_eq!(contents(&stack), vec![Value::Int(7)]);
}

#[test]
fn test_sub_is_second_minus_top() {
    let mut stack = stack_of(&[10.0, 3.0]);
    stack.execute_primitive(Primitive::Sub).unwrap();
    assert_eq!(contents(&stack), vec![Value::Int(7)]);
}

#[test]
fn test_mul() {
    let mut stack = stack_of(&[6.0, 7.0]);
    stack.execute_primitive(Primitive::Mul).unwrap();
    assert_eq!(contents(&stack), vec![Value::Int(42)]);
}

#[test]
fn test_div() {
    let mut stack = stack_of(&[20.0, 8.0]);
    stack.execute_primitive(Primitive::Div).unwrap();
    assert_eq!(contents(&stack), vec![Value::Float(2.5)]);
}

#[test]
fn test_div_by_zero_restores_divisor() {
    let mut stack = stack_of(&[5.0, 0.0]);
    assert_eq!(
        stack.execute_primitive(Primitive::Div),
        Err(CalcError::DivideByZero)
    );
    assert_eq!(contents(&stack), vec![Value::Int(5), Value::Int(0)]);
}

#[test]
fn test_pow() {
    let mut stack = stack_of(&[2.0, 8.0]);
    stack.execute_primitive(Primitive::Pow).unwrap();
    assert_eq!(contents(&stack), vec![Value::Int(256)]);
}

#[test]
fn test_pow_negative_base_fractional_exponent() {
    let mut stack = stack_of(&[-2.0, 0.5]);
    assert_eq!(
        stack.execute_primitive(Primitive::Pow),
        Err(CalcError::NegativeBaseFractionalPower)
    );
    assert_eq!(contents(&stack), vec![Value::Int(-2), Value::Float(0.5)]);
}

#[test]
fn test_pow_zero_negative_exponent_restores_nothing() {
    let mut stack = stack_of(&[1.0, 0.0, -1.0]);
    assert_eq!(
        stack.execute_primitive(Primitive::Pow),
        Err(CalcError::ZeroNegativePower)
    );
    assert_eq!(contents(&stack), vec![Value::Int(1)]);
}

#[test]
fn test_mod() {
    let mut stack = stack_of(&[17.0, 5.0]);
    stack.execute_primitive(Primitive::Mod).unwrap();
    assert_eq!(contents(&stack), vec![Value::Int(2)]);

    let mut stack = stack_of(&[17.0, 0.5]);
    assert_eq!(
        stack.execute_primitive(Primitive::Mod),
        Err(CalcError::DivideByZero)
    );
    assert_eq!(contents(&stack), vec![Value::Int(17), Value::Float(0.5)]);
}

#[test]
fn test_factorial() {
    let mut stack = stack_of(&[4.0]);
    stack.execute_primitive(Primitive::Factorial).unwrap();
    assert_eq!(contents(&stack), vec![Value::Int(24)]);
}

#[test]
fn test_factorial_failures_restore_operand() {
    let mut stack = stack_of(&[-1.0]);
    assert_eq!(
        stack.execute_primitive(Primitive::Factorial),
        Err(CalcError::FactorialNegative)
    );
    assert_eq!(contents(&stack), vec![Value::Int(-1)]);

    let mut stack = stack_of(&[2.5]);
    assert_eq!(
        stack.execute_primitive(Primitive::Factorial),
        Err(CalcError::FactorialNonInteger)
    );
    assert_eq!(contents(&stack), vec![Value::Float(2.5)]);
}

#[test]
fn test_round() {
    let mut stack = stack_of(&[3.14159, 2.0]);
    stack.execute_primitive(Primitive::Round).unwrap();
    assert_eq!(contents(&stack), vec![Value::Float(3.14)]);
}

#[test]
fn test_round_fractional_precision_consumes_precision_only() {
    let mut stack = stack_of(&[3.14159, 1.5]);
    assert_eq!(
        stack.execute_primitive(Primitive::Round),
        Err(CalcError::NonIntegerPrecision)
    );
    assert_eq!(contents(&stack), vec![Value::Float(3.14159)]);
}

#[test]
fn test_trigonometry() {
    let mut stack = stack_of(&[180.0]);
    stack.execute_primitive(Primitive::Radians).unwrap();
    assert!((stack.peek().unwrap().as_f64() - std::f64::consts::PI).abs() < 1e-12);

    stack.execute_primitive(Primitive::Degrees).unwrap();
    assert!((stack.peek().unwrap().as_f64() - 180.0).abs() < 1e-9);

    let mut stack = stack_of(&[0.0]);
    stack.execute_primitive(Primitive::Cosine).unwrap();
    assert_eq!(stack.peek().unwrap(), Value::Int(1));

    let mut stack = stack_of(&[0.0]);
    stack.execute_primitive(Primitive::Sine).unwrap();
    assert_eq!(stack.peek().unwrap(), Value::Int(0));
}

#[test]
fn test_logarithms() {
    let mut stack = stack_of(&[1000.0]);
    stack.execute_primitive(Primitive::Log).unwrap();
    assert!((stack.peek().unwrap().as_f64() - 3.0).abs() < 1e-12);

    let mut stack = stack_of(&[1.0]);
    stack.execute_primitive(Primitive::Ln).unwrap();
    assert_eq!(contents(&stack), vec![Value::Int(0)]);

    let mut stack = stack_of(&[0.0]);
    assert_eq!(
        stack.execute_primitive(Primitive::Log),
        Err(CalcError::NonPositiveLogarithm)
    );
    assert_eq!(contents(&stack), vec![Value::Int(0)]);
}

#[test]
fn test_display_and_drop() {
    let mut stack = stack_of(&[1.0, 2.0]);
    assert_eq!(stack.execute_primitive(Primitive::Display), Ok(Effect::Display));
    assert_eq!(stack.len(), 2);
    assert_eq!(stack.execute_primitive(Primitive::Drop), Ok(Effect::Display));
    assert_eq!(contents(&stack), vec![Value::Int(1)]);
}

#[test]
fn test_clear_reports_count() {
    let mut stack = stack_of(&[1.0, 2.0, 3.0]);
    assert_eq!(stack.execute_primitive(Primitive::Clear), Ok(Effect::Cleared(3)));
    assert!(stack.is_empty());
}

#[test]
fn test_sum() {
    let mut stack = stack_of(&[1.0, 2.5, 3.5]);
    stack.execute_primitive(Primitive::Sum).unwrap();
    assert_eq!(contents(&stack), vec![Value::Int(7)]);

    let mut stack = Stack::new();
    stack.execute_primitive(Primitive::Sum).unwrap();
    assert_eq!(contents(&stack), vec![Value::Int(0)]);
}

#[test]
fn test_stash_and_pull() {
    let mut stack = stack_of(&[1.0, 9.0]);
    assert_eq!(stack.execute_primitive(Primitive::Pull), Err(CalcError::EmptyStash));

    assert_eq!(stack.execute_primitive(Primitive::Stash), Ok(Effect::None));
    assert_eq!(stack.stashed(), Some(Value::Int(9)));
    assert_eq!(contents(&stack), vec![Value::Int(1)]);

    stack.execute_primitive(Primitive::Pull).unwrap();
    stack.execute_primitive(Primitive::Pull).unwrap();
    assert_eq!(contents(&stack), vec![Value::Int(1), Value::Int(9), Value::Int(9)]);
}

#[test]
fn test_short_stack_reports_underflow() {
    let mut stack = stack_of(&[1.0]);
    assert_eq!(stack.execute_primitive(Primitive::Add), Err(CalcError::Underflow));
}

#[test]
fn test_primitive_metadata() {
    assert_eq!(Primitive::ALL.len(), 20);
    assert_eq!(Primitive::Add.pops(), 2);
    assert_eq!(Primitive::Factorial.pops(), 1);
    assert_eq!(Primitive::Display.pops(), 0);
    assert_eq!(Primitive::Drop.pushes(), 0);
    assert_eq!(Primitive::Round.name(), "round");
    assert!(Primitive::ALL.iter().all(|p| !p.help().is_empty()));
}

#[test]
fn test_primitive_help_text() {
    assert_eq!(
        Primitive::Degrees.help(),
        "Pop 'a'; push the result of converting 'a' from radians to degrees"
    );
    assert_eq!(
        Primitive::Radians.help(),
        "Pop 'a'; push the result of converting 'a' from degrees to radians"
    );
    assert_eq!(
        Primitive::Sum.help(),
        "Pop all values from the stack; push the result of summing all values"
    );
}

#[test]
fn test_error_messages() {
    assert_eq!(CalcError::DivideByZero.to_string(), "Cannot divide by 0");
    assert_eq!(
        CalcError::ZeroNegativePower.to_string(),
        "0 Cannot be raised to a negative power"
    );
    assert_eq!(
        CalcError::Redefinition("+".to_string()).to_string(),
        "Cannot redefine: +"
    );
}
