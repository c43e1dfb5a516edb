use crate::parser::{RPNExpr, Token};
use crate::rpneval::EvalErr;
use crate::{Error, MathContext};
use std::collections::HashMap;

macro_rules! fuzzy_eq {
    ($lhs:expr, $rhs:expr) => {
        assert!(($lhs - $rhs).abs() < 1.0e-10)
    };
}

fn evaluate(expr: &str) -> f64 {
    MathContext::new().evaluate(expr, &HashMap::new()).unwrap()
}

#[test]
fn test_eval1() {
    fuzzy_eq!(evaluate("3+4*2/-(1-5)^2^3"), 2.99987792969);
}

#[test]
fn test_precedence() {
    fuzzy_eq!(evaluate("3 + 4 * 2"), 11.0);
    fuzzy_eq!(evaluate("(3 + 4) * 2"), 14.0);
    fuzzy_eq!(evaluate("2 + 3 * 4 - 5"), 9.0);
}

#[test]
fn test_right_associativity() {
    // 2^(3^2), not (2^3)^2
    fuzzy_eq!(evaluate("2^3^2"), 512.0);
}

#[test]
fn test_unary_minus() {
    fuzzy_eq!(evaluate("-5"), -5.0);
    fuzzy_eq!(evaluate("5 + -2"), 3.0);
    fuzzy_eq!(evaluate("5 * -3"), -15.0);
    fuzzy_eq!(evaluate("-2^3"), -8.0);
    fuzzy_eq!(evaluate("2^-3"), 0.125);
}

#[test]
fn test_functions_and_constants() {
    fuzzy_eq!(evaluate("sin(pi/2)"), 1.0);
    fuzzy_eq!(evaluate("sqrt(16) + abs(-5)"), 9.0);
    fuzzy_eq!(evaluate("sin(0.345)^2 + cos(0.345)^2"), 1.0);
    fuzzy_eq!(evaluate("ln(e)"), 1.0);
    fuzzy_eq!(evaluate("log(1000)"), 3.0);
    fuzzy_eq!(evaluate("exp(0)"), 1.0);
    fuzzy_eq!(evaluate("atan(1)"), std::f64::consts::FRAC_PI_4);
    fuzzy_eq!(evaluate("asin(1)"), std::f64::consts::FRAC_PI_2);
}

#[test]
fn test_variable_bindings() {
    let cx = MathContext::new();
    let bindings = HashMap::from([("x".to_string(), 5.0), ("y".to_string(), 3.0)]);
    fuzzy_eq!(cx.evaluate("x + y", &bindings).unwrap(), 8.0);
    fuzzy_eq!(cx.evaluate("x^2 - y", &bindings).unwrap(), 22.0);

    let rpn = cx.parse("x + z").unwrap();
    assert_eq!(
        cx.eval(&rpn, &bindings),
        Err(EvalErr::UndefinedVariable("z".to_string()))
    );
}

#[test]
fn test_eval_errors() {
    let cx = MathContext::new();
    let no_vars = HashMap::new();
    assert_eq!(
        cx.evaluate("5 / 0", &no_vars),
        Err(Error::Eval(EvalErr::DivisionByZero))
    );
    assert_eq!(
        cx.evaluate("sqrt(-1)", &no_vars),
        Err(Error::Eval(EvalErr::Domain("sqrt of negative argument")))
    );
    assert_eq!(
        cx.evaluate("log(0)", &no_vars),
        Err(Error::Eval(EvalErr::Domain("log of non-positive argument")))
    );
    assert_eq!(
        cx.evaluate("ln(-2)", &no_vars),
        Err(Error::Eval(EvalErr::Domain("ln of non-positive argument")))
    );
    assert_eq!(
        cx.evaluate("2.5.3 + 1", &no_vars),
        Err(Error::Eval(EvalErr::InvalidNumber("2.5.3".to_string())))
    );
}

#[test]
fn test_malformed_rpn() {
    // hand-built sequences the parser would never emit
    let cx = MathContext::new();
    let no_vars = HashMap::new();
    let trailing = RPNExpr(vec![
        Token::Number("1".to_string()),
        Token::Number("2".to_string()),
    ]);
    assert_eq!(cx.eval(&trailing, &no_vars), Err(EvalErr::MalformedExpression));

    let underflow = RPNExpr(vec![Token::Op('+')]);
    assert_eq!(cx.eval(&underflow, &no_vars), Err(EvalErr::InsufficientOperands));

    let empty = RPNExpr(vec![]);
    assert_eq!(cx.eval(&empty, &no_vars), Err(EvalErr::MalformedExpression));

    let unknown = RPNExpr(vec![
        Token::Number("1".to_string()),
        Token::Function("gamma".to_string()),
    ]);
    assert_eq!(
        cx.eval(&unknown, &no_vars),
        Err(EvalErr::UnknownFunction("gamma".to_string()))
    );
}

#[test]
fn test_roundtrip_and_determinism() {
    let cx = MathContext::new();
    let bindings = HashMap::from([("x".to_string(), 0.7)]);
    let expr = "sin(x)^2 + cos(x)^2 * -(1 - x^2)";
    let rpn = cx.parse(expr).unwrap();
    let via_stages = cx.eval(&rpn, &bindings).unwrap();
    let direct = cx.evaluate(expr, &bindings).unwrap();
    // bit-identical, not just fuzzy
    assert_eq!(via_stages, direct);
    assert_eq!(direct, cx.evaluate(expr, &bindings).unwrap());
}

#[test]
fn test_alternate_tables() {
    let mut cx = MathContext::new();
    cx.add_constant("tau", std::f64::consts::TAU);
    cx.add_function("double", |x| Ok(2.0 * x));
    fuzzy_eq!(
        cx.evaluate("double(tau)", &HashMap::new()).unwrap(),
        4.0 * std::f64::consts::PI
    );
}

#[test]
fn test_error_messages_stable() {
    assert_eq!(EvalErr::DivisionByZero.to_string(), "division by zero");
    assert_eq!(
        EvalErr::UndefinedVariable("x".to_string()).to_string(),
        "undefined variable: x"
    );
    assert_eq!(
        EvalErr::InsufficientOperands.to_string(),
        "insufficient operands"
    );
}
