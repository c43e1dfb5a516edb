use crate::parser::{RPNExpr, Token};
use crate::MathContext;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, PartialEq, Error)]
pub enum EvalErr {
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),
    #[error("unknown function: {0}")]
    UnknownFunction(String),
    #[error("insufficient operands")]
    InsufficientOperands,
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("domain error: {0}")]
    Domain(&'static str),
    #[error("malformed expression")]
    MalformedExpression,
}

impl MathContext {
    /// Evaluate a postfix sequence against caller-supplied variable
    /// bindings. The bindings map must cover every free variable the
    /// expression references; see `RPNExpr::variables`.
    pub fn eval(
        &self,
        rpn: &RPNExpr,
        bindings: &HashMap<String, f64>,
    ) -> Result<f64, EvalErr> {
        let mut operands = Vec::new();

        for token in rpn.0.iter() {
            match token {
                Token::Number(lexeme) => {
                    let num = lexeme
                        .parse::<f64>()
                        .map_err(|_| EvalErr::InvalidNumber(lexeme.clone()))?;
                    operands.push(num);
                }
                Token::Variable(var) => match bindings.get(var) {
                    Some(value) => operands.push(*value),
                    None => return Err(EvalErr::UndefinedVariable(var.clone())),
                },
                Token::Op(op) => {
                    let r = operands.pop().ok_or(EvalErr::InsufficientOperands)?;
                    let l = operands.pop().ok_or(EvalErr::InsufficientOperands)?;
                    match op {
                        '+' => operands.push(l + r),
                        '-' => operands.push(l - r),
                        '*' => operands.push(l * r),
                        '/' => {
                            if r == 0.0 {
                                return Err(EvalErr::DivisionByZero);
                            }
                            operands.push(l / r);
                        }
                        '^' => operands.push(l.powf(r)),
                        _ => return Err(EvalErr::MalformedExpression),
                    }
                }
                Token::Function(fname) => {
                    let func = self
                        .functions
                        .get(fname)
                        .ok_or_else(|| EvalErr::UnknownFunction(fname.clone()))?;
                    let arg = operands.pop().ok_or(EvalErr::InsufficientOperands)?;
                    operands.push(func(arg)?);
                }
                Token::OParen => return Err(EvalErr::MalformedExpression),
            }
        }

        // trailing operands or missing operators both land here
        if operands.len() != 1 {
            return Err(EvalErr::MalformedExpression);
        }
        Ok(operands[0])
    }

    /// Parse and evaluate in one step.
    pub fn evaluate(
        &self,
        expr: &str,
        bindings: &HashMap<String, f64>,
    ) -> Result<f64, crate::Error> {
        let rpn = self.parse(expr)?;
        Ok(self.eval(&rpn, bindings)?)
    }
}
