use crate::context::{Assoc, MathContext};
use mathscan::{MathToken, MathTokenizer};
use thiserror::Error;

#[derive(Clone, PartialEq, Debug)]
pub enum Token {
    // raw literal text, constants get folded into this form too
    Number(String),
    Op(char),
    Function(String),
    Variable(String),
    // pending-stack marker only, never part of parser output
    OParen,
}

#[derive(Debug, PartialEq, Error)]
pub enum ParseError {
    #[error("empty expression")]
    EmptyExpression,
    #[error("incomplete expression")]
    IncompleteExpression,
    #[error("operand expected")]
    OperandExpected,
    #[error("operator expected")]
    OperatorExpected,
    #[error("unmatched parentheses")]
    UnmatchedParens,
    #[error("invalid character: '{0}'")]
    InvalidCharacter(char),
    #[error("unknown identifier: {0}")]
    UnknownIdentifier(String),
    #[error("'(' expected after function name: {0}")]
    MissingFuncParen(String),
}

#[derive(PartialEq, Debug)]
pub struct RPNExpr(pub Vec<Token>);

impl RPNExpr {
    /// Names of the free variables the expression references, in order of
    /// first appearance. Callers resolve these before eval.
    pub fn variables(&self) -> Vec<&str> {
        let mut vars = Vec::new();
        for token in self.0.iter() {
            if let Token::Variable(name) = token {
                if !vars.contains(&name.as_str()) {
                    vars.push(name.as_str());
                }
            }
        }
        vars
    }
}

fn valid_varname(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(first) if first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

impl MathContext {
    /// Convert an infix expression to a postfix token sequence.
    ///
    /// A single `expect_operand` flag drives syntax validation: it tracks
    /// whether the parser sits where an operand (number, identifier, unary
    /// minus, open paren) or an operator/close-paren is valid, so every
    /// error is caught at the first offending token.
    pub fn parse(&self, expr: &str) -> Result<RPNExpr, ParseError> {
        let mut lex = MathTokenizer::new(expr.chars());
        let mut out = Vec::new();
        let mut stack = Vec::new();
        let mut expect_operand = true;

        while let Some(token) = lex.next() {
            match token {
                MathToken::Number(lexeme) => {
                    if !expect_operand {
                        return Err(ParseError::OperatorExpected);
                    }
                    out.push(Token::Number(lexeme));
                    expect_operand = false;
                }
                MathToken::Ident(name) => {
                    if !expect_operand {
                        return Err(ParseError::OperatorExpected);
                    }
                    // classification order: function, constant, variable
                    if self.functions.contains_key(&name) {
                        match lex.next() {
                            Some(MathToken::OParen) => {
                                stack.push(Token::Function(name));
                                stack.push(Token::OParen);
                                // still before the argument's first operand
                            }
                            _ => return Err(ParseError::MissingFuncParen(name)),
                        }
                    } else if let Some(value) = self.constants.get(&name) {
                        out.push(Token::Number(value.to_string()));
                        expect_operand = false;
                    } else if valid_varname(&name) {
                        out.push(Token::Variable(name));
                        expect_operand = false;
                    } else {
                        return Err(ParseError::UnknownIdentifier(name));
                    }
                }
                MathToken::OParen => {
                    if !expect_operand {
                        return Err(ParseError::OperatorExpected);
                    }
                    stack.push(Token::OParen);
                }
                MathToken::CParen => {
                    if expect_operand {
                        return Err(ParseError::OperandExpected);
                    }
                    loop {
                        match stack.pop() {
                            None => return Err(ParseError::UnmatchedParens),
                            Some(Token::OParen) => break,
                            Some(pending) => out.push(pending),
                        }
                    }
                    // a function call binds to its parenthesized argument
                    if let Some(Token::Function(_)) = stack.last() {
                        out.push(stack.pop().unwrap());
                    }
                }
                MathToken::Op(symbol) => {
                    if symbol == '-' && expect_operand {
                        // unary minus: rewrite '-x' as '0 - x'
                        out.push(Token::Number("0".to_string()));
                        stack.push(Token::Op('-'));
                        continue;
                    }
                    if expect_operand {
                        return Err(ParseError::OperandExpected);
                    }
                    let (prec, assoc) = *self
                        .ops
                        .get(&symbol)
                        .ok_or(ParseError::InvalidCharacter(symbol))?;
                    loop {
                        let top_prec = match stack.last() {
                            Some(Token::Op(top)) => self.ops[top].0,
                            _ => break,
                        };
                        if top_prec > prec || (top_prec == prec && assoc == Assoc::Left) {
                            out.push(stack.pop().unwrap());
                        } else {
                            break;
                        }
                    }
                    stack.push(Token::Op(symbol));
                    expect_operand = true;
                }
                MathToken::Unknown(c) => return Err(ParseError::InvalidCharacter(c)),
            }
        }

        if expect_operand {
            return Err(if out.is_empty() {
                ParseError::EmptyExpression
            } else {
                ParseError::IncompleteExpression
            });
        }
        while let Some(pending) = stack.pop() {
            match pending {
                Token::OParen => return Err(ParseError::UnmatchedParens),
                token => out.push(token),
            }
        }
        Ok(RPNExpr(out))
    }
}
