use crate::context::Assoc;
use crate::parser::{RPNExpr, Token};
use std::fmt;

// standard table; printing is cosmetic so it doesn't thread a context
fn precedence(op: char) -> (u32, Assoc) {
    match op {
        '^' => (4, Assoc::Right),
        '*' | '/' => (3, Assoc::Left),
        _ => (2, Assoc::Left),
    }
}

#[derive(Debug)]
enum Ast<'a> {
    Leaf(&'a Token),
    Node(&'a Token, Vec<Ast<'a>>),
}

impl RPNExpr {
    fn build_ast(&self) -> Option<Ast> {
        let mut ops = Vec::new();
        for token in self.0.iter() {
            match token {
                Token::Number(_) | Token::Variable(_) => ops.push(Ast::Leaf(token)),
                Token::Op(_) => {
                    if ops.len() < 2 {
                        return None;
                    }
                    let operands = ops.split_off(ops.len() - 2);
                    ops.push(Ast::Node(token, operands));
                }
                Token::Function(_) => {
                    let operand = ops.pop()?;
                    ops.push(Ast::Node(token, vec![operand]));
                }
                Token::OParen => return None,
            }
        }
        if ops.len() == 1 { ops.pop() } else { None }
    }
}

fn printer(root: &Ast) -> (String, u32) {
    match root {
        Ast::Leaf(token) => match token {
            Token::Number(x) => (x.clone(), u32::MAX),
            Token::Variable(x) => (x.clone(), u32::MAX),
            _ => (String::new(), u32::MAX),
        },
        Ast::Node(token, args) => match token {
            Token::Op(op) => {
                let (prec, assoc) = precedence(*op);
                let (lhs, lhs_prec) = printer(&args[0]);
                let (rhs, rhs_prec) = printer(&args[1]);
                let lhs = if prec > lhs_prec || (prec == lhs_prec && assoc != Assoc::Left) {
                    format!("({})", lhs)
                } else {
                    lhs
                };
                let rhs = if prec > rhs_prec || (prec == rhs_prec && assoc != Assoc::Right) {
                    format!("({})", rhs)
                } else {
                    rhs
                };
                (format!("{} {} {}", lhs, op, rhs), prec)
            }
            Token::Function(func) => {
                let (arg, _) = printer(&args[0]);
                (format!("{}({})", func, arg), u32::MAX)
            }
            _ => (String::new(), u32::MAX),
        },
    }
}

impl fmt::Display for RPNExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.build_ast() {
            Some(ast) => write!(f, "{}", printer(&ast).0),
            None => write!(f, "<malformed expression>"),
        }
    }
}
