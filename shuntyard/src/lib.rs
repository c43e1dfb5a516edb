pub use context::{Assoc, MathContext, MathFn};
mod context;

pub use parser::{ParseError, RPNExpr, Token};
mod parser;

pub use rpneval::EvalErr;
mod rpneval;
#[cfg(test)]
mod rpneval_test;

mod rpnprint;

use thiserror::Error;

#[derive(Debug, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalErr),
}
