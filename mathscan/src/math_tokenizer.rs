#![deny(warnings)]

use crate::scanner::Scanner;

static NUMERIC: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '.'];
static ALPHA: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z'];
static ALNUM: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z'];
static OPS: &[char] = &['+', '-', '*', '/', '^'];

#[derive(Clone, PartialEq, Debug)]
pub enum MathToken {
    // greedy digit/dot run kept as raw text, validated when evaluated
    Number(String),
    Ident(String),
    Op(char),
    OParen,
    CParen,
    Unknown(char),
}

pub struct MathTokenizer<I: Iterator<Item = char>> {
    src: Scanner<I>,
}

impl<I: Iterator<Item = char>> MathTokenizer<I> {
    pub fn new(source: I) -> Self {
        MathTokenizer { src: Scanner::new(source) }
    }

    fn get_token(&mut self) -> Option<MathToken> {
        self.src.skip_all(&[' ']); // plain spaces only
        self.src.ignore();
        if self.src.accept_any(NUMERIC).is_some() {
            self.src.skip_all(NUMERIC);
            return Some(MathToken::Number(self.src.extract_string()));
        }
        if self.src.accept_any(ALPHA).is_some() {
            self.src.skip_all(ALNUM);
            return Some(MathToken::Ident(self.src.extract_string()));
        }
        if let Some(op) = self.src.accept_any(OPS) {
            self.src.ignore();
            return Some(MathToken::Op(op));
        }
        if self.src.accept('(') {
            self.src.ignore();
            return Some(MathToken::OParen);
        }
        if self.src.accept(')') {
            self.src.ignore();
            return Some(MathToken::CParen);
        }
        let other = self.src.next();
        self.src.ignore();
        other.map(MathToken::Unknown)
    }
}

impl<I: Iterator<Item = char>> Iterator for MathTokenizer<I> {
    type Item = MathToken;
    fn next(&mut self) -> Option<Self::Item> {
        self.get_token()
    }
}

///////////////////////////////////////////////////////////////////////////////
