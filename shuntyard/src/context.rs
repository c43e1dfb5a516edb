use crate::rpneval::EvalErr;
use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Assoc {
    Left,
    Right,
}

/// Numeric transform applied by a function token, checking its own domain.
pub type MathFn = fn(f64) -> Result<f64, EvalErr>;

/// Read-only operator/function/constant tables. Built once, then shared by
/// reference with the parser and the evaluator; never mutated by either.
pub struct MathContext {
    pub(crate) ops: HashMap<char, (u32, Assoc)>,
    pub(crate) functions: HashMap<String, MathFn>,
    pub(crate) constants: HashMap<String, f64>,
}

impl MathContext {
    pub fn new() -> MathContext {
        use std::f64::consts;
        let ops = HashMap::from([
            ('+', (2, Assoc::Left)),
            ('-', (2, Assoc::Left)),
            ('*', (3, Assoc::Left)),
            ('/', (3, Assoc::Left)),
            ('^', (4, Assoc::Right)),
        ]);
        let mut functions: HashMap<String, MathFn> = HashMap::new();
        functions.insert("sin".to_string(), |x| Ok(x.sin()));
        functions.insert("cos".to_string(), |x| Ok(x.cos()));
        functions.insert("tan".to_string(), |x| Ok(x.tan()));
        functions.insert("asin".to_string(), |x| Ok(x.asin()));
        functions.insert("acos".to_string(), |x| Ok(x.acos()));
        functions.insert("atan".to_string(), |x| Ok(x.atan()));
        functions.insert("exp".to_string(), |x| Ok(x.exp()));
        functions.insert("abs".to_string(), |x| Ok(x.abs()));
        functions.insert("sqrt".to_string(), |x| {
            if x < 0.0 {
                return Err(EvalErr::Domain("sqrt of negative argument"));
            }
            Ok(x.sqrt())
        });
        functions.insert("log".to_string(), |x| {
            if x <= 0.0 {
                return Err(EvalErr::Domain("log of non-positive argument"));
            }
            Ok(x.log10())
        });
        functions.insert("ln".to_string(), |x| {
            if x <= 0.0 {
                return Err(EvalErr::Domain("ln of non-positive argument"));
            }
            Ok(x.ln())
        });
        let constants = HashMap::from([
            ("pi".to_string(), consts::PI),
            ("e".to_string(), consts::E),
        ]);
        MathContext { ops, functions, constants }
    }

    // table extension points, meant to be used before the first parse/eval
    pub fn add_function(&mut self, name: &str, func: MathFn) {
        self.functions.insert(name.to_string(), func);
    }

    pub fn add_constant(&mut self, name: &str, value: f64) {
        self.constants.insert(name.to_string(), value);
    }
}

impl Default for MathContext {
    fn default() -> Self {
        Self::new()
    }
}
