mod repl {
    use shuntyard::{MathContext, RPNExpr};
    use std::collections::HashMap;

    fn is_identifier(name: &str) -> bool {
        let mut chars = name.chars();
        matches!(chars.next(), Some(first) if first.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric())
    }

    // second phase of the protocol: prompt for any variable the parsed
    // expression references that isn't bound yet
    fn resolve_vars(
        rl: &mut rustyline::DefaultEditor,
        rpn: &RPNExpr,
        bindings: &mut HashMap<String, f64>,
    ) -> Result<(), String> {
        for var in rpn.variables() {
            if bindings.contains_key(var) {
                continue;
            }
            let line = rl
                .readline(&format!("{} = ", var))
                .map_err(|e| e.to_string())?;
            let value = line
                .trim()
                .parse::<f64>()
                .map_err(|e| format!("{}: {}", var, e))?;
            bindings.insert(var.to_string(), value);
        }
        Ok(())
    }

    pub fn evalexpr(
        rl: &mut rustyline::DefaultEditor,
        cx: &MathContext,
        bindings: &mut HashMap<String, f64>,
        input: &str,
    ) {
        let rpn = match cx.parse(input) {
            Err(e) => {
                println!("Parse error: {}", e);
                return;
            }
            Ok(rpn) => rpn,
        };
        if let Err(e) = resolve_vars(rl, &rpn, bindings) {
            println!("Error: {}", e);
            return;
        }
        match cx.eval(&rpn, bindings) {
            Err(e) => println!("Eval error: {}", e),
            Ok(result) => println!("{} = {}", rpn, result),
        }
    }

    pub fn parse_statement(
        rl: &mut rustyline::DefaultEditor,
        cx: &MathContext,
        bindings: &mut HashMap<String, f64>,
        input: &str,
    ) {
        // 'name = expr' stores a binding for later lines
        if let Some((lhs, rhs)) = input.split_once('=') {
            let name = lhs.trim();
            if is_identifier(name) {
                match cx.parse(rhs) {
                    Err(e) => println!("Parse error: {}", e),
                    Ok(rpn) => {
                        if let Err(e) = resolve_vars(rl, &rpn, bindings) {
                            println!("Error: {}", e);
                            return;
                        }
                        match cx.eval(&rpn, bindings) {
                            Err(e) => println!("Eval error: {}", e),
                            Ok(result) => {
                                bindings.insert(name.to_string(), result);
                            }
                        }
                    }
                }
                return;
            }
        }
        evalexpr(rl, cx, bindings, input);
    }
}

fn main() -> Result<(), String> {
    let cx = shuntyard::MathContext::new();
    let mut bindings = std::collections::HashMap::new();
    let mut rl = rustyline::DefaultEditor::new().map_err(|e| e.to_string())?;

    if std::env::args().len() > 1 {
        let input = std::env::args().skip(1).collect::<Vec<String>>().join(" ");
        repl::evalexpr(&mut rl, &cx, &mut bindings, &input);
        return Ok(());
    }

    let histpath = dirs::home_dir().map(|h| h.join(".calc_history"));
    if let Some(ref path) = histpath {
        let _ = rl.load_history(path);
    }
    use rustyline::error::ReadlineError;
    loop {
        match rl.readline(">> ") {
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(format!("Readline err: {:?}", e)),
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                repl::parse_statement(&mut rl, &cx, &mut bindings, &line);
            }
        }
    }
    if let Some(ref path) = histpath {
        let _ = rl.save_history(path);
    }
    Ok(())
}
