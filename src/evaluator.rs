use crate::environment::{Environment, UnknownSymbol};
use crate::types::{BadArgCount, Builtin, Cell, TypeMismatch};
use itertools::Itertools;
use std::fmt;

pub type Result<T = Cell> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    UnboundSymbol(String),
    BadArgCount(BadArgCount),
    DivisionByZero,
    TypeMismatch(TypeMismatch),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnboundSymbol(s) => write!(f, "'{}' not found", s),
            Error::BadArgCount(e) => write!(f, "{}", e),
            Error::DivisionByZero => write!(f, "cannot divide by zero!"),
            Error::TypeMismatch(e) => write!(f, "type mismatch: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<TypeMismatch> for Error {
    fn from(t: TypeMismatch) -> Self {
        Self::TypeMismatch(t)
    }
}

impl From<BadArgCount> for Error {
    fn from(e: BadArgCount) -> Self {
        Self::BadArgCount(e)
    }
}

impl From<UnknownSymbol> for Error {
    fn from(UnknownSymbol(s): UnknownSymbol) -> Self {
        Self::UnboundSymbol(s)
    }
}

/// Strict, eager evaluation. Every list is an application: there are no
/// special forms.
pub fn eval(cell: &Cell, env: &Environment) -> Result {
    match cell {
        Cell::Symbol(name) => Ok(env.fetch(name)?),
        Cell::List(elements) => apply_list(elements, env),
        Cell::Number(_) | Cell::String(_) | Cell::Proc(_) | Cell::Lambda(_) => Ok(cell.clone()),
    }
}

fn apply_list(elements: &[Cell], env: &Environment) -> Result {
    let (head, rest) = match elements.split_first() {
        Some(split) => split,
        None => return Ok(Cell::nil()),
    };
    let operator = eval(head, env)?;
    let args = evaluate_sequence_elementwise(rest, env)?;
    match operator {
        Cell::Proc(func) => call_builtin(func, &args),
        other => {
            log::debug!("operator {} is not a procedure, yielding nil", other);
            Ok(Cell::nil())
        }
    }
}

pub fn evaluate_sequence_elementwise(seq: &[Cell], env: &Environment) -> Result<Vec<Cell>> {
    seq.iter().map(|obj| eval(obj, env)).collect()
}

pub(crate) fn pretty_print_args(args: &[Cell]) -> String {
    match args.len() {
        0 => "no args".into(),
        1 => args[0].to_string(),
        _ => format!("\n\t{}", args.iter().join("\n\t")),
    }
}

pub fn call_builtin(func: Builtin, args: &[Cell]) -> Result {
    func.arity.validate_for(args.len(), func.name)?;
    log::trace!("Call {} with {}", func.name, pretty_print_args(args));
    let result = (func.fn_ptr)(args);
    match &result {
        Ok(val) => log::trace!("Call to {} resulted in {}", func.name, val),
        Err(e) => log::trace!("Call to {} failed: {}", func.name, e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_str;
    use crate::types::Arity;

    fn run(src: &str) -> Result {
        let env = Environment::default();
        eval(&read_str(src).unwrap(), &env)
    }

    #[test]
    fn sum_of_two() {
        let cell = Cell::List(vec![Cell::symbol("+"), Cell::Number(1), Cell::Number(2)]);
        assert_eq!(eval(&cell, &Environment::default()), Ok(Cell::Number(3)));
    }

    #[test]
    fn literals_evaluate_to_themselves() {
        let env = Environment::empty();
        for cell in &[Cell::Number(7), Cell::string("s")] {
            assert_eq!(eval(cell, &env).as_ref(), Ok(cell));
        }
        let lambda = Cell::lambda(vec!["x".into()], Cell::symbol("x"));
        assert_eq!(eval(&lambda, &env), Ok(lambda.clone()));
    }

    #[test]
    fn procs_evaluate_to_themselves() {
        let env = Environment::default();
        let plus = env.fetch("+").unwrap();
        assert_eq!(eval(&plus, &env), Ok(plus.clone()));
    }

    #[test]
    fn truth_and_nil_are_idempotent() {
        let env = Environment::default();
        for name in &["T", "nil"] {
            let once = eval(&Cell::symbol(name), &env).unwrap();
            let twice = eval(&once, &env).unwrap();
            assert_eq!(once, Cell::symbol(name));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn unbound_symbol_is_an_error() {
        assert_eq!(run("zork"), Err(Error::UnboundSymbol("zork".into())));
        assert_eq!(run("(+ 1 zork)"), Err(Error::UnboundSymbol("zork".into())));
    }

    #[test]
    fn empty_list_is_nil() {
        assert_eq!(run("()"), Ok(Cell::nil()));
    }

    #[test]
    fn non_procedure_operator_is_nil() {
        assert_eq!(run("(1 2 3)"), Ok(Cell::nil()));
        assert_eq!(run("(\"f\" 2)"), Ok(Cell::nil()));
        assert_eq!(run("(T)"), Ok(Cell::nil()));
        assert_eq!(run("((list 1) 2)"), Ok(Cell::nil()));
    }

    #[test]
    fn lambda_operator_is_inert() {
        let mut env = Environment::default();
        env.set("f", Cell::lambda(vec!["x".into()], Cell::symbol("x")));
        assert_eq!(eval(&read_str("(f 1)").unwrap(), &env), Ok(Cell::nil()));
    }

    #[test]
    fn arguments_are_still_evaluated_for_inert_operators() {
        assert_eq!(run("(1 zork)"), Err(Error::UnboundSymbol("zork".into())));
    }

    #[test]
    fn nested_applications() {
        assert_eq!(run("(+ (* 2 3) (- 10 4))"), Ok(Cell::Number(12)));
        assert_eq!(run("(atom (list (+ 1 1)))"), Ok(Cell::nil()));
    }

    #[test]
    fn operator_position_can_be_computed() {
        let mut env = Environment::default();
        let plus = env.fetch("+").unwrap();
        env.set("plus", plus);
        assert_eq!(
            eval(&read_str("(plus 2 2)").unwrap(), &env),
            Ok(Cell::Number(4))
        );
    }

    #[test]
    fn eval_does_not_mutate_input() {
        let env = Environment::default();
        let cell = read_str("(list 1 (+ 1 1))").unwrap();
        let before = cell.clone();
        let _ = eval(&cell, &env);
        assert_eq!(cell, before);
    }

    #[test]
    fn arity_checked_before_calling() {
        match run("(-)") {
            Err(Error::BadArgCount(e)) => {
                assert_eq!(e.name, "-");
                assert_eq!(e.expected, Arity::at_least(1));
                assert_eq!(e.got, 0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn nesting_at_the_reader_limit_evaluates() {
        use crate::reader::MAX_DEPTH;
        let src = format!("{}7{}", "(list ".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        let mut value = run(&src).unwrap();
        let mut depth = 0;
        while let Cell::List(mut children) = value {
            value = children.remove(0);
            depth += 1;
        }
        assert_eq!(depth, MAX_DEPTH);
        assert_eq!(value, Cell::Number(7));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            Error::UnboundSymbol("x".into()).to_string(),
            "'x' not found"
        );
        assert_eq!(Error::DivisionByZero.to_string(), "cannot divide by zero!");
        assert_eq!(
            Error::TypeMismatch(TypeMismatch::NotANumber).to_string(),
            "type mismatch: expected a number"
        );
    }
}
