use crate::evaluator;
use crate::types::{Arity, BuiltinFn, Cell, Int};

fn grab_ints(args: &[Cell]) -> evaluator::Result<Vec<Int>> {
    let type_check: Result<Vec<_>, _> = args.iter().map(|o| o.as_int()).collect();
    type_check.map_err(evaluator::Error::TypeMismatch)
}

// Arithmetic wraps on overflow.

static SUM: BuiltinFn = BuiltinFn {
    name: "+",
    fn_ptr: sum_,
    arity: Arity::at_least(0),
};

fn sum_(args: &[Cell]) -> evaluator::Result {
    let value = grab_ints(args)?
        .iter()
        .fold(0 as Int, |acc, &x| acc.wrapping_add(x));
    Ok(Cell::Number(value))
}

static SUB: BuiltinFn = BuiltinFn {
    name: "-",
    fn_ptr: sub_,
    arity: Arity::at_least(1),
};

/// First argument minus the rest. A single argument is returned unchanged,
/// not negated.
fn sub_(args: &[Cell]) -> evaluator::Result {
    match grab_ints(args)?.split_first() {
        Some((first, rest)) => Ok(Cell::Number(
            rest.iter().fold(*first, |acc, &x| acc.wrapping_sub(x)),
        )),
        None => unreachable!("arity is checked before the call"),
    }
}

static MUL: BuiltinFn = BuiltinFn {
    name: "*",
    fn_ptr: mul_,
    arity: Arity::at_least(0),
};

fn mul_(args: &[Cell]) -> evaluator::Result {
    let value = grab_ints(args)?
        .iter()
        .fold(1 as Int, |acc, &x| acc.wrapping_mul(x));
    Ok(Cell::Number(value))
}

static DIV: BuiltinFn = BuiltinFn {
    name: "/",
    fn_ptr: div_,
    arity: Arity::at_least(1),
};

fn div_(args: &[Cell]) -> evaluator::Result {
    match grab_ints(args)?.split_first() {
        Some((first, rest)) => rest
            .iter()
            .try_fold(*first, |acc, &x| match x {
                0 => Err(evaluator::Error::DivisionByZero),
                _ => Ok(acc.wrapping_div(x)),
            })
            .map(Cell::Number),
        None => unreachable!("arity is checked before the call"),
    }
}

static EQUAL: BuiltinFn = BuiltinFn {
    name: "=",
    fn_ptr: equal_,
    arity: Arity::exactly(2),
};

/// Lists are never compared structurally: two lists are always unequal.
fn equal_(args: &[Cell]) -> evaluator::Result {
    use Cell::*;
    let same = match (&args[0], &args[1]) {
        (Symbol(x), Symbol(y)) | (String(x), String(y)) => x == y,
        (Number(x), Number(y)) => x == y,
        (Proc(x), Proc(y)) => x == y,
        _ => false,
    };
    Ok(Cell::from_bool(same))
}

static ATOM: BuiltinFn = BuiltinFn {
    name: "atom",
    fn_ptr: atom_,
    arity: Arity::exactly(1),
};

fn atom_(args: &[Cell]) -> evaluator::Result {
    Ok(Cell::from_bool(!args[0].is_list()))
}

static LIST: BuiltinFn = BuiltinFn {
    name: "list",
    fn_ptr: list_,
    arity: Arity::at_least(0),
};

fn list_(args: &[Cell]) -> evaluator::Result {
    Ok(Cell::List(args.to_vec()))
}

pub type Namespace = Vec<(&'static str, &'static BuiltinFn)>;
lazy_static! {
    pub static ref CORE: Namespace = vec![
        // Arithmetic
        ("+", &SUM),
        ("-", &SUB),
        ("*", &MUL),
        ("/", &DIV),
        // Equality
        ("=", &EQUAL),
        ("eq", &EQUAL),
        // Lists and atoms
        ("atom", &ATOM),
        ("list", &LIST),
    ];
}
