use crate::evaluator;
use derive_more::Deref;
use itertools::Itertools;
use std::fmt;
use std::ops::{RangeFrom, RangeInclusive};

pub type Int = i32;

#[derive(Debug, Clone)]
pub enum Arity {
    Between(RangeInclusive<usize>),
    AtLeast(RangeFrom<usize>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BadArgCount {
    pub name: &'static str,
    pub expected: Arity,
    pub got: usize,
}

impl fmt::Display for BadArgCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "When evaluating {} expected {} arguments, but received {} arguments",
            self.name, self.expected, self.got
        )
    }
}

impl Arity {
    pub const fn exactly(n: usize) -> Self {
        Self::Between(n..=n)
    }

    pub const fn at_least(n: usize) -> Self {
        Self::AtLeast(n..)
    }

    pub fn contains(&self, n: usize) -> bool {
        match self {
            Self::Between(range) => range.contains(&n),
            Self::AtLeast(range) => range.contains(&n),
        }
    }

    pub fn validate_for(&self, n: usize, name: &'static str) -> Result<(), BadArgCount> {
        match self.contains(n) {
            true => Ok(()),
            false => Err(BadArgCount {
                name,
                expected: self.clone(),
                got: n,
            }),
        }
    }
}

impl PartialEq for Arity {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Between(x), Self::Between(y)) => x == y,
            (Self::AtLeast(x), Self::AtLeast(y)) => x.start == y.start,
            _ => false,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Between(r) => {
                if r.start() == r.end() {
                    write!(f, "exactly {}", r.start())
                } else {
                    write!(f, "from {} to {}", r.start(), r.end())
                }
            }
            Arity::AtLeast(r) => write!(f, "at least {}", r.start),
        }
    }
}

pub struct BuiltinFn {
    pub name: &'static str,
    pub arity: Arity,
    pub fn_ptr: fn(&[Cell]) -> evaluator::Result,
}

impl fmt::Debug for BuiltinFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "builtin function #<{}>", self.name)
    }
}

/// Handle to a native procedure. Two handles are equal iff they point at the
/// same registered function.
#[derive(Clone, Copy, Deref)]
pub struct Builtin(pub &'static BuiltinFn);

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl Eq for Builtin {}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Reserved for user-defined procedures. Nothing in the reader or the core
/// library produces one yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub params: Vec<String>,
    pub body: Box<Cell>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Symbol(String),
    Number(Int),
    String(String),
    List(Vec<Cell>),
    Proc(Builtin),
    Lambda(Lambda),
}

pub const NIL_NAME: &str = "nil";
pub const TRUE_NAME: &str = "T";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMismatch {
    NotANumber,
    NotAList,
    NotASymbol,
    NotAString,
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expected = match self {
            TypeMismatch::NotANumber => "a number",
            TypeMismatch::NotAList => "a list",
            TypeMismatch::NotASymbol => "a symbol",
            TypeMismatch::NotAString => "a string",
        };
        write!(f, "expected {}", expected)
    }
}

impl Cell {
    pub fn nil() -> Self {
        Self::symbol(NIL_NAME)
    }

    pub fn truth() -> Self {
        Self::symbol(TRUE_NAME)
    }

    pub fn from_bool(b: bool) -> Self {
        match b {
            true => Self::truth(),
            false => Self::nil(),
        }
    }

    pub fn symbol(name: &str) -> Self {
        Self::Symbol(name.into())
    }

    pub fn string(text: &str) -> Self {
        Self::String(text.into())
    }

    pub fn lambda(params: Vec<String>, body: Cell) -> Self {
        Self::Lambda(Lambda {
            params,
            body: Box::new(body),
        })
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Cell::Symbol(s) if s == NIL_NAME)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Cell::List(_))
    }

    pub fn as_int(&self) -> Result<Int, TypeMismatch> {
        match self {
            Cell::Number(x) => Ok(*x),
            _ => Err(TypeMismatch::NotANumber),
        }
    }

    pub fn as_list(&self) -> Result<&[Cell], TypeMismatch> {
        match self {
            Cell::List(xs) => Ok(xs),
            _ => Err(TypeMismatch::NotAList),
        }
    }

    pub fn as_symbol(&self) -> Result<&str, TypeMismatch> {
        match self {
            Cell::Symbol(s) => Ok(s),
            _ => Err(TypeMismatch::NotASymbol),
        }
    }

    pub fn as_string(&self) -> Result<&str, TypeMismatch> {
        match self {
            Cell::String(s) => Ok(s),
            _ => Err(TypeMismatch::NotAString),
        }
    }
}

impl From<Int> for Cell {
    fn from(x: Int) -> Self {
        Cell::Number(x)
    }
}

impl From<Vec<Cell>> for Cell {
    fn from(xs: Vec<Cell>) -> Self {
        Cell::List(xs)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Symbol(name) => write!(f, "{}", name),
            Cell::Number(x) => write!(f, "{}", x),
            // No escapes exist in the reader, so none are written back.
            Cell::String(s) => write!(f, "\"{}\"", s),
            Cell::List(xs) => write!(f, "({})", xs.iter().join(" ")),
            Cell::Proc(b) => write!(f, "#<builtin {}>", b.name),
            Cell::Lambda(l) => write!(f, "#<lambda ({})>", l.params.iter().join(" ")),
        }
    }
}
