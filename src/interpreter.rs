use crate::printer::{self, PrintMode};
use crate::{environment, evaluator, reader, Cell};
use std::fmt;

pub type Result<T = Cell> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Read(reader::ParseError),
    Eval(evaluator::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read(e) => write!(f, "read error: {}", e),
            Error::Eval(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {}

pub fn read(line: &str) -> Result {
    reader::read_str(line).map_err(Error::Read)
}

pub fn eval(obj: &Cell, env: &environment::Environment) -> Result {
    evaluator::eval(obj, env).map_err(Error::Eval)
}

/// Read, evaluate and render one expression. A failure only affects this
/// expression; the environment is never touched.
pub fn rep(line: &str, env: &environment::Environment, mode: PrintMode) -> Result<String> {
    let obj = read(line)?;
    log::debug!("read {}", obj);
    let value = eval(&obj, env)?;
    Ok(printer::render(&value, mode))
}
