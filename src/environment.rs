use crate::core;
use crate::types::{Builtin, Cell, NIL_NAME, TRUE_NAME};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSymbol(pub String);

impl fmt::Display for UnknownSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' not found", self.0)
    }
}

/// Flat name-to-value mapping. No scoping, no shadowing: a name is bound at
/// most once and lookups are by exact string match.
#[derive(Debug, Clone)]
pub struct Environment {
    bindings: HashMap<String, Cell>,
}

impl Environment {
    /// An environment with nothing bound, not even `nil` and `T`.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn set<T>(&mut self, key: T, value: Cell) -> Option<Cell>
    where
        T: Into<String>,
    {
        self.bindings.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Cell> {
        self.bindings.get(key)
    }

    pub fn fetch(&self, key: &str) -> Result<Cell, UnknownSymbol> {
        self.get(key)
            .cloned()
            .ok_or_else(|| UnknownSymbol(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for Environment {
    fn default() -> Self {
        let mut env = Self::empty();
        env.set(NIL_NAME, Cell::nil());
        env.set(TRUE_NAME, Cell::truth());
        for &(name, func) in core::CORE.iter() {
            env.set(name, Cell::Proc(Builtin(func)));
        }
        log::debug!("registered {} bindings", env.len());
        env
    }
}
