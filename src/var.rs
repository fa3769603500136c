//! Variable values carried inside protocol messages.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Float, Int};

/// Value of a platform-side variable.
///
/// This is the payload unit carried by the worker and platform message
/// envelopes. A message owns its payload exclusively once constructed.
///
/// Note that map keys can be arbitrary `Var`s, which is more than the
/// json wire form can express. Such values still travel fine over the
/// binary encodings.
#[derive(Debug, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum Var {
    Null,
    Bool(bool),
    Int(Int),
    Float(Float),
    String(String),
    Bytes(#[serde(with = "serde_bytes")] Vec<u8>),
    List(Vec<Var>),
    Map(BTreeMap<Var, Var>),
}

impl Eq for Var {}

impl Ord for Var {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

impl Default for Var {
    fn default() -> Self {
        Self::Null
    }
}

impl Var {
    /// Name of the variant, e.g. for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Var::Null => "null",
            Var::Bool(_) => "bool",
            Var::Int(_) => "int",
            Var::Float(_) => "float",
            Var::String(_) => "string",
            Var::Bytes(_) => "bytes",
            Var::List(_) => "list",
            Var::Map(_) => "map",
        }
    }
}

impl From<bool> for Var {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Int> for Var {
    fn from(v: Int) -> Self {
        Self::Int(v)
    }
}

impl From<Float> for Var {
    fn from(v: Float) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Var {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Var {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Vec<Var>> for Var {
    fn from(v: Vec<Var>) -> Self {
        Self::List(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_keys_are_ordered() {
        let mut map = BTreeMap::new();
        map.insert(Var::from("b"), Var::from(2));
        map.insert(Var::from("a"), Var::from(1));
        let keys = map.keys().cloned().collect::<Vec<_>>();
        assert_eq!(keys, vec![Var::from("a"), Var::from("b")]);
    }

    #[test]
    fn kind_names() {
        assert_eq!(Var::Int(8).kind(), "int");
        assert_eq!(Var::default().kind(), "null");
    }
}
