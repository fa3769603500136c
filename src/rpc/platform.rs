//! Platform protocol.
//!
//! Replies the platform sends back down to a worker. Unlike the worker
//! protocol these are addressed by worker name only; the platform
//! routes them using the endpoint bytes it learned from the original
//! worker message.

use std::collections::BTreeMap;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::rpc::convert;
use crate::{Error, Var, VarName};

/// Capability shared by all messages the platform can send to a worker.
pub trait PlatformToWorker: Serialize + Debug {
    /// Name of the worker this message is addressed to.
    fn worker(&self) -> &str;

    /// Name of the concrete message kind, used in diagnostics.
    fn kind(&self) -> &'static str;

    /// Renders the message to its textual wire form. Total; see
    /// [`convert::to_wire_text`].
    fn to_wire_text(&self) -> String
    where
        Self: Sized,
    {
        convert::to_wire_text(self.kind(), self)
    }
}

/// Value of a single platform-side variable, answering
/// [`GetPlatformVar`](crate::rpc::worker::GetPlatformVar).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformVar {
    worker: String,
    name: VarName,
    msg: Var,
}

impl PlatformVar {
    pub fn new(worker: impl Into<String>, name: impl Into<VarName>, msg: Var) -> Self {
        Self {
            worker: worker.into(),
            name: name.into(),
            msg,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn msg(&self) -> &Var {
        &self.msg
    }
}

impl PlatformToWorker for PlatformVar {
    fn worker(&self) -> &str {
        &self.worker
    }

    fn kind(&self) -> &'static str {
        "PlatformVar"
    }
}

/// Values of many platform-side variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformVars {
    worker: String,
    vars: BTreeMap<VarName, Var>,
}

impl PlatformVars {
    pub fn new(worker: impl Into<String>, vars: BTreeMap<VarName, Var>) -> Self {
        Self {
            worker: worker.into(),
            vars,
        }
    }

    pub fn vars(&self) -> &BTreeMap<VarName, Var> {
        &self.vars
    }
}

impl PlatformToWorker for PlatformVars {
    fn worker(&self) -> &str {
        &self.worker
    }

    fn kind(&self) -> &'static str {
        "PlatformVars"
    }
}

/// Acknowledges a set request, listing the variable names that were
/// actually written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformVarsWereSet {
    worker: String,
    names: Vec<VarName>,
}

impl PlatformVarsWereSet {
    pub fn new(worker: impl Into<String>, names: Vec<VarName>) -> Self {
        Self {
            worker: worker.into(),
            names,
        }
    }

    pub fn names(&self) -> &[VarName] {
        &self.names
    }
}

impl PlatformToWorker for PlatformVarsWereSet {
    fn worker(&self) -> &str {
        &self.worker
    }

    fn kind(&self) -> &'static str {
        "PlatformVarsWereSet"
    }
}

/// Registry of all message kinds the platform can send to a worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, strum::Display)]
pub enum PlatformMessage {
    PlatformVar(PlatformVar),
    PlatformVars(PlatformVars),
    PlatformVarsWereSet(PlatformVarsWereSet),
}

impl PlatformToWorker for PlatformMessage {
    fn worker(&self) -> &str {
        match self {
            Self::PlatformVar(msg) => msg.worker(),
            Self::PlatformVars(msg) => msg.worker(),
            Self::PlatformVarsWereSet(msg) => msg.worker(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::PlatformVar(msg) => msg.kind(),
            Self::PlatformVars(msg) => msg.kind(),
            Self::PlatformVarsWereSet(msg) => msg.kind(),
        }
    }
}

impl From<PlatformVar> for PlatformMessage {
    fn from(msg: PlatformVar) -> Self {
        Self::PlatformVar(msg)
    }
}

impl From<PlatformVars> for PlatformMessage {
    fn from(msg: PlatformVars) -> Self {
        Self::PlatformVars(msg)
    }
}

impl From<PlatformVarsWereSet> for PlatformMessage {
    fn from(msg: PlatformVarsWereSet) -> Self {
        Self::PlatformVarsWereSet(msg)
    }
}

impl TryInto<Var> for PlatformMessage {
    type Error = Error;

    fn try_into(self) -> core::result::Result<Var, Self::Error> {
        match self {
            PlatformMessage::PlatformVar(var) => Ok(var.msg),
            _ => Err(Error::UnexpectedMessage(self.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Result, Var};

    #[test]
    fn reply_extraction() -> Result<()> {
        let reply: PlatformMessage =
            PlatformVar::new("worker-7", "max_parallelism", Var::Int(8)).into();
        assert_eq!(reply.worker(), "worker-7");
        let var: Var = reply.try_into()?;
        assert_eq!(var, Var::Int(8));
        Ok(())
    }

    #[test]
    fn reply_extraction_of_wrong_kind_fails() {
        let reply: PlatformMessage = PlatformVarsWereSet::new("worker-7", vec![]).into();
        let res: core::result::Result<Var, _> = reply.try_into();
        assert!(matches!(res, Err(Error::UnexpectedMessage(_))));
    }

    #[test]
    fn reply_wire_text() {
        let reply = PlatformVarsWereSet::new("worker-2", vec!["fetch_size".to_string()]);
        let wire = reply.to_wire_text();
        assert!(wire.contains("worker-2"));
        assert!(wire.contains("fetch_size"));
    }
}
