//! Worker protocol.
//!
//! Messages the worker sends up to the platform. Every message kind
//! carries the identity of the originating worker along with its
//! serialized network endpoint, so the platform can route a reply
//! without consulting any out-of-band state.

use std::collections::BTreeMap;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::rpc::convert;
use crate::{Var, VarName};

/// Capability shared by all messages a worker can send to the platform.
///
/// Origin metadata is fixed at construction; the accessors are pure
/// reads of those values and no mutation is part of the contract.
/// Platform-side consumers branch on the concrete kind by matching on
/// [`WorkerMessage`].
pub trait WorkerToPlatform: Serialize + Debug {
    /// String identifier of the originating worker.
    fn sender(&self) -> &str;

    /// Serialized network endpoint of the sender. Opaque at this layer,
    /// never parsed or mutated here.
    fn client_address(&self) -> &[u8];

    /// Name of the concrete message kind, used in diagnostics.
    fn kind(&self) -> &'static str;

    /// Renders the message to its textual wire form.
    ///
    /// Total from the caller's perspective: if structured encoding
    /// fails, a diagnostic is logged and the message falls back to its
    /// debug representation. See [`convert::to_wire_text`].
    fn to_wire_text(&self) -> String
    where
        Self: Sized,
    {
        convert::to_wire_text(self.kind(), self)
    }
}

/// Sets a single named platform-side variable to the given value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetPlatformVar {
    sender: String,
    /// Identifier of the platform-side variable to set. Passed through
    /// as-is, empty names included; rejecting them is platform policy.
    name: VarName,
    msg: Var,
    #[serde(with = "serde_bytes")]
    client_address: Vec<u8>,
}

impl SetPlatformVar {
    /// Always succeeds; no field validation happens at this layer.
    pub fn new(
        sender: impl Into<String>,
        name: impl Into<VarName>,
        msg: Var,
        client_address: Vec<u8>,
    ) -> Self {
        Self {
            sender: sender.into(),
            name: name.into(),
            msg,
            client_address,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn msg(&self) -> &Var {
        &self.msg
    }
}

impl WorkerToPlatform for SetPlatformVar {
    fn sender(&self) -> &str {
        &self.sender
    }

    fn client_address(&self) -> &[u8] {
        &self.client_address
    }

    fn kind(&self) -> &'static str {
        "SetPlatformVar"
    }
}

/// Sets many platform-side variables at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetPlatformVars {
    sender: String,
    vars: BTreeMap<VarName, Var>,
    #[serde(with = "serde_bytes")]
    client_address: Vec<u8>,
}

impl SetPlatformVars {
    pub fn new(
        sender: impl Into<String>,
        vars: BTreeMap<VarName, Var>,
        client_address: Vec<u8>,
    ) -> Self {
        Self {
            sender: sender.into(),
            vars,
            client_address,
        }
    }

    pub fn vars(&self) -> &BTreeMap<VarName, Var> {
        &self.vars
    }
}

impl WorkerToPlatform for SetPlatformVars {
    fn sender(&self) -> &str {
        &self.sender
    }

    fn client_address(&self) -> &[u8] {
        &self.client_address
    }

    fn kind(&self) -> &'static str {
        "SetPlatformVars"
    }
}

/// Asks the platform for the value of a single named variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetPlatformVar {
    sender: String,
    name: VarName,
    #[serde(with = "serde_bytes")]
    client_address: Vec<u8>,
}

impl GetPlatformVar {
    pub fn new(sender: impl Into<String>, name: impl Into<VarName>, client_address: Vec<u8>) -> Self {
        Self {
            sender: sender.into(),
            name: name.into(),
            client_address,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl WorkerToPlatform for GetPlatformVar {
    fn sender(&self) -> &str {
        &self.sender
    }

    fn client_address(&self) -> &[u8] {
        &self.client_address
    }

    fn kind(&self) -> &'static str {
        "GetPlatformVar"
    }
}

/// Asks the platform for the values of many named variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetPlatformVars {
    sender: String,
    names: Vec<VarName>,
    #[serde(with = "serde_bytes")]
    client_address: Vec<u8>,
}

impl GetPlatformVars {
    pub fn new(sender: impl Into<String>, names: Vec<VarName>, client_address: Vec<u8>) -> Self {
        Self {
            sender: sender.into(),
            names,
            client_address,
        }
    }

    pub fn names(&self) -> &[VarName] {
        &self.names
    }
}

impl WorkerToPlatform for GetPlatformVars {
    fn sender(&self) -> &str {
        &self.sender
    }

    fn client_address(&self) -> &[u8] {
        &self.client_address
    }

    fn kind(&self) -> &'static str {
        "GetPlatformVars"
    }
}

/// Returns the result of a platform-invoked function back to the
/// platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokedFunctionResult {
    sender: String,
    /// Name of the invoked function.
    name: String,
    msg: Var,
    #[serde(with = "serde_bytes")]
    client_address: Vec<u8>,
}

impl InvokedFunctionResult {
    pub fn new(
        sender: impl Into<String>,
        name: impl Into<String>,
        msg: Var,
        client_address: Vec<u8>,
    ) -> Self {
        Self {
            sender: sender.into(),
            name: name.into(),
            msg,
            client_address,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn msg(&self) -> &Var {
        &self.msg
    }
}

impl WorkerToPlatform for InvokedFunctionResult {
    fn sender(&self) -> &str {
        &self.sender
    }

    fn client_address(&self) -> &[u8] {
        &self.client_address
    }

    fn kind(&self) -> &'static str {
        "InvokedFunctionResult"
    }
}

/// Worker signals completion of its engine task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerFinished {
    sender: String,
    #[serde(with = "serde_bytes")]
    client_address: Vec<u8>,
}

impl WorkerFinished {
    pub fn new(sender: impl Into<String>, client_address: Vec<u8>) -> Self {
        Self {
            sender: sender.into(),
            client_address,
        }
    }
}

impl WorkerToPlatform for WorkerFinished {
    fn sender(&self) -> &str {
        &self.sender
    }

    fn client_address(&self) -> &[u8] {
        &self.client_address
    }

    fn kind(&self) -> &'static str {
        "WorkerFinished"
    }
}

/// Registry of all message kinds the worker can send to the platform.
///
/// New kinds get a struct above and a variant here; the platform-side
/// dispatcher is a single match over this enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, strum::Display)]
pub enum WorkerMessage {
    SetPlatformVar(SetPlatformVar),
    SetPlatformVars(SetPlatformVars),
    GetPlatformVar(GetPlatformVar),
    GetPlatformVars(GetPlatformVars),
    InvokedFunctionResult(InvokedFunctionResult),
    WorkerFinished(WorkerFinished),
}

impl WorkerToPlatform for WorkerMessage {
    fn sender(&self) -> &str {
        match self {
            Self::SetPlatformVar(msg) => msg.sender(),
            Self::SetPlatformVars(msg) => msg.sender(),
            Self::GetPlatformVar(msg) => msg.sender(),
            Self::GetPlatformVars(msg) => msg.sender(),
            Self::InvokedFunctionResult(msg) => msg.sender(),
            Self::WorkerFinished(msg) => msg.sender(),
        }
    }

    fn client_address(&self) -> &[u8] {
        match self {
            Self::SetPlatformVar(msg) => msg.client_address(),
            Self::SetPlatformVars(msg) => msg.client_address(),
            Self::GetPlatformVar(msg) => msg.client_address(),
            Self::GetPlatformVars(msg) => msg.client_address(),
            Self::InvokedFunctionResult(msg) => msg.client_address(),
            Self::WorkerFinished(msg) => msg.client_address(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::SetPlatformVar(msg) => msg.kind(),
            Self::SetPlatformVars(msg) => msg.kind(),
            Self::GetPlatformVar(msg) => msg.kind(),
            Self::GetPlatformVars(msg) => msg.kind(),
            Self::InvokedFunctionResult(msg) => msg.kind(),
            Self::WorkerFinished(msg) => msg.kind(),
        }
    }
}

impl From<SetPlatformVar> for WorkerMessage {
    fn from(msg: SetPlatformVar) -> Self {
        Self::SetPlatformVar(msg)
    }
}

impl From<SetPlatformVars> for WorkerMessage {
    fn from(msg: SetPlatformVars) -> Self {
        Self::SetPlatformVars(msg)
    }
}

impl From<GetPlatformVar> for WorkerMessage {
    fn from(msg: GetPlatformVar) -> Self {
        Self::GetPlatformVar(msg)
    }
}

impl From<GetPlatformVars> for WorkerMessage {
    fn from(msg: GetPlatformVars) -> Self {
        Self::GetPlatformVars(msg)
    }
}

impl From<InvokedFunctionResult> for WorkerMessage {
    fn from(msg: InvokedFunctionResult) -> Self {
        Self::InvokedFunctionResult(msg)
    }
}

impl From<WorkerFinished> for WorkerMessage {
    fn from(msg: WorkerFinished) -> Self {
        Self::WorkerFinished(msg)
    }
}
