//! Remote messaging protocol for the querygrid distributed query engine.
//!
//! Worker processes use the message definitions from this crate to
//! communicate state changes to the coordinating platform process, and
//! the platform uses them to reply. The crate only produces and consumes
//! message values; actually moving the bytes between processes is the
//! transport's business.

pub mod error;
pub mod rpc;
pub mod var;

pub use error::{Error, Result};
pub use var::Var;

/// Integer variable type.
pub type Int = i64;
/// Floating point variable type.
pub type Float = f64;

/// Name of a platform-side variable.
pub type VarName = String;
