//! Defines the message protocols spoken between querygrid constructs.

pub mod convert;
pub mod platform;
pub mod worker;
