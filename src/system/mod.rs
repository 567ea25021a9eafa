//! Everything that touches the kernel's process pseudo-filesystem or
//! delivers signals lives under this module.

pub mod collector;
pub mod delta;
pub mod kill;
pub mod parse;
pub mod process;
pub mod snapshot;
pub mod source;
pub mod users;
