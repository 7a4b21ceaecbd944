//! kill-others: duplicate-instance terminator
//!
//! This library finds other running processes that are the same program run
//! by the same user and SIGKILLs them, retrying until the kernel confirms
//! each one is gone. Embedders call [`api::try_kill`] once at startup.

pub mod api;
pub mod cli;
pub mod enumerate;
pub mod error;
pub mod gate;
pub mod identity;
pub mod proc;
pub mod signal;
pub mod sweep;
pub mod terminate;
