//! Cross-program invocation wrappers for programs this crate talks to.

pub mod lending;
