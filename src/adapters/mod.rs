//! Adapter implementations of the port traits.
//!
//! `live` talks to the hosted Roble backend over HTTPS; `memory` is an
//! in-process stand-in used by tests and offline runs.

pub mod live;
pub mod memory;
