//! Domain models for the Vela API.

pub mod event;
pub mod repo;

pub use event::*;
pub use repo::*;
