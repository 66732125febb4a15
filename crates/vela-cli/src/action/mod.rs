//! Actions executed against the Vela API once arguments are resolved.

pub mod repo;
