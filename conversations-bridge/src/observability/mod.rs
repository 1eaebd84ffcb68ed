//! Observability vocabulary shared by every layer.
//!
//! Library code emits `tracing` events carrying `event` and `component` fields taken from
//! these constants, and never installs a global subscriber.

pub mod events;
pub mod fields;
