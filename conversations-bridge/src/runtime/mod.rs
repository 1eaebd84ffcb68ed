//! Runtime integration layer.
//!
//! Isolates the dedicated delivery thread so threading behavior stays localized and
//! predictable for the rest of the crate.

pub(crate) mod worker_runtime;
