//! Infrastructure adapters. Implement outbound ports.
//!
//! Storage backends only; the API/transport adapter lives outside this
//! repository. Map infrastructure errors to DomainError.

pub mod persistence;
