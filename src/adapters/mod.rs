//! Infrastructure adapters. Implement outbound ports.
//!
//! Key-value stores, coach advice, terminal UI. Map errors to DomainError.

pub mod ai;
pub mod persistence;
pub mod ui;
