//! Shared helpers for admin console integration tests.

pub mod fake_backend;
