//! REST adapters for the remote collaborator.
//!
//! One reqwest client serves both the `/users` and `/roles` collections.

mod client;

pub use client::RestClient;
