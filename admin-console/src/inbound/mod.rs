//! Inbound adapters driving the entity managers.

pub mod cli;
