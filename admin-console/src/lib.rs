//! Admin console library modules.
//!
//! The crate follows a hexagonal layout: `domain` owns entity types, drafts,
//! validation, and the entity managers; `outbound` adapts the REST backend to
//! the domain ports; `inbound` drives the managers from a terminal shell.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
