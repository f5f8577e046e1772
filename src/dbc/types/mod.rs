//! # types
//!
//! Public structs of the J1939 database model.

pub mod attributes;
pub mod database;
pub mod errors;
pub mod frame;
pub mod node;
pub mod signal;
