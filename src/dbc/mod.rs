//! # dbc
//!
//! `dbc` is the module to work with J1939 .dbc files: parsing into a
//! [`DatabaseDBC`](types::database::DatabaseDBC) and writing the
//! compatible copy that carries the vendor attribute definitions.

pub mod compat;
pub(crate) mod core;
pub mod parse;
pub mod types;

pub use compat::{find_conflicting_lines, make_compatible};
pub use parse::{from_file, from_str};
