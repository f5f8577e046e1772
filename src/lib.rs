//! # dbc2phd
//!
//! Turns a **J1939 DBC** database into the JSON configuration consumed by the
//! PHD runtime.
//!
//! ## Highlights
//! - **DBC parser**: load nodes, messages, signals and vendor `BA_` overrides into a SlotMap-backed [`DatabaseDBC`].
//! - **J1939 identifiers**: split a 29-bit identifier into PGN, priority, source and destination ([`J1939Id`]).
//! - **Compatible copy**: write `<name>_<N>.dbc` carrying the fixed vendor attribute definitions ([`dbc::make_compatible`]).
//! - **JSON export**: one controller application per selected node ([`json::to_file`]).
//! - **Session**: the load / select / make-compatible / export workflow behind the command-line tool ([`Session`]).
//!
//! ```no_run
//! use dbc2phd::Session;
//!
//! let mut session = Session::new();
//! let nodes = session.load_database("truck.dbc").expect("Failed to load");
//! session.export_json("phd_config.json", &nodes).expect("Failed to export");
//! ```

pub mod dbc;
pub mod j1939;
pub mod json;
pub mod session;

// Top-level re-exports
#[doc(inline)]
pub use crate::dbc::types::{
    attributes::{AttrObject, VENDOR_ATTRIBUTES, VendorAttribute},
    database::{DatabaseDBC, FrameKey, NodeKey, SignalKey},
    errors::{DbcCompatError, DbcParseError, JsonExportError, SessionError},
    frame::{FrameDBC, TransmitMode},
    node::NodeDBC,
    signal::{Endianness, SignalDBC, SignalDataType},
};
pub use crate::j1939::J1939Id;
pub use crate::session::{NodeFrames, Session};
