//! DatabaseDBC model (SlotMap-backed).
//!
//! In-memory **J1939 database** built by the DBC parser and consumed by the
//! JSON projector. Storage uses **SlotMap** arenas with **stable keys**:
//! [`NodeKey`], [`FrameKey`], [`SignalKey`]. Public iteration follows the
//! **order vectors** via `iter_nodes()` and `iter_frames()`.
//!
//! **Lookups** are O(1): nodes by exact name, frames by 29-bit identifier.
//! Signals are resolved within their owning frame.
//!

use slotmap::{SlotMap, new_key_type};
use std::collections::HashMap;

use crate::dbc::types::{frame::FrameDBC, node::NodeDBC, signal::SignalDBC};
use crate::j1939::CAN_EFF_MASK;

// --- Stable keys (SlotMap) ---
new_key_type! { pub struct NodeKey; }
new_key_type! { pub struct FrameKey; }
new_key_type! { pub struct SignalKey; }

/// In-memory representation of a J1939 DBC database.
///
/// Holds the arenas of nodes/frames/signals, the order vectors controlling
/// iteration order, and the lookup maps used while applying `BA_` overrides.
#[derive(Default, Clone, Debug)]
pub struct DatabaseDBC {
    // --- Main storage (stable-key maps) ---
    pub nodes: SlotMap<NodeKey, NodeDBC>,
    pub frames: SlotMap<FrameKey, FrameDBC>,
    pub signals: SlotMap<SignalKey, SignalDBC>,

    // --- Order "views" ---
    pub nodes_order: Vec<NodeKey>,
    pub frames_order: Vec<FrameKey>,

    // --- Lookups ---
    pub(crate) node_key_by_name: HashMap<String, NodeKey>, // name → NodeKey
    pub(crate) frame_key_by_id: HashMap<u32, FrameKey>,    // id & 0x1FFFFFFF → FrameKey
}

impl DatabaseDBC {
    /// True when no node was declared. Callers treat such a database as empty
    /// even if frames were parsed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // --------- Nodes --------
    /// Adds a node to the database if not already present and returns the corresponding `NodeKey`.
    pub fn add_node_if_absent(&mut self, name: &str) -> NodeKey {
        if let Some(r) = self.get_node_key_by_name(name) {
            return r;
        }
        let key: NodeKey = self.nodes.insert(NodeDBC::new(name));
        self.nodes_order.push(key);
        self.node_key_by_name.insert(name.to_string(), key);
        key
    }

    pub fn get_node_key_by_name(&self, name: &str) -> Option<NodeKey> {
        self.node_key_by_name.get(name).copied()
    }

    pub fn get_node_by_key(&self, key: NodeKey) -> Option<&NodeDBC> {
        self.nodes.get(key)
    }

    pub fn get_node_by_key_mut(&mut self, key: NodeKey) -> Option<&mut NodeDBC> {
        self.nodes.get_mut(key)
    }

    /// Returns a `&NodeDBC` given the exact name.
    pub fn get_node_by_name(&self, name: &str) -> Option<&NodeDBC> {
        let key: NodeKey = self.get_node_key_by_name(name)?;
        self.get_node_by_key(key)
    }

    /// Returns a `&mut NodeDBC` given the exact name.
    pub fn get_node_by_name_mut(&mut self, name: &str) -> Option<&mut NodeDBC> {
        let key: NodeKey = self.get_node_key_by_name(name)?;
        self.get_node_by_key_mut(key)
    }

    /// Node names in declaration order.
    pub fn node_names(&self) -> Vec<String> {
        self.iter_nodes().map(|n| n.name.clone()).collect()
    }

    // ------------- Frames ------------
    /// Inserts `frame` and indexes its identifier.
    ///
    /// Returns `None` (and leaves the database untouched) when a frame with the
    /// same masked identifier already exists.
    pub fn add_frame(&mut self, frame: FrameDBC) -> Option<FrameKey> {
        let id: u32 = frame.id & CAN_EFF_MASK;
        if self.frame_key_by_id.contains_key(&id) {
            return None;
        }
        let key: FrameKey = self.frames.insert(frame);
        self.frames_order.push(key);
        self.frame_key_by_id.insert(id, key);
        Some(key)
    }

    /// Frame key for a raw identifier. The identifier is masked to 29 bits first.
    pub fn get_frame_key_by_id(&self, id: u32) -> Option<FrameKey> {
        self.frame_key_by_id.get(&(id & CAN_EFF_MASK)).copied()
    }

    pub fn get_frame_by_key(&self, key: FrameKey) -> Option<&FrameDBC> {
        self.frames.get(key)
    }

    pub fn get_frame_by_key_mut(&mut self, key: FrameKey) -> Option<&mut FrameDBC> {
        self.frames.get_mut(key)
    }

    pub fn get_frame_by_id(&self, id: u32) -> Option<&FrameDBC> {
        let key: FrameKey = self.get_frame_key_by_id(id)?;
        self.get_frame_by_key(key)
    }

    pub fn get_frame_by_id_mut(&mut self, id: u32) -> Option<&mut FrameDBC> {
        let key: FrameKey = self.get_frame_key_by_id(id)?;
        self.get_frame_by_key_mut(key)
    }

    /// Frames whose receiver list contains `node`, in frame order.
    pub fn rx_frames_of<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a FrameDBC> + 'a {
        self.iter_frames().filter(move |f| f.is_received_by(node))
    }

    /// Frames transmitted by `node`, in frame order.
    pub fn tx_frames_of<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a FrameDBC> + 'a {
        self.iter_frames().filter(move |f| f.is_transmitted_by(node))
    }

    // -------------- Signals ------------
    /// Appends a signal to `frame_key` unless a signal with the same name is
    /// already part of that frame. Returns `None` when skipped.
    pub fn add_signal_if_absent(
        &mut self,
        frame_key: FrameKey,
        mut signal: SignalDBC,
    ) -> Option<SignalKey> {
        if self.get_signal_key_in_frame(frame_key, &signal.name).is_some() {
            return None;
        }
        // the frame must exist before its signals
        self.frames.get(frame_key)?;

        signal.frame = frame_key;
        let sig_key: SignalKey = self.signals.insert(signal);
        if let Some(frame) = self.frames.get_mut(frame_key) {
            frame.signals.push(sig_key);
        }
        Some(sig_key)
    }

    /// Resolves a signal by name within the frame `frame_key`.
    pub fn get_signal_key_in_frame(&self, frame_key: FrameKey, name: &str) -> Option<SignalKey> {
        let frame: &FrameDBC = self.frames.get(frame_key)?;
        frame
            .signals
            .iter()
            .copied()
            .find(|&sk| self.signals.get(sk).is_some_and(|s| s.name == name))
    }

    pub fn get_signal_by_key(&self, key: SignalKey) -> Option<&SignalDBC> {
        self.signals.get(key)
    }

    pub fn get_signal_by_key_mut(&mut self, key: SignalKey) -> Option<&mut SignalDBC> {
        self.signals.get_mut(key)
    }

    /// Returns a `&mut SignalDBC` given its frame identifier and name.
    pub fn get_signal_mut(&mut self, frame_id: u32, name: &str) -> Option<&mut SignalDBC> {
        let frame_key: FrameKey = self.get_frame_key_by_id(frame_id)?;
        let sig_key: SignalKey = self.get_signal_key_in_frame(frame_key, name)?;
        self.get_signal_by_key_mut(sig_key)
    }

    // -------------- Iterators ---------------
    /// Iterate nodes following `nodes_order`.
    pub fn iter_nodes(&self) -> impl Iterator<Item = &NodeDBC> + '_ {
        self.nodes_order.iter().filter_map(|&k| self.nodes.get(k))
    }

    /// Iterate frames following `frames_order`.
    pub fn iter_frames(&self) -> impl Iterator<Item = &FrameDBC> + '_ {
        self.frames_order.iter().filter_map(|&k| self.frames.get(k))
    }

    // -------------- Sorting ---------------
    /// Sort the signals of `frame_key` by ascending start position (stable).
    pub fn sort_frame_signals(&mut self, frame_key: FrameKey) {
        let Some(frame) = self.frames.get(frame_key) else {
            return;
        };
        let mut sorted: Vec<SignalKey> = frame.signals.clone();
        sorted.sort_by_key(|&sk| self.signals.get(sk).map(|s| s.start_position));

        if let Some(frame) = self.frames.get_mut(frame_key) {
            frame.signals = sorted;
        }
    }

    /// Sort frames by ascending PGN (stable, ties keep file order).
    pub fn sort_frames_by_pgn(&mut self) {
        self.frames_order.sort_by_key(|&k| self.frames.get(k).map(|f| f.pgn));
    }
}
