use serde::Serialize;

use crate::dbc::types::database::{DatabaseDBC, SignalKey};
use crate::dbc::types::signal::SignalDBC;
use crate::j1939::{CAN_EFF_MASK, J1939Id};

/// Transmission behaviour selected by `GenMsgSendType`.
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TransmitMode {
    Periodic,
    PeriodicOnChange,
    OnRequest,
    #[default]
    OnChange,
}

impl TransmitMode {
    /// Maps the enum index of `GenMsgSendType`
    /// (`cyclic`, `cyclicOnChange`, `onRequest`, `onChange`).
    /// Unknown indices fall back to `OnChange`.
    pub fn from_index(idx: u32) -> Self {
        match idx {
            0 => TransmitMode::Periodic,
            1 => TransmitMode::PeriodicOnChange,
            2 => TransmitMode::OnRequest,
            _ => TransmitMode::OnChange,
        }
    }
}

/// J1939 parameter group (DBC `BO_` message).
///
/// `pgn`, `priority`, `source_address` and `destination_address` are decoded
/// once from `id` when the frame is created and never recomputed.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FrameDBC {
    /// Message name.
    pub name: String,
    /// Transmitting node name.
    pub transmitter: String,
    /// Receiving node names, first-seen order, no duplicates.
    pub receivers: Vec<String>,
    /// CAN identifier masked to 29 bits.
    pub id: u32,
    /// Declared payload length in bytes.
    pub dlc: u16,

    // --- Snapshot of the identifier ---
    pub pgn: u32,
    pub priority: u8,
    pub source_address: u8,
    pub destination_address: u8,

    // --- Vendor attributes ---
    pub ignore_source_address: bool,
    pub notify_stale: bool,
    /// Stale timeout in ms.
    pub stale_timeout_period: u32,
    /// Rate limit in ms.
    pub rate_limit: u32,
    pub ignore_duplicate: bool,
    pub transmit_mode: TransmitMode,
    /// Transmit rate in ms.
    pub transmit_rate: u32,

    /// Signals, sorted by start position once the frame block is parsed.
    pub signals: Vec<SignalKey>,
}

impl FrameDBC {
    /// Builds a frame from its `BO_` header fields, decoding the J1939
    /// addressing from `raw_id`.
    pub fn new(name: &str, transmitter: &str, raw_id: u32, dlc: u16) -> Self {
        let id: u32 = raw_id & CAN_EFF_MASK;
        let addressing: J1939Id = J1939Id::decompose(id);

        FrameDBC {
            name: name.to_string(),
            transmitter: transmitter.to_string(),
            receivers: Vec::new(),
            id,
            dlc,
            pgn: addressing.pgn,
            priority: addressing.priority,
            source_address: addressing.source_address,
            destination_address: addressing.destination_address,
            ignore_source_address: false,
            notify_stale: false,
            stale_timeout_period: 0,
            rate_limit: 250,
            ignore_duplicate: true,
            transmit_mode: TransmitMode::OnChange,
            transmit_rate: 1000,
            signals: Vec::new(),
        }
    }

    /// Adds `name` to the receivers unless already present.
    pub fn add_receiver(&mut self, name: &str) {
        if !self.receivers.iter().any(|r| r == name) {
            self.receivers.push(name.to_string());
        }
    }

    pub fn is_received_by(&self, node: &str) -> bool {
        self.receivers.iter().any(|r| r == node)
    }

    pub fn is_transmitted_by(&self, node: &str) -> bool {
        self.transmitter == node
    }

    /// Convenience iterator over the `SignalDBC`s belonging to this frame.
    pub fn signals<'a>(&'a self, db: &'a DatabaseDBC) -> impl Iterator<Item = &'a SignalDBC> + 'a {
        self.signals
            .iter()
            .filter_map(move |&key| db.get_signal_by_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_snapshot() {
        let frame: FrameDBC = FrameDBC::new("EEC1", "Engine", 0x8CF0_0400, 8);
        assert_eq!(frame.id, 0x0CF0_0400);
        assert_eq!(frame.pgn, 0xF004);
        assert_eq!(frame.priority, 3);
        assert_eq!(frame.source_address, 0x00);
        assert_eq!(frame.destination_address, 0xFF);
        assert_eq!(frame.rate_limit, 250);
        assert_eq!(frame.transmit_rate, 1000);
        assert_eq!(frame.transmit_mode, TransmitMode::OnChange);
        assert!(frame.ignore_duplicate);
        assert!(!frame.ignore_source_address);
        assert!(!frame.notify_stale);
        assert_eq!(frame.stale_timeout_period, 0);
    }

    #[test]
    fn receivers_are_deduplicated_in_first_seen_order() {
        let mut frame: FrameDBC = FrameDBC::new("TSC1", "Body", 0x0C00_0021, 8);
        for name in ["Engine", "Cab", "Engine", "Trans", "Cab"] {
            frame.add_receiver(name);
        }
        assert_eq!(frame.receivers, vec!["Engine", "Cab", "Trans"]);
        assert!(frame.is_received_by("Trans"));
        assert!(frame.is_transmitted_by("Body"));
        assert!(!frame.is_transmitted_by("Engine"));
    }

    #[test]
    fn transmit_mode_indices() {
        assert_eq!(TransmitMode::from_index(0), TransmitMode::Periodic);
        assert_eq!(TransmitMode::from_index(1), TransmitMode::PeriodicOnChange);
        assert_eq!(TransmitMode::from_index(2), TransmitMode::OnRequest);
        assert_eq!(TransmitMode::from_index(3), TransmitMode::OnChange);
        assert_eq!(TransmitMode::from_index(42), TransmitMode::OnChange);
    }
}
