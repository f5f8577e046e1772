//! # j1939
//!
//! Addressing fields carried by a 29-bit J1939 CAN identifier.

/// Mask keeping the 29 significant bits of an extended CAN identifier.
pub const CAN_EFF_MASK: u32 = 0x1FFF_FFFF;

/// First PDU Format value of the broadcast-only (PDU2) range.
pub const PDU2_THRESHOLD: u32 = 0xF0;

/// Destination address used by broadcast (PDU2) messages.
pub const BROADCAST_ADDRESS: u8 = 0xFF;

const PRIORITY_MASK: u32 = 0x1C00_0000;
const PRIORITY_SHIFT: u32 = 26;

/// Addressing snapshot decoded from a raw CAN identifier.
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
pub struct J1939Id {
    /// Parameter Group Number.
    pub pgn: u32,
    /// Priority (bits 26..=28).
    pub priority: u8,
    /// Source address (low byte).
    pub source_address: u8,
    /// Destination address, `0xFF` for PDU2 messages.
    pub destination_address: u8,
}

impl J1939Id {
    /// Decomposes `id` into PGN, priority, source and destination address.
    ///
    /// The three upper bits of `id` are discarded. The function is total: any
    /// value yields a result, there is no validation.
    ///
    /// # Example
    /// ```
    /// use dbc2phd::J1939Id;
    ///
    /// // priority 6, PGN 0xFEF1 (CCVS), SA 0x00
    /// let id = J1939Id::decompose(0x18FE_F100);
    /// assert_eq!(id.pgn, 0xFEF1);
    /// assert_eq!(id.priority, 6);
    /// assert_eq!(id.destination_address, 0xFF);
    /// ```
    pub fn decompose(id: u32) -> Self {
        let id: u32 = id & CAN_EFF_MASK;

        let pdu_format: u32 = (id >> 16) & 0xFF;
        let pdu_specific: u32 = (id >> 8) & 0xFF;

        let (pgn, destination_address) = if pdu_format < PDU2_THRESHOLD {
            // PDU1: the PS field is a destination address
            (pdu_format << 8, pdu_specific as u8)
        } else {
            // PDU2: the PS field is a group extension
            ((pdu_format << 8) | pdu_specific, BROADCAST_ADDRESS)
        };

        J1939Id {
            pgn,
            priority: ((id & PRIORITY_MASK) >> PRIORITY_SHIFT) as u8,
            source_address: (id & 0xFF) as u8,
            destination_address,
        }
    }

    /// True when the identifier belongs to the broadcast-only PDU2 range.
    pub fn is_pdu2(&self) -> bool {
        (self.pgn >> 8) >= PDU2_THRESHOLD
    }
}

impl From<u32> for J1939Id {
    fn from(id: u32) -> Self {
        J1939Id::decompose(id)
    }
}
