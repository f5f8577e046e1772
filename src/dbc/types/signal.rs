use serde::Serialize;

use crate::dbc::types::database::FrameKey;

/// Byte order of a signal (`@0` Motorola / big, `@1` Intel / little).
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    Big,
    #[default]
    Little,
}

impl Endianness {
    /// Decodes the byte-order character following `@` in a signal layout.
    pub fn from_dbc_char(c: char) -> Self {
        if c == '0' {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }
}

/// Payload interpretation selected by `PHD_SignalDataType`.
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalDataType {
    #[default]
    Integer,
    Raw,
    String,
}

impl SignalDataType {
    /// Maps the enum index of `PHD_SignalDataType` (`integer`, `raw`, `string`).
    /// Unknown indices fall back to `Integer`.
    pub fn from_index(idx: u32) -> Self {
        match idx {
            1 => SignalDataType::Raw,
            2 => SignalDataType::String,
            _ => SignalDataType::Integer,
        }
    }
}

/// Bit field of a frame payload.
#[derive(Default, Clone, PartialEq, Eq, Debug)]
pub struct SignalDBC {
    /// Owning frame.
    pub frame: FrameKey,
    /// Signal name, unique within its frame.
    pub name: String,
    /// Start bit in the payload.
    pub start_position: u32,
    /// Bit length as declared on the `SG_` line.
    pub bit_length: u32,
    pub endian: Endianness,
    pub data_type: SignalDataType,
    /// Length in bytes, only meaningful for `SignalDataType::String`.
    pub string_length: u32,
}

impl SignalDBC {
    /// Bit length reported to consumers: `string_length * 8` for string
    /// signals, the declared bit length otherwise. The product wraps at 32 bits.
    pub fn effective_length(&self) -> u32 {
        match self.data_type {
            SignalDataType::String => self.string_length.wrapping_mul(8),
            _ => self.bit_length,
        }
    }
}
