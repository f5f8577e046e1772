//! Serializable shape of the PHD configuration.
//!
//! Field order in each struct is the key order of the emitted JSON.

use serde::Serialize;

use crate::dbc::types::{
    database::DatabaseDBC,
    frame::{FrameDBC, TransmitMode},
    node::NodeDBC,
    signal::{Endianness, SignalDBC, SignalDataType},
};

/// CAN interface the controller applications are bound to.
pub const DEVICE_NAME: &str = "can0";
/// Protocol mode of the interface.
pub const MODE: &str = "J1939";

#[derive(Serialize, Debug)]
pub(crate) struct Document<'a> {
    pub interfaces: Vec<Interface<'a>>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Interface<'a> {
    pub device_name: &'static str,
    pub mode: &'static str,
    pub controller_applications: Vec<ControllerApplication<'a>>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ControllerApplication<'a> {
    pub address: u32,
    pub name: J1939Name,
    #[serde(rename = "DM1")]
    pub dm1: &'a str,
    pub receive_messages: Vec<ReceiveMessage<'a>>,
    pub transmit_messages: Vec<TransmitMessage<'a>>,
}

/// 64-bit J1939 NAME, field by field.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct J1939Name {
    pub arb_address_capable: u32,
    pub identity_number: u32,
    pub industry_group: u32,
    pub vehicle_system_instance: u32,
    pub vehicle_system: u32,
    pub function: u32,
    pub function_instance: u32,
    pub ecu_instance: u32,
    pub manufacturer_code: u32,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReceiveMessage<'a> {
    pub pgn: u32,
    pub ignore_source_address: bool,
    pub source_address: u8,
    pub notify_stale: bool,
    pub stale_timeout_period: u32,
    pub length: u16,
    pub rate_limit: u32,
    pub ignore_duplicate: bool,
    pub parameters: Vec<Parameter<'a>>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransmitMessage<'a> {
    pub pgn: u32,
    pub destination_address: u8,
    pub length: u16,
    pub priority: u8,
    pub ignore_duplicate: bool,
    pub transmit_mode: TransmitMode,
    pub transmit_rate: u32,
    pub parameters: Vec<Parameter<'a>>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Parameter<'a> {
    pub name: &'a str,
    pub start_position: u32,
    pub length: u32,
    pub endian: Endianness,
    pub data_type: SignalDataType,
}

impl<'a> Document<'a> {
    /// Single `can0` interface holding one controller application per node.
    pub fn new(db: &'a DatabaseDBC, nodes: &[&'a NodeDBC]) -> Self {
        let controller_applications: Vec<ControllerApplication<'a>> = nodes
            .iter()
            .map(|node| ControllerApplication::new(db, node))
            .collect();
        Document {
            interfaces: vec![Interface {
                device_name: DEVICE_NAME,
                mode: MODE,
                controller_applications,
            }],
        }
    }
}

impl<'a> ControllerApplication<'a> {
    fn new(db: &'a DatabaseDBC, node: &'a NodeDBC) -> Self {
        ControllerApplication {
            address: node.station_address,
            name: J1939Name::from(node),
            dm1: &node.dm1_config_path,
            receive_messages: db
                .rx_frames_of(&node.name)
                .map(|f| ReceiveMessage::new(db, f))
                .collect(),
            transmit_messages: db
                .tx_frames_of(&node.name)
                .map(|f| TransmitMessage::new(db, f))
                .collect(),
        }
    }
}

impl From<&NodeDBC> for J1939Name {
    fn from(node: &NodeDBC) -> Self {
        J1939Name {
            arb_address_capable: node.arbitrary_address_capable,
            identity_number: node.identity_number,
            industry_group: node.industry_group,
            vehicle_system_instance: node.vehicle_system_instance,
            vehicle_system: node.vehicle_system,
            function: node.function,
            function_instance: node.function_instance,
            ecu_instance: node.ecu_instance,
            manufacturer_code: node.manufacturer_code,
        }
    }
}

impl<'a> ReceiveMessage<'a> {
    fn new(db: &'a DatabaseDBC, frame: &'a FrameDBC) -> Self {
        ReceiveMessage {
            pgn: frame.pgn,
            ignore_source_address: frame.ignore_source_address,
            source_address: frame.source_address,
            notify_stale: frame.notify_stale,
            stale_timeout_period: frame.stale_timeout_period,
            length: frame.dlc,
            rate_limit: frame.rate_limit,
            ignore_duplicate: frame.ignore_duplicate,
            parameters: frame.signals(db).map(Parameter::from).collect(),
        }
    }
}

impl<'a> TransmitMessage<'a> {
    fn new(db: &'a DatabaseDBC, frame: &'a FrameDBC) -> Self {
        TransmitMessage {
            pgn: frame.pgn,
            destination_address: frame.destination_address,
            length: frame.dlc,
            priority: frame.priority,
            ignore_duplicate: frame.ignore_duplicate,
            transmit_mode: frame.transmit_mode,
            transmit_rate: frame.transmit_rate,
            parameters: frame.signals(db).map(Parameter::from).collect(),
        }
    }
}

impl<'a> From<&'a SignalDBC> for Parameter<'a> {
    fn from(sig: &'a SignalDBC) -> Self {
        Parameter {
            name: &sig.name,
            start_position: sig.start_position,
            length: sig.effective_length(),
            endian: sig.endian,
            data_type: sig.data_type,
        }
    }
}
