/// Default J1939 source address of a controller application (null address).
pub const DEFAULT_STATION_ADDRESS: u32 = 0xFE;

/// Controller application (ECU) declared on the `BU_` line.
///
/// Every field except `name` may be overridden by a `BA_ "..." BU_` line.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NodeDBC {
    /// Node name, unique within a database.
    pub name: String,
    /// Source address (`NmStationAddress`).
    pub station_address: u32,
    /// Diagnostic (DM1) configuration path (`PHD_DM1_configPath`).
    pub dm1_config_path: String,

    // --- J1939 NAME sub-fields ---
    pub arbitrary_address_capable: u32,
    pub identity_number: u32,
    pub industry_group: u32,
    pub vehicle_system_instance: u32,
    pub vehicle_system: u32,
    pub function: u32,
    pub function_instance: u32,
    pub manufacturer_code: u32,
    pub ecu_instance: u32,
}

impl Default for NodeDBC {
    fn default() -> Self {
        NodeDBC {
            name: String::new(),
            station_address: DEFAULT_STATION_ADDRESS,
            dm1_config_path: String::new(),
            arbitrary_address_capable: 0,
            identity_number: 0,
            industry_group: 0,
            vehicle_system_instance: 0,
            vehicle_system: 0,
            function: 0,
            function_instance: 0,
            manufacturer_code: 0,
            ecu_instance: 0,
        }
    }
}

impl NodeDBC {
    /// Creates a node carrying the documented defaults.
    pub fn new(name: &str) -> Self {
        NodeDBC {
            name: name.to_string(),
            ..Default::default()
        }
    }
}
