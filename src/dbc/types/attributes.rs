// --- Node attributes ---
pub const NM_STATION_ADDRESS: &str = "NmStationAddress";
pub const NM_J1939_AAC: &str = "NmJ1939AAC";
pub const NM_J1939_IDENTITY_NUMBER: &str = "NmJ1939IdentityNumber";
pub const NM_J1939_INDUSTRY_GROUP: &str = "NmJ1939IndustryGroup";
pub const NM_J1939_SYSTEM_INSTANCE: &str = "NmJ1939SystemInstance";
pub const NM_J1939_SYSTEM: &str = "NmJ1939System";
pub const NM_J1939_FUNCTION: &str = "NmJ1939Function";
pub const NM_J1939_FUNCTION_INSTANCE: &str = "NmJ1939FunctionInstance";
pub const NM_J1939_MANUFACTURER_CODE: &str = "NmJ1939ManufacturerCode";
pub const NM_J1939_ECU_INSTANCE: &str = "NmJ1939ECUInstance";
pub const PHD_DM1_CONFIG_PATH: &str = "PHD_DM1_configPath";

// --- Frame attributes ---
pub const PHD_IGNORE_SOURCE_ADDRESS: &str = "PHD_ignoreSourceAddress";
pub const PHD_NOTIFY_STALE: &str = "PHD_notifyStale";
pub const PHD_STALE_TIMEOUT_PERIOD: &str = "PHD_staleTimeoutPeriod";
pub const PHD_RATE_LIMIT: &str = "PHD_rateLimit";
pub const PHD_IGNORE_DUPLICATE: &str = "PHD_ignoreDuplicate";
pub const GEN_MSG_SEND_TYPE: &str = "GenMsgSendType";
pub const GEN_MSG_CYCLE_TIME: &str = "GenMsgCycleTime";

// --- Signal attributes ---
pub const PHD_SIGNAL_DATA_TYPE: &str = "PHD_SignalDataType";
pub const PHD_STRING_LENGTH: &str = "PHD_stringLength";

const NO_YES: &[&str] = &["No", "Yes"];

/// Object an attribute is attached to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AttrObject {
    Node,
    Frame,
    Signal,
}

impl AttrObject {
    /// DBC keyword of the object class (`BU_`, `BO_`, `SG_`).
    pub fn keyword(&self) -> &'static str {
        match self {
            AttrObject::Node => "BU_",
            AttrObject::Frame => "BO_",
            AttrObject::Signal => "SG_",
        }
    }

    /// Inverse of [`AttrObject::keyword`].
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "BU_" => Some(AttrObject::Node),
            "BO_" => Some(AttrObject::Frame),
            "SG_" => Some(AttrObject::Signal),
            _ => None,
        }
    }
}

/// Value type of a vendor attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AttrType {
    Int { min: u32, max: u32 },
    String,
    Enum(&'static [&'static str]),
}

/// Default carried by the `BA_DEF_DEF_` line of a vendor attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AttrDefault {
    Int(u32),
    Str(&'static str),
}

/// One entry of the fixed vendor attribute set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VendorAttribute {
    pub name: &'static str,
    pub object: AttrObject,
    pub kind: AttrType,
    pub default: AttrDefault,
}

impl VendorAttribute {
    const fn int(name: &'static str, object: AttrObject, max: u32, default: u32) -> Self {
        VendorAttribute {
            name,
            object,
            kind: AttrType::Int { min: 0, max },
            default: AttrDefault::Int(default),
        }
    }

    const fn enumeration(
        name: &'static str,
        object: AttrObject,
        values: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        VendorAttribute {
            name,
            object,
            kind: AttrType::Enum(values),
            default: AttrDefault::Str(default),
        }
    }

    /// Attribute name as it appears in DBC text (`"Name"`).
    pub fn quoted_name(&self) -> String {
        format!("\"{}\"", self.name)
    }

    /// `BA_DEF_` line declaring this attribute.
    pub fn definition_line(&self) -> String {
        let kind: String = match self.kind {
            AttrType::Int { min, max } => format!("INT {} {}", min, max),
            AttrType::String => "STRING ".to_string(),
            AttrType::Enum(values) => {
                let quoted: Vec<String> = values.iter().map(|v| format!("\"{}\"", v)).collect();
                format!("ENUM  {}", quoted.join(","))
            }
        };
        format!("BA_DEF_ {}  {} {};", self.object.keyword(), self.quoted_name(), kind)
    }

    /// `BA_DEF_DEF_` line carrying this attribute's default.
    pub fn default_line(&self) -> String {
        match self.default {
            AttrDefault::Int(v) => format!("BA_DEF_DEF_  {} {};", self.quoted_name(), v),
            AttrDefault::Str(s) => format!("BA_DEF_DEF_  {} \"{}\";", self.quoted_name(), s),
        }
    }

    /// True when `value` lies outside the declared range. Strings never are.
    pub fn is_out_of_range(&self, value: u32) -> bool {
        match self.kind {
            AttrType::Int { min, max } => value < min || value > max,
            AttrType::Enum(values) => value as usize >= values.len(),
            AttrType::String => false,
        }
    }
}

/// Fixed vendor attribute set, in canonical declaration order.
pub const VENDOR_ATTRIBUTES: [VendorAttribute; 20] = [
    VendorAttribute::int(NM_STATION_ADDRESS, AttrObject::Node, 255, 254),
    VendorAttribute::int(NM_J1939_AAC, AttrObject::Node, 1, 0),
    VendorAttribute::int(NM_J1939_IDENTITY_NUMBER, AttrObject::Node, 2_097_151, 0),
    VendorAttribute::int(NM_J1939_INDUSTRY_GROUP, AttrObject::Node, 7, 0),
    VendorAttribute::int(NM_J1939_SYSTEM_INSTANCE, AttrObject::Node, 15, 0),
    VendorAttribute::int(NM_J1939_SYSTEM, AttrObject::Node, 127, 0),
    VendorAttribute::int(NM_J1939_FUNCTION, AttrObject::Node, 255, 0),
    VendorAttribute::int(NM_J1939_FUNCTION_INSTANCE, AttrObject::Node, 7, 0),
    VendorAttribute::int(NM_J1939_MANUFACTURER_CODE, AttrObject::Node, 2047, 0),
    VendorAttribute::int(NM_J1939_ECU_INSTANCE, AttrObject::Node, 3, 0),
    VendorAttribute {
        name: PHD_DM1_CONFIG_PATH,
        object: AttrObject::Node,
        kind: AttrType::String,
        default: AttrDefault::Str("config/dm1_ca40.json"),
    },
    VendorAttribute::enumeration(PHD_IGNORE_SOURCE_ADDRESS, AttrObject::Frame, NO_YES, "No"),
    VendorAttribute::enumeration(PHD_NOTIFY_STALE, AttrObject::Frame, NO_YES, "No"),
    VendorAttribute::int(PHD_STALE_TIMEOUT_PERIOD, AttrObject::Frame, 3_600_000, 0),
    VendorAttribute::int(PHD_RATE_LIMIT, AttrObject::Frame, 3_600_000, 250),
    VendorAttribute::enumeration(PHD_IGNORE_DUPLICATE, AttrObject::Frame, NO_YES, "Yes"),
    VendorAttribute::enumeration(
        GEN_MSG_SEND_TYPE,
        AttrObject::Frame,
        &["cyclic", "cyclicOnChange", "onRequest", "onChange"],
        "onChange",
    ),
    VendorAttribute::int(GEN_MSG_CYCLE_TIME, AttrObject::Frame, 3_600_000, 1000),
    VendorAttribute::enumeration(
        PHD_SIGNAL_DATA_TYPE,
        AttrObject::Signal,
        &["integer", "raw", "string"],
        "integer",
    ),
    VendorAttribute::int(PHD_STRING_LENGTH, AttrObject::Signal, 1785, 0),
];

/// Looks up a vendor attribute by name and owning object.
pub fn vendor_attribute(name: &str, object: AttrObject) -> Option<&'static VendorAttribute> {
    VENDOR_ATTRIBUTES
        .iter()
        .find(|a| a.object == object && a.name == name)
}

/// True when `name` is one of the vendor attributes, whatever its owner.
pub fn is_vendor_attribute(name: &str) -> bool {
    VENDOR_ATTRIBUTES.iter().any(|a| a.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_lines() {
        let station = vendor_attribute(NM_STATION_ADDRESS, AttrObject::Node).unwrap();
        assert_eq!(station.quoted_name(), "\"NmStationAddress\"");
        assert_eq!(station.definition_line(), "BA_DEF_ BU_  \"NmStationAddress\" INT 0 255;");
        assert_eq!(station.default_line(), "BA_DEF_DEF_  \"NmStationAddress\" 254;");

        let dm1 = vendor_attribute(PHD_DM1_CONFIG_PATH, AttrObject::Node).unwrap();
        assert_eq!(dm1.definition_line(), "BA_DEF_ BU_  \"PHD_DM1_configPath\" STRING ;");
        assert_eq!(
            dm1.default_line(),
            "BA_DEF_DEF_  \"PHD_DM1_configPath\" \"config/dm1_ca40.json\";"
        );

        let send_type = vendor_attribute(GEN_MSG_SEND_TYPE, AttrObject::Frame).unwrap();
        assert_eq!(
            send_type.definition_line(),
            "BA_DEF_ BO_  \"GenMsgSendType\" ENUM  \"cyclic\",\"cyclicOnChange\",\"onRequest\",\"onChange\";"
        );
        assert_eq!(send_type.default_line(), "BA_DEF_DEF_  \"GenMsgSendType\" \"onChange\";");
    }

    #[test]
    fn lookup_respects_owner() {
        assert!(vendor_attribute(PHD_RATE_LIMIT, AttrObject::Frame).is_some());
        assert!(vendor_attribute(PHD_RATE_LIMIT, AttrObject::Node).is_none());
        assert!(is_vendor_attribute(PHD_STRING_LENGTH));
        assert!(!is_vendor_attribute("GenSigStartValue"));
    }

    #[test]
    fn ranges() {
        let aac = vendor_attribute(NM_J1939_AAC, AttrObject::Node).unwrap();
        assert!(!aac.is_out_of_range(1));
        assert!(aac.is_out_of_range(2));
        let data_type = vendor_attribute(PHD_SIGNAL_DATA_TYPE, AttrObject::Signal).unwrap();
        assert!(!data_type.is_out_of_range(2));
        assert!(data_type.is_out_of_range(3));
    }
}
