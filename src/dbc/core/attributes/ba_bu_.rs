use tracing::{debug, warn};

use crate::dbc::core::{attributes::numeric_value, strings};
use crate::dbc::types::{
    attributes::*,
    database::DatabaseDBC,
    errors::DbcParseError,
    node::NodeDBC,
};

/// `BA_ "Attribute" BU_ <node_name> <value>;`
///
/// `parts` holds exactly five whitespace tokens. Unknown attributes and
/// unknown nodes are skipped.
pub(crate) fn decode(
    db: &mut DatabaseDBC,
    parts: &[&str],
    line_no: usize,
) -> Result<(), DbcParseError> {
    // 1) Attribute name (e.g., "\"NmStationAddress\"")
    let attr_name: &str = parts[1].trim_matches('"');
    let Some(attr) = vendor_attribute(attr_name, AttrObject::Node) else {
        return Ok(());
    };

    // 2) Node name and value
    let node_name: &str = parts[3];
    let value: &str = strings::attribute_value(parts[4]);

    // 3) Lookup
    let Some(node) = db.get_node_by_name_mut(node_name) else {
        warn!(
            line = line_no,
            node = node_name,
            attribute = attr_name,
            "attribute targets an unknown node",
        );
        return Ok(());
    };

    // 4) Assign
    if attr.name == PHD_DM1_CONFIG_PATH {
        node.dm1_config_path = value.to_string();
    } else {
        let num: u32 = numeric_value(attr, value, line_no)?;
        assign(node, attr.name, num);
    }
    debug!(
        line = line_no,
        node = node_name,
        attribute = attr_name,
        value,
        "applied node attribute",
    );
    Ok(())
}

fn assign(node: &mut NodeDBC, attr_name: &str, num: u32) {
    match attr_name {
        NM_STATION_ADDRESS => node.station_address = num,
        NM_J1939_AAC => node.arbitrary_address_capable = num,
        NM_J1939_IDENTITY_NUMBER => node.identity_number = num,
        NM_J1939_INDUSTRY_GROUP => node.industry_group = num,
        NM_J1939_SYSTEM_INSTANCE => node.vehicle_system_instance = num,
        NM_J1939_SYSTEM => node.vehicle_system = num,
        NM_J1939_FUNCTION => node.function = num,
        NM_J1939_FUNCTION_INSTANCE => node.function_instance = num,
        NM_J1939_MANUFACTURER_CODE => node.manufacturer_code = num,
        NM_J1939_ECU_INSTANCE => node.ecu_instance = num,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(db: &mut DatabaseDBC, line: &str) -> Result<(), DbcParseError> {
        decode(db, &strings::tokens(line), 1)
    }

    #[test]
    fn node_fields() {
        let mut db: DatabaseDBC = DatabaseDBC::default();
        db.add_node_if_absent("Engine");

        apply(&mut db, "BA_ \"NmStationAddress\" BU_ Engine 0;").unwrap();
        apply(&mut db, "BA_ \"NmJ1939AAC\" BU_ Engine 1;").unwrap();
        apply(&mut db, "BA_ \"NmJ1939IdentityNumber\" BU_ Engine 123456;").unwrap();
        apply(&mut db, "BA_ \"NmJ1939IndustryGroup\" BU_ Engine 1;").unwrap();
        apply(&mut db, "BA_ \"NmJ1939SystemInstance\" BU_ Engine 2;").unwrap();
        apply(&mut db, "BA_ \"NmJ1939System\" BU_ Engine 3;").unwrap();
        apply(&mut db, "BA_ \"NmJ1939Function\" BU_ Engine 4;").unwrap();
        apply(&mut db, "BA_ \"NmJ1939FunctionInstance\" BU_ Engine 5;").unwrap();
        apply(&mut db, "BA_ \"NmJ1939ManufacturerCode\" BU_ Engine 6;").unwrap();
        apply(&mut db, "BA_ \"NmJ1939ECUInstance\" BU_ Engine 2;").unwrap();
        apply(
            &mut db,
            "BA_ \"PHD_DM1_configPath\" BU_ Engine \"config/dm1_engine.json\";",
        )
        .unwrap();

        let node: &NodeDBC = db.get_node_by_name("Engine").unwrap();
        assert_eq!(node.station_address, 0);
        assert_eq!(node.arbitrary_address_capable, 1);
        assert_eq!(node.identity_number, 123456);
        assert_eq!(node.industry_group, 1);
        assert_eq!(node.vehicle_system_instance, 2);
        assert_eq!(node.vehicle_system, 3);
        assert_eq!(node.function, 4);
        assert_eq!(node.function_instance, 5);
        assert_eq!(node.manufacturer_code, 6);
        assert_eq!(node.ecu_instance, 2);
        assert_eq!(node.dm1_config_path, "config/dm1_engine.json");
    }

    #[test]
    fn misses_are_ignored() {
        let mut db: DatabaseDBC = DatabaseDBC::default();
        db.add_node_if_absent("Engine");

        // unknown node: no conversion is attempted
        apply(&mut db, "BA_ \"NmStationAddress\" BU_ Ghost abc;").unwrap();
        // unknown attribute
        apply(&mut db, "BA_ \"NodeLayerModules\" BU_ Engine \"CANoeILNLVector.dll\";").unwrap();
        assert_eq!(db.get_node_by_name("Engine").unwrap(), &NodeDBC::new("Engine"));
    }

    #[test]
    fn bad_number_is_fatal() {
        let mut db: DatabaseDBC = DatabaseDBC::default();
        db.add_node_if_absent("Engine");
        assert!(matches!(
            apply(&mut db, "BA_ \"NmStationAddress\" BU_ Engine x1;"),
            Err(DbcParseError::InvalidNumber { .. })
        ));
    }
}
